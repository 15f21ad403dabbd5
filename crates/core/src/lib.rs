//! Discounts Galore Core - Domain library.
//!
//! This crate holds everything between a raw discount form and the Shopify
//! Admin API wire format:
//!
//! - [`discount`] - The validated discount domain model
//! - [`form`] - Form-field normalization and validation
//! - [`payload`] - Pure mapping from a [`discount::DiscountRequest`] to the
//!   create-discount GraphQL mutation
//! - [`gid`] - Global ID parsing and the automatic/code probing order
//!
//! # Architecture
//!
//! The core crate contains no I/O, no HTTP clients, and no persistence. The
//! admin binary owns the network boundary; everything here is deterministic
//! and unit-testable.

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod discount;
pub mod form;
pub mod gid;
pub mod payload;

pub use discount::*;
pub use form::{DiscountForm, FieldError, ValidationError};
pub use gid::DiscountGid;
pub use payload::MutationPayload;
