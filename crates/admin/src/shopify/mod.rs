//! Shopify Admin API client (HIGH PRIVILEGE).
//!
//! # Security
//!
//! The Admin API token carried here can create and modify store discounts.
//! Deploy only behind the merchant's protected network.
//!
//! # Architecture
//!
//! - Raw GraphQL over reqwest with typed serde responses; the mutation
//!   documents and variable shapes come from `discounts-galore-core`
//! - Direct API calls to Shopify, one outbound request per user action
//! - No retries: rate limits and errors surface to the caller immediately

pub mod client;
pub mod discounts;

pub use client::AdminClient;

use serde::Deserialize;
use thiserror::Error;

/// Errors that can occur when interacting with the Shopify Admin API.
#[derive(Debug, Error)]
pub enum AdminShopifyError {
    /// HTTP request failed.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// GraphQL query returned errors.
    #[error("GraphQL errors: {}", .0.join("; "))]
    GraphQL(Vec<String>),

    /// JSON parsing failed.
    #[error("JSON parse error: {0}")]
    Parse(#[from] serde_json::Error),

    /// Resource not found.
    #[error("Not found: {0}")]
    NotFound(String),

    /// Rate limited by Shopify.
    #[error("Rate limited, retry after {0} seconds")]
    RateLimited(u64),

    /// The Admin API rejected the access token.
    #[error("Unauthorized - check SHOPIFY_ADMIN_ACCESS_TOKEN")]
    Unauthorized,

    /// The mutation was rejected with user-facing field errors.
    ///
    /// Every returned error is carried so callers can display the full list,
    /// not just the first entry.
    #[error("Discount rejected: {}", format_user_errors(.0))]
    UserErrors(Vec<DiscountUserError>),
}

/// A user-facing field error from a discount mutation's `userErrors` list.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct DiscountUserError {
    /// Path to the offending input field.
    #[serde(default)]
    pub field: Option<Vec<String>>,
    /// Human-readable message.
    pub message: String,
    /// Machine-readable error code.
    #[serde(default)]
    pub code: Option<String>,
}

impl DiscountUserError {
    /// Dotted field path, empty when the API attached no field.
    #[must_use]
    pub fn field_path(&self) -> String {
        self.field.as_ref().map_or_else(String::new, |f| f.join("."))
    }
}

impl std::fmt::Display for DiscountUserError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let path = self.field_path();
        if path.is_empty() {
            write!(f, "{}", self.message)?;
        } else {
            write!(f, "{path}: {}", self.message)?;
        }
        if let Some(code) = &self.code {
            write!(f, " ({code})")?;
        }
        Ok(())
    }
}

fn format_user_errors(errors: &[DiscountUserError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}
