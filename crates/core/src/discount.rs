//! Discount domain types.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// What kind of reduction the discount grants.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DiscountKind {
    /// Percentage off (stored as the merchant-entered 0..100 value).
    Percentage,
    /// Fixed amount off in the shop currency.
    FixedAmount,
}

impl std::fmt::Display for DiscountKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Percentage => write!(f, "Percentage"),
            Self::FixedAmount => write!(f, "Fixed Amount"),
        }
    }
}

/// How the discount is applied at checkout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DiscountMethod {
    /// Customers enter a code at checkout.
    Code,
    /// Applied automatically, no code involved.
    Automatic,
}

impl std::fmt::Display for DiscountMethod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Code => write!(f, "Code"),
            Self::Automatic => write!(f, "Automatic"),
        }
    }
}

/// Which items the discount applies to.
///
/// The id lists hold Shopify global IDs (e.g. `gid://shopify/Product/123`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DiscountScope {
    /// Every product in the store.
    AllProducts,
    /// Specific products. Never empty after normalization.
    Products(Vec<String>),
    /// Specific collections. Never empty after normalization.
    Collections(Vec<String>),
}

/// Optional cart threshold the discount requires.
///
/// Subtotal and quantity are mutually exclusive; absence means "no minimum",
/// which the Admin API treats differently from a threshold of zero.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MinimumPurchase {
    /// Cart subtotal must be at least this amount.
    Subtotal(Decimal),
    /// Cart must contain at least this many items.
    Quantity(i64),
}

/// A validated, ready-to-send discount creation request.
///
/// Produced by [`crate::form::DiscountForm::normalize`]; consumed by
/// [`crate::payload::MutationPayload::for_request`]. Ephemeral - it exists
/// only for the duration of one create call.
#[derive(Debug, Clone, PartialEq)]
pub struct DiscountRequest {
    /// Merchant-facing name, non-empty.
    pub title: String,
    /// Percentage or fixed amount.
    pub kind: DiscountKind,
    /// Code or automatic.
    pub method: DiscountMethod,
    /// Raw merchant-entered value, always positive. For percentages this is
    /// the 0..100 figure; the payload builder converts to a fraction.
    pub value: Decimal,
    /// Eligible items.
    pub scope: DiscountScope,
    /// Optional cart threshold.
    pub minimum: Option<MinimumPurchase>,
    /// Redeem code. Always `Some` when `method` is [`DiscountMethod::Code`].
    pub code: Option<String>,
    /// Activation time; the payload builder substitutes "now" when absent.
    pub starts_at: Option<DateTime<Utc>>,
    /// Expiry time; absent means open-ended.
    pub ends_at: Option<DateTime<Utc>>,
}

/// Which node namespace a discount record lives in.
///
/// The Admin API issues different global IDs for code-created and
/// automatic-created discounts, and the numeric tail alone does not say
/// which. See [`crate::gid`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DiscountNodeKind {
    /// `gid://shopify/DiscountAutomaticNode/...`
    Automatic,
    /// `gid://shopify/DiscountCodeNode/...`
    Code,
}

impl std::fmt::Display for DiscountNodeKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Automatic => write!(f, "Automatic discount"),
            Self::Code => write!(f, "Code discount"),
        }
    }
}

/// Discount lifecycle status as reported by the Admin API.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DiscountStatus {
    /// Discount is active.
    Active,
    /// Discount is expired.
    Expired,
    /// Discount is scheduled.
    Scheduled,
}

impl std::fmt::Display for DiscountStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Active => write!(f, "Active"),
            Self::Expired => write!(f, "Expired"),
            Self::Scheduled => write!(f, "Scheduled"),
        }
    }
}

/// Read model for a discount fetched from the Admin API.
///
/// Owned entirely by the remote platform; the application never persists it,
/// only re-fetches by id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiscountRecord {
    /// Fully-qualified global id.
    pub id: String,
    /// Automatic or code node.
    pub kind: DiscountNodeKind,
    /// Merchant-facing title.
    pub title: String,
    /// Lifecycle status.
    pub status: DiscountStatus,
    /// ISO 8601 activation time as returned by the API.
    pub starts_at: Option<String>,
    /// ISO 8601 expiry time as returned by the API.
    pub ends_at: Option<String>,
    /// Redeemable codes; empty for automatic discounts.
    pub codes: Vec<String>,
}

impl DiscountRecord {
    /// First redeemable code, if any.
    #[must_use]
    pub fn first_code(&self) -> Option<&str> {
        self.codes.first().map(String::as_str)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_impls() {
        assert_eq!(DiscountKind::FixedAmount.to_string(), "Fixed Amount");
        assert_eq!(DiscountMethod::Automatic.to_string(), "Automatic");
        assert_eq!(DiscountStatus::Scheduled.to_string(), "Scheduled");
        assert_eq!(
            DiscountNodeKind::Code.to_string(),
            "Code discount"
        );
    }

    #[test]
    fn status_serde_uses_screaming_snake_case() {
        let status: DiscountStatus = serde_json::from_str("\"ACTIVE\"").expect("parse");
        assert_eq!(status, DiscountStatus::Active);
        assert_eq!(
            serde_json::to_string(&DiscountStatus::Scheduled).expect("serialize"),
            "\"SCHEDULED\""
        );
    }

    #[test]
    fn first_code_empty_for_automatic() {
        let record = DiscountRecord {
            id: "gid://shopify/DiscountAutomaticNode/1".to_string(),
            kind: DiscountNodeKind::Automatic,
            title: "Flash Sale".to_string(),
            status: DiscountStatus::Active,
            starts_at: None,
            ends_at: None,
            codes: vec![],
        };
        assert_eq!(record.first_code(), None);
    }
}
