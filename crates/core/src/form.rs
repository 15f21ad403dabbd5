//! Discount form normalization.
//!
//! Takes the raw string fields of the create-discount form and produces a
//! validated [`DiscountRequest`], or a [`ValidationError`] listing every
//! missing or invalid field so the form can annotate all of them at once.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::Deserialize;
use thiserror::Error;

use crate::discount::{
    DiscountKind, DiscountMethod, DiscountRequest, DiscountScope, MinimumPurchase,
};

/// A single invalid or missing form field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldError {
    /// Form field name (e.g. `"title"`, `"minAmount"`).
    pub field: &'static str,
    /// Human-readable message suitable for inline display.
    pub message: String,
}

impl std::fmt::Display for FieldError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

/// Validation failure enumerating every offending field.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Invalid discount form: {}", format_field_errors(errors))]
pub struct ValidationError {
    /// All field-level problems found, in form order.
    pub errors: Vec<FieldError>,
}

impl ValidationError {
    /// Message for a given field, if that field was rejected.
    #[must_use]
    pub fn message_for(&self, field: &str) -> Option<&str> {
        self.errors
            .iter()
            .find(|e| e.field == field)
            .map(|e| e.message.as_str())
    }
}

fn format_field_errors(errors: &[FieldError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

/// Raw create-discount form fields, exactly as submitted.
///
/// Field names mirror the HTML form; every value arrives as a string and may
/// be empty. [`Self::normalize`] turns this into a [`DiscountRequest`].
#[derive(Debug, Clone, Default, Deserialize)]
pub struct DiscountForm {
    /// Discount title.
    #[serde(default)]
    pub title: String,
    /// `PERCENTAGE` or `FIXED_AMOUNT`.
    #[serde(default, rename = "type")]
    pub kind: String,
    /// `CODE` or `AUTOMATIC`.
    #[serde(default)]
    pub method: String,
    /// Discount value as entered.
    #[serde(default)]
    pub value: String,
    /// Comma-separated product global IDs.
    #[serde(default, rename = "productIds")]
    pub product_ids: String,
    /// Comma-separated collection global IDs.
    #[serde(default, rename = "collectionIds")]
    pub collection_ids: String,
    /// Minimum cart subtotal.
    #[serde(default, rename = "minAmount")]
    pub min_amount: String,
    /// Minimum cart quantity.
    #[serde(default, rename = "minQty")]
    pub min_qty: String,
    /// Activation time (RFC 3339).
    #[serde(default, rename = "startsAt")]
    pub starts_at: String,
    /// Expiry time (RFC 3339).
    #[serde(default, rename = "endsAt")]
    pub ends_at: String,
    /// Redeem code (only meaningful when method is CODE).
    #[serde(default)]
    pub code: String,
}

impl DiscountForm {
    /// Validate and normalize the form into a [`DiscountRequest`].
    ///
    /// # Errors
    ///
    /// Returns a [`ValidationError`] listing every missing or invalid field.
    /// Non-empty numeric fields that fail to parse are rejected rather than
    /// silently dropped.
    pub fn normalize(&self) -> Result<DiscountRequest, ValidationError> {
        let mut errors = Vec::new();

        let title = self.title.trim();
        if title.is_empty() {
            errors.push(FieldError {
                field: "title",
                message: "Title is required".to_string(),
            });
        }

        let kind = match self.kind.trim() {
            "PERCENTAGE" => Some(DiscountKind::Percentage),
            "FIXED_AMOUNT" => Some(DiscountKind::FixedAmount),
            other => {
                errors.push(FieldError {
                    field: "type",
                    message: format!("Unknown discount type \"{other}\""),
                });
                None
            }
        };

        let method = match self.method.trim() {
            "CODE" => Some(DiscountMethod::Code),
            "AUTOMATIC" => Some(DiscountMethod::Automatic),
            other => {
                errors.push(FieldError {
                    field: "method",
                    message: format!("Unknown discount method \"{other}\""),
                });
                None
            }
        };

        let value = match parse_decimal("value", &self.value, &mut errors) {
            Some(v) if v > Decimal::ZERO => Some(v),
            Some(_) => {
                errors.push(FieldError {
                    field: "value",
                    message: "Value must be greater than zero".to_string(),
                });
                None
            }
            None => {
                if self.value.trim().is_empty() {
                    errors.push(FieldError {
                        field: "value",
                        message: "Value is required".to_string(),
                    });
                }
                None
            }
        };

        let product_ids = split_id_list(&self.product_ids);
        let collection_ids = split_id_list(&self.collection_ids);
        let scope = infer_scope(product_ids, collection_ids);

        let min_amount = parse_decimal("minAmount", &self.min_amount, &mut errors);
        let min_qty = parse_integer("minQty", &self.min_qty, &mut errors);
        let minimum = resolve_minimum(min_amount, min_qty, &mut errors);

        let starts_at = parse_timestamp("startsAt", &self.starts_at, &mut errors);
        let ends_at = parse_timestamp("endsAt", &self.ends_at, &mut errors);
        if let (Some(start), Some(end)) = (starts_at, ends_at)
            && end < start
        {
            errors.push(FieldError {
                field: "endsAt",
                message: "End date must not be before the start date".to_string(),
            });
        }

        let code = match method {
            Some(DiscountMethod::Code) => {
                let trimmed = self.code.trim();
                if trimmed.is_empty() {
                    Some(default_code(title))
                } else {
                    Some(trimmed.to_string())
                }
            }
            _ => None,
        };

        if !errors.is_empty() {
            return Err(ValidationError { errors });
        }

        // All Nones are covered by the error check above.
        let (Some(kind), Some(method), Some(value)) = (kind, method, value) else {
            return Err(ValidationError { errors });
        };

        Ok(DiscountRequest {
            title: title.to_string(),
            kind,
            method,
            value,
            scope,
            minimum,
            code,
            starts_at,
            ends_at,
        })
    }
}

/// Split a comma-separated id list: trim entries, drop empties.
fn split_id_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(ToString::to_string)
        .collect()
}

/// Scope precedence policy: the first non-empty id list wins, products
/// checked before collections; neither populated means all products.
fn infer_scope(product_ids: Vec<String>, collection_ids: Vec<String>) -> DiscountScope {
    if !product_ids.is_empty() {
        DiscountScope::Products(product_ids)
    } else if !collection_ids.is_empty() {
        DiscountScope::Collections(collection_ids)
    } else {
        DiscountScope::AllProducts
    }
}

/// Minimum-purchase precedence policy: amount is checked before quantity and
/// the first non-zero value wins; zero and absent both mean "no minimum".
fn resolve_minimum(
    amount: Option<Decimal>,
    quantity: Option<i64>,
    errors: &mut Vec<FieldError>,
) -> Option<MinimumPurchase> {
    if let Some(amount) = amount.filter(|a| !a.is_zero()) {
        if amount < Decimal::ZERO {
            errors.push(FieldError {
                field: "minAmount",
                message: "Minimum amount must not be negative".to_string(),
            });
            return None;
        }
        return Some(MinimumPurchase::Subtotal(amount));
    }
    if let Some(quantity) = quantity.filter(|q| *q != 0) {
        if quantity < 0 {
            errors.push(FieldError {
                field: "minQty",
                message: "Minimum quantity must not be negative".to_string(),
            });
            return None;
        }
        return Some(MinimumPurchase::Quantity(quantity));
    }
    None
}

/// Default redeem code: the title with whitespace runs replaced by
/// underscores, upper-cased ("Summer Sale" -> "SUMMER_SALE").
fn default_code(title: &str) -> String {
    title
        .split_whitespace()
        .collect::<Vec<_>>()
        .join("_")
        .to_uppercase()
}

fn parse_decimal(field: &'static str, raw: &str, errors: &mut Vec<FieldError>) -> Option<Decimal> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }
    match raw.parse::<Decimal>() {
        Ok(value) => Some(value),
        Err(_) => {
            errors.push(FieldError {
                field,
                message: format!("\"{raw}\" is not a number"),
            });
            None
        }
    }
}

fn parse_integer(field: &'static str, raw: &str, errors: &mut Vec<FieldError>) -> Option<i64> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }
    match raw.parse::<i64>() {
        Ok(value) => Some(value),
        Err(_) => {
            errors.push(FieldError {
                field,
                message: format!("\"{raw}\" is not a whole number"),
            });
            None
        }
    }
}

fn parse_timestamp(
    field: &'static str,
    raw: &str,
    errors: &mut Vec<FieldError>,
) -> Option<DateTime<Utc>> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }
    match DateTime::parse_from_rfc3339(raw) {
        Ok(value) => Some(value.with_timezone(&Utc)),
        Err(_) => {
            errors.push(FieldError {
                field,
                message: format!("\"{raw}\" is not a valid RFC 3339 timestamp"),
            });
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_form() -> DiscountForm {
        DiscountForm {
            title: "Summer Sale".to_string(),
            kind: "PERCENTAGE".to_string(),
            method: "CODE".to_string(),
            value: "10".to_string(),
            ..DiscountForm::default()
        }
    }

    #[test]
    fn normalizes_a_minimal_code_discount() {
        let request = valid_form().normalize().expect("valid form");
        assert_eq!(request.title, "Summer Sale");
        assert_eq!(request.kind, DiscountKind::Percentage);
        assert_eq!(request.method, DiscountMethod::Code);
        assert_eq!(request.value, Decimal::from(10));
        assert_eq!(request.scope, DiscountScope::AllProducts);
        assert_eq!(request.minimum, None);
        assert_eq!(request.starts_at, None);
        assert_eq!(request.ends_at, None);
    }

    #[test]
    fn code_defaults_to_upper_snake_title() {
        let request = valid_form().normalize().expect("valid form");
        assert_eq!(request.code.as_deref(), Some("SUMMER_SALE"));
    }

    #[test]
    fn explicit_code_is_kept_verbatim() {
        let mut form = valid_form();
        form.code = " SAVE10 ".to_string();
        let request = form.normalize().expect("valid form");
        assert_eq!(request.code.as_deref(), Some("SAVE10"));
    }

    #[test]
    fn automatic_discounts_carry_no_code() {
        let mut form = valid_form();
        form.method = "AUTOMATIC".to_string();
        form.code = "IGNORED".to_string();
        let request = form.normalize().expect("valid form");
        assert_eq!(request.code, None);
    }

    #[test]
    fn id_lists_are_split_trimmed_and_deduped_of_empties() {
        let mut form = valid_form();
        form.product_ids = " 1 , ,2,".to_string();
        let request = form.normalize().expect("valid form");
        assert_eq!(
            request.scope,
            DiscountScope::Products(vec!["1".to_string(), "2".to_string()])
        );
    }

    #[test]
    fn products_take_precedence_over_collections() {
        let mut form = valid_form();
        form.product_ids = "1".to_string();
        form.collection_ids = "9".to_string();
        let request = form.normalize().expect("valid form");
        assert_eq!(request.scope, DiscountScope::Products(vec!["1".to_string()]));
    }

    #[test]
    fn collections_win_when_no_products_given() {
        let mut form = valid_form();
        form.collection_ids = "9".to_string();
        let request = form.normalize().expect("valid form");
        assert_eq!(
            request.scope,
            DiscountScope::Collections(vec!["9".to_string()])
        );
    }

    #[test]
    fn amount_minimum_wins_over_quantity() {
        let mut form = valid_form();
        form.min_amount = "50".to_string();
        form.min_qty = "3".to_string();
        let request = form.normalize().expect("valid form");
        assert_eq!(
            request.minimum,
            Some(MinimumPurchase::Subtotal(Decimal::from(50)))
        );
    }

    #[test]
    fn zero_amount_falls_through_to_quantity() {
        let mut form = valid_form();
        form.min_amount = "0".to_string();
        form.min_qty = "3".to_string();
        let request = form.normalize().expect("valid form");
        assert_eq!(request.minimum, Some(MinimumPurchase::Quantity(3)));
    }

    #[test]
    fn malformed_numeric_input_is_rejected_not_dropped() {
        let mut form = valid_form();
        form.min_amount = "fifty".to_string();
        let err = form.normalize().expect_err("must fail");
        assert_eq!(
            err.message_for("minAmount"),
            Some("\"fifty\" is not a number")
        );
    }

    #[test]
    fn all_field_errors_are_reported_together() {
        let form = DiscountForm {
            kind: "BOGO".to_string(),
            method: "CODE".to_string(),
            value: "abc".to_string(),
            ..DiscountForm::default()
        };
        let err = form.normalize().expect_err("must fail");
        let fields: Vec<_> = err.errors.iter().map(|e| e.field).collect();
        assert_eq!(fields, vec!["title", "type", "value"]);
    }

    #[test]
    fn value_must_be_positive() {
        let mut form = valid_form();
        form.value = "-5".to_string();
        let err = form.normalize().expect_err("must fail");
        assert_eq!(
            err.message_for("value"),
            Some("Value must be greater than zero")
        );
    }

    #[test]
    fn end_before_start_is_rejected() {
        let mut form = valid_form();
        form.starts_at = "2026-09-01T00:00:00Z".to_string();
        form.ends_at = "2026-08-01T00:00:00Z".to_string();
        let err = form.normalize().expect_err("must fail");
        assert!(err.message_for("endsAt").is_some());
    }

    #[test]
    fn timestamps_are_normalized_to_utc() {
        let mut form = valid_form();
        form.starts_at = "2026-09-01T02:00:00+02:00".to_string();
        let request = form.normalize().expect("valid form");
        assert_eq!(
            request.starts_at.map(|t| t.to_rfc3339()),
            Some("2026-09-01T00:00:00+00:00".to_string())
        );
    }

    #[test]
    fn garbage_timestamp_is_a_field_error() {
        let mut form = valid_form();
        form.starts_at = "tomorrow".to_string();
        let err = form.normalize().expect_err("must fail");
        assert!(err.message_for("startsAt").is_some());
    }
}
