//! Mapping from a [`DiscountRequest`] to the create-discount mutation.
//!
//! The Admin API exposes two mutations, `discountCodeBasicCreate` and
//! `discountAutomaticBasicCreate`, whose inputs are structurally parallel:
//! the same nested value / eligible-items / minimum-requirement sub-objects
//! under different top-level names, with the code shape additionally carrying
//! the redeem code. One shared input struct covers both; the method
//! discriminant selects the document and the variable name.
//!
//! Everything here is a pure data mapping with no I/O.

use chrono::{DateTime, SecondsFormat, Utc};
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};
use serde::Serialize;

use crate::discount::{
    DiscountKind, DiscountMethod, DiscountRequest, DiscountScope, MinimumPurchase,
};

/// `discountCodeBasicCreate` document.
const CODE_CREATE_DOCUMENT: &str = r"
mutation CreateCodeDiscount($basic: DiscountCodeBasicInput!) {
  discountCodeBasicCreate(basicCodeDiscount: $basic) {
    codeDiscountNode { id }
    userErrors { field message code }
  }
}
";

/// `discountAutomaticBasicCreate` document.
const AUTOMATIC_CREATE_DOCUMENT: &str = r"
mutation CreateAutomaticDiscount($auto: DiscountAutomaticBasicInput!) {
  discountAutomaticBasicCreate(automaticBasicDiscount: $auto) {
    automaticDiscountNode { id }
    userErrors { field message code }
  }
}
";

/// The discount value sub-object (`DiscountCustomerGetsValueInput`).
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum ValueInput {
    /// Percentage as a 0..1 fraction.
    Percentage {
        /// Fraction of the item price, e.g. `0.10` for 10% off.
        percentage: f64,
    },
    /// Fixed amount off.
    #[serde(rename_all = "camelCase")]
    Amount {
        /// Amount sub-object.
        discount_amount: AmountInput,
    },
}

/// Fixed-amount value fields.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AmountInput {
    /// Two-decimal amount string, e.g. `"10.00"`.
    pub amount: String,
    /// Whether the amount applies per item rather than once per order.
    pub applies_on_each_item: bool,
}

/// The eligible-items sub-object (`DiscountItemsInput`).
///
/// The key asymmetry (`productsToAdd` vs `add`) is the Admin API's, not ours.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum ItemsInput {
    /// Every product.
    All {
        /// Always `true` in this shape.
        all: bool,
    },
    /// Specific products.
    Products {
        /// Product id list wrapper.
        products: ProductItems,
    },
    /// Specific collections.
    Collections {
        /// Collection id list wrapper.
        collections: CollectionItems,
    },
}

/// Product id list for [`ItemsInput::Products`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductItems {
    /// Product global IDs to attach.
    pub products_to_add: Vec<String>,
}

/// Collection id list for [`ItemsInput::Collections`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CollectionItems {
    /// Collection global IDs to attach.
    pub add: Vec<String>,
}

/// The minimum-requirement sub-object (`DiscountMinimumRequirementInput`).
///
/// Omitted entirely when the discount has no minimum; the API treats absence
/// as "no minimum", which is distinct from a threshold of zero.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum MinimumRequirementInput {
    /// Subtotal threshold.
    Subtotal {
        /// Threshold wrapper.
        subtotal: SubtotalThreshold,
    },
    /// Quantity threshold.
    Quantity {
        /// Threshold wrapper.
        quantity: QuantityThreshold,
    },
}

/// Subtotal threshold fields.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SubtotalThreshold {
    /// Two-decimal amount string.
    pub greater_than_or_equal_to_subtotal: String,
}

/// Quantity threshold fields.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct QuantityThreshold {
    /// Item count.
    pub greater_than_or_equal_to_quantity: i64,
}

/// Discount stacking flags, fixed for basic discounts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CombinesWithInput {
    /// Stacks with order discounts.
    pub order_discounts: bool,
    /// Stacks with product discounts.
    pub product_discounts: bool,
    /// Stacks with shipping discounts.
    pub shipping_discounts: bool,
}

impl Default for CombinesWithInput {
    fn default() -> Self {
        Self {
            order_discounts: true,
            product_discounts: true,
            shipping_discounts: false,
        }
    }
}

/// `DiscountCustomerGetsInput`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CustomerGetsInput {
    /// Eligible items.
    pub items: ItemsInput,
    /// Discount value.
    pub value: ValueInput,
}

/// Shared input shape for both create mutations.
///
/// `code` is present exactly when the request method is
/// [`DiscountMethod::Code`]; the automatic shape otherwise serializes the
/// same fields.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DiscountInput {
    /// Merchant-facing title.
    pub title: String,
    /// Redeem code (code discounts only).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,
    /// Activation time, RFC 3339.
    pub starts_at: String,
    /// Expiry time, RFC 3339; omitted for open-ended discounts.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ends_at: Option<String>,
    /// Stacking flags.
    pub combines_with: CombinesWithInput,
    /// Optional cart threshold; omitted means no minimum.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub minimum_requirement: Option<MinimumRequirementInput>,
    /// Value and eligible items.
    pub customer_gets: CustomerGetsInput,
}

/// A ready-to-send create-discount mutation.
#[derive(Debug, Clone, PartialEq)]
pub struct MutationPayload {
    /// Which mutation shape was selected.
    pub method: DiscountMethod,
    /// GraphQL document.
    pub document: &'static str,
    /// Typed mutation input.
    pub input: DiscountInput,
}

impl MutationPayload {
    /// Build the mutation for a validated request.
    ///
    /// `now` supplies the default activation time when the request carries
    /// none; injecting it keeps this function deterministic.
    #[must_use]
    pub fn for_request(request: &DiscountRequest, now: DateTime<Utc>) -> Self {
        let starts_at = request.starts_at.unwrap_or(now);

        let input = DiscountInput {
            title: request.title.clone(),
            code: match request.method {
                DiscountMethod::Code => request.code.clone(),
                DiscountMethod::Automatic => None,
            },
            starts_at: starts_at.to_rfc3339_opts(SecondsFormat::Secs, true),
            ends_at: request
                .ends_at
                .map(|t| t.to_rfc3339_opts(SecondsFormat::Secs, true)),
            combines_with: CombinesWithInput::default(),
            minimum_requirement: request.minimum.map(build_minimum),
            customer_gets: CustomerGetsInput {
                items: build_items(&request.scope),
                value: build_value(request.kind, request.value),
            },
        };

        let document = match request.method {
            DiscountMethod::Code => CODE_CREATE_DOCUMENT,
            DiscountMethod::Automatic => AUTOMATIC_CREATE_DOCUMENT,
        };

        Self {
            method: request.method,
            document,
            input,
        }
    }

    /// Mutation variables keyed the way the selected document expects.
    #[must_use]
    pub fn variables(&self) -> serde_json::Value {
        let key = match self.method {
            DiscountMethod::Code => "basic",
            DiscountMethod::Automatic => "auto",
        };
        serde_json::json!({ key: self.input })
    }
}

/// Map the discount kind and raw value to the API value shape.
///
/// Percentages become a 0..1 fraction; fixed amounts become a two-decimal
/// string rounded half away from zero.
fn build_value(kind: DiscountKind, value: Decimal) -> ValueInput {
    match kind {
        DiscountKind::Percentage => ValueInput::Percentage {
            percentage: (value / Decimal::ONE_HUNDRED)
                .to_f64()
                .unwrap_or_default(),
        },
        DiscountKind::FixedAmount => ValueInput::Amount {
            discount_amount: AmountInput {
                amount: format_amount(value),
                applies_on_each_item: false,
            },
        },
    }
}

fn build_items(scope: &DiscountScope) -> ItemsInput {
    match scope {
        DiscountScope::AllProducts => ItemsInput::All { all: true },
        DiscountScope::Products(ids) => ItemsInput::Products {
            products: ProductItems {
                products_to_add: ids.clone(),
            },
        },
        DiscountScope::Collections(ids) => ItemsInput::Collections {
            collections: CollectionItems { add: ids.clone() },
        },
    }
}

fn build_minimum(minimum: MinimumPurchase) -> MinimumRequirementInput {
    match minimum {
        MinimumPurchase::Subtotal(amount) => MinimumRequirementInput::Subtotal {
            subtotal: SubtotalThreshold {
                greater_than_or_equal_to_subtotal: format_amount(amount),
            },
        },
        MinimumPurchase::Quantity(quantity) => MinimumRequirementInput::Quantity {
            quantity: QuantityThreshold {
                greater_than_or_equal_to_quantity: quantity,
            },
        },
    }
}

/// Format a money amount as the API's fixed two-decimal string.
fn format_amount(value: Decimal) -> String {
    format!(
        "{:.2}",
        value.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
    )
}
