//! Discount global ID handling.
//!
//! The Admin API issues `gid://shopify/DiscountAutomaticNode/<n>` for
//! discounts created through the automatic mutation and
//! `gid://shopify/DiscountCodeNode/<n>` for code-created ones. A bare
//! numeric tail does not say which namespace it belongs to, so lookups by
//! tail must probe both forms in a fixed order. That ambiguity is a property
//! of the platform's naming scheme, not something this crate can resolve
//! locally.

use crate::discount::DiscountNodeKind;

/// Global id prefix for automatic discount nodes.
pub const AUTOMATIC_NODE_PREFIX: &str = "gid://shopify/DiscountAutomaticNode/";

/// Global id prefix for code discount nodes.
pub const CODE_NODE_PREFIX: &str = "gid://shopify/DiscountCodeNode/";

/// A discount identifier as received from a URL, decoded and classified.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DiscountGid {
    /// Already a fully-qualified `gid://` identifier; use as-is.
    Qualified(String),
    /// A bare tail; both node namespaces must be probed.
    Ambiguous(String),
}

impl DiscountGid {
    /// Parse a raw path/query value, URL-decoding it first.
    ///
    /// Values that fail to percent-decode are used verbatim; the remote
    /// lookup will simply find nothing for them.
    #[must_use]
    pub fn parse(raw: &str) -> Self {
        let decoded = urlencoding::decode(raw)
            .map_or_else(|_| raw.to_string(), |s| s.into_owned());
        if decoded.starts_with("gid://") {
            Self::Qualified(decoded)
        } else {
            Self::Ambiguous(decoded)
        }
    }

    /// Candidate identifiers to look up, in probing order.
    ///
    /// A qualified id yields itself. An ambiguous tail yields the automatic
    /// node form first and the code node form second; the first lookup that
    /// finds a record wins.
    #[must_use]
    pub fn candidates(&self) -> Vec<String> {
        match self {
            Self::Qualified(gid) => vec![gid.clone()],
            Self::Ambiguous(tail) => vec![
                format!("{AUTOMATIC_NODE_PREFIX}{tail}"),
                format!("{CODE_NODE_PREFIX}{tail}"),
            ],
        }
    }
}

/// Classify a fully-qualified discount gid by its node namespace.
#[must_use]
pub fn node_kind(gid: &str) -> Option<DiscountNodeKind> {
    if gid.starts_with(AUTOMATIC_NODE_PREFIX) {
        Some(DiscountNodeKind::Automatic)
    } else if gid.starts_with(CODE_NODE_PREFIX) {
        Some(DiscountNodeKind::Code)
    } else {
        None
    }
}

/// The numeric tail of a gid, for compact display and admin-panel links.
#[must_use]
pub fn tail(gid: &str) -> &str {
    gid.rsplit('/').next().unwrap_or(gid)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn qualified_gid_is_used_as_is() {
        let gid = DiscountGid::parse("gid://shopify/DiscountCodeNode/42");
        assert_eq!(
            gid.candidates(),
            vec!["gid://shopify/DiscountCodeNode/42".to_string()]
        );
    }

    #[test]
    fn url_encoded_gid_is_decoded() {
        let gid = DiscountGid::parse("gid%3A%2F%2Fshopify%2FDiscountAutomaticNode%2F7");
        assert_eq!(
            gid,
            DiscountGid::Qualified("gid://shopify/DiscountAutomaticNode/7".to_string())
        );
    }

    #[test]
    fn bare_tail_probes_automatic_then_code() {
        let gid = DiscountGid::parse("123456");
        assert_eq!(
            gid.candidates(),
            vec![
                "gid://shopify/DiscountAutomaticNode/123456".to_string(),
                "gid://shopify/DiscountCodeNode/123456".to_string(),
            ]
        );
    }

    #[test]
    fn node_kind_by_prefix() {
        assert_eq!(
            node_kind("gid://shopify/DiscountAutomaticNode/1"),
            Some(DiscountNodeKind::Automatic)
        );
        assert_eq!(
            node_kind("gid://shopify/DiscountCodeNode/1"),
            Some(DiscountNodeKind::Code)
        );
        assert_eq!(node_kind("gid://shopify/Product/1"), None);
    }

    #[test]
    fn tail_strips_the_namespace() {
        assert_eq!(tail("gid://shopify/DiscountCodeNode/987"), "987");
        assert_eq!(tail("987"), "987");
    }
}
