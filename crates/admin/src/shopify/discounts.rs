//! Discount operations against the Admin API.

use chrono::Utc;
use serde::Deserialize;
use tracing::instrument;

use discounts_galore_core::discount::{
    DiscountMethod, DiscountNodeKind, DiscountRecord, DiscountRequest, DiscountStatus,
};
use discounts_galore_core::gid::DiscountGid;
use discounts_galore_core::payload::MutationPayload;

use super::{AdminClient, AdminShopifyError, DiscountUserError};

const LIST_DISCOUNTS_QUERY: &str = r"
query Discounts($first: Int!) {
  discountNodes(first: $first) {
    edges {
      node {
        id
        discount {
          __typename
          ... on DiscountAutomaticBasic { title startsAt endsAt status }
          ... on DiscountCodeBasic { title startsAt endsAt status codes(first: 1) { nodes { code } } }
        }
      }
    }
  }
}
";

const GET_DISCOUNT_QUERY: &str = r"
query DiscountById($id: ID!) {
  discountNode(id: $id) {
    id
    discount {
      __typename
      ... on DiscountAutomaticBasic { title startsAt endsAt status }
      ... on DiscountCodeBasic { title startsAt endsAt status codes(first: 10) { nodes { code } } }
    }
  }
}
";

// =============================================================================
// Response shapes
// =============================================================================

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct CodeCreateData {
    discount_code_basic_create: Option<CodeCreatePayload>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct CodeCreatePayload {
    code_discount_node: Option<CreatedNode>,
    #[serde(default)]
    user_errors: Vec<DiscountUserError>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct AutomaticCreateData {
    discount_automatic_basic_create: Option<AutomaticCreatePayload>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct AutomaticCreatePayload {
    automatic_discount_node: Option<CreatedNode>,
    #[serde(default)]
    user_errors: Vec<DiscountUserError>,
}

#[derive(Debug, Deserialize)]
struct CreatedNode {
    id: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ListData {
    discount_nodes: DiscountNodeConnection,
}

#[derive(Debug, Deserialize)]
struct DiscountNodeConnection {
    edges: Vec<DiscountNodeEdge>,
}

#[derive(Debug, Deserialize)]
struct DiscountNodeEdge {
    node: DiscountNode,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GetData {
    discount_node: Option<DiscountNode>,
}

#[derive(Debug, Deserialize)]
struct DiscountNode {
    id: String,
    /// Kept as raw JSON so unrequested discount types (BXGY, free shipping,
    /// app discounts) deserialize without failing the whole response.
    #[serde(default)]
    discount: serde_json::Value,
}

/// The inline fragments this client requests, keyed by `__typename`.
#[derive(Debug, Deserialize)]
#[serde(tag = "__typename")]
enum DiscountPayload {
    DiscountAutomaticBasic(BasicFields),
    DiscountCodeBasic(BasicFields),
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct BasicFields {
    title: String,
    status: DiscountStatus,
    starts_at: Option<String>,
    ends_at: Option<String>,
    #[serde(default)]
    codes: CodeConnection,
}

#[derive(Debug, Default, Deserialize)]
struct CodeConnection {
    nodes: Vec<CodeNode>,
}

#[derive(Debug, Deserialize)]
struct CodeNode {
    code: String,
}

/// Convert a raw discount node into the read model.
///
/// Returns `None` for discount types the queries do not request.
fn record_from_node(node: DiscountNode) -> Option<DiscountRecord> {
    let payload: DiscountPayload = serde_json::from_value(node.discount).ok()?;
    let (kind, fields) = match payload {
        DiscountPayload::DiscountAutomaticBasic(f) => (DiscountNodeKind::Automatic, f),
        DiscountPayload::DiscountCodeBasic(f) => (DiscountNodeKind::Code, f),
    };
    Some(DiscountRecord {
        id: node.id,
        kind,
        title: fields.title,
        status: fields.status,
        starts_at: fields.starts_at,
        ends_at: fields.ends_at,
        codes: fields.codes.nodes.into_iter().map(|n| n.code).collect(),
    })
}

impl AdminClient {
    /// Create a discount from a validated request.
    ///
    /// Builds one of the two parallel mutation shapes and returns the created
    /// node's global id.
    ///
    /// # Errors
    ///
    /// Returns `AdminShopifyError::UserErrors` carrying every user-facing
    /// field error the API rejected the mutation with, or transport/GraphQL
    /// errors from the call itself.
    #[instrument(skip(self, request), fields(title = %request.title, method = %request.method))]
    pub async fn create_discount(
        &self,
        request: &DiscountRequest,
    ) -> Result<String, AdminShopifyError> {
        let payload = MutationPayload::for_request(request, Utc::now());
        let variables = Some(payload.variables());

        let (node, user_errors) = match payload.method {
            DiscountMethod::Code => {
                let data: CodeCreateData = self.execute(payload.document, variables).await?;
                data.discount_code_basic_create
                    .map_or((None, vec![]), |p| (p.code_discount_node, p.user_errors))
            }
            DiscountMethod::Automatic => {
                let data: AutomaticCreateData = self.execute(payload.document, variables).await?;
                data.discount_automatic_basic_create
                    .map_or((None, vec![]), |p| {
                        (p.automatic_discount_node, p.user_errors)
                    })
            }
        };

        if !user_errors.is_empty() {
            return Err(AdminShopifyError::UserErrors(user_errors));
        }

        node.map(|n| n.id).ok_or_else(|| {
            AdminShopifyError::GraphQL(vec!["No discount returned from create".to_string()])
        })
    }

    /// List the first `first` discounts of the store.
    ///
    /// Discount types other than basic code/automatic are skipped.
    ///
    /// # Errors
    ///
    /// Returns an error if the API request fails.
    #[instrument(skip(self))]
    pub async fn list_discounts(
        &self,
        first: i64,
    ) -> Result<Vec<DiscountRecord>, AdminShopifyError> {
        let variables = serde_json::json!({ "first": first });
        let data: ListData = self.execute(LIST_DISCOUNTS_QUERY, Some(variables)).await?;

        Ok(data
            .discount_nodes
            .edges
            .into_iter()
            .filter_map(|edge| record_from_node(edge.node))
            .collect())
    }

    /// Fetch a single discount node by fully-qualified global id.
    ///
    /// Returns `Ok(None)` when the id resolves to nothing, or to a discount
    /// type this panel does not handle.
    ///
    /// # Errors
    ///
    /// Returns an error if the API request fails.
    #[instrument(skip(self), fields(discount_id = %id))]
    pub async fn get_discount(
        &self,
        id: &str,
    ) -> Result<Option<DiscountRecord>, AdminShopifyError> {
        let variables = serde_json::json!({ "id": id });
        let data: GetData = self.execute(GET_DISCOUNT_QUERY, Some(variables)).await?;

        Ok(data.discount_node.and_then(record_from_node))
    }

    /// Resolve a URL identifier to a discount record.
    ///
    /// The identifier may be URL-encoded, already fully qualified, or a bare
    /// numeric tail. Bare tails are probed as an automatic node first, then a
    /// code node; the tail alone cannot say which namespace the discount
    /// lives in. Returns the record together with the gid that resolved.
    ///
    /// # Errors
    ///
    /// Returns `AdminShopifyError::NotFound` when no candidate yields a
    /// record, or transport errors from the lookups.
    #[instrument(skip(self), fields(identifier = %raw))]
    pub async fn resolve_discount(
        &self,
        raw: &str,
    ) -> Result<(DiscountRecord, String), AdminShopifyError> {
        let gid = DiscountGid::parse(raw);
        for candidate in gid.candidates() {
            if let Some(record) = self.get_discount(&candidate).await? {
                return Ok((record, candidate));
            }
        }
        Err(AdminShopifyError::NotFound(format!(
            "No discount for identifier {raw}"
        )))
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn node(value: serde_json::Value) -> DiscountNode {
        serde_json::from_value(value).expect("node json")
    }

    #[test]
    fn code_basic_node_becomes_code_record() {
        let record = record_from_node(node(json!({
            "id": "gid://shopify/DiscountCodeNode/42",
            "discount": {
                "__typename": "DiscountCodeBasic",
                "title": "Summer Sale",
                "status": "ACTIVE",
                "startsAt": "2026-08-01T00:00:00Z",
                "endsAt": null,
                "codes": {"nodes": [{"code": "SUMMER_SALE"}]}
            }
        })))
        .expect("record");

        assert_eq!(record.kind, DiscountNodeKind::Code);
        assert_eq!(record.title, "Summer Sale");
        assert_eq!(record.status, DiscountStatus::Active);
        assert_eq!(record.first_code(), Some("SUMMER_SALE"));
        assert_eq!(record.ends_at, None);
    }

    #[test]
    fn automatic_basic_node_has_no_codes() {
        let record = record_from_node(node(json!({
            "id": "gid://shopify/DiscountAutomaticNode/7",
            "discount": {
                "__typename": "DiscountAutomaticBasic",
                "title": "Flash Sale",
                "status": "SCHEDULED",
                "startsAt": "2026-09-01T00:00:00Z",
                "endsAt": "2026-09-02T00:00:00Z"
            }
        })))
        .expect("record");

        assert_eq!(record.kind, DiscountNodeKind::Automatic);
        assert_eq!(record.status, DiscountStatus::Scheduled);
        assert!(record.codes.is_empty());
    }

    #[test]
    fn unrequested_discount_types_are_skipped() {
        let result = record_from_node(node(json!({
            "id": "gid://shopify/DiscountCodeNode/9",
            "discount": {"__typename": "DiscountCodeBxgy"}
        })));
        assert!(result.is_none());
    }

    #[test]
    fn create_response_surfaces_every_user_error() {
        let data: CodeCreateData = serde_json::from_value(json!({
            "discountCodeBasicCreate": {
                "codeDiscountNode": null,
                "userErrors": [
                    {"field": ["basicCodeDiscount", "title"], "message": "too short", "code": "TOO_SHORT"},
                    {"field": ["basicCodeDiscount", "code"], "message": "taken", "code": "TAKEN"}
                ]
            }
        }))
        .expect("parse");

        let payload = data.discount_code_basic_create.expect("payload");
        assert_eq!(payload.user_errors.len(), 2);
        assert!(payload.code_discount_node.is_none());
    }

    #[test]
    fn create_response_yields_created_gid() {
        let data: AutomaticCreateData = serde_json::from_value(json!({
            "discountAutomaticBasicCreate": {
                "automaticDiscountNode": {"id": "gid://shopify/DiscountAutomaticNode/5"},
                "userErrors": []
            }
        }))
        .expect("parse");

        let id = data
            .discount_automatic_basic_create
            .and_then(|p| p.automatic_discount_node)
            .map(|n| n.id);
        assert_eq!(
            id.as_deref(),
            Some("gid://shopify/DiscountAutomaticNode/5")
        );
    }
}
