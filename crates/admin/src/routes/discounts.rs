//! Discount route handlers.

use askama::Template;
use axum::{
    Form,
    extract::{Path, State},
    http::StatusCode,
    response::{Html, IntoResponse, Redirect, Response},
};
use tracing::instrument;

use discounts_galore_core::discount::{DiscountRecord, DiscountStatus};
use discounts_galore_core::form::{DiscountForm, ValidationError};
use discounts_galore_core::gid;

use crate::{
    error::AppError,
    filters,
    shopify::{AdminShopifyError, DiscountUserError},
    state::AppState,
};

/// Discount row for the listing template.
#[derive(Debug, Clone)]
pub struct DiscountRowView {
    pub href: String,
    pub tail: String,
    pub title: String,
    pub kind: String,
    pub code: Option<String>,
    pub status: String,
    pub status_class: String,
    pub starts_at: Option<String>,
    pub ends_at: Option<String>,
}

impl From<&DiscountRecord> for DiscountRowView {
    fn from(record: &DiscountRecord) -> Self {
        let (status, status_class) = status_badge(record.status);

        Self {
            href: format!("/discounts/{}", urlencoding::encode(&record.id)),
            tail: gid::tail(&record.id).to_string(),
            title: record.title.clone(),
            kind: record.kind.to_string(),
            code: record.first_code().map(ToString::to_string),
            status: status.to_string(),
            status_class: status_class.to_string(),
            starts_at: record.starts_at.clone(),
            ends_at: record.ends_at.clone(),
        }
    }
}

fn status_badge(status: DiscountStatus) -> (&'static str, &'static str) {
    match status {
        DiscountStatus::Active => (
            "Active",
            "bg-green-100 text-green-700 dark:bg-green-900/30 dark:text-green-400",
        ),
        DiscountStatus::Expired => (
            "Expired",
            "bg-gray-100 text-gray-700 dark:bg-gray-800 dark:text-gray-400",
        ),
        DiscountStatus::Scheduled => (
            "Scheduled",
            "bg-blue-100 text-blue-700 dark:bg-blue-900/30 dark:text-blue-400",
        ),
    }
}

/// Discounts list page template.
#[derive(Template)]
#[template(path = "discounts/index.html")]
pub struct DiscountsIndexTemplate {
    pub current_path: String,
    pub discounts: Vec<DiscountRowView>,
}

/// Discount create form template.
///
/// Per-field messages sit next to their inputs; `remote_errors` lists every
/// user error the Admin API returned for a rejected mutation.
#[derive(Template)]
#[template(path = "discounts/new.html")]
pub struct DiscountNewTemplate {
    pub current_path: String,
    pub form: DiscountForm,
    pub title_error: Option<String>,
    pub type_error: Option<String>,
    pub method_error: Option<String>,
    pub value_error: Option<String>,
    pub min_amount_error: Option<String>,
    pub min_qty_error: Option<String>,
    pub starts_at_error: Option<String>,
    pub ends_at_error: Option<String>,
    pub remote_errors: Vec<String>,
}

impl DiscountNewTemplate {
    fn empty() -> Self {
        Self::for_form(DiscountForm::default(), None, &[])
    }

    fn for_form(
        form: DiscountForm,
        validation: Option<&ValidationError>,
        remote: &[DiscountUserError],
    ) -> Self {
        let field = |name: &str| {
            validation
                .and_then(|v| v.message_for(name))
                .map(ToString::to_string)
        };

        Self {
            current_path: "/discounts".to_string(),
            title_error: field("title"),
            type_error: field("type"),
            method_error: field("method"),
            value_error: field("value"),
            min_amount_error: field("minAmount"),
            min_qty_error: field("minQty"),
            starts_at_error: field("startsAt"),
            ends_at_error: field("endsAt"),
            remote_errors: remote.iter().map(ToString::to_string).collect(),
            form,
        }
    }
}

/// Discount detail page template.
#[derive(Template)]
#[template(path = "discounts/detail.html")]
pub struct DiscountDetailTemplate {
    pub current_path: String,
    pub title: String,
    pub kind: String,
    pub status: String,
    pub status_class: String,
    pub resolved_gid: String,
    pub requested_id: String,
    pub starts_at: Option<String>,
    pub ends_at: Option<String>,
    pub codes: Vec<String>,
}

fn render<T: Template>(template: &T) -> Result<Html<String>, AppError> {
    template
        .render()
        .map(Html)
        .map_err(|e| AppError::Internal(format!("Template render error: {e}")))
}

/// Discounts list page handler.
#[instrument(skip(state))]
pub async fn index(State(state): State<AppState>) -> Result<Html<String>, AppError> {
    let records = state.shopify().list_discounts(25).await?;

    let template = DiscountsIndexTemplate {
        current_path: "/discounts".to_string(),
        discounts: records.iter().map(DiscountRowView::from).collect(),
    };

    render(&template)
}

/// New discount form handler.
#[instrument]
pub async fn new_discount() -> Result<Html<String>, AppError> {
    render(&DiscountNewTemplate::empty())
}

/// Create discount handler.
///
/// Normalizes the form, builds the mutation, and redirects to the detail
/// page of the created discount. Validation failures re-render the form with
/// every field error; mutation rejections re-render it with the full user
/// error list.
#[instrument(skip(state, form), fields(title = %form.title, method = %form.method))]
pub async fn create(
    State(state): State<AppState>,
    Form(form): Form<DiscountForm>,
) -> Result<Response, AppError> {
    let request = match form.normalize() {
        Ok(request) => request,
        Err(validation) => {
            tracing::debug!(errors = %validation, "Discount form rejected");
            let template = DiscountNewTemplate::for_form(form, Some(&validation), &[]);
            return Ok((StatusCode::BAD_REQUEST, render(&template)?).into_response());
        }
    };

    match state.shopify().create_discount(&request).await {
        Ok(discount_id) => {
            tracing::info!(discount_id = %discount_id, "Discount created");
            let location = format!("/discounts/{}", urlencoding::encode(&discount_id));
            Ok(Redirect::to(&location).into_response())
        }
        Err(AdminShopifyError::UserErrors(errors)) => {
            tracing::warn!(error_count = errors.len(), "Discount rejected by Shopify");
            let template = DiscountNewTemplate::for_form(form, None, &errors);
            Ok((StatusCode::BAD_REQUEST, render(&template)?).into_response())
        }
        Err(e) => Err(e.into()),
    }
}

/// Discount detail page handler.
///
/// The path segment may be a full gid, a URL-encoded gid, or a bare numeric
/// tail; bare tails are probed as automatic then code nodes.
#[instrument(skip(state))]
pub async fn show(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Html<String>, AppError> {
    let (record, resolved_gid) =
        state
            .shopify()
            .resolve_discount(&id)
            .await
            .map_err(|e| match e {
                AdminShopifyError::NotFound(_) => AppError::NotFound(format!("Discount {id}")),
                other => AppError::Shopify(other),
            })?;
    let (status, status_class) = status_badge(record.status);

    let template = DiscountDetailTemplate {
        current_path: "/discounts".to_string(),
        title: record.title,
        kind: record.kind.to_string(),
        status: status.to_string(),
        status_class: status_class.to_string(),
        resolved_gid,
        requested_id: id,
        starts_at: record.starts_at,
        ends_at: record.ends_at,
        codes: record.codes,
    };

    render(&template)
}

#[cfg(test)]
mod tests {
    use discounts_galore_core::discount::DiscountNodeKind;

    use super::*;

    fn record() -> DiscountRecord {
        DiscountRecord {
            id: "gid://shopify/DiscountCodeNode/42".to_string(),
            kind: DiscountNodeKind::Code,
            title: "Summer Sale".to_string(),
            status: DiscountStatus::Active,
            starts_at: Some("2026-08-01T00:00:00Z".to_string()),
            ends_at: None,
            codes: vec!["SUMMER_SALE".to_string()],
        }
    }

    #[test]
    fn row_view_encodes_the_detail_link() {
        let view = DiscountRowView::from(&record());
        assert_eq!(
            view.href,
            "/discounts/gid%3A%2F%2Fshopify%2FDiscountCodeNode%2F42"
        );
        assert_eq!(view.tail, "42");
        assert_eq!(view.code.as_deref(), Some("SUMMER_SALE"));
        assert_eq!(view.status, "Active");
    }

    #[test]
    fn form_template_exposes_field_errors() {
        let form = DiscountForm {
            method: "CODE".to_string(),
            kind: "PERCENTAGE".to_string(),
            value: "10".to_string(),
            ..DiscountForm::default()
        };
        let validation = form.normalize().expect_err("empty title");
        let template = DiscountNewTemplate::for_form(form, Some(&validation), &[]);
        assert_eq!(template.title_error.as_deref(), Some("Title is required"));
        assert_eq!(template.value_error, None);
    }

    #[test]
    fn form_template_lists_every_remote_error() {
        let remote = vec![
            DiscountUserError {
                field: Some(vec!["basicCodeDiscount".to_string(), "code".to_string()]),
                message: "taken".to_string(),
                code: Some("TAKEN".to_string()),
            },
            DiscountUserError {
                field: None,
                message: "limit reached".to_string(),
                code: None,
            },
        ];
        let template = DiscountNewTemplate::for_form(DiscountForm::default(), None, &remote);
        assert_eq!(
            template.remote_errors,
            vec![
                "basicCodeDiscount.code: taken (TAKEN)".to_string(),
                "limit reached".to_string(),
            ]
        );
    }
}
