//! Dashboard route handler.

use askama::Template;
use axum::{extract::State, response::Html};
use tracing::instrument;

use crate::{filters, state::AppState};

/// Dashboard page template.
#[derive(Template)]
#[template(path = "dashboard.html")]
pub struct DashboardTemplate {
    pub current_path: String,
    pub store: String,
}

/// Dashboard overview handler.
#[instrument(skip(state))]
pub async fn index(State(state): State<AppState>) -> Html<String> {
    let template = DashboardTemplate {
        current_path: "/".to_string(),
        store: state.config().shopify.store.clone(),
    };

    Html(template.render().unwrap_or_else(|e| {
        tracing::error!("Template render error: {}", e);
        "Internal Server Error".to_string()
    }))
}
