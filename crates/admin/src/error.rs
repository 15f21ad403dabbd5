//! Unified error handling for the admin panel.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;

use crate::shopify::AdminShopifyError;

/// Application-level error type for the admin panel.
///
/// Form validation failures never reach this type; the create route
/// re-renders the form with them instead. Every variant here is terminal
/// for the current request; nothing is retried.
#[derive(Debug, Error)]
pub enum AppError {
    /// Shopify API operation failed.
    #[error("Shopify error: {0}")]
    Shopify(#[from] AdminShopifyError),

    /// Resource not found.
    #[error("Not found: {0}")]
    NotFound(String),

    /// Internal server error.
    #[error("Internal error: {0}")]
    Internal(String),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        // Server-class and upstream failures go to Sentry; user mistakes don't.
        if matches!(
            self,
            Self::Internal(_)
                | Self::Shopify(
                    AdminShopifyError::Http(_)
                        | AdminShopifyError::GraphQL(_)
                        | AdminShopifyError::Parse(_)
                )
        ) {
            let event_id = sentry::capture_error(&self);
            tracing::error!(
                error = %self,
                sentry_event_id = %event_id,
                "Admin request error"
            );
        }

        let status = match &self {
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
            Self::Shopify(shopify) => match shopify {
                AdminShopifyError::NotFound(_) => StatusCode::NOT_FOUND,
                AdminShopifyError::UserErrors(_) => StatusCode::BAD_REQUEST,
                AdminShopifyError::RateLimited(_) => StatusCode::SERVICE_UNAVAILABLE,
                _ => StatusCode::BAD_GATEWAY,
            },
        };

        // Don't expose internal error details to clients
        let message = match &self {
            Self::Internal(_) => "Internal server error".to_string(),
            Self::Shopify(
                AdminShopifyError::Http(_)
                | AdminShopifyError::GraphQL(_)
                | AdminShopifyError::Parse(_)
                | AdminShopifyError::Unauthorized,
            ) => "External service error".to_string(),
            _ => self.to_string(),
        };

        (status, message).into_response()
    }
}
