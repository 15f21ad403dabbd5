//! Reports route handler.

use askama::Template;
use axum::{extract::State, response::Html};
use tracing::instrument;

use crate::{filters, reports::DiscountReport, state::AppState};

/// Reports page template.
#[derive(Template)]
#[template(path = "reports.html")]
pub struct ReportsTemplate {
    pub current_path: String,
    pub impressions: u64,
    pub redemptions: u64,
    pub revenue: String,
    pub conversion: String,
}

impl From<DiscountReport> for ReportsTemplate {
    fn from(report: DiscountReport) -> Self {
        Self {
            current_path: "/reports".to_string(),
            impressions: report.impressions,
            redemptions: report.redemptions,
            revenue: report.revenue_display(),
            conversion: report.conversion_display(),
        }
    }
}

/// Reports overview handler.
#[instrument(skip(state))]
pub async fn index(State(state): State<AppState>) -> Html<String> {
    let template = ReportsTemplate::from(state.reports().basic_report());

    Html(template.render().unwrap_or_else(|e| {
        tracing::error!("Template render error: {}", e);
        "Internal Server Error".to_string()
    }))
}

#[cfg(test)]
mod tests {
    use rust_decimal::Decimal;

    use super::*;

    #[test]
    fn template_precomputes_display_figures() {
        let template = ReportsTemplate::from(DiscountReport::from_counts(
            200,
            8,
            Decimal::from(450),
        ));
        assert_eq!(template.impressions, 200);
        assert_eq!(template.redemptions, 8);
        assert_eq!(template.revenue, "$450.00");
        assert_eq!(template.conversion, "4.00%");
        assert_eq!(template.current_path, "/reports");
    }
}
