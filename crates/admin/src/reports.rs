//! Discount performance reporting.
//!
//! The read model and its derived figures are real; the data source is not.
//! No analytics backend exists yet, so [`ReportsService`] returns an empty
//! report and the page renders true zeros rather than invented numbers.
// TODO: back basic_report with impression/redemption data once an analytics
// source is wired up.

use rust_decimal::{Decimal, RoundingStrategy};

/// Aggregate discount performance figures for the reports page.
#[derive(Debug, Clone, PartialEq)]
pub struct DiscountReport {
    /// Times a discount was shown to a shopper.
    pub impressions: u64,
    /// Completed redemptions.
    pub redemptions: u64,
    /// Revenue attributed to discounted orders.
    pub revenue_attributed: Decimal,
    /// Redemptions per impression, 0..1.
    pub conversion_rate: f64,
}

impl DiscountReport {
    /// Build a report from raw counts.
    ///
    /// Conversion is redemptions per impression; zero impressions means a
    /// zero rate, not a division error.
    #[must_use]
    pub fn from_counts(impressions: u64, redemptions: u64, revenue_attributed: Decimal) -> Self {
        let conversion_rate = if impressions == 0 {
            0.0
        } else {
            redemptions as f64 / impressions as f64
        };
        Self {
            impressions,
            redemptions,
            revenue_attributed,
            conversion_rate,
        }
    }

    /// Revenue as a two-decimal dollar string, e.g. `"$1234.50"`.
    #[must_use]
    pub fn revenue_display(&self) -> String {
        format!(
            "${:.2}",
            self.revenue_attributed
                .round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
        )
    }

    /// Conversion as a two-decimal percentage string, e.g. `"3.75%"`.
    #[must_use]
    pub fn conversion_display(&self) -> String {
        format!("{:.2}%", self.conversion_rate * 100.0)
    }
}

/// Data source for the reports page.
#[derive(Debug, Default)]
pub struct ReportsService;

impl ReportsService {
    /// Create the service.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    /// The overview report.
    #[must_use]
    pub fn basic_report(&self) -> DiscountReport {
        DiscountReport::from_counts(0, 0, Decimal::ZERO)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn conversion_is_redemptions_per_impression() {
        let report = DiscountReport::from_counts(800, 30, Decimal::from(1500));
        assert!((report.conversion_rate - 0.0375).abs() < f64::EPSILON);
        assert_eq!(report.conversion_display(), "3.75%");
    }

    #[test]
    fn zero_impressions_mean_zero_conversion() {
        let report = DiscountReport::from_counts(0, 0, Decimal::ZERO);
        assert!((report.conversion_rate).abs() < f64::EPSILON);
        assert_eq!(report.conversion_display(), "0.00%");
    }

    #[test]
    fn revenue_formats_as_two_decimal_dollars() {
        let report = DiscountReport::from_counts(10, 1, "1234.5".parse().expect("decimal"));
        assert_eq!(report.revenue_display(), "$1234.50");
    }

    #[test]
    fn empty_backend_yields_all_zeros() {
        let report = ReportsService::new().basic_report();
        assert_eq!(report.impressions, 0);
        assert_eq!(report.redemptions, 0);
        assert_eq!(report.revenue_display(), "$0.00");
    }
}
