use chrono::NaiveDate;
use log::warn;

use crate::models::financials::FinancialSnapshot;
use crate::models::goal::Goal;
use crate::models::profile::UserProfile;
use crate::models::trend::TrendPoint;
use crate::services::metrics_service::MetricsService;

/// Recomputes metrics against past snapshots to build trend series.
///
/// Each snapshot is evaluated with the age the user had on the snapshot
/// date and the current goal list.
pub struct HistoryService;

impl HistoryService {
    pub fn new() -> Self {
        Self
    }

    /// One trend point per snapshot, oldest first.
    ///
    /// `reference` is the date the profile's stored age is valid for
    /// (normally today). Snapshots for which no valid age can be derived
    /// are skipped.
    pub fn trend(
        &self,
        metrics_service: &MetricsService,
        profile: &UserProfile,
        snapshots: &[FinancialSnapshot],
        goals: &[Goal],
        reference: NaiveDate,
    ) -> Vec<TrendPoint> {
        let mut ordered: Vec<&FinancialSnapshot> = snapshots.iter().collect();
        ordered.sort_by_key(|s| s.date);

        let mut points = Vec::with_capacity(ordered.len());
        for snapshot in ordered {
            let demographics = profile.demographics_on(snapshot.date, reference);
            let report = match metrics_service.compute(&snapshot.financials, &demographics, goals)
            {
                Ok(report) => report,
                Err(e) => {
                    warn!("Skipping snapshot dated {}: {e}", snapshot.date);
                    continue;
                }
            };

            let metrics = &report.metrics;
            points.push(TrendPoint {
                date: snapshot.date,
                age: metrics.age,
                total_assets: metrics.totals.total_assets,
                total_liabilities: metrics.totals.total_liabilities,
                net_worth: metrics.totals.net_worth,
                monthly_savings: metrics.totals.monthly_savings,
                savings_ratio: metrics.ratios.savings_ratio.value,
                retirement_readiness: metrics.retirement.readiness_percentage,
                triggered_action_keys: report.triggered_action_keys,
            });
        }
        points
    }
}

impl Default for HistoryService {
    fn default() -> Self {
        Self::new()
    }
}
