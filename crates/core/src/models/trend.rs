use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::action::ActionKey;

/// Metrics recomputed for one historical snapshot.
///
/// The core generates these — the frontend just renders the trend lines.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TrendPoint {
    /// Snapshot date
    pub date: NaiveDate,

    /// User's age on the snapshot date
    pub age: u32,

    pub total_assets: f64,
    pub total_liabilities: f64,
    pub net_worth: f64,
    pub monthly_savings: f64,

    /// Savings ratio (%) at that point in time
    pub savings_ratio: f64,

    /// Retirement readiness (%) at that point in time
    pub retirement_readiness: f64,

    /// Actions that snapshot would have triggered, by priority
    pub triggered_action_keys: Vec<ActionKey>,
}
