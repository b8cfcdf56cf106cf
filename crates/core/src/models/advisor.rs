use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::action::ActionKey;

/// Aggregated view of all clients linked to one advisor.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AdvisorOverview {
    /// Date the overview was computed for
    pub as_of_date: NaiveDate,

    pub advisor_id: String,

    /// Number of linked clients
    pub client_count: usize,

    /// Clients whose metrics could be computed (a known age is required)
    pub computable_clients: usize,

    /// Sums over computable clients
    pub total_assets: f64,
    pub total_liabilities: f64,
    pub total_net_worth: f64,

    /// Mean savings ratio (%) over computable clients, 0 when there are none
    pub average_savings_ratio: f64,

    /// Per-client breakdown, sorted by user id
    pub clients: Vec<ClientSummary>,
}

/// Headline numbers for one client. Metric fields are `None` when the
/// client's metrics are not computable.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClientSummary {
    pub user_id: String,
    pub name: String,
    pub net_worth: Option<f64>,
    pub savings_ratio: Option<f64>,
    pub action_count: usize,

    /// Most urgent triggered action, if any
    pub top_action: Option<ActionKey>,
}
