use chrono::NaiveDate;
use log::warn;

use crate::models::advisor::{AdvisorOverview, ClientSummary};
use crate::models::user::UserRecord;
use crate::services::metrics_service::MetricsService;

/// Aggregates client metrics for the advisor dashboard.
pub struct AdvisorService;

impl AdvisorService {
    pub fn new() -> Self {
        Self
    }

    /// Build an overview from the advisor's client records.
    ///
    /// Clients whose metrics are not computable are listed but excluded
    /// from the sums and the average.
    pub fn overview(
        &self,
        metrics_service: &MetricsService,
        advisor_id: &str,
        clients: &[UserRecord],
        date: NaiveDate,
    ) -> AdvisorOverview {
        let mut summaries = Vec::with_capacity(clients.len());
        let mut total_assets = 0.0;
        let mut total_liabilities = 0.0;
        let mut savings_ratio_sum = 0.0;
        let mut computable_clients = 0;

        for client in clients {
            let demographics = client.profile.demographics_on(date, date);
            match metrics_service.compute(&client.financials, &demographics, &client.goals) {
                Ok(report) => {
                    let totals = &report.metrics.totals;
                    let savings_ratio = report.metrics.ratios.savings_ratio.value;
                    total_assets += totals.total_assets;
                    total_liabilities += totals.total_liabilities;
                    savings_ratio_sum += savings_ratio;
                    computable_clients += 1;

                    summaries.push(ClientSummary {
                        user_id: client.id.clone(),
                        name: client.profile.name.clone(),
                        net_worth: Some(totals.net_worth),
                        savings_ratio: Some(savings_ratio),
                        action_count: report.triggered_action_keys.len(),
                        top_action: report.triggered_action_keys.first().copied(),
                    });
                }
                Err(e) => {
                    warn!("Client {} excluded from advisor totals: {e}", client.id);
                    summaries.push(ClientSummary {
                        user_id: client.id.clone(),
                        name: client.profile.name.clone(),
                        net_worth: None,
                        savings_ratio: None,
                        action_count: 0,
                        top_action: None,
                    });
                }
            }
        }

        summaries.sort_by(|a, b| a.user_id.cmp(&b.user_id));

        let average_savings_ratio = if computable_clients > 0 {
            savings_ratio_sum / computable_clients as f64
        } else {
            0.0
        };

        AdvisorOverview {
            as_of_date: date,
            advisor_id: advisor_id.to_string(),
            client_count: clients.len(),
            computable_clients,
            total_assets,
            total_liabilities,
            total_net_worth: total_assets - total_liabilities,
            average_savings_ratio,
            clients: summaries,
        }
    }
}

impl Default for AdvisorService {
    fn default() -> Self {
        Self::new()
    }
}
