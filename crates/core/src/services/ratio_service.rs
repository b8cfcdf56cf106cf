use crate::models::metrics::{Ratio, Ratios, Totals};
use crate::models::policy::{Policy, Threshold};
use crate::services::normalization_service::NormalizationService;

/// Computes the six financial-health ratios and classifies each one.
///
/// Every ratio falls back to 0 when its denominator is 0.
pub struct RatioService {
    normalization: NormalizationService,
}

impl RatioService {
    pub fn new() -> Self {
        Self {
            normalization: NormalizationService::new(),
        }
    }

    pub fn compute(&self, totals: &Totals, policy: &Policy) -> Ratios {
        let n = &self.normalization;

        let savings = n.ratio_or(totals.monthly_savings, totals.monthly_income, 0.0) * 100.0;
        let financial_assets =
            n.ratio_or(totals.financial_assets, totals.total_assets, 0.0) * 100.0;
        // Months of expenses covered, not a percentage.
        let liquidity = n.ratio_or(totals.liquid_assets, totals.monthly_expenses, 0.0);
        let leverage = n.ratio_or(totals.total_liabilities, totals.total_assets, 0.0) * 100.0;
        // EMI only; other debt service is not tracked as an expense line.
        let debt_to_income = n.ratio_or(totals.monthly_emi, totals.monthly_income, 0.0) * 100.0;
        let wealth = n.ratio_or(totals.net_worth, totals.annual_income, 0.0) * 100.0;

        Ratios {
            savings_ratio: classify(savings, &policy.savings_ratio),
            financial_asset_ratio: classify(financial_assets, &policy.financial_asset_ratio),
            liquidity_ratio: classify(liquidity, &policy.liquidity_ratio),
            leverage_ratio: classify(leverage, &policy.leverage_ratio),
            debt_to_income_ratio: classify(debt_to_income, &policy.debt_to_income_ratio),
            wealth_ratio: classify(wealth, &policy.wealth_ratio),
        }
    }
}

impl Default for RatioService {
    fn default() -> Self {
        Self::new()
    }
}

fn classify(value: f64, threshold: &Threshold) -> Ratio {
    Ratio {
        value,
        status: threshold.classify(value),
    }
}
