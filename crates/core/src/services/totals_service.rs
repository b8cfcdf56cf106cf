use crate::models::financials::{Assets, FinancialItem, Financials, Frequency};
use crate::models::metrics::{FrequencySplit, Totals};
use crate::services::normalization_service::NormalizationService;

/// Computes aggregate totals (net worth, cash flow, asset pools).
///
/// Pure business logic — no I/O. Easy to test.
pub struct TotalsService {
    normalization: NormalizationService,
}

impl TotalsService {
    pub fn new() -> Self {
        Self {
            normalization: NormalizationService::new(),
        }
    }

    pub fn compute(&self, financials: &Financials) -> Totals {
        let n = &self.normalization;

        let total_assets: f64 = financials
            .assets
            .fields()
            .iter()
            .map(|(_, v)| n.amount(*v))
            .sum();
        let total_liabilities: f64 = financials
            .liabilities
            .fields()
            .iter()
            .map(|(_, v)| n.amount(*v))
            .sum();

        let income = financials.income.items();
        let expenses = financials.expenses.items();

        let monthly_income = self.sum_monthly(&income);
        let monthly_expenses = self.sum_monthly(&expenses);
        let annual_expenses: f64 = expenses.iter().map(|(_, item)| n.annual(*item)).sum();

        Totals {
            total_assets,
            total_liabilities,
            net_worth: total_assets - total_liabilities,
            monthly_income,
            // Derived from the monthly figure so the wealth ratio and life
            // cover target share one basis.
            annual_income: monthly_income * 12.0,
            monthly_expenses,
            annual_expenses,
            monthly_savings: monthly_income - monthly_expenses,
            monthly_emi: n.monthly(financials.expenses.emi.as_ref()),
            financial_assets: self.financial_assets(&financials.assets),
            liquid_assets: self.liquid_assets(&financials.assets),
            income_by_frequency: self.split(&income),
            expenses_by_frequency: self.split(&expenses),
        }
    }

    /// Investable assets: market instruments, pension schemes, cash and deposits.
    /// Excludes gold, real estate, vehicles and "other".
    pub fn financial_assets(&self, assets: &Assets) -> f64 {
        let n = &self.normalization;
        [
            assets.stocks,
            assets.mutual_funds,
            assets.crypto,
            assets.nps,
            assets.ppf,
            assets.pf,
            assets.sukanya_samriddhi,
            assets.cash_in_hand,
            assets.savings_account,
            assets.recurring_deposit,
            assets.fixed_deposit,
        ]
        .into_iter()
        .map(|v| n.amount(v))
        .sum()
    }

    pub fn liquid_assets(&self, assets: &Assets) -> f64 {
        let n = &self.normalization;
        n.amount(assets.cash_in_hand) + n.amount(assets.savings_account)
    }

    pub fn equity_assets(&self, assets: &Assets) -> f64 {
        let n = &self.normalization;
        n.amount(assets.stocks) + n.amount(assets.mutual_funds) + n.amount(assets.crypto)
    }

    fn sum_monthly(&self, items: &[(&'static str, Option<&FinancialItem>)]) -> f64 {
        items
            .iter()
            .map(|(_, item)| self.normalization.monthly(*item))
            .sum()
    }

    fn split(&self, items: &[(&'static str, Option<&FinancialItem>)]) -> FrequencySplit {
        let n = &self.normalization;
        FrequencySplit {
            monthly_only: items
                .iter()
                .map(|(_, item)| n.raw_if(*item, Frequency::Monthly))
                .sum(),
            annual_only: items
                .iter()
                .map(|(_, item)| n.raw_if(*item, Frequency::Annual))
                .sum(),
        }
    }
}

impl Default for TotalsService {
    fn default() -> Self {
        Self::new()
    }
}
