use serde::{Deserialize, Serialize};

use super::action::ActionKey;

/// Traffic-light classification of a derived value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Status {
    Green,
    Amber,
    Red,
    /// Nothing to measure (e.g., a goal bucket with no goals). Never triggers an action.
    Neutral,
}

impl std::fmt::Display for Status {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Status::Green => write!(f, "green"),
            Status::Amber => write!(f, "amber"),
            Status::Red => write!(f, "red"),
            Status::Neutral => write!(f, "neutral"),
        }
    }
}

/// A derived value together with its classification.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Ratio {
    pub value: f64,
    pub status: Status,
}

/// Raw sums split by the frequency the lines were entered with.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FrequencySplit {
    /// Sum of monthly-frequency line values, unscaled.
    pub monthly_only: f64,
    /// Sum of annual-frequency line values, unscaled.
    pub annual_only: f64,
}

/// Aggregate totals every other metric is derived from.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Totals {
    pub total_assets: f64,
    pub total_liabilities: f64,
    pub net_worth: f64,
    pub monthly_income: f64,
    pub annual_income: f64,
    pub monthly_expenses: f64,
    pub annual_expenses: f64,
    pub monthly_savings: f64,
    /// Monthly-equivalent EMI expense.
    pub monthly_emi: f64,
    pub financial_assets: f64,
    pub liquid_assets: f64,
    pub income_by_frequency: FrequencySplit,
    pub expenses_by_frequency: FrequencySplit,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Ratios {
    pub savings_ratio: Ratio,
    pub financial_asset_ratio: Ratio,
    pub liquidity_ratio: Ratio,
    pub leverage_ratio: Ratio,
    pub debt_to_income_ratio: Ratio,
    pub wealth_ratio: Ratio,
}

impl Ratios {
    /// Ratios paired with their action keys, in priority order.
    pub fn keyed(&self) -> [(ActionKey, &Ratio); 6] {
        [
            (ActionKey::SavingsRatio, &self.savings_ratio),
            (ActionKey::FinancialAssetRatio, &self.financial_asset_ratio),
            (ActionKey::LiquidityRatio, &self.liquidity_ratio),
            (ActionKey::LeverageRatio, &self.leverage_ratio),
            (ActionKey::DebtToIncomeRatio, &self.debt_to_income_ratio),
            (ActionKey::WealthRatio, &self.wealth_ratio),
        ]
    }
}

/// Insurance adequacy for one kind of cover.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProtectionScore {
    pub cover: f64,
    /// Cover amount or insured value the score is measured against.
    pub target: f64,
    pub score: f64,
    pub status: Status,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Protection {
    pub life: ProtectionScore,
    pub health: ProtectionScore,
    pub car: ProtectionScore,
    pub property: ProtectionScore,
}

impl Protection {
    pub fn keyed(&self) -> [(ActionKey, &ProtectionScore); 4] {
        [
            (ActionKey::ProtectionLife, &self.life),
            (ActionKey::ProtectionHealth, &self.health),
            (ActionKey::ProtectionCar, &self.car),
            (ActionKey::ProtectionProperty, &self.property),
        ]
    }
}

/// Assets available for a horizon versus the goals due in it.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Coverage {
    pub asset_value: f64,
    pub goal_value: f64,
    /// Capped at 100.
    pub ratio: f64,
    pub status: Status,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GoalCoverage {
    pub overall: Coverage,
    pub short: Coverage,
    pub medium: Coverage,
    pub long: Coverage,
}

impl GoalCoverage {
    pub fn keyed(&self) -> [(ActionKey, &Coverage); 4] {
        [
            (ActionKey::GoalsOverall, &self.overall),
            (ActionKey::GoalsShort, &self.short),
            (ActionKey::GoalsMedium, &self.medium),
            (ActionKey::GoalsLong, &self.long),
        ]
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Retirement {
    pub target: f64,
    /// Assets left for retirement once goal commitments are set aside.
    pub eligible_assets: f64,
    pub readiness_percentage: f64,
    pub status: Status,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Allocation {
    pub equity_assets: f64,
    pub equity_allocation_pct: f64,
    pub recommended_equity_pct: f64,
    /// At most one allocation anomaly is reported.
    pub finding: Option<ActionKey>,
}

/// Every derived quantity for one set of inputs. Never persisted;
/// always recomputed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Metrics {
    pub age: u32,
    pub totals: Totals,
    pub ratios: Ratios,
    pub protection: Protection,
    pub goal_coverage: GoalCoverage,
    pub retirement: Retirement,
    pub allocation: Allocation,
}

/// Output of a metrics computation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MetricsReport {
    pub metrics: Metrics,
    /// Unique, ordered by priority (most urgent first).
    pub triggered_action_keys: Vec<ActionKey>,
}

impl MetricsReport {
    pub fn is_triggered(&self, key: ActionKey) -> bool {
        self.triggered_action_keys.contains(&key)
    }
}
