use serde::{Deserialize, Serialize};

use super::metrics::Status;
use crate::errors::CoreError;

/// Which side of a threshold is healthy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Direction {
    HigherIsBetter,
    LowerIsBetter,
}

/// Green/amber cut-offs for one classified value.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Threshold {
    pub green: f64,
    pub amber: f64,
    pub direction: Direction,
}

impl Threshold {
    pub const fn higher(green: f64, amber: f64) -> Self {
        Self {
            green,
            amber,
            direction: Direction::HigherIsBetter,
        }
    }

    pub const fn lower(green: f64, amber: f64) -> Self {
        Self {
            green,
            amber,
            direction: Direction::LowerIsBetter,
        }
    }

    /// Both bounds are inclusive.
    pub fn classify(&self, value: f64) -> Status {
        match self.direction {
            Direction::HigherIsBetter => {
                if value >= self.green {
                    Status::Green
                } else if value >= self.amber {
                    Status::Amber
                } else {
                    Status::Red
                }
            }
            Direction::LowerIsBetter => {
                if value <= self.green {
                    Status::Green
                } else if value <= self.amber {
                    Status::Amber
                } else {
                    Status::Red
                }
            }
        }
    }

    fn validate(&self, name: &str) -> Result<(), CoreError> {
        if !self.green.is_finite() || !self.amber.is_finite() {
            return Err(CoreError::InvalidPolicy(format!(
                "{name}: thresholds must be finite"
            )));
        }
        let ordered = match self.direction {
            Direction::HigherIsBetter => self.amber <= self.green,
            Direction::LowerIsBetter => self.green <= self.amber,
        };
        if !ordered {
            return Err(CoreError::InvalidPolicy(format!(
                "{name}: amber bound {} is on the healthy side of green bound {}",
                self.amber, self.green
            )));
        }
        Ok(())
    }
}

/// Tunable constants of the metrics engine.
///
/// Defaults reproduce the standard rule set. Any subset can be overridden
/// from JSON; absent keys keep their default.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Policy {
    // ── Ratios ──────────────────────────────────────────────────────
    pub savings_ratio: Threshold,
    pub financial_asset_ratio: Threshold,
    pub liquidity_ratio: Threshold,
    pub leverage_ratio: Threshold,
    pub debt_to_income_ratio: Threshold,
    pub wealth_ratio: Threshold,

    // ── Protection ──────────────────────────────────────────────────
    /// Life cover target as a multiple of annual income.
    pub life_cover_income_multiple: f64,
    /// Health cover considered fully adequate.
    pub health_cover_target: f64,
    pub life_protection: Threshold,
    pub health_protection: Threshold,
    /// Car and property. Scores are only ever 0 or 100, so this is binary.
    pub asset_protection: Threshold,

    // ── Goals ───────────────────────────────────────────────────────
    /// Goals with fewer years left than this are short-term.
    pub short_horizon_years: i64,
    /// Goals with at most this many years left (and not short) are medium-term.
    pub medium_horizon_years: i64,
    pub goal_coverage: Threshold,

    // ── Retirement ──────────────────────────────────────────────────
    pub retirement_horizon_age: u32,
    /// Share of current annual expenses needed each year after retirement.
    pub expense_replacement_rate: f64,
    pub retirement_readiness: Threshold,

    // ── Asset allocation ────────────────────────────────────────────
    /// Recommended equity % is `equity_age_base - age`.
    pub equity_age_base: f64,
    /// Allowed deviation (percentage points) from the age-based recommendation.
    pub allocation_tolerance: f64,
    pub low_risk_max_equity_pct: f64,
    pub high_risk_min_equity_pct: f64,
}

impl Default for Policy {
    fn default() -> Self {
        Self {
            savings_ratio: Threshold::higher(20.0, 10.0),
            financial_asset_ratio: Threshold::higher(50.0, 25.0),
            liquidity_ratio: Threshold::higher(6.0, 3.0),
            leverage_ratio: Threshold::lower(30.0, 50.0),
            debt_to_income_ratio: Threshold::lower(36.0, 43.0),
            wealth_ratio: Threshold::higher(200.0, 100.0),

            life_cover_income_multiple: 10.0,
            health_cover_target: 1_500_000.0,
            life_protection: Threshold::higher(90.0, 50.0),
            health_protection: Threshold::higher(90.0, 50.0),
            asset_protection: Threshold::higher(99.0, 50.0),

            short_horizon_years: 2,
            medium_horizon_years: 5,
            goal_coverage: Threshold::higher(75.0, 40.0),

            retirement_horizon_age: 85,
            expense_replacement_rate: 0.7,
            retirement_readiness: Threshold::higher(40.0, 20.0),

            equity_age_base: 110.0,
            allocation_tolerance: 15.0,
            low_risk_max_equity_pct: 40.0,
            high_risk_min_equity_pct: 50.0,
        }
    }
}

impl Policy {
    /// Parse a (possibly partial) policy document and validate it.
    pub fn from_json(json: &str) -> Result<Self, CoreError> {
        let policy: Policy = serde_json::from_str(json)?;
        policy.validate()?;
        Ok(policy)
    }

    pub fn to_json(&self) -> Result<String, CoreError> {
        serde_json::to_string_pretty(self)
            .map_err(|e| CoreError::Serialization(format!("Failed to serialize policy: {e}")))
    }

    pub fn validate(&self) -> Result<(), CoreError> {
        let thresholds = [
            ("savingsRatio", &self.savings_ratio),
            ("financialAssetRatio", &self.financial_asset_ratio),
            ("liquidityRatio", &self.liquidity_ratio),
            ("leverageRatio", &self.leverage_ratio),
            ("debtToIncomeRatio", &self.debt_to_income_ratio),
            ("wealthRatio", &self.wealth_ratio),
            ("lifeProtection", &self.life_protection),
            ("healthProtection", &self.health_protection),
            ("assetProtection", &self.asset_protection),
            ("goalCoverage", &self.goal_coverage),
            ("retirementReadiness", &self.retirement_readiness),
        ];
        for (name, threshold) in thresholds {
            threshold.validate(name)?;
        }

        let positive = [
            ("lifeCoverIncomeMultiple", self.life_cover_income_multiple),
            ("healthCoverTarget", self.health_cover_target),
        ];
        for (name, value) in positive {
            if !value.is_finite() || value <= 0.0 {
                return Err(CoreError::InvalidPolicy(format!(
                    "{name} must be a positive number, got {value}"
                )));
            }
        }

        if !(self.expense_replacement_rate > 0.0 && self.expense_replacement_rate <= 1.0) {
            return Err(CoreError::InvalidPolicy(format!(
                "expenseReplacementRate must be in (0, 1], got {}",
                self.expense_replacement_rate
            )));
        }

        if self.short_horizon_years > self.medium_horizon_years {
            return Err(CoreError::InvalidPolicy(format!(
                "shortHorizonYears ({}) must not exceed mediumHorizonYears ({})",
                self.short_horizon_years, self.medium_horizon_years
            )));
        }

        let percentages = [
            ("equityAgeBase", self.equity_age_base),
            ("allocationTolerance", self.allocation_tolerance),
            ("lowRiskMaxEquityPct", self.low_risk_max_equity_pct),
            ("highRiskMinEquityPct", self.high_risk_min_equity_pct),
        ];
        for (name, value) in percentages {
            if !value.is_finite() || value < 0.0 {
                return Err(CoreError::InvalidPolicy(format!(
                    "{name} must be a non-negative number, got {value}"
                )));
            }
        }

        Ok(())
    }
}
