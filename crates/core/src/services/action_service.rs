use std::collections::HashSet;

use crate::models::action::ActionKey;
use crate::models::metrics::{
    Allocation, GoalCoverage, MetricsReport, Protection, Ratios, Retirement, Status,
};
use crate::models::policy::Policy;
use crate::models::profile::{Demographics, RiskAppetite};

/// Priority tiers, most urgent first.
pub const TIER_RATIO_RED: u8 = 1;
pub const TIER_RATIO_AMBER: u8 = 2;
pub const TIER_PROTECTION: u8 = 3;
pub const TIER_GOALS: u8 = 4;
pub const TIER_RETIREMENT: u8 = 5;
pub const TIER_ALLOCATION: u8 = 6;

/// Turns classification results into a prioritized list of action keys,
/// and decides whether a started action may be marked complete.
pub struct ActionService;

impl ActionService {
    pub fn new() -> Self {
        Self
    }

    /// Equity exposure vs persona and age expectations. Reports at most one finding.
    ///
    /// A persona-based anomaly takes precedence and skips the age rule.
    pub fn allocation(
        &self,
        equity_assets: f64,
        financial_assets: f64,
        age: u32,
        demographics: &Demographics,
        policy: &Policy,
    ) -> Allocation {
        let equity_allocation_pct = if financial_assets > 0.0 {
            equity_assets / financial_assets * 100.0
        } else {
            0.0
        };
        let recommended_equity_pct = (policy.equity_age_base - f64::from(age)).max(0.0);

        let appetite = demographics
            .persona
            .map(|p| p.risk_appetite())
            .unwrap_or(RiskAppetite::Neutral);

        let persona_finding = match appetite {
            RiskAppetite::Low if equity_allocation_pct > policy.low_risk_max_equity_pct => {
                Some(ActionKey::AllocationPersonaAggressive)
            }
            RiskAppetite::High if equity_allocation_pct < policy.high_risk_min_equity_pct => {
                Some(ActionKey::AllocationPersonaConservative)
            }
            _ => None,
        };

        let finding = persona_finding.or_else(|| {
            if equity_allocation_pct > recommended_equity_pct + policy.allocation_tolerance {
                Some(ActionKey::AllocationAgeAggressive)
            } else if equity_allocation_pct < recommended_equity_pct - policy.allocation_tolerance
            {
                Some(ActionKey::AllocationAgeConservative)
            } else {
                None
            }
        });

        Allocation {
            equity_assets,
            equity_allocation_pct,
            recommended_equity_pct,
            finding,
        }
    }

    /// Candidate `(tier, key)` pairs in collection order.
    pub fn candidates(
        &self,
        ratios: &Ratios,
        protection: &Protection,
        goal_coverage: &GoalCoverage,
        retirement: &Retirement,
        allocation: &Allocation,
    ) -> Vec<(u8, ActionKey)> {
        let mut candidates = Vec::new();

        for (key, ratio) in ratios.keyed() {
            if ratio.status == Status::Red {
                candidates.push((TIER_RATIO_RED, key));
            }
        }
        for (key, ratio) in ratios.keyed() {
            if ratio.status == Status::Amber {
                candidates.push((TIER_RATIO_AMBER, key));
            }
        }
        for (key, score) in protection.keyed() {
            if score.status == Status::Red {
                candidates.push((TIER_PROTECTION, key));
            }
        }
        for (key, coverage) in goal_coverage.keyed() {
            if coverage.status == Status::Red {
                candidates.push((TIER_GOALS, key));
            }
        }
        if retirement.status != Status::Green {
            candidates.push((TIER_RETIREMENT, ActionKey::Retirement));
        }
        if let Some(key) = allocation.finding {
            candidates.push((TIER_ALLOCATION, key));
        }

        candidates
    }

    /// Dedup by key (first occurrence wins), then stable-sort by tier.
    pub fn prioritize(&self, candidates: Vec<(u8, ActionKey)>) -> Vec<ActionKey> {
        let mut seen = HashSet::new();
        let mut unique: Vec<(u8, ActionKey)> = candidates
            .into_iter()
            .filter(|(_, key)| seen.insert(*key))
            .collect();
        unique.sort_by_key(|(tier, _)| *tier);
        unique.into_iter().map(|(_, key)| key).collect()
    }

    /// An action can be completed only once the data no longer triggers it.
    pub fn can_complete(&self, key: ActionKey, report: &MetricsReport) -> bool {
        !report.is_triggered(key)
    }
}

impl Default for ActionService {
    fn default() -> Self {
        Self::new()
    }
}
