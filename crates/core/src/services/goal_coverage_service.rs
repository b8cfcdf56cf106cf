use std::collections::HashMap;

use crate::models::financials::Assets;
use crate::models::goal::{Goal, GoalBucket};
use crate::models::metrics::{Coverage, GoalCoverage, Status};
use crate::models::policy::Policy;
use crate::services::normalization_service::NormalizationService;

/// Matches goals to the assets suited to their horizon.
///
/// Goals and assets are both split into short/medium/long buckets; each
/// bucket's assets are compared with the goal value due in that bucket.
pub struct GoalCoverageService {
    normalization: NormalizationService,
}

impl GoalCoverageService {
    pub fn new() -> Self {
        Self {
            normalization: NormalizationService::new(),
        }
    }

    /// Horizon bucket for a goal given the user's current age.
    pub fn bucket_for(&self, goal: &Goal, age: u32, policy: &Policy) -> GoalBucket {
        let years_left = goal.years_left(age);
        if years_left < policy.short_horizon_years {
            GoalBucket::Short
        } else if years_left <= policy.medium_horizon_years {
            GoalBucket::Medium
        } else {
            GoalBucket::Long
        }
    }

    /// Total goal value per bucket. Every bucket is present, possibly 0.
    pub fn goal_values(
        &self,
        goals: &[Goal],
        age: u32,
        policy: &Policy,
    ) -> HashMap<GoalBucket, f64> {
        let mut values: HashMap<GoalBucket, f64> =
            GoalBucket::ALL.into_iter().map(|b| (b, 0.0)).collect();
        for goal in goals {
            let bucket = self.bucket_for(goal, age, policy);
            *values.entry(bucket).or_insert(0.0) += self.normalization.amount(goal.target_value);
        }
        values
    }

    pub fn total_goal_value(&self, goals: &[Goal]) -> f64 {
        goals
            .iter()
            .map(|g| self.normalization.amount(g.target_value))
            .sum()
    }

    /// Investable assets suited to a horizon.
    pub fn asset_value(&self, assets: &Assets, bucket: GoalBucket) -> f64 {
        let n = &self.normalization;
        let sum = |fields: &[f64]| -> f64 { fields.iter().map(|v| n.amount(*v)).sum() };
        match bucket {
            GoalBucket::Short => sum(&[
                assets.crypto,
                assets.cash_in_hand,
                assets.savings_account,
                assets.recurring_deposit,
                assets.fixed_deposit,
            ]),
            GoalBucket::Medium => sum(&[assets.mutual_funds]),
            GoalBucket::Long => sum(&[
                assets.stocks,
                assets.nps,
                assets.ppf,
                assets.pf,
                assets.sukanya_samriddhi,
            ]),
        }
    }

    /// Coverage of `goal_value` by `asset_value`, capped at 100%.
    /// A bucket with no goals is neutral rather than penalized.
    pub fn coverage(&self, asset_value: f64, goal_value: f64, policy: &Policy) -> Coverage {
        if goal_value <= 0.0 {
            return Coverage {
                asset_value,
                goal_value,
                ratio: 0.0,
                status: Status::Neutral,
            };
        }
        let ratio = (asset_value / goal_value * 100.0).min(100.0);
        Coverage {
            asset_value,
            goal_value,
            ratio,
            status: policy.goal_coverage.classify(ratio),
        }
    }

    pub fn compute(
        &self,
        assets: &Assets,
        financial_assets: f64,
        goals: &[Goal],
        age: u32,
        policy: &Policy,
    ) -> GoalCoverage {
        let goal_values = self.goal_values(goals, age, policy);
        let bucket = |b: GoalBucket| {
            let goal_value = goal_values.get(&b).copied().unwrap_or(0.0);
            self.coverage(self.asset_value(assets, b), goal_value, policy)
        };

        GoalCoverage {
            overall: self.coverage(financial_assets, self.total_goal_value(goals), policy),
            short: bucket(GoalBucket::Short),
            medium: bucket(GoalBucket::Medium),
            long: bucket(GoalBucket::Long),
        }
    }
}

impl Default for GoalCoverageService {
    fn default() -> Self {
        Self::new()
    }
}
