use crate::models::metrics::{Retirement, Totals};
use crate::models::policy::Policy;
use crate::services::normalization_service::NormalizationService;

/// Projects the retirement corpus and compares it with the assets left
/// after goal commitments.
pub struct RetirementService {
    normalization: NormalizationService,
}

impl RetirementService {
    pub fn new() -> Self {
        Self {
            normalization: NormalizationService::new(),
        }
    }

    /// Corpus needed to fund `expense_replacement_rate` of today's annual
    /// expenses for every year from `age` to the horizon age. Not positive
    /// once `age` reaches the horizon.
    pub fn target(&self, age: u32, monthly_expenses: f64, policy: &Policy) -> f64 {
        let years = f64::from(policy.retirement_horizon_age) - f64::from(age);
        years * (monthly_expenses * 12.0) * policy.expense_replacement_rate
    }

    pub fn compute(
        &self,
        age: u32,
        totals: &Totals,
        other_property: f64,
        total_goal_value: f64,
        policy: &Policy,
    ) -> Retirement {
        let target = self.target(age, totals.monthly_expenses, policy);
        let eligible_assets = (totals.financial_assets
            + self.normalization.amount(other_property)
            - total_goal_value)
            .max(0.0);

        let readiness_percentage = if target > 0.0 {
            (eligible_assets / target * 100.0).min(100.0)
        } else {
            100.0
        };

        Retirement {
            target,
            eligible_assets,
            readiness_percentage,
            status: policy.retirement_readiness.classify(readiness_percentage),
        }
    }
}

impl Default for RetirementService {
    fn default() -> Self {
        Self::new()
    }
}
