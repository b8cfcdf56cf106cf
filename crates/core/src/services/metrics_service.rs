use log::{debug, warn};

use crate::errors::CoreError;
use crate::models::financials::Financials;
use crate::models::goal::Goal;
use crate::models::metrics::{Metrics, MetricsReport};
use crate::models::policy::Policy;
use crate::models::profile::Demographics;
use crate::services::action_service::ActionService;
use crate::services::goal_coverage_service::GoalCoverageService;
use crate::services::protection_service::ProtectionService;
use crate::services::ratio_service::RatioService;
use crate::services::retirement_service::RetirementService;
use crate::services::totals_service::TotalsService;

/// Youngest and oldest ages the engine accepts.
pub const MIN_AGE: u32 = 1;
pub const MAX_AGE: u32 = 120;

/// Derives the full metrics report from raw financial inputs.
///
/// Stateless apart from its policy: the same inputs always produce the
/// same report, so it is safe to share across threads and to call once
/// per historical snapshot.
pub struct MetricsService {
    policy: Policy,
    totals_service: TotalsService,
    ratio_service: RatioService,
    protection_service: ProtectionService,
    goal_coverage_service: GoalCoverageService,
    retirement_service: RetirementService,
    action_service: ActionService,
}

impl MetricsService {
    pub fn new() -> Self {
        Self::build(Policy::default())
    }

    /// Use a custom policy. The policy is validated first.
    pub fn with_policy(policy: Policy) -> Result<Self, CoreError> {
        policy.validate()?;
        Ok(Self::build(policy))
    }

    #[must_use]
    pub fn policy(&self) -> &Policy {
        &self.policy
    }

    /// Compute metrics and triggered actions.
    ///
    /// Fails with `AgeUnavailable` when the age is missing or outside
    /// `MIN_AGE..=MAX_AGE`; the engine never guesses an age.
    pub fn compute(
        &self,
        financials: &Financials,
        demographics: &Demographics,
        goals: &[Goal],
    ) -> Result<MetricsReport, CoreError> {
        let age = match demographics.age {
            Some(age) if (MIN_AGE..=MAX_AGE).contains(&age) => age,
            Some(age) => {
                warn!("Refusing to compute metrics for out-of-range age {age}");
                return Err(CoreError::AgeUnavailable(format!(
                    "age {age} is outside {MIN_AGE}..={MAX_AGE}"
                )));
            }
            None => {
                warn!("Refusing to compute metrics without an age");
                return Err(CoreError::AgeUnavailable("no age on profile".into()));
            }
        };
        let policy = &self.policy;

        // 1. Aggregates
        let totals = self.totals_service.compute(financials);

        // 2. Ratios, protection, goals, retirement, allocation
        let ratios = self.ratio_service.compute(&totals, policy);
        let protection = self.protection_service.compute(financials, &totals, policy);
        let goal_coverage = self.goal_coverage_service.compute(
            &financials.assets,
            totals.financial_assets,
            goals,
            age,
            policy,
        );
        let total_goal_value = self.goal_coverage_service.total_goal_value(goals);
        let retirement = self.retirement_service.compute(
            age,
            &totals,
            financials.assets.other_property,
            total_goal_value,
            policy,
        );
        let allocation = self.action_service.allocation(
            self.totals_service.equity_assets(&financials.assets),
            totals.financial_assets,
            age,
            demographics,
            policy,
        );

        // 3. Actions
        let candidates = self.action_service.candidates(
            &ratios,
            &protection,
            &goal_coverage,
            &retirement,
            &allocation,
        );
        let triggered_action_keys = self.action_service.prioritize(candidates);

        debug!(
            "Metrics computed: age={age}, net_worth={:.2}, monthly_savings={:.2}, actions={}",
            totals.net_worth,
            totals.monthly_savings,
            triggered_action_keys.len()
        );

        Ok(MetricsReport {
            metrics: Metrics {
                age,
                totals,
                ratios,
                protection,
                goal_coverage,
                retirement,
                allocation,
            },
            triggered_action_keys,
        })
    }

    fn build(policy: Policy) -> Self {
        Self {
            policy,
            totals_service: TotalsService::new(),
            ratio_service: RatioService::new(),
            protection_service: ProtectionService::new(),
            goal_coverage_service: GoalCoverageService::new(),
            retirement_service: RetirementService::new(),
            action_service: ActionService::new(),
        }
    }
}

impl Default for MetricsService {
    fn default() -> Self {
        Self::new()
    }
}
