pub mod errors;
pub mod models;
pub mod services;
pub mod storage;

use chrono::NaiveDate;
use log::info;
use models::{
    action::{ActionKey, ActionStatus, UserAction},
    advisor::AdvisorOverview,
    financials::{FinancialSnapshot, Financials},
    goal::Goal,
    metrics::MetricsReport,
    policy::Policy,
    profile::{Demographics, Role, UserProfile},
    trend::TrendPoint,
    user::UserRecord,
};
use services::{
    action_service::ActionService, advisor_service::AdvisorService,
    history_service::HistoryService, metrics_service::MetricsService,
};
use storage::{manager::StorageManager, repository::UserRepository};

use errors::CoreError;

/// Compute metrics for one set of inputs with the default policy.
///
/// Pure and deterministic: no I/O, no shared state. Fails with
/// `CoreError::AgeUnavailable` when `demographics.age` is missing or invalid.
pub fn compute_metrics(
    financials: &Financials,
    demographics: &Demographics,
    goals: &[Goal],
) -> Result<MetricsReport, CoreError> {
    MetricsService::new().compute(financials, demographics, goals)
}

/// Main entry point for applications embedding the metrics engine.
/// Holds the injected repository and all services needed to operate on it.
#[must_use]
pub struct FinanceTracker<R: UserRepository> {
    repository: R,
    metrics_service: MetricsService,
    history_service: HistoryService,
    action_service: ActionService,
    advisor_service: AdvisorService,
}

impl<R: UserRepository> std::fmt::Debug for FinanceTracker<R> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FinanceTracker")
            .field("policy", self.metrics_service.policy())
            .finish_non_exhaustive()
    }
}

impl<R: UserRepository> FinanceTracker<R> {
    /// Create a tracker over `repository` with the default policy.
    pub fn new(repository: R) -> Self {
        Self::build(repository, MetricsService::new())
    }

    /// Create a tracker with a custom (validated) policy.
    pub fn with_policy(repository: R, policy: Policy) -> Result<Self, CoreError> {
        let metrics_service = MetricsService::with_policy(policy)?;
        Ok(Self::build(repository, metrics_service))
    }

    #[must_use]
    pub fn repository(&self) -> &R {
        &self.repository
    }

    #[must_use]
    pub fn policy(&self) -> &Policy {
        self.metrics_service.policy()
    }

    // ── Users ───────────────────────────────────────────────────────

    /// Register a new user under `user_id` (their phone number).
    pub fn register_user(&self, user_id: &str, profile: UserProfile) -> Result<(), CoreError> {
        let user_id = user_id.trim();
        if user_id.is_empty() {
            return Err(CoreError::ValidationError("User id must not be empty".into()));
        }
        validate_profile(&profile)?;

        self.repository.insert(UserRecord::new(user_id, profile))?;
        info!("Registered user {user_id}");
        Ok(())
    }

    pub fn update_profile(&self, user_id: &str, profile: UserProfile) -> Result<(), CoreError> {
        validate_profile(&profile)?;
        self.repository.update(user_id, &mut |record: &mut UserRecord| {
            record.profile = profile.clone();
            Ok(())
        })
    }

    pub fn get_profile(&self, user_id: &str) -> Result<UserProfile, CoreError> {
        Ok(self.load(user_id)?.profile)
    }

    /// Delete a user and everything stored for them.
    pub fn remove_user(&self, user_id: &str) -> Result<(), CoreError> {
        if !self.repository.remove(user_id)? {
            return Err(CoreError::UserNotFound(user_id.to_string()));
        }
        info!("Removed user {user_id}");
        Ok(())
    }

    // ── Financials ──────────────────────────────────────────────────

    /// Replace the user's current financials and record them as the
    /// snapshot for `date` (replacing any earlier snapshot on that date).
    pub fn set_financials(
        &self,
        user_id: &str,
        financials: Financials,
        date: NaiveDate,
    ) -> Result<(), CoreError> {
        validate_financials(&financials)?;
        self.repository.update(user_id, &mut |record: &mut UserRecord| {
            record.upsert_snapshot(FinancialSnapshot {
                date,
                financials: financials.clone(),
            });
            record.financials = financials.clone();
            Ok(())
        })
    }

    pub fn get_financials(&self, user_id: &str) -> Result<Financials, CoreError> {
        Ok(self.load(user_id)?.financials)
    }

    pub fn get_snapshots(&self, user_id: &str) -> Result<Vec<FinancialSnapshot>, CoreError> {
        Ok(self.load(user_id)?.snapshots)
    }

    // ── Goals ───────────────────────────────────────────────────────

    /// Add a goal. Returns its generated id.
    pub fn add_goal(
        &self,
        user_id: &str,
        name: impl Into<String>,
        target_age: u32,
        target_value: f64,
    ) -> Result<uuid::Uuid, CoreError> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err(CoreError::ValidationError("Goal name must not be empty".into()));
        }
        if !target_value.is_finite() || target_value < 0.0 {
            return Err(CoreError::ValidationError(format!(
                "Goal target value must be a non-negative number, got {target_value}"
            )));
        }

        let goal = Goal::new(name, target_age, target_value);
        let id = goal.id;
        self.repository.update(user_id, &mut |record: &mut UserRecord| {
            record.goals.push(goal.clone());
            Ok(())
        })?;
        Ok(id)
    }

    pub fn remove_goal(&self, user_id: &str, goal_id: uuid::Uuid) -> Result<(), CoreError> {
        self.repository.update(user_id, &mut |record: &mut UserRecord| {
            let idx = record
                .goals
                .iter()
                .position(|g| g.id == goal_id)
                .ok_or_else(|| CoreError::GoalNotFound(goal_id.to_string()))?;
            record.goals.remove(idx);
            Ok(())
        })
    }

    pub fn get_goals(&self, user_id: &str) -> Result<Vec<Goal>, CoreError> {
        Ok(self.load(user_id)?.goals)
    }

    // ── Metrics ─────────────────────────────────────────────────────

    /// Metrics for the user's current financials, with age taken as of `date`.
    pub fn get_metrics(&self, user_id: &str, date: NaiveDate) -> Result<MetricsReport, CoreError> {
        let record = self.load(user_id)?;
        self.report_for(&record, date)
    }

    /// Metrics recomputed for every stored snapshot, oldest first.
    /// `date` is the date the profile's stored age is valid for.
    pub fn get_history(&self, user_id: &str, date: NaiveDate) -> Result<Vec<TrendPoint>, CoreError> {
        let record = self.load(user_id)?;
        Ok(self.history_service.trend(
            &self.metrics_service,
            &record.profile,
            &record.snapshots,
            &record.goals,
            date,
        ))
    }

    // ── Actions ─────────────────────────────────────────────────────

    /// Start working on a suggested action. Only currently triggered keys
    /// can be started; starting one already in progress is a no-op.
    pub fn start_action(&self, user_id: &str, key: ActionKey, date: NaiveDate) -> Result<(), CoreError> {
        self.repository.update(user_id, &mut |record: &mut UserRecord| {
            let report = self.report_for(record, date)?;
            if !report.is_triggered(key) {
                return Err(CoreError::ValidationError(format!(
                    "Action '{key}' is not currently suggested"
                )));
            }

            match record.actions.iter_mut().find(|a| a.key == key) {
                Some(action) if action.status == ActionStatus::InProgress => {}
                Some(action) => *action = UserAction::start(key, date),
                None => record.actions.push(UserAction::start(key, date)),
            }
            Ok(())
        })
    }

    /// Mark an in-progress action complete. Fails while the underlying
    /// condition still holds for the user's current data.
    pub fn complete_action(&self, user_id: &str, key: ActionKey, date: NaiveDate) -> Result<(), CoreError> {
        self.repository.update(user_id, &mut |record: &mut UserRecord| {
            let report = self.report_for(record, date)?;

            let idx = record
                .actions
                .iter()
                .position(|a| a.key == key && a.status == ActionStatus::InProgress)
                .ok_or_else(|| CoreError::ActionNotFound(key.to_string()))?;

            if !self.action_service.can_complete(key, &report) {
                return Err(CoreError::ActionStillTriggered(key.to_string()));
            }

            let action = &mut record.actions[idx];
            action.status = ActionStatus::Completed;
            action.completed_on = Some(date);
            Ok(())
        })?;
        info!("User {user_id} completed action {key}");
        Ok(())
    }

    pub fn get_actions(&self, user_id: &str) -> Result<Vec<UserAction>, CoreError> {
        Ok(self.load(user_id)?.actions)
    }

    // ── Advisor ─────────────────────────────────────────────────────

    /// Aggregated metrics over every client linked to `advisor_id`.
    pub fn advisor_overview(&self, advisor_id: &str, date: NaiveDate) -> Result<AdvisorOverview, CoreError> {
        let advisor = self.load(advisor_id)?;
        if advisor.profile.role != Role::Advisor {
            return Err(CoreError::ValidationError(format!(
                "User {advisor_id} is not an advisor"
            )));
        }

        let clients: Vec<UserRecord> = self
            .repository
            .list()?
            .into_iter()
            .filter(|r| r.profile.advisor_id.as_deref() == Some(advisor_id))
            .collect();

        Ok(self
            .advisor_service
            .overview(&self.metrics_service, advisor_id, &clients, date))
    }

    // ── Export / Import ─────────────────────────────────────────────

    pub fn export_user_json(&self, user_id: &str) -> Result<String, CoreError> {
        StorageManager::record_to_json(&self.load(user_id)?)
    }

    /// Import (or overwrite) a user record from JSON. Returns the user id.
    pub fn import_user_json(&self, json: &str) -> Result<String, CoreError> {
        let record = StorageManager::record_from_json(json)?;
        validate_profile(&record.profile)?;
        validate_financials(&record.financials)?;
        let id = record.id.clone();
        self.repository.put(record)?;
        info!("Imported user {id}");
        Ok(id)
    }

    // ── Internal ────────────────────────────────────────────────────

    fn build(repository: R, metrics_service: MetricsService) -> Self {
        Self {
            repository,
            metrics_service,
            history_service: HistoryService::new(),
            action_service: ActionService::new(),
            advisor_service: AdvisorService::new(),
        }
    }

    fn load(&self, user_id: &str) -> Result<UserRecord, CoreError> {
        self.repository
            .get(user_id)?
            .ok_or_else(|| CoreError::UserNotFound(user_id.to_string()))
    }

    fn report_for(&self, record: &UserRecord, date: NaiveDate) -> Result<MetricsReport, CoreError> {
        let demographics = record.profile.demographics_on(date, date);
        self.metrics_service
            .compute(&record.financials, &demographics, &record.goals)
    }
}

/// Every entered amount must be a finite, non-negative number.
fn validate_financials(financials: &Financials) -> Result<(), CoreError> {
    for (label, value) in financials.labelled_values() {
        if !value.is_finite() || value < 0.0 {
            return Err(CoreError::ValidationError(format!(
                "{label} must be a non-negative number, got {value}"
            )));
        }
    }
    Ok(())
}

fn validate_profile(profile: &UserProfile) -> Result<(), CoreError> {
    if let Some(age) = profile.age {
        if age > services::metrics_service::MAX_AGE {
            return Err(CoreError::ValidationError(format!(
                "Age {age} exceeds maximum of {}",
                services::metrics_service::MAX_AGE
            )));
        }
    }
    Ok(())
}
