// ═══════════════════════════════════════════════════════════════════
// Integration Tests — FinanceTracker over an in-memory repository
// ═══════════════════════════════════════════════════════════════════

use std::sync::Arc;
use std::thread;

use chrono::NaiveDate;
use finmetrics_core::errors::CoreError;
use finmetrics_core::models::action::{ActionKey, ActionStatus};
use finmetrics_core::models::financials::{FinancialItem, Financials};
use finmetrics_core::models::policy::Policy;
use finmetrics_core::models::profile::{Persona, Role, UserProfile};
use finmetrics_core::storage::memory::InMemoryUserRepository;
use finmetrics_core::storage::repository::UserRepository;
use finmetrics_core::FinanceTracker;

const USER: &str = "+919812345678";

fn d(y: i32, m: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, day).unwrap()
}

fn tracker() -> FinanceTracker<InMemoryUserRepository> {
    FinanceTracker::new(InMemoryUserRepository::new())
}

fn profile_aged(age: u32) -> UserProfile {
    UserProfile {
        age: Some(age),
        persona: Some(Persona::Planner),
        ..UserProfile::new("Asha")
    }
}

fn salary_and_rent(salary: f64, rent: f64) -> Financials {
    let mut f = Financials::default();
    f.income.salary = Some(FinancialItem::monthly(salary));
    f.expenses.rent = Some(FinancialItem::monthly(rent));
    f
}

/// Tracker with one 30-year-old user earning 100k and spending 70k a month.
fn tracker_with_user() -> FinanceTracker<InMemoryUserRepository> {
    let t = tracker();
    t.register_user(USER, profile_aged(30)).unwrap();
    t.set_financials(USER, salary_and_rent(100_000.0, 70_000.0), d(2025, 6, 1))
        .unwrap();
    t
}

// ═══════════════════════════════════════════════════════════════════
// Users
// ═══════════════════════════════════════════════════════════════════

mod users {
    use super::*;

    #[test]
    fn register_and_fetch_profile() {
        let t = tracker();
        t.register_user(USER, profile_aged(30)).unwrap();
        let p = t.get_profile(USER).unwrap();
        assert_eq!(p.name, "Asha");
        assert_eq!(p.age, Some(30));
        assert_eq!(p.role, Role::Client);
    }

    #[test]
    fn register_trims_id() {
        let t = tracker();
        t.register_user("  +911234  ", UserProfile::new("A")).unwrap();
        assert!(t.get_profile("+911234").is_ok());
    }

    #[test]
    fn empty_id_rejected() {
        let t = tracker();
        let err = t.register_user("   ", UserProfile::new("A")).unwrap_err();
        assert!(matches!(err, CoreError::ValidationError(_)));
    }

    #[test]
    fn duplicate_rejected() {
        let t = tracker();
        t.register_user(USER, UserProfile::new("A")).unwrap();
        let err = t.register_user(USER, UserProfile::new("B")).unwrap_err();
        assert!(matches!(err, CoreError::UserAlreadyExists(_)));
    }

    #[test]
    fn concurrent_register_admits_one() {
        let t = Arc::new(tracker());
        let handles: Vec<_> = (0..8)
            .map(|_| {
                let t = Arc::clone(&t);
                thread::spawn(move || t.register_user(USER, profile_aged(30)).is_ok())
            })
            .collect();
        let admitted = handles
            .into_iter()
            .map(|h| h.join().unwrap())
            .filter(|ok| *ok)
            .count();
        assert_eq!(admitted, 1);
        assert_eq!(t.repository().len().unwrap(), 1);
    }

    #[test]
    fn implausible_age_rejected() {
        let t = tracker();
        let err = t.register_user(USER, profile_aged(150)).unwrap_err();
        assert!(matches!(err, CoreError::ValidationError(_)));
    }

    #[test]
    fn update_profile() {
        let t = tracker();
        t.register_user(USER, profile_aged(30)).unwrap();
        t.update_profile(USER, profile_aged(31)).unwrap();
        assert_eq!(t.get_profile(USER).unwrap().age, Some(31));
    }

    #[test]
    fn unknown_user() {
        let t = tracker();
        assert!(matches!(t.get_profile("x"), Err(CoreError::UserNotFound(_))));
        assert!(matches!(
            t.update_profile("x", UserProfile::new("A")),
            Err(CoreError::UserNotFound(_))
        ));
        assert!(matches!(t.remove_user("x"), Err(CoreError::UserNotFound(_))));
    }

    #[test]
    fn remove_user() {
        let t = tracker();
        t.register_user(USER, UserProfile::new("A")).unwrap();
        t.remove_user(USER).unwrap();
        assert!(t.repository().is_empty().unwrap());
    }
}

// ═══════════════════════════════════════════════════════════════════
// Financials & Snapshots
// ═══════════════════════════════════════════════════════════════════

mod financials {
    use super::*;

    #[test]
    fn set_financials_updates_current_and_snapshot() {
        let t = tracker_with_user();
        assert_eq!(
            t.get_financials(USER).unwrap(),
            salary_and_rent(100_000.0, 70_000.0)
        );
        let snaps = t.get_snapshots(USER).unwrap();
        assert_eq!(snaps.len(), 1);
        assert_eq!(snaps[0].date, d(2025, 6, 1));
    }

    #[test]
    fn same_date_replaces_snapshot() {
        let t = tracker_with_user();
        t.set_financials(USER, salary_and_rent(120_000.0, 70_000.0), d(2025, 6, 1))
            .unwrap();
        let snaps = t.get_snapshots(USER).unwrap();
        assert_eq!(snaps.len(), 1);
        assert_eq!(
            snaps[0].financials.income.salary,
            Some(FinancialItem::monthly(120_000.0))
        );
    }

    #[test]
    fn snapshots_kept_in_date_order() {
        let t = tracker_with_user();
        t.set_financials(USER, salary_and_rent(90_000.0, 70_000.0), d(2024, 6, 1))
            .unwrap();
        let dates: Vec<NaiveDate> = t.get_snapshots(USER).unwrap().iter().map(|s| s.date).collect();
        assert_eq!(dates, vec![d(2024, 6, 1), d(2025, 6, 1)]);
        // Current financials are whatever was written last.
        assert_eq!(
            t.get_financials(USER).unwrap().income.salary,
            Some(FinancialItem::monthly(90_000.0))
        );
    }

    #[test]
    fn negative_amount_rejected() {
        let t = tracker_with_user();
        let mut f = Financials::default();
        f.assets.gold = -1.0;
        let err = t.set_financials(USER, f, d(2025, 7, 1)).unwrap_err();
        match err {
            CoreError::ValidationError(msg) => assert!(msg.contains("assets.gold")),
            other => panic!("unexpected error: {other:?}"),
        }
        assert_eq!(t.get_snapshots(USER).unwrap().len(), 1);
    }

    #[test]
    fn non_finite_amount_rejected() {
        let t = tracker_with_user();
        let mut f = Financials::default();
        f.expenses.travel = Some(FinancialItem::annual(f64::NAN));
        assert!(matches!(
            t.set_financials(USER, f, d(2025, 7, 1)),
            Err(CoreError::ValidationError(_))
        ));
    }
}

// ═══════════════════════════════════════════════════════════════════
// Goals
// ═══════════════════════════════════════════════════════════════════

mod goals {
    use super::*;

    #[test]
    fn add_and_remove() {
        let t = tracker_with_user();
        let id = t.add_goal(USER, "House", 40, 5_000_000.0).unwrap();
        let goals = t.get_goals(USER).unwrap();
        assert_eq!(goals.len(), 1);
        assert_eq!(goals[0].id, id);
        assert_eq!(goals[0].name, "House");

        t.remove_goal(USER, id).unwrap();
        assert!(t.get_goals(USER).unwrap().is_empty());
    }

    #[test]
    fn concurrent_adds_are_all_kept() {
        let t = Arc::new(tracker_with_user());
        let handles: Vec<_> = (0..8)
            .map(|i| {
                let t = Arc::clone(&t);
                thread::spawn(move || {
                    for j in 0..50 {
                        t.add_goal(USER, format!("Goal {i}-{j}"), 40, 1_000.0).unwrap();
                    }
                })
            })
            .collect();
        for h in handles {
            h.join().unwrap();
        }
        assert_eq!(t.get_goals(USER).unwrap().len(), 400);
        // Concurrent goal writes must not clobber the rest of the record.
        assert_eq!(t.get_snapshots(USER).unwrap().len(), 1);
    }

    #[test]
    fn remove_unknown_goal() {
        let t = tracker_with_user();
        let err = t.remove_goal(USER, uuid::Uuid::new_v4()).unwrap_err();
        assert!(matches!(err, CoreError::GoalNotFound(_)));
    }

    #[test]
    fn blank_name_rejected() {
        let t = tracker_with_user();
        assert!(matches!(
            t.add_goal(USER, " ", 40, 1.0),
            Err(CoreError::ValidationError(_))
        ));
    }

    #[test]
    fn negative_value_rejected() {
        let t = tracker_with_user();
        assert!(matches!(
            t.add_goal(USER, "Trip", 40, -5.0),
            Err(CoreError::ValidationError(_))
        ));
    }

    #[test]
    fn goals_feed_into_metrics() {
        let t = tracker_with_user();
        t.add_goal(USER, "Wedding", 32, 500_000.0).unwrap();
        let report = t.get_metrics(USER, d(2025, 6, 1)).unwrap();
        assert_eq!(report.metrics.goal_coverage.medium.goal_value, 500_000.0);
        assert!(report.is_triggered(ActionKey::GoalsMedium));
    }
}

// ═══════════════════════════════════════════════════════════════════
// Metrics & History
// ═══════════════════════════════════════════════════════════════════

mod metrics {
    use super::*;

    #[test]
    fn metrics_for_current_financials() {
        let t = tracker_with_user();
        let report = t.get_metrics(USER, d(2025, 6, 1)).unwrap();
        assert_eq!(report.metrics.age, 30);
        assert_eq!(report.metrics.totals.monthly_savings, 30_000.0);
        assert_eq!(report.triggered_action_keys[0], ActionKey::FinancialAssetRatio);
    }

    #[test]
    fn stored_age_is_current_on_any_query_date() {
        let t = tracker_with_user();
        assert_eq!(t.get_metrics(USER, d(2025, 6, 1)).unwrap().metrics.age, 30);
        assert_eq!(t.get_metrics(USER, d(2030, 6, 1)).unwrap().metrics.age, 30);
    }

    #[test]
    fn missing_age_is_not_computable() {
        let t = tracker();
        t.register_user(USER, UserProfile::new("No Age")).unwrap();
        let err = t.get_metrics(USER, d(2025, 6, 1)).unwrap_err();
        assert!(matches!(err, CoreError::AgeUnavailable(_)));
    }

    #[test]
    fn age_from_date_of_birth() {
        let t = tracker();
        let profile = UserProfile {
            date_of_birth: Some(d(1985, 9, 10)),
            ..UserProfile::new("Dev")
        };
        t.register_user(USER, profile).unwrap();
        let report = t.get_metrics(USER, d(2025, 9, 9)).unwrap();
        assert_eq!(report.metrics.age, 39);
    }

    #[test]
    fn history_uses_age_at_each_snapshot() {
        let t = tracker_with_user();
        t.set_financials(USER, salary_and_rent(80_000.0, 70_000.0), d(2023, 6, 1))
            .unwrap();

        let history = t.get_history(USER, d(2025, 6, 1)).unwrap();
        assert_eq!(history.len(), 2);
        assert_eq!(history[0].date, d(2023, 6, 1));
        assert_eq!(history[0].age, 28);
        assert_eq!(history[0].monthly_savings, 10_000.0);
        assert_eq!(history[1].age, 30);
        assert_eq!(history[1].monthly_savings, 30_000.0);
    }

    #[test]
    fn history_skips_uncomputable_snapshots() {
        let t = tracker();
        t.register_user(USER, UserProfile::new("No Age")).unwrap();
        t.set_financials(USER, salary_and_rent(50_000.0, 20_000.0), d(2025, 1, 1))
            .unwrap();
        assert!(t.get_history(USER, d(2025, 6, 1)).unwrap().is_empty());
    }

    #[test]
    fn custom_policy_is_used() {
        let mut policy = Policy::default();
        policy.savings_ratio.green = 40.0;
        let t = FinanceTracker::with_policy(InMemoryUserRepository::new(), policy).unwrap();
        assert_eq!(t.policy().savings_ratio.green, 40.0);

        t.register_user(USER, profile_aged(30)).unwrap();
        t.set_financials(USER, salary_and_rent(100_000.0, 70_000.0), d(2025, 6, 1))
            .unwrap();
        let report = t.get_metrics(USER, d(2025, 6, 1)).unwrap();
        assert!(report.is_triggered(ActionKey::SavingsRatio));
    }

    #[test]
    fn invalid_policy_rejected() {
        let mut policy = Policy::default();
        policy.short_horizon_years = 10;
        let err = FinanceTracker::with_policy(InMemoryUserRepository::new(), policy).unwrap_err();
        assert!(matches!(err, CoreError::InvalidPolicy(_)));
    }
}

// ═══════════════════════════════════════════════════════════════════
// Actions
// ═══════════════════════════════════════════════════════════════════

mod actions {
    use super::*;

    #[test]
    fn start_suggested_action() {
        let t = tracker_with_user();
        t.start_action(USER, ActionKey::LiquidityRatio, d(2025, 6, 2)).unwrap();
        let actions = t.get_actions(USER).unwrap();
        assert_eq!(actions.len(), 1);
        assert_eq!(actions[0].key, ActionKey::LiquidityRatio);
        assert_eq!(actions[0].status, ActionStatus::InProgress);
        assert_eq!(actions[0].started_on, d(2025, 6, 2));
    }

    #[test]
    fn starting_twice_is_noop() {
        let t = tracker_with_user();
        t.start_action(USER, ActionKey::LiquidityRatio, d(2025, 6, 2)).unwrap();
        t.start_action(USER, ActionKey::LiquidityRatio, d(2025, 6, 9)).unwrap();
        let actions = t.get_actions(USER).unwrap();
        assert_eq!(actions.len(), 1);
        assert_eq!(actions[0].started_on, d(2025, 6, 2));
    }

    #[test]
    fn cannot_start_unsuggested_action() {
        let t = tracker_with_user();
        // Savings ratio is 30%, which is green.
        let err = t
            .start_action(USER, ActionKey::SavingsRatio, d(2025, 6, 2))
            .unwrap_err();
        assert!(matches!(err, CoreError::ValidationError(_)));
    }

    #[test]
    fn cannot_complete_unstarted_action() {
        let t = tracker_with_user();
        let err = t
            .complete_action(USER, ActionKey::LiquidityRatio, d(2025, 6, 2))
            .unwrap_err();
        assert!(matches!(err, CoreError::ActionNotFound(_)));
    }

    #[test]
    fn completion_requires_condition_cleared() {
        let t = tracker_with_user();
        t.start_action(USER, ActionKey::LiquidityRatio, d(2025, 6, 2)).unwrap();

        let err = t
            .complete_action(USER, ActionKey::LiquidityRatio, d(2025, 6, 3))
            .unwrap_err();
        assert!(matches!(err, CoreError::ActionStillTriggered(_)));

        // Seven months of expenses in the bank clears the liquidity finding.
        let mut f = salary_and_rent(100_000.0, 70_000.0);
        f.assets.savings_account = 500_000.0;
        t.set_financials(USER, f, d(2025, 7, 1)).unwrap();

        t.complete_action(USER, ActionKey::LiquidityRatio, d(2025, 7, 1))
            .unwrap();
        let action = &t.get_actions(USER).unwrap()[0];
        assert_eq!(action.status, ActionStatus::Completed);
        assert_eq!(action.completed_on, Some(d(2025, 7, 1)));
    }

    #[test]
    fn completed_action_can_be_restarted() {
        let t = tracker_with_user();
        t.start_action(USER, ActionKey::LiquidityRatio, d(2025, 6, 2)).unwrap();

        let mut f = salary_and_rent(100_000.0, 70_000.0);
        f.assets.savings_account = 500_000.0;
        t.set_financials(USER, f, d(2025, 7, 1)).unwrap();
        t.complete_action(USER, ActionKey::LiquidityRatio, d(2025, 7, 1))
            .unwrap();

        // Cash spent again: the finding comes back.
        t.set_financials(USER, salary_and_rent(100_000.0, 70_000.0), d(2025, 9, 1))
            .unwrap();
        t.start_action(USER, ActionKey::LiquidityRatio, d(2025, 9, 1)).unwrap();

        let actions = t.get_actions(USER).unwrap();
        assert_eq!(actions.len(), 1);
        assert_eq!(actions[0].status, ActionStatus::InProgress);
        assert_eq!(actions[0].started_on, d(2025, 9, 1));
        assert_eq!(actions[0].completed_on, None);
    }
}

// ═══════════════════════════════════════════════════════════════════
// Advisor overview
// ═══════════════════════════════════════════════════════════════════

mod advisor {
    use super::*;

    const ADVISOR: &str = "+910000000001";

    fn client(name: &str, age: Option<u32>, advisor: Option<&str>) -> UserProfile {
        UserProfile {
            age,
            advisor_id: advisor.map(str::to_string),
            ..UserProfile::new(name)
        }
    }

    fn setup() -> FinanceTracker<InMemoryUserRepository> {
        let t = tracker();
        let advisor = UserProfile {
            role: Role::Advisor,
            ..UserProfile::new("Advisor")
        };
        t.register_user(ADVISOR, advisor).unwrap();

        t.register_user("c1", client("Bina", Some(35), Some(ADVISOR))).unwrap();
        let mut f = salary_and_rent(100_000.0, 70_000.0);
        f.assets.savings_account = 200_000.0;
        f.liabilities.home_loan = 50_000.0;
        t.set_financials("c1", f, d(2025, 6, 1)).unwrap();

        t.register_user("c2", client("Chetan", None, Some(ADVISOR))).unwrap();
        t.register_user("c3", client("Other", Some(40), Some("+919999999999")))
            .unwrap();
        t
    }

    #[test]
    fn aggregates_linked_clients() {
        let t = setup();
        let o = t.advisor_overview(ADVISOR, d(2025, 6, 1)).unwrap();
        assert_eq!(o.advisor_id, ADVISOR);
        assert_eq!(o.as_of_date, d(2025, 6, 1));
        assert_eq!(o.client_count, 2);
        assert_eq!(o.computable_clients, 1);
        assert_eq!(o.total_assets, 200_000.0);
        assert_eq!(o.total_liabilities, 50_000.0);
        assert_eq!(o.total_net_worth, 150_000.0);
        assert!((o.average_savings_ratio - 30.0).abs() < 1e-9);
    }

    #[test]
    fn client_summaries_sorted_by_id() {
        let t = setup();
        let o = t.advisor_overview(ADVISOR, d(2025, 6, 1)).unwrap();
        let ids: Vec<&str> = o.clients.iter().map(|c| c.user_id.as_str()).collect();
        assert_eq!(ids, vec!["c1", "c2"]);

        assert_eq!(o.clients[0].net_worth, Some(150_000.0));
        assert!(o.clients[0].action_count > 0);
        assert!(o.clients[0].top_action.is_some());

        assert_eq!(o.clients[1].net_worth, None);
        assert_eq!(o.clients[1].action_count, 0);
    }

    #[test]
    fn non_advisor_rejected() {
        let t = setup();
        let err = t.advisor_overview("c1", d(2025, 6, 1)).unwrap_err();
        assert!(matches!(err, CoreError::ValidationError(_)));
    }

    #[test]
    fn advisor_without_clients() {
        let t = tracker();
        let advisor = UserProfile {
            role: Role::Advisor,
            ..UserProfile::new("Solo")
        };
        t.register_user(ADVISOR, advisor).unwrap();
        let o = t.advisor_overview(ADVISOR, d(2025, 6, 1)).unwrap();
        assert_eq!(o.client_count, 0);
        assert_eq!(o.average_savings_ratio, 0.0);
        assert!(o.clients.is_empty());
    }
}

// ═══════════════════════════════════════════════════════════════════
// Export / Import
// ═══════════════════════════════════════════════════════════════════

mod export_import {
    use super::*;

    #[test]
    fn round_trip_between_trackers() {
        let source = tracker_with_user();
        source.add_goal(USER, "House", 40, 5_000_000.0).unwrap();
        source
            .start_action(USER, ActionKey::LiquidityRatio, d(2025, 6, 2))
            .unwrap();
        let json = source.export_user_json(USER).unwrap();

        let target = tracker();
        let id = target.import_user_json(&json).unwrap();
        assert_eq!(id, USER);
        assert_eq!(
            target.repository().get(USER).unwrap(),
            source.repository().get(USER).unwrap()
        );
    }

    #[test]
    fn import_overwrites_existing() {
        let t = tracker_with_user();
        let json = r#"{"id": "+919812345678", "profile": {"name": "Replaced", "age": 50}}"#;
        t.import_user_json(json).unwrap();
        assert_eq!(t.get_profile(USER).unwrap().name, "Replaced");
        assert!(t.get_snapshots(USER).unwrap().is_empty());
    }

    #[test]
    fn import_rejects_negative_amounts() {
        let t = tracker();
        let json = r#"{
            "id": "u1",
            "profile": {"name": "Bad"},
            "financials": {"assets": {"gold": -10}}
        }"#;
        assert!(matches!(
            t.import_user_json(json),
            Err(CoreError::ValidationError(_))
        ));
        assert!(t.repository().is_empty().unwrap());
    }

    #[test]
    fn import_accepts_lowercase_persona_and_null_amounts() {
        let t = tracker();
        let json = r#"{
            "id": "u1",
            "profile": {"name": "Lower", "age": 30, "persona": "guardian"},
            "financials": {"assets": {"cashInHand": null, "stocks": 60000}}
        }"#;
        t.import_user_json(json).unwrap();
        assert_eq!(t.get_profile("u1").unwrap().persona, Some(Persona::Guardian));
        assert_eq!(t.get_financials("u1").unwrap().assets.cash_in_hand, 0.0);
    }

    #[test]
    fn import_rejects_malformed_json() {
        let t = tracker();
        assert!(matches!(
            t.import_user_json("not json"),
            Err(CoreError::Deserialization(_))
        ));
    }

    #[test]
    fn export_unknown_user() {
        let t = tracker();
        assert!(matches!(
            t.export_user_json("x"),
            Err(CoreError::UserNotFound(_))
        ));
    }
}
