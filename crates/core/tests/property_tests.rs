// ═══════════════════════════════════════════════════════════════════
// Property Tests — engine invariants over generated households
// ═══════════════════════════════════════════════════════════════════

use std::collections::HashSet;

use finmetrics_core::compute_metrics;
use finmetrics_core::models::action::ActionKey;
use finmetrics_core::models::financials::{FinancialItem, Financials};
use finmetrics_core::models::goal::{Goal, GoalBucket};
use finmetrics_core::models::metrics::MetricsReport;
use finmetrics_core::models::policy::Policy;
use finmetrics_core::models::profile::{Demographics, Persona};
use finmetrics_core::services::action_service::ActionService;
use finmetrics_core::services::goal_coverage_service::GoalCoverageService;
use finmetrics_core::services::normalization_service::NormalizationService;
use proptest::prelude::{any, prop, prop_assert, prop_assert_eq, proptest, Strategy};

fn amount() -> impl Strategy<Value = f64> {
    (0u64..50_000_000).prop_map(|v| v as f64)
}

fn item() -> impl Strategy<Value = Option<FinancialItem>> {
    prop::option::of((amount(), any::<bool>()).prop_map(|(v, annual)| {
        if annual {
            FinancialItem::annual(v)
        } else {
            FinancialItem::monthly(v)
        }
    }))
}

fn household() -> impl Strategy<Value = Financials> {
    (
        prop::collection::vec(amount(), 16),
        prop::collection::vec(amount(), 5),
        prop::collection::vec(item(), 5),
        prop::collection::vec(item(), 16),
        prop::collection::vec(amount(), 4),
    )
        .prop_map(|(assets, liabilities, income, expenses, insurance)| {
            let mut f = Financials::default();
            let a = &mut f.assets;
            [
                &mut a.cash_in_hand,
                &mut a.savings_account,
                &mut a.fixed_deposit,
                &mut a.recurring_deposit,
                &mut a.gold,
                &mut a.stocks,
                &mut a.mutual_funds,
                &mut a.crypto,
                &mut a.nps,
                &mut a.ppf,
                &mut a.pf,
                &mut a.sukanya_samriddhi,
                &mut a.house,
                &mut a.car,
                &mut a.other_property,
                &mut a.other,
            ]
            .into_iter()
            .zip(assets)
            .for_each(|(slot, v)| *slot = v);

            let l = &mut f.liabilities;
            [
                &mut l.home_loan,
                &mut l.personal_loan,
                &mut l.car_loan,
                &mut l.credit_card,
                &mut l.other,
            ]
            .into_iter()
            .zip(liabilities)
            .for_each(|(slot, v)| *slot = v);

            let i = &mut f.income;
            [
                &mut i.salary,
                &mut i.bonus,
                &mut i.business,
                &mut i.rental,
                &mut i.other,
            ]
            .into_iter()
            .zip(income)
            .for_each(|(slot, v)| *slot = v);

            let e = &mut f.expenses;
            [
                &mut e.rent,
                &mut e.emi,
                &mut e.maintenance,
                &mut e.utilities,
                &mut e.groceries,
                &mut e.transport,
                &mut e.household_help,
                &mut e.mobile_internet,
                &mut e.education,
                &mut e.healthcare,
                &mut e.insurance_premium,
                &mut e.dining_out,
                &mut e.entertainment,
                &mut e.shopping,
                &mut e.travel,
                &mut e.other,
            ]
            .into_iter()
            .zip(expenses)
            .for_each(|(slot, v)| *slot = v);

            let c = &mut f.insurance;
            [&mut c.life, &mut c.health, &mut c.car, &mut c.property]
                .into_iter()
                .zip(insurance)
                .for_each(|(slot, v)| *slot = v);

            f
        })
}

fn goals() -> impl Strategy<Value = Vec<Goal>> {
    prop::collection::vec(
        (1u32..100, amount()).prop_map(|(target_age, value)| Goal::new("g", target_age, value)),
        0..6,
    )
}

fn demographics() -> impl Strategy<Value = Demographics> {
    (
        1u32..=120,
        prop::option::of(prop::sample::select(Persona::ALL.to_vec())),
    )
        .prop_map(|(age, persona)| Demographics::new(age, persona))
}

fn all_finite(v: &serde_json::Value) -> bool {
    match v {
        serde_json::Value::Number(n) => n.as_f64().map_or(true, f64::is_finite),
        serde_json::Value::Array(a) => a.iter().all(all_finite),
        serde_json::Value::Object(o) => o.values().all(all_finite),
        _ => true,
    }
}

fn assert_report_invariants(report: &MetricsReport) {
    let keys = &report.triggered_action_keys;
    let unique: HashSet<&ActionKey> = keys.iter().collect();
    assert_eq!(unique.len(), keys.len(), "duplicate keys in {keys:?}");

    let m = &report.metrics;
    for (_, coverage) in m.goal_coverage.keyed() {
        assert!((0.0..=100.0).contains(&coverage.ratio));
    }
    assert!((0.0..=100.0).contains(&m.retirement.readiness_percentage));
    assert!(m.retirement.eligible_assets >= 0.0);
    assert!(m.allocation.recommended_equity_pct >= 0.0);
}

proptest! {
    #![proptest_config(proptest::test_runner::Config::with_cases(64))]

    #[test]
    fn prop_metrics_are_finite_and_well_formed(
        f in household(),
        d in demographics(),
        g in goals()
    ) {
        let report = compute_metrics(&f, &d, &g).unwrap();
        let json = serde_json::to_value(&report).unwrap();
        prop_assert!(all_finite(&json));
        assert_report_invariants(&report);
    }

    #[test]
    fn prop_same_inputs_same_report(
        f in household(),
        d in demographics(),
        g in goals()
    ) {
        let a = compute_metrics(&f, &d, &g).unwrap();
        let b = compute_metrics(&f, &d, &g).unwrap();
        prop_assert_eq!(a, b);
    }

    #[test]
    fn prop_net_worth_is_assets_minus_liabilities(f in household(), d in demographics()) {
        let t = compute_metrics(&f, &d, &[]).unwrap().metrics.totals;
        prop_assert!((t.net_worth - (t.total_assets - t.total_liabilities)).abs() < 1e-3);
        prop_assert!(t.liquid_assets <= t.financial_assets);
        prop_assert!(t.financial_assets <= t.total_assets);
    }

    #[test]
    fn prop_invalid_amounts_read_as_zero(v in prop::sample::select(vec![
        f64::NAN,
        f64::INFINITY,
        f64::NEG_INFINITY,
        -1.0,
        -1e12,
    ])) {
        let mut f = Financials::default();
        f.assets.stocks = v;
        f.liabilities.credit_card = v;
        f.income.salary = Some(FinancialItem::monthly(v));
        f.expenses.rent = Some(FinancialItem::annual(v));
        let report = compute_metrics(&f, &Demographics::new(30, None), &[]).unwrap();
        let empty = compute_metrics(&Financials::default(), &Demographics::new(30, None), &[]).unwrap();
        prop_assert_eq!(report, empty);
    }

    #[test]
    fn prop_annual_item_normalizes_to_a_twelfth(v in amount()) {
        let n = NormalizationService::new();
        let item = FinancialItem::annual(v);
        prop_assert!((n.monthly(Some(&item)) * 12.0 - v).abs() < 1e-6);
        prop_assert_eq!(n.annual(Some(&item)), v);
    }

    #[test]
    fn prop_savings_ratio_grows_with_income(
        base in 1u64..1_000_000,
        raise in 0u64..1_000_000,
        spend in 0u64..2_000_000
    ) {
        let household = |salary: f64| {
            let mut f = Financials::default();
            f.income.salary = Some(FinancialItem::monthly(salary));
            f.expenses.groceries = Some(FinancialItem::monthly(spend as f64));
            f
        };
        let d = Demographics::new(35, None);
        let low = compute_metrics(&household(base as f64), &d, &[]).unwrap();
        let high = compute_metrics(&household((base + raise) as f64), &d, &[]).unwrap();
        prop_assert!(
            high.metrics.ratios.savings_ratio.value >= low.metrics.ratios.savings_ratio.value - 1e-9
        );
    }

    #[test]
    fn prop_each_goal_lands_in_exactly_one_bucket(age in 1u32..=120, g in goals()) {
        let s = GoalCoverageService::new();
        let policy = Policy::default();
        let values = s.goal_values(&g, age, &policy);
        let bucketed: f64 = GoalBucket::ALL.iter().map(|b| values[b]).sum();
        prop_assert!((bucketed - s.total_goal_value(&g)).abs() < 1e-3);
    }

    #[test]
    fn prop_prioritize_dedupes_and_orders_by_tier(
        raw in prop::collection::vec(
            (1u8..=6, prop::sample::select(ActionKey::ALL.to_vec())),
            0..30
        )
    ) {
        let out = ActionService::new().prioritize(raw.clone());

        let unique: HashSet<ActionKey> = out.iter().copied().collect();
        prop_assert_eq!(unique.len(), out.len());

        let input_keys: HashSet<ActionKey> = raw.iter().map(|(_, k)| *k).collect();
        prop_assert_eq!(unique, input_keys);

        // Tier of each key is the tier of its first occurrence.
        let tier_of = |key: ActionKey| {
            raw.iter().find(|(_, k)| *k == key).map(|(t, _)| *t).unwrap()
        };
        let tiers: Vec<u8> = out.iter().map(|k| tier_of(*k)).collect();
        prop_assert!(tiers.windows(2).all(|w| w[0] <= w[1]));
    }
}
