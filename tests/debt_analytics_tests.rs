use chrono::{DateTime, Duration, TimeZone, Utc};
use meetmap::config::{DebtConfig, RoiConfig};
use meetmap::{analyze_debt, build_graveyard, compute_roi, ActionItem, ActionStatus};
use proptest::prelude::*;

fn now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 6, 15, 12, 0, 0).unwrap()
}

fn action(
    owner: Option<&str>,
    status: ActionStatus,
    age_days: i64,
    deadline_offset: Option<i64>,
) -> ActionItem {
    ActionItem {
        id: "a".into(),
        meeting_id: "m".into(),
        meeting_title: "Sync".into(),
        meeting_date: None,
        task: "Finish the rollout plan".into(),
        owner: owner.map(String::from),
        deadline: deadline_offset.map(|d| (now() + Duration::days(d)).date_naive()),
        status,
        created_at: Some(now() - Duration::days(age_days)),
        completed_at: None,
        risk_score: None,
    }
}

#[test]
fn test_total_debt_counts_incomplete_items_only() {
    let actions = vec![
        action(Some("Ana"), ActionStatus::Done, 5, None),
        action(Some("Ben"), ActionStatus::Todo, 5, None),
        action(Some("Cid"), ActionStatus::Blocked, 5, None),
    ];
    let debt = analyze_debt(&actions, &DebtConfig::default(), now());
    assert_eq!(debt.total_debt, 480.0);
    assert_eq!(debt.total_actions, 3);
    assert_eq!(debt.completed_actions, 1);
    assert_eq!(debt.incomplete_actions, 2);
    assert!((debt.completion_rate - 0.33).abs() < 1e-9);
}

#[test]
fn test_bucket_priority_is_mutually_exclusive() {
    // Old, overdue, and unassigned all at once: forgotten wins.
    let old_everything = action(None, ActionStatus::Todo, 45, Some(-10));
    // Overdue and unassigned: overdue wins.
    let overdue_unassigned = action(None, ActionStatus::Todo, 5, Some(-1));
    // Only unassigned.
    let unassigned = action(None, ActionStatus::Todo, 5, None);
    // Incomplete with none of the above.
    let at_risk = action(Some("Ana"), ActionStatus::InProgress, 5, Some(20));

    let actions = vec![old_everything, overdue_unassigned, unassigned, at_risk];
    let debt = analyze_debt(&actions, &DebtConfig::default(), now());

    assert_eq!(debt.breakdown.forgotten, 240.0);
    assert_eq!(debt.breakdown.overdue, 240.0);
    assert_eq!(debt.breakdown.unassigned, 240.0);
    assert_eq!(debt.breakdown.at_risk, 240.0);
    assert_eq!(debt.total_debt, 960.0);
}

#[test]
fn test_trend_has_one_point_per_week() {
    let actions = vec![
        action(Some("Ana"), ActionStatus::Todo, 0, None),
        action(Some("Ben"), ActionStatus::Todo, 7, None),
        action(Some("Cid"), ActionStatus::Todo, 14, None),
    ];
    let config = DebtConfig::default();
    let debt = analyze_debt(&actions, &config, now());

    assert_eq!(debt.trend.len(), config.trend_weeks);
    // Oldest first, ending at the current week.
    assert!(debt.trend.first().unwrap().date < debt.trend.last().unwrap().date);
    assert_eq!(debt.trend.last().unwrap().debt, 240.0);
}

#[test]
fn test_debt_velocity_is_last_minus_previous() {
    // Two items created this week, one the week before.
    let actions = vec![
        action(Some("Ana"), ActionStatus::Todo, 0, None),
        action(Some("Ben"), ActionStatus::Todo, 1, None),
        action(Some("Cid"), ActionStatus::Todo, 7, None),
    ];
    let debt = analyze_debt(&actions, &DebtConfig::default(), now());
    let n = debt.trend.len();
    let expected = debt.trend[n - 1].debt - debt.trend[n - 2].debt;
    assert_eq!(debt.debt_velocity, expected);
    assert_eq!(debt.debt_velocity, 240.0);
}

#[test]
fn test_empty_scope_is_all_zeros() {
    let debt = analyze_debt(&[], &DebtConfig::default(), now());
    assert_eq!(debt.total_debt, 0.0);
    assert_eq!(debt.completion_rate, 0.0);
    assert_eq!(debt.debt_velocity, 0.0);
    assert_eq!(debt.industry_benchmark, 0.67);
}

proptest! {
    #[test]
    fn buckets_always_sum_to_total_debt(
        specs in proptest::collection::vec(
            (any::<bool>(), 0i64..120, proptest::option::of(-60i64..60), any::<bool>()),
            0..40,
        )
    ) {
        let actions: Vec<ActionItem> = specs
            .into_iter()
            .map(|(done, age, deadline, owned)| {
                action(
                    owned.then_some("Sam"),
                    if done { ActionStatus::Done } else { ActionStatus::Todo },
                    age,
                    deadline,
                )
            })
            .collect();

        let debt = analyze_debt(&actions, &DebtConfig::default(), now());
        let bucket_sum = debt.breakdown.forgotten
            + debt.breakdown.overdue
            + debt.breakdown.unassigned
            + debt.breakdown.at_risk;
        prop_assert!((bucket_sum - debt.total_debt).abs() < 1e-6);
        prop_assert!(
            (debt.total_debt - debt.incomplete_actions as f64 * 240.0).abs() < 1e-6
        );
    }
}

#[test]
fn test_roi_of_a_productive_meeting() {
    let actions = vec![
        action(Some("Ana"), ActionStatus::Todo, 0, Some(7)),
        action(Some("Ben"), ActionStatus::Todo, 0, Some(7)),
        action(None, ActionStatus::Todo, 0, None), // not "clear"
    ];
    let decisions = vec!["Approve the vendor".to_string()];
    let roi = compute_roi(&actions, &decisions, Some(60.0), &RoiConfig::default());

    // Cost: 4 people x 1h x $75. Value: 1 x $500 + 2 x $200.
    assert_eq!(roi.cost, 300.0);
    assert_eq!(roi.value, 900.0);
    assert_eq!(roi.roi, 200.0);
    assert_eq!(roi.clear_action_count, 2);
}

#[test]
fn test_roi_default_duration_and_negative_return() {
    let roi = compute_roi(&[], &[], None, &RoiConfig::default());
    // 4 x 0.5h x $75 = $150 spent for nothing.
    assert_eq!(roi.cost, 150.0);
    assert_eq!(roi.value, 0.0);
    assert_eq!(roi.roi, -100.0);
    assert_eq!(roi.duration_minutes, 30.0);
}

#[test]
fn test_graveyard_collects_stale_incomplete_items() {
    let actions = vec![
        action(Some("Ana"), ActionStatus::Todo, 45, None),
        action(Some("Ben"), ActionStatus::Done, 90, None), // completed, not buried
        action(Some("Cid"), ActionStatus::Todo, 95, None),
        action(Some("Dee"), ActionStatus::Todo, 10, None), // too fresh
    ];
    let graveyard = build_graveyard(&actions, &DebtConfig::default(), now());

    assert_eq!(graveyard.total_buried, 2);
    assert_eq!(graveyard.oldest_days, 95);
    assert_eq!(graveyard.avg_days_old, 70);
    // Oldest first.
    assert_eq!(graveyard.buried[0].owner.as_deref(), Some("Cid"));
    assert_eq!(graveyard.buried[1].owner.as_deref(), Some("Ana"));
}
