//! Organization-wide action-item debt analytics.
//!
//! Every incomplete action item carries a fixed dollar cost (blocked hours
//! times hourly rate). Costs are bucketed by failure mode with a strict
//! priority so the buckets always sum to the total, tracked over a weekly
//! trend, and compared against an industry completion-rate benchmark.

pub mod graveyard;
pub mod roi;

use chrono::{DateTime, Datelike, Duration, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::config::DebtConfig;
use crate::core::ActionItem;

/// Dollar amounts by failure mode
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DebtBreakdown {
    /// Incomplete and older than the graveyard threshold
    pub forgotten: f64,
    /// Incomplete with a deadline already past
    pub overdue: f64,
    /// Incomplete with no owner
    pub unassigned: f64,
    /// Incomplete, none of the above
    pub at_risk: f64,
}

impl DebtBreakdown {
    pub fn total(&self) -> f64 {
        self.forgotten + self.overdue + self.unassigned + self.at_risk
    }
}

/// One point of the weekly debt trend
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrendPoint {
    pub date: NaiveDate,
    pub debt: f64,
}

/// Full debt analytics for a scope
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DebtAnalytics {
    pub total_debt: f64,
    pub breakdown: DebtBreakdown,
    pub trend: Vec<TrendPoint>,
    pub debt_velocity: f64,
    pub completion_rate: f64,
    /// Fixed external constant, for comparison only
    pub industry_benchmark: f64,
    pub total_actions: usize,
    pub completed_actions: usize,
    pub incomplete_actions: usize,
}

fn round2(v: f64) -> f64 {
    (v * 100.0).round() / 100.0
}

fn iso_week_key(date: NaiveDate) -> (i32, u32) {
    let week = date.iso_week();
    (week.year(), week.week())
}

/// Bucket one incomplete item's cost. Priority order is part of the
/// contract: forgotten, then overdue, then unassigned, then at-risk, so an
/// item lands in exactly one bucket.
fn assign_bucket(
    breakdown: &mut DebtBreakdown,
    action: &ActionItem,
    cost: f64,
    config: &DebtConfig,
    now: DateTime<Utc>,
) {
    if action.age_days(now) > config.graveyard_threshold_days {
        breakdown.forgotten += cost;
    } else if action.is_overdue(now) {
        breakdown.overdue += cost;
    } else if action.is_unassigned() {
        breakdown.unassigned += cost;
    } else {
        breakdown.at_risk += cost;
    }
}

/// Build the weekly trend from costs keyed by creation week. The series
/// covers the configured look-back window, oldest first, with empty weeks
/// at zero.
fn build_trend(
    weekly_debt: &HashMap<(i32, u32), f64>,
    weeks: usize,
    now: DateTime<Utc>,
) -> Vec<TrendPoint> {
    (0..weeks)
        .rev()
        .map(|i| {
            let date = (now - Duration::weeks(i as i64)).date_naive();
            let debt = weekly_debt.get(&iso_week_key(date)).copied().unwrap_or(0.0);
            TrendPoint {
                date,
                debt: round2(debt),
            }
        })
        .collect()
}

/// Debt change per week: the slope between the last two trend points
fn debt_velocity(trend: &[TrendPoint]) -> f64 {
    match trend {
        [.., previous, last] => round2(last.debt - previous.debt),
        _ => 0.0,
    }
}

/// Compute debt analytics over all action items in a scope
pub fn analyze_debt(actions: &[ActionItem], config: &DebtConfig, now: DateTime<Utc>) -> DebtAnalytics {
    let cost = config.cost_per_item();

    let mut breakdown = DebtBreakdown::default();
    let mut weekly_debt: HashMap<(i32, u32), f64> = HashMap::new();
    let mut completed = 0usize;
    let mut incomplete = 0usize;

    for action in actions {
        if action.is_completed() {
            completed += 1;
            continue;
        }
        incomplete += 1;
        assign_bucket(&mut breakdown, action, cost, config, now);

        if let Some(created) = action.effective_created_at() {
            *weekly_debt.entry(iso_week_key(created.date_naive())).or_default() += cost;
        }
    }

    let trend = build_trend(&weekly_debt, config.trend_weeks, now);
    let velocity = debt_velocity(&trend);
    let total = actions.len();

    DebtAnalytics {
        total_debt: round2(breakdown.total()),
        breakdown: DebtBreakdown {
            forgotten: round2(breakdown.forgotten),
            overdue: round2(breakdown.overdue),
            unassigned: round2(breakdown.unassigned),
            at_risk: round2(breakdown.at_risk),
        },
        trend,
        debt_velocity: velocity,
        completion_rate: round2(crate::core::metrics::completion_rate(completed, total)),
        industry_benchmark: config.industry_benchmark,
        total_actions: total,
        completed_actions: completed,
        incomplete_actions: incomplete,
    }
}
