//! Contributor leaderboard over action-item ownership.
//!
//! Owners are grouped by normalized identity, scored with a weighted
//! metric that resists pure-volume gaming (log-scaled volume term) and
//! rewards harder work (risk term), tagged with achievements, and ranked
//! with a deterministic four-key tie-break.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::collections::HashMap;

use crate::config::LeaderboardConfig;
use crate::core::{metrics, ActionItem};
use crate::risk::score_risk;

/// Badges awarded for sustained performance. All thresholds inclusive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Achievement {
    /// 100% completion over at least 10 items
    Perfectionist,
    /// Average completion within 2 days over at least 5 measured items
    SpeedDemon,
    /// At least 30 completed items
    Workhorse,
    /// At least 90% completion over at least 15 items
    Consistent,
    /// Average risk of 50+ with at least 10 completed items
    RiskTaker,
}

impl Achievement {
    pub fn as_str(&self) -> &'static str {
        match self {
            Achievement::Perfectionist => "Perfectionist",
            Achievement::SpeedDemon => "Speed Demon",
            Achievement::Workhorse => "Workhorse",
            Achievement::Consistent => "Consistent",
            Achievement::RiskTaker => "Risk Taker",
        }
    }
}

/// Per-owner aggregate, rebuilt from scratch on every ranking
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OwnerStat {
    /// Original casing, trimmed
    pub owner: String,
    pub total: usize,
    pub completed: usize,
    pub incomplete: usize,
    /// 0-1
    pub completion_rate: f64,
    /// Mean days from creation to completion; zero when unmeasured
    pub avg_completion_days: f64,
    pub avg_risk_score: f64,
    pub weighted_score: f64,
    pub achievements: Vec<Achievement>,
}

#[derive(Debug, Default)]
struct OwnerAccumulator {
    display: String,
    total: usize,
    completed: usize,
    risk_sum: f64,
    latencies_days: Vec<f64>,
}

// Ties in weighted score within this tolerance fall through to the
// secondary keys.
const SCORE_TIE_TOLERANCE: f64 = 0.01;

/// `completion_rate * ln(total + 1) * (1 + avg_risk / 200)`
fn weighted_score(completion_rate: f64, total: usize, avg_risk: f64) -> f64 {
    completion_rate * ((total as f64) + 1.0).ln() * (1.0 + avg_risk / 200.0)
}

fn achievements_for(stat: &OwnerStat, latency_samples: usize) -> Vec<Achievement> {
    let mut earned = Vec::new();
    if stat.completion_rate == 1.0 && stat.total >= 10 {
        earned.push(Achievement::Perfectionist);
    }
    if stat.avg_completion_days <= 2.0 && latency_samples >= 5 {
        earned.push(Achievement::SpeedDemon);
    }
    if stat.completed >= 30 {
        earned.push(Achievement::Workhorse);
    }
    if stat.completion_rate >= 0.9 && stat.total >= 15 {
        earned.push(Achievement::Consistent);
    }
    if stat.avg_risk_score >= 50.0 && stat.completed >= 10 {
        earned.push(Achievement::RiskTaker);
    }
    earned
}

/// Heuristic exclusion of owner strings that are really task fragments or
/// parsing noise, not people. Membership of the phrase list is
/// configuration, not an invariant.
fn is_rankable_owner(key: &str, config: &LeaderboardConfig) -> bool {
    let chars = key.chars().count();
    if chars < config.min_name_chars || chars > config.max_name_chars {
        return false;
    }
    !config
        .excluded_phrases
        .iter()
        .any(|phrase| key.contains(phrase.to_lowercase().as_str()))
}

/// Completion latency in whole days, when both timestamps exist and are
/// ordered. Negative durations are data errors and yield nothing.
fn completion_latency_days(action: &ActionItem) -> Option<f64> {
    let created = action.created_at?;
    let completed = action.completed_at?;
    if completed < created {
        log::debug!(
            "action {} completed before creation; latency sample discarded",
            action.id
        );
        return None;
    }
    Some((completed - created).num_days() as f64)
}

fn rank_comparator(a: &OwnerStat, b: &OwnerStat) -> Ordering {
    if (a.weighted_score - b.weighted_score).abs() > SCORE_TIE_TOLERANCE {
        return b
            .weighted_score
            .partial_cmp(&a.weighted_score)
            .unwrap_or(Ordering::Equal);
    }
    b.completed
        .cmp(&a.completed)
        .then_with(|| {
            a.avg_completion_days
                .partial_cmp(&b.avg_completion_days)
                .unwrap_or(Ordering::Equal)
        })
        .then_with(|| a.incomplete.cmp(&b.incomplete))
        // Name as the last resort keeps fully-tied rows in a stable order
        // across runs.
        .then_with(|| a.owner.cmp(&b.owner))
}

/// Rank every owner in the scope. The unassigned bucket never ranks.
pub fn rank_leaderboard(
    actions: &[ActionItem],
    config: &LeaderboardConfig,
    now: DateTime<Utc>,
) -> Vec<OwnerStat> {
    let mut by_owner: HashMap<String, OwnerAccumulator> = HashMap::new();

    for action in actions {
        let Some(owner) = action.owner.as_deref() else {
            continue;
        };
        let display = owner.trim().to_string();
        let key = display.to_lowercase();

        let acc = by_owner.entry(key).or_default();
        if acc.display.is_empty() {
            acc.display = display;
        }
        acc.total += 1;
        acc.risk_sum += score_risk(action, now) as f64;
        if action.is_completed() {
            acc.completed += 1;
            if let Some(days) = completion_latency_days(action) {
                acc.latencies_days.push(days);
            }
        }
    }

    let mut stats: Vec<OwnerStat> = by_owner
        .into_iter()
        .filter(|(key, _)| is_rankable_owner(key, config))
        .map(|(_, acc)| {
            let completion_rate = metrics::completion_rate(acc.completed, acc.total);
            let avg_risk = if acc.total > 0 {
                acc.risk_sum / acc.total as f64
            } else {
                0.0
            };
            let mut stat = OwnerStat {
                owner: acc.display,
                total: acc.total,
                completed: acc.completed,
                incomplete: acc.total - acc.completed,
                completion_rate,
                avg_completion_days: metrics::mean(&acc.latencies_days),
                avg_risk_score: avg_risk,
                weighted_score: weighted_score(completion_rate, acc.total, avg_risk),
                achievements: Vec::new(),
            };
            stat.achievements = achievements_for(&stat, acc.latencies_days.len());
            stat
        })
        .collect();

    stats.sort_by(rank_comparator);
    stats
}
