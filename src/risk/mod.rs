pub mod age;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::core::ActionItem;

/// Risk bands used across the dashboard
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum RiskLevel {
    Low,
    Medium,
    High,
    Critical,
}

impl RiskLevel {
    /// Band thresholds: >=75 critical, >=50 high, >=25 medium, else low
    pub fn from_score(score: u8) -> Self {
        match score {
            75..=u8::MAX => RiskLevel::Critical,
            50..=74 => RiskLevel::High,
            25..=49 => RiskLevel::Medium,
            _ => RiskLevel::Low,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            RiskLevel::Low => "LOW",
            RiskLevel::Medium => "MEDIUM",
            RiskLevel::High => "HIGH",
            RiskLevel::Critical => "CRITICAL",
        }
    }
}

// Signal bases for items without an upstream score.
const RISK_UNASSIGNED: u8 = 65;
const RISK_NO_DEADLINE: u8 = 45;
const RISK_OVERDUE: u8 = 85;
const RISK_DUE_SOON: u8 = 70;
const DUE_SOON_DAYS: i64 = 2;

/// Risk score for one action item, in `[0, 100]`.
///
/// An upstream score wins when present (clamped). Otherwise the score is a
/// first-match decision ladder over display signals: no owner, owner but no
/// deadline, deadline already past, deadline within two days. Anything else
/// carries no elevated risk. Never errors; a malformed deadline was already
/// dropped at normalization and reads as "no deadline".
pub fn score_risk(action: &ActionItem, now: DateTime<Utc>) -> u8 {
    if let Some(upstream) = action.risk_score {
        return upstream.min(100);
    }

    if action.is_unassigned() {
        return RISK_UNASSIGNED;
    }

    match action.deadline {
        None => RISK_NO_DEADLINE,
        Some(deadline) => {
            let days_left = (deadline - now.date_naive()).num_days();
            if days_left < 0 {
                RISK_OVERDUE
            } else if days_left <= DUE_SOON_DAYS {
                RISK_DUE_SOON
            } else {
                0
            }
        }
    }
}

/// Risk band for one action item
pub fn assess_risk(action: &ActionItem, now: DateTime<Utc>) -> RiskLevel {
    RiskLevel::from_score(score_risk(action, now))
}

/// Full upstream scorer, for producers that have not attached a score yet.
///
/// Accumulates additive factors instead of the display ladder: deadline
/// urgency on a stepped curve, missing ownership, task vagueness by word
/// count, and staleness. Capped at 100.
pub fn score_action(action: &ActionItem, now: DateTime<Utc>) -> u8 {
    let mut risk: u32 = 0;

    match action.deadline {
        Some(deadline) => {
            let days_left = (deadline - now.date_naive()).num_days();
            risk += match days_left {
                i64::MIN..=0 => 45,
                1..=2 => 40,
                3..=5 => 30,
                6..=10 => 15,
                11..=20 => 5,
                _ => 0,
            };
        }
        None => risk += 20,
    }

    if action.is_unassigned() {
        risk += 25;
    }

    let word_count = action.task.split_whitespace().count();
    if word_count < 3 {
        risk += 20;
    } else if word_count < 6 {
        risk += 10;
    }

    let days_since_created = action.age_days(now);
    if days_since_created > 14 {
        risk += 10;
    } else if days_since_created > 7 {
        risk += 5;
    }

    risk.min(100) as u8
}
