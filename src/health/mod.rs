//! Meeting health scoring.
//!
//! A meeting's health is a weighted blend of follow-through (completion),
//! ownership, and inverted action risk, plus a flat recency term, expressed
//! on a 0-10 scale with a letter grade.

pub mod autopsy;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::core::{metrics, ActionItem};
use crate::risk::score_risk;

/// Letter grade derived from the 0-100 health score
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Grade {
    A,
    B,
    C,
    D,
    F,
}

impl Grade {
    /// Linear thresholds on the 0-100 scale
    pub fn from_score100(score: f64) -> Self {
        if score >= 90.0 {
            Grade::A
        } else if score >= 80.0 {
            Grade::B
        } else if score >= 70.0 {
            Grade::C
        } else if score >= 60.0 {
            Grade::D
        } else {
            Grade::F
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Grade::A => "A",
            Grade::B => "B",
            Grade::C => "C",
            Grade::D => "D",
            Grade::F => "F",
        }
    }
}

/// Health summary for one meeting
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MeetingHealth {
    /// 0-10, one decimal
    pub score: f64,
    pub grade: Grade,
}

// Factor weights, percentage space.
const WEIGHT_COMPLETION: f64 = 40.0;
const WEIGHT_OWNERSHIP: f64 = 30.0;
const WEIGHT_RISK: f64 = 20.0;
const RECENCY_BONUS: f64 = 10.0;

/// Raw health score on the 0-100 scale.
///
/// A meeting with no actions and no decisions graded nothing and scores 0;
/// no actions but at least one decision means nothing was left undone and
/// scores 100.
pub fn health_score100(actions: &[ActionItem], decisions: &[String], now: DateTime<Utc>) -> f64 {
    if actions.is_empty() {
        return if decisions.is_empty() { 0.0 } else { 100.0 };
    }

    let total = actions.len();
    let completed = actions.iter().filter(|a| a.is_completed()).count();
    let owned = actions.iter().filter(|a| !a.is_unassigned()).count();

    let risk_scores: Vec<f64> = actions.iter().map(|a| score_risk(a, now) as f64).collect();
    let avg_risk = metrics::mean(&risk_scores);

    let completion = metrics::completion_rate(completed, total);
    let ownership = metrics::completion_rate(owned, total);
    let risk_inverted = (100.0 - avg_risk) / 100.0;

    completion * WEIGHT_COMPLETION
        + ownership * WEIGHT_OWNERSHIP
        + risk_inverted * WEIGHT_RISK
        + RECENCY_BONUS
}

/// Grade one meeting from its actions and decisions
pub fn grade_meeting(actions: &[ActionItem], decisions: &[String], now: DateTime<Utc>) -> MeetingHealth {
    let score100 = health_score100(actions, decisions, now);
    MeetingHealth {
        score: (score100).round() / 10.0,
        grade: Grade::from_score100(score100),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::ActionStatus;
    use chrono::TimeZone;

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 6, 15, 12, 0, 0).unwrap()
    }

    fn action(owner: Option<&str>, status: ActionStatus, risk: u8) -> ActionItem {
        ActionItem {
            id: "a".into(),
            meeting_id: "m".into(),
            meeting_title: "Sync".into(),
            meeting_date: None,
            task: "Prepare the quarterly summary deck".into(),
            owner: owner.map(String::from),
            deadline: None,
            status,
            created_at: None,
            completed_at: None,
            risk_score: Some(risk),
        }
    }

    #[test]
    fn ghost_meeting_scores_zero() {
        let health = grade_meeting(&[], &[], now());
        assert_eq!(health.score, 0.0);
        assert_eq!(health.grade, Grade::F);
    }

    #[test]
    fn decisions_without_actions_score_perfect() {
        let decisions = vec!["Adopt the new rollout checklist".to_string()];
        let health = grade_meeting(&[], &decisions, now());
        assert_eq!(health.score, 10.0);
        assert_eq!(health.grade, Grade::A);
    }

    #[test]
    fn weighted_formula() {
        // 1 of 2 complete (20), 2 of 2 owned (30), avg risk 50 (10), recency 10.
        let actions = vec![
            action(Some("Ana"), ActionStatus::Done, 40),
            action(Some("Ben"), ActionStatus::Todo, 60),
        ];
        let score = health_score100(&actions, &[], now());
        assert!((score - 70.0).abs() < 1e-9, "got {}", score);
        assert_eq!(grade_meeting(&actions, &[], now()).grade, Grade::C);
    }

    #[test]
    fn grade_thresholds() {
        assert_eq!(Grade::from_score100(90.0), Grade::A);
        assert_eq!(Grade::from_score100(89.9), Grade::B);
        assert_eq!(Grade::from_score100(80.0), Grade::B);
        assert_eq!(Grade::from_score100(70.0), Grade::C);
        assert_eq!(Grade::from_score100(60.0), Grade::D);
        assert_eq!(Grade::from_score100(59.9), Grade::F);
    }
}
