//! Full-report aggregation: every analytics component over one scope.
//!
//! `analyze` is the library's one-call entry point. It stays pure (the
//! caller supplies the collections and the clock) and recomputes
//! everything from scratch on each invocation.

use chrono::{DateTime, Utc};
use im::Vector;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use crate::config::MeetmapConfig;
use crate::core::{ActionItem, MeetingRecord};
use crate::debt::graveyard::{build_graveyard, GraveyardSummary};
use crate::debt::roi::{compute_roi, MeetingRoi};
use crate::debt::{analyze_debt, DebtAnalytics};
use crate::health::autopsy::generate_autopsy;
use crate::health::{grade_meeting, health_score100, MeetingHealth};
use crate::leaderboard::{rank_leaderboard, OwnerStat};
use crate::patterns::{classify_meeting_title, detect_patterns, MeetingCategory, Pattern};

/// Everything the dashboard shows for one meeting
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MeetingInsight {
    pub meeting_id: String,
    pub title: String,
    pub category: MeetingCategory,
    pub decision_count: usize,
    pub action_count: usize,
    pub is_ghost: bool,
    pub health: MeetingHealth,
    pub autopsy: Option<String>,
    pub roi: MeetingRoi,
}

/// The full analytics report for a scope
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisReport {
    pub generated_at: DateTime<Utc>,
    pub total_meetings: usize,
    pub total_actions: usize,
    pub meetings: Vector<MeetingInsight>,
    pub debt: DebtAnalytics,
    pub leaderboard: Vector<OwnerStat>,
    pub patterns: Vector<Pattern>,
    pub graveyard: GraveyardSummary,
}

fn meeting_insight(meeting: &MeetingRecord, config: &MeetmapConfig, now: DateTime<Utc>) -> MeetingInsight {
    let actions = &meeting.action_items;
    let decisions = &meeting.decisions;
    let score100 = health_score100(actions, decisions, now);

    MeetingInsight {
        meeting_id: meeting.meeting_id.clone(),
        title: meeting.title.clone(),
        category: classify_meeting_title(&meeting.title),
        decision_count: decisions.len(),
        action_count: actions.len(),
        is_ghost: meeting.is_ghost(),
        health: grade_meeting(actions, decisions, now),
        autopsy: generate_autopsy(actions, decisions, score100),
        roi: compute_roi(actions, decisions, None, &config.roi),
    }
}

/// Run every analytics component over the scope's collections
pub fn analyze(
    meetings: &[MeetingRecord],
    actions: &[ActionItem],
    config: &MeetmapConfig,
    now: DateTime<Utc>,
) -> AnalysisReport {
    let insights: Vec<MeetingInsight> = meetings
        .par_iter()
        .map(|meeting| meeting_insight(meeting, config, now))
        .collect();

    AnalysisReport {
        generated_at: now,
        total_meetings: meetings.len(),
        total_actions: actions.len(),
        meetings: Vector::from(insights),
        debt: analyze_debt(actions, &config.debt, now),
        leaderboard: Vector::from(rank_leaderboard(actions, &config.leaderboard, now)),
        patterns: Vector::from(detect_patterns(meetings, actions, &config.patterns, now)),
        graveyard: build_graveyard(actions, &config.debt, now),
    }
}
