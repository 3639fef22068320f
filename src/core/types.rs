//! Common type definitions used across the codebase

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// Workflow status of an action item
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActionStatus {
    Todo,
    InProgress,
    Blocked,
    Done,
}

impl ActionStatus {
    /// Parse a status string, including legacy upstream spellings
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "todo" | "pending" => Some(ActionStatus::Todo),
            "in_progress" => Some(ActionStatus::InProgress),
            "blocked" => Some(ActionStatus::Blocked),
            "done" | "completed" => Some(ActionStatus::Done),
            _ => None,
        }
    }

    /// Get the display name for this status
    pub fn display_name(&self) -> &str {
        match self {
            ActionStatus::Todo => "To Do",
            ActionStatus::InProgress => "In Progress",
            ActionStatus::Blocked => "Blocked",
            ActionStatus::Done => "Done",
        }
    }

    pub fn is_done(&self) -> bool {
        matches!(self, ActionStatus::Done)
    }
}

/// Severity levels for diagnostics and detected patterns
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Info,
    Medium,
    High,
    Critical,
}

impl Severity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::Info => "info",
            Severity::Medium => "medium",
            Severity::High => "high",
            Severity::Critical => "critical",
        }
    }
}

/// A unit of committed work extracted from a meeting.
///
/// This is the canonical shape every analytics component consumes. Raw
/// upstream records (legacy `completed`-only items, unknown status strings,
/// sentinel owners) are converted into this form once, at the boundary, by
/// [`crate::core::normalize`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ActionItem {
    pub id: String,
    pub meeting_id: String,
    pub meeting_title: String,
    /// Meeting-level timestamp, used as a fallback when the item itself
    /// carries no `created_at`
    pub meeting_date: Option<DateTime<Utc>>,
    pub task: String,
    /// `None` covers both missing owners and the upstream "Unassigned"
    /// sentinel
    pub owner: Option<String>,
    pub deadline: Option<NaiveDate>,
    pub status: ActionStatus,
    pub created_at: Option<DateTime<Utc>>,
    pub completed_at: Option<DateTime<Utc>>,
    /// Score computed by the upstream pipeline, when present. Components
    /// that need an effective score fall back to [`crate::risk::score_risk`].
    pub risk_score: Option<u8>,
}

impl ActionItem {
    pub fn is_completed(&self) -> bool {
        self.status.is_done()
    }

    pub fn is_unassigned(&self) -> bool {
        self.owner.is_none()
    }

    /// Best-effort creation timestamp: the item's own, or the meeting's
    pub fn effective_created_at(&self) -> Option<DateTime<Utc>> {
        self.created_at.or(self.meeting_date)
    }

    /// Whole days since creation, clamped at zero. Missing timestamps
    /// yield zero rather than an error.
    pub fn age_days(&self, now: DateTime<Utc>) -> i64 {
        self.effective_created_at()
            .map(|created| (now - created).num_days().max(0))
            .unwrap_or(0)
    }

    pub fn is_overdue(&self, now: DateTime<Utc>) -> bool {
        self.deadline.map(|d| d < now.date_naive()).unwrap_or(false)
    }
}

/// One analyzed meeting
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MeetingRecord {
    pub meeting_id: String,
    pub title: String,
    pub team_id: Option<String>,
    pub created_at: Option<DateTime<Utc>>,
    /// Ordered by significance/chronology; not reorderable
    pub decisions: Vec<String>,
    pub action_items: Vec<ActionItem>,
}

impl MeetingRecord {
    /// A ghost meeting produced zero decisions and zero action items
    pub fn is_ghost(&self) -> bool {
        self.decisions.is_empty() && self.action_items.is_empty()
    }
}

/// Sort actions the way the overview presents them: soonest deadline
/// first (no deadline last), then highest risk first.
pub fn sort_actions_for_review(actions: &mut [ActionItem]) {
    actions.sort_by(|a, b| {
        let a_deadline = a.deadline.unwrap_or(NaiveDate::MAX);
        let b_deadline = b.deadline.unwrap_or(NaiveDate::MAX);
        a_deadline
            .cmp(&b_deadline)
            .then_with(|| b.risk_score.unwrap_or(0).cmp(&a.risk_score.unwrap_or(0)))
    });
}
