//! Boundary normalization of raw upstream records.
//!
//! Upstream producers have shipped several shapes over time: items with only
//! a legacy `completed` flag, items with unrecognized `status` strings, the
//! `"Unassigned"` owner sentinel, dates with and without timezone suffixes.
//! Everything is converted into the canonical [`ActionItem`] /
//! [`MeetingRecord`] here, in one pass, so no scorer ever guesses at shapes.
//!
//! A malformed field degrades to "no signal" for that record only; nothing
//! in this module returns an error.

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use serde::Deserialize;

use crate::core::{ActionItem, ActionStatus, MeetingRecord};

/// Owner sentinel used by upstream producers for ownerless items
pub const UNASSIGNED: &str = "Unassigned";

/// Raw action item as delivered by the upstream store. Every field is
/// optional; normalization decides what survives.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RawAction {
    pub id: Option<String>,
    pub meeting_id: Option<String>,
    pub meeting_title: Option<String>,
    pub meeting_date: Option<String>,
    pub task: Option<String>,
    pub owner: Option<String>,
    pub deadline: Option<String>,
    pub status: Option<String>,
    pub completed: Option<bool>,
    pub created_at: Option<String>,
    pub completed_at: Option<String>,
    pub risk_score: Option<f64>,
}

/// Raw meeting as delivered by the upstream store
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RawMeeting {
    pub meeting_id: Option<String>,
    pub title: Option<String>,
    pub team_id: Option<String>,
    pub created_at: Option<String>,
    pub decisions: Vec<String>,
    pub action_items: Vec<RawAction>,
}

/// Parse a timestamp leniently: RFC 3339 first, then a bare
/// `YYYY-MM-DDTHH:MM:SS` assumed UTC, then a bare date at midnight.
pub fn parse_datetime(raw: &str) -> Option<DateTime<Utc>> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(trimmed) {
        return Some(dt.with_timezone(&Utc));
    }
    if let Ok(naive) = NaiveDateTime::parse_from_str(trimmed, "%Y-%m-%dT%H:%M:%S%.f") {
        return Some(naive.and_utc());
    }
    if let Ok(date) = NaiveDate::parse_from_str(trimmed, "%Y-%m-%d") {
        return Some(date.and_hms_opt(0, 0, 0)?.and_utc());
    }
    log::debug!("unparseable timestamp {:?} dropped", raw);
    None
}

/// Parse a deadline: a bare ISO date, or the date part of a full timestamp
pub fn parse_date(raw: &str) -> Option<NaiveDate> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }
    if let Ok(date) = NaiveDate::parse_from_str(trimmed, "%Y-%m-%d") {
        return Some(date);
    }
    parse_datetime(trimmed).map(|dt| dt.date_naive())
}

/// Resolve the authoritative status from the `status`/`completed` pair.
///
/// `status` wins when it parses; an unrecognized value falls back to the
/// `completed` flag; absent both, the item is treated as still open.
fn resolve_status(status: Option<&str>, completed: Option<bool>) -> ActionStatus {
    match status.and_then(ActionStatus::parse) {
        Some(parsed) => parsed,
        None => {
            if let Some(raw) = status {
                log::debug!("unrecognized status {:?}, falling back to completed flag", raw);
            }
            if completed.unwrap_or(false) {
                ActionStatus::Done
            } else {
                ActionStatus::Todo
            }
        }
    }
}

/// Collapse missing, blank, and sentinel owners into `None`
fn resolve_owner(owner: Option<String>) -> Option<String> {
    owner
        .map(|o| o.trim().to_string())
        .filter(|o| !o.is_empty() && o != UNASSIGNED)
}

fn clamp_risk(score: f64) -> u8 {
    score.clamp(0.0, 100.0).round() as u8
}

/// Normalize one raw action. Meeting-level context fills the gaps the item
/// itself does not carry, mirroring how the store flattens items.
pub fn normalize_action(raw: RawAction, meeting: Option<&MeetingRecord>) -> ActionItem {
    let meeting_date = raw
        .meeting_date
        .as_deref()
        .and_then(parse_datetime)
        .or_else(|| meeting.and_then(|m| m.created_at));

    ActionItem {
        id: raw.id.unwrap_or_default(),
        meeting_id: raw
            .meeting_id
            .or_else(|| meeting.map(|m| m.meeting_id.clone()))
            .unwrap_or_default(),
        meeting_title: raw
            .meeting_title
            .or_else(|| meeting.map(|m| m.title.clone()))
            .unwrap_or_else(|| "Untitled Meeting".to_string()),
        meeting_date,
        task: raw.task.map(|t| t.trim().to_string()).unwrap_or_default(),
        owner: resolve_owner(raw.owner),
        deadline: raw.deadline.as_deref().and_then(parse_date),
        status: resolve_status(raw.status.as_deref(), raw.completed),
        created_at: raw.created_at.as_deref().and_then(parse_datetime),
        completed_at: raw.completed_at.as_deref().and_then(parse_datetime),
        risk_score: raw.risk_score.filter(|s| s.is_finite()).map(clamp_risk),
    }
}

/// Normalize one raw meeting together with its embedded action items
pub fn normalize_meeting(raw: RawMeeting) -> MeetingRecord {
    let mut meeting = MeetingRecord {
        meeting_id: raw.meeting_id.unwrap_or_default(),
        title: raw
            .title
            .map(|t| t.trim().to_string())
            .filter(|t| !t.is_empty())
            .unwrap_or_else(|| "Untitled Meeting".to_string()),
        team_id: raw.team_id,
        created_at: raw.created_at.as_deref().and_then(parse_datetime),
        decisions: raw
            .decisions
            .into_iter()
            .map(|d| d.trim().to_string())
            .filter(|d| !d.is_empty())
            .collect(),
        action_items: Vec::new(),
    };

    meeting.action_items = raw
        .action_items
        .into_iter()
        .map(|a| {
            let mut action = normalize_action(a, None);
            if action.meeting_id.is_empty() {
                action.meeting_id = meeting.meeting_id.clone();
            }
            if action.meeting_title == "Untitled Meeting" {
                action.meeting_title = meeting.title.clone();
            }
            if action.meeting_date.is_none() {
                action.meeting_date = meeting.created_at;
            }
            action
        })
        .collect();

    meeting
}
