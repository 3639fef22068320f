//! Statistically-gated detection of recurring meeting dysfunctions.
//!
//! Detection runs over a recent window only, behind a global sample-size
//! gate: with too little data the battery returns nothing rather than
//! guessing. Each rule carries its own minimum sample, reports the literal
//! numbers that triggered it, and scores confidence by sample size against
//! a rule-specific denominator, capped at 1.

use chrono::{DateTime, Duration, Utc};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::OnceLock;

use crate::config::PatternConfig;
use crate::core::{metrics, ActionItem, MeetingRecord, Severity};

/// One detected dysfunction
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Pattern {
    pub id: String,
    pub name: String,
    pub severity: Severity,
    /// Literal numbers that triggered the rule, reproducible from the
    /// same inputs
    pub symptoms: Vec<String>,
    pub prescription: Vec<String>,
    /// 0-1, proportional to sample size
    pub confidence: f64,
    /// Human-readable description of the sample the rule saw
    pub based_on: String,
}

/// Broad kind of meeting, classified from the title
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MeetingCategory {
    Planning,
    Standup,
    Retrospective,
    Brainstorm,
    Decision,
    Other,
}

fn category_regexes() -> &'static [(MeetingCategory, Regex)] {
    static REGEXES: OnceLock<Vec<(MeetingCategory, Regex)>> = OnceLock::new();
    REGEXES.get_or_init(|| {
        [
            (
                MeetingCategory::Planning,
                r"(?i)\b(plan|planning|strategy|roadmap)\b",
            ),
            (
                MeetingCategory::Standup,
                r"(?i)\b(standup|stand-up|daily|sync)\b",
            ),
            (
                MeetingCategory::Retrospective,
                r"(?i)\b(retro|retrospective|post-?mortem)\b",
            ),
            (
                MeetingCategory::Brainstorm,
                r"(?i)\b(brainstorm|ideation|workshop)\b",
            ),
            (
                MeetingCategory::Decision,
                r"(?i)\b(decision|review|approval)\b",
            ),
        ]
        .into_iter()
        .map(|(category, pattern)| {
            (
                category,
                Regex::new(pattern).expect("category regex is a checked literal"),
            )
        })
        .collect()
    })
}

/// Classify a meeting title; first matching category wins
pub fn classify_meeting_title(title: &str) -> MeetingCategory {
    category_regexes()
        .iter()
        .find(|(_, re)| re.is_match(title))
        .map(|(category, _)| *category)
        .unwrap_or(MeetingCategory::Other)
}

fn round2(v: f64) -> f64 {
    (v * 100.0).round() / 100.0
}

fn confidence(sample: usize, denominator: usize) -> f64 {
    round2((sample as f64 / denominator as f64).min(1.0))
}

fn within_window(ts: Option<DateTime<Utc>>, now: DateTime<Utc>, days: i64) -> bool {
    // No timestamp means no recency signal; the record sits out.
    ts.map(|t| t <= now && now - t <= Duration::days(days))
        .unwrap_or(false)
}

struct RecentWindow<'a> {
    meetings: Vec<&'a MeetingRecord>,
    actions: Vec<&'a ActionItem>,
}

fn recent_window<'a>(
    meetings: &'a [MeetingRecord],
    actions: &'a [ActionItem],
    config: &PatternConfig,
    now: DateTime<Utc>,
) -> RecentWindow<'a> {
    let days = config.recent_window_days;
    RecentWindow {
        meetings: meetings
            .iter()
            .filter(|m| within_window(m.created_at, now, days))
            .collect(),
        actions: actions
            .iter()
            .filter(|a| within_window(a.effective_created_at(), now, days))
            .collect(),
    }
}

fn detect_planning_paralysis(window: &RecentWindow, _config: &PatternConfig) -> Option<Pattern> {
    let planning: Vec<&&MeetingRecord> = window
        .meetings
        .iter()
        .filter(|m| classify_meeting_title(&m.title) == MeetingCategory::Planning)
        .collect();
    if planning.len() < 3 {
        return None;
    }

    let planning_ids: Vec<&str> = planning.iter().map(|m| m.meeting_id.as_str()).collect();
    let planning_actions: Vec<&&ActionItem> = window
        .actions
        .iter()
        .filter(|a| planning_ids.contains(&a.meeting_id.as_str()))
        .collect();
    if planning_actions.len() < 5 {
        return None;
    }

    let planning_done = planning_actions.iter().filter(|a| a.is_completed()).count();
    let team_done = window.actions.iter().filter(|a| a.is_completed()).count();
    let planning_rate = metrics::completion_rate(planning_done, planning_actions.len());
    let team_rate = metrics::completion_rate(team_done, window.actions.len());

    if planning_rate >= team_rate - 0.15 {
        return None;
    }

    Some(Pattern {
        id: "planning-paralysis".to_string(),
        name: "Planning Paralysis".to_string(),
        severity: Severity::High,
        symptoms: vec![
            format!(
                "{} planning meetings produced {} action items",
                planning.len(),
                planning_actions.len()
            ),
            format!(
                "Planning completion at {:.0}% against a {:.0}% team average",
                planning_rate * 100.0,
                team_rate * 100.0
            ),
            "Team stuck in analysis mode".to_string(),
        ],
        prescription: vec![
            "Set a hard deadline for the planning phase".to_string(),
            "Limit planning meetings to two per quarter".to_string(),
            "Require one executable action per planning meeting".to_string(),
            "Timebox it: 25% plan, 75% execute".to_string(),
        ],
        confidence: confidence(planning_actions.len(), 20),
        based_on: format!(
            "{} planning meetings with {} action items",
            planning.len(),
            planning_actions.len()
        ),
    })
}

fn detect_action_amnesia(window: &RecentWindow, config: &PatternConfig) -> Option<Pattern> {
    let total = window.actions.len();
    let incomplete = window.actions.iter().filter(|a| !a.is_completed()).count();
    let incomplete_rate = incomplete as f64 / total as f64;

    if incomplete_rate <= config.incomplete_baseline + 0.20 {
        return None;
    }

    Some(Pattern {
        id: "action-amnesia".to_string(),
        name: "Action Item Amnesia".to_string(),
        severity: Severity::Critical,
        symptoms: vec![
            format!(
                "{:.0}% of {} actions incomplete against a {:.0}% industry baseline",
                incomplete_rate * 100.0,
                total,
                config.incomplete_baseline * 100.0
            ),
            "Commitments are forgotten once the meeting ends".to_string(),
        ],
        prescription: vec![
            "Send automated reminders 24 hours before each deadline".to_string(),
            "Review open action items at the start of every meeting".to_string(),
            "Assign explicit owners, never \"the team\"".to_string(),
        ],
        confidence: confidence(total, 30),
        based_on: format!("{} actions in the window", total),
    })
}

fn detect_debt_spiral(window: &RecentWindow, _config: &PatternConfig) -> Option<Pattern> {
    if window.meetings.len() < 8 {
        return None;
    }

    let mut per_meeting: HashMap<&str, usize> = HashMap::new();
    for meeting in &window.meetings {
        per_meeting.insert(meeting.meeting_id.as_str(), 0);
    }
    for action in &window.actions {
        if let Some(count) = per_meeting.get_mut(action.meeting_id.as_str()) {
            *count += 1;
        }
    }

    let counts: Vec<f64> = per_meeting.values().map(|&c| c as f64).collect();
    let mean = metrics::mean(&counts);
    let std_dev = metrics::std_dev(&counts);

    if mean <= 4.0 || mean <= 3.0 + std_dev {
        return None;
    }

    Some(Pattern {
        id: "meeting-debt-spiral".to_string(),
        name: "Meeting Debt Spiral".to_string(),
        severity: Severity::High,
        symptoms: vec![
            format!(
                "{} meetings generating {} actions",
                window.meetings.len(),
                window.actions.len()
            ),
            format!(
                "An average of {:.1} actions per meeting (spread {:.1})",
                mean, std_dev
            ),
            "Team drowning in commitments".to_string(),
        ],
        prescription: vec![
            "Cancel recurring meetings with no outcomes".to_string(),
            "Merge overlapping meetings".to_string(),
            "Cap action items at three per meeting".to_string(),
            "Use async updates instead of meetings".to_string(),
        ],
        confidence: confidence(window.meetings.len(), 16),
        based_on: format!("{} meetings in the window", window.meetings.len()),
    })
}

fn detect_silent_majority(window: &RecentWindow, _config: &PatternConfig) -> Option<Pattern> {
    let mut per_owner: HashMap<String, usize> = HashMap::new();
    for action in &window.actions {
        if let Some(owner) = action.owner.as_deref() {
            *per_owner.entry(owner.trim().to_lowercase()).or_default() += 1;
        }
    }
    if per_owner.len() < 3 {
        return None;
    }

    let counts: Vec<f64> = per_owner.values().map(|&c| c as f64).collect();
    let gini = metrics::gini(&counts);
    if gini <= 0.4 {
        return None;
    }

    let max = per_owner.values().copied().max().unwrap_or(0);
    let total: usize = per_owner.values().sum();

    Some(Pattern {
        id: "silent-majority".to_string(),
        name: "Silent Majority".to_string(),
        severity: Severity::Medium,
        symptoms: vec![
            format!(
                "Gini coefficient {:.2} across {} contributors",
                gini,
                per_owner.len()
            ),
            format!(
                "The busiest contributor holds {} of {} assigned actions",
                max, total
            ),
            "Same people always volunteering".to_string(),
        ],
        prescription: vec![
            "Rotate action assignment round-robin".to_string(),
            "Explicitly ask quiet members for input".to_string(),
            "Rotate the facilitator role".to_string(),
        ],
        confidence: confidence(per_owner.len(), 10),
        based_on: format!("{} contributors with assigned actions", per_owner.len()),
    })
}

// Tasks shorter than this are noise, not recurring work.
const MIN_TASK_CHARS: usize = 10;

fn detect_chronic_blocker(window: &RecentWindow, _config: &PatternConfig) -> Option<Pattern> {
    let mut groups: HashMap<String, usize> = HashMap::new();
    for action in &window.actions {
        let key = action.task.trim().to_lowercase();
        if key.chars().count() >= MIN_TASK_CHARS {
            *groups.entry(key).or_default() += 1;
        }
    }

    // Deterministic winner: highest count, lexicographically first on ties.
    let (task, count) = groups
        .into_iter()
        .max_by(|a, b| a.1.cmp(&b.1).then_with(|| b.0.cmp(&a.0)))?;
    if count < 3 {
        return None;
    }

    Some(Pattern {
        id: "chronic-blocker".to_string(),
        name: "Chronic Blocker".to_string(),
        severity: Severity::Critical,
        symptoms: vec![
            format!("\"{}\" recurred {} times", task, count),
            "The same task keeps coming back unresolved".to_string(),
        ],
        prescription: vec![
            "Break the task into specific sub-tasks".to_string(),
            "Identify the root cause: resources, requirements, or ownership".to_string(),
            "Escalate the blocker to leadership".to_string(),
        ],
        confidence: confidence(count, 6),
        based_on: format!("task repeated {} times in the window", count),
    })
}

fn detect_ghost_meetings(window: &RecentWindow, config: &PatternConfig) -> Option<Pattern> {
    let ghosts: Vec<&&MeetingRecord> = window.meetings.iter().filter(|m| m.is_ghost()).collect();
    if ghosts.len() < 2 {
        return None;
    }

    let wasted = ghosts.len() as f64
        * config.ghost_attendees
        * config.ghost_duration_hours
        * config.cost_per_person_hour;

    Some(Pattern {
        id: "ghost-meetings".to_string(),
        name: "Ghost Meetings".to_string(),
        severity: Severity::High,
        symptoms: vec![
            format!(
                "{} meetings produced zero decisions and zero action items",
                ghosts.len()
            ),
            format!("An estimated ${:.0} of attendee time produced nothing", wasted),
        ],
        prescription: vec![
            "Require an agenda with expected outcomes before scheduling".to_string(),
            "Cancel any recurring meeting that went ghost twice".to_string(),
            "Default to a written update instead".to_string(),
        ],
        confidence: confidence(ghosts.len(), 5),
        based_on: format!("{} ghost meetings in the window", ghosts.len()),
    })
}

/// Run the full battery over a scope. Returns an empty list when the
/// recent window holds too small a sample for any detection at all.
pub fn detect_patterns(
    meetings: &[MeetingRecord],
    actions: &[ActionItem],
    config: &PatternConfig,
    now: DateTime<Utc>,
) -> Vec<Pattern> {
    let window = recent_window(meetings, actions, config, now);

    if window.meetings.len() < config.min_meetings || window.actions.len() < config.min_actions {
        log::debug!(
            "pattern detection skipped: {} meetings / {} actions in window, need {}/{}",
            window.meetings.len(),
            window.actions.len(),
            config.min_meetings,
            config.min_actions
        );
        return Vec::new();
    }

    let detectors: &[fn(&RecentWindow, &PatternConfig) -> Option<Pattern>] = &[
        detect_planning_paralysis,
        detect_action_amnesia,
        detect_debt_spiral,
        detect_silent_majority,
        detect_chronic_blocker,
        detect_ghost_meetings,
    ];

    detectors
        .iter()
        .filter_map(|detect| detect(&window, config))
        .collect()
}
