// Export modules for library usage
pub mod analysis;
pub mod cli;
pub mod commands;
pub mod config;
pub mod core;
pub mod debt;
pub mod errors;
pub mod health;
pub mod io;
pub mod leaderboard;
pub mod patterns;
pub mod risk;

// Re-export commonly used types
pub use crate::core::{
    normalize_action, normalize_meeting, sort_actions_for_review, ActionItem, ActionStatus,
    MeetingRecord, RawAction, RawMeeting, Severity,
};

pub use crate::analysis::{analyze, AnalysisReport, MeetingInsight};

pub use crate::risk::{
    age::{classify_age, AgeEmphasis, AgeLabel},
    assess_risk, score_action, score_risk, RiskLevel,
};

pub use crate::health::{
    autopsy::generate_autopsy, grade_meeting, health_score100, Grade, MeetingHealth,
};

pub use crate::debt::{
    analyze_debt,
    graveyard::{build_graveyard, GraveyardSummary},
    roi::{compute_roi, MeetingRoi},
    DebtAnalytics, DebtBreakdown, TrendPoint,
};

pub use crate::leaderboard::{rank_leaderboard, Achievement, OwnerStat};

pub use crate::patterns::{classify_meeting_title, detect_patterns, MeetingCategory, Pattern};

pub use crate::errors::MeetmapError;

pub use crate::io::output::{create_writer, OutputFormat, OutputWriter};
