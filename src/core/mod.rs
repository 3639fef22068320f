//! Canonical data model, boundary normalization, and shared statistics

pub mod metrics;
pub mod normalize;
pub mod types;

pub use normalize::{normalize_action, normalize_meeting, RawAction, RawMeeting, UNASSIGNED};
pub use types::{sort_actions_for_review, ActionItem, ActionStatus, MeetingRecord, Severity};
