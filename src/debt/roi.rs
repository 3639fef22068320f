//! Per-meeting return-on-investment estimate.
//!
//! Cost is attendees times duration times hourly rate; value credits each
//! recorded decision and each "clear" action (owner and deadline both set).

use serde::{Deserialize, Serialize};

use crate::config::RoiConfig;
use crate::core::ActionItem;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MeetingRoi {
    pub cost: f64,
    pub value: f64,
    /// Percentage; negative when the meeting cost more than it produced
    pub roi: f64,
    pub decision_count: usize,
    pub clear_action_count: usize,
    pub duration_minutes: f64,
}

fn round2(v: f64) -> f64 {
    (v * 100.0).round() / 100.0
}

/// Estimate ROI for one meeting. `duration_minutes` falls back to the
/// configured default when the source carries none.
pub fn compute_roi(
    actions: &[ActionItem],
    decisions: &[String],
    duration_minutes: Option<f64>,
    config: &RoiConfig,
) -> MeetingRoi {
    let duration = duration_minutes
        .filter(|d| d.is_finite() && *d > 0.0)
        .unwrap_or(config.default_duration_minutes);

    let cost = config.avg_attendees * (duration / 60.0) * config.hourly_rate;

    let clear_actions = actions
        .iter()
        .filter(|a| !a.is_unassigned() && a.deadline.is_some())
        .count();
    let value =
        decisions.len() as f64 * config.decision_value + clear_actions as f64 * config.action_value;

    let roi = if cost == 0.0 {
        0.0
    } else {
        ((value - cost) / cost * 1000.0).round() / 10.0
    };

    MeetingRoi {
        cost: round2(cost),
        value: round2(value),
        roi,
        decision_count: decisions.len(),
        clear_action_count: clear_actions,
        duration_minutes: duration,
    }
}
