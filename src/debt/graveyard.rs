//! The graveyard: incomplete action items abandoned past the age threshold

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::config::DebtConfig;
use crate::core::ActionItem;

/// Abandoned items plus summary statistics
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GraveyardSummary {
    /// Oldest first
    pub buried: Vec<ActionItem>,
    pub total_buried: usize,
    pub avg_days_old: i64,
    pub oldest_days: i64,
}

/// Collect incomplete items older than the graveyard threshold,
/// oldest first
pub fn build_graveyard(
    actions: &[ActionItem],
    config: &DebtConfig,
    now: DateTime<Utc>,
) -> GraveyardSummary {
    let mut buried: Vec<ActionItem> = actions
        .iter()
        .filter(|a| !a.is_completed() && a.age_days(now) > config.graveyard_threshold_days)
        .cloned()
        .collect();

    buried.sort_by_key(|a| a.effective_created_at());

    let ages: Vec<i64> = buried.iter().map(|a| a.age_days(now)).collect();
    let total = buried.len();
    let avg_days_old = if total > 0 {
        (ages.iter().sum::<i64>() as f64 / total as f64).round() as i64
    } else {
        0
    };
    let oldest_days = ages.iter().copied().max().unwrap_or(0);

    GraveyardSummary {
        buried,
        total_buried: total,
        avg_days_old,
        oldest_days,
    }
}
