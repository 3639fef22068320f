//! Human-readable age buckets for action items

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// How strongly the age label should be emphasized
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AgeEmphasis {
    Neutral,
    Warn,
    Critical,
}

/// Display label for how long an item has been sitting
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AgeLabel {
    pub text: String,
    pub emphasis: AgeEmphasis,
}

fn pluralize(n: i64, unit: &str) -> String {
    if n == 1 {
        format!("{} {} old", n, unit)
    } else {
        format!("{} {}s old", n, unit)
    }
}

/// Bucket a creation timestamp into a display label.
///
/// Same-day items read "Today"; under a week counts days, under a month
/// counts weeks (warn), and a month or more counts months (critical).
/// A missing timestamp produces no label rather than an error.
pub fn classify_age(created_at: Option<DateTime<Utc>>, now: DateTime<Utc>) -> Option<AgeLabel> {
    let created = created_at?;
    let days = (now - created).num_days();
    if days < 0 {
        // Clock skew upstream; treat as brand new.
        return Some(AgeLabel {
            text: "Today".to_string(),
            emphasis: AgeEmphasis::Neutral,
        });
    }

    let label = match days {
        0 => AgeLabel {
            text: "Today".to_string(),
            emphasis: AgeEmphasis::Neutral,
        },
        1..=6 => AgeLabel {
            text: pluralize(days, "day"),
            emphasis: AgeEmphasis::Neutral,
        },
        7..=29 => AgeLabel {
            text: pluralize(days / 7, "week"),
            emphasis: AgeEmphasis::Warn,
        },
        _ => AgeLabel {
            text: pluralize(days / 30, "month"),
            emphasis: AgeEmphasis::Critical,
        },
    };
    Some(label)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 6, 15, 12, 0, 0).unwrap()
    }

    fn days_ago(n: i64) -> Option<DateTime<Utc>> {
        Some(now() - chrono::Duration::days(n))
    }

    #[test]
    fn missing_timestamp_has_no_label() {
        assert_eq!(classify_age(None, now()), None);
    }

    #[test]
    fn buckets_and_emphasis() {
        assert_eq!(classify_age(days_ago(0), now()).unwrap().text, "Today");
        assert_eq!(classify_age(days_ago(1), now()).unwrap().text, "1 day old");
        assert_eq!(classify_age(days_ago(5), now()).unwrap().text, "5 days old");

        let week = classify_age(days_ago(10), now()).unwrap();
        assert_eq!(week.text, "1 week old");
        assert_eq!(week.emphasis, AgeEmphasis::Warn);

        let weeks = classify_age(days_ago(22), now()).unwrap();
        assert_eq!(weeks.text, "3 weeks old");

        let month = classify_age(days_ago(45), now()).unwrap();
        assert_eq!(month.text, "1 month old");
        assert_eq!(month.emphasis, AgeEmphasis::Critical);

        let months = classify_age(days_ago(100), now()).unwrap();
        assert_eq!(months.text, "3 months old");
    }
}
