use serde::{Deserialize, Serialize};
use std::path::Path;
use std::sync::OnceLock;

/// Debt valuation configuration.
///
/// The reference values come from the product's research-backed defaults:
/// 3.2 hours blocked per incomplete action at a $75/hour rate, against a
/// 67% industry-average completion rate.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DebtConfig {
    /// Hours of blocked work attributed to one incomplete action
    #[serde(default = "default_blocked_hours")]
    pub blocked_hours_per_item: f64,

    /// Average fully-loaded hourly rate in dollars
    #[serde(default = "default_hourly_rate")]
    pub hourly_rate: f64,

    /// Industry-average completion rate, for comparison only
    #[serde(default = "default_industry_benchmark")]
    pub industry_benchmark: f64,

    /// Number of weekly buckets in the debt trend
    #[serde(default = "default_trend_weeks")]
    pub trend_weeks: usize,

    /// Incomplete items older than this many days count as forgotten
    #[serde(default = "default_graveyard_threshold_days")]
    pub graveyard_threshold_days: i64,
}

impl DebtConfig {
    /// Dollar cost of one incomplete action item
    pub fn cost_per_item(&self) -> f64 {
        self.blocked_hours_per_item * self.hourly_rate
    }
}

impl Default for DebtConfig {
    fn default() -> Self {
        Self {
            blocked_hours_per_item: default_blocked_hours(),
            hourly_rate: default_hourly_rate(),
            industry_benchmark: default_industry_benchmark(),
            trend_weeks: default_trend_weeks(),
            graveyard_threshold_days: default_graveyard_threshold_days(),
        }
    }
}

fn default_blocked_hours() -> f64 {
    3.2
}

fn default_hourly_rate() -> f64 {
    75.0
}

fn default_industry_benchmark() -> f64 {
    0.67
}

fn default_trend_weeks() -> usize {
    8
}

fn default_graveyard_threshold_days() -> i64 {
    30
}

/// Meeting ROI configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RoiConfig {
    /// Typical meeting size
    #[serde(default = "default_avg_attendees")]
    pub avg_attendees: f64,

    /// Average fully-loaded hourly rate in dollars
    #[serde(default = "default_hourly_rate")]
    pub hourly_rate: f64,

    /// Dollar value attributed to one recorded decision
    #[serde(default = "default_decision_value")]
    pub decision_value: f64,

    /// Dollar value attributed to one clear action (owner and deadline set)
    #[serde(default = "default_action_value")]
    pub action_value: f64,

    /// Assumed duration when a meeting carries none
    #[serde(default = "default_duration_minutes")]
    pub default_duration_minutes: f64,
}

impl Default for RoiConfig {
    fn default() -> Self {
        Self {
            avg_attendees: default_avg_attendees(),
            hourly_rate: default_hourly_rate(),
            decision_value: default_decision_value(),
            action_value: default_action_value(),
            default_duration_minutes: default_duration_minutes(),
        }
    }
}

fn default_avg_attendees() -> f64 {
    4.0
}

fn default_decision_value() -> f64 {
    500.0
}

fn default_action_value() -> f64 {
    200.0
}

fn default_duration_minutes() -> f64 {
    30.0
}

/// Pattern detection gates and baselines
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PatternConfig {
    /// Only meetings/actions this recent participate in detection
    #[serde(default = "default_recent_window_days")]
    pub recent_window_days: i64,

    /// Minimum recent meetings before any detection is attempted
    #[serde(default = "default_min_meetings")]
    pub min_meetings: usize,

    /// Minimum recent actions before any detection is attempted
    #[serde(default = "default_min_actions")]
    pub min_actions: usize,

    /// Industry baseline share of incomplete actions
    #[serde(default = "default_incomplete_baseline")]
    pub incomplete_baseline: f64,

    /// Assumed attendees when costing ghost meetings
    #[serde(default = "default_ghost_attendees")]
    pub ghost_attendees: f64,

    /// Assumed duration in hours when costing ghost meetings
    #[serde(default = "default_ghost_duration_hours")]
    pub ghost_duration_hours: f64,

    /// Cost per person-hour in dollars when costing ghost meetings
    #[serde(default = "default_hourly_rate")]
    pub cost_per_person_hour: f64,
}

impl Default for PatternConfig {
    fn default() -> Self {
        Self {
            recent_window_days: default_recent_window_days(),
            min_meetings: default_min_meetings(),
            min_actions: default_min_actions(),
            incomplete_baseline: default_incomplete_baseline(),
            ghost_attendees: default_ghost_attendees(),
            ghost_duration_hours: default_ghost_duration_hours(),
            cost_per_person_hour: default_hourly_rate(),
        }
    }
}

fn default_recent_window_days() -> i64 {
    120
}

fn default_min_meetings() -> usize {
    5
}

fn default_min_actions() -> usize {
    10
}

fn default_incomplete_baseline() -> f64 {
    0.33
}

fn default_ghost_attendees() -> f64 {
    5.0
}

fn default_ghost_duration_hours() -> f64 {
    1.0
}

/// Leaderboard identity filtering.
///
/// The phrase list is a documented heuristic for owner strings that are
/// really task fragments, not people. Its exact membership is tuning, not
/// a correctness invariant.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LeaderboardConfig {
    /// Normalized owner names containing any of these fragments are
    /// excluded from ranking
    #[serde(default = "default_excluded_phrases")]
    pub excluded_phrases: Vec<String>,

    /// Names shorter than this are treated as parsing noise
    #[serde(default = "default_min_name_chars")]
    pub min_name_chars: usize,

    /// Names longer than this are treated as parsing noise
    #[serde(default = "default_max_name_chars")]
    pub max_name_chars: usize,
}

impl Default for LeaderboardConfig {
    fn default() -> Self {
        Self {
            excluded_phrases: default_excluded_phrases(),
            min_name_chars: default_min_name_chars(),
            max_name_chars: default_max_name_chars(),
        }
    }
}

fn default_excluded_phrases() -> Vec<String> {
    ["responsible for", "someone", "will do", "everyone", "tbd"]
        .into_iter()
        .map(String::from)
        .collect()
}

fn default_min_name_chars() -> usize {
    3
}

fn default_max_name_chars() -> usize {
    30
}

/// Top-level configuration, loadable from `meetmap.toml`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MeetmapConfig {
    #[serde(default)]
    pub debt: DebtConfig,

    #[serde(default)]
    pub roi: RoiConfig,

    #[serde(default)]
    pub patterns: PatternConfig,

    #[serde(default)]
    pub leaderboard: LeaderboardConfig,
}

impl MeetmapConfig {
    pub fn from_toml(content: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(content)
    }
}

static CONFIG: OnceLock<MeetmapConfig> = OnceLock::new();

fn try_load_config_from_path(path: &Path) -> Option<MeetmapConfig> {
    let content = std::fs::read_to_string(path).ok()?;
    match MeetmapConfig::from_toml(&content) {
        Ok(config) => {
            log::debug!("Loaded config from {}", path.display());
            Some(config)
        }
        Err(e) => {
            log::warn!("Invalid config at {}: {}. Ignoring.", path.display(), e);
            None
        }
    }
}

/// Load configuration by walking up from the current directory
pub fn load_config() -> MeetmapConfig {
    const MAX_TRAVERSAL_DEPTH: usize = 10;

    let current = match std::env::current_dir() {
        Ok(dir) => dir,
        Err(e) => {
            log::warn!("Failed to get current directory: {}. Using default config.", e);
            return MeetmapConfig::default();
        }
    };

    current
        .ancestors()
        .take(MAX_TRAVERSAL_DEPTH)
        .map(|dir| dir.join("meetmap.toml"))
        .find_map(|path| try_load_config_from_path(&path))
        .unwrap_or_else(|| {
            log::debug!("No meetmap.toml found. Using default config.");
            MeetmapConfig::default()
        })
}

/// Get the cached configuration
pub fn get_config() -> &'static MeetmapConfig {
    CONFIG.get_or_init(load_config)
}
