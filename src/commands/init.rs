use crate::io;
use anyhow::Result;
use std::path::PathBuf;

pub fn init_config(force: bool) -> Result<()> {
    let config_path = PathBuf::from("meetmap.toml");

    if config_path.exists() && !force {
        anyhow::bail!("Configuration file already exists. Use --force to overwrite.");
    }

    let default_config = r#"# Meetmap Configuration

[debt]
blocked_hours_per_item = 3.2
hourly_rate = 75.0
industry_benchmark = 0.67
trend_weeks = 8
graveyard_threshold_days = 30

[roi]
avg_attendees = 4.0
hourly_rate = 75.0
decision_value = 500.0
action_value = 200.0
default_duration_minutes = 30.0

[patterns]
recent_window_days = 120
min_meetings = 5
min_actions = 10
incomplete_baseline = 0.33
ghost_attendees = 5.0
ghost_duration_hours = 1.0
cost_per_person_hour = 75.0

[leaderboard]
excluded_phrases = ["responsible for", "someone", "will do", "everyone", "tbd"]
min_name_chars = 3
max_name_chars = 30
"#;

    io::write_file(&config_path, default_config)?;
    println!("Created meetmap.toml configuration file");

    Ok(())
}
