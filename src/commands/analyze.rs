use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use std::path::PathBuf;

use crate::analysis::analyze;
use crate::config;
use crate::io::input::read_export;
use crate::io::output::{create_writer, render_to_string, OutputFormat};

pub struct AnalyzeConfig {
    pub path: PathBuf,
    pub format: OutputFormat,
    pub output: Option<PathBuf>,
    pub team: Option<String>,
    pub now: Option<String>,
}

fn resolve_now(raw: Option<&str>) -> Result<DateTime<Utc>> {
    match raw {
        Some(s) => {
            let parsed = DateTime::parse_from_rfc3339(s)
                .with_context(|| format!("--now is not a valid RFC 3339 timestamp: {s}"))?;
            Ok(parsed.with_timezone(&Utc))
        }
        None => Ok(Utc::now()),
    }
}

pub fn analyze_export(config_args: AnalyzeConfig) -> Result<()> {
    let now = resolve_now(config_args.now.as_deref())?;

    let mut export = read_export(&config_args.path)
        .with_context(|| format!("failed to load export {}", config_args.path.display()))?;
    if let Some(team) = &config_args.team {
        export = export.scoped_to_team(team);
        log::info!(
            "scoped to team {}: {} meetings remain",
            team,
            export.meetings.len()
        );
    }

    let report = analyze(&export.meetings, &export.actions, config::get_config(), now);

    match &config_args.output {
        Some(path) => {
            let rendered = render_to_string(&report, config_args.format)?;
            crate::io::write_file(path, &rendered)?;
            log::info!("report written to {}", path.display());
        }
        None => {
            create_writer(config_args.format).write_report(&report)?;
        }
    }

    Ok(())
}
