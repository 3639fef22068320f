use crate::analysis::AnalysisReport;
use colored::*;
use comfy_table::{presets::UTF8_FULL, Cell, Table};
use std::io::Write;

use crate::core::Severity;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Json,
    Markdown,
    Terminal,
}

pub trait OutputWriter {
    fn write_report(&mut self, report: &AnalysisReport) -> anyhow::Result<()>;
}

pub struct JsonWriter<W: Write> {
    writer: W,
}

impl<W: Write> JsonWriter<W> {
    pub fn new(writer: W) -> Self {
        Self { writer }
    }
}

impl<W: Write> OutputWriter for JsonWriter<W> {
    fn write_report(&mut self, report: &AnalysisReport) -> anyhow::Result<()> {
        let json = serde_json::to_string_pretty(report)?;
        self.writer.write_all(json.as_bytes())?;
        self.writer.write_all(b"\n")?;
        Ok(())
    }
}

pub struct MarkdownWriter<W: Write> {
    writer: W,
}

impl<W: Write> MarkdownWriter<W> {
    pub fn new(writer: W) -> Self {
        Self { writer }
    }
}

impl<W: Write> OutputWriter for MarkdownWriter<W> {
    fn write_report(&mut self, report: &AnalysisReport) -> anyhow::Result<()> {
        self.write_header(report)?;
        self.write_debt(report)?;
        self.write_leaderboard(report)?;
        self.write_patterns(report)?;
        self.write_meetings(report)?;
        Ok(())
    }
}

impl<W: Write> MarkdownWriter<W> {
    fn write_header(&mut self, report: &AnalysisReport) -> anyhow::Result<()> {
        writeln!(self.writer, "# Meeting Analytics Report")?;
        writeln!(self.writer)?;
        writeln!(
            self.writer,
            "Generated: {}",
            report.generated_at.format("%Y-%m-%d %H:%M:%S UTC")
        )?;
        writeln!(
            self.writer,
            "Scope: {} meetings, {} action items",
            report.total_meetings, report.total_actions
        )?;
        writeln!(self.writer)?;
        Ok(())
    }

    fn write_debt(&mut self, report: &AnalysisReport) -> anyhow::Result<()> {
        let debt = &report.debt;
        writeln!(self.writer, "## Action Item Debt")?;
        writeln!(self.writer)?;
        writeln!(self.writer, "| Bucket | Debt |")?;
        writeln!(self.writer, "|--------|------|")?;
        writeln!(self.writer, "| Forgotten | ${:.2} |", debt.breakdown.forgotten)?;
        writeln!(self.writer, "| Overdue | ${:.2} |", debt.breakdown.overdue)?;
        writeln!(self.writer, "| Unassigned | ${:.2} |", debt.breakdown.unassigned)?;
        writeln!(self.writer, "| At risk | ${:.2} |", debt.breakdown.at_risk)?;
        writeln!(self.writer, "| **Total** | **${:.2}** |", debt.total_debt)?;
        writeln!(self.writer)?;
        writeln!(
            self.writer,
            "Completion rate {:.0}% against a {:.0}% industry benchmark; \
             debt velocity ${:+.2}/week.",
            debt.completion_rate * 100.0,
            debt.industry_benchmark * 100.0,
            debt.debt_velocity
        )?;
        writeln!(self.writer)?;
        Ok(())
    }

    fn write_leaderboard(&mut self, report: &AnalysisReport) -> anyhow::Result<()> {
        writeln!(self.writer, "## Leaderboard")?;
        writeln!(self.writer)?;
        if report.leaderboard.is_empty() {
            writeln!(self.writer, "No rankable contributors.")?;
            writeln!(self.writer)?;
            return Ok(());
        }
        writeln!(
            self.writer,
            "| Rank | Owner | Score | Done | Open | Rate | Achievements |"
        )?;
        writeln!(
            self.writer,
            "|------|-------|-------|------|------|------|--------------|"
        )?;
        for (idx, stat) in report.leaderboard.iter().enumerate() {
            let badges: Vec<&str> = stat.achievements.iter().map(|a| a.as_str()).collect();
            writeln!(
                self.writer,
                "| {} | {} | {:.2} | {} | {} | {:.0}% | {} |",
                idx + 1,
                stat.owner,
                stat.weighted_score,
                stat.completed,
                stat.incomplete,
                stat.completion_rate * 100.0,
                badges.join(", ")
            )?;
        }
        writeln!(self.writer)?;
        Ok(())
    }

    fn write_patterns(&mut self, report: &AnalysisReport) -> anyhow::Result<()> {
        writeln!(self.writer, "## Detected Patterns")?;
        writeln!(self.writer)?;
        if report.patterns.is_empty() {
            writeln!(self.writer, "No recurring dysfunctions detected.")?;
            writeln!(self.writer)?;
            return Ok(());
        }
        for pattern in &report.patterns {
            writeln!(
                self.writer,
                "### {} ({}, confidence {:.2})",
                pattern.name,
                pattern.severity.as_str(),
                pattern.confidence
            )?;
            writeln!(self.writer)?;
            for symptom in &pattern.symptoms {
                writeln!(self.writer, "- {}", symptom)?;
            }
            writeln!(self.writer)?;
            writeln!(self.writer, "Prescription:")?;
            for step in &pattern.prescription {
                writeln!(self.writer, "1. {}", step)?;
            }
            writeln!(self.writer)?;
            writeln!(self.writer, "Based on {}.", pattern.based_on)?;
            writeln!(self.writer)?;
        }
        Ok(())
    }

    fn write_meetings(&mut self, report: &AnalysisReport) -> anyhow::Result<()> {
        writeln!(self.writer, "## Meetings")?;
        writeln!(self.writer)?;
        writeln!(self.writer, "| Meeting | Grade | Score | Decisions | Actions | ROI |")?;
        writeln!(self.writer, "|---------|-------|-------|-----------|---------|-----|")?;
        for insight in &report.meetings {
            writeln!(
                self.writer,
                "| {} | {} | {:.1} | {} | {} | {:.1}% |",
                insight.title,
                insight.health.grade.as_str(),
                insight.health.score,
                insight.decision_count,
                insight.action_count,
                insight.roi.roi
            )?;
        }
        writeln!(self.writer)?;
        for insight in report.meetings.iter().filter(|m| m.autopsy.is_some()) {
            if let Some(autopsy) = &insight.autopsy {
                writeln!(self.writer, "**{}**: {}", insight.title, autopsy)?;
                writeln!(self.writer)?;
            }
        }
        Ok(())
    }
}

#[derive(Default)]
pub struct TerminalWriter;

impl TerminalWriter {
    pub fn new() -> Self {
        Self
    }
}

impl OutputWriter for TerminalWriter {
    fn write_report(&mut self, report: &AnalysisReport) -> anyhow::Result<()> {
        print_header(report);
        print_debt(report);
        print_leaderboard(report);
        print_patterns(report);
        print_meetings(report);
        print_graveyard(report);
        Ok(())
    }
}

fn print_header(report: &AnalysisReport) {
    println!("{}", "Meeting Analytics Report".bold().blue());
    println!("{}", "========================".blue());
    println!(
        "{} meetings, {} action items",
        report.total_meetings, report.total_actions
    );
    println!();
}

fn print_debt(report: &AnalysisReport) {
    let debt = &report.debt;
    println!("{}", "Action item debt".bold());

    let mut table = Table::new();
    table.load_preset(UTF8_FULL).set_header(vec![
        Cell::new("Forgotten"),
        Cell::new("Overdue"),
        Cell::new("Unassigned"),
        Cell::new("At risk"),
        Cell::new("Total"),
    ]);
    table.add_row(vec![
        Cell::new(format!("${:.2}", debt.breakdown.forgotten)),
        Cell::new(format!("${:.2}", debt.breakdown.overdue)),
        Cell::new(format!("${:.2}", debt.breakdown.unassigned)),
        Cell::new(format!("${:.2}", debt.breakdown.at_risk)),
        Cell::new(format!("${:.2}", debt.total_debt)),
    ]);
    println!("{table}");

    let rate = format!("{:.0}%", debt.completion_rate * 100.0);
    let benchmark = format!("{:.0}%", debt.industry_benchmark * 100.0);
    let rate_colored = if debt.completion_rate >= debt.industry_benchmark {
        rate.green()
    } else {
        rate.red()
    };
    println!(
        "Completion {} (industry {}), velocity ${:+.2}/week",
        rate_colored, benchmark, debt.debt_velocity
    );
    println!();
}

fn print_leaderboard(report: &AnalysisReport) {
    println!("{}", "Leaderboard".bold());
    if report.leaderboard.is_empty() {
        println!("  no rankable contributors");
        println!();
        return;
    }

    let mut table = Table::new();
    table.load_preset(UTF8_FULL).set_header(vec![
        "#", "Owner", "Score", "Done", "Open", "Rate", "Avg days", "Achievements",
    ]);
    for (idx, stat) in report.leaderboard.iter().enumerate() {
        let badges: Vec<&str> = stat.achievements.iter().map(|a| a.as_str()).collect();
        table.add_row(vec![
            Cell::new(idx + 1),
            Cell::new(&stat.owner),
            Cell::new(format!("{:.2}", stat.weighted_score)),
            Cell::new(stat.completed),
            Cell::new(stat.incomplete),
            Cell::new(format!("{:.0}%", stat.completion_rate * 100.0)),
            Cell::new(format!("{:.1}", stat.avg_completion_days)),
            Cell::new(badges.join(", ")),
        ]);
    }
    println!("{table}");
    println!();
}

fn severity_colored(severity: Severity) -> ColoredString {
    match severity {
        Severity::Critical => severity.as_str().red().bold(),
        Severity::High => severity.as_str().red(),
        Severity::Medium => severity.as_str().yellow(),
        Severity::Info => severity.as_str().normal(),
    }
}

fn print_patterns(report: &AnalysisReport) {
    println!("{}", "Detected patterns".bold());
    if report.patterns.is_empty() {
        println!("  none detected");
        println!();
        return;
    }
    for pattern in &report.patterns {
        println!(
            "  {} [{}] confidence {:.2} ({})",
            pattern.name.bold(),
            severity_colored(pattern.severity),
            pattern.confidence,
            pattern.based_on
        );
        for symptom in &pattern.symptoms {
            println!("    - {}", symptom);
        }
    }
    println!();
}

fn print_meetings(report: &AnalysisReport) {
    println!("{}", "Meetings".bold());
    for insight in &report.meetings {
        let grade = insight.health.grade.as_str();
        let grade_colored = match insight.health.grade {
            crate::health::Grade::A | crate::health::Grade::B => grade.green(),
            crate::health::Grade::C => grade.yellow(),
            _ => grade.red(),
        };
        println!(
            "  [{}] {}: {:.1}/10, {} decisions, {} actions, ROI {:.1}%",
            grade_colored,
            insight.title,
            insight.health.score,
            insight.decision_count,
            insight.action_count,
            insight.roi.roi
        );
        if let Some(autopsy) = &insight.autopsy {
            println!("      {}", autopsy.dimmed());
        }
    }
    println!();
}

fn print_graveyard(report: &AnalysisReport) {
    let graveyard = &report.graveyard;
    if graveyard.total_buried == 0 {
        return;
    }
    println!("{}", "Graveyard".bold());
    println!(
        "  {} buried items, {} days old on average, oldest {} days",
        graveyard.total_buried, graveyard.avg_days_old, graveyard.oldest_days
    );
    println!();
}

pub fn create_writer(format: OutputFormat) -> Box<dyn OutputWriter> {
    match format {
        OutputFormat::Json => Box::new(JsonWriter::new(std::io::stdout())),
        OutputFormat::Markdown => Box::new(MarkdownWriter::new(std::io::stdout())),
        OutputFormat::Terminal => Box::new(TerminalWriter::new()),
    }
}

/// Render a report to a string in the given format (terminal renders as
/// markdown when captured to a file)
pub fn render_to_string(report: &AnalysisReport, format: OutputFormat) -> anyhow::Result<String> {
    let mut buffer: Vec<u8> = Vec::new();
    match format {
        OutputFormat::Json => JsonWriter::new(&mut buffer).write_report(report)?,
        OutputFormat::Markdown | OutputFormat::Terminal => {
            MarkdownWriter::new(&mut buffer).write_report(report)?
        }
    }
    Ok(String::from_utf8(buffer)?)
}
