use chrono::{DateTime, TimeZone, Utc};
use indoc::indoc;
use meetmap::config::MeetmapConfig;
use meetmap::io::input::parse_export;
use meetmap::io::output::{render_to_string, OutputFormat};
use meetmap::{analyze, ActionStatus, Grade};
use std::io::Write;

fn now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 6, 15, 12, 0, 0).unwrap()
}

const EXPORT: &str = indoc! {r#"
    {
      "meetings": [
        {
          "meetingId": "m-1",
          "title": "Sprint planning",
          "teamId": "team-a",
          "createdAt": "2025-06-01T10:00:00Z",
          "decisions": ["Commit to the June scope"],
          "actionItems": [
            {
              "id": "a-1",
              "task": "Write the capacity plan for the sprint",
              "owner": "Ana",
              "deadline": "2025-06-10",
              "status": "done",
              "createdAt": "2025-06-01T10:00:00Z",
              "completedAt": "2025-06-03T10:00:00Z"
            },
            {
              "id": "a-2",
              "task": "Socialize the scope with stakeholders",
              "owner": "Unassigned",
              "completed": false,
              "createdAt": "2025-06-01T10:00:00Z"
            }
          ]
        },
        {
          "meetingId": "m-2",
          "title": "Q2 sync",
          "teamId": "team-b",
          "createdAt": "2025-06-05T09:00:00Z",
          "decisions": [],
          "actionItems": [
            {
              "id": "a-3",
              "task": "Collect the quarterly numbers",
              "owner": "Ben",
              "status": "ARCHIVED",
              "completed": true,
              "createdAt": "2025-06-05T09:00:00Z"
            }
          ]
        },
        {
          "meetingId": "m-3",
          "title": "Untitled",
          "teamId": "team-a",
          "createdAt": "2025-06-08T09:00:00Z",
          "decisions": [],
          "actionItems": []
        }
      ]
    }
"#};

#[test]
fn test_parse_export_normalizes_every_shape() {
    let export = parse_export(EXPORT).unwrap();
    assert_eq!(export.meetings.len(), 3);
    assert_eq!(export.actions.len(), 3);

    // Sentinel owner collapsed.
    let a2 = export.actions.iter().find(|a| a.id == "a-2").unwrap();
    assert!(a2.owner.is_none());
    assert_eq!(a2.status, ActionStatus::Todo);

    // Unrecognized status string falls back to the completed flag.
    let a3 = export.actions.iter().find(|a| a.id == "a-3").unwrap();
    assert_eq!(a3.status, ActionStatus::Done);

    // Meeting context flows into the flattened actions.
    let a1 = export.actions.iter().find(|a| a.id == "a-1").unwrap();
    assert_eq!(a1.meeting_id, "m-1");
    assert_eq!(a1.meeting_title, "Sprint planning");

    assert!(export.meetings[2].is_ghost());
}

#[test]
fn test_bare_array_export_is_accepted() {
    let export = parse_export(r#"[{"meetingId": "m-9", "title": "Kickoff"}]"#).unwrap();
    assert_eq!(export.meetings.len(), 1);
    assert_eq!(export.meetings[0].meeting_id, "m-9");
}

#[test]
fn test_malformed_export_is_an_error_not_a_panic() {
    assert!(parse_export("{\"meetings\": 7}").is_err());
    assert!(parse_export("not json").is_err());
}

#[test]
fn test_team_scoping() {
    let export = parse_export(EXPORT).unwrap().scoped_to_team("team-a");
    assert_eq!(export.meetings.len(), 2);
    assert_eq!(export.actions.len(), 2);
}

#[test]
fn test_full_report_over_export() {
    let export = parse_export(EXPORT).unwrap();
    let config = MeetmapConfig::default();
    let report = analyze(&export.meetings, &export.actions, &config, now());

    assert_eq!(report.total_meetings, 3);
    assert_eq!(report.total_actions, 3);
    assert_eq!(report.meetings.len(), 3);

    // Too little data for pattern detection.
    assert!(report.patterns.is_empty());

    // One incomplete action of three.
    assert_eq!(report.debt.total_debt, 240.0);
    assert_eq!(report.debt.incomplete_actions, 1);

    // The ghost meeting grades F with an autopsy; the others keep their
    // grades consistent with their scores.
    let ghost = report.meetings.iter().find(|m| m.meeting_id == "m-3").unwrap();
    assert!(ghost.is_ghost);
    assert_eq!(ghost.health.grade, Grade::F);
    assert!(ghost.autopsy.as_deref().unwrap().contains("email"));

    // Ana and Ben both rank; no Unassigned row.
    assert_eq!(report.leaderboard.len(), 2);
    assert!(report.leaderboard.iter().all(|s| s.owner != "Unassigned"));
}

#[test]
fn test_report_is_idempotent() {
    let export = parse_export(EXPORT).unwrap();
    let config = MeetmapConfig::default();
    let first = analyze(&export.meetings, &export.actions, &config, now());
    let second = analyze(&export.meetings, &export.actions, &config, now());
    assert_eq!(first, second);

    let first_json = serde_json::to_string(&first).unwrap();
    let second_json = serde_json::to_string(&second).unwrap();
    assert_eq!(first_json, second_json);
}

#[test]
fn test_json_rendering_round_trips() {
    let export = parse_export(EXPORT).unwrap();
    let config = MeetmapConfig::default();
    let report = analyze(&export.meetings, &export.actions, &config, now());

    let json = render_to_string(&report, OutputFormat::Json).unwrap();
    let parsed: serde_json::Value = serde_json::from_str(&json).unwrap();
    assert_eq!(parsed["totalMeetings"], 3);
    assert_eq!(parsed["debt"]["totalDebt"], 240.0);
}

#[test]
fn test_markdown_rendering_has_all_sections() {
    let export = parse_export(EXPORT).unwrap();
    let config = MeetmapConfig::default();
    let report = analyze(&export.meetings, &export.actions, &config, now());

    let markdown = render_to_string(&report, OutputFormat::Markdown).unwrap();
    assert!(markdown.contains("# Meeting Analytics Report"));
    assert!(markdown.contains("## Action Item Debt"));
    assert!(markdown.contains("## Leaderboard"));
    assert!(markdown.contains("## Detected Patterns"));
    assert!(markdown.contains("## Meetings"));
}

#[test]
fn test_report_file_output() {
    let export = parse_export(EXPORT).unwrap();
    let config = MeetmapConfig::default();
    let report = analyze(&export.meetings, &export.actions, &config, now());

    let rendered = render_to_string(&report, OutputFormat::Json).unwrap();
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(rendered.as_bytes()).unwrap();

    let reread = std::fs::read_to_string(file.path()).unwrap();
    let parsed: serde_json::Value = serde_json::from_str(&reread).unwrap();
    assert_eq!(parsed["totalActions"], 3);
}
