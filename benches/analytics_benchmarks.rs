use chrono::{Duration, TimeZone, Utc};
use criterion::{criterion_group, criterion_main, Criterion};
use std::hint::black_box;
use meetmap::config::MeetmapConfig;
use meetmap::{analyze, detect_patterns, rank_leaderboard, ActionItem, ActionStatus, MeetingRecord};

fn fixture(meeting_count: usize, actions_per_meeting: usize) -> (Vec<MeetingRecord>, Vec<ActionItem>) {
    let now = Utc.with_ymd_and_hms(2025, 6, 15, 12, 0, 0).unwrap();
    let owners = ["Ana", "Ben", "Cid", "Dee", "Eli", "Fay"];

    let mut meetings = Vec::with_capacity(meeting_count);
    let mut actions = Vec::new();
    for m in 0..meeting_count {
        let meeting_id = format!("m-{m}");
        let created = now - Duration::days((m % 90) as i64);
        for a in 0..actions_per_meeting {
            let idx = m * actions_per_meeting + a;
            actions.push(ActionItem {
                id: format!("a-{idx}"),
                meeting_id: meeting_id.clone(),
                meeting_title: format!("Working session {m}"),
                meeting_date: Some(created),
                task: format!("Deliver the workstream artifact number {idx}"),
                owner: Some(owners[idx % owners.len()].to_string()),
                deadline: Some((now + Duration::days((idx % 21) as i64 - 7)).date_naive()),
                status: if idx % 3 == 0 {
                    ActionStatus::Done
                } else {
                    ActionStatus::Todo
                },
                created_at: Some(created),
                completed_at: (idx % 3 == 0).then(|| created + Duration::days(2)),
                risk_score: None,
            });
        }
        meetings.push(MeetingRecord {
            meeting_id,
            title: format!("Working session {m}"),
            team_id: None,
            created_at: Some(created),
            decisions: vec![format!("Decision for session {m}")],
            action_items: actions[m * actions_per_meeting..(m + 1) * actions_per_meeting].to_vec(),
        });
    }
    (meetings, actions)
}

fn bench_analytics(c: &mut Criterion) {
    let now = Utc.with_ymd_and_hms(2025, 6, 15, 12, 0, 0).unwrap();
    let config = MeetmapConfig::default();
    let (meetings, actions) = fixture(100, 8);

    c.bench_function("detect_patterns_100_meetings", |b| {
        b.iter(|| detect_patterns(black_box(&meetings), black_box(&actions), &config.patterns, now))
    });

    c.bench_function("rank_leaderboard_800_actions", |b| {
        b.iter(|| rank_leaderboard(black_box(&actions), &config.leaderboard, now))
    });

    c.bench_function("full_report_100_meetings", |b| {
        b.iter(|| analyze(black_box(&meetings), black_box(&actions), &config, now))
    });
}

criterion_group!(benches, bench_analytics);
criterion_main!(benches);
