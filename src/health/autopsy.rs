//! Diagnostic "autopsy" generation for failed meetings.
//!
//! The generator is an ordered table of `(predicate, message builder)`
//! pairs evaluated top to bottom with first match winning. The ordering is
//! a designed tie-break: diffuse ownership outranks poor completion, which
//! outranks decision/action imbalance. Healthy meetings (grade C or better,
//! not a ghost) produce nothing.

use crate::core::ActionItem;

/// Pre-computed facts one rule needs to decide and phrase its message
#[derive(Debug, Clone, Copy)]
struct MeetingFacts {
    total: usize,
    completed: usize,
    unassigned: usize,
    decisions: usize,
    completion_rate: f64,
    unassigned_rate: f64,
    score100: f64,
    is_ghost: bool,
}

type Predicate = fn(&MeetingFacts) -> bool;
type MessageBuilder = fn(&MeetingFacts) -> String;

// Evaluated strictly in order; first match wins.
const RULES: &[(Predicate, MessageBuilder)] = &[
    (is_ghost, ghost_message),
    (majority_unassigned, majority_unassigned_message),
    (nothing_delivered, nothing_delivered_message),
    (poor_follow_through, poor_follow_through_message),
    (half_abandoned, half_abandoned_message),
    (status_update, status_update_message),
    (talk_without_execution, talk_without_execution_message),
    (no_direction, no_direction_message),
    (drifting_ownership, drifting_ownership_message),
    (always, fallback_message),
];

fn is_ghost(f: &MeetingFacts) -> bool {
    f.is_ghost
}

fn ghost_message(_: &MeetingFacts) -> String {
    "Cause of death: Zero decisions and zero action items; this meeting could have been an \
     email. Prescription: Require a clear agenda with expected outcomes before scheduling."
        .to_string()
}

fn majority_unassigned(f: &MeetingFacts) -> bool {
    f.unassigned_rate > 0.5
}

fn majority_unassigned_message(f: &MeetingFacts) -> String {
    format!(
        "Cause of death: {} of {} action items left the room with no owner. \
         Prescription: Assign explicit owners before ending the meeting.",
        f.unassigned, f.total
    )
}

fn nothing_delivered(f: &MeetingFacts) -> bool {
    f.total > 0 && f.completed == 0
}

fn nothing_delivered_message(f: &MeetingFacts) -> String {
    format!(
        "Cause of death: Zero of {} action items were delivered despite being assigned. \
         Prescription: Open the next meeting by reviewing every outstanding item.",
        f.total
    )
}

fn poor_follow_through(f: &MeetingFacts) -> bool {
    f.completion_rate > 0.0 && f.completion_rate <= 0.25
}

fn poor_follow_through_message(f: &MeetingFacts) -> String {
    format!(
        "Cause of death: Only {} of {} action items were completed, and follow-through \
         collapsed once the meeting ended. Prescription: Send deadline reminders and \
         review progress mid-week.",
        f.completed, f.total
    )
}

fn half_abandoned(f: &MeetingFacts) -> bool {
    f.completion_rate > 0.25 && f.completion_rate <= 0.5
}

fn half_abandoned_message(f: &MeetingFacts) -> String {
    format!(
        "Cause of death: {} of {} commitments were abandoned after the meeting. \
         Prescription: Cut the action list down to what the team can actually absorb.",
        f.total - f.completed,
        f.total
    )
}

fn status_update(f: &MeetingFacts) -> bool {
    f.decisions == 0 && f.total > 3
}

fn status_update_message(f: &MeetingFacts) -> String {
    format!(
        "Cause of death: {} action items and not a single decision; this was a status \
         update, not a meeting. Prescription: Move updates to async channels and reserve \
         meetings for decisions.",
        f.total
    )
}

fn talk_without_execution(f: &MeetingFacts) -> bool {
    f.decisions > 3 && f.total < 2
}

fn talk_without_execution_message(f: &MeetingFacts) -> String {
    format!(
        "Cause of death: {} decisions produced almost no executable work, talk without \
         execution. Prescription: Attach at least one owned action to every decision.",
        f.decisions
    )
}

fn no_direction(f: &MeetingFacts) -> bool {
    f.decisions == 0 && f.total > 0
}

fn no_direction_message(_: &MeetingFacts) -> String {
    "Cause of death: Action items were handed out with no strategic direction behind \
     them. Prescription: Open with the decision to be made, not with the task list."
        .to_string()
}

fn drifting_ownership(f: &MeetingFacts) -> bool {
    f.unassigned_rate > 0.2 && f.unassigned_rate <= 0.5
}

fn drifting_ownership_message(f: &MeetingFacts) -> String {
    format!(
        "Cause of death: {} of {} action items drifted without an owner. \
         Prescription: Close every meeting with a named owner for each item.",
        f.unassigned, f.total
    )
}

fn always(_: &MeetingFacts) -> bool {
    true
}

fn fallback_message(f: &MeetingFacts) -> String {
    if f.score100 < 60.0 {
        format!(
            "Cause of death: A health score of {:.0}/100 signals critical execution \
             failure. Prescription: Review whether this meeting needs to exist in its \
             current form.",
            f.score100
        )
    } else {
        "Cause of death: Action items lacked the clarity to be executed. \
         Prescription: Make every task specific, owned, and deadlined."
            .to_string()
    }
}

/// Generate the diagnostic sentence for one meeting, or `None` when the
/// meeting graded C or better and is not a ghost.
pub fn generate_autopsy(
    actions: &[ActionItem],
    decisions: &[String],
    score100: f64,
) -> Option<String> {
    let total = actions.len();
    let completed = actions.iter().filter(|a| a.is_completed()).count();
    let unassigned = actions.iter().filter(|a| a.is_unassigned()).count();
    let is_ghost = total == 0 && decisions.is_empty();

    if score100 >= 70.0 && !is_ghost {
        return None;
    }

    let facts = MeetingFacts {
        total,
        completed,
        unassigned,
        decisions: decisions.len(),
        completion_rate: if total > 0 {
            completed as f64 / total as f64
        } else {
            0.0
        },
        unassigned_rate: if total > 0 {
            unassigned as f64 / total as f64
        } else {
            0.0
        },
        score100,
        is_ghost,
    };

    RULES
        .iter()
        .find(|(applies, _)| applies(&facts))
        .map(|(_, build)| build(&facts))
}
