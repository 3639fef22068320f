//! Reading and normalizing a JSON export of meetings.
//!
//! The export is whatever the storage layer produced: either an object
//! with a `meetings` array or a bare array of meetings. Items inside may
//! be in any historical shape; normalization happens here, once, so the
//! rest of the crate only ever sees canonical records.

use serde::Deserialize;
use std::path::Path;

use crate::core::normalize::{normalize_meeting, RawMeeting};
use crate::core::{ActionItem, MeetingRecord};
use crate::errors::MeetmapError;

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum ExportShape {
    Wrapped { meetings: Vec<RawMeeting> },
    Bare(Vec<RawMeeting>),
}

/// Normalized contents of one export: the meetings plus the flattened
/// action items with meeting context attached
#[derive(Debug, Clone, Default)]
pub struct Export {
    pub meetings: Vec<MeetingRecord>,
    pub actions: Vec<ActionItem>,
}

impl Export {
    fn from_meetings(meetings: Vec<MeetingRecord>) -> Self {
        let actions = meetings
            .iter()
            .flat_map(|m| m.action_items.iter().cloned())
            .collect();
        Self { meetings, actions }
    }

    /// Narrow the export to one team's meetings
    pub fn scoped_to_team(self, team_id: &str) -> Self {
        let meetings = self
            .meetings
            .into_iter()
            .filter(|m| m.team_id.as_deref() == Some(team_id))
            .collect();
        Self::from_meetings(meetings)
    }
}

/// Parse an export from JSON text
pub fn parse_export(content: &str) -> Result<Export, MeetmapError> {
    let shape: ExportShape = serde_json::from_str(content)?;
    let raw = match shape {
        ExportShape::Wrapped { meetings } => meetings,
        ExportShape::Bare(meetings) => meetings,
    };
    let meetings: Vec<MeetingRecord> = raw.into_iter().map(normalize_meeting).collect();
    log::debug!("export parsed: {} meetings", meetings.len());
    Ok(Export::from_meetings(meetings))
}

/// Read and parse an export file
pub fn read_export(path: &Path) -> Result<Export, MeetmapError> {
    let content = std::fs::read_to_string(path).map_err(|source| MeetmapError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    parse_export(&content)
}
