use std::fmt::{self, Display, Formatter};

use chrono::{DateTime, Utc};
use derive_setters::Setters;
use serde::Serialize;

/// Immutable descriptor of a provider-owned snapshot. The provider is the
/// source of truth; this record is never mutated locally.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Setters)]
#[setters(into, strip_option)]
pub struct SnapshotInfo {
    /// Provider-assigned snapshot id, e.g. `snap-0a1b2c3d`.
    pub id: String,
    /// When the snapshot was started.
    pub started_at: DateTime<Utc>,
    /// Provider-reported state, e.g. `pending` or `completed`.
    pub state: String,
    /// Completion percentage as reported by the provider.
    pub progress: Option<String>,
    /// Volume the snapshot was taken from.
    pub volume_id: Option<String>,
    pub description: Option<String>,
}

impl SnapshotInfo {
    pub fn new(id: impl Into<String>, started_at: DateTime<Utc>) -> Self {
        Self {
            id: id.into(),
            started_at,
            state: String::new(),
            progress: None,
            volume_id: None,
            description: None,
        }
    }
}

impl Display for SnapshotInfo {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}\t{}\t{}\t{}\t{}\t{}",
            self.id,
            self.started_at.format("%Y-%m-%dT%H:%M:%SZ"),
            self.state,
            self.progress.as_deref().unwrap_or("-"),
            self.volume_id.as_deref().unwrap_or("-"),
            self.description.as_deref().unwrap_or("")
        )
    }
}
