use std::collections::HashMap;

use anyhow::Result;
use snapkeep_domain::SnapshotInfo;

/// Selection criteria forwarded to the provider's describe call.
#[derive(Debug, Clone, PartialEq)]
pub struct SnapshotQuery {
    /// Restrict to these snapshot ids; empty means no restriction.
    pub snapshot_ids: Vec<String>,
    /// Provider-side filters, name to value.
    pub filters: HashMap<String, String>,
    /// Owner id or alias whose snapshots are listed.
    pub owner: String,
}

impl Default for SnapshotQuery {
    fn default() -> Self {
        Self {
            snapshot_ids: Vec::new(),
            filters: HashMap::new(),
            owner: "self".to_string(),
        }
    }
}

/// Gateway to the cloud provider's snapshot API.
///
/// This trait is the only place network calls happen, allowing the
/// console to be exercised against recording fakes in tests.
#[async_trait::async_trait]
pub trait SnapshotProviderService: Send + Sync {
    /// Returns all snapshots matching the query.
    async fn list_snapshots(&self, query: &SnapshotQuery) -> Result<Vec<SnapshotInfo>>;

    /// Starts a snapshot of the given volume and returns its descriptor.
    async fn create_snapshot(
        &self,
        volume_id: &str,
        description: &str,
        dry_run: bool,
    ) -> Result<SnapshotInfo>;

    async fn delete_snapshot(&self, snapshot_id: &str, dry_run: bool) -> Result<()>;

    /// Applies tags to an existing resource.
    async fn create_tags(
        &self,
        resource_id: &str,
        tags: &HashMap<String, String>,
        dry_run: bool,
    ) -> Result<()>;
}

/// Interactive yes/no gate in front of destructive operations.
#[async_trait::async_trait]
pub trait ConfirmService: Send + Sync {
    async fn confirm(&self, message: &str) -> Result<bool>;
}

/// Sink for user-facing console output.
#[async_trait::async_trait]
pub trait ConsoleService: Send + Sync {
    async fn print(&self, output: &str) -> Result<()>;
}
