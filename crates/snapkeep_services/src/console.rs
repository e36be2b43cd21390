use std::collections::HashMap;
use std::sync::Arc;

use anyhow::{Context, Result};
use derive_setters::Setters;
use snapkeep_domain::{RetentionPolicy, RetentionSelection};
use tracing::{debug, info};

use crate::{ConfirmService, ConsoleService, SnapshotProviderService, SnapshotQuery};

/// Action dispatched by [`SnapshotConsole::run`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SnapshotAction {
    List,
    Create,
    Delete,
}

/// Everything a single console run needs.
#[derive(Debug, Clone, Default, Setters)]
#[setters(into, strip_option)]
pub struct ConsoleRequest {
    pub query: SnapshotQuery,
    pub policy: RetentionPolicy,
    /// Volume to snapshot; required for `create` only.
    pub volume_id: Option<String>,
    pub description: String,
    /// Tags applied to a newly created snapshot; empty skips tagging.
    pub tags: HashMap<String, String>,
    /// Skip all confirmation prompts.
    pub auto_confirm: bool,
    /// Forwarded to the provider on mutating calls; never enforced here.
    pub dry_run: bool,
}

/// Drives snapshot lifecycle operations against the provider, gated by
/// per-item confirmation prompts unless `auto_confirm` is set.
///
/// Failures from the provider abort the run immediately; there are no
/// retries and no partial-failure recovery.
pub struct SnapshotConsole<P, C, O> {
    provider: Arc<P>,
    confirm: Arc<C>,
    console: Arc<O>,
    request: ConsoleRequest,
}

impl<P, C, O> SnapshotConsole<P, C, O>
where
    P: SnapshotProviderService,
    C: ConfirmService,
    O: ConsoleService,
{
    pub fn new(provider: Arc<P>, confirm: Arc<C>, console: Arc<O>, request: ConsoleRequest) -> Self {
        Self {
            provider,
            confirm,
            console,
            request,
        }
    }

    pub async fn run(&self, action: SnapshotAction) -> Result<()> {
        debug!(?action, dry_run = self.request.dry_run, "running snapshot action");
        match action {
            SnapshotAction::List => self.list().await,
            SnapshotAction::Create => self.create().await,
            SnapshotAction::Delete => self.delete().await,
        }
    }

    async fn select(&self) -> Result<RetentionSelection> {
        let snapshots = self.provider.list_snapshots(&self.request.query).await?;
        Ok(RetentionSelection::new(snapshots, &self.request.policy))
    }

    async fn list(&self) -> Result<()> {
        let selection = self.select().await?;
        for snapshot in selection.kept() {
            self.console.print(&snapshot.to_string()).await?;
        }
        Ok(())
    }

    async fn create(&self) -> Result<()> {
        let volume_id = self
            .request
            .volume_id
            .as_deref()
            .context("create requires a volume id")?;

        let snapshot = self
            .provider
            .create_snapshot(volume_id, &self.request.description, self.request.dry_run)
            .await?;
        info!(id = %snapshot.id, volume_id, "created snapshot");

        if !self.request.tags.is_empty() {
            self.provider
                .create_tags(&snapshot.id, &self.request.tags, self.request.dry_run)
                .await?;
        }

        self.console.print(&snapshot.to_string()).await?;
        Ok(())
    }

    async fn delete(&self) -> Result<()> {
        let selection = self.select().await?;
        for snapshot in selection.expired() {
            if !self.request.auto_confirm {
                let message = format!(
                    "Delete snapshot {} from {}?",
                    snapshot.id,
                    snapshot.started_at.format("%Y-%m-%d %H:%M:%S")
                );
                if !self.confirm.confirm(&message).await? {
                    debug!(id = %snapshot.id, "delete declined");
                    continue;
                }
            }

            self.provider
                .delete_snapshot(&snapshot.id, self.request.dry_run)
                .await?;
            info!(id = %snapshot.id, "deleted snapshot");
            self.console.print(&format!("Deleted {}", snapshot.id)).await?;
        }
        Ok(())
    }
}
