use std::collections::HashMap;

use anyhow::{Context, Result};
use aws_config::Region;
use aws_credential_types::Credentials;
use aws_sdk_ec2::Client;
use aws_sdk_ec2::types::{Filter, Snapshot, Tag};
use chrono::DateTime;
use snapkeep_domain::SnapshotInfo;
use snapkeep_services::{SnapshotProviderService, SnapshotQuery};
use tracing::debug;

/// EC2-backed implementation of the snapshot provider.
pub struct Ec2SnapshotProvider {
    client: Client,
}

impl Ec2SnapshotProvider {
    pub fn new(client: Client) -> Self {
        Self { client }
    }

    /// Builds a provider from static credentials and a region.
    pub async fn connect(
        access_key_id: &str,
        secret_access_key: &str,
        region: &str,
    ) -> Self {
        let config = aws_config::defaults(aws_config::BehaviorVersion::latest())
            .credentials_provider(Credentials::new(
                access_key_id,
                secret_access_key,
                None,
                None,
                "snapkeep",
            ))
            .region(Region::new(region.to_string()))
            .load()
            .await;

        Self::new(Client::new(&config))
    }
}

#[async_trait::async_trait]
impl SnapshotProviderService for Ec2SnapshotProvider {
    async fn list_snapshots(&self, query: &SnapshotQuery) -> Result<Vec<SnapshotInfo>> {
        let mut request = self
            .client
            .describe_snapshots()
            .owner_ids(query.owner.clone());
        if !query.snapshot_ids.is_empty() {
            request = request.set_snapshot_ids(Some(query.snapshot_ids.clone()));
        }
        if !query.filters.is_empty() {
            let filters = query
                .filters
                .iter()
                .map(|(name, value)| {
                    Filter::builder()
                        .name(name.as_str())
                        .values(value.as_str())
                        .build()
                })
                .collect();
            request = request.set_filters(Some(filters));
        }

        let mut snapshots = Vec::new();
        let mut pages = request.into_paginator().send();
        while let Some(page) = pages.next().await {
            let page = page.context("Failed to describe snapshots")?;
            for snapshot in page.snapshots.unwrap_or_default() {
                snapshots.push(to_snapshot_info(snapshot)?);
            }
        }
        debug!(count = snapshots.len(), "described snapshots");
        Ok(snapshots)
    }

    async fn create_snapshot(
        &self,
        volume_id: &str,
        description: &str,
        dry_run: bool,
    ) -> Result<SnapshotInfo> {
        let output = self
            .client
            .create_snapshot()
            .volume_id(volume_id)
            .description(description)
            .dry_run(dry_run)
            .send()
            .await
            .with_context(|| format!("Failed to create snapshot of {volume_id}"))?;

        let id = output.snapshot_id.context("created snapshot has no id")?;
        let started_at = output
            .start_time
            .and_then(|t| DateTime::from_timestamp(t.secs(), t.subsec_nanos()))
            .with_context(|| format!("created snapshot {id} has no valid start time"))?;

        Ok(SnapshotInfo {
            id,
            started_at,
            state: output
                .state
                .map(|state| state.as_str().to_string())
                .unwrap_or_default(),
            progress: output.progress,
            volume_id: output.volume_id,
            description: output.description,
        })
    }

    async fn delete_snapshot(&self, snapshot_id: &str, dry_run: bool) -> Result<()> {
        self.client
            .delete_snapshot()
            .snapshot_id(snapshot_id)
            .dry_run(dry_run)
            .send()
            .await
            .with_context(|| format!("Failed to delete snapshot {snapshot_id}"))?;
        Ok(())
    }

    async fn create_tags(
        &self,
        resource_id: &str,
        tags: &HashMap<String, String>,
        dry_run: bool,
    ) -> Result<()> {
        let tags = tags
            .iter()
            .map(|(key, value)| Tag::builder().key(key.as_str()).value(value.as_str()).build())
            .collect();

        self.client
            .create_tags()
            .resources(resource_id)
            .set_tags(Some(tags))
            .dry_run(dry_run)
            .send()
            .await
            .with_context(|| format!("Failed to tag {resource_id}"))?;
        Ok(())
    }
}

/// Maps a provider snapshot record into the domain descriptor. A snapshot
/// without an id or start time is a provider contract violation, not
/// something to paper over.
fn to_snapshot_info(snapshot: Snapshot) -> Result<SnapshotInfo> {
    let id = snapshot.snapshot_id.context("snapshot has no id")?;
    let started_at = snapshot
        .start_time
        .and_then(|t| DateTime::from_timestamp(t.secs(), t.subsec_nanos()))
        .with_context(|| format!("snapshot {id} has no valid start time"))?;

    Ok(SnapshotInfo {
        id,
        started_at,
        state: snapshot
            .state
            .map(|state| state.as_str().to_string())
            .unwrap_or_default(),
        progress: snapshot.progress,
        volume_id: snapshot.volume_id,
        description: snapshot.description,
    })
}
