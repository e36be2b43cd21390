use chrono::{DateTime, Duration, Utc};
use derive_setters::Setters;
use serde::Serialize;
use strum_macros::{Display, EnumString};

use crate::SnapshotInfo;

/// How [`RetentionPolicy::count`] is interpreted.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Display, EnumString)]
#[strum(serialize_all = "lowercase")]
pub enum CountType {
    /// `count` is a number of snapshots.
    #[default]
    Num,
    /// `count` is an age window in days.
    Days,
}

/// Rules deciding which snapshots are retained and which expire.
///
/// Zero and negative bounds are distinct: a negative `count` or `limit`
/// means "no bound" (retain everything / shield nothing), while zero is an
/// explicit boundary (retain zero snapshots by count, retain only
/// snapshots at least as new as the reference date by days, shield zero
/// snapshots for `limit`).
#[derive(Debug, Clone, PartialEq, Serialize, Setters)]
#[setters(strip_option)]
pub struct RetentionPolicy {
    /// Snapshots (or days, per `count_type`) to retain past the shielded
    /// prefix.
    pub count: i64,
    pub count_type: CountType,
    /// Newest snapshots shielded from expiry before the policy applies.
    pub limit: i64,
    /// Reference date for age calculations; "now" when absent.
    pub from_date: Option<DateTime<Utc>>,
}

impl Default for RetentionPolicy {
    fn default() -> Self {
        Self {
            count: -1,
            count_type: CountType::Num,
            limit: -1,
            from_date: None,
        }
    }
}

/// Snapshots partitioned by a [`RetentionPolicy`].
///
/// The full listing is stable-sorted descending by start time, so ties
/// keep their input order. Retained snapshots always form a prefix of the
/// sorted listing: the shielded head plus, depending on the count type,
/// either the next `count` snapshots or every snapshot inside the age
/// window.
#[derive(Debug)]
pub struct RetentionSelection {
    snapshots: Vec<SnapshotInfo>,
    cut: usize,
}

impl RetentionSelection {
    pub fn new(mut snapshots: Vec<SnapshotInfo>, policy: &RetentionPolicy) -> Self {
        snapshots.sort_by(|a, b| b.started_at.cmp(&a.started_at));
        let cut = cut_index(&snapshots, policy);
        Self { snapshots, cut }
    }

    /// Snapshots the policy retains, newest first.
    pub fn kept(&self) -> &[SnapshotInfo] {
        &self.snapshots[..self.cut]
    }

    /// Snapshots the policy expires, oldest first.
    pub fn expired(&self) -> impl DoubleEndedIterator<Item = &SnapshotInfo> {
        self.snapshots[self.cut..].iter().rev()
    }

    pub fn is_empty(&self) -> bool {
        self.snapshots.is_empty()
    }

    pub fn len(&self) -> usize {
        self.snapshots.len()
    }
}

/// Index of the first expired snapshot in the sorted listing.
fn cut_index(snapshots: &[SnapshotInfo], policy: &RetentionPolicy) -> usize {
    let shielded = if policy.limit < 0 {
        0
    } else {
        (policy.limit as usize).min(snapshots.len())
    };

    if policy.count < 0 {
        return snapshots.len();
    }

    let tail = &snapshots[shielded..];
    let retained = match policy.count_type {
        CountType::Num => (policy.count as usize).min(tail.len()),
        CountType::Days => {
            let reference = policy.from_date.unwrap_or_else(Utc::now);
            let window = Duration::days(policy.count);
            // Descending order means age grows along the tail, so the
            // in-window snapshots are exactly a prefix.
            tail.iter()
                .take_while(|snapshot| reference - snapshot.started_at <= window)
                .count()
        }
    };

    shielded + retained
}
