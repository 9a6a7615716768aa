//! Recency filtering of raw feed entries.
//!
//! An entry survives only if its publish instant is strictly after the run's
//! threshold. The instant is the first parsed date the entry carries
//! (`updated`, then `published`); an entry with neither is dropped, since its
//! age cannot be established.

use crate::models::RawEntry;
use chrono::{DateTime, TimeDelta, Utc};
use tracing::debug;

/// Length of a recency window of `days` days, if representable.
pub fn recency_window(days: i64) -> Option<TimeDelta> {
    if days < 0 {
        return None;
    }
    TimeDelta::try_days(days)
}

/// The cutoff for a run: `now` minus `days`. `None` when the window is
/// negative or does not fit in a timestamp.
pub fn threshold(now: DateTime<Utc>, days: i64) -> Option<DateTime<Utc>> {
    now.checked_sub_signed(recency_window(days)?)
}

/// The publish instant of an entry, from the first date field it carries.
pub fn entry_instant(entry: &RawEntry) -> Option<DateTime<Utc>> {
    entry.updated.or(entry.published)
}

/// Keep the entries published after `threshold`, in their original order.
pub fn filter_recent(entries: Vec<RawEntry>, threshold: DateTime<Utc>) -> Vec<RawEntry> {
    entries
        .into_iter()
        .filter(|entry| match entry_instant(entry) {
            Some(instant) => instant > threshold,
            None => {
                debug!(link = entry.link.as_deref().unwrap_or("unknown"), "Dropping entry without a usable date");
                false
            }
        })
        .collect()
}
