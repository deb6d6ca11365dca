//! Query set: processed data ready for table rendering.
//!
//! A QuerySet sits between the raw scan result and the final table output.
//! It represents data that has been:
//! - Filtered to the requested path kinds and minimum occurrence count
//! - Sorted according to the ordering preference
//!
//! The data pipeline is:
//! 1. Raw Data (ScanResult)
//! 2. QuerySet (filtered, sorted)
//! 3. PathTable (formatted strings for display)

use serde::{Deserialize, Serialize};

use crate::data::stats::{PathEntry, PathKind, ScanResult};

use super::options::{OrderBy, OrderDirection, Ordering, PathKinds};

/// A single item in a query set (one row of data before string formatting).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QueryItem {
    /// Path key
    pub label: String,
    /// Statistics and sample for this path
    pub entry: PathEntry,
}

/// Query set for scan results.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PathQuerySet {
    /// Path kinds included
    pub kinds: PathKinds,
    /// Rows with fewer occurrences were dropped
    pub min_occurrences: u64,
    /// Data rows (filtered and sorted)
    pub items: Vec<QueryItem>,
    /// Distinct paths in the scan, before filtering
    pub path_count: usize,
    /// Number of documents scanned
    pub document_count: usize,
    /// Number of documents skipped
    pub skipped_count: usize,
}

impl PathQuerySet {
    /// Create a QuerySet from a ScanResult.
    ///
    /// Applies path kind and occurrence filters, then ordering. Rows that
    /// compare equal keep their first-seen order.
    pub fn from_result(
        result: &ScanResult,
        kinds: PathKinds,
        min_occurrences: u64,
        ordering: Ordering,
    ) -> Self {
        let mut items: Vec<QueryItem> = result
            .stats
            .iter()
            .filter(|(_, entry)| kind_included(entry.kind, &kinds))
            .filter(|(_, entry)| entry.stats.occurrences >= min_occurrences)
            .map(|(label, entry)| QueryItem {
                label: label.to_string(),
                entry: entry.clone(),
            })
            .collect();

        sort_items(&mut items, &ordering);

        PathQuerySet {
            kinds,
            min_occurrences,
            items,
            path_count: result.stats.len(),
            document_count: result.document_count,
            skipped_count: result.skipped.len(),
        }
    }
}

fn kind_included(kind: PathKind, kinds: &PathKinds) -> bool {
    match kind {
        PathKind::Element => kinds.elements,
        PathKind::Attribute => kinds.attributes,
    }
}

fn sort_items(items: &mut [QueryItem], ordering: &Ordering) {
    let descending = ordering.direction == OrderDirection::Descending;
    match ordering.by {
        OrderBy::FirstSeen => {
            if descending {
                items.reverse();
            }
        }
        OrderBy::Path => items.sort_by(|a, b| {
            let cmp = a.label.cmp(&b.label);
            if descending {
                cmp.reverse()
            } else {
                cmp
            }
        }),
        OrderBy::Occurrences | OrderBy::MaxPerFile => items.sort_by(|a, b| {
            let key_a = count_sort_key(&a.entry, &ordering.by);
            let key_b = count_sort_key(&b.entry, &ordering.by);
            if descending {
                key_b.cmp(&key_a)
            } else {
                key_a.cmp(&key_b)
            }
        }),
    }
}

fn count_sort_key(entry: &PathEntry, order_by: &OrderBy) -> u64 {
    match order_by {
        OrderBy::Occurrences => entry.stats.occurrences,
        OrderBy::MaxPerFile => entry.stats.max_per_file,
        OrderBy::FirstSeen | OrderBy::Path => 0,
    }
}
