//! Core data structures for path statistics.
//!
//! Every path key (element or attribute) seen anywhere in the corpus gets one
//! [`PathEntry`], holding:
//!
//! - **stats**: corpus-wide occurrence count, plus the highest count reached
//!   inside a single document and the document that reached it
//! - **sample**: the first non-empty value seen for the path, and where
//!
//! Entries live in [`CorpusStats`], which keeps them in the order their keys
//! were first created. Per-document counts are collected separately in
//! [`FileCounters`] and folded into the corpus once the document is done.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Sample text reported for paths that never carried a value.
pub const NO_SAMPLE: &str = "N/A";

/// Whether a path key names an element or an attribute.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PathKind {
    Element,
    Attribute,
}

/// Running counts for one path key.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PathStats {
    /// Occurrences across the whole corpus
    pub occurrences: u64,
    /// Highest number of occurrences inside a single document
    pub max_per_file: u64,
    /// Document that reached `max_per_file` first
    pub max_file: String,
}

impl PathStats {
    /// Stats for a path that has just been seen once.
    pub fn first_occurrence() -> Self {
        Self {
            occurrences: 1,
            ..Self::default()
        }
    }

    /// Offer a single document's count for this path.
    ///
    /// The maximum only moves on a strictly greater count, so on ties the
    /// document seen first keeps the attribution. Returns whether it moved.
    pub fn offer_file_count(&mut self, count: u64, file_id: &str) -> bool {
        if count > self.max_per_file {
            self.max_per_file = count;
            self.max_file = file_id.to_string();
            true
        } else {
            false
        }
    }
}

/// A representative value for a path and the document it came from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SampleRecord {
    pub value: String,
    pub file: String,
}

/// Everything recorded about one path key.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PathEntry {
    pub kind: PathKind,
    pub stats: PathStats,
    /// First non-empty value seen, if any
    pub sample: Option<SampleRecord>,
}

impl PathEntry {
    /// Entry for a path seen for the first time.
    pub fn new(kind: PathKind) -> Self {
        Self {
            kind,
            stats: PathStats::first_occurrence(),
            sample: None,
        }
    }

    /// Keep `value` as the sample unless one was already captured.
    pub fn offer_sample(&mut self, value: &str, file_id: &str) {
        if self.sample.is_none() && !value.is_empty() {
            self.sample = Some(SampleRecord {
                value: value.to_string(),
                file: file_id.to_string(),
            });
        }
    }

    /// Sample value for reporting (`N/A` when none was captured).
    pub fn sample_value(&self) -> &str {
        self.sample
            .as_ref()
            .map(|s| s.value.as_str())
            .unwrap_or(NO_SAMPLE)
    }

    /// Document the sample came from (`N/A` when none was captured).
    pub fn sample_file(&self) -> &str {
        self.sample
            .as_ref()
            .map(|s| s.file.as_str())
            .unwrap_or(NO_SAMPLE)
    }
}

/// Corpus-wide path table, in first-seen order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CorpusStats {
    paths: IndexMap<String, PathEntry>,
}

impl CorpusStats {
    /// Create an empty table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of distinct path keys.
    pub fn len(&self) -> usize {
        self.paths.len()
    }

    /// Whether no path has been recorded.
    pub fn is_empty(&self) -> bool {
        self.paths.is_empty()
    }

    /// Look up a path key.
    pub fn get(&self, path: &str) -> Option<&PathEntry> {
        self.paths.get(path)
    }

    /// Whether a path key has an entry.
    pub fn contains(&self, path: &str) -> bool {
        self.paths.contains_key(path)
    }

    /// Iterate entries in first-seen order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &PathEntry)> {
        self.paths.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Count one occurrence of `path`, creating its entry if needed.
    pub fn record(&mut self, path: &str, kind: PathKind) -> &mut PathEntry {
        match self.paths.get_index_of(path) {
            Some(idx) => {
                let entry = &mut self.paths[idx];
                entry.stats.occurrences += 1;
                entry
            }
            None => self
                .paths
                .entry(path.to_string())
                .or_insert_with(|| PathEntry::new(kind)),
        }
    }

    /// Count one occurrence of `path` only if it already has an entry.
    pub fn record_existing(&mut self, path: &str) -> Option<&mut PathEntry> {
        let entry = self.paths.get_mut(path)?;
        entry.stats.occurrences += 1;
        Some(entry)
    }

    pub(crate) fn get_mut(&mut self, path: &str) -> Option<&mut PathEntry> {
        self.paths.get_mut(path)
    }
}

/// Occurrence counts for a single document.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FileCounters {
    counts: IndexMap<String, u64>,
}

impl FileCounters {
    /// Create empty counters.
    pub fn new() -> Self {
        Self::default()
    }

    /// Count one occurrence of `path`.
    pub fn increment(&mut self, path: &str) {
        match self.counts.get_mut(path) {
            Some(count) => *count += 1,
            None => {
                self.counts.insert(path.to_string(), 1);
            }
        }
    }

    /// Count for a path (0 if never seen).
    pub fn get(&self, path: &str) -> u64 {
        self.counts.get(path).copied().unwrap_or(0)
    }

    /// Iterate `(path, count)` pairs.
    pub fn iter(&self) -> impl Iterator<Item = (&str, u64)> {
        self.counts.iter().map(|(k, v)| (k.as_str(), *v))
    }

    /// Number of distinct paths counted.
    pub fn len(&self) -> usize {
        self.counts.len()
    }

    /// Whether nothing was counted.
    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    /// Forget every count.
    pub fn clear(&mut self) {
        self.counts.clear();
    }
}

/// A document that could not be scanned.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SkippedDocument {
    pub path: PathBuf,
    /// Reader or parser message
    pub message: String,
}

/// Result of scanning a corpus.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ScanResult {
    /// Path table for every document scanned
    pub stats: CorpusStats,
    /// Number of documents scanned successfully
    pub document_count: usize,
    /// Documents that were skipped, in scan order
    pub skipped: Vec<SkippedDocument>,
}

impl ScanResult {
    /// Create an empty result.
    pub fn new() -> Self {
        Self::default()
    }
}
