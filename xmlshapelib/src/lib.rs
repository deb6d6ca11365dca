//! # xmlshapelib
//!
//! Discover which element and attribute paths actually occur across a corpus
//! of XML records, how often, and with what typical content.
//!
//! ## Overview
//!
//! Metadata records produced by hand or by export pipelines (MODS, in the
//! case this library was written for) rarely use the whole schema, and
//! often use parts of it in unexpected ways. This library walks every
//! document of a corpus and builds a table keyed by structural path
//! (`mods/titleInfo/title`, `mods/name/@type/personal`, ...) with:
//!
//! - **Occurrences**: How many times the path occurs across the corpus
//! - **Max/File**: The most times it occurs inside a single document, and which
//! - **Sample**: The first non-empty value seen for it, and where
//!
//! ## Features
//!
//! - **Namespace-agnostic paths**: Tags are reduced to their local names
//! - **Value-level attribute keys**: Attribute values are folded into the key,
//!   with controlled-vocabulary term URIs collapsed to one wildcard entry
//! - **Fault tolerant**: Malformed documents are skipped and reported
//! - **UTF-8 only**: Records in other encodings (ISO-8859-1 MODS, say) are
//!   skipped with an encoding error rather than transcoded
//! - **Deterministic**: Documents are scanned in sorted order, so "first seen"
//!   results are reproducible
//!
//! ## Example
//!
//! ```rust
//! use xmlshapelib::{scan_paths, Ordering, PathKinds, PathQuerySet, PathTable, ScanOptions, TableLayout};
//! use std::fs;
//! use tempfile::tempdir;
//!
//! let dir = tempdir().unwrap();
//! fs::write(dir.path().join("rec1.xml"), r#"<mods><titleInfo type="alternative"><title>Maps</title></titleInfo></mods>"#).unwrap();
//! fs::write(dir.path().join("rec2.xml"), r#"<mods><titleInfo><title>Atlas</title></titleInfo></mods>"#).unwrap();
//!
//! let result = scan_paths(&[dir.path()], &ScanOptions::new()).unwrap();
//! let title = result.stats.get("mods/titleInfo/title").unwrap();
//! assert_eq!(title.stats.occurrences, 2);
//! assert_eq!(title.sample_value(), "Maps");
//!
//! let qs = PathQuerySet::from_result(&result, PathKinds::all(), 0, Ordering::default());
//! let report = PathTable::from_queryset(&qs, TableLayout::Report).to_tsv();
//! assert!(report.contains("mods/titleInfo/@type/alternative\talternative\t1\t1\trec1\n"));
//! ```

pub mod data;
pub mod error;
pub mod output;
pub mod query;
pub mod source;

pub use data::{
    fold_file_into_corpus, scan_directory, scan_documents, scan_file, scan_paths, CorpusStats,
    FileCounters, PathAggregator, PathEntry, PathKind, PathStats, SampleRecord, ScanOptions,
    ScanResult, SkippedDocument, ValueNormalizer, NO_SAMPLE,
};
pub use error::XmlShapeError;
pub use output::{PathTable, TableLayout, TableRow};
pub use query::{
    AttributeEntryPolicy, AttributeKeys, OrderBy, OrderDirection, Ordering, PathKinds,
    PathQuerySet, QueryItem,
};
pub use source::{Corpus, FilterConfig, SourceDocument};

/// Result type for xmlshapelib operations
pub type Result<T> = std::result::Result<T, XmlShapeError>;
