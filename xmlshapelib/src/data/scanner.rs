//! High-level corpus scanning API.
//!
//! This module provides the main entry points for scanning folders of XML
//! records, with support for glob filtering and the attribute-key options
//! of [`PathAggregator`].

use std::path::Path;

use crate::error::XmlShapeError;
use crate::query::options::{AttributeEntryPolicy, AttributeKeys};
use crate::source::{discover_files, discover_files_in_dirs, Corpus, FilterConfig, SourceDocument};
use crate::Result;

use super::aggregator::{parse_document, PathAggregator};
use super::path::ValueNormalizer;
use super::stats::ScanResult;

/// Options for scanning a corpus.
#[derive(Debug, Clone, Default)]
pub struct ScanOptions {
    /// File filter configuration
    pub file_filter: FilterConfig,
    /// Descend into subdirectories
    pub recursive: bool,
    /// How attribute keys are built
    pub attribute_keys: AttributeKeys,
    /// When new attribute entries are created
    pub entry_policy: AttributeEntryPolicy,
    /// Attribute value rewriting applied before keys are built
    pub normalizer: ValueNormalizer,
}

impl ScanOptions {
    /// Create new default options.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set file filter.
    pub fn filter(mut self, filter: FilterConfig) -> Self {
        self.file_filter = filter;
        self
    }

    /// Descend into subdirectories.
    pub fn recursive(mut self, recursive: bool) -> Self {
        self.recursive = recursive;
        self
    }

    /// Set attribute key style.
    pub fn attribute_keys(mut self, keys: AttributeKeys) -> Self {
        self.attribute_keys = keys;
        self
    }

    /// Set attribute entry policy.
    pub fn entry_policy(mut self, policy: AttributeEntryPolicy) -> Self {
        self.entry_policy = policy;
        self
    }

    /// Set attribute value normalizer.
    pub fn normalizer(mut self, normalizer: ValueNormalizer) -> Self {
        self.normalizer = normalizer;
        self
    }

    /// Build the aggregator these options describe.
    pub fn aggregator(&self) -> PathAggregator {
        PathAggregator::new()
            .attribute_keys(self.attribute_keys)
            .entry_policy(self.entry_policy)
            .normalizer(self.normalizer.clone())
    }
}

/// Scan the XML files of several folders as one corpus.
///
/// Folders are scanned in the order given, files within a folder in path
/// order. Unreadable or malformed files are skipped and reported in the
/// result; a folder that does not exist is an error.
///
/// # Example
///
/// ```rust
/// use xmlshapelib::{scan_paths, ScanOptions};
/// use std::fs;
/// use tempfile::tempdir;
///
/// let dir = tempdir().unwrap();
/// fs::write(dir.path().join("one.xml"), "<a><b>x</b><b>y</b></a>").unwrap();
/// fs::write(dir.path().join("broken.xml"), "<a><b></a>").unwrap();
///
/// let result = scan_paths(&[dir.path()], &ScanOptions::new()).unwrap();
/// assert_eq!(result.document_count, 1);
/// assert_eq!(result.skipped.len(), 1);
/// assert_eq!(result.stats.get("a/b").unwrap().stats.occurrences, 2);
/// ```
pub fn scan_paths<P: AsRef<Path>>(paths: &[P], options: &ScanOptions) -> Result<ScanResult> {
    let dirs: Vec<&Path> = paths.iter().map(|p| p.as_ref()).collect();
    let files = discover_files_in_dirs(&dirs, &options.file_filter, options.recursive)?;

    Ok(options.aggregator().scan_corpus(Corpus::new(files)))
}

/// Scan the XML files of a single folder.
pub fn scan_directory(path: impl AsRef<Path>, options: &ScanOptions) -> Result<ScanResult> {
    let files = discover_files(path, &options.file_filter, options.recursive)?;

    Ok(options.aggregator().scan_corpus(Corpus::new(files)))
}

/// Scan a single XML file.
///
/// Unlike the folder scans, a file that cannot be read or parsed is an
/// error here.
pub fn scan_file(path: impl AsRef<Path>, options: &ScanOptions) -> Result<ScanResult> {
    let path = path.as_ref();

    if !path.exists() {
        return Err(XmlShapeError::PathNotFound(path.to_path_buf()));
    }

    let source = SourceDocument::read(path);
    let text = source.content?;
    let doc = parse_document(&text).map_err(|e| XmlShapeError::Parse {
        path: path.to_path_buf(),
        message: e.to_string(),
    })?;

    let mut result = ScanResult::new();
    options
        .aggregator()
        .scan_document(&doc, &source.id, &mut result.stats);
    result.document_count = 1;

    Ok(result)
}

/// Scan in-memory documents, given as `(id, xml)` pairs, in order.
pub fn scan_documents<I, S, T>(documents: I, options: &ScanOptions) -> ScanResult
where
    I: IntoIterator<Item = (S, T)>,
    S: Into<String>,
    T: Into<String>,
{
    let sources = documents
        .into_iter()
        .map(|(id, xml)| SourceDocument::from_text(id, xml));
    options.aggregator().scan_corpus(sources)
}
