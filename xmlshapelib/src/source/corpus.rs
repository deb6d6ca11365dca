//! Corpus loading: turn discovered files into documents ready to scan.
//!
//! Files are read lazily, one at a time, as the corpus is iterated. A file
//! that cannot be read still yields a [`SourceDocument`], carrying the error,
//! so the scan can record it and move on.

use std::fs;
use std::path::{Path, PathBuf};

use crate::error::XmlShapeError;
use crate::Result;

/// One document of the corpus, not yet parsed.
#[derive(Debug)]
pub struct SourceDocument {
    /// Document identifier (file name without extension)
    pub id: String,
    /// Where the document came from
    pub path: PathBuf,
    /// Raw XML text, or the error hit while reading it
    pub content: Result<String>,
}

impl SourceDocument {
    /// Build a document from in-memory text.
    pub fn from_text(id: impl Into<String>, text: impl Into<String>) -> Self {
        let id = id.into();
        Self {
            path: PathBuf::from(format!("{}.xml", id)),
            id,
            content: Ok(text.into()),
        }
    }

    /// Read a document from disk.
    ///
    /// Only UTF-8 input is supported. A file in another encoding (whatever
    /// its XML declaration says) carries an [`XmlShapeError::Encoding`] and
    /// is skipped by the scan, unless its bytes happen to be plain ASCII.
    pub fn read(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref();
        let content = fs::read(path)
            .map_err(|source| XmlShapeError::FileRead {
                path: path.to_path_buf(),
                source,
            })
            .and_then(|bytes| {
                String::from_utf8(bytes).map_err(|e| XmlShapeError::Encoding {
                    path: path.to_path_buf(),
                    message: e.utf8_error().to_string(),
                })
            });
        Self {
            id: document_id(path),
            path: path.to_path_buf(),
            content,
        }
    }
}

/// Derive a document identifier from a file path: the base name without
/// its extension.
pub fn document_id(path: &Path) -> String {
    path.file_stem()
        .map(|s| s.to_string_lossy().to_string())
        .unwrap_or_else(|| path.to_string_lossy().to_string())
}

/// Lazy sequence of documents read from a list of files.
#[derive(Debug, Clone)]
pub struct Corpus {
    files: std::vec::IntoIter<PathBuf>,
}

impl Corpus {
    /// Create a corpus over the given files, in the given order.
    pub fn new(files: Vec<PathBuf>) -> Self {
        Self {
            files: files.into_iter(),
        }
    }
}

impl Iterator for Corpus {
    type Item = SourceDocument;

    fn next(&mut self) -> Option<Self::Item> {
        self.files.next().map(SourceDocument::read)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.files.size_hint()
    }
}
