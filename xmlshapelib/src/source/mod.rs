//! Source discovery: find and load the documents to scan.
//!
//! This module handles the first stage of the pipeline - discovering which
//! XML files make up the corpus and reading them. It provides:
//!
//! - **File filtering**: Include/exclude files with glob patterns
//! - **Corpus loading**: A lazy sequence of documents, one per file
//!
//! ## Example
//!
//! ```rust,ignore
//! use xmlshapelib::source::{discover_files, Corpus, FilterConfig};
//!
//! let filter = FilterConfig::new().exclude("**/drafts/**")?;
//! let files = discover_files("output/xml/preserve", &filter, false)?;
//! for doc in Corpus::new(files) {
//!     println!("{}", doc.id);
//! }
//! ```

pub mod corpus;
pub mod filter;

pub use corpus::{document_id, Corpus, SourceDocument};
pub use filter::{discover_files, discover_files_in_dirs, FilterConfig};
