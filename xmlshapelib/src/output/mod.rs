//! Output formatting: present path statistics as tables.
//!
//! This module handles the fourth and final stage of the pipeline -
//! formatting query results for display. It provides:
//!
//! - **PathTable**: Table-ready data structure with headers, rows, and footer
//! - **TableRow**: Individual row with label and formatted values
//! - **TableLayout**: Which columns follow the path
//!
//! ## Example
//!
//! ```rust,ignore
//! use xmlshapelib::output::{PathTable, TableLayout};
//!
//! let table = PathTable::from_queryset(&queryset, TableLayout::Report);
//! print!("{}", table.to_tsv());
//! // mods/titleInfo/title\tSome title\t120\t3\tuuid-0001
//! ```

pub mod table;

pub use table::{PathTable, TableLayout, TableRow};
