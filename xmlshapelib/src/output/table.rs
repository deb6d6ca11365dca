//! Table-ready data structures for path reports.
//!
//! This module provides `PathTable`, a presentation-ready data structure
//! that can be printed as the tab-separated report, rendered as an aligned
//! table, or serialized to JSON.
//!
//! The data flow is:
//! 1. Raw Data (ScanResult)
//! 2. QuerySet (filtered, sorted)
//! 3. PathTable (formatted strings for display)
//!
//! PathTable is a pure presentation layer - it only formats data, no filtering
//! or sorting logic. All computation happens in the QuerySet layer.

use serde::{Deserialize, Serialize};

use crate::data::stats::PathEntry;
use crate::query::queryset::PathQuerySet;

/// Which columns a table carries after the path.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum TableLayout {
    /// Sample, Occurrences, Max/File, Sample File
    #[default]
    Report,
    /// Report columns plus the document that reached Max/File
    Detailed,
}

/// A single row in the table (data row or footer).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TableRow {
    /// Row label (path key, or the summary for the footer)
    pub label: String,
    /// Values for each column after the label (as strings, ready for display)
    pub values: Vec<String>,
}

/// Table-ready path statistics.
///
/// This is the final data structure before presentation. Renderers iterate
/// over headers/rows/footer and apply formatting - no computation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PathTable {
    /// Column headers: [Path, Sample, Occurrences, Max/File, ...]
    pub headers: Vec<String>,
    /// Data rows
    pub rows: Vec<TableRow>,
    /// Summary row
    pub footer: TableRow,
}

impl PathTable {
    /// Create a PathTable from a PathQuerySet.
    pub fn from_queryset(qs: &PathQuerySet, layout: TableLayout) -> Self {
        let rows = qs
            .items
            .iter()
            .map(|item| TableRow {
                label: item.label.clone(),
                values: format_entry(&item.entry, layout),
            })
            .collect();

        PathTable {
            headers: build_headers(layout),
            rows,
            footer: TableRow {
                label: build_footer_label(qs),
                values: Vec::new(),
            },
        }
    }

    /// The tab-separated report: one line per row, no header or footer.
    ///
    /// Tabs and line breaks inside a field are written as `\t`, `\r` and
    /// `\n` so that every row stays on one line with a fixed number of
    /// fields. Backslashes are left alone, so the escaping is not reversible
    /// for values that already contain one of those sequences.
    pub fn to_tsv(&self) -> String {
        let mut out = String::new();
        for row in &self.rows {
            out.push_str(&escape_field(&row.label));
            for value in &row.values {
                out.push('\t');
                out.push_str(&escape_field(value));
            }
            out.push('\n');
        }
        out
    }
}

fn build_headers(layout: TableLayout) -> Vec<String> {
    let mut headers = vec!["Path", "Sample", "Occurrences", "Max/File"];
    if layout == TableLayout::Detailed {
        headers.push("Max File");
    }
    headers.push("Sample File");
    headers.into_iter().map(String::from).collect()
}

fn format_entry(entry: &PathEntry, layout: TableLayout) -> Vec<String> {
    let mut values = vec![
        entry.sample_value().to_string(),
        entry.stats.occurrences.to_string(),
        entry.stats.max_per_file.to_string(),
    ];
    if layout == TableLayout::Detailed {
        values.push(entry.stats.max_file.clone());
    }
    values.push(entry.sample_file().to_string());
    values
}

fn build_footer_label(qs: &PathQuerySet) -> String {
    let mut label = format!(
        "Total ({} of {} paths, {} documents",
        qs.items.len(),
        qs.path_count,
        qs.document_count
    );
    if qs.skipped_count > 0 {
        label.push_str(&format!(", {} skipped", qs.skipped_count));
    }
    label.push(')');
    label
}

fn escape_field(field: &str) -> String {
    if !field.contains(['\t', '\n', '\r']) {
        return field.to_string();
    }
    let mut out = String::with_capacity(field.len() + 4);
    for c in field.chars() {
        match c {
            '\t' => out.push_str("\\t"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            _ => out.push(c),
        }
    }
    out
}
