//! Template rendering for CLI output using outstanding

use console::Style;
use outstanding::{render_auto, render_with_output, Theme};
use serde::Serialize;
use xmlshapelib::{PathQuerySet, PathTable, TableRow};

/// Include template at compile time
const PATH_TABLE_TEMPLATE: &str = include_str!("../templates/path_table.jinja");

/// Re-export OutputMode for callers
pub use outstanding::OutputMode;

/// Widest a path cell may get in table output
const PATH_WIDTH: usize = 60;
/// Widest a sample cell may get in table output
const SAMPLE_WIDTH: usize = 40;
/// Columns holding counts, right-aligned in table output
const NUMERIC_COLUMNS: [&str; 2] = ["Occurrences", "Max/File"];

/// Data context for the path table template (pre-formatted lines)
#[derive(Debug, Serialize)]
struct PathTableContext {
    /// Padded column headers
    header: String,
    /// Separator line (dashes)
    separator: String,
    /// Padded data rows
    rows: Vec<String>,
    /// Summary line
    footer: String,
}

/// Map an `--output` value to an outstanding mode.
///
/// `tsv` has no mode: it is written by [`PathTable::to_tsv`] directly.
pub fn output_mode(name: &str) -> Result<Option<OutputMode>, String> {
    match name.to_lowercase().as_str() {
        "tsv" => Ok(None),
        "table" => Ok(Some(OutputMode::Auto)),
        "term" => Ok(Some(OutputMode::Term)),
        "text" => Ok(Some(OutputMode::Text)),
        "json" => Ok(Some(OutputMode::Json)),
        _ => Err(format!("Unknown output format: {}", name)),
    }
}

/// Create the theme with styles
fn create_theme() -> Theme {
    Theme::new().add("category", Style::new().bold())
}

/// Render a report. Without a mode the tab-separated report is produced.
pub fn render(
    qs: &PathQuerySet,
    table: &PathTable,
    mode: Option<OutputMode>,
) -> Result<String, Box<dyn std::error::Error>> {
    let Some(mode) = mode else {
        return Ok(table.to_tsv());
    };

    let theme = create_theme();
    let mut rendered = if matches!(mode, OutputMode::Json) {
        render_auto(PATH_TABLE_TEMPLATE, qs, &theme, mode)?
    } else {
        render_with_output(PATH_TABLE_TEMPLATE, &table_context(table), &theme, mode)?
    };

    if !rendered.ends_with('\n') {
        rendered.push('\n');
    }
    Ok(rendered)
}

/// Truncate a name to fit within max_len, adding ".." prefix if needed
fn truncate_start(name: &str, max_len: usize) -> String {
    let len = name.chars().count();
    if len > max_len {
        let tail: String = name.chars().skip(len - max_len + 2).collect();
        format!("..{}", tail)
    } else {
        name.to_string()
    }
}

/// Truncate a value to fit within max_len, adding ".." suffix if needed
fn truncate_end(value: &str, max_len: usize) -> String {
    if value.chars().count() > max_len {
        let head: String = value.chars().take(max_len - 2).collect();
        format!("{}..", head)
    } else {
        value.to_string()
    }
}

/// Flatten line breaks so every row stays on one line.
fn single_line(value: &str) -> String {
    value
        .chars()
        .map(|c| if c.is_control() { ' ' } else { c })
        .collect()
}

/// Pre-format the cells of a row, truncated to fit their column.
fn row_cells(row: &TableRow, headers: &[String]) -> Vec<String> {
    let mut cells = vec![truncate_start(&row.label, PATH_WIDTH)];
    for (header, value) in headers.iter().skip(1).zip(&row.values) {
        let value = single_line(value);
        if header == "Sample" {
            cells.push(truncate_end(&value, SAMPLE_WIDTH));
        } else {
            cells.push(value);
        }
    }
    cells
}

/// Pad cells to their column widths and join them into one line.
fn format_line(cells: &[String], widths: &[usize], right: &[bool]) -> String {
    let padded: Vec<String> = cells
        .iter()
        .zip(widths)
        .zip(right)
        .map(|((cell, width), right_align)| {
            if *right_align {
                format!("{:>width$}", cell, width = width)
            } else {
                format!("{:<width$}", cell, width = width)
            }
        })
        .collect();
    padded.join("  ").trim_end().to_string()
}

/// Pre-format every line of the table for the template.
fn table_context(table: &PathTable) -> PathTableContext {
    let rows: Vec<Vec<String>> = table
        .rows
        .iter()
        .map(|r| row_cells(r, &table.headers))
        .collect();

    let widths: Vec<usize> = table
        .headers
        .iter()
        .enumerate()
        .map(|(i, header)| {
            rows.iter()
                .filter_map(|cells| cells.get(i))
                .map(|c| c.chars().count())
                .chain(std::iter::once(header.chars().count()))
                .max()
                .unwrap_or(0)
        })
        .collect();
    let right: Vec<bool> = table
        .headers
        .iter()
        .map(|h| NUMERIC_COLUMNS.contains(&h.as_str()))
        .collect();

    let line_width = widths.iter().sum::<usize>() + 2 * widths.len().saturating_sub(1);

    PathTableContext {
        header: format_line(&table.headers, &widths, &right),
        separator: "-".repeat(line_width),
        rows: rows
            .iter()
            .map(|cells| format_line(cells, &widths, &right))
            .collect(),
        footer: table.footer.label.clone(),
    }
}
