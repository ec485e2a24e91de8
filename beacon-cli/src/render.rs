//! Output rendering
//!
//! Turns [`TableRenderable`] values into text for the terminal. Rendering
//! returns strings; printing is left to the command handlers.

use anyhow::{Context, Result};
use beacon_core::presenter::{
    CREATED_AT_ABSENT, CREATED_AT_UNKNOWN, DAG_ERROR_TASK, TableRenderable,
};
use colored::*;
use serde_json::{Map, Value};

const COLUMN_GAP: &str = "  ";

/// Render as a column-aligned table
///
/// Cells are padded to the widest cell of their column. Colors are applied
/// after padding so escape codes do not affect alignment.
pub fn render_table(table: &impl TableRenderable, color: bool) -> String {
    let headers = table.headers();
    let rows = table.rows();

    let mut widths: Vec<usize> = headers.iter().map(|h| h.chars().count()).collect();
    for row in &rows {
        for (i, cell) in row.iter().enumerate() {
            if let Some(width) = widths.get_mut(i) {
                *width = (*width).max(cell.chars().count());
            }
        }
    }

    let mut out = String::new();

    let header_line: Vec<String> = headers
        .iter()
        .zip(&widths)
        .map(|(header, width)| {
            let padded = pad(header, *width);
            if color { padded.bold().to_string() } else { padded }
        })
        .collect();
    out.push_str(header_line.join(COLUMN_GAP).trim_end());
    out.push('\n');

    for row in &rows {
        let line: Vec<String> = row
            .iter()
            .zip(&widths)
            .map(|(cell, width)| {
                let padded = pad(cell, *width);
                if color { colorize(cell, padded) } else { padded }
            })
            .collect();
        out.push_str(line.join(COLUMN_GAP).trim_end());
        out.push('\n');
    }

    out
}

/// Render rows as a JSON array of objects keyed by column header
pub fn render_json(table: &impl TableRenderable) -> Result<String> {
    let headers = table.headers();
    let rows: Vec<Value> = table
        .rows()
        .into_iter()
        .map(|row| {
            let object: Map<String, Value> = headers
                .iter()
                .zip(row)
                .map(|(header, cell)| (header.to_string(), Value::String(cell)))
                .collect();
            Value::Object(object)
        })
        .collect();

    serde_json::to_string_pretty(&rows).context("Failed to serialize rows")
}

fn pad(cell: &str, width: usize) -> String {
    format!("{:<width$}", cell, width = width)
}

/// Highlight sentinel values
fn colorize(cell: &str, padded: String) -> String {
    match cell {
        DAG_ERROR_TASK => padded.red().to_string(),
        CREATED_AT_ABSENT | CREATED_AT_UNKNOWN => padded.yellow().to_string(),
        _ => padded,
    }
}
