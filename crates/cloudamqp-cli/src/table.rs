// Copyright (C) 2025 SyncMyOrders Sp. z o.o.
// SPDX-License-Identifier: AGPL-3.0-or-later
//! Column-aligned text tables.
//!
//! Columns grow to fit the widest header or cell seen so far. Padding is
//! added when rendering, from the stored raw widths, so rendering the same
//! table twice gives the same bytes.

use std::fmt::Write as _;
use std::io::{self, Write};

use thiserror::Error;

/// Extra characters added to every column at render time.
pub const COLUMN_PADDING: usize = 2;

/// Errors raised while filling a table.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TableError {
    /// A row had a different number of cells than the table has columns.
    #[error("expected {expected} columns, got {actual}")]
    ColumnCountMismatch { expected: usize, actual: usize },
}

#[derive(Debug, Clone)]
struct Column {
    header: String,
    /// Longest header or cell, in characters, without padding.
    width: usize,
}

/// Accumulates rows and prints them as a left-justified table.
pub struct TablePrinter<W: Write> {
    columns: Vec<Column>,
    rows: Vec<Vec<String>>,
    writer: W,
}

impl<W: Write> TablePrinter<W> {
    /// Create a table with one column per header, printing to `writer`.
    pub fn new<I, S>(writer: W, headers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let columns = headers
            .into_iter()
            .map(|h| {
                let header = h.into();
                Column {
                    width: char_len(&header),
                    header,
                }
            })
            .collect();

        Self {
            columns,
            rows: Vec::new(),
            writer,
        }
    }

    /// Append a row. The table is left untouched if the cell count is wrong.
    pub fn add_row<I, S>(&mut self, values: I) -> Result<(), TableError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let row: Vec<String> = values.into_iter().map(Into::into).collect();
        if row.len() != self.columns.len() {
            return Err(TableError::ColumnCountMismatch {
                expected: self.columns.len(),
                actual: row.len(),
            });
        }

        for (column, value) in self.columns.iter_mut().zip(&row) {
            column.width = column.width.max(char_len(value));
        }
        self.rows.push(row);
        Ok(())
    }

    /// Number of data rows.
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Rendered width of every column, padding included.
    pub fn column_widths(&self) -> Vec<usize> {
        self.columns
            .iter()
            .map(|c| c.width + COLUMN_PADDING)
            .collect()
    }

    /// Render header, separator and rows, one line each.
    ///
    /// The separator under each header is as long as the header text, not the
    /// column.
    pub fn render(&self) -> String {
        let widths = self.column_widths();
        let mut out = String::new();

        push_line(
            &mut out,
            &widths,
            self.columns.iter().map(|c| c.header.as_str()),
        );

        let separators: Vec<String> = self
            .columns
            .iter()
            .map(|c| "-".repeat(char_len(&c.header)))
            .collect();
        push_line(&mut out, &widths, separators.iter().map(String::as_str));

        for row in &self.rows {
            push_line(&mut out, &widths, row.iter().map(String::as_str));
        }

        out
    }

    /// Write the rendered table to the sink.
    pub fn print(&mut self) -> io::Result<()> {
        let rendered = self.render();
        self.writer.write_all(rendered.as_bytes())?;
        self.writer.flush()
    }

    /// Give back the sink.
    pub fn into_inner(self) -> W {
        self.writer
    }
}

fn push_line<'a>(out: &mut String, widths: &[usize], cells: impl Iterator<Item = &'a str>) {
    for (i, (cell, width)) in cells.zip(widths).enumerate() {
        if i > 0 {
            out.push(' ');
        }
        // Writing into a String cannot fail.
        let _ = write!(out, "{:<width$}", cell, width = *width);
    }
    out.push('\n');
}

fn char_len(s: &str) -> usize {
    s.chars().count()
}
