//! Layout of string grids: tab-delimited, tab-aligned and width-aligned rich tables.

use std::io::Write;

use derive_setters::Setters;
use owo_colors::OwoColorize;
use tracing::trace;
use unicode_width::UnicodeWidthStr;

use crate::domain::{COL_PADDING, MAX_COL_WIDTH, TAB_WIDTH, ViewError};
use crate::format::truncate;
use crate::pager;

/// Rows of cells. Row 0 is the header unless headers are omitted.
pub type TableData = Vec<Vec<String>>;

/// Display options a view is rendered with.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DisplayFormat {
    /// Tab-delimited output without color, truncation or pager.
    pub plain: bool,
    /// Drop the header row. Only honored together with `plain`.
    pub no_headers: bool,
    /// Requested column names, empty for the defaults.
    pub columns: Vec<String>,
}

impl DisplayFormat {
    pub fn with_header(&self) -> bool {
        !(self.plain && self.no_headers)
    }
}

/// Writes every row as tab separated cells, one row per line.
pub fn render_plain<W: Write>(w: &mut W, data: &TableData) -> Result<(), ViewError> {
    for row in data {
        writeln!(w, "{}", row.join("\t"))?;
    }
    w.flush()?;
    Ok(())
}

/// Aligns cells on tab stops of `TAB_WIDTH`, the way the version and team listings print.
pub fn tab_align(data: &TableData) -> String {
    let ncols = data.iter().map(Vec::len).max().unwrap_or(0);
    let mut widths = vec![0; ncols];
    for row in data {
        for (i, cell) in row.iter().enumerate() {
            widths[i] = widths[i].max(cell.width() + 1);
        }
    }
    // Round every column up to the next tab stop.
    for w in widths.iter_mut() {
        *w = w.div_ceil(TAB_WIDTH) * TAB_WIDTH;
    }

    let mut out = String::new();
    for row in data {
        let last = row.len().saturating_sub(1);
        for (i, cell) in row.iter().enumerate() {
            out.push_str(cell);
            if i != last {
                let tabs = (widths[i] - cell.width()).div_ceil(TAB_WIDTH);
                out.push_str(&"\t".repeat(tabs.max(1)));
            }
        }
        out.push('\n');
    }
    out
}

/// Width-aligned table for a terminal.
#[derive(Debug, Clone, Setters)]
#[setters(prefix = "with_", into)]
pub struct TableView {
    /// Spaces between two columns.
    pub col_padding: usize,
    /// Display width a column never exceeds.
    pub max_col_width: usize,
    /// Line printed below the table.
    pub footer_text: String,
    /// Style header and footer with ANSI colors.
    pub colored: bool,
}

impl Default for TableView {
    fn default() -> Self {
        Self {
            col_padding: COL_PADDING,
            max_col_width: MAX_COL_WIDTH,
            footer_text: String::new(),
            colored: true,
        }
    }
}

impl TableView {
    pub fn new() -> Self {
        Self::default()
    }

    /// Lays out `data` and hands it to the pager.
    pub fn render(&self, data: &TableData) -> Result<(), ViewError> {
        pager::page_out(&self.layout(data))
    }

    /// Display width of every column, capped at `max_col_width`.
    pub fn column_widths(&self, data: &[Vec<String>]) -> Vec<usize> {
        let ncols = data.first().map(Vec::len).unwrap_or(0);
        let mut widths = vec![0; ncols];
        for row in data {
            for (w, cell) in widths.iter_mut().zip(row) {
                *w = (*w).max(cell.width().min(self.max_col_width));
            }
        }
        widths
    }

    /// The fully rendered block: rows, then the footer.
    pub fn layout(&self, data: &TableData) -> String {
        let widths = self.column_widths(data);
        trace!("Column widths: {widths:?}");
        let padding = " ".repeat(self.col_padding);

        let mut out = String::new();
        for (ridx, row) in data.iter().enumerate() {
            let mut line = String::new();
            let last = row.len().saturating_sub(1);
            for (cidx, (cell, width)) in row.iter().zip(&widths).enumerate() {
                let text = truncate(cell, *width);
                let fill = width.saturating_sub(text.width());
                if ridx == 0 && self.colored {
                    line.push_str(&text.bold().underline().to_string());
                } else {
                    line.push_str(&text);
                }
                if cidx != last {
                    line.push_str(&" ".repeat(fill));
                    line.push_str(&padding);
                }
            }
            out.push_str(line.trim_end());
            out.push('\n');
        }

        if !self.footer_text.is_empty() {
            out.push('\n');
            if self.colored {
                out.push_str(&self.footer_text.dimmed().to_string());
            } else {
                out.push_str(&self.footer_text);
            }
            out.push('\n');
        }
        out
    }
}
