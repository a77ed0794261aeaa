// Copyright 2025 the Abra Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The tabular-rows data model.
//!
//! Imported spreadsheets arrive as an ordered grid of primitive cells. Most
//! chart kinds treat row 0 as a header row (category column + one column per
//! series); the geo/election kinds assign fixed semantic roles to column
//! positions instead. Renderers own those conventions — this module only
//! stores cells and coerces them to numbers on demand.
//!
//! Numeric coercion never fails: a cell that does not parse yields `NaN`,
//! and callers filter non-finite values before any domain computation.

/// A single spreadsheet cell.
#[derive(Clone, Debug, PartialEq)]
pub enum Cell {
    /// A textual cell.
    Text(String),
    /// A numeric cell.
    Number(f64),
    /// An empty cell.
    Empty,
}

impl Cell {
    /// Parses a raw imported string into a cell.
    ///
    /// Blank (or whitespace-only) strings become [`Cell::Empty`]. Strings
    /// that parse as a float become [`Cell::Number`]; everything else stays
    /// text.
    pub fn parse(raw: &str) -> Self {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Self::Empty;
        }
        match trimmed.parse::<f64>() {
            Ok(v) => Self::Number(v),
            Err(_) => Self::Text(String::from(trimmed)),
        }
    }

    /// Returns the cell's text content, if any.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::Text(s) => Some(s),
            Self::Number(_) | Self::Empty => None,
        }
    }

    /// Coerces the cell to a number, yielding `NaN` when it has none.
    pub fn to_f64(&self) -> f64 {
        match self {
            Self::Number(v) => *v,
            Self::Text(s) => s.trim().parse::<f64>().unwrap_or(f64::NAN),
            Self::Empty => f64::NAN,
        }
    }

    /// Whether the cell is empty.
    pub fn is_empty(&self) -> bool {
        matches!(self, Self::Empty)
    }
}

/// An ordered grid of cells, as produced by the import pipeline.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Table {
    rows: Vec<Vec<Cell>>,
}

impl Table {
    /// Creates a table from pre-built rows.
    pub fn new(rows: Vec<Vec<Cell>>) -> Self {
        Self { rows }
    }

    /// Builds a table by parsing a grid of raw strings.
    pub fn from_strings<R, C>(rows: R) -> Self
    where
        R: IntoIterator<Item = C>,
        C: IntoIterator,
        C::Item: AsRef<str>,
    {
        let rows = rows
            .into_iter()
            .map(|row| row.into_iter().map(|c| Cell::parse(c.as_ref())).collect())
            .collect();
        Self { rows }
    }

    /// Returns the number of rows (including any header row).
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// Returns the widest row length in the table.
    pub fn col_count(&self) -> usize {
        self.rows.iter().map(Vec::len).max().unwrap_or(0)
    }

    /// Returns a cell, or `None` when the position is out of bounds.
    pub fn cell(&self, row: usize, col: usize) -> Option<&Cell> {
        self.rows.get(row)?.get(col)
    }

    /// Returns a row slice, or `None` when out of bounds.
    pub fn row(&self, row: usize) -> Option<&[Cell]> {
        self.rows.get(row).map(Vec::as_slice)
    }

    /// Returns the cell's display text: textual content, a formatted number,
    /// or the empty string.
    pub fn text(&self, row: usize, col: usize) -> String {
        match self.cell(row, col) {
            Some(Cell::Text(s)) => s.clone(),
            Some(Cell::Number(v)) => format_number(*v),
            Some(Cell::Empty) | None => String::new(),
        }
    }

    /// Coerces a cell to a number; out-of-bounds positions yield `NaN`.
    pub fn number(&self, row: usize, col: usize) -> f64 {
        self.cell(row, col).map_or(f64::NAN, Cell::to_f64)
    }

    /// Iterates the header row (row 0) as display text.
    pub fn headers(&self) -> impl Iterator<Item = String> + '_ {
        let width = self.rows.first().map_or(0, Vec::len);
        (0..width).map(move |c| self.text(0, c))
    }

    /// Iterates data rows (row 1 onward) by index.
    pub fn data_rows(&self) -> impl Iterator<Item = usize> {
        1..self.row_count()
    }

    /// Whether the table has no data rows beyond the header.
    pub fn is_empty(&self) -> bool {
        self.row_count() <= 1
    }
}

/// Formats a number for display: integers without a decimal point, other
/// values with trailing zeros trimmed.
pub(crate) fn format_number(v: f64) -> String {
    if !v.is_finite() {
        return String::new();
    }
    if v == v.trunc() && v.abs() < 1e15 {
        return format!("{}", v as i64);
    }
    let mut s = format!("{v:.3}");
    while s.ends_with('0') {
        s.pop();
    }
    if s.ends_with('.') {
        s.pop();
    }
    s
}
