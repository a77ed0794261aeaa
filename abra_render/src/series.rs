// Copyright 2025 the Abra Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Category/series extraction for the header-row chart kinds.
//!
//! Bar, line, and area charts all read the table the same way: row 0 names
//! the series (column 0 is the category axis header), each later row is one
//! category with one value per series. This module centralizes that read,
//! the row-dropping rules, and the two value-domain flavors the variants
//! disagree on.

use abra_charts::{AnnotationContext, DEFAULT_TEMPLATE, format_annotation};
use abra_core::Table;
use abra_style::StyleState;
use tracing::trace;

use crate::ViewState;

/// Formats a data value for labels and tooltips: integers without a decimal
/// point, other values with trailing zeros trimmed.
pub(crate) fn format_value(v: f64) -> String {
    if !v.is_finite() {
        return String::new();
    }
    if v == v.trunc() && v.abs() < 1e15 {
        return format!("{}", v as i64);
    }
    let s = format!("{v:.2}");
    s.trim_end_matches('0').trim_end_matches('.').to_owned()
}

/// The tooltip text for one data point, or `None` when annotations are off.
///
/// A non-blank custom template always wins; otherwise the chart kind's
/// `default` template applies.
pub(crate) fn hover_text_with(
    style: &StyleState,
    default: &str,
    ctx: &AnnotationContext,
) -> Option<String> {
    style.show_annotations.then(|| {
        let template = if style.custom_annotation.trim().is_empty() {
            default
        } else {
            &style.custom_annotation
        };
        format_annotation(template, ctx)
    })
}

/// [`hover_text_with`] using the shared `{name}: {value}` default.
pub(crate) fn hover_text(style: &StyleState, ctx: &AnnotationContext) -> Option<String> {
    hover_text_with(style, DEFAULT_TEMPLATE, ctx)
}

/// One value column extracted from the table.
#[derive(Clone, Debug)]
pub(crate) struct SeriesColumn {
    /// The header label of the column.
    pub name: String,
    /// One value per kept category row; non-numeric cells are `NaN`.
    pub values: Vec<f64>,
    /// Whether the legend currently shows this series.
    pub visible: bool,
}

/// The extracted categories and series of a header-row table.
#[derive(Clone, Debug, Default)]
pub(crate) struct CategoryFrame {
    /// Category labels, in row order.
    pub categories: Vec<String>,
    /// Value columns, in header order.
    pub series: Vec<SeriesColumn>,
}

impl CategoryFrame {
    /// Extracts the frame from a table.
    ///
    /// Rows with a blank category label are dropped, as are rows whose
    /// values are all non-numeric. Rows of zeros are data and stay. Columns
    /// with a blank header get a positional fallback name so the legend and
    /// color slots stay stable.
    pub fn extract(table: &Table, view: &ViewState) -> Self {
        if table.row_count() == 0 {
            return Self::default();
        }
        let cols = table.row(0).map_or(0, <[_]>::len);
        if cols < 2 {
            return Self::default();
        }

        let mut series: Vec<SeriesColumn> = (1..cols)
            .map(|c| {
                let header = table.text(0, c);
                let name = if header.trim().is_empty() {
                    format!("Series {c}")
                } else {
                    header.trim().to_owned()
                };
                let visible = view.is_visible(&name);
                SeriesColumn {
                    name,
                    values: Vec::new(),
                    visible,
                }
            })
            .collect();

        let mut categories = Vec::new();
        for r in table.data_rows() {
            let label = table.text(r, 0);
            let label = label.trim();
            if label.is_empty() {
                trace!(row = r, "dropping row with blank category label");
                continue;
            }
            let values: Vec<f64> = (1..cols).map(|c| table.number(r, c)).collect();
            if values.iter().all(|v| v.is_nan()) {
                trace!(row = r, label, "dropping row with no numeric values");
                continue;
            }
            categories.push(label.to_owned());
            for (col, v) in series.iter_mut().zip(values) {
                col.values.push(v);
            }
        }

        Self { categories, series }
    }

    /// Whether no plottable rows survived extraction.
    pub fn is_empty(&self) -> bool {
        self.categories.is_empty()
    }

    /// Iterates only the series the legend currently shows.
    pub fn visible_series(&self) -> impl Iterator<Item = &SeriesColumn> {
        self.series.iter().filter(|s| s.visible)
    }

    /// The maximum finite value across every series, hidden or not.
    ///
    /// Line and area charts scale their value axis with this so toggling a
    /// series never re-scales the remaining ones.
    pub fn max_value_all(&self) -> f64 {
        self.series
            .iter()
            .flat_map(|s| s.values.iter())
            .copied()
            .filter(|v| v.is_finite())
            .fold(0.0, f64::max)
    }

    /// The maximum finite value across visible series only.
    ///
    /// Bar charts rescale to the visible data when a series is toggled off.
    pub fn max_value_visible(&self) -> f64 {
        self.visible_series()
            .flat_map(|s| s.values.iter())
            .copied()
            .filter(|v| v.is_finite())
            .fold(0.0, f64::max)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn frame(rows: &[&[&str]]) -> CategoryFrame {
        let table = Table::from_strings(rows.iter().map(|r| r.iter().copied()));
        CategoryFrame::extract(&table, &ViewState::new())
    }

    #[test]
    fn extracts_headers_and_rows() {
        let f = frame(&[
            &["Category", "A", "B"],
            &["x", "2", "5"],
            &["y", "0", "0"],
        ]);
        assert_eq!(f.categories, ["x", "y"]);
        assert_eq!(f.series.len(), 2);
        assert_eq!(f.series[0].name, "A");
        assert_eq!(f.series[0].values, [2.0, 0.0]);
        assert_eq!(f.series[1].values, [5.0, 0.0]);
    }

    #[test]
    fn zero_rows_stay_and_blank_or_nonnumeric_rows_drop() {
        let f = frame(&[
            &["Category", "A", "B"],
            &["x", "2", "5"],
            &["y", "0", "0"],
            &["z", "", "3"],
            &["", "9", "9"],
            &["w", "abc", ""],
        ]);
        // "y" is all zeros (kept), "z" is partially numeric (kept),
        // blank label and wholly non-numeric rows drop.
        assert_eq!(f.categories, ["x", "y", "z"]);
        assert!(f.series[0].values[2].is_nan());
        assert_eq!(f.series[1].values[2], 3.0);
    }

    #[test]
    fn visible_max_follows_legend_toggles() {
        let table = Table::from_strings([
            ["Category", "A", "B"],
            ["x", "2", "5"],
            ["y", "3", "1"],
        ]);
        let mut view = ViewState::new();
        let all = CategoryFrame::extract(&table, &view);
        assert_eq!(all.max_value_all(), 5.0);
        assert_eq!(all.max_value_visible(), 5.0);

        view.toggle_series("B");
        let filtered = CategoryFrame::extract(&table, &view);
        assert_eq!(filtered.max_value_all(), 5.0);
        assert_eq!(filtered.max_value_visible(), 3.0);
    }

    #[test]
    fn empty_and_header_only_tables_yield_empty_frames() {
        assert!(frame(&[]).is_empty());
        assert!(frame(&[&["Category", "A"]]).is_empty());
    }

    #[test]
    fn custom_template_beats_the_kind_default() {
        let ctx = AnnotationContext::new().field("name", "Alma").field("value", "3");
        let mut style = abra_style::StyleState::studio_default();
        assert_eq!(
            hover_text_with(&style, "{value} ({name})", &ctx).as_deref(),
            Some("3 (Alma)")
        );
        style.custom_annotation = "{name}!".to_owned();
        assert_eq!(
            hover_text_with(&style, "{value} ({name})", &ctx).as_deref(),
            Some("Alma!")
        );
    }

    #[test]
    fn blank_headers_get_positional_names() {
        let f = frame(&[&["Category", "", "B"], &["x", "1", "2"]]);
        assert_eq!(f.series[0].name, "Series 1");
        assert_eq!(f.series[1].name, "B");
    }
}
