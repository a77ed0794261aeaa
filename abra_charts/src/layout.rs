// Copyright 2025 the Abra Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Margin and plotting-area computation.
//!
//! Given the container's pixel size and the style toggles that consume edge
//! space, this computes the four margins and the inner plotting rectangle
//! shared by every renderer kind. The inner size is floored so a
//! pathologically small container can never produce a negative or zero
//! range (which would explode scale domains downstream).

use kurbo::Rect;

/// Minimum usable inner width/height in pixels.
pub(crate) const MIN_INNER: f64 = 10.0;

/// Base padding applied on every side.
pub const BASE_PADDING: f64 = 10.0;
/// Height of the legend strip when the legend is enabled.
pub const LEGEND_STRIP_HEIGHT: f64 = 28.0;
/// Height reserved for axis tick labels + axis title below the plot.
const AXIS_LABEL_HEIGHT: f64 = 34.0;
/// Height reserved for the footer line.
pub const FOOTER_HEIGHT: f64 = 22.0;
/// Extra left margin when a y-axis label is shown.
const Y_AXIS_LABEL_WIDTH: f64 = 26.0;
/// Default left margin for value-axis tick labels.
const VALUE_TICKS_WIDTH: f64 = 36.0;

/// The inputs that consume edge space around the plot.
///
/// The renderer derives this from the style state; the layout math itself is
/// style-agnostic.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct MarginSpec {
    /// Title font size, when a title is set.
    pub title_font_size: Option<f64>,
    /// Article (rich subtitle) font size, when article text is set.
    pub article_font_size: Option<f64>,
    /// Whether the legend strip is shown above the plot.
    pub legend: bool,
    /// Whether axis tick labels (and the x-axis title) are shown.
    pub axis_labels: bool,
    /// Whether a y-axis title widens the left margin.
    pub y_axis_label: bool,
    /// Whether the footer line is shown below the plot.
    pub footer: bool,
}

/// Computed margins plus the inner plotting rectangle.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ChartMargins {
    /// Top margin in pixels.
    pub top: f64,
    /// Right margin in pixels.
    pub right: f64,
    /// Bottom margin in pixels.
    pub bottom: f64,
    /// Left margin in pixels.
    pub left: f64,
    /// Inner plotting-area width (>= the minimum floor).
    pub inner_width: f64,
    /// Inner plotting-area height (>= the minimum floor).
    pub inner_height: f64,
}

impl ChartMargins {
    /// Computes margins for a container size and the given spec.
    ///
    /// Top accumulates base padding, the title block (proportional to its
    /// font size), the article block, and the legend strip. Bottom
    /// accumulates base padding, axis labels, and the footer. Left widens
    /// for the y-axis title.
    pub fn compute(container_width: f64, container_height: f64, spec: &MarginSpec) -> Self {
        let mut top = BASE_PADDING;
        if let Some(size) = spec.title_font_size {
            top += title_block_height(size);
        }
        if let Some(size) = spec.article_font_size {
            top += article_block_height(size);
        }
        if spec.legend {
            top += LEGEND_STRIP_HEIGHT;
        }

        let mut bottom = BASE_PADDING;
        if spec.axis_labels {
            bottom += AXIS_LABEL_HEIGHT;
        }
        if spec.footer {
            bottom += FOOTER_HEIGHT;
        }

        let mut left = BASE_PADDING;
        if spec.axis_labels {
            left += VALUE_TICKS_WIDTH;
        }
        if spec.y_axis_label {
            left += Y_AXIS_LABEL_WIDTH;
        }

        let right = BASE_PADDING;

        let inner_width = (container_width.max(0.0) - left - right).max(MIN_INNER);
        let inner_height = (container_height.max(0.0) - top - bottom).max(MIN_INNER);

        Self {
            top,
            right,
            bottom,
            left,
            inner_width,
            inner_height,
        }
    }

    /// The inner plotting rectangle in container coordinates.
    pub fn plot_rect(&self) -> Rect {
        Rect::new(
            self.left,
            self.top,
            self.left + self.inner_width,
            self.top + self.inner_height,
        )
    }
}

/// Height of the title block for a given title font size.
pub fn title_block_height(font_size: f64) -> f64 {
    font_size.max(0.0) * 1.6 + 8.0
}

/// Height of the article block for a given article font size.
pub fn article_block_height(font_size: f64) -> f64 {
    // The article is a short rich-text paragraph; reserve three lines.
    font_size.max(0.0) * 3.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn margins_accumulate_per_toggle() {
        let bare = ChartMargins::compute(600.0, 400.0, &MarginSpec::default());
        let full = ChartMargins::compute(
            600.0,
            400.0,
            &MarginSpec {
                title_font_size: Some(24.0),
                article_font_size: Some(14.0),
                legend: true,
                axis_labels: true,
                y_axis_label: true,
                footer: true,
            },
        );

        assert!(full.top > bare.top);
        assert!(full.bottom > bare.bottom);
        assert!(full.left > bare.left);
        assert_eq!(full.right, bare.right);
        assert!(full.inner_width < bare.inner_width);
        assert!(full.inner_height < bare.inner_height);
    }

    #[test]
    fn inner_size_never_collapses() {
        let spec = MarginSpec {
            title_font_size: Some(40.0),
            article_font_size: Some(20.0),
            legend: true,
            axis_labels: true,
            y_axis_label: true,
            footer: true,
        };
        let m = ChartMargins::compute(5.0, 3.0, &spec);
        assert!(m.inner_width >= MIN_INNER);
        assert!(m.inner_height >= MIN_INNER);
    }

    #[test]
    fn plot_rect_matches_margins() {
        let m = ChartMargins::compute(600.0, 400.0, &MarginSpec::default());
        let r = m.plot_rect();
        assert_eq!(r.x0, m.left);
        assert_eq!(r.y0, m.top);
        assert_eq!(r.width(), m.inner_width);
        assert_eq!(r.height(), m.inner_height);
    }
}
