// Copyright 2025 the Abra Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The style-state record.

use serde::{Deserialize, Serialize};

/// Sentinel value for a transparent chart background.
pub const TRANSPARENT: &str = "transparent";

/// The full set of user-configurable presentation options for one
/// visualization, plus its workflow flags.
///
/// Fields are independently settable; the reducer is the only mutation
/// path during editing. The serialized shape (camelCase keys) matches the
/// backend's style JSON.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StyleState {
    /// Chart title.
    pub title: String,
    /// Article text: a short rich-text block under the title.
    pub article: String,
    /// Font family applied to all chart text.
    pub font_family: String,
    /// Title font size in pixels.
    pub title_font_size: f64,
    /// Article font size in pixels.
    pub article_font_size: f64,
    /// Text color as a hex string.
    pub text_color: String,
    /// Background color as a hex string, or [`TRANSPARENT`].
    pub background_color: String,
    /// Base series color as a hex string (single-series charts).
    pub bar_color: String,
    /// Series opacity, `0..=100`.
    pub bar_opacity: f64,
    /// Band spacing, `0..=100` (mapped to a `0..1` padding fraction).
    pub bar_spacing: f64,
    /// Palette key for multi-series color assignment.
    pub palette: String,
    /// Per-label color overrides, `"Label:#hex, Label:#hex"`.
    pub custom_colors: String,
    /// Whether gridlines are drawn.
    pub show_grid: bool,
    /// Whether the legend strip is drawn.
    pub show_legend: bool,
    /// Whether percentage labels are drawn inside slices/segments.
    pub show_percentages: bool,
    /// X-axis title.
    pub x_axis_label: String,
    /// Y-axis title.
    pub y_axis_label: String,
    /// Whether axis tick/category labels are drawn.
    pub show_axis_labels: bool,
    /// Whether hover annotations (tooltips) are enabled.
    pub show_annotations: bool,
    /// Custom annotation template; empty means the chart default.
    pub custom_annotation: String,
    /// Whether the footer line is drawn.
    pub show_footer: bool,
    /// Footer text.
    pub footer_text: String,
    /// Transition duration in milliseconds.
    pub transition_duration: f64,

    /// Whether this visualization has ever been saved.
    pub saved: bool,
    /// Whether there are unsaved edits. Set by every field-mutating
    /// action, cleared only by an explicit save acknowledgement.
    pub modified: bool,
    /// Whether a share link exists.
    pub shared: bool,
    /// Whether the visualization is published.
    pub published: bool,
    /// Backend id, present once saved.
    pub visualization_id: Option<String>,
    /// Source link for Google-Sheets imports.
    pub sheets_link: String,
}

impl StyleState {
    /// The defaults applied when entering the studio with a fresh chart.
    ///
    /// This is a factory rather than a shared global so one session can
    /// never leak edits into the next.
    pub fn studio_default() -> Self {
        Self {
            title: String::new(),
            article: String::new(),
            font_family: "Inter, sans-serif".to_owned(),
            title_font_size: 24.0,
            article_font_size: 14.0,
            text_color: "#222222".to_owned(),
            background_color: "#ffffff".to_owned(),
            bar_color: "#4e79a7".to_owned(),
            bar_opacity: 100.0,
            bar_spacing: 10.0,
            palette: String::new(),
            custom_colors: String::new(),
            show_grid: true,
            show_legend: true,
            show_percentages: false,
            x_axis_label: String::new(),
            y_axis_label: String::new(),
            show_axis_labels: true,
            show_annotations: true,
            custom_annotation: String::new(),
            show_footer: false,
            footer_text: String::new(),
            transition_duration: 400.0,
            saved: false,
            modified: false,
            shared: false,
            published: false,
            visualization_id: None,
            sheets_link: String::new(),
        }
    }

    /// Whether the configured background is the transparent sentinel.
    pub fn transparent_background(&self) -> bool {
        self.background_color.trim().eq_ignore_ascii_case(TRANSPARENT)
    }
}

impl Default for StyleState {
    fn default() -> Self {
        Self::studio_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn factory_returns_fresh_unmodified_state() {
        let a = StyleState::studio_default();
        let b = StyleState::studio_default();
        assert_eq!(a, b);
        assert!(!a.modified);
        assert!(!a.saved);
    }

    #[test]
    fn transparent_sentinel_is_case_insensitive() {
        let mut s = StyleState::studio_default();
        s.background_color = "Transparent".to_owned();
        assert!(s.transparent_background());
        s.background_color = "#fff".to_owned();
        assert!(!s.transparent_background());
    }
}
