// Copyright 2025 the Abra Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The style-state reducer.
//!
//! A pure state machine: `(state, action) -> state`. Every field-setting
//! action also sets `modified: true`; only [`Action::AcknowledgeSave`]
//! clears it. The action vocabulary is a closed enum, so a dispatch the
//! reducer does not recognize cannot be constructed in the first place —
//! the stringly-typed boundary lives in [`crate::persist`] and fails there
//! with a typed error.

use crate::persist::SavedStyle;
use crate::state::StyleState;

/// Every mutation the editing sidebar can dispatch.
#[derive(Clone, Debug, PartialEq)]
pub enum Action {
    /// Sets the chart title.
    SetTitle(String),
    /// Sets the article text.
    SetArticle(String),
    /// Sets the font family.
    SetFontFamily(String),
    /// Sets the title font size.
    SetTitleFontSize(f64),
    /// Sets the article font size.
    SetArticleFontSize(f64),
    /// Sets the text color.
    SetTextColor(String),
    /// Sets the background color (or the transparent sentinel).
    SetBackgroundColor(String),
    /// Sets the base series color.
    SetBarColor(String),
    /// Sets the series opacity (0–100).
    SetBarOpacity(f64),
    /// Sets the band spacing (0–100).
    SetBarSpacing(f64),
    /// Sets the palette key.
    SetPalette(String),
    /// Sets the per-label color override string.
    SetCustomColors(String),
    /// Toggles gridlines.
    SetShowGrid(bool),
    /// Toggles the legend strip.
    SetShowLegend(bool),
    /// Toggles in-shape percentage labels.
    SetShowPercentages(bool),
    /// Sets the x-axis title.
    SetXAxisLabel(String),
    /// Sets the y-axis title.
    SetYAxisLabel(String),
    /// Toggles axis labels.
    SetShowAxisLabels(bool),
    /// Toggles hover annotations.
    SetShowAnnotations(bool),
    /// Sets the custom annotation template.
    SetCustomAnnotation(String),
    /// Toggles the footer.
    SetShowFooter(bool),
    /// Sets the footer text.
    SetFooterText(String),
    /// Sets the transition duration in milliseconds.
    SetTransitionDuration(f64),
    /// Sets the Google-Sheets source link.
    SetSheetsLink(String),

    /// Replaces the whole state with studio defaults (fresh edit session).
    Reset,
    /// Merges a fetched saved visualization into the state without
    /// touching `modified`.
    Initialize(Box<SavedStyle>),
    /// Records a completed save: stores the backend id, sets `saved`,
    /// clears `modified`.
    AcknowledgeSave {
        /// The id returned by the backend.
        visualization_id: String,
    },
    /// Records that a share link exists.
    SetShared(bool),
    /// Records the published flag.
    SetPublished(bool),
}

/// Whether a save action is currently permitted.
///
/// Saving is gated on `modified` so a no-op save cannot fire.
pub fn can_save(state: &StyleState) -> bool {
    state.modified
}

/// Applies an action to the state, returning the next state.
pub fn reduce(state: &StyleState, action: Action) -> StyleState {
    // Field-setting arms clone + assign + mark modified; workflow arms
    // manage their own flags.
    let mut next = state.clone();
    match action {
        Action::SetTitle(v) => next.title = v,
        Action::SetArticle(v) => next.article = v,
        Action::SetFontFamily(v) => next.font_family = v,
        Action::SetTitleFontSize(v) => next.title_font_size = v,
        Action::SetArticleFontSize(v) => next.article_font_size = v,
        Action::SetTextColor(v) => next.text_color = v,
        Action::SetBackgroundColor(v) => next.background_color = v,
        Action::SetBarColor(v) => next.bar_color = v,
        Action::SetBarOpacity(v) => next.bar_opacity = v.clamp(0.0, 100.0),
        Action::SetBarSpacing(v) => next.bar_spacing = v.clamp(0.0, 100.0),
        Action::SetPalette(v) => next.palette = v,
        Action::SetCustomColors(v) => next.custom_colors = v,
        Action::SetShowGrid(v) => next.show_grid = v,
        Action::SetShowLegend(v) => next.show_legend = v,
        Action::SetShowPercentages(v) => next.show_percentages = v,
        Action::SetXAxisLabel(v) => next.x_axis_label = v,
        Action::SetYAxisLabel(v) => next.y_axis_label = v,
        Action::SetShowAxisLabels(v) => next.show_axis_labels = v,
        Action::SetShowAnnotations(v) => next.show_annotations = v,
        Action::SetCustomAnnotation(v) => next.custom_annotation = v,
        Action::SetShowFooter(v) => next.show_footer = v,
        Action::SetFooterText(v) => next.footer_text = v,
        Action::SetTransitionDuration(v) => next.transition_duration = v.max(0.0),
        Action::SetSheetsLink(v) => next.sheets_link = v,

        Action::Reset => return StyleState::studio_default(),
        Action::Initialize(saved) => {
            saved.apply_to(&mut next);
            return next;
        }
        Action::AcknowledgeSave { visualization_id } => {
            next.visualization_id = Some(visualization_id);
            next.saved = true;
            next.modified = false;
            return next;
        }
        Action::SetShared(v) => {
            next.shared = v;
            return next;
        }
        Action::SetPublished(v) => {
            next.published = v;
            return next;
        }
    }
    next.modified = true;
    next
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn field_actions_set_modified() {
        let s0 = StyleState::studio_default();
        let s1 = reduce(&s0, Action::SetTitle("Gyumolcsok".to_owned()));
        assert_eq!(s1.title, "Gyumolcsok");
        assert!(s1.modified);
        assert!(!s0.modified, "reducer must not mutate its input");
    }

    #[test]
    fn save_ack_clears_modified_and_stores_id() {
        let s0 = StyleState::studio_default();
        let s1 = reduce(&s0, Action::SetShowGrid(false));
        assert!(can_save(&s1));

        let s2 = reduce(
            &s1,
            Action::AcknowledgeSave {
                visualization_id: "viz-42".to_owned(),
            },
        );
        assert!(s2.saved);
        assert!(!s2.modified);
        assert!(!can_save(&s2));
        assert_eq!(s2.visualization_id.as_deref(), Some("viz-42"));
        // The edited field survives the acknowledgement.
        assert!(!s2.show_grid);
    }

    #[test]
    fn reset_returns_wholesale_defaults() {
        let s0 = StyleState::studio_default();
        let s1 = reduce(&s0, Action::SetFooterText("forras: KSH".to_owned()));
        let s2 = reduce(&s1, Action::Reset);
        assert_eq!(s2, StyleState::studio_default());
    }

    #[test]
    fn initialize_merges_without_marking_modified() {
        let saved = crate::persist::SavedStyle {
            title: Some("Mentett".to_owned()),
            show_legend: Some(false),
            ..Default::default()
        };
        let s0 = StyleState::studio_default();
        let s1 = reduce(&s0, Action::Initialize(Box::new(saved)));
        assert_eq!(s1.title, "Mentett");
        assert!(!s1.show_legend);
        assert!(!s1.modified);
        // Fields the payload omitted keep their defaults.
        assert_eq!(s1.title_font_size, s0.title_font_size);
    }

    #[test]
    fn opacity_and_spacing_are_clamped() {
        let s0 = StyleState::studio_default();
        let s1 = reduce(&s0, Action::SetBarOpacity(250.0));
        assert_eq!(s1.bar_opacity, 100.0);
        let s2 = reduce(&s1, Action::SetBarSpacing(-5.0));
        assert_eq!(s2.bar_spacing, 0.0);
    }

    #[test]
    fn workflow_flags_do_not_gate_saving() {
        let s0 = StyleState::studio_default();
        let s1 = reduce(&s0, Action::SetShared(true));
        assert!(s1.shared);
        assert!(!s1.modified);
    }
}
