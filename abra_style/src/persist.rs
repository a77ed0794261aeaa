// Copyright 2025 the Abra Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Persistence mapping for saved visualizations.
//!
//! The backend stores one style JSON object per visualization whose keys
//! mirror [`StyleState`]'s serialized shape. Loading is lenient: every key
//! is optional and absent keys fall back to studio defaults, so old saves
//! keep opening after new style fields ship. A failed save must never
//! clear `modified` — callers only dispatch
//! [`crate::Action::AcknowledgeSave`] on the success branch.

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::state::StyleState;

/// Errors from the persistence boundary.
#[derive(Debug, thiserror::Error)]
pub enum PersistError {
    /// The style JSON could not be parsed.
    #[error("malformed style JSON: {0}")]
    Malformed(#[from] serde_json::Error),
}

/// A saved visualization's style fields, all optional.
///
/// This is the shape fetched from the backend when loading a saved, shared,
/// or published visualization.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SavedStyle {
    /// See [`StyleState::title`].
    pub title: Option<String>,
    /// See [`StyleState::article`].
    pub article: Option<String>,
    /// See [`StyleState::font_family`].
    pub font_family: Option<String>,
    /// See [`StyleState::title_font_size`].
    pub title_font_size: Option<f64>,
    /// See [`StyleState::article_font_size`].
    pub article_font_size: Option<f64>,
    /// See [`StyleState::text_color`].
    pub text_color: Option<String>,
    /// See [`StyleState::background_color`].
    pub background_color: Option<String>,
    /// See [`StyleState::bar_color`].
    pub bar_color: Option<String>,
    /// See [`StyleState::bar_opacity`].
    pub bar_opacity: Option<f64>,
    /// See [`StyleState::bar_spacing`].
    pub bar_spacing: Option<f64>,
    /// See [`StyleState::palette`].
    pub palette: Option<String>,
    /// See [`StyleState::custom_colors`].
    pub custom_colors: Option<String>,
    /// See [`StyleState::show_grid`].
    pub show_grid: Option<bool>,
    /// See [`StyleState::show_legend`].
    pub show_legend: Option<bool>,
    /// See [`StyleState::show_percentages`].
    pub show_percentages: Option<bool>,
    /// See [`StyleState::x_axis_label`].
    pub x_axis_label: Option<String>,
    /// See [`StyleState::y_axis_label`].
    pub y_axis_label: Option<String>,
    /// See [`StyleState::show_axis_labels`].
    pub show_axis_labels: Option<bool>,
    /// See [`StyleState::show_annotations`].
    pub show_annotations: Option<bool>,
    /// See [`StyleState::custom_annotation`].
    pub custom_annotation: Option<String>,
    /// See [`StyleState::show_footer`].
    pub show_footer: Option<bool>,
    /// See [`StyleState::footer_text`].
    pub footer_text: Option<String>,
    /// See [`StyleState::transition_duration`].
    pub transition_duration: Option<f64>,
    /// See [`StyleState::shared`].
    pub shared: Option<bool>,
    /// See [`StyleState::published`].
    pub published: Option<bool>,
    /// See [`StyleState::visualization_id`].
    pub visualization_id: Option<String>,
    /// See [`StyleState::sheets_link`].
    pub sheets_link: Option<String>,
}

impl SavedStyle {
    /// Parses the backend's style JSON.
    pub fn from_json(json: &str) -> Result<Self, PersistError> {
        serde_json::from_str(json).map_err(|e| {
            warn!(error = %e, "failed to parse saved style JSON");
            PersistError::Malformed(e)
        })
    }

    /// Applies every present field onto `state`.
    ///
    /// Loading marks the state as saved (it came from the backend) and
    /// leaves `modified` untouched.
    pub fn apply_to(&self, state: &mut StyleState) {
        macro_rules! merge {
            ($($field:ident),* $(,)?) => {
                $(if let Some(v) = &self.$field {
                    state.$field = v.clone();
                })*
            };
        }
        merge!(
            title,
            article,
            font_family,
            text_color,
            background_color,
            bar_color,
            palette,
            custom_colors,
            x_axis_label,
            y_axis_label,
            custom_annotation,
            footer_text,
            sheets_link,
        );
        macro_rules! merge_copy {
            ($($field:ident),* $(,)?) => {
                $(if let Some(v) = self.$field {
                    state.$field = v;
                })*
            };
        }
        merge_copy!(
            title_font_size,
            article_font_size,
            bar_opacity,
            bar_spacing,
            show_grid,
            show_legend,
            show_percentages,
            show_axis_labels,
            show_annotations,
            show_footer,
            transition_duration,
            shared,
            published,
        );
        if let Some(id) = &self.visualization_id {
            state.visualization_id = Some(id.clone());
            state.saved = true;
        }
    }

    /// Builds a complete state from this payload, starting from defaults.
    pub fn into_state(self) -> StyleState {
        let mut state = StyleState::studio_default();
        self.apply_to(&mut state);
        state
    }
}

/// Serializes the full state for a save/update call.
pub fn save_payload(state: &StyleState) -> Result<String, PersistError> {
    Ok(serde_json::to_string(state)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn absent_keys_fall_back_to_defaults() {
        let saved = SavedStyle::from_json(r#"{"title":"Mentett abra"}"#).unwrap();
        let state = saved.into_state();
        assert_eq!(state.title, "Mentett abra");
        let defaults = StyleState::studio_default();
        assert_eq!(state.title_font_size, defaults.title_font_size);
        assert_eq!(state.show_legend, defaults.show_legend);
    }

    #[test]
    fn loading_a_saved_id_marks_state_saved() {
        let saved = SavedStyle::from_json(r#"{"visualizationId":"viz-7"}"#).unwrap();
        let state = saved.into_state();
        assert!(state.saved);
        assert_eq!(state.visualization_id.as_deref(), Some("viz-7"));
        assert!(!state.modified);
    }

    #[test]
    fn malformed_json_is_a_typed_error() {
        assert!(SavedStyle::from_json("{not json").is_err());
    }

    #[test]
    fn save_payload_round_trips() {
        let mut state = StyleState::studio_default();
        state.title = "Korte es Alma".to_owned();
        state.show_footer = true;
        state.footer_text = "forras: KSH".to_owned();

        let json = save_payload(&state).unwrap();
        let reloaded = SavedStyle::from_json(&json).unwrap().into_state();
        assert_eq!(reloaded.title, state.title);
        assert!(reloaded.show_footer);
        assert_eq!(reloaded.footer_text, state.footer_text);
    }

    #[test]
    fn unknown_keys_are_ignored() {
        let saved = SavedStyle::from_json(r#"{"title":"x","legacyField":123}"#).unwrap();
        assert_eq!(saved.title.as_deref(), Some("x"));
    }
}
