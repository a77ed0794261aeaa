// Copyright 2025 the Abra Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The Abra renderer family.
//!
//! Each chart/map kind is a [`Renderer`]: a pure function from
//! `(rows, style, bounds, view state)` to a [`Scene`]. The factory
//! dispatches a [`ChartKind`] tag to the matching variant and contains no
//! logic of its own. Transient interaction state (hover, legend toggles,
//! map zoom, race playback) is an *input* here; mutating it in response to
//! clicks is the embedding shell's job.
//!
//! Rendering never fails: empty, partially-invalid, or wholly-invalid
//! tables produce a scene with chrome and an empty plot area.

mod area;
mod bar;
mod election;
mod filter_map;
mod frame;
mod line;
mod pie;
mod race;
mod scatter;
mod series;

pub mod bubble_map;
pub mod geo;

pub use area::AreaRenderer;
pub use bar::BarRenderer;
pub use bubble_map::BubbleMapRenderer;
pub use election::{ElectionDonutRenderer, ElectionResultsRenderer};
pub use filter_map::FilterMapRenderer;
pub use line::LineRenderer;
pub use pie::{PieRenderer, PieSlice, arc_transition};
pub use race::{RACE_STEP_INTERVAL, RacePlayback, RaceRenderer};
pub use scatter::ScatterRenderer;

use abra_core::{Scene, Table};
use abra_style::StyleState;
use hashbrown::HashSet;

/// The visualization-type tag, as stored by the backend.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ChartKind {
    /// Vertical bars, one series per header column.
    Bar,
    /// Pie of the first value column.
    Pie,
    /// Multi-series line chart.
    Line,
    /// Multi-series area chart.
    Area,
    /// Scatter plot with optional grouping.
    Scatter,
    /// Geographic bubbles sized by value.
    BubbleMap,
    /// Geographic features filtered by tag.
    FilterMap,
    /// Half-circle election donut per region.
    ElectionDonut,
    /// Stacked election results bar per region.
    ElectionResults,
    /// Animated ranked-bar race over time columns.
    Race,
}

impl ChartKind {
    /// Maps a stored visualization-type id to a kind.
    pub fn from_id(id: u32) -> Option<Self> {
        match id {
            1 => Some(Self::Bar),
            2 => Some(Self::Pie),
            3 => Some(Self::Line),
            4 => Some(Self::Area),
            5 => Some(Self::Scatter),
            6 => Some(Self::BubbleMap),
            7 => Some(Self::FilterMap),
            8 => Some(Self::ElectionDonut),
            9 => Some(Self::ElectionResults),
            10 => Some(Self::Race),
            _ => None,
        }
    }

    /// The stored id for this kind.
    pub fn id(self) -> u32 {
        match self {
            Self::Bar => 1,
            Self::Pie => 2,
            Self::Line => 3,
            Self::Area => 4,
            Self::Scatter => 5,
            Self::BubbleMap => 6,
            Self::FilterMap => 7,
            Self::ElectionDonut => 8,
            Self::ElectionResults => 9,
            Self::Race => 10,
        }
    }
}

/// Hover state fed back from the shell's hit testing.
#[derive(Clone, Debug, PartialEq)]
pub struct HoverState {
    /// Pointer x in container coordinates.
    pub x: f64,
    /// Pointer y in container coordinates.
    pub y: f64,
    /// The tooltip text of the hovered node.
    pub text: String,
}

/// Transient, per-mount interaction state.
///
/// This never persists; it resets when the user switches chart kinds.
#[derive(Clone, Debug, Default)]
pub struct ViewState {
    /// Series/categories toggled off via legend clicks.
    pub hidden_series: HashSet<String>,
    /// Current hover, if any.
    pub hover: Option<HoverState>,
    /// Map feature the viewport is zoomed to, if any.
    pub zoom: Option<String>,
    /// Selected election region (row), if any.
    pub selected_region: Option<String>,
    /// Race playback cursor.
    pub race: RacePlayback,
}

impl ViewState {
    /// Fresh state for a newly mounted renderer.
    pub fn new() -> Self {
        Self::default()
    }

    /// Flips a series in the legend filter.
    pub fn toggle_series(&mut self, label: &str) {
        if !self.hidden_series.remove(label) {
            self.hidden_series.insert(label.to_owned());
        }
    }

    /// Whether a series is currently visible.
    pub fn is_visible(&self, label: &str) -> bool {
        !self.hidden_series.contains(label)
    }
}

/// Everything a renderer reads.
#[derive(Clone, Copy, Debug)]
pub struct RenderInput<'a> {
    /// The imported tabular rows.
    pub table: &'a Table,
    /// Optional parallel historical dataset (election trend arrows).
    pub historical: Option<&'a Table>,
    /// The style state.
    pub style: &'a StyleState,
    /// Container width in pixels.
    pub width: f64,
    /// Container height in pixels.
    pub height: f64,
    /// Transient interaction state.
    pub view: &'a ViewState,
    /// The stored model id; selects the map region for geo kinds.
    pub model_id: u32,
}

/// One chart/map variant.
pub trait Renderer {
    /// Produces the scene for the given input.
    fn render(&self, input: &RenderInput<'_>) -> Scene;
}

/// Returns the renderer for a kind. Pure routing.
pub fn renderer_for(kind: ChartKind) -> &'static dyn Renderer {
    match kind {
        ChartKind::Bar => &BarRenderer,
        ChartKind::Pie => &PieRenderer,
        ChartKind::Line => &LineRenderer,
        ChartKind::Area => &AreaRenderer,
        ChartKind::Scatter => &ScatterRenderer,
        ChartKind::BubbleMap => &BubbleMapRenderer,
        ChartKind::FilterMap => &FilterMapRenderer,
        ChartKind::ElectionDonut => &ElectionDonutRenderer,
        ChartKind::ElectionResults => &ElectionResultsRenderer,
        ChartKind::Race => &RaceRenderer,
    }
}

/// Convenience: dispatch + render in one call.
pub fn render(kind: ChartKind, input: &RenderInput<'_>) -> Scene {
    renderer_for(kind).render(input)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kind_ids_round_trip() {
        for id in 1..=10 {
            let kind = ChartKind::from_id(id).unwrap();
            assert_eq!(kind.id(), id);
        }
        assert_eq!(ChartKind::from_id(0), None);
        assert_eq!(ChartKind::from_id(11), None);
    }

    #[test]
    fn toggling_twice_restores_visibility() {
        let mut view = ViewState::new();
        assert!(view.is_visible("A"));
        view.toggle_series("A");
        assert!(!view.is_visible("A"));
        view.toggle_series("A");
        assert!(view.is_visible("A"));
    }
}
