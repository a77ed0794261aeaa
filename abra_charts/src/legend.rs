// Copyright 2025 the Abra Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Legend strip generation.
//!
//! The studio draws a single horizontal strip of swatches + labels above
//! the plot. Every entry is clickable and toggles its series: disabled
//! entries stay in the strip (dimmed) so the user can re-enable them.

use abra_core::{ClickAction, Interaction, NodeId, Primitive, SceneNode, TextAnchor, TextBaseline};
use kurbo::{Point, Rect};
use peniko::{Brush, Color};
use peniko::color::palette::css;

use crate::measure::TextMeasurer;
use crate::z_order;

/// One legend row item.
#[derive(Clone, Debug)]
pub struct LegendEntry {
    /// The series/category label.
    pub label: String,
    /// The swatch color.
    pub color: Color,
    /// Whether the series is currently visible.
    pub enabled: bool,
}

impl LegendEntry {
    /// Creates an enabled entry.
    pub fn new(label: impl Into<String>, color: Color) -> Self {
        Self {
            label: label.into(),
            color,
            enabled: true,
        }
    }

    /// Sets the enabled flag.
    pub fn with_enabled(mut self, enabled: bool) -> Self {
        self.enabled = enabled;
        self
    }
}

/// A horizontal swatches + labels legend strip.
#[derive(Clone, Debug)]
pub struct LegendSpec {
    /// Items in display order.
    pub entries: Vec<LegendEntry>,
    /// Swatch square size.
    pub swatch_size: f64,
    /// Gap between a swatch and its label.
    pub label_gap: f64,
    /// Gap between entries.
    pub entry_gap: f64,
    /// Label font size.
    pub font_size: f64,
    /// Label color.
    pub text_color: Color,
}

impl LegendSpec {
    /// Creates a legend with default styling.
    pub fn new(entries: Vec<LegendEntry>) -> Self {
        Self {
            entries,
            swatch_size: 12.0,
            label_gap: 6.0,
            entry_gap: 16.0,
            font_size: 12.0,
            text_color: css::BLACK,
        }
    }

    /// Sets the label color.
    pub fn with_text_color(mut self, color: Color) -> Self {
        self.text_color = color;
        self
    }

    /// Sets the label font size.
    pub fn with_font_size(mut self, font_size: f64) -> Self {
        self.font_size = font_size;
        self
    }

    /// Measures the strip's `(width, height)`.
    pub fn measure(&self, measurer: &dyn TextMeasurer) -> (f64, f64) {
        let mut width = 0.0;
        for (i, entry) in self.entries.iter().enumerate() {
            if i > 0 {
                width += self.entry_gap;
            }
            let (w, _) = measurer.measure(&entry.label, self.font_size);
            width += self.swatch_size + self.label_gap + w;
        }
        (width, self.swatch_size.max(self.font_size))
    }

    /// Generates the strip's scene nodes starting at `origin` (top-left).
    ///
    /// Both the swatch and the label carry a [`ClickAction::ToggleSeries`]
    /// for their entry; disabled entries are drawn at reduced opacity.
    pub fn nodes(&self, origin: Point, measurer: &dyn TextMeasurer) -> Vec<SceneNode> {
        let mut out = Vec::with_capacity(self.entries.len() * 2);
        let row_height = self.swatch_size.max(self.font_size);
        let mut x = origin.x;

        for entry in &self.entries {
            let alpha: f32 = if entry.enabled { 1.0 } else { 0.35 };
            let id = NodeId::from_key(&format!("legend/{}", entry.label));
            let toggle = Interaction::click(ClickAction::ToggleSeries(entry.label.clone()));

            let swatch_y = origin.y + (row_height - self.swatch_size) * 0.5;
            out.push(
                SceneNode::new(
                    id,
                    z_order::LEGEND,
                    Primitive::Rect {
                        rect: Rect::new(
                            x,
                            swatch_y,
                            x + self.swatch_size,
                            swatch_y + self.swatch_size,
                        ),
                        fill: Brush::Solid(entry.color.with_alpha(alpha)),
                        stroke: None,
                    },
                )
                .with_interaction(toggle.clone()),
            );
            x += self.swatch_size + self.label_gap;

            let (label_w, _) = measurer.measure(&entry.label, self.font_size);
            out.push(
                SceneNode::new(
                    id.offset(1),
                    z_order::LEGEND,
                    Primitive::Text {
                        pos: Point::new(x, origin.y + row_height * 0.5),
                        text: entry.label.clone(),
                        font_size: self.font_size,
                        font_family: None,
                        fill: Brush::Solid(self.text_color.with_alpha(alpha)),
                        anchor: TextAnchor::Start,
                        baseline: TextBaseline::Middle,
                    },
                )
                .with_interaction(toggle),
            );
            x += label_w + self.entry_gap;
        }

        out
    }
}
