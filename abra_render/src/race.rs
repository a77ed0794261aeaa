// Copyright 2025 the Abra Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Ranked bar race.
//!
//! The table's first two columns are entrant name and tag; every later
//! column is one time period. Each rendered frame ranks the entrants by
//! their value in the current period and draws horizontal bars, longest on
//! top. Playback is a pure stepper the shell drives on a timer; rendering a
//! frame never mutates it.

use std::time::Duration;

use abra_charts::{
    AnnotationContext, ColorResolver, HeuristicTextMeasurer, LegendEntry, LegendSpec, ScaleBand,
    ScaleLinear, z_order,
};
use abra_core::{Interaction, NodeId, Primitive, Scene, SceneNode, TextAnchor, TextBaseline};
use kurbo::{Point, Rect};
use peniko::Brush;

use crate::frame::Chrome;
use crate::series::{format_value, hover_text};
use crate::{RenderInput, Renderer};

/// Wall-clock interval between playback steps.
pub const RACE_STEP_INTERVAL: Duration = Duration::from_millis(1500);

/// Playback cursor for the race. Pure state; the shell owns the timer.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct RacePlayback {
    /// The current period index.
    pub frame: usize,
    /// Whether the timer should keep stepping.
    pub playing: bool,
}

impl RacePlayback {
    /// Starts playback; restarting at the end rewinds to the first frame.
    pub fn play(&mut self, frame_count: usize) {
        if frame_count > 0 && self.frame + 1 >= frame_count {
            self.frame = 0;
        }
        self.playing = true;
    }

    /// Pauses playback in place.
    pub fn pause(&mut self) {
        self.playing = false;
    }

    /// Steps to the next frame; pauses after reaching the last one.
    pub fn advance(&mut self, frame_count: usize) {
        if frame_count == 0 {
            self.playing = false;
            return;
        }
        if self.frame + 1 < frame_count {
            self.frame += 1;
        }
        if self.frame + 1 >= frame_count {
            self.playing = false;
        }
    }

    /// Jumps to a frame (clamped), without changing the play state.
    pub fn set_frame(&mut self, frame: usize, frame_count: usize) {
        self.frame = frame.min(frame_count.saturating_sub(1));
    }
}

/// The bar race renderer.
pub struct RaceRenderer;

impl Renderer for RaceRenderer {
    fn render(&self, input: &RenderInput<'_>) -> Scene {
        let chrome = Chrome::new(input);
        let style = input.style;
        let table = input.table;

        let cols = table.row(0).map_or(0, <[_]>::len);
        let frame_count = cols.saturating_sub(2);

        // Tags in first-seen row order drive the legend filter.
        let mut tags: Vec<String> = Vec::new();
        struct Entrant {
            name: String,
            tag: String,
            value: f64,
        }
        let mut entrants: Vec<Entrant> = Vec::new();

        let frame_col = if frame_count > 0 {
            2 + input.view.race.frame.min(frame_count - 1)
        } else {
            2
        };
        for r in table.data_rows() {
            let name = table.text(r, 0);
            let name = name.trim().to_owned();
            if name.is_empty() {
                continue;
            }
            let tag = table.text(r, 1).trim().to_owned();
            if !tag.is_empty() && !tags.contains(&tag) {
                tags.push(tag.clone());
            }
            let value = table.number(r, frame_col);
            if !value.is_finite() || value < 0.0 {
                continue;
            }
            if !tag.is_empty() && !input.view.is_visible(&tag) {
                continue;
            }
            entrants.push(Entrant { name, tag, value });
        }
        entrants.sort_by(|a, b| {
            b.value
                .partial_cmp(&a.value)
                .unwrap_or(std::cmp::Ordering::Equal)
                .then_with(|| a.name.cmp(&b.name))
        });

        let show_legend = style.show_legend && tags.len() > 1;
        let margins = chrome.margins(show_legend, false);
        let plot = margins.plot_rect();

        let mut scene = Scene::new();
        chrome.base_nodes(&mut scene);
        if entrants.is_empty() || frame_count == 0 {
            chrome.tooltip(&mut scene, input.view);
            return scene;
        }

        let mut resolver = ColorResolver::from_style(&style.custom_colors, &style.palette);
        let tag_colors: Vec<_> = tags.iter().map(|t| resolver.resolve(t)).collect();
        let untagged_color = resolver.resolve("");

        let rows = ScaleBand::new((0.0, margins.inner_height), entrants.len())
            .with_padding(chrome.band_padding());
        let label_width = (margins.inner_width * 0.22).min(120.0);
        let value_scale = ScaleLinear::zero_to_max(
            entrants.iter().map(|e| &e.value),
            (plot.x0 + label_width, plot.x1 - 40.0),
        );

        let alpha = chrome.series_alpha();
        let text_color = chrome.text_color();
        for (rank, e) in entrants.iter().enumerate() {
            let color = match tags.iter().position(|t| *t == e.tag) {
                Some(i) => tag_colors[i],
                None => untagged_color,
            };
            let y0 = plot.y0 + rows.position(rank);
            let y1 = y0 + rows.band_width();
            let x1 = value_scale.map(e.value).max(plot.x0 + label_width);

            let mut node = SceneNode::new(
                NodeId::from_key(&format!("race/{}", e.name)),
                z_order::SERIES_FILL,
                Primitive::Rect {
                    rect: Rect::new(plot.x0 + label_width, y0, x1, y1),
                    fill: Brush::Solid(color.with_alpha(alpha)),
                    stroke: None,
                },
            );
            let ctx = AnnotationContext::new()
                .field("name", e.name.clone())
                .field("series", e.tag.clone())
                .field("value", format_value(e.value));
            if let Some(text) = hover_text(style, &ctx) {
                node = node.with_interaction(Interaction::hover(text));
            }
            scene.push(node);

            scene.push(SceneNode::new(
                NodeId::from_key(&format!("race/{}", e.name)).offset(1),
                z_order::SERIES_LABELS,
                Primitive::Text {
                    pos: Point::new(plot.x0 + label_width - 6.0, (y0 + y1) * 0.5),
                    text: e.name.clone(),
                    font_size: 11.0,
                    font_family: Some(style.font_family.clone()),
                    fill: Brush::Solid(text_color),
                    anchor: TextAnchor::End,
                    baseline: TextBaseline::Middle,
                },
            ));
            scene.push(SceneNode::new(
                NodeId::from_key(&format!("race/{}", e.name)).offset(2),
                z_order::SERIES_LABELS,
                Primitive::Text {
                    pos: Point::new(x1 + 6.0, (y0 + y1) * 0.5),
                    text: format_value(e.value),
                    font_size: 11.0,
                    font_family: Some(style.font_family.clone()),
                    fill: Brush::Solid(text_color),
                    anchor: TextAnchor::Start,
                    baseline: TextBaseline::Middle,
                },
            ));
        }

        // Big period label in the plot's bottom-right corner.
        scene.push(SceneNode::new(
            NodeId::from_key("race/period"),
            z_order::SERIES_LABELS,
            Primitive::Text {
                pos: Point::new(plot.x1 - 8.0, plot.y1 - 8.0),
                text: table.text(0, frame_col),
                font_size: 28.0,
                font_family: Some(style.font_family.clone()),
                fill: Brush::Solid(text_color.with_alpha(0.4)),
                anchor: TextAnchor::End,
                baseline: TextBaseline::Alphabetic,
            },
        ));

        if show_legend {
            let entries: Vec<_> = tags
                .iter()
                .zip(&tag_colors)
                .map(|(t, c)| {
                    LegendEntry::new(t.clone(), *c).with_enabled(input.view.is_visible(t))
                })
                .collect();
            let legend = LegendSpec::new(entries).with_text_color(text_color);
            scene.extend(legend.nodes(chrome.legend_origin(&margins), &HeuristicTextMeasurer));
        }

        chrome.tooltip(&mut scene, input.view);
        scene
    }
}

#[cfg(test)]
mod tests {
    use abra_core::Table;
    use abra_style::StyleState;

    use super::*;
    use crate::ViewState;

    fn table() -> Table {
        Table::from_strings([
            ["Name", "Tag", "2000", "2001"],
            ["Alma", "fruit", "5", "2"],
            ["Korte", "fruit", "1", "8"],
            ["Repa", "veg", "3", "3"],
        ])
    }

    fn render_with(view: &ViewState) -> Scene {
        let table = table();
        let style = StyleState::studio_default();
        let input = RenderInput {
            table: &table,
            historical: None,
            style: &style,
            width: 600.0,
            height: 400.0,
            view,
            model_id: 10,
        };
        RaceRenderer.render(&input)
    }

    fn bar_top(scene: &Scene, name: &str) -> Option<f64> {
        let node = scene.find(NodeId::from_key(&format!("race/{name}")))?;
        match node.primitive {
            Primitive::Rect { rect, .. } => Some(rect.y0),
            _ => None,
        }
    }

    #[test]
    fn bars_are_ranked_by_value() {
        let scene = render_with(&ViewState::new());
        // Frame 0: Alma 5, Repa 3, Korte 1.
        assert!(bar_top(&scene, "Alma").unwrap() < bar_top(&scene, "Repa").unwrap());
        assert!(bar_top(&scene, "Repa").unwrap() < bar_top(&scene, "Korte").unwrap());
    }

    #[test]
    fn the_frame_selects_the_period_column() {
        let mut view = ViewState::new();
        view.race.set_frame(1, 2);
        let scene = render_with(&view);
        // Frame 1: Korte 8 leads.
        assert!(bar_top(&scene, "Korte").unwrap() < bar_top(&scene, "Alma").unwrap());
        let period = scene.find(NodeId::from_key("race/period")).unwrap();
        let Primitive::Text { text, .. } = &period.primitive else {
            panic!("expected text");
        };
        assert_eq!(text, "2001");
    }

    #[test]
    fn tag_filter_removes_entrants() {
        let mut view = ViewState::new();
        view.toggle_series("veg");
        let scene = render_with(&view);
        assert!(bar_top(&scene, "Repa").is_none());
        assert!(bar_top(&scene, "Alma").is_some());
    }

    #[test]
    fn playback_pauses_at_the_last_frame() {
        let mut p = RacePlayback::default();
        p.play(3);
        assert!(p.playing);
        p.advance(3);
        assert_eq!(p.frame, 1);
        assert!(p.playing);
        p.advance(3);
        assert_eq!(p.frame, 2);
        assert!(!p.playing);
        // Playing again from the end rewinds.
        p.play(3);
        assert_eq!(p.frame, 0);
        assert!(p.playing);
    }

    #[test]
    fn set_frame_clamps() {
        let mut p = RacePlayback::default();
        p.set_frame(99, 4);
        assert_eq!(p.frame, 3);
        p.set_frame(2, 0);
        assert_eq!(p.frame, 0);
    }

    #[test]
    fn step_interval_is_fixed() {
        assert_eq!(RACE_STEP_INTERVAL, Duration::from_millis(1500));
    }
}
