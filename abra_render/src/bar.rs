// Copyright 2025 the Abra Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Grouped vertical bar chart.
//!
//! One band per category row, one bar per visible series within the band.
//! The value axis rescales to the visible series, so toggling a series off
//! in the legend lets the remaining bars use the full height.

use abra_charts::{
    AnnotationContext, AxisSpec, ColorResolver, HeuristicTextMeasurer, LegendEntry, LegendSpec,
    ScaleBand, ScaleLinear, parse_hex_color, z_order,
};
use abra_core::{Interaction, NodeId, Primitive, Scene, SceneNode};
use hashbrown::HashMap;
use kurbo::Rect;
use peniko::{Brush, Color};

use crate::frame::Chrome;
use crate::series::{CategoryFrame, format_value, hover_text};
use crate::{RenderInput, Renderer};

/// The grouped bar chart renderer.
pub struct BarRenderer;

impl Renderer for BarRenderer {
    fn render(&self, input: &RenderInput<'_>) -> Scene {
        let chrome = Chrome::new(input);
        let style = input.style;
        let frame = CategoryFrame::extract(input.table, input.view);

        let show_legend = style.show_legend && frame.series.len() > 1;
        let margins = chrome.margins(show_legend, true);
        let plot = margins.plot_rect();

        let mut scene = Scene::new();
        chrome.base_nodes(&mut scene);
        if frame.is_empty() {
            chrome.tooltip(&mut scene, input.view);
            return scene;
        }

        let band = ScaleBand::new((0.0, margins.inner_width), frame.categories.len())
            .with_padding(chrome.band_padding());
        let visible: Vec<_> = frame.visible_series().collect();
        let y_scale = ScaleLinear::zero_to_max(
            visible.iter().flat_map(|s| s.values.iter()),
            (plot.y1, plot.y0),
        )
        .nice(5);

        let text_color = chrome.text_color();
        let axis = AxisSpec::new(NodeId::from_key("bar/axis").0)
            .with_grid(style.show_grid)
            .with_color(text_color)
            .with_labels(style.show_axis_labels)
            .with_titles(opt_label(&style.x_axis_label), opt_label(&style.y_axis_label));
        scene.extend(axis.category_x_nodes(plot, &band, &frame.categories));
        scene.extend(axis.value_y_nodes(plot, &y_scale));

        // Colors follow full header order so a toggle never reshuffles slots.
        let mut resolver = ColorResolver::from_style(&style.custom_colors, &style.palette);
        let single_color = (frame.series.len() == 1)
            .then(|| parse_hex_color(&style.bar_color))
            .flatten();
        let mut series_colors: HashMap<&str, Color> = HashMap::new();
        let mut legend_entries = Vec::new();
        for s in &frame.series {
            let color = single_color.unwrap_or_else(|| resolver.resolve(&s.name));
            series_colors.insert(s.name.as_str(), color);
            legend_entries.push(LegendEntry::new(s.name.clone(), color).with_enabled(s.visible));
        }

        let alpha = chrome.series_alpha();
        let baseline = y_scale.map(0.0).clamp(plot.y0, plot.y1);
        let slot = if visible.is_empty() {
            band.band_width()
        } else {
            band.band_width() / visible.len() as f64
        };

        for (vi, s) in visible.iter().enumerate() {
            let fill = series_colors[s.name.as_str()].with_alpha(alpha);
            for (ci, &v) in s.values.iter().enumerate() {
                if !v.is_finite() {
                    continue;
                }
                let x0 = plot.x0 + band.position(ci) + slot * vi as f64;
                let top = y_scale.map(v.max(0.0)).clamp(plot.y0, plot.y1);
                // Zero values produce a zero-height rect; the node stays so
                // hover and transitions keep the category present.
                let rect = Rect::new(x0, top.min(baseline), x0 + slot, baseline);

                let mut node = SceneNode::new(
                    NodeId::from_key(&format!("bar/{}/{}", s.name, frame.categories[ci])),
                    z_order::SERIES_FILL,
                    Primitive::Rect {
                        rect,
                        fill: Brush::Solid(fill),
                        stroke: None,
                    },
                );
                let ctx = AnnotationContext::new()
                    .field("name", frame.categories[ci].clone())
                    .field("series", s.name.clone())
                    .field("value", format_value(v));
                if let Some(text) = hover_text(style, &ctx) {
                    node = node.with_interaction(Interaction::hover(text));
                }
                scene.push(node);
            }
        }

        if show_legend {
            let legend = LegendSpec::new(legend_entries).with_text_color(text_color);
            scene.extend(legend.nodes(chrome.legend_origin(&margins), &HeuristicTextMeasurer));
        }

        chrome.tooltip(&mut scene, input.view);
        scene
    }
}

/// Maps a style label field to an axis title: blank means none.
pub(crate) fn opt_label(label: &str) -> Option<String> {
    let trimmed = label.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_owned())
}
