// Copyright 2025 the Abra Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Multi-series line chart.
//!
//! Categories map to x positions through a point scale; each visible series
//! becomes one polyline plus hoverable point markers. The value axis is
//! scaled over every series, hidden or not, so legend toggles isolate a
//! line without re-scaling the remaining ones.

use abra_charts::{
    AnnotationContext, AxisSpec, ColorResolver, HeuristicTextMeasurer, LegendEntry, LegendSpec,
    ScaleBand, ScaleLinear, ScalePoint, z_order,
};
use abra_core::{Interaction, NodeId, Primitive, Scene, SceneNode, Stroke};
use kurbo::{BezPath, Point};
use peniko::Brush;

use crate::bar::opt_label;
use crate::frame::Chrome;
use crate::series::{CategoryFrame, format_value, hover_text};
use crate::{RenderInput, Renderer};

/// The line chart renderer.
pub struct LineRenderer;

impl Renderer for LineRenderer {
    fn render(&self, input: &RenderInput<'_>) -> Scene {
        let chrome = Chrome::new(input);
        let style = input.style;
        let frame = CategoryFrame::extract(input.table, input.view);

        let show_legend = style.show_legend && !frame.series.is_empty();
        let margins = chrome.margins(show_legend, true);
        let plot = margins.plot_rect();

        let mut scene = Scene::new();
        chrome.base_nodes(&mut scene);
        if frame.is_empty() {
            chrome.tooltip(&mut scene, input.view);
            return scene;
        }

        let points = ScalePoint::new((0.0, margins.inner_width), frame.categories.len());
        // Domain over every series, visible or not.
        let y_scale = ScaleLinear::zero_to_max(
            frame.series.iter().flat_map(|s| s.values.iter()),
            (plot.y1, plot.y0),
        )
        .nice(5);

        let text_color = chrome.text_color();
        let axis = AxisSpec::new(NodeId::from_key("line/axis").0)
            .with_grid(style.show_grid)
            .with_color(text_color)
            .with_labels(style.show_axis_labels)
            .with_titles(opt_label(&style.x_axis_label), opt_label(&style.y_axis_label));
        // Category labels sit at point positions; reuse a zero-padding band.
        let label_band = ScaleBand::new((0.0, margins.inner_width), frame.categories.len())
            .with_padding(0.0);
        scene.extend(axis.category_x_nodes(plot, &label_band, &frame.categories));
        scene.extend(axis.value_y_nodes(plot, &y_scale));

        let mut resolver = ColorResolver::from_style(&style.custom_colors, &style.palette);
        let mut legend_entries = Vec::new();

        for s in &frame.series {
            let color = resolver.resolve(&s.name);
            legend_entries.push(LegendEntry::new(s.name.clone(), color).with_enabled(s.visible));
            if !s.visible {
                continue;
            }

            // Non-numeric cells break the polyline into segments.
            let mut path = BezPath::new();
            let mut pen_down = false;
            for (ci, &v) in s.values.iter().enumerate() {
                if !v.is_finite() {
                    pen_down = false;
                    continue;
                }
                let p = Point::new(plot.x0 + points.position(ci), y_scale.map(v));
                if pen_down {
                    path.line_to(p);
                } else {
                    path.move_to(p);
                    pen_down = true;
                }
            }
            if path.elements().is_empty() {
                continue;
            }
            scene.push(SceneNode::new(
                NodeId::from_key(&format!("line/{}", s.name)),
                z_order::SERIES_STROKE,
                Primitive::Path {
                    path,
                    fill: None,
                    stroke: Some(Stroke::solid(color, 2.0)),
                },
            ));

            for (ci, &v) in s.values.iter().enumerate() {
                if !v.is_finite() {
                    continue;
                }
                let mut node = SceneNode::new(
                    NodeId::from_key(&format!("line/{}/{}", s.name, frame.categories[ci])),
                    z_order::SERIES_POINTS,
                    Primitive::Circle {
                        center: Point::new(plot.x0 + points.position(ci), y_scale.map(v)),
                        radius: 3.0,
                        fill: Brush::Solid(color),
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
