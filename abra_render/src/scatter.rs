// Copyright 2025 the Abra Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Scatter plot.
//!
//! Columns are positional: point name, x value, y value, and an optional
//! fourth grouping column that drives colors and the legend. Both axis
//! domains are recomputed from the points that survive filtering, so
//! toggling a group re-fits the viewport to what remains.

use abra_charts::{
    AnnotationContext, AxisSpec, ColorResolver, HeuristicTextMeasurer, LegendEntry, LegendSpec,
    ScaleLinear, z_order,
};
use abra_core::{Interaction, NodeId, Primitive, Scene, SceneNode};
use kurbo::Point;
use peniko::Brush;

use crate::bar::opt_label;
use crate::frame::Chrome;
use crate::series::{format_value, hover_text};
use crate::{RenderInput, Renderer};

/// The scatter plot renderer.
pub struct ScatterRenderer;

struct ScatterPoint {
    name: String,
    x: f64,
    y: f64,
    group: Option<String>,
}

impl Renderer for ScatterRenderer {
    fn render(&self, input: &RenderInput<'_>) -> Scene {
        let chrome = Chrome::new(input);
        let style = input.style;
        let table = input.table;
        let has_groups = table.row(0).is_some_and(|r| r.len() >= 4);

        // Group labels in first-seen row order, for stable legend slots.
        let mut groups: Vec<String> = Vec::new();
        let mut points = Vec::new();
        for r in table.data_rows() {
            let name = table.text(r, 0);
            let x = table.number(r, 1);
            let y = table.number(r, 2);
            if !x.is_finite() || !y.is_finite() {
                continue;
            }
            let group = has_groups.then(|| table.text(r, 3)).filter(|g| !g.is_empty());
            if let Some(g) = &group {
                if !groups.contains(g) {
                    groups.push(g.clone());
                }
            }
            points.push(ScatterPoint { name, x, y, group });
        }

        let show_legend = style.show_legend && !groups.is_empty();
        let margins = chrome.margins(show_legend, true);
        let plot = margins.plot_rect();

        let mut scene = Scene::new();
        chrome.base_nodes(&mut scene);
        if points.is_empty() {
            chrome.tooltip(&mut scene, input.view);
            return scene;
        }

        let mut resolver = ColorResolver::from_style(&style.custom_colors, &style.palette);
        let group_colors: Vec<_> = groups.iter().map(|g| resolver.resolve(g)).collect();
        let default_color = resolver.resolve("");

        // Filtered points only; hidden groups drop out of the domain too.
        let visible: Vec<&ScatterPoint> = points
            .iter()
            .filter(|p| p.group.as_deref().is_none_or(|g| input.view.is_visible(g)))
            .collect();

        let xs: Vec<f64> = visible.iter().map(|p| p.x).collect();
        let ys: Vec<f64> = visible.iter().map(|p| p.y).collect();
        let x_scale = ScaleLinear::from_extent(xs.iter(), (plot.x0, plot.x1)).nice(5);
        let y_scale = ScaleLinear::from_extent(ys.iter(), (plot.y1, plot.y0)).nice(5);

        let text_color = chrome.text_color();
        let axis = AxisSpec::new(NodeId::from_key("scatter/axis").0)
            .with_grid(style.show_grid)
            .with_color(text_color)
            .with_labels(style.show_axis_labels)
            .with_titles(opt_label(&style.x_axis_label), opt_label(&style.y_axis_label));
        scene.extend(axis.value_x_nodes(plot, &x_scale));
        scene.extend(axis.value_y_nodes(plot, &y_scale));

        let alpha = chrome.series_alpha();
        for p in &visible {
            let color = match &p.group {
                Some(g) => group_colors[groups.iter().position(|x| x == g).unwrap_or(0)],
                None => default_color,
            };
            let mut node = SceneNode::new(
                NodeId::from_key(&format!("scatter/{}/{}", p.name, p.group.as_deref().unwrap_or(""))),
                z_order::SERIES_POINTS,
                Primitive::Circle {
                    center: Point::new(x_scale.map(p.x), y_scale.map(p.y)),
                    radius: 4.0,
                    fill: Brush::Solid(color.with_alpha(alpha)),
                    stroke: None,
                },
            );
            let mut ctx = AnnotationContext::new()
                .field("name", p.name.clone())
                .field("x", format_value(p.x))
                .field("y", format_value(p.y))
                .field("value", format!("{}, {}", format_value(p.x), format_value(p.y)));
            if let Some(g) = &p.group {
                ctx = ctx.field("series", g.clone());
            }
            if let Some(text) = hover_text(style, &ctx) {
                node = node.with_interaction(Interaction::hover(text));
            }
            scene.push(node);
        }

        if show_legend {
            let entries: Vec<_> = groups
                .iter()
                .zip(&group_colors)
                .map(|(g, c)| {
                    LegendEntry::new(g.clone(), *c).with_enabled(input.view.is_visible(g))
                })
                .collect();
            let legend = LegendSpec::new(entries).with_text_color(text_color);
            scene.extend(legend.nodes(chrome.legend_origin(&margins), &HeuristicTextMeasurer));
        }

        chrome.tooltip(&mut scene, input.view);
        scene
    }
}
