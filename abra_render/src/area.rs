// Copyright 2025 the Abra Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Multi-series area chart.
//!
//! Each visible series fills the region between its polyline and the zero
//! baseline, drawn oldest-column-first so later series overlay earlier
//! ones at reduced opacity. The value axis follows the line chart's
//! contract: scaled over every series so legend toggles never re-scale.

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

/// The area chart renderer.
pub struct AreaRenderer;

impl Renderer for AreaRenderer {
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
        let baseline = y_scale.map(0.0).clamp(plot.y0, plot.y1);

        let text_color = chrome.text_color();
        let axis = AxisSpec::new(NodeId::from_key("area/axis").0)
            .with_grid(style.show_grid)
            .with_color(text_color)
            .with_labels(style.show_axis_labels)
            .with_titles(opt_label(&style.x_axis_label), opt_label(&style.y_axis_label));
        let label_band = ScaleBand::new((0.0, margins.inner_width), frame.categories.len())
            .with_padding(0.0);
        scene.extend(axis.category_x_nodes(plot, &label_band, &frame.categories));
        scene.extend(axis.value_y_nodes(plot, &y_scale));

        let mut resolver = ColorResolver::from_style(&style.custom_colors, &style.palette);
        let fill_alpha = chrome.series_alpha() * 0.6;
        let mut legend_entries = Vec::new();

        for s in &frame.series {
            let color = resolver.resolve(&s.name);
            legend_entries.push(LegendEntry::new(s.name.clone(), color).with_enabled(s.visible));
            if !s.visible {
                continue;
            }

            // Gaps split the series into independently closed regions.
            let mut fill = BezPath::new();
            let mut stroke = BezPath::new();
            let mut run: Vec<Point> = Vec::new();
            let flush = |run: &mut Vec<Point>, fill: &mut BezPath, stroke: &mut BezPath| {
                if run.is_empty() {
                    return;
                }
                stroke.move_to(run[0]);
                for p in &run[1..] {
                    stroke.line_to(*p);
                }
                fill.move_to(Point::new(run[0].x, baseline));
                for p in run.iter() {
                    fill.line_to(*p);
                }
                fill.line_to(Point::new(run[run.len() - 1].x, baseline));
                fill.close_path();
                run.clear();
            };
            for (ci, &v) in s.values.iter().enumerate() {
                if !v.is_finite() {
                    flush(&mut run, &mut fill, &mut stroke);
                    continue;
                }
                run.push(Point::new(
                    plot.x0 + points.position(ci),
                    y_scale.map(v.max(0.0)),
                ));
            }
            flush(&mut run, &mut fill, &mut stroke);
            if fill.elements().is_empty() {
                continue;
            }

            scene.push(SceneNode::new(
                NodeId::from_key(&format!("area/{}", s.name)),
                z_order::SERIES_FILL,
                Primitive::Path {
                    path: fill,
                    fill: Some(Brush::Solid(color.with_alpha(fill_alpha))),
                    stroke: None,
                },
            ));
            scene.push(SceneNode::new(
                NodeId::from_key(&format!("area/{}", s.name)).offset(1),
                z_order::SERIES_STROKE,
                Primitive::Path {
                    path: stroke,
                    fill: None,
                    stroke: Some(Stroke::solid(color, 2.0)),
                },
            ));

            for (ci, &v) in s.values.iter().enumerate() {
                if !v.is_finite() {
                    continue;
                }
                let mut node = SceneNode::new(
                    NodeId::from_key(&format!("area/{}/{}", s.name, frame.categories[ci])),
                    z_order::SERIES_POINTS,
                    Primitive::Circle {
                        center: Point::new(
                            plot.x0 + points.position(ci),
                            y_scale.map(v.max(0.0)),
                        ),
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

#[cfg(test)]
mod tests {
    use abra_core::Table;
    use abra_style::StyleState;

    use super::*;
    use crate::ViewState;

    fn render_with(view: &ViewState) -> Scene {
        let table = Table::from_strings([
            ["Period", "A", "B"],
            ["1", "2", "10"],
            ["2", "1", "4"],
        ]);
        let style = StyleState::studio_default();
        let input = RenderInput {
            table: &table,
            historical: None,
            style: &style,
            width: 600.0,
            height: 400.0,
            view,
            model_id: 1,
        };
        AreaRenderer.render(&input)
    }

    #[test]
    fn fills_are_closed_and_below_strokes() {
        let scene = render_with(&ViewState::new());
        let fill = scene.find(NodeId::from_key("area/A")).unwrap();
        let stroke = scene.find(NodeId::from_key("area/A").offset(1)).unwrap();
        assert!(fill.z_index < stroke.z_index);
        let Primitive::Path { path, .. } = &fill.primitive else {
            panic!("expected path");
        };
        assert!(path
            .elements()
            .iter()
            .any(|e| matches!(e, kurbo::PathEl::ClosePath)));
    }

    #[test]
    fn hidden_series_keeps_the_domain() {
        let all = render_with(&ViewState::new());
        let point = |scene: &Scene| {
            let node = scene.find(NodeId::from_key("area/A/1")).unwrap();
            match node.primitive {
                Primitive::Circle { center, .. } => center.y,
                _ => panic!("expected circle"),
            }
        };
        let before = point(&all);

        let mut view = ViewState::new();
        view.toggle_series("B");
        let filtered = render_with(&view);
        assert_eq!(point(&filtered), before);
    }
}
