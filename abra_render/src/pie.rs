// Copyright 2025 the Abra Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Pie chart with keyed arc transitions.
//!
//! The pie reads label/value pairs from the first two columns. Slices with
//! non-positive or non-numeric values are excluded entirely (a zero-angle
//! wedge is indistinguishable from absence, so it does not get a node).
//! [`arc_transition`] interpolates angle pairs between two slice sets for
//! the shell's animation loop; the renderer itself always draws the final
//! state.

use std::f64::consts::{FRAC_PI_2, PI};

use abra_charts::{
    AnnotationContext, ColorResolver, HeuristicTextMeasurer, LegendEntry, LegendSpec,
    contrast_text_color, z_order,
};
use abra_core::{
    Interaction, Interpolate, KeyedOp, NodeId, Primitive, Scene, SceneNode, diff_keyed,
    ease_cubic_in_out,
};
use kurbo::{CircleSegment, Point, Shape};
use peniko::{Brush, Color};

use crate::frame::Chrome;
use crate::series::{format_value, hover_text};
use crate::{RenderInput, Renderer, ViewState};

/// One computed pie wedge.
#[derive(Clone, Debug, PartialEq)]
pub struct PieSlice {
    /// Category label.
    pub label: String,
    /// The source value.
    pub value: f64,
    /// Share of the visible total, in `0..=1`.
    pub fraction: f64,
    /// Start angle in radians; 12 o'clock is `-PI/2`, angles grow clockwise.
    pub start_angle: f64,
    /// Sweep angle in radians.
    pub sweep_angle: f64,
    /// Resolved display color.
    pub color: Color,
}

/// Computes the visible slices for a table.
pub(crate) fn compute_slices(
    input: &RenderInput<'_>,
    view: &ViewState,
) -> (Vec<PieSlice>, Vec<LegendEntry>) {
    let style = input.style;
    let table = input.table;
    let mut resolver = ColorResolver::from_style(&style.custom_colors, &style.palette);

    struct Row {
        label: String,
        value: f64,
        color: Color,
        visible: bool,
    }

    let mut rows = Vec::new();
    for r in table.data_rows() {
        let label = table.text(r, 0);
        let label = label.trim();
        if label.is_empty() {
            continue;
        }
        let value = table.number(r, 1);
        if !value.is_finite() || value <= 0.0 {
            continue;
        }
        let color = resolver.resolve(label);
        rows.push(Row {
            label: label.to_owned(),
            value,
            color,
            visible: view.is_visible(label),
        });
    }

    let legend = rows
        .iter()
        .map(|r| LegendEntry::new(r.label.clone(), r.color).with_enabled(r.visible))
        .collect();

    let total: f64 = rows.iter().filter(|r| r.visible).map(|r| r.value).sum();
    let mut slices = Vec::new();
    if total > 0.0 {
        let mut angle = -FRAC_PI_2;
        for row in rows.into_iter().filter(|r| r.visible) {
            let fraction = row.value / total;
            let sweep = fraction * 2.0 * PI;
            slices.push(PieSlice {
                label: row.label,
                value: row.value,
                fraction,
                start_angle: angle,
                sweep_angle: sweep,
                color: row.color,
            });
            angle += sweep;
        }
    }
    (slices, legend)
}

/// Interpolates between two slice sets at eased fraction `t`.
///
/// Slices are keyed by label: survivors lerp their angle pair, entering
/// slices grow from a zero sweep at their target start, and exiting slices
/// shrink in place. At `t = 1` the result equals `next` exactly.
pub fn arc_transition(prev: &[PieSlice], next: &[PieSlice], t: f64) -> Vec<PieSlice> {
    let t = ease_cubic_in_out(t);
    let prev_keyed: Vec<(String, PieSlice)> =
        prev.iter().map(|s| (s.label.clone(), s.clone())).collect();
    let next_keyed: Vec<(String, PieSlice)> =
        next.iter().map(|s| (s.label.clone(), s.clone())).collect();

    let mut out = Vec::new();
    for op in diff_keyed(&prev_keyed, &next_keyed) {
        match op {
            KeyedOp::Update { prev, next, .. } => {
                let (start, sweep) = (prev.start_angle, prev.sweep_angle)
                    .lerp(&(next.start_angle, next.sweep_angle), t);
                out.push(PieSlice {
                    start_angle: start,
                    sweep_angle: sweep,
                    ..next
                });
            }
            KeyedOp::Enter { next, .. } => {
                let sweep = 0.0.lerp(&next.sweep_angle, t);
                out.push(PieSlice {
                    sweep_angle: sweep,
                    ..next
                });
            }
            KeyedOp::Exit { prev, .. } => {
                let sweep = prev.sweep_angle.lerp(&0.0, t);
                if sweep > 1e-6 {
                    out.push(PieSlice {
                        sweep_angle: sweep,
                        ..prev
                    });
                }
            }
        }
    }
    out
}

/// Pushes wedge (and optional percentage label) nodes for a slice set.
pub(crate) fn slice_nodes(
    scene: &mut Scene,
    input: &RenderInput<'_>,
    slices: &[PieSlice],
    center: Point,
    radius: f64,
    inner_radius: f64,
) {
    let style = input.style;
    for slice in slices {
        let segment = CircleSegment::new(
            center,
            radius,
            inner_radius,
            slice.start_angle,
            slice.sweep_angle,
        );
        let mut node = SceneNode::new(
            NodeId::from_key(&format!("pie/{}", slice.label)),
            z_order::SERIES_FILL,
            Primitive::Path {
                path: segment.to_path(0.1),
                fill: Some(Brush::Solid(slice.color)),
                stroke: None,
            },
        );
        let ctx = AnnotationContext::new()
            .field("name", slice.label.clone())
            .field("value", format_value(slice.value))
            .field("percent", format_value(slice.fraction * 100.0));
        if let Some(text) = hover_text(style, &ctx) {
            node = node.with_interaction(Interaction::hover(text));
        }
        scene.push(node);

        if style.show_percentages && slice.fraction >= 0.03 {
            let mid = slice.start_angle + slice.sweep_angle * 0.5;
            let label_r = (radius + inner_radius) * 0.5 + (radius - inner_radius) * 0.1;
            scene.push(SceneNode::new(
                NodeId::from_key(&format!("pie/{}", slice.label)).offset(1),
                z_order::SERIES_LABELS,
                Primitive::Text {
                    pos: Point::new(
                        center.x + mid.cos() * label_r,
                        center.y + mid.sin() * label_r,
                    ),
                    text: format!("{}%", format_value((slice.fraction * 100.0).round())),
                    font_size: 11.0,
                    font_family: Some(style.font_family.clone()),
                    fill: Brush::Solid(contrast_text_color(slice.color)),
                    anchor: abra_core::TextAnchor::Middle,
                    baseline: abra_core::TextBaseline::Middle,
                },
            ));
        }
    }
}

/// The pie chart renderer.
pub struct PieRenderer;

impl Renderer for PieRenderer {
    fn render(&self, input: &RenderInput<'_>) -> Scene {
        let chrome = Chrome::new(input);
        let style = input.style;
        let (slices, legend_entries) = compute_slices(input, input.view);

        let show_legend = style.show_legend && !legend_entries.is_empty();
        let margins = chrome.margins(show_legend, false);
        let plot = margins.plot_rect();

        let mut scene = Scene::new();
        chrome.base_nodes(&mut scene);

        if !slices.is_empty() {
            let center = plot.center();
            let radius = (plot.width().min(plot.height()) * 0.5 - 4.0).max(1.0);
            slice_nodes(&mut scene, input, &slices, center, radius, 0.0);
        }

        if show_legend {
            let legend =
                LegendSpec::new(legend_entries).with_text_color(chrome.text_color());
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

    fn input<'a>(
        table: &'a Table,
        style: &'a StyleState,
        view: &'a ViewState,
    ) -> RenderInput<'a> {
        RenderInput {
            table,
            historical: None,
            style,
            width: 600.0,
            height: 400.0,
            view,
            model_id: 2,
        }
    }

    #[test]
    fn nonpositive_values_are_excluded() {
        let table = Table::from_strings([
            ["Label", "Value"],
            ["a", "3"],
            ["b", "0"],
            ["c", "-2"],
            ["d", "abc"],
            ["e", "1"],
        ]);
        let style = StyleState::studio_default();
        let view = ViewState::new();
        let (slices, _) = compute_slices(&input(&table, &style, &view), &view);
        let labels: Vec<_> = slices.iter().map(|s| s.label.as_str()).collect();
        assert_eq!(labels, ["a", "e"]);
        let total: f64 = slices.iter().map(|s| s.fraction).sum();
        assert!((total - 1.0).abs() < 1e-9);
    }

    #[test]
    fn sweeps_cover_the_full_circle() {
        let table = Table::from_strings([["Label", "Value"], ["a", "1"], ["b", "3"]]);
        let style = StyleState::studio_default();
        let view = ViewState::new();
        let (slices, _) = compute_slices(&input(&table, &style, &view), &view);
        let total: f64 = slices.iter().map(|s| s.sweep_angle).sum();
        assert!((total - 2.0 * PI).abs() < 1e-9);
        assert_eq!(slices[0].start_angle, -FRAC_PI_2);
    }

    #[test]
    fn hidden_slices_redistribute_the_total() {
        let table = Table::from_strings([["Label", "Value"], ["a", "1"], ["b", "1"]]);
        let style = StyleState::studio_default();
        let mut view = ViewState::new();
        view.toggle_series("b");
        let (slices, legend) = compute_slices(&input(&table, &style, &view), &view);
        assert_eq!(slices.len(), 1);
        assert!((slices[0].fraction - 1.0).abs() < 1e-9);
        // The hidden entry stays in the legend, dimmed.
        assert_eq!(legend.len(), 2);
        assert!(!legend[1].enabled);
    }

    #[test]
    fn transition_lands_exactly_on_next() {
        let table = Table::from_strings([["Label", "Value"], ["a", "1"], ["b", "3"]]);
        let style = StyleState::studio_default();
        let view = ViewState::new();
        let (next, _) = compute_slices(&input(&table, &style, &view), &view);

        let out = arc_transition(&[], &next, 1.0);
        assert_eq!(out, next);
    }

    #[test]
    fn exiting_slices_shrink_and_vanish() {
        let table = Table::from_strings([["Label", "Value"], ["a", "1"], ["b", "3"]]);
        let style = StyleState::studio_default();
        let view = ViewState::new();
        let (prev, _) = compute_slices(&input(&table, &style, &view), &view);

        let halfway = arc_transition(&prev, &[], 0.5);
        assert_eq!(halfway.len(), 2);
        assert!(halfway[0].sweep_angle < prev[0].sweep_angle);

        assert!(arc_transition(&prev, &[], 1.0).is_empty());
    }
}
