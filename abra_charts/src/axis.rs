// Copyright 2025 the Abra Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Axis guide generation.
//!
//! The studio charts use at most two axes: an x-axis below the plot
//! (categorical for the band charts, linear for scatter) and a linear value
//! y-axis on the left, with optional gridlines spanning the plot area. Axis
//! nodes are plain scene nodes like everything else; layout has already
//! reserved their margin space.

use abra_core::{NodeId, Primitive, SceneNode, Stroke, TextAnchor, TextBaseline};
use kurbo::{Line, Point, Rect, Shape};
use peniko::{Brush, Color};
use peniko::color::palette::css;

use crate::scale::{ScaleBand, ScaleLinear};
use crate::z_order;

/// Gridline styling.
#[derive(Clone, Debug, PartialEq)]
pub struct GridStyle {
    /// Stroke used for gridlines.
    pub stroke: Stroke,
}

impl Default for GridStyle {
    fn default() -> Self {
        Self {
            stroke: Stroke::solid(css::BLACK.with_alpha(40.0 / 255.0), 1.0),
        }
    }
}

/// Axis configuration shared by the cartesian chart kinds.
#[derive(Clone, Debug)]
pub struct AxisSpec {
    /// Stable-id base; generated nodes use deterministic offsets from it.
    pub id_base: u64,
    /// Tick/category label font size.
    pub font_size: f64,
    /// Label and rule color.
    pub color: Color,
    /// Gridlines behind the series, when enabled.
    pub grid: Option<GridStyle>,
    /// Whether tick/category labels are drawn.
    pub show_labels: bool,
    /// Optional x-axis title (drawn below the tick labels).
    pub x_title: Option<String>,
    /// Optional y-axis title (drawn rotated is out of scope; left of ticks).
    pub y_title: Option<String>,
    /// Approximate y tick count.
    pub tick_count: usize,
}

impl AxisSpec {
    /// Creates an axis spec with studio defaults.
    pub fn new(id_base: u64) -> Self {
        Self {
            id_base,
            font_size: 11.0,
            color: css::BLACK,
            grid: None,
            show_labels: true,
            x_title: None,
            y_title: None,
            tick_count: 5,
        }
    }

    /// Enables default gridlines.
    pub fn with_grid(mut self, grid: bool) -> Self {
        self.grid = grid.then(GridStyle::default);
        self
    }

    /// Sets the label/rule color.
    pub fn with_color(mut self, color: Color) -> Self {
        self.color = color;
        self
    }

    /// Sets the axis titles from the style state's label fields.
    pub fn with_titles(mut self, x: Option<String>, y: Option<String>) -> Self {
        self.x_title = x;
        self.y_title = y;
        self
    }

    /// Enables or disables tick/category labels.
    pub fn with_labels(mut self, show: bool) -> Self {
        self.show_labels = show;
        self
    }

    /// Generates category labels under the plot for a band scale.
    pub fn category_x_nodes(
        &self,
        plot: Rect,
        band: &ScaleBand,
        labels: &[String],
    ) -> Vec<SceneNode> {
        let mut out = vec![self.baseline_rule(plot)];
        if self.show_labels {
            for (i, label) in labels.iter().enumerate() {
                out.push(SceneNode::new(
                    NodeId::from_raw(self.id_base).offset(i as u64),
                    z_order::AXIS_LABELS,
                    Primitive::Text {
                        pos: Point::new(plot.x0 + band.center(i), plot.y1 + 4.0),
                        text: label.clone(),
                        font_size: self.font_size,
                        font_family: None,
                        fill: Brush::Solid(self.color),
                        anchor: TextAnchor::Middle,
                        baseline: TextBaseline::Hanging,
                    },
                ));
            }
        }
        if let Some(title) = &self.x_title {
            out.push(SceneNode::new(
                NodeId::from_raw(self.id_base).offset(900),
                z_order::AXIS_TITLES,
                Primitive::Text {
                    pos: Point::new(plot.center().x, plot.y1 + self.font_size + 12.0),
                    text: title.clone(),
                    font_size: self.font_size + 1.0,
                    font_family: None,
                    fill: Brush::Solid(self.color),
                    anchor: TextAnchor::Middle,
                    baseline: TextBaseline::Hanging,
                },
            ));
        }
        out
    }

    /// Generates value ticks, labels, gridlines, and the optional title for
    /// a bottom linear axis, e.g. the scatter x-axis.
    ///
    /// The scale's range is expected to be `(plot.x0, plot.x1)` absolute.
    pub fn value_x_nodes(&self, plot: Rect, scale: &ScaleLinear) -> Vec<SceneNode> {
        let mut out = vec![self.baseline_rule(plot)];

        for (i, tick) in scale.ticks(self.tick_count).iter().enumerate() {
            let x = scale.map(*tick);
            if x < plot.x0 - 0.5 || x > plot.x1 + 0.5 {
                continue;
            }

            if let Some(grid) = &self.grid {
                out.push(SceneNode::new(
                    NodeId::from_raw(self.id_base).offset(4000 + i as u64),
                    z_order::GRID_LINES,
                    Primitive::Path {
                        path: Line::new((x, plot.y0), (x, plot.y1)).to_path(0.1),
                        fill: None,
                        stroke: Some(grid.stroke.clone()),
                    },
                ));
            }

            if self.show_labels {
                out.push(SceneNode::new(
                    NodeId::from_raw(self.id_base).offset(3000 + i as u64),
                    z_order::AXIS_LABELS,
                    Primitive::Text {
                        pos: Point::new(x, plot.y1 + 4.0),
                        text: format_tick(*tick),
                        font_size: self.font_size,
                        font_family: None,
                        fill: Brush::Solid(self.color),
                        anchor: TextAnchor::Middle,
                        baseline: TextBaseline::Hanging,
                    },
                ));
            }
        }

        if let Some(title) = &self.x_title {
            out.push(SceneNode::new(
                NodeId::from_raw(self.id_base).offset(900),
                z_order::AXIS_TITLES,
                Primitive::Text {
                    pos: Point::new(plot.center().x, plot.y1 + self.font_size + 12.0),
                    text: title.clone(),
                    font_size: self.font_size + 1.0,
                    font_family: None,
                    fill: Brush::Solid(self.color),
                    anchor: TextAnchor::Middle,
                    baseline: TextBaseline::Hanging,
                },
            ));
        }

        out
    }

    /// Generates value ticks, labels, gridlines, and the optional title for
    /// a left-hand linear axis.
    ///
    /// The scale's range is expected to already be `(plot.y1, plot.y0)`
    /// relative coordinates, i.e. mapping data values to absolute scene y.
    pub fn value_y_nodes(&self, plot: Rect, scale: &ScaleLinear) -> Vec<SceneNode> {
        let mut out = vec![SceneNode::new(
            NodeId::from_raw(self.id_base).offset(801),
            z_order::AXIS_RULES,
            Primitive::Path {
                path: Line::new((plot.x0, plot.y0), (plot.x0, plot.y1)).to_path(0.1),
                fill: None,
                stroke: Some(Stroke::solid(self.color.with_alpha(0.6), 1.0)),
            },
        )];
        let ticks = scale.ticks(self.tick_count);

        for (i, tick) in ticks.iter().enumerate() {
            let y = scale.map(*tick);
            if y < plot.y0 - 0.5 || y > plot.y1 + 0.5 {
                continue;
            }

            if let Some(grid) = &self.grid {
                out.push(SceneNode::new(
                    NodeId::from_raw(self.id_base).offset(2000 + i as u64),
                    z_order::GRID_LINES,
                    Primitive::Path {
                        path: Line::new((plot.x0, y), (plot.x1, y)).to_path(0.1),
                        fill: None,
                        stroke: Some(grid.stroke.clone()),
                    },
                ));
            }

            if self.show_labels {
                out.push(SceneNode::new(
                    NodeId::from_raw(self.id_base).offset(1000 + i as u64),
                    z_order::AXIS_LABELS,
                    Primitive::Text {
                        pos: Point::new(plot.x0 - 6.0, y),
                        text: format_tick(*tick),
                        font_size: self.font_size,
                        font_family: None,
                        fill: Brush::Solid(self.color),
                        anchor: TextAnchor::End,
                        baseline: TextBaseline::Middle,
                    },
                ));
            }
        }

        if let Some(title) = &self.y_title {
            out.push(SceneNode::new(
                NodeId::from_raw(self.id_base).offset(901),
                z_order::AXIS_TITLES,
                Primitive::Text {
                    pos: Point::new(plot.x0 - 6.0, plot.y0 - 8.0),
                    text: title.clone(),
                    font_size: self.font_size + 1.0,
                    font_family: None,
                    fill: Brush::Solid(self.color),
                    anchor: TextAnchor::End,
                    baseline: TextBaseline::Alphabetic,
                },
            ));
        }

        out
    }

    /// The domain rule along the plot's bottom edge.
    fn baseline_rule(&self, plot: Rect) -> SceneNode {
        SceneNode::new(
            NodeId::from_raw(self.id_base).offset(800),
            z_order::AXIS_RULES,
            Primitive::Path {
                path: Line::new((plot.x0, plot.y1), (plot.x1, plot.y1)).to_path(0.1),
                fill: None,
                stroke: Some(Stroke::solid(self.color.with_alpha(0.6), 1.0)),
            },
        )
    }
}

/// Formats a tick value, trimming floating-point noise.
fn format_tick(v: f64) -> String {
    if v == v.trunc() && v.abs() < 1e15 {
        format!("{}", v as i64)
    } else {
        let s = format!("{v:.2}");
        s.trim_end_matches('0').trim_end_matches('.').to_owned()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn category_labels_follow_band_centers() {
        let plot = Rect::new(40.0, 20.0, 240.0, 220.0);
        let band = ScaleBand::new((0.0, 200.0), 2);
        let labels = vec!["x".to_owned(), "y".to_owned()];
        let nodes = AxisSpec::new(1).category_x_nodes(plot, &band, &labels);
        let texts: Vec<_> = nodes
            .iter()
            .filter_map(|n| match &n.primitive {
                Primitive::Text { pos, .. } => Some(*pos),
                _ => None,
            })
            .collect();
        assert_eq!(texts.len(), 2);
        assert_eq!(texts[0].x, plot.x0 + band.center(0));
    }

    #[test]
    fn value_x_axis_emits_labels_grid_and_title() {
        let plot = Rect::new(40.0, 20.0, 240.0, 220.0);
        let scale = ScaleLinear::new((0.0, 10.0), (plot.x0, plot.x1));
        let nodes = AxisSpec::new(1)
            .with_grid(true)
            .with_titles(Some("Horizontal".to_owned()), None)
            .value_x_nodes(plot, &scale);
        assert!(nodes.iter().any(|n| n.z_index == z_order::GRID_LINES));
        // Tick labels sit below the plot edge.
        assert!(nodes.iter().any(|n| matches!(
            &n.primitive,
            Primitive::Text { pos, .. } if pos.y > plot.y1
        )));
        assert!(nodes.iter().any(|n| matches!(
            &n.primitive,
            Primitive::Text { text, .. } if text == "Horizontal"
        )));
    }

    #[test]
    fn both_axes_carry_a_domain_rule() {
        let plot = Rect::new(40.0, 20.0, 240.0, 220.0);
        let scale = ScaleLinear::new((0.0, 10.0), (plot.y1, plot.y0));
        let y = AxisSpec::new(1).value_y_nodes(plot, &scale);
        assert!(y.iter().any(|n| n.z_index == z_order::AXIS_RULES));
        let x = AxisSpec::new(1).value_x_nodes(plot, &ScaleLinear::new((0.0, 10.0), (plot.x0, plot.x1)));
        assert!(x.iter().any(|n| n.z_index == z_order::AXIS_RULES));
    }

    #[test]
    fn grid_lines_span_the_plot() {
        let plot = Rect::new(40.0, 20.0, 240.0, 220.0);
        let scale = ScaleLinear::new((0.0, 10.0), (plot.y1, plot.y0));
        let nodes = AxisSpec::new(1).with_grid(true).value_y_nodes(plot, &scale);
        assert!(nodes.iter().any(|n| n.z_index == z_order::GRID_LINES));
        assert!(nodes.iter().any(|n| n.z_index == z_order::AXIS_LABELS));
    }

    #[test]
    fn hidden_labels_still_allow_grid() {
        let plot = Rect::new(0.0, 0.0, 100.0, 100.0);
        let scale = ScaleLinear::new((0.0, 1.0), (plot.y1, plot.y0));
        let nodes = AxisSpec::new(1)
            .with_grid(true)
            .with_labels(false)
            .value_y_nodes(plot, &scale);
        assert!(nodes.iter().all(|n| n.z_index != z_order::AXIS_LABELS));
        assert!(!nodes.is_empty());
    }

    #[test]
    fn tick_formatting_is_compact() {
        assert_eq!(format_tick(100.0), "100");
        assert_eq!(format_tick(0.5), "0.5");
    }
}
