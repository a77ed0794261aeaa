// Copyright 2025 the Abra Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! SVG serialization for Abra scenes.
//!
//! Scenes are serialized in paint order, one element per node, so the SVG
//! overlap matches the renderer's z-order exactly. Plain text becomes
//! `<text>`; rich-text blocks become a `<foreignObject>` carrying their
//! markup, which is how the exported article block keeps inline formatting.

use std::fmt::Write as _;

use abra_core::{Primitive, Scene, Stroke, TextAnchor, TextBaseline};
use peniko::{Brush, Color};

/// Serializes a scene to a standalone SVG document.
pub fn to_svg(scene: &Scene, width: f64, height: f64) -> String {
    let mut out = String::new();
    let _ = write!(
        out,
        r#"<svg xmlns="http://www.w3.org/2000/svg" width="{width}" height="{height}" viewBox="0 0 {width} {height}">"#
    );
    out.push('\n');

    for node in scene.paint_order() {
        match &node.primitive {
            Primitive::Rect { rect, fill, stroke } => {
                let _ = write!(
                    out,
                    r#"<rect x="{}" y="{}" width="{}" height="{}" fill="{}"{}/>"#,
                    fmt(rect.x0),
                    fmt(rect.y0),
                    fmt(rect.width().max(0.0)),
                    fmt(rect.height().max(0.0)),
                    brush_attr(fill),
                    stroke_attrs(stroke.as_ref()),
                );
            }
            Primitive::Path { path, fill, stroke } => {
                let fill_attr = match fill {
                    Some(b) => brush_attr(b),
                    None => "none".to_owned(),
                };
                let _ = write!(
                    out,
                    r#"<path d="{}" fill="{}"{}/>"#,
                    path.to_svg(),
                    fill_attr,
                    stroke_attrs(stroke.as_ref()),
                );
            }
            Primitive::Circle {
                center,
                radius,
                fill,
                stroke,
            } => {
                let _ = write!(
                    out,
                    r#"<circle cx="{}" cy="{}" r="{}" fill="{}"{}/>"#,
                    fmt(center.x),
                    fmt(center.y),
                    fmt(radius.max(0.0)),
                    brush_attr(fill),
                    stroke_attrs(stroke.as_ref()),
                );
            }
            Primitive::Text {
                pos,
                text,
                font_size,
                font_family,
                fill,
                anchor,
                baseline,
            } => {
                let family = match font_family {
                    Some(f) => format!(r#" font-family="{}""#, escape(f)),
                    None => String::new(),
                };
                let _ = write!(
                    out,
                    r#"<text x="{}" y="{}" font-size="{}"{} fill="{}" text-anchor="{}" dominant-baseline="{}">{}</text>"#,
                    fmt(pos.x),
                    fmt(pos.y),
                    fmt(*font_size),
                    family,
                    brush_attr(fill),
                    anchor_attr(*anchor),
                    baseline_attr(*baseline),
                    escape(text),
                );
            }
            Primitive::RichText {
                rect,
                markup,
                font_size,
                fill,
            } => {
                let _ = write!(
                    out,
                    r#"<foreignObject x="{}" y="{}" width="{}" height="{}"><div xmlns="http://www.w3.org/1999/xhtml" style="font-size:{}px;color:{}">{}</div></foreignObject>"#,
                    fmt(rect.x0),
                    fmt(rect.y0),
                    fmt(rect.width().max(0.0)),
                    fmt(rect.height().max(0.0)),
                    fmt(*font_size),
                    brush_attr(fill),
                    markup,
                );
            }
        }
        out.push('\n');
    }

    out.push_str("</svg>\n");
    out
}

/// Formats a coordinate, trimming floating-point noise.
fn fmt(v: f64) -> String {
    if !v.is_finite() {
        return "0".to_owned();
    }
    if v == v.trunc() && v.abs() < 1e15 {
        return format!("{}", v as i64);
    }
    let s = format!("{v:.2}");
    s.trim_end_matches('0').trim_end_matches('.').to_owned()
}

fn brush_attr(brush: &Brush) -> String {
    match brush {
        Brush::Solid(color) => color_attr(*color),
        // Scenes only carry solid brushes today.
        _ => "#000".to_owned(),
    }
}

fn color_attr(color: Color) -> String {
    let [r, g, b, a] = color.components;
    let channel = |c: f32| (c.clamp(0.0, 1.0) * 255.0).round() as u8;
    if (a - 1.0).abs() < f32::EPSILON {
        format!("rgb({},{},{})", channel(r), channel(g), channel(b))
    } else {
        format!(
            "rgba({},{},{},{})",
            channel(r),
            channel(g),
            channel(b),
            fmt(f64::from(a.clamp(0.0, 1.0)))
        )
    }
}

fn stroke_attrs(stroke: Option<&Stroke>) -> String {
    match stroke {
        Some(s) => format!(
            r#" stroke="{}" stroke-width="{}""#,
            brush_attr(&s.brush),
            fmt(s.width)
        ),
        None => String::new(),
    }
}

fn anchor_attr(anchor: TextAnchor) -> &'static str {
    match anchor {
        TextAnchor::Start => "start",
        TextAnchor::Middle => "middle",
        TextAnchor::End => "end",
    }
}

fn baseline_attr(baseline: TextBaseline) -> &'static str {
    match baseline {
        TextBaseline::Alphabetic => "alphabetic",
        TextBaseline::Middle => "central",
        TextBaseline::Hanging => "hanging",
    }
}

/// Escapes text content and attribute values.
fn escape(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use abra_core::{NodeId, Primitive, Scene, SceneNode};
    use kurbo::{Point, Rect};
    use peniko::Brush;
    use peniko::color::palette::css;

    use super::*;

    fn rect_node(id: u64, z: i32) -> SceneNode {
        SceneNode::new(
            NodeId::from_raw(id),
            z,
            Primitive::Rect {
                rect: Rect::new(0.0, 0.0, 10.0, 10.0),
                fill: Brush::Solid(css::RED),
                stroke: None,
            },
        )
    }

    #[test]
    fn elements_follow_paint_order() {
        let mut scene = Scene::new();
        scene.push(
            SceneNode::new(
                NodeId::from_raw(1),
                100,
                Primitive::Circle {
                    center: Point::new(5.0, 5.0),
                    radius: 2.0,
                    fill: Brush::Solid(css::BLUE),
                    stroke: None,
                },
            ),
        );
        scene.push(rect_node(2, -100));

        let svg = to_svg(&scene, 20.0, 20.0);
        let rect_at = svg.find("<rect").unwrap();
        let circle_at = svg.find("<circle").unwrap();
        assert!(rect_at < circle_at);
    }

    #[test]
    fn text_content_is_escaped() {
        let mut scene = Scene::new();
        scene.push(SceneNode::new(
            NodeId::from_raw(1),
            0,
            Primitive::Text {
                pos: Point::new(1.0, 1.0),
                text: "a < b & \"c\"".to_owned(),
                font_size: 12.0,
                font_family: None,
                fill: Brush::Solid(css::BLACK),
                anchor: abra_core::TextAnchor::Start,
                baseline: abra_core::TextBaseline::Alphabetic,
            },
        ));
        let svg = to_svg(&scene, 20.0, 20.0);
        assert!(svg.contains("a &lt; b &amp; &quot;c&quot;"));
    }

    #[test]
    fn rich_text_uses_a_foreign_object() {
        let mut scene = Scene::new();
        scene.push(SceneNode::new(
            NodeId::from_raw(1),
            0,
            Primitive::RichText {
                rect: Rect::new(0.0, 0.0, 100.0, 40.0),
                markup: "<b>bold</b>".to_owned(),
                font_size: 14.0,
                fill: Brush::Solid(css::BLACK),
            },
        ));
        let svg = to_svg(&scene, 200.0, 100.0);
        assert!(svg.contains("<foreignObject"));
        // Markup passes through unescaped.
        assert!(svg.contains("<b>bold</b>"));
    }

    #[test]
    fn alpha_colors_serialize_as_rgba() {
        assert_eq!(color_attr(css::RED), "rgb(255,0,0)");
        assert_eq!(color_attr(css::RED.with_alpha(0.5)), "rgba(255,0,0,0.5)");
    }

    #[test]
    fn document_is_well_formed_at_the_edges() {
        let svg = to_svg(&Scene::new(), 600.0, 400.0);
        assert!(svg.starts_with("<svg"));
        assert!(svg.trim_end().ends_with("</svg>"));
        assert!(svg.contains(r#"viewBox="0 0 600 400""#));
    }
}
