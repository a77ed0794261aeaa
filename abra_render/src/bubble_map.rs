// Copyright 2025 the Abra Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Bubble map.
//!
//! Table rows are `name, value, lat, long, note` with the last three
//! optional. Rows with explicit coordinates place their bubble directly;
//! the rest join to the active region's features by name and use the
//! feature's centroid. The radius goes through a square-root power scale
//! so area tracks the value. Rows naming no feature (and carrying no
//! coordinates) are excluded without failing the render.
//! Clicking a feature zooms the projection to its bounds; clicking the
//! zoomed feature or the background resets.

use abra_charts::{AnnotationContext, ScalePower, contrast_text_color, parse_hex_color, z_order};
use abra_core::{ClickAction, Interaction, NodeId, Primitive, Scene, SceneNode, Stroke};
use peniko::Brush;
use peniko::color::palette::css;
use tracing::{trace, warn};

use crate::frame::Chrome;
use crate::geo::{Projection, Region, RegionData};
use crate::series::{format_value, hover_text};
use crate::{RenderInput, Renderer};

/// The bubble map renderer.
pub struct BubbleMapRenderer;

impl Renderer for BubbleMapRenderer {
    fn render(&self, input: &RenderInput<'_>) -> Scene {
        let chrome = Chrome::new(input);
        let style = input.style;
        let margins = chrome.margins(false, false);
        let plot = margins.plot_rect();

        let mut scene = Scene::new();

        let region = Region::from_model_id(input.model_id);
        let data = match RegionData::load(region) {
            Ok(data) => data,
            Err(err) => {
                warn!(%err, ?region, "region dataset unavailable");
                chrome.base_nodes(&mut scene);
                chrome.tooltip(&mut scene, input.view);
                return scene;
            }
        };

        let zoomed = input.view.zoom.as_deref().and_then(|name| data.find(name));
        // While zoomed, any click beside the features zooms back out.
        let background = match zoomed {
            Some(_) => Interaction::click(ClickAction::ResetZoom),
            None => Interaction::none(),
        };
        chrome.base_nodes_with_background(&mut scene, background);

        let projection = match zoomed {
            Some(f) => Projection::fit(f.bounds(), plot, 0.9),
            None => Projection::fit(data.bounds(), plot, 0.95),
        };
        let zoom_target = zoomed.map(|f| f.name.clone());

        for feature in &data.features {
            let action = if zoom_target.as_deref() == Some(feature.name.as_str()) {
                ClickAction::ResetZoom
            } else {
                ClickAction::ZoomToFeature(feature.name.clone())
            };
            scene.push(
                SceneNode::new(
                    NodeId::from_key(&format!("geo/{}", feature.name)),
                    z_order::BACKGROUND + 1,
                    Primitive::Path {
                        path: projection.feature_path(feature),
                        fill: Some(Brush::Solid(css::GAINSBORO)),
                        stroke: Some(Stroke::solid(css::WHITE, 1.0)),
                    },
                )
                .with_interaction(Interaction::click(action)),
            );
        }

        // Join rows to features; rows with explicit coordinates skip the
        // join, everything else needs a feature match or is excluded.
        struct Bubble {
            name: String,
            value: f64,
            lon: f64,
            lat: f64,
            note: String,
        }
        let mut bubbles = Vec::new();
        for r in input.table.data_rows() {
            let name = input.table.text(r, 0);
            let value = input.table.number(r, 1);
            if !value.is_finite() || value <= 0.0 {
                continue;
            }
            let lat = input.table.number(r, 2);
            let lon = input.table.number(r, 3);
            let (name, lon, lat) = if lat.is_finite() && lon.is_finite() {
                (name.trim().to_owned(), lon, lat)
            } else if let Some(feature) = data.find(&name) {
                let (lon, lat) = feature.centroid();
                (feature.name.clone(), lon, lat)
            } else {
                trace!(name, "row matches no map feature and has no coordinates");
                continue;
            };
            bubbles.push(Bubble {
                name,
                value,
                lon,
                lat,
                note: input.table.text(r, 4),
            });
        }

        let max = bubbles.iter().map(|b| b.value).fold(0.0, f64::max);
        let radii = ScalePower::new(max, (4.0, plot.width().min(plot.height()) * 0.08));
        let fill = parse_hex_color(&style.bar_color).unwrap_or(css::CORNFLOWER_BLUE);
        let alpha = chrome.series_alpha();

        for b in &bubbles {
            let mut node = SceneNode::new(
                NodeId::from_key(&format!("bubble/{}", b.name)),
                z_order::SERIES_POINTS,
                Primitive::Circle {
                    center: projection.project(b.lon, b.lat),
                    radius: radii.map(b.value),
                    fill: Brush::Solid(fill.with_alpha(alpha * 0.85)),
                    stroke: Some(Stroke::solid(contrast_text_color(fill), 0.5)),
                },
            );
            let mut ctx = AnnotationContext::new()
                .field("name", b.name.clone())
                .field("value", format_value(b.value));
            if !b.note.is_empty() {
                ctx = ctx.field("note", b.note.clone());
            }
            if let Some(text) = hover_text(style, &ctx) {
                node = node.with_interaction(Interaction::hover(text));
            }
            scene.push(node);
        }

        chrome.tooltip(&mut scene, input.view);
        scene
    }
}
