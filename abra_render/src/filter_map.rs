// Copyright 2025 the Abra Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Tag-colored filter map.
//!
//! Table rows are `name, tag` pairs: a feature named by a row is filled
//! with its tag's color, every other feature stays neutral. The legend
//! lists the tags and toggles them; a hidden tag's features fall back to
//! the neutral fill. Rows naming no feature are excluded without failing
//! the render. Click-to-zoom and background reset work like the bubble map.

use abra_charts::{
    AnnotationContext, ColorResolver, HeuristicTextMeasurer, LegendEntry, LegendSpec, z_order,
};
use abra_core::{ClickAction, Interaction, NodeId, Primitive, Scene, SceneNode, Stroke};
use hashbrown::HashMap;
use peniko::Brush;
use peniko::color::palette::css;
use tracing::{trace, warn};

use crate::frame::Chrome;
use crate::geo::{Projection, Region, RegionData};
use crate::series::hover_text;
use crate::{RenderInput, Renderer};

/// The filter map renderer.
pub struct FilterMapRenderer;

impl Renderer for FilterMapRenderer {
    fn render(&self, input: &RenderInput<'_>) -> Scene {
        let chrome = Chrome::new(input);
        let style = input.style;

        let region = Region::from_model_id(input.model_id);
        let data = match RegionData::load(region) {
            Ok(data) => data,
            Err(err) => {
                warn!(%err, ?region, "region dataset unavailable");
                let mut scene = Scene::new();
                chrome.base_nodes(&mut scene);
                chrome.tooltip(&mut scene, input.view);
                return scene;
            }
        };

        // Join rows to features; remember each matched feature's tag.
        let mut tags: Vec<String> = Vec::new();
        let mut feature_tags: HashMap<String, String> = HashMap::new();
        for r in input.table.data_rows() {
            let name = input.table.text(r, 0);
            let tag = input.table.text(r, 1);
            let tag = tag.trim();
            if tag.is_empty() {
                continue;
            }
            let Some(feature) = data.find(&name) else {
                trace!(name, "row matches no map feature");
                continue;
            };
            if !tags.iter().any(|t| t == tag) {
                tags.push(tag.to_owned());
            }
            feature_tags.insert(feature.name.clone(), tag.to_owned());
        }

        let show_legend = style.show_legend && !tags.is_empty();
        let margins = chrome.margins(show_legend, false);
        let plot = margins.plot_rect();

        let mut scene = Scene::new();

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

        let mut resolver = ColorResolver::from_style(&style.custom_colors, &style.palette);
        let tag_colors: HashMap<&str, _> = tags
            .iter()
            .map(|t| (t.as_str(), resolver.resolve(t)))
            .collect();

        for feature in &data.features {
            let tag = feature_tags
                .get(&feature.name)
                .filter(|t| input.view.is_visible(t));
            let fill = match tag {
                Some(t) => tag_colors[t.as_str()].with_alpha(chrome.series_alpha()),
                None => css::GAINSBORO,
            };

            let action = if zoom_target.as_deref() == Some(feature.name.as_str()) {
                ClickAction::ResetZoom
            } else {
                ClickAction::ZoomToFeature(feature.name.clone())
            };
            let mut interaction = Interaction::click(action);
            if let Some(t) = tag {
                let ctx = AnnotationContext::new()
                    .field("name", feature.name.clone())
                    .field("value", t.clone())
                    .field("series", t.clone());
                if let Some(text) = hover_text(style, &ctx) {
                    interaction.hover = Some(text);
                }
            }

            scene.push(
                SceneNode::new(
                    NodeId::from_key(&format!("geo/{}", feature.name)),
                    z_order::SERIES_FILL,
                    Primitive::Path {
                        path: projection.feature_path(feature),
                        fill: Some(Brush::Solid(fill)),
                        stroke: Some(Stroke::solid(css::WHITE, 1.0)),
                    },
                )
                .with_interaction(interaction),
            );
        }

        if show_legend {
            let entries: Vec<_> = tags
                .iter()
                .map(|t| {
                    LegendEntry::new(t.clone(), tag_colors[t.as_str()])
                        .with_enabled(input.view.is_visible(t))
                })
                .collect();
            let legend = LegendSpec::new(entries).with_text_color(chrome.text_color());
            scene.extend(legend.nodes(chrome.legend_origin(&margins), &HeuristicTextMeasurer));
        }

        chrome.tooltip(&mut scene, input.view);
        scene
    }
}
