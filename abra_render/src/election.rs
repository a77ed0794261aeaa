// Copyright 2025 the Abra Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Election views.
//!
//! Election tables have a fixed shape: the header row is
//! `region, party, party, ...` and every later row is one region's vote
//! counts. Two renderers share that read: a half-circle donut showing one
//! selected region, and a stacked horizontal bar per region. When a
//! parallel historical table is supplied, each party's share carries a
//! trend marker against the same region/party share in the older data.

use std::f64::consts::PI;

use abra_charts::{
    AnnotationContext, ColorResolver, HeuristicTextMeasurer, LegendEntry, LegendSpec,
    contrast_text_color, z_order,
};
use abra_core::{
    ClickAction, Interaction, NodeId, Primitive, Scene, SceneNode, Table, TextAnchor, TextBaseline,
};
use kurbo::{CircleSegment, Point, Rect, Shape};
use peniko::{Brush, Color};

use crate::frame::Chrome;
use crate::series::{format_value, hover_text_with};
use crate::{RenderInput, Renderer};

/// Shares closer than this are rendered as unchanged.
const TREND_EPSILON: f64 = 0.001;

/// Two-line default tooltip for the election kinds.
const ELECTION_TEMPLATE: &str = "{region}\n{name}: {percent}%";

struct ElectionFrame {
    parties: Vec<String>,
    regions: Vec<ElectionRegion>,
}

struct ElectionRegion {
    name: String,
    votes: Vec<f64>,
}

impl ElectionFrame {
    fn extract(table: &Table) -> Self {
        let cols = table.row(0).map_or(0, <[_]>::len);
        let parties: Vec<String> = (1..cols)
            .map(|c| {
                let name = table.text(0, c);
                let name = name.trim().to_owned();
                if name.is_empty() { format!("Party {c}") } else { name }
            })
            .collect();

        let mut regions = Vec::new();
        for r in table.data_rows() {
            let name = table.text(r, 0);
            let name = name.trim().to_owned();
            if name.is_empty() {
                continue;
            }
            let votes: Vec<f64> = (1..cols)
                .map(|c| {
                    let v = table.number(r, c);
                    if v.is_finite() && v > 0.0 { v } else { 0.0 }
                })
                .collect();
            if votes.iter().sum::<f64>() <= 0.0 {
                continue;
            }
            regions.push(ElectionRegion { name, votes });
        }
        Self { parties, regions }
    }

    fn region(&self, name: Option<&str>) -> Option<&ElectionRegion> {
        match name {
            Some(n) => self.regions.iter().find(|r| r.name == n),
            None => None,
        }
        .or_else(|| self.regions.first())
    }

    /// A party's vote share within one region, or `None` when absent.
    fn share(&self, region: &str, party: &str) -> Option<f64> {
        let r = self.regions.iter().find(|r| r.name == region)?;
        let p = self.parties.iter().position(|x| x == party)?;
        let total: f64 = r.votes.iter().sum();
        (total > 0.0).then(|| r.votes[p] / total)
    }
}

/// The trend marker against a historical share.
fn trend_marker(current: f64, historical: Option<f64>) -> Option<&'static str> {
    let hist = historical?;
    if current > hist + TREND_EPSILON {
        Some("\u{25b2}")
    } else if current < hist - TREND_EPSILON {
        Some("\u{25bc}")
    } else {
        None
    }
}

fn party_colors(input: &RenderInput<'_>, parties: &[String]) -> Vec<Color> {
    let mut resolver =
        ColorResolver::from_style(&input.style.custom_colors, &input.style.palette);
    parties.iter().map(|p| resolver.resolve(p)).collect()
}

/// The half-circle election donut.
pub struct ElectionDonutRenderer;

impl Renderer for ElectionDonutRenderer {
    fn render(&self, input: &RenderInput<'_>) -> Scene {
        let chrome = Chrome::new(input);
        let style = input.style;
        let frame = ElectionFrame::extract(input.table);
        let historical = input.historical.map(ElectionFrame::extract);

        let show_legend = style.show_legend && !frame.parties.is_empty();
        let margins = chrome.margins(show_legend, false);
        let plot = margins.plot_rect();

        let mut scene = Scene::new();
        chrome.base_nodes(&mut scene);
        let Some(region) = frame.region(input.view.selected_region.as_deref()) else {
            chrome.tooltip(&mut scene, input.view);
            return scene;
        };

        let total: f64 = region.votes.iter().sum();
        let selector_height = 26.0;
        let center = Point::new(plot.center().x, plot.y1 - selector_height - 8.0);
        let radius = (plot.width() * 0.5)
            .min(plot.height() - selector_height - 16.0)
            .max(1.0);
        let inner = radius * 0.45;

        let colors = party_colors(input, &frame.parties);

        // The flat edge faces down: angles run from PI to 2*PI.
        let mut angle = PI;
        for (p, party) in frame.parties.iter().enumerate() {
            let votes = region.votes[p];
            if votes <= 0.0 {
                continue;
            }
            let share = votes / total;
            let sweep = share * PI;
            let color = colors[p];

            let segment = CircleSegment::new(center, radius, inner, angle, sweep);
            let mut node = SceneNode::new(
                NodeId::from_key(&format!("donut/{party}")),
                z_order::SERIES_FILL,
                Primitive::Path {
                    path: segment.to_path(0.1),
                    fill: Some(Brush::Solid(color)),
                    stroke: None,
                },
            );
            let hist_share = historical
                .as_ref()
                .and_then(|h| h.share(&region.name, party));
            let marker = trend_marker(share, hist_share);
            let mut ctx = AnnotationContext::new()
                .field("name", party.clone())
                .field("region", region.name.clone())
                .field("value", format_value(votes))
                .field("percent", format_value(share * 100.0));
            if let Some(m) = marker {
                ctx = ctx.field("trend", m);
            }
            if let Some(text) = hover_text_with(style, ELECTION_TEMPLATE, &ctx) {
                node = node.with_interaction(Interaction::hover(text));
            }
            scene.push(node);

            if style.show_percentages && share >= 0.04 {
                let mid = angle + sweep * 0.5;
                let label_r = (radius + inner) * 0.5;
                let mut label = format!("{}%", format_value((share * 100.0).round()));
                if let Some(m) = marker {
                    label.push(' ');
                    label.push_str(m);
                }
                scene.push(SceneNode::new(
                    NodeId::from_key(&format!("donut/{party}")).offset(1),
                    z_order::SERIES_LABELS,
                    Primitive::Text {
                        pos: Point::new(
                            center.x + mid.cos() * label_r,
                            center.y + mid.sin() * label_r,
                        ),
                        text: label,
                        font_size: 11.0,
                        font_family: Some(style.font_family.clone()),
                        fill: Brush::Solid(contrast_text_color(color)),
                        anchor: TextAnchor::Middle,
                        baseline: TextBaseline::Middle,
                    },
                ));
            }

            angle += sweep;
        }

        // Region selector strip along the plot's bottom edge.
        let slot = plot.width() / frame.regions.len().max(1) as f64;
        let text_color = chrome.text_color();
        for (i, r) in frame.regions.iter().enumerate() {
            let selected = r.name == region.name;
            scene.push(
                SceneNode::new(
                    NodeId::from_key(&format!("donut/region/{}", r.name)),
                    z_order::SERIES_LABELS,
                    Primitive::Text {
                        pos: Point::new(
                            plot.x0 + slot * (i as f64 + 0.5),
                            plot.y1 - selector_height * 0.5,
                        ),
                        text: r.name.clone(),
                        font_size: if selected { 13.0 } else { 11.0 },
                        font_family: Some(style.font_family.clone()),
                        fill: Brush::Solid(if selected {
                            text_color
                        } else {
                            text_color.with_alpha(0.55)
                        }),
                        anchor: TextAnchor::Middle,
                        baseline: TextBaseline::Middle,
                    },
                )
                .with_interaction(Interaction::click(ClickAction::SelectRegion(
                    r.name.clone(),
                ))),
            );
        }

        if show_legend {
            let entries: Vec<_> = frame
                .parties
                .iter()
                .zip(&colors)
                .map(|(p, c)| LegendEntry::new(p.clone(), *c))
                .collect();
            let legend = LegendSpec::new(entries).with_text_color(text_color);
            scene.extend(legend.nodes(chrome.legend_origin(&margins), &HeuristicTextMeasurer));
        }

        chrome.tooltip(&mut scene, input.view);
        scene
    }
}

/// The stacked results bar, one row per region.
pub struct ElectionResultsRenderer;

impl Renderer for ElectionResultsRenderer {
    fn render(&self, input: &RenderInput<'_>) -> Scene {
        let chrome = Chrome::new(input);
        let style = input.style;
        let frame = ElectionFrame::extract(input.table);
        let historical = input.historical.map(ElectionFrame::extract);

        let show_legend = style.show_legend && !frame.parties.is_empty();
        let margins = chrome.margins(show_legend, false);
        let plot = margins.plot_rect();

        let mut scene = Scene::new();
        chrome.base_nodes(&mut scene);
        if frame.regions.is_empty() {
            chrome.tooltip(&mut scene, input.view);
            return scene;
        }

        let colors = party_colors(input, &frame.parties);
        let label_width = (plot.width() * 0.2).min(110.0);
        let row_height = plot.height() / frame.regions.len() as f64;
        let bar_height = (row_height * 0.6).min(30.0);
        let text_color = chrome.text_color();

        for (ri, region) in frame.regions.iter().enumerate() {
            // Hidden parties drop out and the rest re-normalize.
            let total: f64 = frame
                .parties
                .iter()
                .zip(&region.votes)
                .filter(|(p, _)| input.view.is_visible(p))
                .map(|(_, v)| *v)
                .sum();
            if total <= 0.0 {
                continue;
            }

            let y_mid = plot.y0 + row_height * (ri as f64 + 0.5);
            scene.push(SceneNode::new(
                NodeId::from_key(&format!("results/{}", region.name)),
                z_order::SERIES_LABELS,
                Primitive::Text {
                    pos: Point::new(plot.x0 + label_width - 8.0, y_mid),
                    text: region.name.clone(),
                    font_size: 11.0,
                    font_family: Some(style.font_family.clone()),
                    fill: Brush::Solid(text_color),
                    anchor: TextAnchor::End,
                    baseline: TextBaseline::Middle,
                },
            ));

            let bar_span = plot.x1 - (plot.x0 + label_width);
            let mut x = plot.x0 + label_width;
            for (p, party) in frame.parties.iter().enumerate() {
                if !input.view.is_visible(party) {
                    continue;
                }
                let votes = region.votes[p];
                if votes <= 0.0 {
                    continue;
                }
                let share = votes / total;
                let w = share * bar_span;
                let rect = Rect::new(x, y_mid - bar_height * 0.5, x + w, y_mid + bar_height * 0.5);

                let hist_share = historical
                    .as_ref()
                    .and_then(|h| h.share(&region.name, party));
                // The trend compares unnormalized shares, so hiding a party
                // cannot flip another party's marker.
                let marker = frame
                    .share(&region.name, party)
                    .and_then(|s| trend_marker(s, hist_share));
                let mut node = SceneNode::new(
                    NodeId::from_key(&format!("results/{}/{party}", region.name)),
                    z_order::SERIES_FILL,
                    Primitive::Rect {
                        rect,
                        fill: Brush::Solid(colors[p]),
                        stroke: None,
                    },
                );
                let mut ctx = AnnotationContext::new()
                    .field("name", party.clone())
                    .field("region", region.name.clone())
                    .field("value", format_value(votes))
                    .field("percent", format_value(share * 100.0));
                if let Some(m) = marker {
                    ctx = ctx.field("trend", m);
                }
                if let Some(text) = hover_text_with(style, ELECTION_TEMPLATE, &ctx) {
                    node = node.with_interaction(Interaction::hover(text));
                }
                scene.push(node);

                if style.show_percentages && w >= 36.0 {
                    let mut label = format!("{}%", format_value((share * 100.0).round()));
                    if let Some(m) = marker {
                        label.push(' ');
                        label.push_str(m);
                    }
                    scene.push(SceneNode::new(
                        NodeId::from_key(&format!("results/{}/{party}", region.name)).offset(1),
                        z_order::SERIES_LABELS,
                        Primitive::Text {
                            pos: Point::new(x + w * 0.5, y_mid),
                            text: label,
                            font_size: 10.0,
                            font_family: Some(style.font_family.clone()),
                            fill: Brush::Solid(contrast_text_color(colors[p])),
                            anchor: TextAnchor::Middle,
                            baseline: TextBaseline::Middle,
                        },
                    ));
                }
                x += w;
            }
        }

        if show_legend {
            let entries: Vec<_> = frame
                .parties
                .iter()
                .zip(&colors)
                .map(|(p, c)| {
                    LegendEntry::new(p.clone(), *c).with_enabled(input.view.is_visible(p))
                })
                .collect();
            let legend = LegendSpec::new(entries).with_text_color(text_color);
            scene.extend(legend.nodes(chrome.legend_origin(&margins), &HeuristicTextMeasurer));
        }

        chrome.tooltip(&mut scene, input.view);
        scene
    }
}
