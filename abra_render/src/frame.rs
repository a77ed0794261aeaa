// Copyright 2025 the Abra Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Shared chart chrome.
//!
//! Every renderer decorates its plot with the same overlays, in the same
//! overlap order: background, title, article block, legend, footer, and the
//! on-demand tooltip topmost. This module builds those nodes from the style
//! state so the variants only have to draw their plot area.

use abra_charts::{
    BASE_PADDING, ChartMargins, FOOTER_HEIGHT, HeuristicTextMeasurer, MarginSpec, TextMeasurer,
    article_block_height, parse_hex_color, title_block_height, z_order,
};
use abra_core::{Interaction, NodeId, Primitive, Scene, SceneNode, TextAnchor, TextBaseline};
use kurbo::{Point, Rect};
use peniko::{Brush, Color};
use peniko::color::palette::css;

use crate::{RenderInput, ViewState};

/// Builds the chrome nodes shared by every renderer.
pub(crate) struct Chrome<'a> {
    input: &'a RenderInput<'a>,
}

impl<'a> Chrome<'a> {
    pub(crate) fn new(input: &'a RenderInput<'a>) -> Self {
        Self { input }
    }

    /// The configured text color, falling back to near-black.
    pub(crate) fn text_color(&self) -> Color {
        parse_hex_color(&self.input.style.text_color).unwrap_or(css::BLACK)
    }

    /// Margins for this chart.
    ///
    /// `legend` and `axes` describe what the variant actually shows, after
    /// combining the style toggles with the variant's capabilities (maps
    /// have no axes; single-series bars may skip the legend).
    pub(crate) fn margins(&self, legend: bool, axes: bool) -> ChartMargins {
        let style = self.input.style;
        let spec = MarginSpec {
            title_font_size: (!style.title.trim().is_empty()).then_some(style.title_font_size),
            article_font_size: (!style.article.trim().is_empty())
                .then_some(style.article_font_size),
            legend,
            axis_labels: axes && style.show_axis_labels,
            y_axis_label: axes && !style.y_axis_label.trim().is_empty(),
            footer: style.show_footer,
        };
        ChartMargins::compute(self.input.width, self.input.height, &spec)
    }

    /// The origin of the legend strip for the computed margins.
    pub(crate) fn legend_origin(&self, margins: &ChartMargins) -> Point {
        Point::new(
            margins.left,
            margins.top - abra_charts::LEGEND_STRIP_HEIGHT + 4.0,
        )
    }

    /// Pushes background, title, article, and footer nodes.
    pub(crate) fn base_nodes(&self, scene: &mut Scene) {
        self.base_nodes_with_background(scene, Interaction::none());
    }

    /// Like [`Chrome::base_nodes`], with an interaction on the background.
    ///
    /// The map kinds attach a reset-zoom click here so clicking any
    /// non-feature area zooms back out. A transparent-sentinel background
    /// still emits a (fully transparent) rect when it has an interaction to
    /// carry, so the gesture survives the sentinel.
    pub(crate) fn base_nodes_with_background(&self, scene: &mut Scene, background: Interaction) {
        let style = self.input.style;
        let (width, height) = (self.input.width, self.input.height);
        let text_color = self.text_color();

        let interactive = background.hover.is_some() || background.click.is_some();
        let fill = if style.transparent_background() {
            None
        } else {
            parse_hex_color(&style.background_color)
        };
        if let Some(bg) = fill.or_else(|| interactive.then_some(css::TRANSPARENT)) {
            scene.push(
                SceneNode::new(
                    NodeId::from_key("chrome/background"),
                    z_order::BACKGROUND,
                    Primitive::Rect {
                        rect: Rect::new(0.0, 0.0, width, height),
                        fill: Brush::Solid(bg),
                        stroke: None,
                    },
                )
                .with_interaction(background),
            );
        }

        let mut y = BASE_PADDING;
        let title = style.title.trim();
        if !title.is_empty() {
            let block = title_block_height(style.title_font_size);
            scene.push(SceneNode::new(
                NodeId::from_key("chrome/title"),
                z_order::TITLE,
                Primitive::Text {
                    pos: Point::new(width * 0.5, y + block * 0.5),
                    text: title.to_owned(),
                    font_size: style.title_font_size,
                    font_family: Some(style.font_family.clone()),
                    fill: Brush::Solid(text_color),
                    anchor: TextAnchor::Middle,
                    baseline: TextBaseline::Middle,
                },
            ));
            y += block;
        }

        let article = style.article.trim();
        if !article.is_empty() {
            let block = article_block_height(style.article_font_size);
            scene.push(SceneNode::new(
                NodeId::from_key("chrome/article"),
                z_order::ARTICLE,
                Primitive::RichText {
                    rect: Rect::new(BASE_PADDING, y, width - BASE_PADDING, y + block),
                    markup: article.to_owned(),
                    font_size: style.article_font_size,
                    fill: Brush::Solid(text_color),
                },
            ));
        }

        if style.show_footer && !style.footer_text.trim().is_empty() {
            scene.push(SceneNode::new(
                NodeId::from_key("chrome/footer"),
                z_order::FOOTER,
                Primitive::Text {
                    pos: Point::new(
                        BASE_PADDING,
                        height - BASE_PADDING - FOOTER_HEIGHT * 0.5,
                    ),
                    text: style.footer_text.trim().to_owned(),
                    font_size: 11.0,
                    font_family: Some(style.font_family.clone()),
                    fill: Brush::Solid(text_color.with_alpha(0.7)),
                    anchor: TextAnchor::Start,
                    baseline: TextBaseline::Middle,
                },
            ));
        }
    }

    /// Pushes the tooltip for the current hover, always topmost.
    ///
    /// Skipped when annotations are disabled or nothing is hovered.
    pub(crate) fn tooltip(&self, scene: &mut Scene, view: &ViewState) {
        if !self.input.style.show_annotations {
            return;
        }
        let Some(hover) = &view.hover else {
            return;
        };
        if hover.text.is_empty() {
            return;
        }

        let font_size = 12.0;
        let measurer = HeuristicTextMeasurer;
        let lines: Vec<&str> = hover.text.lines().collect();
        let width = lines
            .iter()
            .map(|l| measurer.measure(l, font_size).0)
            .fold(0.0, f64::max);
        let line_height = font_size * 1.3;
        let pad = 6.0;

        let box_w = width + pad * 2.0;
        let box_h = line_height * lines.len() as f64 + pad * 2.0;
        // Keep the box inside the container; prefer above-right of the cursor.
        let x0 = (hover.x + 12.0).min(self.input.width - box_w).max(0.0);
        let y0 = (hover.y - box_h - 8.0).max(0.0);

        scene.push(SceneNode::new(
            NodeId::from_key("chrome/tooltip"),
            z_order::TOOLTIP,
            Primitive::Rect {
                rect: Rect::new(x0, y0, x0 + box_w, y0 + box_h),
                fill: Brush::Solid(css::BLACK.with_alpha(0.85)),
                stroke: None,
            },
        ));
        for (i, line) in lines.iter().enumerate() {
            scene.push(SceneNode::new(
                NodeId::from_key("chrome/tooltip").offset(1 + i as u64),
                z_order::TOOLTIP,
                Primitive::Text {
                    pos: Point::new(
                        x0 + pad,
                        y0 + pad + line_height * (i as f64 + 0.5),
                    ),
                    text: (*line).to_owned(),
                    font_size,
                    font_family: Some(self.input.style.font_family.clone()),
                    fill: Brush::Solid(css::WHITE),
                    anchor: TextAnchor::Start,
                    baseline: TextBaseline::Middle,
                },
            ));
        }
    }

    /// The per-series fill alpha from the style's opacity field.
    pub(crate) fn series_alpha(&self) -> f32 {
        (self.input.style.bar_opacity.clamp(0.0, 100.0) / 100.0) as f32
    }

    /// The band padding fraction from the style's spacing field.
    pub(crate) fn band_padding(&self) -> f64 {
        self.input.style.bar_spacing.clamp(0.0, 100.0) / 100.0
    }
}

#[cfg(test)]
mod tests {
    use abra_core::Table;
    use abra_style::StyleState;

    use super::*;
    use crate::HoverState;

    fn input_with<'a>(
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
            model_id: 1,
        }
    }

    #[test]
    fn transparent_background_emits_no_rect() {
        let table = Table::default();
        let mut style = StyleState::studio_default();
        style.background_color = "transparent".to_owned();
        let view = ViewState::new();
        let input = input_with(&table, &style, &view);

        let mut scene = Scene::new();
        Chrome::new(&input).base_nodes(&mut scene);
        assert!(scene.find(NodeId::from_key("chrome/background")).is_none());
    }

    #[test]
    fn transparent_background_still_carries_a_click() {
        use abra_core::ClickAction;

        let table = Table::default();
        let mut style = StyleState::studio_default();
        style.background_color = "transparent".to_owned();
        let view = ViewState::new();
        let input = input_with(&table, &style, &view);

        let mut scene = Scene::new();
        Chrome::new(&input)
            .base_nodes_with_background(&mut scene, Interaction::click(ClickAction::ResetZoom));
        let bg = scene.find(NodeId::from_key("chrome/background")).unwrap();
        assert_eq!(bg.interaction.click, Some(ClickAction::ResetZoom));
        let Primitive::Rect { fill: Brush::Solid(c), .. } = &bg.primitive else {
            panic!("expected rect");
        };
        assert_eq!(c.components[3], 0.0);
    }

    #[test]
    fn tooltip_respects_annotation_toggle() {
        let table = Table::default();
        let mut style = StyleState::studio_default();
        style.show_annotations = false;
        let mut view = ViewState::new();
        view.hover = Some(HoverState {
            x: 100.0,
            y: 100.0,
            text: "Alma: 42".to_owned(),
        });
        let input = input_with(&table, &style, &view);

        let mut scene = Scene::new();
        Chrome::new(&input).tooltip(&mut scene, &view);
        assert!(scene.is_empty());
    }

    #[test]
    fn tooltip_is_topmost() {
        let table = Table::default();
        let style = StyleState::studio_default();
        let mut view = ViewState::new();
        view.hover = Some(HoverState {
            x: 100.0,
            y: 100.0,
            text: "Alma: 42".to_owned(),
        });
        let input = input_with(&table, &style, &view);

        let mut scene = Scene::new();
        Chrome::new(&input).base_nodes(&mut scene);
        Chrome::new(&input).tooltip(&mut scene, &view);
        let order = scene.paint_order();
        let last = order.last().unwrap();
        assert_eq!(last.z_index, z_order::TOOLTIP);
    }
}
