// Copyright 2025 the Abra Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Shared chart building blocks for the Abra renderers.
//!
//! Every renderer variant composes the same small toolkit:
//! - **Scales** map data domains into pixel ranges.
//! - **Layout** turns container size + style toggles into margins and an
//!   inner plotting rectangle.
//! - **Colors** resolve a category label to a display color (override map >
//!   palette slot > built-in fallback) and pick readable in-shape text.
//! - **Annotations** expand `{token}` tooltip templates.
//! - **Axes and legends** generate guide nodes for the scene graph.
//!
//! All of it is pure: same inputs, same outputs, no surface access.

mod annotate;
mod axis;
mod color;
mod layout;
mod legend;
mod measure;
mod scale;
pub mod z_order;

pub use annotate::{AnnotationContext, DEFAULT_TEMPLATE, format_annotation};
pub use axis::{AxisSpec, GridStyle};
pub use color::{
    ColorOverrides, ColorResolver, FALLBACK_PALETTE, contrast_text_color, palette_by_key,
    parse_hex_color,
};
pub use layout::{
    BASE_PADDING, ChartMargins, FOOTER_HEIGHT, LEGEND_STRIP_HEIGHT, MarginSpec,
    article_block_height, title_block_height,
};
pub use legend::{LegendEntry, LegendSpec};
pub use measure::{HeuristicTextMeasurer, TextMeasurer};
pub use scale::{ScaleBand, ScaleLinear, ScalePoint, ScalePower, SequentialColorScale};
