// Copyright 2025 the Abra Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Z-order conventions for renderer-generated nodes.
//!
//! Scene nodes carry an explicit `z_index`; the painter sorts by
//! `(z_index, NodeId)` for a deterministic tie-break. The bands below
//! encode the studio's overlap contract: background, then the plot area,
//! then chrome, with the tooltip always topmost.

/// Chart background fill.
pub const BACKGROUND: i32 = -100;
/// Gridlines drawn behind series.
pub const GRID_LINES: i32 = -50;

/// Filled series marks (bars, areas, slices, map features).
pub const SERIES_FILL: i32 = 0;
/// Stroked series marks (lines).
pub const SERIES_STROKE: i32 = 10;
/// Point/bubble marks drawn above lines.
pub const SERIES_POINTS: i32 = 20;
/// Labels drawn inside series marks (percentages, bar values).
pub const SERIES_LABELS: i32 = 25;

/// Axis domain line and tick marks.
pub const AXIS_RULES: i32 = 30;
/// Axis tick labels.
pub const AXIS_LABELS: i32 = 40;
/// Axis title labels.
pub const AXIS_TITLES: i32 = 50;

/// Chart title text.
pub const TITLE: i32 = 60;
/// Article rich-text block.
pub const ARTICLE: i32 = 65;
/// Legend swatches and labels.
pub const LEGEND: i32 = 70;
/// Footer text.
pub const FOOTER: i32 = 80;
/// Tooltip, rendered on demand and always on top.
pub const TOOLTIP: i32 = 100;
