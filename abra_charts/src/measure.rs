// Copyright 2025 the Abra Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Text measurement hooks for guide layout.
//!
//! Legend and axis layout needs rough text extents before anything is
//! painted. Shaping stays downstream; guides accept a measurer so a real
//! backend can be plugged in, with a heuristic default for tests and
//! headless use.

/// A minimal text measurement interface used by guide generators.
pub trait TextMeasurer {
    /// Returns `(width, height)` in scene coordinates.
    fn measure(&self, text: &str, font_size: f64) -> (f64, f64);
}

/// A tiny heuristic measurer: ~0.6em average glyph width, 1em height.
#[derive(Clone, Copy, Debug, Default)]
pub struct HeuristicTextMeasurer;

impl TextMeasurer for HeuristicTextMeasurer {
    fn measure(&self, text: &str, font_size: f64) -> (f64, f64) {
        let width = 0.6 * font_size * text.chars().count() as f64;
        (width, font_size)
    }
}
