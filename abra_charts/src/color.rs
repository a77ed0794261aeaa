// Copyright 2025 the Abra Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Category color resolution.
//!
//! Every renderer colors series/categories through the same precedence:
//! 1. an exact label match in the user's override map,
//! 2. the configured palette at the label's slot (first-seen order),
//! 3. a sequential scale sample once the palette slots run out.
//!
//! An unresolvable label never blocks rendering — it always receives a
//! deterministic color. Overrides arrive as a comma-separated
//! `"Label:#hex"` string; malformed pairs are dropped individually and
//! never fail the whole string.

use hashbrown::HashMap;
use peniko::Color;
use peniko::color::palette::css;
use tracing::debug;

use crate::scale::SequentialColorScale;

/// The built-in fallback palette, used when no palette key is configured.
pub const FALLBACK_PALETTE: [Color; 8] = [
    css::CORNFLOWER_BLUE,
    css::ORANGE,
    css::MEDIUM_SEA_GREEN,
    css::CRIMSON,
    css::GOLDENROD,
    css::SLATE_BLUE,
    css::DARK_CYAN,
    css::HOT_PINK,
];

/// Returns the palette for a style-state palette key.
///
/// Unknown keys fall back to the built-in palette, so a stale saved key can
/// never break rendering.
pub fn palette_by_key(key: &str) -> &'static [Color] {
    const WARM: [Color; 6] = [
        css::TOMATO,
        css::ORANGE,
        css::GOLD,
        css::CORAL,
        css::FIREBRICK,
        css::DARK_ORANGE,
    ];
    const COOL: [Color; 6] = [
        css::STEEL_BLUE,
        css::TEAL,
        css::MEDIUM_SEA_GREEN,
        css::SLATE_BLUE,
        css::CADET_BLUE,
        css::DARK_CYAN,
    ];
    const PASTEL: [Color; 6] = [
        css::LIGHT_PINK,
        css::LIGHT_BLUE,
        css::LIGHT_GREEN,
        css::WHEAT,
        css::PLUM,
        css::LIGHT_SALMON,
    ];
    const VIVID: [Color; 6] = [
        css::RED,
        css::BLUE,
        css::GREEN,
        css::MAGENTA,
        css::DARK_ORANGE,
        css::INDIGO,
    ];

    match key {
        "warm" => &WARM,
        "cool" => &COOL,
        "pastel" => &PASTEL,
        "vivid" => &VIVID,
        _ => &FALLBACK_PALETTE,
    }
}

/// Parses a `#rgb` or `#rrggbb` color string.
///
/// Returns `None` for anything else; the hash prefix is required.
pub fn parse_hex_color(s: &str) -> Option<Color> {
    let hex = s.trim().strip_prefix('#')?;
    let expanded: String = match hex.len() {
        3 => hex.chars().flat_map(|c| [c, c]).collect(),
        6 => hex.to_owned(),
        _ => return None,
    };
    if !expanded.chars().all(|c| c.is_ascii_hexdigit()) {
        return None;
    }
    let r = u8::from_str_radix(&expanded[0..2], 16).ok()?;
    let g = u8::from_str_radix(&expanded[2..4], 16).ok()?;
    let b = u8::from_str_radix(&expanded[4..6], 16).ok()?;
    Some(Color::from_rgb8(r, g, b))
}

/// A parsed per-label color override map.
#[derive(Clone, Debug, Default)]
pub struct ColorOverrides {
    map: HashMap<String, Color>,
}

impl ColorOverrides {
    /// Parses a comma-separated `"Label:#hex, Label:#hex"` string.
    ///
    /// A pair is accepted only when the label is non-empty and the color is
    /// a valid 3- or 6-digit hex value. Malformed pairs are dropped and
    /// logged; parsing itself never fails.
    pub fn parse(raw: &str) -> Self {
        let mut map = HashMap::new();
        for pair in raw.split(',') {
            if pair.trim().is_empty() {
                continue;
            }
            let Some((label, color)) = pair.rsplit_once(':') else {
                debug!(pair, "dropping color override without a separator");
                continue;
            };
            let label = label.trim();
            let Some(color) = parse_hex_color(color) else {
                debug!(pair, "dropping color override with a malformed color");
                continue;
            };
            if label.is_empty() {
                debug!(pair, "dropping color override with an empty label");
                continue;
            }
            map.insert(label.to_owned(), color);
        }
        Self { map }
    }

    /// Looks up the override for a label.
    pub fn get(&self, label: &str) -> Option<Color> {
        self.map.get(label).copied()
    }

    /// Returns the number of parsed overrides.
    pub fn len(&self) -> usize {
        self.map.len()
    }

    /// Whether the map is empty.
    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }
}

/// Resolves category labels to display colors.
///
/// Palette slots are assigned by first-seen label order within the active
/// domain, so the same label sequence always yields the same colors. Labels
/// past the palette's last slot sample a sequential scale instead of
/// wrapping, so no two slots share a color.
#[derive(Clone, Debug)]
pub struct ColorResolver {
    overrides: ColorOverrides,
    palette: &'static [Color],
    overflow: SequentialColorScale,
    slots: HashMap<String, usize>,
    next_slot: usize,
}

impl ColorResolver {
    /// Creates a resolver from an override map and a palette.
    ///
    /// An empty palette silently falls back to the built-in one.
    pub fn new(overrides: ColorOverrides, palette: &'static [Color]) -> Self {
        let palette = if palette.is_empty() {
            &FALLBACK_PALETTE
        } else {
            palette
        };
        Self {
            overrides,
            palette,
            overflow: SequentialColorScale::new(css::POWDER_BLUE, css::DARK_SLATE_BLUE),
            slots: HashMap::new(),
            next_slot: 0,
        }
    }

    /// Convenience constructor from the raw style-state fields.
    pub fn from_style(custom_colors: &str, palette_key: &str) -> Self {
        Self::new(ColorOverrides::parse(custom_colors), palette_by_key(palette_key))
    }

    /// Resolves a label to its display color.
    pub fn resolve(&mut self, label: &str) -> Color {
        if let Some(c) = self.overrides.get(label) {
            return c;
        }
        let slot = match self.slots.get(label) {
            Some(&s) => s,
            None => {
                let s = self.next_slot;
                self.slots.insert(label.to_owned(), s);
                self.next_slot += 1;
                s
            }
        };
        if slot < self.palette.len() {
            self.palette[slot]
        } else {
            // Golden-ratio stride keeps consecutive overflow samples apart.
            let overflow = (slot - self.palette.len()) as f64;
            self.overflow.sample((overflow * 0.618_034).fract())
        }
    }
}

/// Picks a readable text color for labels drawn inside a filled shape.
///
/// Uses the Rec. 601 luma approximation; fills brighter than 0.5 get black
/// text, darker fills get white.
pub fn contrast_text_color(fill: Color) -> Color {
    let [r, g, b, _] = fill.components;
    let luminance = 0.299 * f64::from(r) + 0.587 * f64::from(g) + 0.114 * f64::from(b);
    if luminance > 0.5 { css::BLACK } else { css::WHITE }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn well_formed_pairs_parse_exactly() {
        let o = ColorOverrides::parse("Alma:#ff0000, Korte: #ffffff,Szilva:#0f0");
        assert_eq!(o.len(), 3);
        assert_eq!(o.get("Alma"), parse_hex_color("#ff0000"));
        assert_eq!(o.get("Korte"), parse_hex_color("#ffffff"));
        assert_eq!(o.get("Szilva"), parse_hex_color("#00ff00"));
    }

    #[test]
    fn malformed_pairs_are_dropped_not_fatal() {
        let o = ColorOverrides::parse("Good:#123abc, nocolon, :#fff, Bad:#12345, Also:#gggggg");
        assert_eq!(o.len(), 1);
        assert!(o.get("Good").is_some());
    }

    #[test]
    fn empty_string_parses_to_empty_map() {
        assert!(ColorOverrides::parse("").is_empty());
        assert!(ColorOverrides::parse("  ,  ,").is_empty());
    }

    #[test]
    fn override_beats_palette() {
        let mut r = ColorResolver::from_style("Korte: #ffffff", "");
        assert_eq!(r.resolve("Korte"), parse_hex_color("#ffffff").unwrap());
    }

    #[test]
    fn palette_slots_follow_first_seen_order() {
        let mut r = ColorResolver::from_style("", "");
        let first = r.resolve("b");
        let second = r.resolve("a");
        // Repeated resolution is stable.
        assert_eq!(r.resolve("b"), first);
        assert_eq!(r.resolve("a"), second);
        assert_eq!(first, FALLBACK_PALETTE[0]);
        assert_eq!(second, FALLBACK_PALETTE[1]);
    }

    #[test]
    fn overflow_slots_leave_the_palette() {
        let mut r = ColorResolver::from_style("", "warm");
        let labels: Vec<String> = (0..8).map(|i| format!("s{i}")).collect();
        let colors: Vec<Color> = labels.iter().map(|l| r.resolve(l)).collect();
        // The warm palette has six slots; later labels sample the
        // sequential scale instead of wrapping back to slot zero.
        assert_ne!(colors[6], colors[0]);
        assert_ne!(colors[7], colors[6]);
        // Repeated resolution stays stable past the palette too.
        assert_eq!(r.resolve("s7"), colors[7]);
    }

    #[test]
    fn contrast_flips_at_mid_luminance() {
        assert_eq!(contrast_text_color(css::WHITE), css::BLACK);
        assert_eq!(contrast_text_color(css::BLACK), css::WHITE);
        assert_eq!(contrast_text_color(css::YELLOW), css::BLACK);
        assert_eq!(contrast_text_color(css::NAVY), css::WHITE);
    }
}
