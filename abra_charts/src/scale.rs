// Copyright 2025 the Abra Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Scale builders: data domains to pixel ranges.
//!
//! The studio charts need five mappings: band and point scales for
//! categorical axes, a linear scale (with "nice" domain rounding) for value
//! axes, a power scale for bubble radii, and a sequential color scale as the
//! last-resort category color. Domains are always sanitized by the caller —
//! `NaN` never reaches a scale — but every scale still degrades to a usable
//! default instead of panicking when handed an empty or degenerate domain.

use peniko::Color;

/// A linear mapping from a continuous domain to a continuous range.
#[derive(Clone, Copy, Debug)]
pub struct ScaleLinear {
    domain: (f64, f64),
    range: (f64, f64),
}

impl ScaleLinear {
    /// Creates a new scale mapping `domain` values to `range` values.
    ///
    /// A degenerate or non-finite domain falls back to `(0, 1)` so empty
    /// datasets never poison downstream positions.
    pub fn new(domain: (f64, f64), range: (f64, f64)) -> Self {
        let domain = if domain.0.is_finite() && domain.1.is_finite() && domain.0 != domain.1 {
            domain
        } else {
            (0.0, 1.0)
        };
        Self { domain, range }
    }

    /// Creates a scale over `[0, max(values)]`, ignoring non-finite values.
    ///
    /// The studio's value axes are zero-based; use [`ScaleLinear::from_extent`]
    /// for scatter-style axes.
    pub fn zero_to_max<'a>(values: impl IntoIterator<Item = &'a f64>, range: (f64, f64)) -> Self {
        let max = values
            .into_iter()
            .copied()
            .filter(|v| v.is_finite())
            .fold(f64::NEG_INFINITY, f64::max);
        if max.is_finite() && max > 0.0 {
            Self::new((0.0, max), range)
        } else {
            Self::new((0.0, 1.0), range)
        }
    }

    /// Creates a scale over the `[min, max]` extent of the values.
    pub fn from_extent<'a>(values: impl IntoIterator<Item = &'a f64>, range: (f64, f64)) -> Self {
        let mut min = f64::INFINITY;
        let mut max = f64::NEG_INFINITY;
        for v in values.into_iter().copied().filter(|v| v.is_finite()) {
            min = min.min(v);
            max = max.max(v);
        }
        if min.is_finite() && max.is_finite() && min != max {
            Self::new((min, max), range)
        } else if min.is_finite() {
            // Single distinct value: pad so the point sits mid-range.
            Self::new((min - 1.0, min + 1.0), range)
        } else {
            Self::new((0.0, 1.0), range)
        }
    }

    /// Rounds the domain outward to tick-friendly values.
    pub fn nice(self, tick_count: usize) -> Self {
        let ticks = nice_ticks(self.domain.0, self.domain.1, tick_count);
        if ticks.len() >= 2 {
            Self::new(
                (*ticks.first().unwrap(), *ticks.last().unwrap()),
                self.range,
            )
        } else {
            self
        }
    }

    /// Maps a value from domain space into range space.
    pub fn map(&self, x: f64) -> f64 {
        let (d0, d1) = self.domain;
        let (r0, r1) = self.range;
        let denom = d1 - d0;
        if denom == 0.0 {
            return r0;
        }
        let t = (x - d0) / denom;
        r0 + t * (r1 - r0)
    }

    /// Returns the configured domain.
    pub fn domain(&self) -> (f64, f64) {
        self.domain
    }

    /// Returns "nice-ish" tick values for the domain.
    pub fn ticks(&self, count: usize) -> Vec<f64> {
        nice_ticks(self.domain.0, self.domain.1, count)
    }
}

fn nice_ticks(mut min: f64, mut max: f64, count: usize) -> Vec<f64> {
    if count == 0 {
        return Vec::new();
    }
    if min == max {
        return vec![min];
    }
    if min > max {
        std::mem::swap(&mut min, &mut max);
    }
    let span = max - min;
    let step = nice_step(span / count.max(1) as f64);
    if step == 0.0 {
        return vec![min, max];
    }

    let start = (min / step).floor() * step;
    let stop = (max / step).ceil() * step;

    let n_f = ((stop - start) / step).round();
    let n = if n_f.is_finite() && n_f >= 0.0 {
        n_f.min(10_000.0) as u64
    } else {
        0
    };
    (0..=n).map(|i| start + step * i as f64).collect()
}

fn nice_step(step: f64) -> f64 {
    if !step.is_finite() || step <= 0.0 {
        return 0.0;
    }
    let power = step.log10().floor();
    let base = 10_f64.powf(power);
    let error = step / base;
    let nice = if error >= 7.5 {
        10.0
    } else if error >= 3.5 {
        5.0
    } else if error >= 1.5 {
        2.0
    } else {
        1.0
    };
    nice * base
}

/// A discrete band scale for categorical charts.
///
/// Padding is a fraction of the band step (`0..1`), derived from the style
/// state's spacing field (`spacing / 100`).
#[derive(Clone, Copy, Debug)]
pub struct ScaleBand {
    range: (f64, f64),
    count: usize,
    padding: f64,
}

impl ScaleBand {
    /// Creates a new band scale covering `count` bands over `range`.
    pub fn new(range: (f64, f64), count: usize) -> Self {
        Self {
            range,
            count,
            padding: 0.1,
        }
    }

    /// Sets the padding fraction (clamped to `0..=0.95`).
    pub fn with_padding(mut self, padding: f64) -> Self {
        self.padding = if padding.is_finite() {
            padding.clamp(0.0, 0.95)
        } else {
            0.1
        };
        self
    }

    /// Returns the number of bands.
    pub fn count(&self) -> usize {
        self.count
    }

    fn step(&self) -> f64 {
        let n = self.count as f64;
        if n <= 0.0 {
            return 0.0;
        }
        let (r0, r1) = self.range;
        (r1 - r0).abs() / n
    }

    /// Returns the computed band width.
    pub fn band_width(&self) -> f64 {
        self.step() * (1.0 - self.padding)
    }

    /// Returns the leading-edge position for the band at `index`.
    pub fn position(&self, index: usize) -> f64 {
        let (r0, r1) = self.range;
        let start = r0.min(r1);
        let step = self.step();
        start + step * index as f64 + step * self.padding * 0.5
    }

    /// Returns the center position for the band at `index`.
    pub fn center(&self, index: usize) -> f64 {
        self.position(index) + self.band_width() * 0.5
    }
}

/// A discrete point scale (band positions without width).
#[derive(Clone, Copy, Debug)]
pub struct ScalePoint {
    range: (f64, f64),
    count: usize,
    padding: f64,
}

impl ScalePoint {
    /// Creates a new point scale.
    pub fn new(range: (f64, f64), count: usize) -> Self {
        Self {
            range,
            count,
            padding: 0.5,
        }
    }

    /// Sets the outer padding in point steps.
    pub fn with_padding(mut self, padding: f64) -> Self {
        self.padding = padding.max(0.0);
        self
    }

    /// Returns the position for the point at `index`.
    pub fn position(&self, index: usize) -> f64 {
        let (r0, r1) = self.range;
        let start = r0.min(r1);
        let n = self.count as f64;
        if n <= 1.0 {
            return start + (r1 - r0).abs() * 0.5;
        }
        let span = (r1 - r0).abs();
        let denom = (n - 1.0) + 2.0 * self.padding;
        let step = if denom == 0.0 { 0.0 } else { span / denom };
        start + self.padding * step + step * index as f64
    }
}

/// A power scale, used for bubble radii.
///
/// The exponent is below 1 (area-law compression) so the largest values do
/// not visually drown the rest.
#[derive(Clone, Copy, Debug)]
pub struct ScalePower {
    domain_max: f64,
    range: (f64, f64),
    exponent: f64,
}

impl ScalePower {
    /// Creates a radius scale over `[0, domain_max]` with exponent `0.5`.
    pub fn new(domain_max: f64, range: (f64, f64)) -> Self {
        let domain_max = if domain_max.is_finite() && domain_max > 0.0 {
            domain_max
        } else {
            1.0
        };
        Self {
            domain_max,
            range,
            exponent: 0.5,
        }
    }

    /// Sets the exponent (clamped to `0.1..=1.0`).
    pub fn with_exponent(mut self, exponent: f64) -> Self {
        self.exponent = if exponent.is_finite() {
            exponent.clamp(0.1, 1.0)
        } else {
            0.5
        };
        self
    }

    /// Maps a value into the radius range; non-finite values map to the
    /// range minimum.
    pub fn map(&self, x: f64) -> f64 {
        let (r0, r1) = self.range;
        if !x.is_finite() || x <= 0.0 {
            return r0;
        }
        let t = (x / self.domain_max).min(1.0).powf(self.exponent);
        r0 + t * (r1 - r0)
    }
}

/// A sequential color scale: interpolates between two colors over `[0, 1]`.
///
/// This is the last-resort color source when neither the override map nor a
/// palette resolves a label.
#[derive(Clone, Copy, Debug)]
pub struct SequentialColorScale {
    start: Color,
    end: Color,
}

impl SequentialColorScale {
    /// Creates a scale between two endpoint colors.
    pub fn new(start: Color, end: Color) -> Self {
        Self { start, end }
    }

    /// Samples the scale at `t` (clamped to `0..=1`).
    pub fn sample(&self, t: f64) -> Color {
        let t = if t.is_finite() { t.clamp(0.0, 1.0) } else { 0.0 };
        let a = self.start.components;
        let b = self.end.components;
        Color::new([
            a[0] + (b[0] - a[0]) * t as f32,
            a[1] + (b[1] - a[1]) * t as f32,
            a[2] + (b[2] - a[2]) * t as f32,
            a[3] + (b[3] - a[3]) * t as f32,
        ])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn linear_maps_endpoints() {
        let s = ScaleLinear::new((0.0, 10.0), (100.0, 0.0));
        assert_eq!(s.map(0.0), 100.0);
        assert_eq!(s.map(10.0), 0.0);
        assert_eq!(s.map(5.0), 50.0);
    }

    #[test]
    fn empty_domain_defaults_to_unit() {
        let s = ScaleLinear::zero_to_max([].iter(), (0.0, 100.0));
        assert_eq!(s.domain(), (0.0, 1.0));

        let all_nan = [f64::NAN, f64::NAN];
        let s = ScaleLinear::zero_to_max(all_nan.iter(), (0.0, 100.0));
        assert_eq!(s.domain(), (0.0, 1.0));
    }

    #[test]
    fn nice_rounds_domain_outward() {
        let s = ScaleLinear::new((0.0, 97.0), (0.0, 1.0)).nice(10);
        assert_eq!(s.domain().0, 0.0);
        assert!(s.domain().1 >= 97.0);
        assert_eq!(s.domain().1, 100.0);
    }

    #[test]
    fn band_positions_and_width_respect_padding() {
        let s = ScaleBand::new((0.0, 100.0), 4).with_padding(0.5);
        assert_eq!(s.band_width(), 12.5);
        // Steps are 25; half the padding sits on each side of a band.
        assert_eq!(s.position(0), 6.25);
        assert_eq!(s.position(1), 31.25);
        assert!(s.center(0) < s.center(1));
    }

    #[test]
    fn band_with_full_spacing_is_clamped() {
        let s = ScaleBand::new((0.0, 100.0), 4).with_padding(1.0);
        assert!(s.band_width() > 0.0);
    }

    #[test]
    fn power_scale_compresses_large_values() {
        let s = ScalePower::new(100.0, (2.0, 20.0));
        let quarter = s.map(25.0);
        let full = s.map(100.0);
        assert_eq!(full, 20.0);
        // sqrt compression: a quarter of the value is half the radius span.
        assert!((quarter - 11.0).abs() < 1e-9);
        assert_eq!(s.map(f64::NAN), 2.0);
    }

    #[test]
    fn point_scale_is_monotonic() {
        let s = ScalePoint::new((0.0, 100.0), 5);
        assert!(s.position(0) < s.position(1));
        assert!(s.position(1) < s.position(4));
    }

    #[test]
    fn sequential_scale_endpoints() {
        let s = SequentialColorScale::new(Color::new([0.0, 0.0, 0.0, 1.0]), Color::WHITE);
        assert_eq!(s.sample(0.0).components[0], 0.0);
        assert_eq!(s.sample(1.0).components[0], 1.0);
    }
}
