// Copyright 2025 the Abra Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Built-in map regions and projection math.
//!
//! The map kinds ship five simplified region datasets (embedded JSON) and
//! join table rows to features by name. The projection is a plain
//! equirectangular fit: longitude/latitude scaled uniformly into the plot
//! rectangle, latitude flipped. Zooming re-fits the projection to one
//! feature's bounds instead of transforming an existing scene.

use kurbo::{BezPath, Point, Rect};
use serde::Deserialize;

/// Errors from the embedded region datasets.
#[derive(Debug, thiserror::Error)]
pub enum GeoError {
    /// The embedded dataset failed to parse.
    #[error("malformed region dataset: {0}")]
    Malformed(#[from] serde_json::Error),
    /// The dataset parsed but contains no features.
    #[error("region dataset is empty")]
    Empty,
}

/// The built-in map regions.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Region {
    /// The default region.
    Europe,
    /// Model ids 100..=199.
    Asia,
    /// Model ids 200..=299.
    NorthAmerica,
    /// Model ids 300..=399.
    SouthAmerica,
    /// Model ids 400..=499.
    Africa,
}

impl Region {
    /// Selects the region for a stored model id.
    ///
    /// Ids outside every reserved range fall back to Europe.
    pub fn from_model_id(id: u32) -> Self {
        match id {
            100..=199 => Self::Asia,
            200..=299 => Self::NorthAmerica,
            300..=399 => Self::SouthAmerica,
            400..=499 => Self::Africa,
            _ => Self::Europe,
        }
    }

    fn dataset(self) -> &'static str {
        match self {
            Self::Europe => include_str!("../assets/europe.json"),
            Self::Asia => include_str!("../assets/asia.json"),
            Self::NorthAmerica => include_str!("../assets/north_america.json"),
            Self::SouthAmerica => include_str!("../assets/south_america.json"),
            Self::Africa => include_str!("../assets/africa.json"),
        }
    }
}

/// One named map feature.
#[derive(Clone, Debug, Deserialize)]
pub struct Feature {
    /// Feature name; table rows join on this, case-insensitively.
    pub name: String,
    /// Outline ring as `[longitude, latitude]` pairs.
    pub polygon: Vec<[f64; 2]>,
}

impl Feature {
    /// The feature's centroid (vertex average).
    pub fn centroid(&self) -> (f64, f64) {
        if self.polygon.is_empty() {
            return (0.0, 0.0);
        }
        let n = self.polygon.len() as f64;
        let (sx, sy) = self
            .polygon
            .iter()
            .fold((0.0, 0.0), |(sx, sy), p| (sx + p[0], sy + p[1]));
        (sx / n, sy / n)
    }

    /// The feature's lon/lat bounds.
    pub fn bounds(&self) -> GeoBounds {
        let mut b = GeoBounds::empty();
        for p in &self.polygon {
            b.extend(p[0], p[1]);
        }
        b
    }
}

/// One region's feature set.
#[derive(Clone, Debug, Deserialize)]
pub struct RegionData {
    /// Features in dataset order.
    pub features: Vec<Feature>,
}

impl RegionData {
    /// Loads the embedded dataset for a region.
    pub fn load(region: Region) -> Result<Self, GeoError> {
        let data: Self = serde_json::from_str(region.dataset())?;
        if data.features.is_empty() {
            return Err(GeoError::Empty);
        }
        Ok(data)
    }

    /// Finds a feature by name, ignoring case and surrounding whitespace.
    pub fn find(&self, name: &str) -> Option<&Feature> {
        let needle = name.trim();
        self.features
            .iter()
            .find(|f| f.name.eq_ignore_ascii_case(needle))
    }

    /// The combined bounds of every feature.
    pub fn bounds(&self) -> GeoBounds {
        let mut b = GeoBounds::empty();
        for f in &self.features {
            for p in &f.polygon {
                b.extend(p[0], p[1]);
            }
        }
        b
    }
}

/// A lon/lat bounding box.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GeoBounds {
    /// Western edge.
    pub min_lon: f64,
    /// Eastern edge.
    pub max_lon: f64,
    /// Southern edge.
    pub min_lat: f64,
    /// Northern edge.
    pub max_lat: f64,
}

impl GeoBounds {
    fn empty() -> Self {
        Self {
            min_lon: f64::INFINITY,
            max_lon: f64::NEG_INFINITY,
            min_lat: f64::INFINITY,
            max_lat: f64::NEG_INFINITY,
        }
    }

    fn extend(&mut self, lon: f64, lat: f64) {
        self.min_lon = self.min_lon.min(lon);
        self.max_lon = self.max_lon.max(lon);
        self.min_lat = self.min_lat.min(lat);
        self.max_lat = self.max_lat.max(lat);
    }

    fn is_valid(&self) -> bool {
        self.min_lon.is_finite()
            && self.max_lon.is_finite()
            && self.min_lat.is_finite()
            && self.max_lat.is_finite()
            && (self.min_lon < self.max_lon || self.min_lat < self.max_lat)
    }
}

/// An equirectangular projection fitted to a plot rectangle.
#[derive(Clone, Copy, Debug)]
pub struct Projection {
    scale: f64,
    center_lon: f64,
    center_lat: f64,
    center: Point,
}

impl Projection {
    /// Fits `bounds` inside `plot`, uniformly scaled and centered.
    ///
    /// `margin` is the fraction of the plot actually used; the zoomed view
    /// uses `0.9` so the target feature keeps a visible frame around it.
    pub fn fit(bounds: GeoBounds, plot: Rect, margin: f64) -> Self {
        let lon_span = (bounds.max_lon - bounds.min_lon).max(1e-6);
        let lat_span = (bounds.max_lat - bounds.min_lat).max(1e-6);
        let scale = if bounds.is_valid() {
            (plot.width() / lon_span).min(plot.height() / lat_span) * margin.clamp(0.1, 1.0)
        } else {
            1.0
        };
        Self {
            scale,
            center_lon: (bounds.min_lon + bounds.max_lon) * 0.5,
            center_lat: (bounds.min_lat + bounds.max_lat) * 0.5,
            center: plot.center(),
        }
    }

    /// Projects a lon/lat pair into scene coordinates.
    pub fn project(&self, lon: f64, lat: f64) -> Point {
        Point::new(
            self.center.x + (lon - self.center_lon) * self.scale,
            self.center.y - (lat - self.center_lat) * self.scale,
        )
    }

    /// Projects a feature outline into a closed path.
    pub fn feature_path(&self, feature: &Feature) -> BezPath {
        let mut path = BezPath::new();
        for (i, p) in feature.polygon.iter().enumerate() {
            let pt = self.project(p[0], p[1]);
            if i == 0 {
                path.move_to(pt);
            } else {
                path.line_to(pt);
            }
        }
        if !feature.polygon.is_empty() {
            path.close_path();
        }
        path
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_embedded_dataset_parses() {
        for region in [
            Region::Europe,
            Region::Asia,
            Region::NorthAmerica,
            Region::SouthAmerica,
            Region::Africa,
        ] {
            let data = RegionData::load(region).unwrap();
            assert!(!data.features.is_empty());
            for f in &data.features {
                assert!(f.polygon.len() >= 3, "{} has a degenerate outline", f.name);
            }
        }
    }

    #[test]
    fn model_id_ranges_select_regions() {
        assert_eq!(Region::from_model_id(6), Region::Europe);
        assert_eq!(Region::from_model_id(150), Region::Asia);
        assert_eq!(Region::from_model_id(200), Region::NorthAmerica);
        assert_eq!(Region::from_model_id(399), Region::SouthAmerica);
        assert_eq!(Region::from_model_id(450), Region::Africa);
        assert_eq!(Region::from_model_id(500), Region::Europe);
    }

    #[test]
    fn lookup_ignores_case_and_whitespace() {
        let data = RegionData::load(Region::Europe).unwrap();
        assert!(data.find(" hungary ").is_some());
        assert!(data.find("Atlantis").is_none());
    }

    #[test]
    fn projection_fits_bounds_inside_the_plot() {
        let data = RegionData::load(Region::Europe).unwrap();
        let plot = Rect::new(50.0, 50.0, 550.0, 350.0);
        let proj = Projection::fit(data.bounds(), plot, 0.95);
        for f in &data.features {
            for p in &f.polygon {
                let pt = proj.project(p[0], p[1]);
                assert!(pt.x >= plot.x0 && pt.x <= plot.x1);
                assert!(pt.y >= plot.y0 && pt.y <= plot.y1);
            }
        }
    }

    #[test]
    fn north_is_up() {
        let data = RegionData::load(Region::Europe).unwrap();
        let plot = Rect::new(0.0, 0.0, 600.0, 400.0);
        let proj = Projection::fit(data.bounds(), plot, 0.95);
        let (lon_n, lat_n) = data.find("Finland").unwrap().centroid();
        let (lon_s, lat_s) = data.find("Greece").unwrap().centroid();
        assert!(lat_n > lat_s);
        assert!(proj.project(lon_n, lat_n).y < proj.project(lon_s, lat_s).y);
    }

    #[test]
    fn zoomed_fit_magnifies() {
        let data = RegionData::load(Region::Europe).unwrap();
        let plot = Rect::new(0.0, 0.0, 600.0, 400.0);
        let overview = Projection::fit(data.bounds(), plot, 0.95);
        let target = data.find("Hungary").unwrap();
        let zoomed = Projection::fit(target.bounds(), plot, 0.9);

        let (lon, lat) = target.centroid();
        let b = target.bounds();
        let w_overview =
            (overview.project(b.max_lon, lat).x - overview.project(b.min_lon, lat).x).abs();
        let w_zoomed = (zoomed.project(b.max_lon, lat).x - zoomed.project(b.min_lon, lat).x).abs();
        assert!(w_zoomed > w_overview);
        let _ = lon;
    }
}
