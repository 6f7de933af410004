use std::fmt;

use crate::error::{Error, Result};

/// Full area of interest for a run, in degrees.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Region {
    pub min_lon: f64,
    pub min_lat: f64,
    pub max_lon: f64,
    pub max_lat: f64,
}

impl Region {
    /// Build a region, rejecting non-finite coordinates and empty spans.
    pub fn new(min_lon: f64, min_lat: f64, max_lon: f64, max_lat: f64) -> Result<Self> {
        let coords = [min_lon, min_lat, max_lon, max_lat];
        if coords.iter().any(|c| !c.is_finite()) {
            return Err(Error::InvalidRegion(format!(
                "coordinates must be finite, got {coords:?}"
            )));
        }
        if min_lon >= max_lon {
            return Err(Error::InvalidRegion(format!(
                "min_lon {min_lon} must be below max_lon {max_lon}"
            )));
        }
        if min_lat >= max_lat {
            return Err(Error::InvalidRegion(format!(
                "min_lat {min_lat} must be below max_lat {max_lat}"
            )));
        }
        Ok(Self {
            min_lon,
            min_lat,
            max_lon,
            max_lat,
        })
    }

    pub fn lon_span(&self) -> f64 { self.max_lon - self.min_lon }

    pub fn lat_span(&self) -> f64 { self.max_lat - self.min_lat }

    /// Whether the point lies inside the region, edges included.
    pub fn contains(&self, lon: f64, lat: f64) -> bool {
        (self.min_lon..=self.max_lon).contains(&lon) && (self.min_lat..=self.max_lat).contains(&lat)
    }
}

/// One fixed-size sub-box of a [`Region`], the unit of pagination.
///
/// Tiles on the last row or column may extend past the region they were cut
/// from; they are never clipped.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Tile {
    pub min_lon: f64,
    pub min_lat: f64,
    pub max_lon: f64,
    pub max_lat: f64,
}

impl Tile {
    pub fn new(min_lon: f64, min_lat: f64, max_lon: f64, max_lat: f64) -> Self {
        Self {
            min_lon,
            min_lat,
            max_lon,
            max_lat,
        }
    }

    pub fn contains(&self, lon: f64, lat: f64) -> bool {
        (self.min_lon..=self.max_lon).contains(&lon) && (self.min_lat..=self.max_lat).contains(&lat)
    }

    /// `min_lon,min_lat,max_lon,max_lat`, the form the trackpoints API takes.
    pub fn bbox_param(&self) -> String {
        format!(
            "{},{},{},{}",
            self.min_lon, self.min_lat, self.max_lon, self.max_lat
        )
    }

    /// Output file name for this tile: `{prefix}_{min_lon}_{min_lat}_{max_lon}_{max_lat}.txt`.
    pub fn file_name(&self, prefix: &str) -> String {
        format!(
            "{prefix}_{}_{}_{}_{}.txt",
            self.min_lon, self.min_lat, self.max_lon, self.max_lat
        )
    }
}

impl fmt::Display for Tile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "({}, {}, {}, {})",
            self.min_lon, self.min_lat, self.max_lon, self.max_lat
        )
    }
}
