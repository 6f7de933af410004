use crate::data::{Region, Tile};
use crate::error::{Error, Result};

/// Most tiles [`tiles`] will lay along one axis. Keeps the grid total within
/// `u64` and every index exactly representable as `f64`.
pub const MAX_AXIS_TILES: u64 = 1 << 31;

/// Number of tiles of size `step` needed along one axis: the count of
/// `k >= 0` with `min + k * step < max`.
///
/// `None` when that count exceeds [`MAX_AXIS_TILES`].
pub fn axis_count(min: f64, max: f64, step: f64) -> Option<u64> {
    let estimate = ((max - min) / step).ceil().max(0.0);
    if !estimate.is_finite() || estimate > MAX_AXIS_TILES as f64 {
        return None;
    }

    let mut n = estimate as u64;
    while n > 0 && min + (n - 1) as f64 * step >= max {
        n -= 1;
    }
    while min + n as f64 * step < max {
        n += 1;
        if n > MAX_AXIS_TILES {
            return None;
        }
    }
    Some(n)
}

/// Lazy, restartable sequence of tiles covering a region.
///
/// Longitude is the outer loop and latitude the inner one, both ascending.
/// Edges are computed from the tile index, so neighbouring tiles share their
/// boundary exactly. Cloning yields an independent iterator from the same
/// position.
#[derive(Debug, Clone)]
pub struct Tiles {
    region:    Region,
    step:      f64,
    lon_count: u64,
    lat_count: u64,
    lon_index: u64,
    lat_index: u64,
}

/// Tile `region` with square tiles of side `step` degrees.
///
/// # Examples
///
/// ```
/// use gpxcrawl_fetch::{Region, Tile, tiles};
///
/// let region = Region::new(0.0, 0.0, 1.0, 1.0).unwrap();
/// let all: Vec<Tile> = tiles(&region, 0.5).unwrap().collect();
/// assert_eq!(all.len(), 4);
/// assert_eq!(all[1], Tile::new(0.0, 0.5, 0.5, 1.0));
/// ```
///
/// A step so small that an axis would need more than [`MAX_AXIS_TILES`] tiles
/// is rejected like a non-positive one.
pub fn tiles(region: &Region, step: f64) -> Result<Tiles> {
    if !step.is_finite() || step <= 0.0 {
        return Err(Error::InvalidStep(step));
    }
    let lon_count =
        axis_count(region.min_lon, region.max_lon, step).ok_or(Error::InvalidStep(step))?;
    let lat_count =
        axis_count(region.min_lat, region.max_lat, step).ok_or(Error::InvalidStep(step))?;

    Ok(Tiles {
        region: *region,
        step,
        lon_count,
        lat_count,
        lon_index: 0,
        lat_index: 0,
    })
}

impl Tiles {
    /// Tiles in the whole grid, including those already yielded.
    pub fn total(&self) -> u64 { self.lon_count * self.lat_count }

    fn edge(min: f64, index: u64, step: f64) -> f64 { min + index as f64 * step }
}

impl Iterator for Tiles {
    type Item = Tile;

    fn next(&mut self) -> Option<Tile> {
        if self.lat_count == 0 || self.lon_index >= self.lon_count {
            return None;
        }

        let (i, j, step) = (self.lon_index, self.lat_index, self.step);
        let tile = Tile::new(
            Self::edge(self.region.min_lon, i, step),
            Self::edge(self.region.min_lat, j, step),
            Self::edge(self.region.min_lon, i + 1, step),
            Self::edge(self.region.min_lat, j + 1, step),
        );

        self.lat_index += 1;
        if self.lat_index == self.lat_count {
            self.lat_index = 0;
            self.lon_index += 1;
        }

        Some(tile)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let done = self.lon_index * self.lat_count + self.lat_index;
        let left = self.total().saturating_sub(done);
        match usize::try_from(left) {
            Ok(n) => (n, Some(n)),
            Err(_) => (usize::MAX, None),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn region(a: f64, b: f64, c: f64, d: f64) -> Region { Region::new(a, b, c, d).unwrap() }

    #[test]
    fn test_unit_square_half_step_order() {
        let all: Vec<Tile> = tiles(&region(0.0, 0.0, 1.0, 1.0), 0.5).unwrap().collect();
        assert_eq!(
            all,
            vec![
                Tile::new(0.0, 0.0, 0.5, 0.5),
                Tile::new(0.0, 0.5, 0.5, 1.0),
                Tile::new(0.5, 0.0, 1.0, 0.5),
                Tile::new(0.5, 0.5, 1.0, 1.0),
            ]
        );
    }

    #[test]
    fn test_exact_division_count() {
        let t = tiles(&region(0.0, 0.0, 2.0, 1.0), 0.25).unwrap();
        assert_eq!(t.total(), 8 * 4);
        assert_eq!(t.count(), 32);
    }

    #[test]
    fn test_non_divisible_step_overshoots() {
        let all: Vec<Tile> = tiles(&region(0.0, 0.0, 1.0, 0.5), 0.4).unwrap().collect();
        // 3 columns (0, 0.4, 0.8) x 2 rows (0, 0.4)
        assert_eq!(all.len(), 6);
        let last = all.last().unwrap();
        assert!(last.max_lon > 1.0);
        assert!(last.max_lat > 0.5);
    }

    #[test]
    fn test_step_larger_than_region() {
        let all: Vec<Tile> = tiles(&region(10.0, 20.0, 10.1, 20.1), 1.0).unwrap().collect();
        assert_eq!(all, vec![Tile::new(10.0, 20.0, 11.0, 21.0)]);
    }

    #[test]
    fn test_deterministic_and_restartable() {
        let r = region(-87.6349, 24.3963, -79.9743, 31.0009);
        let first: Vec<Tile> = tiles(&r, 0.25).unwrap().collect();
        let second: Vec<Tile> = tiles(&r, 0.25).unwrap().collect();
        assert_eq!(first, second);

        let mut it = tiles(&r, 0.25).unwrap();
        it.next();
        let fork = it.clone();
        assert_eq!(it.collect::<Vec<_>>(), fork.collect::<Vec<_>>());
    }

    #[test]
    fn test_florida_grid_dimensions() {
        let r = region(-87.6349, 24.3963, -79.9743, 31.0009);
        let t = tiles(&r, 0.25).unwrap();
        // 7.6606 / 0.25 -> 31 columns, 6.6046 / 0.25 -> 27 rows
        assert_eq!(t.total(), 31 * 27);
        assert_eq!(t.size_hint(), (837, Some(837)));
    }

    #[test]
    fn test_full_coverage_sampled() {
        let r = region(-3.3, 1.7, 2.9, 4.05);
        let all: Vec<Tile> = tiles(&r, 0.7).unwrap().collect();
        for i in 0..=40 {
            for j in 0..=40 {
                let lon = r.min_lon + r.lon_span() * i as f64 / 40.0;
                let lat = r.min_lat + r.lat_span() * j as f64 / 40.0;
                assert!(
                    all.iter().any(|t| t.contains(lon, lat)),
                    "({lon}, {lat}) not covered"
                );
            }
        }
    }

    #[test]
    fn test_neighbours_share_edges() {
        let all: Vec<Tile> = tiles(&region(0.0, 0.0, 1.0, 1.0), 0.1).unwrap().collect();
        for pair in all.windows(2) {
            if pair[0].min_lon == pair[1].min_lon {
                assert_eq!(pair[0].max_lat, pair[1].min_lat);
            } else {
                assert_eq!(pair[0].max_lon, pair[1].min_lon);
            }
        }
    }

    #[test]
    fn test_size_hint_shrinks() {
        let mut it = tiles(&region(0.0, 0.0, 1.0, 1.0), 0.5).unwrap();
        assert_eq!(it.size_hint(), (4, Some(4)));
        it.next();
        it.next();
        it.next();
        assert_eq!(it.size_hint(), (1, Some(1)));
        it.next();
        assert_eq!(it.size_hint(), (0, Some(0)));
        assert!(it.next().is_none());
    }

    #[test]
    fn test_invalid_step() {
        let r = region(0.0, 0.0, 1.0, 1.0);
        assert!(matches!(tiles(&r, 0.0), Err(Error::InvalidStep(_))));
        assert!(matches!(tiles(&r, -0.5), Err(Error::InvalidStep(_))));
        assert!(matches!(tiles(&r, f64::NAN), Err(Error::InvalidStep(_))));
    }

    #[test]
    fn test_axis_count() {
        assert_eq!(axis_count(0.0, 1.0, 0.5), Some(2));
        assert_eq!(axis_count(0.0, 1.0, 0.3), Some(4));
        assert_eq!(axis_count(0.0, 1.0, 1.0), Some(1));
        assert_eq!(axis_count(0.0, 1.0, 5.0), Some(1));
        assert_eq!(axis_count(0.0, 1.0, 1e-10), None);
        assert_eq!(axis_count(0.0, 1.0, 1e-300), None);
    }

    #[test]
    fn test_tiny_step_rejected() {
        let r = region(0.0, 0.0, 1.0, 1.0);
        assert!(matches!(tiles(&r, 1e-10), Err(Error::InvalidStep(_))));
        assert!(matches!(tiles(&r, 1e-300), Err(Error::InvalidStep(_))));
        assert!(matches!(tiles(&r, f64::MIN_POSITIVE), Err(Error::InvalidStep(_))));
    }

    #[test]
    fn test_largest_grid_reports_exact_size() {
        // 2^31 columns and rows: the biggest grid accepted
        let r = region(0.0, 0.0, 1.0, 1.0);
        let step = 1.0 / MAX_AXIS_TILES as f64;
        let t = tiles(&r, step).unwrap();
        assert_eq!(t.total(), MAX_AXIS_TILES * MAX_AXIS_TILES);
        let expected = usize::try_from(MAX_AXIS_TILES * MAX_AXIS_TILES).ok();
        assert_eq!(t.size_hint().1, expected);
        assert!(matches!(tiles(&r, step / 2.0), Err(Error::InvalidStep(_))));
    }
}
