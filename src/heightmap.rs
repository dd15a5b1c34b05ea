use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};

use crate::error::{Result, TerrainError};
use crate::tilemap::Tilemap;

// =============================================================================
// GENERATION PARAMETERS
// =============================================================================

pub const DEFAULT_GRID_WIDTH: usize = 30;
pub const DEFAULT_GRID_HEIGHT: usize = 30;
pub const DEFAULT_MAX_ELEVATION: u32 = 30;
/// Largest accepted elevation bound. Every cell then fits in an `i32`.
pub const MAX_ELEVATION_LIMIT: u32 = i32::MAX as u32;

/// Grid shape and elevation bound. Fixed for the lifetime of a session;
/// only the seed changes between regenerations.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct HeightmapParams {
    pub width: usize,
    pub height: usize,
    /// Exclusive upper bound for cell elevations
    pub max_elevation: u32,
}

impl Default for HeightmapParams {
    fn default() -> Self {
        Self {
            width: DEFAULT_GRID_WIDTH,
            height: DEFAULT_GRID_HEIGHT,
            max_elevation: DEFAULT_MAX_ELEVATION,
        }
    }
}

impl HeightmapParams {
    pub fn validate(&self) -> Result<()> {
        if self.width == 0 || self.height == 0 {
            return Err(TerrainError::InvalidParameter(format!(
                "grid dimensions must be positive, got {}x{}",
                self.width, self.height
            )));
        }
        if self.max_elevation == 0 || self.max_elevation > MAX_ELEVATION_LIMIT {
            return Err(TerrainError::InvalidParameter(format!(
                "max elevation must be in 1..={}, got {}",
                MAX_ELEVATION_LIMIT, self.max_elevation
            )));
        }
        Ok(())
    }

    /// Generate a heightmap from a fresh ChaCha8 stream seeded with `seed`.
    pub fn generate(&self, seed: u64) -> Result<Tilemap<u32>> {
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        generate_heightmap(self.width, self.height, self.max_elevation, &mut rng)
    }
}

// =============================================================================
// GENERATION
// =============================================================================

/// Fill a `width` x `height` grid with independent uniform draws from
/// `[0, max_elevation)`.
///
/// Cells are drawn in row-major order, one draw per cell, so the same
/// generator state always yields the same grid. There is no spatial
/// correlation between neighbours: this is white noise, not a coherent
/// terrain model.
pub fn generate_heightmap(
    width: usize,
    height: usize,
    max_elevation: u32,
    rng: &mut impl Rng,
) -> Result<Tilemap<u32>> {
    HeightmapParams { width, height, max_elevation }.validate()?;

    Ok(Tilemap::from_fn(width, height, |_, _| rng.gen_range(0..max_elevation)))
}

// =============================================================================
// STATISTICS
// =============================================================================

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct HeightmapStats {
    pub min: u32,
    pub max: u32,
    pub mean: f64,
}

/// Min, max and mean elevation. `None` for an empty grid.
pub fn heightmap_stats(heightmap: &Tilemap<u32>) -> Option<HeightmapStats> {
    if heightmap.is_empty() {
        return None;
    }

    let mut min = u32::MAX;
    let mut max = 0;
    let mut sum = 0u64;
    for (_, _, &h) in heightmap.iter() {
        min = min.min(h);
        max = max.max(h);
        sum += h as u64;
    }

    Some(HeightmapStats {
        min,
        max,
        mean: sum as f64 / heightmap.len() as f64,
    })
}

/// Count of cells per elevation value, indexed by elevation.
pub fn height_histogram(heightmap: &Tilemap<u32>, max_elevation: u32) -> Vec<usize> {
    let mut bins = vec![0usize; max_elevation as usize];
    for (_, _, &h) in heightmap.iter() {
        if let Some(bin) = bins.get_mut(h as usize) {
            *bin += 1;
        }
    }
    bins
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dimensions_and_bounds() {
        for &(w, h, m, seed) in &[(1, 1, 1, 0u64), (30, 30, 30, 42), (7, 3, 5, 9), (64, 2, 1000, 123)] {
            let mut rng = ChaCha8Rng::seed_from_u64(seed);
            let map = generate_heightmap(w, h, m, &mut rng).unwrap();

            assert_eq!(map.width, w);
            assert_eq!(map.height, h);
            assert_eq!(map.rows().count(), h);
            assert!(map.rows().all(|row| row.len() == w));
            assert!(map.iter().all(|(_, _, &v)| v < m));
        }
    }

    #[test]
    fn test_max_elevation_one_is_flat() {
        let mut rng = ChaCha8Rng::seed_from_u64(7);
        let map = generate_heightmap(5, 5, 1, &mut rng).unwrap();
        assert!(map.iter().all(|(_, _, &v)| v == 0));
    }

    #[test]
    fn test_same_seed_same_grid() {
        let params = HeightmapParams::default();
        let first = params.generate(42).unwrap();
        let second = params.generate(42).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_regenerate_with_seed_42_twice() {
        let mut rng_a = ChaCha8Rng::seed_from_u64(42);
        let mut rng_b = ChaCha8Rng::seed_from_u64(42);

        let a = generate_heightmap(30, 30, 30, &mut rng_a).unwrap();
        let b = generate_heightmap(30, 30, 30, &mut rng_b).unwrap();

        assert_eq!(a, b);
    }

    #[test]
    fn test_different_seeds_differ() {
        let params = HeightmapParams::default();
        assert_ne!(params.generate(1).unwrap(), params.generate(2).unwrap());
    }

    #[test]
    fn test_rejects_zero_parameters() {
        let mut rng = ChaCha8Rng::seed_from_u64(0);
        assert!(matches!(
            generate_heightmap(0, 10, 10, &mut rng),
            Err(TerrainError::InvalidParameter(_))
        ));
        assert!(matches!(
            generate_heightmap(10, 0, 10, &mut rng),
            Err(TerrainError::InvalidParameter(_))
        ));
        assert!(matches!(
            generate_heightmap(10, 10, 0, &mut rng),
            Err(TerrainError::InvalidParameter(_))
        ));
        assert!(matches!(
            generate_heightmap(10, 10, 4_000_000_000, &mut rng),
            Err(TerrainError::InvalidParameter(_))
        ));
        assert!(matches!(
            generate_heightmap(10, 10, MAX_ELEVATION_LIMIT + 1, &mut rng),
            Err(TerrainError::InvalidParameter(_))
        ));
    }

    #[test]
    fn test_largest_bound_fits_i32() {
        let mut rng = ChaCha8Rng::seed_from_u64(3);
        let map = generate_heightmap(8, 8, MAX_ELEVATION_LIMIT, &mut rng).unwrap();
        assert!(map.iter().all(|(_, _, &v)| i32::try_from(v).is_ok()));
    }

    #[test]
    fn test_stats_and_histogram() {
        let map = Tilemap::from_fn(2, 2, |x, y| (x + 2 * y) as u32);
        let stats = heightmap_stats(&map).unwrap();

        assert_eq!(stats.min, 0);
        assert_eq!(stats.max, 3);
        assert!((stats.mean - 1.5).abs() < 1e-9);
        assert_eq!(height_histogram(&map, 4), vec![1, 1, 1, 1]);
    }
}
