//! Benchmark profiles and utilities for the Strata biome volume library.
//!
//! - [`column_profile`]: one 16x256x16 chunk column with layered biomes
//! - [`sample_positions`]: deterministic in-bounds coordinates

#![forbid(unsafe_code)]
#![deny(rustdoc::broken_intra_doc_links)]

use strata_core::{BiomeId, Vector3i, VolumeError};
use strata_volume::{BiomeBufferConfig, BiomeVolume, MutableBiomeView};

/// One chunk column, 16x256x16, with its minimum corner at `(-16, 0, 32)`.
///
/// Biomes change every 16 layers and vary with `x ^ z` inside a layer.
pub fn column_profile() -> Result<MutableBiomeView, VolumeError> {
    let min = Vector3i::new(-16, 0, 32);
    let max = Vector3i::new(-1, 255, 47);
    let view = MutableBiomeView::allocate(&BiomeBufferConfig::new(min, max))?;
    view.biome_worker()
        .fill(|p| BiomeId(((p.y >> 4) as u16) * 16 + ((p.x ^ p.z) & 15) as u16))?;
    Ok(view)
}

/// `count` deterministic pseudo-random positions inside `[min, max]`.
pub fn sample_positions(min: Vector3i, max: Vector3i, count: usize) -> Vec<Vector3i> {
    let span = |lo: i32, hi: i32| (i64::from(hi) - i64::from(lo) + 1) as u64;
    let (sx, sy, sz) = (span(min.x, max.x), span(min.y, max.y), span(min.z, max.z));
    (0..count as u64)
        .map(|i| {
            let x = i.wrapping_mul(6364136223846793007) % sx;
            let y = i.wrapping_mul(1442695040888963407) % sy;
            let z = i.wrapping_mul(2862933555777941757) % sz;
            Vector3i::new(
                (i64::from(min.x) + x as i64) as i32,
                (i64::from(min.y) + y as i64) as i32,
                (i64::from(min.z) + z as i64) as i32,
            )
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn column_profile_has_one_chunk_column() {
        let column = column_profile().unwrap();
        assert_eq!(column.biome_size(), Vector3i::new(16, 256, 16));
        assert_eq!(column.biome(Vector3i::new(-16, 17, 32)), Ok(BiomeId(16)));
    }

    #[test]
    fn sample_positions_stay_in_bounds() {
        let min = Vector3i::new(-16, 0, 32);
        let max = Vector3i::new(-1, 255, 47);
        let samples = sample_positions(min, max, 1000);
        assert_eq!(samples.len(), 1000);
        assert!(samples.iter().all(|p| min.all_le(*p) && p.all_le(max)));
    }
}
