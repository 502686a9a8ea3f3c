//! Reusable volume fixtures.
//!
//! Three standard volumes for view and worker testing:
//!
//! - [`patterned_volume`]: every cell holds [`pattern_biome`] of its
//!   position, so any misrouted read shows up as a wrong value.
//! - [`checkerboard_volume`]: alternating biomes by coordinate parity.
//! - [`uniform_volume`]: one biome everywhere.

use strata_core::{BiomeId, Vector3i};
use strata_volume::{BiomeBufferConfig, BiomeVolume, MutableBiomeView};

/// Deterministic biome for a position.
///
/// Distinct for all positions within a 16-cell neighbourhood on every
/// axis, which covers every fixture used in the workspace tests.
pub fn pattern_biome(p: Vector3i) -> BiomeId {
    let x = p.x.rem_euclid(16) as u16;
    let y = p.y.rem_euclid(16) as u16;
    let z = p.z.rem_euclid(16) as u16;
    BiomeId((y << 8) | (z << 4) | x)
}

fn allocate(min: Vector3i, max: Vector3i) -> MutableBiomeView {
    MutableBiomeView::allocate(&BiomeBufferConfig::new(min, max))
        .unwrap_or_else(|e| panic!("fixture {min}..={max}: {e}"))
}

/// A volume over `[min, max]` with [`pattern_biome`] in every cell.
pub fn patterned_volume(min: Vector3i, max: Vector3i) -> MutableBiomeView {
    let view = allocate(min, max);
    view.biome_worker()
        .fill(pattern_biome)
        .unwrap_or_else(|e| panic!("fixture fill: {e}"));
    view
}

/// A volume alternating between `even` and `odd` by `x + y + z` parity.
pub fn checkerboard_volume(
    min: Vector3i,
    max: Vector3i,
    even: BiomeId,
    odd: BiomeId,
) -> MutableBiomeView {
    let view = allocate(min, max);
    view.biome_worker()
        .fill(|p| if (p.x + p.y + p.z).rem_euclid(2) == 0 { even } else { odd })
        .unwrap_or_else(|e| panic!("fixture fill: {e}"));
    view
}

/// A volume holding `biome` in every cell.
pub fn uniform_volume(min: Vector3i, max: Vector3i, biome: BiomeId) -> MutableBiomeView {
    let config = BiomeBufferConfig::new(min, max).default_biome(biome);
    MutableBiomeView::allocate(&config).unwrap_or_else(|e| panic!("fixture {min}..={max}: {e}"))
}
