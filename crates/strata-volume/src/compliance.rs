//! Volume trait compliance test helpers.
//!
//! These functions verify that a [`BiomeVolume`] implementation satisfies
//! the laws every view must obey. Reused across the view test modules
//! (root, sub-view, transformed, unmodifiable).

use crate::transform::{DiscreteTransform3, Orientation};
use crate::volume::BiomeVolume;
use crate::worker::BoxPositions;
use indexmap::IndexSet;
use strata_core::{Axis, Vector3i, VolumeError};

/// Positions of the box grown by one cell on every side.
fn halo(min: Vector3i, max: Vector3i) -> BoxPositions {
    BoxPositions::new(min - Vector3i::ONE, max + Vector3i::ONE)
}

/// Assert that `contains_biome(p)` iff `biome(p)` is not `OutOfBounds`.
pub fn assert_contains_matches_read<V: BiomeVolume>(volume: &V) {
    for p in halo(volume.biome_min(), volume.biome_max()) {
        let read = volume.biome(p);
        assert_eq!(
            volume.contains_biome(p),
            !matches!(read, Err(VolumeError::OutOfBounds { .. })),
            "contains_biome({p}) disagrees with biome({p}) = {read:?}"
        );
    }
}

/// Assert that `size == max - min + 1` with every side at least 1.
pub fn assert_size_matches_bounds<V: BiomeVolume>(volume: &V) {
    let size = volume.biome_size();
    assert_eq!(
        size,
        volume.biome_max() - volume.biome_min() + Vector3i::ONE,
        "biome_size() inconsistent with bounds"
    );
    assert!(Vector3i::ONE.all_le(size), "empty volume: size {size}");
}

/// Assert that the worker visits exactly `sx * sy * sz` distinct positions.
pub fn assert_worker_complete<V: BiomeVolume>(volume: &V) {
    let size = volume.biome_size();
    let expected = size.cell_count().expect("size fits usize");
    let mut seen = IndexSet::new();
    volume.biome_worker().iterate(|_, p| {
        assert!(volume.contains_biome(p), "worker visited {p} outside bounds");
        assert!(seen.insert(p), "worker visited {p} twice");
    });
    assert_eq!(seen.len(), expected, "worker missed positions");
}

/// Assert that `biome_view(min, max)` reads exactly like the volume.
pub fn assert_full_sub_view_is_identity<V: BiomeVolume>(volume: &V) {
    let full = volume
        .biome_view(volume.biome_min(), volume.biome_max())
        .expect("full-bounds view should succeed");
    assert_eq!(full.biome_min(), volume.biome_min());
    assert_eq!(full.biome_max(), volume.biome_max());
    for p in volume.biome_worker().positions() {
        assert_eq!(full.biome(p), volume.biome(p), "full view differs at {p}");
    }
}

/// Assert the boundary rejections of `biome_view`.
pub fn assert_sub_view_rejections<V: BiomeVolume>(volume: &V) {
    let (min, max) = (volume.biome_min(), volume.biome_max());
    for axis in Axis::ALL {
        let inverted_min = min.with(axis, max.get(axis) + 1);
        assert!(
            matches!(
                volume.biome_view(inverted_min, max),
                Err(VolumeError::InvalidArgument { .. })
            ),
            "inverted box on {axis} not rejected"
        );
        let past = max.with(axis, max.get(axis) + 1);
        assert!(
            matches!(
                volume.biome_view(min, past),
                Err(VolumeError::OutOfBounds { .. })
            ),
            "box past max on {axis} not rejected"
        );
        let before = min.with(axis, min.get(axis) - 1);
        assert!(
            matches!(
                volume.biome_view(before, max),
                Err(VolumeError::OutOfBounds { .. })
            ),
            "box before min on {axis} not rejected"
        );
    }
}

/// Assert that the relative view starts at the origin and reads offset cells.
pub fn assert_relative_view_law<V: BiomeVolume>(volume: &V) {
    let rel = volume
        .relative_biome_view()
        .expect("relative view should succeed");
    assert_eq!(rel.biome_min(), Vector3i::ZERO);
    assert_eq!(rel.biome_size(), volume.biome_size());
    let offset = volume.biome_min();
    for p in rel.biome_worker().positions() {
        assert_eq!(
            rel.biome(p),
            volume.biome(p + offset),
            "relative view differs at {p}"
        );
    }
}

/// Assert that transforming by `T` then `T⁻¹` restores bounds and values,
/// for every orientation.
pub fn assert_transform_round_trip<V: BiomeVolume>(volume: &V) {
    for orientation in Orientation::all() {
        let t = DiscreteTransform3::new(orientation, Vector3i::new(7, -3, 2));
        let forward = volume
            .transformed_biome_view(&t)
            .expect("transform should succeed");
        for p in volume.biome_worker().positions() {
            assert_eq!(forward.biome(t.transform(p)), volume.biome(p));
        }
        let back = forward
            .transformed_biome_view(&t.invert())
            .expect("inverse transform should succeed");
        assert_eq!(back.biome_min(), volume.biome_min());
        assert_eq!(back.biome_max(), volume.biome_max());
        for p in volume.biome_worker().positions() {
            assert_eq!(back.biome(p), volume.biome(p), "round trip differs at {p}");
        }
    }
}

/// Assert that the unmodifiable view of the volume is a fixed point.
pub fn assert_unmodifiable_fixed_point<V: BiomeVolume>(volume: &V) {
    let ro = volume.unmodifiable_biome_view();
    assert!(ro.unmodifiable_biome_view().ptr_eq(&ro));
    assert_eq!(ro.storage_id(), volume.storage_id());
}

/// Run all compliance checks on a volume.
pub fn run_full_compliance<V: BiomeVolume>(volume: &V) {
    assert_contains_matches_read(volume);
    assert_size_matches_bounds(volume);
    assert_worker_complete(volume);
    assert_full_sub_view_is_identity(volume);
    assert_sub_view_rejections(volume);
    assert_relative_view_law(volume);
    assert_transform_round_trip(volume);
    assert_unmodifiable_fixed_point(volume);
}
