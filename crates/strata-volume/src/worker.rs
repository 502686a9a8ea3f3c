//! Bulk scans over a volume.
//!
//! A [`BiomeVolumeWorker`] is bound to one volume and visits every
//! coordinate of its bounds exactly once. Operations that write into
//! another volume ([`map`](BiomeVolumeWorker::map),
//! [`merge`](BiomeVolumeWorker::merge)) align the volumes by their minimum
//! corners, so a source cell at `p` lands at `dst.min + (p - src.min)`.

use std::iter::FusedIterator;

use strata_core::{BiomeId, Vector3i, VolumeError};

use crate::volume::{BiomeVolume, MutableBiomeVolume};

/// Every position of an inclusive box, x fastest, then z, then y.
#[derive(Clone, Debug)]
pub struct BoxPositions {
    min: Vector3i,
    max: Vector3i,
    next: Option<Vector3i>,
    remaining: usize,
}

impl BoxPositions {
    /// Iterate the box `[min, max]`. An inverted box yields nothing.
    pub fn new(min: Vector3i, max: Vector3i) -> Self {
        let remaining = if min.all_le(max) {
            let side = |lo: i32, hi: i32| (i64::from(hi) - i64::from(lo) + 1) as usize;
            side(min.x, max.x)
                .saturating_mul(side(min.y, max.y))
                .saturating_mul(side(min.z, max.z))
        } else {
            0
        };
        Self {
            min,
            max,
            next: (remaining > 0).then_some(min),
            remaining,
        }
    }
}

impl Iterator for BoxPositions {
    type Item = Vector3i;

    fn next(&mut self) -> Option<Vector3i> {
        let current = self.next?;
        self.remaining -= 1;
        self.next = if current.x < self.max.x {
            Some(Vector3i::new(current.x + 1, current.y, current.z))
        } else if current.z < self.max.z {
            Some(Vector3i::new(self.min.x, current.y, current.z + 1))
        } else if current.y < self.max.y {
            Some(Vector3i::new(self.min.x, current.y + 1, self.min.z))
        } else {
            None
        };
        Some(current)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl ExactSizeIterator for BoxPositions {}

impl FusedIterator for BoxPositions {}

/// Scans a single volume.
///
/// Obtained from [`BiomeVolume::biome_worker`]. The worker borrows its
/// volume and holds no other state, so it is as cheap to create as a
/// reference.
#[derive(Debug)]
pub struct BiomeVolumeWorker<'a, V: ?Sized> {
    volume: &'a V,
}

impl<V: ?Sized> Clone for BiomeVolumeWorker<'_, V> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<V: ?Sized> Copy for BiomeVolumeWorker<'_, V> {}

impl<'a, V: BiomeVolume + ?Sized> BiomeVolumeWorker<'a, V> {
    /// Bind a worker to `volume`.
    pub fn new(volume: &'a V) -> Self {
        Self { volume }
    }

    /// The volume this worker scans.
    pub fn volume(&self) -> &'a V {
        self.volume
    }

    /// Every position of the volume, each exactly once.
    pub fn positions(&self) -> BoxPositions {
        BoxPositions::new(self.volume.biome_min(), self.volume.biome_max())
    }

    /// Call `visitor` once per position.
    pub fn iterate<F>(&self, mut visitor: F)
    where
        F: FnMut(&V, Vector3i),
    {
        for position in self.positions() {
            visitor(self.volume, position);
        }
    }

    /// Fold `reducer` over every position, starting from `identity`.
    pub fn reduce<T, F>(&self, mut reducer: F, identity: T) -> T
    where
        F: FnMut(&V, Vector3i, T) -> T,
    {
        self.positions()
            .fold(identity, |acc, position| reducer(self.volume, position, acc))
    }

    /// Write `mapper(volume, p)` into `destination` for every position `p`.
    ///
    /// Returns `Err(VolumeError::InvalidArgument)` before writing anything
    /// if `destination` is smaller than this volume on any axis. The
    /// destination may share storage with the source; cells are written in
    /// scan order.
    pub fn map<D, F>(&self, mut mapper: F, destination: &D) -> Result<(), VolumeError>
    where
        D: MutableBiomeVolume + ?Sized,
        F: FnMut(&V, Vector3i) -> Result<BiomeId, VolumeError>,
    {
        self.check_fits("destination", destination.biome_size())?;
        let src_min = self.volume.biome_min();
        let dst_min = destination.biome_min();
        for position in self.positions() {
            let biome = mapper(self.volume, position)?;
            destination.set_biome(position - src_min + dst_min, biome)?;
        }
        Ok(())
    }

    /// Combine this volume with `second` cell by cell into `destination`.
    ///
    /// `merger` receives both volumes with their aligned positions. Both
    /// `second` and `destination` must be at least as large as this volume
    /// on every axis.
    pub fn merge<S, D, F>(&self, second: &S, mut merger: F, destination: &D) -> Result<(), VolumeError>
    where
        S: BiomeVolume + ?Sized,
        D: MutableBiomeVolume + ?Sized,
        F: FnMut(&V, Vector3i, &S, Vector3i) -> Result<BiomeId, VolumeError>,
    {
        self.check_fits("second volume", second.biome_size())?;
        self.check_fits("destination", destination.biome_size())?;
        let src_min = self.volume.biome_min();
        let second_min = second.biome_min();
        let dst_min = destination.biome_min();
        for position in self.positions() {
            let offset = position - src_min;
            let biome = merger(self.volume, position, second, offset + second_min)?;
            destination.set_biome(offset + dst_min, biome)?;
        }
        Ok(())
    }

    fn check_fits(&self, what: &str, size: Vector3i) -> Result<(), VolumeError> {
        let needed = self.volume.biome_size();
        if needed.all_le(size) {
            Ok(())
        } else {
            Err(VolumeError::invalid(format!(
                "{what} of size {size} is smaller than the source size {needed}"
            )))
        }
    }
}

impl<V: MutableBiomeVolume + ?Sized> BiomeVolumeWorker<'_, V> {
    /// Write `filler(p)` into every position `p`.
    pub fn fill<F>(&self, mut filler: F) -> Result<(), VolumeError>
    where
        F: FnMut(Vector3i) -> BiomeId,
    {
        for position in self.positions() {
            self.volume.set_biome(position, filler(position))?;
        }
        Ok(())
    }
}
