//! Shared backing storage for biome volumes.
//!
//! [`BiomeBuffer`] is the one place cell values live. It is allocated by
//! the world-storage owner, wrapped in an `Arc`, and every view derived
//! from it holds a clone of that `Arc`. Cells are `AtomicU16`, so reads
//! and writes from any number of threads are lock-free and never torn,
//! but a multi-cell scan racing a writer may observe a mix of old and new
//! values.

use std::sync::atomic::{AtomicU16, Ordering};
use std::sync::Arc;

use log::debug;
use strata_core::{BiomeId, StorageInstanceId, Vector3i, VolumeError};

use crate::config::BiomeBufferConfig;

/// Fixed-bounds, contiguous biome storage.
///
/// Cells are laid out with x varying fastest, then z, then y, matching the
/// worker scan order.
pub struct BiomeBuffer {
    id: StorageInstanceId,
    min: Vector3i,
    max: Vector3i,
    size: Vector3i,
    cells: Box<[AtomicU16]>,
}

/// Shared handle to a [`BiomeBuffer`].
pub type SharedBiomeBuffer = Arc<BiomeBuffer>;

// Compile-time assertion: storage is shared across threads.
const _: fn() = || {
    fn assert<T: Send + Sync>() {}
    assert::<BiomeBuffer>();
};

impl BiomeBuffer {
    /// Allocate a buffer with every cell set to `config.default_biome`.
    pub fn new(config: &BiomeBufferConfig) -> Result<Self, VolumeError> {
        let len = config.validate()?;
        let size = config
            .size()
            .ok_or_else(|| VolumeError::invalid("buffer bounds are too wide"))?;
        let initial = config.default_biome.0;
        let cells: Box<[AtomicU16]> = (0..len).map(|_| AtomicU16::new(initial)).collect();
        let id = StorageInstanceId::next();
        debug!(
            "allocated biome buffer {id}: {}..={} ({len} cells)",
            config.min, config.max
        );
        Ok(Self {
            id,
            min: config.min,
            max: config.max,
            size,
            cells,
        })
    }

    /// Unique id of this buffer.
    pub fn id(&self) -> StorageInstanceId {
        self.id
    }

    /// Inclusive minimum corner.
    pub fn min(&self) -> Vector3i {
        self.min
    }

    /// Inclusive maximum corner.
    pub fn max(&self) -> Vector3i {
        self.max
    }

    /// Number of cells per axis.
    pub fn size(&self) -> Vector3i {
        self.size
    }

    /// Total number of cells.
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    /// Always `false`: a buffer holds at least one cell.
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// `true` if `position` addresses a cell of this buffer.
    pub fn contains(&self, position: Vector3i) -> bool {
        self.min.all_le(position) && position.all_le(self.max)
    }

    /// Flat index of `position`.
    fn index(&self, position: Vector3i) -> Result<usize, VolumeError> {
        VolumeError::check_bounds(position, self.min, self.max)?;
        // In bounds, so every offset is in 0..size and fits usize.
        let offset = |p: i32, lo: i32| (i64::from(p) - i64::from(lo)) as usize;
        let x = offset(position.x, self.min.x);
        let y = offset(position.y, self.min.y);
        let z = offset(position.z, self.min.z);
        let sx = self.size.x as usize;
        let sz = self.size.z as usize;
        Ok((y * sz + z) * sx + x)
    }

    /// Read the cell at `position`.
    pub fn get(&self, position: Vector3i) -> Result<BiomeId, VolumeError> {
        let index = self.index(position)?;
        Ok(BiomeId(self.cells[index].load(Ordering::Relaxed)))
    }

    /// Write the cell at `position`.
    ///
    /// Crate-private: writes go through
    /// [`MutableBiomeView`](crate::MutableBiomeView) so that holders of an
    /// unmodifiable view cannot reach them.
    pub(crate) fn set(&self, position: Vector3i, biome: BiomeId) -> Result<(), VolumeError> {
        let index = self.index(position)?;
        self.cells[index].store(biome.0, Ordering::Relaxed);
        Ok(())
    }
}

impl std::fmt::Debug for BiomeBuffer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BiomeBuffer")
            .field("id", &self.id)
            .field("min", &self.min)
            .field("max", &self.max)
            .finish_non_exhaustive()
    }
}
