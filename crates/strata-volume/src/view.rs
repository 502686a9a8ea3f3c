//! Mutable and unmodifiable views over shared biome storage.
//!
//! Both view types wrap the same immutable [`ViewCore`]: a storage handle,
//! inclusive bounds, and the transform from view coordinates to storage
//! coordinates. Deriving a view builds a new core and never touches cell
//! data. The capability to write is carried by the wrapper type alone.

use std::sync::Arc;

use log::{debug, trace};
use strata_core::{BiomeId, StorageInstanceId, Vector3i, VolumeError};

use crate::config::BiomeBufferConfig;
use crate::storage::{BiomeBuffer, SharedBiomeBuffer};
use crate::transform::DiscreteTransform3;
use crate::volume::{BiomeVolume, MutableBiomeVolume};
use crate::worker::BoxPositions;

/// Bounds plus coordinate mapping into a shared buffer.
#[derive(Clone, Debug)]
struct ViewCore {
    buffer: SharedBiomeBuffer,
    min: Vector3i,
    max: Vector3i,
    /// Maps a view coordinate to the storage coordinate it reads.
    to_storage: DiscreteTransform3,
}

impl ViewCore {
    fn root(buffer: SharedBiomeBuffer) -> Self {
        Self {
            min: buffer.min(),
            max: buffer.max(),
            buffer,
            to_storage: DiscreteTransform3::IDENTITY,
        }
    }

    fn size(&self) -> Vector3i {
        // Bounds are a transformed sub-box of a validated buffer, so every
        // side fits in i32.
        self.max - self.min + Vector3i::ONE
    }

    fn get(&self, position: Vector3i) -> Result<BiomeId, VolumeError> {
        VolumeError::check_bounds(position, self.min, self.max)?;
        self.buffer.get(self.to_storage.transform(position))
    }

    fn set(&self, position: Vector3i, biome: BiomeId) -> Result<(), VolumeError> {
        VolumeError::check_bounds(position, self.min, self.max)?;
        self.buffer.set(self.to_storage.transform(position), biome)
    }

    fn sub_view(&self, new_min: Vector3i, new_max: Vector3i) -> Result<Self, VolumeError> {
        if !new_min.all_le(new_max) {
            return Err(VolumeError::invalid(format!(
                "view min {new_min} exceeds max {new_max} on some axis"
            )));
        }
        VolumeError::check_bounds(new_min, self.min, self.max)?;
        VolumeError::check_bounds(new_max, self.min, self.max)?;
        trace!(
            "sub-view {new_min}..={new_max} of storage {}",
            self.buffer.id()
        );
        Ok(Self {
            buffer: Arc::clone(&self.buffer),
            min: new_min,
            max: new_max,
            to_storage: self.to_storage,
        })
    }

    fn transformed(&self, transform: &DiscreteTransform3) -> Result<Self, VolumeError> {
        let (min, max) = transform.transform_box(self.min, self.max).ok_or_else(|| {
            VolumeError::invalid(format!(
                "transform {transform} moves bounds {}..={} outside the i32 range",
                self.min, self.max
            ))
        })?;
        trace!(
            "transformed view {min}..={max} of storage {}",
            self.buffer.id()
        );
        Ok(Self {
            buffer: Arc::clone(&self.buffer),
            min,
            max,
            to_storage: transform.invert().then(&self.to_storage),
        })
    }

    fn copy(&self) -> Result<Self, VolumeError> {
        let config = BiomeBufferConfig::new(self.min, self.max).max_cells(usize::MAX);
        let buffer = BiomeBuffer::new(&config)?;
        for position in BoxPositions::new(self.min, self.max) {
            buffer.set(position, self.get(position)?)?;
        }
        debug!(
            "copied {}..={} of storage {} into storage {}",
            self.min,
            self.max,
            self.buffer.id(),
            buffer.id()
        );
        Ok(Self::root(Arc::new(buffer)))
    }
}

/// A view that can read and write its cells.
///
/// Cloning is cheap (one `Arc` bump) and the clone shares storage.
///
/// # Examples
///
/// ```
/// use strata_core::{BiomeId, Vector3i};
/// use strata_volume::{BiomeBufferConfig, BiomeVolume, MutableBiomeView, MutableBiomeVolume};
///
/// let config = BiomeBufferConfig::new(Vector3i::new(-8, 0, -8), Vector3i::new(7, 0, 7));
/// let world = MutableBiomeView::allocate(&config).unwrap();
/// world.set_biome(Vector3i::new(2, 0, 3), BiomeId(4)).unwrap();
///
/// let area = world.biome_view(Vector3i::ZERO, Vector3i::new(7, 0, 7)).unwrap();
/// let local = area.relative_biome_view().unwrap();
/// assert_eq!(local.biome_min(), Vector3i::ZERO);
/// assert_eq!(local.biome(Vector3i::new(2, 0, 3)), Ok(BiomeId(4)));
/// ```
#[derive(Clone, Debug)]
pub struct MutableBiomeView {
    core: ViewCore,
}

impl MutableBiomeView {
    /// A view covering the whole of `buffer`.
    pub fn new(buffer: SharedBiomeBuffer) -> Self {
        Self {
            core: ViewCore::root(buffer),
        }
    }

    /// Allocate a fresh buffer and return a view over all of it.
    pub fn allocate(config: &BiomeBufferConfig) -> Result<Self, VolumeError> {
        Ok(Self::new(Arc::new(BiomeBuffer::new(config)?)))
    }

    /// Give up write access.
    pub fn into_unmodifiable(self) -> UnmodifiableBiomeView {
        UnmodifiableBiomeView {
            core: Arc::new(self.core),
        }
    }
}

impl BiomeVolume for MutableBiomeView {
    type View = MutableBiomeView;

    fn biome_min(&self) -> Vector3i {
        self.core.min
    }

    fn biome_max(&self) -> Vector3i {
        self.core.max
    }

    fn biome_size(&self) -> Vector3i {
        self.core.size()
    }

    fn biome(&self, position: Vector3i) -> Result<BiomeId, VolumeError> {
        self.core.get(position)
    }

    fn biome_view(&self, new_min: Vector3i, new_max: Vector3i) -> Result<Self, VolumeError> {
        Ok(Self {
            core: self.core.sub_view(new_min, new_max)?,
        })
    }

    fn transformed_biome_view(&self, transform: &DiscreteTransform3) -> Result<Self, VolumeError> {
        Ok(Self {
            core: self.core.transformed(transform)?,
        })
    }

    fn unmodifiable_biome_view(&self) -> UnmodifiableBiomeView {
        self.clone().into_unmodifiable()
    }

    fn storage_id(&self) -> StorageInstanceId {
        self.core.buffer.id()
    }

    fn biome_copy(&self) -> Result<MutableBiomeView, VolumeError> {
        Ok(Self {
            core: self.core.copy()?,
        })
    }
}

impl MutableBiomeVolume for MutableBiomeView {
    fn set_biome(&self, position: Vector3i, biome: BiomeId) -> Result<(), VolumeError> {
        self.core.set(position, biome)
    }
}

/// A view that can read but never write its cells.
///
/// The storage behind it may still change through a [`MutableBiomeView`]
/// held elsewhere. Clones share one allocation, and
/// [`unmodifiable_biome_view`](BiomeVolume::unmodifiable_biome_view)
/// returns such a clone rather than wrapping again, so
/// [`ptr_eq`](Self::ptr_eq) identifies the two as the same view.
#[derive(Clone, Debug)]
pub struct UnmodifiableBiomeView {
    core: Arc<ViewCore>,
}

impl UnmodifiableBiomeView {
    /// `true` if both handles refer to the same view.
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.core, &other.core)
    }
}

impl From<MutableBiomeView> for UnmodifiableBiomeView {
    fn from(view: MutableBiomeView) -> Self {
        view.into_unmodifiable()
    }
}

impl BiomeVolume for UnmodifiableBiomeView {
    type View = UnmodifiableBiomeView;

    fn biome_min(&self) -> Vector3i {
        self.core.min
    }

    fn biome_max(&self) -> Vector3i {
        self.core.max
    }

    fn biome_size(&self) -> Vector3i {
        self.core.size()
    }

    fn biome(&self, position: Vector3i) -> Result<BiomeId, VolumeError> {
        self.core.get(position)
    }

    fn biome_view(&self, new_min: Vector3i, new_max: Vector3i) -> Result<Self, VolumeError> {
        Ok(Self {
            core: Arc::new(self.core.sub_view(new_min, new_max)?),
        })
    }

    fn transformed_biome_view(&self, transform: &DiscreteTransform3) -> Result<Self, VolumeError> {
        Ok(Self {
            core: Arc::new(self.core.transformed(transform)?),
        })
    }

    fn unmodifiable_biome_view(&self) -> UnmodifiableBiomeView {
        self.clone()
    }

    fn storage_id(&self) -> StorageInstanceId {
        self.core.buffer.id()
    }

    fn biome_copy(&self) -> Result<MutableBiomeView, VolumeError> {
        Ok(MutableBiomeView {
            core: self.core.copy()?,
        })
    }
}

// Compile-time assertion: views can be handed to other threads.
const _: fn() = || {
    fn assert<T: Send + Sync>() {}
    assert::<MutableBiomeView>();
    assert::<UnmodifiableBiomeView>();
};
