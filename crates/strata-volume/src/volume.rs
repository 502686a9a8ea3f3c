//! The volume traits shared by every view type.

use strata_core::{BiomeId, StorageInstanceId, Vector3i, VolumeError};

use crate::transform::DiscreteTransform3;
use crate::view::{MutableBiomeView, UnmodifiableBiomeView};
use crate::worker::BiomeVolumeWorker;

/// Bounded, read-accessible biome data.
///
/// Implemented by [`MutableBiomeView`] and [`UnmodifiableBiomeView`]. All
/// derivations return [`Self::View`], so a mutable view derives mutable
/// views and an unmodifiable view can never derive a writable one.
///
/// # Consistency
///
/// A view is a lens, not a snapshot. Reads observe whatever the shared
/// storage holds at that moment; another view (or thread) may change a
/// cell between two reads. Use
/// [`immutable_biome_copy`](BiomeVolume::immutable_biome_copy) when a
/// stable picture is needed.
pub trait BiomeVolume {
    /// The type produced by sub-view and transform derivations.
    type View: BiomeVolume;

    /// Inclusive minimum corner.
    fn biome_min(&self) -> Vector3i;

    /// Inclusive maximum corner.
    fn biome_max(&self) -> Vector3i;

    /// Number of cells per axis, `max - min + 1`.
    fn biome_size(&self) -> Vector3i;

    /// `true` iff `min <= position <= max` on every axis.
    fn contains_biome(&self, position: Vector3i) -> bool {
        self.biome_min().all_le(position) && position.all_le(self.biome_max())
    }

    /// Current biome at `position`.
    ///
    /// Returns `Err(VolumeError::OutOfBounds)` exactly when
    /// [`contains_biome`](BiomeVolume::contains_biome) is `false`.
    fn biome(&self, position: Vector3i) -> Result<BiomeId, VolumeError>;

    /// A view of the box `[new_min, new_max]` sharing this volume's storage.
    ///
    /// Returns `Err(VolumeError::InvalidArgument)` if `new_min > new_max`
    /// on any axis, and `Err(VolumeError::OutOfBounds)` if the box is not
    /// fully inside this volume.
    fn biome_view(&self, new_min: Vector3i, new_max: Vector3i) -> Result<Self::View, VolumeError>;

    /// A view of this volume seen through `transform`.
    ///
    /// The new bounds are the image of the current ones; reads map back
    /// through the inverse transform. Returns
    /// `Err(VolumeError::InvalidArgument)` if the image overflows `i32`.
    fn transformed_biome_view(
        &self,
        transform: &DiscreteTransform3,
    ) -> Result<Self::View, VolumeError>;

    /// A view translated so that its minimum corner is the origin.
    fn relative_biome_view(&self) -> Result<Self::View, VolumeError> {
        let offset = self.biome_min().checked_neg().ok_or_else(|| {
            VolumeError::invalid(format!(
                "cannot translate minimum {} to the origin",
                self.biome_min()
            ))
        })?;
        self.transformed_biome_view(&DiscreteTransform3::from_translation(offset))
    }

    /// A read-only view of this volume.
    ///
    /// Calling this on an [`UnmodifiableBiomeView`] returns the same view.
    fn unmodifiable_biome_view(&self) -> UnmodifiableBiomeView;

    /// Id of the storage this volume reads from.
    ///
    /// Two volumes observe each other's writes iff their ids are equal.
    fn storage_id(&self) -> StorageInstanceId;

    /// Copy the current contents into freshly allocated storage.
    fn biome_copy(&self) -> Result<MutableBiomeView, VolumeError>;

    /// Copy the current contents into storage that nothing can write.
    fn immutable_biome_copy(&self) -> Result<UnmodifiableBiomeView, VolumeError> {
        Ok(self.biome_copy()?.into_unmodifiable())
    }

    /// A worker that scans exactly this volume's bounds.
    fn biome_worker(&self) -> BiomeVolumeWorker<'_, Self> {
        BiomeVolumeWorker::new(self)
    }
}

/// A volume whose cells can be written through this reference.
pub trait MutableBiomeVolume: BiomeVolume {
    /// Store `biome` at `position`.
    ///
    /// Takes `&self`: the storage is shared and written atomically, so a
    /// mutable reference would not grant exclusivity anyway. The write is
    /// visible through every view of the same storage.
    fn set_biome(&self, position: Vector3i, biome: BiomeId) -> Result<(), VolumeError>;
}
