//! Strata: bounded, transformable biome volume views for voxel worlds.
//!
//! This is the top-level facade crate that re-exports the public API from
//! the Strata sub-crates. For most users, adding `strata` as a single
//! dependency is sufficient.
//!
//! # Quick start
//!
//! ```rust
//! use strata::prelude::*;
//!
//! // A 16x1x16 column of biomes, all plains (id 1).
//! let config = BiomeBufferConfig::new(Vector3i::ZERO, Vector3i::new(15, 0, 15))
//!     .default_biome(BiomeId(1));
//! let world = MutableBiomeView::allocate(&config).unwrap();
//! world.set_biome(Vector3i::new(15, 0, 0), BiomeId(9)).unwrap();
//!
//! // Hand out a read-only quarter-turned view.
//! let rotation = DiscreteTransform3::from_rotation(1, Axis::Y);
//! let turned = world
//!     .unmodifiable_biome_view()
//!     .transformed_biome_view(&rotation)
//!     .unwrap();
//! let seen_at = rotation.transform(Vector3i::new(15, 0, 0));
//! assert_eq!(turned.biome(seen_at).unwrap(), BiomeId(9));
//! ```
//!
//! # Modules
//!
//! | Module | Sub-crate | Contents |
//! |--------|-----------|----------|
//! | [`types`] | `strata-core` | Vectors, axes, biome ids, errors |
//! | [`volume`] | `strata-volume` | Storage, views, transforms, workers |

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

/// Core value types and errors (`strata-core`).
///
/// Contains [`types::Vector3i`], [`types::BiomeId`], and
/// [`types::VolumeError`].
pub use strata_core as types;

/// Biome storage, views, and transforms (`strata-volume`).
///
/// The [`volume::BiomeVolume`] trait is implemented by
/// [`volume::MutableBiomeView`] and [`volume::UnmodifiableBiomeView`].
pub use strata_volume as volume;

/// Common imports for typical Strata usage.
///
/// ```rust
/// use strata::prelude::*;
/// ```
pub mod prelude {
    // Core types
    pub use strata_core::{Axis, BiomeId, Vector3i, VolumeError};

    // Storage
    pub use strata_volume::{BiomeBuffer, BiomeBufferConfig, SharedBiomeBuffer};

    // Views
    pub use strata_volume::{
        BiomeVolume, BiomeVolumeWorker, MutableBiomeView, MutableBiomeVolume,
        UnmodifiableBiomeView,
    };

    // Transforms
    pub use strata_volume::{DiscreteTransform3, Orientation};
}
