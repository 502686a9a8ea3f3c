//! Bounded, transformable views over shared biome storage.
//!
//! This crate defines the [`BiomeVolume`] trait, the central read
//! abstraction for biome data, along with the storage buffer it reads
//! from and the two view types that implement it.
//!
//! # Views
//!
//! - [`MutableBiomeView`]: reads and writes; held by the storage owner.
//! - [`UnmodifiableBiomeView`]: reads only; safe to hand to untrusted code.
//!
//! Every derivation (sub-box, [`DiscreteTransform3`], relative origin,
//! unmodifiable wrapper) shares the underlying [`BiomeBuffer`] and copies
//! no cells. Views are lenses, not snapshots: see
//! [`BiomeVolume::immutable_biome_copy`] for a stable copy.
//!
//! # Workers
//!
//! [`BiomeVolumeWorker`] scans a view's bounds, visiting each position
//! exactly once, and supports map, merge, reduce, and fill.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod config;
pub mod storage;
pub mod transform;
pub mod view;
pub mod volume;
pub mod worker;

#[cfg(test)]
pub(crate) mod compliance;

pub use config::BiomeBufferConfig;
pub use storage::{BiomeBuffer, SharedBiomeBuffer};
pub use transform::{DiscreteTransform3, Orientation};
pub use view::{MutableBiomeView, UnmodifiableBiomeView};
pub use volume::{BiomeVolume, MutableBiomeVolume};
pub use worker::{BiomeVolumeWorker, BoxPositions};
