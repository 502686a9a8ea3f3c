//! Core types for the Strata volume framework.
//!
//! This is the leaf crate with zero internal dependencies. It defines
//! the fundamental vocabulary shared by every other crate in the
//! workspace: integer coordinates and axes, biome identifiers, storage
//! instance identifiers, and the [`VolumeError`] type.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod error;
pub mod id;
pub mod vector;

pub use error::VolumeError;
pub use id::{BiomeId, StorageInstanceId};
pub use vector::{Axis, Vector3i};
