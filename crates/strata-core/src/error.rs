//! Error types for volume access and view construction.
//!
//! Every failure is a deterministic function of the inputs: there is no
//! I/O in this layer, so nothing is transient and nothing is retried.

use thiserror::Error;

use crate::vector::Vector3i;

/// Errors from volume reads, writes, and view derivation.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum VolumeError {
    /// A coordinate, or a corner of a requested box, lies outside the
    /// volume's inclusive bounds.
    #[error("position {position} out of bounds {min}..={max}")]
    OutOfBounds {
        /// The offending coordinate.
        position: Vector3i,
        /// Inclusive minimum of the volume that rejected it.
        min: Vector3i,
        /// Inclusive maximum of the volume that rejected it.
        max: Vector3i,
    },
    /// A structurally invalid argument: an inverted box, a degenerate
    /// transform, mismatched worker sizes, or an invalid buffer config.
    #[error("invalid argument: {reason}")]
    InvalidArgument {
        /// What went wrong.
        reason: String,
    },
}

impl VolumeError {
    /// Shorthand for [`VolumeError::InvalidArgument`].
    pub fn invalid(reason: impl Into<String>) -> Self {
        Self::InvalidArgument {
            reason: reason.into(),
        }
    }

    /// Check that `position` lies in `[min, max]`, returning
    /// [`VolumeError::OutOfBounds`] if it does not.
    pub fn check_bounds(position: Vector3i, min: Vector3i, max: Vector3i) -> Result<(), Self> {
        if min.all_le(position) && position.all_le(max) {
            Ok(())
        } else {
            Err(Self::OutOfBounds { position, min, max })
        }
    }
}
