//! Biome buffer configuration parameters.

use strata_core::{BiomeId, Vector3i, VolumeError};

/// Configuration for a [`BiomeBuffer`](crate::BiomeBuffer).
///
/// Describes the inclusive bounds of the storage, the biome every cell
/// starts with, and an allocation cap. Validated when the buffer is
/// allocated; the buffer's bounds are immutable afterwards.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BiomeBufferConfig {
    /// Inclusive minimum corner.
    pub min: Vector3i,

    /// Inclusive maximum corner. Must be `>= min` on every axis.
    pub max: Vector3i,

    /// Initial value of every cell.
    ///
    /// Default: [`BiomeId(0)`](BiomeId).
    pub default_biome: BiomeId,

    /// Upper limit on the number of cells.
    ///
    /// Default: 67_108_864 (128MB at 2 bytes per cell). Guards against a
    /// mistyped corner turning into a multi-gigabyte allocation.
    pub max_cells: usize,
}

impl BiomeBufferConfig {
    /// Default size: one 16x16 chunk column, one biome layer high.
    pub const DEFAULT_SIZE: Vector3i = Vector3i::new(16, 1, 16);

    /// Default initial biome.
    pub const DEFAULT_BIOME: BiomeId = BiomeId(0);

    /// Default cell cap.
    pub const DEFAULT_MAX_CELLS: usize = 1 << 26;

    /// Create a config for the inclusive box `[min, max]`.
    ///
    /// Uses default values for all other parameters.
    pub fn new(min: Vector3i, max: Vector3i) -> Self {
        Self {
            min,
            max,
            default_biome: Self::DEFAULT_BIOME,
            max_cells: Self::DEFAULT_MAX_CELLS,
        }
    }

    /// Create a config for a box of `size` cells starting at `min`.
    ///
    /// Returns `Err(VolumeError::InvalidArgument)` if any size component
    /// is below 1 or the maximum corner overflows.
    pub fn with_size(min: Vector3i, size: Vector3i) -> Result<Self, VolumeError> {
        if !Vector3i::ONE.all_le(size) {
            return Err(VolumeError::invalid(format!(
                "buffer size must be at least 1 on every axis, got {size}"
            )));
        }
        let max = (size - Vector3i::ONE)
            .checked_add(min)
            .ok_or_else(|| VolumeError::invalid(format!("buffer at {min} of size {size} overflows")))?;
        Ok(Self::new(min, max))
    }

    /// Set the initial biome.
    pub fn default_biome(mut self, biome: BiomeId) -> Self {
        self.default_biome = biome;
        self
    }

    /// Set the cell cap.
    pub fn max_cells(mut self, max_cells: usize) -> Self {
        self.max_cells = max_cells;
        self
    }

    /// Size of the configured box, `None` if it is inverted or a side
    /// does not fit in `i32`.
    pub fn size(&self) -> Option<Vector3i> {
        let axis = |lo: i32, hi: i32| {
            let len = i64::from(hi) - i64::from(lo) + 1;
            if len < 1 {
                None
            } else {
                i32::try_from(len).ok()
            }
        };
        Some(Vector3i::new(
            axis(self.min.x, self.max.x)?,
            axis(self.min.y, self.max.y)?,
            axis(self.min.z, self.max.z)?,
        ))
    }

    /// Validate the config and return the number of cells it describes.
    pub fn validate(&self) -> Result<usize, VolumeError> {
        if !self.min.all_le(self.max) {
            return Err(VolumeError::invalid(format!(
                "buffer min {} exceeds max {} on some axis",
                self.min, self.max
            )));
        }
        let size = self.size().ok_or_else(|| {
            VolumeError::invalid(format!(
                "buffer bounds {}..={} are too wide",
                self.min, self.max
            ))
        })?;
        let cells = size
            .cell_count()
            .filter(|&n| n <= self.max_cells)
            .ok_or_else(|| {
                VolumeError::invalid(format!(
                    "buffer of size {size} exceeds the cap of {} cells",
                    self.max_cells
                ))
            })?;
        Ok(cells)
    }
}

impl Default for BiomeBufferConfig {
    fn default() -> Self {
        Self::new(Vector3i::ZERO, Self::DEFAULT_SIZE - Vector3i::ONE)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_one_chunk_column() {
        let config = BiomeBufferConfig::default();
        assert_eq!(config.size(), Some(Vector3i::new(16, 1, 16)));
        assert_eq!(config.validate(), Ok(256));
    }

    #[test]
    fn with_size_computes_inclusive_max() {
        let config =
            BiomeBufferConfig::with_size(Vector3i::new(-4, 0, 8), Vector3i::new(4, 2, 1)).unwrap();
        assert_eq!(config.max, Vector3i::new(-1, 1, 8));
    }

    #[test]
    fn with_size_rejects_empty_and_overflowing_boxes() {
        assert!(BiomeBufferConfig::with_size(Vector3i::ZERO, Vector3i::new(0, 1, 1)).is_err());
        assert!(
            BiomeBufferConfig::with_size(Vector3i::new(i32::MAX, 0, 0), Vector3i::new(2, 1, 1))
                .is_err()
        );
    }

    #[test]
    fn validate_rejects_inverted_bounds() {
        let config = BiomeBufferConfig::new(Vector3i::new(1, 0, 0), Vector3i::ZERO);
        assert!(matches!(
            config.validate(),
            Err(VolumeError::InvalidArgument { .. })
        ));
    }

    #[test]
    fn validate_enforces_cell_cap() {
        let config = BiomeBufferConfig::new(Vector3i::ZERO, Vector3i::new(9, 9, 9)).max_cells(999);
        assert!(config.validate().is_err());
        assert_eq!(config.max_cells(1000).validate(), Ok(1000));
    }

    #[test]
    fn validate_rejects_full_range_axis() {
        let config =
            BiomeBufferConfig::new(Vector3i::new(i32::MIN, 0, 0), Vector3i::new(i32::MAX, 0, 0));
        assert_eq!(config.size(), None);
        assert!(config.validate().is_err());
    }
}
