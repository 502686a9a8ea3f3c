//! Discrete, always-invertible lattice transforms.
//!
//! An [`Orientation`] is one of the 48 axis-aligned rotations and
//! reflections of the integer lattice (the full octahedral group). A
//! [`DiscreteTransform3`] pairs an orientation with an integer translation.
//! Both are closed under composition and inversion, so a transformed view
//! can always map its coordinates back into storage.
//!
//! Transform arithmetic wraps in two's complement. The group laws hold
//! exactly under wrapping, and any result that fits in `i32` is the true
//! result; callers that need overflow detection use
//! [`DiscreteTransform3::checked_transform`].

use std::fmt;

use strata_core::{Axis, Vector3i, VolumeError};

/// An axis-aligned rotation and/or reflection of the lattice.
///
/// Output component `i` is `±input[source[i]]`. The matrix form is a
/// signed permutation matrix: exactly one `±1` per row and column.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Orientation {
    source: [Axis; 3],
    negate: [bool; 3],
}

impl Orientation {
    /// The orientation that leaves every coordinate unchanged.
    pub const IDENTITY: Self = Self {
        source: [Axis::X, Axis::Y, Axis::Z],
        negate: [false; 3],
    };

    /// Number of distinct orientations.
    pub const COUNT: usize = 48;

    /// Build an orientation from a 3x3 matrix.
    ///
    /// Returns `Err(VolumeError::InvalidArgument)` unless the matrix is a
    /// signed permutation matrix, i.e. maps the lattice onto itself
    /// invertibly.
    pub fn from_matrix(matrix: [[i32; 3]; 3]) -> Result<Self, VolumeError> {
        let mut source = [Axis::X; 3];
        let mut negate = [false; 3];
        let mut used = [false; 3];
        for (row_index, row) in matrix.iter().enumerate() {
            let mut found = None;
            for (col, &entry) in row.iter().enumerate() {
                match entry {
                    0 => {}
                    1 | -1 if found.is_none() => found = Some((col, entry < 0)),
                    _ => {
                        return Err(VolumeError::invalid(format!(
                            "matrix row {row_index} is not a signed unit row: {row:?}"
                        )))
                    }
                }
            }
            let (col, neg) = found.ok_or_else(|| {
                VolumeError::invalid(format!("matrix row {row_index} is zero"))
            })?;
            if used[col] {
                return Err(VolumeError::invalid(format!(
                    "matrix column {col} is used by more than one row"
                )));
            }
            used[col] = true;
            // `col` is 0..3 here, so the lookup cannot fail.
            source[row_index] = Axis::ALL[col];
            negate[row_index] = neg;
        }
        Ok(Self { source, negate })
    }

    /// Rotation by `quarter_turns` right-handed quarter turns about `axis`.
    ///
    /// Negative counts rotate the other way; counts are taken modulo 4.
    pub fn rotation(quarter_turns: i32, axis: Axis) -> Self {
        let step = match axis {
            // y' = -z, z' = y
            Axis::X => Self {
                source: [Axis::X, Axis::Z, Axis::Y],
                negate: [false, true, false],
            },
            // z' = -x, x' = z
            Axis::Y => Self {
                source: [Axis::Z, Axis::Y, Axis::X],
                negate: [false, false, true],
            },
            // x' = -y, y' = x
            Axis::Z => Self {
                source: [Axis::Y, Axis::X, Axis::Z],
                negate: [true, false, false],
            },
        };
        let mut out = Self::IDENTITY;
        for _ in 0..quarter_turns.rem_euclid(4) {
            out = out.then(&step);
        }
        out
    }

    /// Reflection that negates `axis`.
    pub fn mirror(axis: Axis) -> Self {
        let mut negate = [false; 3];
        negate[axis.index()] = true;
        Self {
            negate,
            ..Self::IDENTITY
        }
    }

    /// Apply `self`, then `next`.
    pub fn then(&self, next: &Self) -> Self {
        let mut source = [Axis::X; 3];
        let mut negate = [false; 3];
        for i in 0..3 {
            let via = next.source[i].index();
            source[i] = self.source[via];
            negate[i] = next.negate[i] ^ self.negate[via];
        }
        Self { source, negate }
    }

    /// The orientation that undoes `self`.
    pub fn inverse(&self) -> Self {
        let mut source = [Axis::X; 3];
        let mut negate = [false; 3];
        for (i, axis) in Axis::ALL.iter().enumerate() {
            let target = self.source[i].index();
            source[target] = *axis;
            negate[target] = self.negate[i];
        }
        Self { source, negate }
    }

    /// Apply the orientation to a vector, wrapping on `i32::MIN` negation.
    pub fn apply(&self, v: Vector3i) -> Vector3i {
        let input = v.to_array();
        let mut out = [0i32; 3];
        for (i, slot) in out.iter_mut().enumerate() {
            let value = input[self.source[i].index()];
            *slot = if self.negate[i] {
                value.wrapping_neg()
            } else {
                value
            };
        }
        Vector3i::from(out)
    }

    /// Apply the orientation, returning `None` if a negation overflows.
    pub fn checked_apply(&self, v: Vector3i) -> Option<Vector3i> {
        let input = v.to_array();
        let mut out = [0i32; 3];
        for (i, slot) in out.iter_mut().enumerate() {
            let value = input[self.source[i].index()];
            *slot = if self.negate[i] {
                value.checked_neg()?
            } else {
                value
            };
        }
        Some(Vector3i::from(out))
    }

    /// Signed permutation matrix for this orientation.
    pub fn matrix(&self) -> [[i32; 3]; 3] {
        let mut m = [[0i32; 3]; 3];
        for (i, row) in m.iter_mut().enumerate() {
            row[self.source[i].index()] = if self.negate[i] { -1 } else { 1 };
        }
        m
    }

    /// `true` for rotations (determinant `+1`), `false` for reflections.
    pub fn is_proper(&self) -> bool {
        let [a, b, c] = self.source.map(Axis::index);
        // Count inversions of the permutation.
        let inversions = usize::from(a > b) + usize::from(a > c) + usize::from(b > c);
        let flips = self.negate.iter().filter(|&&n| n).count();
        (inversions + flips) % 2 == 0
    }

    /// All 48 orientations, identity first.
    pub fn all() -> impl Iterator<Item = Orientation> {
        const PERMUTATIONS: [[Axis; 3]; 6] = [
            [Axis::X, Axis::Y, Axis::Z],
            [Axis::X, Axis::Z, Axis::Y],
            [Axis::Y, Axis::X, Axis::Z],
            [Axis::Y, Axis::Z, Axis::X],
            [Axis::Z, Axis::X, Axis::Y],
            [Axis::Z, Axis::Y, Axis::X],
        ];
        PERMUTATIONS.into_iter().flat_map(|source| {
            (0u8..8).map(move |bits| Orientation {
                source,
                negate: [bits & 1 != 0, bits & 2 != 0, bits & 4 != 0],
            })
        })
    }
}

impl Default for Orientation {
    fn default() -> Self {
        Self::IDENTITY
    }
}

/// An invertible lattice transform: orientation followed by translation.
///
/// `transform(v) = orientation.apply(v) + translation`.
///
/// # Examples
///
/// ```
/// use strata_core::{Axis, Vector3i};
/// use strata_volume::DiscreteTransform3;
///
/// let t = DiscreteTransform3::from_rotation(1, Axis::Y)
///     .with_translation(Vector3i::new(10, 0, 0));
/// let p = Vector3i::new(1, 2, 3);
/// assert_eq!(t.transform(p), Vector3i::new(13, 2, -1));
/// assert_eq!(t.invert().transform(t.transform(p)), p);
/// ```
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct DiscreteTransform3 {
    orientation: Orientation,
    translation: Vector3i,
}

impl DiscreteTransform3 {
    /// The transform that leaves every coordinate unchanged.
    pub const IDENTITY: Self = Self {
        orientation: Orientation::IDENTITY,
        translation: Vector3i::ZERO,
    };

    /// Combine an orientation with a translation applied after it.
    pub const fn new(orientation: Orientation, translation: Vector3i) -> Self {
        Self {
            orientation,
            translation,
        }
    }

    /// Pure translation by `offset`.
    pub const fn from_translation(offset: Vector3i) -> Self {
        Self::new(Orientation::IDENTITY, offset)
    }

    /// Rotation about `axis` through the origin.
    pub fn from_rotation(quarter_turns: i32, axis: Axis) -> Self {
        Self::new(Orientation::rotation(quarter_turns, axis), Vector3i::ZERO)
    }

    /// Rotation about `axis` through the cell at `point`.
    ///
    /// With `block_corner == false` the pivot is the centre of the cell at
    /// `point`, which therefore stays fixed. With `block_corner == true` the
    /// pivot is the minimum corner of that cell, so the cells around the
    /// corner swap places.
    pub fn from_rotation_about(
        quarter_turns: i32,
        axis: Axis,
        point: Vector3i,
        block_corner: bool,
    ) -> Self {
        let orientation = Orientation::rotation(quarter_turns, axis);
        let mut translation = point.wrapping_add(orientation.apply(point).wrapping_neg());
        if block_corner {
            // Cell centres sit at +0.5; (R*1 - 1)/2 is 0 or -1 per axis.
            let ones = orientation.apply(Vector3i::ONE);
            let shift = Vector3i::new((ones.x - 1) / 2, (ones.y - 1) / 2, (ones.z - 1) / 2);
            translation = translation.wrapping_add(shift);
        }
        Self::new(orientation, translation)
    }

    /// Rotation that maps the box `[0, size - 1]` onto itself.
    ///
    /// Returns `Err(VolumeError::InvalidArgument)` if `size` has a
    /// component below 1, or if the rotated box would not land on the
    /// cell grid (a quarter turn over a plane whose sides differ in parity).
    pub fn rotation_around_center(
        quarter_turns: i32,
        axis: Axis,
        size: Vector3i,
    ) -> Result<Self, VolumeError> {
        if !Vector3i::ONE.all_le(size) {
            return Err(VolumeError::invalid(format!(
                "rotation size must be at least 1 on every axis, got {size}"
            )));
        }
        let orientation = Orientation::rotation(quarter_turns, axis);
        // Work in doubled coordinates so the centre is integral.
        let doubled_center = size - Vector3i::ONE;
        let twice = doubled_center
            .checked_sub(orientation.apply(doubled_center))
            .ok_or_else(|| VolumeError::invalid(format!("rotation size {size} is too large")))?;
        let halves = twice.to_array();
        if halves.iter().any(|c| c % 2 != 0) {
            return Err(VolumeError::invalid(format!(
                "rotating a {size} volume by {quarter_turns} quarter turns about {axis} \
                 leaves the cell grid"
            )));
        }
        let translation = Vector3i::new(halves[0] / 2, halves[1] / 2, halves[2] / 2);
        Ok(Self::new(orientation, translation))
    }

    /// Reflection given as a per-axis scale of `1` or `-1`.
    ///
    /// Any other scale would not be invertible on the lattice and returns
    /// `Err(VolumeError::InvalidArgument)`.
    pub fn from_scale(scale: Vector3i) -> Result<Self, VolumeError> {
        let mut orientation = Orientation::IDENTITY;
        for axis in Axis::ALL {
            match scale.get(axis) {
                1 => {}
                -1 => orientation = orientation.then(&Orientation::mirror(axis)),
                other => {
                    return Err(VolumeError::invalid(format!(
                        "scale {other} on {axis} is not a lattice reflection"
                    )))
                }
            }
        }
        Ok(Self::new(orientation, Vector3i::ZERO))
    }

    /// Build a transform from a 4x4 affine matrix in row-major order.
    ///
    /// The upper-left 3x3 block must be a signed permutation matrix, the
    /// last column holds the translation, and the last row must be
    /// `[0, 0, 0, 1]`.
    pub fn from_matrix(matrix: [[i32; 4]; 4]) -> Result<Self, VolumeError> {
        if matrix[3] != [0, 0, 0, 1] {
            return Err(VolumeError::invalid(format!(
                "affine matrix last row must be [0, 0, 0, 1], got {:?}",
                matrix[3]
            )));
        }
        let mut linear = [[0i32; 3]; 3];
        for (dst, src) in linear.iter_mut().zip(matrix.iter()) {
            dst.copy_from_slice(&src[..3]);
        }
        let orientation = Orientation::from_matrix(linear)?;
        let translation = Vector3i::new(matrix[0][3], matrix[1][3], matrix[2][3]);
        Ok(Self::new(orientation, translation))
    }

    /// Row-major 4x4 affine matrix for this transform.
    pub fn matrix(&self) -> [[i32; 4]; 4] {
        let linear = self.orientation.matrix();
        let t = self.translation.to_array();
        let mut m = [[0i32; 4]; 4];
        for i in 0..3 {
            m[i][..3].copy_from_slice(&linear[i]);
            m[i][3] = t[i];
        }
        m[3][3] = 1;
        m
    }

    /// The orientation part.
    pub fn orientation(&self) -> Orientation {
        self.orientation
    }

    /// The translation part.
    pub fn translation(&self) -> Vector3i {
        self.translation
    }

    /// Apply `self`, then `next`.
    pub fn then(&self, next: &Self) -> Self {
        Self::new(
            self.orientation.then(&next.orientation),
            next.orientation
                .apply(self.translation)
                .wrapping_add(next.translation),
        )
    }

    /// `self` followed by a translation.
    pub fn with_translation(&self, offset: Vector3i) -> Self {
        self.then(&Self::from_translation(offset))
    }

    /// `self` followed by a rotation about the origin.
    pub fn with_rotation(&self, quarter_turns: i32, axis: Axis) -> Self {
        self.then(&Self::from_rotation(quarter_turns, axis))
    }

    /// `self` followed by a reflection; see [`from_scale`](Self::from_scale).
    pub fn with_scale(&self, scale: Vector3i) -> Result<Self, VolumeError> {
        Ok(self.then(&Self::from_scale(scale)?))
    }

    /// The transform that undoes `self`.
    pub fn invert(&self) -> Self {
        let inverse = self.orientation.inverse();
        Self::new(inverse, inverse.apply(self.translation).wrapping_neg())
    }

    /// `true` if this is [`IDENTITY`](Self::IDENTITY).
    pub fn is_identity(&self) -> bool {
        *self == Self::IDENTITY
    }

    /// Transform a coordinate with wrapping arithmetic.
    pub fn transform(&self, v: Vector3i) -> Vector3i {
        self.orientation.apply(v).wrapping_add(self.translation)
    }

    /// Transform a coordinate, returning `None` if the result overflows.
    pub fn checked_transform(&self, v: Vector3i) -> Option<Vector3i> {
        self.orientation.checked_apply(v)?.checked_add(self.translation)
    }

    /// Image of the inclusive box `[min, max]` as a new `(min, max)` pair.
    ///
    /// Returns `None` if any corner overflows.
    pub fn transform_box(&self, min: Vector3i, max: Vector3i) -> Option<(Vector3i, Vector3i)> {
        let a = self.checked_transform(min)?;
        let b = self.checked_transform(max)?;
        Some((a.min(b), a.max(b)))
    }
}

impl fmt::Display for DiscreteTransform3 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?} + {}", self.orientation.matrix(), self.translation)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use indexmap::IndexSet;
    use proptest::prelude::*;

    fn v(x: i32, y: i32, z: i32) -> Vector3i {
        Vector3i::new(x, y, z)
    }

    fn arb_orientation() -> impl Strategy<Value = Orientation> {
        (0usize..Orientation::COUNT).prop_map(|i| {
            Orientation::all()
                .nth(i)
                .expect("index below COUNT")
        })
    }

    fn arb_vector(range: i32) -> impl Strategy<Value = Vector3i> {
        (-range..range, -range..range, -range..range).prop_map(|(x, y, z)| v(x, y, z))
    }

    // ── Orientation ─────────────────────────────────────────────

    #[test]
    fn all_yields_48_distinct_orientations() {
        let set: IndexSet<Orientation> = Orientation::all().collect();
        assert_eq!(set.len(), Orientation::COUNT);
        assert_eq!(Orientation::all().next(), Some(Orientation::IDENTITY));
    }

    #[test]
    fn group_is_closed_under_composition() {
        let set: IndexSet<Orientation> = Orientation::all().collect();
        for a in &set {
            for b in &set {
                assert!(set.contains(&a.then(b)));
            }
        }
    }

    #[test]
    fn half_of_the_group_is_proper() {
        assert_eq!(Orientation::all().filter(Orientation::is_proper).count(), 24);
        assert!(Orientation::rotation(1, Axis::X).is_proper());
        assert!(!Orientation::mirror(Axis::Z).is_proper());
    }

    #[test]
    fn quarter_turns_follow_right_hand_rule() {
        assert_eq!(Orientation::rotation(1, Axis::Z).apply(v(1, 0, 0)), v(0, 1, 0));
        assert_eq!(Orientation::rotation(1, Axis::X).apply(v(0, 1, 0)), v(0, 0, 1));
        assert_eq!(Orientation::rotation(1, Axis::Y).apply(v(0, 0, 1)), v(1, 0, 0));
    }

    #[test]
    fn rotation_counts_wrap_modulo_four() {
        for axis in Axis::ALL {
            assert_eq!(Orientation::rotation(4, axis), Orientation::IDENTITY);
            assert_eq!(
                Orientation::rotation(-1, axis),
                Orientation::rotation(3, axis)
            );
        }
    }

    #[test]
    fn matrix_round_trips_through_from_matrix() {
        for o in Orientation::all() {
            assert_eq!(Orientation::from_matrix(o.matrix()), Ok(o));
        }
    }

    #[test]
    fn from_matrix_rejects_degenerate_matrices() {
        let zero_row = [[1, 0, 0], [0, 0, 0], [0, 0, 1]];
        let shared_column = [[1, 0, 0], [1, 0, 0], [0, 0, 1]];
        let scaled = [[2, 0, 0], [0, 1, 0], [0, 0, 1]];
        let two_entries = [[1, 1, 0], [0, 1, 0], [0, 0, 1]];
        for m in [zero_row, shared_column, scaled, two_entries] {
            assert!(matches!(
                Orientation::from_matrix(m),
                Err(VolumeError::InvalidArgument { .. })
            ));
        }
    }

    // ── DiscreteTransform3 ──────────────────────────────────────

    #[test]
    fn rotation_about_cell_centre_fixes_the_pivot() {
        let pivot = v(5, 7, -3);
        for axis in Axis::ALL {
            let t = DiscreteTransform3::from_rotation_about(1, axis, pivot, false);
            assert_eq!(t.transform(pivot), pivot);
        }
    }

    #[test]
    fn rotation_about_block_corner_swaps_cells_around_the_corner() {
        let t = DiscreteTransform3::from_rotation_about(1, Axis::Z, Vector3i::ZERO, true);
        // The four cells touching the z-axis corner cycle among themselves.
        assert_eq!(t.transform(v(0, 0, 0)), v(-1, 0, 0));
        assert_eq!(t.transform(v(-1, 0, 0)), v(-1, -1, 0));
        assert_eq!(t.transform(v(-1, -1, 0)), v(0, -1, 0));
        assert_eq!(t.transform(v(0, -1, 0)), v(0, 0, 0));
    }

    #[test]
    fn rotation_around_center_keeps_box_in_place() {
        let square = v(4, 3, 4);
        let t = DiscreteTransform3::rotation_around_center(1, Axis::Y, square).unwrap();
        let (min, max) = t.transform_box(Vector3i::ZERO, square - Vector3i::ONE).unwrap();
        assert_eq!((min, max), (Vector3i::ZERO, square - Vector3i::ONE));
        assert_eq!(t.transform(Vector3i::ZERO), v(0, 0, 3));

        // A non-square plane keeps its centre: min + max is unchanged.
        let size = v(4, 3, 6);
        let t = DiscreteTransform3::rotation_around_center(1, Axis::Y, size).unwrap();
        let (min, max) = t.transform_box(Vector3i::ZERO, size - Vector3i::ONE).unwrap();
        assert_eq!(min + max, size - Vector3i::ONE);
        assert_eq!(max - min, v(5, 2, 3));

        let half = DiscreteTransform3::rotation_around_center(2, Axis::Y, size).unwrap();
        let (min, max) = half.transform_box(Vector3i::ZERO, size - Vector3i::ONE).unwrap();
        assert_eq!((min, max), (Vector3i::ZERO, size - Vector3i::ONE));
    }

    #[test]
    fn rotation_around_center_rejects_off_grid_centres() {
        assert!(matches!(
            DiscreteTransform3::rotation_around_center(1, Axis::Y, v(2, 1, 3)),
            Err(VolumeError::InvalidArgument { .. })
        ));
        assert!(matches!(
            DiscreteTransform3::rotation_around_center(1, Axis::Y, v(0, 1, 1)),
            Err(VolumeError::InvalidArgument { .. })
        ));
    }

    #[test]
    fn from_scale_accepts_only_unit_scales() {
        let mirror = DiscreteTransform3::from_scale(v(-1, 1, 1)).unwrap();
        assert_eq!(mirror.transform(v(3, 4, 5)), v(-3, 4, 5));
        assert!(DiscreteTransform3::from_scale(v(2, 1, 1)).is_err());
        assert!(DiscreteTransform3::from_scale(v(0, 1, 1)).is_err());
    }

    #[test]
    fn affine_matrix_round_trip_and_validation() {
        let t = DiscreteTransform3::from_rotation(3, Axis::X).with_translation(v(1, -2, 3));
        assert_eq!(DiscreteTransform3::from_matrix(t.matrix()), Ok(t));

        let mut bad = t.matrix();
        bad[3] = [0, 0, 1, 1];
        assert!(DiscreteTransform3::from_matrix(bad).is_err());
    }

    #[test]
    fn checked_transform_reports_overflow() {
        let t = DiscreteTransform3::from_translation(v(1, 0, 0));
        assert_eq!(t.checked_transform(v(i32::MAX, 0, 0)), None);
        let mirror = DiscreteTransform3::from_scale(v(-1, 1, 1)).unwrap();
        assert_eq!(mirror.checked_transform(v(i32::MIN, 0, 0)), None);
    }

    #[test]
    fn with_builders_compose_left_to_right() {
        let t = DiscreteTransform3::IDENTITY
            .with_translation(v(1, 0, 0))
            .with_rotation(1, Axis::Z);
        // Translate first, then rotate: (0,0,0) -> (1,0,0) -> (0,1,0).
        assert_eq!(t.transform(Vector3i::ZERO), v(0, 1, 0));
        assert!(!t.is_identity());
        assert!(t.then(&t.invert()).is_identity());
    }

    proptest! {
        #[test]
        fn inverse_undoes_transform(
            o in arb_orientation(),
            t in arb_vector(1000),
            p in arb_vector(1000),
        ) {
            let tr = DiscreteTransform3::new(o, t);
            prop_assert_eq!(tr.invert().transform(tr.transform(p)), p);
            prop_assert_eq!(tr.transform(tr.invert().transform(p)), p);
            prop_assert!(tr.then(&tr.invert()).is_identity());
            prop_assert!(tr.invert().then(&tr).is_identity());
        }

        #[test]
        fn then_matches_sequential_application(
            a in arb_orientation(), ta in arb_vector(1000),
            b in arb_orientation(), tb in arb_vector(1000),
            p in arb_vector(1000),
        ) {
            let first = DiscreteTransform3::new(a, ta);
            let second = DiscreteTransform3::new(b, tb);
            prop_assert_eq!(
                first.then(&second).transform(p),
                second.transform(first.transform(p))
            );
        }

        #[test]
        fn transform_box_preserves_cell_count(
            o in arb_orientation(),
            t in arb_vector(1000),
            min in arb_vector(50),
            size in (1i32..8, 1i32..8, 1i32..8),
        ) {
            let size = v(size.0, size.1, size.2);
            let max = min + size - Vector3i::ONE;
            let tr = DiscreteTransform3::new(o, t);
            let (nmin, nmax) = tr.transform_box(min, max).unwrap();
            let nsize = nmax - nmin + Vector3i::ONE;
            prop_assert_eq!(nsize.cell_count(), size.cell_count());
        }
    }
}
