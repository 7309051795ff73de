//! Cartesian symmetry operations (`SymOp`) and ordered groups of them.

use nalgebra::{Matrix3, Vector3};

/// Index value for an operation that is not (or not yet) a member of a group.
pub(crate) const FREE_INDEX: usize = usize::MAX;

/// Symmetry operation `x ↦ R x + t` in cartesian coordinates.
///
/// Invariants:
/// - `r` is orthogonal (proper or improper rotation), so `r⁻¹ = rᵀ`.
/// - Immutable once constructed; `index` is its position in the owning
///   `SymGroup`, or `usize::MAX` for a free-standing operation.
#[derive(Clone, Copy, Debug)]
pub struct SymOp {
    pub r: Matrix3<f64>,
    pub t: Vector3<f64>,
    pub index: usize,
}

impl SymOp {
    #[inline]
    pub fn new(r: Matrix3<f64>, t: Vector3<f64>) -> Self {
        Self {
            r,
            t,
            index: FREE_INDEX,
        }
    }

    #[inline]
    pub fn identity() -> Self {
        Self::new(Matrix3::identity(), Vector3::zeros())
    }

    /// Pure point operation (zero translation).
    #[inline]
    pub fn point_op(r: Matrix3<f64>) -> Self {
        Self::new(r, Vector3::zeros())
    }

    #[inline]
    pub fn apply_vec(&self, x: Vector3<f64>) -> Vector3<f64> {
        self.r * x + self.t
    }

    /// Inverse operation `x ↦ rᵀ x − rᵀ t` (uses orthogonality of `r`).
    ///
    /// The result carries no group index; resolving the inverse's position
    /// within a group is the group owner's job.
    #[inline]
    pub fn inverse(&self) -> SymOp {
        let rinv = self.r.transpose();
        SymOp::new(rinv, -(rinv * self.t))
    }

    /// True if `self` and `other` agree entrywise within `tol`.
    pub fn matches(&self, other: &SymOp, tol: f64) -> bool {
        (self.r - other.r).abs().max() <= tol && (self.t - other.t).abs().max() <= tol
    }
}

/// Composition: `(a * b).apply_vec(x) == a.apply_vec(b.apply_vec(x))`.
impl std::ops::Mul for SymOp {
    type Output = SymOp;
    #[inline]
    fn mul(self, rhs: SymOp) -> SymOp {
        SymOp::new(self.r * rhs.r, self.r * rhs.t + self.t)
    }
}

/// Ordered, finite, non-empty sequence of symmetry operations.
///
/// Element indices are assigned in construction order. That order is the
/// deterministic iteration order every canonicalization scan uses.
#[derive(Clone, Debug)]
pub struct SymGroup {
    ops: Vec<SymOp>,
}

impl SymGroup {
    /// Build a group from operations, assigning indices in the given order.
    /// Closure and inversion validity are the caller's obligation.
    pub fn from_ops(mut ops: Vec<SymOp>) -> Self {
        for (i, op) in ops.iter_mut().enumerate() {
            op.index = i;
        }
        Self { ops }
    }

    /// The trivial group `{e}`.
    pub fn identity_group() -> Self {
        Self::from_ops(vec![SymOp::identity()])
    }

    /// Point group of a square in the xy-plane (C4v embedded in 3D, order 8):
    /// four z-rotations and four mirrors. Used by tests and benches.
    pub fn square_point_group() -> Self {
        let mut ops = Vec::with_capacity(8);
        for k in 0..4 {
            let th = std::f64::consts::FRAC_PI_2 * k as f64;
            let (s, c) = th.sin_cos();
            let rot = Matrix3::new(c, -s, 0.0, s, c, 0.0, 0.0, 0.0, 1.0);
            ops.push(SymOp::point_op(rot));
            // mirror across x-axis, then the rotation
            let mirror = Matrix3::new(1.0, 0.0, 0.0, 0.0, -1.0, 0.0, 0.0, 0.0, 1.0);
            ops.push(SymOp::point_op(rot * mirror));
        }
        Self::from_ops(ops)
    }

    #[inline]
    pub fn ops(&self) -> &[SymOp] {
        &self.ops
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.ops.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.ops.is_empty()
    }

    #[inline]
    pub fn iter(&self) -> std::slice::Iter<'_, SymOp> {
        self.ops.iter()
    }
}

impl<'a> IntoIterator for &'a SymGroup {
    type Item = &'a SymOp;
    type IntoIter = std::slice::Iter<'a, SymOp>;
    fn into_iter(self) -> Self::IntoIter {
        self.ops.iter()
    }
}
