//! Lattices: three column vectors with a point-operation action and a
//! column-lexicographic tolerance comparison.
//!
//! Canonicality of a supercell reduces to canonicality of its lattice
//! representation under the parent structure's point group: lattices carry no
//! interior degrees of freedom, so the orbit is `{ R·L : R in point group }`
//! compared column by column. Reduction of the column representation itself
//! (Niggli and friends) is a concern of the structure layer, not of this
//! engine.

use nalgebra::{Matrix3, Vector3};

use crate::canon::GroupAction;
use crate::compare::{lex_eq, lex_lt, SymCompare};
use crate::sym::SymOp;

/// Lattice as a 3×3 matrix whose columns are the lattice vectors.
#[derive(Clone, Copy, Debug)]
pub struct Lattice {
    cols: Matrix3<f64>,
}

impl Lattice {
    #[inline]
    pub fn new(cols: Matrix3<f64>) -> Self {
        Self { cols }
    }

    pub fn from_column_vecs(a: Vector3<f64>, b: Vector3<f64>, c: Vector3<f64>) -> Self {
        Self {
            cols: Matrix3::from_columns(&[a, b, c]),
        }
    }

    #[inline]
    pub fn cols(&self) -> &Matrix3<f64> {
        &self.cols
    }

    #[inline]
    pub fn column(&self, i: usize) -> Vector3<f64> {
        self.cols.column(i).into_owned()
    }

    /// Signed cell volume (determinant of the column matrix).
    #[inline]
    pub fn volume(&self) -> f64 {
        self.cols.determinant()
    }

    /// Column-major flattening used by the lexicographic comparator.
    #[inline]
    pub fn flat(&self) -> [f64; 9] {
        let mut out = [0.0; 9];
        out.copy_from_slice(self.cols.as_slice());
        out
    }

    /// Fractional coordinates of a cartesian point, if the lattice is
    /// non-degenerate.
    pub fn to_fractional(&self, x: Vector3<f64>) -> Option<Vector3<f64>> {
        self.cols.try_inverse().map(|inv| inv * x)
    }
}

/// Point operations act on the column vectors; the translation part of a
/// `SymOp` is irrelevant for an origin-free lattice.
impl GroupAction<Lattice> for SymOp {
    fn act_on(&self, obj: &Lattice) -> Lattice {
        Lattice::new(self.r * obj.cols)
    }

    fn inverse_op(&self) -> Self {
        self.inverse()
    }
}

/// Column-lexicographic comparison of lattice matrices within `tol`.
#[derive(Clone, Copy, Debug)]
pub struct LatticeCompare {
    pub tol: f64,
}

impl LatticeCompare {
    pub fn new(tol: f64) -> Self {
        Self { tol }
    }
}

impl SymCompare<Lattice> for LatticeCompare {
    fn equal(&self, a: &Lattice, b: &Lattice) -> bool {
        lex_eq(&a.flat(), &b.flat(), self.tol)
    }

    fn less(&self, a: &Lattice, b: &Lattice) -> bool {
        lex_lt(&a.flat(), &b.flat(), self.tol)
    }
}
