//! Comparator abstraction: tolerance-aware equality plus a strict weak order.
//!
//! Purpose
//! - Decouple the comparison policy from the group walk so one generic
//!   canonicalization algorithm serves lattices, configurations, and clusters.
//! - Keep all epsilons named and explicit (`SymCfg`), never inlined magic.
//!
//! Contract
//! - `less`/`equal` must form a strict weak order: `!less(a,b) && !less(b,a)`
//!   exactly when `equal(a,b)`, and `less` must be total over any finite set
//!   the engine compares. This is a caller obligation; it is not re-verified
//!   at runtime, and a violating comparator makes canonical forms
//!   order-of-iteration dependent.

/// Symmetry tolerances.
///
/// `tol` bounds coordinate and lattice-vector comparisons; `eps_det` guards
/// degenerate (near-singular) lattice and transformation matrices.
#[derive(Clone, Copy, Debug)]
pub struct SymCfg {
    pub tol: f64,
    pub eps_det: f64,
}

impl Default for SymCfg {
    fn default() -> Self {
        Self {
            tol: 1e-5,
            eps_det: 1e-12,
        }
    }
}

/// Comparison policy for one object type.
///
/// Exactly one element of any finite equivalence class is maximal under
/// `less`; the engine picks that element as the canonical representative.
pub trait SymCompare<T> {
    /// Tolerance-based equality: `a` and `b` represent the same physical
    /// object.
    fn equal(&self, a: &T, b: &T) -> bool;
    /// Strict weak order consistent with `equal`.
    fn less(&self, a: &T, b: &T) -> bool;
}

/// `a < b` with slack: true only if `a` is below `b` by more than `tol`.
#[inline]
pub fn flt_lt(a: f64, b: f64, tol: f64) -> bool {
    a < b - tol
}

/// `a == b` within `tol`.
#[inline]
pub fn flt_eq(a: f64, b: f64, tol: f64) -> bool {
    (a - b).abs() <= tol
}

/// Lexicographic `a < b` over equal-length slices, each entry compared with
/// slack `tol`. Entries within tolerance are treated as ties and skipped.
pub fn lex_lt(a: &[f64], b: &[f64], tol: f64) -> bool {
    debug_assert_eq!(a.len(), b.len());
    for (&x, &y) in a.iter().zip(b.iter()) {
        if flt_lt(x, y, tol) {
            return true;
        }
        if flt_lt(y, x, tol) {
            return false;
        }
    }
    false
}

/// Entrywise equality within `tol` over equal-length slices.
pub fn lex_eq(a: &[f64], b: &[f64], tol: f64) -> bool {
    debug_assert_eq!(a.len(), b.len());
    a.iter().zip(b.iter()).all(|(&x, &y)| flt_eq(x, y, tol))
}
