//! Generic canonical-form algorithm.
//!
//! Purpose
//! - One group-walk algorithm shared by every object kind: decide
//!   canonicality, compute the canonical representative, recover the mapping
//!   element in either direction, and extract the invariant subgroup.
//! - Polymorphism via two capability seams instead of inheritance: a
//!   transformation capability (`GroupAction`) and a comparison policy
//!   (`SymCompare`).
//!
//! Call conventions
//! - Convention 1: a `SymGroup`'s op slice plus a caller-supplied comparator
//!   (lattices, clusters, prim-level structures).
//! - Convention 2: a caller-owned `&[PermuteOp]` range precomputed for one
//!   supercell, plus that object kind's natural comparator (configurations).
//!   The algorithm is identical; only how the range is obtained differs.
//!
//! Preconditions (documented, not re-verified at runtime)
//! - The range is non-empty and contains the identity element.
//! - The comparator is a valid strict weak order consistent with its
//!   equality. A violating comparator makes results order-dependent.
//!
//! Determinism
//! - The scan walks the range in slice order and replaces the running best
//!   only on strict improvement, so repeated calls on identical input return
//!   the identical canonical form and identical mapping element.

mod generate;

pub use generate::{CanonicalGenerator, Orbit};

use crate::compare::SymCompare;

/// Transformation capability of a group element over one object type.
///
/// `act_on` is pure: it produces a new object and never mutates the element
/// or the input. Repeated application and inversion must round-trip within
/// the comparator's tolerance.
pub trait GroupAction<T>: Clone {
    fn act_on(&self, obj: &T) -> T;
    fn inverse_op(&self) -> Self;
}

/// True iff no element of `range` strictly increases `obj` under `cmp`.
///
/// Vacuously true for an empty range.
pub fn is_canonical<T, E, C>(obj: &T, range: &[E], cmp: &C) -> bool
where
    E: GroupAction<T>,
    C: SymCompare<T>,
{
    range.iter().all(|g| !cmp.less(obj, &g.act_on(obj)))
}

/// The maximal transformed copy of `obj` over `range`.
///
/// For an empty range this returns a clone of the seed (precondition
/// violation; see module docs).
pub fn canonical_form<T, E, C>(obj: &T, range: &[E], cmp: &C) -> T
where
    T: Clone,
    E: GroupAction<T>,
    C: SymCompare<T>,
{
    let mut gen = CanonicalGenerator::new(range, cmp);
    gen.generate(obj)
}

/// The element mapping `obj` to its canonical form, i.e. the `g` achieving
/// the maximum. `None` only for an empty range.
pub fn to_canonical<T, E, C>(obj: &T, range: &[E], cmp: &C) -> Option<E>
where
    T: Clone,
    E: GroupAction<T>,
    C: SymCompare<T>,
{
    let mut gen = CanonicalGenerator::new(range, cmp);
    gen.generate(obj);
    gen.to_canonical().cloned()
}

/// The element mapping the canonical form back to `obj`:
/// `to_canonical(obj).inverse_op()`. `None` only for an empty range.
pub fn from_canonical<T, E, C>(obj: &T, range: &[E], cmp: &C) -> Option<E>
where
    T: Clone,
    E: GroupAction<T>,
    C: SymCompare<T>,
{
    to_canonical(obj, range, cmp).map(|g| g.inverse_op())
}

/// True iff `a` and `b` lie in the same orbit: their canonical forms are
/// equal under `cmp`.
pub fn is_equivalent<T, E, C>(a: &T, b: &T, range: &[E], cmp: &C) -> bool
where
    T: Clone,
    E: GroupAction<T>,
    C: SymCompare<T>,
{
    cmp.equal(&canonical_form(a, range, cmp), &canonical_form(b, range, cmp))
}

/// The elements of `range` that leave `obj` unchanged under `cmp`.
///
/// Result order follows `range` order. When `range` is a true group this is
/// the stabilizer subgroup (closed, identity included); for an arbitrary
/// range it is just the filtered sequence. Computed fresh each call;
/// ownership passes to the caller.
pub fn invariant_subgroup<T, E, C>(obj: &T, range: &[E], cmp: &C) -> Vec<E>
where
    E: GroupAction<T>,
    C: SymCompare<T>,
{
    range
        .iter()
        .filter(|g| cmp.equal(&g.act_on(obj), obj))
        .cloned()
        .collect()
}

#[cfg(test)]
mod prop_tests;
