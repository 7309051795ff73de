//! Symmetry group elements and groups.
//!
//! Two element flavors act on objects in this crate:
//! - `SymOp`: rotation + translation in cartesian space, acting on lattices
//!   and clusters;
//! - `PermuteOp`: a site permutation tied to one supercell's site ordering,
//!   acting on configurations.
//!
//! A group is an ordered, finite, non-empty sequence of elements. Iteration
//! order is the construction order and is relied upon for deterministic
//! tie-breaking during canonicalization. Closure under composition and
//! inversion is assumed valid at construction and never re-verified.

mod permute;
mod types;

pub use permute::{PermuteGroup, PermuteOp, Permutation};
pub use types::{SymGroup, SymOp};
