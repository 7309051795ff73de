//! Symmetry-orbit canonicalization for crystal-structure enumeration.
//!
//! The crate centers on one generic engine (`canon`): given an object, an
//! ordered range of group elements acting on it, and a tolerance-aware
//! comparator, it decides whether the object is the canonical representative
//! of its symmetry orbit, computes that representative, recovers the mapping
//! element in either direction, and extracts the invariant subgroup.
//!
//! Concrete object kinds (lattices, supercells, site configurations, site
//! clusters) each pair a transformation capability with a comparator and defer
//! to the same group walk, so deduplication behaves identically across kinds.
//!
//! API Policy
//! - This crate is project-internal. There is no stable public API.
//! - Breaking changes are encouraged when they improve quality.

pub mod canon;
pub mod cluster;
pub mod compare;
pub mod config;
pub mod db;
pub mod lattice;
pub mod scel;
pub mod sym;

/// Library version string.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Common exports for quick imports in callers.
pub mod prelude {
    pub use crate::canon::{
        canonical_form, from_canonical, invariant_subgroup, is_canonical, is_equivalent,
        to_canonical, CanonicalGenerator, GroupAction, Orbit,
    };
    pub use crate::cluster::{Cluster, ClusterCompare};
    pub use crate::compare::{SymCfg, SymCompare};
    pub use crate::config::{Configuration, OccCompare};
    pub use crate::db::{Database, DbRef};
    pub use crate::lattice::{Lattice, LatticeCompare};
    pub use crate::scel::{ScelDatabase, ScelError, ScelRef, Supercell};
    pub use crate::sym::{PermuteGroup, PermuteOp, Permutation, SymGroup, SymOp};
    pub use nalgebra::{Matrix3 as Mat3, Vector3 as Vec3};
}
