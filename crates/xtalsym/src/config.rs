//! Site configurations: discrete occupation values indexed by supercell
//! sites, canonicalized under a precomputed permutation range.
//!
//! The acting range is caller-owned (`&[PermuteOp]`, typically borrowed from
//! a `PermuteGroup` built once per supercell) so that the same precomputed
//! permutations serve many canonicalization queries without regeneration.

use crate::canon::{self, GroupAction};
use crate::compare::SymCompare;
use crate::sym::PermuteOp;

/// Occupation vector over the sites of one supercell, one discrete value per
/// site. Site order is the supercell's site order; two configurations are
/// comparable only when they index the same supercell.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Configuration {
    occ: Vec<u8>,
}

impl Configuration {
    pub fn new(occ: Vec<u8>) -> Self {
        Self { occ }
    }

    #[inline]
    pub fn occ(&self) -> &[u8] {
        &self.occ
    }

    #[inline]
    pub fn num_sites(&self) -> usize {
        self.occ.len()
    }

    /// True iff no permutation in `range` strictly increases the occupation.
    pub fn is_canonical_in(&self, range: &[PermuteOp]) -> bool {
        canon::is_canonical(self, range, &OccCompare)
    }

    /// The maximal equivalent configuration over `range`.
    pub fn canonical_form_in(&self, range: &[PermuteOp]) -> Configuration {
        canon::canonical_form(self, range, &OccCompare)
    }

    /// The permutation mapping `self` to its canonical form.
    /// `None` only for an empty range.
    pub fn to_canonical_in(&self, range: &[PermuteOp]) -> Option<PermuteOp> {
        canon::to_canonical(self, range, &OccCompare)
    }

    /// The permutation mapping the canonical form back to `self`.
    /// `None` only for an empty range.
    pub fn from_canonical_in(&self, range: &[PermuteOp]) -> Option<PermuteOp> {
        canon::from_canonical(self, range, &OccCompare)
    }

    /// True iff `self` and `other` share a canonical form over `range`.
    pub fn is_equivalent_in(&self, other: &Configuration, range: &[PermuteOp]) -> bool {
        canon::is_equivalent(self, other, range, &OccCompare)
    }

    /// The permutations in `range` that fix `self`.
    pub fn invariant_subgroup_in(&self, range: &[PermuteOp]) -> Vec<PermuteOp> {
        canon::invariant_subgroup(self, range, &OccCompare)
    }
}

impl GroupAction<Configuration> for PermuteOp {
    fn act_on(&self, obj: &Configuration) -> Configuration {
        Configuration {
            occ: self.permutation().apply_slice(&obj.occ),
        }
    }

    fn inverse_op(&self) -> Self {
        self.inverse()
    }
}

/// Exact lexicographic comparison of occupation vectors. Discrete values need
/// no tolerance, so `equal` and `less` come straight from the derived slice
/// order.
#[derive(Clone, Copy, Debug, Default)]
pub struct OccCompare;

impl SymCompare<Configuration> for OccCompare {
    fn equal(&self, a: &Configuration, b: &Configuration) -> bool {
        a.occ == b.occ
    }

    fn less(&self, a: &Configuration, b: &Configuration) -> bool {
        a.occ < b.occ
    }
}
