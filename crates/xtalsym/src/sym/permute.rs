//! Site permutations and precomputed permutation groups.
//!
//! Gather convention: `apply(v)[i] = v[map[i]]`. With that convention the
//! inverse scatters (`inv.map[map[i]] = i`) and composition `a.then_after(b)`
//! applies `b` first.

/// Bijection on `0..n`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Permutation {
    map: Vec<usize>,
}

impl Permutation {
    /// Validates that `map` is a bijection on `0..map.len()`.
    pub fn new(map: Vec<usize>) -> Option<Self> {
        let n = map.len();
        let mut seen = vec![false; n];
        for &j in &map {
            if j >= n || seen[j] {
                return None;
            }
            seen[j] = true;
        }
        Some(Self { map })
    }

    pub fn identity(n: usize) -> Self {
        Self {
            map: (0..n).collect(),
        }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.map.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }

    #[inline]
    pub fn is_identity(&self) -> bool {
        self.map.iter().enumerate().all(|(i, &j)| i == j)
    }

    #[inline]
    pub fn map(&self) -> &[usize] {
        &self.map
    }

    /// Gather: `out[i] = v[map[i]]`. Panics if `v.len() != self.len()`.
    pub fn apply_slice<T: Clone>(&self, v: &[T]) -> Vec<T> {
        assert_eq!(v.len(), self.map.len());
        self.map.iter().map(|&j| v[j].clone()).collect()
    }

    pub fn inverse(&self) -> Permutation {
        let mut inv = vec![0usize; self.map.len()];
        for (i, &j) in self.map.iter().enumerate() {
            inv[j] = i;
        }
        Permutation { map: inv }
    }

    /// Composition applying `first` first: `result.apply(v) ==
    /// self.apply(&first.apply(v))`.
    pub fn then_after(&self, first: &Permutation) -> Permutation {
        assert_eq!(self.map.len(), first.map.len());
        let map = self.map.iter().map(|&j| first.map[j]).collect();
        Permutation { map }
    }
}

/// Permutation-flavored group element tied to one supercell's site ordering.
///
/// `index` is the element's position within its `PermuteGroup`
/// (`usize::MAX` for free-standing elements such as computed inverses).
#[derive(Clone, Debug)]
pub struct PermuteOp {
    pub index: usize,
    perm: Permutation,
}

impl PermuteOp {
    pub fn new(perm: Permutation) -> Self {
        Self {
            index: super::types::FREE_INDEX,
            perm,
        }
    }

    #[inline]
    pub fn permutation(&self) -> &Permutation {
        &self.perm
    }

    #[inline]
    pub fn num_sites(&self) -> usize {
        self.perm.len()
    }

    pub fn inverse(&self) -> PermuteOp {
        PermuteOp::new(self.perm.inverse())
    }
}

/// Ordered sequence of `PermuteOp`, precomputed once per supercell and reused
/// across canonicalization queries as a caller-owned slice.
#[derive(Clone, Debug)]
pub struct PermuteGroup {
    ops: Vec<PermuteOp>,
}

impl PermuteGroup {
    /// Build from permutations, assigning indices in the given order.
    pub fn from_permutations(perms: Vec<Permutation>) -> Self {
        let ops = perms
            .into_iter()
            .enumerate()
            .map(|(i, perm)| PermuteOp { index: i, perm })
            .collect();
        Self { ops }
    }

    #[inline]
    pub fn ops(&self) -> &[PermuteOp] {
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
}
