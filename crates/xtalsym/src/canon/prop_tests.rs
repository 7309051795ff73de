//! Property suites for the canonicalization laws.

use proptest::prelude::*;

use super::*;
use crate::config::{Configuration, OccCompare};
use crate::sym::{PermuteGroup, Permutation};

/// Dihedral group of an n-site ring: n rotations and n reflections.
fn ring_group(n: usize) -> PermuteGroup {
    let mut perms = Vec::with_capacity(2 * n);
    for k in 0..n {
        perms.push(Permutation::new((0..n).map(|i| (i + k) % n).collect()).unwrap());
        perms.push(Permutation::new((0..n).map(|i| (n + k - i) % n).collect()).unwrap());
    }
    PermuteGroup::from_permutations(perms)
}

fn occ_strategy(n: usize) -> impl Strategy<Value = Configuration> {
    proptest::collection::vec(0u8..3, n).prop_map(Configuration::new)
}

proptest! {
    #[test]
    fn canonical_form_is_idempotent(x in occ_strategy(8)) {
        let g = ring_group(8);
        let cmp = OccCompare;
        let c1 = canonical_form(&x, g.ops(), &cmp);
        let c2 = canonical_form(&c1, g.ops(), &cmp);
        prop_assert!(cmp.equal(&c1, &c2));
    }

    #[test]
    fn canonical_form_is_orbit_invariant(x in occ_strategy(8), k in 0usize..16) {
        let g = ring_group(8);
        let cmp = OccCompare;
        let moved = g.ops()[k].act_on(&x);
        let c_seed = canonical_form(&x, g.ops(), &cmp);
        let c_moved = canonical_form(&moved, g.ops(), &cmp);
        prop_assert!(cmp.equal(&c_seed, &c_moved));
        prop_assert!(is_equivalent(&x, &moved, g.ops(), &cmp));
    }

    #[test]
    fn is_canonical_matches_canonical_form(x in occ_strategy(8)) {
        let g = ring_group(8);
        let cmp = OccCompare;
        let canon = canonical_form(&x, g.ops(), &cmp);
        prop_assert_eq!(is_canonical(&x, g.ops(), &cmp), cmp.equal(&canon, &x));
    }

    #[test]
    fn mapping_round_trips_both_directions(x in occ_strategy(8)) {
        let g = ring_group(8);
        let cmp = OccCompare;
        let canon = canonical_form(&x, g.ops(), &cmp);
        let to = to_canonical(&x, g.ops(), &cmp).unwrap();
        prop_assert!(cmp.equal(&to.act_on(&x), &canon));
        let from = from_canonical(&x, g.ops(), &cmp).unwrap();
        prop_assert!(cmp.equal(&from.act_on(&canon), &x));
    }

    #[test]
    fn invariant_subgroup_satisfies_orbit_stabilizer(x in occ_strategy(8)) {
        let g = ring_group(8);
        let cmp = OccCompare;
        let stab = invariant_subgroup(&x, g.ops(), &cmp);
        for op in &stab {
            prop_assert!(cmp.equal(&op.act_on(&x), &x));
        }
        prop_assert!(stab.iter().any(|op| op.permutation().is_identity()));
        let orbit = Orbit::generate(&x, g.ops(), &cmp);
        prop_assert_eq!(orbit.len() * stab.len(), g.len());
    }
}
