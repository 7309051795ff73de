use super::*;
use crate::compare::SymCompare;
use nalgebra::Matrix3;

fn cubic_prim() -> (Lattice, Vec<Vector3<f64>>, SymGroup) {
    (
        Lattice::new(Matrix3::identity()),
        vec![Vector3::zeros()],
        SymGroup::square_point_group(),
    )
}

fn make_scel(transf: Matrix3<i64>) -> Supercell {
    let (lat, basis, pg) = cubic_prim();
    Supercell::new(lat, basis, pg, transf, SymCfg::default()).unwrap()
}

#[test]
fn rejects_non_positive_volume() {
    let (lat, basis, pg) = cubic_prim();
    let singular = Matrix3::new(1, 0, 0, 2, 0, 0, 0, 0, 1);
    let err = Supercell::new(lat, basis, pg, singular, SymCfg::default());
    assert!(matches!(err, Err(ScelError::NonPositiveVolume { .. })));
}

#[test]
fn rejects_degenerate_prim_lattice() {
    // cell volume below eps_det: inverting the column matrix would only
    // amplify noise
    let (_, basis, pg) = cubic_prim();
    let flat = Lattice::new(Matrix3::new(
        1.0, 0.0, 0.0, 0.0, 1.0, 0.0, 0.0, 0.0, 1e-13,
    ));
    let err = Supercell::new(flat, basis, pg, Matrix3::identity(), SymCfg::default());
    assert!(matches!(err, Err(ScelError::DegeneratePrim { .. })));
}

#[test]
fn rotated_supercells_are_equivalent() {
    // T2 = Rf·T1 for the 90° z-rotation, so the two lattices are images of
    // each other under the parent point group.
    let t1 = Matrix3::new(1, 0, 0, 0, 2, 0, 0, 0, 1);
    let rf = Matrix3::new(0, -1, 0, 1, 0, 0, 0, 0, 1);
    let s1 = make_scel(t1);
    let s2 = make_scel(rf * t1);
    assert!(s1.is_equivalent(&s2));

    let cmp = LatticeCompare::new(SymCfg::default().tol);
    assert!(cmp.equal(&s1.canonical_lattice(), &s2.canonical_lattice()));

    let s3 = make_scel(Matrix3::new(1, 0, 0, 0, 3, 0, 0, 0, 1));
    assert!(!s1.is_equivalent(&s3));
}

#[test]
fn to_and_from_canonical_round_trip() {
    use crate::canon::GroupAction;
    let s = make_scel(Matrix3::new(1, 0, 0, 0, 2, 0, 0, 0, 1));
    let cmp = LatticeCompare::new(SymCfg::default().tol);
    let canon = s.canonical_lattice();
    let to = s.to_canonical().unwrap();
    assert!(cmp.equal(&to.act_on(s.lattice()), &canon));
    let from = s.from_canonical().unwrap();
    assert!(cmp.equal(&from.act_on(&canon), s.lattice()));
    // a canonical supercell reports itself canonical
    let mut db = ScelDatabase::new(cmp);
    let mut s_mut = s.clone();
    let r = s_mut.canonical_or_insert(&mut db);
    let stored = db.get(r).unwrap();
    assert!(canon::is_canonical(
        stored,
        s.point_group().ops(),
        &LatticeCompare::new(SymCfg::default().tol)
    ));
}

#[test]
fn canonical_or_insert_memoizes_and_deduplicates() {
    let cmp = LatticeCompare::new(SymCfg::default().tol);
    let mut db = ScelDatabase::new(cmp);

    let t1 = Matrix3::new(1, 0, 0, 0, 2, 0, 0, 0, 1);
    let rf = Matrix3::new(0, -1, 0, 1, 0, 0, 0, 0, 1);
    let mut s1 = make_scel(t1);
    let mut s2 = make_scel(rf * t1);

    assert!(s1.canonical_ref().is_none());
    let r1 = s1.canonical_or_insert(&mut db);
    assert_eq!(s1.canonical_ref(), Some(r1));
    assert_eq!(db.len(), 1);
    assert!(db.commit());

    // equivalent supercell resolves to the same record, nothing new inserted
    let r2 = s2.canonical_or_insert(&mut db);
    assert_eq!(r1, r2);
    assert_eq!(db.len(), 1);
    assert!(!db.commit());

    // second call on s1 hits the cache
    let r1_again = s1.canonical_or_insert(&mut db);
    assert_eq!(r1, r1_again);
    assert_eq!(db.len(), 1);
}

#[test]
fn representation_orbit_deduplicates_to_one_record() {
    // Insert the canonical form of every point-group image of one supercell;
    // the database must end up with exactly one record.
    let (lat, basis, pg) = cubic_prim();
    let t0 = Matrix3::new(1, 0, 0, 0, 2, 0, 0, 0, 1);
    let cmp = LatticeCompare::new(SymCfg::default().tol);
    let mut db = ScelDatabase::new(cmp);
    let mut inserted = 0;
    for op in pg.iter() {
        let rf = op.r.map(|x| x.round() as i64);
        let t = rf * t0;
        if sites::det_i64(&t) <= 0 {
            continue;
        }
        let mut s =
            Supercell::new(lat, basis.clone(), pg.clone(), t, SymCfg::default()).unwrap();
        s.canonical_or_insert(&mut db);
        inserted += 1;
    }
    assert!(inserted > 1);
    assert_eq!(db.len(), 1);
}

/// Hermite-normal-form transformation matrices with determinant in
/// `1..=max_volume`: upper triangular with positive diagonal and each
/// off-diagonal entry reduced modulo the diagonal entry of its column, so
/// there is exactly one matrix per sublattice of the given index.
fn hermite_matrices(max_volume: i64) -> Vec<Matrix3<i64>> {
    let mut out = Vec::new();
    for v in 1..=max_volume {
        for a in 1..=v {
            if v % a != 0 {
                continue;
            }
            for b in 1..=(v / a) {
                if (v / a) % b != 0 {
                    continue;
                }
                let c = v / (a * b);
                for h12 in 0..b {
                    for h13 in 0..c {
                        for h23 in 0..c {
                            out.push(Matrix3::new(a, h12, h13, 0, b, h23, 0, 0, c));
                        }
                    }
                }
            }
        }
    }
    out
}

#[test]
fn volume_range_enumeration_fills_the_database() {
    // Sweep every distinct sublattice of the cubic prim up to volume 4 and
    // store each canonical form. Under representation-level comparison a
    // square-group image of one Hermite matrix is never another Hermite
    // matrix (row swaps and sign changes break the triangular positive
    // form), so every matrix lands in its own record.
    let (lat, basis, pg) = cubic_prim();
    let cmp = LatticeCompare::new(SymCfg::default().tol);
    let mut db = ScelDatabase::new(cmp);

    let hnfs = hermite_matrices(4);
    // 1 + 7 + 13 + 35 sublattices of index 1..=4
    assert_eq!(hnfs.len(), 56);

    for &t in &hnfs {
        let mut s =
            Supercell::new(lat, basis.clone(), pg.clone(), t, SymCfg::default()).unwrap();
        s.canonical_or_insert(&mut db);
    }
    assert_eq!(db.len(), hnfs.len());
    assert!(db.commit());
    for stored in db.iter() {
        assert!(canon::is_canonical(stored, pg.ops(), &cmp));
    }

    // a second sweep resolves every entry to an existing record
    for &t in &hnfs {
        let mut s =
            Supercell::new(lat, basis.clone(), pg.clone(), t, SymCfg::default()).unwrap();
        s.canonical_or_insert(&mut db);
    }
    assert_eq!(db.len(), hnfs.len());
    assert!(!db.commit());

    // rotated images of enumerated cells deduplicate as well
    let rf = Matrix3::new(0, -1, 0, 1, 0, 0, 0, 0, 1);
    for &t in hnfs.iter().take(8) {
        let mut s =
            Supercell::new(lat, basis.clone(), pg.clone(), rf * t, SymCfg::default()).unwrap();
        s.canonical_or_insert(&mut db);
    }
    assert_eq!(db.len(), hnfs.len());
}

#[test]
fn permute_group_order_and_identity() {
    // diag(2,1,1): the four square ops fixing the x-axis survive, times two
    // translations.
    let s = make_scel(Matrix3::new(2, 0, 0, 0, 1, 0, 0, 0, 1));
    assert_eq!(s.volume(), 2);
    assert_eq!(s.num_sites(), 2);
    let g = s.permute_group().unwrap();
    assert_eq!(g.len(), 8);
    assert!(g.ops()[0].permutation().is_identity());
    for op in g.ops() {
        assert_eq!(op.num_sites(), 2);
    }
}

#[test]
fn permute_group_detects_invalid_point_group() {
    // An off-site basis breaks the basis permutation for the 180° rotation.
    let (lat, _, pg) = cubic_prim();
    let s = Supercell::new(
        lat,
        vec![Vector3::new(0.25, 0.0, 0.0)],
        pg,
        Matrix3::new(1, 0, 0, 0, 1, 0, 0, 0, 1),
        SymCfg::default(),
    )
    .unwrap();
    assert!(matches!(
        s.permute_group(),
        Err(ScelError::BasisMismatch { .. })
    ));
}

#[test]
fn configurations_canonicalize_under_the_supercell_range() {
    let s = make_scel(Matrix3::new(2, 0, 0, 0, 1, 0, 0, 0, 1));
    let g = s.permute_group().unwrap();
    let x = Configuration::new(vec![0, 1]);
    // translation moves the occupied site; both orderings share one orbit
    let y = Configuration::new(vec![1, 0]);
    assert!(x.is_equivalent_in(&y, g.ops()));
    let canon = x.canonical_form_in(g.ops());
    assert_eq!(canon.occ(), &[1, 0]);
    assert!(canon.is_canonical_in(g.ops()));
    // uniform occupation is fixed by the whole range
    let uniform = s.default_configuration();
    assert_eq!(uniform.invariant_subgroup_in(g.ops()).len(), g.len());
}

#[test]
fn two_sublattice_basis_maps_under_mirrors() {
    // body-centered style basis: mirrors map the centered site onto itself
    // modulo prim translations.
    let (lat, _, pg) = cubic_prim();
    let s = Supercell::new(
        lat,
        vec![Vector3::zeros(), Vector3::new(0.5, 0.5, 0.5)],
        pg,
        Matrix3::new(1, 0, 0, 0, 1, 0, 0, 0, 1),
        SymCfg::default(),
    )
    .unwrap();
    let g = s.permute_group().unwrap();
    // volume 1: one translation, all eight ops survive
    assert_eq!(g.len(), 8);
    // every permutation fixes the two one-site sublattices
    for op in g.ops() {
        assert!(op.permutation().is_identity());
    }
}
