//! Supercells: prim lattice × integer transformation, a precomputed site
//! permutation group, and the memoized canonical-form path through the
//! supercell database.
//!
//! Canonicality of a supercell is canonicality of its lattice representation
//! under the parent structure's point group; supercells carry no interior
//! degrees of freedom beyond their lattice. The canonical form is resolved
//! through an explicit `canonical_or_insert` call: the first call inserts or
//! finds the canonical lattice in the caller's database and caches the
//! returned reference, later calls return the cache. Both side effects are
//! visible in the signature; concurrent use of one `Supercell` value needs
//! caller-enforced exclusion around that first call.

mod sites;

use std::fmt;

use nalgebra::{Matrix3, Vector3};

use crate::canon;
use crate::compare::SymCfg;
use crate::config::Configuration;
use crate::db::{Database, DbRef};
use crate::lattice::{Lattice, LatticeCompare};
use crate::sym::{PermuteGroup, Permutation, SymGroup, SymOp};

use sites::CellIndex;

/// Deduplicated store of canonical supercell lattices.
pub type ScelDatabase = Database<Lattice, LatticeCompare>;
/// Reference to a record in a `ScelDatabase`.
pub type ScelRef = DbRef;

#[derive(Debug, Clone)]
pub enum ScelError {
    /// Transformation matrix with non-positive determinant.
    NonPositiveVolume { det: i64 },
    /// Prim lattice whose cell volume is below `cfg.eps_det`.
    DegeneratePrim { volume: f64 },
    /// Basis site with no image under a point-group operation; the supplied
    /// group is not a symmetry of the prim.
    BasisMismatch { op_index: usize, sublat: usize },
}

impl fmt::Display for ScelError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NonPositiveVolume { det } => {
                write!(f, "supercell transformation has non-positive determinant {det}")
            }
            Self::DegeneratePrim { volume } => {
                write!(f, "prim lattice is degenerate (cell volume {volume:e})")
            }
            Self::BasisMismatch { op_index, sublat } => write!(
                f,
                "point-group op {op_index} maps basis site {sublat} onto no basis site"
            ),
        }
    }
}

impl std::error::Error for ScelError {}

/// Supercell of a primitive structure.
///
/// The prim is carried as its lattice, fractional basis positions, and point
/// group; the supercell lattice is `prim lattice × T` for an integer matrix
/// `T` with positive determinant. Sites are ordered sublattice-major:
/// `site = sublat * volume + cell`, with cell order fixed by `CellIndex`.
#[derive(Clone, Debug)]
pub struct Supercell {
    prim_lattice: Lattice,
    basis: Vec<Vector3<f64>>,
    point_group: SymGroup,
    transf: Matrix3<i64>,
    lattice: Lattice,
    cells: CellIndex,
    cfg: SymCfg,
    canonical: Option<ScelRef>,
}

impl Supercell {
    pub fn new(
        prim_lattice: Lattice,
        basis: Vec<Vector3<f64>>,
        point_group: SymGroup,
        transf: Matrix3<i64>,
        cfg: SymCfg,
    ) -> Result<Self, ScelError> {
        let prim_volume = prim_lattice.volume();
        if prim_volume.abs() <= cfg.eps_det {
            return Err(ScelError::DegeneratePrim {
                volume: prim_volume,
            });
        }
        let cells = CellIndex::new(transf).ok_or(ScelError::NonPositiveVolume {
            det: sites::det_i64(&transf),
        })?;
        let lattice = Lattice::new(prim_lattice.cols() * transf.map(|x| x as f64));
        Ok(Self {
            prim_lattice,
            basis,
            point_group,
            transf,
            lattice,
            cells,
            cfg,
            canonical: None,
        })
    }

    #[inline]
    pub fn lattice(&self) -> &Lattice {
        &self.lattice
    }

    #[inline]
    pub fn prim_lattice(&self) -> &Lattice {
        &self.prim_lattice
    }

    #[inline]
    pub fn point_group(&self) -> &SymGroup {
        &self.point_group
    }

    #[inline]
    pub fn transf(&self) -> &Matrix3<i64> {
        &self.transf
    }

    #[inline]
    pub fn volume(&self) -> usize {
        self.cells.volume()
    }

    #[inline]
    pub fn num_sites(&self) -> usize {
        self.basis.len() * self.volume()
    }

    fn lattice_compare(&self) -> LatticeCompare {
        LatticeCompare::new(self.cfg.tol)
    }

    /// True iff the supercell lattice is maximal under the parent point
    /// group.
    pub fn is_canonical(&self) -> bool {
        canon::is_canonical(&self.lattice, self.point_group.ops(), &self.lattice_compare())
    }

    /// The canonical lattice representation of this supercell.
    pub fn canonical_lattice(&self) -> Lattice {
        canon::canonical_form(&self.lattice, self.point_group.ops(), &self.lattice_compare())
    }

    /// Point-group op mapping this lattice to canonical form.
    /// `None` only for an empty point group.
    pub fn to_canonical(&self) -> Option<SymOp> {
        canon::to_canonical(&self.lattice, self.point_group.ops(), &self.lattice_compare())
    }

    /// Point-group op mapping the canonical lattice back to this one.
    /// `None` only for an empty point group.
    pub fn from_canonical(&self) -> Option<SymOp> {
        canon::from_canonical(&self.lattice, self.point_group.ops(), &self.lattice_compare())
    }

    /// True iff `self` and `other` share a canonical lattice under `self`'s
    /// parent point group.
    pub fn is_equivalent(&self, other: &Supercell) -> bool {
        canon::is_equivalent(
            &self.lattice,
            &other.lattice,
            self.point_group.ops(),
            &self.lattice_compare(),
        )
    }

    /// Resolve the canonical supercell record, inserting it on first use.
    ///
    /// First call computes the canonical lattice, insert-or-finds it in `db`,
    /// and caches the reference; later calls return the cache without
    /// touching `db`.
    pub fn canonical_or_insert(&mut self, db: &mut ScelDatabase) -> ScelRef {
        if let Some(r) = self.canonical {
            return r;
        }
        let (r, _inserted) = db.insert(self.canonical_lattice());
        self.canonical = Some(r);
        r
    }

    /// The cached canonical record, if `canonical_or_insert` has run.
    #[inline]
    pub fn canonical_ref(&self) -> Option<ScelRef> {
        self.canonical
    }

    /// Empty configuration (all sites occupation 0) for this supercell.
    pub fn default_configuration(&self) -> Configuration {
        Configuration::new(vec![0; self.num_sites()])
    }

    #[inline]
    fn site_index(&self, sublat: usize, cell: usize) -> usize {
        sublat * self.volume() + cell
    }

    /// Precompute the site permutation group: every compatible point-group
    /// operation combined with every supercell translation, translations
    /// innermost. Order is at most |point group| × volume.
    ///
    /// An operation is compatible when it is an integer map on the prim
    /// lattice, maps the superlattice onto itself, and permutes the basis
    /// (modulo prim translations) within `cfg.tol`.
    pub fn permute_group(&self) -> Result<PermuteGroup, ScelError> {
        let volume = self.volume();
        let n_sites = self.num_sites();
        let mut perms: Vec<Permutation> = Vec::new();

        for op in self.point_group.iter() {
            let Some(factor) = self.factor_site_map(op)? else {
                continue;
            };
            for t in 0..volume {
                let trans = self.cells.cells()[t];
                // full map: factor op, then translation by `trans`
                let mut map = vec![0usize; n_sites];
                for (site, &(b2, u2)) in factor.iter().enumerate() {
                    let cell2 = self.cells.index_of(u2 + trans);
                    let dest = self.site_index(b2, cell2);
                    // gather convention: map[dest] = source
                    map[dest] = site;
                }
                // bijectivity is guaranteed by construction
                perms.push(Permutation::new(map).unwrap_or_else(|| {
                    unreachable!("site map of a symmetry operation is a bijection")
                }));
            }
        }
        Ok(PermuteGroup::from_permutations(perms))
    }

    /// Image of every site under a single point-group op, as
    /// `(sublat', cell-point')` before translation. `Ok(None)` when the op is
    /// not a symmetry of this supercell; `Err` when it is an integer prim map
    /// that fails to permute the basis (an invalid point group).
    fn factor_site_map(
        &self,
        op: &SymOp,
    ) -> Result<Option<Vec<(usize, Vector3<i64>)>>, ScelError> {
        let tol = self.cfg.tol;
        // fractional action on prim coordinates
        let Some(prim_inv) = self.prim_lattice.cols().try_inverse() else {
            return Ok(None);
        };
        let rf = prim_inv * op.r * self.prim_lattice.cols();
        let rf_int = rf.map(|x| x.round() as i64);
        if (rf - rf_int.map(|x| x as f64)).abs().max() > tol {
            // not an integer map on the prim lattice
            return Ok(None);
        }
        // superlattice invariance: T⁻¹ · Rf · T integer, checked exactly via
        // the adjugate
        let m = sites::adjugate_i64(&self.transf) * rf_int * self.transf;
        let det = sites::det_i64(&self.transf);
        if m.iter().any(|&x| x.rem_euclid(det) != 0) {
            return Ok(None);
        }

        // basis permutation modulo prim translations
        let rf_f = rf_int.map(|x| x as f64);
        let mut basis_map: Vec<(usize, Vector3<i64>)> = Vec::with_capacity(self.basis.len());
        for (b, pos) in self.basis.iter().enumerate() {
            let image = rf_f * pos;
            let mut found = None;
            for (b2, pos2) in self.basis.iter().enumerate() {
                let d = image - pos2;
                let shift = d.map(|x| x.round() as i64);
                if (d - shift.map(|x| x as f64)).abs().max() <= tol {
                    found = Some((b2, shift));
                    break;
                }
            }
            let Some(hit) = found else {
                return Err(ScelError::BasisMismatch {
                    op_index: op.index,
                    sublat: b,
                });
            };
            basis_map.push(hit);
        }

        // per-site images at translation zero
        let volume = self.volume();
        let mut out = Vec::with_capacity(self.num_sites());
        for b in 0..self.basis.len() {
            let (b2, shift) = basis_map[b];
            for cell in 0..volume {
                let u = self.cells.cells()[cell];
                out.push((b2, rf_int * u + shift));
            }
        }
        Ok(Some(out))
    }
}

#[cfg(test)]
mod tests;
