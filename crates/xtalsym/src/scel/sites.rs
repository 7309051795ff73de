//! Integer lattice-point indexing for a supercell.
//!
//! A supercell with transformation matrix `T` tiles the prim lattice; its
//! distinct unit cells are the residue classes of Z³ modulo `T·Z³`. All
//! arithmetic here is exact integer arithmetic via the adjugate
//! (`T · adj(T) = det(T) · I`), so cell identification never depends on a
//! tolerance.

use std::collections::HashMap;

use nalgebra::{Matrix3, Vector3};

pub(crate) fn det_i64(m: &Matrix3<i64>) -> i64 {
    m[(0, 0)] * (m[(1, 1)] * m[(2, 2)] - m[(1, 2)] * m[(2, 1)])
        - m[(0, 1)] * (m[(1, 0)] * m[(2, 2)] - m[(1, 2)] * m[(2, 0)])
        + m[(0, 2)] * (m[(1, 0)] * m[(2, 1)] - m[(1, 1)] * m[(2, 0)])
}

pub(crate) fn adjugate_i64(m: &Matrix3<i64>) -> Matrix3<i64> {
    let c = |r1: usize, c1: usize, r2: usize, c2: usize| {
        m[(r1, c1)] * m[(r2, c2)] - m[(r1, c2)] * m[(r2, c1)]
    };
    // adj = cofactor matrix transposed
    Matrix3::new(
        c(1, 1, 2, 2),
        -c(0, 1, 2, 2),
        c(0, 1, 1, 2),
        -c(1, 0, 2, 2),
        c(0, 0, 2, 2),
        -c(0, 0, 1, 2),
        c(1, 0, 2, 1),
        -c(0, 0, 2, 1),
        c(0, 0, 1, 1),
    )
}

#[inline]
fn rem_euclid_vec(v: Vector3<i64>, d: i64) -> Vector3<i64> {
    Vector3::new(
        v.x.rem_euclid(d),
        v.y.rem_euclid(d),
        v.z.rem_euclid(d),
    )
}

/// Residue-class index for Z³ mod `T·Z³`.
///
/// Cell 0 is always the class of the origin; the remaining representatives
/// follow in a fixed lexicographic order, giving every supercell a
/// deterministic site ordering.
#[derive(Clone, Debug)]
pub(crate) struct CellIndex {
    det: i64,
    transf: Matrix3<i64>,
    adj: Matrix3<i64>,
    cells: Vec<Vector3<i64>>,
    index: HashMap<(i64, i64, i64), usize>,
}

impl CellIndex {
    /// `None` if `det(T) <= 0`.
    pub fn new(transf: Matrix3<i64>) -> Option<Self> {
        let det = det_i64(&transf);
        if det <= 0 {
            return None;
        }
        let adj = adjugate_i64(&transf);
        let mut ci = Self {
            det,
            transf,
            adj,
            cells: Vec::new(),
            index: HashMap::new(),
        };
        ci.enumerate_cells();
        Some(ci)
    }

    /// Unique representative of `x` modulo the superlattice:
    /// `rep(x) = x - T·k` with `adj(T)·rep(x)` componentwise in `[0, det)`.
    pub fn rep(&self, x: Vector3<i64>) -> Vector3<i64> {
        let w = self.adj * x;
        let w_mod = rem_euclid_vec(w, self.det);
        let k = (w - w_mod) / self.det;
        x - self.transf * k
    }

    fn enumerate_cells(&mut self) {
        // Integer points of the half-open cell T·[0,1)³ all lie inside the
        // bounding box of the eight corners of T·[0,1]³, and every residue
        // class has a representative there.
        let cols = [
            self.transf.column(0).into_owned(),
            self.transf.column(1).into_owned(),
            self.transf.column(2).into_owned(),
        ];
        let mut lo = Vector3::<i64>::zeros();
        let mut hi = Vector3::<i64>::zeros();
        for mask in 0u8..8 {
            let mut corner = Vector3::<i64>::zeros();
            for (b, col) in cols.iter().enumerate() {
                if mask & (1 << b) != 0 {
                    corner += col;
                }
            }
            for i in 0..3 {
                lo[i] = lo[i].min(corner[i]);
                hi[i] = hi[i].max(corner[i]);
            }
        }
        let volume = self.det as usize;
        let mut seen: std::collections::BTreeSet<(i64, i64, i64)> = std::collections::BTreeSet::new();
        'outer: for x in lo.x..=hi.x {
            for y in lo.y..=hi.y {
                for z in lo.z..=hi.z {
                    let r = self.rep(Vector3::new(x, y, z));
                    seen.insert((r.x, r.y, r.z));
                    if seen.len() == volume {
                        break 'outer;
                    }
                }
            }
        }
        debug_assert_eq!(seen.len(), volume);
        // origin class first, rest in sorted order
        let zero = (0i64, 0, 0);
        self.cells.push(Vector3::zeros());
        for &(x, y, z) in seen.iter().filter(|&&c| c != zero) {
            self.cells.push(Vector3::new(x, y, z));
        }
        for (i, c) in self.cells.iter().enumerate() {
            self.index.insert((c.x, c.y, c.z), i);
        }
    }

    #[inline]
    pub fn volume(&self) -> usize {
        self.det as usize
    }

    #[inline]
    pub fn cells(&self) -> &[Vector3<i64>] {
        &self.cells
    }

    /// Cell index of an arbitrary lattice point (reduced internally).
    pub fn index_of(&self, x: Vector3<i64>) -> usize {
        let r = self.rep(x);
        self.index[&(r.x, r.y, r.z)]
    }
}
