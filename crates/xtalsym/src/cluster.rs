//! Clusters of sites: finite point sets canonicalized under a symmetry
//! group.
//!
//! A cluster is stored with its sites in sorted order so that site order
//! never distinguishes two clusters; applying a symmetry operation maps every
//! site and re-sorts. Sorting uses tolerance-quantized coordinates (exact
//! values only break ties), so two clusters whose coordinates differ by
//! sub-tolerance noise sort identically and the comparator sees them in the
//! same site order. Comparison is lexicographic over the sorted cartesian
//! coordinates within a tolerance.

use nalgebra::Vector3;

use crate::canon::GroupAction;
use crate::compare::{flt_eq, flt_lt, SymCompare};
use crate::sym::SymOp;

/// Finite set of cartesian site positions, kept sorted under the cluster's
/// own tolerance. Pair with a `ClusterCompare` of the same tolerance.
#[derive(Clone, Debug)]
pub struct Cluster {
    sites: Vec<Vector3<f64>>,
    tol: f64,
}

impl Cluster {
    /// `tol` must be positive and should match the comparator's tolerance.
    pub fn new(mut sites: Vec<Vector3<f64>>, tol: f64) -> Self {
        sort_sites(&mut sites, tol);
        Self { sites, tol }
    }

    #[inline]
    pub fn sites(&self) -> &[Vector3<f64>] {
        &self.sites
    }

    #[inline]
    pub fn tol(&self) -> f64 {
        self.tol
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.sites.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.sites.is_empty()
    }

    /// Flattened coordinates in site order, for lexicographic comparison.
    fn flat(&self) -> Vec<f64> {
        self.sites.iter().flat_map(|s| [s.x, s.y, s.z]).collect()
    }
}

#[inline]
fn quantize(s: &Vector3<f64>, tol: f64) -> [i64; 3] {
    [
        (s.x / tol).round() as i64,
        (s.y / tol).round() as i64,
        (s.z / tol).round() as i64,
    ]
}

/// Sort by tolerance-quantized coordinates, exact coordinates as tie-break.
/// Quantizing first keeps the order stable under sub-tolerance noise, so
/// clusters equal under `ClusterCompare` always sort the same way.
fn sort_sites(sites: &mut [Vector3<f64>], tol: f64) {
    sites.sort_by(|a, b| {
        quantize(a, tol).cmp(&quantize(b, tol)).then_with(|| {
            [a.x, a.y, a.z]
                .partial_cmp(&[b.x, b.y, b.z])
                .unwrap_or(std::cmp::Ordering::Equal)
        })
    });
}

impl GroupAction<Cluster> for SymOp {
    fn act_on(&self, obj: &Cluster) -> Cluster {
        Cluster::new(
            obj.sites.iter().map(|&s| self.apply_vec(s)).collect(),
            obj.tol,
        )
    }

    fn inverse_op(&self) -> Self {
        self.inverse()
    }
}

/// Lexicographic comparison of sorted site lists within `tol`. Clusters of
/// different sizes order by size first; a group action never changes size,
/// so mixed sizes only arise when comparing unrelated clusters.
#[derive(Clone, Copy, Debug)]
pub struct ClusterCompare {
    pub tol: f64,
}

impl ClusterCompare {
    pub fn new(tol: f64) -> Self {
        Self { tol }
    }
}

impl SymCompare<Cluster> for ClusterCompare {
    fn equal(&self, a: &Cluster, b: &Cluster) -> bool {
        a.len() == b.len()
            && a.flat()
                .iter()
                .zip(b.flat().iter())
                .all(|(&x, &y)| flt_eq(x, y, self.tol))
    }

    fn less(&self, a: &Cluster, b: &Cluster) -> bool {
        if a.len() != b.len() {
            return a.len() < b.len();
        }
        for (&x, &y) in a.flat().iter().zip(b.flat().iter()) {
            if flt_lt(x, y, self.tol) {
                return true;
            }
            if flt_lt(y, x, self.tol) {
                return false;
            }
        }
        false
    }
}
