//! Orbit generation: streaming best-so-far scan and materialized orbits.

use super::GroupAction;
use crate::compare::SymCompare;

/// Streaming scan over an element range that tracks the maximal transformed
/// copy and which element produced it.
///
/// The scan is a plain linear walk: `less` is not assumed to correlate with
/// any group structure, so no element can be skipped. Cost is O(|range|)
/// applications of `act_on`.
///
/// Scoped to one query: build, call `generate` once, read `to_canonical`.
pub struct CanonicalGenerator<'a, E, C> {
    range: &'a [E],
    cmp: &'a C,
    best: Option<usize>,
}

impl<'a, E, C> CanonicalGenerator<'a, E, C> {
    pub fn new(range: &'a [E], cmp: &'a C) -> Self {
        Self {
            range,
            cmp,
            best: None,
        }
    }

    /// Scan the whole range and return the maximal image of `seed`.
    ///
    /// The running best starts from the first element's image and is replaced
    /// only on strict `less`, so the first maximum in range order wins and
    /// repeated runs pick the identical element. For an empty range the seed
    /// is returned unchanged (precondition violation; see `canon` docs).
    pub fn generate<T>(&mut self, seed: &T) -> T
    where
        T: Clone,
        E: GroupAction<T>,
        C: SymCompare<T>,
    {
        let mut best: Option<(usize, T)> = None;
        for (i, g) in self.range.iter().enumerate() {
            let image = g.act_on(seed);
            match &best {
                Some((_, cur)) if !self.cmp.less(cur, &image) => {}
                _ => best = Some((i, image)),
            }
        }
        match best {
            Some((i, image)) => {
                self.best = Some(i);
                image
            }
            None => seed.clone(),
        }
    }

    /// The element that produced the maximum in the last `generate` call.
    /// `None` before `generate` or for an empty range.
    #[inline]
    pub fn to_canonical(&self) -> Option<&E> {
        self.best.and_then(|i| self.range.get(i))
    }

    /// Inverse of `to_canonical`, mapping the canonical form back to the seed.
    #[inline]
    pub fn from_canonical<T>(&self) -> Option<E>
    where
        E: GroupAction<T>,
    {
        self.to_canonical().map(|g| g.inverse_op())
    }
}

/// Materialized equivalence class of a seed under an element range,
/// deduplicated by the comparator and sorted descending, so element 0 is the
/// canonical representative.
///
/// Constructed per query and discarded after use; prefer
/// `CanonicalGenerator` when only the canonical element is needed.
#[derive(Clone, Debug)]
pub struct Orbit<T> {
    elements: Vec<T>,
}

impl<T: Clone> Orbit<T> {
    pub fn generate<E, C>(seed: &T, range: &[E], cmp: &C) -> Self
    where
        E: GroupAction<T>,
        C: SymCompare<T>,
    {
        let mut elements: Vec<T> = Vec::new();
        for g in range {
            let image = g.act_on(seed);
            if !elements.iter().any(|e| cmp.equal(e, &image)) {
                elements.push(image);
            }
        }
        elements.sort_by(|a, b| {
            if cmp.less(b, a) {
                std::cmp::Ordering::Less
            } else if cmp.less(a, b) {
                std::cmp::Ordering::Greater
            } else {
                std::cmp::Ordering::Equal
            }
        });
        Self { elements }
    }

    /// The canonical representative. `None` only for an empty range.
    #[inline]
    pub fn prototype(&self) -> Option<&T> {
        self.elements.first()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.elements.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    #[inline]
    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.elements.iter()
    }

    pub fn contains<C: SymCompare<T>>(&self, obj: &T, cmp: &C) -> bool {
        self.elements.iter().any(|e| cmp.equal(e, obj))
    }
}
