#![forbid(unsafe_code)]

use std::fmt;
use std::ops::{BitAnd, BitOr};

use crate::IrError;

/// A set of integers stored as sorted, disjoint half-open ranges `[low, high)`.
///
/// Every constructor normalizes: pieces are sorted by `low`, and any two
/// pieces that overlap or touch are merged. Two sets holding the same integers
/// therefore compare equal regardless of how they were built. Operations never
/// mutate in place; each returns a new set.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct IntervalSet {
    elems: Vec<(i128, i128)>,
}

impl IntervalSet {
    /// Build a set from `(low, high)` pairs, rejecting any pair with `low >= high`.
    pub fn new(pairs: impl IntoIterator<Item = (i128, i128)>) -> Result<Self, IrError> {
        let mut elems = Vec::new();
        for (low, high) in pairs {
            if low >= high {
                return Err(IrError::InvalidInterval { low, high });
            }
            elems.push((low, high));
        }
        Ok(Self::normalize(elems))
    }

    pub fn empty() -> Self {
        Self { elems: Vec::new() }
    }

    /// `[low, high)`, or the empty set when `low >= high`.
    pub fn range(low: i128, high: i128) -> Self {
        if low >= high {
            Self::empty()
        } else {
            Self {
                elems: vec![(low, high)],
            }
        }
    }

    pub fn singleton(value: i128) -> Self {
        Self::range(value, value.saturating_add(1))
    }

    fn normalize(mut elems: Vec<(i128, i128)>) -> Self {
        elems.sort_by_key(|&(low, _)| low);
        let mut out: Vec<(i128, i128)> = Vec::with_capacity(elems.len());
        for (low, high) in elems {
            match out.last_mut() {
                Some(last) if last.1 >= low => last.1 = last.1.max(high),
                _ => out.push((low, high)),
            }
        }
        Self { elems: out }
    }

    pub fn union(&self, other: &IntervalSet) -> IntervalSet {
        let mut elems = self.elems.clone();
        elems.extend_from_slice(&other.elems);
        Self::normalize(elems)
    }

    pub fn intersection(&self, other: &IntervalSet) -> IntervalSet {
        let (a, b) = (&self.elems, &other.elems);
        let (mut i, mut j) = (0, 0);
        let mut out = Vec::new();
        while i < a.len() && j < b.len() {
            let low = a[i].0.max(b[j].0);
            let high = a[i].1.min(b[j].1);
            if low < high {
                out.push((low, high));
            }
            // Advance whichever piece ends first; the other may still overlap.
            if a[i].1 <= b[j].1 {
                i += 1;
            } else {
                j += 1;
            }
        }
        Self::normalize(out)
    }

    pub fn is_empty(&self) -> bool {
        self.elems.is_empty()
    }

    /// True for the empty set and for a single unbroken range.
    pub fn is_contiguous(&self) -> bool {
        self.elems.len() <= 1
    }

    /// Smallest member, if any.
    pub fn low(&self) -> Option<i128> {
        self.elems.first().map(|&(low, _)| low)
    }

    /// Exclusive upper bound of the largest piece, if any.
    pub fn high(&self) -> Option<i128> {
        self.elems.last().map(|&(_, high)| high)
    }

    pub fn contains(&self, value: i128) -> bool {
        self.elems
            .iter()
            .any(|&(low, high)| low <= value && value < high)
    }

    pub fn is_subset(&self, other: &IntervalSet) -> bool {
        &self.intersection(other) == self
    }

    pub fn elems(&self) -> &[(i128, i128)] {
        &self.elems
    }
}

impl BitOr for &IntervalSet {
    type Output = IntervalSet;

    fn bitor(self, rhs: &IntervalSet) -> IntervalSet {
        self.union(rhs)
    }
}

impl BitAnd for &IntervalSet {
    type Output = IntervalSet;

    fn bitand(self, rhs: &IntervalSet) -> IntervalSet {
        self.intersection(rhs)
    }
}

impl fmt::Display for IntervalSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.elems.is_empty() {
            return f.write_str("{}");
        }
        for (i, (low, high)) in self.elems.iter().enumerate() {
            if i > 0 {
                f.write_str(" | ")?;
            }
            write!(f, "[{low}, {high})")?;
        }
        Ok(())
    }
}
