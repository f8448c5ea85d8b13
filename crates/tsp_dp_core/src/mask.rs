use std::fmt;

use crate::{Error, Result, constants::{MAX_CITIES, ORIGIN}};

const _: () = assert!(MAX_CITIES <= VisitedSet::CAPACITY);

/// Rejects city counts outside `1..=MAX_CITIES` before anything is allocated.
pub fn ensure_city_count(count: usize) -> Result<()> {
    if count == 0 || count > MAX_CITIES {
        return Err(Error::invalid_city_count(count, MAX_CITIES));
    }
    Ok(())
}

/// Set of visited cities, bit `i` standing for city `i`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct VisitedSet(u32);

impl VisitedSet {
    /// Number of cities the bit pattern can represent.
    pub const CAPACITY: usize = u32::BITS as usize;

    pub const fn from_bits(bits: u32) -> Self {
        Self(bits)
    }

    /// The starting state: only the origin visited.
    pub const fn origin() -> Self {
        Self(1 << ORIGIN)
    }

    /// All of the first `n` cities visited.
    pub fn full(n: usize) -> Self {
        debug_assert!(n <= Self::CAPACITY, "n={n} exceeds mask capacity");
        match n {
            0 => Self(0),
            _ => Self(u32::MAX >> (Self::CAPACITY - n)),
        }
    }

    pub const fn bits(self) -> u32 {
        self.0
    }

    /// Row of this mask in a memo table.
    pub const fn index(self) -> usize {
        self.0 as usize
    }

    pub const fn contains(self, city: usize) -> bool {
        self.0 & (1 << city) != 0
    }

    #[must_use]
    pub const fn with(self, city: usize) -> Self {
        Self(self.0 | (1 << city))
    }

    pub const fn len(self) -> usize {
        self.0.count_ones() as usize
    }

    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }

    pub fn is_complete(self, n: usize) -> bool {
        self == Self::full(n)
    }

    pub fn visited(self, n: usize) -> impl Iterator<Item = usize> {
        (0..n).filter(move |&city| self.contains(city))
    }

    pub fn unvisited(self, n: usize) -> impl Iterator<Item = usize> {
        (0..n).filter(move |&city| !self.contains(city))
    }
}

impl fmt::Display for VisitedSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:#b}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::{VisitedSet, ensure_city_count};
    use crate::{Error, constants::MAX_CITIES};

    #[test]
    fn origin_contains_only_city_zero() {
        let mask = VisitedSet::origin();
        assert!(mask.contains(0));
        assert_eq!(mask.len(), 1);
        assert_eq!(mask.unvisited(4).collect::<Vec<_>>(), vec![1, 2, 3]);
    }

    #[test]
    fn with_sets_exactly_one_bit() {
        let mask = VisitedSet::origin().with(3);
        assert_eq!(mask.bits(), 0b1001);
        assert_eq!(mask.visited(5).collect::<Vec<_>>(), vec![0, 3]);
        assert_eq!(mask.with(3), mask);
    }

    #[test]
    fn full_sets_low_bits() {
        assert!(VisitedSet::full(0).is_empty());
        assert_eq!(VisitedSet::full(1), VisitedSet::origin());
        assert_eq!(VisitedSet::full(4).bits(), 0b1111);
        assert!(VisitedSet::from_bits(0b111).is_complete(3));
        assert!(!VisitedSet::from_bits(0b101).is_complete(3));
    }

    #[test]
    fn full_at_max_capacity_does_not_overflow() {
        let full = VisitedSet::full(MAX_CITIES);
        assert_eq!(full.len(), MAX_CITIES);
        assert_eq!(full.index() + 1, 1 << MAX_CITIES);
        assert_eq!(VisitedSet::full(VisitedSet::CAPACITY).bits(), u32::MAX);
    }

    #[test]
    fn ensure_city_count_accepts_bounds_and_rejects_outside() {
        ensure_city_count(1).expect("single city is valid");
        ensure_city_count(MAX_CITIES).expect("capacity is valid");

        let err = ensure_city_count(MAX_CITIES + 1).expect_err("capacity + 1 must fail");
        assert!(matches!(err, Error::InvalidCityCount { count, .. } if count == MAX_CITIES + 1));

        let err = ensure_city_count(0).expect_err("zero cities must fail");
        assert!(matches!(err, Error::InvalidCityCount { count: 0, .. }));
    }

    #[test]
    fn display_renders_binary() {
        assert_eq!(VisitedSet::from_bits(0b101).to_string(), "0b101");
    }
}
