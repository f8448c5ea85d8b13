use crate::{Cost, VisitedSet};

/// Marks a memo entry that has not been computed yet.
pub const UNSET: Cost = Cost::MAX;

/// Completion costs keyed by `(visited set, current city)`, stored flat as
/// `mask * n + city`. Entries are written at most once between resets.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MemoTable {
    cities: usize,
    entries: Vec<Cost>,
}

impl MemoTable {
    pub fn new(cities: usize) -> Self {
        Self {
            cities,
            entries: vec![UNSET; (1usize << cities) * cities],
        }
    }

    pub fn cities(&self) -> usize {
        self.cities
    }

    #[inline]
    fn slot(&self, mask: VisitedSet, city: usize) -> usize {
        debug_assert!(city < self.cities, "city={city} out of range");
        mask.index() * self.cities + city
    }

    #[inline]
    pub fn get(&self, mask: VisitedSet, city: usize) -> Option<Cost> {
        let cost = self.entries[self.slot(mask, city)];
        (cost != UNSET).then_some(cost)
    }

    #[inline]
    pub fn set(&mut self, mask: VisitedSet, city: usize, cost: Cost) {
        let slot = self.slot(mask, city);
        debug_assert_eq!(
            self.entries[slot], UNSET,
            "memo entry mask={mask} city={city} written twice"
        );
        debug_assert_ne!(cost, UNSET, "sentinel stored as a cost");
        self.entries[slot] = cost;
    }

    pub fn reset(&mut self) {
        self.entries.fill(UNSET);
    }

    /// Number of computed entries.
    pub fn populated(&self) -> usize {
        self.entries.iter().filter(|&&cost| cost != UNSET).count()
    }

    pub fn iter_populated(&self) -> impl Iterator<Item = (VisitedSet, usize, Cost)> + '_ {
        let cities = self.cities;
        self.entries
            .iter()
            .enumerate()
            .filter(|&(_, &cost)| cost != UNSET)
            .map(move |(slot, &cost)| {
                (
                    VisitedSet::from_bits((slot / cities) as u32),
                    slot % cities,
                    cost,
                )
            })
    }
}

#[cfg(test)]
mod tests {
    use super::{MemoTable, UNSET};
    use crate::VisitedSet;

    #[test]
    fn new_table_is_sized_for_every_mask_and_city() {
        let memo = MemoTable::new(3);
        assert_eq!(memo.entries.len(), 8 * 3);
        assert!(memo.entries.iter().all(|&cost| cost == UNSET));
        assert_eq!(memo.populated(), 0);
    }

    #[test]
    fn set_then_get_returns_value() {
        let mut memo = MemoTable::new(3);
        let mask = VisitedSet::origin().with(2);
        assert_eq!(memo.get(mask, 2), None);

        memo.set(mask, 2, 0);
        assert_eq!(memo.get(mask, 2), Some(0));
        assert_eq!(memo.get(mask, 1), None);
    }

    #[test]
    fn reset_clears_all_entries() {
        let mut memo = MemoTable::new(2);
        memo.set(VisitedSet::origin(), 0, 7);
        assert_eq!(memo.populated(), 1);

        memo.reset();
        assert_eq!(memo.populated(), 0);
        assert_eq!(memo.get(VisitedSet::origin(), 0), None);
    }

    #[test]
    fn iter_populated_decodes_slots() {
        let mut memo = MemoTable::new(4);
        memo.set(VisitedSet::from_bits(0b0101), 2, 11);
        memo.set(VisitedSet::origin(), 0, 4);

        let entries: Vec<_> = memo.iter_populated().collect();
        assert_eq!(
            entries,
            vec![
                (VisitedSet::origin(), 0, 4),
                (VisitedSet::from_bits(0b0101), 2, 11),
            ]
        );
    }

    #[test]
    #[cfg(debug_assertions)]
    #[should_panic(expected = "written twice")]
    fn second_write_panics_in_debug() {
        let mut memo = MemoTable::new(2);
        memo.set(VisitedSet::origin(), 0, 1);
        memo.set(VisitedSet::origin(), 0, 1);
    }
}
