use crate::{Cost, VisitedSet, memo::UNSET};

use super::TspSolver;

impl TspSolver<'_> {
    /// Top-down Held-Karp: each `(mask, city)` completion is computed once and then
    /// served from the memo table.
    pub(super) fn cost_from_recursive(&mut self, mask: VisitedSet, city: usize) -> Cost {
        let n = self.matrix.len();
        if mask.is_complete(n) {
            return self.return_cost(city);
        }
        if let Some(cost) = self.memo.get(mask, city) {
            return cost;
        }

        let mut best = UNSET;
        for next in mask.unvisited(n) {
            let candidate =
                self.matrix.get(city, next) + self.cost_from_recursive(mask.with(next), next);
            best = best.min(candidate);
        }

        self.memo.set(mask, city, best);
        best
    }
}
