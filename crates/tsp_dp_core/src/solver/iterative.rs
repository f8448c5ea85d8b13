use crate::{Cost, VisitedSet, constants::ORIGIN, memo::UNSET};

use super::TspSolver;

impl TspSolver<'_> {
    /// Bottom-up Held-Karp over the same table. A superset mask always has a larger bit
    /// pattern than its subsets, so walking masks in descending order fills every
    /// successor state before it is read.
    pub(super) fn fill_iterative(&mut self) -> Cost {
        let n = self.matrix.len();
        let origin = VisitedSet::origin();
        if origin.is_complete(n) {
            return self.return_cost(ORIGIN);
        }

        let full = VisitedSet::full(n);
        for bits in (0..full.bits()).rev() {
            let mask = VisitedSet::from_bits(bits);
            if !mask.contains(ORIGIN) {
                continue;
            }

            for city in mask.visited(n) {
                if city == ORIGIN && mask != origin {
                    continue;
                }

                let best = mask
                    .unvisited(n)
                    .filter_map(|next| {
                        self.completion(mask.with(next), next)
                            .map(|rest| self.matrix.get(city, next) + rest)
                    })
                    .min()
                    .unwrap_or(UNSET);
                self.memo.set(mask, city, best);
            }
        }

        self.memo.get(origin, ORIGIN).unwrap_or(UNSET)
    }
}

#[cfg(test)]
mod tests {
    use crate::{DistanceMatrix, Strategy, TspSolver};

    #[test]
    fn fills_the_same_table_as_recursion() {
        let matrix = DistanceMatrix::random_seeded(7, 1..=50, 3).expect("valid matrix");

        let mut recursive = TspSolver::new(&matrix)
            .expect("solver")
            .with_strategy(Strategy::Recursive);
        let mut iterative = TspSolver::new(&matrix)
            .expect("solver")
            .with_strategy(Strategy::Iterative);

        assert_eq!(recursive.solve(), iterative.solve());
        assert_eq!(recursive.memo(), iterative.memo());
    }

    #[test]
    fn single_city_needs_no_table() {
        let matrix = DistanceMatrix::uniform(1, 0).expect("valid matrix");
        let mut solver = TspSolver::new(&matrix)
            .expect("solver")
            .with_strategy(Strategy::Iterative);

        assert_eq!(solver.solve(), 0);
        assert_eq!(solver.memo().populated(), 0);
    }
}
