//! Exact TSP over a small complete graph by bitmask dynamic programming (Held-Karp).
//!
//! [`TspSolver`] owns the memo table for one distance matrix and answers
//! "cheapest way to finish the tour from `city` having visited `mask`". The
//! answer for the whole instance is the completion cost from the origin.

mod iterative;
mod recursive;

use crate::{
    Cost, DistanceMatrix, Error, Result, Tour, VisitedSet,
    constants::ORIGIN,
    mask::ensure_city_count,
    memo::{MemoTable, UNSET},
    options::Strategy,
};

const ERR_BROKEN_MEMO: &str = "memo table does not describe an optimal tour";

/// Solver context for one distance matrix. Reusable: every [`TspSolver::solve`]
/// starts from a cleared memo table.
#[derive(Debug)]
pub struct TspSolver<'a> {
    matrix: &'a DistanceMatrix,
    memo: MemoTable,
    strategy: Strategy,
}

impl<'a> TspSolver<'a> {
    pub fn new(matrix: &'a DistanceMatrix) -> Result<Self> {
        ensure_city_count(matrix.len())?;
        Ok(Self {
            matrix,
            memo: MemoTable::new(matrix.len()),
            strategy: Strategy::default(),
        })
    }

    #[must_use]
    pub fn with_strategy(mut self, strategy: Strategy) -> Self {
        self.strategy = strategy;
        self
    }

    pub fn strategy(&self) -> Strategy {
        self.strategy
    }

    pub fn matrix(&self) -> &'a DistanceMatrix {
        self.matrix
    }

    pub fn memo(&self) -> &MemoTable {
        &self.memo
    }

    /// Minimum closed-tour cost starting and ending at the origin.
    pub fn solve(&mut self) -> Cost {
        self.memo.reset();
        let cost = match self.strategy {
            Strategy::Recursive => self.cost_from_recursive(VisitedSet::origin(), ORIGIN),
            Strategy::Iterative => self.fill_iterative(),
        };
        log::debug!(
            "solver: done n={} strategy={} cost={cost} states={}",
            self.matrix.len(),
            self.strategy,
            self.memo.populated()
        );
        cost
    }

    /// Solves and rebuilds one optimal tour from the memo table.
    pub fn solve_tour(&mut self) -> Result<Tour> {
        let cost = self.solve();
        let cities = self.reconstruct()?;
        Ok(Tour::new(cities, cost))
    }

    /// Cheapest way to visit every city outside `mask` and return to the origin,
    /// standing at `city`. `mask` must contain the origin and `city`, and no city
    /// outside the matrix.
    pub fn cost_from(&mut self, mask: VisitedSet, city: usize) -> Result<Cost> {
        self.check_state(mask, city)?;
        Ok(self.cost_from_recursive(mask, city))
    }

    fn check_state(&self, mask: VisitedSet, city: usize) -> Result<()> {
        let n = self.matrix.len();
        if city >= n {
            return Err(Error::invalid_input(format!(
                "city {city} is out of range for {n} cities"
            )));
        }
        if mask.bits() & !VisitedSet::full(n).bits() != 0 {
            return Err(Error::invalid_input(format!(
                "mask {mask} names cities outside 0..{n}"
            )));
        }
        if !mask.contains(ORIGIN) {
            return Err(Error::invalid_input(format!(
                "mask {mask} does not contain the origin"
            )));
        }
        if !mask.contains(city) {
            return Err(Error::invalid_input(format!(
                "mask {mask} does not contain the current city {city}"
            )));
        }
        Ok(())
    }

    fn return_cost(&self, city: usize) -> Cost {
        self.matrix.get(city, ORIGIN)
    }

    /// Known completion cost of a state: the closing edge for a full mask, the memo
    /// entry otherwise.
    fn completion(&self, mask: VisitedSet, city: usize) -> Option<Cost> {
        if mask.is_complete(self.matrix.len()) {
            Some(self.return_cost(city))
        } else {
            self.memo.get(mask, city)
        }
    }

    /// Walks the populated table from the origin, taking at each step the lowest-index
    /// successor that realises the stored optimum.
    fn reconstruct(&self) -> Result<Vec<usize>> {
        let n = self.matrix.len();
        let mut cities = Vec::with_capacity(n + 1);
        let mut mask = VisitedSet::origin();
        let mut city = ORIGIN;
        cities.push(ORIGIN);

        while !mask.is_complete(n) {
            let target = self
                .completion(mask, city)
                .ok_or_else(|| Error::other(ERR_BROKEN_MEMO))?;
            let next = mask
                .unvisited(n)
                .find(|&next| {
                    self.completion(mask.with(next), next)
                        .is_some_and(|rest| self.matrix.get(city, next) + rest == target)
                })
                .ok_or_else(|| Error::other(ERR_BROKEN_MEMO))?;

            log::trace!("solver.reconstruct: mask={mask} city={city} next={next}");
            cities.push(next);
            mask = mask.with(next);
            city = next;
        }

        cities.push(ORIGIN);
        Ok(cities)
    }
}

/// Solves one instance with the chosen strategy and returns an optimal tour.
#[tsp_dp_derive::timer("solver")]
pub fn solve_tsp(matrix: &DistanceMatrix, strategy: Strategy) -> Result<Tour> {
    log::info!("solver: start n={} strategy={strategy}", matrix.len());

    let mut solver = TspSolver::new(matrix)?.with_strategy(strategy);
    let tour = solver.solve_tour()?;

    if tour.cost == UNSET {
        return Err(Error::other(ERR_BROKEN_MEMO));
    }
    log::info!("solver: complete cost={} tour={tour}", tour.cost);
    Ok(tour)
}
