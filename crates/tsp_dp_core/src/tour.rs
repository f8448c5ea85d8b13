use std::fmt;

use tsp_dp_derive::New;

use crate::{Cost, DistanceMatrix, constants::ORIGIN};

/// Closed tour: `cities` starts and ends at the origin.
#[derive(Clone, Debug, Default, PartialEq, Eq, New)]
pub struct Tour {
    pub cities: Vec<usize>,
    pub cost: Cost,
}

impl Tour {
    /// Number of edges travelled.
    pub fn edges(&self) -> usize {
        self.cities.len().saturating_sub(1)
    }

    /// Sum of edge costs along the tour in `matrix`.
    pub fn cost_in(&self, matrix: &DistanceMatrix) -> Cost {
        self.cities
            .windows(2)
            .map(|pair| matrix.get(pair[0], pair[1]))
            .sum()
    }

    /// Starts and ends at the origin and visits each of the `n` cities exactly once.
    pub fn is_hamiltonian(&self, n: usize) -> bool {
        let Some((&last, body)) = self.cities.split_last() else {
            return false;
        };
        if last != ORIGIN || body.len() != n || body.first() != Some(&ORIGIN) {
            return false;
        }

        let mut seen = vec![false; n];
        body.iter()
            .all(|&city| city < n && !std::mem::replace(&mut seen[city], true))
    }

    pub fn tour_metrics(&self, matrix: &DistanceMatrix) -> TourMetrics {
        // [0, 0] is the single-city tour: one self-loop, nothing to report
        if self.cities.len() <= 2 {
            log::info!("metrics: n < 2 so there's nothing to report");
            return TourMetrics::default();
        }
        let edges = self.edges();

        let costs: Vec<Cost> = self
            .cities
            .windows(2)
            .map(|pair| matrix.get(pair[0], pair[1]))
            .collect();
        let total: Cost = costs.iter().sum();
        let longest = costs.iter().copied().max().unwrap_or(0);
        let average = total as f64 / edges as f64;

        log::info!("metrics: edges={edges} total={total} longest={longest} avg={average:.2}");

        TourMetrics::new(edges, total, longest, average)
    }
}

impl fmt::Display for Tour {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let path = self
            .cities
            .iter()
            .map(usize::to_string)
            .collect::<Vec<_>>()
            .join(" -> ");
        f.write_str(&path)
    }
}

#[derive(Debug, Default, PartialEq, New)]
pub struct TourMetrics {
    pub edges: usize,
    pub total: Cost,
    pub longest: Cost,
    pub average: f64,
}

#[cfg(test)]
mod tests {
    use super::{Tour, TourMetrics};
    use crate::matrix::square;

    #[test]
    fn cost_in_sums_directed_edges() {
        let matrix = square([[0, 1, 10], [10, 0, 1], [1, 10, 0]]);
        assert_eq!(Tour::new(vec![0, 1, 2, 0], 3).cost_in(&matrix), 3);
        assert_eq!(Tour::new(vec![0, 2, 1, 0], 30).cost_in(&matrix), 30);
    }

    #[test]
    fn is_hamiltonian_accepts_closed_permutations() {
        assert!(Tour::new(vec![0, 0], 0).is_hamiltonian(1));
        assert!(Tour::new(vec![0, 2, 1, 3, 0], 0).is_hamiltonian(4));
    }

    #[test]
    fn is_hamiltonian_rejects_broken_tours() {
        assert!(!Tour::default().is_hamiltonian(1));
        assert!(!Tour::new(vec![0, 1, 2], 0).is_hamiltonian(3));
        assert!(!Tour::new(vec![1, 0, 2, 1], 0).is_hamiltonian(3));
        assert!(!Tour::new(vec![0, 1, 1, 0], 0).is_hamiltonian(3));
        assert!(!Tour::new(vec![0, 1, 3, 0], 0).is_hamiltonian(3));
    }

    #[test]
    fn display_joins_cities_with_arrows() {
        assert_eq!(Tour::new(vec![0, 2, 1, 0], 6).to_string(), "0 -> 2 -> 1 -> 0");
    }

    #[test]
    fn tour_metrics_reports_total_longest_and_average() {
        let matrix = square([[0, 1, 2], [1, 0, 3], [2, 3, 0]]);
        let metrics = Tour::new(vec![0, 1, 2, 0], 6).tour_metrics(&matrix);
        assert_eq!(metrics, TourMetrics::new(3, 6, 3, 2.0));
    }

    #[test]
    fn tour_metrics_counts_both_edges_of_a_two_city_tour() {
        let matrix = square([[0, 4], [6, 0]]);
        let metrics = Tour::new(vec![0, 1, 0], 10).tour_metrics(&matrix);
        assert_eq!(metrics, TourMetrics::new(2, 10, 6, 5.0));
    }

    #[test]
    fn tour_metrics_is_empty_for_trivial_tours() {
        let matrix = square([[0]]);
        assert_eq!(
            Tour::new(vec![0], 0).tour_metrics(&matrix),
            TourMetrics::default()
        );
        assert_eq!(
            Tour::new(vec![0, 0], 0).tour_metrics(&matrix),
            TourMetrics::default()
        );
    }

    #[test]
    fn with_builders_replace_fields() {
        let tour = Tour::default().with_cities(vec![0, 0]).with_cost(0);
        assert_eq!(tour, Tour::new(vec![0, 0], 0));
    }
}
