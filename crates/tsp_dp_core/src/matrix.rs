use std::{fmt, ops::RangeInclusive};

use rand::{Rng, SeedableRng, rngs::StdRng};

use crate::{
    Error, Result,
    constants::MAX_EDGE_COST,
    mask::ensure_city_count,
};

/// Non-negative travel cost between two cities.
pub type Cost = u64;

/// Square, row-major cost matrix of a complete directed graph. The diagonal is zero and
/// `get(i, j)` may differ from `get(j, i)`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DistanceMatrix {
    n: usize,
    costs: Vec<Cost>,
}

impl DistanceMatrix {
    pub fn from_rows<R: AsRef<[Cost]>>(rows: &[R]) -> Result<Self> {
        let n = rows.len();
        ensure_city_count(n)?;

        let mut costs = Vec::with_capacity(n * n);
        for (i, row) in rows.iter().enumerate() {
            let row = row.as_ref();
            if row.len() != n {
                return Err(Error::invalid_data(format!(
                    "Row {i}: expected {n} costs but got {}",
                    row.len()
                )));
            }
            if row[i] != 0 {
                return Err(Error::invalid_data(format!(
                    "Row {i}: diagonal cost must be 0, got {}",
                    row[i]
                )));
            }
            if let Some(&cost) = row.iter().find(|&&cost| cost > MAX_EDGE_COST) {
                return Err(Error::invalid_data(format!(
                    "Row {i}: cost {cost} exceeds maximum {MAX_EDGE_COST}"
                )));
            }
            costs.extend_from_slice(row);
        }

        Ok(Self { n, costs })
    }

    /// Every off-diagonal edge costs `cost`.
    pub fn uniform(n: usize, cost: Cost) -> Result<Self> {
        ensure_city_count(n)?;
        ensure_cost_range(&(cost..=cost))?;
        Ok(Self::from_fn(n, |_, _| cost))
    }

    /// Off-diagonal costs drawn uniformly from `costs`.
    pub fn random<R: Rng>(n: usize, costs: RangeInclusive<Cost>, rng: &mut R) -> Result<Self> {
        ensure_city_count(n)?;
        ensure_cost_range(&costs)?;
        Ok(Self::from_fn(n, |_, _| rng.random_range(costs.clone())))
    }

    pub fn random_seeded(n: usize, costs: RangeInclusive<Cost>, seed: u64) -> Result<Self> {
        let mut rng = StdRng::seed_from_u64(seed);
        Self::random(n, costs, &mut rng)
    }

    /// Parses one row per non-empty line. Costs are separated by whitespace or commas
    /// and lines starting with `#` are ignored.
    pub fn parse(text: &str) -> Result<Self> {
        let mut rows = Vec::new();
        for (line_idx, line) in text.lines().enumerate() {
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }

            let row = line
                .split(|c: char| c.is_whitespace() || c == ',')
                .filter(|tok| !tok.is_empty())
                .map(|tok| {
                    tok.parse::<Cost>().map_err(|_| {
                        Error::invalid_data(format!("Line {}: invalid cost: {tok}", line_idx + 1))
                    })
                })
                .collect::<Result<Vec<_>>>()?;
            rows.push(row);
        }

        if rows.is_empty() {
            return Err(Error::invalid_data("No matrix rows provided."));
        }

        Self::from_rows(&rows)
    }

    fn from_fn(n: usize, mut off_diagonal: impl FnMut(usize, usize) -> Cost) -> Self {
        let mut costs = Vec::with_capacity(n * n);
        for i in 0..n {
            for j in 0..n {
                costs.push(if i == j { 0 } else { off_diagonal(i, j) });
            }
        }
        Self { n, costs }
    }

    /// Number of cities.
    pub fn len(&self) -> usize {
        self.n
    }

    pub fn is_empty(&self) -> bool {
        self.n == 0
    }

    #[inline]
    pub fn get(&self, from: usize, to: usize) -> Cost {
        self.costs[from * self.n + to]
    }

    pub fn row(&self, from: usize) -> &[Cost] {
        &self.costs[from * self.n..(from + 1) * self.n]
    }

    pub fn is_symmetric(&self) -> bool {
        (0..self.n).all(|i| (i + 1..self.n).all(|j| self.get(i, j) == self.get(j, i)))
    }
}

fn ensure_cost_range(costs: &RangeInclusive<Cost>) -> Result<()> {
    if costs.start() > costs.end() {
        return Err(Error::invalid_input(format!(
            "cost range is empty: {}..={}",
            costs.start(),
            costs.end()
        )));
    }
    if *costs.end() > MAX_EDGE_COST {
        return Err(Error::invalid_input(format!(
            "cost {} exceeds maximum {MAX_EDGE_COST}",
            costs.end()
        )));
    }
    Ok(())
}

#[cfg(test)]
pub(crate) fn square<const N: usize>(rows: [[Cost; N]; N]) -> DistanceMatrix {
    DistanceMatrix::from_rows(&rows).expect("valid matrix")
}

impl fmt::Display for DistanceMatrix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let width = self
            .costs
            .iter()
            .map(|cost| cost.to_string().len())
            .max()
            .unwrap_or(1);

        for i in 0..self.n {
            if i > 0 {
                writeln!(f)?;
            }
            let row = self
                .row(i)
                .iter()
                .map(|cost| format!("{cost:>width$}"))
                .collect::<Vec<_>>()
                .join(" ");
            f.write_str(&row)?;
        }
        Ok(())
    }
}
