use crate::Cost;

/// Largest city count the solver accepts. The memo table holds `2^n * n` entries,
/// so this bounds memory at roughly 160 MiB.
pub const MAX_CITIES: usize = 20;

/// Every tour starts and ends here.
pub const ORIGIN: usize = 0;

/// Largest accepted edge cost. A tour sums at most `MAX_CITIES` edges, so totals stay
/// far below the memo sentinel.
pub const MAX_EDGE_COST: Cost = u32::MAX as Cost;

pub(crate) const DEFAULT_CITIES: usize = 3;
pub(crate) const DEFAULT_MIN_COST: Cost = 1;
pub(crate) const DEFAULT_MAX_COST: Cost = 10;
