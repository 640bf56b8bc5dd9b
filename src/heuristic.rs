use crate::location::Location;
use crate::STEP_COST;

/// Estimates the remaining cost between two locations for [search](crate::search()).
///
/// Implementations must be admissible (never overestimate the true cost) and consistent (the
/// estimate drops by at most [STEP_COST] per step). The search relies on consistency to close a
/// location the first time it is reached, so an inconsistent heuristic can yield suboptimal
/// paths. Negative estimates are rejected with
/// [InvalidHeuristic](crate::MazeError::InvalidHeuristic).
pub trait Heuristic {
    fn cost(&self, from: Location, to: Location) -> i32;
}

/// The [Manhattan distance](https://en.wikipedia.org/wiki/Taxicab_geometry) scaled by
/// [STEP_COST], exact on an open 4-connected grid. Distances beyond [i32::MAX] saturate.
#[derive(Clone, Copy, Debug, Default)]
pub struct Manhattan;

impl Heuristic for Manhattan {
    fn cost(&self, from: Location, to: Location) -> i32 {
        i32::try_from(from.manhattan_distance(&to))
            .unwrap_or(i32::MAX)
            .saturating_mul(STEP_COST)
    }
}

/// Always estimates zero, which turns A* into uniform-cost search.
#[derive(Clone, Copy, Debug, Default)]
pub struct Dijkstra;

impl Heuristic for Dijkstra {
    fn cost(&self, _: Location, _: Location) -> i32 {
        0
    }
}

impl<F> Heuristic for F
where
    F: Fn(Location, Location) -> i32,
{
    fn cost(&self, from: Location, to: Location) -> i32 {
        self(from, to)
    }
}
