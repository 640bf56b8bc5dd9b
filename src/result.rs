use core::fmt;
use itertools::Itertools;

use crate::astar::FxIndexSet;
use crate::location::Location;

/// The outcome of a [search](crate::search()): the optimal path, if the goal could be reached, and
/// every location examined on the way.
///
/// `explored` lists locations in the order they were closed and always contains the start. Walls
/// next to expanded cells are examined too, so `explored` is a superset of the path.
#[derive(Clone, Debug)]
pub struct SearchResult {
    path: Option<Vec<Location>>,
    explored: FxIndexSet<Location>,
    expanded: usize,
}

impl SearchResult {
    pub(crate) fn new(
        path: Option<Vec<Location>>,
        explored: FxIndexSet<Location>,
        expanded: usize,
    ) -> SearchResult {
        SearchResult {
            path,
            explored,
            expanded,
        }
    }
    /// Locations from start to goal inclusive, or [None] if the goal is unreachable.
    pub fn path(&self) -> Option<&[Location]> {
        self.path.as_deref()
    }
    pub fn is_found(&self) -> bool {
        self.path.is_some()
    }
    /// Number of steps along the path.
    pub fn cost(&self) -> Option<usize> {
        self.path.as_ref().map(|path| path.len() - 1)
    }
    pub fn explored(&self) -> &FxIndexSet<Location> {
        &self.explored
    }
    pub fn is_explored(&self, location: &Location) -> bool {
        self.explored.contains(location)
    }
    /// Number of states taken off the frontier, including the goal.
    pub fn expanded(&self) -> usize {
        self.expanded
    }
    pub fn into_parts(self) -> (Option<Vec<Location>>, FxIndexSet<Location>) {
        (self.path, self.explored)
    }
}

/// Prints the path as space-separated locations. Does not print the explored locations.
impl fmt::Display for SearchResult {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match &self.path {
            Some(path) => write!(f, "{}", path.iter().join(" ")),
            None => f.write_str("no path"),
        }
    }
}
