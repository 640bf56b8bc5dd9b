use core::fmt;
use grid_util::point::Point;

/// A `(row, column)` position in a [Maze](crate::Maze). Rows grow downwards and columns grow to
/// the right, so `(0, 0)` is the top-left cell.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Location {
    pub row: usize,
    pub column: usize,
}

impl Location {
    pub const fn new(row: usize, column: usize) -> Location {
        Location { row, column }
    }

    /// The grid-taxicab distance `|Δrow| + |Δcolumn|`.
    pub fn manhattan_distance(&self, other: &Location) -> usize {
        self.row
            .abs_diff(other.row)
            .saturating_add(self.column.abs_diff(other.column))
    }

    /// Whether `other` is one orthogonal step away.
    pub fn is_adjacent(&self, other: &Location) -> bool {
        self.manhattan_distance(other) == 1
    }

    /// Converts a [Point] using `x` as the column and `y` as the row. Points with a negative
    /// coordinate have no location.
    pub fn from_point(point: Point) -> Option<Location> {
        let row = usize::try_from(point.y).ok()?;
        let column = usize::try_from(point.x).ok()?;
        Some(Location::new(row, column))
    }
}

impl From<(usize, usize)> for Location {
    fn from((row, column): (usize, usize)) -> Location {
        Location::new(row, column)
    }
}

/// Coordinates beyond [i32::MAX] saturate.
impl From<Location> for Point {
    fn from(location: Location) -> Point {
        Point::new(
            i32::try_from(location.column).unwrap_or(i32::MAX),
            i32::try_from(location.row).unwrap_or(i32::MAX),
        )
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "({},{})", self.row, self.column)
    }
}
