//! # maze_pathfinding
//!
//! [A*](https://en.wikipedia.org/wiki/A*_search_algorithm) pathfinding on mazes made of
//! passable and blocked cells with exactly one entrance and one exit. Note that this assumes a
//! uniform-cost grid where every orthogonal step costs [STEP_COST].
//!
//! A [Maze] is built once (through a [MazeBuilder], the `W`/`O`/`E`/`X` text format or one of the
//! test constructors) and is read-only afterwards. [search()] runs A* between two locations with a
//! pluggable [Heuristic] and returns a [SearchResult] holding the optimal path, if any, together
//! with every location examined along the way.
//!
//! ```
//! use maze_pathfinding::{solve, Manhattan, Maze};
//!
//! let maze: Maze = "EOO\nWWO\nXOO".parse().unwrap();
//! let result = solve(&maze, &Manhattan).unwrap();
//! assert_eq!(result.cost(), Some(6));
//! assert_eq!(
//!     result.to_string(),
//!     "(0,0) (0,1) (0,2) (1,2) (2,2) (2,1) (2,0)"
//! );
//! ```
mod astar;
pub mod error;
pub mod heuristic;
pub mod location;
pub mod maze;
pub mod result;
pub mod search;

pub use astar::FxIndexSet;
pub use error::{MazeError, Result};
pub use heuristic::{Dijkstra, Heuristic, Manhattan};
pub use location::Location;
pub use maze::{Cell, Maze, MazeBuilder, Role};
pub use result::SearchResult;
pub use search::{search, solve};

/// Cost of a single orthogonal move between two adjacent cells.
pub const STEP_COST: i32 = 1;
/// Inline capacity of neighbour lists; a cell has at most four orthogonal neighbours.
pub const N_SMALLVEC_SIZE: usize = 4;

/// Marks a blocked cell in the text format.
pub const WALL: char = 'W';
/// Marks a passable cell in the text format.
pub const OPEN: char = 'O';
/// Marks the entrance in the text format.
pub const ENTRANCE: char = 'E';
/// Marks the exit in the text format.
pub const EXIT: char = 'X';
