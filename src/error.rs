//! Error types for maze construction and search.

use thiserror::Error;

use crate::location::Location;
use crate::maze::Role;

/// Everything that can go wrong while building a [Maze](crate::Maze) or searching it.
///
/// An unreachable goal is not an error: it is reported as a
/// [SearchResult](crate::SearchResult) without a path.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum MazeError {
    #[error("maze has {count} cells with role {role}, expected exactly one")]
    MissingRole { role: Role, count: usize },

    #[error("{location} lies outside the {rows}x{columns} maze")]
    OutOfBounds {
        location: Location,
        rows: usize,
        columns: usize,
    },

    #[error("heuristic returned negative estimate {value} at {location}")]
    InvalidHeuristic { location: Location, value: i32 },

    #[error("maze has no cells")]
    Empty,

    #[error("a {rows}x{columns} maze has more cells than fit in memory")]
    TooLarge { rows: usize, columns: usize },

    #[error("maze row {row} has {found} columns, expected {expected}")]
    RaggedRow {
        row: usize,
        expected: usize,
        found: usize,
    },

    #[error("invalid maze character {character:?} at {location}")]
    InvalidCharacter { character: char, location: Location },
}

pub type Result<T> = std::result::Result<T, MazeError>;
