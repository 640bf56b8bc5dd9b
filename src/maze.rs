use core::fmt;
use std::str::FromStr;

use log::{debug, warn};
use petgraph::unionfind::UnionFind;
use smallvec::SmallVec;

use crate::error::{MazeError, Result};
use crate::location::Location;
use crate::{ENTRANCE, EXIT, N_SMALLVEC_SIZE, OPEN, WALL};

/// The special meaning a cell can carry in a maze.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Role {
    /// An ordinary cell.
    #[default]
    Plain,
    Entrance,
    Exit,
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let name = match self {
            Role::Plain => "plain",
            Role::Entrance => "entrance",
            Role::Exit => "exit",
        };
        f.write_str(name)
    }
}

/// One square of a [Maze]. Neighbours are stored as [Location]s rather than references, in the
/// order up, down, left, right, and only include cells that exist within the maze bounds.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Cell {
    location: Location,
    passable: bool,
    role: Role,
    neighbors: SmallVec<[Location; N_SMALLVEC_SIZE]>,
}

impl Cell {
    fn new(location: Location, passable: bool, role: Role) -> Cell {
        Cell {
            location,
            passable,
            role,
            neighbors: SmallVec::new(),
        }
    }
    pub fn location(&self) -> Location {
        self.location
    }
    pub fn is_passable(&self) -> bool {
        self.passable
    }
    pub fn role(&self) -> Role {
        self.role
    }
    pub fn is_entrance(&self) -> bool {
        self.role == Role::Entrance
    }
    pub fn is_exit(&self) -> bool {
        self.role == Role::Exit
    }
    /// Orthogonal neighbours within bounds, regardless of whether they are passable.
    pub fn neighbors(&self) -> &[Location] {
        &self.neighbors
    }
    fn symbol(&self) -> char {
        match self.role {
            Role::Entrance => ENTRANCE,
            Role::Exit => EXIT,
            Role::Plain if self.passable => OPEN,
            Role::Plain => WALL,
        }
    }
}

/// [Maze] is an immutable grid of [Cell]s stored row-major in a single vector. Besides the cells
/// it keeps the unique entrance and exit, resolved when the maze is built, and a [UnionFind]
/// structure over the passable cells to answer reachability queries without searching.
#[derive(Clone, Debug)]
pub struct Maze {
    rows: usize,
    columns: usize,
    cells: Vec<Cell>,
    entrance: Location,
    exit: Location,
    components: UnionFind<usize>,
}

impl Maze {
    /// A maze in which every cell is open.
    pub fn open(rows: usize, columns: usize, entrance: Location, exit: Location) -> Result<Maze> {
        MazeBuilder::new(rows, columns, false)
            .set_entrance(entrance)
            .set_exit(exit)
            .build()
    }

    /// A maze in which every cell is a wall, apart from the entrance and the exit.
    pub fn walled(
        rows: usize,
        columns: usize,
        entrance: Location,
        exit: Location,
    ) -> Result<Maze> {
        MazeBuilder::new(rows, columns, true)
            .set_entrance(entrance)
            .set_exit(exit)
            .build()
    }

    pub fn rows(&self) -> usize {
        self.rows
    }
    pub fn columns(&self) -> usize {
        self.columns
    }
    pub fn entrance(&self) -> Location {
        self.entrance
    }
    pub fn exit(&self) -> Location {
        self.exit
    }
    pub fn in_bounds(&self, location: Location) -> bool {
        location.row < self.rows && location.column < self.columns
    }
    fn get_ix(&self, location: Location) -> Option<usize> {
        self.in_bounds(location)
            .then(|| location.row * self.columns + location.column)
    }
    pub fn cell(&self, location: Location) -> Option<&Cell> {
        self.get_ix(location).map(|ix| &self.cells[ix])
    }
    /// All cells in row-major order.
    pub fn cells(&self) -> impl Iterator<Item = &Cell> {
        self.cells.iter()
    }
    /// Out-of-bounds locations are never passable.
    pub fn is_passable(&self, location: Location) -> bool {
        self.cell(location).is_some_and(Cell::is_passable)
    }
    /// Up to four orthogonal neighbours of `location`. Passability is not taken into account;
    /// out-of-bounds locations have no neighbours.
    pub fn neighbors(&self, location: Location) -> &[Location] {
        self.cell(location).map(Cell::neighbors).unwrap_or(&[])
    }

    /// Finds the unique cell holding `role`. Fails if no cell or more than one cell holds it.
    pub fn find_role(&self, role: Role) -> Result<Location> {
        find_role(&self.cells, role)
    }

    pub(crate) fn check_bounds(&self, location: Location) -> Result<()> {
        if self.in_bounds(location) {
            Ok(())
        } else {
            Err(MazeError::OutOfBounds {
                location,
                rows: self.rows,
                columns: self.columns,
            })
        }
    }

    /// Checks if `start` and `goal` are connected through passable cells. A location is always
    /// reachable from itself.
    pub fn reachable(&self, start: Location, goal: Location) -> bool {
        match (self.get_ix(start), self.get_ix(goal)) {
            (Some(start_ix), Some(goal_ix)) => {
                start_ix == goal_ix
                    || (self.cells[start_ix].passable
                        && self.cells[goal_ix].passable
                        && self.components.equiv(start_ix, goal_ix))
            }
            _ => false,
        }
    }

    /// Generates a new [UnionFind] structure and links up passable neighbours to the same
    /// components.
    fn generate_components(&mut self) {
        self.components = UnionFind::new(self.cells.len());
        for (ix, cell) in self.cells.iter().enumerate() {
            if !cell.passable {
                continue;
            }
            for &n in cell.neighbors() {
                let n_ix = n.row * self.columns + n.column;
                if self.cells[n_ix].passable {
                    self.components.union(ix, n_ix);
                }
            }
        }
    }
}

fn find_role(cells: &[Cell], role: Role) -> Result<Location> {
    let mut found = cells
        .iter()
        .filter(|cell| cell.role == role)
        .map(Cell::location);
    match (found.next(), found.next()) {
        (Some(location), None) => Ok(location),
        (None, _) => Err(MazeError::MissingRole { role, count: 0 }),
        (Some(_), Some(_)) => Err(MazeError::MissingRole {
            role,
            count: 2 + found.count(),
        }),
    }
}

/// Links every cell to the cells directly above, below, left and right of it. Every cell has to
/// exist before this runs.
fn wire_neighbors(cells: &mut [Cell], rows: usize, columns: usize) {
    for cell in cells.iter_mut() {
        let Location { row, column } = cell.location;
        if row > 0 {
            cell.neighbors.push(Location::new(row - 1, column));
        }
        if row + 1 < rows {
            cell.neighbors.push(Location::new(row + 1, column));
        }
        if column > 0 {
            cell.neighbors.push(Location::new(row, column - 1));
        }
        if column + 1 < columns {
            cell.neighbors.push(Location::new(row, column + 1));
        }
    }
}

/// Collects passability and roles for every cell of a maze before building it. Edits outside the
/// maze are remembered and reported by [build](Self::build).
#[derive(Clone, Debug)]
pub struct MazeBuilder {
    rows: usize,
    columns: usize,
    passable: Vec<bool>,
    roles: Vec<Role>,
    out_of_bounds: Option<Location>,
    too_large: bool,
}

impl MazeBuilder {
    /// Starts a `rows` x `columns` maze in which every cell is a wall if `blocked` is [true] and
    /// open otherwise. A cell count that overflows `usize` is reported by [build](Self::build).
    pub fn new(rows: usize, columns: usize, blocked: bool) -> MazeBuilder {
        let size = rows.checked_mul(columns);
        MazeBuilder {
            rows,
            columns,
            passable: vec![!blocked; size.unwrap_or(0)],
            roles: vec![Role::Plain; size.unwrap_or(0)],
            out_of_bounds: None,
            too_large: size.is_none(),
        }
    }
    fn get_ix(&mut self, location: Location) -> Option<usize> {
        if location.row < self.rows && location.column < self.columns {
            if self.too_large {
                return None;
            }
            Some(location.row * self.columns + location.column)
        } else {
            self.out_of_bounds.get_or_insert(location);
            None
        }
    }
    /// Walls or opens a cell. The entrance and the exit stay passable.
    pub fn set_blocked(&mut self, location: Location, blocked: bool) -> &mut Self {
        if let Some(ix) = self.get_ix(location) {
            self.passable[ix] = !blocked || self.roles[ix] != Role::Plain;
        }
        self
    }
    /// Sets every cell of the `rows` x `columns` rectangle whose top-left corner is `corner`.
    /// Only the part inside the maze is edited; the first cell sticking out is reported by
    /// [build](Self::build).
    pub fn set_rect(
        &mut self,
        corner: Location,
        rows: usize,
        columns: usize,
        blocked: bool,
    ) -> &mut Self {
        if rows == 0 || columns == 0 {
            return self;
        }
        let row_end = corner.row.saturating_add(rows);
        let column_end = corner.column.saturating_add(columns);
        let outside = if corner.row >= self.rows {
            Some(corner)
        } else if column_end > self.columns {
            Some(Location::new(corner.row, corner.column.max(self.columns)))
        } else if row_end > self.rows {
            Some(Location::new(self.rows, corner.column))
        } else {
            None
        };
        for row in corner.row..row_end.min(self.rows) {
            for column in corner.column..column_end.min(self.columns) {
                self.set_blocked(Location::new(row, column), blocked);
            }
        }
        if let Some(location) = outside {
            self.out_of_bounds.get_or_insert(location);
        }
        self
    }
    /// Assigns `role` to a cell. Entrances and exits are always passable, so assigning either
    /// opens the cell.
    pub fn set_role(&mut self, location: Location, role: Role) -> &mut Self {
        if let Some(ix) = self.get_ix(location) {
            self.roles[ix] = role;
            if role != Role::Plain {
                self.passable[ix] = true;
            }
        }
        self
    }
    pub fn set_entrance(&mut self, location: Location) -> &mut Self {
        self.set_role(location, Role::Entrance)
    }
    pub fn set_exit(&mut self, location: Location) -> &mut Self {
        self.set_role(location, Role::Exit)
    }

    /// Builds the maze in two passes: all cells are created first, then adjacency is wired
    /// between them. Rejects mazes without exactly one entrance and one exit.
    pub fn build(&self) -> Result<Maze> {
        let (rows, columns) = (self.rows, self.columns);
        if rows == 0 || columns == 0 {
            return Err(MazeError::Empty);
        }
        if let Some(location) = self.out_of_bounds {
            return Err(MazeError::OutOfBounds {
                location,
                rows,
                columns,
            });
        }
        if self.too_large {
            return Err(MazeError::TooLarge { rows, columns });
        }
        let mut cells = self
            .passable
            .iter()
            .zip(&self.roles)
            .enumerate()
            .map(|(ix, (&passable, &role))| {
                Cell::new(Location::new(ix / columns, ix % columns), passable, role)
            })
            .collect::<Vec<Cell>>();
        wire_neighbors(&mut cells, rows, columns);

        let (entrance, exit) = match (
            find_role(&cells, Role::Entrance),
            find_role(&cells, Role::Exit),
        ) {
            (Ok(entrance), Ok(exit)) => (entrance, exit),
            (Err(e), _) | (_, Err(e)) => {
                warn!("Rejecting {}x{} maze: {}", rows, columns, e);
                return Err(e);
            }
        };
        let mut maze = Maze {
            rows,
            columns,
            cells,
            entrance,
            exit,
            components: UnionFind::new(0),
        };
        maze.generate_components();
        debug!(
            "Built {}x{} maze with entrance {} and exit {}",
            rows, columns, entrance, exit
        );
        Ok(maze)
    }
}

/// Writes the maze in the same `W`/`O`/`E`/`X` format [FromStr] reads, one row per line.
impl fmt::Display for Maze {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        for row in self.cells.chunks(self.columns) {
            let line = row.iter().map(Cell::symbol).collect::<String>();
            writeln!(f, "{}", line)?;
        }
        Ok(())
    }
}

/// Parses one maze definition: one line per row, `W` for walls, `O` for open cells, `E` for the
/// entrance and `X` for the exit. Blank lines and surrounding whitespace are ignored.
impl FromStr for Maze {
    type Err = MazeError;

    fn from_str(s: &str) -> Result<Maze> {
        let lines = s
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .collect::<Vec<&str>>();
        let columns = lines.first().map_or(0, |line| line.chars().count());
        let mut builder = MazeBuilder::new(lines.len(), columns, false);
        for (row, line) in lines.iter().enumerate() {
            let found = line.chars().count();
            if found != columns {
                return Err(MazeError::RaggedRow {
                    row,
                    expected: columns,
                    found,
                });
            }
            for (column, character) in line.chars().enumerate() {
                let location = Location::new(row, column);
                match character {
                    WALL => builder.set_blocked(location, true),
                    OPEN => builder.set_blocked(location, false),
                    ENTRANCE => builder.set_entrance(location),
                    EXIT => builder.set_exit(location),
                    character => {
                        return Err(MazeError::InvalidCharacter {
                            character,
                            location,
                        })
                    }
                };
            }
        }
        builder.build()
    }
}
