use log::{debug, info};
use smallvec::SmallVec;

use crate::astar::astar_closed;
use crate::error::{MazeError, Result};
use crate::heuristic::Heuristic;
use crate::location::Location;
use crate::maze::Maze;
use crate::result::SearchResult;
use crate::N_SMALLVEC_SIZE;

/// Computes a cost-optimal path from `start` to `goal` with A*, moving orthogonally between
/// passable cells at [STEP_COST](crate::STEP_COST) per step.
///
/// An unreachable goal is a normal outcome: the result then has no path, and its explored set
/// holds everything examined from `start`. Fails if either endpoint lies outside the maze or if
/// `heuristic` returns a negative estimate. A `start` on a wall has no path and explores only
/// itself. The maze is only read, so any number of searches can
/// share it.
pub fn search<H>(
    maze: &Maze,
    start: Location,
    goal: Location,
    heuristic: &H,
) -> Result<SearchResult>
where
    H: Heuristic + ?Sized,
{
    maze.check_bounds(start)?;
    maze.check_bounds(goal)?;
    info!("Searching for a path from {} to {}", start, goal);
    if !maze.is_passable(start) {
        info!("{} is a wall, no path can start there", start);
        return Ok(SearchResult::new(None, std::iter::once(start).collect(), 0));
    }
    let outcome = astar_closed(
        &start,
        |&node| {
            maze.neighbors(node)
                .iter()
                .map(|&n| (n, maze.is_passable(n)))
                .collect::<SmallVec<[_; N_SMALLVEC_SIZE]>>()
        },
        |&node| match heuristic.cost(node, goal) {
            value if value < 0 => Err(MazeError::InvalidHeuristic {
                location: node,
                value,
            }),
            value => Ok(value),
        },
        |node| *node == goal,
    )?;
    match &outcome.path {
        Some((_, cost)) => info!("Found path of {} steps from {} to {}", cost, start, goal),
        None => info!("{} is not reachable from {}", goal, start),
    }
    debug!(
        "Expanded {} states and explored {} locations",
        outcome.expanded,
        outcome.closed.len()
    );
    Ok(SearchResult::new(
        outcome.path.map(|(path, _)| path),
        outcome.closed,
        outcome.expanded,
    ))
}

/// Searches from the maze entrance to its exit.
pub fn solve<H>(maze: &Maze, heuristic: &H) -> Result<SearchResult>
where
    H: Heuristic + ?Sized,
{
    search(maze, maze.entrance(), maze.exit(), heuristic)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::heuristic::{Dijkstra, Manhattan};
    use crate::maze::MazeBuilder;

    fn loc(row: usize, column: usize) -> Location {
        Location::new(row, column)
    }

    fn assert_connected(maze: &Maze, path: &[Location]) {
        for step in path.windows(2) {
            assert!(maze.neighbors(step[0]).contains(&step[1]));
        }
        assert!(path.iter().all(|&p| maze.is_passable(p)));
    }

    /// Asserts that the case in which start and goal are equal is handled correctly.
    #[test]
    fn equal_start_goal() {
        let maze = Maze::open(1, 2, loc(0, 0), loc(0, 1)).unwrap();
        let result = search(&maze, loc(0, 0), loc(0, 0), &Manhattan).unwrap();
        assert_eq!(result.path(), Some(&[loc(0, 0)][..]));
        assert_eq!(result.explored().len(), 1);
        assert!(result.is_explored(&loc(0, 0)));
    }

    /// Asserts that an optimal 4 step solution is found on an open 3x3 maze.
    #[test]
    fn solve_open_maze() {
        let maze = Maze::open(3, 3, loc(0, 0), loc(2, 2)).unwrap();
        for heuristic in [&Manhattan as &dyn Heuristic, &Dijkstra] {
            let result = solve(&maze, heuristic).unwrap();
            let path = result.path().unwrap();
            assert!(path.len() == 5);
            assert_eq!(path.first(), Some(&loc(0, 0)));
            assert_eq!(path.last(), Some(&loc(2, 2)));
            assert_connected(&maze, path);
            assert!(result.explored().len() >= path.len());
            assert!(result.explored().len() <= 9);
            assert!(path.iter().all(|p| result.is_explored(p)));
        }
    }

    /// Up moves are listed first, so ties resolve into the first column before turning.
    #[test]
    fn open_maze_path_is_stable() {
        let maze = Maze::open(3, 3, loc(0, 0), loc(2, 2)).unwrap();
        let result = solve(&maze, &Manhattan).unwrap();
        assert_eq!(result.to_string(), "(0,0) (1,0) (2,0) (2,1) (2,2)");
    }

    #[test]
    fn isolated_entrance() {
        // |E W O|
        // |W W O|
        // |O O X|
        let maze = MazeBuilder::new(3, 3, false)
            .set_entrance(loc(0, 0))
            .set_exit(loc(2, 2))
            .set_blocked(loc(0, 1), true)
            .set_blocked(loc(1, 0), true)
            .set_blocked(loc(1, 1), true)
            .build()
            .unwrap();
        let result = solve(&maze, &Manhattan).unwrap();
        assert!(result.path().is_none());
        assert_eq!(result.to_string(), "no path");
        // Only the entrance and the two walls next to it get examined
        let explored = result.explored().iter().copied().collect::<Vec<_>>();
        assert_eq!(explored, vec![loc(0, 0), loc(1, 0), loc(0, 1)]);
        assert_eq!(result.expanded(), 1);
    }

    #[test]
    fn walled_maze_has_no_path() {
        let maze = Maze::walled(10, 10, loc(0, 0), loc(9, 9)).unwrap();
        let result = solve(&maze, &Manhattan).unwrap();
        assert!(!result.is_found());
        assert!(!maze.reachable(maze.entrance(), maze.exit()));
    }

    #[test]
    fn detour_around_walls() {
        // |E O O O|
        // |W W W O|
        // |O O O O|
        // |X W W W|
        let maze: Maze = "
            EOOO
            WWWO
            OOOO
            XWWW
        "
        .parse()
        .unwrap();
        let result = solve(&maze, &Manhattan).unwrap();
        let path = result.path().unwrap();
        assert_eq!(result.cost(), Some(9));
        assert_connected(&maze, path);
        assert_eq!(
            result.to_string(),
            "(0,0) (0,1) (0,2) (0,3) (1,3) (2,3) (2,2) (2,1) (2,0) (3,0)"
        );
    }

    /// Along an open top row Manhattan guidance only expands that row, while uniform-cost search
    /// floods everything closer than the goal.
    #[test]
    fn manhattan_explores_less_than_dijkstra() {
        let maze = Maze::open(10, 10, loc(0, 0), loc(9, 9)).unwrap();
        let astar = search(&maze, loc(0, 0), loc(0, 9), &Manhattan).unwrap();
        let dijkstra = search(&maze, loc(0, 0), loc(0, 9), &Dijkstra).unwrap();
        assert_eq!(astar.cost(), Some(9));
        assert_eq!(dijkstra.cost(), Some(9));
        assert_eq!(astar.expanded(), 10);
        assert!(astar.expanded() < dijkstra.expanded());
    }

    #[test]
    fn repeated_searches_are_identical() {
        let maze: Maze = "EOOO\nOWOO\nOOWO\nOOOX".parse().unwrap();
        let first = solve(&maze, &Manhattan).unwrap();
        let second = solve(&maze, &Manhattan).unwrap();
        assert_eq!(first.path(), second.path());
        assert!(first.explored().iter().eq(second.explored().iter()));
    }

    #[test]
    fn out_of_bounds_endpoints() {
        let maze = Maze::open(2, 2, loc(0, 0), loc(1, 1)).unwrap();
        let err = search(&maze, loc(0, 0), loc(2, 1), &Manhattan).unwrap_err();
        assert_eq!(
            err,
            MazeError::OutOfBounds {
                location: loc(2, 1),
                rows: 2,
                columns: 2
            }
        );
    }

    #[test]
    fn negative_heuristic_fails_fast() {
        let maze = Maze::open(2, 2, loc(0, 0), loc(1, 1)).unwrap();
        let broken = |from: Location, _: Location| if from == loc(1, 0) { -3 } else { 0 };
        let err = solve(&maze, &broken).unwrap_err();
        assert_eq!(
            err,
            MazeError::InvalidHeuristic {
                location: loc(1, 0),
                value: -3
            }
        );
    }

    /// Searches only read the maze, so threads can share it without locking.
    #[test]
    fn concurrent_searches_share_a_maze() {
        let maze = Maze::open(8, 8, loc(0, 0), loc(7, 7)).unwrap();
        let expected = solve(&maze, &Manhattan).unwrap().to_string();
        let maze = &maze;
        std::thread::scope(|scope| {
            let handles = (0..4)
                .map(|_| scope.spawn(move || solve(maze, &Manhattan).unwrap().to_string()))
                .collect::<Vec<_>>();
            for handle in handles {
                assert_eq!(handle.join().unwrap(), expected);
            }
        });
    }

    /// A search starting on a wall goes nowhere, even towards a wall right next to it.
    #[test]
    fn blocked_start() {
        let maze: Maze = "EWO\nOOX".parse().unwrap();
        for goal in [loc(0, 1), loc(1, 2), loc(0, 0)] {
            let result = search(&maze, loc(0, 1), goal, &Manhattan).unwrap();
            assert!(result.path().is_none());
            assert_eq!(result.explored().iter().copied().collect::<Vec<_>>(), vec![loc(0, 1)]);
            assert_eq!(result.expanded(), 0);
        }
    }

    /// Goals behind walls are examined but never reached.
    #[test]
    fn blocked_goal() {
        let maze = Maze::open(2, 3, loc(0, 0), loc(1, 2)).unwrap();
        let wall = MazeBuilder::new(2, 3, false)
            .set_entrance(loc(0, 0))
            .set_exit(loc(1, 2))
            .set_blocked(loc(0, 2), true)
            .build()
            .unwrap();
        let result = search(&wall, loc(0, 0), loc(0, 2), &Manhattan).unwrap();
        assert!(result.path().is_none());
        assert!(result.is_explored(&loc(0, 2)));
        assert_eq!(result.explored().len(), 6);
        assert!(solve(&maze, &Manhattan).unwrap().is_found());
    }
}
