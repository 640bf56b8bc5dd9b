use maze_pathfinding::{solve, Location, Manhattan, MazeBuilder};

// In this example a path is found on a 3x3 maze with shape
//  ___
// |E  |
// | # |
// |  X|
//  ___
// where
// - # marks a wall
// - E marks the entrance
// - X marks the exit
//
// Moves are restricted to the 4-neighbourhood

fn main() {
    env_logger::init();
    let maze = MazeBuilder::new(3, 3, false)
        .set_blocked(Location::new(1, 1), true)
        .set_entrance(Location::new(0, 0))
        .set_exit(Location::new(2, 2))
        .build()
        .unwrap();
    println!("{}", maze);
    let result = solve(&maze, &Manhattan).unwrap();
    println!("Path:");
    for p in result.path().unwrap() {
        println!("{}", p);
    }
}
