use maze_pathfinding::{solve, Manhattan, Maze, ENTRANCE, EXIT};

// Solves a 10x10 maze written in the W/O/E/X text format and draws the result, marking the path
// with `*` and the other explored cells with `.`.
const MAZE: &str = "
    EOOWOOOOOO
    WWOWOWWWWO
    OOOOOWOOOO
    OWWWWWOWWW
    OOOOOOOOOO
    WWWWOWWWWO
    OOOOOWOOOO
    OWWWWWOWWW
    OOOOOOOWOO
    WWWWWWOOOX
";

fn main() {
    env_logger::init();
    let maze: Maze = MAZE.parse().unwrap();
    let result = solve(&maze, &Manhattan).unwrap();
    let path = result.path().unwrap_or(&[]);
    for (ix, cell) in maze.cells().enumerate() {
        let location = cell.location();
        let symbol = if cell.is_entrance() {
            ENTRANCE
        } else if cell.is_exit() {
            EXIT
        } else if path.contains(&location) {
            '*'
        } else if !cell.is_passable() {
            '#'
        } else if result.is_explored(&location) {
            '.'
        } else {
            ' '
        };
        print!("{}", symbol);
        if (ix + 1) % maze.columns() == 0 {
            println!();
        }
    }
    println!("Path: {}", result);
    println!(
        "{} steps, {} cells explored, {} expanded",
        result.cost().unwrap_or(0),
        result.explored().len(),
        result.expanded()
    );
}
