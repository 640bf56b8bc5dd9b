use maze_pathfinding::{search, Dijkstra, Heuristic, Location, Manhattan, Maze};

// Compares how much of an open 20x20 maze each heuristic examines on the way to the same goal.
// Any closure over two locations can serve as a heuristic as long as it stays admissible.

fn main() {
    env_logger::init();
    let maze = Maze::open(20, 20, Location::new(0, 0), Location::new(19, 19)).unwrap();
    let start = Location::new(2, 3);
    let goal = Location::new(15, 8);
    let rows_only = |a: Location, b: Location| a.row.abs_diff(b.row) as i32;
    let heuristics: [(&str, &dyn Heuristic); 3] = [
        ("manhattan", &Manhattan),
        ("rows only", &rows_only),
        ("dijkstra", &Dijkstra),
    ];
    for (name, heuristic) in heuristics {
        let result = search(&maze, start, goal, heuristic).unwrap();
        println!(
            "{:>10}: {} steps, {} explored, {} expanded",
            name,
            result.cost().unwrap_or(0),
            result.explored().len(),
            result.expanded()
        );
    }
}
