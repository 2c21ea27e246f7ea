use grid_bfs::{BfsSolver, Grid, SearchObserver, SearchResult, SearchSnapshot};
use grid_util::point::Point;
use std::ops::ControlFlow;

// In this example a path is found on a 5x5 grid with shape
//  _____
// |  #  |
// |  #  |
// |S   E|
// |  #  |
// |  #  |
//  _____
// where
// - # marks an obstacle
// - S marks the start
// - E marks the end
//
// After every expansion the step number, the expanded cell and the sizes of the frontier
// and the visited set are printed.

struct PrintProgress;

impl SearchObserver for PrintProgress {
    fn on_step(&mut self, snapshot: &SearchSnapshot<'_>) -> ControlFlow<()> {
        if let Some(p) = snapshot.expanded {
            println!(
                "step {}: expanded {}, {} queued, {} visited",
                snapshot.step,
                p,
                snapshot.frontier.len(),
                snapshot.visited.len()
            );
        }
        ControlFlow::Continue(())
    }
}

fn main() {
    let wall = [
        Point::new(2, 0),
        Point::new(2, 1),
        Point::new(2, 3),
        Point::new(2, 4),
    ];
    let grid = match Grid::new(5, wall, Point::new(0, 2), Point::new(4, 2)) {
        Ok(grid) => grid,
        Err(e) => {
            eprintln!("Invalid grid: {e}");
            return;
        }
    };
    println!("{}", grid);
    match BfsSolver::new().solve_observed(&grid, &mut PrintProgress) {
        SearchResult::Found { path, cost } => {
            println!("Path of cost {cost}:");
            print!("{}", grid.render_path(&path));
        }
        SearchResult::NotFound => println!("No path"),
        SearchResult::Cancelled { steps } => println!("Cancelled after {steps} steps"),
    }
}
