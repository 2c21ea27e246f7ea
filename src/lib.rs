//! # grid_bfs
//!
//! Shortest-hop pathfinding on a square grid with obstacles using
//! [breadth-first search](https://en.wikipedia.org/wiki/Breadth-first_search).
//! Movement is restricted to the four axis-aligned neighbours and every step has
//! the same cost, so the first time the search discovers the end cell it has found
//! a path with the fewest possible steps.
//!
//! Neighbours are always expanded in the order up, right, down, left (see
//! [NEUMANN_OFFSETS]), which makes the returned path deterministic when several
//! equally short paths exist.
//!
//! ```
//! use grid_bfs::{BfsSolver, Grid, SearchResult};
//! use grid_util::point::Point;
//!
//! let grid = Grid::open(3, Point::new(0, 0), Point::new(2, 0)).unwrap();
//! match BfsSolver::new().solve(&grid) {
//!     SearchResult::Found { path, cost } => {
//!         assert_eq!(cost, 2);
//!         assert_eq!(path.first(), Some(&Point::new(0, 0)));
//!     }
//!     _ => unreachable!(),
//! }
//! ```
pub mod cell;
pub mod error;
pub mod frontier;
pub mod grid;
pub mod search;

pub use cell::{Cell, ParentLinks};
pub use error::ConfigError;
pub use frontier::{Frontier, VisitedSet};
pub use grid::Grid;
pub use search::{BfsSearch, BfsSolver, SearchObserver, SearchResult, SearchSnapshot, SearchStatus};

use grid_util::point::Point;
use itertools::Itertools;

/// Offsets of the von Neumann neighbourhood in expansion order: up, right, down, left.
pub const NEUMANN_OFFSETS: [(i32, i32); 4] = [(0, 1), (1, 0), (0, -1), (-1, 0)];

/// The neighbours of `point` in expansion order, without any bounds checks.
pub fn neumann_neighbours(point: Point) -> [Point; 4] {
    NEUMANN_OFFSETS.map(|(dx, dy)| Point::new(point.x + dx, point.y + dy))
}

/// Number of steps taken along a path, i.e. its length minus one. Empty paths cost nothing.
pub fn path_cost(path: &[Point]) -> usize {
    path.len().saturating_sub(1)
}

/// Whether every consecutive pair of cells in `path` are 4-neighbours.
pub fn is_contiguous(path: &[Point]) -> bool {
    path.iter()
        .tuple_windows()
        .all(|(a, b)| a.manhattan_distance(b) == 1)
}
