use grid_bfs::{BfsSolver, ConfigError, Grid, SearchResult};
use grid_util::point::Point;
use std::thread;

fn points(coords: &[(i32, i32)]) -> Vec<Point> {
    coords.iter().map(|&(x, y)| Point::new(x, y)).collect()
}

#[test]
fn straight_path_on_open_grid() {
    let grid = Grid::open(3, Point::new(0, 0), Point::new(2, 0)).unwrap();
    let result = BfsSolver::new().solve(&grid);
    assert_eq!(
        result,
        SearchResult::Found {
            path: points(&[(0, 0), (1, 0), (2, 0)]),
            cost: 2
        }
    );
}

#[test]
fn full_wall_blocks_the_end() {
    //  ___
    // | # |
    // | # |
    // |S#E|
    //  ___
    let wall = points(&[(1, 0), (1, 1), (1, 2)]);
    let grid = Grid::new(3, wall, Point::new(0, 0), Point::new(2, 0)).unwrap();
    assert_eq!(BfsSolver::new().solve(&grid), SearchResult::NotFound);
}

#[test]
fn path_squeezes_through_gap() {
    //  _____
    // |  #  |
    // |  #  |
    // |S   E|
    // |  #  |
    // |  #  |
    //  _____
    let wall = points(&[(2, 0), (2, 1), (2, 3), (2, 4)]);
    let grid = Grid::new(5, wall, Point::new(0, 2), Point::new(4, 2)).unwrap();
    let result = BfsSolver::new().solve(&grid);
    let path = result.path().unwrap();
    assert_eq!(path.len(), 5);
    assert!(path.contains(&Point::new(2, 2)));
    assert_eq!(path, points(&[(0, 2), (1, 2), (2, 2), (3, 2), (4, 2)]).as_slice());
}

#[test]
fn start_equal_to_end_is_rejected() {
    let p = Point::new(1, 1);
    assert_eq!(Grid::open(3, p, p).unwrap_err(), ConfigError::StartIsEnd(p));
}

#[test]
fn detour_around_rect() {
    //  _____
    // |.....|
    // |.....|
    // |.....|
    // |.###.|
    // |S###E|
    //  _____
    let grid = Grid::with_rects(5, [(1, 0, 3, 2)], Point::new(0, 0), Point::new(4, 0)).unwrap();
    let result = BfsSolver::new().solve(&grid);
    assert_eq!(
        result.path().unwrap(),
        points(&[
            (0, 0),
            (0, 1),
            (0, 2),
            (1, 2),
            (2, 2),
            (3, 2),
            (4, 2),
            (4, 1),
            (4, 0)
        ])
        .as_slice()
    );
    assert_eq!(result.cost(), Some(8));
    print!("{}", grid.render_path(result.path().unwrap()));
}

#[test]
fn repeated_searches_agree() {
    let grid = Grid::with_rects(
        8,
        [(2, 2, 3, 3), (5, 0, 1, 4)],
        Point::new(0, 0),
        Point::new(7, 7),
    )
    .unwrap();
    let solver = BfsSolver::new();
    let first = solver.solve(&grid);
    assert!(first.is_found());
    for _ in 0..5 {
        assert_eq!(solver.solve(&grid), first);
    }
}

/// Searches over one grid share no state, so they can run side by side.
#[test]
fn concurrent_searches_share_grid() {
    let grid = Grid::with_rects(
        16,
        [(3, 0, 2, 12), (8, 4, 2, 12)],
        Point::new(0, 0),
        Point::new(15, 15),
    )
    .unwrap();
    let expected = BfsSolver::new().solve(&grid);
    assert!(expected.is_found());
    thread::scope(|s| {
        let handles: Vec<_> = (0..4)
            .map(|_| s.spawn(|| BfsSolver::new().solve(&grid)))
            .collect();
        for handle in handles {
            assert_eq!(handle.join().unwrap(), expected);
        }
    });
}
