use crate::error::ConfigError;
use core::fmt;
use fxhash::FxHashSet;
use grid_util::grid::{BoolGrid, ValueGrid};
use grid_util::point::Point;
use log::warn;
use petgraph::unionfind::UnionFind;

/// A square grid of `size` by `size` cells with blocked cells stored in a [BoolGrid]
/// ([true] means blocked) and fixed start and end cells.
///
/// A [Grid] is immutable once constructed: the search only ever reads from it, so any
/// number of searches can share one grid. Connected components of the free cells are
/// computed up front using a [UnionFind] structure and are available through
/// [reachable](Self::reachable).
#[derive(Clone, Debug)]
pub struct Grid {
    size: usize,
    obstacles: BoolGrid,
    start: Point,
    end: Point,
    components: UnionFind<usize>,
}

impl Grid {
    /// Builds a grid, rejecting a zero size, a size beyond [i32::MAX], start or end outside
    /// the grid or on an obstacle, and a start equal to the end. Obstacles outside the grid
    /// are dropped.
    pub fn new<I>(size: usize, obstacles: I, start: Point, end: Point) -> Result<Grid, ConfigError>
    where
        I: IntoIterator<Item = Point>,
    {
        if size == 0 {
            return Err(ConfigError::EmptyGrid);
        }
        coordinate_limit(size)?;
        let mut blocked = BoolGrid::new(size, size, false);
        let mut dropped = 0;
        for p in obstacles {
            if in_bounds(size, p.x, p.y) {
                blocked.set(p.x, p.y, true);
            } else {
                dropped += 1;
            }
        }
        if dropped > 0 {
            warn!("Dropped {} obstacle cells outside the {}x{} grid", dropped, size, size);
        }

        if !in_bounds(size, start.x, start.y) {
            return Err(ConfigError::StartOutOfBounds(start));
        }
        if !in_bounds(size, end.x, end.y) {
            return Err(ConfigError::EndOutOfBounds(end));
        }
        if blocked.get(start.x, start.y) {
            return Err(ConfigError::StartBlocked(start));
        }
        if blocked.get(end.x, end.y) {
            return Err(ConfigError::EndBlocked(end));
        }
        if start == end {
            return Err(ConfigError::StartIsEnd(start));
        }

        let mut grid = Grid {
            size,
            obstacles: blocked,
            start,
            end,
            components: UnionFind::new(size * size),
        };
        grid.generate_components();
        Ok(grid)
    }

    /// Builds a grid without obstacles.
    pub fn open(size: usize, start: Point, end: Point) -> Result<Grid, ConfigError> {
        Grid::new(size, std::iter::empty(), start, end)
    }

    /// Builds a grid from rectangular obstacles given as `(x, y, width, height)`, each
    /// covering the cells from `(x, y)` up to but excluding `(x + width, y + height)`.
    /// Rectangles are clipped to the grid.
    pub fn with_rects<I>(size: usize, rects: I, start: Point, end: Point) -> Result<Grid, ConfigError>
    where
        I: IntoIterator<Item = (i32, i32, i32, i32)>,
    {
        let limit = coordinate_limit(size)?;
        let mut cells = FxHashSet::default();
        for (x0, y0, w, h) in rects {
            for x in x0.max(0)..x0.saturating_add(w).min(limit) {
                for y in y0.max(0)..y0.saturating_add(h).min(limit) {
                    cells.insert(Point::new(x, y));
                }
            }
        }
        Grid::new(size, cells, start, end)
    }

    pub fn size(&self) -> usize {
        self.size
    }
    pub fn start(&self) -> Point {
        self.start
    }
    pub fn end(&self) -> Point {
        self.end
    }

    /// Whether `0 <= x < size` and `0 <= y < size`.
    pub fn contains(&self, x: i32, y: i32) -> bool {
        in_bounds(self.size, x, y)
    }

    /// Whether `(x, y)` is blocked. Cells outside the grid are never obstacles.
    pub fn is_obstacle(&self, x: i32, y: i32) -> bool {
        self.contains(x, y) && self.obstacles.get(x, y)
    }

    /// Whether `point` lies on the grid and is not blocked.
    pub fn is_free(&self, point: Point) -> bool {
        self.contains(point.x, point.y) && !self.obstacles.get(point.x, point.y)
    }

    /// The cell at `(x, y)`, or [None] if it lies outside the grid. Cells are identified
    /// by their coordinates, so the same arguments always give an equal cell. The grid only
    /// knows cell identities; the [Cell](crate::Cell) records with their parent links belong
    /// to a single search and live in its [ParentLinks](crate::ParentLinks).
    pub fn cell_at(&self, x: i32, y: i32) -> Option<Point> {
        self.contains(x, y).then(|| Point::new(x, y))
    }

    /// Iterates over all blocked cells in row-major order.
    pub fn obstacles(&self) -> impl Iterator<Item = Point> + '_ {
        let n = self.side();
        (0..n)
            .flat_map(move |y| (0..n).map(move |x| Point::new(x, y)))
            .filter(move |p| self.obstacles.get(p.x, p.y))
    }

    /// Checks whether `a` and `b` are free cells in the same 4-connected component.
    pub fn reachable(&self, a: &Point, b: &Point) -> bool {
        self.is_free(*a) && self.is_free(*b) && self.components.equiv(self.ix(a), self.ix(b))
    }

    /// Renders the grid like [Display](fmt::Display) but with the cells of `path` marked
    /// by `*`.
    pub fn render_path(&self, path: &[Point]) -> String {
        let on_path: FxHashSet<Point> = path.iter().copied().collect();
        self.render(|p| on_path.contains(p))
    }

    /// The size as a coordinate bound; [Grid::new] guarantees it fits.
    fn side(&self) -> i32 {
        self.size as i32
    }

    fn ix(&self, p: &Point) -> usize {
        p.y as usize * self.size + p.x as usize
    }

    /// Links up free grid neighbours into the same components. Only the up and right
    /// neighbours need to be visited since links are symmetric.
    fn generate_components(&mut self) {
        let n = self.side();
        for x in 0..n {
            for y in 0..n {
                let point = Point::new(x, y);
                if !self.is_free(point) {
                    continue;
                }
                let point_ix = self.ix(&point);
                for neighbour in [Point::new(x, y + 1), Point::new(x + 1, y)] {
                    if self.is_free(neighbour) {
                        let neighbour_ix = self.ix(&neighbour);
                        self.components.union(point_ix, neighbour_ix);
                    }
                }
            }
        }
    }

    fn render<F>(&self, marked: F) -> String
    where
        F: Fn(&Point) -> bool,
    {
        let n = self.side();
        let mut out = String::with_capacity(self.size * (self.size + 1));
        for y in (0..n).rev() {
            for x in 0..n {
                let p = Point::new(x, y);
                let c = if p == self.start {
                    'S'
                } else if p == self.end {
                    'E'
                } else if self.obstacles.get(x, y) {
                    '#'
                } else if marked(&p) {
                    '*'
                } else {
                    '.'
                };
                out.push(c);
            }
            out.push('\n');
        }
        out
    }
}

fn coordinate_limit(size: usize) -> Result<i32, ConfigError> {
    i32::try_from(size).map_err(|_| ConfigError::TooLarge(size))
}

fn in_bounds(size: usize, x: i32, y: i32) -> bool {
    x >= 0 && y >= 0 && (x as usize) < size && (y as usize) < size
}

/// Top row first, `S` marks the start, `E` the end and `#` an obstacle.
impl fmt::Display for Grid {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.render(|_| false))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Corresponds to the following 3x3 grid:
    ///  ___
    /// | # |
    /// |S#E|
    /// | # |
    ///  ___
    fn walled() -> Grid {
        let wall = [Point::new(1, 0), Point::new(1, 1), Point::new(1, 2)];
        Grid::new(3, wall, Point::new(0, 1), Point::new(2, 1)).unwrap()
    }

    #[test]
    fn bounds_and_obstacles() {
        let grid = walled();
        assert!(grid.contains(0, 0));
        assert!(grid.contains(2, 2));
        assert!(!grid.contains(3, 0));
        assert!(!grid.contains(0, -1));
        assert!(grid.is_obstacle(1, 2));
        assert!(!grid.is_obstacle(0, 2));
        assert!(!grid.is_obstacle(-1, 0));
        assert_eq!(grid.cell_at(2, 1), Some(Point::new(2, 1)));
        assert_eq!(grid.cell_at(2, 3), None);
        assert_eq!(grid.obstacles().count(), 3);
    }

    #[test]
    fn rejects_invalid_configurations() {
        let p = Point::new(0, 0);
        let q = Point::new(1, 1);
        assert_eq!(Grid::open(0, p, q).unwrap_err(), ConfigError::EmptyGrid);
        assert_eq!(
            Grid::open(2, Point::new(2, 0), q).unwrap_err(),
            ConfigError::StartOutOfBounds(Point::new(2, 0))
        );
        assert_eq!(
            Grid::open(2, p, Point::new(0, -1)).unwrap_err(),
            ConfigError::EndOutOfBounds(Point::new(0, -1))
        );
        assert_eq!(Grid::new(2, [p], p, q).unwrap_err(), ConfigError::StartBlocked(p));
        assert_eq!(Grid::new(2, [q], p, q).unwrap_err(), ConfigError::EndBlocked(q));
        assert_eq!(Grid::open(2, q, q).unwrap_err(), ConfigError::StartIsEnd(q));
    }

    #[test]
    fn drops_obstacles_outside_grid() {
        let outside = [Point::new(5, 5), Point::new(-1, 0)];
        let grid = Grid::new(3, outside, Point::new(0, 0), Point::new(2, 2)).unwrap();
        assert_eq!(grid.obstacles().count(), 0);
    }

    #[test]
    fn rects_are_clipped() {
        let grid =
            Grid::with_rects(4, [(2, -1, 5, 2), (0, 3, 1, 1)], Point::new(0, 0), Point::new(1, 1))
                .unwrap();
        let blocked: Vec<Point> = grid.obstacles().collect();
        assert_eq!(
            blocked,
            vec![Point::new(2, 0), Point::new(3, 0), Point::new(0, 3)]
        );
    }

    #[test]
    fn rects_near_coordinate_limit_are_clipped() {
        let rects = [(i32::MAX - 1, 0, 5, 1), (2, 1, i32::MAX, 1), (0, 3, 1, i32::MAX)];
        let grid = Grid::with_rects(4, rects, Point::new(0, 0), Point::new(1, 1)).unwrap();
        let blocked: Vec<Point> = grid.obstacles().collect();
        assert_eq!(
            blocked,
            vec![Point::new(2, 1), Point::new(3, 1), Point::new(0, 3)]
        );
    }

    #[test]
    fn rejects_sizes_beyond_coordinates() {
        let size = i32::MAX as usize + 1;
        let (p, q) = (Point::new(0, 0), Point::new(1, 1));
        assert_eq!(Grid::open(size, p, q).unwrap_err(), ConfigError::TooLarge(size));
        assert_eq!(
            Grid::with_rects(size, [(0, 0, 1, 1)], p, q).unwrap_err(),
            ConfigError::TooLarge(size)
        );
    }

    #[test]
    fn cell_at_matches_search_cells() {
        use crate::ParentLinks;
        let grid = walled();
        let start = grid.cell_at(0, 1).unwrap();
        assert_eq!(start, grid.start());
        let links = ParentLinks::new(start);
        let cell = links.cell(&grid.cell_at(0, 1).unwrap()).unwrap();
        assert_eq!(cell.point, grid.start());
        assert!(!cell.has_parent());
    }

    /// Tests whether cells are correctly mapped to different connected components
    #[test]
    fn component_generation() {
        let grid = walled();
        assert!(!grid.reachable(&grid.start(), &grid.end()));
        assert!(grid.reachable(&Point::new(0, 0), &Point::new(0, 2)));
        assert!(!grid.reachable(&Point::new(0, 0), &Point::new(1, 1)));
        let open = Grid::open(3, Point::new(0, 0), Point::new(2, 2)).unwrap();
        assert!(open.reachable(&open.start(), &open.end()));
    }

    #[test]
    fn display() {
        let grid = walled();
        assert_eq!(grid.to_string(), ".#.\nS#E\n.#.\n");
        let open = Grid::open(3, Point::new(0, 0), Point::new(2, 0)).unwrap();
        let path = [Point::new(0, 0), Point::new(1, 0), Point::new(2, 0)];
        assert_eq!(open.render_path(&path), "...\n...\nS*E\n");
    }
}
