use fxhash::FxBuildHasher;
use grid_util::point::Point;
use indexmap::map::Entry::{Occupied, Vacant};
use indexmap::IndexMap;
use std::hash::{Hash, Hasher};

type FxIndexMap<K, V> = IndexMap<K, V, FxBuildHasher>;

/// Parent index of the root cell.
const ROOT: usize = usize::MAX;

/// A discovered cell together with the neighbour that first discovered it. Cells are
/// identified by their coordinates alone.
#[derive(Clone, Copy, Debug)]
pub struct Cell {
    pub point: Point,
    pub parent: Option<Point>,
}

impl Cell {
    pub fn has_parent(&self) -> bool {
        self.parent.is_some()
    }
}

impl PartialEq for Cell {
    fn eq(&self, other: &Self) -> bool {
        self.point == other.point
    }
}

impl Eq for Cell {}

impl Hash for Cell {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.point.hash(state);
    }
}

/// Per-search arena of discovered cells in discovery order. Every cell stores the index
/// of its parent, so a parent is always recorded before any of its children and walking
/// parents strictly decreases the index until the root is reached.
#[derive(Clone, Debug)]
pub struct ParentLinks {
    root: Point,
    cells: FxIndexMap<Point, usize>,
}

impl ParentLinks {
    /// Creates the links of a search rooted at `root`, which never gets a parent.
    pub fn new(root: Point) -> ParentLinks {
        let mut cells = FxIndexMap::default();
        cells.insert(root, ROOT);
        ParentLinks { root, cells }
    }

    pub fn root(&self) -> Point {
        self.root
    }

    /// Records `parent` as the parent of `child` unless `child` was already discovered.
    /// Returns whether a link was created.
    ///
    /// # Panics
    ///
    /// Panics if `parent` itself was never discovered.
    pub fn link(&mut self, child: Point, parent: Point) -> bool {
        let parent_ix = match self.cells.get_index_of(&parent) {
            Some(ix) => ix,
            None => panic!("{} linked to undiscovered parent {}", child, parent),
        };
        match self.cells.entry(child) {
            Vacant(e) => {
                e.insert(parent_ix);
                true
            }
            Occupied(_) => false,
        }
    }

    pub fn contains(&self, point: &Point) -> bool {
        self.cells.contains_key(point)
    }

    pub fn parent_of(&self, point: &Point) -> Option<Point> {
        let &parent_ix = self.cells.get(point)?;
        self.cells.get_index(parent_ix).map(|(p, _)| *p)
    }

    pub fn has_parent(&self, point: &Point) -> bool {
        self.parent_of(point).is_some()
    }

    pub fn cell(&self, point: &Point) -> Option<Cell> {
        self.contains(point).then(|| Cell {
            point: *point,
            parent: self.parent_of(point),
        })
    }

    /// Number of discovered cells, including the root.
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Iterates over the discovered cells in discovery order.
    pub fn iter(&self) -> impl Iterator<Item = Cell> + '_ {
        self.cells.iter().map(|(point, &parent_ix)| Cell {
            point: *point,
            parent: self.cells.get_index(parent_ix).map(|(p, _)| *p),
        })
    }

    /// Walks the parent links from `point` back to the root and returns the visited cells
    /// ordered from root to `point`. Returns [None] if `point` was never discovered.
    ///
    /// # Panics
    ///
    /// Panics if the walk takes more steps than there are discovered cells, which can only
    /// happen if the links contain a cycle.
    pub fn path_to(&self, point: &Point) -> Option<Vec<Point>> {
        let mut ix = self.cells.get_index_of(point)?;
        let mut path = Vec::new();
        while let Some((p, &parent_ix)) = self.cells.get_index(ix) {
            assert!(
                path.len() < self.cells.len(),
                "cycle in parent links while walking back from {}",
                point
            );
            path.push(*p);
            ix = parent_ix;
        }
        path.reverse();
        Some(path)
    }
}
