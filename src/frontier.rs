use fxhash::FxHashSet;
use grid_util::point::Point;
use std::collections::VecDeque;

/// Discovered cells awaiting expansion. A queue gives the first-in-first-out order and a
/// companion set answers membership queries; both are updated together so that a cell is
/// queued at most once.
#[derive(Clone, Debug, Default)]
pub struct Frontier {
    queue: VecDeque<Point>,
    members: FxHashSet<Point>,
}

impl Frontier {
    pub fn new() -> Frontier {
        Frontier::default()
    }

    /// Appends `point` unless it is already queued. Returns whether it was appended.
    pub fn push(&mut self, point: Point) -> bool {
        if !self.members.insert(point) {
            return false;
        }
        self.queue.push_back(point);
        debug_assert_eq!(self.queue.len(), self.members.len());
        true
    }

    /// Removes and returns the earliest queued cell.
    pub fn pop(&mut self) -> Option<Point> {
        let point = self.queue.pop_front()?;
        let removed = self.members.remove(&point);
        debug_assert!(removed, "frontier queue and set out of sync at {}", point);
        Some(point)
    }

    pub fn contains(&self, point: &Point) -> bool {
        self.members.contains(point)
    }

    pub fn len(&self) -> usize {
        self.queue.len()
    }

    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }

    /// Iterates over the queued cells, earliest first.
    pub fn iter(&self) -> impl Iterator<Item = &Point> + '_ {
        self.queue.iter()
    }
}

/// Cells that have been expanded. Only ever grows during a search.
#[derive(Clone, Debug, Default)]
pub struct VisitedSet {
    cells: FxHashSet<Point>,
}

impl VisitedSet {
    pub fn new() -> VisitedSet {
        VisitedSet::default()
    }

    /// Marks `point` as expanded. Returns whether it was not marked before.
    pub fn insert(&mut self, point: Point) -> bool {
        self.cells.insert(point)
    }

    pub fn contains(&self, point: &Point) -> bool {
        self.cells.contains(point)
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Iterates over the expanded cells in no particular order.
    pub fn iter(&self) -> impl Iterator<Item = &Point> + '_ {
        self.cells.iter()
    }
}
