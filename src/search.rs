use crate::cell::ParentLinks;
use crate::frontier::{Frontier, VisitedSet};
use crate::grid::Grid;
use crate::{is_contiguous, neumann_neighbours, path_cost};
use grid_util::point::Point;
use log::{debug, info};
use std::ops::ControlFlow;

/// Outcome of a search.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SearchResult {
    /// A shortest path from start to end, both inclusive, and its number of steps.
    Found { path: Vec<Point>, cost: usize },
    /// The frontier ran empty without reaching the end.
    NotFound,
    /// The search was stopped by a step budget or an observer before it finished.
    Cancelled { steps: usize },
}

impl SearchResult {
    pub fn is_found(&self) -> bool {
        matches!(self, SearchResult::Found { .. })
    }
    pub fn path(&self) -> Option<&[Point]> {
        match self {
            SearchResult::Found { path, .. } => Some(path),
            _ => None,
        }
    }
    pub fn cost(&self) -> Option<usize> {
        match self {
            SearchResult::Found { cost, .. } => Some(*cost),
            _ => None,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SearchStatus {
    Running,
    Done(SearchResult),
}

/// Read-only view of a search taken right after a cell has been expanded.
#[derive(Clone, Copy, Debug)]
pub struct SearchSnapshot<'a> {
    /// Number of cells expanded so far.
    pub step: usize,
    /// The most recently expanded cell.
    pub expanded: Option<Point>,
    pub frontier: &'a Frontier,
    pub visited: &'a VisitedSet,
}

/// Receives a [SearchSnapshot] after every expansion, for instance to visualize the
/// search. Returning [ControlFlow::Break] cancels the search; the snapshot itself can not
/// influence which path is found.
pub trait SearchObserver {
    fn on_step(&mut self, snapshot: &SearchSnapshot<'_>) -> ControlFlow<()>;
}

impl<F> SearchObserver for F
where
    F: FnMut(&SearchSnapshot<'_>) -> ControlFlow<()>,
{
    fn on_step(&mut self, snapshot: &SearchSnapshot<'_>) -> ControlFlow<()> {
        self(snapshot)
    }
}

struct Unobserved;

impl SearchObserver for Unobserved {
    fn on_step(&mut self, _: &SearchSnapshot<'_>) -> ControlFlow<()> {
        ControlFlow::Continue(())
    }
}

/// State of a single breadth-first search over a borrowed [Grid]. All state that changes
/// during the search lives here, so several searches can share one grid.
///
/// Each call to [step](Self::step) expands exactly one cell, which allows a caller to
/// interleave the search with other work or stop it at any point.
#[derive(Clone, Debug)]
pub struct BfsSearch<'g> {
    grid: &'g Grid,
    frontier: Frontier,
    visited: VisitedSet,
    parents: ParentLinks,
    steps: usize,
    last_expanded: Option<Point>,
    outcome: Option<SearchResult>,
}

impl<'g> BfsSearch<'g> {
    pub fn new(grid: &'g Grid) -> BfsSearch<'g> {
        let start = grid.start();
        debug!("Starting search from {} to {}", start, grid.end());
        let mut frontier = Frontier::new();
        frontier.push(start);
        BfsSearch {
            grid,
            frontier,
            visited: VisitedSet::new(),
            parents: ParentLinks::new(start),
            steps: 0,
            last_expanded: None,
            outcome: None,
        }
    }

    /// Dequeues the earliest discovered cell and expands its neighbours in the order up,
    /// right, down, left. Neighbours outside the grid, blocked or already expanded are
    /// skipped; the others keep the first parent they were discovered from. The search
    /// ends as soon as the end cell is discovered or when nothing is left to expand.
    /// Once done, every further call returns the same result.
    pub fn step(&mut self) -> SearchStatus {
        if let Some(result) = &self.outcome {
            return SearchStatus::Done(result.clone());
        }
        let current = match self.frontier.pop() {
            Some(p) => p,
            None => return self.finish(SearchResult::NotFound),
        };
        let newly_visited = self.visited.insert(current);
        debug_assert!(newly_visited, "{} was expanded twice", current);
        self.steps += 1;
        self.last_expanded = Some(current);

        let end = self.grid.end();
        for next in neumann_neighbours(current) {
            if !self.grid.is_free(next) || self.visited.contains(&next) {
                continue;
            }
            self.parents.link(next, current);
            if next == end {
                let path = self
                    .parents
                    .path_to(&end)
                    .expect("end cell has just been linked");
                debug_assert!(is_contiguous(&path));
                let cost = path_cost(&path);
                return self.finish(SearchResult::Found { path, cost });
            }
            self.frontier.push(next);
        }
        SearchStatus::Running
    }

    /// Steps until the search is done.
    pub fn run(&mut self) -> SearchResult {
        loop {
            if let SearchStatus::Done(result) = self.step() {
                return result;
            }
        }
    }

    pub fn is_done(&self) -> bool {
        self.outcome.is_some()
    }
    pub fn grid(&self) -> &'g Grid {
        self.grid
    }
    pub fn frontier(&self) -> &Frontier {
        &self.frontier
    }
    pub fn visited(&self) -> &VisitedSet {
        &self.visited
    }
    pub fn parents(&self) -> &ParentLinks {
        &self.parents
    }
    /// Number of cells expanded so far.
    pub fn steps(&self) -> usize {
        self.steps
    }

    pub fn snapshot(&self) -> SearchSnapshot<'_> {
        SearchSnapshot {
            step: self.steps,
            expanded: self.last_expanded,
            frontier: &self.frontier,
            visited: &self.visited,
        }
    }

    fn finish(&mut self, result: SearchResult) -> SearchStatus {
        match &result {
            SearchResult::Found { cost, .. } => info!(
                "Found path from {} to {} of cost {} after {} expansions",
                self.grid.start(),
                self.grid.end(),
                cost,
                self.steps
            ),
            _ => info!(
                "{} is not reachable from {}, expanded {} cells",
                self.grid.end(),
                self.grid.start(),
                self.steps
            ),
        }
        self.outcome = Some(result.clone());
        SearchStatus::Done(result)
    }
}

/// Runs breadth-first searches to completion, optionally bounded by
/// [max_steps](Self::max_steps) expansions.
#[derive(Clone, Debug, Default)]
pub struct BfsSolver {
    pub max_steps: Option<usize>,
}

impl BfsSolver {
    pub fn new() -> BfsSolver {
        BfsSolver { max_steps: None }
    }

    pub fn with_max_steps(max_steps: usize) -> BfsSolver {
        BfsSolver {
            max_steps: Some(max_steps),
        }
    }

    /// Computes a shortest path from the start to the end of `grid`. Without a step budget
    /// this never returns [SearchResult::Cancelled].
    pub fn solve(&self, grid: &Grid) -> SearchResult {
        self.solve_observed(grid, &mut Unobserved)
    }

    /// Like [solve](Self::solve), but hands a [SearchSnapshot] to `observer` after every
    /// expansion. The observer can cancel the search by returning [ControlFlow::Break].
    pub fn solve_observed<O>(&self, grid: &Grid, observer: &mut O) -> SearchResult
    where
        O: SearchObserver + ?Sized,
    {
        let mut search = BfsSearch::new(grid);
        loop {
            let out_of_budget = self.max_steps.is_some_and(|max| search.steps() >= max);
            if out_of_budget && !search.frontier().is_empty() {
                return self.cancel(&search);
            }
            let before = search.steps();
            let status = search.step();
            let flow = if search.steps() > before {
                observer.on_step(&search.snapshot())
            } else {
                ControlFlow::Continue(())
            };
            match status {
                SearchStatus::Done(result) => return result,
                SearchStatus::Running if flow.is_break() => return self.cancel(&search),
                SearchStatus::Running => {}
            }
        }
    }

    fn cancel(&self, search: &BfsSearch<'_>) -> SearchResult {
        info!("Search cancelled after {} expansions", search.steps());
        SearchResult::Cancelled {
            steps: search.steps(),
        }
    }
}
