//! Pathfinding trait and default A* implementation.
//!
//! # Pluggability
//!
//! Workers call pathfinding through the [`Pathfinder`] trait, so a run can
//! swap in a different search (flow fields, reservation tables) without
//! touching the agent code.  The default [`AStarPathfinder`] is what the
//! brigade uses.
//!
//! # Obstacles
//!
//! A cell is an obstacle if it is in the caller's `blocked` set (other
//! agents' current cells) or is a non-walkable station cell.  The goal cell
//! is exempt from the station rule so a path can end on a station, but it is
//! not exempt from `blocked`.

use std::cmp::Reverse;
use std::collections::BinaryHeap;

use rustc_hash::{FxHashMap, FxHashSet};

use kb_core::GridPos;

use crate::layout::KitchenLayout;
use crate::{GridError, GridResult};

// ── Pathfinder trait ──────────────────────────────────────────────────────────

/// Pluggable grid search.
pub trait Pathfinder: Send + Sync {
    /// Shortest 4-connected path from `start` to `goal`.
    ///
    /// The returned sequence includes both endpoints; `start == goal` yields
    /// `[start]`.  Fails with [`GridError::NoPath`] if the goal cannot be
    /// reached and [`GridError::OutOfBounds`] if either endpoint is off the
    /// grid.
    fn find_path(
        &self,
        layout: &KitchenLayout,
        start: GridPos,
        goal: GridPos,
        blocked: &FxHashSet<GridPos>,
    ) -> GridResult<Vec<GridPos>>;
}

// ── AStarPathfinder ───────────────────────────────────────────────────────────

/// A* with a Manhattan heuristic and unit step cost.
///
/// Ties on `f` are broken by insertion order into the open set, and
/// neighbours are expanded in `GridPos::neighbors` order, so the same inputs
/// always produce the same path.
#[derive(Copy, Clone, Debug, Default)]
pub struct AStarPathfinder;

impl Pathfinder for AStarPathfinder {
    fn find_path(
        &self,
        layout: &KitchenLayout,
        start: GridPos,
        goal: GridPos,
        blocked: &FxHashSet<GridPos>,
    ) -> GridResult<Vec<GridPos>> {
        for pos in [start, goal] {
            if !layout.in_bounds(pos) {
                return Err(GridError::OutOfBounds {
                    pos,
                    width: layout.width(),
                    height: layout.height(),
                });
            }
        }
        astar(layout, start, goal, blocked)
    }
}

// ── A* internals ──────────────────────────────────────────────────────────────

fn astar(
    layout: &KitchenLayout,
    start: GridPos,
    goal: GridPos,
    blocked: &FxHashSet<GridPos>,
) -> GridResult<Vec<GridPos>> {
    if start == goal {
        return Ok(vec![start]);
    }

    let passable = |pos: GridPos| {
        layout.in_bounds(pos)
            && !blocked.contains(&pos)
            && (pos == goal || !layout.non_walkable().contains(&pos))
    };

    let mut g_score: FxHashMap<GridPos, u32> = FxHashMap::default();
    let mut came_from: FxHashMap<GridPos, GridPos> = FxHashMap::default();
    let mut in_open: FxHashSet<GridPos> = FxHashSet::default();

    // Min-heap on (f, insertion counter).  The counter makes ordering total
    // and FIFO among equal f.
    let mut heap: BinaryHeap<Reverse<(u32, u64, GridPos)>> = BinaryHeap::new();
    let mut counter: u64 = 0;

    g_score.insert(start, 0);
    heap.push(Reverse((start.manhattan(goal), counter, start)));
    in_open.insert(start);

    while let Some(Reverse((_, _, current))) = heap.pop() {
        in_open.remove(&current);

        if current == goal {
            return Ok(reconstruct(&came_from, start, goal));
        }

        let g = g_score.get(&current).copied().unwrap_or(u32::MAX);

        for neighbor in current.neighbors() {
            if !passable(neighbor) {
                continue;
            }
            let tentative = g.saturating_add(1);
            let better = g_score.get(&neighbor).is_none_or(|&old| tentative < old);
            if better {
                came_from.insert(neighbor, current);
                g_score.insert(neighbor, tentative);
                if in_open.insert(neighbor) {
                    counter += 1;
                    heap.push(Reverse((tentative + neighbor.manhattan(goal), counter, neighbor)));
                }
            }
        }
    }

    Err(GridError::NoPath { from: start, to: goal })
}

fn reconstruct(
    came_from: &FxHashMap<GridPos, GridPos>,
    start: GridPos,
    goal: GridPos,
) -> Vec<GridPos> {
    let mut path = vec![goal];
    let mut cur = goal;
    while let Some(&prev) = came_from.get(&cur) {
        path.push(prev);
        cur = prev;
        if cur == start {
            break;
        }
    }
    path.reverse();
    path
}
