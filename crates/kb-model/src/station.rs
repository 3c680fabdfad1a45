//! Stations: exclusive-use facilities with a cooking sub-state and a FIFO
//! wait queue.
//!
//! # State machine
//!
//! ```text
//!            occupy(w)                      start_cooking(t, w, d)
//!   Free ─────────────▶ Held(w) ───────────────────────────────┐
//!    ▲  ◀───────────────  │                                     ▼
//!    │      release()     │                          Cooking{t, w, d}
//!    │                    └── release() only from Held           │
//!    └─────────────── tick_cooking() reaches 0 ──────────────────┘
//! ```
//!
//! `start_cooking` also works directly from `Free`.  The cooking starter is
//! not a holder: once it walks away, the station is busy but owned by no
//! worker.  A station is in exactly one of the three sub-states at any time,
//! and the holder of a `Held` station is never in its own wait queue.

use std::collections::VecDeque;

use rustc_hash::FxHashMap;

use kb_core::{GridPos, StationId, StationKind, TaskId, WorkerId};
use kb_grid::KitchenLayout;

// ── StationState ──────────────────────────────────────────────────────────────

#[derive(Copy, Clone, PartialEq, Eq, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum StationState {
    #[default]
    Free,
    Held(WorkerId),
    Cooking {
        task: TaskId,
        starter: WorkerId,
        remaining: u32,
    },
}

/// Emitted by [`Station::tick_cooking`] when an unattended task finishes.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub struct CookingDone {
    pub station: StationId,
    pub task: TaskId,
    pub starter: WorkerId,
}

// ── Station ───────────────────────────────────────────────────────────────────

#[derive(Clone, Debug)]
pub struct Station {
    pub id: StationId,
    pub kind: StationKind,
    pub pos: GridPos,
    state: StationState,
    queue: VecDeque<WorkerId>,
}

impl Station {
    pub fn new(id: StationId, kind: StationKind, pos: GridPos) -> Self {
        Self { id, kind, pos, state: StationState::Free, queue: VecDeque::new() }
    }

    #[inline]
    pub fn state(&self) -> StationState {
        self.state
    }

    #[inline]
    pub fn is_free(&self) -> bool {
        self.state == StationState::Free
    }

    #[inline]
    pub fn is_cooking(&self) -> bool {
        matches!(self.state, StationState::Cooking { .. })
    }

    pub fn holder(&self) -> Option<WorkerId> {
        match self.state {
            StationState::Held(w) => Some(w),
            _ => None,
        }
    }

    /// Ticks left on the current cook, 0 when not cooking.
    pub fn cooking_remaining(&self) -> u32 {
        match self.state {
            StationState::Cooking { remaining, .. } => remaining,
            _ => 0,
        }
    }

    // ── Transitions ───────────────────────────────────────────────────────

    /// Free → Held(worker).  Fails in any other state; the caller is expected
    /// to [`enqueue`](Self::enqueue) and retry next tick.
    pub fn occupy(&mut self, worker: WorkerId) -> bool {
        if self.state != StationState::Free {
            return false;
        }
        self.state = StationState::Held(worker);
        self.remove_from_queue(worker);
        true
    }

    /// Held → Free.  Returns the head of the wait queue, if any, without
    /// granting it the station; that worker acquires on its own next attempt.
    /// A cooking station is left untouched.
    pub fn release(&mut self) -> Option<WorkerId> {
        if let StationState::Held(_) = self.state {
            self.state = StationState::Free;
        }
        self.queue.front().copied()
    }

    /// Enter the cooking sub-state for `duration` ticks.  Allowed from Free,
    /// or from Held by the same worker.
    pub fn start_cooking(&mut self, task: TaskId, worker: WorkerId, duration: u32) -> bool {
        match self.state {
            StationState::Free => {}
            StationState::Held(h) if h == worker => {}
            _ => return false,
        }
        self.state = StationState::Cooking { task, starter: worker, remaining: duration.max(1) };
        self.remove_from_queue(worker);
        true
    }

    /// Count the cook down one tick.  On the tick it reaches zero the station
    /// frees itself and reports what finished.
    pub fn tick_cooking(&mut self) -> Option<CookingDone> {
        let StationState::Cooking { task, starter, remaining } = self.state else {
            return None;
        };
        let remaining = remaining.saturating_sub(1);
        if remaining == 0 {
            self.state = StationState::Free;
            return Some(CookingDone { station: self.id, task, starter });
        }
        self.state = StationState::Cooking { task, starter, remaining };
        None
    }

    // ── Wait queue ────────────────────────────────────────────────────────

    /// Join the back of the queue.  No-op for the current holder or a worker
    /// already queued.
    pub fn enqueue(&mut self, worker: WorkerId) -> bool {
        if self.holder() == Some(worker) || self.queue.contains(&worker) {
            return false;
        }
        self.queue.push_back(worker);
        true
    }

    pub fn remove_from_queue(&mut self, worker: WorkerId) {
        self.queue.retain(|&w| w != worker);
    }

    /// 0-based position in the wait queue.
    pub fn queue_position(&self, worker: WorkerId) -> Option<usize> {
        self.queue.iter().position(|&w| w == worker)
    }

    pub fn queue(&self) -> impl Iterator<Item = WorkerId> + '_ {
        self.queue.iter().copied()
    }

    pub fn queue_len(&self) -> usize {
        self.queue.len()
    }
}

// ── StationStore ──────────────────────────────────────────────────────────────

/// Every station in the kitchen, indexed by `StationId` (layout insertion
/// order) with a position lookup.
#[derive(Clone, Debug, Default)]
pub struct StationStore {
    stations: Vec<Station>,
    by_pos: FxHashMap<GridPos, StationId>,
}

impl StationStore {
    pub fn from_layout(layout: &KitchenLayout) -> Self {
        let mut stations = Vec::with_capacity(layout.station_count());
        let mut by_pos = FxHashMap::default();
        for (i, site) in layout.sites().iter().enumerate() {
            let id = StationId(i as u32);
            stations.push(Station::new(id, site.kind, site.pos));
            by_pos.insert(site.pos, id);
        }
        Self { stations, by_pos }
    }

    #[inline]
    pub fn get(&self, id: StationId) -> Option<&Station> {
        self.stations.get(id.index())
    }

    #[inline]
    pub fn get_mut(&mut self, id: StationId) -> Option<&mut Station> {
        self.stations.get_mut(id.index())
    }

    #[inline]
    pub fn id_at(&self, pos: GridPos) -> Option<StationId> {
        self.by_pos.get(&pos).copied()
    }

    pub fn at(&self, pos: GridPos) -> Option<&Station> {
        self.id_at(pos).and_then(|id| self.get(id))
    }

    pub fn at_mut(&mut self, pos: GridPos) -> Option<&mut Station> {
        let id = self.id_at(pos)?;
        self.get_mut(id)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Station> {
        self.stations.iter()
    }

    pub fn len(&self) -> usize {
        self.stations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stations.is_empty()
    }

    /// Advance every cooking station.  Returns the cooks that finished this
    /// tick in station-id order.
    pub fn tick_cooking(&mut self) -> Vec<CookingDone> {
        self.stations.iter_mut().filter_map(Station::tick_cooking).collect()
    }

    /// `pos → occupied` for every station.  A station is occupied unless it
    /// is `Free`.
    pub fn occupancy(&self) -> FxHashMap<GridPos, bool> {
        self.stations.iter().map(|s| (s.pos, !s.is_free())).collect()
    }
}
