//! The coordinator: turns pending subtasks into awards by per-tick bidding.
//!
//! # Per-tick algorithm
//!
//! 1. **Pull**: queue every pending subtask of every active order that is
//!    not already queued.
//! 2. **Prune**: drop queued tasks whose order already completed or failed.
//! 3. **Watchdog**: if clean plates are below `min_clean_plates`, at least
//!    one plate is dirty, and no wash is outstanding, put a wash task at the
//!    head of the queue.
//! 4. **Sort**: stable ascending sort by urgency (the order's
//!    `time_remaining`; maintenance tasks are 0).
//! 5. **Bid**: for each task, every worker still in the pool bids
//!    `distance_weight · distance + workload_weight · workload`.  Lowest
//!    score wins; ties go to the lowest worker id.  The winner leaves the
//!    pool.  Unawarded tasks stay queued for the next tick.
//! 6. **Step aside** if standing on a worker's target or path.
//!
//! Workload is `2·[has current task] + 2·backlog + 5·[awarded this tick]`.

use rustc_hash::FxHashSet;
use tracing::{debug, info, warn};

use kb_core::{GridPos, OrderId, StationKind, TaskId, TaskKind, WorkerId};
use kb_grid::KitchenLayout;
use kb_model::{BidRecord, KitchenEvent, KitchenState, TaskStatus, TaskTemplate};

use crate::context::AgentContext;
use crate::error::{AgentError, AgentResult};
use crate::worker::Worker;

#[derive(Clone, Debug)]
pub struct Coordinator {
    pos: GridPos,
    queue: Vec<TaskId>,
    wash_requested: bool,
    awarded: FxHashSet<WorkerId>,
}

impl Coordinator {
    pub fn new(pos: GridPos) -> Self {
        Self { pos, queue: Vec::new(), wash_requested: false, awarded: FxHashSet::default() }
    }

    #[inline]
    pub fn position(&self) -> GridPos {
        self.pos
    }

    /// Tasks waiting for a worker, in allocation order as of the last sort.
    pub fn queue(&self) -> &[TaskId] {
        &self.queue
    }

    pub fn wash_requested(&self) -> bool {
        self.wash_requested
    }

    pub fn status(&self) -> String {
        if self.queue.is_empty() {
            "Monitoring kitchen".to_owned()
        } else {
            format!("Distributing {} tasks", self.queue.len())
        }
    }

    // ── Tick ──────────────────────────────────────────────────────────────

    pub fn step(&mut self, state: &mut KitchenState, workers: &mut [Worker], ctx: &AgentContext<'_>) {
        self.awarded.clear();
        self.pull_pending(state);
        self.prune(state);
        self.watch_plates(state, ctx.config.min_clean_plates);
        self.sort_by_urgency(state);
        self.allocate(state, workers, ctx);
        self.step_aside(workers, ctx.layout);
    }

    fn pull_pending(&mut self, state: &mut KitchenState) {
        for task in state.orders.pending_tasks() {
            if self.queue.contains(&task) {
                continue;
            }
            self.queue.push(task);
            if let Some(t) = state.orders.task(task) {
                let (kind, order) = (t.kind, t.order);
                state.record(KitchenEvent::TaskQueued { task, kind, order });
            }
        }
    }

    fn prune(&mut self, state: &KitchenState) {
        self.queue.retain(|&t| !state.orders.is_orphaned(t));
    }

    fn watch_plates(&mut self, state: &mut KitchenState, min_clean: usize) {
        if self.wash_requested {
            return;
        }
        let clean = state.plates.clean_count();
        if clean >= min_clean || state.plates.dirty_count() == 0 {
            return;
        }
        let wash = state.orders.add_maintenance_task(&TaskTemplate::wash_dish());
        self.queue.insert(0, wash);
        self.wash_requested = true;
        info!(clean_plates = clean, task = wash.0, "dish washing requested");
        state.record(KitchenEvent::WashRequested { clean_plates: clean });
    }

    fn sort_by_urgency(&mut self, state: &KitchenState) {
        self.queue.sort_by_key(|&t| state.orders.urgency(t));
    }

    // ── Bidding ───────────────────────────────────────────────────────────

    /// A worker may bid if it has no current task, or if its backlog is
    /// empty and it has not won anything yet this tick.
    pub fn is_available(&self, worker: &Worker) -> bool {
        worker.current_task().is_none()
            || (worker.backlog_len() == 0 && !self.awarded.contains(&worker.id()))
    }

    /// Score `worker`'s bid for work at a `station` kind.
    pub fn bid(
        &self,
        worker:  &Worker,
        station: StationKind,
        state:   &KitchenState,
        ctx:     &AgentContext<'_>,
    ) -> BidRecord {
        let here = worker.position();
        let nearest = |free_only: bool| {
            state
                .stations
                .iter()
                .filter(|s| s.kind == station && (!free_only || s.is_free()))
                .map(|s| here.manhattan(s.pos))
                .min()
        };
        let distance = nearest(true)
            .or_else(|| nearest(false))
            .unwrap_or(ctx.config.unreachable_distance);

        let mut workload = 2 * worker.backlog_len() as u32;
        if worker.current_task().is_some() {
            workload += 2;
        }
        if self.awarded.contains(&worker.id()) {
            workload += 5;
        }

        let score = ctx.config.distance_weight * f64::from(distance)
            + ctx.config.workload_weight * f64::from(workload);
        BidRecord { worker: worker.id(), distance, workload, score, winner: false }
    }

    fn allocate(&mut self, state: &mut KitchenState, workers: &mut [Worker], ctx: &AgentContext<'_>) {
        let mut pool: Vec<usize> = (0..workers.len()).filter(|&i| self.is_available(&workers[i])).collect();
        if pool.is_empty() || self.queue.is_empty() {
            return;
        }

        let queue = std::mem::take(&mut self.queue);
        let mut leftover = Vec::new();
        for task in queue {
            if pool.is_empty() {
                leftover.push(task);
                continue;
            }
            let Some(t) = state.orders.task(task) else { continue };
            if t.status != TaskStatus::Pending {
                continue;
            }
            let (kind, station) = (t.kind, t.station);

            let mut bids: Vec<BidRecord> =
                pool.iter().map(|&i| self.bid(&workers[i], station, state, ctx)).collect();
            let mut best = 0;
            for (slot, b) in bids.iter().enumerate().skip(1) {
                if b.score < bids[best].score {
                    best = slot;
                }
            }
            bids[best].winner = true;
            state.record(KitchenEvent::BidsEvaluated { task, kind, bids });

            let winner = pool.remove(best);
            if let Err(e) = self.award(task, &mut workers[winner], state) {
                warn!(error = %e, "award skipped");
            }
        }
        self.queue = leftover;
    }

    /// Hand `task` to `worker`.  The task becomes Assigned, its order moves
    /// to InProgress, and the worker either starts it or queues it.
    pub fn award(&mut self, task: TaskId, worker: &mut Worker, state: &mut KitchenState) -> AgentResult<()> {
        let t = state.orders.task_mut(task).ok_or(AgentError::UnknownTask(task))?;
        if t.status != TaskStatus::Pending {
            return Err(AgentError::NotPending(task));
        }
        t.assign(worker.id());
        let (kind, order) = (t.kind, t.order);
        if let Some(o) = state.orders.order_mut(order) {
            o.mark_started();
        }
        self.awarded.insert(worker.id());
        self.queue.retain(|&q| q != task);

        debug!(task = task.0, kind = %kind, order = order.0, worker = worker.id().0, "task awarded");
        state.record(KitchenEvent::TaskAwarded { task, kind, order, worker: worker.id() });
        worker.award(task, state);
        Ok(())
    }

    // ── Completion ────────────────────────────────────────────────────────

    /// A worker (or a cooking station) finished `task`.  Returns the order
    /// if this completed it.
    pub fn report_completion(&mut self, task: TaskId, state: &mut KitchenState) -> Option<OrderId> {
        let t = state.orders.task(task)?;
        if t.is_maintenance() {
            if t.kind == TaskKind::WashDish {
                self.wash_requested = false;
            }
            if let Some(t) = state.orders.task_mut(task) {
                t.complete();
            }
            return None;
        }
        let order = state.orders.complete_subtask(task)?;
        state.close_order(order).then_some(order)
    }

    // ── Movement ──────────────────────────────────────────────────────────

    fn step_aside(&mut self, workers: &[Worker], layout: &KitchenLayout) {
        let in_the_way = workers
            .iter()
            .any(|w| w.target() == Some(self.pos) || w.path().contains(&self.pos));
        if !in_the_way {
            return;
        }
        let occupied: FxHashSet<GridPos> = workers.iter().map(Worker::position).collect();
        if let Some(cell) = self
            .pos
            .neighbors()
            .into_iter()
            .find(|&n| layout.in_bounds(n) && !layout.is_station(n) && !occupied.contains(&n))
        {
            self.pos = cell;
        }
    }
}
