//! Line workers: a plan interpreter driven by the BDI deliberator.
//!
//! # Per-tick flow
//!
//! ```text
//! step(snapshot)
//!   ├─ perceive: belief ← snapshot
//!   ├─ no current task ─▶ Idle (start the next backlog task, if any)
//!   └─ deliberate ─▶ dispatch on the step under the intention's cursor
//!        move_to_<station>   walk up to `movement_budget` cells
//!        wait_for_<station>  acquire the station or queue for it
//!        execute_<kind>      attended: one progress unit; unattended: start cooking and leave
//!        retrieve_ingredients  attended work that fills the inventory
//!        report_completion   hand the task back to the kitchen
//! ```
//!
//! Nothing here fails.  A missing station, an unreachable cell or an occupied
//! resource leaves the worker where it is, to try again next tick.

use std::collections::VecDeque;
use std::fmt;

use rustc_hash::FxHashSet;
use tracing::{debug, trace};

use kb_core::{GridPos, StationKind, TaskId, TaskKind, WorkerId};
use kb_grid::KitchenLayout;
use kb_model::{KitchenEvent, KitchenState};

use crate::bdi::{Deliberator, Intention, PlanStep};
use crate::context::AgentContext;
use crate::snapshot::{Snapshot, TaskBrief};

// ── WorkerState ───────────────────────────────────────────────────────────────

/// Coarse activity, set by whichever plan step ran last.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug, Default)]
pub enum WorkerState {
    #[default]
    Idle,
    Moving,
    Working,
    WaitingForResource,
    WaitingForPath,
}

impl WorkerState {
    pub fn as_str(self) -> &'static str {
        match self {
            WorkerState::Idle               => "idle",
            WorkerState::Moving             => "moving",
            WorkerState::Working            => "working",
            WorkerState::WaitingForResource => "waiting_resource",
            WorkerState::WaitingForPath     => "waiting_path",
        }
    }
}

impl fmt::Display for WorkerState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ── Worker ────────────────────────────────────────────────────────────────────

#[derive(Clone, Debug)]
pub struct Worker {
    id: WorkerId,
    pos: GridPos,
    state: WorkerState,

    current: Option<TaskId>,
    backlog: VecDeque<TaskId>,
    inventory: Vec<String>,
    mind: Deliberator,

    /// Cell the worker is walking to.
    target: Option<GridPos>,
    /// Remaining cells to `target`, start excluded.
    path: VecDeque<GridPos>,
    /// Station cell picked for the current task.
    station: Option<GridPos>,

    work_timer: u32,
    wait_timer: u32,
    path_wait: u32,
}

impl Worker {
    pub fn new(id: WorkerId, pos: GridPos) -> Self {
        Self {
            id,
            pos,
            state: WorkerState::Idle,
            current: None,
            backlog: VecDeque::new(),
            inventory: Vec::new(),
            mind: Deliberator::new(),
            target: None,
            path: VecDeque::new(),
            station: None,
            work_timer: 0,
            wait_timer: 0,
            path_wait: 0,
        }
    }

    // ── Accessors ─────────────────────────────────────────────────────────

    #[inline]
    pub fn id(&self) -> WorkerId {
        self.id
    }

    #[inline]
    pub fn position(&self) -> GridPos {
        self.pos
    }

    #[inline]
    pub fn state(&self) -> WorkerState {
        self.state
    }

    pub fn current_task(&self) -> Option<TaskId> {
        self.current
    }

    pub fn backlog(&self) -> impl Iterator<Item = TaskId> + '_ {
        self.backlog.iter().copied()
    }

    pub fn backlog_len(&self) -> usize {
        self.backlog.len()
    }

    /// `true` when there is no current task.
    pub fn is_idle(&self) -> bool {
        self.current.is_none()
    }

    pub fn inventory(&self) -> &[String] {
        &self.inventory
    }

    pub fn target(&self) -> Option<GridPos> {
        self.target
    }

    pub fn path(&self) -> &VecDeque<GridPos> {
        &self.path
    }

    pub fn intention(&self) -> Option<&Intention> {
        self.mind.intention()
    }

    pub fn deliberator(&self) -> &Deliberator {
        &self.mind
    }

    pub fn wait_ticks(&self) -> u32 {
        self.wait_timer
    }

    /// This worker's view of the kitchen, for feeding back into
    /// [`step`](Self::step).
    pub fn snapshot(
        &self,
        state:  &KitchenState,
        layout: &KitchenLayout,
        others: impl IntoIterator<Item = GridPos>,
    ) -> Snapshot {
        Snapshot::capture(state, layout, self.pos, &self.inventory, self.current, others)
    }

    /// One-line description for display.
    pub fn status(&self, state: &KitchenState) -> String {
        let task = self.current.and_then(|t| state.orders.task(t));
        match (self.state, task) {
            (WorkerState::Idle, _) => "Idle".to_owned(),
            (WorkerState::Moving, Some(t)) => format!("Moving to {}", t.station),
            (WorkerState::Moving, None) => "Moving".to_owned(),
            (WorkerState::Working, Some(t)) => format!("{} [{}/{}]", t.kind, t.progress, t.duration),
            (WorkerState::Working, None) => "Working".to_owned(),
            (WorkerState::WaitingForResource, _) => {
                format!("Waiting for resource ({} steps)", self.wait_timer)
            }
            (WorkerState::WaitingForPath, _) => "Waiting for path".to_owned(),
        }
    }

    // ── Assignment ────────────────────────────────────────────────────────

    /// Accept an awarded task.  An idle worker starts on it at once; a busy
    /// one appends it to the backlog.
    pub fn award(&mut self, task: TaskId, state: &mut KitchenState) {
        if self.current.is_none() {
            self.begin(task, state);
        } else {
            self.backlog.push_back(task);
        }
    }

    fn begin(&mut self, task: TaskId, state: &mut KitchenState) {
        let Some(t) = state.orders.task_mut(task) else { return };
        t.start();
        let brief = TaskBrief { id: t.id, kind: t.kind, station: t.station, order: t.order };

        self.current = Some(task);
        self.state = WorkerState::Moving;
        let intention = self.mind.adopt(brief);
        let (goal, plan) = (intention.goal().to_owned(), intention.step_names());
        debug!(worker = self.id.0, task = task.0, kind = %brief.kind, "intention formed");
        state.record(KitchenEvent::IntentionFormed { worker: self.id, goal, plan });
    }

    // ── Tick ──────────────────────────────────────────────────────────────

    /// Act once.  Returns the task whose completion must be reported to the
    /// coordinator, if this step reached `report_completion`.
    pub fn step(
        &mut self,
        snapshot: Snapshot,
        state:    &mut KitchenState,
        ctx:      &AgentContext<'_>,
    ) -> Option<TaskId> {
        self.mind.perceive(snapshot);

        let Some(task) = self.current else {
            self.state = WorkerState::Idle;
            if let Some(next) = self.backlog.pop_front() {
                self.begin(next, state);
            }
            return None;
        };

        let step = self.mind.deliberate().current();
        match step {
            None => self.finish(state),
            Some(PlanStep::MoveTo(kind)) => self.move_to(kind, state, ctx),
            Some(PlanStep::WaitFor(kind)) => self.wait_for(kind, task, state, ctx),
            Some(PlanStep::Execute(kind)) => self.execute(kind, task, state),
            Some(PlanStep::RetrieveIngredients) => self.retrieve(task, state),
            Some(PlanStep::ReportCompletion) => return Some(self.report(task, state)),
            Some(PlanStep::WaitForTask) => self.state = WorkerState::Idle,
        }
        None
    }

    fn advance_plan(&mut self) {
        if let Some(i) = self.mind.intention_mut() {
            i.advance();
        }
    }

    // ── move_to ───────────────────────────────────────────────────────────

    fn move_to(&mut self, kind: StationKind, state: &mut KitchenState, ctx: &AgentContext<'_>) {
        self.state = WorkerState::Moving;
        let blocked = self.mind.belief().others().clone();

        if self.target.is_none() || self.path.is_empty() {
            let Some(station) = self.mind.belief().preferred_station(kind) else {
                trace!(worker = self.id.0, station = %kind, "no station of this kind");
                return;
            };
            self.station = Some(station);
            let target = if kind.is_walkable() {
                station
            } else {
                ctx.layout.adjacent_free_cell(station, &blocked).unwrap_or(station)
            };
            self.target = Some(target);
            self.path = self.plan_path(target, &blocked, ctx);
        }

        if !self.path.is_empty() {
            self.follow_path(&blocked, ctx);
        }

        let at_target = self.target == Some(self.pos);
        let beside_station = !kind.is_walkable()
            && self.station.is_some_and(|s| self.pos.is_adjacent_or_same(s));
        if at_target || beside_station {
            state.record(KitchenEvent::Arrived { worker: self.id, station: kind });
            self.advance_plan();
            self.path.clear();
            self.path_wait = 0;
        }
    }

    fn plan_path(
        &self,
        target:  GridPos,
        blocked: &FxHashSet<GridPos>,
        ctx:     &AgentContext<'_>,
    ) -> VecDeque<GridPos> {
        match ctx.pathfinder.find_path(ctx.layout, self.pos, target, blocked) {
            Ok(cells) => {
                let mut path = VecDeque::from(cells);
                if path.front() == Some(&self.pos) {
                    path.pop_front();
                }
                path
            }
            Err(e) => {
                trace!(worker = self.id.0, error = %e, "path search failed");
                VecDeque::new()
            }
        }
    }

    fn replan_path(&mut self, blocked: &FxHashSet<GridPos>, ctx: &AgentContext<'_>) {
        self.path = match self.target {
            Some(target) => self.plan_path(target, blocked, ctx),
            None => VecDeque::new(),
        };
    }

    fn follow_path(&mut self, blocked: &FxHashSet<GridPos>, ctx: &AgentContext<'_>) {
        let mut budget = ctx.config.movement_budget;
        while budget > 0 {
            let Some(&next) = self.path.front() else { break };

            if blocked.contains(&next) {
                self.path_wait += 1;
                self.state = WorkerState::WaitingForPath;
                if self.path_wait > ctx.config.max_path_wait {
                    self.replan_path(blocked, ctx);
                    self.path_wait = 0;
                }
                return;
            }

            // Stale path through a station: repath now.
            if !ctx.layout.is_walkable(next) && Some(next) != self.target {
                self.replan_path(blocked, ctx);
                return;
            }

            self.pos = next;
            self.path.pop_front();
            self.path_wait = 0;
            budget -= 1;
        }
    }

    // ── wait_for ──────────────────────────────────────────────────────────

    fn wait_for(
        &mut self,
        kind:  StationKind,
        task:  TaskId,
        state: &mut KitchenState,
        ctx:   &AgentContext<'_>,
    ) {
        if kind.is_walkable() {
            self.state = WorkerState::Working;
            self.wait_timer = 0;
            self.advance_plan();
            return;
        }

        if self.station.is_none() {
            self.station = self.mind.belief().nearest_station(kind);
        }
        let Some(station) = self.station.and_then(|p| state.stations.at_mut(p)) else {
            self.advance_plan();
            return;
        };

        if station.occupy(self.id) {
            self.state = WorkerState::Working;
            self.wait_timer = 0;
            self.advance_plan();
            return;
        }
        station.enqueue(self.id);

        self.state = WorkerState::WaitingForResource;
        self.wait_timer += 1;
        state.record(KitchenEvent::WaitingForStation {
            worker: self.id,
            station: kind,
            waited: self.wait_timer,
        });

        if self.wait_timer > ctx.config.max_resource_wait {
            debug!(worker = self.id.0, task = task.0, station = %kind, "wait ceiling reached");
            ctx.hook.request_reassignment(self.id, task, kind, state);
            state.record(KitchenEvent::ReassignmentRequested { worker: self.id, task });
            self.wait_timer = 0;
        }
    }

    // ── execute / retrieve ────────────────────────────────────────────────

    fn execute(&mut self, kind: TaskKind, task: TaskId, state: &mut KitchenState) {
        self.state = WorkerState::Working;
        let station_id = self.station.and_then(|p| state.stations.id_at(p));

        if kind.is_unattended() {
            let Some(sid) = station_id else { return };
            let duration = state.orders.task(task).map_or(0, |t| t.duration);
            let Some(station) = state.stations.get_mut(sid) else { return };
            if station.is_cooking() || !station.start_cooking(task, self.id, duration) {
                return;
            }
            let station_kind = station.kind;

            debug!(worker = self.id.0, task = task.0, kind = %kind, duration, "left cooking");
            state.record(KitchenEvent::WorkStarted { worker: self.id, kind, duration, unattended: true });
            state.record(KitchenEvent::LeftUnattended { worker: self.id, kind, station: station_kind });
            // The cooking tick reports this task; skip straight past report_completion.
            self.finish(state);
            return;
        }

        let Some(done) = self.work_tick(task, kind, state) else { return };
        if !done {
            return;
        }
        let order = state.orders.task(task).map(|t| t.order).unwrap_or_default();
        state.record(KitchenEvent::WorkCompleted { worker: self.id, kind, order });
        if let Some(station) = station_id.and_then(|id| state.stations.get_mut(id)) {
            if station.holder() == Some(self.id) {
                station.release();
            }
            station.remove_from_queue(self.id);
        }
        self.station = None;
        self.target = None;
        self.advance_plan();
    }

    fn retrieve(&mut self, task: TaskId, state: &mut KitchenState) {
        self.state = WorkerState::Working;
        let Some(done) = self.work_tick(task, TaskKind::RetrieveIngredients, state) else {
            return;
        };
        if !done {
            return;
        }
        let ingredients = state.orders.task(task).map(|t| t.ingredients.clone()).unwrap_or_default();
        self.inventory.extend(ingredients.iter().cloned());
        state.record(KitchenEvent::IngredientsRetrieved { worker: self.id, ingredients });
        self.station = None;
        self.target = None;
        self.advance_plan();
    }

    /// One unit of attended work.  `None` if the task is gone, otherwise
    /// whether the task just finished.
    fn work_tick(&mut self, task: TaskId, kind: TaskKind, state: &mut KitchenState) -> Option<bool> {
        let t = state.orders.task_mut(task)?;
        let starting = self.work_timer == 0;
        if starting {
            self.work_timer = t.duration;
        }
        self.work_timer = self.work_timer.saturating_sub(1);
        let done = t.work() || self.work_timer == 0;
        let duration = t.duration;

        if starting {
            state.record(KitchenEvent::WorkStarted { worker: self.id, kind, duration, unattended: false });
        }
        if done {
            self.work_timer = 0;
        }
        Some(done)
    }

    // ── report_completion ─────────────────────────────────────────────────

    fn report(&mut self, task: TaskId, state: &mut KitchenState) -> TaskId {
        let kind = state.orders.task(task).map(|t| t.kind);
        if kind == Some(TaskKind::WashDish) {
            if let Some(plate) = state.plates.wash_one() {
                state.record(KitchenEvent::PlateWashed { worker: self.id, plate });
            }
        }
        if kind == Some(TaskKind::Plate) {
            self.inventory.clear();
        }
        self.finish(state);
        task
    }

    /// Drop every trace of the current task and pick up the next one.
    fn finish(&mut self, state: &mut KitchenState) {
        self.current = None;
        self.mind.drop_intention();
        self.target = None;
        self.path.clear();
        self.station = None;
        self.work_timer = 0;
        self.wait_timer = 0;
        self.path_wait = 0;

        match self.backlog.pop_front() {
            Some(next) => self.begin(next, state),
            None => {
                self.state = WorkerState::Idle;
                state.record(KitchenEvent::WorkerIdle { worker: self.id });
            }
        }
    }
}
