//! Belief-desire-intention machinery for workers.
//!
//! # Loop
//!
//! Every tick a worker hands its fresh [`Snapshot`] to its [`Deliberator`],
//! which overwrites the [`Belief`] wholesale.  The deliberator then decides
//! whether the committed [`Intention`] still fits:
//!
//! | condition                                         | result          |
//! |---------------------------------------------------|-----------------|
//! | no intention                                      | rebuild         |
//! | intention never committed                         | rebuild         |
//! | believed assignment differs from intention's task | rebuild         |
//! | otherwise                                         | keep executing  |
//!
//! Rebuilding only ever yields one of two options: pursue the assigned task,
//! or idle.  [`Desires`] and its priority table are carried along for
//! models that want richer option filtering; nothing in the current loop
//! reads the weights.

use std::fmt;

use rustc_hash::FxHashSet;

use kb_core::{GridPos, StationKind, TaskId, TaskKind};

use crate::snapshot::{Snapshot, TaskBrief};

// ── Belief ────────────────────────────────────────────────────────────────────

/// A worker's picture of the kitchen.  Replaced, never patched.
#[derive(Clone, Debug, Default)]
pub struct Belief {
    snap: Snapshot,
}

impl Belief {
    pub fn revise(&mut self, snapshot: Snapshot) {
        self.snap = snapshot;
    }

    pub fn snapshot(&self) -> &Snapshot {
        &self.snap
    }

    #[inline]
    pub fn position(&self) -> GridPos {
        self.snap.position
    }

    pub fn assigned(&self) -> Option<&TaskBrief> {
        self.snap.assigned.as_ref()
    }

    pub fn others(&self) -> &FxHashSet<GridPos> {
        &self.snap.others
    }

    pub fn clean_plates(&self) -> usize {
        self.snap.clean_plates
    }

    pub fn stations_of(&self, kind: StationKind) -> &[GridPos] {
        self.snap.stations.get(&kind).map(Vec::as_slice).unwrap_or(&[])
    }

    /// A station cell missing from the occupancy map counts as free.
    pub fn is_free(&self, pos: GridPos) -> bool {
        !self.snap.occupancy.get(&pos).copied().unwrap_or(false)
    }

    pub fn free_stations(&self, kind: StationKind) -> impl Iterator<Item = GridPos> + '_ {
        self.stations_of(kind).iter().copied().filter(|&p| self.is_free(p))
    }

    /// Nearest station of `kind` regardless of occupancy.  Ties go to the
    /// first in layout order.
    pub fn nearest_station(&self, kind: StationKind) -> Option<GridPos> {
        let here = self.position();
        self.stations_of(kind).iter().copied().min_by_key(|p| here.manhattan(*p))
    }

    /// Nearest free station of `kind`, falling back to the nearest of any
    /// occupancy.
    pub fn preferred_station(&self, kind: StationKind) -> Option<GridPos> {
        let here = self.position();
        self.free_stations(kind)
            .min_by_key(|p| here.manhattan(*p))
            .or_else(|| self.nearest_station(kind))
    }

    /// Point the belief at a freshly awarded task before the next snapshot
    /// arrives.
    pub(crate) fn set_assigned(&mut self, brief: Option<TaskBrief>) {
        self.snap.assigned = brief;
    }
}

// ── Desires ───────────────────────────────────────────────────────────────────

#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
pub enum Desire {
    CompleteAssignedTask,
    WashDishes,
    AcquireIngredients,
    AccessRequiredResource,
    MinimizeIdleTime,
    AvoidCollisions,
}

impl Desire {
    pub const ALL: [Desire; 6] = [
        Desire::CompleteAssignedTask,
        Desire::WashDishes,
        Desire::AcquireIngredients,
        Desire::AccessRequiredResource,
        Desire::MinimizeIdleTime,
        Desire::AvoidCollisions,
    ];

    /// Static priority weight.  Higher wins.
    pub fn priority_weight(self) -> f64 {
        match self {
            Desire::CompleteAssignedTask   => 1.0,
            Desire::WashDishes             => 0.9,
            Desire::AcquireIngredients     => 0.8,
            Desire::AccessRequiredResource => 0.7,
            Desire::MinimizeIdleTime       => 0.5,
            Desire::AvoidCollisions        => 0.3,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Desire::CompleteAssignedTask   => "complete_assigned_task",
            Desire::WashDishes             => "wash_dishes",
            Desire::AcquireIngredients     => "acquire_ingredients",
            Desire::AccessRequiredResource => "access_required_resource",
            Desire::MinimizeIdleTime       => "minimize_idle_time",
            Desire::AvoidCollisions        => "avoid_collisions",
        }
    }

    #[inline]
    fn slot(self) -> usize {
        self as usize
    }
}

impl fmt::Display for Desire {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Goal flags.  Starts with the assigned-task, idle-time and collision goals
/// active.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Desires {
    active: [bool; 6],
}

impl Default for Desires {
    fn default() -> Self {
        let mut d = Self { active: [false; 6] };
        d.activate(Desire::CompleteAssignedTask);
        d.activate(Desire::MinimizeIdleTime);
        d.activate(Desire::AvoidCollisions);
        d
    }
}

impl Desires {
    pub fn activate(&mut self, desire: Desire) {
        self.active[desire.slot()] = true;
    }

    pub fn deactivate(&mut self, desire: Desire) {
        self.active[desire.slot()] = false;
    }

    pub fn is_active(&self, desire: Desire) -> bool {
        self.active[desire.slot()]
    }

    pub fn active(&self) -> impl Iterator<Item = Desire> + '_ {
        Desire::ALL.into_iter().filter(|d| self.is_active(*d))
    }

    /// Active desire with the largest weight.
    pub fn highest_priority(&self) -> Option<Desire> {
        self.active().max_by(|a, b| a.priority_weight().total_cmp(&b.priority_weight()))
    }
}

// ── PlanStep ──────────────────────────────────────────────────────────────────

/// One action in a worker's plan.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub enum PlanStep {
    MoveTo(StationKind),
    WaitFor(StationKind),
    Execute(TaskKind),
    RetrieveIngredients,
    ReportCompletion,
    WaitForTask,
}

impl fmt::Display for PlanStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PlanStep::MoveTo(k)           => write!(f, "move_to_{k}"),
            PlanStep::WaitFor(k)          => write!(f, "wait_for_{k}"),
            PlanStep::Execute(k)          => write!(f, "execute_{k}"),
            PlanStep::RetrieveIngredients => f.write_str("retrieve_ingredients"),
            PlanStep::ReportCompletion    => f.write_str("report_completion"),
            PlanStep::WaitForTask         => f.write_str("wait_for_task"),
        }
    }
}

// ── Intention ─────────────────────────────────────────────────────────────────

/// A committed goal with its ordered plan and a cursor into it.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Intention {
    goal: String,
    plan: Vec<PlanStep>,
    cursor: usize,
    committed: bool,
    task: Option<TaskId>,
}

impl Intention {
    /// Plan template for `task`.
    pub fn for_task(task: &TaskBrief) -> Self {
        let plan = match task.kind {
            TaskKind::RetrieveIngredients => vec![
                PlanStep::MoveTo(StationKind::Storage),
                PlanStep::WaitFor(StationKind::Storage),
                PlanStep::RetrieveIngredients,
                PlanStep::ReportCompletion,
            ],
            TaskKind::WashDish => vec![
                PlanStep::MoveTo(StationKind::Sink),
                PlanStep::WaitFor(StationKind::Sink),
                PlanStep::Execute(TaskKind::WashDish),
                PlanStep::ReportCompletion,
            ],
            kind => vec![
                PlanStep::MoveTo(task.station),
                PlanStep::WaitFor(task.station),
                PlanStep::Execute(kind),
                PlanStep::ReportCompletion,
            ],
        };
        Self {
            goal: format!("complete_{}_task", task.kind),
            plan,
            cursor: 0,
            committed: false,
            task: Some(task.id),
        }
    }

    /// The fallback when nothing is assigned.  Born committed.
    pub fn idle() -> Self {
        Self {
            goal: "idle".to_owned(),
            plan: vec![PlanStep::WaitForTask],
            cursor: 0,
            committed: true,
            task: None,
        }
    }

    pub fn commit(&mut self) {
        self.committed = true;
    }

    pub fn is_committed(&self) -> bool {
        self.committed
    }

    pub fn goal(&self) -> &str {
        &self.goal
    }

    pub fn plan(&self) -> &[PlanStep] {
        &self.plan
    }

    pub fn task(&self) -> Option<TaskId> {
        self.task
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// Step under the cursor, `None` once the plan is exhausted.
    pub fn current(&self) -> Option<PlanStep> {
        self.plan.get(self.cursor).copied()
    }

    /// Move the cursor forward.  Returns `true` if the plan is now exhausted.
    pub fn advance(&mut self) -> bool {
        if self.cursor < self.plan.len() {
            self.cursor += 1;
        }
        self.is_complete()
    }

    pub fn is_complete(&self) -> bool {
        self.cursor >= self.plan.len()
    }

    /// Step names, e.g. `["move_to_stove", "wait_for_stove", ...]`.
    pub fn step_names(&self) -> Vec<String> {
        self.plan.iter().map(ToString::to_string).collect()
    }
}

// ── Deliberator ───────────────────────────────────────────────────────────────

/// Owns one worker's belief, desires and intention.
#[derive(Clone, Debug, Default)]
pub struct Deliberator {
    belief: Belief,
    desires: Desires,
    intention: Option<Intention>,
}

impl Deliberator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Overwrite the belief with this tick's snapshot.
    pub fn perceive(&mut self, snapshot: Snapshot) {
        self.belief.revise(snapshot);
    }

    pub fn belief(&self) -> &Belief {
        &self.belief
    }

    pub fn desires(&self) -> &Desires {
        &self.desires
    }

    pub fn desires_mut(&mut self) -> &mut Desires {
        &mut self.desires
    }

    pub fn intention(&self) -> Option<&Intention> {
        self.intention.as_ref()
    }

    pub fn intention_mut(&mut self) -> Option<&mut Intention> {
        self.intention.as_mut()
    }

    pub fn should_reconsider(&self) -> bool {
        match &self.intention {
            None => true,
            Some(i) if !i.is_committed() => true,
            Some(i) => i.task() != self.belief.assigned().map(|b| b.id),
        }
    }

    /// Candidate intentions: the assigned task if there is one, else idle.
    pub fn options(&self) -> Vec<Intention> {
        match self.belief.assigned() {
            Some(brief) => vec![Intention::for_task(brief)],
            None => vec![Intention::idle()],
        }
    }

    /// Keep the committed intention, or rebuild it if it no longer matches
    /// the belief.
    pub fn deliberate(&mut self) -> &Intention {
        if self.should_reconsider() {
            let options = self.options();
            let mut chosen = options
                .iter()
                .find(|o| o.task().is_some())
                .or_else(|| options.first())
                .cloned()
                .unwrap_or_else(Intention::idle);
            chosen.commit();
            self.intention = Some(chosen);
        }
        self.intention.get_or_insert_with(Intention::idle)
    }

    /// Commit to `task` immediately, without waiting for the next snapshot.
    pub fn adopt(&mut self, task: TaskBrief) -> &Intention {
        self.belief.set_assigned(Some(task));
        self.desires.activate(Desire::CompleteAssignedTask);
        let mut intention = Intention::for_task(&task);
        intention.commit();
        self.intention.insert(intention)
    }

    /// Forget the current intention and assignment.
    pub fn drop_intention(&mut self) {
        self.intention = None;
        self.belief.set_assigned(None);
    }
}
