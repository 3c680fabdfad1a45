//! Tasks and the task arena.
//!
//! A [`TaskTemplate`] is the read-only recipe form of a unit of work.  An
//! order instantiates each template into a live [`Task`] stored in the
//! [`TaskStore`] arena; everything else refers to it by `TaskId`.

use kb_core::{OrderId, StationKind, TaskId, TaskKind, WorkerId};

// ── TaskStatus ────────────────────────────────────────────────────────────────

#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum TaskStatus {
    #[default]
    Pending,
    Assigned,
    InProgress,
    Completed,
}

impl TaskStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            TaskStatus::Pending    => "pending",
            TaskStatus::Assigned   => "assigned",
            TaskStatus::InProgress => "in_progress",
            TaskStatus::Completed  => "completed",
        }
    }
}

impl std::fmt::Display for TaskStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

// ── TaskTemplate ──────────────────────────────────────────────────────────────

/// One step of a recipe.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TaskTemplate {
    pub kind: TaskKind,
    /// Kind of station the work is done at.
    pub station: StationKind,
    /// Ticks of work (or of unattended cooking).
    pub duration: u32,
    /// Ingredients picked up by a retrieval step; empty for everything else.
    pub ingredients: Vec<String>,
    pub description: String,
}

impl TaskTemplate {
    /// Template with the kind's standard duration and no ingredients.
    pub fn new(kind: TaskKind, station: StationKind) -> Self {
        Self {
            kind,
            station,
            duration: kind.default_duration(),
            ingredients: Vec::new(),
            description: String::new(),
        }
    }

    /// The synthetic dish-washing job issued by the coordinator.
    pub fn wash_dish() -> Self {
        Self::new(TaskKind::WashDish, StationKind::Sink).describe("Wash dirty dishes")
    }

    pub fn with_duration(mut self, duration: u32) -> Self {
        self.duration = duration;
        self
    }

    pub fn with_ingredients<I, S>(mut self, ingredients: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.ingredients = ingredients.into_iter().map(Into::into).collect();
        self
    }

    pub fn describe(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }
}

// ── Task ──────────────────────────────────────────────────────────────────────

/// A live unit of work belonging to an order (or a maintenance task with
/// `order == OrderId::INVALID`).
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Task {
    pub id: TaskId,
    pub kind: TaskKind,
    pub station: StationKind,
    pub duration: u32,
    pub ingredients: Vec<String>,
    pub description: String,
    pub status: TaskStatus,
    /// Ticks of attended work done so far.
    pub progress: u32,
    pub order: OrderId,
    pub assigned_to: Option<WorkerId>,
}

impl Task {
    /// Fresh copy of `template`: pending, no progress, no worker.
    pub fn from_template(id: TaskId, template: &TaskTemplate, order: OrderId) -> Self {
        Self {
            id,
            kind: template.kind,
            station: template.station,
            duration: template.duration,
            ingredients: template.ingredients.clone(),
            description: template.description.clone(),
            status: TaskStatus::Pending,
            progress: 0,
            order,
            assigned_to: None,
        }
    }

    /// `true` for coordinator-issued tasks that belong to no order.
    #[inline]
    pub fn is_maintenance(&self) -> bool {
        !self.order.is_valid()
    }

    #[inline]
    pub fn is_complete(&self) -> bool {
        self.status == TaskStatus::Completed
    }

    pub fn assign(&mut self, worker: WorkerId) {
        self.status = TaskStatus::Assigned;
        self.assigned_to = Some(worker);
    }

    pub fn start(&mut self) {
        if self.status != TaskStatus::Completed {
            self.status = TaskStatus::InProgress;
        }
    }

    /// One tick of attended work.  Returns `true` once progress reaches the
    /// duration; status is left for the caller to finalise.
    pub fn work(&mut self) -> bool {
        if self.progress < self.duration {
            self.progress += 1;
        }
        self.progress >= self.duration
    }

    pub fn complete(&mut self) {
        self.status = TaskStatus::Completed;
        self.progress = self.duration;
    }
}

// ── TaskStore ─────────────────────────────────────────────────────────────────

/// Arena of every task created during a run, indexed by `TaskId`.  Tasks are
/// never removed.
#[derive(Default, Debug)]
pub struct TaskStore {
    tasks: Vec<Task>,
}

impl TaskStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Instantiate `template` for `order` and return the new id.
    pub fn insert(&mut self, template: &TaskTemplate, order: OrderId) -> TaskId {
        let id = TaskId(self.tasks.len() as u32);
        self.tasks.push(Task::from_template(id, template, order));
        id
    }

    #[inline]
    pub fn get(&self, id: TaskId) -> Option<&Task> {
        self.tasks.get(id.index())
    }

    #[inline]
    pub fn get_mut(&mut self, id: TaskId) -> Option<&mut Task> {
        self.tasks.get_mut(id.index())
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Task> {
        self.tasks.iter()
    }
}
