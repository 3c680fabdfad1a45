//! Orders and the order book.
//!
//! # Lifecycle
//!
//! ```text
//! Pending ──first task awarded──▶ InProgress ──all tasks done──▶ Completed
//!    │                                │
//!    └──────────time_remaining hits 0─┴────────────────────────▶ Failed
//! ```
//!
//! Completed and Failed are terminal: once an order reaches either, neither
//! its status nor its `time_remaining` changes again.

use tracing::debug;

use kb_core::{OrderId, PlateId, TaskId, Tick};

use crate::recipe::Recipe;
use crate::task::{Task, TaskStatus, TaskStore, TaskTemplate};

// ── OrderStatus ───────────────────────────────────────────────────────────────

#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum OrderStatus {
    #[default]
    Pending,
    InProgress,
    Completed,
    Failed,
}

impl OrderStatus {
    #[inline]
    pub fn is_terminal(self) -> bool {
        matches!(self, OrderStatus::Completed | OrderStatus::Failed)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            OrderStatus::Pending    => "pending",
            OrderStatus::InProgress => "in_progress",
            OrderStatus::Completed  => "completed",
            OrderStatus::Failed     => "failed",
        }
    }
}

impl std::fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

// ── Order ─────────────────────────────────────────────────────────────────────

#[derive(Clone, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Order {
    pub id: OrderId,
    /// Catalog key of the recipe.
    pub recipe: String,
    pub recipe_name: String,
    pub time_limit: u32,
    pub time_remaining: u32,
    /// Subtasks in chain order.
    pub tasks: Vec<TaskId>,
    pub status: OrderStatus,
    pub plate: Option<PlateId>,
    pub created_at: Tick,
}

impl Order {
    /// Count down one tick.  Returns `true` only on the tick the order fails.
    pub fn tick(&mut self) -> bool {
        if self.status.is_terminal() {
            return false;
        }
        self.time_remaining = self.time_remaining.saturating_sub(1);
        if self.time_remaining == 0 {
            self.status = OrderStatus::Failed;
            return true;
        }
        false
    }

    /// Pending → InProgress.  No-op in any other state.
    pub fn mark_started(&mut self) {
        if self.status == OrderStatus::Pending {
            self.status = OrderStatus::InProgress;
        }
    }

    #[inline]
    pub fn is_terminal(&self) -> bool {
        self.status.is_terminal()
    }
}

// ── OrderBook ─────────────────────────────────────────────────────────────────

/// Every order of the run plus the task arena they index into.
///
/// `active`, `completed` and `failed` partition the order ids; an id moves
/// out of `active` exactly once.
#[derive(Default, Debug)]
pub struct OrderBook {
    orders: Vec<Order>,
    tasks: TaskStore,
    active: Vec<OrderId>,
    completed: Vec<OrderId>,
    failed: Vec<OrderId>,
}

impl OrderBook {
    pub fn new() -> Self {
        Self::default()
    }

    /// Instantiate `recipe` as a new pending order with a full time budget.
    pub fn create_order(&mut self, recipe: &Recipe, now: Tick) -> OrderId {
        let id = OrderId(self.orders.len() as u32);
        let tasks = recipe.tasks.iter().map(|t| self.tasks.insert(t, id)).collect();
        self.orders.push(Order {
            id,
            recipe: recipe.key.clone(),
            recipe_name: recipe.name.clone(),
            time_limit: recipe.time_limit,
            time_remaining: recipe.time_limit,
            tasks,
            status: OrderStatus::Pending,
            plate: None,
            created_at: now,
        });
        self.active.push(id);
        debug!(order = id.0, recipe = %recipe.key, time_limit = recipe.time_limit, "order created");
        id
    }

    /// Add a task that belongs to no order (dish washing).
    pub fn add_maintenance_task(&mut self, template: &TaskTemplate) -> TaskId {
        self.tasks.insert(template, OrderId::INVALID)
    }

    /// Count down every active order.  Orders that run out of time move to
    /// the failed list; their ids are returned.
    pub fn tick_all(&mut self) -> Vec<OrderId> {
        let mut failed_now = Vec::new();
        for &id in &self.active {
            if self.orders[id.index()].tick() {
                failed_now.push(id);
            }
        }
        if !failed_now.is_empty() {
            self.active.retain(|id| !failed_now.contains(id));
            for &id in &failed_now {
                debug!(order = id.0, recipe = %self.orders[id.index()].recipe, "order failed");
            }
            self.failed.extend_from_slice(&failed_now);
        }
        failed_now
    }

    /// Mark `task` complete.  Returns the owning order if that order is still
    /// active and every one of its subtasks is now complete.
    pub fn complete_subtask(&mut self, task: TaskId) -> Option<OrderId> {
        let t = self.tasks.get_mut(task)?;
        t.complete();
        let order = t.order;
        if !order.is_valid() {
            return None;
        }
        let o = self.orders.get(order.index())?;
        if o.is_terminal() {
            return None;
        }
        self.all_subtasks_complete(order).then_some(order)
    }

    /// Move an active order to the completed list.  Returns `false` if the
    /// order is unknown or already terminal.
    pub fn finalize(&mut self, order: OrderId) -> bool {
        let Some(o) = self.orders.get_mut(order.index()) else {
            return false;
        };
        if o.is_terminal() {
            return false;
        }
        o.status = OrderStatus::Completed;
        self.active.retain(|&id| id != order);
        self.completed.push(order);
        debug!(order = order.0, recipe = %o.recipe, time_remaining = o.time_remaining, "order completed");
        true
    }

    pub fn all_subtasks_complete(&self, order: OrderId) -> bool {
        self.orders.get(order.index()).is_some_and(|o| {
            o.tasks.iter().all(|&t| self.tasks.get(t).is_some_and(Task::is_complete))
        })
    }

    /// Percentage of `order`'s subtasks that are complete, in `[0, 100]`.
    pub fn completion_percentage(&self, order: OrderId) -> f64 {
        let Some(o) = self.orders.get(order.index()) else {
            return 0.0;
        };
        if o.tasks.is_empty() {
            return 0.0;
        }
        let done = o
            .tasks
            .iter()
            .filter(|&&t| self.tasks.get(t).is_some_and(Task::is_complete))
            .count();
        done as f64 / o.tasks.len() as f64 * 100.0
    }

    /// Pending subtasks of every active order, in order-then-chain order.
    pub fn pending_tasks(&self) -> Vec<TaskId> {
        self.active
            .iter()
            .flat_map(|&id| self.orders[id.index()].tasks.iter().copied())
            .filter(|&t| self.tasks.get(t).is_some_and(|t| t.status == TaskStatus::Pending))
            .collect()
    }

    /// Sort key for allocation: the owning order's remaining time.
    /// Maintenance tasks are maximally urgent (0); a task whose order cannot
    /// be found sorts last.
    pub fn urgency(&self, task: TaskId) -> u32 {
        match self.tasks.get(task) {
            Some(t) if t.is_maintenance() => 0,
            Some(t) => self.orders.get(t.order.index()).map_or(u32::MAX, |o| o.time_remaining),
            None => u32::MAX,
        }
    }

    /// `true` if `task` belongs to an order that has already completed or
    /// failed.
    pub fn is_orphaned(&self, task: TaskId) -> bool {
        match self.tasks.get(task) {
            Some(t) if t.is_maintenance() => false,
            Some(t) => self.orders.get(t.order.index()).is_none_or(Order::is_terminal),
            None => true,
        }
    }

    // ── Lookup ────────────────────────────────────────────────────────────

    pub fn order(&self, id: OrderId) -> Option<&Order> {
        self.orders.get(id.index())
    }

    pub fn order_mut(&mut self, id: OrderId) -> Option<&mut Order> {
        self.orders.get_mut(id.index())
    }

    pub fn task(&self, id: TaskId) -> Option<&Task> {
        self.tasks.get(id)
    }

    pub fn task_mut(&mut self, id: TaskId) -> Option<&mut Task> {
        self.tasks.get_mut(id)
    }

    pub fn tasks(&self) -> &TaskStore {
        &self.tasks
    }

    pub fn orders(&self) -> impl Iterator<Item = &Order> {
        self.orders.iter()
    }

    // ── Counts ────────────────────────────────────────────────────────────

    pub fn active(&self) -> &[OrderId] {
        &self.active
    }

    pub fn completed(&self) -> &[OrderId] {
        &self.completed
    }

    pub fn failed(&self) -> &[OrderId] {
        &self.failed
    }

    pub fn active_count(&self) -> usize {
        self.active.len()
    }

    pub fn completed_count(&self) -> usize {
        self.completed.len()
    }

    pub fn failed_count(&self) -> usize {
        self.failed.len()
    }
}
