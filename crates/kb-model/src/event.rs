//! Typed kitchen events and the per-tick event buffer.
//!
//! Core logic never writes to a log sink directly.  It pushes
//! [`KitchenEvent`]s into the [`EventLog`] on `KitchenState`; the tick loop
//! drains the log once per tick and hands the batch to whatever observer the
//! caller injected.

use std::fmt;

use kb_core::{OrderId, PlateId, StationKind, TaskId, TaskKind, Tick, WorkerId};

// ── Outcome ───────────────────────────────────────────────────────────────────

/// Terminal result of a game.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum Outcome {
    Win,
    Lose,
}

impl Outcome {
    pub fn as_str(self) -> &'static str {
        match self {
            Outcome::Win  => "win",
            Outcome::Lose => "lose",
        }
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ── BidRecord ─────────────────────────────────────────────────────────────────

/// One worker's bid on one task.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BidRecord {
    pub worker: WorkerId,
    pub distance: u32,
    pub workload: u32,
    pub score: f64,
    pub winner: bool,
}

// ── KitchenEvent ──────────────────────────────────────────────────────────────

#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum KitchenEvent {
    OrderCreated { order: OrderId, recipe: String, time_limit: u32, plate: Option<PlateId> },
    OrderCompleted { order: OrderId, recipe: String, time_remaining: u32 },
    OrderFailed { order: OrderId, recipe: String },

    TaskQueued { task: TaskId, kind: TaskKind, order: OrderId },
    BidsEvaluated { task: TaskId, kind: TaskKind, bids: Vec<BidRecord> },
    TaskAwarded { task: TaskId, kind: TaskKind, order: OrderId, worker: WorkerId },
    WashRequested { clean_plates: usize },

    IntentionFormed { worker: WorkerId, goal: String, plan: Vec<String> },
    Arrived { worker: WorkerId, station: StationKind },
    WaitingForStation { worker: WorkerId, station: StationKind, waited: u32 },
    ReassignmentRequested { worker: WorkerId, task: TaskId },
    WorkStarted { worker: WorkerId, kind: TaskKind, duration: u32, unattended: bool },
    WorkCompleted { worker: WorkerId, kind: TaskKind, order: OrderId },
    IngredientsRetrieved { worker: WorkerId, ingredients: Vec<String> },
    LeftUnattended { worker: WorkerId, kind: TaskKind, station: StationKind },
    PlateWashed { worker: WorkerId, plate: PlateId },
    WorkerIdle { worker: WorkerId },

    CookingFinished { station: StationKind, kind: TaskKind, order: OrderId },

    GameOver { outcome: Outcome, completed: usize, failed: usize },
}

impl KitchenEvent {
    /// Stable snake_case tag, used as the `event` column in traces.
    pub fn label(&self) -> &'static str {
        match self {
            KitchenEvent::OrderCreated { .. }          => "order_created",
            KitchenEvent::OrderCompleted { .. }        => "order_completed",
            KitchenEvent::OrderFailed { .. }           => "order_failed",
            KitchenEvent::TaskQueued { .. }            => "task_queued",
            KitchenEvent::BidsEvaluated { .. }         => "bids_evaluated",
            KitchenEvent::TaskAwarded { .. }           => "task_awarded",
            KitchenEvent::WashRequested { .. }         => "wash_requested",
            KitchenEvent::IntentionFormed { .. }       => "intention_formed",
            KitchenEvent::Arrived { .. }               => "arrived",
            KitchenEvent::WaitingForStation { .. }     => "waiting_for_station",
            KitchenEvent::ReassignmentRequested { .. } => "reassignment_requested",
            KitchenEvent::WorkStarted { .. }           => "work_started",
            KitchenEvent::WorkCompleted { .. }         => "work_completed",
            KitchenEvent::IngredientsRetrieved { .. }  => "ingredients_retrieved",
            KitchenEvent::LeftUnattended { .. }        => "left_unattended",
            KitchenEvent::PlateWashed { .. }           => "plate_washed",
            KitchenEvent::WorkerIdle { .. }            => "worker_idle",
            KitchenEvent::CookingFinished { .. }       => "cooking_finished",
            KitchenEvent::GameOver { .. }              => "game_over",
        }
    }

    /// The worker the event is about, if any.
    pub fn worker(&self) -> Option<WorkerId> {
        match self {
            KitchenEvent::TaskAwarded { worker, .. }
            | KitchenEvent::IntentionFormed { worker, .. }
            | KitchenEvent::Arrived { worker, .. }
            | KitchenEvent::WaitingForStation { worker, .. }
            | KitchenEvent::ReassignmentRequested { worker, .. }
            | KitchenEvent::WorkStarted { worker, .. }
            | KitchenEvent::WorkCompleted { worker, .. }
            | KitchenEvent::IngredientsRetrieved { worker, .. }
            | KitchenEvent::LeftUnattended { worker, .. }
            | KitchenEvent::PlateWashed { worker, .. }
            | KitchenEvent::WorkerIdle { worker } => Some(*worker),
            _ => None,
        }
    }

    /// The order the event is about, if any.  Maintenance work reports `None`.
    pub fn order(&self) -> Option<OrderId> {
        let order = match self {
            KitchenEvent::OrderCreated { order, .. }
            | KitchenEvent::OrderCompleted { order, .. }
            | KitchenEvent::OrderFailed { order, .. }
            | KitchenEvent::TaskQueued { order, .. }
            | KitchenEvent::TaskAwarded { order, .. }
            | KitchenEvent::WorkCompleted { order, .. }
            | KitchenEvent::CookingFinished { order, .. } => *order,
            _ => return None,
        };
        order.is_valid().then_some(order)
    }
}

impl fmt::Display for KitchenEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            KitchenEvent::OrderCreated { order, recipe, time_limit, plate } => {
                write!(f, "order #{} for {recipe} ({time_limit} ticks)", order.0)?;
                match plate {
                    Some(p) => write!(f, " on plate {}", p.0),
                    None => f.write_str(" with no clean plate"),
                }
            }
            KitchenEvent::OrderCompleted { order, recipe, time_remaining } => {
                write!(f, "order #{} {recipe} completed with {time_remaining} ticks to spare", order.0)
            }
            KitchenEvent::OrderFailed { order, recipe } => {
                write!(f, "order #{} {recipe} ran out of time", order.0)
            }
            KitchenEvent::TaskQueued { kind, order, .. } => {
                write!(f, "queued {kind} for order #{}", order.0)
            }
            KitchenEvent::BidsEvaluated { kind, bids, .. } => {
                write!(f, "bids for {kind}:")?;
                for b in bids {
                    write!(
                        f,
                        " [cook {} d={} w={} s={:.2}{}]",
                        b.worker.0,
                        b.distance,
                        b.workload,
                        b.score,
                        if b.winner { " *" } else { "" }
                    )?;
                }
                Ok(())
            }
            KitchenEvent::TaskAwarded { kind, order, worker, .. } => {
                if order.is_valid() {
                    write!(f, "{kind} for order #{} awarded to cook {}", order.0, worker.0)
                } else {
                    write!(f, "{kind} awarded to cook {}", worker.0)
                }
            }
            KitchenEvent::WashRequested { clean_plates } => {
                write!(f, "only {clean_plates} clean plates left, dish washing requested")
            }
            KitchenEvent::IntentionFormed { worker, goal, plan } => {
                write!(f, "cook {} intends {goal}: {}", worker.0, plan.join(" -> "))
            }
            KitchenEvent::Arrived { worker, station } => {
                write!(f, "cook {} arrived at {station}", worker.0)
            }
            KitchenEvent::WaitingForStation { worker, station, waited } => {
                write!(f, "cook {} waiting for {station} ({waited} ticks)", worker.0)
            }
            KitchenEvent::ReassignmentRequested { worker, task } => {
                write!(f, "cook {} gave up waiting on task {}", worker.0, task.0)
            }
            KitchenEvent::WorkStarted { worker, kind, duration, unattended } => {
                write!(f, "cook {} started {kind} ({duration} ticks", worker.0)?;
                f.write_str(if *unattended { ", unattended)" } else { ")" })
            }
            KitchenEvent::WorkCompleted { worker, kind, .. } => {
                write!(f, "cook {} finished {kind}", worker.0)
            }
            KitchenEvent::IngredientsRetrieved { worker, ingredients } => {
                write!(f, "cook {} picked up {}", worker.0, ingredients.join(", "))
            }
            KitchenEvent::LeftUnattended { worker, kind, station } => {
                write!(f, "cook {} left {kind} running on the {station}", worker.0)
            }
            KitchenEvent::PlateWashed { worker, plate } => {
                write!(f, "cook {} washed plate {}", worker.0, plate.0)
            }
            KitchenEvent::WorkerIdle { worker } => write!(f, "cook {} is idle", worker.0),
            KitchenEvent::CookingFinished { station, kind, .. } => {
                write!(f, "{kind} on the {station} is done")
            }
            KitchenEvent::GameOver { outcome, completed, failed } => {
                write!(f, "game over ({outcome}): {completed} completed, {failed} failed")
            }
        }
    }
}

// ── EventLog ──────────────────────────────────────────────────────────────────

#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TimedEvent {
    pub tick: Tick,
    pub event: KitchenEvent,
}

/// Append-only buffer drained once per tick.
#[derive(Clone, Debug, Default)]
pub struct EventLog {
    events: Vec<TimedEvent>,
}

impl EventLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, tick: Tick, event: KitchenEvent) {
        self.events.push(TimedEvent { tick, event });
    }

    /// Take every buffered event, leaving the log empty.
    pub fn drain(&mut self) -> Vec<TimedEvent> {
        std::mem::take(&mut self.events)
    }

    pub fn iter(&self) -> impl Iterator<Item = &TimedEvent> {
        self.events.iter()
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }
}
