//! `kb-agents`: the coordinator and the BDI line workers.
//!
//! # Crate layout
//!
//! | Module          | Contents                                                       |
//! |-----------------|----------------------------------------------------------------|
//! | [`snapshot`]    | `Snapshot`, `TaskBrief`: owned per-tick perception             |
//! | [`bdi`]         | `Belief`, `Desire`/`Desires`, `PlanStep`, `Intention`, `Deliberator` |
//! | [`worker`]      | `Worker`, `WorkerState`, the plan interpreter                  |
//! | [`coordinator`] | `Coordinator`: queueing, plate watchdog, bidding allocator     |
//! | [`hook`]        | `ReassignmentHook` trait, `NoReassignment`                     |
//! | [`context`]     | `AgentContext<'a>`, read-only collaborators for one tick       |
//! | [`error`]       | `AgentError`, `AgentResult<T>`                                 |
//!
//! # Ownership
//!
//! Agents never point at each other or into the world.  The kitchen owns the
//! coordinator, the workers and the `KitchenState`, and activates one agent
//! at a time with `&mut KitchenState`.  Everything else is referenced by id:
//! a worker reports a finished `TaskId` back to the caller, which forwards it
//! to [`Coordinator::report_completion`].

pub mod bdi;
pub mod context;
pub mod coordinator;
pub mod error;
pub mod hook;
pub mod snapshot;
pub mod worker;


pub use bdi::{Belief, Deliberator, Desire, Desires, Intention, PlanStep};
pub use context::AgentContext;
pub use coordinator::Coordinator;
pub use error::{AgentError, AgentResult};
pub use hook::{NoReassignment, ReassignmentHook};
pub use snapshot::{Snapshot, TaskBrief};
pub use worker::{Worker, WorkerState};
