//! Extension seam for workers that give up waiting on a station.

use kb_core::{StationKind, TaskId, WorkerId};
use kb_model::KitchenState;

/// Called when a worker has waited longer than `max_resource_wait` ticks for
/// a station.
///
/// The worker resets its wait counter after the call and keeps waiting.  An
/// implementation that wants to move the task elsewhere can inspect (and
/// mutate) the kitchen through `state`.
pub trait ReassignmentHook: Send + Sync {
    fn request_reassignment(
        &self,
        worker:  WorkerId,
        task:    TaskId,
        station: StationKind,
        state:   &mut KitchenState,
    );
}

/// The brigade default: waiting workers keep waiting.
#[derive(Copy, Clone, Debug, Default)]
pub struct NoReassignment;

impl ReassignmentHook for NoReassignment {
    fn request_reassignment(
        &self,
        _worker:  WorkerId,
        _task:    TaskId,
        _station: StationKind,
        _state:   &mut KitchenState,
    ) {
    }
}
