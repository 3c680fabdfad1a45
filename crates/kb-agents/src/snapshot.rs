//! Per-tick perception handed to a worker right before it acts.

use std::collections::BTreeMap;

use rustc_hash::{FxHashMap, FxHashSet};

use kb_core::{GridPos, OrderId, StationKind, TaskId, TaskKind, Tick};
use kb_grid::KitchenLayout;
use kb_model::KitchenState;

/// The parts of a task a worker needs to plan for it.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub struct TaskBrief {
    pub id: TaskId,
    pub kind: TaskKind,
    pub station: StationKind,
    pub order: OrderId,
}

/// Owned, full-observability view of the kitchen from one worker's seat.
///
/// Built by the tick loop immediately before the worker is activated, so it
/// already reflects every move made by agents activated earlier in the same
/// tick.  Nothing in it borrows from `KitchenState`.
#[derive(Clone, Debug, Default)]
pub struct Snapshot {
    pub tick: Tick,
    pub position: GridPos,
    pub inventory: Vec<String>,
    /// Station kind → cells, in layout order.
    pub stations: BTreeMap<StationKind, Vec<GridPos>>,
    /// Station cell → `true` if not free.
    pub occupancy: FxHashMap<GridPos, bool>,
    /// Cells held by every other agent, the coordinator included.
    pub others: FxHashSet<GridPos>,
    pub assigned: Option<TaskBrief>,
    pub clean_plates: usize,
}

impl Snapshot {
    /// Capture the world as seen by an agent standing on `position`.
    ///
    /// `assigned` is looked up in the order book; an id with no task behind
    /// it is treated as no assignment.
    pub fn capture(
        state:     &KitchenState,
        layout:    &KitchenLayout,
        position:  GridPos,
        inventory: &[String],
        assigned:  Option<TaskId>,
        others:    impl IntoIterator<Item = GridPos>,
    ) -> Self {
        let assigned = assigned.and_then(|id| state.orders.task(id)).map(|t| TaskBrief {
            id: t.id,
            kind: t.kind,
            station: t.station,
            order: t.order,
        });
        Self {
            tick: state.now,
            position,
            inventory: inventory.to_vec(),
            stations: layout.station_index(),
            occupancy: state.stations.occupancy(),
            others: others.into_iter().collect(),
            assigned,
            clean_plates: state.plates.clean_count(),
        }
    }
}
