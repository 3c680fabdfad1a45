//! Read-only collaborators shared by every agent activation in a tick.

use kb_core::KitchenConfig;
use kb_grid::{KitchenLayout, Pathfinder};

use crate::hook::ReassignmentHook;

/// Everything an agent may consult but never mutate.
///
/// Built once per tick by the kitchen and passed by reference to each
/// activation.  Mutable world state travels separately as
/// `&mut KitchenState`.
pub struct AgentContext<'a> {
    pub layout:     &'a KitchenLayout,
    pub pathfinder: &'a dyn Pathfinder,
    pub config:     &'a KitchenConfig,
    pub hook:       &'a dyn ReassignmentHook,
}

impl<'a> AgentContext<'a> {
    #[inline]
    pub fn new(
        layout:     &'a KitchenLayout,
        pathfinder: &'a dyn Pathfinder,
        config:     &'a KitchenConfig,
        hook:       &'a dyn ReassignmentHook,
    ) -> Self {
        Self { layout, pathfinder, config, hook }
    }
}
