//! `KitchenState`: the aggregate every agent reads and mutates.

use kb_core::{OrderId, Tick};
use kb_grid::KitchenLayout;

use crate::event::{EventLog, KitchenEvent};
use crate::order::OrderBook;
use crate::plate::PlateRack;
use crate::recipe::Recipe;
use crate::station::StationStore;

/// Orders, stations, plates and the event buffer for one run.
///
/// Agents receive `&mut KitchenState` one at a time during the activation
/// phase, so the station state machines need no locking.
#[derive(Debug)]
pub struct KitchenState {
    /// Tick currently being processed.
    pub now: Tick,
    pub orders: OrderBook,
    pub stations: StationStore,
    pub plates: PlateRack,
    pub events: EventLog,
}

impl KitchenState {
    pub fn new(layout: &KitchenLayout, total_plates: u32) -> Self {
        Self {
            now: Tick::ZERO,
            orders: OrderBook::new(),
            stations: StationStore::from_layout(layout),
            plates: PlateRack::new(total_plates),
            events: EventLog::new(),
        }
    }

    /// Buffer `event` stamped with the current tick.
    #[inline]
    pub fn record(&mut self, event: KitchenEvent) {
        self.events.push(self.now, event);
    }

    /// Create an order for `recipe` and give it the first clean plate, if any.
    pub fn open_order(&mut self, recipe: &Recipe) -> OrderId {
        let id = self.orders.create_order(recipe, self.now);
        let plate = self.plates.assign(id);
        if let Some(o) = self.orders.order_mut(id) {
            o.plate = plate;
        }
        self.record(KitchenEvent::OrderCreated {
            order: id,
            recipe: recipe.key.clone(),
            time_limit: recipe.time_limit,
            plate,
        });
        id
    }

    /// Count every active order down one tick.  Orders that time out are
    /// failed and their plates go dirty.
    pub fn expire_orders(&mut self) -> Vec<OrderId> {
        let failed = self.orders.tick_all();
        for &id in &failed {
            let Some(order) = self.orders.order(id) else { continue };
            let (recipe, plate) = (order.recipe.clone(), order.plate);
            if let Some(p) = plate {
                self.plates.mark_dirty(p);
            }
            self.record(KitchenEvent::OrderFailed { order: id, recipe });
        }
        failed
    }

    /// Finalize a fully-prepared order and send its plate to the dirty pile.
    /// Returns `false` if the order was already terminal.
    pub fn close_order(&mut self, id: OrderId) -> bool {
        if !self.orders.finalize(id) {
            return false;
        }
        let Some(order) = self.orders.order(id) else { return false };
        let (recipe, time_remaining, plate) = (order.recipe.clone(), order.time_remaining, order.plate);
        if let Some(p) = plate {
            self.plates.mark_dirty(p);
        }
        self.record(KitchenEvent::OrderCompleted { order: id, recipe, time_remaining });
        true
    }
}
