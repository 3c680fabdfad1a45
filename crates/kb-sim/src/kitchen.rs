//! The `Kitchen` struct and its tick loop.

use std::collections::BTreeMap;

use tracing::{debug, info};

use kb_agents::{AgentContext, Coordinator, NoReassignment, ReassignmentHook, Worker};
use kb_core::{ActivationMode, GridPos, KitchenConfig, OrderId, SimRng, StationKind, TaskId, Tick, WorkerId};
use kb_grid::{AStarPathfinder, KitchenLayout, Pathfinder};
use kb_model::{KitchenEvent, KitchenState, ModelError, Outcome, RecipeCatalog};

use crate::{KitchenObserver, SimResult, TickSummary};

/// The main simulation runner.
///
/// `Kitchen<P, H>` owns the world state and every agent, and drives the
/// four-phase tick:
///
/// 1. **Countdowns**: every active order loses one tick (timeouts fail and
///    dirty their plate); every cooking station counts down, and finished
///    cooks are reported to the coordinator.
/// 2. **Arrivals**: if the next order is due, open one for a random recipe
///    and schedule the following arrival.
/// 3. **Activation**: the coordinator and every worker act exactly once, in a
///    seeded permutation (or coordinator-then-workers with
///    [`ActivationMode::InOrder`]).
/// 4. **Outcome**: lose if `failed ≥ lose_threshold`, otherwise win if
///    `completed ≥ win_threshold`.
///
/// Events recorded during the tick are drained to the observer at the end of
/// it.  Create via [`KitchenBuilder`][crate::KitchenBuilder].
pub struct Kitchen<P: Pathfinder = AStarPathfinder, H: ReassignmentHook = NoReassignment> {
    pub(crate) config: KitchenConfig,
    pub(crate) layout: KitchenLayout,
    pub(crate) catalog: RecipeCatalog,
    pub(crate) pathfinder: P,
    pub(crate) hook: H,
    pub(crate) rng: SimRng,

    pub(crate) state: KitchenState,
    pub(crate) coordinator: Coordinator,
    pub(crate) workers: Vec<Worker>,

    /// Tick at which the next automatic order arrives.  `None` when
    /// `auto_orders` is off.
    pub(crate) next_order: Option<Tick>,
    pub(crate) outcome: Option<Outcome>,
}

impl<P: Pathfinder, H: ReassignmentHook> Kitchen<P, H> {
    // ── Running ───────────────────────────────────────────────────────────

    /// Step until the game ends or `config.max_ticks` is reached.
    pub fn run<O: KitchenObserver>(&mut self, observer: &mut O) -> Option<Outcome> {
        while self.outcome.is_none() && self.state.now.0 < self.config.max_ticks {
            self.step(observer);
        }
        observer.on_finish(self.state.now, self.outcome);
        self.outcome
    }

    /// Run at most `n` more ticks, stopping early on an outcome.  Ignores
    /// `max_ticks`.
    pub fn run_ticks<O: KitchenObserver>(&mut self, n: u64, observer: &mut O) -> Option<Outcome> {
        for _ in 0..n {
            if self.outcome.is_some() {
                break;
            }
            self.step(observer);
        }
        self.outcome
    }

    /// Advance one tick.  Does nothing once the game is over.
    pub fn step<O: KitchenObserver>(&mut self, observer: &mut O) -> Option<Outcome> {
        if self.outcome.is_some() {
            return self.outcome;
        }
        self.state.now = self.state.now.next();
        let now = self.state.now;
        observer.on_tick_start(now);

        self.countdowns();
        self.maybe_open_order();
        self.activate_agents();
        self.check_outcome();

        let events = self.state.events.drain();
        if !events.is_empty() {
            observer.on_events(now, &events);
        }
        observer.on_tick_end(&self.summary());
        self.outcome
    }

    /// Open an order for `recipe` right now, outside the arrival schedule.
    pub fn inject_order(&mut self, recipe: &str) -> SimResult<OrderId> {
        let recipe = self
            .catalog
            .get(recipe)
            .ok_or_else(|| ModelError::UnknownRecipe(recipe.to_owned()))?;
        let id = self.state.open_order(recipe);
        info!(tick = self.state.now.0, order = id.0, recipe = %recipe.key, "order injected");
        Ok(id)
    }

    // ── Tick phases ───────────────────────────────────────────────────────

    fn countdowns(&mut self) {
        for order in self.state.expire_orders() {
            info!(tick = self.state.now.0, order = order.0, "order failed");
        }

        for done in self.state.stations.tick_cooking() {
            let (Some(station), Some(task)) =
                (self.state.stations.get(done.station), self.state.orders.task(done.task))
            else {
                continue;
            };
            let (station, kind, order) = (station.kind, task.kind, task.order);
            debug!(task = done.task.0, kind = %kind, station = %station, "cooking finished");
            self.state.record(KitchenEvent::CookingFinished { station, kind, order });
            self.report(done.task);
        }
    }

    fn maybe_open_order(&mut self) {
        let Some(due) = self.next_order else { return };
        let now = self.state.now;
        if now < due {
            return;
        }
        if let Some(recipe) = self.catalog.choose(&mut self.rng) {
            let id = self.state.open_order(recipe);
            info!(tick = now.0, order = id.0, recipe = %recipe.key, "order arrived");
        }
        let gap = self.rng.gen_range(self.config.order_interval_min..=self.config.order_interval_max);
        self.next_order = Some(now + gap);
    }

    fn activate_agents(&mut self) {
        // Slot 0 is the coordinator; slot i + 1 is worker i.
        let slots = self.workers.len() + 1;
        let order: Vec<usize> = match self.config.activation {
            ActivationMode::Shuffled => self.rng.permutation(slots),
            ActivationMode::InOrder => (0..slots).collect(),
        };

        let ctx = AgentContext::new(&self.layout, &self.pathfinder, &self.config, &self.hook);
        for slot in order {
            if slot == 0 {
                self.coordinator.step(&mut self.state, &mut self.workers, &ctx);
                continue;
            }
            let i = slot - 1;
            let others: Vec<GridPos> = self
                .workers
                .iter()
                .enumerate()
                .filter(|&(j, _)| j != i)
                .map(|(_, w)| w.position())
                .chain(std::iter::once(self.coordinator.position()))
                .collect();
            let snapshot = self.workers[i].snapshot(&self.state, &self.layout, others);
            if let Some(task) = self.workers[i].step(snapshot, &mut self.state, &ctx) {
                if let Some(order) = self.coordinator.report_completion(task, &mut self.state) {
                    info!(tick = self.state.now.0, order = order.0, "order completed");
                }
            }
        }
    }

    fn report(&mut self, task: TaskId) {
        if let Some(order) = self.coordinator.report_completion(task, &mut self.state) {
            info!(tick = self.state.now.0, order = order.0, "order completed");
        }
    }

    fn check_outcome(&mut self) {
        let completed = self.state.orders.completed_count();
        let failed = self.state.orders.failed_count();
        let outcome = if failed >= self.config.lose_threshold {
            Outcome::Lose
        } else if completed >= self.config.win_threshold {
            Outcome::Win
        } else {
            return;
        };
        info!(tick = self.state.now.0, %outcome, completed, failed, "game over");
        self.state.record(KitchenEvent::GameOver { outcome, completed, failed });
        self.outcome = Some(outcome);
    }

    // ── Queries ───────────────────────────────────────────────────────────

    pub fn summary(&self) -> TickSummary {
        TickSummary {
            tick:             self.state.now,
            active_orders:    self.state.orders.active_count(),
            completed_orders: self.state.orders.completed_count(),
            failed_orders:    self.state.orders.failed_count(),
            clean_plates:     self.state.plates.clean_count(),
            in_use_plates:    self.state.plates.in_use_count(),
            dirty_plates:     self.state.plates.dirty_count(),
            queued_tasks:     self.coordinator.queue().len(),
            idle_workers:     self.workers.iter().filter(|w| w.is_idle()).count(),
        }
    }

    #[inline]
    pub fn now(&self) -> Tick {
        self.state.now
    }

    pub fn config(&self) -> &KitchenConfig {
        &self.config
    }

    pub fn layout(&self) -> &KitchenLayout {
        &self.layout
    }

    pub fn catalog(&self) -> &RecipeCatalog {
        &self.catalog
    }

    /// Orders, stations, plates and the (already drained) event buffer.
    pub fn state(&self) -> &KitchenState {
        &self.state
    }

    pub fn coordinator(&self) -> &Coordinator {
        &self.coordinator
    }

    pub fn workers(&self) -> &[Worker] {
        &self.workers
    }

    pub fn worker(&self, id: WorkerId) -> Option<&Worker> {
        self.workers.get(id.index())
    }

    /// Station kind → every cell holding one.
    pub fn station_index(&self) -> BTreeMap<StationKind, Vec<GridPos>> {
        self.layout.station_index()
    }

    pub fn clean_plates(&self) -> usize {
        self.state.plates.clean_count()
    }

    pub fn dirty_plates(&self) -> usize {
        self.state.plates.dirty_count()
    }

    pub fn active_orders(&self) -> usize {
        self.state.orders.active_count()
    }

    pub fn completed_orders(&self) -> usize {
        self.state.orders.completed_count()
    }

    pub fn failed_orders(&self) -> usize {
        self.state.orders.failed_count()
    }

    /// `Some` once a threshold has been crossed.
    pub fn outcome(&self) -> Option<Outcome> {
        self.outcome
    }

    pub fn is_over(&self) -> bool {
        self.outcome.is_some()
    }

    /// Tick of the next automatic order, if any.
    pub fn next_order_at(&self) -> Option<Tick> {
        self.next_order
    }

    /// One display line per agent: the coordinator first, then each worker.
    pub fn statuses(&self) -> Vec<String> {
        let mut lines = Vec::with_capacity(self.workers.len() + 1);
        lines.push(format!("coordinator @ {}: {}", self.coordinator.position(), self.coordinator.status()));
        for w in &self.workers {
            lines.push(format!("cook {} @ {}: {}", w.id().0, w.position(), w.status(&self.state)));
        }
        lines
    }
}
