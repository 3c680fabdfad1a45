//! Fluent builder for constructing a [`Kitchen`].

use rustc_hash::FxHashSet;

use kb_agents::{Coordinator, NoReassignment, ReassignmentHook, Worker};
use kb_core::{GridPos, KitchenConfig, SimRng, Tick, WorkerId};
use kb_grid::{AStarPathfinder, KitchenLayout, Pathfinder};
use kb_model::{KitchenState, ModelError, RecipeCatalog};

use crate::{Kitchen, SimError, SimResult};

/// Fluent builder for [`Kitchen<P, H>`].
///
/// # Optional inputs (have defaults)
///
/// | Method                   | Default                                   |
/// |--------------------------|-------------------------------------------|
/// | `.layout(l)`             | `KitchenLayout::standard()`               |
/// | `.catalog(c)`            | `RecipeCatalog::standard()`               |
/// | `.positions(c, w)`       | shuffled free floor cells                 |
/// | `.pathfinder(p)`         | `AStarPathfinder`                         |
/// | `.hook(h)`               | `NoReassignment`                          |
///
/// # Example
///
/// ```rust,ignore
/// let mut kitchen = KitchenBuilder::new(KitchenConfig::with_seed(7))
///     .catalog(load_catalog_csv(path)?)
///     .build()?;
/// let outcome = kitchen.run(&mut NoopObserver);
/// ```
pub struct KitchenBuilder<P: Pathfinder = AStarPathfinder, H: ReassignmentHook = NoReassignment> {
    config:     KitchenConfig,
    layout:     Option<KitchenLayout>,
    catalog:    Option<RecipeCatalog>,
    positions:  Option<(GridPos, Vec<GridPos>)>,
    pathfinder: P,
    hook:       H,
}

impl KitchenBuilder {
    pub fn new(config: KitchenConfig) -> Self {
        Self {
            config,
            layout:     None,
            catalog:    None,
            positions:  None,
            pathfinder: AStarPathfinder,
            hook:       NoReassignment,
        }
    }
}

impl<P: Pathfinder, H: ReassignmentHook> KitchenBuilder<P, H> {
    /// Floor plan.  Its dimensions must match `grid_width` × `grid_height`.
    pub fn layout(mut self, layout: KitchenLayout) -> Self {
        self.layout = Some(layout);
        self
    }

    pub fn catalog(mut self, catalog: RecipeCatalog) -> Self {
        self.catalog = Some(catalog);
        self
    }

    /// Pin the starting cells instead of drawing them from the RNG.
    /// `workers` must have `worker_count` entries, indexed by `WorkerId`.
    pub fn positions(mut self, coordinator: GridPos, workers: Vec<GridPos>) -> Self {
        self.positions = Some((coordinator, workers));
        self
    }

    pub fn pathfinder<Q: Pathfinder>(self, pathfinder: Q) -> KitchenBuilder<Q, H> {
        KitchenBuilder {
            config:     self.config,
            layout:     self.layout,
            catalog:    self.catalog,
            positions:  self.positions,
            pathfinder,
            hook:       self.hook,
        }
    }

    pub fn hook<G: ReassignmentHook>(self, hook: G) -> KitchenBuilder<P, G> {
        KitchenBuilder {
            config:     self.config,
            layout:     self.layout,
            catalog:    self.catalog,
            positions:  self.positions,
            pathfinder: self.pathfinder,
            hook,
        }
    }

    /// Validate inputs, place the agents, schedule the first order, and
    /// return a ready-to-run [`Kitchen`].
    pub fn build(self) -> SimResult<Kitchen<P, H>> {
        self.config.validate()?;

        let layout = self.layout.unwrap_or_else(KitchenLayout::standard);
        if layout.width() != self.config.grid_width || layout.height() != self.config.grid_height {
            return Err(SimError::LayoutSize {
                want_w: self.config.grid_width,
                want_h: self.config.grid_height,
                got_w:  layout.width(),
                got_h:  layout.height(),
            });
        }

        let catalog = self.catalog.unwrap_or_else(RecipeCatalog::standard);
        if catalog.is_empty() {
            return Err(ModelError::EmptyCatalog.into());
        }

        let mut rng = SimRng::new(self.config.seed);
        let worker_count = self.config.worker_count as usize;

        // ── Place agents ──────────────────────────────────────────────────
        let (coord_pos, worker_pos) = match self.positions {
            Some((coord, workers)) => {
                if workers.len() != worker_count {
                    return Err(SimError::PlacementCount { expected: worker_count, got: workers.len() });
                }
                let mut seen = FxHashSet::default();
                for &pos in std::iter::once(&coord).chain(&workers) {
                    if !layout.is_walkable(pos) || layout.is_station(pos) || !seen.insert(pos) {
                        return Err(SimError::BadPlacement(pos));
                    }
                }
                (coord, workers)
            }
            None => {
                let mut free = layout.free_cells();
                if free.len() < worker_count + 1 {
                    return Err(SimError::NotEnoughFloor { agents: worker_count + 1, free: free.len() });
                }
                rng.shuffle(&mut free);
                // Draw from the back: coordinator first, then workers by id.
                let mut drawn = free.split_off(free.len() - (worker_count + 1));
                drawn.reverse();
                let coord = drawn.remove(0);
                (coord, drawn)
            }
        };

        let workers = worker_pos
            .into_iter()
            .enumerate()
            .map(|(i, pos)| Worker::new(WorkerId(i as u32), pos))
            .collect();

        // ── First order ───────────────────────────────────────────────────
        let next_order = self.config.auto_orders.then(|| {
            Tick(rng.gen_range(self.config.order_interval_min..=self.config.order_interval_max))
        });

        let state = KitchenState::new(&layout, self.config.total_plates);
        Ok(Kitchen {
            coordinator: Coordinator::new(coord_pos),
            workers,
            state,
            config: self.config,
            layout,
            catalog,
            pathfinder: self.pathfinder,
            hook: self.hook,
            rng,
            next_order,
            outcome: None,
        })
    }
}
