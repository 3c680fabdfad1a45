//! Kitchen floor layout and builder.
//!
//! # Cells
//!
//! The floor is a `width × height` grid of cells.  A cell is either open
//! floor or holds exactly one station.  Storage cells are walkable (agents
//! stand on them to pick ingredients); every other station cell is an
//! obstacle and is worked from one of its orthogonal neighbours.
//!
//! The layout is fixed for the lifetime of a run.  Runtime occupancy (who
//! holds which station, where agents stand) lives in `kb-model` and
//! `kb-agents`; this crate only answers geometric questions.

use std::collections::BTreeMap;

use rustc_hash::{FxHashMap, FxHashSet};

use kb_core::{GridPos, StationKind};

use crate::{GridError, GridResult};

// ── StationSite ───────────────────────────────────────────────────────────────

/// A station placement: its kind and the cell it occupies.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct StationSite {
    pub kind: StationKind,
    pub pos: GridPos,
}

// ── KitchenLayout ─────────────────────────────────────────────────────────────

/// Immutable floor plan.  Construct with [`KitchenLayoutBuilder`] or
/// [`KitchenLayout::standard`].
#[derive(Clone, Debug)]
pub struct KitchenLayout {
    width: u32,
    height: u32,
    /// Station placements in insertion order.  The index into this vector is
    /// the station's `StationId` once the model builds its station store.
    sites: Vec<StationSite>,
    site_at: FxHashMap<GridPos, usize>,
    non_walkable: FxHashSet<GridPos>,
}

impl KitchenLayout {
    /// The 12×10 brigade kitchen.
    ///
    /// ```text
    ///   x: 0 1 2 3 4 5 6 7 8 9 A B
    /// y=0  S S S . . . . . . . . .
    /// y=1  S S S . C C . . . . . .
    /// y=2  S S S . C C . . . . . .
    /// y=3  . . . . . . . N N . . .
    /// y=4  . . . . . . . N N . . .
    /// y=5  . . . . . . . . . . . .
    /// y=6  . . . . . . . . . . . .
    /// y=7  T T T . . . . . O O . K
    /// y=8  . . . . . . . . . . . .
    /// y=9  . . . . . . . . . . . .
    /// ```
    ///
    /// S = storage, C = cutting board, N = counter, T = stove, O = oven,
    /// K = sink.
    pub fn standard() -> Self {
        let mut b = KitchenLayoutBuilder::new(12, 10);
        for y in 0..3 {
            for x in 0..3 {
                b.station(StationKind::Storage, GridPos::new(x, y));
            }
        }
        for pos in [(4, 1), (5, 1), (4, 2), (5, 2)] {
            b.station(StationKind::CuttingBoard, pos.into());
        }
        for pos in [(7, 3), (8, 3), (7, 4), (8, 4)] {
            b.station(StationKind::Counter, pos.into());
        }
        for pos in [(0, 7), (1, 7), (2, 7)] {
            b.station(StationKind::Stove, pos.into());
        }
        for pos in [(8, 7), (9, 7)] {
            b.station(StationKind::Oven, pos.into());
        }
        b.station(StationKind::Sink, GridPos::new(11, 7));
        // Every cell above is distinct and in bounds.
        b.assemble()
    }

    // ── Dimensions ────────────────────────────────────────────────────────

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    #[inline]
    pub fn in_bounds(&self, pos: GridPos) -> bool {
        pos.x >= 0 && pos.y >= 0 && (pos.x as u32) < self.width && (pos.y as u32) < self.height
    }

    // ── Stations ──────────────────────────────────────────────────────────

    /// All station placements in insertion order.
    pub fn sites(&self) -> &[StationSite] {
        &self.sites
    }

    pub fn station_count(&self) -> usize {
        self.sites.len()
    }

    /// Kind of the station on `pos`, if any.
    #[inline]
    pub fn station_at(&self, pos: GridPos) -> Option<StationKind> {
        self.site_at.get(&pos).map(|&i| self.sites[i].kind)
    }

    /// Index into [`sites`](Self::sites) of the station on `pos`.
    #[inline]
    pub fn site_index(&self, pos: GridPos) -> Option<usize> {
        self.site_at.get(&pos).copied()
    }

    #[inline]
    pub fn is_station(&self, pos: GridPos) -> bool {
        self.site_at.contains_key(&pos)
    }

    /// Cells of every station of `kind`, in insertion order.
    pub fn positions_of(&self, kind: StationKind) -> impl Iterator<Item = GridPos> + '_ {
        self.sites.iter().filter(move |s| s.kind == kind).map(|s| s.pos)
    }

    /// Station kind → cells index.  Kinds with no station are absent.
    pub fn station_index(&self) -> BTreeMap<StationKind, Vec<GridPos>> {
        let mut index: BTreeMap<StationKind, Vec<GridPos>> = BTreeMap::new();
        for site in &self.sites {
            index.entry(site.kind).or_default().push(site.pos);
        }
        index
    }

    // ── Walkability ───────────────────────────────────────────────────────

    /// Station cells agents may not step on (everything except storage).
    #[inline]
    pub fn non_walkable(&self) -> &FxHashSet<GridPos> {
        &self.non_walkable
    }

    /// `true` if `pos` is on the grid and not a non-walkable station cell.
    #[inline]
    pub fn is_walkable(&self, pos: GridPos) -> bool {
        self.in_bounds(pos) && !self.non_walkable.contains(&pos)
    }

    /// Open floor cells (no station of any kind), column-major.  Used for
    /// initial agent placement.
    pub fn free_cells(&self) -> Vec<GridPos> {
        let mut cells = Vec::with_capacity((self.width * self.height) as usize);
        for x in 0..self.width as i32 {
            for y in 0..self.height as i32 {
                let pos = GridPos::new(x, y);
                if !self.is_station(pos) {
                    cells.push(pos);
                }
            }
        }
        cells
    }

    /// First orthogonal neighbour of `target` (in `GridPos::neighbors`
    /// order) that is on the grid, not in `blocked`, and not a non-walkable
    /// station.  This is the cell a worker stands on to use a station.
    pub fn adjacent_free_cell(
        &self,
        target: GridPos,
        blocked: &FxHashSet<GridPos>,
    ) -> Option<GridPos> {
        target
            .neighbors()
            .into_iter()
            .find(|&n| self.is_walkable(n) && !blocked.contains(&n))
    }
}

// ── KitchenLayoutBuilder ──────────────────────────────────────────────────────

/// Construct a [`KitchenLayout`] incrementally, then call [`build`](Self::build).
///
/// # Example
///
/// ```
/// use kb_core::{GridPos, StationKind};
/// use kb_grid::KitchenLayoutBuilder;
///
/// let mut b = KitchenLayoutBuilder::new(6, 4);
/// b.station(StationKind::Storage, GridPos::new(0, 0));
/// b.station(StationKind::Stove, GridPos::new(5, 3));
/// let layout = b.build().unwrap();
/// assert_eq!(layout.station_count(), 2);
/// assert!(layout.is_walkable(GridPos::new(0, 0)));
/// assert!(!layout.is_walkable(GridPos::new(5, 3)));
/// ```
pub struct KitchenLayoutBuilder {
    width: u32,
    height: u32,
    sites: Vec<StationSite>,
}

impl KitchenLayoutBuilder {
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height, sites: Vec::new() }
    }

    /// Place a station.  Validation is deferred to `build()`.
    pub fn station(&mut self, kind: StationKind, pos: GridPos) -> &mut Self {
        self.sites.push(StationSite { kind, pos });
        self
    }

    /// Consume the builder.  Fails on a station outside the grid or two
    /// stations sharing a cell.
    pub fn build(self) -> GridResult<KitchenLayout> {
        let mut seen = FxHashSet::default();
        for site in &self.sites {
            let pos = site.pos;
            let in_bounds = pos.x >= 0
                && pos.y >= 0
                && (pos.x as u32) < self.width
                && (pos.y as u32) < self.height;
            if !in_bounds {
                return Err(GridError::OutOfBounds { pos, width: self.width, height: self.height });
            }
            if !seen.insert(pos) {
                return Err(GridError::DuplicateStation(pos));
            }
        }
        Ok(self.assemble())
    }

    fn assemble(self) -> KitchenLayout {
        let mut site_at = FxHashMap::default();
        let mut non_walkable = FxHashSet::default();
        for (i, site) in self.sites.iter().enumerate() {
            site_at.insert(site.pos, i);
            if !site.kind.is_walkable() {
                non_walkable.insert(site.pos);
            }
        }

        KitchenLayout {
            width: self.width,
            height: self.height,
            sites: self.sites,
            site_at,
            non_walkable,
        }
    }
}
