//! Unit tests for kb-grid.
//!
//! Layout tests use the standard brigade kitchen; pathfinding tests use
//! small hand-built floors so the expected paths are easy to check by eye.

#[cfg(test)]
mod helpers {
    use kb_core::{GridPos, StationKind};
    use crate::{KitchenLayout, KitchenLayoutBuilder};

    /// 5×3 floor with a wall of stoves down the middle column except the
    /// bottom row:
    ///
    /// ```text
    ///   . . T . .
    ///   . . T . .
    ///   . . . . .
    /// ```
    pub fn walled_floor() -> KitchenLayout {
        let mut b = KitchenLayoutBuilder::new(5, 3);
        b.station(StationKind::Stove, GridPos::new(2, 0));
        b.station(StationKind::Stove, GridPos::new(2, 1));
        b.build().unwrap()
    }
}

// ── Layout ────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod layout_tests {
    use rustc_hash::FxHashSet;

    use kb_core::{GridPos, StationKind};
    use crate::{GridError, KitchenLayout, KitchenLayoutBuilder};

    #[test]
    fn standard_station_counts() {
        let layout = KitchenLayout::standard();
        let index = layout.station_index();
        assert_eq!(layout.width(), 12);
        assert_eq!(layout.height(), 10);
        assert_eq!(index[&StationKind::Storage].len(), 9);
        assert_eq!(index[&StationKind::CuttingBoard].len(), 4);
        assert_eq!(index[&StationKind::Counter].len(), 4);
        assert_eq!(index[&StationKind::Stove].len(), 3);
        assert_eq!(index[&StationKind::Oven].len(), 2);
        assert_eq!(index[&StationKind::Sink], vec![GridPos::new(11, 7)]);
        assert_eq!(layout.station_count(), 23);
    }

    #[test]
    fn storage_walkable_others_not() {
        let layout = KitchenLayout::standard();
        assert!(layout.is_walkable(GridPos::new(1, 1)));
        assert!(!layout.is_walkable(GridPos::new(0, 7)));
        assert!(!layout.is_walkable(GridPos::new(11, 7)));
        assert!(layout.is_walkable(GridPos::new(6, 6)));
        assert!(!layout.is_walkable(GridPos::new(-1, 0)));
        assert!(!layout.is_walkable(GridPos::new(12, 0)));
        assert_eq!(layout.non_walkable().len(), 23 - 9);
    }

    #[test]
    fn free_cells_exclude_all_stations() {
        let layout = KitchenLayout::standard();
        let free = layout.free_cells();
        assert_eq!(free.len(), 120 - 23);
        assert!(free.iter().all(|&p| !layout.is_station(p)));
    }

    #[test]
    fn adjacent_free_cell_follows_neighbor_order() {
        let layout = KitchenLayout::standard();
        let stove = GridPos::new(1, 7);
        // +y first.
        assert_eq!(layout.adjacent_free_cell(stove, &FxHashSet::default()), Some(GridPos::new(1, 8)));
        // With +y blocked, -y is next.
        let blocked: FxHashSet<GridPos> = [GridPos::new(1, 8)].into_iter().collect();
        assert_eq!(layout.adjacent_free_cell(stove, &blocked), Some(GridPos::new(1, 6)));
    }

    #[test]
    fn adjacent_free_cell_skips_station_neighbours() {
        let layout = KitchenLayout::standard();
        // Counter (7,3): +y is (7,4) another counter, -y is (7,2) open.
        let cell = layout.adjacent_free_cell(GridPos::new(7, 3), &FxHashSet::default());
        assert_eq!(cell, Some(GridPos::new(7, 2)));
    }

    #[test]
    fn builder_rejects_out_of_bounds() {
        let mut b = KitchenLayoutBuilder::new(3, 3);
        b.station(StationKind::Sink, GridPos::new(3, 0));
        assert!(matches!(b.build(), Err(GridError::OutOfBounds { .. })));
    }

    #[test]
    fn builder_rejects_duplicates() {
        let mut b = KitchenLayoutBuilder::new(3, 3);
        b.station(StationKind::Sink, GridPos::new(1, 1));
        b.station(StationKind::Oven, GridPos::new(1, 1));
        assert_eq!(b.build().unwrap_err(), GridError::DuplicateStation(GridPos::new(1, 1)));
    }

    #[test]
    fn station_lookup() {
        let layout = KitchenLayout::standard();
        assert_eq!(layout.station_at(GridPos::new(8, 7)), Some(StationKind::Oven));
        assert_eq!(layout.station_at(GridPos::new(6, 6)), None);
        assert_eq!(layout.positions_of(StationKind::Oven).count(), 2);
    }
}

// ── Pathfinding ───────────────────────────────────────────────────────────────

#[cfg(test)]
mod pathfinder_tests {
    use rustc_hash::FxHashSet;

    use kb_core::GridPos;
    use crate::{AStarPathfinder, GridError, KitchenLayout, Pathfinder};

    fn none() -> FxHashSet<GridPos> {
        FxHashSet::default()
    }

    fn is_connected(path: &[GridPos]) -> bool {
        path.windows(2).all(|w| w[0].manhattan(w[1]) == 1)
    }

    #[test]
    fn trivial_path() {
        let layout = KitchenLayout::standard();
        let p = GridPos::new(6, 6);
        assert_eq!(AStarPathfinder.find_path(&layout, p, p, &none()).unwrap(), vec![p]);
    }

    #[test]
    fn open_floor_path_is_shortest_and_includes_start() {
        let layout = KitchenLayout::standard();
        let start = GridPos::new(4, 5);
        let goal = GridPos::new(10, 8);
        let path = AStarPathfinder.find_path(&layout, start, goal, &none()).unwrap();
        assert_eq!(path.first(), Some(&start));
        assert_eq!(path.last(), Some(&goal));
        assert_eq!(path.len() as u32, start.manhattan(goal) + 1);
        assert!(is_connected(&path));
    }

    #[test]
    fn routes_around_station_wall() {
        let layout = super::helpers::walled_floor();
        let start = GridPos::new(0, 0);
        let goal = GridPos::new(4, 0);
        let path = AStarPathfinder.find_path(&layout, start, goal, &none()).unwrap();
        assert!(path.iter().all(|p| p.y == 2 || (p.x != 2)));
        assert!(path.contains(&GridPos::new(2, 2)));
        assert_eq!(path.len(), 9);
        assert!(is_connected(&path));
    }

    #[test]
    fn goal_station_is_walkable() {
        let layout = super::helpers::walled_floor();
        let path = AStarPathfinder
            .find_path(&layout, GridPos::new(1, 0), GridPos::new(2, 0), &none())
            .unwrap();
        assert_eq!(path, vec![GridPos::new(1, 0), GridPos::new(2, 0)]);
    }

    #[test]
    fn blocked_agents_are_obstacles() {
        let layout = super::helpers::walled_floor();
        let blocked: FxHashSet<GridPos> = [GridPos::new(2, 2)].into_iter().collect();
        let err = AStarPathfinder
            .find_path(&layout, GridPos::new(0, 0), GridPos::new(4, 0), &blocked)
            .unwrap_err();
        assert_eq!(err, GridError::NoPath { from: GridPos::new(0, 0), to: GridPos::new(4, 0) });
    }

    #[test]
    fn out_of_bounds_goal() {
        let layout = KitchenLayout::standard();
        let err = AStarPathfinder
            .find_path(&layout, GridPos::new(0, 0), GridPos::new(40, 0), &none())
            .unwrap_err();
        assert!(matches!(err, GridError::OutOfBounds { .. }));
    }

    #[test]
    fn deterministic_across_calls() {
        let layout = KitchenLayout::standard();
        let a = AStarPathfinder
            .find_path(&layout, GridPos::new(3, 0), GridPos::new(10, 9), &none())
            .unwrap();
        let b = AStarPathfinder
            .find_path(&layout, GridPos::new(3, 0), GridPos::new(10, 9), &none())
            .unwrap();
        assert_eq!(a, b);
    }
}
