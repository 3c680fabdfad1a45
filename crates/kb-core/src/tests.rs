//! Unit tests for kb-core primitives.

#[cfg(test)]
mod ids {
    use crate::{OrderId, TaskId, WorkerId};

    #[test]
    fn index_roundtrip() {
        let id = WorkerId(42);
        assert_eq!(id.index(), 42);
        assert_eq!(WorkerId::try_from(42usize).unwrap(), id);
    }

    #[test]
    fn invalid_sentinel_is_max_and_default() {
        assert_eq!(OrderId::INVALID.0, u32::MAX);
        assert_eq!(TaskId::default(), TaskId::INVALID);
        assert!(!OrderId::INVALID.is_valid());
        assert!(OrderId(0).is_valid());
    }

    #[test]
    fn display() {
        assert_eq!(WorkerId(3).to_string(), "WorkerId(3)");
    }
}

#[cfg(test)]
mod geo {
    use crate::GridPos;

    #[test]
    fn manhattan_distance() {
        let a = GridPos::new(0, 0);
        let b = GridPos::new(3, -4);
        assert_eq!(a.manhattan(b), 7);
        assert_eq!(b.manhattan(a), 7);
        assert_eq!(a.manhattan(a), 0);
    }

    #[test]
    fn neighbor_order_is_fixed() {
        let p = GridPos::new(5, 5);
        assert_eq!(
            p.neighbors(),
            [GridPos::new(5, 6), GridPos::new(5, 4), GridPos::new(6, 5), GridPos::new(4, 5)]
        );
    }

    #[test]
    fn adjacency() {
        let p = GridPos::new(2, 2);
        assert!(p.is_adjacent_or_same(p));
        assert!(p.is_adjacent_or_same(GridPos::new(2, 3)));
        assert!(!p.is_adjacent_or_same(GridPos::new(3, 3)));
    }

    #[test]
    fn display_and_from_tuple() {
        assert_eq!(GridPos::from((4, 1)).to_string(), "(4, 1)");
    }
}

#[cfg(test)]
mod time {
    use crate::Tick;

    #[test]
    fn tick_arithmetic() {
        let t = Tick(10);
        assert_eq!(t + 5, Tick(15));
        assert_eq!(t.next(), Tick(11));
        assert_eq!(Tick::ZERO.next(), Tick(1));
        assert!(Tick(3) < Tick(10));
    }

    #[test]
    fn display_is_padded() {
        assert_eq!(Tick(7).to_string(), "T0007");
    }
}

#[cfg(test)]
mod kind {
    use crate::{StationKind, TaskKind};

    #[test]
    fn only_storage_is_walkable() {
        for kind in StationKind::ALL {
            assert_eq!(kind.is_walkable(), kind == StationKind::Storage, "{kind}");
        }
    }

    #[test]
    fn unattended_set() {
        let unattended: Vec<TaskKind> =
            TaskKind::ALL.into_iter().filter(|k| k.is_unattended()).collect();
        assert_eq!(
            unattended,
            vec![TaskKind::Grill, TaskKind::Cook, TaskKind::Saute, TaskKind::Bake, TaskKind::CookRice]
        );
    }

    #[test]
    fn default_durations() {
        assert_eq!(TaskKind::RetrieveIngredients.default_duration(), 3);
        assert_eq!(TaskKind::Bake.default_duration(), 15);
        assert_eq!(TaskKind::CookRice.default_duration(), 8);
        assert_eq!(TaskKind::WashDish.default_duration(), 5);
    }

    #[test]
    fn parse_display_agree() {
        for kind in StationKind::ALL {
            assert_eq!(kind.to_string().parse::<StationKind>().unwrap(), kind);
        }
        for kind in TaskKind::ALL {
            assert_eq!(kind.as_str().parse::<TaskKind>().unwrap(), kind);
        }
        assert_eq!(" cutting_board ".parse::<StationKind>().unwrap(), StationKind::CuttingBoard);
    }

    #[test]
    fn parse_unknown_is_error() {
        assert!("fryer".parse::<StationKind>().is_err());
        assert!("flambe".parse::<TaskKind>().is_err());
    }
}

#[cfg(test)]
mod rng {
    use crate::SimRng;

    #[test]
    fn deterministic_same_seed() {
        let mut r1 = SimRng::new(12345);
        let mut r2 = SimRng::new(12345);
        for _ in 0..100 {
            let a: u64 = r1.gen_range(0..1_000_000);
            let b: u64 = r2.gen_range(0..1_000_000);
            assert_eq!(a, b);
        }
    }

    #[test]
    fn permutation_is_complete() {
        let mut rng = SimRng::new(7);
        let mut perm = rng.permutation(10);
        perm.sort_unstable();
        assert_eq!(perm, (0..10).collect::<Vec<_>>());
    }

    #[test]
    fn gen_range_inclusive_bounds() {
        let mut rng = SimRng::new(0);
        for _ in 0..1000 {
            let v: u64 = rng.gen_range(15..=25);
            assert!((15..=25).contains(&v));
        }
    }

    #[test]
    fn choose_empty_is_none() {
        let mut rng = SimRng::new(0);
        let empty: [u8; 0] = [];
        assert!(rng.choose(&empty).is_none());
    }

    #[test]
    fn one_stream_for_the_whole_run() {
        // Placement and arrivals share a single stream, so the draw order
        // alone decides what a seed produces.
        let mut a = SimRng::new(5);
        let mut b = SimRng::new(5);
        let mut cells: Vec<u32> = (0..20).collect();
        let mut same = cells.clone();
        a.shuffle(&mut cells);
        b.shuffle(&mut same);
        assert_eq!(cells, same);
        let x: u64 = a.gen_range(15..=25);
        let y: u64 = b.gen_range(15..=25);
        assert_eq!(x, y);
    }
}

#[cfg(test)]
mod config {
    use crate::{ActivationMode, CoreError, KitchenConfig};

    #[test]
    fn defaults_are_valid() {
        let cfg = KitchenConfig::default();
        assert!(cfg.validate().is_ok());
        assert_eq!(cfg.cell_count(), 120);
        assert_eq!(cfg.activation, ActivationMode::Shuffled);
        assert_eq!(KitchenConfig::with_seed(9).seed, 9);
    }

    #[test]
    fn rejects_inverted_order_interval() {
        let cfg = KitchenConfig { order_interval_min: 30, order_interval_max: 10, ..Default::default() };
        assert!(matches!(cfg.validate(), Err(CoreError::Config(_))));
    }

    #[test]
    fn rejects_zero_workers_and_empty_grid() {
        let no_workers = KitchenConfig { worker_count: 0, ..Default::default() };
        assert!(no_workers.validate().is_err());
        let empty = KitchenConfig { grid_width: 0, ..Default::default() };
        assert!(empty.validate().is_err());
    }

    #[test]
    fn rejects_zero_thresholds() {
        let cfg = KitchenConfig { lose_threshold: 0, ..Default::default() };
        assert!(cfg.validate().is_err());
    }
}
