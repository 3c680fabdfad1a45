//! Unit tests for kb-model.

#[cfg(test)]
mod helpers {
    use kb_core::{StationKind, TaskKind};
    use crate::{Recipe, TaskTemplate};

    /// Five-step recipe with a 50-tick budget.
    pub fn five_step_recipe() -> Recipe {
        Recipe::new("burger", "Burger Meal", 50)
            .step(
                TaskTemplate::new(TaskKind::RetrieveIngredients, StationKind::Storage)
                    .with_ingredients(["bun", "patty"]),
            )
            .step(TaskTemplate::new(TaskKind::Chop, StationKind::CuttingBoard))
            .step(TaskTemplate::new(TaskKind::Grill, StationKind::Stove))
            .step(TaskTemplate::new(TaskKind::Assemble, StationKind::Counter))
            .step(TaskTemplate::new(TaskKind::Plate, StationKind::Counter))
    }
}

// ── Tasks ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod task_tests {
    use kb_core::{OrderId, StationKind, TaskId, TaskKind, WorkerId};
    use crate::{RecipeCatalog, Task, TaskStatus, TaskStore, TaskTemplate};

    #[test]
    fn fresh_task_from_every_template_is_pending() {
        let catalog = RecipeCatalog::standard();
        let mut store = TaskStore::new();
        for recipe in catalog.iter() {
            for template in &recipe.tasks {
                let id = store.insert(template, OrderId(0));
                let task = store.get(id).unwrap();
                assert_eq!(task.status, TaskStatus::Pending);
                assert_eq!(task.progress, 0);
                assert_eq!(task.assigned_to, None);
                assert_eq!(task.duration, template.duration);
            }
        }
    }

    #[test]
    fn copying_does_not_share_state() {
        let template = TaskTemplate::new(TaskKind::Chop, StationKind::CuttingBoard);
        let mut a = Task::from_template(TaskId(0), &template, OrderId(1));
        a.assign(WorkerId(2));
        a.work();
        let b = Task::from_template(TaskId(1), &template, OrderId(1));
        assert_eq!(b.status, TaskStatus::Pending);
        assert_eq!(b.progress, 0);
        assert_eq!(b.assigned_to, None);
    }

    #[test]
    fn work_reaches_duration() {
        let template = TaskTemplate::new(TaskKind::Chop, StationKind::CuttingBoard).with_duration(3);
        let mut t = Task::from_template(TaskId(0), &template, OrderId(0));
        assert!(!t.work());
        assert!(!t.work());
        assert!(t.work());
        assert_eq!(t.progress, 3);
        // Saturates.
        assert!(t.work());
        assert_eq!(t.progress, 3);
        assert_ne!(t.status, TaskStatus::Completed);
        t.complete();
        assert!(t.is_complete());
    }

    #[test]
    fn maintenance_tasks_have_no_order() {
        let t = Task::from_template(TaskId(0), &TaskTemplate::wash_dish(), OrderId::INVALID);
        assert!(t.is_maintenance());
        assert_eq!(t.station, StationKind::Sink);
        assert_eq!(t.duration, 5);
    }
}

// ── Recipes & loader ──────────────────────────────────────────────────────────

#[cfg(test)]
mod recipe_tests {
    use std::io::Cursor;

    use kb_core::{SimRng, StationKind, TaskKind};
    use crate::{load_catalog_reader, ModelError, RecipeCatalog};

    #[test]
    fn standard_menu() {
        let catalog = RecipeCatalog::standard();
        assert_eq!(catalog.len(), 6);
        let keys: Vec<&str> = catalog.keys().collect();
        assert_eq!(keys, ["burger", "pasta", "pizza", "salad", "grilled_chicken", "casserole"]);

        let burger = catalog.get("burger").unwrap();
        assert_eq!(burger.time_limit, 50);
        assert_eq!(burger.complexity(), 5);
        assert_eq!(burger.ingredients, ["bun", "patty", "lettuce", "tomato"]);
        assert_eq!(burger.tasks[2].kind, TaskKind::Grill);
        assert_eq!(burger.tasks[2].station, StationKind::Stove);

        let chicken = catalog.get("grilled_chicken").unwrap();
        assert_eq!(chicken.time_limit, 70);
        assert_eq!(chicken.complexity(), 7);

        let pizza = catalog.get("pizza").unwrap();
        assert_eq!(pizza.tasks[3].station, StationKind::Oven);
        assert_eq!(pizza.tasks[3].duration, 15);
    }

    #[test]
    fn every_recipe_starts_with_retrieval_and_ends_with_plating() {
        for recipe in RecipeCatalog::standard().iter() {
            assert_eq!(recipe.tasks.first().unwrap().kind, TaskKind::RetrieveIngredients, "{}", recipe.key);
            assert_eq!(recipe.tasks.last().unwrap().kind, TaskKind::Plate, "{}", recipe.key);
        }
    }

    #[test]
    fn choose_is_seeded() {
        let catalog = RecipeCatalog::standard();
        let picks = |seed| {
            let mut rng = SimRng::new(seed);
            (0..10).map(|_| catalog.choose(&mut rng).unwrap().key.clone()).collect::<Vec<_>>()
        };
        assert_eq!(picks(5), picks(5));
        assert!(RecipeCatalog::default().choose(&mut SimRng::new(0)).is_none());
    }

    const TOAST: &str = "\
recipe,name,time_limit,task_kind,station,duration,ingredients,description
toast,Toast,30,retrieve_ingredients,storage,,bread; butter,Get bread
toast,Toast,30,bake,oven,6,,Toast the bread
soup,Soup,40,cook,stove,,,
toast,Toast,30,plate,counter,,,Plate the toast
";

    #[test]
    fn load_groups_rows_by_recipe() {
        let catalog = load_catalog_reader(Cursor::new(TOAST)).unwrap();
        assert_eq!(catalog.keys().collect::<Vec<_>>(), ["toast", "soup"]);

        let toast = catalog.get("toast").unwrap();
        assert_eq!(toast.time_limit, 30);
        assert_eq!(toast.complexity(), 3);
        assert_eq!(toast.tasks[0].duration, 3, "empty duration uses the kind default");
        assert_eq!(toast.tasks[0].ingredients, ["bread", "butter"]);
        assert_eq!(toast.tasks[1].duration, 6);
        assert_eq!(toast.tasks[2].kind, TaskKind::Plate);
        assert_eq!(toast.ingredients, ["bread", "butter"]);
    }

    #[test]
    fn load_rejects_unknown_station() {
        let csv = "recipe,name,time_limit,task_kind,station,duration,ingredients,description\n\
                   x,X,10,chop,fryer,,,\n";
        assert!(matches!(load_catalog_reader(Cursor::new(csv)), Err(ModelError::Parse(_))));
    }

    #[test]
    fn load_rejects_conflicting_time_limit() {
        let csv = "recipe,name,time_limit,task_kind,station,duration,ingredients,description\n\
                   x,X,10,chop,cutting_board,,,\n\
                   x,X,12,plate,counter,,,\n";
        assert!(matches!(load_catalog_reader(Cursor::new(csv)), Err(ModelError::Parse(_))));
    }

    #[test]
    fn load_empty_is_error() {
        let csv = "recipe,name,time_limit,task_kind,station,duration,ingredients,description\n";
        assert!(matches!(load_catalog_reader(Cursor::new(csv)), Err(ModelError::EmptyCatalog)));
    }
}

// ── Orders ────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod order_tests {
    use kb_core::{OrderId, Tick};
    use crate::{OrderBook, OrderStatus, RecipeCatalog, TaskTemplate};

    #[test]
    fn new_order_has_full_budget_and_fresh_tasks() {
        let mut book = OrderBook::new();
        let id = book.create_order(&super::helpers::five_step_recipe(), Tick(3));
        let order = book.order(id).unwrap();
        assert_eq!(order.status, OrderStatus::Pending);
        assert_eq!(order.time_remaining, 50);
        assert_eq!(order.tasks.len(), 5);
        assert_eq!(order.created_at, Tick(3));
        assert_eq!(book.pending_tasks(), order.tasks);
        assert_eq!(book.active_count(), 1);
    }

    #[test]
    fn fails_after_exactly_time_limit_ticks() {
        let mut book = OrderBook::new();
        let id = book.create_order(&super::helpers::five_step_recipe(), Tick(0));
        for _ in 0..49 {
            assert!(book.tick_all().is_empty());
        }
        assert_eq!(book.order(id).unwrap().time_remaining, 1);
        assert_eq!(book.tick_all(), vec![id]);
        assert_eq!(book.order(id).unwrap().status, OrderStatus::Failed);
        assert_eq!(book.failed_count(), 1);
        assert_eq!(book.active_count(), 0);
    }

    #[test]
    fn time_remaining_monotonic_and_terminal_stable() {
        let mut book = OrderBook::new();
        let id = book.create_order(&super::helpers::five_step_recipe(), Tick(0));
        let mut last = u32::MAX;
        for _ in 0..80 {
            book.tick_all();
            let o = book.order(id).unwrap();
            assert!(o.time_remaining <= last);
            last = o.time_remaining;
        }
        let o = book.order_mut(id).unwrap();
        assert_eq!(o.status, OrderStatus::Failed);
        assert_eq!(o.time_remaining, 0);
        // Extra ticks on a terminal order are ignored.
        assert!(!o.tick());
        assert_eq!(o.status, OrderStatus::Failed);
        assert_eq!(book.failed_count(), 1);
        // Finalizing a failed order is refused.
        assert!(!book.finalize(id));
        assert_eq!(book.order(id).unwrap().status, OrderStatus::Failed);
        assert_eq!(book.completed_count(), 0);
    }

    #[test]
    fn completing_all_subtasks_finalizes() {
        let mut book = OrderBook::new();
        let id = book.create_order(&super::helpers::five_step_recipe(), Tick(0));
        let tasks = book.order(id).unwrap().tasks.clone();
        for (i, &t) in tasks.iter().enumerate() {
            let done = book.complete_subtask(t);
            if i + 1 < tasks.len() {
                assert_eq!(done, None);
                assert_eq!(book.completion_percentage(id), (i + 1) as f64 * 20.0);
            } else {
                assert_eq!(done, Some(id));
            }
        }
        assert!(book.finalize(id));
        assert!(!book.finalize(id), "second finalize is a no-op");
        assert_eq!(book.order(id).unwrap().status, OrderStatus::Completed);
        assert_eq!(book.completed(), &[id]);
        // A completed order no longer ticks down.
        let before = book.order(id).unwrap().time_remaining;
        book.tick_all();
        assert_eq!(book.order(id).unwrap().time_remaining, before);
    }

    #[test]
    fn late_completion_of_failed_order_is_ignored() {
        let mut book = OrderBook::new();
        let id = book.create_order(&super::helpers::five_step_recipe(), Tick(0));
        let tasks = book.order(id).unwrap().tasks.clone();
        for _ in 0..50 {
            book.tick_all();
        }
        for &t in &tasks {
            assert_eq!(book.complete_subtask(t), None);
        }
        assert_eq!(book.order(id).unwrap().status, OrderStatus::Failed);
        assert!(book.is_orphaned(tasks[0]));
    }

    #[test]
    fn mark_started_only_from_pending() {
        let mut book = OrderBook::new();
        let id = book.create_order(&super::helpers::five_step_recipe(), Tick(0));
        book.order_mut(id).unwrap().mark_started();
        assert_eq!(book.order(id).unwrap().status, OrderStatus::InProgress);
        for _ in 0..50 {
            book.tick_all();
        }
        book.order_mut(id).unwrap().mark_started();
        assert_eq!(book.order(id).unwrap().status, OrderStatus::Failed);
    }

    #[test]
    fn urgency_orders_by_time_remaining() {
        let catalog = RecipeCatalog::standard();
        let mut book = OrderBook::new();
        let salad = book.create_order(catalog.get("salad").unwrap(), Tick(0));
        let chicken = book.create_order(catalog.get("grilled_chicken").unwrap(), Tick(0));
        let wash = book.add_maintenance_task(&TaskTemplate::wash_dish());

        let salad_task = book.order(salad).unwrap().tasks[0];
        let chicken_task = book.order(chicken).unwrap().tasks[0];
        assert_eq!(book.urgency(salad_task), 45);
        assert_eq!(book.urgency(chicken_task), 70);
        assert_eq!(book.urgency(wash), 0);
        assert!(!book.is_orphaned(wash));
        assert_eq!(book.task(wash).unwrap().order, OrderId::INVALID);
    }
}

// ── Stations ──────────────────────────────────────────────────────────────────

#[cfg(test)]
mod station_tests {
    use kb_core::{GridPos, SimRng, StationId, StationKind, TaskId, WorkerId};
    use kb_grid::KitchenLayout;
    use crate::{CookingDone, Station, StationState, StationStore};

    fn stove() -> Station {
        Station::new(StationId(0), StationKind::Stove, GridPos::new(0, 7))
    }

    #[test]
    fn occupy_and_release() {
        let mut s = stove();
        assert!(s.occupy(WorkerId(1)));
        assert_eq!(s.state(), StationState::Held(WorkerId(1)));
        assert!(!s.occupy(WorkerId(2)));
        assert!(s.enqueue(WorkerId(2)));
        assert!(s.enqueue(WorkerId(3)));
        // Release hands back the head but does not grant it.
        assert_eq!(s.release(), Some(WorkerId(2)));
        assert!(s.is_free());
        assert_eq!(s.queue_position(WorkerId(2)), Some(0));
        assert!(s.occupy(WorkerId(2)));
        assert_eq!(s.queue_position(WorkerId(2)), None);
        assert_eq!(s.queue().collect::<Vec<_>>(), vec![WorkerId(3)]);
    }

    #[test]
    fn queue_excludes_holder_and_duplicates() {
        let mut s = stove();
        s.occupy(WorkerId(1));
        assert!(!s.enqueue(WorkerId(1)));
        assert!(s.enqueue(WorkerId(4)));
        assert!(!s.enqueue(WorkerId(4)));
        assert_eq!(s.queue_len(), 1);
        s.remove_from_queue(WorkerId(4));
        s.remove_from_queue(WorkerId(4));
        assert_eq!(s.queue_len(), 0);
    }

    #[test]
    fn cooking_cycle() {
        let mut s = stove();
        s.occupy(WorkerId(1));
        assert!(s.start_cooking(TaskId(9), WorkerId(1), 3));
        assert_eq!(s.holder(), None, "starter is not a holder");
        assert_eq!(s.cooking_remaining(), 3);
        assert!(!s.occupy(WorkerId(2)));
        // Release does not cancel a cook.
        s.release();
        assert!(s.is_cooking());
        assert_eq!(s.tick_cooking(), None);
        assert_eq!(s.tick_cooking(), None);
        assert_eq!(
            s.tick_cooking(),
            Some(CookingDone { station: StationId(0), task: TaskId(9), starter: WorkerId(1) })
        );
        assert!(s.is_free());
        assert_eq!(s.tick_cooking(), None);
    }

    #[test]
    fn start_cooking_refused_when_held_by_other() {
        let mut s = stove();
        s.occupy(WorkerId(1));
        assert!(!s.start_cooking(TaskId(0), WorkerId(2), 5));
        assert!(s.start_cooking(TaskId(0), WorkerId(1), 5));
        assert!(!s.start_cooking(TaskId(1), WorkerId(1), 5));
    }

    /// Random operation sequences never produce a holder that is also queued.
    #[test]
    fn holder_never_queued_under_random_ops() {
        let mut rng = SimRng::new(2024);
        let mut s = stove();
        for _ in 0..5_000 {
            let w = WorkerId(rng.gen_range(0..4));
            match rng.gen_range(0..6) {
                0 => { s.occupy(w); }
                1 => { s.release(); }
                2 => { s.enqueue(w); }
                3 => { s.remove_from_queue(w); }
                4 => { s.start_cooking(TaskId(0), w, rng.gen_range(1..4)); }
                _ => { s.tick_cooking(); }
            }
            if let Some(h) = s.holder() {
                assert_eq!(s.queue_position(h), None);
            }
            let mut seen = Vec::new();
            for q in s.queue() {
                assert!(!seen.contains(&q), "duplicate queue entry");
                seen.push(q);
            }
        }
    }

    #[test]
    fn store_from_standard_layout() {
        let mut store = StationStore::from_layout(&KitchenLayout::standard());
        assert_eq!(store.len(), 23);
        let sink = store.at(GridPos::new(11, 7)).unwrap();
        assert_eq!(sink.kind, StationKind::Sink);
        assert!(store.occupancy().values().all(|&o| !o));

        let oven = store.id_at(GridPos::new(8, 7)).unwrap();
        store.get_mut(oven).unwrap().start_cooking(TaskId(4), WorkerId(0), 2);
        assert!(store.occupancy()[&GridPos::new(8, 7)]);
        assert!(store.tick_cooking().is_empty());
        let done = store.tick_cooking();
        assert_eq!(done.len(), 1);
        assert_eq!(done[0].station, oven);
    }
}

// ── Plates ────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod plate_tests {
    use kb_core::{OrderId, PlateId};
    use crate::{PlateRack, PlateState};

    #[test]
    fn full_cycle() {
        let mut rack = PlateRack::new(2);
        let p = rack.assign(OrderId(0)).unwrap();
        assert_eq!(p, PlateId(0));
        assert_eq!(rack.get(p).unwrap().state, PlateState::InUse);
        assert!(rack.mark_dirty(p));
        assert_eq!(rack.dirty_count(), 1);
        assert_eq!(rack.wash_one(), Some(p));
        assert_eq!(rack.clean_count(), 2);
    }

    #[test]
    fn refuses_out_of_cycle_transitions() {
        let mut rack = PlateRack::new(1);
        // clean → dirty is not allowed
        assert!(!rack.mark_dirty(PlateId(0)));
        // nothing dirty to wash
        assert_eq!(rack.wash_one(), None);
        rack.assign(OrderId(3));
        assert_eq!(rack.assign(OrderId(4)), None, "no clean plate left");
        rack.mark_dirty(PlateId(0));
        // dirty → dirty is refused too
        assert!(!rack.mark_dirty(PlateId(0)));
        assert!(!rack.mark_dirty(PlateId(7)));
    }
}

// ── State & events ────────────────────────────────────────────────────────────

#[cfg(test)]
mod state_tests {
    use kb_core::{OrderId, PlateId, StationKind, Tick, WorkerId};
    use kb_grid::KitchenLayout;
    use crate::{EventLog, KitchenEvent, KitchenState, OrderStatus, PlateState};

    #[test]
    fn open_order_assigns_plate_and_records() {
        let mut state = KitchenState::new(&KitchenLayout::standard(), 8);
        let id = state.open_order(&super::helpers::five_step_recipe());
        assert_eq!(state.orders.order(id).unwrap().plate, Some(PlateId(0)));
        assert_eq!(state.plates.clean_count(), 7);
        let events = state.events.drain();
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].event.label(), "order_created");
        assert_eq!(events[0].event.order(), Some(id));
    }

    /// A five-step order with a 50-tick budget that nobody works on fails on
    /// tick 50 and dirties its plate.
    #[test]
    fn unworked_order_fails_and_dirties_plate() {
        let mut state = KitchenState::new(&KitchenLayout::standard(), 8);
        let id = state.open_order(&super::helpers::five_step_recipe());
        let plate = state.orders.order(id).unwrap().plate.unwrap();
        for t in 1..=50 {
            state.now = Tick(t);
            let failed = state.expire_orders();
            assert_eq!(failed.is_empty(), t < 50);
        }
        assert_eq!(state.orders.order(id).unwrap().status, OrderStatus::Failed);
        assert_eq!(state.plates.get(plate).unwrap().state, PlateState::Dirty);
        assert!(state.events.iter().any(|e| e.event.label() == "order_failed"));
    }

    #[test]
    fn order_without_plate_still_fails_cleanly() {
        let mut state = KitchenState::new(&KitchenLayout::standard(), 0);
        let id = state.open_order(&super::helpers::five_step_recipe());
        assert_eq!(state.orders.order(id).unwrap().plate, None);
        for _ in 0..50 {
            state.expire_orders();
        }
        assert_eq!(state.orders.failed_count(), 1);
    }

    #[test]
    fn close_order_is_one_shot() {
        let mut state = KitchenState::new(&KitchenLayout::standard(), 8);
        let id = state.open_order(&super::helpers::five_step_recipe());
        assert!(state.close_order(id));
        assert!(!state.close_order(id));
        assert_eq!(state.plates.dirty_count(), 1);
        assert_eq!(state.orders.completed_count(), 1);
    }

    #[test]
    fn event_log_drain_empties() {
        let mut log = EventLog::new();
        log.push(Tick(1), KitchenEvent::WorkerIdle { worker: WorkerId(2) });
        log.push(Tick(1), KitchenEvent::Arrived { worker: WorkerId(2), station: StationKind::Sink });
        assert_eq!(log.len(), 2);
        let drained = log.drain();
        assert_eq!(drained.len(), 2);
        assert!(log.is_empty());
        assert_eq!(drained[1].event.worker(), Some(WorkerId(2)));
        assert_eq!(drained[1].event.to_string(), "cook 2 arrived at sink");
    }

    #[test]
    fn maintenance_events_have_no_order() {
        let e = KitchenEvent::WorkCompleted {
            worker: WorkerId(0),
            kind: kb_core::TaskKind::WashDish,
            order: OrderId::INVALID,
        };
        assert_eq!(e.order(), None);
    }
}
