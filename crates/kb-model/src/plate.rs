//! Plates.
//!
//! A plate only ever moves clean → in_use → dirty → clean.  Any call that
//! would break the cycle is refused and reported as `false` / `None`.

use kb_core::{OrderId, PlateId};

#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum PlateState {
    #[default]
    Clean,
    InUse,
    Dirty,
}

#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Plate {
    pub id: PlateId,
    pub state: PlateState,
    /// Set while `InUse`.
    pub order: Option<OrderId>,
}

/// The kitchen's fixed stock of plates.
#[derive(Clone, Debug, Default)]
pub struct PlateRack {
    plates: Vec<Plate>,
}

impl PlateRack {
    /// `count` clean plates.
    pub fn new(count: u32) -> Self {
        let plates = (0..count)
            .map(|i| Plate { id: PlateId(i), state: PlateState::Clean, order: None })
            .collect();
        Self { plates }
    }

    /// Give the first clean plate to `order`.
    pub fn assign(&mut self, order: OrderId) -> Option<PlateId> {
        let plate = self.plates.iter_mut().find(|p| p.state == PlateState::Clean)?;
        plate.state = PlateState::InUse;
        plate.order = Some(order);
        Some(plate.id)
    }

    /// InUse → Dirty.  Refused from any other state.
    pub fn mark_dirty(&mut self, id: PlateId) -> bool {
        match self.plates.get_mut(id.index()) {
            Some(p) if p.state == PlateState::InUse => {
                p.state = PlateState::Dirty;
                p.order = None;
                true
            }
            _ => false,
        }
    }

    /// Wash the first dirty plate.
    pub fn wash_one(&mut self) -> Option<PlateId> {
        let plate = self.plates.iter_mut().find(|p| p.state == PlateState::Dirty)?;
        plate.state = PlateState::Clean;
        Some(plate.id)
    }

    pub fn get(&self, id: PlateId) -> Option<&Plate> {
        self.plates.get(id.index())
    }

    pub fn iter(&self) -> impl Iterator<Item = &Plate> {
        self.plates.iter()
    }

    pub fn len(&self) -> usize {
        self.plates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.plates.is_empty()
    }

    fn count(&self, state: PlateState) -> usize {
        self.plates.iter().filter(|p| p.state == state).count()
    }

    pub fn clean_count(&self) -> usize {
        self.count(PlateState::Clean)
    }

    pub fn in_use_count(&self) -> usize {
        self.count(PlateState::InUse)
    }

    pub fn dirty_count(&self) -> usize {
        self.count(PlateState::Dirty)
    }
}
