//! Station and task kind enums shared across every kitchen crate.
//!
//! Both are closed sets: the recipe catalog and the kitchen layout may only
//! refer to these variants.  The snake_case labels returned by `as_str` are
//! the canonical spellings used in plan step names (`move_to_stove`,
//! `execute_grill`) and in the CSV catalog format.

use std::str::FromStr;

use crate::CoreError;

// ── StationKind ───────────────────────────────────────────────────────────────

/// The type of a fixed kitchen facility.
#[derive(Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum StationKind {
    /// Walk-in pantry.  The only station agents may stand on.
    Storage,
    CuttingBoard,
    Stove,
    Oven,
    Counter,
    Sink,
}

impl StationKind {
    /// Every station kind, in declaration order.
    pub const ALL: [StationKind; 6] = [
        StationKind::Storage,
        StationKind::CuttingBoard,
        StationKind::Stove,
        StationKind::Oven,
        StationKind::Counter,
        StationKind::Sink,
    ];

    /// `true` only for [`StationKind::Storage`].  Every other station cell
    /// is an obstacle for movement and is worked from an adjacent cell.
    #[inline]
    pub fn is_walkable(self) -> bool {
        matches!(self, StationKind::Storage)
    }

    /// Human-readable label, used in plan step names and CSV columns.
    pub fn as_str(self) -> &'static str {
        match self {
            StationKind::Storage      => "storage",
            StationKind::CuttingBoard => "cutting_board",
            StationKind::Stove        => "stove",
            StationKind::Oven         => "oven",
            StationKind::Counter      => "counter",
            StationKind::Sink         => "sink",
        }
    }
}

impl std::fmt::Display for StationKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for StationKind {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        StationKind::ALL
            .into_iter()
            .find(|k| k.as_str() == s.trim())
            .ok_or_else(|| CoreError::Parse(format!("unknown station kind {s:?}")))
    }
}

// ── TaskKind ──────────────────────────────────────────────────────────────────

/// The type tag of a unit of kitchen work.
#[derive(Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum TaskKind {
    RetrieveIngredients,
    Chop,
    Grill,
    Cook,
    Saute,
    Bake,
    Prepare,
    Assemble,
    Plate,
    WashDish,
    CookRice,
}

impl TaskKind {
    pub const ALL: [TaskKind; 11] = [
        TaskKind::RetrieveIngredients,
        TaskKind::Chop,
        TaskKind::Grill,
        TaskKind::Cook,
        TaskKind::Saute,
        TaskKind::Bake,
        TaskKind::Prepare,
        TaskKind::Assemble,
        TaskKind::Plate,
        TaskKind::WashDish,
        TaskKind::CookRice,
    ];

    /// Long heat operations that keep running after the worker walks away.
    ///
    /// Executing one of these puts the station into its cooking sub-state and
    /// frees the worker on the same tick.
    #[inline]
    pub fn is_unattended(self) -> bool {
        matches!(
            self,
            TaskKind::Grill | TaskKind::Cook | TaskKind::Saute | TaskKind::Bake | TaskKind::CookRice
        )
    }

    /// Standard duration in ticks.
    pub fn default_duration(self) -> u32 {
        match self {
            TaskKind::RetrieveIngredients => 3,
            TaskKind::Chop                => 5,
            TaskKind::Grill               => 10,
            TaskKind::Cook                => 10,
            TaskKind::Saute               => 10,
            TaskKind::Bake                => 15,
            TaskKind::Prepare             => 7,
            TaskKind::Assemble            => 5,
            TaskKind::Plate               => 5,
            TaskKind::WashDish            => 5,
            TaskKind::CookRice            => 8,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            TaskKind::RetrieveIngredients => "retrieve_ingredients",
            TaskKind::Chop                => "chop",
            TaskKind::Grill               => "grill",
            TaskKind::Cook                => "cook",
            TaskKind::Saute               => "saute",
            TaskKind::Bake                => "bake",
            TaskKind::Prepare             => "prepare",
            TaskKind::Assemble            => "assemble",
            TaskKind::Plate               => "plate",
            TaskKind::WashDish            => "wash_dish",
            TaskKind::CookRice            => "cook_rice",
        }
    }
}

impl std::fmt::Display for TaskKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TaskKind {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        TaskKind::ALL
            .into_iter()
            .find(|k| k.as_str() == s.trim())
            .ok_or_else(|| CoreError::Parse(format!("unknown task kind {s:?}")))
    }
}
