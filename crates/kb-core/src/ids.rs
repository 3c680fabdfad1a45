//! Strongly typed, zero-cost identifier wrappers.
//!
//! Every cross-component reference in the simulation (worker ↔ coordinator,
//! station ↔ task, order ↔ plate) goes through one of these ids plus an
//! arena lookup, never a direct pointer.  The inner integer is `pub` so
//! arenas can index with `id.index()`.

use std::fmt;

/// Generate a typed ID wrapper around a primitive integer.
macro_rules! typed_id {
    ($(#[$attr:meta])* $vis:vis struct $name:ident($inner:ty);) => {
        $(#[$attr])*
        #[derive(Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Debug)]
        #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
        $vis struct $name(pub $inner);

        impl $name {
            /// Sentinel meaning "no valid ID", equal to `u32::MAX`.
            pub const INVALID: $name = $name(<$inner>::MAX);

            /// Cast to `usize` for direct use as a `Vec` index.
            #[inline(always)]
            pub fn index(self) -> usize {
                self.0 as usize
            }

            /// `false` for the `INVALID` sentinel.
            #[inline(always)]
            pub fn is_valid(self) -> bool {
                self != Self::INVALID
            }
        }

        impl Default for $name {
            /// Returns the `INVALID` sentinel so uninitialized IDs are visibly invalid.
            #[inline(always)]
            fn default() -> Self {
                Self::INVALID
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}({})", stringify!($name), self.0)
            }
        }

        impl From<$name> for usize {
            #[inline(always)]
            fn from(id: $name) -> usize {
                id.0 as usize
            }
        }

        impl TryFrom<usize> for $name {
            type Error = std::num::TryFromIntError;
            fn try_from(n: usize) -> Result<$name, Self::Error> {
                <$inner>::try_from(n).map($name)
            }
        }
    };
}

typed_id! {
    /// Index of a worker (line cook) in the kitchen's worker list.
    pub struct WorkerId(u32);
}

typed_id! {
    /// Index of a station in `StationStore`.
    pub struct StationId(u32);
}

typed_id! {
    /// Index of an order in `OrderBook`.
    ///
    /// Synthetic maintenance tasks (dish washing) carry `OrderId::INVALID`
    /// as their owning order.
    pub struct OrderId(u32);
}

typed_id! {
    /// Index of a task in the task arena.
    pub struct TaskId(u32);
}

typed_id! {
    /// Index of a plate in `PlateRack`.
    pub struct PlateId(u32);
}
