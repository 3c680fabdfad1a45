//! Grid-subsystem error type.

use thiserror::Error;

use kb_core::GridPos;

/// Errors produced by `kb-grid`.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum GridError {
    #[error("no path from {from} to {to}")]
    NoPath { from: GridPos, to: GridPos },

    #[error("cell {pos} is outside the {width}x{height} grid")]
    OutOfBounds { pos: GridPos, width: u32, height: u32 },

    #[error("two stations placed on cell {0}")]
    DuplicateStation(GridPos),
}

pub type GridResult<T> = Result<T, GridError>;
