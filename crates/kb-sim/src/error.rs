use kb_core::{CoreError, GridPos};
use kb_model::ModelError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SimError {
    #[error("kitchen configuration error: {0}")]
    Config(#[from] CoreError),

    #[error("layout is {got_w}x{got_h} but the configuration asks for {want_w}x{want_h}")]
    LayoutSize {
        want_w: u32,
        want_h: u32,
        got_w:  u32,
        got_h:  u32,
    },

    #[error("{agents} agents need distinct floor cells but the layout has only {free}")]
    NotEnoughFloor {
        agents: usize,
        free:   usize,
    },

    #[error("{got} worker positions supplied for {expected} workers")]
    PlacementCount {
        expected: usize,
        got:      usize,
    },

    #[error("cell {0} cannot hold an agent (off the grid, a station, or taken)")]
    BadPlacement(GridPos),

    #[error(transparent)]
    Catalog(#[from] ModelError),
}

pub type SimResult<T> = Result<T, SimError>;
