use thiserror::Error;

use kb_core::CoreError;

#[derive(Debug, Error)]
pub enum ModelError {
    #[error("catalog parse error: {0}")]
    Parse(String),

    #[error("unknown recipe {0:?}")]
    UnknownRecipe(String),

    #[error("recipe catalog is empty")]
    EmptyCatalog,

    #[error(transparent)]
    Core(#[from] CoreError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

pub type ModelResult<T> = Result<T, ModelError>;
