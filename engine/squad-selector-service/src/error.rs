use fpl_data::DataError;
use squad_optimizer::SelectionError;
use thiserror::Error;

/// Failure of one pipeline stage
#[derive(Error, Debug)]
pub enum PipelineError {
    #[error("Snapshot error: {0}")]
    Data(#[from] DataError),

    #[error("Selection error: {0}")]
    Selection(#[from] SelectionError),
}

pub type Result<T> = std::result::Result<T, PipelineError>;
