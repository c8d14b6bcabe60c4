use sn_core::SnError;
use sn_grid::GridError;
use sn_population::PopulationError;
use sn_wave::WaveError;
use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum SimError {
    #[error(transparent)]
    Core(#[from] SnError),

    #[error("network rebuild failed: {0}")]
    Grid(#[from] GridError),

    #[error("wave rejected: {0}")]
    Wave(#[from] WaveError),

    #[error("population error: {0}")]
    Population(#[from] PopulationError),
}

pub type SimResult<T> = Result<T, SimError>;
