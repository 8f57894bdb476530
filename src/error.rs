//! Error types for the grid core and the simulation controller

use crate::game_of_life::NeighborPos;
use crate::simulation::SimPhase;
use thiserror::Error;

/// Errors raised by the grid and its cells
#[derive(Debug, Clone, PartialEq, Error)]
pub enum GridError {
    #[error("grid size must be at least 1, got {0}")]
    InvalidSize(usize),

    #[error("cell spacing must be positive, got {0}")]
    InvalidSpacing(f32),

    /// A neighbor slot was assigned twice. Never expected once resolution runs a single pass.
    #[error("cell {cell} already has a {position:?} neighbor")]
    DuplicateNeighbor { cell: usize, position: NeighborPos },

    #[error("grid construction has not finished ({done} of {total} cells)")]
    NotBuilt { done: usize, total: usize },

    #[error("neighbors have already been resolved")]
    AlreadyResolved,

    #[error("grid is not ready: neighbors are unresolved")]
    NotReady,

    #[error("cell index {index} out of range for {len} cells")]
    CellOutOfRange { index: usize, len: usize },
}

/// Errors raised by the simulation controller
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SimError {
    #[error("grid construction was already started")]
    AlreadyStarted,

    #[error("grid construction has not been started")]
    NotStarted,

    /// Operation not permitted in the current phase (e.g. toggling a cell while running).
    #[error("cannot {operation} while {phase}")]
    InvalidState {
        operation: &'static str,
        phase: SimPhase,
    },

    #[error(transparent)]
    Grid(#[from] GridError),
}
