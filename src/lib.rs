//! Game of Life grid simulator
//!
//! An N x N grid is built a batch of cells at a time, its eight-way neighbor
//! graph is resolved once, and generations are stepped with a two-phase
//! read-then-write update. Rendering, progress and mode changes are pushed to
//! a frontend through the traits in [`frontend`].

pub mod config;
pub mod error;
pub mod frontend;
pub mod game_of_life;
pub mod simulation;
pub mod utils;

pub use config::Settings;
pub use error::{GridError, SimError};
pub use game_of_life::{CellState, Grid, StepOutcome};
pub use simulation::{SimPhase, SimulationController};
