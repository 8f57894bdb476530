//! Game of Life core functionality

pub mod cell;
pub mod grid;
pub mod patterns;
pub mod rules;

pub use cell::{Cell, CellState, NeighborPos};
pub use grid::{Build, BuildProgress, Grid, StepOutcome};
pub use patterns::{find_pattern, Pattern, PATTERNS};
pub use rules::{GameOfLifeRules, Verdict};
