//! Output helpers for the command line frontend

pub mod display;

pub use display::{
    format_grid_compact, format_step, format_step_json, ColorOutput, ProgressIndicator, StatusLine,
};
