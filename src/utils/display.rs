//! Display and output formatting utilities

use crate::game_of_life::{CellState, Grid, StepOutcome};
use std::fmt;

/// Glyph for a cell in compact output
pub fn cell_glyph(state: CellState) -> char {
    if state.is_alive() { '█' } else { '·' }
}

/// Format a grid in compact form, top row first
pub fn format_grid_compact(grid: &Grid) -> String {
    let mut output = String::with_capacity(grid.size() * (grid.size() + 1));
    for y in (0..grid.size()).rev() {
        for x in 0..grid.size() {
            output.push(cell_glyph(grid.state_at(x, y)));
        }
        output.push('\n');
    }
    output
}

/// One line summary of a step
pub fn format_step(outcome: &StepOutcome) -> String {
    format!(
        "Generation {}: {} alive (+{} / -{})",
        outcome.generation, outcome.alive, outcome.born, outcome.died
    )
}

/// A step as a single JSON line
pub fn format_step_json(outcome: &StepOutcome) -> serde_json::Result<String> {
    serde_json::to_string(outcome)
}

/// Text of the status overlay
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StatusLine {
    Loading {
        current: usize,
        max: usize,
        seconds_left: u64,
    },
    Editor,
    Simulating,
}

impl fmt::Display for StatusLine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StatusLine::Loading { current, max, seconds_left } => write!(
                f,
                "Game state: loading ({} of {})\nTime left: {} seconds",
                current, max, seconds_left
            ),
            StatusLine::Editor => write!(f, "Game state: editor mode"),
            StatusLine::Simulating => write!(f, "Game state: simulating"),
        }
    }
}

/// Progress indicator for grid construction
pub struct ProgressIndicator {
    total: usize,
    current: usize,
    seconds_left: u64,
    last_update: std::time::Instant,
}

impl ProgressIndicator {
    /// Create a new progress indicator
    pub fn new(total: usize) -> Self {
        Self {
            total,
            current: 0,
            seconds_left: 0,
            last_update: std::time::Instant::now(),
        }
    }

    /// Update progress and optionally display
    pub fn update(&mut self, current: usize, seconds_left: u64) {
        self.current = current;
        self.seconds_left = seconds_left;
        let now = std::time::Instant::now();

        // Update display every 100ms
        if now.duration_since(self.last_update).as_millis() > 100 {
            self.display();
            self.last_update = now;
        }
    }

    pub fn percentage(&self) -> f64 {
        if self.total > 0 {
            (self.current as f64 / self.total as f64) * 100.0
        } else {
            0.0
        }
    }

    /// Display current progress
    pub fn display(&self) {
        print!(
            "\rLoading: {}/{} ({:.1}%) - ETA: {}s   ",
            self.current,
            self.total,
            self.percentage(),
            self.seconds_left
        );
        std::io::Write::flush(&mut std::io::stdout()).ok();
    }

    /// Finish and clear the progress line
    pub fn finish(&self) {
        println!("\rLoaded: {}/{} (100.0%)              ", self.total, self.total);
    }
}

/// Color output utilities
pub struct ColorOutput;

impl ColorOutput {
    /// Format text with color (if terminal supports it)
    pub fn colored(text: &str, color: Color) -> String {
        if Self::supports_color() {
            format!("\x1b[{}m{}\x1b[0m", color.code(), text)
        } else {
            text.to_string()
        }
    }

    /// Check if terminal supports color
    fn supports_color() -> bool {
        std::env::var("NO_COLOR").is_err() &&
        (std::env::var("TERM").unwrap_or_default() != "dumb")
    }

    pub fn success(text: &str) -> String {
        Self::colored(text, Color::Green)
    }

    pub fn warning(text: &str) -> String {
        Self::colored(text, Color::Yellow)
    }

    pub fn info(text: &str) -> String {
        Self::colored(text, Color::Blue)
    }
}

#[derive(Debug, Clone, Copy)]
pub enum Color {
    Green,
    Yellow,
    Blue,
}

impl Color {
    fn code(self) -> u8 {
        match self {
            Color::Green => 32,
            Color::Yellow => 33,
            Color::Blue => 34,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::frontend::NullHost;

    #[test]
    fn test_status_lines() {
        let loading = StatusLine::Loading { current: 20, max: 100, seconds_left: 3 };
        assert_eq!(loading.to_string(), "Game state: loading (20 of 100)\nTime left: 3 seconds");
        assert_eq!(StatusLine::Editor.to_string(), "Game state: editor mode");
        assert_eq!(StatusLine::Simulating.to_string(), "Game state: simulating");
    }

    #[test]
    fn test_grid_formatting() {
        let mut host = NullHost::default();
        let mut grid = Grid::new(3, 0.01).unwrap();
        grid.build(9, &mut host).for_each(drop);
        grid.resolve_neighbors().unwrap();
        grid.toggle_cell(grid.index_of(0, 2).unwrap(), &mut host).unwrap();
        grid.toggle_cell(grid.index_of(2, 0).unwrap(), &mut host).unwrap();

        assert_eq!(format_grid_compact(&grid), "█··\n···\n··█\n");
    }

    #[test]
    fn test_format_step() {
        let outcome = StepOutcome { generation: 4, died: 2, born: 1, alive: 7 };
        assert_eq!(format_step(&outcome), "Generation 4: 7 alive (+1 / -2)");
    }

    #[test]
    fn test_step_json_line() {
        let outcome = StepOutcome { generation: 3, died: 1, born: 2, alive: 5 };
        let line = format_step_json(&outcome).unwrap();

        assert!(!line.contains('\n'));
        let value: serde_json::Value = serde_json::from_str(&line).unwrap();
        assert_eq!(value["generation"], 3);
        assert_eq!(value["alive"], 5);
        assert_eq!(serde_json::from_str::<StepOutcome>(&line).unwrap(), outcome);
    }

    #[test]
    fn test_progress_indicator() {
        let mut progress = ProgressIndicator::new(100);
        progress.update(50, 2);
        assert_eq!(progress.current, 50);
        assert_eq!(progress.percentage(), 50.0);
    }

    #[test]
    fn test_color_output() {
        let colored = ColorOutput::colored("test", Color::Yellow);
        // Should either be colored or plain text
        assert!(colored.contains("test"));

        let success = ColorOutput::success("OK");
        assert!(success.contains("OK"));
    }
}
