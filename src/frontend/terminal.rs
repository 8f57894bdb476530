//! Headless terminal frontend

use super::{
    Camera, CameraRig, CellRenderer, StatusReporter, VisualFactory, VisualHandle, VisualPosition,
};
use crate::game_of_life::{CellState, StepOutcome};
use crate::utils::display::{
    cell_glyph, format_step, format_step_json, ProgressIndicator, StatusLine,
};
use crate::utils::ColorOutput;
use tracing::warn;

/// How the terminal frontend reports steps
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepFormat {
    /// One human readable line per step
    Text,
    /// One JSON object per step
    Json,
    Silent,
}

/// Renders cell visuals as characters and prints status changes to stdout
pub struct TerminalFrontend {
    visuals: Vec<(VisualPosition, CellState)>,
    row_len: usize,
    camera: Camera,
    status: Option<StatusLine>,
    progress: Option<ProgressIndicator>,
    step_format: StepFormat,
}

impl TerminalFrontend {
    pub fn new(step_format: StepFormat) -> Self {
        Self {
            visuals: Vec::new(),
            row_len: 0,
            camera: Camera::default(),
            status: None,
            progress: None,
            step_format,
        }
    }

    pub fn camera(&self) -> &Camera {
        &self.camera
    }

    pub fn camera_mut(&mut self) -> &mut Camera {
        &mut self.camera
    }

    /// Last status shown
    pub fn status(&self) -> Option<&StatusLine> {
        self.status.as_ref()
    }

    /// Draw the visuals inside the camera's view, top row first
    pub fn render_viewport(&self) -> String {
        if self.row_len == 0 {
            return String::new();
        }

        let mut output = String::new();
        for row in self.visuals.chunks(self.row_len).rev() {
            let line: String = row
                .iter()
                .filter(|(position, _)| self.camera.contains(*position))
                .map(|&(_, state)| cell_glyph(state))
                .collect();
            if !line.is_empty() {
                output.push_str(&line);
                output.push('\n');
            }
        }
        output
    }

    fn show_status(&mut self, status: StatusLine) {
        if self.step_format != StepFormat::Json {
            println!("{}", ColorOutput::info(&status.to_string()));
        }
        self.status = Some(status);
    }
}

impl VisualFactory for TerminalFrontend {
    fn create_visual(&mut self, position: VisualPosition) -> VisualHandle {
        let handle = VisualHandle(self.visuals.len() as u64);
        self.visuals.push((position, CellState::Dead));
        handle
    }
}

impl CellRenderer for TerminalFrontend {
    fn apply_cell_visual(&mut self, visual: VisualHandle, state: CellState) {
        match self.visuals.get_mut(visual.0 as usize) {
            Some((_, current)) => *current = state,
            None => warn!(?visual, "state change for unknown visual"),
        }
    }
}

impl StatusReporter for TerminalFrontend {
    fn report_progress(&mut self, done: usize, total: usize, seconds_remaining: u64) {
        if self.step_format != StepFormat::Json {
            let progress = self.progress.get_or_insert_with(|| ProgressIndicator::new(total));
            progress.update(done, seconds_remaining);
            if done == total {
                progress.finish();
                self.progress = None;
            }
        }

        self.status = Some(StatusLine::Loading {
            current: done,
            max: total,
            seconds_left: seconds_remaining,
        });
    }

    fn report_paused(&mut self) {
        self.show_status(StatusLine::Editor);
    }

    fn report_running(&mut self) {
        self.show_status(StatusLine::Simulating);
    }

    fn report_step(&mut self, outcome: &StepOutcome) {
        match self.step_format {
            StepFormat::Text => println!("{}", format_step(outcome)),
            StepFormat::Json => match format_step_json(outcome) {
                Ok(line) => println!("{}", line),
                Err(e) => warn!(error = %e, "failed to serialize step outcome"),
            },
            StepFormat::Silent => {}
        }
    }
}

impl CameraRig for TerminalFrontend {
    fn center_camera(&mut self, size: usize, spacing: f32) {
        self.row_len = size;
        self.camera.center_on_grid(size, spacing);
        self.camera.frame_grid(size, spacing);
    }
}
