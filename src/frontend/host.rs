//! Interfaces the simulation core needs from its frontend.
//!
//! The core never renders anything itself. It asks a [`VisualFactory`] for a
//! placeholder per cell, pushes state changes through a [`CellRenderer`], and
//! announces progress and mode changes through a [`StatusReporter`].

use crate::game_of_life::{CellState, StepOutcome};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Opaque handle to a cell's visual, owned by the frontend
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct VisualHandle(pub u64);

/// World position of a cell visual
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct VisualPosition {
    pub x: f32,
    pub y: f32,
}

impl VisualPosition {
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

/// Creates one visual per cell during construction
pub trait VisualFactory {
    fn create_visual(&mut self, position: VisualPosition) -> VisualHandle;
}

/// Keeps a cell's visual in sync with its state
pub trait CellRenderer {
    fn apply_cell_visual(&mut self, visual: VisualHandle, state: CellState);
}

/// Receives progress and mode notifications
pub trait StatusReporter {
    fn report_progress(&mut self, done: usize, total: usize, seconds_remaining: u64);

    /// The grid is editable and not stepping ("editor mode")
    fn report_paused(&mut self);

    fn report_running(&mut self);

    fn report_step(&mut self, _outcome: &StepOutcome) {}
}

/// Points the view at the finished grid
pub trait CameraRig {
    fn center_camera(&mut self, size: usize, spacing: f32);
}

/// Everything the controller needs from a frontend
pub trait SimulationHost: VisualFactory + CellRenderer + StatusReporter + CameraRig {}

impl<T> SimulationHost for T where T: VisualFactory + CellRenderer + StatusReporter + CameraRig {}

/// A host that hands out sequential handles and ignores every notification
#[derive(Debug, Default)]
pub struct NullHost {
    next_handle: u64,
}

impl VisualFactory for NullHost {
    fn create_visual(&mut self, _position: VisualPosition) -> VisualHandle {
        let handle = VisualHandle(self.next_handle);
        self.next_handle += 1;
        handle
    }
}

impl CellRenderer for NullHost {
    fn apply_cell_visual(&mut self, _visual: VisualHandle, _state: CellState) {}
}

impl StatusReporter for NullHost {
    fn report_progress(&mut self, _done: usize, _total: usize, _seconds_remaining: u64) {}
    fn report_paused(&mut self) {}
    fn report_running(&mut self) {}
}

impl CameraRig for NullHost {
    fn center_camera(&mut self, _size: usize, _spacing: f32) {}
}

/// Notification captured by [`RecordingHost`]
#[derive(Debug, Clone, PartialEq)]
pub enum HostEvent {
    Progress { done: usize, total: usize },
    Paused,
    Running,
    CameraCentered { size: usize },
    Step(StepOutcome),
}

/// A host that remembers visuals and notifications, for tests and headless runs
#[derive(Debug, Default)]
pub struct RecordingHost {
    pub positions: Vec<VisualPosition>,
    pub visuals: HashMap<VisualHandle, CellState>,
    pub events: Vec<HostEvent>,
    pub visual_updates: usize,
}

impl RecordingHost {
    pub fn new() -> Self {
        Self::default()
    }

    /// State last pushed to a visual; untouched visuals are dead
    pub fn visual_state(&self, visual: VisualHandle) -> CellState {
        self.visuals.get(&visual).copied().unwrap_or_default()
    }

    pub fn count_events(&self, matcher: impl Fn(&HostEvent) -> bool) -> usize {
        self.events.iter().filter(|e| matcher(e)).count()
    }
}

impl VisualFactory for RecordingHost {
    fn create_visual(&mut self, position: VisualPosition) -> VisualHandle {
        let handle = VisualHandle(self.positions.len() as u64);
        self.positions.push(position);
        handle
    }
}

impl CellRenderer for RecordingHost {
    fn apply_cell_visual(&mut self, visual: VisualHandle, state: CellState) {
        self.visuals.insert(visual, state);
        self.visual_updates += 1;
    }
}

impl StatusReporter for RecordingHost {
    fn report_progress(&mut self, done: usize, total: usize, _seconds_remaining: u64) {
        self.events.push(HostEvent::Progress { done, total });
    }

    fn report_paused(&mut self) {
        self.events.push(HostEvent::Paused);
    }

    fn report_running(&mut self) {
        self.events.push(HostEvent::Running);
    }

    fn report_step(&mut self, outcome: &StepOutcome) {
        self.events.push(HostEvent::Step(outcome.clone()));
    }
}

impl CameraRig for RecordingHost {
    fn center_camera(&mut self, size: usize, _spacing: f32) {
        self.events.push(HostEvent::CameraCentered { size });
    }
}
