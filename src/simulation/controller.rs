//! Orchestrates construction, editing and stepping of a grid

use super::{LoadTimer, SimPhase};
use crate::config::Settings;
use crate::error::SimError;
use crate::frontend::SimulationHost;
use crate::game_of_life::{BuildProgress, CellState, Grid, Pattern, StepOutcome};
use std::time::Instant;
use tracing::{debug, info, warn};

/// Drives a [`Grid`] through its lifecycle and forwards every visible change
/// to the host.
///
/// The controller never blocks: construction and stepping advance one unit
/// per call, and an external loop (see [`super::Scheduler`]) decides when to
/// call again.
pub struct SimulationController<H: SimulationHost> {
    settings: Settings,
    host: H,
    grid: Option<Grid>,
    phase: SimPhase,
    load_timer: Option<LoadTimer>,
    next_step_at: Option<Instant>,
}

impl<H: SimulationHost> SimulationController<H> {
    pub fn new(settings: Settings, host: H) -> Self {
        Self {
            settings,
            host,
            grid: None,
            phase: SimPhase::Unbuilt,
            load_timer: None,
            next_step_at: None,
        }
    }

    pub fn phase(&self) -> SimPhase {
        self.phase
    }

    pub fn grid(&self) -> Option<&Grid> {
        self.grid.as_ref()
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn host(&self) -> &H {
        &self.host
    }

    pub fn host_mut(&mut self) -> &mut H {
        &mut self.host
    }

    pub fn into_host(self) -> H {
        self.host
    }

    /// When the next step becomes due, if running
    pub fn next_step_at(&self) -> Option<Instant> {
        self.next_step_at
    }

    /// Begin building the grid. A session builds exactly one grid.
    pub fn start_construction(&mut self, now: Instant) -> Result<(), SimError> {
        if self.phase != SimPhase::Unbuilt {
            return Err(SimError::AlreadyStarted);
        }

        let grid = Grid::new(self.settings.grid.size, self.settings.grid.spacing)?;
        info!(size = grid.size(), cells = grid.total_cells(), "starting grid construction");

        self.grid = Some(grid);
        self.load_timer = Some(LoadTimer::start(now));
        self.phase = SimPhase::Constructing;
        Ok(())
    }

    /// Build one batch of cells and report progress. The batch that completes
    /// the grid also centers the camera and resolves neighbors.
    pub fn construction_tick(&mut self, now: Instant) -> Result<BuildProgress, SimError> {
        let grid = self.grid.as_mut().ok_or(SimError::NotStarted)?;
        if self.phase != SimPhase::Constructing {
            return Ok(grid.progress());
        }

        let progress = grid.build_batch(self.settings.grid.batch_size, &mut self.host);
        let seconds_remaining = self
            .load_timer
            .map_or(0, |timer| timer.seconds_remaining(progress, now));
        self.host.report_progress(progress.done, progress.total, seconds_remaining);

        if progress.is_complete() {
            self.finish_construction()?;
        }
        Ok(progress)
    }

    fn finish_construction(&mut self) -> Result<(), SimError> {
        let grid = self.grid.as_mut().ok_or(SimError::NotStarted)?;

        self.host.center_camera(grid.size(), grid.spacing());
        grid.resolve_neighbors()?;

        self.phase = SimPhase::ReadyIdle;
        self.load_timer = None;
        self.host.report_paused();
        info!(size = grid.size(), "grid ready");
        Ok(())
    }

    /// Flip one cell. Only allowed in editor mode.
    pub fn toggle_cell_at(&mut self, index: usize) -> Result<CellState, SimError> {
        if self.phase != SimPhase::ReadyIdle {
            warn!(index, phase = %self.phase, "rejected cell toggle");
            return Err(SimError::InvalidState {
                operation: "toggle a cell",
                phase: self.phase,
            });
        }

        let grid = self.grid.as_mut().ok_or(SimError::NotStarted)?;
        let state = grid.toggle_cell(index, &mut self.host)?;
        debug!(index, %state, "toggled cell");
        Ok(state)
    }

    /// Switch between editor mode and running. Starting schedules the first
    /// step immediately; pausing only prevents further steps.
    pub fn toggle_run(&mut self, now: Instant) -> Result<SimPhase, SimError> {
        match self.phase {
            SimPhase::ReadyIdle => {
                self.phase = SimPhase::ReadyRunning;
                self.next_step_at = Some(now);
                self.host.report_running();
            }
            SimPhase::ReadyRunning => {
                self.phase = SimPhase::ReadyIdle;
                self.next_step_at = None;
                self.host.report_paused();
            }
            phase => {
                return Err(SimError::InvalidState {
                    operation: "toggle running",
                    phase,
                })
            }
        }

        info!(phase = %self.phase, "simulation mode changed");
        Ok(self.phase)
    }

    /// Run a generation step if running and the step delay has elapsed
    pub fn step_due(&mut self, now: Instant) -> Result<Option<StepOutcome>, SimError> {
        if self.phase != SimPhase::ReadyRunning {
            return Ok(None);
        }
        match self.next_step_at {
            Some(at) if now >= at => {}
            _ => return Ok(None),
        }

        let grid = self.grid.as_mut().ok_or(SimError::NotStarted)?;
        let outcome = grid.step(&mut self.host)?;
        self.host.report_step(&outcome);
        self.next_step_at = Some(now + self.settings.simulation.step_delay());
        Ok(Some(outcome))
    }

    /// Bring every cell of `pattern` to life, offset by `origin`. Cells falling
    /// outside the grid are skipped. Returns how many cells were switched on.
    pub fn stamp_pattern(
        &mut self,
        pattern: &Pattern,
        origin: (usize, usize),
    ) -> Result<usize, SimError> {
        let mut stamped = 0;
        for &(dx, dy) in pattern.cells {
            let grid = self.grid.as_ref().ok_or(SimError::NotStarted)?;
            let Some(index) = grid.index_of(origin.0 + dx, origin.1 + dy) else {
                continue;
            };
            if grid.cell(index).is_some_and(|c| !c.state().is_alive()) {
                self.toggle_cell_at(index)?;
                stamped += 1;
            }
        }

        debug!(pattern = pattern.name, stamped, "stamped pattern");
        Ok(stamped)
    }

    /// Origin that places `pattern` in the middle of the grid
    pub fn centered_origin(&self, pattern: &Pattern) -> (usize, usize) {
        let size = self.settings.grid.size;
        let (width, height) = pattern.extent();
        (size.saturating_sub(width) / 2, size.saturating_sub(height) / 2)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::frontend::{HostEvent, RecordingHost};
    use crate::game_of_life::find_pattern;
    use crate::error::GridError;
    use std::time::Duration;

    fn settings(size: usize) -> Settings {
        let mut settings = Settings::default();
        settings.grid.size = size;
        settings.grid.batch_size = 4;
        settings.simulation.step_delay_ms = 50;
        settings
    }

    fn ready_controller(size: usize) -> (SimulationController<RecordingHost>, Instant) {
        let now = Instant::now();
        let mut controller = SimulationController::new(settings(size), RecordingHost::new());
        controller.start_construction(now).unwrap();
        while !controller.phase().is_ready() {
            controller.construction_tick(now).unwrap();
        }
        (controller, now)
    }

    #[test]
    fn test_construction_reports_progress() {
        let (controller, _) = ready_controller(3);
        let host = controller.host();

        let progress: Vec<_> = host
            .events
            .iter()
            .filter_map(|e| match e {
                HostEvent::Progress { done, total } => Some((*done, *total)),
                _ => None,
            })
            .collect();
        assert_eq!(progress, vec![(4, 9), (8, 9), (9, 9)]);

        // camera centered and editor mode announced once, after the last batch
        let tail = &host.events[host.events.len() - 2..];
        assert_eq!(tail, &[HostEvent::CameraCentered { size: 3 }, HostEvent::Paused]);
        assert_eq!(controller.phase(), SimPhase::ReadyIdle);
        assert!(controller.grid().unwrap().is_ready());
    }

    #[test]
    fn test_construction_starts_once() {
        let now = Instant::now();
        let mut controller = SimulationController::new(settings(3), RecordingHost::new());
        assert_eq!(controller.construction_tick(now).unwrap_err(), SimError::NotStarted);

        controller.start_construction(now).unwrap();
        assert_eq!(controller.start_construction(now).unwrap_err(), SimError::AlreadyStarted);
    }

    #[test]
    fn test_invalid_size_is_rejected() {
        let mut controller = SimulationController::new(settings(0), RecordingHost::new());
        assert_eq!(
            controller.start_construction(Instant::now()).unwrap_err(),
            SimError::Grid(GridError::InvalidSize(0))
        );
        assert_eq!(controller.phase(), SimPhase::Unbuilt);
    }

    #[test]
    fn test_toggle_rejected_while_constructing() {
        let now = Instant::now();
        let mut controller = SimulationController::new(settings(4), RecordingHost::new());
        controller.start_construction(now).unwrap();
        controller.construction_tick(now).unwrap();

        let err = controller.toggle_cell_at(0).unwrap_err();
        assert!(matches!(err, SimError::InvalidState { phase: SimPhase::Constructing, .. }));
        assert_eq!(controller.grid().unwrap().alive_count(), 0);
        assert!(controller.toggle_run(now).is_err());
    }

    #[test]
    fn test_toggle_rejected_while_running() {
        let (mut controller, now) = ready_controller(4);
        controller.toggle_run(now).unwrap();

        let err = controller.toggle_cell_at(5).unwrap_err();
        assert!(matches!(err, SimError::InvalidState { phase: SimPhase::ReadyRunning, .. }));
        assert_eq!(controller.grid().unwrap().alive_count(), 0);
    }

    #[test]
    fn test_toggle_in_editor_mode() {
        let (mut controller, _) = ready_controller(4);
        assert_eq!(controller.toggle_cell_at(5).unwrap(), CellState::Alive);
        assert_eq!(controller.toggle_cell_at(5).unwrap(), CellState::Dead);
        assert!(controller.toggle_cell_at(16).is_err());
    }

    #[test]
    fn test_run_and_pause() {
        let (mut controller, now) = ready_controller(5);
        for index in [11, 12, 13] {
            controller.toggle_cell_at(index).unwrap();
        }

        // nothing happens in editor mode
        assert_eq!(controller.step_due(now).unwrap(), None);

        assert_eq!(controller.toggle_run(now).unwrap(), SimPhase::ReadyRunning);
        let first = controller.step_due(now).unwrap().expect("first step runs immediately");
        assert_eq!(first.generation, 1);

        // delay has not elapsed yet
        assert_eq!(controller.step_due(now + Duration::from_millis(10)).unwrap(), None);
        let second = controller.step_due(now + Duration::from_millis(50)).unwrap();
        assert_eq!(second.map(|o| o.generation), Some(2));

        assert_eq!(controller.toggle_run(now).unwrap(), SimPhase::ReadyIdle);
        assert_eq!(controller.step_due(now + Duration::from_secs(10)).unwrap(), None);
        assert_eq!(controller.grid().unwrap().generation(), 2);

        let host = controller.host();
        assert_eq!(host.count_events(|e| *e == HostEvent::Running), 1);
        assert_eq!(host.count_events(|e| matches!(e, HostEvent::Step(_))), 2);
        assert_eq!(host.events.last(), Some(&HostEvent::Paused));
    }

    #[test]
    fn test_stamp_pattern() {
        let (mut controller, _) = ready_controller(7);
        let blinker = find_pattern("blinker").unwrap();
        let origin = controller.centered_origin(blinker);
        assert_eq!(origin, (2, 3));

        assert_eq!(controller.stamp_pattern(blinker, origin).unwrap(), 3);
        assert_eq!(controller.grid().unwrap().alive_cells(), vec![(2, 3), (3, 3), (4, 3)]);

        // already alive cells are left alone
        assert_eq!(controller.stamp_pattern(blinker, origin).unwrap(), 0);
        assert_eq!(controller.grid().unwrap().alive_count(), 3);
    }

    #[test]
    fn test_stamp_pattern_clips_at_edge() {
        let (mut controller, _) = ready_controller(3);
        let glider = find_pattern("glider").unwrap();
        assert_eq!(controller.stamp_pattern(glider, (1, 1)).unwrap(), 2);
        assert_eq!(controller.grid().unwrap().alive_cells(), vec![(1, 1), (2, 1)]);
    }
}
