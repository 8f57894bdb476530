//! Cooperative loop that drives a controller on timers

use super::{SimPhase, SimulationController};
use crate::error::SimError;
use crate::frontend::SimulationHost;
use crate::game_of_life::{BuildProgress, Grid, StepOutcome};
use std::time::{Duration, Instant};

/// Source of time for the scheduler
pub trait Clock {
    fn now(&self) -> Instant;
    fn sleep(&mut self, duration: Duration);
}

/// Wall-clock time with real sleeps
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> Instant {
        Instant::now()
    }

    fn sleep(&mut self, duration: Duration) {
        std::thread::sleep(duration);
    }
}

/// A clock that only moves when slept on
#[derive(Debug, Clone, Copy)]
pub struct ManualClock {
    now: Instant,
    pub slept: Duration,
}

impl ManualClock {
    pub fn new() -> Self {
        Self {
            now: Instant::now(),
            slept: Duration::ZERO,
        }
    }
}

impl Default for ManualClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for ManualClock {
    fn now(&self) -> Instant {
        self.now
    }

    fn sleep(&mut self, duration: Duration) {
        self.now += duration;
        self.slept += duration;
    }
}

/// Calls into the controller one unit of work at a time, yielding between
/// construction batches and waiting out the step delay between generations.
pub struct Scheduler<C: Clock> {
    clock: C,
    build_tick: Duration,
}

impl<C: Clock> Scheduler<C> {
    pub fn new(clock: C, build_tick: Duration) -> Self {
        Self { clock, build_tick }
    }

    pub fn clock(&self) -> &C {
        &self.clock
    }

    /// Build the whole grid, starting construction if needed
    pub fn run_construction<H: SimulationHost>(
        &mut self,
        controller: &mut SimulationController<H>,
    ) -> Result<BuildProgress, SimError> {
        if controller.phase() == SimPhase::Unbuilt {
            controller.start_construction(self.clock.now())?;
        }

        loop {
            let progress = controller.construction_tick(self.clock.now())?;
            if controller.phase().is_ready() {
                return Ok(progress);
            }
            self.clock.sleep(self.build_tick);
        }
    }

    /// Run `generations` steps on the controller's cadence, then return to
    /// editor mode. `on_step` sees the grid after every step.
    pub fn run_generations<H: SimulationHost>(
        &mut self,
        controller: &mut SimulationController<H>,
        generations: u64,
        mut on_step: impl FnMut(&Grid, &StepOutcome),
    ) -> Result<Vec<StepOutcome>, SimError> {
        let mut outcomes = Vec::new();
        if generations == 0 {
            return Ok(outcomes);
        }

        if controller.phase() == SimPhase::ReadyIdle {
            controller.toggle_run(self.clock.now())?;
        }

        while controller.phase().is_running() && (outcomes.len() as u64) < generations {
            let now = self.clock.now();
            match controller.step_due(now)? {
                Some(outcome) => {
                    if let Some(grid) = controller.grid() {
                        on_step(grid, &outcome);
                    }
                    outcomes.push(outcome);
                }
                None => {
                    let wait = controller
                        .next_step_at()
                        .map_or(self.build_tick, |at| at.saturating_duration_since(now));
                    self.clock.sleep(wait);
                }
            }
        }

        if controller.phase().is_running() {
            controller.toggle_run(self.clock.now())?;
        }
        Ok(outcomes)
    }
}
