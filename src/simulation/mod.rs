//! Simulation lifecycle: controller, phases and the cooperative scheduler

pub mod controller;
pub mod load_timer;
pub mod phase;
pub mod scheduler;

pub use controller::SimulationController;
pub use load_timer::LoadTimer;
pub use phase::SimPhase;
pub use scheduler::{Clock, ManualClock, Scheduler, SystemClock};
