use serde::{Deserialize, Serialize};
use std::fmt;

/// Lifecycle of a simulation session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SimPhase {
    /// Construction has not been started
    Unbuilt,
    /// Cells are being created batch by batch
    Constructing,
    /// Grid is ready; cells may be edited
    ReadyIdle,
    /// Generation steps are being scheduled
    ReadyRunning,
}

impl SimPhase {
    pub fn is_ready(self) -> bool {
        matches!(self, SimPhase::ReadyIdle | SimPhase::ReadyRunning)
    }

    pub fn is_running(self) -> bool {
        self == SimPhase::ReadyRunning
    }
}

impl fmt::Display for SimPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            SimPhase::Unbuilt => "unbuilt",
            SimPhase::Constructing => "constructing",
            SimPhase::ReadyIdle => "in editor mode",
            SimPhase::ReadyRunning => "simulating",
        };
        f.write_str(text)
    }
}
