//! Frontend collaborators: the host traits the core talks to, a camera
//! model, and a terminal implementation

pub mod camera;
pub mod host;
pub mod terminal;

pub use camera::{Camera, PanDirection};
pub use host::{
    CameraRig, CellRenderer, HostEvent, NullHost, RecordingHost, SimulationHost, StatusReporter,
    VisualFactory, VisualHandle, VisualPosition,
};
pub use terminal::{StepFormat, TerminalFrontend};
