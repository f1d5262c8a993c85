pub mod runner;
pub mod event;

pub use runner::{simulate, simulate_with, Snapshot};
pub use event::{
    AltitudeDetector, ApexDetector, Crossing, EventDetector, EventKind, SimEvent, StallDetector,
    TouchdownDetector,
};
