use crate::physics::aerodynamics::STALL_DEG;
use super::runner::Snapshot;

// ---------------------------------------------------------------------------
// Simulation events
// ---------------------------------------------------------------------------

/// Kinds of flight events.
#[derive(Debug, Clone, PartialEq)]
pub enum EventKind {
    Stall { alpha_deg: f64 },
    StallRecovery,
    Apex,
    Touchdown,
    AltitudeCrossed { altitude: f64, direction: Crossing },
}

/// A discrete event that occurred during simulation.
#[derive(Debug, Clone)]
pub struct SimEvent {
    pub time: f64,
    pub kind: EventKind,
    pub snapshot: Snapshot,
}

/// Trait for passive event detectors.
/// Implementations inspect consecutive snapshots and report events.
pub trait EventDetector {
    fn check(&mut self, prev: &Snapshot, current: &Snapshot) -> Option<EventKind>;
}

/// Reports each entry into, and exit from, the post-stall regime.
#[derive(Debug, Clone)]
pub struct StallDetector {
    pub threshold_deg: f64,
}

impl Default for StallDetector {
    fn default() -> Self {
        Self { threshold_deg: STALL_DEG }
    }
}

impl EventDetector for StallDetector {
    fn check(&mut self, prev: &Snapshot, current: &Snapshot) -> Option<EventKind> {
        let was = prev.air_data.alpha_deg.abs() > self.threshold_deg;
        let is = current.air_data.alpha_deg.abs() > self.threshold_deg;
        match (was, is) {
            (false, true) => Some(EventKind::Stall { alpha_deg: current.air_data.alpha_deg }),
            (true, false) => Some(EventKind::StallRecovery),
            _ => None,
        }
    }
}

/// Detects the top of a climb (vertical speed going from positive to non-positive).
#[derive(Debug, Clone, Default)]
pub struct ApexDetector;

impl EventDetector for ApexDetector {
    fn check(&mut self, prev: &Snapshot, current: &Snapshot) -> Option<EventKind> {
        if prev.velocity.y > 0.0 && current.velocity.y <= 0.0 {
            Some(EventKind::Apex)
        } else {
            None
        }
    }
}

/// Detects ground contact (altitude reaching zero).
#[derive(Debug, Clone, Default)]
pub struct TouchdownDetector;

impl EventDetector for TouchdownDetector {
    fn check(&mut self, prev: &Snapshot, current: &Snapshot) -> Option<EventKind> {
        if prev.altitude() > 0.0 && current.altitude() <= 0.0 {
            Some(EventKind::Touchdown)
        } else {
            None
        }
    }
}

/// Direction of travel through a reference altitude.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Crossing {
    Climbing,
    Descending,
}

/// Reports every pass through `altitude` in the given direction, not just
/// the first (a phugoid can cross the same height several times).
#[derive(Debug, Clone)]
pub struct AltitudeDetector {
    pub altitude: f64,
    pub direction: Crossing,
}

impl AltitudeDetector {
    pub fn new(altitude: f64, direction: Crossing) -> Self {
        Self { altitude, direction }
    }
}

impl EventDetector for AltitudeDetector {
    fn check(&mut self, prev: &Snapshot, current: &Snapshot) -> Option<EventKind> {
        let above_before = prev.altitude() > self.altitude;
        let above_after = current.altitude() > self.altitude;
        let crossed = match self.direction {
            Crossing::Climbing => !above_before && above_after,
            Crossing::Descending => above_before && !above_after,
        };
        crossed.then_some(EventKind::AltitudeCrossed {
            altitude: self.altitude,
            direction: self.direction,
        })
    }
}
