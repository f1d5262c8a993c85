use nalgebra::{UnitQuaternion, Vector3};
use serde::Serialize;

use crate::dynamics::state::{Aircraft, AirData, SimConfig};
use crate::dynamics::update_physics;
use super::event::{EventDetector, SimEvent};

// ---------------------------------------------------------------------------
// Trajectory snapshot
// ---------------------------------------------------------------------------

/// Copy of the externally visible aircraft state after one tick.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Snapshot {
    pub time: f64,
    pub position: Vector3<f64>,
    pub velocity: Vector3<f64>,
    pub acceleration: Vector3<f64>,
    pub orientation: UnitQuaternion<f64>,
    pub angular_velocity: Vector3<f64>,
    pub lift: Vector3<f64>,
    pub drag: Vector3<f64>,
    pub thrust: Vector3<f64>,
    pub total_force: Vector3<f64>,
    pub body_moment: Vector3<f64>,
    pub air_data: AirData,
}

impl Snapshot {
    pub fn capture(time: f64, plane: &Aircraft) -> Self {
        Self {
            time,
            position: plane.position,
            velocity: plane.velocity,
            acceleration: plane.acceleration,
            orientation: plane.orientation,
            angular_velocity: plane.angular_velocity,
            lift: plane.lift,
            drag: plane.drag,
            thrust: plane.thrust_vec,
            total_force: plane.total_force,
            body_moment: plane.body_moment,
            air_data: plane.air_data,
        }
    }

    pub fn altitude(&self) -> f64 {
        self.position.y
    }

    pub fn speed(&self) -> f64 {
        self.velocity.norm()
    }

    /// Nose elevation above the horizon (rad).
    pub fn pitch(&self) -> f64 {
        (self.orientation * Vector3::x()).y.clamp(-1.0, 1.0).asin()
    }
}

// ---------------------------------------------------------------------------
// Fixed-step flight
// ---------------------------------------------------------------------------

/// Fly `plane` at a fixed step until it reaches the ground (y ≤ 0) or
/// `max_time` elapses, running `detectors` on every consecutive pair of
/// snapshots.
///
/// The aircraft is advanced in place, so the caller keeps its final state.
pub fn simulate_with(
    plane: &mut Aircraft,
    config: &SimConfig,
    detectors: &mut [Box<dyn EventDetector>],
) -> (Vec<Snapshot>, Vec<SimEvent>) {
    let mut time = 0.0;
    let mut trajectory = vec![Snapshot::capture(time, plane)];
    let mut events = Vec::new();

    if !(config.dt > 0.0) {
        tracing::warn!(dt = config.dt, "non-positive time step, nothing to simulate");
        return (trajectory, events);
    }
    if plane.position.y <= 0.0 {
        tracing::debug!(altitude = plane.position.y, "aircraft starts on the ground");
        return (trajectory, events);
    }

    // Size hint only; the ratio is unbounded for very long or infinite runs.
    let capacity = (config.max_time / config.dt).min(200_000.0) as usize;
    trajectory.reserve(capacity);

    while time < config.max_time {
        update_physics(plane, config.dt);
        time += config.dt;

        let grounded = plane.position.y <= 0.0;
        if grounded {
            plane.position.y = 0.0;
        }

        let current = Snapshot::capture(time, plane);
        if let Some(prev) = trajectory.last() {
            for detector in detectors.iter_mut() {
                if let Some(kind) = detector.check(prev, &current) {
                    tracing::debug!(time, event = ?kind, "flight event");
                    events.push(SimEvent { time, kind, snapshot: current.clone() });
                }
            }
        }
        trajectory.push(current);

        if grounded {
            break;
        }
    }

    tracing::info!(
        steps = trajectory.len() - 1,
        time,
        events = events.len(),
        "simulation finished"
    );
    (trajectory, events)
}

/// Simulate without event detection (convenience wrapper).
pub fn simulate(plane: &mut Aircraft, config: &SimConfig) -> Vec<Snapshot> {
    simulate_with(plane, config, &mut []).0
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::physics::{polars, AeroModel};
    use crate::sim::event::{EventKind, TouchdownDetector};
    use crate::vehicle::{presets, AirplaneBuilder};

    fn dropped_brick(height: f64) -> Aircraft {
        AirplaneBuilder::new(polars::inert())
            .aero_model(AeroModel::Table)
            .position(Vector3::new(0.0, height, 0.0))
            .mass(1.0)
            .build()
    }

    #[test]
    fn brick_hits_ground() {
        let mut plane = dropped_brick(20.0);
        let config = SimConfig { dt: 0.01, max_time: 60.0 };
        let traj = simulate(&mut plane, &config);
        let last = traj.last().unwrap();
        assert_eq!(last.position.y, 0.0);
        // t = sqrt(2h/g) ≈ 2.02 s
        assert!((last.time - 2.02).abs() < 0.05, "landed at {}", last.time);
    }

    #[test]
    fn stops_at_max_time() {
        let mut plane = dropped_brick(1.0e6);
        let config = SimConfig { dt: 0.1, max_time: 5.0 };
        let traj = simulate(&mut plane, &config);
        let last = traj.last().unwrap();
        assert!(last.time >= 5.0 && last.time < 5.2);
        assert!(last.position.y > 0.0);
    }

    #[test]
    fn unbounded_max_time_ends_at_touchdown() {
        for config in [
            SimConfig { dt: 0.01, max_time: f64::INFINITY },
            SimConfig { dt: 1e-3, max_time: 1e300 },
        ] {
            let mut plane = dropped_brick(5.0);
            let traj = simulate(&mut plane, &config);
            let last = traj.last().unwrap();
            assert_eq!(last.position.y, 0.0);
            // t = sqrt(2h/g) ≈ 1.01 s
            assert!((last.time - 1.01).abs() < 0.05, "landed at {}", last.time);
        }
    }

    #[test]
    fn bad_step_returns_initial_state_only() {
        let mut plane = dropped_brick(10.0);
        let before = plane.clone();
        let traj = simulate(&mut plane, &SimConfig { dt: 0.0, max_time: 10.0 });
        assert_eq!(traj.len(), 1);
        assert_eq!(plane, before);
    }

    #[test]
    fn touchdown_event_reported_once() {
        let mut plane = dropped_brick(5.0);
        let mut detectors: Vec<Box<dyn EventDetector>> = vec![Box::new(TouchdownDetector::default())];
        let (traj, events) = simulate_with(&mut plane, &SimConfig::default(), &mut detectors);
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].kind, EventKind::Touchdown);
        assert_eq!(events[0].time, traj.last().unwrap().time);
    }

    #[test]
    fn trainer_flight_stays_finite() {
        let mut plane = presets::trainer();
        let config = SimConfig { dt: 0.005, max_time: 30.0 };
        let traj = simulate(&mut plane, &config);
        for s in &traj {
            assert!(s.position.iter().all(|v| v.is_finite()), "at t={}", s.time);
            assert!((s.orientation.quaternion().norm() - 1.0).abs() < 1e-6);
        }
    }
}
