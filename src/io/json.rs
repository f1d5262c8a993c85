use std::io::Write;

use serde::Serialize;

use crate::error::SimError;
use crate::physics::aerodynamics::STALL_DEG;
use crate::sim::{SimEvent, Snapshot};

/// Summary statistics computed from a flight trajectory.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct FlightSummary {
    pub max_altitude_m: f64,
    pub max_altitude_time: f64,
    pub min_altitude_m: f64,
    pub max_speed: f64,
    pub max_accel: f64,
    pub max_accel_g: f64,
    pub max_alpha_deg: f64,
    pub time_stalled: f64,
    pub range_m: f64,
    pub flight_time: f64,
    pub impact_speed: f64,
}

impl FlightSummary {
    /// Compute summary from trajectory data. An empty trajectory gives all zeros.
    pub fn from_trajectory(trajectory: &[Snapshot]) -> Self {
        let (Some(first), Some(last)) = (trajectory.first(), trajectory.last()) else {
            return Self::default();
        };

        let highest = trajectory
            .iter()
            .max_by(|a, b| a.altitude().total_cmp(&b.altitude()))
            .unwrap_or(first);

        let min_altitude_m = trajectory
            .iter()
            .map(Snapshot::altitude)
            .fold(f64::INFINITY, f64::min);

        let max_speed = trajectory.iter().map(Snapshot::speed).fold(0.0_f64, f64::max);

        let max_accel = trajectory
            .iter()
            .map(|s| s.acceleration.norm())
            .fold(0.0_f64, f64::max);

        let max_alpha_deg = trajectory
            .iter()
            .map(|s| s.air_data.alpha_deg.abs())
            .fold(0.0_f64, f64::max);

        let time_stalled = trajectory
            .windows(2)
            .filter(|w| w[1].air_data.alpha_deg.abs() > STALL_DEG)
            .map(|w| w[1].time - w[0].time)
            .sum();

        let dx = last.position.x - first.position.x;
        let dz = last.position.z - first.position.z;

        FlightSummary {
            max_altitude_m: highest.altitude(),
            max_altitude_time: highest.time,
            min_altitude_m,
            max_speed,
            max_accel,
            max_accel_g: max_accel / crate::dynamics::state::G,
            max_alpha_deg,
            time_stalled,
            range_m: (dx * dx + dz * dz).sqrt(),
            flight_time: last.time - first.time,
            impact_speed: last.speed(),
        }
    }
}

#[derive(Serialize)]
struct SummaryDocument<'a> {
    aircraft: &'a str,
    performance: &'a FlightSummary,
    events: Vec<EventRecord>,
}

#[derive(Serialize)]
struct EventRecord {
    time: f64,
    kind: String,
    altitude_m: f64,
}

/// Write flight summary (and any events) as pretty JSON to a writer.
pub fn write_summary<W: Write>(
    writer: &mut W,
    name: &str,
    summary: &FlightSummary,
    events: &[SimEvent],
) -> Result<(), SimError> {
    let doc = SummaryDocument {
        aircraft: name,
        performance: summary,
        events: events
            .iter()
            .map(|e| EventRecord {
                time: e.time,
                kind: format!("{:?}", e.kind),
                altitude_m: e.snapshot.altitude(),
            })
            .collect(),
    };
    serde_json::to_writer_pretty(&mut *writer, &doc)?;
    writeln!(writer)?;
    Ok(())
}

/// Write flight summary JSON to a file.
pub fn write_summary_file(
    path: &str,
    name: &str,
    summary: &FlightSummary,
    events: &[SimEvent],
) -> Result<(), SimError> {
    let mut file = std::fs::File::create(path)?;
    write_summary(&mut file, name, summary, events)
}

/// Write the full trajectory as a pretty JSON array, one object per snapshot.
///
/// Quaternions serialize as `[i, j, k, w]`.
pub fn write_trajectory<W: Write>(writer: &mut W, trajectory: &[Snapshot]) -> Result<(), SimError> {
    serde_json::to_writer_pretty(&mut *writer, trajectory)?;
    writeln!(writer)?;
    Ok(())
}

/// Write the trajectory JSON to a file.
pub fn write_trajectory_file(path: &str, trajectory: &[Snapshot]) -> Result<(), SimError> {
    let mut file = std::io::BufWriter::new(std::fs::File::create(path)?);
    write_trajectory(&mut file, trajectory)?;
    file.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dynamics::Aircraft;
    use crate::physics::polars;
    use crate::sim::EventKind;
    use approx::assert_relative_eq;
    use nalgebra::Vector3;

    fn snap(time: f64, pos: Vector3<f64>, vel: Vector3<f64>, alpha_deg: f64) -> Snapshot {
        let mut plane = Aircraft::new(polars::inert());
        plane.position = pos;
        plane.velocity = vel;
        plane.air_data.alpha_deg = alpha_deg;
        Snapshot::capture(time, &plane)
    }

    fn simple_trajectory() -> Vec<Snapshot> {
        vec![
            snap(0.0, Vector3::new(0.0, 15.0, 0.0), Vector3::new(10.0, 2.0, 0.0), 2.0),
            snap(1.0, Vector3::new(10.0, 18.0, 0.0), Vector3::new(10.0, 0.0, 0.0), 20.0),
            snap(2.0, Vector3::new(30.0, 0.0, 0.0), Vector3::new(12.0, -9.0, 0.0), 4.0),
        ]
    }

    #[test]
    fn summary_computes_extremes() {
        let s = FlightSummary::from_trajectory(&simple_trajectory());
        assert_relative_eq!(s.max_altitude_m, 18.0);
        assert_relative_eq!(s.max_altitude_time, 1.0);
        assert_relative_eq!(s.min_altitude_m, 0.0);
        assert_relative_eq!(s.range_m, 30.0);
        assert_relative_eq!(s.flight_time, 2.0);
        assert_relative_eq!(s.impact_speed, 15.0);
        assert_relative_eq!(s.max_alpha_deg, 20.0);
        assert_relative_eq!(s.time_stalled, 1.0);
    }

    #[test]
    fn empty_trajectory_gives_default() {
        assert_eq!(FlightSummary::from_trajectory(&[]), FlightSummary::default());
    }

    #[test]
    fn json_output_is_valid() {
        let traj = simple_trajectory();
        let summary = FlightSummary::from_trajectory(&traj);
        let events = vec![SimEvent { time: 2.0, kind: EventKind::Touchdown, snapshot: traj[2].clone() }];

        let mut buf = Vec::new();
        write_summary(&mut buf, "Test", &summary, &events).unwrap();
        let value: serde_json::Value = serde_json::from_slice(&buf).unwrap();
        assert_eq!(value["aircraft"], "Test");
        assert_eq!(value["performance"]["max_altitude_m"], 18.0);
        assert_eq!(value["events"][0]["kind"], "Touchdown");
    }

    #[test]
    fn trajectory_json_keeps_every_snapshot() {
        let traj = simple_trajectory();
        let mut buf = Vec::new();
        write_trajectory(&mut buf, &traj).unwrap();
        let value: serde_json::Value = serde_json::from_slice(&buf).unwrap();
        let rows = value.as_array().unwrap();
        assert_eq!(rows.len(), 3);
        assert_eq!(rows[1]["time"], 1.0);
        assert_eq!(rows[1]["position"][1], 18.0);
        assert_eq!(rows[2]["air_data"]["alpha_deg"], 4.0);
        assert_eq!(rows[0]["orientation"].as_array().unwrap().len(), 4);
    }
}
