use flight_sim::dynamics::SimConfig;
use flight_sim::io::csv;
use flight_sim::io::json::{self, FlightSummary};
use flight_sim::logging;
use flight_sim::sim::{
    self, AltitudeDetector, Crossing, EventDetector, StallDetector, TouchdownDetector,
};
use flight_sim::vehicle::presets;

fn main() {
    logging::init_logging();

    let mut plane = presets::glider();
    let config = SimConfig { dt: 0.005, max_time: 120.0 };

    println!("Simulating unpowered glide from {:.0} m ...", plane.altitude());
    let mut detectors: Vec<Box<dyn EventDetector>> = vec![
        Box::new(StallDetector::default()),
        Box::new(AltitudeDetector::new(25.0, Crossing::Descending)),
        Box::new(TouchdownDetector),
    ];
    let (trajectory, events) = sim::simulate_with(&mut plane, &config, &mut detectors);

    let summary = FlightSummary::from_trajectory(&trajectory);
    println!("Range: {:.1} m", summary.range_m);
    println!("Flight time: {:.1} s", summary.flight_time);
    println!("Max |AoA|: {:.1} deg, stalled for {:.2} s", summary.max_alpha_deg, summary.time_stalled);
    if summary.flight_time > 0.0 {
        println!("Glide ratio: {:.2}", summary.range_m / (trajectory[0].altitude() - summary.min_altitude_m).max(1e-9));
    }
    for e in &events {
        println!("  t={:>7.2}s  {:?}", e.time, e.kind);
    }

    csv::write_trajectory_file("glide_trajectory.csv", &trajectory)
        .expect("Failed to write CSV");
    json::write_summary_file("glide_summary.json", "Glider", &summary, &events)
        .expect("Failed to write JSON");
    json::write_trajectory_file("glide_trajectory.json", &trajectory)
        .expect("Failed to write JSON trajectory");

    println!("Exported: glide_trajectory.csv, glide_trajectory.json, glide_summary.json");
}
