use std::process::ExitCode;

use flight_sim::config::FlightConfig;
use flight_sim::dynamics::{Aircraft, SimConfig};
use flight_sim::io::json::FlightSummary;
use flight_sim::logging;
use flight_sim::sim::{self, ApexDetector, EventDetector, StallDetector, TouchdownDetector};
use flight_sim::vehicle::presets;

fn main() -> ExitCode {
    logging::init_logging();

    // -----------------------------------------------------------------------
    // Aircraft: JSON config from argv[1], else the NACA 4412 trainer
    // -----------------------------------------------------------------------
    let (name, mut plane, config) = match std::env::args().nth(1) {
        Some(path) => match FlightConfig::from_file(&path) {
            Ok(cfg) => (cfg.name.clone(), cfg.build_aircraft(), cfg.sim),
            Err(e) => {
                tracing::error!(path = %path, error = %e, "could not load flight config");
                return ExitCode::FAILURE;
            }
        },
        None => (
            "Trainer".to_string(),
            presets::trainer(),
            SimConfig { dt: 0.005, max_time: 60.0 },
        ),
    };

    let initial = plane.clone();

    // -----------------------------------------------------------------------
    // Run simulation
    // -----------------------------------------------------------------------
    let mut detectors: Vec<Box<dyn EventDetector>> = vec![
        Box::new(StallDetector::default()),
        Box::new(ApexDetector),
        Box::new(TouchdownDetector),
    ];
    let (trajectory, events) = sim::simulate_with(&mut plane, &config, &mut detectors);
    let summary = FlightSummary::from_trajectory(&trajectory);

    // -----------------------------------------------------------------------
    // Print results
    // -----------------------------------------------------------------------
    print_report(&name, &initial, &config, &summary);

    println!("  Flight Events");
    println!("  ──────────────────────────────────────────────────────────────────");
    if events.is_empty() {
        println!("  (none)");
    }
    for e in &events {
        println!(
            "  t={:>7.2}s   alt={:>8.2}m   speed={:>6.2}m/s   {:?}",
            e.time,
            e.snapshot.altitude(),
            e.snapshot.speed(),
            e.kind
        );
    }
    println!();

    println!("  Trajectory");
    println!("  ──────────────────────────────────────────────────────────────────");
    println!(
        "  {:>7}  {:>8}  {:>8}  {:>8}  {:>7}  {:>7}  {:>8}",
        "t (s)", "x (m)", "alt (m)", "V (m/s)", "AoA", "pitch", "lift (N)"
    );
    println!("  {}", "─".repeat(66));

    let sample_interval = (trajectory.len() / 30).max(1);
    for (i, s) in trajectory.iter().enumerate() {
        if i % sample_interval != 0 && i != trajectory.len() - 1 {
            continue;
        }
        println!(
            "  {:>7.2}  {:>8.2}  {:>8.2}  {:>8.2}  {:>7.2}  {:>7.2}  {:>8.2}",
            s.time,
            s.position.x,
            s.altitude(),
            s.speed(),
            s.air_data.alpha_deg,
            s.pitch().to_degrees(),
            s.lift.norm(),
        );
    }

    println!();
    println!("  Simulation: {} steps, dt={} s", trajectory.len() - 1, config.dt);
    println!("====================================================================");
    println!();

    ExitCode::SUCCESS
}

fn print_report(name: &str, plane: &Aircraft, config: &SimConfig, summary: &FlightSummary) {
    println!();
    println!("====================================================================");
    println!("  FIXED-WING FLIGHT SIMULATION: {}", name);
    println!("====================================================================");
    println!();
    println!("  Aircraft Parameters");
    println!("  ──────────────────────────────────────────────────────────────────");
    println!(
        "  Mass:          {:>8.3} kg    Thrust:       {:>8.2} N",
        plane.mass, plane.thrust
    );
    println!(
        "  Wing area:     {:>8.4} m^2   Span:         {:>8.3} m",
        plane.wing_area, plane.wingspan
    );
    println!(
        "  Chord:         {:>8.4} m     Aspect ratio: {:>8.3}",
        plane.chord,
        plane.aspect_ratio()
    );
    println!(
        "  Aero model:    {:>8?}       Polar rows:   {:>8}",
        plane.aero_model,
        plane.airfoil.samples().len()
    );
    println!(
        "  Section a0:    {:>8.3} /rad  Max time:     {:>8.1} s",
        plane.airfoil.estimate_cl_alpha_2d(),
        config.max_time
    );
    println!();

    println!("  Performance Summary");
    println!("  ──────────────────────────────────────────────────────────────────");
    println!(
        "  Max altitude:  {:>8.2} m   at t={:.2} s",
        summary.max_altitude_m, summary.max_altitude_time
    );
    println!("  Max speed:     {:>8.2} m/s", summary.max_speed);
    println!(
        "  Max accel:     {:>8.2} m/s^2 ({:.1} g)",
        summary.max_accel, summary.max_accel_g
    );
    println!(
        "  Max |AoA|:     {:>8.2} deg   stalled {:.2} s",
        summary.max_alpha_deg, summary.time_stalled
    );
    println!("  Range:         {:>8.2} m", summary.range_m);
    println!("  Flight time:   {:>8.2} s", summary.flight_time);
    println!("  Impact speed:  {:>8.2} m/s", summary.impact_speed);
    println!();
}
