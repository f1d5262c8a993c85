use eframe::egui;
use egui_plot::{Line, Plot, Points};

use flight_sim::config::FlightConfig;
use flight_sim::dynamics::SimConfig;
use flight_sim::io::json::FlightSummary;
use flight_sim::logging;
use flight_sim::sim::{self, Snapshot};
use flight_sim::vehicle::presets;

fn main() -> eframe::Result {
    logging::init_logging();

    let (name, mut plane, config) = match std::env::args().nth(1) {
        Some(path) => match FlightConfig::from_file(&path) {
            Ok(cfg) => (cfg.name.clone(), cfg.build_aircraft(), cfg.sim),
            Err(e) => {
                tracing::error!(path = %path, error = %e, "could not load flight config, using trainer");
                ("Trainer".to_string(), presets::trainer(), SimConfig { dt: 0.005, max_time: 60.0 })
            }
        },
        None => ("Trainer".to_string(), presets::trainer(), SimConfig { dt: 0.005, max_time: 60.0 }),
    };

    let trajectory = sim::simulate(&mut plane, &config);
    let summary = FlightSummary::from_trajectory(&trajectory);

    let app = FlightViz { name, trajectory, summary, view: ViewState::default() };
    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default().with_inner_size([1200.0, 800.0]),
        ..Default::default()
    };
    eframe::run_native("Fixed-Wing Flight Simulator", options, Box::new(|_| Ok(Box::new(app))))
}

/// What the user has picked in the side panel.
#[derive(Debug, Clone, Copy)]
struct ViewState {
    /// Index into the trajectory marked on every plot.
    cursor: usize,
    show_forces: bool,
    equal_aspect: bool,
}

impl Default for ViewState {
    fn default() -> Self {
        Self { cursor: 0, show_forces: false, equal_aspect: true }
    }
}

struct FlightViz {
    name: String,
    trajectory: Vec<Snapshot>,
    summary: FlightSummary,
    view: ViewState,
}

impl FlightViz {
    fn cursor(&self) -> Option<&Snapshot> {
        self.trajectory.get(self.view.cursor)
    }
}

fn series(samples: &[&Snapshot], f: impl Fn(&Snapshot) -> [f64; 2]) -> Vec<[f64; 2]> {
    samples.iter().map(|s| f(s)).collect()
}

impl eframe::App for FlightViz {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        let step = (self.trajectory.len() / 2000).max(1);
        let sampled: Vec<&Snapshot> = self.trajectory.iter().step_by(step).collect();
        let last_index = self.trajectory.len().saturating_sub(1);

        egui::TopBottomPanel::top("header").show(ctx, |ui| {
            ui.heading(format!("Aircraft: {}", self.name));
            ui.label(format!(
                "Max altitude: {:.1} m  |  Max speed: {:.1} m/s  |  Range: {:.1} m  |  Flight: {:.2} s  |  Stalled: {:.2} s",
                self.summary.max_altitude_m,
                self.summary.max_speed,
                self.summary.range_m,
                self.summary.flight_time,
                self.summary.time_stalled,
            ));
        });

        egui::SidePanel::right("view").show(ctx, |ui| {
            ui.heading("View");
            ui.add(egui::Slider::new(&mut self.view.cursor, 0..=last_index).text("tick"));
            ui.checkbox(&mut self.view.show_forces, "Lift and drag plot");
            ui.checkbox(&mut self.view.equal_aspect, "Equal aspect side view");
            ui.separator();
            if let Some(s) = self.trajectory.get(self.view.cursor) {
                ui.label(format!("t = {:.3} s", s.time));
                ui.label(format!("altitude = {:.2} m", s.altitude()));
                ui.label(format!("speed = {:.2} m/s", s.speed()));
                ui.label(format!("AoA = {:.2} deg", s.air_data.alpha_deg));
                ui.label(format!("sideslip = {:.2} deg", s.air_data.beta_deg));
                ui.label(format!("pitch = {:.2} deg", s.pitch().to_degrees()));
                ui.label(format!("CL = {:.3}  CD = {:.3}", s.air_data.coeffs.cl, s.air_data.coeffs.cd));
            }
        });

        let marker = self.cursor().cloned();
        let view = self.view;

        egui::CentralPanel::default().show(ctx, |ui| {
            let available = ui.available_size();
            let half_w = available.x / 2.0 - 8.0;
            let half_h = available.y / 2.0 - 8.0;

            ui.horizontal(|ui| {
                ui.vertical(|ui| {
                    ui.label("Altitude (m)");
                    Plot::new("altitude")
                        .width(half_w)
                        .height(half_h)
                        .x_axis_label("Time (s)")
                        .show(ui, |plot_ui| {
                            plot_ui.line(Line::new("Altitude", series(&sampled, |s| [s.time, s.altitude()])));
                            if let Some(m) = &marker {
                                plot_ui.points(Points::new("t", vec![[m.time, m.altitude()]]).radius(4.0));
                            }
                        });
                });

                ui.vertical(|ui| {
                    ui.label("Airspeed (m/s)");
                    Plot::new("speed")
                        .width(half_w)
                        .height(half_h)
                        .x_axis_label("Time (s)")
                        .show(ui, |plot_ui| {
                            plot_ui.line(Line::new("Speed", series(&sampled, |s| [s.time, s.speed()])));
                            if let Some(m) = &marker {
                                plot_ui.points(Points::new("t", vec![[m.time, m.speed()]]).radius(4.0));
                            }
                        });
                });
            });

            ui.horizontal(|ui| {
                ui.vertical(|ui| {
                    if view.show_forces {
                        ui.label("Aerodynamic Forces (N)");
                        Plot::new("forces")
                            .width(half_w)
                            .height(half_h)
                            .x_axis_label("Time (s)")
                            .show(ui, |plot_ui| {
                                plot_ui.line(Line::new("Lift", series(&sampled, |s| [s.time, s.lift.norm()])));
                                plot_ui.line(Line::new("Drag", series(&sampled, |s| [s.time, s.drag.norm()])));
                            });
                    } else {
                        ui.label("Angle of Attack / Pitch (deg)");
                        Plot::new("alpha")
                            .width(half_w)
                            .height(half_h)
                            .x_axis_label("Time (s)")
                            .show(ui, |plot_ui| {
                                plot_ui.line(Line::new("AoA", series(&sampled, |s| [s.time, s.air_data.alpha_deg])));
                                plot_ui.line(Line::new("Pitch", series(&sampled, |s| [s.time, s.pitch().to_degrees()])));
                            });
                    }
                });

                ui.vertical(|ui| {
                    ui.label("Side View (m)");
                    let mut plot = Plot::new("side")
                        .width(half_w)
                        .height(half_h)
                        .x_axis_label("Distance (m)");
                    if view.equal_aspect {
                        plot = plot.data_aspect(1.0);
                    }
                    plot.show(ui, |plot_ui| {
                        plot_ui.line(Line::new("Path", series(&sampled, |s| [s.position.x, s.altitude()])));
                        if let Some(m) = &marker {
                            plot_ui.points(Points::new("t", vec![[m.position.x, m.altitude()]]).radius(4.0));
                        }
                    });
                });
            });
        });
    }
}
