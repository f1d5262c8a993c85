//! JSON flight configuration: one airframe plus the run settings.
//!
//! ```json
//! {
//!   "name": "Trainer",
//!   "position": [0.0, 15.0, 0.0],
//!   "orientation_deg": [0.0, 0.0, 0.0],
//!   "mass": 2.0,
//!   "wing_area": 0.4046,
//!   "wingspan": 1.0,
//!   "chord": 0.1524,
//!   "thrust": 20.0,
//!   "inertia": [0.05, 0.08, 0.1],
//!   "aero_model": "paper",
//!   "sim": { "dt": 0.005, "max_time": 60.0 }
//! }
//! ```
//!
//! `airfoil` may list `[alpha_deg, cl, cd, cm]` rows; when omitted the
//! NACA 4412 polar is used.

use std::fs;
use std::path::Path;

use nalgebra::Vector3;
use serde::Deserialize;

use crate::dynamics::state::{Aircraft, SimConfig};
use crate::error::ConfigError;
use crate::physics::{polars, AeroModel, Airfoil, AirfoilSample};
use crate::vehicle::AirplaneBuilder;

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FlightConfig {
    #[serde(default = "default_name")]
    pub name: String,
    #[serde(default = "zero_vector")]
    pub position: Vector3<f64>,
    #[serde(default = "zero_vector")]
    pub velocity: Vector3<f64>,
    #[serde(default = "zero_vector")]
    pub orientation_deg: Vector3<f64>,
    pub mass: f64,
    pub wing_area: f64,
    pub wingspan: f64,
    pub chord: f64,
    #[serde(default)]
    pub thrust: f64,
    pub inertia: Vector3<f64>,
    #[serde(default)]
    pub aero_model: AeroModel,
    #[serde(default)]
    pub airfoil: Option<Vec<[f64; 4]>>,
    #[serde(default)]
    pub sim: SimConfig,
}

fn default_name() -> String {
    "Aircraft".into()
}

fn zero_vector() -> Vector3<f64> {
    Vector3::zeros()
}

impl FlightConfig {
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let text = fs::read_to_string(path)?;
        Self::from_json(&text)
    }

    pub fn from_json(text: &str) -> Result<Self, ConfigError> {
        let config: FlightConfig = serde_json::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    /// Reject values the physics core would otherwise silently absorb.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let scalars = [
            ("mass", self.mass),
            ("wing_area", self.wing_area),
            ("wingspan", self.wingspan),
            ("chord", self.chord),
            ("thrust", self.thrust),
            ("sim.dt", self.sim.dt),
            ("sim.max_time", self.sim.max_time),
        ];
        for (field, value) in scalars {
            if !value.is_finite() {
                return Err(ConfigError::ValidationError(format!("{field} is not finite")));
            }
        }
        let vectors = [
            ("position", &self.position),
            ("velocity", &self.velocity),
            ("orientation_deg", &self.orientation_deg),
            ("inertia", &self.inertia),
        ];
        for (field, v) in vectors {
            if !v.iter().all(|x| x.is_finite()) {
                return Err(ConfigError::ValidationError(format!("{field} is not finite")));
            }
        }
        if self.mass <= 0.0 {
            return Err(ConfigError::ValidationError(format!("mass must be positive, got {}", self.mass)));
        }
        if self.sim.dt <= 0.0 {
            return Err(ConfigError::ValidationError(format!("sim.dt must be positive, got {}", self.sim.dt)));
        }

        if let Some(rows) = &self.airfoil {
            if rows.is_empty() {
                return Err(ConfigError::ValidationError("airfoil table is empty".into()));
            }
            if rows.iter().flatten().any(|x| !x.is_finite()) {
                return Err(ConfigError::ValidationError("airfoil table has non-finite entries".into()));
            }
            if let Some(i) = rows.windows(2).position(|w| w[1][0] < w[0][0]) {
                return Err(ConfigError::ValidationError(format!(
                    "airfoil rows must ascend in alpha (row {} at {}° follows {}°)",
                    i + 1,
                    rows[i + 1][0],
                    rows[i][0]
                )));
            }
        }
        Ok(())
    }

    pub fn airfoil(&self) -> Airfoil {
        match &self.airfoil {
            Some(rows) => Airfoil::new(rows.iter().copied().map(AirfoilSample::from).collect()),
            None => polars::naca_4412(),
        }
    }

    pub fn build_aircraft(&self) -> Aircraft {
        AirplaneBuilder::new(self.airfoil())
            .aero_model(self.aero_model)
            .position(self.position)
            .velocity(self.velocity)
            .euler_deg(self.orientation_deg)
            .mass(self.mass)
            .wing_area(self.wing_area)
            .wingspan(self.wingspan)
            .chord(self.chord)
            .thrust(self.thrust)
            .inertia(self.inertia)
            .build()
    }
}
