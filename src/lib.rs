pub mod physics;
pub mod dynamics;
pub mod vehicle;
pub mod sim;
pub mod io;
pub mod config;
pub mod error;
pub mod logging;

pub use dynamics::{update_physics, Aircraft, SimConfig};
pub use error::{ConfigError, SimError};
pub use physics::{compute_aero_coeffs_paper, AeroCoeffs, AeroModel, Airfoil, AirfoilSample};
pub use vehicle::create_airplane;
