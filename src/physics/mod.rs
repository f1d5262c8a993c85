pub mod airfoil;
pub mod aerodynamics;

pub use airfoil::{polars, AeroCoeffs, Airfoil, AirfoilSample};
pub use aerodynamics::{compute_aero_coeffs_paper, AeroModel};
