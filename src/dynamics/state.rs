use nalgebra::{UnitQuaternion, Vector3};
use serde::{Deserialize, Serialize};

use crate::physics::{AeroCoeffs, AeroModel, Airfoil};

// ---------------------------------------------------------------------------
// Physical constants
// ---------------------------------------------------------------------------

pub const G: f64 = 9.81;                // m/s^2, world -Y
pub const RHO_SEA_LEVEL: f64 = 1.225;   // kg/m^3
pub const CD0: f64 = 0.02;              // baseline parasite drag

pub const SPEED_EPS: f64 = 1e-6;
pub const AREA_EPS: f64 = 1e-6;
pub const MASS_EPS: f64 = 1e-9;
pub const INERTIA_EPS: f64 = 1e-9;

/// Gravitational acceleration, world frame (Y up).
pub fn gravity() -> Vector3<f64> {
    Vector3::new(0.0, -G, 0.0)
}

/// Element-wise reciprocal of a principal inertia, zero on axes at or below
/// `INERTIA_EPS`.
pub fn inertia_inverse(inertia: &Vector3<f64>) -> Vector3<f64> {
    inertia.map(|i| if i > INERTIA_EPS { 1.0 / i } else { 0.0 })
}

// ---------------------------------------------------------------------------
// Air data (per-tick diagnostics)
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct AirData {
    pub alpha_deg: f64,          // snapped to 0.25 deg
    pub beta_deg: f64,
    pub dynamic_pressure: f64,   // Pa
    pub coeffs: AeroCoeffs,
}

// ---------------------------------------------------------------------------
// Aircraft: rigid body + wing + diagnostics
// ---------------------------------------------------------------------------

/// A single fixed-wing aircraft.
///
/// Body frame: X forward, Y up, Z along the right wing. `orientation` maps
/// body vectors into the world frame; its conjugate maps world into body.
///
/// The force/moment fields at the bottom are overwritten every tick by
/// [`crate::dynamics::update_physics`] and are only there for consumers.
#[derive(Debug, Clone, PartialEq)]
pub struct Aircraft {
    pub airfoil: Airfoil,
    pub aero_model: AeroModel,

    pub position: Vector3<f64>,             // m, world
    pub velocity: Vector3<f64>,             // m/s, world
    pub acceleration: Vector3<f64>,         // m/s^2, world

    pub orientation: UnitQuaternion<f64>,   // body→world
    pub angular_velocity: Vector3<f64>,     // rad/s, body (p, q, r)
    pub angular_acceleration: Vector3<f64>, // rad/s^2, body

    pub mass: f64,                          // kg
    pub inertia: Vector3<f64>,              // [Ixx, Iyy, Izz], kg·m^2
    pub inertia_inv: Vector3<f64>,

    pub wing_area: f64,                     // m^2
    pub wingspan: f64,                      // m
    pub chord: f64,                         // mean aerodynamic chord, m

    pub thrust: f64,                        // N along body +X

    pub lift: Vector3<f64>,                 // N, world
    pub drag: Vector3<f64>,                 // N, world
    pub thrust_vec: Vector3<f64>,           // N, world
    pub total_force: Vector3<f64>,          // N, world
    pub body_moment: Vector3<f64>,          // N·m, body
    pub air_data: AirData,
}

impl Aircraft {
    /// Unit-mass, unit-wing aircraft at rest at the origin, level.
    pub fn new(airfoil: Airfoil) -> Self {
        let inertia = Vector3::repeat(1.0);
        Self {
            airfoil,
            aero_model: AeroModel::default(),
            position: Vector3::zeros(),
            velocity: Vector3::zeros(),
            acceleration: Vector3::zeros(),
            orientation: UnitQuaternion::identity(),
            angular_velocity: Vector3::zeros(),
            angular_acceleration: Vector3::zeros(),
            mass: 1.0,
            inertia,
            inertia_inv: inertia_inverse(&inertia),
            wing_area: 1.0,
            wingspan: 1.0,
            chord: 0.1,
            thrust: 0.0,
            lift: Vector3::zeros(),
            drag: Vector3::zeros(),
            thrust_vec: Vector3::zeros(),
            total_force: Vector3::zeros(),
            body_moment: Vector3::zeros(),
            air_data: AirData::default(),
        }
    }

    /// Replace the principal inertia and refresh its guarded inverse.
    pub fn set_inertia(&mut self, inertia: Vector3<f64>) {
        self.inertia = inertia;
        self.inertia_inv = inertia_inverse(&inertia);
    }

    /// b² / S, or 1 when the wing area is degenerate.
    pub fn aspect_ratio(&self) -> f64 {
        if self.wing_area > AREA_EPS {
            self.wingspan * self.wingspan / self.wing_area
        } else {
            1.0
        }
    }

    pub fn speed(&self) -> f64 {
        self.velocity.norm()
    }

    /// Velocity expressed in the body frame.
    pub fn velocity_body(&self) -> Vector3<f64> {
        self.orientation.inverse_transform_vector(&self.velocity)
    }

    /// Nose direction in the world frame.
    pub fn forward(&self) -> Vector3<f64> {
        self.orientation * Vector3::x()
    }

    /// Nose elevation above the world horizontal (rad).
    pub fn pitch(&self) -> f64 {
        self.forward().y.clamp(-1.0, 1.0).asin()
    }

    pub fn altitude(&self) -> f64 {
        self.position.y
    }

    /// Kinetic plus potential energy (J), datum at y = 0.
    pub fn energy(&self) -> f64 {
        0.5 * self.mass * self.velocity.norm_squared() + self.mass * G * self.position.y
    }
}

// ---------------------------------------------------------------------------
// Simulation config
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimConfig {
    pub dt: f64,
    pub max_time: f64,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            dt: 0.01,         // 100 Hz
            max_time: 120.0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::physics::polars;
    use approx::assert_relative_eq;

    #[test]
    fn inverse_inertia_guards_small_axes() {
        let inv = inertia_inverse(&Vector3::new(2.0, 0.0, -1.0));
        assert_eq!(inv, Vector3::new(0.5, 0.0, 0.0));
    }

    #[test]
    fn aspect_ratio_fallback() {
        let mut a = Aircraft::new(polars::naca_4412());
        a.wingspan = 2.0;
        a.wing_area = 0.5;
        assert_relative_eq!(a.aspect_ratio(), 8.0);
        a.wing_area = 0.0;
        assert_eq!(a.aspect_ratio(), 1.0);
    }

    #[test]
    fn body_velocity_of_pitched_aircraft() {
        let mut a = Aircraft::new(polars::inert());
        // nose 90° up: world +Y is body +X
        a.orientation = UnitQuaternion::from_axis_angle(&Vector3::z_axis(), std::f64::consts::FRAC_PI_2);
        a.velocity = Vector3::new(0.0, 10.0, 0.0);
        let vb = a.velocity_body();
        assert_relative_eq!(vb, Vector3::new(10.0, 0.0, 0.0), epsilon = 1e-12);
        assert_relative_eq!(a.pitch(), std::f64::consts::FRAC_PI_2, epsilon = 1e-9);
    }
}
