use nalgebra::{UnitQuaternion, Vector3};

use crate::dynamics::state::Aircraft;
use crate::physics::{AeroModel, Airfoil};

// ---------------------------------------------------------------------------
// Factory
// ---------------------------------------------------------------------------

/// Initial attitude from Euler angles in degrees.
///
/// `euler_deg` is (pitch about body X, yaw about body Y, roll about body Z),
/// composed as yaw ∘ pitch ∘ roll.
pub fn euler_deg_to_quaternion(euler_deg: &Vector3<f64>) -> UnitQuaternion<f64> {
    let q_pitch = UnitQuaternion::from_axis_angle(&Vector3::x_axis(), euler_deg.x.to_radians());
    let q_yaw = UnitQuaternion::from_axis_angle(&Vector3::y_axis(), euler_deg.y.to_radians());
    let q_roll = UnitQuaternion::from_axis_angle(&Vector3::z_axis(), euler_deg.z.to_radians());
    UnitQuaternion::new_normalize((q_yaw * q_pitch * q_roll).into_inner())
}

/// Build an aircraft around `airfoil`.
///
/// No validation: zero or negative mass/geometry is accepted and shows up
/// as degenerate (but finite) dynamics.
#[allow(clippy::too_many_arguments)]
pub fn create_airplane(
    airfoil: Airfoil,
    position: Vector3<f64>,
    orientation_euler_deg: Vector3<f64>,
    mass: f64,
    wing_area: f64,
    wingspan: f64,
    chord: f64,
    thrust: f64,
    inertia_principal: Vector3<f64>,
) -> Aircraft {
    let mut plane = Aircraft::new(airfoil);
    plane.position = position;
    plane.orientation = euler_deg_to_quaternion(&orientation_euler_deg);

    plane.mass = mass;
    plane.wing_area = wing_area;
    plane.wingspan = wingspan;
    plane.chord = chord;
    plane.thrust = thrust;
    plane.set_inertia(inertia_principal);

    plane
}

// ---------------------------------------------------------------------------
// Airplane builder
// ---------------------------------------------------------------------------

pub struct AirplaneBuilder {
    airfoil: Airfoil,
    aero_model: AeroModel,
    position: Vector3<f64>,
    velocity: Vector3<f64>,
    euler_deg: Vector3<f64>,
    mass: f64,
    wing_area: f64,
    wingspan: f64,
    chord: f64,
    thrust: f64,
    inertia: Vector3<f64>,
}

impl AirplaneBuilder {
    pub fn new(airfoil: Airfoil) -> Self {
        Self {
            airfoil,
            aero_model: AeroModel::default(),
            position: Vector3::zeros(),
            velocity: Vector3::zeros(),
            euler_deg: Vector3::zeros(),
            mass: 1.0,
            wing_area: 1.0,
            wingspan: 1.0,
            chord: 0.1,
            thrust: 0.0,
            inertia: Vector3::repeat(1.0),
        }
    }

    pub fn aero_model(mut self, v: AeroModel) -> Self { self.aero_model = v; self }
    pub fn position(mut self, v: Vector3<f64>) -> Self { self.position = v; self }
    pub fn velocity(mut self, v: Vector3<f64>) -> Self { self.velocity = v; self }
    pub fn euler_deg(mut self, v: Vector3<f64>) -> Self { self.euler_deg = v; self }
    pub fn mass(mut self, v: f64) -> Self { self.mass = v; self }
    pub fn wing_area(mut self, v: f64) -> Self { self.wing_area = v; self }
    pub fn wingspan(mut self, v: f64) -> Self { self.wingspan = v; self }
    pub fn chord(mut self, v: f64) -> Self { self.chord = v; self }
    pub fn thrust(mut self, v: f64) -> Self { self.thrust = v; self }
    pub fn inertia(mut self, v: Vector3<f64>) -> Self { self.inertia = v; self }

    pub fn build(self) -> Aircraft {
        let mut plane = create_airplane(
            self.airfoil,
            self.position,
            self.euler_deg,
            self.mass,
            self.wing_area,
            self.wingspan,
            self.chord,
            self.thrust,
            self.inertia,
        );
        plane.aero_model = self.aero_model;
        plane.velocity = self.velocity;
        plane
    }
}

// ---------------------------------------------------------------------------
// Preset airframes
// ---------------------------------------------------------------------------

pub mod presets {
    use super::*;
    use crate::physics::polars;

    /// Small NACA 4412 hand-launch trainer, released level at 15 m.
    ///
    /// Inertia is left at zero, so the attitude never changes.
    pub fn trainer() -> Aircraft {
        AirplaneBuilder::new(polars::naca_4412())
            .position(Vector3::new(0.0, 15.0, 0.0))
            .mass(2.0)
            .wing_area(0.4046)
            .wingspan(1.0)
            .chord(0.1524)
            .thrust(20.0)
            .inertia(Vector3::zeros())
            .build()
    }

    /// Trainer airframe with finite inertia, launched at 15 m/s.
    pub fn glider() -> Aircraft {
        AirplaneBuilder::new(polars::naca_4412())
            .position(Vector3::new(0.0, 50.0, 0.0))
            .velocity(Vector3::new(15.0, 0.0, 0.0))
            .mass(2.0)
            .wing_area(0.4046)
            .wingspan(1.0)
            .chord(0.1524)
            .inertia(Vector3::new(0.08, 0.12, 0.16))
            .build()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::physics::polars;
    use approx::assert_relative_eq;

    fn make(euler: Vector3<f64>, inertia: Vector3<f64>) -> Aircraft {
        create_airplane(
            polars::naca_4412(),
            Vector3::new(1.0, 2.0, 3.0),
            euler,
            2.0,
            0.4,
            1.2,
            0.15,
            12.0,
            inertia,
        )
    }

    #[test]
    fn zero_euler_is_identity() {
        let a = make(Vector3::zeros(), Vector3::repeat(1.0));
        assert_eq!(a.orientation, UnitQuaternion::identity());
        assert_eq!(a.position, Vector3::new(1.0, 2.0, 3.0));
        assert_eq!(a.velocity, Vector3::zeros());
    }

    #[test]
    fn copies_properties_and_inverts_inertia() {
        let a = make(Vector3::zeros(), Vector3::new(4.0, 0.0, -2.0));
        assert_eq!((a.mass, a.wing_area, a.wingspan, a.chord, a.thrust), (2.0, 0.4, 1.2, 0.15, 12.0));
        assert_eq!(a.inertia, Vector3::new(4.0, 0.0, -2.0));
        assert_eq!(a.inertia_inv, Vector3::new(0.25, 0.0, 0.0));
    }

    #[test]
    fn single_axis_angles() {
        // pitch 90° about X takes body Y (up) to world Z
        let q = euler_deg_to_quaternion(&Vector3::new(90.0, 0.0, 0.0));
        assert_relative_eq!(q * Vector3::y(), Vector3::z(), epsilon = 1e-12);
        // yaw 90° about Y takes nose (X) to world -Z
        let q = euler_deg_to_quaternion(&Vector3::new(0.0, 90.0, 0.0));
        assert_relative_eq!(q * Vector3::x(), -Vector3::z(), epsilon = 1e-12);
        // roll 90° about Z takes nose to world +Y
        let q = euler_deg_to_quaternion(&Vector3::new(0.0, 0.0, 90.0));
        assert_relative_eq!(q * Vector3::x(), Vector3::y(), epsilon = 1e-12);
    }

    #[test]
    fn composition_order_is_yaw_pitch_roll() {
        let e = Vector3::new(30.0, 45.0, 60.0);
        let q = euler_deg_to_quaternion(&e);
        let expected = UnitQuaternion::from_axis_angle(&Vector3::y_axis(), 45f64.to_radians())
            * UnitQuaternion::from_axis_angle(&Vector3::x_axis(), 30f64.to_radians())
            * UnitQuaternion::from_axis_angle(&Vector3::z_axis(), 60f64.to_radians());
        assert!(q.angle_to(&expected) < 1e-12);

        let swapped = UnitQuaternion::from_axis_angle(&Vector3::x_axis(), 30f64.to_radians())
            * UnitQuaternion::from_axis_angle(&Vector3::y_axis(), 45f64.to_radians())
            * UnitQuaternion::from_axis_angle(&Vector3::z_axis(), 60f64.to_radians());
        assert!(q.angle_to(&swapped) > 1e-3);
        assert_relative_eq!(q.quaternion().norm(), 1.0, epsilon = 1e-12);
    }

    #[test]
    fn builder_defaults_match_aircraft_defaults() {
        let built = AirplaneBuilder::new(polars::naca_4412()).build();
        let plain = Aircraft::new(polars::naca_4412());
        assert_eq!(built, plain);
    }

    #[test]
    fn trainer_preset() {
        let t = presets::trainer();
        assert_eq!(t.position, Vector3::new(0.0, 15.0, 0.0));
        assert_eq!(t.inertia_inv, Vector3::zeros());
        assert_relative_eq!(t.aspect_ratio(), 1.0 / 0.4046, epsilon = 1e-12);
    }
}
