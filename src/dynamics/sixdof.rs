use nalgebra::{Quaternion, UnitQuaternion, Vector3};

use crate::dynamics::state::{gravity, Aircraft, AirData, CD0, MASS_EPS, RHO_SEA_LEVEL, SPEED_EPS};
use crate::physics::aerodynamics::{dynamic_pressure, round_to_quarter};

// ---------------------------------------------------------------------------
// 6DOF step
// ---------------------------------------------------------------------------

/// Advance `plane` by `dt` seconds in place.
///
/// Order of operations:
///   1. world velocity → body, AoA/sideslip (AoA snapped to 0.25°)
///   2. coefficients from the aircraft's aero model
///   3. lift ⟂ (velocity, span), drag opposing velocity, thrust along +X
///   4. semi-implicit Euler on velocity then position
///   5. pitch moment Cm·q·S·c, Euler's equations with diagonal inertia
///   6. q ← normalize(q + ½·q⊗(0, ω)·dt)
///
/// A non-positive (or NaN) `dt` is a no-op. Degenerate inputs fall back to
/// finite values instead of propagating NaN.
pub fn update_physics(plane: &mut Aircraft, dt: f64) {
    if !(dt > 0.0) {
        return;
    }

    let q = plane.orientation;

    // --- Air data (body frame) ---
    let vel_body = q.inverse_transform_vector(&plane.velocity);
    let speed = plane.velocity.norm().max(SPEED_EPS);

    let alpha_deg = round_to_quarter(vel_body.y.atan2(vel_body.x).to_degrees());
    let beta_deg = vel_body.z.atan2(vel_body.x).to_degrees();

    // --- Coefficients ---
    let aspect_ratio = plane.aspect_ratio();
    let coeffs = plane
        .aero_model
        .coefficients(&plane.airfoil, alpha_deg, aspect_ratio, CD0);

    // --- Forces (body frame → world) ---
    let q_dyn = dynamic_pressure(RHO_SEA_LEVEL, speed);
    let (lift_dir, drag_dir) = aero_directions(&vel_body);

    let lift_body = lift_dir * (q_dyn * plane.wing_area * coeffs.cl);
    let drag_body = drag_dir * (q_dyn * plane.wing_area * coeffs.cd);
    let thrust_body = Vector3::new(plane.thrust, 0.0, 0.0);

    plane.lift = q * lift_body;
    plane.drag = q * drag_body;
    plane.thrust_vec = q * thrust_body;
    plane.air_data = AirData {
        alpha_deg,
        beta_deg,
        dynamic_pressure: q_dyn,
        coeffs,
    };

    // --- Translation ---
    plane.total_force = plane.lift + plane.drag + plane.thrust_vec + gravity() * plane.mass;
    plane.acceleration = if plane.mass > MASS_EPS {
        plane.total_force / plane.mass
    } else {
        Vector3::zeros()
    };

    plane.velocity += plane.acceleration * dt;
    plane.position += plane.velocity * dt;

    // --- Moments (body frame), roll/yaw unmodeled ---
    let m_pitch = coeffs.cm * q_dyn * plane.wing_area * plane.chord;
    plane.body_moment = Vector3::new(0.0, m_pitch, 0.0);

    // --- Euler's equations: I·dω = M − ω × (I·ω) ---
    let omega = plane.angular_velocity;
    let i_omega = plane.inertia.component_mul(&omega);
    let gyro = omega.cross(&i_omega);
    plane.angular_acceleration = plane.inertia_inv.component_mul(&(plane.body_moment - gyro));
    plane.angular_velocity += plane.angular_acceleration * dt;

    // --- Quaternion kinematics: dq/dt = 0.5 * q * omega_quat ---
    plane.orientation = integrate_orientation(&q, &plane.angular_velocity, dt);

    tracing::trace!(
        alpha = alpha_deg,
        beta = beta_deg,
        lift = plane.lift.norm(),
        drag = plane.drag.norm(),
        thrust = plane.thrust_vec.norm(),
        total = plane.total_force.norm(),
        accel = plane.acceleration.norm(),
        "physics step"
    );
}

/// Unit lift and drag directions for a body-frame airflow.
///
/// Lift is perpendicular to both the velocity and the span (+Z), falling
/// back to body up when the two are parallel. At rest drag has no direction.
pub fn aero_directions(vel_body: &Vector3<f64>) -> (Vector3<f64>, Vector3<f64>) {
    let up = Vector3::y();
    let Some(v_hat) = vel_body.try_normalize(SPEED_EPS) else {
        return (up, Vector3::zeros());
    };

    let span = Vector3::z();
    let lift_dir = span.cross(&v_hat).try_normalize(SPEED_EPS).unwrap_or(up);

    (lift_dir, -v_hat)
}

/// First-order quaternion update with renormalisation.
///
/// Keeps the previous attitude if the raw update collapses to zero length.
pub fn integrate_orientation(
    q: &UnitQuaternion<f64>,
    omega_body: &Vector3<f64>,
    dt: f64,
) -> UnitQuaternion<f64> {
    let omega_quat = Quaternion::new(0.0, omega_body.x, omega_body.y, omega_body.z);
    let q_dot = q.quaternion() * omega_quat * 0.5;
    let q_raw = q.quaternion() + q_dot * dt;
    UnitQuaternion::try_new(q_raw, 1e-12).unwrap_or(*q)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
