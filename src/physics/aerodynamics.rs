use std::f64::consts::PI;

use serde::{Deserialize, Serialize};

use super::airfoil::{AeroCoeffs, Airfoil};

// ---------------------------------------------------------------------------
// Model constants
// ---------------------------------------------------------------------------

pub const STALL_DEG: f64 = 15.0;     // symmetric stall boundary
pub const CL_LIMIT: f64 = 3.0;       // hard bound on |CL|
pub const CD90: f64 = 1.98;          // flat plate broadside drag
pub const CD_FLOOR_LINEAR: f64 = 1e-4;
pub const CD_FLOOR_STALLED: f64 = 0.01;

/// Nominal 2D lift slope (thin airfoil theory), per rad.
pub const CL_ALPHA_2D: f64 = 2.0 * PI;

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Snap an angle to the nearest quarter degree (polar tabulation step).
pub fn round_to_quarter(x: f64) -> f64 {
    (x / 0.25).round() * 0.25
}

/// Finite-wing lift slope from the 2D slope (lifting-line correction).
///
/// `AR <= 0` (or NaN) leaves the 2D slope unchanged.
pub fn lift_curve_slope_finite(cl_alpha_2d: f64, aspect_ratio: f64) -> f64 {
    if !(aspect_ratio > 0.0) {
        return cl_alpha_2d;
    }
    cl_alpha_2d / (1.0 + cl_alpha_2d / (PI * aspect_ratio))
}

/// Induced angle of attack (rad) produced by `cl` on a wing of aspect ratio `AR`.
pub fn induced_angle_from_cl(cl: f64, aspect_ratio: f64) -> f64 {
    if !(aspect_ratio > 0.0) {
        return 0.0;
    }
    cl / (PI * aspect_ratio)
}

pub fn dynamic_pressure(density: f64, speed: f64) -> f64 {
    0.5 * density * speed * speed
}

// ---------------------------------------------------------------------------
// Whole-wing coefficient model
// ---------------------------------------------------------------------------

/// Lift/drag/moment coefficients of a whole wing at `alpha_deg`.
///
/// Two regimes split at ±15°:
///   * attached flow: lifting-line corrected 2π slope, CN/CT decomposition
///     about the effective (induced-corrected) angle
///   * stalled: flat plate, CN = sin 2α, CT = ½ cos α, drag blended toward Cd90
///
/// Pure and deterministic.
pub fn compute_aero_coeffs_paper(alpha_deg: f64, aspect_ratio: f64, cd0: f64) -> AeroCoeffs {
    let alpha_rad = alpha_deg.to_radians();

    if alpha_deg.abs() <= STALL_DEG {
        let a = lift_curve_slope_finite(CL_ALPHA_2D, aspect_ratio);
        let cl = a * alpha_rad; // zero-lift angle taken as zero

        let alpha_i = induced_angle_from_cl(cl, aspect_ratio);
        let alpha_eff = alpha_rad - alpha_i;

        let cn = cl / alpha_eff.cos();
        let ct = cd0;
        let cd = cn * alpha_eff.sin() + ct * alpha_eff.cos();
        let cm = 0.25 * cn;

        return AeroCoeffs::new(
            cl.clamp(-CL_LIMIT, CL_LIMIT),
            cd.max(CD_FLOOR_LINEAR),
            cm,
        );
    }

    let (sin_a, cos_a) = alpha_rad.sin_cos();
    let cn = (2.0 * alpha_rad).sin();
    let ct = 0.5 * cos_a;

    let cd_plate = (cn * sin_a).abs() + (ct * cos_a).abs();
    let cl = cn * cos_a - ct * sin_a;

    let near_90 = (alpha_deg.abs() / 90.0).min(1.0);
    let w = 0.5 * near_90;
    let cd = cd_plate + (CD90 - cd_plate) * w;

    AeroCoeffs::new(
        cl.clamp(-CL_LIMIT, CL_LIMIT),
        cd.max(CD_FLOOR_STALLED),
        0.25 * cn,
    )
}

// ---------------------------------------------------------------------------
// Model selection
// ---------------------------------------------------------------------------

/// Source of the per-tick aerodynamic coefficients.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AeroModel {
    /// Whole-wing model with post-stall behaviour ([`compute_aero_coeffs_paper`]).
    #[default]
    Paper,
    /// Reduced fidelity: direct lookup in the aircraft's section polar.
    Table,
}

impl AeroModel {
    pub fn coefficients(
        &self,
        airfoil: &Airfoil,
        alpha_deg: f64,
        aspect_ratio: f64,
        cd0: f64,
    ) -> AeroCoeffs {
        match self {
            AeroModel::Paper => compute_aero_coeffs_paper(alpha_deg, aspect_ratio, cd0),
            AeroModel::Table => airfoil.sample(alpha_deg),
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::physics::airfoil::polars;
    use approx::assert_relative_eq;

    #[test]
    fn zero_alpha_zero_lift() {
        for ar in [0.5, 2.47, 6.0, 30.0] {
            let c = compute_aero_coeffs_paper(0.0, ar, 0.02);
            assert_eq!(c.cl, 0.0, "AR {}", ar);
            assert_relative_eq!(c.cd, 0.02, epsilon = 1e-12);
            assert_eq!(c.cm, 0.0);
        }
    }

    #[test]
    fn bounds_hold_across_alpha_sweep() {
        for ar in [0.1, 1.0, 2.47, 8.0, 100.0] {
            let mut alpha = -720.0;
            while alpha <= 720.0 {
                let c = compute_aero_coeffs_paper(alpha, ar, 0.02);
                assert!(c.cl.abs() <= CL_LIMIT, "CL {} at {}", c.cl, alpha);
                let floor = if alpha.abs() <= STALL_DEG { CD_FLOOR_LINEAR } else { CD_FLOOR_STALLED };
                assert!(c.cd >= floor, "CD {} at {}", c.cd, alpha);
                assert!(c.cl.is_finite() && c.cd.is_finite() && c.cm.is_finite());
                alpha += 0.37;
            }
        }
    }

    #[test]
    fn cd_floor_with_negative_baseline() {
        let c = compute_aero_coeffs_paper(0.0, 6.0, -1.0);
        assert_eq!(c.cd, CD_FLOOR_LINEAR);
    }

    #[test]
    fn linear_regime_is_odd_in_alpha() {
        let up = compute_aero_coeffs_paper(8.0, 6.0, 0.02);
        let down = compute_aero_coeffs_paper(-8.0, 6.0, 0.02);
        assert_relative_eq!(up.cl, -down.cl, epsilon = 1e-12);
        assert_relative_eq!(up.cd, down.cd, epsilon = 1e-12);
        assert!(up.cl > 0.0);
    }

    #[test]
    fn finite_wing_slope() {
        // AR 6: a = 2π / (1 + 2/6)
        let a = lift_curve_slope_finite(CL_ALPHA_2D, 6.0);
        assert_relative_eq!(a, 2.0 * PI * 0.75, epsilon = 1e-12);
        assert_eq!(lift_curve_slope_finite(CL_ALPHA_2D, 0.0), CL_ALPHA_2D);
        assert_eq!(induced_angle_from_cl(1.0, -2.0), 0.0);

        let c = compute_aero_coeffs_paper(10.0, 6.0, 0.02);
        assert_relative_eq!(c.cl, a * 10.0_f64.to_radians(), epsilon = 1e-12);
    }

    #[test]
    fn flat_plate_at_90_deg() {
        // CN = sin 180° ≈ 0, CT ≈ 0 → raw drag ≈ 0, blended halfway to Cd90
        let c = compute_aero_coeffs_paper(90.0, 6.0, 0.02);
        assert_relative_eq!(c.cd, 0.5 * CD90, epsilon = 1e-9);
        assert!(c.cl.abs() < 1e-9);
    }

    #[test]
    fn post_stall_at_45_deg() {
        let c = compute_aero_coeffs_paper(45.0, 6.0, 0.02);
        let s = 45.0_f64.to_radians().sin();
        let raw = s + 0.5 * s * s;
        assert_relative_eq!(c.cd, raw + (CD90 - raw) * 0.25, epsilon = 1e-12);
        assert_relative_eq!(c.cl, s - 0.5 * s * s, epsilon = 1e-12);
        assert_relative_eq!(c.cm, 0.25, epsilon = 1e-12);
    }

    #[test]
    fn deterministic() {
        let a = compute_aero_coeffs_paper(23.75, 2.47, 0.02);
        let b = compute_aero_coeffs_paper(23.75, 2.47, 0.02);
        assert_eq!(a, b);
    }

    #[test]
    fn quarter_rounding() {
        assert_eq!(round_to_quarter(5.1), 5.0);
        assert_eq!(round_to_quarter(5.13), 5.25);
        assert_eq!(round_to_quarter(-2.37), -2.25);
        assert_eq!(round_to_quarter(0.0), 0.0);
    }

    #[test]
    fn table_model_reads_polar() {
        let foil = polars::naca_4412();
        let c = AeroModel::Table.coefficients(&foil, 5.0, 2.47, 0.02);
        assert_eq!(c, foil.sample(5.0));
        let p = AeroModel::Paper.coefficients(&foil, 5.0, 2.47, 0.02);
        assert_eq!(p, compute_aero_coeffs_paper(5.0, 2.47, 0.02));
    }
}
