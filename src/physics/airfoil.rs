use std::f64::consts::PI;

use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Aerodynamic coefficients
// ---------------------------------------------------------------------------

/// Non-dimensional force/moment coefficients for one angle of attack.
///
/// Roll and yaw coefficients are carried for completeness but nothing
/// models them yet; they are always zero.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct AeroCoeffs {
    pub cl: f64,      // lift
    pub cd: f64,      // drag
    pub cm: f64,      // pitching moment
    pub cl_roll: f64, // rolling moment (unmodeled)
    pub cn_yaw: f64,  // yawing moment (unmodeled)
}

impl AeroCoeffs {
    pub fn new(cl: f64, cd: f64, cm: f64) -> Self {
        Self { cl, cd, cm, cl_roll: 0.0, cn_yaw: 0.0 }
    }

    pub fn zero() -> Self {
        Self::default()
    }
}

// ---------------------------------------------------------------------------
// Airfoil polar table
// ---------------------------------------------------------------------------

/// One row of a tabulated polar.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AirfoilSample {
    pub alpha_deg: f64,
    pub cl: f64,
    pub cd: f64,
    pub cm: f64,
}

impl AirfoilSample {
    pub fn new(alpha_deg: f64, cl: f64, cd: f64, cm: f64) -> Self {
        Self { alpha_deg, cl, cd, cm }
    }
}

impl From<[f64; 4]> for AirfoilSample {
    fn from(row: [f64; 4]) -> Self {
        Self::new(row[0], row[1], row[2], row[3])
    }
}

/// Polar lookup table, rows sorted ascending by `alpha_deg`.
///
/// Immutable once built. Queries outside the tabulated range are held at the
/// boundary row; an empty table answers every query with zero coefficients.
#[derive(Debug, Clone, PartialEq)]
pub struct Airfoil {
    data: Vec<AirfoilSample>,
    min_alpha: f64,
    max_alpha: f64,
}

impl Airfoil {
    pub fn new(data: Vec<AirfoilSample>) -> Self {
        let (min_alpha, max_alpha) = match (data.first(), data.last()) {
            (Some(first), Some(last)) => (first.alpha_deg, last.alpha_deg),
            _ => (0.0, 0.0),
        };
        Self { data, min_alpha, max_alpha }
    }

    pub fn samples(&self) -> &[AirfoilSample] {
        &self.data
    }

    pub fn min_alpha(&self) -> f64 {
        self.min_alpha
    }

    pub fn max_alpha(&self) -> f64 {
        self.max_alpha
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Linearly interpolated coefficients at `alpha_deg` (clamped, never extrapolated).
    pub fn sample(&self, alpha_deg: f64) -> AeroCoeffs {
        if self.data.is_empty() {
            return AeroCoeffs::zero();
        }

        // max/min rather than clamp: a reversed table must not panic
        let alpha = alpha_deg.max(self.min_alpha).min(self.max_alpha);

        if self.data.len() == 1 {
            let s = &self.data[0];
            return AeroCoeffs::new(s.cl, s.cd, s.cm);
        }

        for pair in self.data.windows(2) {
            let (lo, hi) = (&pair[0], &pair[1]);
            if alpha >= lo.alpha_deg && alpha <= hi.alpha_deg {
                let span = hi.alpha_deg - lo.alpha_deg;
                let t = if span.abs() > f64::EPSILON {
                    (alpha - lo.alpha_deg) / span
                } else {
                    0.0
                };
                // (1 - t)·lo + t·hi reproduces table rows bit-exactly at t = 0 and t = 1
                let lerp = |a: f64, b: f64| (1.0 - t) * a + t * b;
                return AeroCoeffs::new(lerp(lo.cl, hi.cl), lerp(lo.cd, hi.cd), lerp(lo.cm, hi.cm));
            }
        }

        AeroCoeffs::zero()
    }

    /// Local 2D lift-curve slope dCl/dα (per rad) around α = 0.
    ///
    /// Averages the finite differences of up to five neighbouring row pairs
    /// centred on the pair that brackets zero. Falls back to the thin-airfoil
    /// value 2π for short tables or a degenerate window.
    pub fn estimate_cl_alpha_2d(&self) -> f64 {
        const THIN_AIRFOIL: f64 = 2.0 * PI;

        if self.data.len() < 3 {
            return THIN_AIRFOIL;
        }

        let idx = self
            .data
            .windows(2)
            .position(|w| w[0].alpha_deg <= 0.0 && w[1].alpha_deg >= 0.0)
            .unwrap_or(0) as isize;

        let mut sum_dcl = 0.0;
        let mut sum_da = 0.0;
        let mut pairs = 0;
        for k in -2..=2 {
            let p1 = idx + k;
            let p2 = p1 + 1;
            if p1 < 0 || p2 as usize >= self.data.len() {
                continue;
            }
            let (a, b) = (&self.data[p1 as usize], &self.data[p2 as usize]);
            let da = (b.alpha_deg - a.alpha_deg).to_radians();
            if da.abs() > 1e-6 {
                sum_dcl += b.cl - a.cl;
                sum_da += da;
                pairs += 1;
            }
        }

        if pairs == 0 || sum_da.abs() < 1e-9 {
            return THIN_AIRFOIL;
        }
        sum_dcl / sum_da
    }
}

/// Fallback pitching-moment curve for polars that only tabulate Cl and Cd.
pub fn estimate_cm(alpha_deg: f64) -> f64 {
    if alpha_deg < 0.0 {
        -0.05
    } else if alpha_deg > 15.0 {
        -0.09
    } else {
        -0.05 - 0.04 * (alpha_deg / 15.0)
    }
}

// ---------------------------------------------------------------------------
// Tabulated polars
// ---------------------------------------------------------------------------

pub mod polars {
    use super::{estimate_cm, Airfoil, AirfoilSample};

    // (alpha_deg, Cl, Cd), 0.25 deg spacing
    const NACA_4412: [(f64, f64, f64); 107] = [
        (-9.500, -0.3426, 0.10705), (-9.250, -0.3784, 0.10671), (-9.000, -0.4173, 0.10641),
        (-8.750, -0.3682, 0.09949), (-8.500, -0.3611, 0.09726), (-8.250, -0.3724, 0.09561),
        (-8.000, -0.4032, 0.09481), (-7.750, -0.4436, 0.09403), (-7.500, -0.4819, 0.09082),
        (-7.250, -0.4471, 0.08830), (-7.000, -0.4480, 0.08640), (-6.750, -0.4588, 0.08412),
        (-6.500, -0.4847, 0.07929), (-6.250, -0.4783, 0.07718), (-6.000, -0.4744, 0.07516),
        (-5.750, -0.4612, 0.06965), (-5.500, -0.4309, 0.06730), (-5.250, -0.3801, 0.03672),
        (-5.000, -0.3390, 0.03524), (-4.750, -0.2986, 0.03253), (-4.500, -0.2547, 0.03033),
        (-4.250, -0.2155, 0.02874), (-4.000, -0.1732, 0.02773), (-3.750, -0.1342, 0.02656),
        (-3.500, -0.0916, 0.02579), (-3.250, -0.0546, 0.02511), (-3.000, -0.0135, 0.02457),
        (-2.750, 0.0233, 0.02414), (-2.500, 0.0621, 0.02363), (-2.250, 0.0998, 0.02306),
        (-2.000, 0.1378, 0.02248), (-1.750, 0.1759, 0.02179), (-1.500, 0.2137, 0.02102),
        (-1.250, 0.2473, 0.02001), (-1.000, 0.3011, 0.01877), (-0.750, 0.3304, 0.01877),
        (-0.500, 0.3765, 0.01838), (-0.250, 0.4028, 0.01841), (0.000, 0.4335, 0.01835),
        (0.250, 0.4720, 0.01803), (0.500, 0.4988, 0.01808), (0.750, 0.5348, 0.01782),
        (1.000, 0.5631, 0.01782), (1.250, 0.5902, 0.01789), (1.500, 0.6265, 0.01763),
        (1.750, 0.6506, 0.01784), (2.000, 0.6774, 0.01798), (2.250, 0.7110, 0.01786),
        (2.500, 0.7347, 0.01814), (2.750, 0.7611, 0.01836), (3.000, 0.7929, 0.01834),
        (3.250, 0.8161, 0.01870), (3.500, 0.8423, 0.01895), (3.750, 0.8728, 0.01902),
        (4.000, 0.8957, 0.01941), (4.250, 0.9217, 0.01970), (4.500, 0.9513, 0.01982),
        (4.750, 0.9739, 0.02025), (5.000, 0.9995, 0.02057), (5.250, 1.0286, 0.02074),
        (5.500, 1.0508, 0.02119), (5.750, 1.0755, 0.02148), (6.000, 1.1016, 0.02159),
        (6.250, 1.1279, 0.02168), (6.500, 1.1534, 0.02184), (6.750, 1.1757, 0.02207),
        (7.000, 1.1987, 0.02216), (7.250, 1.2212, 0.02223), (7.500, 1.2409, 0.02240),
        (7.750, 1.2594, 0.02262), (8.000, 1.2769, 0.02285), (8.250, 1.2933, 0.02308),
        (8.500, 1.3086, 0.02333), (8.750, 1.3197, 0.02372), (9.000, 1.3281, 0.02421),
        (9.250, 1.3316, 0.02495), (9.500, 1.3276, 0.02605), (9.750, 1.3204, 0.02765),
        (10.000, 1.3127, 0.02965), (10.250, 1.3077, 0.03176), (10.500, 1.3074, 0.03378),
        (10.750, 1.3110, 0.03571), (11.000, 1.3189, 0.03755), (11.250, 1.3289, 0.03922),
        (11.500, 1.3439, 0.04092), (11.750, 1.3595, 0.04250), (12.000, 1.3787, 0.04430),
        (12.250, 1.3912, 0.04604), (12.500, 1.4202, 0.04801), (12.750, 1.4239, 0.05002),
        (13.000, 1.4319, 0.05205), (13.250, 1.4604, 0.05447), (13.500, 1.4540, 0.05696),
        (13.750, 1.4507, 0.05963), (14.000, 1.4512, 0.06218), (14.250, 1.4783, 0.06519),
        (14.500, 1.4597, 0.06850), (14.750, 1.4404, 0.07234), (15.000, 1.4201, 0.07667),
        (15.250, 1.3983, 0.08150), (15.500, 1.3742, 0.08690), (15.750, 1.3474, 0.09302),
        (16.000, 1.3171, 0.10006), (16.250, 1.2836, 0.10833), (16.500, 1.2473, 0.11795),
        (16.750, 1.2101, 0.12886), (17.000, 1.1753, 0.14068),
    ];

    /// NACA 4412 section polar, Cm filled from [`estimate_cm`].
    pub fn naca_4412() -> Airfoil {
        Airfoil::new(
            NACA_4412
                .iter()
                .map(|&(alpha, cl, cd)| AirfoilSample::new(alpha, cl, cd, estimate_cm(alpha)))
                .collect(),
        )
    }

    /// Polar with every coefficient zero over [-90, 90] deg.
    pub fn inert() -> Airfoil {
        Airfoil::new(vec![
            AirfoilSample::new(-90.0, 0.0, 0.0, 0.0),
            AirfoilSample::new(90.0, 0.0, 0.0, 0.0),
        ])
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn small_table() -> Airfoil {
        Airfoil::new(vec![
            AirfoilSample::new(-4.0, -0.2, 0.03, -0.05),
            AirfoilSample::new(0.0, 0.2, 0.02, -0.05),
            AirfoilSample::new(4.0, 0.6, 0.025, -0.06),
            AirfoilSample::new(8.0, 1.0, 0.04, -0.07),
        ])
    }

    #[test]
    fn exact_at_table_rows() {
        for foil in [small_table(), polars::naca_4412()] {
            for s in foil.samples() {
                let c = foil.sample(s.alpha_deg);
                assert_eq!((c.cl, c.cd, c.cm), (s.cl, s.cd, s.cm), "row at {}", s.alpha_deg);
            }
        }
    }

    #[test]
    fn interpolates_between_rows() {
        let c = small_table().sample(2.0);
        assert_relative_eq!(c.cl, 0.4, epsilon = 1e-12);
        assert_relative_eq!(c.cd, 0.0225, epsilon = 1e-12);
        assert_relative_eq!(c.cm, -0.055, epsilon = 1e-12);
    }

    #[test]
    fn clamps_outside_range() {
        let foil = small_table();
        assert_eq!(foil.sample(-40.0), foil.sample(foil.min_alpha()));
        assert_eq!(foil.sample(90.0), foil.sample(foil.max_alpha()));
    }

    #[test]
    fn empty_table_gives_zero() {
        let foil = Airfoil::new(vec![]);
        assert!(foil.is_empty());
        assert_eq!(foil.sample(5.0), AeroCoeffs::zero());
        assert_relative_eq!(foil.estimate_cl_alpha_2d(), 2.0 * PI);
    }

    #[test]
    fn roll_and_yaw_unmodeled() {
        let c = polars::naca_4412().sample(6.3);
        assert_eq!(c.cl_roll, 0.0);
        assert_eq!(c.cn_yaw, 0.0);
    }

    #[test]
    fn cl_alpha_of_linear_table() {
        // Cl = 0.1 per deg → 5.7296 per rad
        let c = small_table().estimate_cl_alpha_2d();
        assert_relative_eq!(c, 0.1_f64.to_degrees(), epsilon = 1e-9);
    }

    #[test]
    fn cl_alpha_of_naca_4412_is_physical() {
        let a = polars::naca_4412().estimate_cl_alpha_2d();
        assert!(a > 4.0 && a < 9.0, "slope {} per rad", a);
    }

    #[test]
    fn cl_alpha_fallback_for_short_table() {
        let foil = Airfoil::new(vec![
            AirfoilSample::new(0.0, 0.0, 0.01, 0.0),
            AirfoilSample::new(5.0, 0.5, 0.01, 0.0),
        ]);
        assert_relative_eq!(foil.estimate_cl_alpha_2d(), 2.0 * PI);
    }

    #[test]
    fn cl_alpha_fallback_for_zero_width_window() {
        let foil = Airfoil::new(vec![
            AirfoilSample::new(0.0, 0.0, 0.01, 0.0),
            AirfoilSample::new(0.0, 0.1, 0.01, 0.0),
            AirfoilSample::new(0.0, 0.2, 0.01, 0.0),
            AirfoilSample::new(0.0, 0.3, 0.01, 0.0),
        ]);
        assert_eq!(foil.estimate_cl_alpha_2d(), 2.0 * PI);
    }

    #[test]
    fn cm_fallback_curve() {
        assert_eq!(estimate_cm(-3.0), -0.05);
        assert_eq!(estimate_cm(20.0), -0.09);
        assert_relative_eq!(estimate_cm(7.5), -0.07, epsilon = 1e-12);
    }
}
