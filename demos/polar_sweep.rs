use flight_sim::physics::aerodynamics::{compute_aero_coeffs_paper, lift_curve_slope_finite};
use flight_sim::physics::polars;

/// Compare the NACA 4412 section table with the finite-wing model at a
/// few aspect ratios.
fn main() {
    let airfoil = polars::naca_4412();
    let cd0 = 0.02;
    let ratios = [4.0, 8.0, 16.0];

    let a0 = airfoil.estimate_cl_alpha_2d();
    println!("NACA 4412 section slope: {:.3} /rad ({:.4} /deg)", a0, a0.to_radians());
    for ar in ratios {
        println!("  AR {:>4.1}: finite-wing slope {:.3} /rad", ar, lift_curve_slope_finite(a0, ar));
    }
    println!();

    print!("  {:>6}  {:>7}  {:>7}", "alpha", "CL 2D", "CD 2D");
    for ar in ratios {
        print!("  {:>8}  {:>8}", format!("CL AR{ar}"), format!("CD AR{ar}"));
    }
    println!();
    println!("  {}", "─".repeat(24 + 20 * ratios.len()));

    let mut alpha = -20.0;
    while alpha <= 40.0 {
        let section = airfoil.sample(alpha);
        print!("  {:>6.1}  {:>7.3}  {:>7.4}", alpha, section.cl, section.cd);
        for ar in ratios {
            let wing = compute_aero_coeffs_paper(alpha, ar, cd0);
            print!("  {:>8.3}  {:>8.4}", wing.cl, wing.cd);
        }
        println!();
        alpha += 2.5;
    }
}
