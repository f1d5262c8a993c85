use std::io::{self, Write};

use crate::sim::Snapshot;

/// Write trajectory data to CSV format.
///
/// Columns: time, pos_x, pos_y, pos_z, vel_x, vel_y, vel_z,
///          quat_w, quat_x, quat_y, quat_z, p, q, r,
///          alpha_deg, beta_deg, cl, cd, cm,
///          lift_n, drag_n, thrust_n, moment_y
pub fn write_trajectory<W: Write>(writer: &mut W, trajectory: &[Snapshot]) -> io::Result<()> {
    writeln!(
        writer,
        "time,pos_x,pos_y,pos_z,vel_x,vel_y,vel_z,\
         quat_w,quat_x,quat_y,quat_z,p,q,r,\
         alpha_deg,beta_deg,cl,cd,cm,\
         lift_n,drag_n,thrust_n,moment_y"
    )?;

    for s in trajectory {
        let q = s.orientation.quaternion();
        let air = &s.air_data;
        writeln!(
            writer,
            "{:.4},{:.4},{:.4},{:.4},{:.4},{:.4},{:.4},\
             {:.6},{:.6},{:.6},{:.6},{:.6},{:.6},{:.6},\
             {:.2},{:.2},{:.4},{:.4},{:.4},\
             {:.4},{:.4},{:.4},{:.4}",
            s.time,
            s.position.x, s.position.y, s.position.z,
            s.velocity.x, s.velocity.y, s.velocity.z,
            q.w, q.i, q.j, q.k,
            s.angular_velocity.x, s.angular_velocity.y, s.angular_velocity.z,
            air.alpha_deg, air.beta_deg, air.coeffs.cl, air.coeffs.cd, air.coeffs.cm,
            s.lift.norm(), s.drag.norm(), s.thrust.norm(), s.body_moment.y,
        )?;
    }

    Ok(())
}

/// Write trajectory to a CSV file at the given path.
pub fn write_trajectory_file(path: &str, trajectory: &[Snapshot]) -> io::Result<()> {
    let mut file = std::fs::File::create(path)?;
    write_trajectory(&mut file, trajectory)
}
