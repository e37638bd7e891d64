//! Semi-implicit Euler integration with damped wall reflection.

use glam::DVec2;

use crate::params::SimParams;

/// Advance one timestep for the block of particles covered by the slices.
///
/// Velocity is updated from the acceleration first, then the position from
/// the new velocity. Afterwards each particle is kept one wall margin away
/// from the domain edges: a crossing clamps the position onto the margin and
/// scales the offending velocity component by the wall damping factor.
///
/// All three slices must cover the same block. Purely per-particle, so
/// disjoint blocks can be advanced concurrently.
pub fn advance(pos: &mut [DVec2], vel: &mut [DVec2], acc: &[DVec2], params: &SimParams) {
    let dt = params.dt;
    let margin = params.wall_margin();
    let x_max = params.domain_width - margin;
    let y_max = params.domain_height - margin;

    for ((p, v), &a) in pos.iter_mut().zip(vel.iter_mut()).zip(acc) {
        *v += a * dt;
        *p += *v * dt;

        if p.x < margin {
            v.x *= params.wall_damping;
            p.x = margin;
        }
        if p.x > x_max {
            v.x *= params.wall_damping;
            p.x = x_max;
        }
        if p.y < margin {
            v.y *= params.wall_damping;
            p.y = margin;
        }
        if p.y > y_max {
            v.y *= params.wall_damping;
            p.y = y_max;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn velocity_updates_before_position() {
        let params = SimParams::default();
        let mut pos = vec![DVec2::new(700.0, 500.0)];
        let mut vel = vec![DVec2::new(10.0, 0.0)];
        let acc = vec![DVec2::new(0.0, -9.8)];

        advance(&mut pos, &mut vel, &acc, &params);

        let dt = params.dt;
        assert_eq!(vel[0], DVec2::new(10.0, -9.8 * dt));
        assert_eq!(pos[0], DVec2::new(700.0 + 10.0 * dt, 500.0 + (-9.8 * dt) * dt));
    }

    #[test]
    fn left_wall_reflects_and_damps() {
        let params = SimParams::default();
        let margin = params.wall_margin();
        let mut pos = vec![DVec2::new(margin + 0.001, 500.0)];
        let mut vel = vec![DVec2::new(-100.0, 0.0)];
        let acc = vec![DVec2::ZERO];

        advance(&mut pos, &mut vel, &acc, &params);

        assert_eq!(pos[0].x, margin, "crossing particle should be clamped to the margin");
        assert_eq!(
            vel[0].x,
            -100.0 * params.wall_damping,
            "offending component should be scaled by the damping factor"
        );
        assert!(vel[0].x > 0.0, "negative damping factor must flip the direction");
        assert_eq!(vel[0].y, 0.0, "tangential component must be untouched");
    }

    #[test]
    fn corner_contact_reflects_both_axes() {
        let params = SimParams::default();
        let margin = params.wall_margin();
        let x_max = params.domain_width - margin;
        let mut pos = vec![DVec2::new(x_max - 0.001, margin + 0.001)];
        let mut vel = vec![DVec2::new(50.0, -50.0)];
        let acc = vec![DVec2::ZERO];

        advance(&mut pos, &mut vel, &acc, &params);

        assert_eq!(pos[0], DVec2::new(x_max, margin));
        assert!(vel[0].x < 0.0 && vel[0].y > 0.0, "both components should flip, got {:?}", vel[0]);
    }

    #[test]
    fn interior_particle_sees_no_walls() {
        let params = SimParams::default();
        let mut pos = vec![DVec2::new(700.0, 500.0)];
        let mut vel = vec![DVec2::new(3.0, 4.0)];
        let acc = vec![DVec2::ZERO];

        advance(&mut pos, &mut vel, &acc, &params);

        assert_eq!(vel[0], DVec2::new(3.0, 4.0));
    }
}
