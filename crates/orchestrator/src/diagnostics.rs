//! Scalar reductions over the particle state for logging and reporting.

use glam::DVec2;

/// Mean particle speed.
///
/// Computed every step by the run loops, whether or not the value gets
/// logged, so the per-step workload stays constant for timing runs.
pub fn average_speed(vel: &[DVec2]) -> f64 {
    if vel.is_empty() {
        return 0.0;
    }
    vel.iter().map(|v| v.length()).sum::<f64>() / vel.len() as f64
}

/// Mean density, reported at the end of a run as a quick sanity figure:
/// values far from the rest density (or NaN) flag a broken run.
pub fn average_density(density: &[f64]) -> f64 {
    if density.is_empty() {
        return 0.0;
    }
    density.iter().sum::<f64>() / density.len() as f64
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn average_speed_of_known_velocities() {
        let vel = vec![DVec2::new(3.0, 4.0), DVec2::new(0.0, 0.0)];
        assert_eq!(average_speed(&vel), 2.5);
    }

    #[test]
    fn average_density_of_known_values() {
        let density = vec![1.0, 2.0, 3.0];
        assert_eq!(average_density(&density), 2.0);
    }

    #[test]
    fn empty_state_reduces_to_zero() {
        assert_eq!(average_speed(&[]), 0.0);
        assert_eq!(average_density(&[]), 0.0);
    }
}
