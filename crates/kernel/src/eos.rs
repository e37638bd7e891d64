//! Equation of state relating density to pressure.

/// Linear gas-constant equation of state.
///
/// ```text
/// p = k * (rho - rho0)
/// ```
///
/// # Arguments
/// * `density` - Current density rho.
/// * `rest_density` - Reference rest density rho0.
/// * `stiffness` - Gas constant k.
///
/// # Returns
/// Signed pressure. A particle below rest density reports negative pressure,
/// which the force pass turns into suction toward under-dense neighbors; the
/// value is deliberately never clamped at zero.
pub fn linear_eos(density: f64, rest_density: f64, stiffness: f64) -> f64 {
    stiffness * (density - rest_density)
}
