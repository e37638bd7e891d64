//! Simulation parameters: physics constants, domain geometry, validation.

use serde::{Deserialize, Serialize};
use std::fs;

/// Physical and numerical parameters for a simulation run.
///
/// Every field has a default tuned for the dam-break scenario, so a partial
/// JSON file only needs to name the values it overrides. All quantities are
/// in the same arbitrary unit system as the domain extents.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SimParams {
    /// Gravitational acceleration `[gx, gy]`, applied directly to every
    /// particle each step.
    #[serde(default = "default_gravity")]
    pub gravity: [f64; 2],
    /// Rest density `rho0` of the fluid.
    #[serde(default = "default_rest_density")]
    pub rest_density: f64,
    /// Gas constant `k` of the equation of state.
    #[serde(default = "default_stiffness")]
    pub stiffness: f64,
    /// Smoothing radius `h`; pairs separated by `h` or more do not interact.
    #[serde(default = "default_smoothing_radius")]
    pub smoothing_radius: f64,
    /// Mass of each particle (uniform across the fluid).
    #[serde(default = "default_particle_mass")]
    pub particle_mass: f64,
    /// Dynamic viscosity `mu`.
    #[serde(default = "default_viscosity")]
    pub viscosity: f64,
    /// Fixed integration timestep.
    #[serde(default = "default_dt")]
    pub dt: f64,
    /// Multiplier applied to the offending velocity component on wall
    /// contact. Negative values flip the component; magnitudes below one
    /// dissipate energy.
    #[serde(default = "default_wall_damping")]
    pub wall_damping: f64,
    /// Domain extent along x.
    #[serde(default = "default_domain_width")]
    pub domain_width: f64,
    /// Domain extent along y.
    #[serde(default = "default_domain_height")]
    pub domain_height: f64,
    /// Seed for the spawn jitter stream, so initial states are reproducible.
    #[serde(default = "default_spawn_jitter_seed")]
    pub spawn_jitter_seed: u64,
}

fn default_gravity() -> [f64; 2] {
    [0.0, -9.8]
}

fn default_rest_density() -> f64 {
    300.0
}

fn default_stiffness() -> f64 {
    2000.0
}

fn default_smoothing_radius() -> f64 {
    16.0
}

fn default_particle_mass() -> f64 {
    2.5
}

fn default_viscosity() -> f64 {
    200.0
}

fn default_dt() -> f64 {
    0.0007
}

fn default_wall_damping() -> f64 {
    -0.5
}

fn default_domain_width() -> f64 {
    1536.0
}

fn default_domain_height() -> f64 {
    1152.0
}

fn default_spawn_jitter_seed() -> u64 {
    1234
}

impl Default for SimParams {
    fn default() -> Self {
        Self {
            gravity: default_gravity(),
            rest_density: default_rest_density(),
            stiffness: default_stiffness(),
            smoothing_radius: default_smoothing_radius(),
            particle_mass: default_particle_mass(),
            viscosity: default_viscosity(),
            dt: default_dt(),
            wall_damping: default_wall_damping(),
            domain_width: default_domain_width(),
            domain_height: default_domain_height(),
            spawn_jitter_seed: default_spawn_jitter_seed(),
        }
    }
}

impl SimParams {
    /// Load parameters from a JSON file, filling missing fields with the
    /// defaults, and validate the result.
    pub fn load(path: &str) -> Result<Self, String> {
        let contents = fs::read_to_string(path)
            .map_err(|e| format!("Failed to read parameter file {}: {}", path, e))?;
        let params: SimParams = serde_json::from_str(&contents)
            .map_err(|e| format!("Failed to parse parameter file {}: {}", path, e))?;
        params.validate()?;
        Ok(params)
    }

    /// Check that the parameters describe a runnable simulation.
    pub fn validate(&self) -> Result<(), String> {
        let finite = self.gravity[0].is_finite()
            && self.gravity[1].is_finite()
            && self.rest_density.is_finite()
            && self.stiffness.is_finite()
            && self.smoothing_radius.is_finite()
            && self.particle_mass.is_finite()
            && self.viscosity.is_finite()
            && self.dt.is_finite()
            && self.wall_damping.is_finite()
            && self.domain_width.is_finite()
            && self.domain_height.is_finite();
        if !finite {
            return Err("All parameters must be finite".to_string());
        }
        if self.smoothing_radius <= 0.0 {
            return Err("Smoothing radius must be positive".to_string());
        }
        if self.particle_mass <= 0.0 {
            return Err("Particle mass must be positive".to_string());
        }
        if self.rest_density <= 0.0 {
            return Err("Rest density must be positive".to_string());
        }
        if self.stiffness < 0.0 {
            return Err("Stiffness must be non-negative".to_string());
        }
        if self.viscosity < 0.0 {
            return Err("Viscosity must be non-negative".to_string());
        }
        if self.dt <= 0.0 {
            return Err("Timestep must be positive".to_string());
        }
        if self.wall_damping < -1.0 || self.wall_damping > 0.0 {
            return Err("Wall damping must lie in [-1, 0]".to_string());
        }
        if self.domain_width <= 2.0 * self.smoothing_radius {
            return Err("Domain width must exceed twice the smoothing radius".to_string());
        }
        if self.domain_height <= 2.0 * self.smoothing_radius {
            return Err("Domain height must exceed twice the smoothing radius".to_string());
        }
        Ok(())
    }

    /// Distance kept between particle centers and the domain walls.
    pub fn wall_margin(&self) -> f64 {
        self.smoothing_radius
    }
}
