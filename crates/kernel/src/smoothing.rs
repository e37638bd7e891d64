//! Smoothing kernels for the 2D SPH operators.
//!
//! The classic trio from interactive fluid simulation: poly6 for density,
//! the spiky gradient for pressure, and the viscosity Laplacian, all with
//! compact support of radius `h` and 2D normalization. The normalization
//! factors depend only on `h`, so they are computed once per run and reused
//! inside the O(N^2) pair loops.

use std::f64::consts::PI;

/// Pairs closer than this have no well-defined separation direction and are
/// skipped by the force kernels.
pub const MIN_PAIR_DISTANCE: f64 = 1.0e-12;

/// Precomputed kernel normalization factors for a fixed smoothing radius.
#[derive(Debug, Clone, Copy)]
pub struct SmoothingKernel {
    h: f64,
    h_sq: f64,
    poly6_norm: f64,
    spiky_grad_norm: f64,
    visc_lap_norm: f64,
}

impl SmoothingKernel {
    /// Build the factor set for smoothing radius `h`.
    ///
    /// # Arguments
    /// * `h` - Smoothing radius (must be positive)
    pub fn new(h: f64) -> Self {
        Self {
            h,
            h_sq: h * h,
            poly6_norm: 4.0 / (PI * h.powi(8)),
            spiky_grad_norm: -10.0 / (PI * h.powi(5)),
            visc_lap_norm: 40.0 / (PI * h.powi(5)),
        }
    }

    /// Smoothing radius `h`.
    pub fn h(&self) -> f64 {
        self.h
    }

    /// Squared smoothing radius, for support tests on squared distances.
    pub fn h_sq(&self) -> f64 {
        self.h_sq
    }

    /// Poly6 density kernel, evaluated on a squared distance.
    ///
    /// ```text
    /// W(r, h) = (4 / (pi h^8)) (h^2 - r^2)^3    for r < h
    /// W(r, h) = 0                               for r >= h
    /// ```
    ///
    /// Taking `r^2` instead of `r` keeps the density pass free of square
    /// roots.
    ///
    /// # Arguments
    /// * `r_sq` - Squared distance between the two particles
    ///
    /// # Returns
    /// Kernel weight, zero at and beyond the support radius.
    pub fn poly6(&self, r_sq: f64) -> f64 {
        if r_sq >= self.h_sq {
            return 0.0;
        }
        let d = self.h_sq - r_sq;
        self.poly6_norm * d * d * d
    }

    /// Radial factor of the spiky pressure kernel gradient.
    ///
    /// ```text
    /// g(r, h) = (-10 / (pi h^5)) (h - r)^3    for r < h
    /// g(r, h) = 0                             for r >= h
    /// ```
    ///
    /// The factor is negative inside the support: multiplied by the unit
    /// separation vector and a positive pressure term it pushes compressed
    /// particles apart, and with a negative pressure term it pulls
    /// under-dense particles together.
    pub fn spiky_gradient(&self, r: f64) -> f64 {
        if r >= self.h {
            return 0.0;
        }
        let d = self.h - r;
        self.spiky_grad_norm * d * d * d
    }

    /// Laplacian of the viscosity kernel.
    ///
    /// ```text
    /// L(r, h) = (40 / (pi h^5)) (h - r)    for r < h
    /// L(r, h) = 0                          for r >= h
    /// ```
    pub fn viscosity_laplacian(&self, r: f64) -> f64 {
        if r >= self.h {
            return 0.0;
        }
        self.visc_lap_norm * (self.h - r)
    }
}
