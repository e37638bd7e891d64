//! 2D SPH Fluid Simulation Kernel
//!
//! This crate provides the core physics for a 2D Smoothed Particle
//! Hydrodynamics dam-break simulation: particle state, parameters, smoothing
//! kernels, force evaluation, and time integration. It is deliberately
//! strategy-agnostic: every operator computes a contiguous block of particle
//! indices while reading the whole state, so a thread-pool decomposition and
//! a replicated-rank decomposition drive exactly the same code and produce
//! exactly the same trajectories.
//!
//! # Modules
//! - [`particle`] -- Struct-of-arrays particle storage.
//! - [`params`] -- Physical and numerical parameters with JSON loading.
//! - [`smoothing`] -- Poly6, spiky gradient, and viscosity Laplacian factors.
//! - [`eos`] -- Linear equation of state (signed, suction included).
//! - [`forces`] -- Density summation and force accumulation over blocks.
//! - [`integrate`] -- Semi-implicit Euler update with damped wall reflection.

#![warn(missing_docs)]

pub mod eos;
pub mod forces;
pub mod integrate;
pub mod params;
pub mod particle;
pub mod smoothing;

pub use params::SimParams;
pub use particle::ParticleArrays;
pub use smoothing::SmoothingKernel;
