//! Orchestration Layer
//!
//! This crate drives the 2D SPH kernel with two interchangeable domain
//! decomposition strategies that produce identical trajectories:
//! - [`shared`] -- a fixed thread pool advancing contiguous index blocks
//!   with fork-join phase barriers.
//! - [`replicated`] -- one thread per rank, each holding a full state
//!   replica, synchronized by allgather collectives.
//!
//! Supporting modules: [`domain`] for initial placement, [`partition`] for
//! index-range math, [`comm`] for the rank communicator, and
//! [`diagnostics`] for scalar reductions.

#![warn(missing_docs)]

pub mod comm;
pub mod diagnostics;
pub mod domain;
pub mod partition;
pub mod replicated;
pub mod shared;

pub use replicated::run_replicated;
pub use shared::run_shared;

/// Summary of a completed run.
#[derive(Debug, Clone, Copy)]
pub struct RunReport {
    /// Number of timesteps executed.
    pub steps: u64,
    /// Simulated time covered, `steps * dt`.
    pub sim_time: f64,
}
