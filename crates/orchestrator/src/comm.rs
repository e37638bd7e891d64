//! Thread-backed rank communicator for the replicated-state strategy.
//!
//! Mirrors the collective style of a message-passing runtime: every rank
//! holds one receiver per concern plus a sender handle to every peer, itself
//! included. The only collective is an allgather of owned blocks, which
//! doubles as the lock-step barrier: a rank cannot leave the call before one
//! block from every rank of the group has arrived for the current step.
//!
//! There are no timeouts. If a peer stops participating mid-collective the
//! remaining ranks block, which is the intended failure mode for an
//! unsupervised lock-step job.

use std::ops::Range;
use std::sync::mpsc::{self, Receiver, Sender};

use glam::DVec2;

/// Density/pressure block broadcast after the density phase.
pub struct ScalarBlock {
    /// Sending rank.
    pub from: usize,
    /// Step the block belongs to.
    pub step: u64,
    /// Densities of the sender's owned range.
    pub density: Vec<f64>,
    /// Pressures of the sender's owned range.
    pub pressure: Vec<f64>,
}

/// Position/velocity block broadcast after integration.
pub struct MotionBlock {
    /// Sending rank.
    pub from: usize,
    /// Step the block belongs to.
    pub step: u64,
    /// Positions of the sender's owned range.
    pub pos: Vec<DVec2>,
    /// Velocities of the sender's owned range.
    pub vel: Vec<DVec2>,
}

struct ScalarChannel {
    rx: Receiver<ScalarBlock>,
    tx: Vec<Sender<ScalarBlock>>,
}

struct MotionChannel {
    rx: Receiver<MotionBlock>,
    tx: Vec<Sender<MotionBlock>>,
}

/// Per-rank communicator handle.
pub struct RankComm {
    /// Index of this rank in the group.
    pub rank: usize,
    /// Number of ranks in the group.
    pub size: usize,
    scalars: ScalarChannel,
    motion: MotionChannel,
}

impl RankComm {
    /// Build a fully connected group of `size` communicator handles.
    pub fn group(size: usize) -> Vec<RankComm> {
        let (scalar_senders, scalar_receivers): (Vec<_>, Vec<_>) =
            (0..size).map(|_| mpsc::channel()).unzip();
        let (motion_senders, motion_receivers): (Vec<_>, Vec<_>) =
            (0..size).map(|_| mpsc::channel()).unzip();

        scalar_receivers
            .into_iter()
            .zip(motion_receivers)
            .enumerate()
            .map(|(rank, (scalar_rx, motion_rx))| RankComm {
                rank,
                size,
                scalars: ScalarChannel {
                    rx: scalar_rx,
                    tx: scalar_senders.clone(),
                },
                motion: MotionChannel {
                    rx: motion_rx,
                    tx: motion_senders.clone(),
                },
            })
            .collect()
    }

    /// Broadcast this rank's density/pressure block and install one block
    /// from every rank of the group into the replica slices.
    ///
    /// `ranges` is the global partition; this rank owns `ranges[self.rank]`.
    /// Blocks install in arrival order, which is safe because the ranges are
    /// disjoint. Errs on a closed channel or a block whose tag does not
    /// match the current step and partition.
    pub fn allgather_scalars(
        &self,
        step: u64,
        ranges: &[Range<usize>],
        density: &mut [f64],
        pressure: &mut [f64],
    ) -> Result<(), String> {
        let own = ranges[self.rank].clone();
        for tx in &self.scalars.tx {
            let block = ScalarBlock {
                from: self.rank,
                step,
                density: density[own.clone()].to_vec(),
                pressure: pressure[own.clone()].to_vec(),
            };
            tx.send(block)
                .map_err(|_| format!("rank {}: peer gone during density exchange", self.rank))?;
        }

        for _ in 0..self.size {
            let block = self
                .scalars
                .rx
                .recv()
                .map_err(|_| format!("rank {}: density exchange channel closed", self.rank))?;
            let src = match ranges.get(block.from) {
                Some(r) => r.clone(),
                None => {
                    return Err(format!(
                        "rank {}: scalar block from unknown rank {}",
                        self.rank, block.from
                    ))
                }
            };
            if block.step != step {
                return Err(format!(
                    "rank {}: scalar block from rank {} tagged step {}, expected {}",
                    self.rank, block.from, block.step, step
                ));
            }
            if block.density.len() != src.len() || block.pressure.len() != src.len() {
                return Err(format!(
                    "rank {}: scalar block from rank {} has wrong length",
                    self.rank, block.from
                ));
            }
            density[src.clone()].copy_from_slice(&block.density);
            pressure[src].copy_from_slice(&block.pressure);
        }
        Ok(())
    }

    /// Broadcast this rank's position/velocity block and install one block
    /// from every rank of the group into the replica slices.
    ///
    /// Same contract as [`RankComm::allgather_scalars`].
    pub fn allgather_motion(
        &self,
        step: u64,
        ranges: &[Range<usize>],
        pos: &mut [DVec2],
        vel: &mut [DVec2],
    ) -> Result<(), String> {
        let own = ranges[self.rank].clone();
        for tx in &self.motion.tx {
            let block = MotionBlock {
                from: self.rank,
                step,
                pos: pos[own.clone()].to_vec(),
                vel: vel[own.clone()].to_vec(),
            };
            tx.send(block)
                .map_err(|_| format!("rank {}: peer gone during motion exchange", self.rank))?;
        }

        for _ in 0..self.size {
            let block = self
                .motion
                .rx
                .recv()
                .map_err(|_| format!("rank {}: motion exchange channel closed", self.rank))?;
            let src = match ranges.get(block.from) {
                Some(r) => r.clone(),
                None => {
                    return Err(format!(
                        "rank {}: motion block from unknown rank {}",
                        self.rank, block.from
                    ))
                }
            };
            if block.step != step {
                return Err(format!(
                    "rank {}: motion block from rank {} tagged step {}, expected {}",
                    self.rank, block.from, block.step, step
                ));
            }
            if block.pos.len() != src.len() || block.vel.len() != src.len() {
                return Err(format!(
                    "rank {}: motion block from rank {} has wrong length",
                    self.rank, block.from
                ));
            }
            pos[src.clone()].copy_from_slice(&block.pos);
            vel[src].copy_from_slice(&block.vel);
        }
        Ok(())
    }
}
