extern crate ndarray;

use ndarray::*;
use thiserror::Error;

///Fault reported by the message-passing layer. Wrapped into
///[`crate::error::SketchError::Transport`] before crossing the engine
///boundary.
#[derive(Debug, Error)]
pub enum CommError {
    #[error("rank {rank} out of range for communicator of size {size}")]
    InvalidRank { rank : usize, size : usize },

    #[error("collective {op} failed at rank {rank}: {reason}")]
    Collective {
        op : &'static str,
        rank : usize,
        reason : String
    }
}

///The message-passing collaborator: a process group with the collectives
///the redistribution fallback needs. The production implementation lives
///outside this crate; [`SelfCommunicator`] covers the single-process and
///fully-replicated degenerate layouts.
pub trait Communicator : Send + Sync {
    fn rank(&self) -> usize;
    fn size(&self) -> usize;

    fn broadcast(&self, buf : &mut [f32], root : usize) -> Result<(), CommError>;

    ///Reassembles the row-partitioned operand so every participant holds
    ///all `global_rows` rows. Collective; blocks until all contribute.
    fn all_gather_rows(&self, local : &Array2<f32>,
                       global_rows : usize) -> Result<Array2<f32>, CommError>;

    ///Reassembles the column-partitioned operand so every participant
    ///holds all `global_cols` columns. Collective; blocks until all
    ///contribute.
    fn all_gather_cols(&self, local : &Array2<f32>,
                       global_cols : usize) -> Result<Array2<f32>, CommError>;
}

///Degenerate single-process communicator: every collective is a local copy.
pub struct SelfCommunicator;

impl Communicator for SelfCommunicator {
    fn rank(&self) -> usize {
        0
    }

    fn size(&self) -> usize {
        1
    }

    fn broadcast(&self, _buf : &mut [f32], root : usize) -> Result<(), CommError> {
        if (root != 0) {
            return Err(CommError::InvalidRank {
                rank : root,
                size : 1
            });
        }
        Ok(())
    }

    fn all_gather_rows(&self, local : &Array2<f32>,
                       global_rows : usize) -> Result<Array2<f32>, CommError> {
        if (local.nrows() != global_rows) {
            return Err(CommError::Collective {
                op : "all_gather_rows",
                rank : 0,
                reason : format!("local rows {} disagree with global rows {}",
                                 local.nrows(), global_rows)
            });
        }
        Ok(local.clone())
    }

    fn all_gather_cols(&self, local : &Array2<f32>,
                       global_cols : usize) -> Result<Array2<f32>, CommError> {
        if (local.ncols() != global_cols) {
            return Err(CommError::Collective {
                op : "all_gather_cols",
                rank : 0,
                reason : format!("local cols {} disagree with global cols {}",
                                 local.ncols(), global_cols)
            });
        }
        Ok(local.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::*;

    #[test]
    fn self_communicator_gathers_identity() {
        let comm = SelfCommunicator;
        let local = random_matrix(4, 3);
        let rows = comm.all_gather_rows(&local, 4).unwrap();
        let cols = comm.all_gather_cols(&local, 3).unwrap();
        assert_eq!(rows, local);
        assert_eq!(cols, local);
    }

    #[test]
    fn mismatched_extents_are_collective_failures() {
        let comm = SelfCommunicator;
        let local = random_matrix(4, 3);
        let result = comm.all_gather_rows(&local, 8);
        assert!(matches!(result, Err(CommError::Collective { .. })));
    }

    #[test]
    fn broadcast_from_foreign_root_is_invalid() {
        let comm = SelfCommunicator;
        let mut buf = vec![0.0f32; 4];
        let result = comm.broadcast(&mut buf, 2);
        assert!(matches!(result, Err(CommError::InvalidRank { .. })));
    }
}
