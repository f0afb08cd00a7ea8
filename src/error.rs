use thiserror::Error;

use crate::communicator::CommError;
use crate::dist_matrix::MatrixLayout;

///Error surface of the sketching engines and their layout dispatcher.
///Only two kinds cross the distributed boundary
///([`SketchError::UnsupportedDistribution`] and [`SketchError::Transport`]);
///the remaining variants report precondition violations at the point of
///detection.
#[derive(Debug, Error)]
pub enum SketchError {
    #[error("unsupported matrix distribution {0:?}")]
    UnsupportedDistribution(MatrixLayout),

    #[error("transport failure during {op}")]
    Transport {
        op : &'static str,
        #[source]
        source : CommError
    },

    #[error("dimension mismatch for {what} (expected {expected}, got {actual})")]
    DimensionMismatch {
        what : &'static str,
        expected : usize,
        actual : usize
    },

    #[error("transform pipeline is not invertible")]
    NotInvertible
}
