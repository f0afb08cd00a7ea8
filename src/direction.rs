use serde::{Serialize, Deserialize};

///Which axis of the operand matrix a sketching transform acts along.
///`Columnwise` transforms every column (rows = feature dimension),
///`Rowwise` transforms every row.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Serialize, Deserialize)]
pub enum Direction {
    Columnwise,
    Rowwise
}
