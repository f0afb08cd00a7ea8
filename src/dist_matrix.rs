extern crate ndarray;

use ndarray::*;
use serde::{Serialize, Deserialize};

///How a matrix's rows and columns are partitioned across the process
///group. A closed set: the dispatcher reports
///[`crate::error::SketchError::UnsupportedDistribution`] for any pairing
///it cannot realize rather than guessing.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Serialize, Deserialize)]
pub enum MatrixLayout {
    ///All data held by the calling process; no process group involved
    Local,
    ///Every process holds the full matrix redundantly
    Replicated,
    ///A single root process owns all data; others hold none
    RootOnly,
    ///Rows split across processes, every row complete on its owner
    RowPartitioned,
    ///Columns split across processes, every column complete on its owner
    ColPartitioned,
    ///Both axes split across a 2-D process grid; no process holds a
    ///complete row or column
    DoublyPartitioned
}

///A matrix slice as one process of a distributed computation sees it:
///the locally-held block, the global extents, and where the block sits.
///The full distributed-matrix algebra is an external collaborator; this
///carries just enough structure for layout dispatch.
pub struct DistMatrix {
    layout : MatrixLayout,
    global_rows : usize,
    global_cols : usize,
    row_offset : usize,
    col_offset : usize,
    local : Array2<f32>
}

impl DistMatrix {
    pub fn new(layout : MatrixLayout, global_rows : usize, global_cols : usize,
               row_offset : usize, col_offset : usize,
               local : Array2<f32>) -> DistMatrix {
        assert!(row_offset + local.nrows() <= global_rows);
        assert!(col_offset + local.ncols() <= global_cols);
        DistMatrix {
            layout,
            global_rows,
            global_cols,
            row_offset,
            col_offset,
            local
        }
    }

    ///Wraps a fully-local matrix.
    pub fn from_local(local : Array2<f32>) -> DistMatrix {
        let global_rows = local.nrows();
        let global_cols = local.ncols();
        DistMatrix::new(MatrixLayout::Local, global_rows, global_cols, 0, 0, local)
    }

    pub fn layout(&self) -> MatrixLayout {
        self.layout
    }

    pub fn global_rows(&self) -> usize {
        self.global_rows
    }

    pub fn global_cols(&self) -> usize {
        self.global_cols
    }

    pub fn row_offset(&self) -> usize {
        self.row_offset
    }

    pub fn col_offset(&self) -> usize {
        self.col_offset
    }

    pub fn local(&self) -> &Array2<f32> {
        &self.local
    }

    pub fn local_mut(&mut self) -> &mut Array2<f32> {
        &mut self.local
    }

    pub fn local_dim(&self) -> (usize, usize) {
        (self.local.nrows(), self.local.ncols())
    }
}
