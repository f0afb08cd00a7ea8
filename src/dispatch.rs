extern crate ndarray;

use ndarray::*;

use crate::communicator::*;
use crate::direction::*;
use crate::dist_matrix::*;
use crate::error::*;
use crate::fast_rft::*;
use crate::fast_transform::*;
use crate::rfut::*;

//Distributed apply for the sketching engines: per-(layout, direction)
//specializations where the transform is local or embarrassingly parallel,
//and a generic redistribute/apply/redistribute-back fallback otherwise.

fn transport(op : &'static str) -> impl FnOnce(CommError) -> SketchError {
    move |source| SketchError::Transport { op, source }
}

///Reassembles the full logical matrix on the calling process. Identity for
///layouts where the caller already holds everything.
fn gather_full(a : &DistMatrix, comm : &dyn Communicator) -> Result<Array2<f32>, SketchError> {
    match a.layout() {
        MatrixLayout::Local
        | MatrixLayout::Replicated
        | MatrixLayout::RootOnly => Ok(a.local().clone()),
        MatrixLayout::RowPartitioned => {
            comm.all_gather_rows(a.local(), a.global_rows())
                .map_err(transport("all_gather_rows"))
        },
        MatrixLayout::ColPartitioned => {
            comm.all_gather_cols(a.local(), a.global_cols())
                .map_err(transport("all_gather_cols"))
        },
        MatrixLayout::DoublyPartitioned => {
            let row_complete = comm.all_gather_rows(a.local(), a.global_rows())
                .map_err(transport("all_gather_rows"))?;
            comm.all_gather_cols(&row_complete, a.global_cols())
                .map_err(transport("all_gather_cols"))
        }
    }
}

///Writes this process's slice of the fully-assembled result back into its
///pre-sized local block. Purely local: after the all-gather every
///participant holds the complete result.
fn scatter_back(full : &Array2<f32>, out : &mut DistMatrix) {
    let row_offset = out.row_offset();
    let col_offset = out.col_offset();
    let (local_rows, local_cols) = out.local_dim();
    let slice = full.slice(s![row_offset..(row_offset + local_rows),
                              col_offset..(col_offset + local_cols)]);
    out.local_mut().assign(&slice);
}

///The generic fallback: gather the operand into a layout where the
///requested direction is local, apply, and scatter the result back.
///Strictly more expensive than a direct specialization but numerically
///identical modulo floating-point reordering.
fn apply_via_redistribute<G>(a : &DistMatrix, out : &mut DistMatrix,
                             comm : &dyn Communicator,
                             apply_local : G) -> Result<(), SketchError>
        where G : Fn(&Array2<f32>, &mut Array2<f32>) -> Result<(), SketchError> {
    debug!("no direct specialization for layout {:?}; redistributing", a.layout());
    let full = gather_full(a, comm)?;
    let mut full_out = Array::zeros((out.global_rows(), out.global_cols()));
    apply_local(&full, &mut full_out)?;
    scatter_back(&full_out, out);
    Ok(())
}

///True when the transform direction runs along the axis every process
///holds completely, making the application embarrassingly parallel.
fn is_local_case(layout : MatrixLayout, direction : Direction) -> bool {
    match (layout, direction) {
        (MatrixLayout::ColPartitioned, Direction::Columnwise) => true,
        (MatrixLayout::RowPartitioned, Direction::Rowwise) => true,
        _ => false
    }
}

impl<F : FastTransform> FastRft<F> {
    ///Distributed apply: selects a specialization for the operand's layout
    ///or falls back to redistribution. Input and output must share a
    ///layout.
    pub fn apply_dist(&self, a : &DistMatrix, out : &mut DistMatrix,
                      direction : Direction,
                      comm : &dyn Communicator) -> Result<(), SketchError> {
        if (a.layout() != out.layout()) {
            return Err(SketchError::UnsupportedDistribution(out.layout()));
        }
        match a.layout() {
            MatrixLayout::Local | MatrixLayout::Replicated => {
                debug!("fast_rft: direct local apply under {:?}", a.layout());
                self.apply(a.local(), out.local_mut(), direction)
            },
            MatrixLayout::RootOnly => {
                if (comm.rank() == 0) {
                    self.apply(a.local(), out.local_mut(), direction)
                } else {
                    Ok(())
                }
            },
            layout if is_local_case(layout, direction) => {
                debug!("fast_rft: embarrassingly parallel apply under {:?}", layout);
                self.apply(a.local(), out.local_mut(), direction)
            },
            _ => {
                apply_via_redistribute(a, out, comm, |full, full_out| {
                    self.apply(full, full_out, direction)
                })
            }
        }
    }
}

impl<F : FastTransform> Rfut<F> {
    ///Distributed apply. Doubly-partitioned operands are rejected with a
    ///typed error: a caller holding one must redistribute first (or go
    ///through the FastRFT-level dispatcher, which owns that fallback).
    pub fn apply_dist(&self, a : &DistMatrix, out : &mut DistMatrix,
                      direction : Direction,
                      comm : &dyn Communicator) -> Result<(), SketchError> {
        self.dispatch_dist(a, out, direction, comm, false)
    }

    ///Distributed inverse, same layout dispatch as [`Rfut::apply_dist`].
    pub fn apply_inverse_dist(&self, a : &DistMatrix, out : &mut DistMatrix,
                              direction : Direction,
                              comm : &dyn Communicator) -> Result<(), SketchError> {
        self.dispatch_dist(a, out, direction, comm, true)
    }

    fn dispatch_dist(&self, a : &DistMatrix, out : &mut DistMatrix,
                     direction : Direction, comm : &dyn Communicator,
                     inverse : bool) -> Result<(), SketchError> {
        let apply_local = |input : &Array2<f32>, output : &mut Array2<f32>| {
            if (inverse) {
                self.apply_inverse(input, output, direction)
            } else {
                self.apply(input, output, direction)
            }
        };
        if (a.layout() != out.layout()) {
            return Err(SketchError::UnsupportedDistribution(out.layout()));
        }
        match a.layout() {
            MatrixLayout::Local | MatrixLayout::Replicated => {
                apply_local(a.local(), out.local_mut())
            },
            MatrixLayout::RootOnly => {
                if (comm.rank() == 0) {
                    apply_local(a.local(), out.local_mut())
                } else {
                    Ok(())
                }
            },
            layout if is_local_case(layout, direction) => {
                apply_local(a.local(), out.local_mut())
            },
            MatrixLayout::DoublyPartitioned => {
                Err(SketchError::UnsupportedDistribution(a.layout()))
            },
            _ => {
                apply_via_redistribute(a, out, comm, apply_local)
            }
        }
    }
}
