extern crate ndarray;

use ndarray::*;
use serde::{Serialize, Deserialize};

use crate::direction::*;
use crate::error::*;
use crate::fast_transform::*;
use crate::rand_context::*;

///Materialized parameters of a randomized fast unitary transform:
///the random unit-magnitude diagonal. Sampled once at construction,
///immutable afterwards.
#[derive(Clone, Serialize, Deserialize)]
pub struct RfutParams {
    pub n : usize,
    pub d : Vec<f32>
}

impl RfutParams {
    pub fn new(n : usize, context : &mut RandomContext) -> RfutParams {
        assert!(n > 0);
        RfutParams {
            n,
            d : context.allocate_signs(n)
        }
    }
}

///Randomized fast unitary transform `M = F . D`: a diagonal of independent
///random signs composed with a fast orthogonal transform, applied to every
///column (or row) of a matrix. Norm-preserving, and invertible through
///[`Rfut::apply_inverse`].
pub struct Rfut<F : FastTransform> {
    params : RfutParams,
    fut : F
}

impl<F : FastTransform> Rfut<F> {
    pub fn new(fut : F, context : &mut RandomContext) -> Rfut<F> {
        let params = RfutParams::new(fut.size(), context);
        Rfut {
            params,
            fut
        }
    }

    pub fn from_params(params : RfutParams, fut : F) -> Rfut<F> {
        assert!(params.n == fut.size());
        assert!(params.d.len() == params.n);
        Rfut {
            params,
            fut
        }
    }

    pub fn get_dimension(&self) -> usize {
        self.params.n
    }

    pub fn get_params(&self) -> &RfutParams {
        &self.params
    }

    fn check_dims(&self, a : &Array2<f32>, out : &Array2<f32>,
                  direction : Direction) -> Result<(), SketchError> {
        let n = self.params.n;
        let transformed_axis_len = match direction {
            Direction::Columnwise => a.nrows(),
            Direction::Rowwise => a.ncols()
        };
        if (transformed_axis_len != n) {
            return Err(SketchError::DimensionMismatch {
                what : "transformed input axis",
                expected : n,
                actual : transformed_axis_len
            });
        }
        if (out.nrows() != a.nrows()) {
            return Err(SketchError::DimensionMismatch {
                what : "output rows",
                expected : a.nrows(),
                actual : out.nrows()
            });
        }
        if (out.ncols() != a.ncols()) {
            return Err(SketchError::DimensionMismatch {
                what : "output columns",
                expected : a.ncols(),
                actual : out.ncols()
            });
        }
        Ok(())
    }

    ///Writes `scale() * F(D . a)` into `out`, one vector at a time along
    ///the requested direction.
    pub fn apply(&self, a : &Array2<f32>, out : &mut Array2<f32>,
                 direction : Direction) -> Result<(), SketchError> {
        self.check_dims(a, out, direction)?;
        let n = self.params.n;
        let scale = self.fut.scale();
        let lane_axis = match direction {
            Direction::Columnwise => Axis(0),
            Direction::Rowwise => Axis(1)
        };
        let mut buf = vec![0.0f32; n];
        for (a_lane, mut out_lane) in a.lanes(lane_axis).into_iter()
                                       .zip(out.lanes_mut(lane_axis).into_iter()) {
            for i in 0..n {
                buf[i] = scale * self.params.d[i] * a_lane[[i,]];
            }
            self.fut.apply(&mut buf);
            for i in 0..n {
                out_lane[[i,]] = buf[i];
            }
        }
        Ok(())
    }

    ///Inverse of [`Rfut::apply`]: writes `D^{-1} . scale() * F^{-1}(a)`
    ///into `out`. Defined because the single-stage composition is
    ///invertible (the diagonal is unit-magnitude, `F` orthogonal).
    pub fn apply_inverse(&self, a : &Array2<f32>, out : &mut Array2<f32>,
                         direction : Direction) -> Result<(), SketchError> {
        self.check_dims(a, out, direction)?;
        let n = self.params.n;
        let scale = self.fut.scale();
        let lane_axis = match direction {
            Direction::Columnwise => Axis(0),
            Direction::Rowwise => Axis(1)
        };
        let mut buf = vec![0.0f32; n];
        for (a_lane, mut out_lane) in a.lanes(lane_axis).into_iter()
                                       .zip(out.lanes_mut(lane_axis).into_iter()) {
            for i in 0..n {
                buf[i] = a_lane[[i,]];
            }
            self.fut.apply_inverse(&mut buf);
            for i in 0..n {
                //The sign diagonal is its own inverse
                out_lane[[i,]] = scale * self.params.d[i] * buf[i];
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::*;

    fn hadamard_rfut(n : usize, seed : u64) -> Rfut<WalshHadamard> {
        let mut context = RandomContext::new(seed);
        Rfut::new(WalshHadamard::new(n), &mut context)
    }

    #[test]
    fn two_point_worked_case() {
        //D = diag(1, -1), x = [1, 1]: expect [0, sqrt(2)]
        let params = RfutParams {
            n : 2,
            d : vec![1.0f32, -1.0f32]
        };
        let rfut = Rfut::from_params(params, WalshHadamard::new(2));
        let a = arr2(&[[1.0f32], [1.0f32]]);
        let mut out = Array::zeros((2, 1));
        rfut.apply(&a, &mut out, Direction::Columnwise).unwrap();
        assert!((out[[0, 0]] - 0.0).abs() < 0.0001);
        assert!((out[[1, 0]] - 1.41421356).abs() < 0.0001);
    }

    #[test]
    fn apply_preserves_column_norms() {
        let rfut = hadamard_rfut(8, 11);
        let a = random_matrix(8, 5);
        let mut out = Array::zeros((8, 5));
        rfut.apply(&a, &mut out, Direction::Columnwise).unwrap();
        for j in 0..5 {
            let norm_before = a.column(j).dot(&a.column(j)).sqrt();
            let norm_after = out.column(j).dot(&out.column(j)).sqrt();
            assert!((norm_before - norm_after).abs() < 0.001);
        }
    }

    #[test]
    fn round_trip_is_identity() {
        let rfut = hadamard_rfut(16, 99);
        let a = random_matrix(16, 3);
        let mut mixed = Array::zeros((16, 3));
        let mut recovered = Array::zeros((16, 3));
        rfut.apply(&a, &mut mixed, Direction::Columnwise).unwrap();
        rfut.apply_inverse(&mixed, &mut recovered, Direction::Columnwise).unwrap();
        assert_equal_matrices(&recovered, &a);
    }

    #[test]
    fn rowwise_matches_columnwise_of_transpose() {
        let rfut = hadamard_rfut(4, 5);
        let a = random_matrix(4, 6);
        let mut columnwise = Array::zeros((4, 6));
        rfut.apply(&a, &mut columnwise, Direction::Columnwise).unwrap();

        let a_t = a.t().to_owned();
        let mut rowwise = Array::zeros((6, 4));
        rfut.apply(&a_t, &mut rowwise, Direction::Rowwise).unwrap();
        assert_equal_matrices(&rowwise.t().to_owned(), &columnwise);
    }

    #[test]
    fn wrong_dimensions_are_reported() {
        let rfut = hadamard_rfut(8, 2);
        let a = random_matrix(4, 3);
        let mut out = Array::zeros((4, 3));
        let result = rfut.apply(&a, &mut out, Direction::Columnwise);
        assert!(matches!(result, Err(SketchError::DimensionMismatch { .. })));
    }

    #[test]
    fn construction_is_deterministic() {
        let one = hadamard_rfut(8, 1234);
        let two = hadamard_rfut(8, 1234);
        assert_eq!(one.get_params().d, two.get_params().d);
    }
}
