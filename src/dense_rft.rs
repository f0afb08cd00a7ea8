extern crate ndarray;

use ndarray::*;
use serde::{Serialize, Deserialize};

use rand_distr::{Cauchy, StandardNormal};
use rand::distributions::Uniform;

use crate::direction::*;
use crate::error::*;
use crate::fast_rft::SpectralEnvelope;
use crate::params::*;
use crate::rand_context::*;

///Unstructured random Fourier features: a dense `s x n` projection drawn
///from the kernel's spectral density plus the shifted-cosine readout.
///`O(n s)` per sample; the baseline [`crate::fast_rft::FastRft`]
///accelerates.
#[derive(Clone, Serialize, Deserialize)]
pub struct DenseRft {
    n : usize,
    s : usize,
    ws : Array2<f32>,
    shifts : Vec<f32>,
    scale : f32
}

impl DenseRft {
    pub fn new(n : usize, s : usize, envelope : &SpectralEnvelope,
               context : &mut RandomContext) -> DenseRft {
        assert!(n > 0 && s > 0);
        let entries = match envelope {
            SpectralEnvelope::Gaussian { sigma } => {
                let bandwidth = *sigma;
                let samples = context.allocate_samples(s * n, StandardNormal);
                samples.iter().map(|x| x / bandwidth).collect::<Vec<f32>>()
            },
            SpectralEnvelope::Laplacian { sigma } => {
                let bandwidth = *sigma;
                let cauchy = Cauchy::<f32>::new(0.0, 1.0 / bandwidth).unwrap();
                context.allocate_samples(s * n, cauchy)
            }
        };
        let ws = Array::from_shape_vec((s, n), entries).unwrap();
        let shifts = context.allocate_samples(s, Uniform::new(0.0f32, TWO_PI));
        let scale = (2.0f32 / (s as f32)).sqrt();
        DenseRft {
            n,
            s,
            ws,
            shifts,
            scale
        }
    }

    pub fn get_input_dimension(&self) -> usize {
        self.n
    }

    pub fn get_output_dimension(&self) -> usize {
        self.s
    }

    fn check_dims(&self, a : &Array2<f32>, out : &Array2<f32>,
                  direction : Direction) -> Result<(), SketchError> {
        let (a_axis, out_axis, a_other, out_other) = match direction {
            Direction::Columnwise => (a.nrows(), out.nrows(), a.ncols(), out.ncols()),
            Direction::Rowwise => (a.ncols(), out.ncols(), a.nrows(), out.nrows())
        };
        if (a_axis != self.n) {
            return Err(SketchError::DimensionMismatch {
                what : "transformed input axis",
                expected : self.n,
                actual : a_axis
            });
        }
        if (out_axis != self.s) {
            return Err(SketchError::DimensionMismatch {
                what : "transformed output axis",
                expected : self.s,
                actual : out_axis
            });
        }
        if (out_other != a_other) {
            return Err(SketchError::DimensionMismatch {
                what : "untransformed output axis",
                expected : a_other,
                actual : out_other
            });
        }
        Ok(())
    }

    pub fn apply(&self, a : &Array2<f32>, out : &mut Array2<f32>,
                 direction : Direction) -> Result<(), SketchError> {
        self.check_dims(a, out, direction)?;
        match direction {
            Direction::Columnwise => {
                let dotted = self.ws.dot(a);
                for j in 0..dotted.ncols() {
                    for i in 0..self.s {
                        out[[i, j]] = self.scale * (dotted[[i, j]] + self.shifts[i]).cos();
                    }
                }
            },
            Direction::Rowwise => {
                let dotted = a.dot(&self.ws.t());
                for i in 0..dotted.nrows() {
                    for j in 0..self.s {
                        out[[i, j]] = self.scale * (dotted[[i, j]] + self.shifts[j]).cos();
                    }
                }
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::*;

    #[test]
    fn construction_is_deterministic() {
        let envelope = SpectralEnvelope::Gaussian { sigma : 1.0 };
        let mut context_one = RandomContext::new(21);
        let mut context_two = RandomContext::new(21);
        let one = DenseRft::new(6, 12, &envelope, &mut context_one);
        let two = DenseRft::new(6, 12, &envelope, &mut context_two);
        assert_eq!(one.ws, two.ws);
        assert_eq!(one.shifts, two.shifts);
    }

    #[test]
    fn rowwise_matches_columnwise_of_transpose() {
        let envelope = SpectralEnvelope::Laplacian { sigma : 2.0 };
        let mut context = RandomContext::new(404);
        let rft = DenseRft::new(4, 10, &envelope, &mut context);
        let a = random_matrix(4, 6);
        let mut columnwise = Array::zeros((10, 6));
        rft.apply(&a, &mut columnwise, Direction::Columnwise).unwrap();

        let a_t = a.t().to_owned();
        let mut rowwise = Array::zeros((6, 10));
        rft.apply(&a_t, &mut rowwise, Direction::Rowwise).unwrap();
        assert_equal_matrices(&rowwise.t().to_owned(), &columnwise);
    }

    #[test]
    fn features_are_bounded_by_scale() {
        let envelope = SpectralEnvelope::Gaussian { sigma : 0.5 };
        let mut context = RandomContext::new(9);
        let rft = DenseRft::new(8, 32, &envelope, &mut context);
        let a = random_matrix(8, 3);
        let mut out = Array::zeros((32, 3));
        rft.apply(&a, &mut out, Direction::Columnwise).unwrap();
        let bound = (2.0f32 / 32.0).sqrt() + 0.0001;
        for value in out.iter() {
            assert!(value.abs() <= bound);
        }
    }
}
