extern crate ndarray;

use ndarray::*;
use ndarray::parallel::prelude::*;
use serde::{Serialize, Deserialize};

use rand_distr::{Cauchy, ChiSquared, StandardNormal};
use rand::distributions::Uniform;

use crate::dct::*;
use crate::direction::*;
use crate::error::*;
use crate::fast_transform::*;
use crate::params::*;
use crate::rand_context::*;
use crate::trig_utils::*;

///Spectral envelope associated with the target shift-invariant kernel.
///Selects the distribution of the outermost diagonal of each structured
///block; pluggable rather than hard-coded in the engine.
#[derive(Clone, Copy, Debug, Serialize, Deserialize)]
pub enum SpectralEnvelope {
    Gaussian { sigma : f32 },
    Laplacian { sigma : f32 }
}

impl SpectralEnvelope {
    ///Materializes `count` envelope samples for blocks of size `nb`.
    pub fn sample_envelope(&self, nb : usize, count : usize,
                           context : &mut RandomContext) -> Vec<f32> {
        match self {
            SpectralEnvelope::Gaussian { sigma } => {
                //Chi-type envelope: row norms of a Gaussian matrix
                let bandwidth = *sigma;
                let chi_squared = ChiSquared::<f32>::new(nb as f32).unwrap();
                let samples = context.allocate_samples(count, chi_squared);
                samples.iter()
                    .map(|x| x.sqrt() / (bandwidth * (nb as f32).sqrt()))
                    .collect()
            },
            SpectralEnvelope::Laplacian { sigma } => {
                let bandwidth = *sigma;
                let cauchy = Cauchy::<f32>::new(0.0, 1.0 / bandwidth).unwrap();
                let samples = context.allocate_samples(count, cauchy);
                samples.iter().map(|x| x.abs()).collect()
            }
        }
    }
}

///Materialized parameters of the fast random features transform.
///
///All random arrays are drawn once at construction from the random context
///and never resampled; `n`, `s`, `nb`, `numblks` never change afterwards.
///The last of the `numblks` structured blocks may be partial, contributing
///`s - (numblks - 1) * nb` output features.
#[derive(Clone, Serialize, Deserialize)]
pub struct FastRftParams {
    pub n : usize,
    pub s : usize,
    pub nb : usize,
    pub numblks : usize,
    ///Per-block sign diagonals, `nb` entries per block
    pub b : Vec<f32>,
    ///Per-block Gaussian diagonals, `nb` entries per block
    pub g : Vec<f32>,
    ///Per-block spectral envelope diagonals, `nb` entries per block
    pub sm : Vec<f32>,
    ///Per-block swap index tables, `nb - 1` entries per block,
    ///each in `[0, nb)`
    pub p : Vec<usize>,
    ///Per-output-feature phase offsets, uniform in `[0, 2 pi)`
    pub shifts : Vec<f32>,
    ///Global output normalization, `sqrt(2 / s)`
    pub scale : f32
}

impl FastRftParams {
    pub fn new(n : usize, s : usize, nb : usize, envelope : &SpectralEnvelope,
               context : &mut RandomContext) -> FastRftParams {
        assert!(n > 0 && s > 0);
        assert!(nb >= n, "block size must cover the input dimension");
        let numblks = (s + nb - 1) / nb;
        let b = context.allocate_signs(nb * numblks);
        let g = context.allocate_samples(nb * numblks, StandardNormal);
        let sm = envelope.sample_envelope(nb, nb * numblks, context);
        let p = context.allocate_indices((nb - 1) * numblks, nb);
        let shifts = context.allocate_samples(s, Uniform::new(0.0f32, TWO_PI));
        let scale = (2.0f32 / (s as f32)).sqrt();
        FastRftParams {
            n,
            s,
            nb,
            numblks,
            b,
            g,
            sm,
            p,
            shifts,
            scale
        }
    }
}

///Fast random features transform: approximates a shift-invariant kernel's
///random-feature map in `O(n log nb)` per sample instead of the `O(n s)`
///of an unstructured projection ([`crate::dense_rft::DenseRft`]).
///
///Per block, a padded input vector runs through sign scale, fast transform,
///a structured swap scramble, Gaussian scale, a second fast transform and
///the spectral envelope scale, finishing with a shifted-cosine readout.
///The trigonometric readout makes the pipeline lossy, so no inverse exists.
pub struct FastRft<F : FastTransform> {
    params : FastRftParams,
    fut : F,
    cosine_mode : CosineMode
}

impl FastRft<Dct> {
    ///Gaussian-kernel features over the crate's default DCT adapter.
    pub fn gaussian(n : usize, s : usize, nb : usize, sigma : f32,
                    context : &mut RandomContext) -> FastRft<Dct> {
        let envelope = SpectralEnvelope::Gaussian { sigma };
        let params = FastRftParams::new(n, s, nb, &envelope, context);
        FastRft::new(params, Dct::new(nb))
    }

    ///Laplacian-kernel features over the crate's default DCT adapter.
    pub fn laplacian(n : usize, s : usize, nb : usize, sigma : f32,
                     context : &mut RandomContext) -> FastRft<Dct> {
        let envelope = SpectralEnvelope::Laplacian { sigma };
        let params = FastRftParams::new(n, s, nb, &envelope, context);
        FastRft::new(params, Dct::new(nb))
    }
}

impl<F : FastTransform> FastRft<F> {
    pub fn new(params : FastRftParams, fut : F) -> FastRft<F> {
        assert!(fut.size() == params.nb);
        FastRft {
            params,
            fut,
            cosine_mode : CosineMode::Exact
        }
    }

    pub fn set_cosine_mode(&mut self, cosine_mode : CosineMode) {
        self.cosine_mode = cosine_mode;
    }

    pub fn get_params(&self) -> &FastRftParams {
        &self.params
    }

    pub fn get_input_dimension(&self) -> usize {
        self.params.n
    }

    pub fn get_output_dimension(&self) -> usize {
        self.params.s
    }

    fn check_dims(&self, a : &Array2<f32>, out : &Array2<f32>,
                  direction : Direction) -> Result<(), SketchError> {
        let (a_axis, out_axis, a_other, out_other) = match direction {
            Direction::Columnwise => (a.nrows(), out.nrows(), a.ncols(), out.ncols()),
            Direction::Rowwise => (a.ncols(), out.ncols(), a.nrows(), out.nrows())
        };
        if (a_axis != self.params.n) {
            return Err(SketchError::DimensionMismatch {
                what : "transformed input axis",
                expected : self.params.n,
                actual : a_axis
            });
        }
        if (out_axis != self.params.s) {
            return Err(SketchError::DimensionMismatch {
                what : "transformed output axis",
                expected : self.params.s,
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

    fn readout(&self, w : f32, shift : f32) -> f32 {
        let x = w + shift;
        let cosine = match self.cosine_mode {
            CosineMode::Exact => x.cos(),
            //The wrap is enforced here unconditionally; the approximation's
            //precondition is never left to the caller
            CosineMode::Approximate => fast_cos(wrap_angle(x))
        };
        self.params.scale * cosine
    }

    ///Sketches one input vector (padded with zeros up to the block size)
    ///into its `s` output features. Scratch buffers are local to the call,
    ///so independent vectors may be sketched concurrently.
    fn sketch_vector(&self, a_vec : ArrayView1<f32>, mut out_vec : ArrayViewMut1<f32>) {
        let data = &self.params;
        let nb = data.nb;
        let fut_scale = self.fut.scale();
        let scal = (nb as f32).sqrt() * fut_scale;

        let mut padded = vec![0.0f32; nb];
        for i in 0..data.n {
            padded[i] = a_vec[[i,]];
        }
        let mut w = vec![0.0f32; nb];

        for blk in 0..data.numblks {
            let start = blk * nb;
            let end = std::cmp::min(start + nb, data.s);

            w.copy_from_slice(&padded);

            let b = &data.b[(blk * nb)..((blk + 1) * nb)];
            for j in 0..nb {
                w[j] *= b[j];
            }

            self.fut.apply(&mut w);
            for j in 0..nb {
                w[j] *= fut_scale;
            }

            let p = &data.p[(blk * (nb - 1))..((blk + 1) * (nb - 1))];
            for l in 0..(nb - 1) {
                w.swap(nb - 1 - l, p[l]);
            }

            let g = &data.g[(blk * nb)..((blk + 1) * nb)];
            for j in 0..nb {
                w[j] *= scal * g[j];
            }

            self.fut.apply(&mut w);
            for j in 0..nb {
                w[j] *= fut_scale;
            }

            let sm = &data.sm[(blk * nb)..((blk + 1) * nb)];
            for j in 0..nb {
                w[j] *= scal * sm[j];
            }

            for l in start..end {
                out_vec[[l,]] = self.readout(w[l - start], data.shifts[l]);
            }
        }
    }

    ///Applies the transform to every column (or row) of `a`, writing the
    ///`s` output features per vector into the pre-sized `out`. Independent
    ///vectors are processed in parallel.
    pub fn apply(&self, a : &Array2<f32>, out : &mut Array2<f32>,
                 direction : Direction) -> Result<(), SketchError> {
        self.check_dims(a, out, direction)?;
        let lane_axis = match direction {
            Direction::Columnwise => Axis(0),
            Direction::Rowwise => Axis(1)
        };
        Zip::from(out.lanes_mut(lane_axis))
            .and(a.lanes(lane_axis))
            .par_apply(|out_lane, a_lane| {
                self.sketch_vector(a_lane, out_lane);
            });
        Ok(())
    }

    ///The trigonometric readout is lossy, so inversion is a contract
    ///violation: always reports [`SketchError::NotInvertible`].
    pub fn apply_inverse(&self, _a : &Array2<f32>, _out : &mut Array2<f32>,
                         _direction : Direction) -> Result<(), SketchError> {
        Err(SketchError::NotInvertible)
    }
}
