use std::sync::Arc;
use rustfft::FFTplanner;
use rustfft::FFT;
use rustfft::num_complex::Complex;
use rustfft::num_traits::Zero;

use crate::fast_transform::*;
use crate::trig_utils::PI;

fn to_complex(real : f32) -> Complex<f32> {
    Complex::<f32>::new(real, 0.0)
}

///Discrete cosine transform adapter: unnormalized DCT-II forward and
///DCT-III inverse, realized on a complex FFT of twice the length via the
///mirrored-extension identity. `scale() = 1/sqrt(2n)`, matching the
///`DCT-III(DCT-II(x)) = 2n x` composition.
pub struct Dct {
    n : usize,
    scale : f32,
    fft : Arc<dyn FFT<f32>>,
    ifft : Arc<dyn FFT<f32>>
}

impl Dct {
    pub fn new(n : usize) -> Dct {
        assert!(n > 0);
        let mut fftplanner = FFTplanner::<f32>::new(false);
        let mut ifftplanner = FFTplanner::<f32>::new(true);

        let fft = fftplanner.plan_fft(2 * n);
        let ifft = ifftplanner.plan_fft(2 * n);

        Dct {
            n,
            scale : 1.0f32 / ((2 * n) as f32).sqrt(),
            fft,
            ifft
        }
    }
}

impl FastTransform for Dct {
    fn size(&self) -> usize {
        self.n
    }

    fn scale(&self) -> f32 {
        self.scale
    }

    fn apply(&self, v : &mut [f32]) {
        debug_assert!(v.len() == self.n);
        let n = self.n;
        let len = 2 * n;

        //Mirrored even extension [x_0 .. x_{n-1}, x_{n-1} .. x_0]
        let mut extended = Vec::with_capacity(len);
        for j in 0..n {
            extended.push(to_complex(v[j]));
        }
        for j in (0..n).rev() {
            extended.push(to_complex(v[j]));
        }

        let mut spectrum = vec![Complex::zero(); len];
        self.fft.process(&mut extended, &mut spectrum);

        //C[k] = Re(e^{-i pi k / 2n} * Y[k]) = 2 sum_j x_j cos(pi k (2j+1) / 2n)
        for k in 0..n {
            let theta = -PI * (k as f32) / (len as f32);
            let twiddle = Complex::<f32>::new(theta.cos(), theta.sin());
            v[k] = (twiddle * spectrum[k]).re;
        }
    }

    fn apply_inverse(&self, v : &mut [f32]) {
        debug_assert!(v.len() == self.n);
        let n = self.n;
        let len = 2 * n;

        //Rebuild the conjugate-symmetric spectrum of the mirrored extension
        let mut spectrum = vec![Complex::zero(); len];
        spectrum[0] = to_complex(v[0]);
        for k in 1..n {
            let theta = PI * (k as f32) / (len as f32);
            let twiddle = Complex::<f32>::new(theta.cos(), theta.sin());
            let z = twiddle * v[k];
            spectrum[k] = z;
            spectrum[len - k] = z.conj();
        }

        let mut extended = vec![Complex::zero(); len];
        self.ifft.process(&mut spectrum, &mut extended);

        //Unnormalized inverse: yields 2n times the forward input
        for j in 0..n {
            v[j] = extended[j].re;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn naive_dct2(v : &[f32]) -> Vec<f32> {
        let n = v.len();
        let mut result = vec![0.0f32; n];
        for k in 0..n {
            let mut acc = 0.0f32;
            for j in 0..n {
                let angle = PI * (k as f32) * ((2 * j + 1) as f32) / ((2 * n) as f32);
                acc += v[j] * angle.cos();
            }
            result[k] = 2.0 * acc;
        }
        result
    }

    #[test]
    fn matches_naive_dct2() {
        let dct = Dct::new(8);
        let original = vec![0.5f32, -1.25, 2.0, 0.0, 1.0, -0.75, 0.3, 1.6];
        let expected = naive_dct2(&original);
        let mut v = original.clone();
        dct.apply(&mut v);
        for i in 0..8 {
            assert!((v[i] - expected[i]).abs() < 0.001,
                    "index {} got {} expected {}", i, v[i], expected[i]);
        }
    }

    #[test]
    fn round_trip_recovers_input() {
        let dct = Dct::new(6);
        let original = vec![1.0f32, 2.0, -0.5, 0.25, -3.0, 0.8];
        let mut v = original.clone();
        dct.apply(&mut v);
        dct.apply_inverse(&mut v);
        let scale_sq = dct.scale() * dct.scale();
        for i in 0..6 {
            assert!((scale_sq * v[i] - original[i]).abs() < 0.001);
        }
    }
}
