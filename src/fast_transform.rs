///A fixed, parameter-free fast orthogonal linear map on length-`size()`
///vectors, computable in `O(size log size)`.
///
///`apply` and `apply_inverse` run the *raw* (unnormalized) butterfly;
///`scale()` is the scalar normalization factor tying the two together:
///`scale()^2 * apply_inverse(apply(v)) == v`. For the Walsh-Hadamard
///adapter `scale() * apply` is exactly orthonormal; the DCT adapter's
///k=0 output carries an extra sqrt(2) weight, so there norms are only
///approximately preserved while the round trip stays exact.
pub trait FastTransform : Sync {
    fn size(&self) -> usize;
    fn scale(&self) -> f32;
    fn apply(&self, v : &mut [f32]);
    fn apply_inverse(&self, v : &mut [f32]);
}

///The Walsh-Hadamard butterfly. Self-inverse (up to normalization),
///defined for power-of-two sizes.
pub struct WalshHadamard {
    n : usize,
    scale : f32
}

impl WalshHadamard {
    pub fn new(n : usize) -> WalshHadamard {
        assert!(n > 0 && n.is_power_of_two());
        WalshHadamard {
            n,
            scale : 1.0f32 / (n as f32).sqrt()
        }
    }
}

impl FastTransform for WalshHadamard {
    fn size(&self) -> usize {
        self.n
    }

    fn scale(&self) -> f32 {
        self.scale
    }

    fn apply(&self, v : &mut [f32]) {
        debug_assert!(v.len() == self.n);
        let mut h = 1;
        while (h < self.n) {
            let mut i = 0;
            while (i < self.n) {
                for j in i..(i + h) {
                    let x = v[j];
                    let y = v[j + h];
                    v[j] = x + y;
                    v[j + h] = x - y;
                }
                i += h * 2;
            }
            h *= 2;
        }
    }

    fn apply_inverse(&self, v : &mut [f32]) {
        //The raw butterfly is its own inverse up to the n factor
        //absorbed by scale()^2
        self.apply(v);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn two_point_butterfly() {
        let wht = WalshHadamard::new(2);
        let mut v = vec![1.0f32, -1.0f32];
        wht.apply(&mut v);
        assert!((v[0] - 0.0).abs() < 0.0001);
        assert!((v[1] - 2.0).abs() < 0.0001);
        assert!((wht.scale() - 0.70710678).abs() < 0.0001);
    }

    #[test]
    fn normalized_map_preserves_norms() {
        let wht = WalshHadamard::new(8);
        let mut v = vec![0.3f32, -1.2, 0.0, 2.5, -0.7, 1.1, 0.4, -2.0];
        let norm_before : f32 = v.iter().map(|x| x * x).sum::<f32>().sqrt();
        wht.apply(&mut v);
        for x in v.iter_mut() {
            *x *= wht.scale();
        }
        let norm_after : f32 = v.iter().map(|x| x * x).sum::<f32>().sqrt();
        assert!((norm_before - norm_after).abs() < 0.001);
    }

    #[test]
    fn raw_inverse_recovers_input() {
        let wht = WalshHadamard::new(4);
        let original = vec![0.5f32, 1.5, -2.0, 0.25];
        let mut v = original.clone();
        wht.apply(&mut v);
        wht.apply_inverse(&mut v);
        let scale_sq = wht.scale() * wht.scale();
        for i in 0..4 {
            assert!((scale_sq * v[i] - original[i]).abs() < 0.0001);
        }
    }
}
