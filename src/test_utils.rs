extern crate ndarray;
extern crate ndarray_linalg;

use ndarray::*;
use ndarray_linalg::*;
use ndarray_rand::RandomExt;
use ndarray_rand::rand_distr::StandardNormal;

use crate::params::*;

pub fn assert_equal_matrices(one : &Array2<f32>, two : &Array2<f32>) {
    let diff = one - two;
    let frob_norm = diff.opnorm_fro().unwrap();
    if (frob_norm > ZEROING_THRESH) {
        panic!("matrices differ by frobenius norm {}", frob_norm);
    }
}

pub fn assert_equal_vectors(one : &Array1<f32>, two : &Array1<f32>) {
    let diff = one - two;
    let norm = diff.dot(&diff).sqrt();
    if (norm > ZEROING_THRESH) {
        panic!("vectors differ by norm {}", norm);
    }
}

pub fn random_matrix(t : usize, s : usize) -> Array2<f32> {
    Array::random((t, s), StandardNormal)
}

pub fn random_vector(t : usize) -> Array1<f32> {
    Array::random((t,), StandardNormal)
}
