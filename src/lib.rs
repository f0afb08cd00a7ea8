//! **R**andomized **F**ast structured **sketch**ing primitives.
//!
//! A library of randomized dimensionality-reduction ("sketching") transforms
//! used to accelerate linear-algebra-heavy machine-learning pipelines:
//! random Fourier feature maps approximating shift-invariant kernels, built
//! either from a dense random projection ([`crate::dense_rft`]) or from a
//! block-structured composition of fast orthogonal transforms
//! ([`crate::fast_rft`]), together with dispatch logic realizing the same
//! logical operation across the ways a matrix may be partitioned among
//! processes ([`crate::dispatch`]).
//!
//! For starting points, see the Rustdoc on [`crate::fast_rft::FastRft`] and
//! [`crate::rand_context::RandomContext`].

#![allow(dead_code)]
#![allow(non_snake_case)]
#![allow(unused_imports)]
#![allow(unused_parens)]

#[macro_use] extern crate log;
pub mod params;
pub mod error;
pub mod direction;
pub mod rand_context;
pub mod trig_utils;
pub mod fast_transform;
pub mod dct;
pub mod rfut;
pub mod fast_rft;
pub mod dense_rft;
pub mod communicator;
pub mod dist_matrix;
pub mod dispatch;
pub mod test_utils;
