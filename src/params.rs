pub const TWO_PI : f32 = 6.28318531f32;

//Block size used by the structured transforms when the caller
//does not pick one. Must be a power of two for the Walsh-Hadamard adapter.
pub const DEFAULT_BLOCK_SIZE : usize = 64;

//Default bandwidth for the Gaussian/Laplacian spectral envelopes
pub const DEFAULT_SIGMA : f32 = 1.0f32;

pub const ZEROING_THRESH : f32 = 0.001f32;
