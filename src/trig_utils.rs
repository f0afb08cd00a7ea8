use crate::params::*;
use serde::{Serialize, Deserialize};

pub const PI : f32 = 3.14159265f32;
pub const HALF_PI : f32 = 1.57079632f32;

///Selects between the exact library cosine and a low-accuracy
///(absolute error below ~0.06) quadratic approximation traded for speed.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Serialize, Deserialize)]
pub enum CosineMode {
    Exact,
    Approximate
}

///Wraps an arbitrary angle into `[-PI, PI]`.
pub fn wrap_angle(x : f32) -> f32 {
    let turns = (x / TWO_PI).round();
    x - turns * TWO_PI
}

///Low-accuracy quadratic cosine approximation. The input angle must
///already be wrapped into `[-PI, PI]`; use [`wrap_angle`] first.
pub fn fast_cos(x : f32) -> f32 {
    debug_assert!(x >= -PI - 0.001 && x <= PI + 0.001);
    //Shift to a sine evaluation of the parabola approximation
    let mut x = x + HALF_PI;
    if (x > PI) {
        x -= TWO_PI;
    }
    if (x < 0.0) {
        1.27323954 * x + 0.405284735 * x * x
    } else {
        1.27323954 * x - 0.405284735 * x * x
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wrap_angle_lands_in_range() {
        let angles = [-100.0f32, -7.5, -3.2, -0.1, 0.0, 0.1, 3.2, 9.42, 250.3];
        for angle in angles.iter() {
            let wrapped = wrap_angle(*angle);
            assert!(wrapped >= -PI - 0.001 && wrapped <= PI + 0.001);
            //Wrapping must preserve the cosine
            assert!((wrapped.cos() - angle.cos()).abs() < 0.0001);
        }
    }

    #[test]
    fn fast_cos_tracks_cos() {
        let mut angle = -PI;
        while (angle <= PI) {
            let diff = (fast_cos(angle) - angle.cos()).abs();
            assert!(diff < 0.06, "angle {} diff {}", angle, diff);
            angle += 0.01;
        }
    }

    #[test]
    fn fast_cos_after_wrap_handles_unbounded_angles() {
        let mut angle = -50.0f32;
        while (angle <= 50.0) {
            let diff = (fast_cos(wrap_angle(angle)) - angle.cos()).abs();
            assert!(diff < 0.06, "angle {} diff {}", angle, diff);
            angle += 0.37;
        }
    }
}
