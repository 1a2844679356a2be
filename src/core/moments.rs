//! Invariant-moment shape descriptors.
//!
//! A contour's geometric moments are computed with Green's theorem over the
//! boundary polygon, reduced to central and normalized central moments, and
//! finally to the seven Hu invariants. The invariants are stable under
//! translation and scaling and approximately stable under rotation, which
//! is what lets a drawing be offset, resized, or tilted relative to the
//! reference without tanking its score.
//!
//! [`match_distance`] is a log-scaled sum of absolute differences between
//! corresponding invariants. Zero means identical descriptors; the measure
//! is unbounded above and symmetric in its arguments.

use imageproc::point::Point;

/// Invariants with magnitude at or below this contribute nothing to the
/// distance; their log would be dominated by discretization noise.
const LOG_EPS: f64 = 1e-5;

/// Geometric moments of a closed contour polygon, through third order.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ContourMoments {
    pub m00: f64,
    m10: f64,
    m01: f64,
    m20: f64,
    m11: f64,
    m02: f64,
    m30: f64,
    m21: f64,
    m12: f64,
    m03: f64,
    /// The seven Hu invariants derived from the normalized central moments.
    pub hu: [f64; 7],
}

impl ContourMoments {
    /// Compute boundary-polygon moments for a closed contour.
    ///
    /// Degenerate contours (fewer than three points, or zero enclosed
    /// area) produce all-zero moments and all-zero invariants.
    pub fn of(contour: &[Point<i32>]) -> Self {
        let (mut a00, mut a10, mut a01) = (0.0f64, 0.0f64, 0.0f64);
        let (mut a20, mut a11, mut a02) = (0.0f64, 0.0f64, 0.0f64);
        let (mut a30, mut a21, mut a12, mut a03) = (0.0f64, 0.0f64, 0.0f64, 0.0f64);

        if !contour.is_empty() {
            let mut prev = contour[contour.len() - 1];
            for &p in contour {
                let (xp, yp) = (f64::from(prev.x), f64::from(prev.y));
                let (x, y) = (f64::from(p.x), f64::from(p.y));

                let xp2 = xp * xp;
                let yp2 = yp * yp;
                let x2 = x * x;
                let y2 = y * y;
                let dxy = xp * y - x * yp;
                let xs = xp + x;
                let ys = yp + y;

                a00 += dxy;
                a10 += dxy * xs;
                a01 += dxy * ys;
                a20 += dxy * (xp2 + xp * x + x2);
                a11 += dxy * (xp * (ys + yp) + x * (ys + y));
                a02 += dxy * (yp2 + yp * y + y2);
                a30 += dxy * xs * (xp2 + x2);
                a21 += dxy * (xp2 * (3.0 * yp + y) + 2.0 * x * xp * ys + x2 * (yp + 3.0 * y));
                a12 += dxy * (yp2 * (3.0 * xp + x) + 2.0 * y * yp * xs + y2 * (xp + 3.0 * x));
                a03 += dxy * ys * (yp2 + y2);

                prev = p;
            }
        }

        let mut moments = Self::zero();
        if a00.abs() > f64::from(f32::EPSILON) {
            // Orientation of the trace flips the sign of every integral;
            // fold it into the constants so m00 comes out positive.
            let s = if a00 > 0.0 { 1.0 } else { -1.0 };
            moments.m00 = a00 * s / 2.0;
            moments.m10 = a10 * s / 6.0;
            moments.m01 = a01 * s / 6.0;
            moments.m20 = a20 * s / 12.0;
            moments.m11 = a11 * s / 24.0;
            moments.m02 = a02 * s / 12.0;
            moments.m30 = a30 * s / 20.0;
            moments.m21 = a21 * s / 60.0;
            moments.m12 = a12 * s / 60.0;
            moments.m03 = a03 * s / 20.0;
        }

        moments.hu = moments.hu_invariants();
        moments
    }

    fn zero() -> Self {
        Self {
            m00: 0.0,
            m10: 0.0,
            m01: 0.0,
            m20: 0.0,
            m11: 0.0,
            m02: 0.0,
            m30: 0.0,
            m21: 0.0,
            m12: 0.0,
            m03: 0.0,
            hu: [0.0; 7],
        }
    }

    fn hu_invariants(&self) -> [f64; 7] {
        if self.m00.abs() <= f64::EPSILON {
            return [0.0; 7];
        }

        let inv_m00 = 1.0 / self.m00;
        let cx = self.m10 * inv_m00;
        let cy = self.m01 * inv_m00;

        // Central moments, invariant to translation.
        let mu20 = self.m20 - self.m10 * cx;
        let mu11 = self.m11 - self.m10 * cy;
        let mu02 = self.m02 - self.m01 * cy;
        let mu30 = self.m30 - cx * (3.0 * mu20 + cx * self.m10);
        let mu21 = self.m21 - cx * (2.0 * mu11 + cx * self.m01) - cy * mu20;
        let mu12 = self.m12 - cy * (2.0 * mu11 + cy * self.m10) - cx * mu02;
        let mu03 = self.m03 - cy * (3.0 * mu02 + cy * self.m01);

        // Normalized central moments, additionally invariant to scale.
        let s2 = inv_m00 * inv_m00;
        let s3 = s2 * inv_m00.abs().sqrt();
        let nu20 = mu20 * s2;
        let nu11 = mu11 * s2;
        let nu02 = mu02 * s2;
        let nu30 = mu30 * s3;
        let nu21 = mu21 * s3;
        let nu12 = mu12 * s3;
        let nu03 = mu03 * s3;

        let t0 = nu30 + nu12;
        let t1 = nu21 + nu03;
        let q0 = t0 * t0;
        let q1 = t1 * t1;
        let n4 = 4.0 * nu11;
        let s = nu20 + nu02;
        let d = nu20 - nu02;

        let h0 = s;
        let h1 = d * d + n4 * nu11;
        let h3 = q0 + q1;
        let h5 = d * (q0 - q1) + n4 * t0 * t1;

        let t0 = t0 * (q0 - 3.0 * q1);
        let t1 = t1 * (3.0 * q0 - q1);
        let q0 = nu30 - 3.0 * nu12;
        let q1 = 3.0 * nu21 - nu03;

        let h2 = q0 * q0 + q1 * q1;
        let h4 = q0 * t0 + q1 * t1;
        let h6 = q1 * t0 - q0 * t1;

        [h0, h1, h2, h3, h4, h5, h6]
    }
}

/// Normalized shape distance between two moment descriptors: the sum of
/// absolute differences between sign-preserving log10-scaled invariants.
///
/// Invariants whose magnitude falls at or below `1e-5` on either side are
/// skipped. If exactly one descriptor is entirely zero (a degenerate
/// contour against a real shape) the shapes share no basis for comparison
/// and the distance saturates to `f64::MAX`.
pub fn match_distance(a: &ContourMoments, b: &ContourMoments) -> f64 {
    let mut result = 0.0;
    let mut any_a = false;
    let mut any_b = false;

    for i in 0..7 {
        let ha = a.hu[i];
        let hb = b.hu[i];
        let ama = ha.abs();
        let amb = hb.abs();

        if ama > 0.0 {
            any_a = true;
        }
        if amb > 0.0 {
            any_b = true;
        }

        if ama > LOG_EPS && amb > LOG_EPS {
            let la = ha.signum() * ama.log10();
            let lb = hb.signum() * amb.log10();
            result += (lb - la).abs();
        }
    }

    if any_a != any_b {
        return f64::MAX;
    }

    result
}

#[cfg(test)]
mod tests {
    use super::*;

    fn square(origin: i32, side: i32) -> Vec<Point<i32>> {
        vec![
            Point::new(origin, origin),
            Point::new(origin + side, origin),
            Point::new(origin + side, origin + side),
            Point::new(origin, origin + side),
        ]
    }

    fn l_shape(scale: i32) -> Vec<Point<i32>> {
        // Asymmetric hexagon so rotation actually permutes the moments.
        [(0, 0), (4, 0), (4, 1), (1, 1), (1, 3), (0, 3)]
            .iter()
            .map(|&(x, y)| Point::new(x * scale, y * scale))
            .collect()
    }

    #[test]
    fn m00_is_enclosed_area() {
        let m = ContourMoments::of(&square(0, 9));
        assert!((m.m00 - 81.0).abs() < 1e-9);
    }

    #[test]
    fn orientation_does_not_change_sign() {
        let cw: Vec<_> = square(0, 9).into_iter().rev().collect();
        let m = ContourMoments::of(&cw);
        assert!((m.m00 - 81.0).abs() < 1e-9);
    }

    #[test]
    fn square_first_invariant_is_one_sixth() {
        // nu20 = nu02 = 1/12 for any square, so hu[0] = 1/6.
        let m = ContourMoments::of(&square(0, 9));
        assert!((m.hu[0] - 1.0 / 6.0).abs() < 1e-9, "hu0 = {}", m.hu[0]);
    }

    #[test]
    fn invariants_are_translation_invariant() {
        let a = ContourMoments::of(&square(0, 9));
        let b = ContourMoments::of(&square(150, 9));
        for i in 0..7 {
            assert!((a.hu[i] - b.hu[i]).abs() < 1e-9, "hu[{}] differs", i);
        }
    }

    #[test]
    fn invariants_are_scale_invariant() {
        let a = ContourMoments::of(&l_shape(1));
        let b = ContourMoments::of(&l_shape(40));
        for i in 0..7 {
            assert!((a.hu[i] - b.hu[i]).abs() < 1e-9, "hu[{}] differs", i);
        }
    }

    #[test]
    fn invariants_survive_quarter_rotation() {
        let original = l_shape(10);
        let rotated: Vec<_> = original.iter().map(|p| Point::new(-p.y, p.x)).collect();
        let a = ContourMoments::of(&original);
        let b = ContourMoments::of(&rotated);
        for i in 0..7 {
            assert!((a.hu[i] - b.hu[i]).abs() < 1e-9, "hu[{}] differs", i);
        }
    }

    #[test]
    fn distance_to_self_is_exactly_zero() {
        let m = ContourMoments::of(&l_shape(10));
        assert_eq!(match_distance(&m, &m), 0.0);
    }

    #[test]
    fn distance_is_symmetric() {
        let a = ContourMoments::of(&square(0, 50));
        let b = ContourMoments::of(&l_shape(10));
        assert_eq!(match_distance(&a, &b), match_distance(&b, &a));
    }

    #[test]
    fn degenerate_contour_saturates_distance() {
        let real = ContourMoments::of(&square(0, 50));
        let point = ContourMoments::of(&[Point::new(5, 5)]);
        assert_eq!(match_distance(&real, &point), f64::MAX);
        assert_eq!(match_distance(&point, &real), f64::MAX);
    }

    #[test]
    fn both_degenerate_contours_have_zero_distance() {
        let a = ContourMoments::of(&[]);
        let b = ContourMoments::of(&[Point::new(1, 1)]);
        assert_eq!(match_distance(&a, &b), 0.0);
    }

    #[test]
    fn dissimilar_shapes_are_farther_than_similar_ones() {
        let square_small = ContourMoments::of(&square(0, 20));
        let square_big = ContourMoments::of(&square(30, 200));
        let sliver = ContourMoments::of(&[
            Point::new(0, 0),
            Point::new(200, 0),
            Point::new(200, 2),
            Point::new(0, 2),
        ]);

        let near = match_distance(&square_small, &square_big);
        let far = match_distance(&square_small, &sliver);
        assert!(near < far, "near = {}, far = {}", near, far);
    }
}
