//! Similarity scoring between a drawing and the reference silhouette.
//!
//! Composition of the pipeline stages: extract the dominant contour from
//! each mask, compute the invariant-moment distance, and map it onto a
//! bounded percentage. `score = max(0, 100 - distance*100)`, rounded to
//! two decimals. A mask with no extractable shape scores 0.0; missing ink
//! is a worst-possible match, not an error.

use crate::core::contour::extract_dominant;
use crate::core::moments::{match_distance, ContourMoments};
use crate::core::normalize;
use crate::domain::model::{BinaryMask, Contour};
use crate::utils::error::Result;

/// Scores drawings against a reference silhouette fixed at construction.
///
/// The reference is normalized and its descriptor extracted exactly once;
/// the scorer is immutable afterwards and safe to share across concurrent
/// scoring requests.
pub struct ShapeScorer {
    reference: Option<(Contour, ContourMoments)>,
}

impl ShapeScorer {
    /// Build a scorer from encoded reference image bytes. Fails when the
    /// bytes do not decode; a decodable reference with no foreground is
    /// accepted and scores every drawing 0.0.
    pub fn from_bytes(reference_bytes: &[u8]) -> Result<Self> {
        let mask = normalize::normalize(reference_bytes)?;
        Ok(Self::from_mask(&mask))
    }

    pub fn from_mask(reference: &BinaryMask) -> Self {
        let reference = extract_dominant(reference).map(|contour| {
            let moments = ContourMoments::of(&contour);
            (contour, moments)
        });
        Self { reference }
    }

    /// Score a normalized drawing against the memoized reference.
    pub fn score(&self, drawn: &BinaryMask) -> f64 {
        let Some((_, reference_moments)) = &self.reference else {
            return 0.0;
        };
        let Some(drawn_contour) = extract_dominant(drawn) else {
            return 0.0;
        };

        let drawn_moments = ContourMoments::of(&drawn_contour);
        distance_to_score(match_distance(reference_moments, &drawn_moments))
    }
}

/// Score two masks directly, without a memoized reference.
pub fn score_masks(a: &BinaryMask, b: &BinaryMask) -> f64 {
    let (Some(contour_a), Some(contour_b)) = (extract_dominant(a), extract_dominant(b)) else {
        return 0.0;
    };

    let distance = match_distance(&ContourMoments::of(&contour_a), &ContourMoments::of(&contour_b));
    distance_to_score(distance)
}

/// Lower distance = better match. Invert, scale to a percentage, clamp the
/// floor at 0, and round to two decimals. Distance 0 maps to exactly 100.0.
fn distance_to_score(distance: f64) -> f64 {
    let score = (100.0 - distance * 100.0).max(0.0);
    (score * 100.0).round() / 100.0
}

#[cfg(test)]
mod tests {
    use super::*;

    fn disc_mask(cx: f64, cy: f64, r: f64) -> BinaryMask {
        BinaryMask::from_fn(move |x, y| {
            let dx = f64::from(x) - cx;
            let dy = f64::from(y) - cy;
            dx * dx + dy * dy <= r * r
        })
    }

    fn square_mask(x0: u32, y0: u32, side: u32) -> BinaryMask {
        BinaryMask::from_fn(move |x, y| {
            (x0..x0 + side).contains(&x) && (y0..y0 + side).contains(&y)
        })
    }

    #[test]
    fn identical_masks_score_exactly_one_hundred() {
        let mask = disc_mask(128.0, 128.0, 80.0);
        assert_eq!(score_masks(&mask, &mask), 100.0);
    }

    #[test]
    fn blank_mask_scores_exactly_zero_against_anything() {
        let shape = disc_mask(128.0, 128.0, 80.0);
        let blank = BinaryMask::blank();
        assert_eq!(score_masks(&blank, &shape), 0.0);
        assert_eq!(score_masks(&shape, &blank), 0.0);
        assert_eq!(score_masks(&blank, &blank), 0.0);
    }

    #[test]
    fn scaled_and_translated_circle_stays_in_near_match_band() {
        let reference = disc_mask(128.0, 128.0, 80.0);
        let drawn = disc_mask(98.0, 128.0, 40.0);
        let score = score_masks(&reference, &drawn);
        assert!(score > 85.0, "score was {}", score);
    }

    #[test]
    fn square_scores_below_circle_against_circle_reference() {
        let reference = disc_mask(128.0, 128.0, 80.0);
        let similar = disc_mask(98.0, 128.0, 40.0);
        // Square of roughly equal area to the reference disc.
        let square = square_mask(57, 57, 142);

        let circle_score = score_masks(&reference, &similar);
        let square_score = score_masks(&reference, &square);
        assert!(
            square_score < circle_score,
            "square {} should be below circle {}",
            square_score,
            circle_score
        );
    }

    #[test]
    fn very_dissimilar_shape_clamps_to_floor() {
        let reference = disc_mask(128.0, 128.0, 80.0);
        // A thin horizontal sliver: strongly elongated, large descriptor gap.
        let sliver = BinaryMask::from_fn(|x, y| (8..248).contains(&x) && (126..129).contains(&y));
        let score = score_masks(&reference, &sliver);
        assert_eq!(score, 0.0);
    }

    #[test]
    fn scores_are_bounded_and_two_decimal() {
        let reference = disc_mask(128.0, 128.0, 80.0);
        let cases = [
            disc_mask(128.0, 128.0, 80.0),
            disc_mask(60.0, 70.0, 25.0),
            square_mask(20, 20, 100),
            BinaryMask::from_fn(|x, y| (x / 16 + y / 16) % 2 == 0),
        ];

        for drawn in &cases {
            let score = score_masks(&reference, drawn);
            assert!((0.0..=100.0).contains(&score), "score was {}", score);
            assert_eq!((score * 100.0).round() / 100.0, score);
        }
    }

    #[test]
    fn scoring_is_symmetric() {
        let a = disc_mask(128.0, 128.0, 80.0);
        let b = square_mask(57, 57, 142);
        assert_eq!(score_masks(&a, &b), score_masks(&b, &a));
    }

    #[test]
    fn scorer_memoizes_reference_descriptor() {
        let reference = disc_mask(128.0, 128.0, 80.0);
        let scorer = ShapeScorer::from_mask(&reference);

        let identical = disc_mask(128.0, 128.0, 80.0);
        assert_eq!(scorer.score(&identical), 100.0);
        assert_eq!(scorer.score(&BinaryMask::blank()), 0.0);
    }

    #[test]
    fn blank_reference_scores_everything_zero() {
        let scorer = ShapeScorer::from_mask(&BinaryMask::blank());
        assert_eq!(scorer.score(&disc_mask(128.0, 128.0, 80.0)), 0.0);
    }
}
