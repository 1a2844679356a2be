//! Dominant-silhouette extraction from a binary mask.
//!
//! Border following (Suzuki-Abe, via `imageproc`) yields every boundary in
//! the mask; only external boundaries of top-level components are kept,
//! mirroring external-only contour retrieval. The component enclosing the
//! largest area wins. Ties go to the first contour found. That tie policy
//! is fixed; callers depend on stable selection across runs.

use crate::domain::model::{BinaryMask, Contour};
use imageproc::contours::{find_contours, BorderType};
use imageproc::point::Point;

/// Extract the outer boundary of the largest connected foreground
/// component, or `None` when the mask contains no foreground at all.
pub fn extract_dominant(mask: &BinaryMask) -> Option<Contour> {
    let contours = find_contours::<i32>(mask.as_image());

    let mut dominant: Option<(f64, Contour)> = None;
    for contour in contours {
        // External boundaries only; holes and anything nested inside a
        // hole are ignored.
        if contour.border_type != BorderType::Outer || contour.parent.is_some() {
            continue;
        }

        let area = contour_area(&contour.points);
        // Strict comparison: on equal areas the first-found contour is kept.
        let replace = match &dominant {
            Some((best_area, _)) => area > *best_area,
            None => true,
        };
        if replace {
            dominant = Some((area, contour.points));
        }
    }

    dominant.map(|(_, points)| points)
}

/// Enclosed polygon area of a closed boundary trace (shoelace formula,
/// absolute value).
pub fn contour_area(points: &[Point<i32>]) -> f64 {
    if points.len() < 3 {
        return 0.0;
    }

    let mut doubled: i64 = 0;
    for (i, p) in points.iter().enumerate() {
        let q = points[(i + 1) % points.len()];
        doubled += i64::from(p.x) * i64::from(q.y) - i64::from(q.x) * i64::from(p.y);
    }

    (doubled.abs() as f64) / 2.0
}
