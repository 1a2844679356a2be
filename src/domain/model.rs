use image::GrayImage;
use imageproc::point::Point;
use serde::{Deserialize, Serialize};

/// Canonical working resolution. Every mask is resized to this before
/// contour extraction so descriptors are comparable regardless of the
/// original canvas size.
pub const CANVAS_SIZE: u32 = 256;

/// Sentinel value for "ink" pixels in a [`BinaryMask`].
pub const FOREGROUND: u8 = 255;

/// Sentinel value for "empty canvas" pixels in a [`BinaryMask`].
pub const BACKGROUND: u8 = 0;

/// A `CANVAS_SIZE`×`CANVAS_SIZE` image whose pixels are exactly
/// [`FOREGROUND`] or [`BACKGROUND`]. Produced by normalization, consumed
/// by contour extraction, never persisted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BinaryMask {
    image: GrayImage,
}

impl BinaryMask {
    /// Wrap an already-binarized canonical image.
    ///
    /// Callers are expected to have mapped every pixel to one of the two
    /// sentinel values; `core::normalize` is the usual producer.
    pub(crate) fn from_image(image: GrayImage) -> Self {
        debug_assert_eq!(image.dimensions(), (CANVAS_SIZE, CANVAS_SIZE));
        debug_assert!(image
            .pixels()
            .all(|p| p.0[0] == FOREGROUND || p.0[0] == BACKGROUND));
        Self { image }
    }

    /// Build a mask from a foreground predicate over canonical coordinates.
    pub fn from_fn<F: Fn(u32, u32) -> bool>(is_ink: F) -> Self {
        let image = GrayImage::from_fn(CANVAS_SIZE, CANVAS_SIZE, |x, y| {
            image::Luma([if is_ink(x, y) { FOREGROUND } else { BACKGROUND }])
        });
        Self { image }
    }

    /// An all-background mask, the "blank canvas" case.
    pub fn blank() -> Self {
        Self::from_fn(|_, _| false)
    }

    pub fn as_image(&self) -> &GrayImage {
        &self.image
    }

    pub fn has_foreground(&self) -> bool {
        self.image.pixels().any(|p| p.0[0] == FOREGROUND)
    }
}

/// Ordered boundary trace of one connected foreground region.
pub type Contour = Vec<Point<i32>>;

/// JSON body returned to the drawing canvas: `{"match": 97.31}`.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct MatchResponse {
    #[serde(rename = "match")]
    pub score: f64,
}

/// Whether a drawing was submitted by the countdown timer or the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SubmissionMode {
    Auto,
    Manual,
}

impl SubmissionMode {
    pub fn from_auto_flag(auto_submit: bool) -> Self {
        if auto_submit {
            Self::Auto
        } else {
            Self::Manual
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Auto => "auto",
            Self::Manual => "manual",
        }
    }
}

/// JSON body accepted from the drawing canvas on submission.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmissionRequest {
    /// The drawing as a data URL.
    pub image: String,
    /// The similarity score shown to the user at submit time.
    pub accuracy: f64,
    #[serde(default)]
    pub auto_submit: bool,
    /// Seconds spent drawing.
    #[serde(default)]
    pub time_taken: u64,
}

/// One row of the flat submission log. Column names are fixed; the log is
/// consumed by external tooling.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SubmissionRecord {
    pub timestamp: String,
    pub accuracy: f64,
    pub time_taken: u64,
    pub submission_type: String,
    pub filename: String,
}

/// Returned after a submission is persisted.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SubmissionReceipt {
    pub message: String,
    pub filename: String,
}
