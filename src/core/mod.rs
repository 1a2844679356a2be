pub mod contour;
pub mod moments;
pub mod normalize;
pub mod scorer;
pub mod service;

pub use crate::domain::model::{BinaryMask, Contour, MatchResponse, SubmissionRequest};
pub use crate::domain::ports::{ConfigProvider, Storage};
pub use crate::utils::error::Result;
