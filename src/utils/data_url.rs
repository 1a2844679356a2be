//! Data-URL transport parsing.
//!
//! Drawings arrive from the canvas as `data:image/png;base64,<payload>`
//! strings. Only the base64-encoded image bytes matter downstream; the
//! header is validated and discarded.

use crate::utils::error::{Result, ScoreError};
use base64::{engine::general_purpose, Engine as _};
use regex::Regex;
use std::sync::OnceLock;

fn header_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"^data:image/[a-z0-9.+-]+;base64$").expect("static regex must compile")
    })
}

/// Split a data URL and decode its base64 payload into raw image bytes.
pub fn decode_data_url(data_url: &str) -> Result<Vec<u8>> {
    let (header, encoded) = data_url
        .split_once(',')
        .ok_or_else(|| ScoreError::DataUrlError {
            reason: "expected 'header,payload' with a comma separator".to_string(),
        })?;

    if !header_pattern().is_match(header) {
        return Err(ScoreError::DataUrlError {
            reason: format!("unsupported header '{}'", header),
        });
    }

    let bytes = general_purpose::STANDARD.decode(encoded.trim())?;
    Ok(bytes)
}

/// Encode raw image bytes as a PNG data URL, the inverse of
/// [`decode_data_url`]. Used by the CLI to feed files through the same
/// transport path the canvas uses.
pub fn encode_png_data_url(bytes: &[u8]) -> String {
    format!(
        "data:image/png;base64,{}",
        general_purpose::STANDARD.encode(bytes)
    )
}
