use thiserror::Error;

#[derive(Error, Debug)]
pub enum ScoreError {
    #[error("Image decode failed: {0}")]
    DecodeError(#[from] image::ImageError),

    #[error("Base64 decode failed: {0}")]
    Base64Error(#[from] base64::DecodeError),

    #[error("Malformed data URL: {reason}")]
    DataUrlError { reason: String },

    #[error("CSV log error: {0}")]
    CsvError(#[from] csv::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Reference image '{path}' could not be loaded: {reason}")]
    ReferenceError { path: String, reason: String },

    #[error("Configuration error in '{field}': {message}")]
    ConfigValidationError { field: String, message: String },

    #[error("Invalid value '{value}' for '{field}': {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Missing required configuration field: {field}")]
    MissingConfigError { field: String },
}

pub type Result<T> = std::result::Result<T, ScoreError>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Input,
    Config,
    Storage,
    Internal,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorSeverity {
    Low,
    Medium,
    High,
    Critical,
}

impl ScoreError {
    /// Errors caused by the submitted payload rather than the service.
    /// The HTTP collaborator maps these to a 4xx response.
    pub fn is_client_error(&self) -> bool {
        matches!(
            self,
            ScoreError::DecodeError(_)
                | ScoreError::Base64Error(_)
                | ScoreError::DataUrlError { .. }
        )
    }

    pub fn category(&self) -> ErrorCategory {
        match self {
            ScoreError::DecodeError(_)
            | ScoreError::Base64Error(_)
            | ScoreError::DataUrlError { .. } => ErrorCategory::Input,
            ScoreError::ConfigValidationError { .. }
            | ScoreError::InvalidConfigValueError { .. }
            | ScoreError::MissingConfigError { .. }
            | ScoreError::ReferenceError { .. } => ErrorCategory::Config,
            ScoreError::CsvError(_) | ScoreError::IoError(_) => ErrorCategory::Storage,
            ScoreError::SerializationError(_) => ErrorCategory::Internal,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self {
            // Bad payloads are routine; the caller is told and nothing is lost.
            ScoreError::DecodeError(_)
            | ScoreError::Base64Error(_)
            | ScoreError::DataUrlError { .. } => ErrorSeverity::Low,
            ScoreError::CsvError(_) | ScoreError::SerializationError(_) => ErrorSeverity::Medium,
            ScoreError::IoError(_) => ErrorSeverity::High,
            // Without a valid reference or config the process cannot serve at all.
            ScoreError::ReferenceError { .. }
            | ScoreError::ConfigValidationError { .. }
            | ScoreError::InvalidConfigValueError { .. }
            | ScoreError::MissingConfigError { .. } => ErrorSeverity::Critical,
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self {
            ScoreError::DecodeError(_) => {
                "The submitted drawing is not a readable image".to_string()
            }
            ScoreError::Base64Error(_) | ScoreError::DataUrlError { .. } => {
                "The submitted drawing payload is malformed".to_string()
            }
            ScoreError::ReferenceError { path, .. } => {
                format!("The reference image '{}' could not be loaded", path)
            }
            ScoreError::CsvError(_) => "The submission log could not be written".to_string(),
            ScoreError::IoError(e) => format!("File operation failed: {}", e),
            other => other.to_string(),
        }
    }

    pub fn recovery_suggestion(&self) -> String {
        match self {
            ScoreError::DecodeError(_) => {
                "Submit a PNG or JPEG image exported from the drawing canvas".to_string()
            }
            ScoreError::Base64Error(_) | ScoreError::DataUrlError { .. } => {
                "Send the drawing as a 'data:image/...;base64,...' data URL".to_string()
            }
            ScoreError::ReferenceError { .. } => {
                "Check that the reference path points to a decodable image file".to_string()
            }
            ScoreError::CsvError(_) | ScoreError::IoError(_) => {
                "Check permissions and free space on the output directory".to_string()
            }
            ScoreError::ConfigValidationError { .. }
            | ScoreError::InvalidConfigValueError { .. }
            | ScoreError::MissingConfigError { .. } => {
                "Fix the highlighted configuration field and restart".to_string()
            }
            ScoreError::SerializationError(_) => {
                "This is a bug in sketch-score; please report it".to_string()
            }
        }
    }
}
