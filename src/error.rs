use thiserror::Error;

// Main Application Error Type

#[derive(Error, Debug)]
pub enum AnalysisError {
    #[error("Failed to decode image: {0}")]
    ImageDecode(#[from] image::ImageError),
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
    #[error("Failed to load configuration: {0}")]
    Config(#[from] config::ConfigError),
    #[error("Analysis task failed: {0}")]
    Task(#[from] tokio::task::JoinError),
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Failed to serialize report: {0}")]
    Serialization(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, AnalysisError>;

impl AnalysisError {
    /// Decode failures abort the whole run; everything else is an
    /// environment or programming problem.
    pub fn is_decode_failure(&self) -> bool {
        matches!(self, AnalysisError::ImageDecode(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decode_errors_are_reported_as_such() {
        let err = image::load_from_memory(b"definitely not an image").unwrap_err();
        let err: AnalysisError = err.into();
        assert!(err.is_decode_failure());
        assert!(err.to_string().starts_with("Failed to decode image"));
    }

    #[test]
    fn config_errors_are_not_decode_failures() {
        let err = AnalysisError::InvalidConfig("stride must be positive".to_string());
        assert!(!err.is_decode_failure());
        assert_eq!(
            err.to_string(),
            "Invalid configuration: stride must be positive"
        );
    }
}
