use thiserror::Error;

/// Errors shared by every markpad package
#[derive(Error, Debug)]
pub enum CommonError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid storage key: {0:?}")]
    InvalidKey(String),

    #[error("Storage error: {0}")]
    Storage(String),
}

impl From<String> for CommonError {
    fn from(s: String) -> Self {
        CommonError::Storage(s)
    }
}

impl From<&str> for CommonError {
    fn from(s: &str) -> Self {
        CommonError::Storage(s.to_string())
    }
}

/// Common Result type alias
pub type CommonResult<T> = Result<T, CommonError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_io_error_conversion() {
        let io_err = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "read-only");
        let err: CommonError = io_err.into();
        assert!(matches!(err, CommonError::Io(_)));
        assert!(err.to_string().contains("read-only"));
    }

    #[test]
    fn test_string_conversion() {
        let err: CommonError = "disk full".into();
        assert_eq!(err.to_string(), "Storage error: disk full");
    }
}
