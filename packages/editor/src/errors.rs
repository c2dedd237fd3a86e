//! Error types for the editor

use thiserror::Error;

#[derive(Error, Debug)]
pub enum EditorError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Mutation error: {0}")]
    Mutation(#[from] crate::mutations::MutationError),

    #[error("Raw content error: {0}")]
    Raw(#[from] crate::raw::RawError),

    #[error("Storage error: {0}")]
    Storage(#[from] markpad_common::CommonError),
}

pub type EditorResult<T> = Result<T, EditorError>;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mutations::MutationError;

    #[test]
    fn test_mutation_error_converts() {
        let err: EditorError = MutationError::BlockNotFound("b9".to_string()).into();
        assert!(matches!(err, EditorError::Mutation(_)));
        assert!(err.to_string().contains("b9"));
    }
}
