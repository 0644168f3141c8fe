use thiserror::Error;

/// Errors raised by request validation, before any store access happens.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("missing required field: {0}")]
    MissingField(&'static str),
    #[error("field must not be empty: {0}")]
    EmptyField(&'static str),
    #[error("update payload carries no fields")]
    EmptyUpdate,
    #[error("malformed request body: {0}")]
    MalformedBody(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_formats() {
        assert_eq!(
            ValidationError::MissingField("title").to_string(),
            "missing required field: title"
        );
        assert_eq!(
            ValidationError::EmptyField("title").to_string(),
            "field must not be empty: title"
        );
        assert_eq!(
            ValidationError::EmptyUpdate.to_string(),
            "update payload carries no fields"
        );
    }
}
