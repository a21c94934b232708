use thiserror::Error;

/// Result type alias for the library
pub type Result<T> = std::result::Result<T, Error>;

/// Error types for the library
#[derive(Error, Debug)]
pub enum Error {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON parsing error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("YAML parsing error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error(transparent)]
    Load(#[from] LoadError),

    #[error("Invalid configuration: {0}")]
    Config(String),
}

/// Failure to obtain the bill feed. Terminal for a session: there is no retry.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LoadError {
    #[error("Could not reach bill feed at {location}: {cause}")]
    Unreachable { location: String, cause: String },

    #[error("Bill feed at {location} responded with HTTP {status}")]
    Status { location: String, status: u16 },

    #[error("Could not read bill feed at {location}: {cause}")]
    Unreadable { location: String, cause: String },

    #[error("Bill feed is malformed: {0}")]
    Malformed(String),
}

impl LoadError {
    /// Message shown to the user in place of the bill list
    pub fn user_message(&self) -> String {
        format!("Error loading bills: {}. Please try again later.", self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_error_names_location_and_code() {
        let err = LoadError::Status {
            location: "https://example.org/bills.json".to_string(),
            status: 503,
        };
        assert_eq!(
            err.to_string(),
            "Bill feed at https://example.org/bills.json responded with HTTP 503"
        );
    }

    #[test]
    fn user_message_wraps_cause() {
        let err = LoadError::Malformed("expected value at line 1 column 1".to_string());
        assert!(err.user_message().starts_with("Error loading bills: Bill feed is malformed"));
    }

    #[test]
    fn load_error_converts_into_crate_error() {
        let err: Error = LoadError::Malformed("x".to_string()).into();
        assert!(matches!(err, Error::Load(_)));
    }
}
