//! Airport loader error types.

/// Errors that can occur while loading airports into a running server.
#[derive(Debug, thiserror::Error)]
pub enum LoaderError {
    /// HTTP request failed
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Reading the input file failed
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The input file has no data
    #[error("{path} is not a valid input")]
    EmptyInput { path: String },

    /// A row could not be parsed
    #[error("line {line}: {message}")]
    Parse { line: u64, message: String },

    /// The server rejected a registration
    #[error("API error {status}: {message}")]
    Api { status: u16, message: String },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display() {
        let err = LoaderError::Parse {
            line: 7,
            message: "invalid latitude".into(),
        };
        assert_eq!(err.to_string(), "line 7: invalid latitude");

        let err = LoaderError::Api {
            status: 400,
            message: "Invalid IATA code".into(),
        };
        assert_eq!(err.to_string(), "API error 400: Invalid IATA code");

        let err = LoaderError::EmptyInput {
            path: "airports.dat".into(),
        };
        assert_eq!(err.to_string(), "airports.dat is not a valid input");
    }
}
