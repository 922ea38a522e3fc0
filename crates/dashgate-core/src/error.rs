//! Unified error type for the dashgate core.
//!
//! Every failure in the builder, the normalizer and the pipeline client is
//! funnelled into [`Error`], which carries enough context for the HTTP layer
//! to pick a status code via [`Error::http_status`].

/// Failure modes of job building, submission and status interpretation.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The caller supplied a malformed input key.
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// The job would have no outputs at all.
    #[error("Job has no outputs: {0}")]
    EmptyOutput(String),

    /// Talking to the external pipeline failed.
    #[error("Pipeline request failed: {cause}")]
    Submission {
        /// Human-readable description of the transport or validation failure.
        cause: String,
    },

    /// The pipeline returned a record that violates its own contract.
    #[error("Inconsistent job state: {0}")]
    InconsistentState(String),

    /// The pipeline reported a status outside the known vocabulary.
    #[error("Unknown job status: {raw}")]
    UnknownStatus {
        /// The status string exactly as the pipeline sent it.
        raw: String,
    },
}

impl Error {
    /// Map this error to an HTTP status code.
    ///
    /// Caller mistakes are 4xx; everything caused by the external pipeline
    /// is a 5xx.
    pub fn http_status(&self) -> u16 {
        match self {
            Error::InvalidInput(_) => 400,
            Error::EmptyOutput(_) => 400,
            Error::Submission { .. } => 500,
            Error::InconsistentState(_) => 500,
            Error::UnknownStatus { .. } => 500,
        }
    }

    /// Stable machine-readable code for this error kind.
    pub fn kind(&self) -> &'static str {
        match self {
            Error::InvalidInput(_) => "invalid_input",
            Error::EmptyOutput(_) => "empty_output",
            Error::Submission { .. } => "submission_error",
            Error::InconsistentState(_) => "inconsistent_state",
            Error::UnknownStatus { .. } => "unknown_status",
        }
    }

    /// Convenience constructor for [`Error::InvalidInput`].
    pub fn invalid_input(msg: impl Into<String>) -> Self {
        Error::InvalidInput(msg.into())
    }

    /// Convenience constructor for [`Error::Submission`].
    pub fn submission(cause: impl Into<String>) -> Self {
        Error::Submission {
            cause: cause.into(),
        }
    }

    /// Convenience constructor for [`Error::InconsistentState`].
    pub fn inconsistent(msg: impl Into<String>) -> Self {
        Error::InconsistentState(msg.into())
    }

    /// Whether the error was caused by the caller rather than the pipeline.
    pub fn is_client_error(&self) -> bool {
        (400..500).contains(&self.http_status())
    }
}

/// Result alias using the crate-level [`Error`].
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invalid_input_display() {
        let err = Error::invalid_input("Input basename is empty");
        assert_eq!(err.to_string(), "Invalid input: Input basename is empty");
        assert_eq!(err.http_status(), 400);
        assert!(err.is_client_error());
    }

    #[test]
    fn submission_display() {
        let err = Error::submission("connection refused");
        assert_eq!(err.to_string(), "Pipeline request failed: connection refused");
        assert_eq!(err.http_status(), 500);
        assert!(!err.is_client_error());
    }

    #[test]
    fn unknown_status_keeps_raw_value() {
        let err = Error::UnknownStatus {
            raw: "Paused".into(),
        };
        assert_eq!(err.to_string(), "Unknown job status: Paused");
        assert_eq!(err.kind(), "unknown_status");
    }

    #[test]
    fn all_kinds_map_to_status() {
        let cases: Vec<(Error, u16, &str)> = vec![
            (Error::invalid_input("x"), 400, "invalid_input"),
            (Error::EmptyOutput("x".into()), 400, "empty_output"),
            (Error::submission("x"), 500, "submission_error"),
            (Error::inconsistent("x"), 500, "inconsistent_state"),
            (Error::UnknownStatus { raw: "x".into() }, 500, "unknown_status"),
        ];

        for (err, status, kind) in cases {
            assert_eq!(err.http_status(), status, "status for {err}");
            assert_eq!(err.kind(), kind);
        }
    }
}
