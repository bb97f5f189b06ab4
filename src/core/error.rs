//! Error types for the utility library

/// Result type for library operations
pub type Result<T> = std::result::Result<T, FeilongError>;

/// Errors surfaced by the utility functions.
///
/// Failures of the underlying libraries (IO, JSON, URL parsing, date parsing) are
/// converted into one of these variants at the call site.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum FeilongError {
    /// An argument failed eager validation
    #[error("Invalid argument '{parameter}': {message}")]
    InvalidArgument {
        /// Name of the offending parameter
        parameter: String,
        /// Error message
        message: String,
    },

    /// IO failure from an underlying call
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization or deserialization failure
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// None of the patterns could parse the value
    #[error("Unable to parse date '{value}' with patterns {patterns:?}")]
    DateParse {
        /// Input value
        value: String,
        /// Patterns that were tried
        patterns: Vec<String>,
    },

    /// Number could not be formatted
    #[error("Unable to format number with pattern '{pattern}': {message}")]
    NumberFormat {
        /// Pattern in use
        pattern: String,
        /// Error message
        message: String,
    },

    /// URI could not be parsed
    #[error("Unable to parse uri '{uri}': {message}")]
    UriParse {
        /// Input uri
        uri: String,
        /// Error message
        message: String,
    },

    /// Property could not be read from a value
    #[error("Unable to read property '{path}': {message}")]
    Property {
        /// Property path
        path: String,
        /// Error message
        message: String,
    },

    /// Thread pool is not running
    #[error("Thread pool '{pool_name}' is not running")]
    NotRunning {
        /// Name of the thread pool
        pool_name: String,
    },

    /// Thread pool is already running
    #[error("Thread pool '{pool_name}' is already running with {worker_count} workers")]
    AlreadyRunning {
        /// Name of the thread pool
        pool_name: String,
        /// Number of worker threads
        worker_count: usize,
    },

    /// Thread pool is shutting down
    #[error("Thread pool is shutting down")]
    ShuttingDown,

    /// Failed to spawn a worker thread
    #[error("Failed to spawn worker thread #{thread_id}: {message}")]
    SpawnError {
        /// ID of the thread that failed to spawn
        thread_id: usize,
        /// Error message
        message: String,
    },

    /// Failed to join a worker thread
    #[error("Failed to join worker thread #{thread_id}: {message}")]
    JoinError {
        /// ID of the thread that failed to join
        thread_id: usize,
        /// Error message
        message: String,
    },

    /// A job returned an error
    #[error("Job execution failed ({job}): {message}")]
    ExecutionError {
        /// Job description
        job: String,
        /// Error message
        message: String,
    },

    /// Queue send error
    #[error("Failed to send job to queue")]
    QueueSendError,

    /// Invalid configuration
    #[error("Invalid configuration for '{parameter}': {message}")]
    InvalidConfig {
        /// Configuration parameter name
        parameter: String,
        /// Error message
        message: String,
    },

    /// One or more partition batches failed
    #[error("{failed}/{total} partition batches failed, first error: {first_error}")]
    PartitionFailed {
        /// Number of failed or panicked batches
        failed: usize,
        /// Number of batches
        total: usize,
        /// Message of the first recorded failure
        first_error: String,
    },

    /// General error
    #[error("{0}")]
    Other(String),
}

impl FeilongError {
    /// Create an invalid argument error
    pub fn invalid_argument(parameter: impl Into<String>, message: impl Into<String>) -> Self {
        FeilongError::InvalidArgument {
            parameter: parameter.into(),
            message: message.into(),
        }
    }

    /// Create a date parse error
    pub fn date_parse<S: AsRef<str>>(value: impl Into<String>, patterns: &[S]) -> Self {
        FeilongError::DateParse {
            value: value.into(),
            patterns: patterns.iter().map(|p| p.as_ref().to_string()).collect(),
        }
    }

    /// Create a number format error
    pub fn number_format(pattern: impl Into<String>, message: impl Into<String>) -> Self {
        FeilongError::NumberFormat {
            pattern: pattern.into(),
            message: message.into(),
        }
    }

    /// Create a uri parse error
    pub fn uri_parse(uri: impl Into<String>, message: impl Into<String>) -> Self {
        FeilongError::UriParse {
            uri: uri.into(),
            message: message.into(),
        }
    }

    /// Create a property error
    pub fn property(path: impl Into<String>, message: impl Into<String>) -> Self {
        FeilongError::Property {
            path: path.into(),
            message: message.into(),
        }
    }

    /// Create a not running error
    pub fn not_running(pool_name: impl Into<String>) -> Self {
        FeilongError::NotRunning {
            pool_name: pool_name.into(),
        }
    }

    /// Create an already running error
    pub fn already_running(pool_name: impl Into<String>, worker_count: usize) -> Self {
        FeilongError::AlreadyRunning {
            pool_name: pool_name.into(),
            worker_count,
        }
    }

    /// Create a spawn error
    pub fn spawn(thread_id: usize, message: impl Into<String>) -> Self {
        FeilongError::SpawnError {
            thread_id,
            message: message.into(),
        }
    }

    /// Create a join error
    pub fn join(thread_id: usize, message: impl Into<String>) -> Self {
        FeilongError::JoinError {
            thread_id,
            message: message.into(),
        }
    }

    /// Create an execution error
    pub fn execution(job: impl Into<String>, message: impl Into<String>) -> Self {
        FeilongError::ExecutionError {
            job: job.into(),
            message: message.into(),
        }
    }

    /// Create an invalid config error
    pub fn invalid_config(parameter: impl Into<String>, message: impl Into<String>) -> Self {
        FeilongError::InvalidConfig {
            parameter: parameter.into(),
            message: message.into(),
        }
    }

    /// Create a partition failure error
    pub fn partition_failed(failed: usize, total: usize, first_error: impl Into<String>) -> Self {
        FeilongError::PartitionFailed {
            failed,
            total,
            first_error: first_error.into(),
        }
    }

    /// Create a generic error
    pub fn other<S: Into<String>>(msg: S) -> Self {
        FeilongError::Other(msg.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_creation() {
        let err = FeilongError::invalid_argument("pattern", "can't be blank");
        assert!(matches!(err, FeilongError::InvalidArgument { .. }));

        let err = FeilongError::partition_failed(1, 4, "boom");
        assert!(matches!(err, FeilongError::PartitionFailed { .. }));

        let err = FeilongError::execution("batch-1", "Panic in task");
        assert!(matches!(err, FeilongError::ExecutionError { .. }));
    }

    #[test]
    fn test_error_display() {
        let err = FeilongError::invalid_argument("pattern", "can't be blank");
        assert_eq!(err.to_string(), "Invalid argument 'pattern': can't be blank");

        let err = FeilongError::date_parse("2020/13/01", &["yyyy-MM-dd"]);
        assert_eq!(
            err.to_string(),
            "Unable to parse date '2020/13/01' with patterns [\"yyyy-MM-dd\"]"
        );

        let err = FeilongError::partition_failed(2, 8, "bad row");
        assert_eq!(
            err.to_string(),
            "2/8 partition batches failed, first error: bad row"
        );
    }

    #[test]
    fn test_from_io_error() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "missing");
        let err: FeilongError = io_err.into();
        assert!(matches!(err, FeilongError::Io(_)));
        assert!(err.to_string().contains("missing"));
    }
}
