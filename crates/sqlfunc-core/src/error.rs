//! Error types for SQL function compilation and execution.

use std::fmt;

/// The primary error type for all sqlfunc operations.
#[derive(Debug)]
pub enum Error {
    /// A function node was constructed or compiled with invalid arguments
    Validation(ValidationError),
    /// The target backend cannot express a function
    NotSupported(NotSupportedError),
    /// Connection-related errors (open, close)
    Connection(ConnectionError),
    /// Query execution errors
    Query(QueryError),
    /// Configuration errors
    Config(ConfigError),
}

/// Invalid arguments to a function node.
///
/// Raised at construction time where possible so that a bad node never
/// reaches a compiler.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    /// Name of the function that rejected its arguments
    pub function: &'static str,
    /// The kind of check that failed
    pub kind: ValidationErrorKind,
    /// Human-readable error message
    pub message: String,
}

/// The type of argument check that failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidationErrorKind {
    /// Fewer expressions than the function's minimum
    TooFewArguments,
    /// Not exactly the number of expressions the function takes
    WrongArity,
    /// An update function was given nothing to update
    NoUpdates,
    /// Collation name is not a bare word
    InvalidCollation,
    /// Malformed JSON key path
    InvalidPath,
    /// NULL used where the backend cannot accept it
    NullArgument,
}

/// A function that the target backend cannot render.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NotSupportedError {
    /// Name of the function
    pub function: &'static str,
    /// Vendor name of the backend
    pub vendor: String,
    /// Why the function is unavailable
    pub kind: NotSupportedKind,
    /// Human-readable error message
    pub message: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotSupportedKind {
    /// A required capability flag is off for this connection
    MissingFeature,
    /// The backend could express it but no rendering exists yet
    NotImplemented,
    /// The backend has no equivalent at all
    UnsupportedBackend,
}

#[derive(Debug)]
pub struct ConnectionError {
    pub kind: ConnectionErrorKind,
    pub message: String,
    pub source: Option<Box<dyn std::error::Error + Send + Sync>>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConnectionErrorKind {
    /// Failed to open the database
    Connect,
}

#[derive(Debug)]
pub struct QueryError {
    pub kind: QueryErrorKind,
    pub sql: Option<String>,
    pub message: String,
    pub source: Option<Box<dyn std::error::Error + Send + Sync>>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QueryErrorKind {
    /// Syntax error in SQL
    Syntax,
    /// Constraint violation (unique, foreign key, etc.)
    Constraint,
    /// Table or column not found
    NotFound,
    /// Other database error
    Database,
}

#[derive(Debug)]
pub struct ConfigError {
    pub message: String,
    pub source: Option<Box<dyn std::error::Error + Send + Sync>>,
}

impl ValidationError {
    /// Create a validation error for `function`.
    pub fn new(
        function: &'static str,
        kind: ValidationErrorKind,
        message: impl Into<String>,
    ) -> Self {
        Self {
            function,
            kind,
            message: message.into(),
        }
    }
}

impl NotSupportedError {
    /// Create a not-supported error for `function` on `vendor`.
    pub fn new(
        function: &'static str,
        vendor: impl fmt::Display,
        kind: NotSupportedKind,
        message: impl Into<String>,
    ) -> Self {
        Self {
            function,
            vendor: vendor.to_string(),
            kind,
            message: message.into(),
        }
    }
}

impl Error {
    /// Shorthand for a [`ValidationError`].
    pub fn validation(
        function: &'static str,
        kind: ValidationErrorKind,
        message: impl Into<String>,
    ) -> Self {
        Error::Validation(ValidationError::new(function, kind, message))
    }

    /// Shorthand for a [`NotSupportedError`].
    pub fn not_supported(
        function: &'static str,
        vendor: impl fmt::Display,
        kind: NotSupportedKind,
        message: impl Into<String>,
    ) -> Self {
        Error::NotSupported(NotSupportedError::new(function, vendor, kind, message))
    }

    /// Did argument validation fail?
    pub fn is_validation(&self) -> bool {
        matches!(self, Error::Validation(_))
    }

    /// Is the function unavailable on the target backend?
    pub fn is_not_supported(&self) -> bool {
        matches!(self, Error::NotSupported(_))
    }

    /// Get the SQL that caused this error, if available
    pub fn sql(&self) -> Option<&str> {
        match self {
            Error::Query(q) => q.sql.as_deref(),
            _ => None,
        }
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Validation(e) => write!(f, "Validation error: {}", e),
            Error::NotSupported(e) => write!(f, "Not supported: {}", e),
            Error::Connection(e) => write!(f, "Connection error: {}", e.message),
            Error::Query(e) => write!(f, "Query error: {}", e.message),
            Error::Config(e) => write!(f, "Configuration error: {}", e.message),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::Connection(e) => e
                .source
                .as_deref()
                .map(|err| err as &(dyn std::error::Error + 'static)),
            Error::Query(e) => e
                .source
                .as_deref()
                .map(|err| err as &(dyn std::error::Error + 'static)),
            Error::Config(e) => e
                .source
                .as_deref()
                .map(|err| err as &(dyn std::error::Error + 'static)),
            _ => None,
        }
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.function, self.message)
    }
}

impl fmt::Display for NotSupportedError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} on {}: {}", self.function, self.vendor, self.message)
    }
}

impl fmt::Display for ConnectionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl fmt::Display for QueryError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for ValidationError {}

impl std::error::Error for NotSupportedError {}

impl From<ValidationError> for Error {
    fn from(err: ValidationError) -> Self {
        Error::Validation(err)
    }
}

impl From<NotSupportedError> for Error {
    fn from(err: NotSupportedError) -> Self {
        Error::NotSupported(err)
    }
}

impl From<ConnectionError> for Error {
    fn from(err: ConnectionError) -> Self {
        Error::Connection(err)
    }
}

impl From<QueryError> for Error {
    fn from(err: QueryError) -> Self {
        Error::Query(err)
    }
}

impl From<ConfigError> for Error {
    fn from(err: ConfigError) -> Self {
        Error::Config(err)
    }
}

/// Result type alias for sqlfunc operations.
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn category_helpers() {
        let err = Error::validation(
            "Coalesce",
            ValidationErrorKind::TooFewArguments,
            "Coalesce must take at least two expressions",
        );
        assert!(err.is_validation());
        assert!(!err.is_not_supported());

        let err = Error::not_supported(
            "JSONSet",
            "oracle",
            NotSupportedKind::NotImplemented,
            "JSONSet is not implemented on Oracle",
        );
        assert!(err.is_not_supported());
        assert!(!err.is_validation());
    }

    #[test]
    fn display_messages() {
        let err = Error::validation(
            "Collate",
            ValidationErrorKind::InvalidCollation,
            "Invalid collation name: 'a b'.",
        );
        assert_eq!(
            err.to_string(),
            "Validation error: Collate: Invalid collation name: 'a b'."
        );

        let err = Error::not_supported(
            "JSONObject",
            "mysql",
            NotSupportedKind::MissingFeature,
            "JSONObject() is not supported on this database backend.",
        );
        assert_eq!(
            err.to_string(),
            "Not supported: JSONObject on mysql: JSONObject() is not supported on this database backend."
        );
    }

    #[test]
    fn query_error_keeps_sql() {
        let err = Error::Query(QueryError {
            kind: QueryErrorKind::Syntax,
            sql: Some("SELEC 1".to_string()),
            message: "near \"SELEC\": syntax error".to_string(),
            source: None,
        });
        assert_eq!(err.sql(), Some("SELEC 1"));
        assert!(std::error::Error::source(&err).is_none());
    }
}
