use std::fmt;

/// Custom error type for schema and data file operations, including specific error codes.
///
/// Each variant represents a distinct error condition with a unique error code for easier debugging
/// and error reporting on the console.
#[derive(Debug)]
pub enum Error {
    /// I/O-related error (e.g., opening the data file).
    /// Error code: 1000
    Io(std::io::Error),
    /// A user-supplied value could not be parsed (e.g., non-numeric cost).
    /// Error code: 3000
    Value(String),
    /// Schema-related error (e.g., malformed VARCHAR length).
    /// Error code: 5000
    Schema(String),
    /// Row serialization/deserialization error.
    /// Error code: 6000
    Serialization(String),
    /// Unrecognized menu option.
    /// Error code: 7000
    InvalidOption(String),
    /// Console input ended while a value was expected.
    /// Error code: 8000
    Input(String),
}

impl Error {
    /// Returns the error code associated with this error variant.
    ///
    /// # Examples
    /// ```
    /// let err = Error::Value("abc".to_string());
    /// assert_eq!(err.code(), 3000);
    /// ```
    pub fn code(&self) -> u32 {
        match self {
            Error::Io(_) => 1000,
            Error::Value(_) => 3000,
            Error::Schema(_) => 5000,
            Error::Serialization(_) => 6000,
            Error::InvalidOption(_) => 7000,
            Error::Input(_) => 8000,
        }
    }

    /// Returns a human-readable error category for this error variant.
    pub fn category(&self) -> &'static str {
        match self {
            Error::Io(_) => "I/O",
            Error::Value(_) => "Value",
            Error::Schema(_) => "Schema",
            Error::Serialization(_) => "Serialization",
            Error::InvalidOption(_) => "Invalid Option",
            Error::Input(_) => "Input",
        }
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Io(e) => write!(f, "[{}] I/O Error: {}", self.code(), e),
            Error::Value(msg) => write!(f, "[{}] Value Error: {}", self.code(), msg),
            Error::Schema(msg) => write!(f, "[{}] Schema Error: {}", self.code(), msg),
            Error::Serialization(msg) => {
                write!(f, "[{}] Serialization Error: {}", self.code(), msg)
            }
            Error::InvalidOption(msg) => write!(f, "[{}] Invalid Option: {}", self.code(), msg),
            Error::Input(msg) => write!(f, "[{}] Input Error: {}", self.code(), msg),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::Io(err) => Some(err),
            _ => None,
        }
    }
}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Error::Io(err)
    }
}

/// Convenience macro to create an `Error` with a formatted message.
///
/// # Examples
/// ```
/// let err = err!(Schema, "Missing VARCHAR length in '{}'", "VARCHAR");
/// assert_eq!(err.code(), 5000);
/// ```
#[macro_export]
macro_rules! err {
    ($variant:ident, $msg:expr) => {
        $crate::errors::Error::$variant($msg.to_string())
    };
    ($variant:ident, $fmt:expr, $($arg:tt)*) => {
        $crate::errors::Error::$variant(format!($fmt, $($arg)*))
    };
}
