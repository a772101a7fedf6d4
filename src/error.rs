use thiserror::Error;

/// Errors surfaced to callers of the distance functions and the
/// streaming metric. Both kinds are caller contract violations.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum Error {
    /// Input dimensionalities disagree.
    #[error("shape error: {0}")]
    Shape(String),

    /// A parameter or selector is outside its accepted domain.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),
}

impl Error {
    pub fn shape(message: impl Into<String>) -> Self {
        Error::Shape(message.into())
    }

    pub fn invalid_argument(message: impl Into<String>) -> Self {
        Error::InvalidArgument(message.into())
    }
}

pub type Result<T> = std::result::Result<T, Error>;

#[cfg(feature = "extension-module")]
impl From<Error> for pyo3::PyErr {
    fn from(err: Error) -> Self {
        match err {
            Error::Shape(msg) => pyo3::exceptions::PyRuntimeError::new_err(msg),
            Error::InvalidArgument(msg) => pyo3::exceptions::PyValueError::new_err(msg),
        }
    }
}
