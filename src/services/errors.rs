use thiserror::Error;

/// Generic error type used by service layer functions.
///
/// Every variant carries a message fit to show to the user as is.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ServiceError {
    /// The acting session may not perform the operation.
    #[error("unauthorized")]
    Unauthorized,
    /// Requested resource was not found.
    #[error("not found")]
    NotFound,
    /// A required field is missing or holds an invalid value.
    #[error("{0}")]
    Form(String),
    /// An identifier that must be unique is already taken.
    #[error("{0}")]
    Conflict(String),
    /// A business rule forbids the operation.
    #[error("{0}")]
    Rule(String),
    /// An unexpected internal error occurred.
    #[error("internal error")]
    Internal,
}

/// Convenient alias for results returned from service functions.
pub type ServiceResult<T> = Result<T, ServiceError>;
