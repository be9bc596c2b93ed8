//! # Service Error Types
//!
//! One error type for every engine operation, wrapping domain and storage
//! failures without losing which one happened.

use shelf_core::{CoreError, ErrorKind, ValidationError};
use shelf_store::StoreError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ServiceError {
    /// A business rule rejected the operation.
    #[error(transparent)]
    Core(#[from] CoreError),

    /// The products file could not be read or written.
    #[error(transparent)]
    Store(#[from] StoreError),
}

impl From<ValidationError> for ServiceError {
    fn from(err: ValidationError) -> Self {
        ServiceError::Core(err.into())
    }
}

impl ServiceError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            ServiceError::Core(err) => err.kind(),
            ServiceError::Store(err) => err.kind(),
        }
    }
}

/// Result type for engine operations.
pub type ServiceResult<T> = Result<T, ServiceError>;
