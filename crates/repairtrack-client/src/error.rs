use repairtrack_shared::{ServiceOrder, ValidationError};
use repairtrack_store::StoreError;
use thiserror::Error;
use uuid::Uuid;

/// Failure reported by an external collaborator (persistence or object
/// storage).
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum BackendError {
    #[error("Record not found: {0}")]
    NotFound(String),

    #[error("Request rejected: {0}")]
    Rejected(String),

    #[error("Backend unavailable: {0}")]
    Unavailable(String),
}

impl From<StoreError> for BackendError {
    fn from(e: StoreError) -> Self {
        match e {
            StoreError::NotFound => BackendError::NotFound(e.to_string()),
            StoreError::ImageTooLarge { .. }
            | StoreError::EmptyImage
            | StoreError::InvalidImageName(_) => BackendError::Rejected(e.to_string()),
            other => BackendError::Unavailable(other.to_string()),
        }
    }
}

/// Outcome of a failed lifecycle operation. In-memory state is untouched
/// whenever one of these is returned.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Validation failed: {0}")]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    Backend(#[from] BackendError),

    #[error("Provider {provider_id} still has {} service order(s)", orders.len())]
    HasDependents {
        provider_id: Uuid,
        orders: Vec<ServiceOrder>,
    },

    #[error("Unknown service order: {0}")]
    UnknownOrder(Uuid),

    #[error("Unknown service provider: {0}")]
    UnknownProvider(Uuid),

    #[error("Image {name} rejected: {reason}")]
    ImageRejected { name: String, reason: String },

    #[error("None of the {0} image(s) could be uploaded")]
    NoImagesUploaded(usize),
}

pub type AppResult<T> = std::result::Result<T, AppError>;
