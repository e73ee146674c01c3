use crate::utils::validation::FieldErrors;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum CatalogError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
    #[error("Book {0} not found")]
    NotFound(String),
    #[error("Book {0} is not available")]
    NotAvailable(String),
    #[error("Server responded with {status}: {message}")]
    Status { status: u16, message: String },
    #[error("Invalid base URL: {0}")]
    InvalidUrl(String),
    #[error("Configuration error: {0}")]
    Config(String),
    #[error("Validation failed: {0}")]
    Validation(FieldErrors),
}

impl CatalogError {
    /// Errors that mark a catalog boundary the user should see, as opposed
    /// to transport noise that only goes to the log.
    pub fn is_user_facing(&self) -> bool {
        matches!(
            self,
            CatalogError::NotFound(_) | CatalogError::NotAvailable(_) | CatalogError::Validation(_)
        )
    }
}

pub type Result<T> = std::result::Result<T, CatalogError>;
