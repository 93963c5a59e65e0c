//! Application layer for the Brewery service
//!
//! This crate orchestrates domain logic and coordinates between layers.
//!
//! ## Architecture
//!
//! The application layer sits between the domain and infrastructure layers.
//! It owns the wire representation of a beer, the mapping between that and
//! the persisted entity, and the port the stores implement.
//!
//! ## Modules
//!
//! - `dto` - Data transfer objects for the API layer
//! - `mappers` - Entity/DTO transforms
//! - `services` - Use case orchestration (`BeerService`) and the repository port

pub mod dto;
pub mod mappers;
pub mod services;

// Re-export commonly used types
pub use dto::BeerDto;
pub use mappers::BeerMapper;
pub use services::{BeerRepositoryPort, BeerService, ServiceContext};

use brewery_domain::DomainError;
use thiserror::Error;

/// Application-level errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ApplicationError {
    /// Resource not found
    #[error("Resource not found: {0}")]
    NotFound(String),

    /// Structural validation errors
    #[error("Validation failed: {0}")]
    ValidationFailed(String),

    /// A stored value has no counterpart in a closed wire enumeration
    #[error("Cannot map {field} value '{value}'")]
    UnmappableEnum { field: String, value: String },

    /// The store could not be reached or failed
    #[error("Storage unavailable: {0}")]
    StorageUnavailable(String),

    /// Internal server error
    #[error("Internal error: {0}")]
    Internal(String),
}

impl ApplicationError {
    /// Get HTTP status code for this error
    pub fn http_status(&self) -> u16 {
        match self {
            ApplicationError::NotFound(_) => 404,
            ApplicationError::ValidationFailed(_) => 400,
            ApplicationError::UnmappableEnum { .. } => 400,
            ApplicationError::StorageUnavailable(_) => 503,
            ApplicationError::Internal(_) => 500,
        }
    }

    /// Check if the caller may retry later. Nothing in this crate retries.
    pub fn is_retryable(&self) -> bool {
        matches!(self, ApplicationError::StorageUnavailable(_))
    }

    /// Get error code for API responses
    pub fn error_code(&self) -> &'static str {
        match self {
            ApplicationError::NotFound(_) => "NOT_FOUND",
            ApplicationError::ValidationFailed(_) => "VALIDATION_FAILED",
            ApplicationError::UnmappableEnum { .. } => "UNMAPPABLE_ENUM",
            ApplicationError::StorageUnavailable(_) => "STORAGE_UNAVAILABLE",
            ApplicationError::Internal(_) => "INTERNAL_ERROR",
        }
    }

    /// Build a `NotFound` for a beer id
    pub fn beer_not_found(id: impl std::fmt::Display) -> Self {
        ApplicationError::NotFound(format!("Beer {} not found", id))
    }
}

impl From<DomainError> for ApplicationError {
    fn from(err: DomainError) -> Self {
        match err {
            DomainError::UnknownBeerStyle(value) => ApplicationError::UnmappableEnum {
                field: "beerStyle".to_string(),
                value,
            },
        }
    }
}

impl From<validator::ValidationErrors> for ApplicationError {
    fn from(errors: validator::ValidationErrors) -> Self {
        let mut messages: Vec<String> = errors
            .field_errors()
            .into_iter()
            .flat_map(|(field, errs)| {
                errs.iter().map(move |e| match &e.message {
                    Some(msg) => format!("{}: {}", field, msg),
                    None => format!("{}: {}", field, e.code),
                })
            })
            .collect();
        messages.sort();
        ApplicationError::ValidationFailed(messages.join("; "))
    }
}

pub type ApplicationResult<T> = Result<T, ApplicationError>;
