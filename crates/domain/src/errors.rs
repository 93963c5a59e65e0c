//! Error types for the brewery domain.

/// Domain-level errors
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DomainError {
    /// Style text outside the closed `BeerStyle` enumeration
    #[error("Unknown beer style: {0}")]
    UnknownBeerStyle(String),
}

/// Domain result type
pub type DomainResult<T> = Result<T, DomainError>;
