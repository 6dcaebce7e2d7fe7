//! Domain errors for Veraset

use thiserror::Error;

use crate::value_objects::{Branch, Degree, ParentSide};

/// Core domain errors
///
/// Mutation-time errors leave the relative collection untouched and are meant to be
/// shown to the user as a rejected action. `BranchMismatch` is a contract violation
/// inside the tree builder. Service errors are surfaced once and never retried
/// automatically.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum DomainError {
    #[error("A spouse has already been recorded")]
    DuplicateSpouse,

    #[error("Slot already occupied: {slot}")]
    SlotOccupied { slot: String },

    #[error("The {branch} side already holds {max} grandparents")]
    CapacityExceeded { branch: Branch, max: usize },

    #[error("No deceased relative with id {id} can take descendants here")]
    ParentNotFound { id: String },

    #[error("{side} anchor received {branch} data")]
    BranchMismatch { side: ParentSide, branch: Branch },

    #[error("{degree} relatives cannot be added: {reason}")]
    DegreeViolation { degree: Degree, reason: String },

    #[error("Person not found: {id}")]
    PersonNotFound { id: String },

    #[error("Invalid person: {field} - {reason}")]
    InvalidPerson { field: String, reason: String },

    #[error("{id} is recorded with descendants and cannot be marked alive")]
    LivingAncestor { id: String },

    #[error("Invalid estate value: {value}")]
    InvalidEstateValue { value: f64 },

    #[error("No heirs have been recorded")]
    EmptyTree,

    #[error("Calculation service unavailable: {reason}")]
    ServiceUnavailable { reason: String },

    #[error("Calculation service error{}: {message}", status.map(|s| format!(" ({s})")).unwrap_or_default())]
    ServiceError { status: Option<u16>, message: String },
}

impl DomainError {
    /// Whether the user may simply try the same submission again
    pub fn is_retryable(&self) -> bool {
        match self {
            DomainError::ServiceUnavailable { .. } => true,
            DomainError::ServiceError {
                status: Some(status),
                ..
            } => *status >= 500 || *status == 429,
            _ => false,
        }
    }

    /// Whether the error was raised by a rejected collection mutation
    pub fn is_rejected_mutation(&self) -> bool {
        matches!(
            self,
            DomainError::DuplicateSpouse
                | DomainError::SlotOccupied { .. }
                | DomainError::CapacityExceeded { .. }
                | DomainError::ParentNotFound { .. }
                | DomainError::DegreeViolation { .. }
                | DomainError::PersonNotFound { .. }
                | DomainError::InvalidPerson { .. }
                | DomainError::LivingAncestor { .. }
        )
    }

    /// Short error code for logging
    pub fn code(&self) -> &'static str {
        match self {
            DomainError::DuplicateSpouse => "duplicate_spouse",
            DomainError::SlotOccupied { .. } => "slot_occupied",
            DomainError::CapacityExceeded { .. } => "capacity_exceeded",
            DomainError::ParentNotFound { .. } => "parent_not_found",
            DomainError::BranchMismatch { .. } => "branch_mismatch",
            DomainError::DegreeViolation { .. } => "degree_violation",
            DomainError::PersonNotFound { .. } => "person_not_found",
            DomainError::InvalidPerson { .. } => "invalid_person",
            DomainError::LivingAncestor { .. } => "living_ancestor",
            DomainError::InvalidEstateValue { .. } => "invalid_estate_value",
            DomainError::EmptyTree => "empty_tree",
            DomainError::ServiceUnavailable { .. } => "service_unavailable",
            DomainError::ServiceError { .. } => "service_error",
        }
    }
}

/// Result type alias for domain operations
pub type DomainResult<T> = Result<T, DomainError>;
