use super::models::{ApplicationStatus, FormField};
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DomainError {
    #[error("required fields are empty: {}", field_labels(.missing))]
    Validation { missing: Vec<FormField> },
    #[error("cannot start a new application while the current one is {status}")]
    ResetNotAllowed { status: ApplicationStatus },
}

fn field_labels(fields: &[FormField]) -> String {
    fields
        .iter()
        .map(|field| field.label())
        .collect::<Vec<_>>()
        .join(", ")
}

pub type DomainResult<T> = Result<T, DomainError>;

/// A review schedule whose thresholds or odds cannot drive a review.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ScheduleError {
    #[error("total_seconds must be greater than zero")]
    ZeroTotal,
    #[error("processing_at ({processing_at}) must be below total_seconds ({total_seconds})")]
    ProcessingNotBeforeEnd { processing_at: u32, total_seconds: u32 },
    #[error("decision_at ({decision_at}) must be below processing_at ({processing_at})")]
    DecisionNotAfterProcessing { decision_at: u32, processing_at: u32 },
    #[error("approval_probability ({0}) must be within [0, 1]")]
    ProbabilityOutOfRange(f64),
}
