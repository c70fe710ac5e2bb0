//! User-facing events raised by the lifecycle controller.

use super::models::{Decision, FormField};

/// How a notification should be presented.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Success,
    Info,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notification {
    /// A complete form was submitted and the review started.
    Accepted,
    /// Submission refused because some fields were empty.
    ValidationFailed { missing: Vec<FormField> },
    /// The review moved from pending to processing.
    UnderReview,
    /// The review reached its final decision.
    Outcome(Decision),
}

impl Notification {
    pub fn severity(&self) -> Severity {
        match self {
            Notification::Accepted => Severity::Success,
            Notification::ValidationFailed { .. } => Severity::Error,
            Notification::UnderReview => Severity::Info,
            Notification::Outcome(Decision::Approved) => Severity::Success,
            Notification::Outcome(Decision::Rejected) => Severity::Error,
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            Notification::Accepted => "Application sent!",
            Notification::ValidationFailed { .. } => "Fill in all fields",
            Notification::UnderReview => "Your application is being processed",
            Notification::Outcome(Decision::Approved) => "Application approved!",
            Notification::Outcome(Decision::Rejected) => "Application rejected",
        }
    }

    pub fn description(&self) -> String {
        match self {
            Notification::Accepted => "We have started processing your application".to_string(),
            Notification::ValidationFailed { missing } => {
                let labels: Vec<&str> = missing.iter().map(|field| field.label()).collect();
                format!("All fields are required (missing: {})", labels.join(", "))
            }
            Notification::UnderReview => "We are checking your details".to_string(),
            Notification::Outcome(Decision::Approved) => {
                "We will contact you shortly".to_string()
            }
            Notification::Outcome(Decision::Rejected) => {
                "Unfortunately we cannot approve your application".to_string()
            }
        }
    }
}
