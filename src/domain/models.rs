use super::errors::ScheduleError;
use serde::{Deserialize, Serialize};

/// One of the four required fields of the application form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FormField {
    FullName,
    Email,
    Phone,
    Amount,
}

impl FormField {
    /// All fields in display order.
    pub const ALL: [FormField; 4] = [
        FormField::FullName,
        FormField::Email,
        FormField::Phone,
        FormField::Amount,
    ];

    pub fn label(self) -> &'static str {
        match self {
            FormField::FullName => "Full name",
            FormField::Email => "Email",
            FormField::Phone => "Phone",
            FormField::Amount => "Loan amount",
        }
    }

    pub fn placeholder(self) -> &'static str {
        match self {
            FormField::FullName => "Ivan Ivanov",
            FormField::Email => "ivan@example.com",
            FormField::Phone => "+7 (999) 123-45-67",
            FormField::Amount => "100 000 ₽",
        }
    }

    /// The field after this one, wrapping around to the first.
    pub fn next(self) -> Self {
        match self {
            FormField::FullName => FormField::Email,
            FormField::Email => FormField::Phone,
            FormField::Phone => FormField::Amount,
            FormField::Amount => FormField::FullName,
        }
    }

    /// The field before this one, wrapping around to the last.
    pub fn previous(self) -> Self {
        match self {
            FormField::FullName => FormField::Amount,
            FormField::Email => FormField::FullName,
            FormField::Phone => FormField::Email,
            FormField::Amount => FormField::Phone,
        }
    }
}

/// The personal data a user submits for review.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ApplicationForm {
    pub full_name: String,
    pub email: String,
    pub phone: String,
    pub amount: String,
}

impl ApplicationForm {
    pub fn new(
        full_name: impl Into<String>,
        email: impl Into<String>,
        phone: impl Into<String>,
        amount: impl Into<String>,
    ) -> Self {
        Self {
            full_name: full_name.into(),
            email: email.into(),
            phone: phone.into(),
            amount: amount.into(),
        }
    }

    pub fn field(&self, field: FormField) -> &str {
        match field {
            FormField::FullName => &self.full_name,
            FormField::Email => &self.email,
            FormField::Phone => &self.phone,
            FormField::Amount => &self.amount,
        }
    }

    pub fn field_mut(&mut self, field: FormField) -> &mut String {
        match field {
            FormField::FullName => &mut self.full_name,
            FormField::Email => &mut self.email,
            FormField::Phone => &mut self.phone,
            FormField::Amount => &mut self.amount,
        }
    }

    /// Returns the fields that are empty, in display order.
    ///
    /// Only emptiness is checked: whitespace counts as content and no format
    /// validation is performed.
    ///
    /// # Examples
    ///
    /// ```
    /// use loanterm::domain::{ApplicationForm, FormField};
    ///
    /// let form = ApplicationForm::new("", "a@b.c", " ", "");
    /// assert_eq!(form.missing_fields(), vec![FormField::FullName, FormField::Amount]);
    /// ```
    pub fn missing_fields(&self) -> Vec<FormField> {
        FormField::ALL
            .into_iter()
            .filter(|field| self.field(*field).is_empty())
            .collect()
    }

    pub fn is_complete(&self) -> bool {
        self.missing_fields().is_empty()
    }
}

/// Where an application currently is in its review.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ApplicationStatus {
    #[default]
    Pending,
    Processing,
    Approved,
    Rejected,
}

impl ApplicationStatus {
    pub fn is_terminal(self) -> bool {
        matches!(self, ApplicationStatus::Approved | ApplicationStatus::Rejected)
    }

    pub fn label(self) -> &'static str {
        match self {
            ApplicationStatus::Pending => "Received",
            ApplicationStatus::Processing => "Processing",
            ApplicationStatus::Approved => "Approved",
            ApplicationStatus::Rejected => "Rejected",
        }
    }
}

impl std::fmt::Display for ApplicationStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// Outcome of the final review draw.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decision {
    Approved,
    Rejected,
}

impl From<Decision> for ApplicationStatus {
    fn from(decision: Decision) -> Self {
        match decision {
            Decision::Approved => ApplicationStatus::Approved,
            Decision::Rejected => ApplicationStatus::Rejected,
        }
    }
}

/// Timing and odds of the simulated review.
///
/// Thresholds are expressed as seconds remaining on the countdown, so the
/// defaults move to processing after 4 minutes and decide after 12.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ReviewSchedule {
    pub total_seconds: u32,
    pub processing_at: u32,
    pub decision_at: u32,
    pub approval_probability: f64,
}

impl Default for ReviewSchedule {
    fn default() -> Self {
        Self {
            total_seconds: 900,
            processing_at: 660,
            decision_at: 180,
            approval_probability: 0.7,
        }
    }
}

impl ReviewSchedule {
    /// Checks the ordering of thresholds and the probability range.
    ///
    /// Reports the first problem found.
    pub fn validate(&self) -> Result<(), ScheduleError> {
        if self.total_seconds == 0 {
            return Err(ScheduleError::ZeroTotal);
        }
        if self.processing_at >= self.total_seconds {
            return Err(ScheduleError::ProcessingNotBeforeEnd {
                processing_at: self.processing_at,
                total_seconds: self.total_seconds,
            });
        }
        if self.decision_at >= self.processing_at {
            return Err(ScheduleError::DecisionNotAfterProcessing {
                decision_at: self.decision_at,
                processing_at: self.processing_at,
            });
        }
        if !(0.0..=1.0).contains(&self.approval_probability) {
            return Err(ScheduleError::ProbabilityOutOfRange(self.approval_probability));
        }
        Ok(())
    }
}

/// The single tracked application's review state.
#[derive(Debug, Clone, PartialEq)]
pub struct ApplicationLifecycle {
    pub status: ApplicationStatus,
    pub time_remaining: u32,
    pub submitted: bool,
    total_seconds: u32,
}

impl ApplicationLifecycle {
    /// A fresh, unsubmitted lifecycle with a full countdown.
    pub fn new(total_seconds: u32) -> Self {
        Self {
            status: ApplicationStatus::Pending,
            time_remaining: total_seconds,
            submitted: false,
            total_seconds,
        }
    }

    pub fn total_seconds(&self) -> u32 {
        self.total_seconds
    }

    pub fn elapsed_seconds(&self) -> u32 {
        self.total_seconds.saturating_sub(self.time_remaining)
    }

    /// Share of the countdown already elapsed, in percent.
    ///
    /// # Examples
    ///
    /// ```
    /// use loanterm::domain::ApplicationLifecycle;
    ///
    /// let mut lifecycle = ApplicationLifecycle::new(900);
    /// assert_eq!(lifecycle.progress_percent(), 0.0);
    /// lifecycle.time_remaining = 450;
    /// assert_eq!(lifecycle.progress_percent(), 50.0);
    /// ```
    pub fn progress_percent(&self) -> f64 {
        if self.total_seconds == 0 {
            return 100.0;
        }
        let percent = self.elapsed_seconds() as f64 / self.total_seconds as f64 * 100.0;
        percent.clamp(0.0, 100.0)
    }

    /// Remaining time as `M:SS`.
    pub fn countdown(&self) -> String {
        format_countdown(self.time_remaining)
    }
}

impl Default for ApplicationLifecycle {
    fn default() -> Self {
        Self::new(ReviewSchedule::default().total_seconds)
    }
}

/// Formats seconds as minutes and zero-padded seconds.
///
/// # Examples
///
/// ```
/// use loanterm::domain::format_countdown;
///
/// assert_eq!(format_countdown(900), "15:00");
/// assert_eq!(format_countdown(65), "1:05");
/// assert_eq!(format_countdown(0), "0:00");
/// ```
pub fn format_countdown(seconds: u32) -> String {
    format!("{}:{:02}", seconds / 60, seconds % 60)
}
