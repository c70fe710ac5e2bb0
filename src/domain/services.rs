//! The application lifecycle controller.
//!
//! This module owns the review state machine: submission, the per-second
//! countdown, the two threshold transitions and the reset back to an empty
//! form. It performs no rendering and no I/O; elapsed time is fed in through
//! [`LifecycleController::tick`] and [`LifecycleController::advance`], and the
//! final outcome comes from an injected [`DecisionSource`].

use super::errors::{DomainError, DomainResult};
use super::models::{ApplicationForm, ApplicationLifecycle, ApplicationStatus, Decision, ReviewSchedule};
use super::notifications::Notification;
use std::collections::VecDeque;
use tracing::{debug, info, warn};

/// Supplies the random approve/reject draw at the end of a review.
pub trait DecisionSource: std::fmt::Debug {
    /// Returns `true` to approve. Called once per review with the configured
    /// approval probability.
    fn approve(&mut self, approval_probability: f64) -> bool;
}

/// Always returns the same decision.
#[derive(Debug, Clone, Copy)]
pub struct FixedDecision(pub Decision);

impl DecisionSource for FixedDecision {
    fn approve(&mut self, _approval_probability: f64) -> bool {
        self.0 == Decision::Approved
    }
}

/// Replays a fixed sequence of decisions, one per review.
///
/// Once the sequence is exhausted every further review is rejected.
#[derive(Debug, Clone, Default)]
pub struct ScriptedDecisions {
    queue: VecDeque<Decision>,
}

impl ScriptedDecisions {
    pub fn new(decisions: impl IntoIterator<Item = Decision>) -> Self {
        Self {
            queue: decisions.into_iter().collect(),
        }
    }
}

impl DecisionSource for ScriptedDecisions {
    fn approve(&mut self, _approval_probability: f64) -> bool {
        self.queue.pop_front() == Some(Decision::Approved)
    }
}

/// Drives one application through pending, processing and a final decision.
///
/// # Examples
///
/// ```
/// use loanterm::domain::{
///     ApplicationForm, ApplicationStatus, Decision, FixedDecision, LifecycleController,
///     ReviewSchedule,
/// };
///
/// let mut controller =
///     LifecycleController::new(ReviewSchedule::default(), Box::new(FixedDecision(Decision::Approved)));
/// controller
///     .submit(ApplicationForm::new("Ivan", "ivan@example.com", "+7", "100000"))
///     .unwrap();
///
/// controller.advance(240);
/// assert_eq!(controller.status(), ApplicationStatus::Processing);
///
/// controller.advance(480);
/// assert_eq!(controller.status(), ApplicationStatus::Approved);
/// ```
#[derive(Debug)]
pub struct LifecycleController {
    lifecycle: ApplicationLifecycle,
    form: ApplicationForm,
    schedule: ReviewSchedule,
    decisions: Box<dyn DecisionSource>,
    outbox: Vec<Notification>,
}

impl LifecycleController {
    pub fn new(schedule: ReviewSchedule, decisions: Box<dyn DecisionSource>) -> Self {
        Self {
            lifecycle: ApplicationLifecycle::new(schedule.total_seconds),
            form: ApplicationForm::default(),
            schedule,
            decisions,
            outbox: Vec::new(),
        }
    }

    pub fn lifecycle(&self) -> &ApplicationLifecycle {
        &self.lifecycle
    }

    pub fn status(&self) -> ApplicationStatus {
        self.lifecycle.status
    }

    pub fn time_remaining(&self) -> u32 {
        self.lifecycle.time_remaining
    }

    pub fn is_submitted(&self) -> bool {
        self.lifecycle.submitted
    }

    pub fn progress_percent(&self) -> f64 {
        self.lifecycle.progress_percent()
    }

    /// The form stored by the last successful submission.
    pub fn form(&self) -> &ApplicationForm {
        &self.form
    }

    pub fn schedule(&self) -> &ReviewSchedule {
        &self.schedule
    }

    /// Submits a form and starts the review.
    ///
    /// Every field must be non-empty. On success the lifecycle restarts at
    /// pending with a full countdown and an [`Notification::Accepted`] is
    /// queued. On failure nothing changes except a queued
    /// [`Notification::ValidationFailed`].
    ///
    /// # Errors
    ///
    /// Returns [`DomainError::Validation`] naming the empty fields.
    pub fn submit(&mut self, form: ApplicationForm) -> DomainResult<()> {
        let missing = form.missing_fields();
        if !missing.is_empty() {
            warn!(?missing, "application rejected by validation");
            self.outbox.push(Notification::ValidationFailed {
                missing: missing.clone(),
            });
            return Err(DomainError::Validation { missing });
        }

        self.form = form;
        self.lifecycle = ApplicationLifecycle::new(self.schedule.total_seconds);
        self.lifecycle.submitted = true;
        info!(
            total_seconds = self.schedule.total_seconds,
            "application submitted, review started"
        );
        self.outbox.push(Notification::Accepted);
        Ok(())
    }

    /// Advances the countdown by one second and applies any due transition.
    ///
    /// Does nothing until an application has been submitted. The countdown
    /// stops at zero. Returns the new status when this tick changed it.
    pub fn tick(&mut self) -> Option<ApplicationStatus> {
        if !self.lifecycle.submitted {
            return None;
        }

        self.lifecycle.time_remaining = self.lifecycle.time_remaining.saturating_sub(1);
        self.apply_transitions()
    }

    /// Applies `seconds` ticks in a row, returning every status reached.
    pub fn advance(&mut self, seconds: u32) -> Vec<ApplicationStatus> {
        let transitions: Vec<ApplicationStatus> = (0..seconds).filter_map(|_| self.tick()).collect();
        debug!(
            seconds,
            time_remaining = self.lifecycle.time_remaining,
            "advanced review countdown"
        );
        transitions
    }

    /// Both checks are guarded by the current status, so each fires at most
    /// once per lifecycle even though the thresholds stay satisfied.
    fn apply_transitions(&mut self) -> Option<ApplicationStatus> {
        let before = self.lifecycle.status;
        let remaining = self.lifecycle.time_remaining;

        if self.lifecycle.status == ApplicationStatus::Pending && remaining <= self.schedule.processing_at {
            self.lifecycle.status = ApplicationStatus::Processing;
            info!(time_remaining = remaining, "application moved to processing");
            self.outbox.push(Notification::UnderReview);
        }

        if self.lifecycle.status == ApplicationStatus::Processing && remaining <= self.schedule.decision_at {
            let decision = if self.decisions.approve(self.schedule.approval_probability) {
                Decision::Approved
            } else {
                Decision::Rejected
            };
            self.lifecycle.status = decision.into();
            info!(?decision, time_remaining = remaining, "review decided");
            self.outbox.push(Notification::Outcome(decision));
        }

        (self.lifecycle.status != before).then_some(self.lifecycle.status)
    }

    /// Returns to the initial unsubmitted state after a final decision.
    ///
    /// Clears the stored form and restores the full countdown.
    ///
    /// # Errors
    ///
    /// Returns [`DomainError::ResetNotAllowed`] while the review is still
    /// pending or processing; the state is left untouched.
    pub fn reset(&mut self) -> DomainResult<()> {
        let status = self.lifecycle.status;
        if !status.is_terminal() {
            warn!(%status, "reset refused before a decision");
            return Err(DomainError::ResetNotAllowed { status });
        }

        self.lifecycle = ApplicationLifecycle::new(self.schedule.total_seconds);
        self.form = ApplicationForm::default();
        info!("application reset");
        Ok(())
    }

    /// Drains queued notifications in the order they were raised.
    pub fn take_notifications(&mut self) -> Vec<Notification> {
        std::mem::take(&mut self.outbox)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn filled_form() -> ApplicationForm {
        ApplicationForm::new("Ivan Ivanov", "ivan@example.com", "+7 (999) 123-45-67", "100 000")
    }

    fn controller_with(decision: Decision) -> LifecycleController {
        LifecycleController::new(ReviewSchedule::default(), Box::new(FixedDecision(decision)))
    }

    fn submitted(decision: Decision) -> LifecycleController {
        let mut controller = controller_with(decision);
        controller.submit(filled_form()).unwrap();
        controller.take_notifications();
        controller
    }

    #[test]
    fn test_initial_state() {
        let controller = controller_with(Decision::Approved);
        assert_eq!(controller.status(), ApplicationStatus::Pending);
        assert_eq!(controller.time_remaining(), 900);
        assert!(!controller.is_submitted());
        assert_eq!(controller.progress_percent(), 0.0);
    }

    #[test]
    fn test_submit_starts_review() {
        let mut controller = controller_with(Decision::Approved);
        assert!(controller.submit(filled_form()).is_ok());
        assert_eq!(controller.status(), ApplicationStatus::Pending);
        assert_eq!(controller.time_remaining(), 900);
        assert!(controller.is_submitted());
        assert_eq!(controller.form(), &filled_form());
        assert_eq!(controller.take_notifications(), vec![Notification::Accepted]);
    }

    #[test]
    fn test_submit_with_each_empty_field_changes_nothing() {
        for field in crate::domain::FormField::ALL {
            let mut controller = controller_with(Decision::Approved);
            let mut form = filled_form();
            form.field_mut(field).clear();

            let err = controller.submit(form).unwrap_err();
            assert_eq!(err, DomainError::Validation { missing: vec![field] });
            assert_eq!(controller.status(), ApplicationStatus::Pending);
            assert_eq!(controller.time_remaining(), 900);
            assert!(!controller.is_submitted());
            assert_eq!(
                controller.take_notifications(),
                vec![Notification::ValidationFailed { missing: vec![field] }]
            );
        }
    }

    #[test]
    fn test_failed_submit_during_review_keeps_progress() {
        let mut controller = submitted(Decision::Approved);
        controller.advance(300);
        let before = controller.lifecycle().clone();

        assert!(controller.submit(ApplicationForm::default()).is_err());
        assert_eq!(controller.lifecycle(), &before);
        assert_eq!(controller.form(), &filled_form());
    }

    #[test]
    fn test_tick_is_noop_before_submission() {
        let mut controller = controller_with(Decision::Approved);
        assert_eq!(controller.tick(), None);
        controller.advance(1000);
        assert_eq!(controller.time_remaining(), 900);
        assert_eq!(controller.status(), ApplicationStatus::Pending);
    }

    #[test]
    fn test_processing_fires_exactly_at_threshold() {
        let mut controller = submitted(Decision::Approved);
        controller.advance(239);
        assert_eq!(controller.time_remaining(), 661);
        assert_eq!(controller.status(), ApplicationStatus::Pending);

        assert_eq!(controller.tick(), Some(ApplicationStatus::Processing));
        assert_eq!(controller.time_remaining(), 660);
        assert_eq!(controller.take_notifications(), vec![Notification::UnderReview]);

        assert_eq!(controller.tick(), None);
        assert!(controller.take_notifications().is_empty());
    }

    #[test]
    fn test_decision_fires_exactly_at_threshold() {
        let mut controller = submitted(Decision::Rejected);
        controller.advance(719);
        assert_eq!(controller.time_remaining(), 181);
        assert_eq!(controller.status(), ApplicationStatus::Processing);
        controller.take_notifications();

        assert_eq!(controller.tick(), Some(ApplicationStatus::Rejected));
        assert_eq!(
            controller.take_notifications(),
            vec![Notification::Outcome(Decision::Rejected)]
        );

        controller.advance(10);
        assert_eq!(controller.status(), ApplicationStatus::Rejected);
        assert!(controller.take_notifications().is_empty());
    }

    #[test]
    fn test_countdown_floors_at_zero() {
        let mut controller = submitted(Decision::Approved);
        controller.advance(900);
        assert_eq!(controller.time_remaining(), 0);
        assert_eq!(controller.progress_percent(), 100.0);

        assert_eq!(controller.tick(), None);
        assert_eq!(controller.time_remaining(), 0);
        assert_eq!(controller.status(), ApplicationStatus::Approved);
    }

    #[test]
    fn test_advance_reports_transitions_in_order() {
        let mut controller = submitted(Decision::Approved);
        let transitions = controller.advance(900);
        assert_eq!(
            transitions,
            vec![ApplicationStatus::Processing, ApplicationStatus::Approved]
        );
    }

    #[test]
    fn test_each_review_draws_once() {
        let mut controller = LifecycleController::new(
            ReviewSchedule::default(),
            Box::new(ScriptedDecisions::new([Decision::Rejected, Decision::Approved])),
        );

        controller.submit(filled_form()).unwrap();
        controller.advance(900);
        assert_eq!(controller.status(), ApplicationStatus::Rejected);

        controller.reset().unwrap();
        controller.submit(filled_form()).unwrap();
        controller.advance(900);
        assert_eq!(controller.status(), ApplicationStatus::Approved);
    }

    #[test]
    fn test_same_tick_crossing_both_thresholds_reaches_decision() {
        let schedule = ReviewSchedule {
            total_seconds: 3,
            processing_at: 2,
            decision_at: 1,
            approval_probability: 0.7,
        };
        let mut controller = LifecycleController::new(schedule, Box::new(FixedDecision(Decision::Approved)));
        controller.submit(filled_form()).unwrap();
        controller.lifecycle.time_remaining = 2;

        assert_eq!(controller.tick(), Some(ApplicationStatus::Approved));
        let notifications = controller.take_notifications();
        assert_eq!(
            notifications,
            vec![
                Notification::Accepted,
                Notification::UnderReview,
                Notification::Outcome(Decision::Approved)
            ]
        );
    }

    #[test]
    fn test_reset_refused_before_decision() {
        let mut controller = controller_with(Decision::Approved);
        assert_eq!(
            controller.reset(),
            Err(DomainError::ResetNotAllowed { status: ApplicationStatus::Pending })
        );

        controller.submit(filled_form()).unwrap();
        controller.advance(400);
        let before = controller.lifecycle().clone();
        assert_eq!(
            controller.reset(),
            Err(DomainError::ResetNotAllowed { status: ApplicationStatus::Processing })
        );
        assert_eq!(controller.lifecycle(), &before);
    }

    #[test]
    fn test_reset_from_terminal_restores_initial_state() {
        for decision in [Decision::Approved, Decision::Rejected] {
            let mut controller = submitted(decision);
            controller.advance(750);
            assert_eq!(controller.status(), ApplicationStatus::from(decision));
            controller.take_notifications();

            controller.reset().unwrap();
            assert_eq!(controller.lifecycle(), &ApplicationLifecycle::new(900));
            assert_eq!(controller.form(), &ApplicationForm::default());
            assert_eq!(controller.progress_percent(), 0.0);
            assert!(controller.take_notifications().is_empty());
        }
    }

    #[test]
    fn test_scripted_decisions_reject_when_exhausted() {
        let mut source = ScriptedDecisions::new([Decision::Approved]);
        assert!(source.approve(0.7));
        assert!(!source.approve(0.7));
    }
}
