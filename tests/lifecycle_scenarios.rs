use loanterm::domain::{
    ApplicationForm, ApplicationStatus, Decision, FixedDecision, LifecycleController, Notification,
    ReviewSchedule,
};
use loanterm::infrastructure::RngDecision;

fn filled_form() -> ApplicationForm {
    ApplicationForm::new("Ivan Ivanov", "ivan@example.com", "+7 (999) 123-45-67", "100 000 ₽")
}

#[test]
fn submit_then_240_ticks_reaches_processing() {
    let mut controller = LifecycleController::new(
        ReviewSchedule::default(),
        Box::new(FixedDecision(Decision::Approved)),
    );
    controller.submit(filled_form()).unwrap();

    controller.advance(240);
    assert_eq!(controller.status(), ApplicationStatus::Processing);
    assert_eq!(controller.time_remaining(), 660);

    controller.advance(480);
    assert_eq!(controller.status(), ApplicationStatus::Approved);
    assert_eq!(controller.time_remaining(), 180);
}

#[test]
fn random_outcome_produces_both_decisions_across_runs() {
    let mut approved = 0;
    let mut rejected = 0;

    for seed in 0..200 {
        let mut controller =
            LifecycleController::new(ReviewSchedule::default(), Box::new(RngDecision::seeded(seed)));
        controller.submit(filled_form()).unwrap();
        controller.advance(720);
        match controller.status() {
            ApplicationStatus::Approved => approved += 1,
            ApplicationStatus::Rejected => rejected += 1,
            other => panic!("review not decided after 720 ticks: {other:?}"),
        }
    }

    assert!(approved > 0 && rejected > 0);
    assert!(approved > rejected);
}

#[test]
fn transitions_fire_once_when_thresholds_are_crossed() {
    let mut controller = LifecycleController::new(
        ReviewSchedule::default(),
        Box::new(FixedDecision(Decision::Rejected)),
    );
    controller.submit(filled_form()).unwrap();
    controller.take_notifications();

    let mut under_review_at = Vec::new();
    let mut decided_at = Vec::new();
    for _ in 0..1000 {
        let before = controller.time_remaining();
        controller.tick();
        for notification in controller.take_notifications() {
            match notification {
                Notification::UnderReview => under_review_at.push((before, controller.time_remaining())),
                Notification::Outcome(_) => decided_at.push((before, controller.time_remaining())),
                other => panic!("unexpected notification {other:?}"),
            }
        }
    }

    assert_eq!(under_review_at, vec![(661, 660)]);
    assert_eq!(decided_at, vec![(181, 180)]);
    assert_eq!(controller.time_remaining(), 0);
    assert_eq!(controller.status(), ApplicationStatus::Rejected);
}

#[test]
fn progress_tracks_countdown_in_ninths() {
    let mut controller = LifecycleController::new(
        ReviewSchedule::default(),
        Box::new(FixedDecision(Decision::Approved)),
    );
    controller.submit(filled_form()).unwrap();

    for _ in 0..900 {
        let expected = (900 - controller.time_remaining()) as f64 / 9.0;
        assert!((controller.progress_percent() - expected).abs() < 1e-9);
        controller.tick();
    }
    assert_eq!(controller.progress_percent(), 100.0);
}

#[test]
fn empty_full_name_leaves_state_unchanged() {
    let mut controller = LifecycleController::new(
        ReviewSchedule::default(),
        Box::new(FixedDecision(Decision::Approved)),
    );
    let mut form = filled_form();
    form.full_name.clear();

    assert!(controller.submit(form).is_err());
    assert_eq!(controller.status(), ApplicationStatus::Pending);
    assert_eq!(controller.time_remaining(), 900);
    assert!(!controller.is_submitted());
    assert!(matches!(
        controller.take_notifications().as_slice(),
        [Notification::ValidationFailed { .. }]
    ));
}

#[test]
fn full_cycle_twice_with_reset() {
    let mut controller = LifecycleController::new(
        ReviewSchedule::default(),
        Box::new(FixedDecision(Decision::Approved)),
    );

    for _ in 0..2 {
        controller.submit(filled_form()).unwrap();
        controller.advance(900);
        assert_eq!(controller.status(), ApplicationStatus::Approved);
        controller.reset().unwrap();
        assert_eq!(controller.status(), ApplicationStatus::Pending);
        assert_eq!(controller.time_remaining(), 900);
        assert!(!controller.is_submitted());
    }
}
