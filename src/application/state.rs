//! Application state management for the loan application terminal.
//!
//! This module contains the main application state and mode management
//! for the terminal user interface. It owns the lifecycle controller and
//! forwards user actions to it; the presentation layer only reads from here.

use crate::domain::{
    ApplicationForm, DecisionSource, DomainError, FormField, LifecycleController, Notification,
    ReviewSchedule,
};
use std::collections::VecDeque;
use tracing::debug;

/// Number of notifications kept for display.
pub const MAX_NOTIFICATIONS: usize = 5;

/// Represents the current screen of the application.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppMode {
    /// No application submitted yet - the user is filling in the form
    Form,
    /// An application is under review or has been decided
    Review,
    /// Help popup is displayed over the screen it was opened from
    Help { return_to: Screen },
}

/// The screen underneath the help popup.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Screen {
    Form,
    Review,
}

/// Main application state containing the controller and UI state.
///
/// # Examples
///
/// ```
/// use loanterm::application::{App, AppMode};
/// use loanterm::domain::{Decision, FixedDecision, ReviewSchedule};
///
/// let app = App::new(
///     ReviewSchedule::default(),
///     Box::new(FixedDecision(Decision::Approved)),
///     "https://loans.example/apply",
/// );
/// assert_eq!(app.mode, AppMode::Form);
/// assert!(!app.is_ticking());
/// ```
#[derive(Debug)]
pub struct App {
    /// Review state machine for the single tracked application
    pub controller: LifecycleController,
    /// Form contents as currently typed
    pub draft: ApplicationForm,
    /// Field receiving keystrokes
    pub focus: FormField,
    /// Cursor position within the focused field, in characters
    pub cursor_position: usize,
    /// Current application mode
    pub mode: AppMode,
    /// Most recent notifications, newest first
    pub notifications: VecDeque<Notification>,
    /// Temporary status message to display
    pub status_message: Option<String>,
    /// Scroll position in help text
    pub help_scroll: usize,
    /// Address shown in the embed snippet
    pub page_url: String,
}

impl App {
    pub fn new(
        schedule: ReviewSchedule,
        decisions: Box<dyn DecisionSource>,
        page_url: impl Into<String>,
    ) -> Self {
        Self {
            controller: LifecycleController::new(schedule, decisions),
            draft: ApplicationForm::default(),
            focus: FormField::FullName,
            cursor_position: 0,
            mode: AppMode::Form,
            notifications: VecDeque::new(),
            status_message: None,
            help_scroll: 0,
            page_url: page_url.into(),
        }
    }

    /// Whether the countdown should be receiving ticks.
    pub fn is_ticking(&self) -> bool {
        self.controller.is_submitted()
    }

    /// The screen shown when no popup is open.
    pub fn screen(&self) -> Screen {
        match self.mode {
            AppMode::Form => Screen::Form,
            AppMode::Review => Screen::Review,
            AppMode::Help { return_to } => return_to,
        }
    }

    /// Text of the focused field.
    pub fn focused_input(&self) -> &str {
        self.draft.field(self.focus)
    }

    fn focused_len(&self) -> usize {
        self.focused_input().chars().count()
    }

    fn byte_index(&self, char_index: usize) -> usize {
        self.focused_input()
            .char_indices()
            .nth(char_index)
            .map(|(index, _)| index)
            .unwrap_or_else(|| self.focused_input().len())
    }

    /// Inserts a character at the cursor in the focused field.
    pub fn insert_char(&mut self, c: char) {
        let index = self.byte_index(self.cursor_position);
        self.draft.field_mut(self.focus).insert(index, c);
        self.cursor_position += 1;
    }

    /// Removes the character before the cursor.
    pub fn backspace(&mut self) {
        if self.cursor_position > 0 {
            self.cursor_position -= 1;
            let index = self.byte_index(self.cursor_position);
            self.draft.field_mut(self.focus).remove(index);
        }
    }

    /// Removes the character under the cursor.
    pub fn delete(&mut self) {
        if self.cursor_position < self.focused_len() {
            let index = self.byte_index(self.cursor_position);
            self.draft.field_mut(self.focus).remove(index);
        }
    }

    pub fn move_cursor_left(&mut self) {
        self.cursor_position = self.cursor_position.saturating_sub(1);
    }

    pub fn move_cursor_right(&mut self) {
        if self.cursor_position < self.focused_len() {
            self.cursor_position += 1;
        }
    }

    pub fn move_cursor_home(&mut self) {
        self.cursor_position = 0;
    }

    pub fn move_cursor_end(&mut self) {
        self.cursor_position = self.focused_len();
    }

    /// Moves focus to the next field, placing the cursor at its end.
    pub fn focus_next(&mut self) {
        self.focus = self.focus.next();
        self.move_cursor_end();
    }

    /// Moves focus to the previous field, placing the cursor at its end.
    pub fn focus_previous(&mut self) {
        self.focus = self.focus.previous();
        self.move_cursor_end();
    }

    /// Submits the draft form to the controller.
    ///
    /// Switches to the review screen when the form is accepted. An incomplete
    /// form stays on screen with focus moved to the first empty field.
    pub fn submit_form(&mut self) {
        self.status_message = None;
        match self.controller.submit(self.draft.clone()) {
            Ok(()) => {
                self.mode = AppMode::Review;
            }
            Err(DomainError::Validation { missing }) => {
                if let Some(first) = missing.first() {
                    self.focus = *first;
                    self.move_cursor_end();
                }
            }
            Err(err) => {
                self.status_message = Some(err.to_string());
            }
        }
        self.collect_notifications();
    }

    /// Feeds elapsed whole seconds to the controller.
    ///
    /// A decision clears any pending status message so the status bar can
    /// offer a new application.
    pub fn advance(&mut self, seconds: u32) {
        if seconds == 0 {
            return;
        }
        let transitions = self.controller.advance(seconds);
        if !transitions.is_empty() {
            debug!(?transitions, "status changed");
        }
        if transitions.iter().any(|status| status.is_terminal()) {
            self.status_message = None;
        }
        self.collect_notifications();
    }

    /// Starts over with an empty form once the review has been decided.
    ///
    /// While the review is still running this only sets a status message.
    pub fn start_new_application(&mut self) {
        match self.controller.reset() {
            Ok(()) => {
                self.draft = ApplicationForm::default();
                self.focus = FormField::FullName;
                self.cursor_position = 0;
                self.mode = AppMode::Form;
                self.status_message = None;
            }
            Err(err) => {
                self.status_message = Some(format!("Please wait: {}", err));
            }
        }
    }

    fn collect_notifications(&mut self) {
        for notification in self.controller.take_notifications() {
            self.notifications.push_front(notification);
        }
        self.notifications.truncate(MAX_NOTIFICATIONS);
    }

    /// The iframe snippet for embedding this page elsewhere.
    ///
    /// # Examples
    ///
    /// ```
    /// use loanterm::application::App;
    /// use loanterm::domain::{Decision, FixedDecision, ReviewSchedule};
    ///
    /// let app = App::new(
    ///     ReviewSchedule::default(),
    ///     Box::new(FixedDecision(Decision::Rejected)),
    ///     "https://loans.example/apply",
    /// );
    /// assert!(app.embed_snippet().starts_with("<iframe src=\"https://loans.example/apply\""));
    /// ```
    pub fn embed_snippet(&self) -> String {
        format!(
            "<iframe src=\"{}\" \n  width=\"100%\" \n  height=\"1200\" \n  frameborder=\"0\">\n</iframe>",
            self.page_url
        )
    }

    /// Processes the result of copying the embed snippet.
    pub fn set_copy_result<E: std::fmt::Display>(&mut self, result: Result<(), E>) {
        self.status_message = Some(match result {
            Ok(()) => "Embed code copied to clipboard".to_string(),
            Err(error) => format!("Copy failed: {}", error),
        });
    }

    pub fn open_help(&mut self) {
        if !matches!(self.mode, AppMode::Help { .. }) {
            self.mode = AppMode::Help {
                return_to: self.screen(),
            };
            self.help_scroll = 0;
        }
    }

    pub fn close_help(&mut self) {
        self.mode = match self.screen() {
            Screen::Form => AppMode::Form,
            Screen::Review => AppMode::Review,
        };
    }
}
