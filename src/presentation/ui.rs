use crate::application::{App, AppMode, MAX_NOTIFICATIONS, Screen};
use crate::domain::{ApplicationStatus, FormField, Severity, format_countdown};
use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Gauge, Paragraph, Wrap},
};

/// Height of the notification and embed row: two lines per kept
/// notification plus the borders.
const FEED_HEIGHT: u16 = MAX_NOTIFICATIONS as u16 * 2 + 2;

pub fn render_ui(f: &mut Frame, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(2),
            Constraint::Min(14),
            Constraint::Length(FEED_HEIGHT),
            Constraint::Length(3),
        ])
        .split(f.area());

    render_header(f, chunks[0]);
    match app.screen() {
        Screen::Form => render_form(f, app, chunks[1]),
        Screen::Review => render_review(f, app, chunks[1]),
    }

    let bottom = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(chunks[2]);
    render_notifications(f, app, bottom[0]);
    render_embed(f, app, bottom[1]);
    render_status_bar(f, app, chunks[3]);

    if matches!(app.mode, AppMode::Help { .. }) {
        render_help_popup(f, app.help_scroll);
    }
}

pub fn status_color(status: ApplicationStatus) -> Color {
    match status {
        ApplicationStatus::Pending => Color::Blue,
        ApplicationStatus::Processing => Color::Magenta,
        ApplicationStatus::Approved => Color::Green,
        ApplicationStatus::Rejected => Color::Red,
    }
}

fn severity_color(severity: Severity) -> Color {
    match severity {
        Severity::Success => Color::Green,
        Severity::Info => Color::Cyan,
        Severity::Error => Color::Red,
    }
}

fn render_header(f: &mut Frame, area: Rect) {
    let header = Paragraph::new(vec![
        Line::from(Span::styled(
            "Apply for a loan",
            Style::default().fg(Color::Magenta).add_modifier(Modifier::BOLD),
        )),
        Line::from(Span::styled(
            "Fill in the form and we will review your application in 12-15 minutes",
            Style::default().fg(Color::Gray),
        )),
    ])
    .alignment(Alignment::Center);
    f.render_widget(header, area);
}

fn render_form(f: &mut Frame, app: &App, area: Rect) {
    let block = Block::default()
        .borders(Borders::ALL)
        .title("Client questionnaire - all fields are required");
    let inner = block.inner(area);
    f.render_widget(block, area);

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Length(3),
            Constraint::Length(3),
            Constraint::Length(3),
            Constraint::Min(0),
        ])
        .split(inner);

    for (index, field) in FormField::ALL.into_iter().enumerate() {
        render_field(f, app, field, rows[index]);
    }

    let hint = Paragraph::new("Enter: send application | Tab/↓: next field | Shift+Tab/↑: previous field")
        .style(Style::default().fg(Color::DarkGray))
        .alignment(Alignment::Center);
    f.render_widget(hint, rows[4]);
}

/// The part of `value` that fits in `width` cells with the cursor visible.
///
/// Returns the visible text and the cursor column within it. The text
/// scrolls horizontally once the cursor passes the right edge.
pub fn field_window(value: &str, cursor: usize, width: usize) -> (String, usize) {
    if width == 0 {
        return (String::new(), 0);
    }
    let cursor = cursor.min(value.chars().count());
    let scroll = (cursor + 1).saturating_sub(width);
    let visible = value.chars().skip(scroll).take(width).collect();
    (visible, cursor - scroll)
}

fn render_field(f: &mut Frame, app: &App, field: FormField, area: Rect) {
    let focused = app.focus == field && matches!(app.mode, AppMode::Form);
    let value = app.draft.field(field);
    let width = usize::from(area.width.saturating_sub(2));
    let cursor = if focused { app.cursor_position } else { 0 };
    let (visible, column) = field_window(value, cursor, width);

    let content = if value.is_empty() {
        Span::styled(field.placeholder(), Style::default().fg(Color::DarkGray))
    } else {
        Span::raw(visible)
    };
    let border_style = if focused {
        Style::default().fg(Color::Yellow)
    } else {
        Style::default()
    };

    let input = Paragraph::new(Line::from(content)).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(border_style)
            .title(field.label()),
    );
    f.render_widget(input, area);

    if focused {
        let column = u16::try_from(column).unwrap_or(u16::MAX);
        let x = area
            .x
            .saturating_add(1)
            .saturating_add(column)
            .min(area.right().saturating_sub(2));
        f.set_cursor_position((x, area.y.saturating_add(1)));
    }
}

fn render_review(f: &mut Frame, app: &App, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(7),
            Constraint::Length(4),
            Constraint::Min(0),
        ])
        .split(area);

    render_countdown(f, app, chunks[0]);
    render_tracker(f, app, chunks[1]);
    render_review_footer(f, app, chunks[2]);
}

fn render_countdown(f: &mut Frame, app: &App, area: Rect) {
    let status = app.controller.status();
    let color = status_color(status);
    let remaining = app.controller.time_remaining();

    let block = Block::default()
        .borders(Borders::ALL)
        .title(Line::from(vec![
            Span::raw("Review time "),
            Span::styled(
                format!(" {} ", status.label()),
                Style::default().fg(Color::Black).bg(color).add_modifier(Modifier::BOLD),
            ),
        ]));
    let inner = block.inner(area);
    f.render_widget(block, area);

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(1), Constraint::Length(1), Constraint::Length(1), Constraint::Min(0)])
        .split(inner);

    let countdown = Paragraph::new(Span::styled(
        app.controller.lifecycle().countdown(),
        Style::default().fg(color).add_modifier(Modifier::BOLD),
    ))
    .alignment(Alignment::Center);
    f.render_widget(countdown, rows[0]);

    let caption = if remaining > 0 { "remaining" } else { "completed" };
    f.render_widget(
        Paragraph::new(caption)
            .style(Style::default().fg(Color::Gray))
            .alignment(Alignment::Center),
        rows[1],
    );

    let progress = app.controller.progress_percent();
    let gauge = Gauge::default()
        .gauge_style(Style::default().fg(color))
        .ratio((progress / 100.0).clamp(0.0, 1.0))
        .label(format!("Progress: {}%", progress.round() as u16));
    f.render_widget(gauge, rows[2]);
}

/// The three-step status tracker, e.g. `● Received ── ● Processing ── ○ Approved`.
pub fn tracker_line(status: ApplicationStatus) -> Line<'static> {
    let active = |on: bool, color: Color| {
        if on {
            Style::default().fg(color).add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(Color::DarkGray)
        }
    };
    let reached = |on: bool| if on { "● " } else { "○ " };

    let processing_reached = status != ApplicationStatus::Pending;
    let final_status = if status == ApplicationStatus::Rejected {
        ApplicationStatus::Rejected
    } else {
        ApplicationStatus::Approved
    };

    Line::from(vec![
        Span::styled(
            format!("{}{}", reached(true), ApplicationStatus::Pending.label()),
            active(status == ApplicationStatus::Pending, status_color(ApplicationStatus::Pending)),
        ),
        Span::styled(" ──── ", active(processing_reached, Color::Magenta)),
        Span::styled(
            format!("{}{}", reached(processing_reached), ApplicationStatus::Processing.label()),
            active(
                status == ApplicationStatus::Processing,
                status_color(ApplicationStatus::Processing),
            ),
        ),
        Span::styled(" ──── ", active(status.is_terminal(), status_color(final_status))),
        Span::styled(
            format!("{}{}", reached(status.is_terminal()), final_status.label()),
            active(status.is_terminal(), status_color(final_status)),
        ),
    ])
}

fn render_tracker(f: &mut Frame, app: &App, area: Rect) {
    let tracker = Paragraph::new(tracker_line(app.controller.status()))
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL).title("Application status"));
    f.render_widget(tracker, area);
}

fn render_review_footer(f: &mut Frame, app: &App, area: Rect) {
    let mut lines = vec![
        Line::from(Span::styled(
            format!("Applicant: {}", app.controller.form().full_name),
            Style::default().fg(Color::Gray),
        )),
        Line::from("We will notify you by email and SMS when the status of your application changes"),
    ];
    if app.controller.status().is_terminal() {
        lines.push(Line::from(Span::styled(
            "Press n or Enter to submit a new application",
            Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
        )));
    }

    let footer = Paragraph::new(lines)
        .wrap(Wrap { trim: true })
        .block(Block::default().borders(Borders::ALL).title("Notifications"));
    f.render_widget(footer, area);
}

fn render_notifications(f: &mut Frame, app: &App, area: Rect) {
    let mut lines = Vec::new();
    for notification in &app.notifications {
        let color = severity_color(notification.severity());
        lines.push(Line::from(Span::styled(
            notification.title(),
            Style::default().fg(color).add_modifier(Modifier::BOLD),
        )));
        lines.push(Line::from(Span::styled(
            format!("  {}", notification.description()),
            Style::default().fg(Color::Gray),
        )));
    }

    let feed = Paragraph::new(lines)
        .block(Block::default().borders(Borders::ALL).title("Recent events"));
    f.render_widget(feed, area);
}

fn render_embed(f: &mut Frame, app: &App, area: Rect) {
    let mut lines: Vec<Line> = app
        .embed_snippet()
        .lines()
        .map(|line| Line::from(Span::styled(line.to_string(), Style::default().fg(Color::Green))))
        .collect();
    lines.push(Line::from(Span::styled(
        "Ctrl+Y copies this code for an HTML block on your site",
        Style::default().fg(Color::DarkGray),
    )));

    let embed = Paragraph::new(lines)
        .block(Block::default().borders(Borders::ALL).title("Embed code"));
    f.render_widget(embed, area);
}

fn render_status_bar(f: &mut Frame, app: &App, area: Rect) {
    let text = if let Some(ref status) = app.status_message {
        status.clone()
    } else {
        match app.mode {
            AppMode::Form => "Type to fill the form | Enter: send | F1: help | Ctrl+Y: copy embed code | Ctrl+Q: quit".to_string(),
            AppMode::Review if app.controller.status().is_terminal() => {
                "n/Enter: new application | F1/?: help | Ctrl+Y: copy embed code | q: quit".to_string()
            }
            AppMode::Review => format!(
                "Reviewing - {} left | F1/?: help | Ctrl+Y: copy embed code | q: quit",
                format_countdown(app.controller.time_remaining())
            ),
            AppMode::Help { .. } => "↑↓/jk: scroll | PgUp/PgDn: fast scroll | Home: top | Esc/q: close help".to_string(),
        }
    };

    let bar = Paragraph::new(text)
        .block(Block::default().borders(Borders::ALL).title("Status"))
        .style(match app.mode {
            AppMode::Form => Style::default(),
            AppMode::Review => Style::default().fg(status_color(app.controller.status())),
            AppMode::Help { .. } => Style::default().fg(Color::Cyan),
        });
    f.render_widget(bar, area);
}

fn render_help_popup(f: &mut Frame, scroll: usize) {
    let area = f.area();
    let popup_area = Rect {
        x: area.width / 10,
        y: area.height / 10,
        width: area.width * 4 / 5,
        height: area.height * 4 / 5,
    };

    f.render_widget(Clear, popup_area);

    let help_lines: Vec<&str> = HELP_TEXT.lines().collect();
    let visible_height = popup_area.height.saturating_sub(2) as usize;

    let start_line = scroll.min(help_lines.len().saturating_sub(visible_height));
    let end_line = (start_line + visible_height).min(help_lines.len());

    let visible_text = help_lines[start_line..end_line].join("\n");

    let help_widget = Paragraph::new(visible_text)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(format!("loanterm help (Line {}/{})", start_line + 1, help_lines.len()))
                .style(Style::default().fg(Color::Cyan)),
        )
        .style(Style::default().fg(Color::White));

    f.render_widget(help_widget, popup_area);
}

const HELP_TEXT: &str = r#"LOANTERM - LOAN APPLICATION

=== HOW IT WORKS ===
1. Fill in all four fields: full name, email, phone, loan amount
2. Press Enter to send the application
3. The review takes 15 minutes:
   Received    from submission
   Processing  after 4 minutes
   Decision    after 12 minutes (approved or rejected)
4. Once decided, press n to start a new application

=== FORM ===
Tab / ↓         Next field
Shift+Tab / ↑   Previous field
← → Home End    Move the cursor
Backspace/Del   Delete characters
Enter           Send application

=== REVIEW ===
n / Enter       New application (after a decision)
q               Quit

=== EVERYWHERE ===
F1              Show this help
Ctrl+Y          Copy the embed code to the clipboard
Ctrl+C / Ctrl+Q Quit

=== HELP NAVIGATION ===
↑↓ or j/k       Scroll one line
Page Up/Down    Scroll five lines
Home            Jump to top
Esc/F1/?/q      Close this window"#;
