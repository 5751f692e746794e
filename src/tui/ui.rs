//! Rendering for the timer screen.

use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders, List, ListItem, Paragraph};

use crate::output::format_minutes;
use crate::session::TimerState;
use crate::storage::SessionStore;
use crate::tui::app::{App, StatusKind};

/// Render the whole screen.
pub fn render<S: SessionStore>(frame: &mut Frame<'_>, app: &App<S>) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(7),
            Constraint::Length(3),
            Constraint::Min(4),
            Constraint::Length(1),
            Constraint::Length(1),
        ])
        .split(frame.area());

    render_timer(frame, app, chunks[0]);
    render_stats(frame, app, chunks[1]);
    render_recent(frame, app, chunks[2]);
    render_status(frame, app, chunks[3]);
    render_help(frame, app, chunks[4]);
}

/// The timer block: state, topic, and the elapsed clock.
fn render_timer<S: SessionStore>(frame: &mut Frame<'_>, app: &App<S>, area: Rect) {
    let (state_label, state_style) = match app.timer_state() {
        TimerState::Idle => ("IDLE", Style::default().fg(Color::DarkGray)),
        TimerState::Running => (
            "RUNNING",
            Style::default().fg(Color::Green).add_modifier(Modifier::BOLD),
        ),
        TimerState::Paused => (
            "PAUSED",
            Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
        ),
    };

    let topic_line = if app.is_active() {
        Line::from(vec![
            Span::raw("Topic: "),
            Span::styled(app.topic().to_string(), Style::default().add_modifier(Modifier::BOLD)),
        ])
    } else {
        Line::from(vec![
            Span::raw("Topic: "),
            Span::raw(app.topic().to_string()),
            Span::styled("_", Style::default().add_modifier(Modifier::SLOW_BLINK)),
        ])
    };

    let clock_style = if app.is_running() {
        Style::default().fg(Color::Green).add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(Color::DarkGray).add_modifier(Modifier::BOLD)
    };

    let lines = vec![
        Line::from(Span::styled(state_label, state_style)),
        Line::default(),
        topic_line,
        Line::default(),
        Line::from(Span::styled(app.elapsed(), clock_style)),
    ];

    let block = Block::default()
        .borders(Borders::ALL)
        .title(" studylog ");
    frame.render_widget(
        Paragraph::new(lines).block(block).alignment(Alignment::Center),
        area,
    );
}

/// One-line summary of the derived statistics.
fn render_stats<S: SessionStore>(frame: &mut Frame<'_>, app: &App<S>, area: Rect) {
    let stats = app.stats();

    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage(33),
            Constraint::Percentage(34),
            Constraint::Percentage(33),
        ])
        .split(area);

    let cells = [
        format!("Sessions: {}", stats.total_sessions),
        format!("Total: {}", format_minutes(stats.total_minutes)),
        format!("Streak: {} 🔥", stats.streak),
    ];

    for (cell, &column) in cells.iter().zip(columns.iter()) {
        frame.render_widget(
            Paragraph::new(cell.as_str()).alignment(Alignment::Center),
            column,
        );
    }
}

/// The recent sessions list.
fn render_recent<S: SessionStore>(frame: &mut Frame<'_>, app: &App<S>, area: Rect) {
    let items: Vec<ListItem<'_>> = app
        .recent()
        .iter()
        .map(|session| {
            ListItem::new(format!(
                "{}  {:>7}  {}",
                session.date.format("%Y-%m-%d"),
                format_minutes(u64::from(session.minutes)),
                session.topic
            ))
        })
        .collect();

    let block = Block::default().borders(Borders::ALL).title(" Recent ");
    if items.is_empty() {
        frame.render_widget(
            Paragraph::new("No sessions recorded yet.").block(block),
            area,
        );
    } else {
        frame.render_widget(List::new(items).block(block), area);
    }
}

/// Transient status line.
fn render_status<S: SessionStore>(frame: &mut Frame<'_>, app: &App<S>, area: Rect) {
    let Some(status) = app.status() else {
        return;
    };

    let style = match status.kind {
        StatusKind::Info => Style::default().fg(Color::Cyan),
        StatusKind::Success => Style::default().fg(Color::Green),
        StatusKind::Warning => Style::default().fg(Color::Yellow),
    };

    frame.render_widget(
        Paragraph::new(Span::styled(status.text.clone(), style)),
        area,
    );
}

/// Key hints for the current state.
fn render_help<S: SessionStore>(frame: &mut Frame<'_>, app: &App<S>, area: Rect) {
    let help = if app.is_active() {
        "Space:pause/resume | f:finish | q:quit"
    } else {
        "type topic | Enter:start | Esc:quit"
    };

    frame.render_widget(
        Paragraph::new(Span::styled(help, Style::default().fg(Color::DarkGray))),
        area,
    );
}
