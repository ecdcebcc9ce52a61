use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Gauge, Paragraph},
    Frame,
};

use crate::viewmodel::AppViewModel;

use super::ui_fmt;

pub fn render(frame: &mut Frame, app: &AppViewModel, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),  // Header
            Constraint::Length(3),  // Gauge
            Constraint::Min(0),     // Status
            Constraint::Length(3),  // Footer
        ])
        .split(area);

    let header = Paragraph::new(Line::from(vec![
        Span::styled("CLEANING", Style::default().fg(Color::Green).add_modifier(Modifier::BOLD)),
        Span::raw(" | "),
        Span::styled(app.root().display().to_string(), Style::default().fg(Color::Yellow)),
    ]))
    .block(Block::default().borders(Borders::ALL).title("gitsweep"));
    frame.render_widget(header, chunks[0]);

    let progress = app.progress();
    let gauge = Gauge::default()
        .block(Block::default().borders(Borders::ALL).title("Progress"))
        .gauge_style(Style::default().fg(Color::Cyan))
        .ratio(progress.ratio())
        .label(format!("{}/{} ({:.0}%)",
            progress.completed,
            progress.total,
            ui_fmt::percent(progress.completed, progress.total)));
    frame.render_widget(gauge, chunks[1]);

    let status = if app.is_cancel_requested() {
        Line::from(Span::styled(
            "Cancelling: waiting for the running command to finish...",
            Style::default().fg(Color::Red),
        ))
    } else {
        Line::from(Span::raw("Running maintenance, one repository at a time"))
    };
    frame.render_widget(
        Paragraph::new(status).block(Block::default().borders(Borders::ALL).title("Status")),
        chunks[2],
    );

    let footer = Paragraph::new(Line::from(vec![
        Span::styled("Esc", Style::default().fg(Color::Yellow)), Span::raw(" cancel  "),
        Span::styled("q", Style::default().fg(Color::Yellow)), Span::raw(" cancel and quit"),
    ]))
    .block(Block::default().borders(Borders::ALL));
    frame.render_widget(footer, chunks[3]);
}
