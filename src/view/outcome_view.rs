use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

use crate::model::CleaningReport;
use crate::viewmodel::AppViewModel;

use super::ui_fmt;

/// Report, error and scanning screens
pub fn render(frame: &mut Frame, app: &AppViewModel, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(0),     // Body
            Constraint::Length(3),  // Footer
        ])
        .split(area);

    let (title, body) = match (app.report(), app.message()) {
        (_, Some(message)) => ("Error", vec![
            Line::from(Span::styled(message.to_string(), Style::default().fg(Color::Red))),
        ]),
        (Some(report), None) => ("Cleaning report", report_lines(report)),
        (None, None) => ("Scanning", vec![
            Line::from(format!("Searching {} for repositories...", app.root().display())),
        ]),
    };

    frame.render_widget(
        Paragraph::new(body)
            .wrap(Wrap { trim: false })
            .block(Block::default().borders(Borders::ALL).title(title)),
        chunks[0],
    );

    let footer = Paragraph::new(Line::from(vec![
        Span::styled("Enter/Esc", Style::default().fg(Color::Yellow)), Span::raw(" back  "),
        Span::styled("r", Style::default().fg(Color::Yellow)), Span::raw(" rescan  "),
        Span::styled("q", Style::default().fg(Color::Yellow)), Span::raw(" quit"),
    ]))
    .block(Block::default().borders(Borders::ALL));
    frame.render_widget(footer, chunks[1]);
}

fn report_lines(report: &CleaningReport) -> Vec<Line<'static>> {
    let sizes = report.formatted();
    let label = Style::default().fg(Color::Cyan);
    let bold = Style::default().add_modifier(Modifier::BOLD);

    vec![
        Line::from(vec![
            Span::styled("Cleaning done! ", bold),
            Span::raw(format!("{} repositories at {}", report.repositories_cleaned, report.finished_at_display())),
        ]),
        Line::from(""),
        Line::from(vec![Span::styled("Size before: ", label), Span::raw(sizes.total_before)]),
        Line::from(vec![Span::styled("Size after: ", label), Span::raw(sizes.total_after)]),
        Line::from(vec![
            Span::styled("Delta: ", label),
            Span::styled(sizes.total_delta, Style::default().fg(ui_fmt::delta_color(report.total_delta()))),
        ]),
        Line::from(""),
        Line::from(vec![
            Span::styled(format!("Size of all {} folders before: ", report.marker), label),
            Span::raw(sizes.metadata_before),
        ]),
        Line::from(vec![
            Span::styled(format!("Size of all {} folders after: ", report.marker), label),
            Span::raw(sizes.metadata_after),
        ]),
        Line::from(vec![
            Span::styled("Delta: ", label),
            Span::styled(sizes.metadata_delta, Style::default().fg(ui_fmt::delta_color(report.metadata_delta()))),
        ]),
    ]
}
