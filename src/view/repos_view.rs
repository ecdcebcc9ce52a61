use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, ListState, Paragraph},
    Frame,
};

use crate::viewmodel::AppViewModel;

use super::ui_fmt;

pub fn render(frame: &mut Frame, app: &AppViewModel, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),  // Header
            Constraint::Min(0),     // List
            Constraint::Length(3),  // Footer
        ])
        .split(area);

    render_header(frame, app, chunks[0]);
    render_list(frame, app, chunks[1]);
    render_footer(frame, chunks[2]);
}

fn render_header(frame: &mut Frame, app: &AppViewModel, area: Rect) {
    let before = app.repos_vm.before();
    let marker = app.session().map(|s| s.marker()).unwrap_or(".git");

    let mut spans = vec![
        Span::raw("Root: "),
        Span::styled(app.root().display().to_string(), Style::default().fg(Color::Yellow)),
        Span::raw(" | "),
        Span::raw(format!("Total: {} | {} folders: {}",
            ui_fmt::measured_size(before.total),
            marker,
            ui_fmt::measured_size(before.metadata))),
    ];
    if !before.is_complete() {
        spans.push(Span::styled(" (unreadable entries, deltas will be n/a)", Style::default().fg(Color::Red)));
    }

    let header = Paragraph::new(vec![Line::from(spans)])
    .block(Block::default().borders(Borders::ALL).title("gitsweep"));
    frame.render_widget(header, area);
}

fn render_list(frame: &mut Frame, app: &AppViewModel, area: Rect) {
    let paths = app.repos_vm.paths();
    let width = area.width.saturating_sub(6) as usize;

    let items: Vec<ListItem> = if paths.is_empty() {
        vec![ListItem::new(Span::styled(
            "No repositories found under this folder",
            Style::default().fg(Color::DarkGray),
        ))]
    } else {
        paths
            .iter()
            .map(|p| ListItem::new(Line::from(Span::raw(ui_fmt::truncate_left(p, width)))))
            .collect()
    };

    let mut list_state = ListState::default();
    if !paths.is_empty() {
        list_state.select(Some(app.repos_vm.selected_index()));
    }

    let title = match paths.len() {
        1 => "Found 1 git project".to_string(),
        n => format!("Found {} git projects", n),
    };
    let list = List::new(items)
        .block(Block::default().borders(Borders::ALL).title(title))
        .highlight_style(Style::default().bg(Color::DarkGray).add_modifier(Modifier::BOLD))
        .highlight_symbol(">> ");

    frame.render_stateful_widget(list, area, &mut list_state);
}

fn render_footer(frame: &mut Frame, area: Rect) {
    let footer = Paragraph::new(Line::from(vec![
        Span::styled("↑/↓", Style::default().fg(Color::Yellow)), Span::raw(" nav  "),
        Span::styled("c", Style::default().fg(Color::Yellow)), Span::raw(" clean all  "),
        Span::styled("r", Style::default().fg(Color::Yellow)), Span::raw(" rescan  "),
        Span::styled("q", Style::default().fg(Color::Yellow)), Span::raw(" quit"),
    ]))
    .block(Block::default().borders(Borders::ALL));
    frame.render_widget(footer, area);
}
