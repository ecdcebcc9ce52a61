mod repos_view;
mod cleaning_view;
mod outcome_view;
mod ui_fmt;

use ratatui::Frame;

use crate::viewmodel::{AppViewModel, ViewMode};

/// Draw the screen for the current view mode
pub fn render(frame: &mut Frame, app: &AppViewModel) {
    let area = frame.area();
    match app.view_mode() {
        ViewMode::Repositories => repos_view::render(frame, app, area),
        ViewMode::Cleaning => cleaning_view::render(frame, app, area),
        ViewMode::Scanning | ViewMode::Report | ViewMode::Error => outcome_view::render(frame, app, area),
    }
}
