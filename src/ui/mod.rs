//! Rendering. Pure projection of [`AppState`]; nothing here mutates state.

mod board_view;
mod input_box;
pub mod layout;
mod presenter_view;
mod status_bar;
mod theme;

use crate::app::state::{AppState, View};
use ratatui::prelude::*;
use ratatui::widgets::{Paragraph, Tabs};
use theme::Theme;

pub fn render(frame: &mut Frame, state: &AppState) {
    let area = frame.area();
    let app_layout = layout::compute_layout(area, state.config.ui.show_help);

    render_tabs(frame, app_layout.tabs, state);
    match state.view {
        View::Board => board_view::render(frame, app_layout.body, state),
        View::Presenter => presenter_view::render(frame, app_layout.body, state),
    }
    if state.config.ui.show_help {
        render_help(frame, app_layout.help, state);
    }
    status_bar::render(frame, app_layout.status_bar, state);
    input_box::render(frame, state);
}

fn render_tabs(frame: &mut Frame, area: Rect, state: &AppState) {
    let selected = match state.view {
        View::Board => 0,
        View::Presenter => 1,
    };
    let tabs = Tabs::new([View::Board.title(), View::Presenter.title()])
        .select(selected)
        .style(Theme::tab_inactive())
        .highlight_style(Theme::tab_active())
        .divider("│");
    frame.render_widget(tabs, area);
}

fn help_text(state: &AppState) -> &'static str {
    if state.editing.is_some() {
        return " type to edit · ←/→ move · Enter save · Esc cancel";
    }
    match state.view {
        View::Board => {
            " ←↑↓→/hjkl move · Space mark · r clear · s shuffle · e edit · Tab presenter · q quit"
        }
        View::Presenter => " n next item · r reset · Tab board · q quit",
    }
}

fn render_help(frame: &mut Frame, area: Rect, state: &AppState) {
    frame.render_widget(
        Paragraph::new(Span::styled(help_text(state), Theme::hint())),
        area,
    );
}
