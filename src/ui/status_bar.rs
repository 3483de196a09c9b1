use crate::app::state::*;
use crate::ui::theme::Theme;
use ratatui::prelude::*;
use ratatui::widgets::Paragraph;
use unicode_width::UnicodeWidthStr;

pub fn render(frame: &mut Frame, area: Rect, state: &AppState) {
    let mut parts: Vec<Span> = Vec::new();

    // Latest status message
    if let Some(status) = &state.status {
        parts.push(Span::styled(
            format!(" [{}] ", status.timestamp),
            Style::default().fg(Theme::TEXT_MUTED).bg(Theme::BG_ELEVATED),
        ));
        let style = match status.kind {
            StatusKind::Info => Theme::status_bar(),
            StatusKind::Error => Style::default().fg(Color::Red).bg(Theme::BG_ELEVATED),
        };
        parts.push(Span::styled(format!("{} ", status.text), style));
    }

    // Counters for whichever components are running
    let mut counters = Vec::new();
    if let Some(board) = state.session.board() {
        counters.push(format!("selected {}", board.selected_count()));
    }
    if let Some(presenter) = state.session.presenter() {
        counters.push(format!(
            "shown {}/{}",
            presenter.shown_count(),
            presenter.total()
        ));
    }
    let right = format!(" {} │ {} ", counters.join(" · "), state.view.title().to_uppercase());

    // Pad to fill remaining space
    let used: usize = parts.iter().map(|s| s.content.width()).sum();
    let remaining = (area.width as usize).saturating_sub(used + right.width());
    parts.push(Span::styled(" ".repeat(remaining), Theme::status_bar()));
    parts.push(Span::styled(
        right,
        Style::default().fg(Theme::ACCENT_TEAL).bg(Theme::BG_ELEVATED),
    ));

    let paragraph = Paragraph::new(Line::from(parts));
    frame.render_widget(paragraph, area);
}
