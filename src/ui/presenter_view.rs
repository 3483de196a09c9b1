use crate::app::state::AppState;
use crate::bingo::presenter::PresenterPhase;
use crate::ui::board_view::render_unavailable;
use crate::ui::theme::Theme;
use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders, Gauge, Paragraph, Wrap};

/// Headline for the presenter panel and whether it is a hint rather than an
/// item.
fn headline(state: &AppState) -> Option<(String, bool)> {
    let presenter = state.session.presenter()?;
    if let Some(notice) = state.presenter_notice {
        return Some((notice.to_string(), true));
    }
    if let Some(item) = presenter.current() {
        return Some((item.to_string(), false));
    }
    let hint = match presenter.phase() {
        PresenterPhase::Empty => "Press n to begin",
        PresenterPhase::Partial => "Press n to continue",
        PresenterPhase::Exhausted => "All items have been shown!",
    };
    Some((hint.to_string(), true))
}

pub fn render(frame: &mut Frame, area: Rect, state: &AppState) {
    let Some(presenter) = state.session.presenter() else {
        let reason = state
            .session
            .presenter
            .unavailable_reason()
            .unwrap_or("presenter unavailable");
        render_unavailable(frame, area, reason);
        return;
    };

    let block = Block::default()
        .title(" Presenter ")
        .title_style(Theme::title())
        .borders(Borders::ALL)
        .border_type(Theme::border_type())
        .border_style(Theme::border())
        .style(Style::default().bg(Theme::BG_SURFACE));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .margin(1)
        .constraints([
            Constraint::Min(3),    // Current item
            Constraint::Length(1), // Counter
            Constraint::Length(1), // Progress
        ])
        .split(inner);

    if let Some((text, is_hint)) = headline(state) {
        let style = if is_hint {
            Theme::hint()
        } else {
            Theme::presenter_item()
        };
        let lines = chunks[0].height.saturating_sub(1) / 2;
        let mut content: Vec<Line> = (0..lines).map(|_| Line::from("")).collect();
        content.push(Line::from(Span::styled(text, style)));
        let paragraph = Paragraph::new(content)
            .alignment(Alignment::Center)
            .wrap(Wrap { trim: true });
        frame.render_widget(paragraph, chunks[0]);
    }

    let counter = Paragraph::new(Line::from(vec![
        Span::styled("Shown ", Theme::hint()),
        Span::styled(presenter.shown_count().to_string(), Theme::title()),
        Span::styled(" of ", Theme::hint()),
        Span::styled(presenter.total().to_string(), Theme::title()),
    ]))
    .alignment(Alignment::Center);
    frame.render_widget(counter, chunks[1]);

    let ratio = if presenter.total() > 0 {
        presenter.shown_count() as f64 / presenter.total() as f64
    } else {
        0.0
    };
    let gauge = Gauge::default()
        .gauge_style(Style::default().fg(Theme::ACCENT_TEAL).bg(Theme::BG_ELEVATED))
        .ratio(ratio.clamp(0.0, 1.0))
        .label("");
    frame.render_widget(gauge, chunks[2]);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::session::Session;
    use crate::bingo::{MemoryStore, Pool};
    use crate::config::AppConfig;

    fn state(pool: Pool) -> AppState {
        AppState::new(AppConfig::default(), Session::start(pool, MemoryStore::new()))
    }

    #[test]
    fn test_headline_follows_phase() {
        let mut state = state(Pool::new(["only"]));
        assert_eq!(headline(&state), Some(("Press n to begin".to_string(), true)));

        state.session.draw_next().unwrap();
        assert_eq!(headline(&state), Some(("only".to_string(), false)));

        state.presenter_notice = Some("All items have been shown!");
        assert_eq!(
            headline(&state),
            Some(("All items have been shown!".to_string(), true))
        );
    }

    #[test]
    fn test_headline_after_restore_hides_items() {
        let store = MemoryStore::new();
        let mut first = Session::start(Pool::new(["a", "b"]), store.clone());
        first.draw_next().unwrap();

        let state = AppState::new(
            AppConfig::default(),
            Session::start(Pool::new(["a", "b"]), store),
        );
        assert_eq!(headline(&state), Some(("Press n to continue".to_string(), true)));
    }

    #[test]
    fn test_headline_absent_without_presenter() {
        let state = state(Pool::new(Vec::<String>::new()));
        assert!(headline(&state).is_none());
    }
}
