use crate::app::state::*;
use crate::ui::theme::Theme;
use ratatui::prelude::*;
use ratatui::widgets::block::Padding;
use ratatui::widgets::{Block, Borders, Clear, Paragraph};
use unicode_width::UnicodeWidthStr;

/// Popup for editing the text of one board cell.
pub fn render(frame: &mut Frame, state: &AppState) {
    let Some(edit) = &state.editing else {
        return;
    };

    let popup_area = popup_rect(frame.area());

    frame.render_widget(Clear, popup_area);

    let block = Block::default()
        .title(format!(" Edit cell {} ", edit.index + 1))
        .title_style(Theme::title())
        .title_bottom(Line::from(" Enter to save · Esc to cancel ").right_aligned())
        .borders(Borders::ALL)
        .border_type(Theme::border_type_focused())
        .border_style(Theme::border_focused())
        .padding(Padding::horizontal(1))
        .style(Style::default().bg(Theme::BG_SURFACE));

    let inner = block.inner(popup_area);
    frame.render_widget(block, popup_area);
    if inner.width == 0 || inner.height == 0 {
        return;
    }

    // Prompt chevron + input text
    let line = Line::from(vec![
        Span::styled("❯ ", Style::default().fg(Theme::ACCENT_TEAL)),
        Span::styled(edit.text.as_str(), Theme::input_text()),
    ]);
    frame.render_widget(Paragraph::new(line), inner);

    // Cursor offset: chevron "❯ " (2 columns) + display width before the cursor
    let prompt_offset = 2u16;
    let before_cursor = edit.text[..edit.cursor].width() as u16;
    let cursor_x = inner.x + prompt_offset + before_cursor;
    frame.set_cursor_position((cursor_x.min(inner.right() - 1), inner.y));
}

/// Centered popup, 60% of the width (at least 40 columns) and 5 rows.
fn popup_rect(area: Rect) -> Rect {
    let popup_w = ((area.width as u32 * 60 / 100) as u16)
        .max(40)
        .min(area.width.saturating_sub(4));
    let popup_h = 5.min(area.height);
    let popup_x = area.x + (area.width.saturating_sub(popup_w)) / 2;
    let popup_y = area.y + (area.height.saturating_sub(popup_h)) / 2;
    Rect::new(popup_x, popup_y, popup_w, popup_h)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_popup_rect_sizes() {
        let popup = popup_rect(Rect::new(0, 0, 100, 30));
        assert_eq!(popup, Rect::new(20, 12, 60, 5));

        let narrow = popup_rect(Rect::new(0, 0, 30, 3));
        assert_eq!(narrow.width, 26);
        assert_eq!(narrow.height, 3);
    }

    #[test]
    fn test_popup_rect_on_very_wide_terminal() {
        let popup = popup_rect(Rect::new(0, 0, 2000, 50));
        assert_eq!(popup.width, 1200);
        assert_eq!(popup.x, 400);
    }
}
