use crate::app::state::AppState;
use crate::bingo::board::FREE_INDEX;
use crate::ui::layout;
use crate::ui::theme::Theme;
use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders, Paragraph, Wrap};

pub fn render(frame: &mut Frame, area: Rect, state: &AppState) {
    let Some(mgr) = state.session.board() else {
        let reason = state
            .session
            .board
            .unavailable_reason()
            .unwrap_or("bingo board unavailable");
        render_unavailable(frame, area, reason);
        return;
    };

    let title = format!(" Bingo · {} selected ", mgr.selected_count());
    let frame_block = layout::board_block()
        .title(title)
        .title_style(Theme::title())
        .border_type(Theme::border_type())
        .border_style(Theme::border())
        .style(Style::default().bg(Theme::BG_SURFACE));
    frame.render_widget(frame_block, area);

    let cells = layout::board_cells(area);
    for (index, rect) in cells.into_iter().enumerate() {
        let text = mgr.board().cell(index).unwrap_or("");
        let marked = mgr.is_highlighted(index);
        let focused = index == state.cursor && state.editing.is_none();

        let (border_style, border_type) = if focused {
            (Theme::border_focused(), Theme::border_type_focused())
        } else {
            (Theme::border(), Theme::border_type())
        };
        let text_style = if marked {
            Theme::cell_marked()
        } else if index == FREE_INDEX {
            Theme::free_cell()
        } else {
            Theme::cell_text()
        };

        let block = Block::default()
            .borders(Borders::ALL)
            .border_type(border_type)
            .border_style(border_style)
            .style(if marked { Theme::cell_marked() } else { Style::default() });
        let inner = block.inner(rect);
        frame.render_widget(block, rect);

        let paragraph = Paragraph::new(text)
            .style(text_style)
            .alignment(Alignment::Center)
            .wrap(Wrap { trim: true });
        frame.render_widget(paragraph, vertically_centered(inner, text));
    }
}

/// Shift the text area down so short wrapped text sits mid-cell.
fn vertically_centered(inner: Rect, text: &str) -> Rect {
    if inner.width == 0 {
        return inner;
    }
    let lines = wrapped_line_count(text, inner.width as usize) as u16;
    let pad = inner.height.saturating_sub(lines) / 2;
    Rect::new(inner.x, inner.y + pad, inner.width, inner.height - pad)
}

/// Approximate the line count of word-wrapped text at `width` columns.
fn wrapped_line_count(text: &str, width: usize) -> usize {
    use unicode_width::UnicodeWidthStr;

    let mut lines = 1;
    let mut current = 0;
    for word in text.split_whitespace() {
        let w = word.width();
        if current == 0 {
            current = w;
        } else if current + 1 + w <= width {
            current += 1 + w;
        } else {
            lines += 1;
            current = w;
        }
        while current > width {
            lines += 1;
            current -= width;
        }
    }
    lines
}

pub fn render_unavailable(frame: &mut Frame, area: Rect, reason: &str) {
    let block = Block::default()
        .title(" Unavailable ")
        .title_style(Theme::error_message())
        .borders(Borders::ALL)
        .border_type(Theme::border_type())
        .border_style(Theme::border());
    let text = vec![
        Line::from(Span::styled(format!("Error: {}", reason), Theme::error_message())),
        Line::from(""),
        Line::from(Span::styled(
            "Check the [pool] section of config.toml",
            Theme::hint(),
        )),
    ];
    let paragraph = Paragraph::new(text)
        .block(block)
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true });
    frame.render_widget(paragraph, area);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wrapped_line_count() {
        assert_eq!(wrapped_line_count("FREE", 10), 1);
        assert_eq!(wrapped_line_count("one two three", 7), 2);
        assert_eq!(wrapped_line_count("one two three", 3), 4);
        assert_eq!(wrapped_line_count("abcdefghij", 4), 3);
        assert_eq!(wrapped_line_count("", 5), 1);
    }

    #[test]
    fn test_vertically_centered() {
        let inner = Rect::new(0, 0, 10, 5);
        let rect = vertically_centered(inner, "FREE");
        assert_eq!(rect.y, 2);
        assert_eq!(rect.height, 3);
        assert_eq!(vertically_centered(Rect::new(0, 0, 0, 4), "x").y, 0);
    }
}
