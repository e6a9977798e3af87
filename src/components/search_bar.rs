use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Padding, Widget},
};

use crate::app::SearchInput;
use crate::archive::nav::Mode;
use crate::archive::search::Scope;
use crate::theme::ThemeColors;

/// Search input bar with cursor, scope indicator, and result count.
pub struct SearchBarWidget<'a> {
    input: &'a SearchInput,
    scope: Scope,
    mode: Mode,
    result_count: usize,
    focused: bool,
    theme: &'a ThemeColors,
}

impl<'a> SearchBarWidget<'a> {
    pub fn new(
        input: &'a SearchInput,
        scope: Scope,
        mode: Mode,
        result_count: usize,
        focused: bool,
        theme: &'a ThemeColors,
    ) -> Self {
        Self {
            input,
            scope,
            mode,
            result_count,
            focused,
            theme,
        }
    }
}

impl<'a> Widget for SearchBarWidget<'a> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if area.height < 3 || area.width < 10 {
            return;
        }

        let border_color = if self.focused {
            self.theme.border_focused_fg
        } else {
            self.theme.border_fg
        };

        let scope_tag = match self.mode {
            Mode::Searching => format!(" {} ─ Tab to switch ", self.scope.label()),
            Mode::Browsing => String::new(),
        };

        let block = Block::default()
            .title(" Search (/) ")
            .title_bottom(Line::from(scope_tag).right_aligned())
            .borders(Borders::ALL)
            .border_style(Style::default().fg(border_color))
            .padding(Padding::horizontal(1));

        let inner = block.inner(area);
        block.render(area, buf);

        if inner.height == 0 || inner.width == 0 {
            return;
        }

        // Input row with cursor
        let query = &self.input.value;
        let cursor_pos = self.input.cursor;

        let (before, cursor_char, after) = if cursor_pos < query.len() {
            let next = query[cursor_pos..]
                .chars()
                .next()
                .expect("cursor < len guarantees at least one char");
            let end = cursor_pos + next.len_utf8();
            (&query[..cursor_pos], &query[cursor_pos..end], &query[end..])
        } else {
            (query.as_str(), " ", "")
        };

        let input_style = Style::default().fg(self.theme.list_fg);
        let cursor_style = if self.focused {
            Style::default()
                .bg(self.theme.list_fg)
                .fg(self.theme.status_bg)
                .add_modifier(Modifier::BOLD)
        } else {
            input_style
        };
        let prompt_style = Style::default()
            .fg(self.theme.accent_fg)
            .add_modifier(Modifier::BOLD);

        let mut spans = vec![
            Span::styled("> ", prompt_style),
            Span::styled(before, input_style),
            Span::styled(cursor_char, cursor_style),
            Span::styled(after, input_style),
        ];

        if self.mode == Mode::Searching {
            let count = format!(
                "  {} match{}",
                self.result_count,
                if self.result_count == 1 { "" } else { "es" }
            );
            spans.push(Span::styled(count, Style::default().fg(self.theme.dim_fg)));
        } else if query.is_empty() && !self.focused {
            spans.push(Span::styled(
                "type to search, Enter to commit",
                Style::default().fg(self.theme.dim_fg),
            ));
        }

        let line = Line::from(spans);
        buf.set_line(inner.x, inner.y, &line, inner.width);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::theme;

    fn buffer_to_string(buf: &Buffer, area: Rect) -> String {
        let mut s = String::new();
        for y in area.y..area.y + area.height {
            for x in area.x..area.x + area.width {
                s.push_str(buf.cell((x, y)).unwrap().symbol());
            }
            s.push('\n');
        }
        s
    }

    #[test]
    fn renders_placeholder_when_idle() {
        let input = SearchInput::default();
        let tc = theme::dark_theme();
        let widget = SearchBarWidget::new(&input, Scope::Local, Mode::Browsing, 0, false, &tc);
        let area = Rect::new(0, 0, 60, 3);
        let mut buf = Buffer::empty(area);
        widget.render(area, &mut buf);

        let content = buffer_to_string(&buf, area);
        assert!(content.contains("Search (/)"));
        assert!(content.contains("type to search"));
    }

    #[test]
    fn renders_query_and_match_count() {
        let mut input = SearchInput::default();
        input.set("trova");
        let tc = theme::dark_theme();
        let widget = SearchBarWidget::new(&input, Scope::Local, Mode::Searching, 3, true, &tc);
        let area = Rect::new(0, 0, 60, 3);
        let mut buf = Buffer::empty(area);
        widget.render(area, &mut buf);

        let content = buffer_to_string(&buf, area);
        assert!(content.contains("trova"));
        assert!(content.contains("3 matches"));
        assert!(content.contains("local"));
    }

    #[test]
    fn singular_match_count() {
        let mut input = SearchInput::default();
        input.set("x");
        let tc = theme::dark_theme();
        let widget = SearchBarWidget::new(&input, Scope::Global, Mode::Searching, 1, true, &tc);
        let area = Rect::new(0, 0, 60, 3);
        let mut buf = Buffer::empty(area);
        widget.render(area, &mut buf);

        let content = buffer_to_string(&buf, area);
        assert!(content.contains("1 match"));
        assert!(!content.contains("1 matches"));
        assert!(content.contains("global"));
    }

    #[test]
    fn cursor_mid_query_with_multibyte() {
        let mut input = SearchInput::default();
        input.set("mánuel");
        input.move_home();
        input.move_right(); // cursor after 'm', on 'á'
        let tc = theme::dark_theme();
        let widget = SearchBarWidget::new(&input, Scope::Local, Mode::Searching, 0, true, &tc);
        let area = Rect::new(0, 0, 60, 3);
        let mut buf = Buffer::empty(area);
        widget.render(area, &mut buf);

        let content = buffer_to_string(&buf, area);
        assert!(content.contains("mánuel"));
    }

    #[test]
    fn small_area_no_panic() {
        let input = SearchInput::default();
        let tc = theme::dark_theme();
        let widget = SearchBarWidget::new(&input, Scope::Local, Mode::Browsing, 0, false, &tc);
        let area = Rect::new(0, 0, 5, 1);
        let mut buf = Buffer::empty(area);
        widget.render(area, &mut buf);
    }
}
