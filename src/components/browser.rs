use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Widget},
};

use crate::app::ListEntry;
use crate::theme::ThemeColors;

/// Listing widget: folders first, then tracks, with a footer row when more
/// results are hidden behind the render limit.
pub struct BrowserWidget<'a> {
    entries: &'a [ListEntry],
    selected_index: usize,
    scroll_offset: usize,
    hidden_count: usize,
    title: &'a str,
    focused: bool,
    theme: &'a ThemeColors,
}

impl<'a> BrowserWidget<'a> {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        entries: &'a [ListEntry],
        selected_index: usize,
        scroll_offset: usize,
        hidden_count: usize,
        title: &'a str,
        focused: bool,
        theme: &'a ThemeColors,
    ) -> Self {
        Self {
            entries,
            selected_index,
            scroll_offset,
            hidden_count,
            title,
            focused,
            theme,
        }
    }

    fn entry_indicator(entry: &ListEntry) -> &'static str {
        match entry {
            ListEntry::Folder { .. } => "▸ ",
            ListEntry::Track { .. } => "♪ ",
        }
    }
}

impl<'a> Widget for BrowserWidget<'a> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if area.height < 3 || area.width < 4 {
            return;
        }

        let border_color = if self.focused {
            self.theme.border_focused_fg
        } else {
            self.theme.border_fg
        };
        let block = Block::default()
            .title(format!(" {} ", self.title))
            .borders(Borders::ALL)
            .border_style(Style::default().fg(border_color));

        let inner = block.inner(area);
        block.render(area, buf);

        if inner.height == 0 || inner.width == 0 {
            return;
        }

        // Reserve the last row for the footer when results are hidden.
        let footer_rows = if self.hidden_count > 0 { 1 } else { 0 };
        let list_height = (inner.height as usize).saturating_sub(footer_rows);

        if self.entries.is_empty() {
            let empty_line = Line::from(Span::styled(
                "(empty)",
                Style::default().fg(self.theme.dim_fg),
            ));
            buf.set_line(inner.x, inner.y, &empty_line, inner.width);
            return;
        }

        for (row, (index, entry)) in self
            .entries
            .iter()
            .enumerate()
            .skip(self.scroll_offset)
            .take(list_height)
            .enumerate()
        {
            let y = inner.y + row as u16;
            let is_selected = index == self.selected_index;

            let fg = match entry {
                ListEntry::Folder { .. } => self.theme.folder_fg,
                ListEntry::Track { .. } => self.theme.track_fg,
            };
            let style = if is_selected {
                Style::default()
                    .bg(self.theme.list_selected_bg)
                    .fg(self.theme.list_selected_fg)
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default().bg(self.theme.list_bg).fg(fg)
            };

            let marker = if is_selected { "▶ " } else { "  " };
            let text = format!("{}{}{}", marker, Self::entry_indicator(entry), entry.label());
            let padded = format!("{:<width$}", text, width = inner.width as usize);
            let line = Line::from(Span::styled(padded, style));
            buf.set_line(inner.x, y, &line, inner.width);
        }

        if self.hidden_count > 0 {
            let footer = format!("· · · {} more — m to show", self.hidden_count);
            let footer_line = Line::from(Span::styled(
                footer,
                Style::default()
                    .fg(self.theme.dim_fg)
                    .add_modifier(Modifier::DIM),
            ));
            buf.set_line(inner.x, inner.y + inner.height - 1, &footer_line, inner.width);
        }
    }
}
