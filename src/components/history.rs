use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Padding, Widget},
};

use crate::archive::history::AgeBucket;
use crate::theme::ThemeColors;

/// Recent-searches dropdown shown while the empty search bar is focused.
/// Rows are numbered so a digit key recalls the term.
pub struct HistoryWidget<'a> {
    entries: &'a [(&'a str, AgeBucket)],
    theme: &'a ThemeColors,
}

impl<'a> HistoryWidget<'a> {
    pub fn new(entries: &'a [(&'a str, AgeBucket)], theme: &'a ThemeColors) -> Self {
        Self { entries, theme }
    }

    /// Height the overlay needs: entries plus borders, or zero when there
    /// is nothing to show.
    pub fn required_height(&self) -> u16 {
        if self.entries.is_empty() {
            0
        } else {
            self.entries.len() as u16 + 2
        }
    }
}

impl<'a> Widget for HistoryWidget<'a> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if self.entries.is_empty() || area.height < 3 || area.width < 12 {
            return;
        }

        Clear.render(area, buf);

        let block = Block::default()
            .title(" Recent searches ")
            .borders(Borders::ALL)
            .border_style(Style::default().fg(self.theme.overlay_border_fg))
            .padding(Padding::horizontal(1));

        let inner = block.inner(area);
        block.render(area, buf);

        if inner.height == 0 || inner.width == 0 {
            return;
        }

        let key_style = Style::default()
            .fg(self.theme.warning_fg)
            .add_modifier(Modifier::BOLD);
        let term_style = Style::default().fg(self.theme.list_fg);
        let age_style = Style::default().fg(self.theme.dim_fg);

        for (i, (term, age)) in self.entries.iter().enumerate() {
            if i as u16 >= inner.height {
                break;
            }
            let line = Line::from(vec![
                Span::styled(format!("[{}] ", i + 1), key_style),
                Span::styled(term.to_string(), term_style),
                Span::styled(format!("  {}", age), age_style),
            ]);
            buf.set_line(inner.x, inner.y + i as u16, &line, inner.width);
        }
    }
}
