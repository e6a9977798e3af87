use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::Widget,
};

use crate::theme::ThemeColors;

/// Status bar: current location, listing counts, key hints, or a transient
/// status message.
pub struct StatusBarWidget<'a> {
    location: &'a str,
    info: &'a str,
    theme: &'a ThemeColors,
    status_message: Option<&'a str>,
    is_error: bool,
    watcher_status: Option<&'a str>,
}

impl<'a> StatusBarWidget<'a> {
    pub fn new(location: &'a str, info: &'a str, theme: &'a ThemeColors) -> Self {
        Self {
            location,
            info,
            theme,
            status_message: None,
            is_error: false,
            watcher_status: None,
        }
    }

    pub fn status_message(mut self, msg: &'a str, is_error: bool) -> Self {
        self.status_message = Some(msg);
        self.is_error = is_error;
        self
    }

    pub fn watcher_status(mut self, status: &'a str) -> Self {
        self.watcher_status = Some(status);
        self
    }
}

impl<'a> Widget for StatusBarWidget<'a> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if area.height == 0 || area.width == 0 {
            return;
        }

        let width = area.width as usize;

        if let Some(msg) = self.status_message {
            let style = if self.is_error {
                Style::default()
                    .bg(self.theme.error_fg)
                    .fg(self.theme.status_fg)
            } else {
                Style::default()
                    .bg(self.theme.status_bg)
                    .fg(self.theme.success_fg)
            };

            let display: String = if msg.chars().count() >= width {
                msg.chars().take(width).collect()
            } else {
                format!("{:<width$}", msg, width = width)
            };

            let line = Line::from(Span::styled(display, style));
            buf.set_line(area.x, area.y, &line, area.width);
            return;
        }

        let base = Style::default()
            .bg(self.theme.status_bg)
            .fg(self.theme.status_fg);

        let mut spans = vec![
            Span::styled(" ", base),
            Span::styled(
                self.location.to_string(),
                base.add_modifier(Modifier::BOLD),
            ),
            Span::styled("  ", base),
            Span::styled(self.info.to_string(), base.fg(self.theme.dim_fg)),
        ];

        if let Some(watcher) = self.watcher_status {
            spans.push(Span::styled(
                format!("  {}", watcher),
                base.fg(self.theme.dim_fg),
            ));
        }

        // Fill the rest of the row with the status background.
        let used: usize = spans.iter().map(|s| s.content.chars().count()).sum();
        if used < width {
            spans.push(Span::styled(" ".repeat(width - used), base));
        }

        let line = Line::from(spans);
        buf.set_line(area.x, area.y, &line, area.width);
    }
}
