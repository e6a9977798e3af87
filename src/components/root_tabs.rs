use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::Widget,
};

use crate::archive::roots::RootRegistry;
use crate::theme::ThemeColors;

/// One-row tab strip of root namespaces, fixed roots first, the active one
/// highlighted.
pub struct RootTabsWidget<'a> {
    roots: &'a RootRegistry,
    active: Option<&'a str>,
    theme: &'a ThemeColors,
}

impl<'a> RootTabsWidget<'a> {
    pub fn new(roots: &'a RootRegistry, active: Option<&'a str>, theme: &'a ThemeColors) -> Self {
        Self {
            roots,
            active,
            theme,
        }
    }
}

impl<'a> Widget for RootTabsWidget<'a> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if area.height == 0 || area.width == 0 {
            return;
        }

        let active_style = Style::default()
            .fg(self.theme.accent_fg)
            .add_modifier(Modifier::BOLD | Modifier::UNDERLINED);
        let inactive_style = Style::default().fg(self.theme.dim_fg);
        let sep_style = Style::default().fg(self.theme.border_fg);

        let mut spans: Vec<Span> = vec![Span::styled(" ", sep_style)];
        for (i, root) in self.roots.all().enumerate() {
            if i > 0 {
                spans.push(Span::styled(" │ ", sep_style));
            }
            let style = if Some(root) == self.active {
                active_style
            } else {
                inactive_style
            };
            spans.push(Span::styled(root.to_string(), style));
        }

        let line = Line::from(spans);
        buf.set_line(area.x, area.y, &line, area.width);
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

    fn registry() -> RootRegistry {
        let mut roots = RootRegistry::new(vec!["Música 1".to_string(), "Efectos".to_string()]);
        roots.set_custom(vec!["Nocturnos".to_string()]);
        roots
    }

    #[test]
    fn renders_all_roots_in_order() {
        let roots = registry();
        let tc = theme::dark_theme();
        let widget = RootTabsWidget::new(&roots, Some("Música 1"), &tc);
        let area = Rect::new(0, 0, 60, 1);
        let mut buf = Buffer::empty(area);
        widget.render(area, &mut buf);

        let content = buffer_to_string(&buf, area);
        assert!(content.contains("Música 1"));
        assert!(content.contains("Efectos"));
        assert!(content.contains("Nocturnos"));
        let musica = content.find("Música 1").unwrap();
        let efectos = content.find("Efectos").unwrap();
        let nocturnos = content.find("Nocturnos").unwrap();
        assert!(musica < efectos && efectos < nocturnos);
    }

    #[test]
    fn renders_without_active_root() {
        let roots = registry();
        let tc = theme::dark_theme();
        let widget = RootTabsWidget::new(&roots, None, &tc);
        let area = Rect::new(0, 0, 60, 1);
        let mut buf = Buffer::empty(area);
        widget.render(area, &mut buf);
        let content = buffer_to_string(&buf, area);
        assert!(content.contains("Efectos"));
    }

    #[test]
    fn zero_area_no_panic() {
        let roots = registry();
        let tc = theme::dark_theme();
        let widget = RootTabsWidget::new(&roots, None, &tc);
        let area = Rect::new(0, 0, 0, 0);
        let mut buf = Buffer::empty(area);
        widget.render(area, &mut buf);
    }
}
