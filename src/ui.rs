use ratatui::{
    layout::{Constraint, Layout, Rect},
    Frame,
};

use crate::app::{App, Focus};
use crate::archive::history::now_epoch;
use crate::archive::nav::Mode;
use crate::components::browser::BrowserWidget;
use crate::components::history::HistoryWidget;
use crate::components::root_tabs::RootTabsWidget;
use crate::components::search_bar::SearchBarWidget;
use crate::components::status_bar::StatusBarWidget;

/// Render the application UI.
pub fn render(app: &mut App, frame: &mut Frame) {
    let area = frame.area();
    let chunks = Layout::vertical([
        Constraint::Length(1), // root tabs
        Constraint::Length(3), // search bar
        Constraint::Min(1),    // listing
        Constraint::Length(1), // status bar
    ])
    .split(area);

    frame.render_widget(
        RootTabsWidget::new(&app.roots, app.nav.active_root(), &app.theme),
        chunks[0],
    );

    frame.render_widget(
        SearchBarWidget::new(
            &app.input,
            app.scope(),
            app.nav.mode(),
            app.entries.len(),
            app.focus == Focus::Search,
            &app.theme,
        ),
        chunks[1],
    );

    // Keep the selected row visible inside the bordered listing.
    let visible_height = chunks[2].height.saturating_sub(2) as usize;
    app.update_scroll(visible_height);

    let title = listing_title(app);
    frame.render_widget(
        BrowserWidget::new(
            app.visible_entries(),
            app.selected_index,
            app.scroll_offset,
            app.hidden_count(),
            &title,
            app.focus == Focus::List,
            &app.theme,
        ),
        chunks[2],
    );

    let location = location_line(app);
    let info = listing_info(app);
    let mut status = StatusBarWidget::new(&location, &info, &app.theme);
    if let Some((msg, _)) = &app.status_message {
        status = status.status_message(msg, msg.starts_with('⚠'));
    }
    if !app.watcher_active {
        status = status.watcher_status("watch: off");
    }
    frame.render_widget(status, chunks[3]);

    // Recent searches drop under the search bar while it is focused empty.
    if app.show_history() {
        let display = app.history.display(now_epoch());
        let overlay = HistoryWidget::new(&display, &app.theme);
        let height = overlay.required_height().min(chunks[2].height);
        if height > 0 {
            let overlay_area = Rect::new(
                chunks[2].x + 2,
                chunks[2].y,
                chunks[2].width.saturating_sub(4).min(44),
                height,
            );
            frame.render_widget(overlay, overlay_area);
        }
    }
}

/// Title for the listing block.
fn listing_title(app: &App) -> String {
    match app.nav.mode() {
        Mode::Searching => format!(
            "Results: \"{}\" ({})",
            app.nav.query().trim(),
            app.scope().label()
        ),
        Mode::Browsing => {
            let target = app.nav.target_path();
            if target.is_empty() {
                "Archive".to_string()
            } else {
                target.to_string()
            }
        }
    }
}

/// Location text for the status bar.
fn location_line(app: &App) -> String {
    let target = app.nav.target_path();
    if target.is_empty() {
        "Archive".to_string()
    } else {
        target.to_string()
    }
}

/// Folder/track counts plus the hidden remainder, if any.
fn listing_info(app: &App) -> String {
    let folders = app.entries.iter().filter(|e| e.is_folder()).count();
    let tracks = app.entries.len() - folders;
    let mut info = format!("{} folders · {} tracks", folders, tracks);
    if app.has_more() {
        info.push_str(&format!(" · {} hidden", app.hidden_count()));
    }
    info
}
