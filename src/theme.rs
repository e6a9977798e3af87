//! Theme data model: built-in palettes and resolution from config.
//!
//! Two built-in palettes (dark and light) plus custom color overrides from
//! the config file.

use ratatui::style::Color;

use crate::config::{ThemeColorsConfig, ThemeConfig};

// ── Runtime theme colors ─────────────────────────────────────────────────────

/// All runtime colors used in the UI.
///
/// Constructed from a config-level `ThemeConfig` via `resolve_theme()`.
#[derive(Debug, Clone)]
pub struct ThemeColors {
    // Listing panel
    pub list_bg: Color,
    pub list_fg: Color,
    pub list_selected_bg: Color,
    pub list_selected_fg: Color,
    pub folder_fg: Color,
    pub track_fg: Color,

    // Status bar
    pub status_bg: Color,
    pub status_fg: Color,

    // Borders & chrome
    pub border_fg: Color,
    pub border_focused_fg: Color,

    // Overlays (history dropdown)
    pub overlay_border_fg: Color,

    // Semantic colors (not configurable, consistent across themes)
    pub error_fg: Color,
    pub warning_fg: Color,
    pub success_fg: Color,
    pub info_fg: Color,
    pub accent_fg: Color,
    pub dim_fg: Color,
}

// ── Built-in palettes ────────────────────────────────────────────────────────

/// Dark theme using Catppuccin Mocha palette.
pub fn dark_theme() -> ThemeColors {
    ThemeColors {
        list_bg: Color::Reset,
        list_fg: Color::Rgb(205, 214, 244),       // #cdd6f4 (text)
        list_selected_bg: Color::Rgb(69, 71, 90), // #45475a (surface1)
        list_selected_fg: Color::Rgb(205, 214, 244), // #cdd6f4
        folder_fg: Color::Rgb(137, 180, 250),     // #89b4fa (blue)
        track_fg: Color::Rgb(205, 214, 244),      // #cdd6f4

        status_bg: Color::Rgb(30, 30, 46), // #1e1e2e (base)
        status_fg: Color::Rgb(205, 214, 244),

        border_fg: Color::Rgb(88, 91, 112), // #585b70 (surface2)
        border_focused_fg: Color::Rgb(137, 180, 250), // #89b4fa (blue)

        overlay_border_fg: Color::Rgb(137, 180, 250),

        error_fg: Color::Rgb(243, 139, 168),   // #f38ba8 (red)
        warning_fg: Color::Rgb(249, 226, 175), // #f9e2af (yellow)
        success_fg: Color::Rgb(166, 227, 161), // #a6e3a1 (green)
        info_fg: Color::Rgb(137, 180, 250),    // #89b4fa (blue)
        accent_fg: Color::Rgb(203, 166, 247),  // #cba6f7 (mauve)
        dim_fg: Color::Rgb(108, 112, 134),     // #6c7086
    }
}

/// Light theme — complementary light palette.
pub fn light_theme() -> ThemeColors {
    ThemeColors {
        list_bg: Color::Reset,
        list_fg: Color::Rgb(76, 79, 105), // #4c4f69 (text)
        list_selected_bg: Color::Rgb(204, 208, 218), // #ccd0da (surface1)
        list_selected_fg: Color::Rgb(76, 79, 105),
        folder_fg: Color::Rgb(30, 102, 245), // #1e66f5 (blue)
        track_fg: Color::Rgb(76, 79, 105),

        status_bg: Color::Rgb(239, 241, 245), // #eff1f5 (base)
        status_fg: Color::Rgb(76, 79, 105),

        border_fg: Color::Rgb(172, 176, 190), // #acb0be (surface2)
        border_focused_fg: Color::Rgb(30, 102, 245),

        overlay_border_fg: Color::Rgb(30, 102, 245),

        error_fg: Color::Rgb(210, 15, 57),    // #d20f39 (red)
        warning_fg: Color::Rgb(223, 142, 29), // #df8e1d (yellow)
        success_fg: Color::Rgb(64, 160, 43),  // #40a02b (green)
        info_fg: Color::Rgb(30, 102, 245),
        accent_fg: Color::Rgb(136, 57, 239), // #8839ef (mauve)
        dim_fg: Color::Rgb(156, 160, 176),
    }
}

// ── Color parsing ────────────────────────────────────────────────────────────

/// Parse a hex color string like `"#aabbcc"` into a `ratatui::style::Color`.
/// Returns `None` for malformed input.
pub fn parse_hex_color(hex: &str) -> Option<Color> {
    let hex = hex.strip_prefix('#').unwrap_or(hex);
    if hex.len() != 6 {
        return None;
    }
    let r = u8::from_str_radix(&hex[0..2], 16).ok()?;
    let g = u8::from_str_radix(&hex[2..4], 16).ok()?;
    let b = u8::from_str_radix(&hex[4..6], 16).ok()?;
    Some(Color::Rgb(r, g, b))
}

// ── Theme resolution ─────────────────────────────────────────────────────────

/// Resolve the final `ThemeColors` from config.
///
/// - `"dark"` (default): dark Catppuccin palette
/// - `"light"`: light Catppuccin palette
/// - `"custom"`: start from dark palette, then override with custom hex values
pub fn resolve_theme(config: &ThemeConfig) -> ThemeColors {
    let scheme = config.scheme.as_deref().unwrap_or("dark");
    match scheme {
        "light" => light_theme(),
        "custom" => {
            let mut theme = dark_theme();
            if let Some(custom) = &config.custom {
                apply_custom_colors(&mut theme, custom);
            }
            theme
        }
        _ => dark_theme(), // "dark" or any unrecognized value
    }
}

/// Apply custom hex color overrides on top of an existing theme.
fn apply_custom_colors(theme: &mut ThemeColors, custom: &ThemeColorsConfig) {
    if let Some(ref c) = custom.list_bg {
        theme.list_bg = parse_hex_color(c).unwrap_or(theme.list_bg);
    }
    if let Some(ref c) = custom.list_fg {
        theme.list_fg = parse_hex_color(c).unwrap_or(theme.list_fg);
    }
    if let Some(ref c) = custom.list_selected_bg {
        theme.list_selected_bg = parse_hex_color(c).unwrap_or(theme.list_selected_bg);
    }
    if let Some(ref c) = custom.list_selected_fg {
        theme.list_selected_fg = parse_hex_color(c).unwrap_or(theme.list_selected_fg);
    }
    if let Some(ref c) = custom.folder_fg {
        theme.folder_fg = parse_hex_color(c).unwrap_or(theme.folder_fg);
    }
    if let Some(ref c) = custom.track_fg {
        theme.track_fg = parse_hex_color(c).unwrap_or(theme.track_fg);
    }
    if let Some(ref c) = custom.status_bg {
        theme.status_bg = parse_hex_color(c).unwrap_or(theme.status_bg);
    }
    if let Some(ref c) = custom.status_fg {
        theme.status_fg = parse_hex_color(c).unwrap_or(theme.status_fg);
    }
    if let Some(ref c) = custom.border_fg {
        theme.border_fg = parse_hex_color(c).unwrap_or(theme.border_fg);
    }
    if let Some(ref c) = custom.overlay_border_fg {
        theme.overlay_border_fg = parse_hex_color(c).unwrap_or(theme.overlay_border_fg);
    }
}

// ── Tests ────────────────────────────────────────────────────────────────────
