//! Application configuration: TOML file loading, CLI overrides, and defaults.
//!
//! Resolution order (first found wins, values merge/override):
//! 1. CLI flags (`--config`, positional library path)
//! 2. `$FONOTECA_CONFIG` environment variable (path to config file)
//! 3. Project-local `.fonoteca.toml` in the current working directory
//! 4. Global `~/.config/fonoteca/config.toml`
//! 5. Built-in defaults

use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::archive::pagination::DEFAULT_PAGE_SIZE;

// ── Section configs ──────────────────────────────────────────────────────────

/// General application settings.
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct GeneralConfig {
    /// Library file path (overridden by the CLI positional arg).
    pub library: Option<String>,
    /// Enable mouse support.
    pub mouse: Option<bool>,
}

/// Search behavior settings.
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct SearchConfig {
    /// Quiet interval before raw input becomes the effective query (ms).
    pub debounce_ms: Option<u64>,
    /// Number of result rows revealed per page.
    pub page_size: Option<usize>,
}

/// Root namespace settings.
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct RootsConfig {
    /// Fixed root names known at boot. Custom roots are discovered from the
    /// library on top of these.
    pub fixed: Option<Vec<String>>,
}

/// Library file watcher settings.
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct WatcherConfig {
    /// Enable the library watcher for auto-reload.
    pub enabled: Option<bool>,
    /// Debounce interval in milliseconds.
    pub debounce_ms: Option<u64>,
}

/// Color settings for a single theme palette.
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct ThemeColorsConfig {
    pub list_bg: Option<String>,
    pub list_fg: Option<String>,
    pub list_selected_bg: Option<String>,
    pub list_selected_fg: Option<String>,
    pub folder_fg: Option<String>,
    pub track_fg: Option<String>,
    pub status_bg: Option<String>,
    pub status_fg: Option<String>,
    pub border_fg: Option<String>,
    pub overlay_border_fg: Option<String>,
}

/// Theme configuration section.
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct ThemeConfig {
    /// Color scheme: "dark", "light", "custom".
    pub scheme: Option<String>,
    /// Custom color overrides.
    pub custom: Option<ThemeColorsConfig>,
}

// ── Top-level config ─────────────────────────────────────────────────────────

/// Top-level application configuration.
///
/// All fields are optional so that partial configs from different sources
/// can be merged together (CLI overrides file, file overrides defaults).
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct AppConfig {
    pub general: GeneralConfig,
    pub search: SearchConfig,
    pub roots: RootsConfig,
    pub watcher: WatcherConfig,
    pub theme: ThemeConfig,
}

// ── Default constants ────────────────────────────────────────────────────────

/// Default quiet interval before the effective query updates.
pub const DEFAULT_SEARCH_DEBOUNCE_MS: u64 = 300;
/// Default fixed root names.
pub const DEFAULT_FIXED_ROOTS: &[&str] = &["Música 1", "Música 2", "Efectos", "Programas"];

// ── Config file locator ──────────────────────────────────────────────────────

/// Return the list of candidate config file paths in priority order.
///
/// Does NOT include the CLI `--config` path — that is handled separately.
fn candidate_paths() -> Vec<PathBuf> {
    let mut paths = Vec::new();

    // 1. $FONOTECA_CONFIG environment variable
    if let Ok(env_path) = std::env::var("FONOTECA_CONFIG") {
        paths.push(PathBuf::from(env_path));
    }

    // 2. Project-local `.fonoteca.toml` in CWD
    if let Ok(cwd) = std::env::current_dir() {
        paths.push(cwd.join(".fonoteca.toml"));
    }

    // 3. Global `~/.config/fonoteca/config.toml`
    if let Some(config_dir) = dirs::config_dir() {
        paths.push(config_dir.join("fonoteca").join("config.toml"));
    }

    paths
}

/// Try to read and parse a TOML config file. Returns `None` if the file
/// doesn't exist or can't be parsed (with a warning printed to stderr).
fn load_file(path: &Path) -> Option<AppConfig> {
    let content = match std::fs::read_to_string(path) {
        Ok(c) => c,
        Err(_) => return None,
    };
    match toml::from_str::<AppConfig>(&content) {
        Ok(cfg) => Some(cfg),
        Err(e) => {
            eprintln!(
                "Warning: failed to parse config file {}: {}",
                path.display(),
                e
            );
            None
        }
    }
}

// ── Merge logic ──────────────────────────────────────────────────────────────

#[allow(dead_code)]
impl AppConfig {
    /// Merge `other` on top of `self` — `other`'s `Some` values win.
    pub fn merge(self, other: &AppConfig) -> AppConfig {
        AppConfig {
            general: GeneralConfig {
                library: other.general.library.clone().or(self.general.library),
                mouse: other.general.mouse.or(self.general.mouse),
            },
            search: SearchConfig {
                debounce_ms: other.search.debounce_ms.or(self.search.debounce_ms),
                page_size: other.search.page_size.or(self.search.page_size),
            },
            roots: RootsConfig {
                fixed: other.roots.fixed.clone().or(self.roots.fixed),
            },
            watcher: WatcherConfig {
                enabled: other.watcher.enabled.or(self.watcher.enabled),
                debounce_ms: other.watcher.debounce_ms.or(self.watcher.debounce_ms),
            },
            theme: ThemeConfig {
                scheme: other.theme.scheme.clone().or(self.theme.scheme),
                custom: match (&self.theme.custom, &other.theme.custom) {
                    (_, Some(o)) => Some(o.clone()),
                    (Some(s), None) => Some(s.clone()),
                    (None, None) => None,
                },
            },
        }
    }

    /// Load the final merged configuration.
    ///
    /// `cli_config_path` is an explicit config file path from `--config`.
    /// `cli_overrides` are partial overrides derived from CLI flags.
    pub fn load(cli_config_path: Option<&Path>, cli_overrides: Option<&AppConfig>) -> AppConfig {
        // Start with built-in defaults (all None — the struct Default).
        let mut config = AppConfig::default();

        // Load from candidate files (lowest priority first so higher overwrites).
        let paths = candidate_paths();
        // Walk in reverse so that highest-priority (env var) overwrites lower.
        for path in paths.iter().rev() {
            if let Some(file_cfg) = load_file(path) {
                config = config.merge(&file_cfg);
            }
        }

        // Explicit --config file has higher priority than candidates.
        if let Some(cli_path) = cli_config_path {
            if let Some(file_cfg) = load_file(cli_path) {
                config = config.merge(&file_cfg);
            }
        }

        // CLI flag overrides are highest priority.
        if let Some(overrides) = cli_overrides {
            config = config.merge(overrides);
        }

        config
    }

    // ── Convenience getters with built-in defaults ──────────────────────────

    /// Library file path from config, if set.
    pub fn library(&self) -> Option<PathBuf> {
        self.general.library.as_deref().map(PathBuf::from)
    }

    /// Whether mouse support is enabled.
    pub fn mouse_enabled(&self) -> bool {
        self.general.mouse.unwrap_or(true)
    }

    /// Quiet interval before raw input becomes the effective query.
    pub fn search_debounce_ms(&self) -> u64 {
        self.search.debounce_ms.unwrap_or(DEFAULT_SEARCH_DEBOUNCE_MS)
    }

    /// Number of result rows revealed per page.
    pub fn page_size(&self) -> usize {
        self.search.page_size.unwrap_or(DEFAULT_PAGE_SIZE)
    }

    /// Fixed root names known at boot.
    pub fn fixed_roots(&self) -> Vec<String> {
        match &self.roots.fixed {
            Some(fixed) => fixed.clone(),
            None => DEFAULT_FIXED_ROOTS.iter().map(|s| s.to_string()).collect(),
        }
    }

    /// Whether the library watcher is enabled.
    pub fn watcher_enabled(&self) -> bool {
        self.watcher.enabled.unwrap_or(true)
    }

    /// Watcher debounce interval in milliseconds.
    pub fn watcher_debounce_ms(&self) -> u64 {
        self.watcher
            .debounce_ms
            .unwrap_or(crate::archive::watcher::DEFAULT_DEBOUNCE_MS)
    }

    /// Theme scheme: "dark", "light", or "custom".
    pub fn theme_scheme(&self) -> &str {
        self.theme.scheme.as_deref().unwrap_or("dark")
    }
}

// ── Tests ────────────────────────────────────────────────────────────────────
