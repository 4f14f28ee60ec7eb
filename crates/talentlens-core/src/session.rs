//! Session state: theme preference and recent-search history.
//!
//! Both survive restarts through an injected [`StorageBackend`]. Storage
//! failures never surface to the user; the store logs them and keeps the
//! in-memory value.

use crate::storage::{StorageBackend, HISTORY_KEY, THEME_KEY};
use std::fmt;
use std::str::FromStr;
use tracing::{debug, warn};

/// Maximum number of remembered queries.
pub const HISTORY_LIMIT: usize = 5;

/// Theme used when nothing is stored and the system gives no hint.
pub const DEFAULT_THEME: Theme = Theme::Dark;

/// Colour scheme of the presentation layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Theme {
    Light,
    Dark,
}

impl Theme {
    pub fn as_str(self) -> &'static str {
        match self {
            Theme::Light => "light",
            Theme::Dark => "dark",
        }
    }

    pub fn toggled(self) -> Self {
        match self {
            Theme::Light => Theme::Dark,
            Theme::Dark => Theme::Light,
        }
    }
}

impl fmt::Display for Theme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Theme {
    type Err = crate::Error;

    fn from_str(s: &str) -> crate::Result<Self> {
        match s {
            "light" => Ok(Theme::Light),
            "dark" => Ok(Theme::Dark),
            other => Err(crate::Error::Other(format!("unknown theme {other:?}"))),
        }
    }
}

/// Guess the terminal's colour scheme from `COLORFGBG`.
///
/// Returns `Some(true)` for a dark background, `Some(false)` for a light
/// one, `None` when the variable is unset or unparseable.
pub fn detect_system_dark() -> Option<bool> {
    std::env::var("COLORFGBG")
        .ok()
        .and_then(|raw| parse_colorfgbg(&raw))
}

/// `COLORFGBG` is `fg;bg` (sometimes `fg;default;bg`); the last field is the
/// background's ANSI index. 7 and 15 are the light greys.
pub fn parse_colorfgbg(raw: &str) -> Option<bool> {
    let bg: u8 = raw.rsplit(';').next()?.trim().parse().ok()?;
    Some(!matches!(bg, 7 | 15))
}

type ThemeObserver = Box<dyn FnMut(Theme) + Send>;

/// Theme + history, persisted through a storage backend.
pub struct SessionStore {
    backend: Box<dyn StorageBackend>,
    theme: Theme,
    history: Vec<String>,
    observers: Vec<ThemeObserver>,
}

impl SessionStore {
    /// Initialize from storage.
    ///
    /// Theme: stored value, else `system_prefers_dark`, else [`DEFAULT_THEME`].
    /// History: stored list; missing or malformed reads as empty.
    pub fn load(
        backend: impl StorageBackend + 'static,
        system_prefers_dark: Option<bool>,
    ) -> Self {
        let backend: Box<dyn StorageBackend> = Box::new(backend);

        let stored_theme = read_key(backend.as_ref(), THEME_KEY).and_then(|raw| {
            raw.parse::<Theme>()
                .map_err(|e| debug!("Ignoring stored theme: {}", e))
                .ok()
        });
        let system_theme = system_prefers_dark.map(|dark| {
            if dark {
                Theme::Dark
            } else {
                Theme::Light
            }
        });
        let theme = stored_theme.or(system_theme).unwrap_or(DEFAULT_THEME);

        let history = read_key(backend.as_ref(), HISTORY_KEY)
            .map(|raw| parse_history(&raw))
            .unwrap_or_default();

        debug!("Session loaded: theme={} history={}", theme, history.len());

        Self {
            backend,
            theme,
            history,
            observers: Vec::new(),
        }
    }

    pub fn theme(&self) -> Theme {
        self.theme
    }

    /// Persist `theme` and notify observers.
    pub fn set_theme(&mut self, theme: Theme) {
        self.theme = theme;
        if let Err(e) = self.backend.set(THEME_KEY, theme.as_str()) {
            warn!("Theme not persisted: {}", e);
        }
        for observer in &mut self.observers {
            observer(theme);
        }
    }

    pub fn toggle_theme(&mut self) -> Theme {
        let next = self.theme.toggled();
        self.set_theme(next);
        next
    }

    /// Register a theme observer. It is called once right away with the
    /// current theme, then on every [`SessionStore::set_theme`].
    pub fn on_theme_change(&mut self, mut observer: impl FnMut(Theme) + Send + 'static) {
        observer(self.theme);
        self.observers.push(Box::new(observer));
    }

    /// Recent queries, newest first.
    pub fn history(&self) -> &[String] {
        &self.history
    }

    /// Move `text` to the front (deduplicated), cap at [`HISTORY_LIMIT`], persist.
    pub fn record_search(&mut self, text: &str) {
        self.history.retain(|h| h != text);
        self.history.insert(0, text.to_string());
        self.history.truncate(HISTORY_LIMIT);

        match serde_json::to_string(&self.history) {
            Ok(raw) => {
                if let Err(e) = self.backend.set(HISTORY_KEY, &raw) {
                    warn!("History not persisted: {}", e);
                }
            }
            Err(e) => warn!("History not serialized: {}", e),
        }
    }

    /// Forget all history and drop the persisted key entirely.
    pub fn clear_history(&mut self) {
        self.history.clear();
        if let Err(e) = self.backend.remove(HISTORY_KEY) {
            warn!("History key not removed: {}", e);
        }
    }
}

impl fmt::Debug for SessionStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SessionStore")
            .field("theme", &self.theme)
            .field("history", &self.history)
            .finish_non_exhaustive()
    }
}

fn read_key(backend: &dyn StorageBackend, key: &str) -> Option<String> {
    backend.get(key).unwrap_or_else(|e| {
        warn!("Storage read of {:?} failed: {}", key, e);
        None
    })
}

fn parse_history(raw: &str) -> Vec<String> {
    match serde_json::from_str::<Option<Vec<String>>>(raw) {
        Ok(list) => {
            let mut list = list.unwrap_or_default();
            list.truncate(HISTORY_LIMIT);
            list
        }
        Err(e) => {
            debug!("Malformed stored history, starting empty: {}", e);
            Vec::new()
        }
    }
}
