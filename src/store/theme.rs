//! Colour theme preference

use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::storage::{persisted, KeyValueStore};

/// Storage key of the theme preference
pub const THEME_STORAGE_KEY: &str = "theme-storage";

/// Shape version of the persisted preference
pub const THEME_STATE_VERSION: u32 = 1;

/// User's choice
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    Light,
    Dark,
    #[default]
    System,
}

/// Theme actually applied
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResolvedTheme {
    #[default]
    Light,
    Dark,
}

impl ResolvedTheme {
    pub fn flipped(self) -> Self {
        match self {
            Self::Light => Self::Dark,
            Self::Dark => Self::Light,
        }
    }
}

impl From<ResolvedTheme> for Theme {
    fn from(resolved: ResolvedTheme) -> Self {
        match resolved {
            ResolvedTheme::Light => Theme::Light,
            ResolvedTheme::Dark => Theme::Dark,
        }
    }
}

impl fmt::Display for Theme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Light => "light",
            Self::Dark => "dark",
            Self::System => "system",
        })
    }
}

impl fmt::Display for ResolvedTheme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Light => "light",
            Self::Dark => "dark",
        })
    }
}

/// Reports the host's current colour-scheme preference
pub type SystemThemeProbe = Arc<dyn Fn() -> ResolvedTheme + Send + Sync>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct ThemeState {
    theme: Theme,
    resolved: ResolvedTheme,
}

#[derive(Serialize, Deserialize)]
struct PersistedTheme {
    theme: Theme,
}

pub struct ThemeStore {
    state: RwLock<ThemeState>,
    probe: SystemThemeProbe,
    storage: Option<Arc<dyn KeyValueStore>>,
}

impl ThemeStore {
    /// Non-persistent store starting at [`Theme::System`]
    pub fn new(probe: SystemThemeProbe) -> Self {
        let resolved = probe();
        Self {
            state: RwLock::new(ThemeState {
                theme: Theme::System,
                resolved,
            }),
            probe,
            storage: None,
        }
    }

    /// Store rehydrated from [`THEME_STORAGE_KEY`]
    pub fn persistent(probe: SystemThemeProbe, storage: Arc<dyn KeyValueStore>) -> Self {
        let theme = persisted::load::<PersistedTheme>(
            storage.as_ref(),
            THEME_STORAGE_KEY,
            THEME_STATE_VERSION,
        )
        .map(|saved| saved.theme)
        .unwrap_or_default();

        let resolved = resolve(theme, &probe);
        Self {
            state: RwLock::new(ThemeState { theme, resolved }),
            probe,
            storage: Some(storage),
        }
    }

    pub async fn set_theme(&self, theme: Theme) {
        let resolved = resolve(theme, &self.probe);
        *self.state.write().await = ThemeState { theme, resolved };
        tracing::debug!(%theme, %resolved, "Theme changed");
        self.persist(theme);
    }

    /// Flip the applied theme and pin it as an explicit choice
    pub async fn toggle_theme(&self) -> ResolvedTheme {
        let mut state = self.state.write().await;
        let next = state.resolved.flipped();
        *state = ThemeState {
            theme: next.into(),
            resolved: next,
        };
        drop(state);
        self.persist(next.into());
        next
    }

    /// Re-resolve after the host preference changed; only affects `System`
    pub async fn on_system_theme_changed(&self) {
        let mut state = self.state.write().await;
        if state.theme == Theme::System {
            state.resolved = (self.probe)();
        }
    }

    pub async fn theme(&self) -> Theme {
        self.state.read().await.theme
    }

    pub async fn resolved_theme(&self) -> ResolvedTheme {
        self.state.read().await.resolved
    }

    fn persist(&self, theme: Theme) {
        let Some(storage) = &self.storage else {
            return;
        };
        if let Err(e) = persisted::save(
            storage.as_ref(),
            THEME_STORAGE_KEY,
            THEME_STATE_VERSION,
            &PersistedTheme { theme },
        ) {
            tracing::warn!(error = %e, "Failed to persist theme");
        }
    }
}

fn resolve(theme: Theme, probe: &SystemThemeProbe) -> ResolvedTheme {
    match theme {
        Theme::Light => ResolvedTheme::Light,
        Theme::Dark => ResolvedTheme::Dark,
        Theme::System => probe(),
    }
}
