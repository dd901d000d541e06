//! Configuration

use std::{env, path::PathBuf};

use crate::theme::{Theme, UnknownTheme};

const DEFAULT_PREFIX: &str = "tropebingo";

/// Storage keys the game state, theme and custom genres live under.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StorageKeys {
    pub game_state: String,
    pub theme: String,
    pub custom_genres: String,
}

impl StorageKeys {
    /// Keys sharing a common prefix, e.g. `tropebingo_game_state`.
    pub fn with_prefix(prefix: &str) -> Self {
        Self {
            game_state: format!("{prefix}_game_state"),
            theme: format!("{prefix}_theme"),
            custom_genres: format!("{prefix}_custom_genres"),
        }
    }
}

impl Default for StorageKeys {
    fn default() -> Self {
        Self::with_prefix(DEFAULT_PREFIX)
    }
}

/// Game configuration
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BingoConfig {
    pub keys: StorageKeys,
    /// Theme used when none has been saved.
    pub default_theme: Theme,
    /// Directory of additional `*.json` genre definitions.
    pub genre_dir: Option<PathBuf>,
}

impl BingoConfig {
    /// Load configuration from environment variables, falling back to defaults.
    pub fn from_env() -> Result<Self, Error> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, Error> {
        let keys = lookup("TROPEBINGO_STORAGE_PREFIX")
            .map(|prefix| StorageKeys::with_prefix(&prefix))
            .unwrap_or_default();
        let default_theme = lookup("TROPEBINGO_DEFAULT_THEME")
            .map(|theme| theme.parse::<Theme>())
            .transpose()?
            .unwrap_or_default();
        let genre_dir = lookup("TROPEBINGO_GENRE_DIR").map(PathBuf::from);

        Ok(Self {
            keys,
            default_theme,
            genre_dir,
        })
    }
}

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("TROPEBINGO_DEFAULT_THEME is invalid")]
    Theme(#[from] UnknownTheme),
}
