pub mod disk;
pub mod memory;

use crate::core::theme::Theme;
use anyhow::Result;
use tracing::{debug, warn};

pub use disk::DiskPreferences;
pub use memory::MemoryPreferences;

/// Partition holding user preferences.
pub const PREFERENCES_PARTITION: &str = "preferences";

pub const THEME_KEY: &str = "theme";

/// String key-value storage for user preferences.
pub trait PreferenceStore: Send + Sync {
    fn get(&self, key: &str) -> Result<Option<String>>;
    fn set(&self, key: &str, value: &str) -> Result<()>;
    fn remove(&self, key: &str) -> Result<()>;
}

/// Stored theme, or the default when nothing (or garbage) is stored.
pub fn load_theme(store: &dyn PreferenceStore) -> Theme {
    match store.get(THEME_KEY) {
        Ok(Some(value)) => value.parse().unwrap_or_else(|_| {
            warn!("Ignoring unknown stored theme '{}'", value);
            Theme::default()
        }),
        Ok(None) => Theme::default(),
        Err(e) => {
            warn!("Failed to read theme preference: {:#}", e);
            Theme::default()
        }
    }
}

pub fn save_theme(store: &dyn PreferenceStore, theme: Theme) -> Result<()> {
    debug!(%theme, "Saving theme");
    store.set(THEME_KEY, theme.as_str())
}

/// Flips the stored theme and returns the new value.
pub fn toggle_theme(store: &dyn PreferenceStore) -> Result<Theme> {
    let theme = load_theme(store).toggled();
    save_theme(store, theme)?;
    Ok(theme)
}
