use super::{PREFERENCES_PARTITION, PreferenceStore};
use anyhow::{Context, Result};
use fjall::{Keyspace, PartitionCreateOptions, PartitionHandle, PersistMode};
use std::path::Path;
use tracing::debug;

/// Preferences persisted in a fjall keyspace.
pub struct DiskPreferences {
    keyspace: Keyspace,
    partition: PartitionHandle,
}

impl DiskPreferences {
    pub fn open(path: &Path) -> Result<Self> {
        std::fs::create_dir_all(path)
            .with_context(|| format!("Failed to create directory: {}", path.display()))?;
        let keyspace = fjall::Config::new(path)
            .open()
            .with_context(|| format!("Failed to open keyspace at {}", path.display()))?;
        let partition = keyspace
            .open_partition(PREFERENCES_PARTITION, PartitionCreateOptions::default())
            .context("Failed to open preferences partition")?;
        debug!(path = %path.display(), "Opened preference store");
        Ok(Self {
            keyspace,
            partition,
        })
    }
}

impl PreferenceStore for DiskPreferences {
    fn get(&self, key: &str) -> Result<Option<String>> {
        let value = self
            .partition
            .get(key)
            .with_context(|| format!("Failed to read preference: {key}"))?;
        debug!(key, hit = value.is_some(), "Preference GET");
        value
            .map(|bytes| String::from_utf8(bytes.to_vec()).context("Preference is not UTF-8"))
            .transpose()
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        self.partition
            .insert(key, value)
            .with_context(|| format!("Failed to write preference: {key}"))?;
        self.keyspace
            .persist(PersistMode::SyncAll)
            .context("Failed to persist preferences")?;
        debug!(key, "Preference SET");
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<()> {
        self.partition
            .remove(key)
            .with_context(|| format!("Failed to remove preference: {key}"))?;
        self.keyspace
            .persist(PersistMode::SyncAll)
            .context("Failed to persist preferences")?;
        debug!(key, "Preference REMOVE");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_get_set_remove() {
        let dir = tempdir().unwrap();
        let store = DiskPreferences::open(dir.path()).unwrap();

        assert!(store.get("theme").unwrap().is_none());

        store.set("theme", "dark").unwrap();
        assert_eq!(store.get("theme").unwrap().as_deref(), Some("dark"));

        store.remove("theme").unwrap();
        assert!(store.get("theme").unwrap().is_none());
    }

    #[test]
    fn test_value_survives_reopen() {
        let dir = tempdir().unwrap();
        {
            let store = DiskPreferences::open(dir.path()).unwrap();
            store.set("theme", "dark").unwrap();
        }

        let store = DiskPreferences::open(dir.path()).unwrap();
        assert_eq!(store.get("theme").unwrap().as_deref(), Some("dark"));
    }
}
