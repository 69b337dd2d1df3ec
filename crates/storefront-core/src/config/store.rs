//! Last-chosen template options, keyed by template family
//!
//! The file store is a single JSON document. It is read once at start and
//! written at most once per run; concurrent runs are not coordinated and the
//! last write wins.

use crate::product::ProductConfig;
use crate::templates::options::{TemplateFamily, TemplateOptions};
use anyhow::{Context, Result};
use directories::ProjectDirs;
use std::collections::{BTreeMap, HashMap};
use std::fs;
use std::path::{Path, PathBuf};

const PREFERENCES_FILE: &str = "preferences.json";

/// Storage for per-family default options
pub trait PreferenceStore {
    /// Stored defaults for `family`, if any
    fn get(&self, family: TemplateFamily) -> Option<TemplateOptions>;

    /// Replace the stored defaults for `family`
    fn set(&mut self, family: TemplateFamily, options: &TemplateOptions) -> Result<()>;
}

/// Preferences kept in a JSON file in the user's config directory
#[derive(Debug, Clone)]
pub struct FileStore {
    path: PathBuf,
}

impl FileStore {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    /// Store located in the product's config directory
    pub fn from_config<C: ProductConfig>(config: &C) -> Result<Self> {
        let (qualifier, organization, application) = config.config_namespace();
        let dirs = ProjectDirs::from(qualifier, organization, application)
            .ok_or_else(|| anyhow::anyhow!("Failed to determine config directory"))?;
        Ok(Self::new(dirs.config_dir().join(PREFERENCES_FILE)))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Whole document; anything unreadable counts as empty
    fn load(&self) -> BTreeMap<String, TemplateOptions> {
        fs::read_to_string(&self.path)
            .ok()
            .and_then(|content| serde_json::from_str(&content).ok())
            .unwrap_or_default()
    }
}

impl PreferenceStore for FileStore {
    fn get(&self, family: TemplateFamily) -> Option<TemplateOptions> {
        self.load().remove(family.tag())
    }

    fn set(&mut self, family: TemplateFamily, options: &TemplateOptions) -> Result<()> {
        let mut document = self.load();
        document.insert(family.tag().to_string(), options.clone());

        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create {}", parent.display()))?;
        }
        let content =
            serde_json::to_string_pretty(&document).context("Failed to serialize preferences")?;
        fs::write(&self.path, content)
            .with_context(|| format!("Failed to write {}", self.path.display()))?;
        Ok(())
    }
}

/// In-memory preferences, used by tests and when saving is disabled
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    entries: HashMap<TemplateFamily, TemplateOptions>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl PreferenceStore for MemoryStore {
    fn get(&self, family: TemplateFamily) -> Option<TemplateOptions> {
        self.entries.get(&family).cloned()
    }

    fn set(&mut self, family: TemplateFamily, options: &TemplateOptions) -> Result<()> {
        self.entries.insert(family, options.clone());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn sample() -> TemplateOptions {
        TemplateOptions {
            tenant_id: Some("acme".to_string()),
            use_typescript: true,
            use_platform: false,
        }
    }

    #[test]
    fn test_missing_file_is_empty() {
        let tmp = TempDir::new().unwrap();
        let store = FileStore::new(tmp.path().join("nope").join(PREFERENCES_FILE));
        assert_eq!(store.get(TemplateFamily::NextjsReact), None);
    }

    #[test]
    fn test_corrupt_file_is_empty() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join(PREFERENCES_FILE);
        fs::write(&path, "{ not json").unwrap();

        let store = FileStore::new(path);
        assert_eq!(store.get(TemplateFamily::NextjsReact), None);
    }

    #[test]
    fn test_set_then_get_returns_saved_options() {
        let tmp = TempDir::new().unwrap();
        let mut store = FileStore::new(tmp.path().join("config").join(PREFERENCES_FILE));

        store.set(TemplateFamily::NextjsReact, &sample()).unwrap();
        assert_eq!(store.get(TemplateFamily::NextjsReact), Some(sample()));

        // A fresh handle reads the same document
        let reopened = FileStore::new(store.path().to_path_buf());
        assert_eq!(reopened.get(TemplateFamily::NextjsReact), Some(sample()));
    }

    #[test]
    fn test_set_overwrites_family_wholesale() {
        let tmp = TempDir::new().unwrap();
        let mut store = FileStore::new(tmp.path().join(PREFERENCES_FILE));

        store.set(TemplateFamily::NextjsReact, &sample()).unwrap();
        let replacement = TemplateOptions {
            use_platform: true,
            ..Default::default()
        };
        store.set(TemplateFamily::NextjsReact, &replacement).unwrap();

        assert_eq!(store.get(TemplateFamily::NextjsReact), Some(replacement));
    }

    #[test]
    fn test_document_keyed_by_family_tag() {
        let tmp = TempDir::new().unwrap();
        let mut store = FileStore::new(tmp.path().join(PREFERENCES_FILE));
        store.set(TemplateFamily::NextjsReact, &sample()).unwrap();

        let raw: serde_json::Value =
            serde_json::from_str(&fs::read_to_string(store.path()).unwrap()).unwrap();
        assert_eq!(raw["nextjs-react"]["tenantId"], "acme");
    }

    #[test]
    fn test_memory_store_round_trip() {
        let mut store = MemoryStore::new();
        assert_eq!(store.get(TemplateFamily::NextjsReact), None);
        store.set(TemplateFamily::NextjsReact, &sample()).unwrap();
        assert_eq!(store.get(TemplateFamily::NextjsReact), Some(sample()));
    }
}
