//! Template catalog (templates/template.yaml)
//!
//! Every entry carries a `type` tag. `family` entries copy a local skeleton and
//! ask the family's questions; `boilerplate` entries are fetched wholesale from
//! a remote repository.

use super::options::TemplateFamily;
use crate::error::ScaffoldError;
use crate::product::ProductConfig;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

pub const CATALOG_FILE: &str = "template.yaml";

/// What kind of template an entry is
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum TemplateKind {
    /// A local skeleton with a family question flow
    Family { family: TemplateFamily },

    /// A remote repository reference (`owner/repo[#ref]`)
    Boilerplate { repo: String },
}

/// A selectable catalog entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogEntry {
    /// Name shown in the selection prompt and accepted on the command line
    pub name: String,

    #[serde(default)]
    pub description: String,

    #[serde(flatten)]
    pub kind: TemplateKind,
}

/// The list of templates offered in the root stage
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Catalog {
    pub templates: Vec<CatalogEntry>,
}

impl Catalog {
    /// Catalog used when the templates root has no template.yaml
    pub fn builtin() -> Self {
        Self {
            templates: TemplateFamily::ALL
                .iter()
                .map(|family| CatalogEntry {
                    name: family.tag().to_string(),
                    description: family.display_name().to_string(),
                    kind: TemplateKind::Family { family: *family },
                })
                .collect(),
        }
    }

    /// Load `<root>/template.yaml`, or the built-in catalog when it is absent
    pub fn load(root: &Path) -> Result<Self> {
        let path = root.join(CATALOG_FILE);
        if !path.exists() {
            return Ok(Self::builtin());
        }
        let content = std::fs::read_to_string(&path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        serde_yaml::from_str(&content)
            .with_context(|| format!("Failed to parse template catalog {}", path.display()))
    }

    pub fn find(&self, name: &str) -> Result<&CatalogEntry> {
        self.templates
            .iter()
            .find(|entry| entry.name == name)
            .ok_or_else(|| {
                ScaffoldError::UnknownTemplate {
                    name: name.to_string(),
                    available: self.names().join(", "),
                }
                .into()
            })
    }

    pub fn names(&self) -> Vec<&str> {
        self.templates.iter().map(|e| e.name.as_str()).collect()
    }
}

/// Resolve the local templates root
///
/// Order: explicit flag, the product's environment variable, then a
/// `templates` directory next to the executable.
pub fn templates_root<C: ProductConfig>(config: &C, flag: Option<&Path>) -> PathBuf {
    if let Some(dir) = flag {
        return dir.to_path_buf();
    }
    if let Ok(dir) = std::env::var(config.templates_dir_env()) {
        if !dir.is_empty() {
            return PathBuf::from(dir);
        }
    }
    std::env::current_exe()
        .ok()
        .and_then(|exe| exe.parent().map(|p| p.join("templates")))
        .unwrap_or_else(|| PathBuf::from("templates"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    const CATALOG: &str = r#"
templates:
  - name: nextjs-react
    description: Next.js storefront
    type: family
    family: nextjs-react
  - name: minimal
    description: Bare storefront
    type: boilerplate
    repo: storefront-dev/boilerplate-minimal#main
"#;

    #[test]
    fn test_parse_tagged_entries() {
        let catalog: Catalog = serde_yaml::from_str(CATALOG).unwrap();

        assert_eq!(
            catalog.find("nextjs-react").unwrap().kind,
            TemplateKind::Family {
                family: TemplateFamily::NextjsReact
            }
        );
        assert_eq!(
            catalog.find("minimal").unwrap().kind,
            TemplateKind::Boilerplate {
                repo: "storefront-dev/boilerplate-minimal#main".to_string()
            }
        );
    }

    #[test]
    fn test_unknown_type_rejected() {
        let yaml = "templates:\n  - name: x\n    type: plugin\n";
        assert!(serde_yaml::from_str::<Catalog>(yaml).is_err());
    }

    #[test]
    fn test_unknown_family_rejected() {
        let yaml = "templates:\n  - name: x\n    type: family\n    family: vue\n";
        assert!(serde_yaml::from_str::<Catalog>(yaml).is_err());
    }

    #[test]
    fn test_find_unknown_lists_available() {
        let catalog = Catalog::builtin();
        let err = catalog.find("angular").unwrap_err();
        let msg = err.to_string();
        assert!(msg.contains("angular"));
        assert!(msg.contains("nextjs-react"));
    }

    #[test]
    fn test_load_falls_back_to_builtin() {
        let tmp = TempDir::new().unwrap();
        assert_eq!(Catalog::load(tmp.path()).unwrap(), Catalog::builtin());
    }

    #[test]
    fn test_load_reads_yaml() {
        let tmp = TempDir::new().unwrap();
        std::fs::write(tmp.path().join(CATALOG_FILE), CATALOG).unwrap();

        let catalog = Catalog::load(tmp.path()).unwrap();
        assert_eq!(catalog.names(), vec!["nextjs-react", "minimal"]);
    }

    #[test]
    fn test_shipped_catalog_parses() {
        let root = Path::new(env!("CARGO_MANIFEST_DIR")).join("../../templates");
        let catalog = Catalog::load(&root).unwrap();

        let entry = catalog.find("nextjs-react").unwrap();
        assert_eq!(
            entry.kind,
            TemplateKind::Family {
                family: TemplateFamily::NextjsReact
            }
        );
        assert!(root.join("nextjs-react").join("package.json").is_file());
    }
}
