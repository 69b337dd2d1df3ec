//! package.json handling
//!
//! The source manifest of a boilerplate is reduced to a plan: the scripts to
//! keep and the dependency names to install. Versions are never carried over;
//! the package manager resolves them again during install.

use super::options::TemplateOptions;
use crate::error::ScaffoldError;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;

pub const MANIFEST_FILE: &str = "package.json";

/// Version written into every new project
pub const INITIAL_VERSION: &str = "0.1.0";

/// Boilerplate-internal hooks that must not survive into a project
pub const BOOTSTRAP_SCRIPTS: &[&str] = &["postinstall", "greet"];

/// Raw dev script used when deploying to the platform
pub const PLATFORM_DEV_SCRIPT: &str = "dev:vercel";

/// Dependencies only needed by the bundled server
pub const SERVER_DEPENDENCIES: &[&str] = &["express", "cookie-parser"];

/// Platform package and its bundling helper
pub const PLATFORM_DEPENDENCIES: &[&str] = &["vercel", "@vercel/ncc"];

/// A package.json, keeping every field this tool does not touch
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PackageManifest {
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub scripts: BTreeMap<String, String>,

    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub dependencies: BTreeMap<String, String>,

    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub dev_dependencies: BTreeMap<String, String>,

    #[serde(flatten)]
    pub rest: serde_json::Map<String, serde_json::Value>,
}

impl PackageManifest {
    /// Read `package.json` from a project directory
    pub fn read(dir: &Path) -> Result<Self> {
        let path = dir.join(MANIFEST_FILE);
        let content = std::fs::read_to_string(&path).map_err(|e| ScaffoldError::Manifest {
            path: path.clone(),
            reason: e.to_string(),
        })?;
        let manifest = serde_json::from_str(&content).map_err(|e| ScaffoldError::Manifest {
            path: path.clone(),
            reason: e.to_string(),
        })?;
        Ok(manifest)
    }

    /// Write `package.json` into a project directory
    pub fn write(&self, dir: &Path) -> Result<()> {
        write_json(dir, self)
    }
}

/// The reduced manifest written before install
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutputManifest {
    pub name: String,
    pub version: String,
    pub private: bool,
    pub scripts: BTreeMap<String, String>,
}

impl OutputManifest {
    pub fn new(name: &str, scripts: BTreeMap<String, String>) -> Self {
        Self {
            name: name.to_string(),
            version: INITIAL_VERSION.to_string(),
            private: true,
            scripts,
        }
    }

    pub fn write(&self, dir: &Path) -> Result<()> {
        write_json(dir, self)
    }
}

fn write_json<T: Serialize>(dir: &Path, value: &T) -> Result<()> {
    let path = dir.join(MANIFEST_FILE);
    let mut content =
        serde_json::to_string_pretty(value).context("Failed to serialize package.json")?;
    content.push('\n');
    std::fs::write(&path, content).with_context(|| format!("Failed to write {}", path.display()))
}

/// Scripts and install lists derived from a source manifest
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ManifestPlan {
    pub scripts: BTreeMap<String, String>,
    pub dependencies: Vec<String>,
    pub dev_dependencies: Vec<String>,
}

impl ManifestPlan {
    /// Compute the plan for a boilerplate
    ///
    /// `options` is `None` for boilerplates fetched wholesale; only the
    /// bootstrap scripts are dropped then. `tooling` is appended to the
    /// runtime dependencies unless it will be linked locally instead.
    pub fn new(
        source: &PackageManifest,
        options: Option<&TemplateOptions>,
        tooling: &str,
        link_tooling: bool,
    ) -> Self {
        let mut scripts = source.scripts.clone();
        for key in BOOTSTRAP_SCRIPTS {
            scripts.remove(*key);
        }

        let mut dependencies = source.dependencies.clone();

        if let Some(options) = options {
            if options.use_platform {
                for dep in SERVER_DEPENDENCIES {
                    dependencies.remove(*dep);
                }
                // A dev script without the platform variant runs the local server
                match scripts.get(PLATFORM_DEV_SCRIPT).cloned() {
                    Some(dev) => scripts.insert("dev".to_string(), dev),
                    None => scripts.remove("dev"),
                };
            } else {
                for dep in PLATFORM_DEPENDENCIES {
                    dependencies.remove(*dep);
                }
            }
            scripts.remove(PLATFORM_DEV_SCRIPT);
        }

        let mut dependencies: Vec<String> = dependencies.into_keys().collect();
        let mut dev_dependencies: Vec<String> = source.dev_dependencies.keys().cloned().collect();
        if link_tooling {
            dependencies.retain(|d| d != tooling);
            dev_dependencies.retain(|d| d != tooling);
        } else if !dependencies.iter().any(|d| d == tooling) {
            dependencies.push(tooling.to_string());
        }

        Self {
            scripts,
            dependencies,
            dev_dependencies,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TOOLING: &str = "@storefront/scripts";

    fn source() -> PackageManifest {
        serde_json::from_str(
            r#"{
                "name": "storefront-boilerplate",
                "version": "3.2.1",
                "scripts": {
                    "postinstall": "node bootstrap.js",
                    "greet": "node greet.js",
                    "dev": "node server/index.js",
                    "dev:vercel": "vercel dev",
                    "build": "next build"
                },
                "dependencies": {
                    "next": "^14.0.0",
                    "react": "^18.2.0",
                    "express": "^4.18.0",
                    "cookie-parser": "^1.4.6",
                    "vercel": "^32.0.0",
                    "@vercel/ncc": "^0.38.0"
                },
                "devDependencies": {
                    "eslint": "^8.0.0",
                    "prettier": "^3.0.0"
                }
            }"#,
        )
        .unwrap()
    }

    fn options(use_platform: bool) -> TemplateOptions {
        TemplateOptions {
            use_platform,
            ..Default::default()
        }
    }

    #[test]
    fn test_bootstrap_scripts_always_dropped() {
        for opts in [None, Some(options(false)), Some(options(true))] {
            let plan = ManifestPlan::new(&source(), opts.as_ref(), TOOLING, false);
            assert!(!plan.scripts.contains_key("postinstall"));
            assert!(!plan.scripts.contains_key("greet"));
        }
    }

    #[test]
    fn test_platform_promotes_dev_script() {
        let plan = ManifestPlan::new(&source(), Some(&options(true)), TOOLING, false);

        assert_eq!(plan.scripts.get("dev").map(String::as_str), Some("vercel dev"));
        assert!(!plan.scripts.contains_key(PLATFORM_DEV_SCRIPT));
        assert!(!plan.dependencies.contains(&"express".to_string()));
        assert!(!plan.dependencies.contains(&"cookie-parser".to_string()));
        assert!(plan.dependencies.contains(&"vercel".to_string()));
    }

    #[test]
    fn test_platform_without_platform_dev_script_drops_server_dev() {
        let source: PackageManifest = serde_json::from_str(
            r#"{"scripts":{"dev":"node server/index.js","build":"next build"}}"#,
        )
        .unwrap();
        let plan = ManifestPlan::new(&source, Some(&options(true)), TOOLING, false);

        assert!(!plan.scripts.contains_key("dev"));
        assert!(plan.scripts.values().all(|cmd| !cmd.contains("server/")));
        assert_eq!(plan.scripts.get("build").map(String::as_str), Some("next build"));
    }

    #[test]
    fn test_server_mode_drops_platform_packages() {
        let plan = ManifestPlan::new(&source(), Some(&options(false)), TOOLING, false);

        assert_eq!(
            plan.scripts.get("dev").map(String::as_str),
            Some("node server/index.js")
        );
        assert!(!plan.scripts.contains_key(PLATFORM_DEV_SCRIPT));
        assert!(!plan.dependencies.contains(&"vercel".to_string()));
        assert!(!plan.dependencies.contains(&"@vercel/ncc".to_string()));
        assert!(plan.dependencies.contains(&"express".to_string()));
    }

    #[test]
    fn test_tooling_package_added_once() {
        let plan = ManifestPlan::new(&source(), Some(&options(false)), TOOLING, false);
        assert_eq!(plan.dependencies.iter().filter(|d| *d == TOOLING).count(), 1);
    }

    #[test]
    fn test_linked_tooling_not_installed() {
        let plan = ManifestPlan::new(&source(), Some(&options(false)), TOOLING, true);
        assert!(!plan.dependencies.contains(&TOOLING.to_string()));
    }

    #[test]
    fn test_linked_tooling_dropped_from_dev_dependencies() {
        let mut source = source();
        source
            .dev_dependencies
            .insert(TOOLING.to_string(), "^1.0.0".to_string());

        let linked = ManifestPlan::new(&source, None, TOOLING, true);
        assert!(!linked.dev_dependencies.contains(&TOOLING.to_string()));
        assert!(!linked.dependencies.contains(&TOOLING.to_string()));

        let installed = ManifestPlan::new(&source, None, TOOLING, false);
        assert!(installed.dev_dependencies.contains(&TOOLING.to_string()));
    }

    #[test]
    fn test_dev_dependencies_unchanged() {
        let plan = ManifestPlan::new(&source(), Some(&options(true)), TOOLING, false);
        assert_eq!(plan.dev_dependencies, vec!["eslint", "prettier"]);
    }

    #[test]
    fn test_boilerplate_keeps_platform_branch_untouched() {
        let plan = ManifestPlan::new(&source(), None, TOOLING, false);
        assert!(plan.scripts.contains_key(PLATFORM_DEV_SCRIPT));
        assert!(plan.dependencies.contains(&"vercel".to_string()));
        assert!(plan.dependencies.contains(&"express".to_string()));
    }

    #[test]
    fn test_output_manifest_drops_versions() {
        let plan = ManifestPlan::new(&source(), Some(&options(false)), TOOLING, false);
        let output = OutputManifest::new("my-shop", plan.scripts);
        let json = serde_json::to_value(&output).unwrap();

        assert_eq!(json["name"], "my-shop");
        assert_eq!(json["version"], INITIAL_VERSION);
        assert_eq!(json["private"], true);
        assert!(json.get("dependencies").is_none());
        assert!(json.get("devDependencies").is_none());
    }

    #[test]
    fn test_unknown_fields_preserved() {
        let manifest: PackageManifest =
            serde_json::from_str(r#"{"name":"x","engines":{"node":">=18"}}"#).unwrap();
        let json = serde_json::to_value(&manifest).unwrap();
        assert_eq!(json["engines"]["node"], ">=18");
        assert_eq!(json["name"], "x");
    }
}
