//! Template configuration run after dependencies are installed
//!
//! The language variants ship inside the tooling package, so this step can only
//! run once that package sits in `node_modules`.

use super::copier;
use super::manifest::{PackageManifest, PLATFORM_DEV_SCRIPT};
use super::options::{TemplateFamily, TemplateOptions};
use crate::error::ScaffoldError;
use crate::log;
use anyhow::{Context, Result};
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

/// Files that cannot carry their leading dot through packaging
const DOTFILE_RENAMES: &[(&str, &str)] = &[("gitignore", ".gitignore")];

/// Only needed by the bundled server
const SERVER_DIR: &str = "server";

/// Only needed when deploying to the platform
const PLATFORM_PATHS: &[&str] = &["pages/api", "vercel.json"];

const PLATFORM_DEV_FALLBACK: &str = "vercel dev";
const PLATFORM_DEPLOY: &str = "vercel deploy --prod";
const ENV_FILE: &str = ".env.local";
const TENANT_ENV_VAR: &str = "STOREFRONT_TENANT";

/// Family-specific configuration of a freshly installed project
#[allow(async_fn_in_trait)]
pub trait TemplateInitializer {
    async fn init(
        &self,
        dest: &Path,
        family: TemplateFamily,
        options: &TemplateOptions,
    ) -> Result<()>;
}

/// Configures projects from the variants shipped in the tooling package
#[derive(Debug, Clone)]
pub struct BuiltinInitializer {
    tooling_package: String,
    tooling_bin: String,
    variants_root: Option<PathBuf>,
}

impl BuiltinInitializer {
    pub fn new(tooling_package: &str, tooling_bin: &str) -> Self {
        Self {
            tooling_package: tooling_package.to_string(),
            tooling_bin: tooling_bin.to_string(),
            variants_root: None,
        }
    }

    /// Read variants from `<root>/<family>/<variant>` instead of `node_modules`
    pub fn with_variants_root(mut self, root: PathBuf) -> Self {
        self.variants_root = Some(root);
        self
    }

    /// Directory holding the chosen language variant
    pub fn variant_dir(
        &self,
        dest: &Path,
        family: TemplateFamily,
        options: &TemplateOptions,
    ) -> PathBuf {
        let root = match &self.variants_root {
            Some(root) => root.clone(),
            None => dest
                .join("node_modules")
                .join(&self.tooling_package)
                .join("templates"),
        };
        root.join(family.tag()).join(options.variant())
    }

    /// Scripts of the second-stage manifest
    pub fn scripts(
        &self,
        current: &BTreeMap<String, String>,
        options: &TemplateOptions,
    ) -> BTreeMap<String, String> {
        let mut scripts = BTreeMap::new();
        scripts.insert("build".to_string(), format!("{} build", self.tooling_bin));
        scripts.insert("start".to_string(), format!("{} start", self.tooling_bin));

        if options.use_platform {
            let dev = current
                .get(PLATFORM_DEV_SCRIPT)
                .or_else(|| current.get("dev"))
                .filter(|cmd| !runs_server(cmd))
                .cloned()
                .unwrap_or_else(|| PLATFORM_DEV_FALLBACK.to_string());
            scripts.insert("start".to_string(), dev);
            scripts.insert("deploy".to_string(), PLATFORM_DEPLOY.to_string());
        }
        scripts
    }
}

/// Whether `cmd` runs something under the server directory removed in platform mode
fn runs_server(cmd: &str) -> bool {
    cmd.split_whitespace()
        .any(|word| Path::new(word.trim_start_matches("./")).starts_with(SERVER_DIR))
}

impl TemplateInitializer for BuiltinInitializer {
    async fn init(
        &self,
        dest: &Path,
        family: TemplateFamily,
        options: &TemplateOptions,
    ) -> Result<()> {
        let variant_dir = self.variant_dir(dest, family, options);
        if !variant_dir.is_dir() {
            return Err(ScaffoldError::MissingVariant(variant_dir).into());
        }

        let mut manifest = PackageManifest::read(dest)?;
        manifest.scripts = self.scripts(&manifest.scripts, options);
        manifest.write(dest)?;

        let copied = copier::copy_tree(&variant_dir, dest)?;
        log::debug(format!(
            "Copied {} {} files from {}",
            copied.len(),
            options.variant(),
            variant_dir.display()
        ));

        if options.use_platform {
            remove_path(&dest.join(SERVER_DIR))?;
        } else {
            for path in PLATFORM_PATHS {
                remove_path(&dest.join(path))?;
            }
        }

        for (from, to) in DOTFILE_RENAMES {
            let source = dest.join(from);
            if source.exists() {
                let target = dest.join(to);
                fs::rename(&source, &target).with_context(|| {
                    format!("Failed to rename {} to {}", source.display(), target.display())
                })?;
            }
        }

        let env_path = dest.join(ENV_FILE);
        fs::write(&env_path, format!("{}={}\n", TENANT_ENV_VAR, options.tenant()))
            .with_context(|| format!("Failed to write {}", env_path.display()))?;

        Ok(())
    }
}

fn remove_path(path: &Path) -> Result<()> {
    if path.is_dir() {
        fs::remove_dir_all(path).with_context(|| format!("Failed to remove {}", path.display()))
    } else if path.exists() {
        fs::remove_file(path).with_context(|| format!("Failed to remove {}", path.display()))
    } else {
        Ok(())
    }
}
