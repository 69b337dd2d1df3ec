//! Project materialization: obtain, rewrite manifest, install, configure

use super::copier;
use super::fetcher::RepoCloner;
use super::init::TemplateInitializer;
use super::manifest::{ManifestPlan, OutputManifest, PackageManifest};
use super::options::{TemplateFamily, TemplateOptions};
use crate::error::ScaffoldError;
use crate::log;
use crate::runtime::install::Installer;
use anyhow::{Context, Result};
use std::path::{Path, PathBuf};

/// Name and destination of the project being created
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectDescriptor {
    name: String,
    path: PathBuf,
}

impl ProjectDescriptor {
    pub fn new(name: &str, path: PathBuf) -> Self {
        Self {
            name: name.to_string(),
            path,
        }
    }

    /// Project named `name` created under `parent`
    ///
    /// The name doubles as the package name, so it must be a single plain
    /// path component.
    pub fn in_dir(name: &str, parent: &Path) -> Result<Self, ScaffoldError> {
        validate_name(name)?;
        Ok(Self::new(name, parent.join(name)))
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

fn validate_name(name: &str) -> Result<(), ScaffoldError> {
    let reason = if name.trim().is_empty() {
        "name is empty"
    } else if name.contains(['/', '\\']) {
        "name contains a path separator"
    } else if name == "." || name == ".." {
        "name is not a directory name"
    } else {
        return Ok(());
    };
    Err(ScaffoldError::InvalidProjectName {
        name: name.to_string(),
        reason,
    })
}

/// Where the boilerplate comes from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TemplateSource {
    /// Remote repository reference, fetched wholesale
    Remote(String),

    /// Local family skeleton, configured with the family's options
    Local {
        dir: PathBuf,
        family: TemplateFamily,
        options: TemplateOptions,
    },
}

impl TemplateSource {
    fn options(&self) -> Option<&TemplateOptions> {
        match self {
            TemplateSource::Remote(_) => None,
            TemplateSource::Local { options, .. } => Some(options),
        }
    }
}

/// Runs the materialization steps against injected collaborators
pub struct Materializer<R, I, T> {
    cloner: R,
    installer: I,
    initializer: T,
    tooling_package: String,
    link_tooling: bool,
}

impl<R, I, T> Materializer<R, I, T>
where
    R: RepoCloner,
    I: Installer,
    T: TemplateInitializer,
{
    pub fn new(cloner: R, installer: I, initializer: T, tooling_package: &str) -> Self {
        Self {
            cloner,
            installer,
            initializer,
            tooling_package: tooling_package.to_string(),
            link_tooling: false,
        }
    }

    /// Link the tooling package locally instead of installing it from the
    /// registry (developer mode)
    pub fn link_tooling(mut self, link: bool) -> Self {
        self.link_tooling = link;
        self
    }

    pub fn cloner(&self) -> &R {
        &self.cloner
    }

    pub fn installer(&self) -> &I {
        &self.installer
    }

    /// Create the project described by `project` from `source`
    pub async fn materialize(
        &self,
        project: &ProjectDescriptor,
        source: &TemplateSource,
    ) -> Result<()> {
        let dest = project.path();
        ensure_empty_destination(dest)?;

        match source {
            TemplateSource::Local { dir, .. } => {
                let copied = copier::copy_template(dir, dest)?;
                log::debug(format!("Copied {} files from {}", copied.len(), dir.display()));
            }
            TemplateSource::Remote(repo) => {
                self.cloner
                    .clone_into(repo, dest)
                    .await
                    .with_context(|| format!("Failed to fetch boilerplate {}", repo))?;
                log::debug(format!("Fetched {} into {}", repo, dest.display()));
            }
        }

        let source_manifest = PackageManifest::read(dest)?;
        let plan = ManifestPlan::new(
            &source_manifest,
            source.options(),
            &self.tooling_package,
            self.link_tooling,
        );
        OutputManifest::new(project.name(), plan.scripts.clone()).write(dest)?;
        log::debug(format!(
            "Installing {} dependencies and {} dev dependencies",
            plan.dependencies.len(),
            plan.dev_dependencies.len()
        ));

        let code = self
            .installer
            .install(dest, &plan.dependencies, &plan.dev_dependencies)
            .await?;
        if code != 0 {
            return Err(ScaffoldError::InstallFailed { code }.into());
        }

        if self.link_tooling {
            match self.installer.link(dest, &self.tooling_package).await {
                Ok(0) => log::info(format!("Linked local {}", self.tooling_package)),
                Ok(code) => log::warning(format!(
                    "Linking {} exited with code {}; continuing",
                    self.tooling_package, code
                )),
                Err(e) => log::warning(format!(
                    "Linking {} failed: {:#}; continuing",
                    self.tooling_package, e
                )),
            }
        }

        if let TemplateSource::Local {
            family, options, ..
        } = source
        {
            self.initializer.init(dest, *family, options).await?;
        }

        Ok(())
    }
}

/// The destination may be missing or an empty directory, nothing else
fn ensure_empty_destination(dest: &Path) -> Result<()> {
    if !dest.exists() {
        return Ok(());
    }
    let mut entries = std::fs::read_dir(dest)
        .with_context(|| format!("Failed to read {}", dest.display()))?;
    if entries.next().is_some() {
        return Err(ScaffoldError::DestinationNotEmpty(dest.to_path_buf()).into());
    }
    Ok(())
}
