//! Template catalog, materialization and configuration
//!
//! This module provides:
//! - The template catalog and family option sets
//! - Boilerplate fetching (remote archives) and copying (local skeletons)
//! - package.json rewriting
//! - The materializer driving a project from source to installed
//! - Post-creation instructions

pub mod catalog;
pub mod copier;
pub mod fetcher;
pub mod init;
pub mod instructions;
pub mod manifest;
pub mod materializer;
pub mod options;

pub use catalog::{templates_root, Catalog, CatalogEntry, TemplateKind};
pub use copier::copy_template;
pub use fetcher::{ArchiveCloner, RepoCloner};
pub use init::{BuiltinInitializer, TemplateInitializer};
pub use manifest::{ManifestPlan, OutputManifest, PackageManifest};
pub use materializer::{Materializer, ProjectDescriptor, TemplateSource};
pub use options::{TemplateFamily, TemplateOptions};
