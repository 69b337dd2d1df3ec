//! Storefront Core - Shared library for the storefront scaffolding CLI
//!
//! This library asks which template to use, materializes a starter project from
//! a local skeleton or a remote boilerplate, installs its dependencies and
//! prepares a git repository.
//!
//! # Architecture
//!
//! The library is organized into layers:
//!
//! - **Layer 1: Core Operations** - Catalog, manifest rewriting, copying,
//!   archive fetching, package installation, git
//! - **Layer 2: Workflow Orchestration** - `ProductConfig`, the question
//!   sequencer, source selection and the `Materializer`
//! - **Layer 3: CLI/TUI Interface** - Optional cliclack-based prompts (feature-gated)
//!
//! # Feature Flags
//!
//! - `tui` (default): Enables the cliclack-based prompts and `run`
//!
//! # Example Usage (without TUI)
//!
//! ```ignore
//! use storefront_core::{templates::*, runtime::*};
//!
//! let materializer = Materializer::new(
//!     ArchiveCloner::from_config(&config)?,
//!     PackageManagerInstaller::new(PackageManager::Npm),
//!     BuiltinInitializer::new("@storefront/scripts", "storefront-scripts"),
//!     "@storefront/scripts",
//! );
//! materializer.materialize(&project, &source).await?;
//! ```

pub mod config;
pub mod error;
pub mod log;
pub mod product;
pub mod runtime;
pub mod templates;
pub mod tui;

// Re-export main types for convenience
pub use config::{FileStore, MemoryStore, PreferenceStore};
pub use error::ScaffoldError;
pub use product::ProductConfig;
pub use runtime::PackageManager;
pub use templates::{
    Catalog, Materializer, ProjectDescriptor, TemplateFamily, TemplateOptions, TemplateSource,
};

#[cfg(feature = "tui")]
pub use tui::{run, CreateArgs};
