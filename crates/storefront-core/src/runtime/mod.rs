//! Runtime detection, package installation and version control
//!
//! This module provides:
//! - Node.js and package manager detection
//! - Dependency installation with streamed output
//! - Best-effort git initialization

pub mod check;
pub mod git;
pub mod install;

pub use check::{check_node, check_yarn, node_version_warning, PackageManager, RuntimeInfo};
pub use install::{Installer, PackageManagerInstaller};
