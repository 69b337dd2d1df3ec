//! Best-effort git repository initialization

use crate::log;
use anyhow::{Context, Result};
use std::path::Path;
use std::process::Command;

/// Initialize a repository with an initial commit, warning instead of failing
///
/// Returns whether a commit was created. Skipped when `dir` already lives
/// inside a git work tree.
pub fn try_init(dir: &Path, product_name: &str) -> bool {
    if is_inside_work_tree(dir) {
        log::debug("Already inside a git repository, skipping git init");
        return false;
    }
    match init(dir, product_name) {
        Ok(()) => {
            log::success("Initialized a git repository");
            true
        }
        Err(e) => {
            log::warning(format!("Git repository not initialized: {:#}", e));
            false
        }
    }
}

fn init(dir: &Path, product_name: &str) -> Result<()> {
    git(dir, &["init"])?;
    git(dir, &["add", "-A"])?;
    let message = format!("Initial commit from {}", product_name);
    git(dir, &["commit", "-m", &message])?;
    Ok(())
}

fn is_inside_work_tree(dir: &Path) -> bool {
    Command::new("git")
        .args(["rev-parse", "--is-inside-work-tree"])
        .current_dir(dir)
        .output()
        .is_ok_and(|o| o.status.success())
}

fn git(dir: &Path, args: &[&str]) -> Result<()> {
    let output = Command::new("git")
        .args(args)
        .current_dir(dir)
        .output()
        .context("git is not available")?;
    if !output.status.success() {
        anyhow::bail!(
            "git {} failed: {}",
            args.join(" "),
            String::from_utf8_lossy(&output.stderr).trim()
        );
    }
    Ok(())
}
