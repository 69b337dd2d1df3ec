//! Dependency installation through the selected package manager
//!
//! Runtime and dev dependencies are installed by two separate invocations, in
//! that order, with the child's output streamed to the terminal as it arrives.

use super::check::PackageManager;
use anyhow::{Context, Result};
use colored::Colorize;
use std::path::Path;
use std::process::Stdio;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::process::Command as TokioCommand;

/// Installs packages into a project directory
#[allow(async_fn_in_trait)]
pub trait Installer {
    /// Install runtime dependencies, then dev dependencies
    ///
    /// Returns the exit code of the last invocation that ran. A failed runtime
    /// install stops before the dev install.
    async fn install(
        &self,
        dir: &Path,
        dependencies: &[String],
        dev_dependencies: &[String],
    ) -> Result<i32>;

    /// Link a locally registered package instead of installing it
    async fn link(&self, dir: &Path, package: &str) -> Result<i32>;
}

/// Installer shelling out to npm or yarn
#[derive(Debug, Clone, Copy)]
pub struct PackageManagerInstaller {
    manager: PackageManager,
}

impl PackageManagerInstaller {
    pub fn new(manager: PackageManager) -> Self {
        Self { manager }
    }

    pub fn manager(&self) -> PackageManager {
        self.manager
    }

    async fn run(&self, dir: &Path, args: &[String]) -> Result<i32> {
        run_streamed(self.manager.command(), args, dir).await
    }
}

impl Installer for PackageManagerInstaller {
    async fn install(
        &self,
        dir: &Path,
        dependencies: &[String],
        dev_dependencies: &[String],
    ) -> Result<i32> {
        let mut code = 0;
        if !dependencies.is_empty() {
            code = self
                .run(dir, &self.manager.install_args(dependencies, false))
                .await?;
            if code != 0 {
                return Ok(code);
            }
        }
        if !dev_dependencies.is_empty() {
            code = self
                .run(dir, &self.manager.install_args(dev_dependencies, true))
                .await?;
        }
        Ok(code)
    }

    async fn link(&self, dir: &Path, package: &str) -> Result<i32> {
        self.run(dir, &self.manager.link_args(package)).await
    }
}

/// Run a command in `dir`, echoing its stdout and stderr line by line
///
/// Returns the exit code; a process killed by a signal reports `-1`.
pub async fn run_streamed(program: &str, args: &[String], dir: &Path) -> Result<i32> {
    println!();
    println!(
        "{} {}",
        "Running:".dimmed(),
        format!("{} {}", program, args.join(" ")).yellow()
    );
    println!();

    let mut child = TokioCommand::new(program)
        .args(args)
        .current_dir(dir)
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .with_context(|| format!("Failed to start {}", program))?;

    let stdout = child
        .stdout
        .take()
        .context("Failed to capture stdout")?;
    let stderr = child
        .stderr
        .take()
        .context("Failed to capture stderr")?;

    let mut stdout_reader = BufReader::new(stdout).lines();
    let mut stderr_reader = BufReader::new(stderr).lines();
    let mut stdout_open = true;
    let mut stderr_open = true;

    while stdout_open || stderr_open {
        tokio::select! {
            line = stdout_reader.next_line(), if stdout_open => {
                match line {
                    Ok(Some(line)) => println!("  {}", line),
                    Ok(None) => stdout_open = false,
                    Err(e) => {
                        eprintln!("{} {}", "Error reading stdout:".red(), e);
                        stdout_open = false;
                    }
                }
            }
            line = stderr_reader.next_line(), if stderr_open => {
                match line {
                    Ok(Some(line)) => eprintln!("  {}", line.yellow()),
                    Ok(None) => stderr_open = false,
                    Err(e) => {
                        eprintln!("{} {}", "Error reading stderr:".red(), e);
                        stderr_open = false;
                    }
                }
            }
        }
    }

    let status = child
        .wait()
        .await
        .with_context(|| format!("Failed to wait for {}", program))?;
    println!();

    Ok(exit_code(status))
}

/// Exit code of a finished child, shell-style `128 + signal` when it was killed
fn exit_code(status: std::process::ExitStatus) -> i32 {
    if let Some(code) = status.code() {
        return code;
    }
    #[cfg(unix)]
    {
        use std::os::unix::process::ExitStatusExt;
        if let Some(signal) = status.signal() {
            return 128 + signal;
        }
    }
    1
}

#[cfg(all(test, unix))]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_run_streamed_reports_exit_code() {
        let tmp = TempDir::new().unwrap();
        let ok = run_streamed("sh", &["-c".into(), "echo hi".into()], tmp.path())
            .await
            .unwrap();
        assert_eq!(ok, 0);

        let failed = run_streamed("sh", &["-c".into(), "echo oops >&2; exit 3".into()], tmp.path())
            .await
            .unwrap();
        assert_eq!(failed, 3);
    }

    #[tokio::test]
    async fn test_run_streamed_killed_by_signal() {
        let tmp = TempDir::new().unwrap();
        let code = run_streamed("sh", &["-c".into(), "kill -TERM $$".into()], tmp.path())
            .await
            .unwrap();
        assert_eq!(code, 128 + 15);
    }

    #[tokio::test]
    async fn test_run_streamed_missing_program() {
        let tmp = TempDir::new().unwrap();
        let result = run_streamed("definitely-not-a-real-program-xyz", &[], tmp.path()).await;
        assert!(result.is_err());
    }
}
