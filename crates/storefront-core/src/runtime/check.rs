//! Runtime and package manager detection

use semver::Version;
use std::fmt;
use std::process::Command;

/// Oldest Node.js release the generated projects support
pub const MIN_NODE_VERSION: &str = "18.0.0";

/// Supported package managers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PackageManager {
    Npm,
    Yarn,
}

impl PackageManager {
    /// Yarn when it is installed and npm was not forced
    pub fn detect(use_npm: bool) -> Self {
        if !use_npm && check_yarn().available {
            PackageManager::Yarn
        } else {
            PackageManager::Npm
        }
    }

    pub fn command(&self) -> &'static str {
        match self {
            PackageManager::Npm => "npm",
            PackageManager::Yarn => "yarn",
        }
    }

    /// Arguments installing runtime (`dev = false`) or dev dependencies
    pub fn install_args(&self, packages: &[String], dev: bool) -> Vec<String> {
        let mut args: Vec<String> = match (self, dev) {
            (PackageManager::Npm, false) => vec!["install".into(), "--save".into()],
            (PackageManager::Npm, true) => vec!["install".into(), "--save-dev".into()],
            (PackageManager::Yarn, false) => vec!["add".into()],
            (PackageManager::Yarn, true) => vec!["add".into(), "--dev".into()],
        };
        args.extend(packages.iter().cloned());
        args
    }

    /// Arguments linking a locally registered package
    pub fn link_args(&self, package: &str) -> Vec<String> {
        vec!["link".to_string(), package.to_string()]
    }

    /// Shell command running a package script
    pub fn run_script(&self, script: &str) -> String {
        match (self, script) {
            (PackageManager::Npm, "start") => "npm start".to_string(),
            (PackageManager::Npm, _) => format!("npm run {}", script),
            (PackageManager::Yarn, _) => format!("yarn {}", script),
        }
    }

    /// Shell command installing a package globally
    pub fn global_install(&self, package: &str) -> String {
        match self {
            PackageManager::Npm => format!("npm install -g {}", package),
            PackageManager::Yarn => format!("yarn global add {}", package),
        }
    }
}

impl fmt::Display for PackageManager {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.command())
    }
}

/// Runtime detection result
#[derive(Debug, Clone)]
pub struct RuntimeInfo {
    pub name: &'static str,
    pub version: Option<String>,
    pub available: bool,
}

fn probe(name: &'static str, program: &str) -> RuntimeInfo {
    let output = Command::new(program).arg("--version").output();

    match output {
        Ok(out) if out.status.success() => {
            let version = String::from_utf8_lossy(&out.stdout).trim().to_string();
            RuntimeInfo {
                name,
                version: Some(version),
                available: true,
            }
        }
        _ => RuntimeInfo {
            name,
            version: None,
            available: false,
        },
    }
}

/// Check if Node.js is available
pub fn check_node() -> RuntimeInfo {
    probe("Node.js", "node")
}

/// Check if Yarn is available
pub fn check_yarn() -> RuntimeInfo {
    probe("Yarn", "yarn")
}

/// Warning text when a detected Node.js version is older than `minimum`
///
/// Returns `None` when either version cannot be parsed.
pub fn node_version_warning(found: &str, minimum: &str) -> Option<String> {
    let found_ver = parse_version(found)?;
    let minimum_ver = parse_version(minimum)?;

    if found_ver < minimum_ver {
        Some(format!(
            "Node.js {} detected; generated projects need {} or newer",
            found, minimum
        ))
    } else {
        None
    }
}

/// Parse a version string, tolerating a leading `v` (as printed by `node --version`)
fn parse_version(version_str: &str) -> Option<Version> {
    let cleaned = version_str.trim();
    let cleaned = cleaned.strip_prefix('v').unwrap_or(cleaned);
    Version::parse(cleaned).ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_install_args_npm() {
        let pkgs = vec!["next".to_string(), "react".to_string()];
        assert_eq!(
            PackageManager::Npm.install_args(&pkgs, false),
            vec!["install", "--save", "next", "react"]
        );
        assert_eq!(
            PackageManager::Npm.install_args(&pkgs, true),
            vec!["install", "--save-dev", "next", "react"]
        );
    }

    #[test]
    fn test_install_args_yarn() {
        let pkgs = vec!["eslint".to_string()];
        assert_eq!(PackageManager::Yarn.install_args(&pkgs, false), vec!["add", "eslint"]);
        assert_eq!(
            PackageManager::Yarn.install_args(&pkgs, true),
            vec!["add", "--dev", "eslint"]
        );
    }

    #[test]
    fn test_run_script() {
        assert_eq!(PackageManager::Npm.run_script("start"), "npm start");
        assert_eq!(PackageManager::Npm.run_script("build"), "npm run build");
        assert_eq!(PackageManager::Yarn.run_script("deploy"), "yarn deploy");
    }

    #[test]
    fn test_forced_npm() {
        assert_eq!(PackageManager::detect(true), PackageManager::Npm);
    }

    #[test]
    fn test_old_node_warns() {
        let warning = node_version_warning("v16.20.0", MIN_NODE_VERSION);
        assert!(warning.unwrap().contains("v16.20.0"));
    }

    #[test]
    fn test_current_node_passes() {
        assert!(node_version_warning("v20.11.1", MIN_NODE_VERSION).is_none());
        assert!(node_version_warning("18.0.0", MIN_NODE_VERSION).is_none());
    }

    #[test]
    fn test_unparseable_version_skips_warning() {
        assert!(node_version_warning("unknown", MIN_NODE_VERSION).is_none());
    }
}
