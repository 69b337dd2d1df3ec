//! Post-creation usage instructions

use super::options::TemplateOptions;
use crate::runtime::check::PackageManager;
use std::path::Path;

const PLATFORM_CLI: &str = "vercel";

/// Steps shown once the project exists
///
/// `cwd` decides whether a `cd` step is needed.
pub fn next_steps(
    project_dir: &Path,
    cwd: Option<&Path>,
    manager: PackageManager,
    options: Option<&TemplateOptions>,
) -> Vec<String> {
    let mut steps = Vec::new();

    if cwd != Some(project_dir) {
        let shown = cwd
            .and_then(|cwd| project_dir.strip_prefix(cwd).ok())
            .unwrap_or(project_dir);
        steps.push(format!("cd {}", shown.display()));
    }

    steps.push(format!(
        "Start the development server: {}",
        manager.run_script("start")
    ));
    steps.push(format!(
        "Build and run for production: {} && {}",
        manager.run_script("build"),
        manager.run_script("start")
    ));

    if options.is_some_and(|o| o.use_platform) {
        steps.push(format!(
            "Install the Vercel CLI: {}",
            manager.global_install(PLATFORM_CLI)
        ));
        steps.push(format!("Deploy: {}", manager.run_script("deploy")));
    }

    steps
}
