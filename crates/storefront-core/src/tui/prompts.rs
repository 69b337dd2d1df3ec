//! Charm-style CLI flow using cliclack

use super::ask::CliclackAsker;
use super::flow::select_source;
use super::sequencer::{Asker, DefaultAsker};
use crate::config::PreferenceStore;
use crate::log;
use crate::product::ProductConfig;
use crate::runtime::{check, git, PackageManager, PackageManagerInstaller};
use crate::templates::{
    catalog, instructions, ArchiveCloner, BuiltinInitializer, Materializer, ProjectDescriptor,
    RepoCloner, TemplateSource,
};
use anyhow::{Context, Result};
use std::path::{Path, PathBuf};

/// CLI arguments for the create command
#[derive(Debug, Clone, Default)]
pub struct CreateArgs {
    /// Name of the project, also its directory under the current directory
    pub project_name: String,

    /// Fetch this boilerplate instead of running the template questions
    pub boilerplate: Option<String>,

    /// Use npm even when yarn is available
    pub use_npm: bool,

    /// Local directory to use for templates
    pub template_dir: Option<PathBuf>,

    /// Answer every question with its default (non-interactive mode)
    pub yes: bool,

    /// Skip git initialization
    pub no_git: bool,
}

/// Run the CLI with interactive prompts
pub async fn run<C, S>(config: &C, args: CreateArgs, store: &mut S) -> Result<()>
where
    C: ProductConfig,
    S: PreferenceStore + ?Sized,
{
    cliclack::intro(config.display_name())?;

    // Step 1: Probe Node.js and pick the package manager
    let manager = check_runtimes(args.use_npm);

    // Step 2: Resolve the project destination
    let cwd = std::env::current_dir().context("Failed to read the current directory")?;
    let project = ProjectDescriptor::in_dir(&args.project_name, &cwd)?;

    // Step 3: Choose template and options
    let templates_root = catalog::templates_root(config, args.template_dir.as_deref());
    log::debug(format!("Templates root: {}", templates_root.display()));
    let mut asker: Box<dyn Asker> = if args.yes {
        Box::new(DefaultAsker)
    } else {
        Box::new(CliclackAsker)
    };
    let source = select_source(
        config,
        args.boilerplate.as_deref(),
        &templates_root,
        store,
        asker.as_mut(),
    )?;

    // Step 4: Materialize
    let dev_mode = config.dev_mode();
    if dev_mode {
        log::warning(format!(
            "Developer mode: {} will be linked locally",
            config.tooling_package()
        ));
    }
    let materializer = Materializer::new(
        SpinnerCloner(ArchiveCloner::from_config(config)?),
        PackageManagerInstaller::new(manager),
        BuiltinInitializer::new(config.tooling_package(), config.tooling_bin()),
        config.tooling_package(),
    )
    .link_tooling(dev_mode);

    log::info(format!("Creating {} in {}", project.name(), project.path().display()));
    materializer.materialize(&project, &source).await?;
    log::success(format!("Created {}", project.name()));

    // Step 5: Version control (never fatal)
    if !args.no_git {
        git::try_init(project.path(), config.name());
    }

    // Step 6: Show next steps
    print_next_steps(config, project.path(), &cwd, manager, &source)?;

    Ok(())
}

fn check_runtimes(use_npm: bool) -> PackageManager {
    let spinner = cliclack::spinner();
    spinner.start("Checking runtimes...");

    let node = check::check_node();
    let manager = PackageManager::detect(use_npm);

    let warning = match node.version.as_deref() {
        Some(version) if node.available => {
            spinner.stop(format!("Detected {} {}, using {}", node.name, version, manager));
            check::node_version_warning(version, check::MIN_NODE_VERSION)
        }
        _ => {
            spinner.stop(format!("Missing {}", node.name));
            Some(format!(
                "{} was not found; install it before running the project",
                node.name
            ))
        }
    };
    if let Some(warning) = warning {
        log::warning(warning);
    }
    manager
}

/// Shows a spinner while a remote boilerplate downloads
struct SpinnerCloner<R>(R);

impl<R: RepoCloner> RepoCloner for SpinnerCloner<R> {
    async fn clone_into(&self, repo: &str, dest: &Path) -> Result<()> {
        let spinner = cliclack::spinner();
        spinner.start(format!("Downloading {}...", repo));
        match self.0.clone_into(repo, dest).await {
            Ok(()) => {
                spinner.stop(format!("Downloaded {}", repo));
                Ok(())
            }
            Err(e) => {
                spinner.stop(format!("Failed to download {}", repo));
                Err(e)
            }
        }
    }
}

fn print_next_steps<C: ProductConfig>(
    config: &C,
    project_dir: &Path,
    cwd: &Path,
    manager: PackageManager,
    source: &TemplateSource,
) -> Result<()> {
    let options = match source {
        TemplateSource::Local { options, .. } => Some(options),
        TemplateSource::Remote(_) => None,
    };
    let steps = instructions::next_steps(project_dir, Some(cwd), manager, options);

    println!();
    println!("  Next steps");
    println!();

    for (i, step) in steps.iter().enumerate() {
        println!("  {}.  {}", i + 1, step);
    }

    println!();
    println!("  Docs: {}", config.docs_url());

    cliclack::outro("Happy shopping!")?;

    Ok(())
}
