//! create-storefront - Project scaffolding for storefronts

use anyhow::Result;
use clap::Parser;
use std::path::PathBuf;
use storefront_core::{
    CreateArgs, FileStore, MemoryStore, PreferenceStore, ProductConfig, ScaffoldError,
};

/// Storefront product configuration
#[derive(Clone)]
pub struct StorefrontConfig;

impl ProductConfig for StorefrontConfig {
    fn name(&self) -> &'static str {
        "create-storefront"
    }

    fn display_name(&self) -> &'static str {
        "Create Storefront"
    }

    fn tooling_package(&self) -> &'static str {
        "@storefront/scripts"
    }

    fn tooling_bin(&self) -> &'static str {
        "storefront-scripts"
    }

    fn templates_dir_env(&self) -> &'static str {
        "CREATE_STOREFRONT_TEMPLATES"
    }

    fn default_archive_url(&self) -> &'static str {
        "https://codeload.github.com"
    }

    fn archive_url_env(&self) -> &'static str {
        "CREATE_STOREFRONT_ARCHIVE_URL"
    }

    fn boilerplate_repo(&self, name: &str) -> String {
        format!("storefront-dev/boilerplate-{}", name)
    }

    fn dev_mode_env(&self) -> &'static str {
        "STOREFRONT_DEV"
    }

    fn config_namespace(&self) -> (&'static str, &'static str, &'static str) {
        ("dev", "storefront", "create-storefront")
    }

    fn docs_url(&self) -> &'static str {
        "https://storefront.dev/docs"
    }
}

#[derive(Parser, Debug)]
#[command(name = "create-storefront")]
#[command(about = "CLI for scaffolding storefront projects")]
#[command(version)]
pub struct Args {
    /// Name of the project to create (also its directory)
    pub project_name: String,

    /// Fetch a ready-made boilerplate instead of answering template questions
    #[arg(long)]
    pub boilerplate: Option<String>,

    /// Install with npm even if yarn is available
    #[arg(long = "use-npm")]
    pub use_npm: bool,

    /// Local directory to use for templates (for development use)
    #[arg(long = "template-dir")]
    pub template_dir: Option<PathBuf>,

    /// Accept stored defaults for every question (non-interactive mode)
    #[arg(short, long)]
    pub yes: bool,

    /// Do not initialize a git repository
    #[arg(long = "no-git")]
    pub no_git: bool,

    /// Print debug output
    #[arg(short, long)]
    pub verbose: bool,
}

impl From<Args> for CreateArgs {
    fn from(args: Args) -> Self {
        CreateArgs {
            project_name: args.project_name,
            boilerplate: args.boilerplate,
            use_npm: args.use_npm,
            template_dir: args.template_dir,
            yes: args.yes,
            no_git: args.no_git,
        }
    }
}

#[tokio::main]
async fn main() {
    // Ensure terminal cursor is restored on panic
    let default_panic = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |info| {
        let _ = console::Term::stderr().show_cursor();
        default_panic(info);
    }));

    // Handle Ctrl+C gracefully
    ctrlc::set_handler(move || {
        let _ = console::Term::stderr().show_cursor();
        std::process::exit(130);
    })
    .ok();

    let args = Args::parse();
    storefront_core::log::set_verbose(args.verbose);

    let result = create(args).await;

    // Ensure cursor is visible on normal exit
    let _ = console::Term::stderr().show_cursor();

    if let Err(e) = result {
        storefront_core::log::error(format!("{:#}", e));
        let code = e
            .downcast_ref::<ScaffoldError>()
            .map_or(1, ScaffoldError::exit_code);
        std::process::exit(code);
    }
}

async fn create(args: Args) -> Result<()> {
    let config = StorefrontConfig;

    let mut store: Box<dyn PreferenceStore> = match FileStore::from_config(&config) {
        Ok(store) => Box::new(store),
        Err(e) => {
            storefront_core::log::warning(format!("Defaults will not be remembered: {:#}", e));
            Box::new(MemoryStore::new())
        }
    };

    storefront_core::run(&config, args.into(), store.as_mut()).await
}
