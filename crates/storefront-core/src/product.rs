//! Product configuration trait for CLI binaries
//!
//! The core library never hard-codes product identity. The binary implements
//! this trait once and hands it to the scaffolding flow.

/// Configuration trait for the scaffolding product
///
/// Defines:
/// - Product identity (name, display name)
/// - The companion tooling package installed into every project
/// - Where templates and boilerplates come from
/// - Where user preferences are persisted
pub trait ProductConfig: Clone + Send + Sync + 'static {
    /// Internal product name (used for the CLI command and commit messages)
    fn name(&self) -> &'static str;

    /// Human-readable display name
    fn display_name(&self) -> &'static str;

    /// npm package holding the project's scripts and template variants
    fn tooling_package(&self) -> &'static str;

    /// Binary exposed by the tooling package, used in generated scripts
    fn tooling_bin(&self) -> &'static str;

    /// Environment variable overriding the local templates root
    fn templates_dir_env(&self) -> &'static str;

    /// Base URL serving repository zip archives
    fn default_archive_url(&self) -> &'static str;

    /// Environment variable overriding the archive base URL
    fn archive_url_env(&self) -> &'static str;

    /// Repository reference (`owner/repo[#ref]`) for a named boilerplate
    fn boilerplate_repo(&self, name: &str) -> String;

    /// Environment variable that enables developer mode (local link of the
    /// tooling package instead of a registry install)
    fn dev_mode_env(&self) -> &'static str;

    /// `(qualifier, organization, application)` for the preference directory
    fn config_namespace(&self) -> (&'static str, &'static str, &'static str);

    /// URL for product documentation
    fn docs_url(&self) -> &'static str;

    /// User agent string for HTTP requests
    fn user_agent(&self) -> &'static str {
        self.name()
    }

    /// Whether developer mode is enabled in the current environment
    fn dev_mode(&self) -> bool {
        std::env::var(self.dev_mode_env())
            .map(|v| !v.is_empty() && v != "0" && !v.eq_ignore_ascii_case("false"))
            .unwrap_or(false)
    }
}
