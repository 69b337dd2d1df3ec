//! Remote boilerplate fetching
//!
//! Boilerplates are downloaded as a zip archive of the repository and unpacked
//! into the destination. No git history is carried over.

use crate::product::ProductConfig;
use anyhow::{Context, Result};
use std::io::{Cursor, Read};
use std::path::{Component, Path, PathBuf};
use url::Url;
use zip::ZipArchive;

/// Repository reference, `owner/repo` with an optional `#ref`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepoRef {
    pub owner: String,
    pub repo: String,
    pub reference: String,
}

impl RepoRef {
    pub fn parse(input: &str) -> Result<Self> {
        let (path, reference) = match input.split_once('#') {
            Some((path, reference)) if !reference.is_empty() => (path, reference),
            Some((path, _)) => (path, "HEAD"),
            None => (input, "HEAD"),
        };
        let mut parts = path.trim_matches('/').split('/');
        match (parts.next(), parts.next(), parts.next()) {
            (Some(owner), Some(repo), None) if !owner.is_empty() && !repo.is_empty() => Ok(Self {
                owner: owner.to_string(),
                repo: repo.trim_end_matches(".git").to_string(),
                reference: reference.to_string(),
            }),
            _ => anyhow::bail!(
                "Invalid repository reference '{}', expected owner/repo[#ref]",
                input
            ),
        }
    }
}

/// Fetches a repository into a destination directory
#[allow(async_fn_in_trait)]
pub trait RepoCloner {
    async fn clone_into(&self, repo: &str, dest: &Path) -> Result<()>;
}

/// Downloads `<base>/<owner>/<repo>/zip/<ref>` and extracts it
pub struct ArchiveCloner {
    base_url: Url,
    client: reqwest::Client,
}

impl ArchiveCloner {
    /// Create a cloner with a custom user agent
    pub fn new(base_url: Url, user_agent: &str) -> Self {
        Self {
            base_url,
            client: reqwest::Client::builder()
                .user_agent(user_agent)
                .build()
                .unwrap_or_else(|_| reqwest::Client::new()),
        }
    }

    /// Create a cloner from a product config (env override first)
    pub fn from_config<C: ProductConfig>(config: &C) -> Result<Self> {
        let url_str = std::env::var(config.archive_url_env())
            .unwrap_or_else(|_| config.default_archive_url().to_string());
        let url =
            Url::parse(&url_str).with_context(|| format!("Invalid archive URL: {}", url_str))?;
        Ok(Self::new(url, config.user_agent()))
    }

    /// Build the archive URL, preserving any query parameters of the base
    pub fn archive_url(&self, repo: &RepoRef) -> Result<Url> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| anyhow::anyhow!("URL cannot have path segments: {}", self.base_url))?
            .pop_if_empty()
            .extend([repo.owner.as_str(), repo.repo.as_str(), "zip", repo.reference.as_str()]);
        Ok(url)
    }
}

impl RepoCloner for ArchiveCloner {
    async fn clone_into(&self, repo: &str, dest: &Path) -> Result<()> {
        let repo = RepoRef::parse(repo)?;
        let url = self.archive_url(&repo)?;

        let response = self
            .client
            .get(url.clone())
            .send()
            .await
            .with_context(|| format!("Failed to fetch boilerplate archive from {}", url))?;

        if !response.status().is_success() {
            anyhow::bail!(
                "Failed to fetch boilerplate '{}/{}' from {}: HTTP {}",
                repo.owner,
                repo.repo,
                url,
                response.status()
            );
        }

        let bytes = response.bytes().await?;
        extract_archive(&bytes, dest)
    }
}

/// Unpack a repository archive into `dest`
///
/// Repository archives wrap everything in a single `<repo>-<ref>/` directory;
/// that level is stripped.
pub fn extract_archive(zip_bytes: &[u8], dest: &Path) -> Result<()> {
    let mut archive =
        ZipArchive::new(Cursor::new(zip_bytes)).context("Failed to read boilerplate archive")?;

    std::fs::create_dir_all(dest)
        .with_context(|| format!("Failed to create directory: {}", dest.display()))?;

    for i in 0..archive.len() {
        let mut file = archive.by_index(i)?;
        let Some(relative) = strip_top_level(file.name()) else {
            continue;
        };
        let target = dest.join(&relative);

        if file.is_dir() {
            std::fs::create_dir_all(&target)
                .with_context(|| format!("Failed to create directory: {}", target.display()))?;
            continue;
        }

        if let Some(parent) = target.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
        }

        let mut contents = Vec::new();
        file.read_to_end(&mut contents)?;
        std::fs::write(&target, &contents)
            .with_context(|| format!("Failed to write file: {}", target.display()))?;
    }

    Ok(())
}

/// Drop the first path component; reject anything escaping the destination
fn strip_top_level(name: &str) -> Option<PathBuf> {
    let path = Path::new(name);
    let mut components = path.components();
    components.next()?;
    let rest: PathBuf = components.collect();
    if rest.as_os_str().is_empty() {
        return None;
    }
    if rest
        .components()
        .any(|c| !matches!(c, Component::Normal(_)))
    {
        return None;
    }
    Some(rest)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::TempDir;
    use zip::write::SimpleFileOptions;
    use zip::ZipWriter;

    fn archive(entries: &[(&str, &str)]) -> Vec<u8> {
        let mut buffer = Vec::new();
        {
            let mut zip = ZipWriter::new(Cursor::new(&mut buffer));
            let options = SimpleFileOptions::default();
            for (name, content) in entries {
                zip.start_file(*name, options).unwrap();
                zip.write_all(content.as_bytes()).unwrap();
            }
            zip.finish().unwrap();
        }
        buffer
    }

    #[test]
    fn test_parse_repo_ref() {
        let r = RepoRef::parse("storefront-dev/boilerplate-minimal#v2").unwrap();
        assert_eq!(r.owner, "storefront-dev");
        assert_eq!(r.repo, "boilerplate-minimal");
        assert_eq!(r.reference, "v2");

        assert_eq!(RepoRef::parse("a/b").unwrap().reference, "HEAD");
        assert_eq!(RepoRef::parse("a/b.git").unwrap().repo, "b");
    }

    #[test]
    fn test_parse_rejects_malformed() {
        assert!(RepoRef::parse("justaname").is_err());
        assert!(RepoRef::parse("a/b/c").is_err());
        assert!(RepoRef::parse("/b").is_err());
    }

    #[test]
    fn test_archive_url() {
        let cloner = ArchiveCloner::new(
            Url::parse("https://codeload.github.com").unwrap(),
            "test-agent",
        );
        let url = cloner
            .archive_url(&RepoRef::parse("owner/repo#main").unwrap())
            .unwrap();
        assert_eq!(url.as_str(), "https://codeload.github.com/owner/repo/zip/main");
    }

    #[test]
    fn test_extract_strips_top_level_directory() {
        let tmp = TempDir::new().unwrap();
        let bytes = archive(&[
            ("repo-main/package.json", "{}"),
            ("repo-main/pages/index.js", "export default 1"),
        ]);

        extract_archive(&bytes, tmp.path()).unwrap();

        assert!(tmp.path().join("package.json").is_file());
        assert!(tmp.path().join("pages/index.js").is_file());
        assert!(!tmp.path().join("repo-main").exists());
    }
}
