//! Working-copy cache
//!
//! Each remote repository gets one working copy under the cache root, laid
//! out as `<root>/<host>/<owner…>/<repo>`. Local paths and `file://` URLs
//! land under the `local` host.

use crate::error::{Error, Result};
use crate::platform::parse_remote_url;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Resolves cached working-copy locations
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepoCache {
    root: PathBuf,
}

impl RepoCache {
    /// Cache rooted at `root`
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Cache rooted at `configured`, or the platform cache directory
    pub fn from_setting(configured: Option<&Path>) -> Self {
        configured.map_or_else(Self::default_root, Self::new)
    }

    /// `<cache dir>/gimer/repos`, or under the temp dir if there is none
    pub fn default_root() -> Self {
        let base = dirs::cache_dir().unwrap_or_else(std::env::temp_dir);
        Self::new(base.join("gimer").join("repos"))
    }

    /// Cache root
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Location of the working copy for `url`, without touching the disk
    pub fn path_for(&self, url: &str) -> Result<PathBuf> {
        let loc = parse_remote_url(url).ok_or_else(|| Error::UnsupportedUrl(url.to_string()))?;
        let mut path = self.root.join(&loc.host);
        path.extend(loc.owner.split('/'));
        path.push(&loc.repo);
        Ok(path)
    }

    /// Location of the working copy for `url`, with its directories created
    pub fn repo_path(&self, url: &str) -> Result<PathBuf> {
        let path = self.path_for(url)?;
        fs::create_dir_all(&path)
            .map_err(|e| Error::Cache(format!("cannot create {}: {e}", path.display())))?;
        debug!(url, path = %path.display(), "resolved cache path");
        Ok(path)
    }

    /// Remove a cached working copy; a missing directory is fine
    pub fn cleanup_repository(&self, path: &Path) -> Result<()> {
        if !path.starts_with(&self.root) {
            return Err(Error::Cache(format!(
                "refusing to remove {} outside the cache root",
                path.display()
            )));
        }
        match fs::remove_dir_all(path) {
            Ok(()) => {
                debug!(path = %path.display(), "removed cached working copy");
                Ok(())
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(Error::Cache(format!(
                "cannot remove {}: {e}",
                path.display()
            ))),
        }
    }
}
