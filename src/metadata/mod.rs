//! Project root discovery and metadata extraction from `pyproject.toml`

use crate::error::{Result, VersionError};
use regex::Regex;
use std::path::{Path, PathBuf};
use std::sync::LazyLock;

/// Name of the project metadata file
pub const METADATA_FILE: &str = "pyproject.toml";

/// Name of the changelog file
pub const CHANGELOG_FILE: &str = "CHANGELOG.md";

static NAME_LINE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?m)^[ \t]*name[ \t]*=[ \t]*"(?P<name>[^"]+)""#).expect("name line regex is valid")
});

/// Project metadata read once at process start
#[derive(Debug, Clone)]
pub struct ProjectMetadata {
    /// Project root directory
    pub root: PathBuf,

    /// Package name as known to the package index
    pub package_name: String,

    /// Version currently declared in the metadata file
    pub current_version: String,
}

impl ProjectMetadata {
    /// Load metadata from the project rooted at `root`
    pub fn load(root: &Path) -> Result<Self> {
        let metadata_path = root.join(METADATA_FILE);
        let content = std::fs::read_to_string(&metadata_path)?;

        let current_version = crate::version::read_version(&content)
            .ok_or_else(|| VersionError::MissingVersion {
                path: metadata_path.clone(),
            })?
            .to_string();

        let package_name = package_name_from(&content).unwrap_or_else(|| {
            let fallback = root
                .file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_default();
            log::warn!(
                "No package name in {}, falling back to directory name '{}'",
                metadata_path.display(),
                fallback
            );
            fallback
        });

        Ok(Self {
            root: root.to_path_buf(),
            package_name,
            current_version,
        })
    }

    /// Path to the metadata file
    pub fn metadata_path(&self) -> PathBuf {
        self.root.join(METADATA_FILE)
    }

    /// Path to the changelog file
    pub fn changelog_path(&self) -> PathBuf {
        self.root.join(CHANGELOG_FILE)
    }
}

/// Package name from `[project].name`, falling back to the first `name = "..."` line
fn package_name_from(content: &str) -> Option<String> {
    match toml::from_str::<toml::Value>(content) {
        Ok(value) => {
            if let Some(name) = value
                .get("project")
                .and_then(|p| p.get("name"))
                .and_then(|v| v.as_str())
            {
                return Some(name.to_string());
            }
        }
        Err(e) => log::debug!("Metadata is not valid TOML, scanning lines instead: {}", e),
    }

    NAME_LINE_RE
        .captures(content)
        .and_then(|caps| caps.name("name"))
        .map(|m| m.as_str().to_string())
}

/// Walk upward from `start` to the first directory holding the metadata file.
///
/// Falls back to `start` when no ancestor has one.
pub fn find_project_root(start: &Path) -> PathBuf {
    start
        .ancestors()
        .find(|dir| dir.join(METADATA_FILE).is_file())
        .unwrap_or(start)
        .to_path_buf()
}
