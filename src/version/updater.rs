//! Reading and rewriting the version declaration of a metadata file.
//!
//! Only the first `version = "..."` line is touched; every other byte of the
//! file is preserved.

use crate::error::{Result, VersionError};
use regex::Regex;
use std::path::Path;
use std::sync::LazyLock;

static VERSION_LINE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?m)^(?P<prefix>[ \t]*version[ \t]*=[ \t]*)"(?P<version>[^"]+)""#)
        .expect("version line regex is valid")
});

/// Extract the first declared version from metadata file content
pub fn read_version(content: &str) -> Option<&str> {
    VERSION_LINE_RE
        .captures(content)
        .and_then(|caps| caps.name("version"))
        .map(|m| m.as_str())
}

/// Replace the first declared version in `content`.
///
/// Returns `None` when the content has no version declaration.
pub fn replace_version(content: &str, new_version: &str) -> Option<String> {
    let caps = VERSION_LINE_RE.captures(content)?;
    let whole = caps.get(0)?;
    let prefix = caps.name("prefix")?.as_str();

    let mut updated = String::with_capacity(content.len() + new_version.len());
    updated.push_str(&content[..whole.start()]);
    updated.push_str(prefix);
    updated.push('"');
    updated.push_str(new_version);
    updated.push('"');
    updated.push_str(&content[whole.end()..]);
    Some(updated)
}

/// Rewrite the version declaration of the metadata file in place
pub fn apply_version(metadata_path: &Path, new_version: &str) -> Result<()> {
    let content =
        std::fs::read_to_string(metadata_path).map_err(|e| VersionError::UpdateFailed {
            path: metadata_path.to_path_buf(),
            reason: format!("Failed to read file: {}", e),
        })?;

    let updated =
        replace_version(&content, new_version).ok_or_else(|| VersionError::MissingVersion {
            path: metadata_path.to_path_buf(),
        })?;

    if updated == content {
        log::debug!("{} already declares version {}", metadata_path.display(), new_version);
        return Ok(());
    }

    std::fs::write(metadata_path, updated).map_err(|e| VersionError::UpdateFailed {
        path: metadata_path.to_path_buf(),
        reason: format!("Failed to write file: {}", e),
    })?;

    log::info!("Updated {} to version {}", metadata_path.display(), new_version);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    const PYPROJECT: &str = r#"[build-system]
requires = ["hatchling"]

[project]
name = "chroma-mcp-server"
version = "0.2.19"
description = "MCP server"

[tool.other]
version = "9.9.9"
"#;

    #[test]
    fn test_read_version_takes_first_declaration() {
        assert_eq!(read_version(PYPROJECT), Some("0.2.19"));
    }

    #[test]
    fn test_read_version_tolerates_spacing() {
        assert_eq!(read_version("version=\"1.2.3\"\n"), Some("1.2.3"));
        assert_eq!(read_version("  version   =  \"1.2.3\"\n"), Some("1.2.3"));
    }

    #[test]
    fn test_read_version_ignores_suffixed_keys() {
        let content = "target-version = \"py310\"\nversion = \"0.1.0\"\n";
        assert_eq!(read_version(content), Some("0.1.0"));
    }

    #[test]
    fn test_read_version_missing() {
        assert_eq!(read_version("[project]\nname = \"x\"\n"), None);
    }

    #[test]
    fn test_replace_only_first_occurrence() {
        let updated = replace_version(PYPROJECT, "0.2.20").unwrap();
        assert!(updated.contains("version = \"0.2.20\""));
        assert!(updated.contains("version = \"9.9.9\""));
        assert_eq!(updated.len(), PYPROJECT.len());
        assert_eq!(updated.replace("0.2.20", "0.2.19"), PYPROJECT);
    }

    #[test]
    fn test_apply_version_is_idempotent() {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let path = temp_dir.path().join("pyproject.toml");
        std::fs::write(&path, PYPROJECT).unwrap();

        apply_version(&path, "0.3.0").unwrap();
        let first = std::fs::read_to_string(&path).unwrap();
        apply_version(&path, "0.3.0").unwrap();
        let second = std::fs::read_to_string(&path).unwrap();

        assert_eq!(first, second);
        assert_eq!(read_version(&second), Some("0.3.0"));
    }

    #[test]
    fn test_apply_version_without_declaration_fails() {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let path = temp_dir.path().join("pyproject.toml");
        std::fs::write(&path, "[project]\nname = \"x\"\n").unwrap();

        let err = apply_version(&path, "0.3.0").unwrap_err();
        assert!(matches!(
            err,
            crate::error::ReleaseError::Version(VersionError::MissingVersion { .. })
        ));
    }
}
