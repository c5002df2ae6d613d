//! Changelog entry insertion.
//!
//! Each release gets a dated `## [X.Y.Z]` section with empty Added, Fixed and
//! Changed lists. A version is never inserted twice.

use crate::error::{ChangelogError, Result};
use chrono::NaiveDate;
use std::path::Path;

/// Header written to a freshly created changelog
pub const CHANGELOG_HEADER: &str = "# Changelog\n\n";

/// Prefix shared by every version section
const ENTRY_PREFIX: &str = "## [";

/// Outcome of a changelog update
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChangelogUpdate {
    /// A new entry was written
    Inserted,
    /// An entry for the version already existed
    Skipped,
}

/// Render the entry for `version` released on `date`
pub fn render_entry(version: &str, date: NaiveDate) -> String {
    format!(
        "## [{version}] - {}\n\n**Added:**\n- \n\n**Fixed:**\n- \n\n**Changed:**\n- \n\n",
        date.format("%Y-%m-%d")
    )
}

/// Whether `content` already has a section for `version`
pub fn has_entry(content: &str, version: &str) -> bool {
    content.contains(&format!("{ENTRY_PREFIX}{version}]"))
}

/// Insert the entry for `version` into `content`.
///
/// Returns `None` when an entry for the version is already present.
pub fn insert_entry(content: &str, version: &str, date: NaiveDate) -> Option<String> {
    if has_entry(content, version) {
        return None;
    }

    let entry = render_entry(version, date);

    if let Some(at) = first_entry_offset(content) {
        let mut updated = String::with_capacity(content.len() + entry.len());
        updated.push_str(&content[..at]);
        updated.push_str(&entry);
        updated.push_str(&content[at..]);
        return Some(updated);
    }

    match header_end_offset(content) {
        Some((at, blank_line)) => {
            let mut updated = String::with_capacity(content.len() + entry.len() + 2);
            updated.push_str(&content[..at]);
            if !blank_line {
                if !content[..at].ends_with('\n') {
                    updated.push('\n');
                }
                updated.push('\n');
            }
            updated.push_str(&entry);
            updated.push_str(&content[at..]);
            Some(updated)
        }
        None => Some(format!("{CHANGELOG_HEADER}{entry}{content}")),
    }
}

/// Byte offset of the first line starting with `## [`
fn first_entry_offset(content: &str) -> Option<usize> {
    line_offsets(content).find(|&(_, line)| line.starts_with(ENTRY_PREFIX)).map(|(at, _)| at)
}

/// Byte offset just past the top-level header and the blank line after it,
/// and whether that blank line exists
fn header_end_offset(content: &str) -> Option<(usize, bool)> {
    let mut lines = line_offsets(content);
    let (start, header) = lines.find(|&(_, line)| line.starts_with("# "))?;
    let mut end = start + header.len();

    let mut blank_line = false;

    if let Some((at, next)) = lines.next()
        && next.trim().is_empty()
    {
        end = at + next.len();
        blank_line = true;
    }
    Some((end, blank_line))
}

/// Lines with their byte offsets, terminators included
fn line_offsets(content: &str) -> impl Iterator<Item = (usize, &str)> {
    content.split_inclusive('\n').scan(0, |offset, line| {
        let at = *offset;
        *offset += line.len();
        Some((at, line))
    })
}

/// Add a dated entry for `version` to the changelog at `path`.
///
/// Creates the file with a `# Changelog` header if it does not exist.
pub fn apply_changelog(path: &Path, version: &str, date: NaiveDate) -> Result<ChangelogUpdate> {
    let update_failed = |reason: String| ChangelogError::UpdateFailed {
        path: path.to_path_buf(),
        reason,
    };

    if !path.exists() {
        log::info!("{} not found, creating it", path.display());
        std::fs::write(path, CHANGELOG_HEADER)
            .map_err(|e| update_failed(format!("Failed to create file: {}", e)))?;
    }

    let content = std::fs::read_to_string(path)
        .map_err(|e| update_failed(format!("Failed to read file: {}", e)))?;

    let Some(updated) = insert_entry(&content, version, date) else {
        log::info!("{} already has an entry for {}", path.display(), version);
        return Ok(ChangelogUpdate::Skipped);
    };

    std::fs::write(path, updated)
        .map_err(|e| update_failed(format!("Failed to write file: {}", e)))?;

    Ok(ChangelogUpdate::Inserted)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 5, 4).unwrap()
    }

    #[test]
    fn test_render_entry() {
        let entry = render_entry("0.2.20", date());
        assert!(entry.starts_with("## [0.2.20] - 2025-05-04\n\n"));
        assert!(entry.contains("**Added:**\n- \n\n"));
        assert!(entry.contains("**Fixed:**\n- \n\n"));
        assert!(entry.ends_with("**Changed:**\n- \n\n"));
    }

    #[test]
    fn test_insert_before_first_entry() {
        let content = "# Changelog\n\nSome intro.\n\n## [0.2.19] - 2025-04-01\n\n- old\n";
        let updated = insert_entry(content, "0.2.20", date()).unwrap();

        let new_at = updated.find("## [0.2.20]").unwrap();
        let old_at = updated.find("## [0.2.19]").unwrap();
        assert!(new_at < old_at);
        assert!(updated.starts_with("# Changelog\n\nSome intro.\n\n## [0.2.20]"));
        assert!(updated.ends_with("## [0.2.19] - 2025-04-01\n\n- old\n"));
    }

    #[test]
    fn test_insert_after_header_when_no_entries() {
        let updated = insert_entry("# Changelog\n\n", "0.1.0", date()).unwrap();
        assert_eq!(updated, format!("# Changelog\n\n{}", render_entry("0.1.0", date())));
    }

    #[test]
    fn test_insert_after_custom_header_without_blank_line() {
        let updated = insert_entry("# Release notes", "0.1.0", date()).unwrap();
        assert_eq!(updated, format!("# Release notes\n\n{}", render_entry("0.1.0", date())));
    }

    #[test]
    fn test_insert_after_crlf_header_adds_no_extra_line() {
        let updated = insert_entry("# Changelog\r\n\r\n", "0.1.0", date()).unwrap();
        assert_eq!(updated, format!("# Changelog\r\n\r\n{}", render_entry("0.1.0", date())));
    }

    #[test]
    fn test_insert_without_header_prepends_one() {
        let updated = insert_entry("notes\n", "0.1.0", date()).unwrap();
        assert!(updated.starts_with("# Changelog\n\n## [0.1.0]"));
        assert!(updated.ends_with("notes\n"));
    }

    #[test]
    fn test_insert_skips_existing_version() {
        let content = "# Changelog\n\n## [0.2.20] - 2025-05-01\n";
        assert!(insert_entry(content, "0.2.20", date()).is_none());
    }

    #[test]
    fn test_apply_creates_missing_file() {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let path = temp_dir.path().join("CHANGELOG.md");

        let outcome = apply_changelog(&path, "0.2.20", date()).unwrap();
        assert_eq!(outcome, ChangelogUpdate::Inserted);

        let content = std::fs::read_to_string(&path).unwrap();
        assert_eq!(content, format!("# Changelog\n\n{}", render_entry("0.2.20", date())));
    }

    #[test]
    fn test_apply_is_idempotent() {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let path = temp_dir.path().join("CHANGELOG.md");

        assert_eq!(apply_changelog(&path, "1.0.0", date()).unwrap(), ChangelogUpdate::Inserted);
        let first = std::fs::read_to_string(&path).unwrap();
        assert_eq!(apply_changelog(&path, "1.0.0", date()).unwrap(), ChangelogUpdate::Skipped);
        let second = std::fs::read_to_string(&path).unwrap();

        assert_eq!(first, second);
        assert_eq!(second.matches("## [1.0.0]").count(), 1);
    }
}
