//! Version management for single-package releases.
//!
//! This module provides the `major.minor.patch` version model, next-version
//! resolution and the in-place rewrite of the metadata file's version line.

mod updater;

pub use updater::{apply_version, read_version, replace_version};

use crate::error::{Result, VersionError};
use std::fmt;
use std::str::FromStr;

/// Three-component dotted numeric version (`major.minor.patch`)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct Version {
    /// Major component
    pub major: u64,
    /// Minor component
    pub minor: u64,
    /// Patch component
    pub patch: u64,
}

impl Version {
    /// Return the version with its patch component incremented by one.
    ///
    /// `None` when the patch component is already `u64::MAX`.
    pub fn bump_patch(&self) -> Option<Self> {
        Some(Self {
            patch: self.patch.checked_add(1)?,
            ..*self
        })
    }
}

impl FromStr for Version {
    type Err = VersionError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        let invalid = || VersionError::InvalidVersionFormat {
            version: s.to_string(),
        };

        let parts: Vec<&str> = s.trim().split('.').collect();
        if parts.len() != 3 {
            return Err(invalid());
        }

        let component = |part: &str| part.parse::<u64>().map_err(|_| invalid());
        Ok(Self {
            major: component(parts[0])?,
            minor: component(parts[1])?,
            patch: component(parts[2])?,
        })
    }
}

impl fmt::Display for Version {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}.{}", self.major, self.minor, self.patch)
    }
}

/// Resolve the version to release.
///
/// An explicit version is used verbatim. Otherwise the current version is
/// parsed and its patch component bumped.
pub fn resolve_version(current: &str, explicit: Option<&str>) -> Result<String> {
    if let Some(explicit) = explicit {
        return Ok(explicit.to_string());
    }

    let parsed: Version = current.parse()?;
    let next = parsed
        .bump_patch()
        .ok_or_else(|| VersionError::InvalidVersionFormat {
            version: current.to_string(),
        })?;
    Ok(next.to_string())
}
