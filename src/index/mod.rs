//! Package index metadata queries.
//!
//! Answers "is this version already on the index?" against the JSON metadata
//! endpoint (`{base_url}/{package}/json`). Failures never block a release:
//! anything other than a definite answer is treated as "absent".

use serde::Deserialize;
use std::collections::HashMap;
use std::fmt;
use std::time::Duration;

/// Default staging index repository name
pub const DEFAULT_STAGING_NAME: &str = "testpypi";
/// Default staging index metadata endpoint
pub const DEFAULT_STAGING_URL: &str = "https://test.pypi.org/pypi";
/// Default production index repository name
pub const DEFAULT_PRODUCTION_NAME: &str = "pypi";
/// Default production index metadata endpoint
pub const DEFAULT_PRODUCTION_URL: &str = "https://pypi.org/pypi";

/// Which publish phase an index belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IndexKind {
    /// Pre-production registry
    Staging,
    /// Public registry
    Production,
}

impl fmt::Display for IndexKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            IndexKind::Staging => write!(f, "staging"),
            IndexKind::Production => write!(f, "production"),
        }
    }
}

/// A package index the release can publish to
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PackageIndex {
    /// Phase this index serves
    pub kind: IndexKind,
    /// Repository name handed to the publish tool
    pub name: String,
    /// Base URL of the JSON metadata API
    pub base_url: String,
}

impl PackageIndex {
    /// Default staging index (TestPyPI)
    pub fn staging() -> Self {
        Self {
            kind: IndexKind::Staging,
            name: DEFAULT_STAGING_NAME.to_string(),
            base_url: DEFAULT_STAGING_URL.to_string(),
        }
    }

    /// Default production index (PyPI)
    pub fn production() -> Self {
        Self {
            kind: IndexKind::Production,
            name: DEFAULT_PRODUCTION_NAME.to_string(),
            base_url: DEFAULT_PRODUCTION_URL.to_string(),
        }
    }

    /// Metadata endpoint for `package`
    pub fn metadata_url(&self, package: &str) -> String {
        format!("{}/{}/json", self.base_url.trim_end_matches('/'), package)
    }
}

impl fmt::Display for PackageIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({} index)", self.name, self.kind)
    }
}

/// Existence check against a package index
#[allow(async_fn_in_trait)]
pub trait IndexClient {
    /// Whether `version` of `package` is already present on `index`.
    ///
    /// Must not fail: an inconclusive query reports `false`.
    async fn check_remote_version(&self, index: &PackageIndex, package: &str, version: &str)
    -> bool;
}

/// Subset of the index's package metadata document
#[derive(Debug, Deserialize)]
struct ProjectDocument {
    #[serde(default)]
    releases: HashMap<String, serde_json::Value>,
}

/// HTTP implementation of [`IndexClient`]
#[derive(Debug, Clone)]
pub struct HttpIndexClient {
    client: reqwest::Client,
}

impl HttpIndexClient {
    /// Create a client whose requests time out after `timeout`
    pub fn new(timeout: Duration) -> std::result::Result<Self, reqwest::Error> {
        let client = reqwest::Client::builder()
            .user_agent(concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")))
            .timeout(timeout)
            .build()?;
        Ok(Self { client })
    }

    async fn fetch_releases(
        &self,
        url: &str,
    ) -> std::result::Result<Option<ProjectDocument>, String> {
        let response = self.client.get(url).send().await.map_err(|e| e.to_string())?;

        let status = response.status();
        if status == reqwest::StatusCode::NOT_FOUND {
            return Ok(None);
        }
        if !status.is_success() {
            return Err(format!("HTTP {}", status.as_u16()));
        }

        response
            .json::<ProjectDocument>()
            .await
            .map(Some)
            .map_err(|e| format!("invalid metadata document: {}", e))
    }
}

impl IndexClient for HttpIndexClient {
    async fn check_remote_version(
        &self,
        index: &PackageIndex,
        package: &str,
        version: &str,
    ) -> bool {
        let url = index.metadata_url(package);
        log::debug!("Querying {}", url);

        match self.fetch_releases(&url).await {
            Ok(Some(document)) => document.releases.contains_key(version),
            Ok(None) => {
                log::debug!("{} is not on {} yet", package, index.name);
                false
            }
            Err(reason) => {
                log::warn!("Could not check version on {}: {}", index.name, reason);
                false
            }
        }
    }
}
