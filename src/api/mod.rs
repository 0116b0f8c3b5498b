use serde::Deserialize;
use crate::api::credentials::Credentials;

pub mod blob;
pub mod credentials;
pub mod distribution;
pub mod error;
pub mod manifest;
pub mod repository;
mod request;

pub const INDEX_CONTENT_TYPE: &str = "application/vnd.oci.image.index.v1+json,application/vnd.docker.distribution.manifest.list.v2+json";
pub const MANIFEST_CONTENT_TYPE: &str = "application/vnd.docker.distribution.manifest.v2+json,application/vnd.oci.image.manifest.v1+json";
pub const BLOB_CONTENT_TYPE: &str = "application/vnd.docker.container.image.v1+json,application/vnd.oci.image.config.v1+json,application/json";
/// Page size requested from the paginated list endpoints
pub const PAGE_SIZE: usize = 100;
pub const USER_AGENT: &str = concat!("regview/", env!("CARGO_PKG_VERSION"));

#[derive(Deserialize, Debug)]
pub struct ApiCatalog {
    #[serde(default)]
    pub repositories: Option<Vec<String>>,
}

#[derive(Deserialize, Debug)]
pub struct ApiTags {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub tags: Option<Vec<String>>,
}

#[derive(Debug, Clone, Eq, PartialEq)]
pub struct DistributionConfig {
    base_url: String,
    credentials: Option<Credentials>,
}

impl DistributionConfig {
    pub fn new(base_url: impl Into<String>, credentials: Option<Credentials>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self { base_url, credentials }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Build an absolute url for a registry path. Absolute urls (e.g. from a `Link` header)
    /// are returned unchanged
    pub fn url(&self, rest: &str) -> String {
        if rest.starts_with("http://") || rest.starts_with("https://") {
            rest.to_string()
        } else {
            format!("{}{}", self.base_url, rest)
        }
    }

    /// Credentials of the current call take precedence over the configured ones
    pub fn credentials<'a>(&'a self, creds: Option<&'a Credentials>) -> Option<&'a Credentials> {
        creds.or(self.credentials.as_ref())
    }
}
