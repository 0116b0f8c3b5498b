use serde_json::Value;
use crate::api::blob::ImageConfig;
use crate::api::credentials::Credentials;
use crate::api::distribution::Distribution;
use crate::api::error::ApiError;
use crate::api::manifest::{Manifest, ManifestListEntry};
use crate::api::request::get_content_digest;
use crate::api::{ApiTags, BLOB_CONTENT_TYPE, INDEX_CONTENT_TYPE, MANIFEST_CONTENT_TYPE, PAGE_SIZE};

#[derive(Debug, Clone)]
pub struct Repository<'a> {
    pub name: String,
    distribution: &'a Distribution,
}

impl<'a> Repository<'a> {
    pub fn new(name: String, distribution: &'a Distribution) -> Self {
        Self { name, distribution }
    }

    /// Get all tags on this repository. A repository without tags may omit the `tags` field
    /// or send `null`, both yield an empty list
    pub async fn get_tags(&self, creds: Option<&Credentials>) -> Result<Vec<String>, ApiError> {
        let pages = self
            .distribution
            .get_paginated::<ApiTags>(format!("/v2/{}/tags/list?n={PAGE_SIZE}", self.name).as_str(), creds)
            .await?;
        Ok(pages.into_iter().flat_map(|page| page.tags.unwrap_or_default()).collect())
    }

    /// Get a single-arch manifest by its tag or digest
    pub async fn get_manifest(&self, reference: &str, creds: Option<&Credentials>) -> Result<Manifest, ApiError> {
        let (body, digest) = self.fetch_manifest(reference, MANIFEST_CONTENT_TYPE, creds).await?;
        Manifest::from_value(body, digest.or(Some(reference.to_string()).filter(|r| r.contains(':'))))
    }

    /// Get the manifest list of a tag. Registries answer with a single manifest for single-arch
    /// images, in which case it is returned as the only entry
    pub async fn get_manifest_list(&self, tag: &str, creds: Option<&Credentials>) -> Result<Vec<ManifestListEntry>, ApiError> {
        let accept = format!("{MANIFEST_CONTENT_TYPE},{INDEX_CONTENT_TYPE}");
        let (body, digest) = self.fetch_manifest(tag, accept.as_str(), creds).await?;
        ManifestListEntry::parse_list(body, digest)
    }

    /// Get the image config blob by it's digest
    pub async fn get_blob(&self, digest: &str, creds: Option<&Credentials>) -> Result<ImageConfig, ApiError> {
        let blob = self.pull_blob(digest, creds).await?;
        ImageConfig::from_value(blob)
    }

    /// Pull a schemaless blob by it's digest from the registry
    pub async fn pull_blob(&self, digest: &str, creds: Option<&Credentials>) -> Result<Value, ApiError> {
        let resp = self
            .distribution
            .get(format!("/v2/{}/blobs/{digest}", self.name).as_str(), BLOB_CONTENT_TYPE, creds)
            .await?;
        let body = resp.json::<Value>().await?;
        Ok(body)
    }

    async fn fetch_manifest(&self, reference: &str, accept: &str, creds: Option<&Credentials>) -> Result<(Value, Option<String>), ApiError> {
        let resp = self
            .distribution
            .get(format!("/v2/{}/manifests/{reference}", self.name).as_str(), accept, creds)
            .await?;
        let digest = get_content_digest(resp.headers())?;
        let body = resp.json::<Value>().await?;
        Ok((body, digest))
    }
}
