use futures::future::try_join_all;
use log::debug;
use crate::api::blob::ImageConfig;
use crate::api::credentials::Credentials;
use crate::api::error::ApiError;
use crate::api::manifest::{Manifest, ManifestListEntry, Platform};
use crate::api::repository::Repository;

/// A concrete manifest together with its config blob
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedImage {
    pub manifest: Manifest,
    /// Platform announced by the manifest list, if the image came from one
    pub platform: Option<Platform>,
    pub config: ImageConfig,
}

/// Resolve a single-arch manifest by tag or digest down to its config blob
pub async fn resolve_manifest(repository: &Repository<'_>, reference: &str, creds: Option<&Credentials>) -> Result<ResolvedImage, ApiError> {
    let manifest = repository.get_manifest(reference, creds).await?;
    let config = repository.get_blob(&manifest.config.digest, creds).await?;
    Ok(ResolvedImage { manifest, platform: None, config })
}

/// Resolve one manifest list entry. References are fetched first, embedded manifests
/// go straight to the blob lookup
pub async fn resolve_entry(repository: &Repository<'_>, entry: ManifestListEntry, creds: Option<&Credentials>) -> Result<ResolvedImage, ApiError> {
    let (manifest, platform) = match entry {
        ManifestListEntry::Manifest(manifest) => (manifest, None),
        ManifestListEntry::Reference(reference) => {
            let mut manifest = repository.get_manifest(&reference.digest, creds).await?;
            manifest.digest = Some(reference.digest);
            (manifest, reference.platform)
        }
    };
    let config = repository.get_blob(&manifest.config.digest, creds).await?;
    Ok(ResolvedImage { manifest, platform, config })
}

/// Resolve every platform of a tag in parallel. The result keeps the order of the manifest list
pub async fn resolve_image_list(repository: &Repository<'_>, tag: &str, creds: Option<&Credentials>) -> Result<Vec<ResolvedImage>, ApiError> {
    let entries = repository.get_manifest_list(tag, creds).await?;
    debug!("Resolving {} manifests of '{}:{tag}'", entries.len(), repository.name);
    let requests = entries
        .into_iter()
        .map(|entry| resolve_entry(repository, entry, creds));
    try_join_all(requests).await
}
