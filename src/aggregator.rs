use futures::stream::{self, StreamExt, TryStreamExt};
use log::debug;
use serde_json::{Map, Value};
use crate::api::blob::HistoryEntry;
use crate::api::credentials::Credentials;
use crate::api::distribution::Distribution;
use crate::api::error::ApiError;
use crate::api::manifest::Descriptor;
use crate::format::{clean_command, format_bytes, format_date, humanize, short_digest};
use crate::models::{EnvVar, ImageDetail, LayerView, RepositorySummary, TagSummary};
use crate::resolver::{resolve_image_list, resolve_manifest, ResolvedImage};

/// Shown instead of a port list when an image doesn't expose any ports
pub const NO_PORTS: &str = "none";

/// Upper bound of registry requests a single page load keeps in flight
pub const MAX_CONCURRENT_REQUESTS: usize = 100;

/// List all repositories together with their number of tags. The tag lists are fetched in
/// parallel (at most [`MAX_CONCURRENT_REQUESTS`] at a time), the result keeps the catalog order
pub async fn fetch_repositories(distribution: &Distribution, creds: Option<&Credentials>) -> Result<Vec<RepositorySummary>, ApiError> {
    let repositories = distribution.get_catalog(creds).await?;
    debug!("Fetching tag counts of {} repositories", repositories.len());

    let tags = stream::iter(repositories.iter().cloned())
        .map(|name| async move { distribution.repository(&name).get_tags(creds).await })
        .buffered(MAX_CONCURRENT_REQUESTS)
        .try_collect::<Vec<_>>()
        .await?;

    Ok(repositories
        .into_iter()
        .zip(tags)
        .map(|(name, tags)| RepositorySummary { name, tag_count: tags.len() })
        .collect())
}

/// List the tags of a repository with size and creation date, in the order the registry
/// returned them. A repository without tags doesn't cause any manifest requests
pub async fn fetch_tags(distribution: &Distribution, repo: &str, creds: Option<&Credentials>) -> Result<Vec<TagSummary>, ApiError> {
    let tags = distribution.repository(repo).get_tags(creds).await?;
    if tags.is_empty() {
        return Ok(vec![])
    }
    debug!("Fetching details of {} tags in repository '{repo}'", tags.len());

    let images = stream::iter(tags.iter().cloned())
        .map(|tag| async move { fetch_image(distribution, repo, &tag, creds).await })
        .buffered(MAX_CONCURRENT_REQUESTS)
        .try_collect::<Vec<_>>()
        .await?;

    Ok(tags
        .into_iter()
        .zip(images)
        .map(|(tag, image)| TagSummary {
            tag,
            size: image.size,
            size_human: image.size_human,
            created: image.created,
            date: image.date,
        })
        .collect())
}

/// Get the detail of the single-arch manifest a tag points to
pub async fn fetch_image(distribution: &Distribution, repo: &str, tag: &str, creds: Option<&Credentials>) -> Result<ImageDetail, ApiError> {
    let resolved = resolve_manifest(&distribution.repository(repo), tag, creds).await?;
    build_image_detail(resolved)
}

/// Get the details of every platform a tag is available for, in manifest list order
pub async fn fetch_image_list(distribution: &Distribution, repo: &str, tag: &str, creds: Option<&Credentials>) -> Result<Vec<ImageDetail>, ApiError> {
    let resolved = resolve_image_list(&distribution.repository(repo), tag, creds).await?;
    resolved.into_iter().map(build_image_detail).collect()
}

/// Decode a resolved manifest and its config into the displayed image
pub fn build_image_detail(resolved: ResolvedImage) -> Result<ImageDetail, ApiError> {
    let ResolvedImage { manifest, platform, config } = resolved;
    let size = manifest.total_size()?;
    let mut layers = merge_layers(config.history, manifest.layers)?;
    layers.reverse();

    let container = config.config;
    Ok(ImageDetail {
        digest: manifest.digest,
        architecture: config.architecture,
        os: config.os,
        variant: config.variant.or(platform.and_then(|platform| platform.variant)),
        date: config.created.as_ref().map(format_date),
        created: config.created,
        size,
        size_human: format_bytes(size),
        working_dir: container.working_dir.filter(|dir| !dir.is_empty()),
        entrypoint: decode_args(container.entrypoint),
        cmd: decode_args(container.cmd),
        ports: decode_ports(container.exposed_ports.as_ref()),
        env: decode_env(container.env)?,
        layers,
    })
}

/// Pair every non-empty history entry with the next manifest layer, oldest first. Empty-layer
/// entries are kept without a layer. Both sequences have to run out at the same time
pub fn merge_layers(history: Vec<HistoryEntry>, layers: Vec<Descriptor>) -> Result<Vec<LayerView>, ApiError> {
    let expected = history.iter().filter(|entry| !entry.empty_layer).count();
    if expected != layers.len() {
        return Err(ApiError::MalformedData(format!(
            "image history has {expected} non-empty entries but the manifest has {} layers",
            layers.len()
        )))
    }

    let mut layers = layers.into_iter();
    let mut merged = Vec::with_capacity(history.len());
    for entry in history {
        let layer = if entry.empty_layer { None } else { layers.next() };
        merged.push(LayerView {
            date: entry.created.as_ref().map(format_date),
            created: entry.created,
            command: entry.created_by.as_deref().map(clean_command),
            created_by: entry.created_by,
            comment: entry.comment,
            empty_layer: entry.empty_layer,
            short_digest: layer.as_ref().map(|layer| short_digest(&layer.digest)),
            size_human: humanize(layer.as_ref().map(|layer| layer.size)),
            size: layer.as_ref().map(|layer| layer.size),
            digest: layer.map(|layer| layer.digest),
        });
    }
    Ok(merged)
}

/// Join the argv of an entrypoint or cmd for display. Missing and empty argvs yield `None`
pub fn decode_args(args: Option<Vec<String>>) -> Option<String> {
    args.filter(|args| !args.is_empty()).map(|args| args.join(" "))
}

pub fn decode_ports(ports: Option<&Map<String, Value>>) -> String {
    match ports {
        Some(ports) if !ports.is_empty() => ports.keys().cloned().collect::<Vec<_>>().join(", "),
        _ => String::from(NO_PORTS),
    }
}

/// Split `NAME=VALUE` entries at the first `=`
pub fn decode_env(env: Option<Vec<String>>) -> Result<Vec<EnvVar>, ApiError> {
    env.unwrap_or_default()
        .into_iter()
        .map(|entry| match entry.split_once('=') {
            Some((key, value)) => Ok(EnvVar { key: key.to_string(), value: value.to_string() }),
            None => Err(ApiError::MalformedData(format!("environment entry '{entry}' is missing '='"))),
        })
        .collect()
}
