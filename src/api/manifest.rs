use serde::Deserialize;
use serde_json::Value;
use crate::api::error::ApiError;

/// Content descriptor as used for the config blob and the layers of a manifest
#[derive(Deserialize, Debug, Clone, Eq, PartialEq)]
pub struct Descriptor {
    #[serde(rename = "mediaType", default)]
    pub media_type: Option<String>,
    pub digest: String,
    pub size: u64,
}

#[derive(Deserialize, Debug, Clone, Eq, PartialEq)]
pub struct Platform {
    pub architecture: String,
    pub os: String,
    #[serde(default)]
    pub variant: Option<String>,
}

/// A single-platform image manifest (docker v2 schema 2 or oci)
#[derive(Deserialize, Debug, Clone, Eq, PartialEq)]
pub struct Manifest {
    #[serde(rename = "schemaVersion", default)]
    pub schema_version: Option<u32>,
    #[serde(rename = "mediaType", default)]
    pub media_type: Option<String>,
    pub config: Descriptor,
    #[serde(default)]
    pub layers: Vec<Descriptor>,
    /// Taken from the `Docker-Content-Digest` header or the manifest list, not the body
    #[serde(skip)]
    pub digest: Option<String>,
}

impl Manifest {
    /// Declared size of the config blob plus all layers
    pub fn total_size(&self) -> Result<u64, ApiError> {
        self.layers
            .iter()
            .try_fold(self.config.size, |total, layer| total.checked_add(layer.size))
            .ok_or_else(|| ApiError::MalformedData(String::from("manifest sizes exceed the supported range")))
    }

    pub fn from_value(value: Value, digest: Option<String>) -> Result<Self, ApiError> {
        let mut manifest = serde_json::from_value::<Manifest>(value)
            .map_err(|err| ApiError::MalformedData(format!("invalid manifest: {err}")))?;
        manifest.digest = digest;
        Ok(manifest)
    }
}

/// Entry of a manifest list which only points to the platform specific manifest
#[derive(Deserialize, Debug, Clone, Eq, PartialEq)]
pub struct ManifestReference {
    pub digest: String,
    #[serde(rename = "mediaType", default)]
    pub media_type: Option<String>,
    #[serde(default)]
    pub size: Option<u64>,
    #[serde(default)]
    pub platform: Option<Platform>,
}

/// One element of a manifest list response. Entries carrying a `config` are complete manifests,
/// everything else is a reference which needs another manifest request
#[derive(Debug, Clone, Eq, PartialEq)]
pub enum ManifestListEntry {
    Manifest(Manifest),
    Reference(ManifestReference),
}

impl ManifestListEntry {
    pub fn from_value(value: Value) -> Result<Self, ApiError> {
        if value.get("config").is_some() {
            Manifest::from_value(value, None).map(ManifestListEntry::Manifest)
        } else {
            serde_json::from_value::<ManifestReference>(value)
                .map(ManifestListEntry::Reference)
                .map_err(|err| ApiError::MalformedData(format!("invalid manifest list entry: {err}")))
        }
    }

    /// Split a manifest or manifest list body into its entries. A body without `manifests` is
    /// a single manifest and becomes the only entry
    pub fn parse_list(body: Value, digest: Option<String>) -> Result<Vec<Self>, ApiError> {
        match body.get("manifests") {
            Some(Value::Array(manifests)) => manifests
                .iter()
                .cloned()
                .map(ManifestListEntry::from_value)
                .collect(),
            Some(_) => Err(ApiError::MalformedData(String::from("'manifests' is not a list"))),
            None => Manifest::from_value(body, digest).map(|manifest| vec![ManifestListEntry::Manifest(manifest)]),
        }
    }
}
