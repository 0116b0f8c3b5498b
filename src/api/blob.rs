use chrono::{DateTime, FixedOffset};
use serde::Deserialize;
use serde_json::{Map, Value};
use crate::api::error::ApiError;

/// The image config blob a manifest points to
///
/// **Note:** <br>
/// Only the fields needed for displaying an image are deserialized. Unknown fields are ignored
#[derive(Deserialize, Debug, Clone, PartialEq)]
pub struct ImageConfig {
    #[serde(default)]
    pub architecture: String,
    #[serde(default)]
    pub os: String,
    #[serde(default)]
    pub variant: Option<String>,
    #[serde(default)]
    pub created: Option<DateTime<FixedOffset>>,
    pub config: ContainerConfig,
    #[serde(default)]
    pub history: Vec<HistoryEntry>,
}

impl ImageConfig {
    pub fn from_value(value: Value) -> Result<Self, ApiError> {
        serde_json::from_value::<ImageConfig>(value)
            .map_err(|err| ApiError::MalformedData(format!("invalid image config: {err}")))
    }
}

#[derive(Deserialize, Debug, Clone, Default, PartialEq)]
#[serde(rename_all = "PascalCase")]
pub struct ContainerConfig {
    #[serde(default)]
    pub entrypoint: Option<Vec<String>>,
    #[serde(default)]
    pub cmd: Option<Vec<String>>,
    /// Keys are the ports in `<port>/<proto>` form, kept in the order of the blob
    #[serde(default)]
    pub exposed_ports: Option<Map<String, Value>>,
    #[serde(default)]
    pub env: Option<Vec<String>>,
    #[serde(default)]
    pub working_dir: Option<String>,
}

/// One build step of the image. Steps which didn't touch the filesystem are marked with `empty_layer`
#[derive(Deserialize, Debug, Clone, Default, PartialEq)]
pub struct HistoryEntry {
    #[serde(default)]
    pub created: Option<DateTime<FixedOffset>>,
    #[serde(default)]
    pub created_by: Option<String>,
    #[serde(default)]
    pub comment: Option<String>,
    #[serde(default)]
    pub empty_layer: bool,
}
