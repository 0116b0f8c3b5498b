use chrono::{DateTime, FixedOffset};

/// Row of the repository overview
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct RepositorySummary {
    pub name: String,
    pub tag_count: usize,
}

/// Row of the tag overview of a repository
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct TagSummary {
    pub tag: String,
    pub size: u64,
    pub size_human: String,
    pub created: Option<DateTime<FixedOffset>>,
    pub date: Option<String>,
}

#[derive(Debug, Clone, Eq, PartialEq)]
pub struct EnvVar {
    pub key: String,
    pub value: String,
}

/// A history entry together with the layer it produced. Empty-layer entries have no digest or size
#[derive(Debug, Clone, Default, Eq, PartialEq)]
pub struct LayerView {
    pub created: Option<DateTime<FixedOffset>>,
    pub date: Option<String>,
    pub created_by: Option<String>,
    pub command: Option<String>,
    pub comment: Option<String>,
    pub empty_layer: bool,
    pub digest: Option<String>,
    pub short_digest: Option<String>,
    pub size: Option<u64>,
    pub size_human: Option<String>,
}

/// Fully resolved view of one platform specific image
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct ImageDetail {
    pub digest: Option<String>,
    pub architecture: String,
    pub os: String,
    pub variant: Option<String>,
    pub created: Option<DateTime<FixedOffset>>,
    pub date: Option<String>,
    pub size: u64,
    pub size_human: String,
    pub working_dir: Option<String>,
    pub entrypoint: Option<String>,
    pub cmd: Option<String>,
    pub ports: String,
    pub env: Vec<EnvVar>,
    /// Newest build step first
    pub layers: Vec<LayerView>,
}

impl ImageDetail {
    /// `os/architecture[/variant]` as shown by `docker manifest inspect`
    pub fn platform(&self) -> String {
        match &self.variant {
            Some(variant) => format!("{}/{}/{variant}", self.os, self.architecture),
            None => format!("{}/{}", self.os, self.architecture),
        }
    }
}
