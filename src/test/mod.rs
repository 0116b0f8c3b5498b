use serde_json::{json, Value};
use wiremock::matchers::{method, path};
use wiremock::{Match, Mock, MockServer, Request, ResponseTemplate};
use crate::api::distribution::Distribution;
use crate::api::DistributionConfig;

pub const DIGEST_A: &str = "sha256:a3ed95caeb02ffe68cdd9fd84406680ae93d633cb16422d00e8a7c22955b46d4";
pub const DIGEST_B: &str = "sha256:b5b2b2c507a0944348e0303114d8d93aaaa081732b86451d9bce1f432a537bc7";
pub const DIGEST_C: &str = "sha256:c0ffee0123456789abcdef0123456789abcdef0123456789abcdef0123456789";
pub const DIGEST_D: &str = "sha256:d00d0123456789abcdef0123456789abcdef0123456789abcdef0123456789";

pub fn get_distribution(server: &MockServer) -> Distribution {
    Distribution::new(DistributionConfig::new(server.uri(), None)).expect("Client should build")
}

/// Match the raw `Accept` header without splitting it at commas
pub fn accept(expected: &str) -> impl Match {
    let expected = expected.to_string();
    move |request: &Request| {
        request.headers.get("accept").and_then(|value| value.to_str().ok()) == Some(expected.as_str())
    }
}

pub fn manifest_json(config: &str, config_size: u64, layers: &[(&str, u64)]) -> Value {
    json!({
        "schemaVersion": 2,
        "mediaType": "application/vnd.docker.distribution.manifest.v2+json",
        "config": {
            "mediaType": "application/vnd.docker.container.image.v1+json",
            "digest": config,
            "size": config_size
        },
        "layers": layers.iter().map(|(digest, size)| json!({
            "mediaType": "application/vnd.docker.image.rootfs.diff.tar.gzip",
            "digest": digest,
            "size": size
        })).collect::<Vec<_>>()
    })
}

/// Image config with one non-empty history entry per command
pub fn blob_json(architecture: &str, commands: &[&str]) -> Value {
    json!({
        "architecture": architecture,
        "os": "linux",
        "created": "2022-01-02T15:04:05Z",
        "config": {
            "Env": ["PATH=/usr/local/sbin:/usr/local/bin"],
            "Cmd": ["/bin/sh"]
        },
        "history": commands.iter().map(|command| json!({
            "created": "2022-01-01T00:00:00Z",
            "created_by": command
        })).collect::<Vec<_>>()
    })
}

pub async fn mount_catalog(server: &MockServer, repositories: &[&str]) {
    Mock::given(method("GET"))
        .and(path("/v2/_catalog"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "repositories": repositories })))
        .mount(server)
        .await;
}

pub async fn mount_tags(server: &MockServer, repository: &str, tags: Option<&[&str]>) {
    Mock::given(method("GET"))
        .and(path(format!("/v2/{repository}/tags/list")))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "name": repository, "tags": tags })))
        .mount(server)
        .await;
}

pub async fn mount_manifest(server: &MockServer, repository: &str, reference: &str, body: Value) {
    Mock::given(method("GET"))
        .and(path(format!("/v2/{repository}/manifests/{reference}")))
        .respond_with(ResponseTemplate::new(200).set_body_json(body))
        .mount(server)
        .await;
}

pub async fn mount_blob(server: &MockServer, repository: &str, digest: &str, body: Value) {
    Mock::given(method("GET"))
        .and(path(format!("/v2/{repository}/blobs/{digest}")))
        .respond_with(ResponseTemplate::new(200).set_body_json(body))
        .mount(server)
        .await;
}

/// Mount a tag whose manifest has one layer per command
pub async fn mount_image(server: &MockServer, repository: &str, tag: &str, config: &str, layers: &[(&str, u64)], commands: &[&str]) {
    mount_manifest(server, repository, tag, manifest_json(config, 100, layers)).await;
    mount_blob(server, repository, config, blob_json("amd64", commands)).await;
}
