use log::debug;
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, USER_AGENT};
use reqwest::{Client, ClientBuilder, Response};
use serde::de::DeserializeOwned;
use crate::api::credentials::Credentials;
use crate::api::error::ApiError;
use crate::api::repository::Repository;
use crate::api::request::{get_follow_path, handle_response};
use crate::api::{ApiCatalog, DistributionConfig, PAGE_SIZE};

/// Client for the registry http api v2. It owns the connection pool and is meant to be created
/// once and shared by all requests
#[derive(Debug, Clone)]
pub struct Distribution {
    config: DistributionConfig,
    client: Client,
}

impl Distribution {
    pub fn new(config: DistributionConfig) -> Result<Self, ApiError> {
        let mut headers = HeaderMap::new();
        headers.insert(USER_AGENT, HeaderValue::from_static(crate::api::USER_AGENT));
        let client = ClientBuilder::new()
            .default_headers(headers)
            .build()?;
        Ok(Self { config, client })
    }

    /// Get a handle for the repository with the given name
    pub fn repository<'a>(&'a self, name: &str) -> Repository<'a> {
        Repository::new(name.to_string(), self)
    }

    /// Get the names of all repositories present in the registry
    pub async fn get_catalog(&self, creds: Option<&Credentials>) -> Result<Vec<String>, ApiError> {
        let pages = self
            .get_paginated::<ApiCatalog>(format!("/v2/_catalog?n={PAGE_SIZE}").as_str(), creds)
            .await?;
        Ok(pages.into_iter().flat_map(|page| page.repositories.unwrap_or_default()).collect())
    }

    /// Send a `GET` request for a registry path with the given `Accept` header
    pub(crate) async fn get(&self, path: &str, accept: &str, creds: Option<&Credentials>) -> Result<Response, ApiError> {
        let url = self.config.url(path);
        debug!("GET {url}");
        let mut request = self.client.get(url.as_str());
        request = request.header(
            ACCEPT,
            HeaderValue::from_str(accept).map_err(|_| ApiError::InvalidHeaderValue(String::from(accept)))?,
        );
        if let Some(credentials) = self.config.credentials(creds) {
            request = credentials.apply(request);
        }
        let resp = request.send().await?;
        handle_response(resp).await
    }

    /// Fetch all pages of a list endpoint by following the `Link` header of each response
    pub(crate) async fn get_paginated<T: DeserializeOwned>(&self, path: &str, creds: Option<&Credentials>) -> Result<Vec<T>, ApiError> {
        let mut pages = Vec::new();
        let mut link = Some(path.to_string());

        while let Some(path) = link {
            let resp = self.get(path.as_str(), "application/json", creds).await?;
            link = get_follow_path(resp.headers())?;
            pages.push(resp.json::<T>().await?);
        }
        Ok(pages)
    }
}
