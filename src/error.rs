use crate::api::error::ApiError;

#[derive(thiserror::Error, Debug)]
pub enum Error {
    #[error("The registry url is required. Set it with '--registry' or 'REGISTRY_URL'")]
    MissingRegistryUrl,

    #[error("The registry url '{0}' must start with http:// or https://")]
    InvalidRegistryUrl(String),

    #[error("Unable to read configuration file '{0}'. Reason: {1}")]
    ConfigRead(String, std::io::Error),

    #[error("Unable to parse configuration file '{0}'. Reason: {1}")]
    ConfigParse(String, serde_yaml::Error),

    #[error("Unable to listen on '{0}'. Reason: {1}")]
    Bind(String, std::io::Error),

    #[error("The server stopped unexpectedly. Reason: {0}")]
    Serve(std::io::Error),

    #[error("There was an api error: {0}")]
    ApiError(#[from] ApiError)
}
