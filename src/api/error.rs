use thiserror::Error;

#[derive(Error, Debug)]
pub enum ApiError {
    #[error("The registry rejected the request as unauthorized")]
    Unauthorized,

    #[error("Only api v2 is supported")]
    UnsupportedRegistry,

    #[error("Found invalid header value for header '{0}'")]
    InvalidHeaderValue(String),

    #[error("There was an error during the request: {0}")]
    RequestError(#[from] reqwest::Error),

    #[error("Received error from api ({0}): '{1}'")]
    RegistryError(u16, String),

    #[error("The registry returned malformed data: {0}")]
    MalformedData(String),
}

impl ApiError {
    /// Whether the registry asked for (other) credentials. This is the only failure the
    /// presentation layer treats differently from a generic fetch failure
    pub fn is_unauthorized(&self) -> bool {
        matches!(self, ApiError::Unauthorized)
    }
}
