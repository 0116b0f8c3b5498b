use crate::api::error::ApiError;
use reqwest::header::HeaderMap;
use reqwest::{Response, StatusCode};

/// For an reqwest response check the registry version as well as map errors to `ApiError`s. <br>
/// A `401` is always reported as [`ApiError::Unauthorized`] so callers can ask for credentials
pub async fn handle_response(response: Response) -> Result<Response, ApiError> {
    let status = response.status();
    if status == StatusCode::UNAUTHORIZED {
        return Err(ApiError::Unauthorized)
    }

    validate_registry_version(response.headers())?;

    if !status.is_success() {
        let body = response.text().await?;
        Err(ApiError::RegistryError(status.as_u16(), body.trim().to_string()))
    } else {
        Ok(response)
    }
}

/// Validate the `Docker-Distribution-API-Version` header was present in the response and that it's value
/// is set to use registry v2
pub fn validate_registry_version(headers: &HeaderMap) -> Result<(), ApiError> {
    if let Some(version) = headers.get("Docker-Distribution-API-Version") {
        if let Ok(parsed) = version.to_str() {
            if parsed.ends_with("/2.0") {
                Ok(())
            } else {
                Err(ApiError::UnsupportedRegistry)
            }
        } else {
            Err(ApiError::InvalidHeaderValue(String::from(
                "Docker-Distribution-API-Version",
            )))
        }
    } else {
        Ok(())
    }
}

/// For responses which use the `Link` header for pagination the header value
/// is read and parsed as proposed in RFC 5988
pub fn get_follow_path(headers: &HeaderMap) -> Result<Option<String>, ApiError> {
    if let Some(link) = headers.get(reqwest::header::LINK) {
        let link_str = link
            .to_str()
            .map_err(|_| ApiError::InvalidHeaderValue(String::from("Link")))?;
        let parts: Vec<&str> = link_str.split(';').collect();
        if let Some(url_part) = parts.first() {
            if let Some(path) = url_part
                .trim()
                .strip_prefix('<')
                .and_then(|s| s.strip_suffix('>'))
            {
                return Ok(Some(String::from(path)));
            }
        }
    }
    Ok(None)
}

/// Read the `Docker-Content-Digest` header if the registry sent one
pub fn get_content_digest(headers: &HeaderMap) -> Result<Option<String>, ApiError> {
    match headers.get("Docker-Content-Digest") {
        Some(digest) => digest
            .to_str()
            .map(|digest| Some(digest.to_string()))
            .map_err(|_| ApiError::InvalidHeaderValue(String::from("Docker-Content-Digest"))),
        None => Ok(None),
    }
}

#[cfg(test)]
mod test {
    use reqwest::header::{HeaderMap, HeaderValue, LINK};
    use crate::api::error::ApiError;
    use crate::api::request::{get_content_digest, get_follow_path, validate_registry_version};

    #[test]
    fn test_follow_path() {
        let mut headers = HeaderMap::new();
        headers.insert(LINK, HeaderValue::from_static("</v2/_catalog?last=b&n=100>; rel=\"next\""));
        assert_eq!(get_follow_path(&headers).unwrap(), Some(String::from("/v2/_catalog?last=b&n=100")));
    }

    #[test]
    fn test_follow_path_missing() {
        assert_eq!(get_follow_path(&HeaderMap::new()).unwrap(), None);
    }

    #[test]
    fn test_follow_path_without_brackets() {
        let mut headers = HeaderMap::new();
        headers.insert(LINK, HeaderValue::from_static("/v2/_catalog?last=b; rel=\"next\""));
        assert_eq!(get_follow_path(&headers).unwrap(), None);
    }

    #[test]
    fn test_registry_version() {
        let mut headers = HeaderMap::new();
        assert!(validate_registry_version(&headers).is_ok());
        headers.insert("Docker-Distribution-API-Version", HeaderValue::from_static("registry/2.0"));
        assert!(validate_registry_version(&headers).is_ok());
        headers.insert("Docker-Distribution-API-Version", HeaderValue::from_static("registry/1.0"));
        assert!(matches!(validate_registry_version(&headers), Err(ApiError::UnsupportedRegistry)));
    }

    #[test]
    fn test_content_digest() {
        let mut headers = HeaderMap::new();
        assert_eq!(get_content_digest(&headers).unwrap(), None);
        headers.insert("Docker-Content-Digest", HeaderValue::from_static("sha256:abc"));
        assert_eq!(get_content_digest(&headers).unwrap(), Some(String::from("sha256:abc")));
    }
}
