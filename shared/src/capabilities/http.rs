use serde::{Deserialize, Serialize};
use thiserror::Error;
use url::Url;

use crate::error::{AppError, ErrorKind};

pub const MAX_URL_LENGTH: usize = 2048;

pub const ENVIRONMENTS_PATH: &str = "plants_environments";
pub const PLANTS_PATH: &str = "plants";

#[derive(Debug, Clone, Error, Serialize, Deserialize, PartialEq, Eq)]
pub enum UrlError {
    #[error("invalid URL '{url}': {reason}")]
    InvalidUrl { url: String, reason: String },

    #[error("credentials in URL are not allowed: {url}")]
    CredentialsNotAllowed { url: String },
}

impl From<UrlError> for AppError {
    fn from(e: UrlError) -> Self {
        AppError::new(ErrorKind::InvalidRequest, e.to_string())
    }
}

/// An absolute `http`/`https` base URL for the plant service.
///
/// Private hosts are accepted: the service is usually a json-server on the
/// developer's LAN.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ValidatedUrl {
    url: Url,
}

impl ValidatedUrl {
    pub fn new(url: impl AsRef<str>) -> Result<Self, UrlError> {
        let raw = url.as_ref();

        if raw.trim().is_empty() {
            return Err(UrlError::InvalidUrl {
                url: String::new(),
                reason: "URL cannot be empty".to_string(),
            });
        }

        if raw.len() > MAX_URL_LENGTH {
            return Err(UrlError::InvalidUrl {
                url: Self::truncate_url(raw),
                reason: format!("URL exceeds maximum length of {MAX_URL_LENGTH} bytes"),
            });
        }

        let parsed = Url::parse(raw.trim()).map_err(|e| UrlError::InvalidUrl {
            url: Self::truncate_url(raw),
            reason: e.to_string(),
        })?;

        let scheme = parsed.scheme();
        if scheme != "http" && scheme != "https" {
            return Err(UrlError::InvalidUrl {
                url: Self::truncate_url(raw),
                reason: format!("invalid scheme '{scheme}', only 'http' and 'https' are allowed"),
            });
        }

        if parsed.host_str().is_none() {
            return Err(UrlError::InvalidUrl {
                url: Self::truncate_url(raw),
                reason: "URL must have a host".to_string(),
            });
        }

        if !parsed.username().is_empty() || parsed.password().is_some() {
            return Err(UrlError::CredentialsNotAllowed {
                url: Self::truncate_url(raw),
            });
        }

        Ok(Self { url: parsed })
    }

    pub fn as_str(&self) -> &str {
        self.url.as_str()
    }

    pub fn host(&self) -> &str {
        self.url.host_str().unwrap_or_default()
    }

    /// Appends `segment` to the path and sets the query pairs in order.
    /// Any query already present on the base is dropped.
    pub fn endpoint(&self, segment: &str, query: &[(&str, String)]) -> Result<Url, UrlError> {
        let mut url = self.url.clone();
        url.set_query(None);
        url.set_fragment(None);

        url.path_segments_mut()
            .map_err(|()| UrlError::InvalidUrl {
                url: Self::truncate_url(self.url.as_str()),
                reason: "URL cannot be a base".to_string(),
            })?
            .pop_if_empty()
            .push(segment);

        if !query.is_empty() {
            let mut pairs = url.query_pairs_mut();
            for (key, value) in query {
                pairs.append_pair(key, value);
            }
        }

        Ok(url)
    }

    fn truncate_url(url: &str) -> String {
        if url.len() <= 100 {
            url.to_string()
        } else {
            let end = (0..=100).rev().find(|i| url.is_char_boundary(*i)).unwrap_or(0);
            format!("{}...", &url[..end])
        }
    }
}

/// `GET /plants_environments?_sort=title&order=asc`
pub fn environments_url(base: &ValidatedUrl) -> Result<Url, UrlError> {
    base.endpoint(
        ENVIRONMENTS_PATH,
        &[("_sort", "title".to_string()), ("order", "asc".to_string())],
    )
}

/// `GET /plants?_sort=name&order=asc&_page={page}&_limit={page_size}`
pub fn plants_page_url(base: &ValidatedUrl, page: u32, page_size: u32) -> Result<Url, UrlError> {
    base.endpoint(
        PLANTS_PATH,
        &[
            ("_sort", "name".to_string()),
            ("order", "asc".to_string()),
            ("_page", page.to_string()),
            ("_limit", page_size.to_string()),
        ],
    )
}
