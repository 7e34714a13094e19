use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::capabilities::http::{UrlError, ValidatedUrl};
use crate::error::{AppError, ErrorKind};

pub const DEFAULT_BASE_URL: &str = "http://localhost:3333";
pub const DEFAULT_PAGE_SIZE: u32 = 8;
pub const MAX_PAGE_SIZE: u32 = 100;
/// The grid reports how far from its end the user is when the end-reached
/// callback fires. Reports below this distance do not trigger a page fetch.
pub const DEFAULT_END_REACHED_MIN_DISTANCE: f64 = 1.0;

#[derive(Debug, Clone, Error, PartialEq)]
pub enum ConfigError {
    #[error("invalid base_url: {0}")]
    BaseUrl(#[from] UrlError),
    #[error("page_size must be between 1 and {max}, got {got}")]
    PageSize { got: u32, max: u32 },
    #[error("end_reached_min_distance must be finite and >= 0, got {0}")]
    EndReachedDistance(f64),
}

impl From<ConfigError> for AppError {
    fn from(e: ConfigError) -> Self {
        AppError::new(ErrorKind::InvalidRequest, e.to_string())
    }
}

/// Plant service settings supplied by the shell.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct ApiConfig {
    pub base_url: String,
    pub page_size: u32,
    pub end_reached_min_distance: f64,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            page_size: DEFAULT_PAGE_SIZE,
            end_reached_min_distance: DEFAULT_END_REACHED_MIN_DISTANCE,
        }
    }
}

impl ApiConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.base_url()?;
        if self.page_size == 0 || self.page_size > MAX_PAGE_SIZE {
            return Err(ConfigError::PageSize {
                got: self.page_size,
                max: MAX_PAGE_SIZE,
            });
        }
        if !self.end_reached_min_distance.is_finite() || self.end_reached_min_distance < 0.0 {
            return Err(ConfigError::EndReachedDistance(self.end_reached_min_distance));
        }
        Ok(())
    }

    pub fn base_url(&self) -> Result<ValidatedUrl, ConfigError> {
        Ok(ValidatedUrl::new(&self.base_url)?)
    }
}
