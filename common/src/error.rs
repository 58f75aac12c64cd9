//! Error types shared by the loader, the config and the view.

use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    /// The request never produced a response.
    #[error("request failed: {0}")]
    Request(String),

    #[error("{url} answered with HTTP {status}")]
    Status { status: u16, url: String },

    #[error("malformed CSV: {0}")]
    Csv(#[from] csv::Error),

    #[error(transparent)]
    Config(#[from] ConfigError),
}

impl Error {
    pub fn request(message: impl Into<String>) -> Self {
        Self::Request(message.into())
    }

    pub fn status(status: u16, url: impl Into<String>) -> Self {
        Self::Status {
            status,
            url: url.into(),
        }
    }
}

/// A [`PlotConfig`](crate::PlotConfig) that cannot produce a drawable plot.
#[derive(Clone, Debug, Error, PartialEq)]
pub enum ConfigError {
    #[error("margins leave no drawable area in a {width}x{height} canvas")]
    NoDrawableArea { width: f64, height: f64 },

    #[error("{axis} extent [{min}, {max}] is empty or not finite")]
    InvalidExtent {
        axis: &'static str,
        min: f64,
        max: f64,
    },

    #[error("perturbation interval must be positive")]
    ZeroInterval,

    #[error("max offset {0} must be a finite, non-negative number")]
    InvalidOffset(f64),
}
