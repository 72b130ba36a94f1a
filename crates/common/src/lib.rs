use thiserror::Error;

pub mod localization;
pub mod query;
pub mod utils;

#[derive(Debug, Error)]
pub enum PagerError {
    #[error("invalid argument: {0}")]
    InvalidArgument(String),
    #[error("failed to link pager to '{0}'")]
    Configuration(String),
}

impl PagerError {
    pub fn invalid(msg: impl Into<String>) -> Self {
        Self::InvalidArgument(msg.into())
    }
}
