//! Error types

use thiserror::Error;

use crate::types::SectionId;

/// Navigation controller error type
#[derive(Debug, Error)]
pub enum NavError {
    /// Command targeted a section that is not in the registry
    #[error("unknown section: {0}")]
    UnknownSection(SectionId),

    /// No renderable viewport to observe
    #[error("viewport unavailable: {0}")]
    ViewportUnavailable(String),

    /// Viewport reported out-of-range scroll metrics
    #[error("invalid scroll metrics: {0}")]
    InvalidMetrics(String),

    /// Registry has no sections
    #[error("section registry is empty")]
    EmptyRegistry,

    /// Same id registered twice
    #[error("duplicate section: {0}")]
    DuplicateSection(SectionId),

    /// Configuration value out of range
    #[error("invalid config: {0}")]
    InvalidConfig(String),

    /// Page layout computation failed
    #[error("layout error: {0}")]
    Layout(String),

    /// TOML syntax or type error
    #[error("config parse error: {0}")]
    ConfigParse(#[from] toml::de::Error),
}

pub type Result<T> = std::result::Result<T, NavError>;
