use accord_core::logging::LoggingError;
use accord_widgets::AccordionError;
use accord_widgets::accordion::ConfigError;

use crate::replay::StepParseError;

pub type Result<T> = std::result::Result<T, DemoError>;

#[derive(Debug, thiserror::Error)]
pub enum DemoError {
    #[error("logging: {0}")]
    Logging(#[from] LoggingError),

    #[error("config: {0}")]
    Config(#[from] ConfigError),

    #[error("script: {0}")]
    Script(#[from] StepParseError),

    #[error("accordion: {0}")]
    Accordion(#[from] AccordionError),

    #[error("unsupported config extension {0:?} (expected .toml or .json)")]
    ConfigExtension(String),

    #[error("invalid content heights {0:?}")]
    Heights(String),

    #[error("report encoding: {0}")]
    Encode(#[from] serde_json::Error),
}

impl DemoError {
    /// Process exit code: 2 for bad input, 1 for runtime failures.
    #[must_use]
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::Config(_) | Self::Script(_) | Self::ConfigExtension(_) | Self::Heights(_) => 2,
            Self::Logging(_) | Self::Accordion(_) | Self::Encode(_) => 1,
        }
    }
}
