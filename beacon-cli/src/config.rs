//! Configuration module
//!
//! Handles CLI configuration including the node URL and output settings.

use crate::types::OutputFormat;

/// Default number of jobs fetched per page
pub const DEFAULT_PAGE_SIZE: u32 = 25;

/// CLI configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// Base URL of the node API
    pub node_url: String,

    /// Output format for command results
    pub output: OutputFormat,

    /// Jobs per page when listing
    pub page_size: u32,

    /// Whether to colorize table output
    pub color: bool,
}

impl Config {
    /// Creates a new configuration with defaults
    pub fn new(node_url: String) -> Self {
        Self {
            node_url,
            output: OutputFormat::Table,
            page_size: DEFAULT_PAGE_SIZE,
            color: true,
        }
    }

    /// Validates the configuration
    pub fn validate(&self) -> anyhow::Result<()> {
        if self.node_url.is_empty() {
            anyhow::bail!("node_url cannot be empty");
        }

        if !self.node_url.starts_with("http://") && !self.node_url.starts_with("https://") {
            anyhow::bail!("node_url must start with http:// or https://");
        }

        if self.page_size == 0 {
            anyhow::bail!("page_size must be greater than 0");
        }

        Ok(())
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::new("http://localhost:6688".to_string())
    }
}
