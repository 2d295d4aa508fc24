//! Session configuration.

use crate::error::{ConsoleError, ConsoleResult};
use opsdesk_table::SortConfig;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Configuration for a [`crate::ConsoleSession`].
///
/// Every field has a default, so a host can load a partial JSON document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConsoleConfig {
    /// Quiet period after the last keystroke before a preview is requested (ms).
    pub preview_debounce_ms: u64,
    /// Rows per page when a table opens.
    pub default_page_size: usize,
    /// Page sizes the pager offers.
    pub page_size_options: Vec<usize>,
    /// Sort applied when a table opens.
    pub default_sort: SortConfig,
}

impl Default for ConsoleConfig {
    fn default() -> Self {
        Self {
            preview_debounce_ms: 500,
            default_page_size: 5,
            page_size_options: vec![5, 10, 25],
            default_sort: SortConfig::ascending("id"),
        }
    }
}

impl ConsoleConfig {
    /// Parses and validates a JSON document.
    pub fn from_json_str(json: &str) -> ConsoleResult<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> ConsoleResult<()> {
        if self.preview_debounce_ms == 0 {
            return Err(ConsoleError::Config(
                "preview_debounce_ms must be positive".into(),
            ));
        }
        if self.page_size_options.contains(&0) {
            return Err(ConsoleError::Config(
                "page_size_options must all be positive".into(),
            ));
        }
        if self.default_page_size == 0 {
            return Err(ConsoleError::Config(
                "default_page_size must be positive".into(),
            ));
        }
        if !self.page_size_options.is_empty()
            && !self.page_size_options.contains(&self.default_page_size)
        {
            return Err(ConsoleError::Config(format!(
                "default_page_size {} is not one of the page size options",
                self.default_page_size
            )));
        }
        Ok(())
    }

    pub fn preview_debounce(&self) -> Duration {
        Duration::from_millis(self.preview_debounce_ms)
    }
}
