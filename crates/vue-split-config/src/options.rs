//! Plugin options.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::{ConfigError, Result};

fn default_true() -> bool {
    true
}

/// Which framework libraries get a dedicated chunk
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SplitVueChunkOptions {
    /// Split `vue` and `vue-loader` into `lib-vue`
    #[serde(default = "default_true")]
    pub vue: bool,

    /// Split `vue-router` into `lib-router`
    #[serde(default = "default_true")]
    pub router: bool,
}

impl Default for SplitVueChunkOptions {
    fn default() -> Self {
        Self {
            vue: true,
            router: true,
        }
    }
}

impl SplitVueChunkOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_vue(mut self, enabled: bool) -> Self {
        self.vue = enabled;
        self
    }

    pub fn with_router(mut self, enabled: bool) -> Self {
        self.router = enabled;
        self
    }

    /// No library group would be added
    pub fn is_empty(&self) -> bool {
        !self.vue && !self.router
    }
}

/// Top-level plugin options
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PluginVueOptions {
    #[serde(default)]
    pub split_chunks: SplitVueChunkOptions,
}

impl PluginVueOptions {
    /// Create from serde_json::Value (for programmatic config)
    ///
    /// # Example
    ///
    /// ```
    /// use vue_split_config::PluginVueOptions;
    /// use serde_json::json;
    ///
    /// let options = PluginVueOptions::from_value(json!({
    ///     "splitChunks": { "router": false }
    /// }))
    /// .unwrap();
    /// assert!(options.split_chunks.vue);
    /// assert!(!options.split_chunks.router);
    /// ```
    pub fn from_value(value: Value) -> Result<Self> {
        serde_json::from_value(value).map_err(|e| ConfigError::invalid_value("options", e.to_string()))
    }

    pub fn to_value(&self) -> Result<Value> {
        serde_json::to_value(self).map_err(|e| ConfigError::invalid_value("options", e.to_string()))
    }
}

impl From<SplitVueChunkOptions> for PluginVueOptions {
    fn from(split_chunks: SplitVueChunkOptions) -> Self {
        Self { split_chunks }
    }
}
