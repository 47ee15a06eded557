//! Resolved per-environment build settings.
//!
//! An [`EnvironmentConfig`] is owned by the host bundler and handed to plugin
//! hooks read-only. Only the parts the chunk-splitting rule looks at are
//! modelled; everything else in the host's config is ignored on load.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::{ConfigError, Result};

/// Legacy chunk-splitting strategies (`performance.chunkSplit.strategy`)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ChunkSplitStrategy {
    SplitByExperience,
    SplitByModule,
    SplitBySize,
    AllInOne,
    SingleVendor,
    Custom,
    /// A strategy this crate does not know; never the default preset
    #[serde(other)]
    Unknown,
}

/// Legacy `performance.chunkSplit` option
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChunkSplit {
    pub strategy: ChunkSplitStrategy,

    /// Strategy-specific settings (`minSize`, `forceSplitting`, ...)
    #[serde(flatten)]
    pub rest: Map<String, Value>,
}

impl ChunkSplit {
    pub fn new(strategy: ChunkSplitStrategy) -> Self {
        Self {
            strategy,
            rest: Map::new(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PerformanceConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub chunk_split: Option<ChunkSplit>,
}

/// Named splitting presets provided by the bundler
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SplitPreset {
    Default,
    PerPackage,
    SingleVendor,
    None,
    /// A preset name this crate does not know
    #[serde(other)]
    Unknown,
}

/// Structured form of the environment-level `splitChunks` setting
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SplitChunksPresetConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub preset: Option<SplitPreset>,

    #[serde(flatten)]
    pub rest: Map<String, Value>,
}

impl SplitChunksPresetConfig {
    pub fn with_preset(preset: SplitPreset) -> Self {
        Self {
            preset: Some(preset),
            rest: Map::new(),
        }
    }
}

/// Environment-level `splitChunks`: a boolean switch or a structured config
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SplitChunksSetting {
    Enabled(bool),
    Config(SplitChunksPresetConfig),
}

impl Default for SplitChunksSetting {
    fn default() -> Self {
        Self::Config(SplitChunksPresetConfig::default())
    }
}

/// Output target of an environment
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum OutputTarget {
    /// Browser (default)
    #[default]
    Web,
    /// Node.js
    Node,
    /// Web Workers
    WebWorker,
}

impl OutputTarget {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Web => "web",
            Self::Node => "node",
            Self::WebWorker => "web-worker",
        }
    }
}

impl std::fmt::Display for OutputTarget {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct OutputConfig {
    #[serde(default)]
    pub target: OutputTarget,
}

/// Resolved settings for one build environment
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EnvironmentConfig {
    #[serde(default)]
    pub performance: PerformanceConfig,

    #[serde(default)]
    pub split_chunks: SplitChunksSetting,

    #[serde(default)]
    pub output: OutputConfig,
}

impl EnvironmentConfig {
    /// Create from serde_json::Value (camelCase keys, unknown keys ignored)
    ///
    /// # Example
    ///
    /// ```
    /// use vue_split_config::{EnvironmentConfig, OutputTarget};
    /// use serde_json::json;
    ///
    /// let config = EnvironmentConfig::from_value(json!({
    ///     "output": { "target": "node" }
    /// }))
    /// .unwrap();
    /// assert_eq!(config.output.target, OutputTarget::Node);
    /// ```
    pub fn from_value(value: Value) -> Result<Self> {
        serde_json::from_value(value)
            .map_err(|e| ConfigError::invalid_value("environment", e.to_string()))
    }

    pub fn with_target(mut self, target: OutputTarget) -> Self {
        self.output.target = target;
        self
    }

    pub fn with_split_chunks(mut self, split_chunks: SplitChunksSetting) -> Self {
        self.split_chunks = split_chunks;
        self
    }

    pub fn with_chunk_split(mut self, chunk_split: ChunkSplit) -> Self {
        self.performance.chunk_split = Some(chunk_split);
        self
    }

    /// Whether the bundler's default splitting preset is in effect.
    ///
    /// The legacy `performance.chunkSplit` option takes precedence when set;
    /// only its `split-by-experience` strategy counts as the default preset.
    pub fn is_default_preset(&self) -> bool {
        if let Some(chunk_split) = &self.performance.chunk_split {
            return chunk_split.strategy == ChunkSplitStrategy::SplitByExperience;
        }

        match &self.split_chunks {
            SplitChunksSetting::Config(config) => {
                matches!(config.preset, None | Some(SplitPreset::Default))
            }
            SplitChunksSetting::Enabled(_) => false,
        }
    }

    pub fn is_web(&self) -> bool {
        self.output.target == OutputTarget::Web
    }
}
