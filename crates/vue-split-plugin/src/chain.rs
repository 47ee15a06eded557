//! Bundler configuration chain.
//!
//! Hooks never see the host bundler's own config builder. They go through
//! [`BundlerChain`], which exposes only `optimization.splitChunks`.

use serde_json::{Map, Value};
use vue_split_config::{Result, SplitChunksValue};

/// Mutable view of a bundler configuration handed to chain hooks
pub trait BundlerChain {
    /// Current `optimization.splitChunks`, `None` when never set
    fn split_chunks(&self) -> Option<SplitChunksValue>;

    /// Replace `optimization.splitChunks`
    fn set_split_chunks(&mut self, value: SplitChunksValue);
}

/// In-memory chain used by [`PluginHost`](crate::PluginHost) and tests
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ChainConfig {
    split_chunks: Option<SplitChunksValue>,
}

impl ChainConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_split_chunks(value: impl Into<SplitChunksValue>) -> Self {
        Self {
            split_chunks: Some(value.into()),
        }
    }

    /// Build from a bundler config object, reading `optimization.splitChunks`
    pub fn from_value(value: &Value) -> Self {
        let split_chunks = value
            .get("optimization")
            .and_then(|optimization| optimization.get("splitChunks"))
            .cloned()
            .map(SplitChunksValue::from_value);
        Self { split_chunks }
    }

    /// Render as `{"optimization": {"splitChunks": ...}}`
    pub fn to_value(&self) -> Result<Value> {
        let mut optimization = Map::new();
        if let Some(split_chunks) = &self.split_chunks {
            optimization.insert("splitChunks".to_string(), split_chunks.to_value()?);
        }

        let mut root = Map::new();
        root.insert("optimization".to_string(), Value::Object(optimization));
        Ok(Value::Object(root))
    }
}

impl BundlerChain for ChainConfig {
    fn split_chunks(&self) -> Option<SplitChunksValue> {
        self.split_chunks.clone()
    }

    fn set_split_chunks(&mut self, value: SplitChunksValue) {
        self.split_chunks = Some(value);
    }
}
