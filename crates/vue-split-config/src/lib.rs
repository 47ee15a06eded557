//! Configuration model for the Vue chunk-splitting plugin.
//!
//! - [`environment`]: the read-only per-environment settings a host passes to hooks
//! - [`split_chunks`]: the bundler-side `optimization.splitChunks` value
//! - [`options`]: plugin options
//! - [`discovery`]: loading options from files and the environment

pub mod discovery;
pub mod environment;
pub mod error;
pub mod options;
pub mod split_chunks;

pub use discovery::{OptionsDiscovery, discover};
pub use environment::{
    ChunkSplit, ChunkSplitStrategy, EnvironmentConfig, OutputConfig, OutputTarget,
    PerformanceConfig, SplitChunksPresetConfig, SplitChunksSetting, SplitPreset,
};
pub use error::{ConfigError, Result};
pub use options::{PluginVueOptions, SplitVueChunkOptions};
pub use split_chunks::{
    CacheGroup, CacheGroupEntry, ModuleMatcher, SplitChunksOptions, SplitChunksValue,
};
