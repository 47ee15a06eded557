//! Bundler plugin that places Vue and Vue Router into dedicated chunks
//!
//! Framework code changes far less often than application code. Giving it
//! its own chunks (`lib-vue`, `lib-router`) keeps those files cacheable
//! across deploys.
//!
//! ## Architecture
//!
//! ```text
//! PluginHost::add_plugin → Plugin::setup → modify_bundler_chain(hook)
//!                                               ↓
//! PluginHost::modify_chain(environment) → hook → modify_split_chunks → BundlerChain
//! ```
//!
//! ## Example Usage
//!
//! ```rust
//! use vue_split_config::{EnvironmentConfig, SplitChunksOptions, SplitVueChunkOptions};
//! use vue_split_plugin::{
//!     BundlerChain, ChainConfig, EnvironmentContext, PluginHost, SplitVueChunkPlugin,
//! };
//!
//! let mut host = PluginHost::new();
//! host.add_plugin(SplitVueChunkPlugin::with_options(
//!     SplitVueChunkOptions::new().with_router(false),
//! ));
//!
//! let web = EnvironmentContext::new("web", EnvironmentConfig::default());
//! let mut chain = ChainConfig::with_split_chunks(SplitChunksOptions::default());
//! host.modify_chain(&web, &mut chain);
//!
//! let split_chunks = chain.split_chunks().unwrap();
//! let groups = &split_chunks.as_options().unwrap().cache_groups;
//! assert!(groups.contains_key("vue"));
//! assert!(!groups.contains_key("router"));
//! ```

pub mod applier;
pub mod chain;
pub mod host;
pub mod plugin;

#[cfg(feature = "logging")]
pub mod logging;

pub use applier::{
    Outcome, SkipReason, apply_split_chunks_rule, build_extra_groups, modify_split_chunks,
};
pub use chain::{BundlerChain, ChainConfig};
pub use host::{
    ChainHook, EnvironmentContext, ModifyChainContext, Plugin, PluginApi, PluginHost,
};
pub use plugin::{PLUGIN_NAME, SplitVueChunkPlugin};
