use std::borrow::Cow;
use std::path::Path;

use vue_split_config::{OptionsDiscovery, PluginVueOptions, Result, SplitVueChunkOptions};

use crate::applier::apply_split_chunks_rule;
use crate::host::{Plugin, PluginApi};

pub const PLUGIN_NAME: &str = "vue-split:chunks";

/// Plugin that gives Vue and Vue Router their own output chunks
///
/// # Example
///
/// ```rust
/// use vue_split_plugin::{PluginHost, SplitVueChunkPlugin};
///
/// let mut host = PluginHost::new();
/// host.add_plugin(SplitVueChunkPlugin::new());
/// assert_eq!(host.hook_count(), 1);
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SplitVueChunkPlugin {
    options: PluginVueOptions,
}

impl SplitVueChunkPlugin {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_options(options: impl Into<PluginVueOptions>) -> Self {
        Self {
            options: options.into(),
        }
    }

    /// Build from options discovered under `root` (file, then environment)
    pub fn discover(root: impl AsRef<Path>) -> Result<Self> {
        OptionsDiscovery::new(root).load().map(Self::with_options)
    }

    pub fn options(&self) -> &PluginVueOptions {
        &self.options
    }

    pub fn split_chunks(&self) -> SplitVueChunkOptions {
        self.options.split_chunks
    }
}

impl Plugin for SplitVueChunkPlugin {
    fn name(&self) -> Cow<'static, str> {
        PLUGIN_NAME.into()
    }

    fn setup(&self, api: &mut dyn PluginApi) {
        apply_split_chunks_rule(api, self.options.split_chunks);
    }
}
