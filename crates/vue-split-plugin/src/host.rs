//! Plugin host with chain-modification hooks.
//!
//! Plugins register hooks during `setup`; the host then runs every hook,
//! in registration order, once per build environment.

use std::borrow::Cow;

use tracing::trace;
use vue_split_config::EnvironmentConfig;

use crate::chain::BundlerChain;

/// Hook invoked with the environment's chain and its resolved config
pub type ChainHook = Box<dyn Fn(&mut dyn BundlerChain, &ModifyChainContext<'_>) + Send + Sync>;

/// One named build environment
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EnvironmentContext {
    pub name: String,
    pub config: EnvironmentConfig,
}

impl EnvironmentContext {
    pub fn new(name: impl Into<String>, config: EnvironmentConfig) -> Self {
        Self {
            name: name.into(),
            config,
        }
    }
}

/// Context passed alongside the chain
#[derive(Debug, Clone, Copy)]
pub struct ModifyChainContext<'a> {
    pub environment: &'a EnvironmentContext,
}

/// Registration surface offered to plugins
pub trait PluginApi {
    fn modify_bundler_chain(&mut self, hook: ChainHook);
}

pub trait Plugin: Send + Sync {
    fn name(&self) -> Cow<'static, str>;

    fn setup(&self, api: &mut dyn PluginApi);
}

const ANONYMOUS: &str = "anonymous";

/// Holds registered plugins and their hooks
#[derive(Default)]
pub struct PluginHost {
    plugins: Vec<Cow<'static, str>>,
    hooks: Vec<(Cow<'static, str>, ChainHook)>,
}

impl PluginHost {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a plugin and run its `setup`
    pub fn add_plugin<P: Plugin>(&mut self, plugin: P) -> &mut Self {
        let name = plugin.name();
        trace!(plugin = %name, "setting up plugin");

        let mut scope = PluginScope {
            host: self,
            plugin: name.clone(),
        };
        plugin.setup(&mut scope);
        self.plugins.push(name);
        self
    }

    /// Run every hook against one environment's chain
    pub fn modify_chain(&self, environment: &EnvironmentContext, chain: &mut dyn BundlerChain) {
        let ctx = ModifyChainContext { environment };
        for (plugin, hook) in &self.hooks {
            trace!(plugin = %plugin, environment = %environment.name, "modify bundler chain");
            hook(&mut *chain, &ctx);
        }
    }

    pub fn plugin_names(&self) -> impl Iterator<Item = &str> {
        self.plugins.iter().map(|name| name.as_ref())
    }

    pub fn hook_count(&self) -> usize {
        self.hooks.len()
    }

    fn push_hook(&mut self, plugin: Cow<'static, str>, hook: ChainHook) {
        self.hooks.push((plugin, hook));
    }
}

impl PluginApi for PluginHost {
    fn modify_bundler_chain(&mut self, hook: ChainHook) {
        self.push_hook(Cow::Borrowed(ANONYMOUS), hook);
    }
}

impl std::fmt::Debug for PluginHost {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PluginHost")
            .field("plugins", &self.plugins)
            .field("hooks", &self.hooks.len())
            .finish()
    }
}

/// Tags hooks with the plugin that registered them
struct PluginScope<'a> {
    host: &'a mut PluginHost,
    plugin: Cow<'static, str>,
}

impl PluginApi for PluginScope<'_> {
    fn modify_bundler_chain(&mut self, hook: ChainHook) {
        self.host.push_hook(self.plugin.clone(), hook);
    }
}
