//! Split rule for Vue libraries.
//!
//! When an environment uses the bundler's default splitting preset and
//! targets the web, `vue`/`vue-loader` and `vue-router` are each moved into
//! their own cache group so they land in long-lived chunks.
//!
//! ## Decision
//!
//! ```text
//! default preset? ── no ──► skip
//!     │ yes
//! target == web?  ── no ──► skip
//!     │ yes
//! splitChunks is a plain object? ── no ──► skip
//!     │ yes
//! any group enabled? ── no ──► skip
//!     │ yes
//! splitChunks = { ...current, cacheGroups: { ...current.cacheGroups, ...extra } }
//! ```
//!
//! Every skip is silent. A build optimization that cannot be applied must
//! never break the build.

use std::fmt;
use std::sync::LazyLock;

use indexmap::IndexMap;
use tracing::debug;
use vue_split_config::{
    CacheGroup, CacheGroupEntry, EnvironmentConfig, ModuleMatcher, OutputTarget,
    SplitChunksValue, SplitVueChunkOptions,
};

use crate::chain::BundlerChain;
use crate::host::PluginApi;

pub const VUE_GROUP_KEY: &str = "vue";
pub const ROUTER_GROUP_KEY: &str = "router";

pub const VUE_CHUNK_NAME: &str = "lib-vue";
pub const ROUTER_CHUNK_NAME: &str = "lib-router";

const VUE_TEST: &str = r"node_modules[\\/](?:vue|vue-loader)[\\/]";
const ROUTER_TEST: &str = r"node_modules[\\/]vue-router[\\/]";

const LIBRARY_PRIORITY: i32 = 0;

static VUE_MATCHER: LazyLock<Option<ModuleMatcher>> =
    LazyLock::new(|| ModuleMatcher::new(VUE_TEST).ok());
static ROUTER_MATCHER: LazyLock<Option<ModuleMatcher>> =
    LazyLock::new(|| ModuleMatcher::new(ROUTER_TEST).ok());

/// Why the rule left the chain untouched
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    /// A non-default preset or legacy strategy is configured
    NotDefaultPreset,
    NotWebTarget(OutputTarget),
    /// `splitChunks` is unset, `false`, or not a plain object
    NotPlainObject,
    /// Both `vue` and `router` are disabled
    NoGroups,
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotDefaultPreset => f.write_str("splitting preset is not the default"),
            Self::NotWebTarget(target) => write!(f, "output target is {target}, not web"),
            Self::NotPlainObject => f.write_str("splitChunks is not a plain object"),
            Self::NoGroups => f.write_str("no library groups enabled"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// Keys of the cache groups that were merged in
    Applied { groups: Vec<String> },
    Skipped(SkipReason),
}

impl Outcome {
    pub fn is_applied(&self) -> bool {
        matches!(self, Self::Applied { .. })
    }
}

fn library_group(name: &str, matcher: &LazyLock<Option<ModuleMatcher>>) -> Option<CacheGroupEntry> {
    let test = matcher.as_ref()?.clone();
    Some(CacheGroup::new(name, test, LIBRARY_PRIORITY).into())
}

/// Cache groups to add for the given options, keyed `vue` / `router`
pub fn build_extra_groups(options: &SplitVueChunkOptions) -> IndexMap<String, CacheGroupEntry> {
    let mut groups = IndexMap::new();

    if options.vue {
        if let Some(group) = library_group(VUE_CHUNK_NAME, &VUE_MATCHER) {
            groups.insert(VUE_GROUP_KEY.to_string(), group);
        }
    }

    if options.router {
        if let Some(group) = library_group(ROUTER_CHUNK_NAME, &ROUTER_MATCHER) {
            groups.insert(ROUTER_GROUP_KEY.to_string(), group);
        }
    }

    groups
}

/// Merge the library cache groups into `chain` if `config` allows it.
pub fn modify_split_chunks(
    chain: &mut dyn BundlerChain,
    config: &EnvironmentConfig,
    options: &SplitVueChunkOptions,
) -> Outcome {
    if !config.is_default_preset() {
        return Outcome::Skipped(SkipReason::NotDefaultPreset);
    }
    if !config.is_web() {
        return Outcome::Skipped(SkipReason::NotWebTarget(config.output.target));
    }

    let current = chain.split_chunks();
    let Some(current) = current.as_ref().and_then(SplitChunksValue::as_options) else {
        return Outcome::Skipped(SkipReason::NotPlainObject);
    };

    if options.is_empty() {
        return Outcome::Skipped(SkipReason::NoGroups);
    }
    let extra_groups = build_extra_groups(options);

    let groups: Vec<String> = extra_groups.keys().cloned().collect();
    let merged = current.with_cache_groups(extra_groups);
    chain.set_split_chunks(SplitChunksValue::Options(merged));

    Outcome::Applied { groups }
}

/// Register the split rule on a plugin host
pub fn apply_split_chunks_rule(api: &mut dyn PluginApi, options: SplitVueChunkOptions) {
    api.modify_bundler_chain(Box::new(move |chain, ctx| {
        let environment = ctx.environment;
        match modify_split_chunks(chain, &environment.config, &options) {
            Outcome::Applied { groups } => {
                debug!(environment = %environment.name, ?groups, "added vue cache groups");
            }
            Outcome::Skipped(reason) => {
                debug!(environment = %environment.name, %reason, "skipped vue cache groups");
            }
        }
    }));
}
