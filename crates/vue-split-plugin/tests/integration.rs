//! Integration tests for vue-split-plugin
//!
//! These run the plugin through a `PluginHost` the way a bundler would:
//! register during setup, then modify one chain per build environment.

use serde_json::{Value, json};
use vue_split_config::{
    ChunkSplit, ChunkSplitStrategy, EnvironmentConfig, OutputTarget, SplitChunksPresetConfig,
    SplitChunksSetting, SplitPreset, SplitVueChunkOptions,
};
use vue_split_plugin::{
    BundlerChain, ChainConfig, EnvironmentContext, PluginHost, SplitVueChunkPlugin,
};

fn host_with(options: SplitVueChunkOptions) -> PluginHost {
    let mut host = PluginHost::new();
    host.add_plugin(SplitVueChunkPlugin::with_options(options));
    host
}

fn run(host: &PluginHost, config: EnvironmentConfig, optimization: Value) -> Value {
    let env = EnvironmentContext::new("web", config);
    let mut chain = ChainConfig::from_value(&json!({ "optimization": optimization }));
    host.modify_chain(&env, &mut chain);
    chain.to_value().expect("render chain")
}

fn user_split_chunks() -> Value {
    json!({
        "splitChunks": {
            "chunks": "all",
            "cacheGroups": {
                "foo": { "name": "foo", "test": "[\\\\/]foo[\\\\/]", "priority": 10 }
            }
        }
    })
}

#[test]
fn adds_vue_and_router_groups_next_to_user_groups() {
    let host = host_with(SplitVueChunkOptions::default());
    let result = run(&host, EnvironmentConfig::default(), user_split_chunks());

    let split_chunks = &result["optimization"]["splitChunks"];
    assert_eq!(split_chunks["chunks"], json!("all"));
    assert_eq!(
        split_chunks["cacheGroups"]["foo"],
        user_split_chunks()["splitChunks"]["cacheGroups"]["foo"]
    );
    assert_eq!(
        split_chunks["cacheGroups"]["vue"],
        json!({
            "name": "lib-vue",
            "test": "node_modules[\\\\/](?:vue|vue-loader)[\\\\/]",
            "priority": 0
        })
    );
    assert_eq!(
        split_chunks["cacheGroups"]["router"],
        json!({
            "name": "lib-router",
            "test": "node_modules[\\\\/]vue-router[\\\\/]",
            "priority": 0
        })
    );
}

#[test]
fn explicit_default_preset_behaves_like_unset() {
    let host = host_with(SplitVueChunkOptions::default());
    let config = EnvironmentConfig::default().with_split_chunks(SplitChunksSetting::Config(
        SplitChunksPresetConfig::with_preset(SplitPreset::Default),
    ));

    let explicit = run(&host, config, user_split_chunks());
    let unset = run(&host, EnvironmentConfig::default(), user_split_chunks());
    assert_eq!(explicit, unset);
}

#[test]
fn non_web_targets_are_untouched() {
    let host = host_with(SplitVueChunkOptions::default());
    for target in [OutputTarget::Node, OutputTarget::WebWorker] {
        let config = EnvironmentConfig::default().with_target(target);
        let result = run(&host, config, user_split_chunks());
        assert_eq!(result["optimization"], user_split_chunks(), "{target}");
    }
}

#[test]
fn legacy_strategies_other_than_split_by_experience_are_untouched() {
    let host = host_with(SplitVueChunkOptions::default());
    for strategy in [
        ChunkSplitStrategy::SplitByModule,
        ChunkSplitStrategy::SplitBySize,
        ChunkSplitStrategy::AllInOne,
        ChunkSplitStrategy::SingleVendor,
        ChunkSplitStrategy::Custom,
        ChunkSplitStrategy::Unknown,
    ] {
        let config = EnvironmentConfig::default().with_chunk_split(ChunkSplit::new(strategy));
        let result = run(&host, config, user_split_chunks());
        assert_eq!(result["optimization"], user_split_chunks(), "{strategy:?}");
    }
}

#[test]
fn legacy_split_by_experience_applies() {
    let host = host_with(SplitVueChunkOptions::default());
    let config = EnvironmentConfig::default()
        .with_chunk_split(ChunkSplit::new(ChunkSplitStrategy::SplitByExperience));

    let result = run(&host, config, user_split_chunks());
    assert!(result["optimization"]["splitChunks"]["cacheGroups"]["vue"].is_object());
}

#[test]
fn both_flags_off_is_a_no_op() {
    let host = host_with(SplitVueChunkOptions::new().with_vue(false).with_router(false));
    let result = run(&host, EnvironmentConfig::default(), user_split_chunks());
    assert_eq!(result["optimization"], user_split_chunks());
}

#[test]
fn disabled_split_chunks_is_a_no_op() {
    let host = host_with(SplitVueChunkOptions::default());
    let result = run(
        &host,
        EnvironmentConfig::default(),
        json!({ "splitChunks": false }),
    );
    assert_eq!(result["optimization"]["splitChunks"], json!(false));
}

#[test]
fn applying_twice_equals_applying_once() {
    let host = host_with(SplitVueChunkOptions::default());
    let env = EnvironmentContext::new("web", EnvironmentConfig::default());
    let mut chain = ChainConfig::from_value(&json!({ "optimization": user_split_chunks() }));

    host.modify_chain(&env, &mut chain);
    let once = chain.clone();
    host.modify_chain(&env, &mut chain);

    assert_eq!(chain, once);
}

#[test]
fn same_named_user_group_is_replaced() {
    let host = host_with(SplitVueChunkOptions::default());
    let result = run(
        &host,
        EnvironmentConfig::default(),
        json!({
            "splitChunks": {
                "cacheGroups": { "vue": { "name": "my-vue", "priority": 50 } }
            }
        }),
    );
    let vue = &result["optimization"]["splitChunks"]["cacheGroups"]["vue"];
    assert_eq!(vue["name"], json!("lib-vue"));
    assert_eq!(vue["priority"], json!(0));
}

#[test]
fn environments_are_modified_independently() {
    let host = host_with(SplitVueChunkOptions::default());
    let web = EnvironmentContext::new("web", EnvironmentConfig::default());
    let ssr = EnvironmentContext::new(
        "ssr",
        EnvironmentConfig::default().with_target(OutputTarget::Node),
    );

    let mut web_chain = ChainConfig::from_value(&json!({ "optimization": { "splitChunks": {} } }));
    let mut ssr_chain = web_chain.clone();
    host.modify_chain(&web, &mut web_chain);
    host.modify_chain(&ssr, &mut ssr_chain);

    let web_groups = web_chain.split_chunks().unwrap();
    assert_eq!(web_groups.as_options().unwrap().cache_groups.len(), 2);
    assert!(ssr_chain.split_chunks().unwrap().as_options().unwrap().cache_groups.is_empty());
}

#[test]
fn merged_groups_route_framework_modules() {
    let host = host_with(SplitVueChunkOptions::default());
    let web = EnvironmentContext::new("web", EnvironmentConfig::default());
    let mut chain = ChainConfig::from_value(&json!({ "optimization": user_split_chunks() }));
    host.modify_chain(&web, &mut chain);

    let value = chain.split_chunks().unwrap();
    let options = value.as_options().unwrap();
    assert_eq!(options.find_group("/p/node_modules/vue/index.js"), Some("vue"));
    assert_eq!(options.find_group("/p/node_modules/vue-loader/dist/index.js"), Some("vue"));
    assert_eq!(options.find_group("/p/node_modules/vue-router/index.js"), Some("router"));
    assert_eq!(options.find_group("/p/node_modules/foo/index.js"), Some("foo"));
    assert_eq!(options.find_group("/p/src/main.ts"), None);
}
