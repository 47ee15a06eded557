//! The bundler's `optimization.splitChunks` value and its cache groups.
//!
//! Bundlers accept several shapes here: `false` to turn splitting off, a
//! structured options object, or something else a previous plugin left
//! behind. [`SplitChunksValue`] keeps those apart so callers can only merge
//! into the structured form.

use indexmap::IndexMap;
use regex::Regex;
use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::{Map, Value};
use tracing::debug;

use crate::error::{ConfigError, Result};

const CACHE_GROUPS_KEY: &str = "cacheGroups";

/// Module path matcher (`test` field of a cache group)
#[derive(Debug, Clone)]
pub struct ModuleMatcher(Regex);

impl ModuleMatcher {
    pub fn new(pattern: &str) -> std::result::Result<Self, regex::Error> {
        Regex::new(pattern).map(Self)
    }

    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }

    pub fn is_match(&self, module_path: &str) -> bool {
        self.0.is_match(module_path)
    }
}

impl From<Regex> for ModuleMatcher {
    fn from(regex: Regex) -> Self {
        Self(regex)
    }
}

impl PartialEq for ModuleMatcher {
    fn eq(&self, other: &Self) -> bool {
        self.as_str() == other.as_str()
    }
}

impl Serialize for ModuleMatcher {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for ModuleMatcher {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let pattern = String::deserialize(deserializer)?;
        Self::new(&pattern).map_err(D::Error::custom)
    }
}

/// A single cache group rule
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CacheGroup {
    /// Output chunk name
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub test: Option<ModuleMatcher>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub priority: Option<i32>,

    /// Fields this crate does not interpret (`chunks`, `enforce`, ...)
    #[serde(flatten)]
    pub rest: Map<String, Value>,
}

impl CacheGroup {
    pub fn new(name: impl Into<String>, test: ModuleMatcher, priority: i32) -> Self {
        Self {
            name: Some(name.into()),
            test: Some(test),
            priority: Some(priority),
            rest: Map::new(),
        }
    }

    pub fn matches(&self, module_path: &str) -> bool {
        self.test
            .as_ref()
            .is_some_and(|test| test.is_match(module_path))
    }
}

/// Value stored under a cache group key: a rule, `false` to disable a
/// built-in group, or a value this crate does not model.
#[derive(Debug, Clone, PartialEq)]
pub enum CacheGroupEntry {
    Disabled,
    Rule(CacheGroup),
    /// Passed through untouched (`true`, `name: false`, JS-only patterns, ...)
    Raw(Value),
}

impl CacheGroupEntry {
    /// Type a raw cache group value, keeping anything unrecognised as [`Self::Raw`]
    pub fn from_value(value: Value) -> Self {
        match value {
            Value::Bool(false) => Self::Disabled,
            Value::Object(_) => match serde_json::from_value::<CacheGroup>(value.clone()) {
                Ok(group) => Self::Rule(group),
                Err(err) => {
                    debug!(error = %err, "keeping cache group as raw value");
                    Self::Raw(value)
                }
            },
            other => Self::Raw(other),
        }
    }

    pub fn as_rule(&self) -> Option<&CacheGroup> {
        match self {
            Self::Rule(group) => Some(group),
            Self::Disabled | Self::Raw(_) => None,
        }
    }
}

impl From<CacheGroup> for CacheGroupEntry {
    fn from(group: CacheGroup) -> Self {
        Self::Rule(group)
    }
}

impl Serialize for CacheGroupEntry {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        match self {
            Self::Disabled => serializer.serialize_bool(false),
            Self::Rule(group) => group.serialize(serializer),
            Self::Raw(value) => value.serialize(serializer),
        }
    }
}

impl<'de> Deserialize<'de> for CacheGroupEntry {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        Value::deserialize(deserializer).map(Self::from_value)
    }
}

/// Structured `splitChunks` options
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SplitChunksOptions {
    #[serde(default, skip_serializing_if = "IndexMap::is_empty")]
    pub cache_groups: IndexMap<String, CacheGroupEntry>,

    /// Every other splitChunks field, kept verbatim
    #[serde(flatten)]
    pub rest: Map<String, Value>,
}

impl SplitChunksOptions {
    /// Build from any JSON object.
    ///
    /// Never fails: each cache group is typed on its own, and a `cacheGroups`
    /// value that is not an object counts as no groups.
    pub fn from_map(mut map: Map<String, Value>) -> Self {
        let cache_groups = match map.shift_remove(CACHE_GROUPS_KEY) {
            Some(Value::Object(groups)) => groups
                .into_iter()
                .map(|(key, value)| (key, CacheGroupEntry::from_value(value)))
                .collect(),
            Some(other) => {
                debug!(value = %other, "ignoring non-object cacheGroups");
                IndexMap::new()
            }
            None => IndexMap::new(),
        };

        Self {
            cache_groups,
            rest: map,
        }
    }

    /// Shallow merge of extra cache groups into a copy of these options.
    ///
    /// All other fields are kept as-is. Existing groups keep their position;
    /// a group under an already-used key replaces the old value.
    pub fn with_cache_groups<I>(&self, groups: I) -> Self
    where
        I: IntoIterator<Item = (String, CacheGroupEntry)>,
    {
        let mut merged = self.clone();
        for (key, group) in groups {
            merged.cache_groups.insert(key, group);
        }
        merged
    }

    /// Key of the highest-priority rule matching `module_path`.
    ///
    /// Missing priorities count as 0; on ties the earlier key wins.
    pub fn find_group(&self, module_path: &str) -> Option<&str> {
        let mut best: Option<(&str, i32)> = None;

        for (key, entry) in &self.cache_groups {
            let Some(group) = entry.as_rule() else {
                continue;
            };
            if !group.matches(module_path) {
                continue;
            }
            let priority = group.priority.unwrap_or(0);
            if best.is_none_or(|(_, current)| priority > current) {
                best = Some((key.as_str(), priority));
            }
        }

        best.map(|(key, _)| key)
    }
}

impl<'de> Deserialize<'de> for SplitChunksOptions {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        Map::deserialize(deserializer).map(Self::from_map)
    }
}

/// Current value of `optimization.splitChunks` on a bundler chain
#[derive(Debug, Clone, PartialEq)]
pub enum SplitChunksValue {
    /// `false`
    Disabled,
    /// A plain structured object
    Options(SplitChunksOptions),
    /// Any other shape (`true`, arrays, strings, `null`)
    Other(Value),
}

impl SplitChunksValue {
    /// Classify a raw JSON value; every object is [`SplitChunksValue::Options`].
    pub fn from_value(value: Value) -> Self {
        match value {
            Value::Bool(false) => Self::Disabled,
            Value::Object(map) => Self::Options(SplitChunksOptions::from_map(map)),
            other => Self::Other(other),
        }
    }

    pub fn to_value(&self) -> Result<Value> {
        match self {
            Self::Disabled => Ok(Value::Bool(false)),
            Self::Options(options) => serde_json::to_value(options)
                .map_err(|e| ConfigError::invalid_value("splitChunks", e.to_string())),
            Self::Other(value) => Ok(value.clone()),
        }
    }

    /// Plain-object guard: only structured options may be merged into.
    pub fn as_options(&self) -> Option<&SplitChunksOptions> {
        match self {
            Self::Options(options) => Some(options),
            Self::Disabled | Self::Other(_) => None,
        }
    }

    pub fn is_plain_object(&self) -> bool {
        self.as_options().is_some()
    }
}

impl From<SplitChunksOptions> for SplitChunksValue {
    fn from(options: SplitChunksOptions) -> Self {
        Self::Options(options)
    }
}

impl Serialize for SplitChunksValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        match self {
            Self::Disabled => serializer.serialize_bool(false),
            Self::Options(options) => options.serialize(serializer),
            Self::Other(value) => value.serialize(serializer),
        }
    }
}

impl<'de> Deserialize<'de> for SplitChunksValue {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        Value::deserialize(deserializer).map(Self::from_value)
    }
}
