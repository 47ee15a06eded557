//! File-based option discovery
//!
//! Options are layered, lowest priority first:
//! 1. built-in defaults (`vue = true`, `router = true`)
//! 2. `vue-split.toml`, or the `vueSplit` field of `package.json`
//! 3. environment variables (`VUE_SPLIT_VUE`, `VUE_SPLIT_ROUTER`)

use std::fs;
use std::path::{Path, PathBuf};

use figment::{
    Figment,
    providers::{Env, Format as _, Json, Serialized, Toml},
};
use serde_json::Value;
use tracing::debug;

use crate::error::{ConfigError, Result};
use crate::options::{PluginVueOptions, SplitVueChunkOptions};

pub const CONFIG_FILE_NAME: &str = "vue-split.toml";
pub const PACKAGE_JSON_FIELD: &str = "vueSplit";
pub const ENV_PREFIX: &str = "VUE_SPLIT_";

/// Searches a project root for plugin options and loads them.
///
/// Library users can build [`PluginVueOptions`] directly; this is for hosts
/// that want file and environment overrides.
///
/// # Example
///
/// ```no_run
/// use vue_split_config::OptionsDiscovery;
///
/// let options = OptionsDiscovery::new(".").load().unwrap();
/// assert!(options.split_chunks.vue);
/// ```
pub struct OptionsDiscovery {
    root: PathBuf,
}

impl OptionsDiscovery {
    pub fn new(root: impl AsRef<Path>) -> Self {
        Self {
            root: root.as_ref().to_path_buf(),
        }
    }

    /// Find an options file in the root directory
    ///
    /// Searches in this order:
    /// 1. `vue-split.toml`
    /// 2. `package.json` with a non-null `vueSplit` field
    pub fn find(&self) -> Option<PathBuf> {
        let toml_path = self.root.join(CONFIG_FILE_NAME);
        if toml_path.exists() {
            return Some(toml_path);
        }

        let pkg_path = self.root.join("package.json");
        let content = fs::read_to_string(&pkg_path).ok()?;
        let parsed = serde_json::from_str::<Value>(&content).ok()?;
        match parsed.get(PACKAGE_JSON_FIELD) {
            Some(field) if !field.is_null() => Some(pkg_path),
            _ => None,
        }
    }

    /// Load options from defaults, the discovered file (if any) and the
    /// environment. A project without an options file is not an error.
    pub fn load(&self) -> Result<PluginVueOptions> {
        let path = self.find();
        self.extract(path.as_deref())
    }

    /// Load options from a specific file (`.toml`, `.json` or `package.json`)
    pub fn load_from(&self, path: impl AsRef<Path>) -> Result<PluginVueOptions> {
        let path = self.root.join(path.as_ref());
        if !path.exists() {
            return Err(ConfigError::NotFound { path });
        }
        self.extract(Some(&path))
    }

    fn extract(&self, path: Option<&Path>) -> Result<PluginVueOptions> {
        let mut figment = Figment::new().merge(Serialized::defaults(SplitVueChunkOptions::default()));

        if let Some(path) = path {
            debug!(path = %path.display(), "loading split chunk options");
            figment = merge_file(figment, path)?;
        }

        figment = figment.merge(Env::prefixed(ENV_PREFIX));

        let split_chunks: SplitVueChunkOptions = figment.extract()?;
        Ok(PluginVueOptions::from(split_chunks))
    }
}

fn merge_file(figment: Figment, path: &Path) -> Result<Figment> {
    if path.file_name() == Some(std::ffi::OsStr::new("package.json")) {
        let content = fs::read_to_string(path)?;
        let parsed: Value = serde_json::from_str(&content)
            .map_err(|e| ConfigError::invalid_value("package.json", format!("Invalid JSON: {}", e)))?;

        let field = match parsed.get(PACKAGE_JSON_FIELD) {
            Some(field) if field.is_object() => field.clone(),
            _ => {
                return Err(ConfigError::invalid_value(
                    PACKAGE_JSON_FIELD,
                    "Add a 'vueSplit' object to your package.json",
                ));
            }
        };
        return Ok(figment.merge(Serialized::defaults(field)));
    }

    match path.extension().and_then(|ext| ext.to_str()) {
        Some("json") => Ok(figment.merge(Json::file(path))),
        Some("toml") => Ok(figment.merge(Toml::file(path))),
        other => Err(ConfigError::invalid_value(
            "path",
            format!("unsupported options file extension: {:?}", other.unwrap_or("")),
        )),
    }
}

/// Discover and load options from `root` (convenience function)
pub fn discover(root: impl AsRef<Path>) -> Result<PluginVueOptions> {
    OptionsDiscovery::new(root).load()
}
