//! Loader for followcheck configuration with YAML + environment overlays.
//!
//! The config file is optional: a run with no `followcheck.yaml` and no
//! `FOLLOWCHECK_`-prefixed environment variables gets the built-in defaults
//! (data under `./data`, the stock API endpoint, file-only logging), keeping
//! the interactive-only CLI surface intact. `${VAR}` placeholders in string
//! values are expanded recursively before deserialization.
use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;
use serde_json::Value;
use std::path::Path;

const MAXIMUM_ENV_EXPANSION_DEPTH: usize = 8;

/// Top-level configuration for a followcheck run.
#[derive(Debug, Deserialize)]
pub struct FollowcheckConfig {
    /// Directory the five list files are written into.
    #[serde(default = "default_data_dir")]
    pub data_dir: String,
    #[serde(default)]
    pub api: ApiConfig,
    #[serde(default)]
    pub log: LogSection,
}

impl Default for FollowcheckConfig {
    fn default() -> Self {
        Self {
            data_dir: default_data_dir(),
            api: ApiConfig::default(),
            log: LogSection::default(),
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct ApiConfig {
    #[serde(default = "default_base_url")]
    pub base_url: String,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
        }
    }
}

#[derive(Debug, Deserialize, Default)]
pub struct LogSection {
    /// Explicit log directory; falls back to the observability defaults.
    #[serde(default)]
    pub dir: Option<String>,
    /// Emit JSON-encoded events instead of text.
    #[serde(default)]
    pub json: bool,
    /// Duplicate events to stderr in addition to the file sink.
    #[serde(default)]
    pub stderr: bool,
}

fn default_data_dir() -> String {
    "data".into()
}
fn default_base_url() -> String {
    "https://i.instagram.com".into()
}

fn expand_env_in_value(v: &mut Value) {
    match v {
        Value::String(s) => {
            if s.contains('$') {
                let mut cur = std::mem::take(s);
                for _ in 0..MAXIMUM_ENV_EXPANSION_DEPTH {
                    let expanded = match shellexpand::env(&cur) {
                        Ok(cow) => cow.into_owned(),
                        Err(_) => cur.clone(),
                    };
                    if expanded == cur {
                        break;
                    }
                    cur = expanded;
                }
                *s = cur;
            }
        }
        Value::Array(arr) => arr.iter_mut().for_each(expand_env_in_value),
        Value::Object(obj) => obj.values_mut().for_each(expand_env_in_value),
        _ => {}
    }
}

/// Builder hiding the `config` crate wiring (optional YAML + env overrides).
pub struct FollowcheckConfigLoader {
    builder: config::ConfigBuilder<config::builder::DefaultState>,
}

impl Default for FollowcheckConfigLoader {
    fn default() -> Self {
        Self::new()
    }
}

impl FollowcheckConfigLoader {
    /// Start with the default sources: `FOLLOWCHECK_` env overrides, nothing
    /// else. File sources are attached with [`with_file`](Self::with_file).
    ///
    /// ```
    /// use followcheck_config::FollowcheckConfigLoader;
    ///
    /// let config = FollowcheckConfigLoader::new().load().expect("defaults");
    /// assert_eq!(config.data_dir, "data");
    /// assert_eq!(config.api.base_url, "https://i.instagram.com");
    /// assert!(!config.log.json);
    /// ```
    pub fn new() -> Self {
        let builder =
            Config::builder().add_source(Environment::with_prefix("FOLLOWCHECK").separator("__"));
        Self { builder }
    }

    /// Attach a YAML/TOML/JSON file; missing files are skipped so the binary
    /// runs without any config at all.
    pub fn with_file<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.builder = self
            .builder
            .add_source(File::from(path.as_ref()).required(false));
        self
    }

    /// Allow tests to merge inline YAML snippets.
    ///
    /// ```
    /// use followcheck_config::FollowcheckConfigLoader;
    ///
    /// let config = FollowcheckConfigLoader::new()
    ///     .with_yaml_str("data_dir: out\napi:\n  base_url: http://localhost:9009")
    ///     .load()
    ///     .expect("valid config");
    ///
    /// assert_eq!(config.data_dir, "out");
    /// assert_eq!(config.api.base_url, "http://localhost:9009");
    /// ```
    pub fn with_yaml_str(mut self, yaml: &str) -> Self {
        self.builder = self
            .builder
            .add_source(File::from_str(yaml, config::FileFormat::Yaml));
        self
    }

    /// Consume the builder and deserialize the merged sources, expanding
    /// `${VAR}` placeholders first.
    pub fn load(self) -> Result<FollowcheckConfig, ConfigError> {
        let cfg = self.builder.build()?;

        let mut v: Value = cfg.try_deserialize()?;
        expand_env_in_value(&mut v);

        let typed: FollowcheckConfig =
            serde_json::from_value(v).map_err(|e| ConfigError::Message(e.to_string()))?;

        Ok(typed)
    }
}
