//! Resolver configuration.
//!
//! [`ResolverConfig`] can be built in code, read from any [`ConfigSource`]
//! (environment variables, an in-memory map) or, with the `config` feature,
//! deserialized from JSON.

use std::collections::HashMap;
use std::env;

use crate::error::{DiError, DiResult};

/// Prefix of the environment variables read by [`ResolverConfig::from_env`].
pub const ENV_PREFIX: &str = "FERROUS_CONTROLLER";

/// A configuration value that can be various types
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "config", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "config", serde(untagged))]
pub enum ConfigValue {
    String(String),
    Integer(i64),
    Boolean(bool),
}

impl ConfigValue {
    /// Try to convert to string
    pub fn as_string(&self) -> DiResult<&str> {
        match self {
            ConfigValue::String(s) => Ok(s),
            other => Err(DiError::Config(format!("expected a string, got {:?}", other))),
        }
    }

    /// Try to convert to boolean
    pub fn as_bool(&self) -> DiResult<bool> {
        match self {
            ConfigValue::Boolean(b) => Ok(*b),
            other => Err(DiError::Config(format!("expected a boolean, got {:?}", other))),
        }
    }

    /// Parses a raw string the way environment variables are read.
    pub fn parse(raw: &str) -> Self {
        if let Ok(int_val) = raw.parse::<i64>() {
            ConfigValue::Integer(int_val)
        } else if let Ok(bool_val) = raw.parse::<bool>() {
            ConfigValue::Boolean(bool_val)
        } else {
            ConfigValue::String(raw.to_string())
        }
    }
}

/// Trait for configuration sources
pub trait ConfigSource: Send + Sync + std::fmt::Debug {
    /// Get a configuration value by key
    fn get(&self, key: &str) -> Option<ConfigValue>;

    /// List all available keys
    fn keys(&self) -> Vec<String>;
}

/// Environment variable configuration source
///
/// Keys are upper-cased and prefixed, so `separator` with prefix
/// `FERROUS_CONTROLLER` reads `FERROUS_CONTROLLER_SEPARATOR`.
#[derive(Debug, Default)]
pub struct EnvironmentConfigSource {
    prefix: Option<String>,
}

impl EnvironmentConfigSource {
    pub fn new() -> Self {
        Self { prefix: None }
    }

    pub fn with_prefix(prefix: impl Into<String>) -> Self {
        Self { prefix: Some(prefix.into()) }
    }

    fn env_key(&self, key: &str) -> String {
        match &self.prefix {
            Some(prefix) => format!("{}_{}", prefix.to_uppercase(), key.to_uppercase()),
            None => key.to_uppercase(),
        }
    }
}

impl ConfigSource for EnvironmentConfigSource {
    fn get(&self, key: &str) -> Option<ConfigValue> {
        env::var(self.env_key(key)).ok().map(|value| ConfigValue::parse(&value))
    }

    fn keys(&self) -> Vec<String> {
        env::vars()
            .filter_map(|(key, _)| match &self.prefix {
                Some(prefix) => {
                    let prefix = format!("{}_", prefix.to_uppercase());
                    key.strip_prefix(&prefix).map(str::to_lowercase)
                }
                None => Some(key.to_lowercase()),
            })
            .collect()
    }
}

/// In-memory configuration source
#[derive(Debug, Default, Clone)]
pub struct MapConfigSource {
    values: HashMap<String, ConfigValue>,
}

impl MapConfigSource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(mut self, key: impl Into<String>, value: ConfigValue) -> Self {
        self.values.insert(key.into(), value);
        self
    }
}

impl ConfigSource for MapConfigSource {
    fn get(&self, key: &str) -> Option<ConfigValue> {
        self.values.get(key).cloned()
    }

    fn keys(&self) -> Vec<String> {
        self.values.keys().cloned().collect()
    }
}

/// Settings of the [`ControllerResolver`](crate::ControllerResolver).
///
/// # Examples
///
/// ```
/// use ferrous_controller::{ConfigValue, MapConfigSource, ResolverConfig};
///
/// let source = MapConfigSource::new()
///     .set("controller_attribute", ConfigValue::String("_handler".into()))
///     .set("allow_single_colon", ConfigValue::Boolean(false));
///
/// let config = ResolverConfig::from_source(&source).unwrap();
/// assert_eq!(config.controller_attribute, "_handler");
/// assert_eq!(config.separator, "::");
/// assert!(!config.allow_single_colon);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "config", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "config", serde(default))]
pub struct ResolverConfig {
    /// Request attribute holding the controller reference
    pub controller_attribute: String,
    /// Token between target and method
    pub separator: String,
    /// Accept the legacy `service:method` notation (logged as deprecated)
    pub allow_single_colon: bool,
    /// Add "did you mean" alternatives to not-found errors
    pub suggest_alternatives: bool,
}

impl Default for ResolverConfig {
    fn default() -> Self {
        Self {
            controller_attribute: "_controller".to_string(),
            separator: "::".to_string(),
            allow_single_colon: true,
            suggest_alternatives: true,
        }
    }
}

impl ResolverConfig {
    /// Reads every key present in `source`, keeping defaults for the rest.
    pub fn from_source(source: &dyn ConfigSource) -> DiResult<Self> {
        let mut config = Self::default();

        if let Some(value) = source.get("controller_attribute") {
            config.controller_attribute = value.as_string()?.to_string();
        }
        if let Some(value) = source.get("separator") {
            config.separator = value.as_string()?.to_string();
        }
        if let Some(value) = source.get("allow_single_colon") {
            config.allow_single_colon = value.as_bool()?;
        }
        if let Some(value) = source.get("suggest_alternatives") {
            config.suggest_alternatives = value.as_bool()?;
        }

        config.validate()?;
        Ok(config)
    }

    /// Reads `FERROUS_CONTROLLER_*` environment variables.
    pub fn from_env() -> DiResult<Self> {
        Self::from_source(&EnvironmentConfigSource::with_prefix(ENV_PREFIX))
    }

    /// Parses a JSON document; missing fields keep their defaults.
    #[cfg(feature = "config")]
    pub fn from_json(json: &str) -> DiResult<Self> {
        let config: Self = serde_json::from_str(json)
            .map_err(|err| DiError::Config(format!("invalid resolver configuration: {}", err)))?;
        config.validate()?;
        Ok(config)
    }

    /// Rejects settings the resolver cannot work with.
    pub fn validate(&self) -> DiResult<()> {
        if self.controller_attribute.is_empty() {
            return Err(DiError::Config("controller_attribute must not be empty".into()));
        }
        if self.separator.is_empty() {
            return Err(DiError::Config("separator must not be empty".into()));
        }
        Ok(())
    }
}
