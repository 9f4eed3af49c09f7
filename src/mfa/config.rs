use anyhow::{Context, Result};
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use serde_yaml::Value;
use std::collections::HashMap;

/// Top-level key of the configuration blob holding provider sections.
pub const CONFIG_SECTION: &str = "mfa";

/// One enrolled MFA method for one user.
///
/// Created by enrollment logic elsewhere; the dispatcher only reads it.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct MfaConfig {
    pub provider: String,
    #[serde(default)]
    pub attributes: HashMap<String, Value>,
}

impl MfaConfig {
    #[must_use]
    pub fn new(provider: impl Into<String>) -> Self {
        Self {
            provider: provider.into(),
            attributes: HashMap::new(),
        }
    }

    #[must_use]
    pub fn with_attribute(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.attributes.insert(key.into(), value.into());
        self
    }

    /// Integer attribute, or `0` when missing or not an integer.
    #[must_use]
    pub fn attribute_int(&self, key: &str) -> i64 {
        match self.attributes.get(key) {
            Some(Value::Number(n)) => n.as_i64().unwrap_or(0),
            _ => 0,
        }
    }

    /// String attribute, or `""` when missing, empty or not a string.
    #[must_use]
    pub fn attribute_string(&self, key: &str) -> String {
        match self.attributes.get(key) {
            Some(Value::String(s)) if !s.is_empty() => s.clone(),
            _ => String::new(),
        }
    }
}

/// Deserialize the `mfa.<provider_key>` section of a YAML configuration blob.
///
/// Returns `Ok(None)` when the blob, the `mfa` section or the provider key is
/// absent, which providers report as [`ProviderError::Unconfigured`].
///
/// # Errors
/// Returns an error if the blob is not valid YAML or the section does not
/// match `T`.
///
/// [`ProviderError::Unconfigured`]: super::ProviderError::Unconfigured
pub fn provider_section<T: DeserializeOwned>(
    config_source: &[u8],
    provider_key: &str,
) -> Result<Option<T>> {
    if config_source.iter().all(u8::is_ascii_whitespace) {
        return Ok(None);
    }

    let root: Value =
        serde_yaml::from_slice(config_source).context("Failed to parse configuration blob")?;

    let section = match root.get(CONFIG_SECTION).and_then(|mfa| mfa.get(provider_key)) {
        None | Some(Value::Null) => return Ok(None),
        Some(section) => section.clone(),
    };

    let parsed = serde_yaml::from_value(section)
        .with_context(|| format!("Invalid configuration for MFA provider {provider_key}"))?;

    Ok(Some(parsed))
}
