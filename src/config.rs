//! Runtime settings.
//!
//! Every option has a built-in default, may be set through a `PALEO_*`
//! environment variable, and may be overridden explicitly (CLI flag or
//! library call). Explicit values always win.
//!
//! | Option | Variable | Default |
//! |---|---|---|
//! | provider | `PALEO_PROVIDER` | first of the priority list |
//! | model | `PALEO_MODEL` | provider default |
//! | endpoint | `PALEO_ENDPOINT` | `https://linkedearth.graphdb.mint.isi.edu` |
//! | repository | `PALEO_REPOSITORY` | `LiPDVerse-dynamic` |
//! | output dir | `PALEO_OUTPUT_DIR` | `data_query_results` |
//! | save JSON | `PALEO_SAVE_JSON` | `false` |
//! | verbose | `PALEO_VERBOSE` | `false` |
//! | JSON logs | `PALEO_JSON_LOGS` | `false` |
//! | timeout | `PALEO_TIMEOUT_SECS` | `120` |
//! | priority | `PALEO_PROVIDER_PRIORITY` | `ollama,openai,claude` |
//!
//! Provider credentials (`OPENAI_API_KEY`, `ANTHROPIC_API_KEY`,
//! `OLLAMA_HOST`) are not part of settings; they are read when a provider
//! is built.

use crate::llm::ProviderKind;
use crate::types::{PaleoError, Result};
use std::fmt;
use std::path::PathBuf;
use std::time::Duration;

pub const DEFAULT_ENDPOINT: &str = "https://linkedearth.graphdb.mint.isi.edu";
pub const DEFAULT_REPOSITORY: &str = "LiPDVerse-dynamic";
pub const DEFAULT_OUTPUT_DIR: &str = "data_query_results";
pub const DEFAULT_TIMEOUT_SECS: u64 = 120;

/// Resolved settings.
#[derive(Clone, PartialEq)]
pub struct Settings {
    /// Provider to try first (`None` = priority order)
    pub provider: Option<ProviderKind>,
    /// Model override for the first provider
    pub model: Option<String>,
    /// Credential override for the first provider
    pub api_key: Option<String>,
    pub endpoint: String,
    pub repository: String,
    /// Where reports are written (tilde-expanded)
    pub output_dir: PathBuf,
    pub save_json: bool,
    pub verbose: bool,
    pub json_logs: bool,
    /// Bound for each provider call and the store query
    pub timeout: Duration,
    /// Provider fallback order
    pub priority: Vec<ProviderKind>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            provider: None,
            model: None,
            api_key: None,
            endpoint: DEFAULT_ENDPOINT.to_string(),
            repository: DEFAULT_REPOSITORY.to_string(),
            output_dir: PathBuf::from(DEFAULT_OUTPUT_DIR),
            save_json: false,
            verbose: false,
            json_logs: false,
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            priority: ProviderKind::ALL.to_vec(),
        }
    }
}

impl fmt::Debug for Settings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Settings")
            .field("provider", &self.provider)
            .field("model", &self.model)
            .field("api_key", &self.api_key.as_ref().map(|_| "<redacted>"))
            .field("endpoint", &self.endpoint)
            .field("repository", &self.repository)
            .field("output_dir", &self.output_dir)
            .field("save_json", &self.save_json)
            .field("verbose", &self.verbose)
            .field("json_logs", &self.json_logs)
            .field("timeout", &self.timeout)
            .field("priority", &self.priority)
            .finish()
    }
}

/// Explicit values that take precedence over the environment.
#[derive(Debug, Clone, Default)]
pub struct SettingsOverrides {
    pub provider: Option<String>,
    pub model: Option<String>,
    pub api_key: Option<String>,
    pub endpoint: Option<String>,
    pub repository: Option<String>,
    pub output_dir: Option<String>,
    pub save_json: Option<bool>,
    pub verbose: Option<bool>,
    pub json_logs: Option<bool>,
    pub timeout_secs: Option<u64>,
}

impl Settings {
    /// Settings from the process environment.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` for malformed values (non-numeric timeout,
    /// non-boolean flag). An unknown provider is logged and ignored.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Settings from an arbitrary variable lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());
        let mut settings = Self::default();

        if let Some(provider) = get("PALEO_PROVIDER") {
            settings.provider = parse_provider(&provider);
        }
        settings.model = get("PALEO_MODEL");
        if let Some(endpoint) = get("PALEO_ENDPOINT") {
            settings.endpoint = endpoint;
        }
        if let Some(repository) = get("PALEO_REPOSITORY") {
            settings.repository = repository;
        }
        if let Some(dir) = get("PALEO_OUTPUT_DIR") {
            settings.output_dir = expand_path(&dir);
        }
        if let Some(flag) = get("PALEO_SAVE_JSON") {
            settings.save_json = parse_bool("PALEO_SAVE_JSON", &flag)?;
        }
        if let Some(flag) = get("PALEO_VERBOSE") {
            settings.verbose = parse_bool("PALEO_VERBOSE", &flag)?;
        }
        if let Some(flag) = get("PALEO_JSON_LOGS") {
            settings.json_logs = parse_bool("PALEO_JSON_LOGS", &flag)?;
        }
        if let Some(secs) = get("PALEO_TIMEOUT_SECS") {
            settings.timeout = Duration::from_secs(parse_secs(&secs)?);
        }
        if let Some(list) = get("PALEO_PROVIDER_PRIORITY") {
            settings.priority = parse_priority(&list);
        }

        Ok(settings)
    }

    /// Apply explicit overrides on top of these settings.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` for a zero timeout. An unknown provider name
    /// clears the requested provider so the priority order is used.
    pub fn with_overrides(mut self, overrides: SettingsOverrides) -> Result<Self> {
        if let Some(provider) = overrides.provider {
            self.provider = parse_provider(&provider);
        }
        if overrides.model.is_some() {
            self.model = overrides.model;
        }
        if overrides.api_key.is_some() {
            self.api_key = overrides.api_key;
        }
        if let Some(endpoint) = overrides.endpoint {
            self.endpoint = endpoint;
        }
        if let Some(repository) = overrides.repository {
            self.repository = repository;
        }
        if let Some(dir) = overrides.output_dir {
            self.output_dir = expand_path(&dir);
        }
        if let Some(flag) = overrides.save_json {
            self.save_json = flag;
        }
        if let Some(flag) = overrides.verbose {
            self.verbose = flag;
        }
        if let Some(flag) = overrides.json_logs {
            self.json_logs = flag;
        }
        if let Some(secs) = overrides.timeout_secs {
            if secs == 0 {
                return Err(PaleoError::ConfigError("timeout must be at least 1 second".into()));
            }
            self.timeout = Duration::from_secs(secs);
        }
        Ok(self)
    }

    /// Environment settings with explicit overrides applied.
    pub fn resolve(overrides: SettingsOverrides) -> Result<Self> {
        Self::from_env()?.with_overrides(overrides)
    }
}

/// Expand `~` and environment references in a path.
fn expand_path(raw: &str) -> PathBuf {
    match shellexpand::full(raw) {
        Ok(expanded) => PathBuf::from(expanded.as_ref()),
        Err(_) => PathBuf::from(shellexpand::tilde(raw).as_ref()),
    }
}

fn parse_bool(key: &str, value: &str) -> Result<bool> {
    match value.to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        other => Err(PaleoError::ConfigError(format!(
            "{} must be a boolean, got '{}'",
            key, other
        ))),
    }
}

fn parse_secs(value: &str) -> Result<u64> {
    match value.parse::<u64>() {
        Ok(0) | Err(_) => Err(PaleoError::ConfigError(format!(
            "PALEO_TIMEOUT_SECS must be a positive integer, got '{}'",
            value
        ))),
        Ok(secs) => Ok(secs),
    }
}

/// Parse a requested provider; unknown names fall back to the priority order.
fn parse_provider(name: &str) -> Option<ProviderKind> {
    match name.parse::<ProviderKind>() {
        Ok(kind) => Some(kind),
        Err(e) => {
            tracing::warn!(provider = name, error = %e, "Ignoring unknown provider, using priority order");
            None
        }
    }
}

/// Parse a comma-separated provider list, skipping unknown names.
fn parse_priority(list: &str) -> Vec<ProviderKind> {
    let mut priority = Vec::new();
    for name in list.split(',').map(str::trim).filter(|n| !n.is_empty()) {
        match name.parse::<ProviderKind>() {
            Ok(kind) if !priority.contains(&kind) => priority.push(kind),
            Ok(_) => {}
            Err(_) => tracing::warn!(provider = name, "Unknown provider in priority list, skipping"),
        }
    }

    if priority.is_empty() {
        tracing::warn!("Provider priority list is empty, using default order");
        ProviderKind::ALL.to_vec()
    } else {
        priority
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_defaults() {
        let settings = Settings::from_lookup(lookup(&[])).unwrap();
        assert_eq!(settings, Settings::default());
        assert_eq!(settings.endpoint, DEFAULT_ENDPOINT);
        assert_eq!(settings.repository, DEFAULT_REPOSITORY);
        assert_eq!(settings.timeout, Duration::from_secs(120));
        assert_eq!(settings.priority, ProviderKind::ALL.to_vec());
    }

    #[test]
    fn test_environment_values() {
        let settings = Settings::from_lookup(lookup(&[
            ("PALEO_PROVIDER", "anthropic"),
            ("PALEO_REPOSITORY", "LiPDVerse"),
            ("PALEO_SAVE_JSON", "yes"),
            ("PALEO_TIMEOUT_SECS", "30"),
            ("PALEO_PROVIDER_PRIORITY", "openai, gemini, ollama, openai"),
        ]))
        .unwrap();
        assert_eq!(settings.provider, Some(ProviderKind::Claude));
        assert_eq!(settings.repository, "LiPDVerse");
        assert!(settings.save_json);
        assert_eq!(settings.timeout, Duration::from_secs(30));
        assert_eq!(
            settings.priority,
            vec![ProviderKind::OpenAi, ProviderKind::Ollama]
        );
    }

    #[test]
    fn test_malformed_environment_values() {
        assert!(Settings::from_lookup(lookup(&[("PALEO_TIMEOUT_SECS", "soon")])).is_err());
        assert!(Settings::from_lookup(lookup(&[("PALEO_VERBOSE", "maybe")])).is_err());
    }

    #[test]
    fn test_explicit_overrides_win() {
        let env = Settings::from_lookup(lookup(&[
            ("PALEO_PROVIDER", "ollama"),
            ("PALEO_ENDPOINT", "http://env-host:7200"),
            ("PALEO_VERBOSE", "true"),
        ]))
        .unwrap();

        let settings = env
            .with_overrides(SettingsOverrides {
                provider: Some("openai".into()),
                endpoint: Some("http://cli-host:7200".into()),
                verbose: Some(false),
                ..Default::default()
            })
            .unwrap();
        assert_eq!(settings.provider, Some(ProviderKind::OpenAi));
        assert_eq!(settings.endpoint, "http://cli-host:7200");
        assert!(!settings.verbose);
    }

    #[test]
    fn test_unknown_provider_falls_back_to_priority() {
        let env = Settings::from_lookup(lookup(&[
            ("PALEO_PROVIDER", "gemini"),
            ("PALEO_PROVIDER_PRIORITY", "claude,ollama"),
        ]))
        .unwrap();
        assert_eq!(env.provider, None);

        let settings = Settings::from_lookup(lookup(&[("PALEO_PROVIDER", "openai")]))
            .unwrap()
            .with_overrides(SettingsOverrides {
                provider: Some("gemini".into()),
                ..Default::default()
            })
            .unwrap();
        assert_eq!(settings.provider, None);
        assert_eq!(settings.priority, ProviderKind::ALL.to_vec());
        assert_eq!(env.priority, vec![ProviderKind::Claude, ProviderKind::Ollama]);
    }

    #[test]
    fn test_debug_redacts_key() {
        let settings = Settings {
            api_key: Some("sk-secret".into()),
            ..Default::default()
        };
        let printed = format!("{:?}", settings);
        assert!(!printed.contains("sk-secret"));
        assert!(printed.contains("<redacted>"));
    }
}
