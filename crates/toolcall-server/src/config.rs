//! Server configuration read from the environment.

use std::fmt;
use std::time::Duration;

use thiserror::Error;
use toolcall_llm::{Persona, UnknownPersona, DEFAULT_API_BASE};

const DEFAULT_MODEL: &str = "@hf/nousresearch/hermes-2-pro-mistral-7b";
const DEFAULT_TEMPERATURE: f64 = 0.12;
const DEFAULT_TIMEOUT_SECS: u64 = 60;
const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8787";

/// Configuration loading errors.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Missing required environment variable: {0}")]
    Missing(&'static str),

    #[error("Invalid value for {key}: '{value}' ({reason})")]
    Invalid {
        key: &'static str,
        value: String,
        reason: String,
    },

    #[error(transparent)]
    Persona(#[from] UnknownPersona),
}

/// Everything the server needs to run.
#[derive(Clone)]
pub struct ServerConfig {
    pub account_id: String,
    pub api_token: String,
    pub api_base: String,
    pub model: String,
    pub temperature: f64,
    pub persona: Persona,
    pub timeout: Duration,
    pub database_url: Option<String>,
    pub bind_addr: String,
}

impl ServerConfig {
    /// Reads the configuration from process environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Reads the configuration through an arbitrary key lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());
        let require = |key: &'static str| get(key).ok_or(ConfigError::Missing(key));

        let temperature = match get("AI_TEMPERATURE") {
            Some(raw) => parse_temperature(&raw)?,
            None => DEFAULT_TEMPERATURE,
        };

        let timeout_secs = match get("AI_TIMEOUT_SECS") {
            Some(raw) => raw.trim().parse::<u64>().map_err(|e| ConfigError::Invalid {
                key: "AI_TIMEOUT_SECS",
                value: raw.clone(),
                reason: e.to_string(),
            })?,
            None => DEFAULT_TIMEOUT_SECS,
        };

        let persona = match get("SYSTEM_PROMPT_PERSONA") {
            Some(raw) => raw.parse::<Persona>()?,
            None => Persona::default(),
        };

        Ok(Self {
            account_id: require("CLOUDFLARE_ACCOUNT_ID")?,
            api_token: require("CLOUDFLARE_API_TOKEN")?,
            api_base: get("CLOUDFLARE_API_BASE").unwrap_or_else(|| DEFAULT_API_BASE.into()),
            model: get("AI_MODEL").unwrap_or_else(|| DEFAULT_MODEL.into()),
            temperature,
            persona,
            timeout: Duration::from_secs(timeout_secs),
            database_url: get("DATABASE_URL"),
            bind_addr: get("BIND_ADDR").unwrap_or_else(|| DEFAULT_BIND_ADDR.into()),
        })
    }
}

fn parse_temperature(raw: &str) -> Result<f64, ConfigError> {
    let invalid = |reason: String| ConfigError::Invalid {
        key: "AI_TEMPERATURE",
        value: raw.to_string(),
        reason,
    };
    let value = raw.trim().parse::<f64>().map_err(|e| invalid(e.to_string()))?;
    if !(0.0..=5.0).contains(&value) {
        return Err(invalid("must be between 0 and 5".into()));
    }
    Ok(value)
}

impl fmt::Debug for ServerConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ServerConfig")
            .field("account_id", &self.account_id)
            .field("api_token", &"<redacted>")
            .field("api_base", &self.api_base)
            .field("model", &self.model)
            .field("temperature", &self.temperature)
            .field("persona", &self.persona)
            .field("timeout", &self.timeout)
            .field("database_url", &self.database_url)
            .field("bind_addr", &self.bind_addr)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use pretty_assertions::assert_eq;

    use super::*;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    const REQUIRED: [(&str, &str); 2] = [("CLOUDFLARE_ACCOUNT_ID", "acct"), ("CLOUDFLARE_API_TOKEN", "secret")];

    #[test]
    fn applies_defaults() {
        let config = ServerConfig::from_lookup(lookup(&REQUIRED)).unwrap();
        assert_eq!(config.model, DEFAULT_MODEL);
        assert_eq!(config.temperature, 0.12);
        assert_eq!(config.persona, Persona::Qa);
        assert_eq!(config.api_base, DEFAULT_API_BASE);
        assert_eq!(config.timeout, Duration::from_secs(60));
        assert_eq!(config.bind_addr, "0.0.0.0:8787");
        assert_eq!(config.database_url, None);
    }

    #[test]
    fn missing_token_is_reported() {
        let err = ServerConfig::from_lookup(lookup(&[("CLOUDFLARE_ACCOUNT_ID", "acct")])).unwrap_err();
        assert!(matches!(err, ConfigError::Missing("CLOUDFLARE_API_TOKEN")));
    }

    #[test]
    fn blank_values_count_as_missing() {
        let err = ServerConfig::from_lookup(lookup(&[
            ("CLOUDFLARE_ACCOUNT_ID", "  "),
            ("CLOUDFLARE_API_TOKEN", "secret"),
        ]))
        .unwrap_err();
        assert!(matches!(err, ConfigError::Missing("CLOUDFLARE_ACCOUNT_ID")));
    }

    #[test]
    fn overrides_are_read() {
        let mut pairs = REQUIRED.to_vec();
        pairs.extend([
            ("AI_MODEL", "@cf/meta/llama-3.1-8b-instruct"),
            ("AI_TEMPERATURE", "0.5"),
            ("SYSTEM_PROMPT_PERSONA", "hacker"),
            ("AI_TIMEOUT_SECS", "5"),
            ("DATABASE_URL", "data/users.db"),
        ]);
        let config = ServerConfig::from_lookup(lookup(&pairs)).unwrap();
        assert_eq!(config.model, "@cf/meta/llama-3.1-8b-instruct");
        assert_eq!(config.temperature, 0.5);
        assert_eq!(config.persona, Persona::Hacker);
        assert_eq!(config.timeout, Duration::from_secs(5));
        assert_eq!(config.database_url.as_deref(), Some("data/users.db"));
    }

    #[test]
    fn rejects_bad_temperature_and_persona() {
        let mut pairs = REQUIRED.to_vec();
        pairs.push(("AI_TEMPERATURE", "hot"));
        assert!(matches!(
            ServerConfig::from_lookup(lookup(&pairs)),
            Err(ConfigError::Invalid { key: "AI_TEMPERATURE", .. })
        ));

        let mut pairs = REQUIRED.to_vec();
        pairs.push(("AI_TEMPERATURE", "9"));
        assert!(matches!(
            ServerConfig::from_lookup(lookup(&pairs)),
            Err(ConfigError::Invalid { key: "AI_TEMPERATURE", .. })
        ));

        let mut pairs = REQUIRED.to_vec();
        pairs.push(("SYSTEM_PROMPT_PERSONA", "pirate"));
        assert!(matches!(
            ServerConfig::from_lookup(lookup(&pairs)),
            Err(ConfigError::Persona(_))
        ));
    }

    #[test]
    fn debug_hides_token() {
        let config = ServerConfig::from_lookup(lookup(&REQUIRED)).unwrap();
        let printed = format!("{config:?}");
        assert!(!printed.contains("secret"));
        assert!(printed.contains("<redacted>"));
    }
}
