//! Build-time configuration.
//!
//! Values are baked in with `option_env!` when the bundle is built, e.g.
//! `IEL_API_BASE_URL=https://catalog.example trunk build --release`.
//! Anything missing or unparseable falls back to its default; the problems are
//! returned next to the config so they can be logged once the logger is up.

use std::str::FromStr;

use log::LevelFilter;
use thiserror::Error;

use common::form::RemovalPolicy;
use common::search::PageSize;

pub const DEFAULT_API_BASE_URL: &str = "http://localhost:8000";
pub const DEFAULT_SEARCH_DEBOUNCE_MS: u32 = 500;
pub const DEFAULT_TAG_SUGGEST_DEBOUNCE_MS: u32 = 300;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("{key}: invalid value '{value}' ({reason}), using the default")]
    Invalid {
        key: &'static str,
        value: String,
        reason: String,
    },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    /// Backend origin without a trailing slash.
    pub api_base_url: String,
    pub log_level: LevelFilter,
    pub search_debounce_ms: u32,
    pub tag_suggest_debounce_ms: u32,
    pub page_size: PageSize,
    pub attribute_removal: RemovalPolicy,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            api_base_url: DEFAULT_API_BASE_URL.to_string(),
            log_level: LevelFilter::Info,
            search_debounce_ms: DEFAULT_SEARCH_DEBOUNCE_MS,
            tag_suggest_debounce_ms: DEFAULT_TAG_SUGGEST_DEBOUNCE_MS,
            page_size: PageSize::default(),
            attribute_removal: RemovalPolicy::default(),
        }
    }
}

impl AppConfig {
    pub fn from_build_env() -> (Self, Vec<ConfigError>) {
        Self::from_lookup(|key| {
            let value = match key {
                "IEL_API_BASE_URL" => option_env!("IEL_API_BASE_URL"),
                "IEL_LOG_LEVEL" => option_env!("IEL_LOG_LEVEL"),
                "IEL_SEARCH_DEBOUNCE_MS" => option_env!("IEL_SEARCH_DEBOUNCE_MS"),
                "IEL_TAG_SUGGEST_DEBOUNCE_MS" => option_env!("IEL_TAG_SUGGEST_DEBOUNCE_MS"),
                "IEL_PAGE_SIZE" => option_env!("IEL_PAGE_SIZE"),
                "IEL_ATTRIBUTE_REMOVAL" => option_env!("IEL_ATTRIBUTE_REMOVAL"),
                _ => None,
            };
            value.map(str::to_string)
        })
    }

    pub fn from_lookup<F>(lookup: F) -> (Self, Vec<ConfigError>)
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = AppConfig::default();
        let mut errors = Vec::new();

        if let Some(raw) = lookup("IEL_API_BASE_URL") {
            let trimmed = raw.trim().trim_end_matches('/');
            if trimmed.starts_with("http://") || trimmed.starts_with("https://") {
                config.api_base_url = trimmed.to_string();
            } else {
                errors.push(invalid("IEL_API_BASE_URL", &raw, "expected an http(s) origin"));
            }
        }
        parse_into(&lookup, "IEL_LOG_LEVEL", &mut config.log_level, &mut errors);
        parse_into(&lookup, "IEL_SEARCH_DEBOUNCE_MS", &mut config.search_debounce_ms, &mut errors);
        parse_into(
            &lookup,
            "IEL_TAG_SUGGEST_DEBOUNCE_MS",
            &mut config.tag_suggest_debounce_ms,
            &mut errors,
        );
        parse_into(&lookup, "IEL_PAGE_SIZE", &mut config.page_size, &mut errors);
        parse_into(&lookup, "IEL_ATTRIBUTE_REMOVAL", &mut config.attribute_removal, &mut errors);

        (config, errors)
    }
}

fn parse_into<F, T>(lookup: &F, key: &'static str, slot: &mut T, errors: &mut Vec<ConfigError>)
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
    T::Err: ToString,
{
    let Some(raw) = lookup(key) else {
        return;
    };
    match raw.trim().parse::<T>() {
        Ok(value) => *slot = value,
        Err(err) => errors.push(invalid(key, &raw, &err.to_string())),
    }
}

fn invalid(key: &'static str, value: &str, reason: &str) -> ConfigError {
    ConfigError::Invalid {
        key,
        value: value.to_string(),
        reason: reason.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn defaults_when_nothing_is_set() {
        let (config, errors) = AppConfig::from_lookup(|_| None);
        assert_eq!(config, AppConfig::default());
        assert_eq!(config.api_base_url, "http://localhost:8000");
        assert_eq!(config.page_size, PageSize::Ten);
        assert_eq!(config.attribute_removal, RemovalPolicy::HardDelete);
        assert!(errors.is_empty());
    }

    #[test]
    fn reads_every_key() {
        let (config, errors) = AppConfig::from_lookup(lookup_from(&[
            ("IEL_API_BASE_URL", "https://catalog.example/"),
            ("IEL_LOG_LEVEL", "debug"),
            ("IEL_SEARCH_DEBOUNCE_MS", "250"),
            ("IEL_TAG_SUGGEST_DEBOUNCE_MS", "100"),
            ("IEL_PAGE_SIZE", "20"),
            ("IEL_ATTRIBUTE_REMOVAL", "soft"),
        ]));
        assert!(errors.is_empty(), "{:?}", errors);
        assert_eq!(config.api_base_url, "https://catalog.example");
        assert_eq!(config.log_level, LevelFilter::Debug);
        assert_eq!(config.search_debounce_ms, 250);
        assert_eq!(config.tag_suggest_debounce_ms, 100);
        assert_eq!(config.page_size, PageSize::Twenty);
        assert_eq!(config.attribute_removal, RemovalPolicy::SoftDelete);
    }

    #[test]
    fn bad_values_fall_back_and_are_reported() {
        let (config, errors) = AppConfig::from_lookup(lookup_from(&[
            ("IEL_API_BASE_URL", "localhost"),
            ("IEL_PAGE_SIZE", "7"),
            ("IEL_SEARCH_DEBOUNCE_MS", "soon"),
        ]));
        assert_eq!(config, AppConfig::default());
        assert_eq!(errors.len(), 3);
        let keys: Vec<_> = errors
            .iter()
            .map(|ConfigError::Invalid { key, .. }| *key)
            .collect();
        assert_eq!(keys, vec!["IEL_API_BASE_URL", "IEL_SEARCH_DEBOUNCE_MS", "IEL_PAGE_SIZE"]);
    }
}
