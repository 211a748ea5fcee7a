//! Application configuration from the environment.
//!
//! `main` loads a `.env` file first (if present), so every setting can live
//! there or in the real environment.

use std::env;

use log::LevelFilter;
use storefront_api::query::MAX_PAGE_SIZE;
use storefront_widgets::table::DEFAULT_PAGE_SIZE;
use url::Url;

use crate::error::AppConfigError;

const DEFAULT_BACKEND_URL: &str = "http://localhost:3001/";
const DEFAULT_LOCALES: [&str; 2] = ["ru", "en"];

#[derive(Debug, Clone, PartialEq)]
pub struct AppConfig {
    /// `BACKEND_URL`: base for every API path.
    pub backend_url: Url,
    /// `LOCALES`: ordered locale preference, as a JSON array.
    pub locales: Vec<String>,
    /// `PAGE_SIZE`: rows per table page.
    pub page_size: usize,
    /// `LOG_LEVEL`
    pub log_level: LevelFilter,
}

impl AppConfig {
    pub fn from_env() -> Result<Self, AppConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build from any key lookup; unset or blank keys take their defaults.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, AppConfigError> {
        let get = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());

        let backend_url = get("BACKEND_URL").unwrap_or_else(|| DEFAULT_BACKEND_URL.to_string());
        let mut config = Self {
            backend_url: parse_base_url(backend_url.trim())?,
            locales: DEFAULT_LOCALES.iter().map(|s| s.to_string()).collect(),
            page_size: DEFAULT_PAGE_SIZE,
            log_level: LevelFilter::Debug,
        };

        if let Some(raw) = get("LOCALES") {
            config.locales = serde_json::from_str(&raw).map_err(AppConfigError::InvalidLocales)?;
        }

        if let Some(raw) = get("PAGE_SIZE") {
            config.page_size = raw
                .trim()
                .parse::<usize>()
                .ok()
                .filter(|size| (1..=MAX_PAGE_SIZE).contains(size))
                .ok_or(AppConfigError::InvalidPageSize(raw))?;
        }

        if let Some(raw) = get("LOG_LEVEL") {
            config.log_level = raw
                .trim()
                .parse::<LevelFilter>()
                .map_err(|_| AppConfigError::InvalidLogLevel(raw))?;
        }

        Ok(config)
    }
}

/// Parse a base URL, making sure relative API paths join under it.
fn parse_base_url(raw: &str) -> Result<Url, AppConfigError> {
    let mut url = Url::parse(raw).map_err(|source| AppConfigError::InvalidUrl {
        var: "BACKEND_URL",
        source,
    })?;
    if !url.path().ends_with('/') {
        let path = format!("{}/", url.path());
        url.set_path(&path);
    }
    Ok(url)
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_defaults() {
        let config = AppConfig::from_lookup(lookup(&[])).unwrap();
        assert_eq!(config.backend_url.as_str(), "http://localhost:3001/");
        assert_eq!(config.locales, vec!["ru", "en"]);
        assert_eq!(config.page_size, 30);
        assert_eq!(config.log_level, LevelFilter::Debug);
    }

    #[test]
    fn test_overrides() {
        let config = AppConfig::from_lookup(lookup(&[
            ("BACKEND_URL", "https://shop.example.com/admin"),
            ("LOCALES", r#"["en-US"]"#),
            ("PAGE_SIZE", "20"),
            ("LOG_LEVEL", "warn"),
        ]))
        .unwrap();

        assert_eq!(config.backend_url.as_str(), "https://shop.example.com/admin/");
        assert_eq!(
            config.backend_url.join("api/rest/products").unwrap().as_str(),
            "https://shop.example.com/admin/api/rest/products"
        );
        assert_eq!(config.locales, vec!["en-US"]);
        assert_eq!(config.page_size, 20);
        assert_eq!(config.log_level, LevelFilter::Warn);
    }

    #[test]
    fn test_blank_values_use_defaults() {
        let config = AppConfig::from_lookup(lookup(&[("PAGE_SIZE", "  ")])).unwrap();
        assert_eq!(config.page_size, 30);
    }

    #[test]
    fn test_invalid_values() {
        assert!(matches!(
            AppConfig::from_lookup(lookup(&[("BACKEND_URL", "not a url")])),
            Err(AppConfigError::InvalidUrl { .. })
        ));
        assert!(matches!(
            AppConfig::from_lookup(lookup(&[("LOCALES", "ru,en")])),
            Err(AppConfigError::InvalidLocales(_))
        ));
        assert!(matches!(
            AppConfig::from_lookup(lookup(&[("PAGE_SIZE", "0")])),
            Err(AppConfigError::InvalidPageSize(_))
        ));
        assert!(matches!(
            AppConfig::from_lookup(lookup(&[("PAGE_SIZE", "18446744073709551615")])),
            Err(AppConfigError::InvalidPageSize(_))
        ));
        assert!(matches!(
            AppConfig::from_lookup(lookup(&[("LOG_LEVEL", "loud")])),
            Err(AppConfigError::InvalidLogLevel(_))
        ));
    }
}
