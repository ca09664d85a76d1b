//! Layered configuration system
//!
//! Config is loaded with three layers of precedence (highest wins):
//! 1. Environment variables: `GRACIE_GEMINI_API_KEY`, `GRACIE_GEMINI_API_URL`,
//!    `GRACIE_CHECKOUT_URL`, `GRACIE_AUTH_TOKEN`
//! 2. Project-local: `.gracie/config.toml`
//! 3. Global: `~/.gracie/config.toml`

use gracie_core::{GracieError, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

pub const ENV_GEMINI_API_KEY: &str = "GRACIE_GEMINI_API_KEY";
pub const ENV_GEMINI_API_URL: &str = "GRACIE_GEMINI_API_URL";
pub const ENV_CHECKOUT_URL: &str = "GRACIE_CHECKOUT_URL";
pub const ENV_AUTH_TOKEN: &str = "GRACIE_AUTH_TOKEN";

/// Generative analysis endpoint settings
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GeminiConfig {
    #[serde(default)]
    pub api_key: Option<String>,
    #[serde(default)]
    pub api_url: Option<String>,
}

/// Checkout endpoint settings
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CheckoutConfig {
    #[serde(default)]
    pub url: Option<String>,
    /// Session token of the signed-in user, if any
    #[serde(default)]
    pub auth_token: Option<String>,
}

/// Top-level config file structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GracieConfigFile {
    #[serde(default)]
    pub gemini: GeminiConfig,
    #[serde(default)]
    pub checkout: CheckoutConfig,
}

/// Resolved configuration with environment variable overrides applied
#[derive(Debug, Clone, Default)]
pub struct GracieConfig {
    pub gemini: GeminiConfig,
    pub checkout: CheckoutConfig,
}

impl GracieConfig {
    /// Load config with layered precedence: global < project < env vars
    pub fn load() -> Result<Self> {
        let mut config = GracieConfigFile::default();

        if let Some(global_path) = Self::global_config_path() {
            if global_path.exists() {
                let global = Self::load_file(&global_path)?;
                Self::merge_into(&mut config, global);
            }
        }

        let local_path = PathBuf::from(".gracie/config.toml");
        if local_path.exists() {
            let local = Self::load_file(&local_path)?;
            Self::merge_into(&mut config, local);
        }

        Self::apply_env_overrides(&mut config);

        Ok(GracieConfig {
            gemini: config.gemini,
            checkout: config.checkout,
        })
    }

    /// Load config from a specific file path only (plus env overrides)
    pub fn load_from_file(path: &Path) -> Result<Self> {
        let mut config = Self::load_file(path)?;
        Self::apply_env_overrides(&mut config);
        Ok(GracieConfig {
            gemini: config.gemini,
            checkout: config.checkout,
        })
    }

    pub fn gemini_api_key(&self) -> Option<&str> {
        non_empty(self.gemini.api_key.as_deref())
    }

    pub fn gemini_api_url(&self) -> Option<&str> {
        non_empty(self.gemini.api_url.as_deref())
    }

    pub fn checkout_url(&self) -> Option<&str> {
        non_empty(self.checkout.url.as_deref())
    }

    pub fn auth_token(&self) -> Option<&str> {
        non_empty(self.checkout.auth_token.as_deref())
    }

    fn global_config_path() -> Option<PathBuf> {
        dirs::home_dir().map(|h| h.join(".gracie").join("config.toml"))
    }

    fn load_file(path: &Path) -> Result<GracieConfigFile> {
        let content = std::fs::read_to_string(path)?;
        toml::from_str(&content).map_err(|e| {
            GracieError::ConfigError(format!("Failed to parse config {}: {}", path.display(), e))
        })
    }

    fn merge_into(base: &mut GracieConfigFile, overlay: GracieConfigFile) {
        if overlay.gemini.api_key.is_some() {
            base.gemini.api_key = overlay.gemini.api_key;
        }
        if overlay.gemini.api_url.is_some() {
            base.gemini.api_url = overlay.gemini.api_url;
        }
        if overlay.checkout.url.is_some() {
            base.checkout.url = overlay.checkout.url;
        }
        if overlay.checkout.auth_token.is_some() {
            base.checkout.auth_token = overlay.checkout.auth_token;
        }
    }

    fn apply_env_overrides(config: &mut GracieConfigFile) {
        let slots: [(&str, &mut Option<String>); 4] = [
            (ENV_GEMINI_API_KEY, &mut config.gemini.api_key),
            (ENV_GEMINI_API_URL, &mut config.gemini.api_url),
            (ENV_CHECKOUT_URL, &mut config.checkout.url),
            (ENV_AUTH_TOKEN, &mut config.checkout.auth_token),
        ];
        for (var, slot) in slots {
            if let Ok(value) = std::env::var(var) {
                *slot = Some(value);
            }
        }
    }
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.trim().is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn temp_config(content: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!("gracie_config_test_{}", uuid::Uuid::new_v4()));
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("config.toml");
        let mut f = std::fs::File::create(&path).unwrap();
        f.write_all(content.as_bytes()).unwrap();
        path
    }

    #[test]
    fn test_load_config_from_file() {
        let config_str = r#"
[gemini]
api_url = "https://gemini.example.com/generate"

[checkout]
url = "https://example.com/functions/v1/stripe-checkout"
"#;
        let path = temp_config(config_str);
        let config = GracieConfig::load_from_file(&path).unwrap();

        if std::env::var(ENV_CHECKOUT_URL).is_err() {
            assert_eq!(
                config.checkout_url(),
                Some("https://example.com/functions/v1/stripe-checkout")
            );
        }
        if std::env::var(ENV_GEMINI_API_URL).is_err() {
            assert_eq!(config.gemini_api_url(), Some("https://gemini.example.com/generate"));
        }

        std::fs::remove_file(&path).ok();
        std::fs::remove_dir(path.parent().unwrap()).ok();
    }

    #[test]
    fn test_env_var_override() {
        let path = temp_config("[checkout]\nauth_token = \"file-token\"\n");

        std::env::set_var(ENV_AUTH_TOKEN, "env-token");
        let config = GracieConfig::load_from_file(&path).unwrap();
        assert_eq!(config.auth_token(), Some("env-token"));

        std::env::remove_var(ENV_AUTH_TOKEN);
        std::fs::remove_file(&path).ok();
        std::fs::remove_dir(path.parent().unwrap()).ok();
    }

    #[test]
    fn test_blank_values_read_as_missing() {
        let config = GracieConfig {
            gemini: GeminiConfig {
                api_key: Some("  ".to_string()),
                api_url: None,
            },
            checkout: CheckoutConfig::default(),
        };
        assert_eq!(config.gemini_api_key(), None);
        assert_eq!(config.checkout_url(), None);
    }

    #[test]
    fn test_malformed_file_is_config_error() {
        let path = temp_config("[gemini\napi_key = 1");
        let err = GracieConfig::load_from_file(&path).unwrap_err();
        assert_eq!(err.kind(), "config");
        std::fs::remove_file(&path).ok();
        std::fs::remove_dir(path.parent().unwrap()).ok();
    }

    #[test]
    fn test_merge_prefers_overlay() {
        let mut base = GracieConfigFile::default();
        base.gemini.api_key = Some("global".to_string());
        base.checkout.url = Some("https://global".to_string());
        let mut overlay = GracieConfigFile::default();
        overlay.gemini.api_key = Some("local".to_string());
        GracieConfig::merge_into(&mut base, overlay);
        assert_eq!(base.gemini.api_key.as_deref(), Some("local"));
        assert_eq!(base.checkout.url.as_deref(), Some("https://global"));
    }
}
