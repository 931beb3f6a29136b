use crate::domain::model::FormInput;
use crate::domain::ports::ConfigProvider;
use crate::utils::error::{AdvisorError, Result};
use crate::utils::validation::{self, Validate};
use regex::{Captures, Regex};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::env;
use std::path::Path;
use std::time::Duration;

pub const DEFAULT_BASE_URL: &str = "http://localhost:8080";
pub const MAX_TIMEOUT_SECONDS: u64 = 300;

pub const BASE_URL_ENV: &str = "ADVISOR_BASE_URL";
pub const TIMEOUT_ENV: &str = "ADVISOR_TIMEOUT_SECONDS";

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AdvisorConfig {
    #[serde(default)]
    pub service: ServiceConfig,
    pub profile: Option<ProfileConfig>,
}

/// 未設定的欄位由下一層（環境變數、預設值）補上
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ServiceConfig {
    pub base_url: Option<String>,
    pub timeout_seconds: Option<u64>,
    #[serde(default)]
    pub headers: HashMap<String, String>,
}

/// 預先填好的表單答案
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProfileConfig {
    pub age: Option<f64>,
    pub income: Option<f64>,
    pub dependents: Option<f64>,
    pub risk_tolerance: Option<String>,
}

impl ProfileConfig {
    pub fn to_form_input(&self) -> FormInput {
        FormInput {
            age: self.age.map(|v| v.to_string()),
            income: self.income.map(|v| v.to_string()),
            dependents: self.dependents.map(|v| v.to_string()),
            risk_tolerance: self.risk_tolerance.clone(),
        }
    }
}

impl AdvisorConfig {
    /// 從 TOML 檔案載入配置
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(AdvisorError::IoError)?;
        Self::from_toml_str(&content)
    }

    /// 從 TOML 字串解析配置
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let expanded = expand_env_placeholders(content)?;

        toml::from_str(&expanded).map_err(|e| AdvisorError::ConfigValidationError {
            field: "toml_parsing".to_string(),
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// 從環境變數建立配置 (ADVISOR_BASE_URL, ADVISOR_TIMEOUT_SECONDS)
    pub fn from_env() -> Result<Self> {
        let base_url = env::var(BASE_URL_ENV).ok().filter(|v| !v.trim().is_empty());

        let timeout_seconds = match env::var(TIMEOUT_ENV) {
            Ok(raw) => match raw.trim().parse::<u64>() {
                Ok(seconds) => Some(seconds),
                Err(_) => {
                    return Err(AdvisorError::InvalidConfigValueError {
                        field: TIMEOUT_ENV.to_string(),
                        value: raw,
                        reason: "Expected a whole number of seconds".to_string(),
                    })
                }
            },
            Err(_) => None,
        };

        Ok(Self {
            service: ServiceConfig {
                base_url,
                timeout_seconds,
                headers: HashMap::new(),
            },
            profile: None,
        })
    }

    /// 以 `self` 為主，缺少的服務設定從 `fallback` 補上
    pub fn layered_over(mut self, fallback: AdvisorConfig) -> Self {
        let service = &mut self.service;
        service.base_url = service.base_url.take().or(fallback.service.base_url);
        service.timeout_seconds = service.timeout_seconds.or(fallback.service.timeout_seconds);
        for (name, value) in fallback.service.headers {
            service.headers.entry(name).or_insert(value);
        }
        if self.profile.is_none() {
            self.profile = fallback.profile;
        }
        self
    }

    pub fn form_input(&self) -> FormInput {
        self.profile
            .as_ref()
            .map(ProfileConfig::to_form_input)
            .unwrap_or_default()
    }
}

/// 展開 `${VAR}` 與 `${VAR:-fallback}`；沒有設定也沒有 fallback 的保持原樣
fn expand_env_placeholders(content: &str) -> Result<String> {
    let pattern = Regex::new(r"\$\{([A-Za-z_][A-Za-z0-9_]*)(?::-([^}]*))?\}").map_err(|e| {
        AdvisorError::ConfigError {
            message: format!("Invalid placeholder pattern: {}", e),
        }
    })?;

    let expanded = pattern.replace_all(content, |caps: &Captures| {
        match (env::var(&caps[1]), caps.get(2)) {
            (Ok(value), _) => value,
            (Err(_), Some(fallback)) => fallback.as_str().to_string(),
            (Err(_), None) => caps[0].to_string(),
        }
    });

    Ok(expanded.into_owned())
}

impl ConfigProvider for AdvisorConfig {
    fn base_url(&self) -> &str {
        self.service.base_url.as_deref().unwrap_or(DEFAULT_BASE_URL)
    }

    fn timeout(&self) -> Option<Duration> {
        self.service.timeout_seconds.map(Duration::from_secs)
    }

    fn headers(&self) -> &HashMap<String, String> {
        &self.service.headers
    }
}

impl Validate for AdvisorConfig {
    fn validate(&self) -> Result<()> {
        validation::validate_url("service.base_url", self.base_url())?;

        if let Some(timeout) = self.service.timeout_seconds {
            validation::validate_range("service.timeout_seconds", timeout, 1, MAX_TIMEOUT_SECONDS)?;
        }

        for (name, value) in &self.service.headers {
            validation::validate_header("service.headers", name, value)?;
        }

        tracing::debug!("✅ Configuration validation passed");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_parse_full_toml_config() {
        let toml_content = r#"
[service]
base_url = "https://advisor.example.com/api"
timeout_seconds = 30

[service.headers]
X-Client = "cli"

[profile]
age = 30
income = 75000
dependents = 2
risk_tolerance = "medium"
"#;

        let config = AdvisorConfig::from_toml_str(toml_content).unwrap();

        assert_eq!(config.base_url(), "https://advisor.example.com/api");
        assert_eq!(config.timeout(), Some(Duration::from_secs(30)));
        assert_eq!(config.headers().get("X-Client").map(String::as_str), Some("cli"));
        assert_eq!(
            config.form_input(),
            FormInput::new("30", "75000", "2", "medium")
        );
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_minimal_config_has_no_profile() {
        let config =
            AdvisorConfig::from_toml_str("[service]\nbase_url = \"http://localhost:9000\"\n").unwrap();

        assert!(config.headers().is_empty());
        assert_eq!(config.timeout(), None);
        assert_eq!(config.form_input(), FormInput::default());
    }

    #[test]
    fn test_env_var_substitution() {
        std::env::set_var("LIFE_ADVISOR_TEST_URL", "https://test.advisor.com");

        let toml_content = r#"
[service]
base_url = "${LIFE_ADVISOR_TEST_URL}"

[service.headers]
Authorization = "Bearer ${LIFE_ADVISOR_UNSET_TOKEN}"
X-Client = "${LIFE_ADVISOR_UNSET_CLIENT:-cli}"
"#;

        let config = AdvisorConfig::from_toml_str(toml_content).unwrap();
        assert_eq!(config.base_url(), "https://test.advisor.com");
        // 未設定且沒有 fallback 的佔位符保持原樣
        assert_eq!(
            config.headers().get("Authorization").map(String::as_str),
            Some("Bearer ${LIFE_ADVISOR_UNSET_TOKEN}")
        );
        assert_eq!(config.headers().get("X-Client").map(String::as_str), Some("cli"));

        std::env::remove_var("LIFE_ADVISOR_TEST_URL");
    }

    #[test]
    fn test_profile_only_file_uses_defaults() {
        let config = AdvisorConfig::from_toml_str(
            "[profile]\nage = 41\nincome = 64000\ndependents = 1\nrisk_tolerance = \"low\"\n",
        )
        .unwrap();

        assert!(config.service.base_url.is_none());
        assert_eq!(config.base_url(), DEFAULT_BASE_URL);
        assert_eq!(config.form_input(), FormInput::new("41", "64000", "1", "low"));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_layered_over_fills_only_missing_fields() {
        let file = AdvisorConfig::from_toml_str(
            "[service]\nbase_url = \"https://file.example.com\"\n[service.headers]\nX-Client = \"file\"\n",
        )
        .unwrap();

        let mut env_layer = AdvisorConfig::default();
        env_layer.service.base_url = Some("https://env.example.com".to_string());
        env_layer.service.timeout_seconds = Some(7);
        env_layer
            .service
            .headers
            .insert("X-Client".to_string(), "env".to_string());

        let merged = file.layered_over(env_layer);

        assert_eq!(merged.base_url(), "https://file.example.com");
        assert_eq!(merged.timeout(), Some(Duration::from_secs(7)));
        assert_eq!(merged.headers().get("X-Client").map(String::as_str), Some("file"));
    }

    #[test]
    fn test_config_validation() {
        let mut config = AdvisorConfig::default();
        assert!(config.validate().is_ok());

        config.service.base_url = Some("invalid-url".to_string());
        assert!(config.validate().is_err());

        config.service.base_url = None;
        config.service.timeout_seconds = Some(0);
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_malformed_header_rejected_by_validation() {
        let mut config = AdvisorConfig::default();
        config
            .service
            .headers
            .insert("X Client".to_string(), "cli".to_string());

        let err = config.validate().unwrap_err();
        assert!(matches!(
            err,
            AdvisorError::InvalidConfigValueError { ref field, .. } if field == "service.headers"
        ));
        assert_eq!(err.category(), crate::utils::error::ErrorCategory::Configuration);

        config.service.headers.clear();
        config
            .service
            .headers
            .insert("X-Client".to_string(), "line\nbreak".to_string());
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_invalid_toml_is_config_error() {
        let err = AdvisorConfig::from_toml_str("[service\nbase_url = 1").unwrap_err();
        assert!(matches!(err, AdvisorError::ConfigValidationError { .. }));
    }

    #[test]
    fn test_config_from_file() {
        let mut temp_file = NamedTempFile::new().unwrap();
        temp_file
            .write_all(b"[service]\nbase_url = \"https://file.example.com\"\n")
            .unwrap();

        let config = AdvisorConfig::from_file(temp_file.path()).unwrap();
        assert_eq!(config.base_url(), "https://file.example.com");
    }
}
