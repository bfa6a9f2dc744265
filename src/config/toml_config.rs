use crate::config::{ClientSettings, DEFAULT_CONCURRENT_REQUESTS};
use crate::utils::error::{CdbError, Result};
use crate::utils::validation::Validate;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::Path;
use std::sync::LazyLock;

static ENV_VAR_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\$\{([^}]+)\}").expect("environment placeholder pattern is valid")
});

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TomlConfig {
    pub api: ApiConfig,
    pub logging: Option<LoggingConfig>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    pub base_url: String,
    pub timeout_seconds: Option<u64>,
    pub concurrent_requests: Option<usize>,
    pub headers: Option<HashMap<String, String>>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    pub verbose: Option<bool>,
    /// "text" 或 "json"
    pub format: Option<String>,
}

impl TomlConfig {
    /// 從 TOML 檔案載入配置
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(CdbError::IoError)?;
        Self::from_toml_str(&content)
    }

    /// 從 TOML 字串解析配置
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content);

        toml::from_str(&processed_content).map_err(|e| CdbError::ConfigError {
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// 替換環境變數 (例如 ${API_TOKEN})；未設定的變數保持原樣
    fn substitute_env_vars(content: &str) -> String {
        ENV_VAR_PATTERN
            .replace_all(content, |caps: &regex::Captures| {
                let var_name = &caps[1];
                std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
            })
            .into_owned()
    }

    pub fn settings(&self) -> ClientSettings {
        ClientSettings {
            base_url: self.api.base_url.clone(),
            timeout_seconds: self.api.timeout_seconds,
            headers: self.api.headers.clone(),
            concurrent_requests: self
                .api
                .concurrent_requests
                .unwrap_or(DEFAULT_CONCURRENT_REQUESTS),
        }
    }

    pub fn verbose(&self) -> bool {
        self.logging
            .as_ref()
            .and_then(|l| l.verbose)
            .unwrap_or(false)
    }

    pub fn log_format(&self) -> Option<&str> {
        self.logging.as_ref().and_then(|l| l.format.as_deref())
    }
}

impl Validate for TomlConfig {
    fn validate(&self) -> Result<()> {
        self.settings().validate()?;

        if let Some(format) = self.log_format() {
            if !matches!(format, "text" | "json") {
                return Err(CdbError::InvalidConfigValueError {
                    field: "logging.format".to_string(),
                    value: format.to_string(),
                    reason: "Supported formats: text, json".to_string(),
                });
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::ConfigProvider;
    use std::io::Write;
    use std::time::Duration;
    use tempfile::NamedTempFile;

    #[test]
    fn test_parse_basic_toml_config() {
        let toml_content = r#"
[api]
base_url = "http://localhost:8080/api/v1"
timeout_seconds = 10
concurrent_requests = 4

[api.headers]
Authorization = "Bearer abc"

[logging]
verbose = true
format = "json"
"#;

        let config = TomlConfig::from_toml_str(toml_content).unwrap();
        let settings = config.settings();

        assert_eq!(settings.base_url(), "http://localhost:8080/api/v1");
        assert_eq!(settings.timeout(), Some(Duration::from_secs(10)));
        assert_eq!(settings.concurrent_requests(), 4);
        assert_eq!(
            settings.headers().unwrap().get("Authorization").unwrap(),
            "Bearer abc"
        );
        assert!(config.verbose());
        assert_eq!(config.log_format(), Some("json"));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_minimal_config_uses_defaults() {
        let config = TomlConfig::from_toml_str(
            r#"
[api]
base_url = "http://localhost:8080"
"#,
        )
        .unwrap();

        assert_eq!(config.settings().concurrent_requests, 1);
        assert!(config.settings().timeout_seconds.is_none());
        assert!(!config.verbose());
    }

    #[test]
    fn test_env_var_substitution() {
        std::env::set_var("CDB_TEST_API_TOKEN", "secret-token");

        let config = TomlConfig::from_toml_str(
            r#"
[api]
base_url = "http://localhost:8080"

[api.headers]
Authorization = "Bearer ${CDB_TEST_API_TOKEN}"
X-Unset = "${CDB_TEST_UNSET_VARIABLE}"
"#,
        )
        .unwrap();

        let headers = config.api.headers.unwrap();
        assert_eq!(headers.get("Authorization").unwrap(), "Bearer secret-token");
        assert_eq!(
            headers.get("X-Unset").unwrap(),
            "${CDB_TEST_UNSET_VARIABLE}"
        );

        std::env::remove_var("CDB_TEST_API_TOKEN");
    }

    #[test]
    fn test_config_validation() {
        let config = TomlConfig::from_toml_str(
            r#"
[api]
base_url = "invalid-url"
"#,
        )
        .unwrap();
        assert!(config.validate().is_err());

        let config = TomlConfig::from_toml_str(
            r#"
[api]
base_url = "http://localhost:8080"

[logging]
format = "xml"
"#,
        )
        .unwrap();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_missing_api_section_fails() {
        let result = TomlConfig::from_toml_str("[logging]\nverbose = true\n");
        assert!(matches!(result, Err(CdbError::ConfigError { .. })));
    }

    #[test]
    fn test_config_from_file() {
        let mut temp_file = NamedTempFile::new().unwrap();
        temp_file
            .write_all(b"[api]\nbase_url = \"https://cdb.example.com/api/v1\"\n")
            .unwrap();

        let config = TomlConfig::from_file(temp_file.path()).unwrap();
        assert_eq!(config.api.base_url, "https://cdb.example.com/api/v1");
    }

    #[test]
    fn test_config_from_missing_file() {
        let result = TomlConfig::from_file("/nonexistent/cdb.toml");
        assert!(matches!(result, Err(CdbError::IoError(_))));
    }
}
