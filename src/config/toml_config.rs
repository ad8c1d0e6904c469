use crate::core::ConfigProvider;
use crate::domain::model::MissingProductsPolicy;
use crate::utils::error::{NormalizerError, Result};
use crate::utils::preview::DEFAULT_PREVIEW_ROWS;
use crate::utils::validation::{validate_io_settings, Validate};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::path::Path;

static ENV_PLACEHOLDER: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\$\{([^}]+)\}").expect("valid placeholder pattern"));

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TomlConfig {
    pub pipeline: Option<PipelineConfig>,
    pub source: SourceConfig,
    #[serde(default)]
    pub normalize: NormalizeConfig,
    pub load: LoadConfig,
    pub output: Option<OutputConfig>,
    pub monitoring: Option<MonitoringConfig>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PipelineConfig {
    pub name: String,
    pub description: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SourceConfig {
    pub path: String,
    pub sheet: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct NormalizeConfig {
    #[serde(default)]
    pub missing_products: MissingProductsPolicy,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoadConfig {
    pub output_path: String,
    pub output_file: Option<String>,
    pub bom: Option<bool>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputConfig {
    pub preview_rows: Option<usize>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MonitoringConfig {
    pub enabled: bool,
    pub json_logs: Option<bool>,
}

impl TomlConfig {
    /// 從 TOML 檔案載入配置
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path)?;
        Self::from_toml_str(&content)
    }

    /// 從 TOML 字串解析配置
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content);

        toml::from_str(&processed_content).map_err(|e| NormalizerError::ConfigValidationError {
            field: "toml_parsing".to_string(),
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// 替換環境變數 (例如 ${ORDERS_DIR})，未設定的保持原樣
    fn substitute_env_vars(content: &str) -> String {
        ENV_PLACEHOLDER
            .replace_all(content, |caps: &regex::Captures| {
                let var_name = &caps[1];
                std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
            })
            .into_owned()
    }

    pub fn pipeline_name(&self) -> &str {
        self.pipeline
            .as_ref()
            .map(|p| p.name.as_str())
            .unwrap_or("order-normalizer")
    }

    pub fn preview_rows(&self) -> usize {
        self.output
            .as_ref()
            .and_then(|o| o.preview_rows)
            .unwrap_or(DEFAULT_PREVIEW_ROWS)
    }

    pub fn monitoring_enabled(&self) -> bool {
        self.monitoring.as_ref().is_some_and(|m| m.enabled)
    }

    pub fn json_logs(&self) -> bool {
        self.monitoring
            .as_ref()
            .and_then(|m| m.json_logs)
            .unwrap_or(false)
    }
}

impl ConfigProvider for TomlConfig {
    fn input_file(&self) -> &str {
        &self.source.path
    }

    fn sheet_name(&self) -> Option<&str> {
        self.source.sheet.as_deref()
    }

    fn output_path(&self) -> &str {
        &self.load.output_path
    }

    fn output_file(&self) -> &str {
        self.load.output_file.as_deref().unwrap_or("clean_products.csv")
    }

    fn missing_products(&self) -> MissingProductsPolicy {
        self.normalize.missing_products
    }

    fn write_bom(&self) -> bool {
        self.load.bom.unwrap_or(true)
    }
}

impl Validate for TomlConfig {
    fn validate(&self) -> Result<()> {
        validate_io_settings(
            self.input_file(),
            self.sheet_name(),
            self.output_path(),
            self.output_file(),
            self.preview_rows(),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_parse_basic_toml_config() {
        let toml_content = r#"
[pipeline]
name = "mayura-orders"

[source]
path = "exports/products.xlsx"
sheet = "Pedidos"

[normalize]
missing_products = "fail"

[load]
output_path = "./clean"
bom = false

[output]
preview_rows = 5
"#;

        let config = TomlConfig::from_toml_str(toml_content).unwrap();

        assert_eq!(config.pipeline_name(), "mayura-orders");
        assert_eq!(config.input_file(), "exports/products.xlsx");
        assert_eq!(config.sheet_name(), Some("Pedidos"));
        assert_eq!(config.missing_products(), MissingProductsPolicy::Fail);
        assert_eq!(config.output_file(), "clean_products.csv");
        assert!(!config.write_bom());
        assert_eq!(config.preview_rows(), 5);
        assert!(!config.monitoring_enabled());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_minimal_config_uses_defaults() {
        let toml_content = r#"
[source]
path = "products.xlsx"

[load]
output_path = "."
"#;

        let config = TomlConfig::from_toml_str(toml_content).unwrap();

        assert_eq!(config.pipeline_name(), "order-normalizer");
        assert_eq!(config.missing_products(), MissingProductsPolicy::Skip);
        assert!(config.write_bom());
        assert_eq!(config.preview_rows(), 10);
    }

    #[test]
    fn test_env_var_substitution() {
        std::env::set_var("ORDER_NORMALIZER_TEST_DIR", "/srv/orders");

        let toml_content = r#"
[source]
path = "${ORDER_NORMALIZER_TEST_DIR}/products.xlsx"

[load]
output_path = "${ORDER_NORMALIZER_UNSET_VAR}"
"#;

        let config = TomlConfig::from_toml_str(toml_content).unwrap();
        assert_eq!(config.input_file(), "/srv/orders/products.xlsx");
        assert_eq!(config.output_path(), "${ORDER_NORMALIZER_UNSET_VAR}");

        std::env::remove_var("ORDER_NORMALIZER_TEST_DIR");
    }

    #[test]
    fn test_unknown_policy_is_parse_error() {
        let toml_content = r#"
[source]
path = "products.xlsx"

[normalize]
missing_products = "guess"

[load]
output_path = "."
"#;

        let err = TomlConfig::from_toml_str(toml_content).unwrap_err();
        assert!(matches!(err, NormalizerError::ConfigValidationError { .. }));
    }

    #[test]
    fn test_config_validation() {
        let toml_content = r#"
[source]
path = "products.pdf"

[load]
output_path = "./output"
"#;

        let config = TomlConfig::from_toml_str(toml_content).unwrap();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_config_from_file() {
        let mut temp_file = NamedTempFile::new().unwrap();

        let toml_content = r#"
[pipeline]
name = "file-test"

[source]
path = "products.xlsx"

[load]
output_path = "./output"

[monitoring]
enabled = true
"#;

        temp_file.write_all(toml_content.as_bytes()).unwrap();

        let config = TomlConfig::from_file(temp_file.path()).unwrap();
        assert_eq!(config.pipeline_name(), "file-test");
        assert!(config.monitoring_enabled());
    }
}
