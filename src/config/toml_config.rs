use crate::config::{ServerSettings, DEFAULT_DATASET_PATH, DEFAULT_HOST, DEFAULT_PORT};
use crate::core::aggregator::DEFAULT_YEAR_THRESHOLD;
use crate::core::ConfigProvider;
use crate::domain::model::ChartStyle;
use crate::utils::error::{ChartError, Result};
use crate::utils::validation::{self, Validate};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::sync::LazyLock;

static ENV_VAR_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\$\{([^}]+)\}").expect("valid env var pattern"));

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TomlConfig {
    pub server: Option<ServerConfig>,
    pub dataset: Option<DatasetConfig>,
    pub chart: Option<ChartConfig>,
    pub monitoring: Option<MonitoringConfig>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    pub host: Option<String>,
    pub port: Option<u16>,
    pub template_path: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatasetConfig {
    pub path: Option<String>,
    pub year_threshold: Option<i32>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChartConfig {
    pub title: Option<String>,
    pub title_font_family: Option<String>,
    pub title_font_size: Option<u32>,
    pub title_color: Option<String>,
    pub bar_color: Option<String>,
    pub bar_line_color: Option<String>,
    pub bar_line_width: Option<f64>,
    pub opacity: Option<f64>,
    pub axis_headroom: Option<u64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MonitoringConfig {
    #[serde(default)]
    pub enabled: bool,
    pub log_format: Option<String>,
}

impl TomlConfig {
    /// 從 TOML 檔案載入配置
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(ChartError::IoError)?;
        Self::from_toml_str(&content)
    }

    /// 從 TOML 字串解析配置
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content);

        toml::from_str(&processed_content).map_err(|e| ChartError::ConfigValidationError {
            field: "toml_parsing".to_string(),
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// 替換環境變數 (例如 ${DATASET_DIR})，未設定的變數保持原樣
    fn substitute_env_vars(content: &str) -> String {
        ENV_VAR_PATTERN
            .replace_all(content, |caps: &regex::Captures| {
                let var_name = &caps[1];
                std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
            })
            .into_owned()
    }

    pub fn validate_config(&self) -> Result<()> {
        let settings = self.server_settings();
        validation::validate_host("server.host", &settings.host)?;
        validation::validate_positive_number("server.port", u64::from(settings.port), 1)?;
        if let Some(template) = &settings.template_path {
            validation::validate_path("server.template_path", template)?;
            validation::validate_file_extension(
                "server.template_path",
                template,
                &["html", "hbs"],
            )?;
        }

        let dataset_path = ConfigProvider::dataset_path(self);
        validation::validate_path("dataset.path", dataset_path)?;
        validation::validate_file_extension("dataset.path", dataset_path, &["csv"])?;

        let style = self.chart_style();
        validation::validate_non_empty_string("chart.title", &style.title)?;
        validation::validate_range("chart.opacity", style.opacity, 0.0, 1.0)?;
        validation::validate_range("chart.bar_line_width", style.bar_line_width, 0.0, 20.0)?;
        validation::validate_positive_number(
            "chart.title_font_size",
            u64::from(style.title_font_size),
            1,
        )?;

        if let Some(format) = self.log_format() {
            let valid_formats = ["compact", "json"];
            if !valid_formats.contains(&format) {
                return Err(ChartError::InvalidConfigValueError {
                    field: "monitoring.log_format".to_string(),
                    value: format.to_string(),
                    reason: format!(
                        "Unsupported format. Valid formats: {}",
                        valid_formats.join(", ")
                    ),
                });
            }
        }

        Ok(())
    }

    pub fn server_settings(&self) -> ServerSettings {
        let server = self.server.as_ref();
        ServerSettings {
            host: server
                .and_then(|s| s.host.clone())
                .unwrap_or_else(|| DEFAULT_HOST.to_string()),
            port: server.and_then(|s| s.port).unwrap_or(DEFAULT_PORT),
            template_path: server.and_then(|s| s.template_path.clone()),
        }
    }

    pub fn monitoring_enabled(&self) -> bool {
        self.monitoring.as_ref().map(|m| m.enabled).unwrap_or(false)
    }

    pub fn log_format(&self) -> Option<&str> {
        self.monitoring.as_ref().and_then(|m| m.log_format.as_deref())
    }
}

impl ConfigProvider for TomlConfig {
    fn dataset_path(&self) -> &str {
        self.dataset
            .as_ref()
            .and_then(|d| d.path.as_deref())
            .unwrap_or(DEFAULT_DATASET_PATH)
    }

    fn year_threshold(&self) -> i32 {
        self.dataset
            .as_ref()
            .and_then(|d| d.year_threshold)
            .unwrap_or(DEFAULT_YEAR_THRESHOLD)
    }

    fn chart_style(&self) -> ChartStyle {
        let defaults = ChartStyle::default();
        let Some(chart) = &self.chart else {
            return defaults;
        };

        ChartStyle {
            title: chart.title.clone().unwrap_or(defaults.title),
            title_font_family: chart
                .title_font_family
                .clone()
                .unwrap_or(defaults.title_font_family),
            title_font_size: chart.title_font_size.unwrap_or(defaults.title_font_size),
            title_color: chart.title_color.clone().unwrap_or(defaults.title_color),
            bar_color: chart.bar_color.clone().unwrap_or(defaults.bar_color),
            bar_line_color: chart.bar_line_color.clone().unwrap_or(defaults.bar_line_color),
            bar_line_width: chart.bar_line_width.unwrap_or(defaults.bar_line_width),
            opacity: chart.opacity.unwrap_or(defaults.opacity),
            axis_headroom: chart.axis_headroom.unwrap_or(defaults.axis_headroom),
        }
    }
}

impl Validate for TomlConfig {
    fn validate(&self) -> Result<()> {
        self.validate_config()
    }
}
