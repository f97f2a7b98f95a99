pub mod storage;
pub mod toml_config;

use crate::core::aggregator::DEFAULT_YEAR_THRESHOLD;
use crate::core::ConfigProvider;
use crate::domain::model::ChartStyle;
use crate::utils::error::Result;
use crate::utils::validation::{self, Validate};
#[cfg(feature = "cli")]
use clap::Parser;
use serde::{Deserialize, Serialize};

pub const DEFAULT_DATASET_PATH: &str = "sets.csv";
pub const DEFAULT_HOST: &str = "0.0.0.0";
pub const DEFAULT_PORT: u16 = 8080;

/// Listener settings, resolved once at start-up.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerSettings {
    pub host: String,
    pub port: u16,
    pub template_path: Option<String>,
}

impl ServerSettings {
    pub fn bind_address(&self) -> String {
        if self.host.contains(':') {
            format!("[{}]:{}", self.host, self.port)
        } else {
            format!("{}:{}", self.host, self.port)
        }
    }
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
            template_path: None,
        }
    }
}

#[cfg(feature = "cli")]
#[derive(Debug, Clone, Serialize, Deserialize, Parser)]
#[command(name = "lego-chart")]
#[command(about = "Serves a bar chart of Lego sets per year")]
pub struct CliConfig {
    #[arg(long, default_value = DEFAULT_DATASET_PATH)]
    pub dataset_path: String,

    #[arg(long, default_value = DEFAULT_HOST)]
    pub host: String,

    #[arg(long, default_value_t = DEFAULT_PORT)]
    pub port: u16,

    #[arg(long, default_value_t = DEFAULT_YEAR_THRESHOLD, allow_negative_numbers = true)]
    pub year_threshold: i32,

    #[arg(long, help = "HTML template to use instead of the built-in page")]
    pub template_path: Option<String>,

    #[arg(long, help = "Enable verbose output")]
    pub verbose: bool,

    #[arg(long, help = "Log CPU and memory usage per request phase")]
    pub monitor: bool,
}

#[cfg(feature = "cli")]
impl Default for CliConfig {
    fn default() -> Self {
        Self {
            dataset_path: DEFAULT_DATASET_PATH.to_string(),
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
            year_threshold: DEFAULT_YEAR_THRESHOLD,
            template_path: None,
            verbose: false,
            monitor: false,
        }
    }
}

#[cfg(feature = "cli")]
impl CliConfig {
    pub fn server_settings(&self) -> ServerSettings {
        ServerSettings {
            host: self.host.clone(),
            port: self.port,
            template_path: self.template_path.clone(),
        }
    }
}

#[cfg(feature = "cli")]
impl ConfigProvider for CliConfig {
    fn dataset_path(&self) -> &str {
        &self.dataset_path
    }

    fn year_threshold(&self) -> i32 {
        self.year_threshold
    }

    fn chart_style(&self) -> ChartStyle {
        ChartStyle::default()
    }
}

#[cfg(feature = "cli")]
impl Validate for CliConfig {
    fn validate(&self) -> Result<()> {
        validation::validate_path("dataset_path", &self.dataset_path)?;
        validation::validate_file_extension("dataset_path", &self.dataset_path, &["csv"])?;
        validation::validate_host("host", &self.host)?;
        validation::validate_positive_number("port", u64::from(self.port), 1)?;
        if let Some(template) = &self.template_path {
            validation::validate_path("template_path", template)?;
            validation::validate_file_extension("template_path", template, &["html", "hbs"])?;
        }
        Ok(())
    }
}

#[cfg(all(test, feature = "cli"))]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_original_entry_point() {
        let config = CliConfig::parse_from(["lego-chart"]);

        assert_eq!(config.dataset_path, "sets.csv");
        assert_eq!(config.server_settings().bind_address(), "0.0.0.0:8080");
        assert_eq!(config.year_threshold, 2000);
        assert!(config.template_path.is_none());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_flags_override_defaults() {
        let config = CliConfig::parse_from([
            "lego-chart",
            "--dataset-path",
            "data/sets.csv",
            "--port",
            "9000",
            "--year-threshold",
            "2010",
            "--monitor",
        ]);

        assert_eq!(config.dataset_path(), "data/sets.csv");
        assert_eq!(config.port, 9000);
        assert_eq!(config.year_threshold(), 2010);
        assert!(config.monitor);
    }

    #[test]
    fn test_validation_rejects_bad_values() {
        let config = CliConfig {
            port: 0,
            ..CliConfig::default()
        };
        assert!(config.validate().is_err());

        let config = CliConfig {
            dataset_path: "sets.json".to_string(),
            ..CliConfig::default()
        };
        assert!(config.validate().is_err());

        let config = CliConfig {
            template_path: Some("index.txt".to_string()),
            ..CliConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_ipv6_bind_address() {
        let settings = ServerSettings {
            host: "::".to_string(),
            ..ServerSettings::default()
        };
        assert_eq!(settings.bind_address(), "[::]:8080");
    }
}
