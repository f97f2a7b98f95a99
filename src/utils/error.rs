use thiserror::Error;

#[derive(Error, Debug)]
pub enum ChartError {
    #[error("Dataset not found or unreadable at '{path}': {source}")]
    DatasetNotFound {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Data format error at line {line}: {message}")]
    DataFormatError { line: u64, message: String },

    #[error("CSV processing error: {0}")]
    CsvError(#[from] csv::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Template error: {0}")]
    TemplateError(#[from] handlebars::TemplateError),

    #[error("Render error: {0}")]
    RenderError(#[from] handlebars::RenderError),

    #[error("Configuration error in '{field}': {message}")]
    ConfigValidationError { field: String, message: String },

    #[error("Invalid value '{value}' for '{field}': {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Dataset,
    DataFormat,
    Template,
    Configuration,
    System,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Medium,
    High,
    Critical,
}

impl ChartError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            ChartError::DatasetNotFound { .. } => ErrorCategory::Dataset,
            ChartError::DataFormatError { .. } | ChartError::CsvError(_) => {
                ErrorCategory::DataFormat
            }
            ChartError::TemplateError(_) | ChartError::RenderError(_) => ErrorCategory::Template,
            ChartError::ConfigValidationError { .. }
            | ChartError::InvalidConfigValueError { .. } => ErrorCategory::Configuration,
            ChartError::IoError(_) | ChartError::SerializationError(_) => ErrorCategory::System,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self.category() {
            ErrorCategory::DataFormat => ErrorSeverity::Medium,
            ErrorCategory::Dataset | ErrorCategory::Template => ErrorSeverity::High,
            ErrorCategory::Configuration | ErrorCategory::System => ErrorSeverity::Critical,
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self.category() {
            ErrorCategory::Dataset => {
                "Check that the dataset file exists at the configured path and is readable"
            }
            ErrorCategory::DataFormat => {
                "Make sure the CSV has a header row with a 'year' column holding integer values"
            }
            ErrorCategory::Template => {
                "Check the HTML template syntax and that it references {{{graph_json}}}"
            }
            ErrorCategory::Configuration => "Review the command line flags or the TOML file",
            ErrorCategory::System => "Check disk and process permissions, then retry",
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self {
            ChartError::DatasetNotFound { path, .. } => {
                format!("The dataset '{}' could not be read", path)
            }
            ChartError::DataFormatError { line, message } => {
                format!("The dataset is malformed (line {}): {}", line, message)
            }
            ChartError::ConfigValidationError { field, message } => {
                format!("Invalid configuration for '{}': {}", field, message)
            }
            ChartError::InvalidConfigValueError { field, reason, .. } => {
                format!("Invalid configuration for '{}': {}", field, reason)
            }
            other => other.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, ChartError>;
