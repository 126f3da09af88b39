use thiserror::Error;

#[derive(Error, Debug)]
pub enum RoiError {
    #[error("Zip operation failed: {0}")]
    ZipError(#[from] zip::result::ZipError),

    #[error("CSV processing error: {0}")]
    CsvError(#[from] csv::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Configuration validation failed for '{field}': {message}")]
    ConfigValidationError { field: String, message: String },

    #[error("Invalid value '{value}' for '{field}': {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Unknown scenario preset: {name}")]
    UnknownScenario { name: String },

    #[error("Data processing error: {message}")]
    ProcessingError { message: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Configuration,
    Io,
    Serialization,
    Processing,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Low,
    Medium,
    High,
    Critical,
}

impl RoiError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            RoiError::ConfigError { .. }
            | RoiError::ConfigValidationError { .. }
            | RoiError::InvalidConfigValueError { .. }
            | RoiError::UnknownScenario { .. } => ErrorCategory::Configuration,
            RoiError::IoError(_) | RoiError::ZipError(_) => ErrorCategory::Io,
            RoiError::CsvError(_) | RoiError::SerializationError(_) => {
                ErrorCategory::Serialization
            }
            RoiError::ProcessingError { .. } => ErrorCategory::Processing,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self.category() {
            ErrorCategory::Configuration => ErrorSeverity::High,
            ErrorCategory::Io => ErrorSeverity::Critical,
            ErrorCategory::Serialization | ErrorCategory::Processing => ErrorSeverity::Medium,
        }
    }

    pub fn recovery_suggestion(&self) -> String {
        match self {
            RoiError::IoError(_) => {
                "Check that the output directory exists and is writable".to_string()
            }
            RoiError::ZipError(_) => {
                "Disable compression or choose a different archive filename".to_string()
            }
            RoiError::CsvError(_) | RoiError::SerializationError(_) => {
                "Re-run with --verbose to see which report failed to render".to_string()
            }
            RoiError::ConfigError { .. } | RoiError::ConfigValidationError { .. } => {
                "Check the configuration file syntax and section names".to_string()
            }
            RoiError::InvalidConfigValueError { field, .. } => {
                format!("Correct the value of '{}' and try again", field)
            }
            RoiError::UnknownScenario { .. } => {
                "Use one of: pessimistic (worst), base, optimistic (best)".to_string()
            }
            RoiError::ProcessingError { .. } => {
                "Review the assumptions for non-finite values".to_string()
            }
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self.category() {
            ErrorCategory::Configuration => format!("Invalid configuration: {}", self),
            ErrorCategory::Io => format!("Could not write the report: {}", self),
            ErrorCategory::Serialization => format!("Could not render the report: {}", self),
            ErrorCategory::Processing => format!("Simulation failed: {}", self),
        }
    }

    pub fn exit_code(&self) -> i32 {
        match self.severity() {
            ErrorSeverity::Low => 0,
            ErrorSeverity::Medium => 2,
            ErrorSeverity::High => 1,
            ErrorSeverity::Critical => 3,
        }
    }
}

pub type Result<T> = std::result::Result<T, RoiError>;
