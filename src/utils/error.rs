use thiserror::Error;

#[derive(Error, Debug)]
pub enum EtlError {
    #[error("Resource not found: {path}")]
    ResourceNotFound { path: String },

    #[error("Invalid sort key '{value}' (expected one of: full_name, vehicle_type)")]
    InvalidSortKey { value: String },

    #[error("Invalid delimiter '{value}' (expected one of: ',', '|')")]
    InvalidDelimiter { value: String },

    #[error("Malformed line {line_number}: expected {expected} fields, found {found}")]
    MalformedLine {
        line_number: usize,
        expected: usize,
        found: usize,
    },

    #[error("CSV processing error: {0}")]
    CsvError(#[from] csv::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Missing required argument: {field}")]
    MissingArgumentError { field: String },

    #[error("Invalid value '{value}' for {field}: {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    /// 呼叫端傳入的參數有誤
    Input,
    /// 輸入檔案內容有誤
    Data,
    Configuration,
    System,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Low,
    Medium,
    High,
    Critical,
}

impl EtlError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            EtlError::ResourceNotFound { .. }
            | EtlError::InvalidSortKey { .. }
            | EtlError::InvalidDelimiter { .. }
            | EtlError::MissingArgumentError { .. } => ErrorCategory::Input,
            EtlError::MalformedLine { .. } | EtlError::CsvError(_) => ErrorCategory::Data,
            EtlError::ConfigError { .. } | EtlError::InvalidConfigValueError { .. } => {
                ErrorCategory::Configuration
            }
            EtlError::IoError(_) | EtlError::SerializationError(_) => ErrorCategory::System,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self.category() {
            ErrorCategory::Input | ErrorCategory::Data | ErrorCategory::Configuration => {
                ErrorSeverity::High
            }
            ErrorCategory::System => match self {
                // 資料不是 UTF-8 之類的問題，換個檔案重跑即可
                EtlError::IoError(e) if e.kind() == std::io::ErrorKind::InvalidData => {
                    ErrorSeverity::Medium
                }
                _ => ErrorSeverity::Critical,
            },
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self {
            EtlError::ResourceNotFound { path } => {
                format!("Input file '{}' does not exist or cannot be opened", path)
            }
            EtlError::InvalidSortKey { value } => {
                format!("Cannot sort by '{}'", value)
            }
            EtlError::InvalidDelimiter { value } => {
                format!("Unsupported delimiter '{}'", value)
            }
            EtlError::MalformedLine {
                line_number,
                expected,
                found,
            } => format!(
                "Line {} has {} fields but every line needs exactly {}",
                line_number, found, expected
            ),
            EtlError::MissingArgumentError { field } => {
                format!("Missing argument: {}", field)
            }
            other => other.to_string(),
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self {
            EtlError::ResourceNotFound { .. } => {
                "Check the file name and the data directory it is resolved against"
            }
            EtlError::InvalidSortKey { .. } => "Use 'full_name' or 'vehicle_type'",
            EtlError::InvalidDelimiter { .. } => "Use ',' or '|' (quote '|' in your shell)",
            EtlError::MalformedLine { .. } => {
                "Make sure every line has first name, last name, email, vehicle type, vehicle name and vehicle length, and that the delimiter matches the file"
            }
            EtlError::MissingArgumentError { .. } => {
                "Pass the file name, delimiter and sort key, e.g. pipes.txt '|' full_name"
            }
            EtlError::ConfigError { .. } | EtlError::InvalidConfigValueError { .. } => {
                "Review the configuration values and try again"
            }
            EtlError::CsvError(_) | EtlError::SerializationError(_) => {
                "The output could not be rendered; re-run with --verbose for details"
            }
            EtlError::IoError(_) => "Check file permissions and available disk space",
        }
    }
}

impl ErrorSeverity {
    /// Process exit code for a run that failed with this severity.
    pub fn exit_code(&self) -> i32 {
        match self {
            ErrorSeverity::Low => 0,      // 警告，但成功
            ErrorSeverity::Medium => 2,   // 換輸入重試
            ErrorSeverity::High => 1,     // 輸入或資料錯誤
            ErrorSeverity::Critical => 3, // 系統錯誤
        }
    }
}

pub type Result<T> = std::result::Result<T, EtlError>;
