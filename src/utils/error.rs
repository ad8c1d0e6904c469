use thiserror::Error;

#[derive(Error, Debug)]
pub enum NormalizerError {
    #[error("Cannot read source '{path}': {source}")]
    SourceReadError {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Source '{path}' is missing required column '{column}'")]
    MissingColumnError { path: String, column: String },

    #[error("Spreadsheet error: {0}")]
    SpreadsheetError(#[from] calamine::Error),

    #[error("Source '{path}' contains no worksheet{}", sheet_suffix(.sheet))]
    WorksheetNotFoundError { path: String, sheet: Option<String> },

    #[error("Invoice '{invoice_no}' has no products")]
    MissingProductsError { invoice_no: String },

    #[error("Quantity out of range in invoice '{invoice_no}': '{segment}'")]
    QuantityOverflowError { invoice_no: String, segment: String },

    #[error("CSV processing error: {0}")]
    CsvError(#[from] csv::Error),

    #[error("Cannot write output '{path}': {source}")]
    SinkWriteError {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Configuration error in '{field}': {message}")]
    ConfigValidationError { field: String, message: String },

    #[error("Invalid value '{value}' for '{field}': {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Missing required configuration '{field}'")]
    MissingConfigError { field: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Source,
    Parse,
    Sink,
    Config,
    System,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    High,
    Critical,
}

impl NormalizerError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::SourceReadError { .. }
            | Self::MissingColumnError { .. }
            | Self::SpreadsheetError(_)
            | Self::WorksheetNotFoundError { .. }
            | Self::MissingProductsError { .. } => ErrorCategory::Source,
            Self::QuantityOverflowError { .. } | Self::CsvError(_) => ErrorCategory::Parse,
            Self::SinkWriteError { .. } => ErrorCategory::Sink,
            Self::ConfigValidationError { .. }
            | Self::InvalidConfigValueError { .. }
            | Self::MissingConfigError { .. } => ErrorCategory::Config,
            Self::IoError(_) => ErrorCategory::System,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self.category() {
            ErrorCategory::Source | ErrorCategory::Parse | ErrorCategory::Config => {
                ErrorSeverity::High
            }
            ErrorCategory::Sink | ErrorCategory::System => ErrorSeverity::Critical,
        }
    }

    pub fn recovery_suggestion(&self) -> String {
        match self {
            Self::SourceReadError { path, .. } => {
                format!("Check that '{}' exists and is readable", path)
            }
            Self::MissingColumnError { column, .. } => format!(
                "Add a '{}' header to the first row of the sheet (required: invoice_no, products)",
                column
            ),
            Self::SpreadsheetError(_) => {
                "Re-export the file as .xlsx or .csv and try again".to_string()
            }
            Self::WorksheetNotFoundError { .. } => {
                "Check the sheet name, or omit it to use the first sheet".to_string()
            }
            Self::MissingProductsError { .. } => {
                "Fill in the products cell or run with --missing-products skip".to_string()
            }
            Self::QuantityOverflowError { .. } => {
                "Fix the quantity prefix of the listed product in the source file".to_string()
            }
            Self::CsvError(_) => "Check the CSV file for unbalanced quotes".to_string(),
            Self::SinkWriteError { path, .. } => {
                format!("Check write permissions and free space for '{}'", path)
            }
            Self::IoError(_) => "Check file permissions and disk space".to_string(),
            Self::ConfigValidationError { .. }
            | Self::InvalidConfigValueError { .. }
            | Self::MissingConfigError { .. } => {
                "Review the command line flags or configuration file".to_string()
            }
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self.category() {
            ErrorCategory::Source => format!("Could not read the order file: {}", self),
            ErrorCategory::Parse => format!("Could not parse the order data: {}", self),
            ErrorCategory::Sink => format!("Could not save the cleaned file: {}", self),
            ErrorCategory::Config => format!("Invalid configuration: {}", self),
            ErrorCategory::System => format!("System error: {}", self),
        }
    }

    /// 依嚴重程度決定結束碼
    pub fn exit_code(&self) -> i32 {
        match self.severity() {
            ErrorSeverity::High => 1,
            ErrorSeverity::Critical => 3,
        }
    }
}

fn sheet_suffix(sheet: &Option<String>) -> String {
    sheet
        .as_ref()
        .map(|name| format!(" named '{}'", name))
        .unwrap_or_default()
}

pub type Result<T> = std::result::Result<T, NormalizerError>;
