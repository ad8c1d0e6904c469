use crate::core::ConfigProvider;
use crate::domain::model::MissingProductsPolicy;
use crate::utils::preview::DEFAULT_PREVIEW_ROWS;
use crate::utils::validation::{validate_io_settings, Validate};
use crate::utils::error::Result;
use clap::Parser;

#[derive(Debug, Clone, Parser)]
#[command(name = "order-normalizer")]
#[command(about = "Split invoice product lists into one CSV row per product")]
pub struct CliConfig {
    /// Spreadsheet (.xlsx/.xls/.ods) or CSV with invoice_no and products columns
    #[arg(long, default_value = "products.xlsx")]
    pub input: String,

    /// Worksheet to read; defaults to the first one
    #[arg(long)]
    pub sheet: Option<String>,

    #[arg(long, default_value = ".")]
    pub output_path: String,

    #[arg(long, default_value = "clean_products.csv")]
    pub output_file: String,

    /// What to do with invoices whose products cell is empty
    #[arg(long, value_enum, default_value_t = MissingProductsPolicy::Skip)]
    pub missing_products: MissingProductsPolicy,

    /// Write plain UTF-8 without a byte order mark
    #[arg(long)]
    pub no_bom: bool,

    #[arg(long, default_value_t = DEFAULT_PREVIEW_ROWS)]
    pub preview_rows: usize,

    /// Emit logs as JSON lines
    #[arg(long)]
    pub json_logs: bool,

    #[arg(short, long, help = "Enable verbose output")]
    pub verbose: bool,

    #[arg(long, help = "Log CPU and memory usage per phase")]
    pub monitor: bool,
}

impl ConfigProvider for CliConfig {
    fn input_file(&self) -> &str {
        &self.input
    }

    fn sheet_name(&self) -> Option<&str> {
        self.sheet.as_deref()
    }

    fn output_path(&self) -> &str {
        &self.output_path
    }

    fn output_file(&self) -> &str {
        &self.output_file
    }

    fn missing_products(&self) -> MissingProductsPolicy {
        self.missing_products
    }

    fn write_bom(&self) -> bool {
        !self.no_bom
    }
}

impl Validate for CliConfig {
    fn validate(&self) -> Result<()> {
        validate_io_settings(
            &self.input,
            self.sheet.as_deref(),
            &self.output_path,
            &self.output_file,
            self.preview_rows,
        )
    }
}
