use serde::{Deserialize, Serialize};

/// One source invoice as read from the spreadsheet.
///
/// `products` is `None` when the cell was empty or absent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InputRow {
    pub invoice_no: String,
    pub products: Option<String>,
}

impl InputRow {
    pub fn new(invoice_no: impl Into<String>, products: impl Into<String>) -> Self {
        Self {
            invoice_no: invoice_no.into(),
            products: Some(products.into()),
        }
    }

    pub fn without_products(invoice_no: impl Into<String>) -> Self {
        Self {
            invoice_no: invoice_no.into(),
            products: None,
        }
    }
}

/// A single `;`-delimited segment of a products field, already trimmed and non-empty.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProductEntry<'a> {
    pub raw_segment: &'a str,
}

impl<'a> ProductEntry<'a> {
    pub fn new(raw_segment: &'a str) -> Self {
        Self { raw_segment }
    }

    /// 冒號前的商品本體（已去除前後空白）
    pub fn base(&self) -> &'a str {
        match self.raw_segment.split_once(':') {
            Some((base, _)) => base.trim(),
            None => self.raw_segment,
        }
    }

    /// 冒號後的附加項目（醬料、替換等），本管道不輸出
    pub fn modifiers(&self) -> Option<&'a str> {
        self.raw_segment
            .split_once(':')
            .map(|(_, rest)| rest.trim())
    }
}

/// A parsed product line that has not yet received its transaction id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProductLine {
    pub invoice_no: String,
    pub quantity: u32,
    pub product: String,
}

/// Final output row. Field order matches the CSV header.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NormalizedRecord {
    pub transaction_id: u64,
    pub invoice_no: String,
    pub quantity: u32,
    pub product: String,
}

impl NormalizedRecord {
    pub fn from_line(transaction_id: u64, line: ProductLine) -> Self {
        Self {
            transaction_id,
            invoice_no: line.invoice_no,
            quantity: line.quantity,
            product: line.product,
        }
    }
}

#[derive(Debug, Clone)]
pub struct NormalizeResult {
    pub records: Vec<NormalizedRecord>,
    pub rows_read: usize,
    pub rows_skipped: usize,
}

/// How to treat an invoice whose products cell is empty.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "cli", derive(clap::ValueEnum))]
#[serde(rename_all = "lowercase")]
pub enum MissingProductsPolicy {
    /// 不產生任何紀錄，只記錄警告
    #[default]
    Skip,
    /// 中止整個執行
    Fail,
}
