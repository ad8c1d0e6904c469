use crate::core::sink::UTF8_BOM;
use crate::domain::model::InputRow;
use crate::utils::error::{NormalizerError, Result};
use calamine::{open_workbook_auto_from_rs, Data, Reader};
use std::io::Cursor;
use std::path::Path;

pub const INVOICE_COLUMN: &str = "invoice_no";
pub const PRODUCTS_COLUMN: &str = "products";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceFormat {
    Spreadsheet,
    Csv,
}

impl SourceFormat {
    pub fn from_path(path: &str) -> Self {
        let is_csv = Path::new(path)
            .extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| ext.eq_ignore_ascii_case("csv"));
        if is_csv {
            Self::Csv
        } else {
            Self::Spreadsheet
        }
    }
}

/// Decode the raw bytes of `path` into invoice rows.
pub fn read_rows(path: &str, sheet: Option<&str>, data: Vec<u8>) -> Result<Vec<InputRow>> {
    match SourceFormat::from_path(path) {
        SourceFormat::Csv => read_csv_rows(path, &data),
        SourceFormat::Spreadsheet => read_sheet_rows(path, sheet, data),
    }
}

struct ColumnIndex {
    invoice_no: usize,
    products: usize,
}

impl ColumnIndex {
    fn locate(path: &str, headers: &[String]) -> Result<Self> {
        let find = |column: &str| {
            headers
                .iter()
                .position(|h| h.trim() == column)
                .ok_or_else(|| NormalizerError::MissingColumnError {
                    path: path.to_string(),
                    column: column.to_string(),
                })
        };
        Ok(Self {
            invoice_no: find(INVOICE_COLUMN)?,
            products: find(PRODUCTS_COLUMN)?,
        })
    }
}

fn read_csv_rows(path: &str, data: &[u8]) -> Result<Vec<InputRow>> {
    // Excel 匯出的 CSV 常帶 BOM
    let data = data.strip_prefix(UTF8_BOM).unwrap_or(data);
    let mut reader = csv::ReaderBuilder::new().flexible(true).from_reader(data);

    let headers: Vec<String> = reader.headers()?.iter().map(str::to_string).collect();
    let columns = ColumnIndex::locate(path, &headers)?;

    let mut rows = Vec::new();
    for record in reader.records() {
        let record = record?;
        let invoice_no = record.get(columns.invoice_no).unwrap_or("").trim().to_string();
        // 只有空欄位算缺值，空白字元交給正規化處理
        let products = record
            .get(columns.products)
            .filter(|text| !text.is_empty())
            .map(str::to_string);
        rows.push(InputRow {
            invoice_no,
            products,
        });
    }

    tracing::debug!("Read {} rows from CSV source {}", rows.len(), path);
    Ok(rows)
}

fn read_sheet_rows(path: &str, sheet: Option<&str>, data: Vec<u8>) -> Result<Vec<InputRow>> {
    let mut workbook = open_workbook_auto_from_rs(Cursor::new(data))?;

    let range = match sheet {
        Some(name) => {
            if !workbook.sheet_names().iter().any(|s| s == name) {
                return Err(NormalizerError::WorksheetNotFoundError {
                    path: path.to_string(),
                    sheet: Some(name.to_string()),
                });
            }
            workbook.worksheet_range(name)?
        }
        None => workbook
            .worksheet_range_at(0)
            .ok_or_else(|| NormalizerError::WorksheetNotFoundError {
                path: path.to_string(),
                sheet: None,
            })??,
    };

    let mut sheet_rows = range.rows();
    let Some(header) = sheet_rows.next() else {
        return Err(NormalizerError::MissingColumnError {
            path: path.to_string(),
            column: INVOICE_COLUMN.to_string(),
        });
    };
    let headers: Vec<String> = header.iter().map(cell_text).collect();
    let columns = ColumnIndex::locate(path, &headers)?;

    let mut rows = Vec::new();
    for cells in sheet_rows {
        let invoice_no = cells.get(columns.invoice_no).map(cell_text).unwrap_or_default();
        let products = cells
            .get(columns.products)
            .filter(|cell| !is_blank(cell))
            .map(cell_text);
        rows.push(InputRow {
            invoice_no: invoice_no.trim().to_string(),
            products,
        });
    }

    tracing::debug!("Read {} rows from worksheet in {}", rows.len(), path);
    Ok(rows)
}

/// 非文字儲存格一律轉成文字
fn cell_text(cell: &Data) -> String {
    match cell {
        Data::Empty => String::new(),
        Data::String(s) => s.clone(),
        other => other.to_string(),
    }
}

fn is_blank(cell: &Data) -> bool {
    match cell {
        Data::Empty => true,
        Data::String(s) => s.is_empty(),
        _ => false,
    }
}
