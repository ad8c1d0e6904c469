use crate::domain::model::NormalizedRecord;
use crate::utils::error::Result;

/// Byte order mark written ahead of the CSV so spreadsheet tools pick UTF-8.
pub const UTF8_BOM: &[u8] = b"\xEF\xBB\xBF";

pub const OUTPUT_HEADER: [&str; 4] = ["transaction_id", "invoice_no", "quantity", "product"];

/// Serialize records to CSV with a header row.
pub fn write_csv(records: &[NormalizedRecord], with_bom: bool) -> Result<Vec<u8>> {
    let mut buffer = Vec::new();
    if with_bom {
        buffer.extend_from_slice(UTF8_BOM);
    }

    let mut writer = csv::Writer::from_writer(buffer);
    if records.is_empty() {
        // serde 只會在第一筆紀錄時寫表頭
        writer.write_record(OUTPUT_HEADER)?;
    }
    for record in records {
        writer.serialize(record)?;
    }

    let buffer = writer.into_inner().map_err(|e| e.into_error())?;
    Ok(buffer)
}
