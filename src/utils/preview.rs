use crate::domain::model::NormalizedRecord;
use crate::core::sink::OUTPUT_HEADER;

pub const DEFAULT_PREVIEW_ROWS: usize = 10;

/// Render the first `limit` records as a right-aligned text table.
pub fn render_preview(records: &[NormalizedRecord], limit: usize) -> String {
    let rows: Vec<[String; 4]> = records
        .iter()
        .take(limit)
        .map(|r| {
            [
                r.transaction_id.to_string(),
                r.invoice_no.clone(),
                r.quantity.to_string(),
                r.product.clone(),
            ]
        })
        .collect();

    let mut widths = OUTPUT_HEADER.map(|h| h.chars().count());
    for row in &rows {
        for (width, cell) in widths.iter_mut().zip(row) {
            *width = (*width).max(cell.chars().count());
        }
    }

    let format_line = |cells: [&str; 4]| {
        cells
            .iter()
            .zip(widths)
            .map(|(cell, width)| format!("{:>width$}", cell, width = width))
            .collect::<Vec<_>>()
            .join("  ")
    };

    let mut lines = vec![format_line(OUTPUT_HEADER)];
    for row in &rows {
        lines.push(format_line(row.each_ref().map(String::as_str)));
    }
    if records.len() > rows.len() {
        lines.push(format!("... {} more rows", records.len() - rows.len()));
    }
    lines.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn records(n: u64) -> Vec<NormalizedRecord> {
        (1..=n)
            .map(|id| NormalizedRecord {
                transaction_id: id,
                invoice_no: "LS35713".to_string(),
                quantity: 1,
                product: format!("Naan {}", id),
            })
            .collect()
    }

    #[test]
    fn test_preview_limits_rows() {
        let preview = render_preview(&records(12), DEFAULT_PREVIEW_ROWS);
        let lines: Vec<&str> = preview.lines().collect();

        assert_eq!(lines.len(), 12); // header + 10 rows + footer
        assert!(lines[0].contains("transaction_id"));
        assert!(lines[10].contains("Naan 10"));
        assert_eq!(lines[11], "... 2 more rows");
    }

    #[test]
    fn test_preview_aligns_columns() {
        let preview = render_preview(&records(2), DEFAULT_PREVIEW_ROWS);
        let lines: Vec<&str> = preview.lines().collect();

        assert_eq!(lines.len(), 3);
        assert_eq!(lines[0].chars().count(), lines[1].chars().count());
        assert!(lines[1].starts_with("             1"));
    }

    #[test]
    fn test_preview_empty() {
        let preview = render_preview(&[], DEFAULT_PREVIEW_ROWS);
        assert_eq!(preview, "transaction_id  invoice_no  quantity  product");
    }
}
