//! Turns free-text product lists into one record per purchased product.
//!
//! A products field looks like
//! `1x Butter Naan.; 1x Samosa 1 Unidad.: 1x Sin Salsa Extra, 1x Samosa 1 unidad (vegano)`.
//! Segments are split on `;`, anything after the first `:` is a modifier list
//! and is dropped, and a leading `<n>x` sets the quantity.

use crate::domain::model::{
    InputRow, MissingProductsPolicy, NormalizedRecord, ProductEntry, ProductLine,
};
use crate::utils::error::{NormalizerError, Result};
use once_cell::sync::Lazy;
use regex::Regex;
use std::num::ParseIntError;

static QUANTITY_PREFIX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^([0-9]+)x\s*(?s:(.*))").expect("valid quantity pattern"));

const STRIPPED_CHARS: [char; 3] = ['*', '.', '"'];

/// Split a products field into trimmed, non-empty segments, keeping source order.
pub fn segment_products(products: &str) -> Vec<ProductEntry<'_>> {
    products
        .split(';')
        .map(str::trim)
        .filter(|segment| !segment.is_empty())
        .map(ProductEntry::new)
        .collect()
}

/// Parse a leading `<digits>x` prefix.
///
/// Returns `Ok(None)` when the text has no prefix, in which case the caller
/// uses quantity 1 and the whole text as the name.
pub fn extract_quantity(text: &str) -> std::result::Result<Option<(u32, &str)>, ParseIntError> {
    let Some(caps) = QUANTITY_PREFIX.captures(text) else {
        return Ok(None);
    };
    let quantity = caps[1].parse::<u32>()?;
    let rest = caps.get(2).map_or("", |m| m.as_str());
    Ok(Some((quantity, rest)))
}

/// Remove `*`, `.` and `"` and trim the result.
pub fn clean_product_name(name: &str) -> String {
    name.replace(STRIPPED_CHARS, "").trim().to_string()
}

/// Number every line in order, starting at 1.
pub fn assign_transaction_ids(lines: Vec<ProductLine>) -> Vec<NormalizedRecord> {
    lines
        .into_iter()
        .zip(1u64..)
        .map(|(line, id)| NormalizedRecord::from_line(id, line))
        .collect()
}

#[derive(Debug, Clone, Default)]
pub struct Normalizer {
    missing_products: MissingProductsPolicy,
}

impl Normalizer {
    pub fn new(missing_products: MissingProductsPolicy) -> Self {
        Self { missing_products }
    }

    /// Parse one invoice into product lines. Pure apart from logging.
    pub fn normalize_row(&self, row: &InputRow) -> Result<Vec<ProductLine>> {
        let Some(products) = row.products.as_deref() else {
            return match self.missing_products {
                MissingProductsPolicy::Skip => {
                    tracing::warn!("⚠️ Invoice {} has no products, skipping", row.invoice_no);
                    Ok(Vec::new())
                }
                MissingProductsPolicy::Fail => Err(NormalizerError::MissingProductsError {
                    invoice_no: row.invoice_no.clone(),
                }),
            };
        };

        segment_products(products)
            .into_iter()
            .map(|entry| self.parse_entry(&row.invoice_no, entry))
            .collect()
    }

    fn parse_entry(&self, invoice_no: &str, entry: ProductEntry<'_>) -> Result<ProductLine> {
        if let Some(modifiers) = entry.modifiers() {
            tracing::debug!("Dropping modifiers for {}: {}", invoice_no, modifiers);
        }

        let base = entry.base();
        let (quantity, name) = extract_quantity(base)
            .map_err(|_| NormalizerError::QuantityOverflowError {
                invoice_no: invoice_no.to_string(),
                segment: entry.raw_segment.to_string(),
            })?
            .unwrap_or((1, base));

        Ok(ProductLine {
            invoice_no: invoice_no.to_string(),
            quantity,
            product: clean_product_name(name),
        })
    }

    /// Normalize every row, then assign transaction ids over the combined output.
    pub fn normalize(&self, rows: &[InputRow]) -> Result<Vec<NormalizedRecord>> {
        let mut lines = Vec::new();
        for row in rows {
            let row_lines = self.normalize_row(row)?;
            tracing::debug!(
                "Invoice {} -> {} product(s)",
                row.invoice_no,
                row_lines.len()
            );
            lines.extend(row_lines);
        }
        Ok(assign_transaction_ids(lines))
    }
}

/// Normalize with the default options (rows without products are skipped).
pub fn normalize(rows: &[InputRow]) -> Result<Vec<NormalizedRecord>> {
    Normalizer::default().normalize(rows)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn only_record(products: &str) -> NormalizedRecord {
        let records = normalize(&[InputRow::new("LS1", products)]).unwrap();
        assert_eq!(records.len(), 1, "expected one record for {:?}", products);
        records.into_iter().next().unwrap()
    }

    #[test]
    fn test_segment_products_drops_empty_segments() {
        let segments = segment_products("1x A.; 1x B.;");
        let raw: Vec<&str> = segments.iter().map(|s| s.raw_segment).collect();
        assert_eq!(raw, vec!["1x A.", "1x B."]);

        assert!(segment_products("").is_empty());
        assert!(segment_products(" ;  ; ").is_empty());
    }

    #[test]
    fn test_segment_products_trims_multiline_input() {
        let text = "1x Butter Naan.;\n           2x Lassi de Mango.\n";
        let raw: Vec<&str> = segment_products(text).iter().map(|s| s.raw_segment).collect();
        assert_eq!(raw, vec!["1x Butter Naan.", "2x Lassi de Mango."]);
    }

    #[test]
    fn test_product_entry_splits_on_first_colon_only() {
        let entry = ProductEntry::new("1x Menú Mayura.: 1x Naan.: extra");
        assert_eq!(entry.base(), "1x Menú Mayura.");
        assert_eq!(entry.modifiers(), Some("1x Naan.: extra"));

        let plain = ProductEntry::new("1x Naan.");
        assert_eq!(plain.base(), "1x Naan.");
        assert_eq!(plain.modifiers(), None);
    }

    #[test]
    fn test_extract_quantity() {
        assert_eq!(extract_quantity("2x Lassi").unwrap(), Some((2, "Lassi")));
        assert_eq!(extract_quantity("12xNaan").unwrap(), Some((12, "Naan")));
        assert_eq!(extract_quantity("3x").unwrap(), Some((3, "")));
        assert_eq!(extract_quantity("Naan").unwrap(), None);
        // separator is case-sensitive and must follow the digits directly
        assert_eq!(extract_quantity("2X Naan").unwrap(), None);
        assert_eq!(extract_quantity("2 x Naan").unwrap(), None);
        assert_eq!(extract_quantity("x2 Naan").unwrap(), None);
    }

    #[test]
    fn test_zero_quantity_is_kept_verbatim() {
        let record = only_record("0x Naan.");
        assert_eq!(record.transaction_id, 1);
        assert_eq!(record.quantity, 0);
        assert_eq!(record.product, "Naan");
    }

    #[test]
    fn test_whitespace_only_products_yield_no_records() {
        let rows = vec![InputRow::new("LS1", "   "), InputRow::new("LS2", "1x Naan.")];
        let records = Normalizer::new(MissingProductsPolicy::Fail)
            .normalize(&rows)
            .unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].invoice_no, "LS2");
    }

    #[test]
    fn test_extract_quantity_overflow_is_error() {
        assert!(extract_quantity("99999999999x Naan").is_err());
    }

    #[test]
    fn test_clean_product_name() {
        assert_eq!(clean_product_name(" Butter Naan. "), "Butter Naan");
        assert_eq!(clean_product_name("*\"Special\"* Thali..."), "Special Thali");
        assert_eq!(clean_product_name("Cerveza Moritz, lata 0,33l"), "Cerveza Moritz, lata 0,33l");
        assert_eq!(clean_product_name("..."), "");
    }

    #[test]
    fn test_scenario_butter_naan() {
        let record = only_record("1x Butter Naan.");
        assert_eq!(record.quantity, 1);
        assert_eq!(record.product, "Butter Naan");
    }

    #[test]
    fn test_scenario_modifiers_discarded() {
        let record =
            only_record("1x Samosa 1 Unidad.: 1x Sin Salsa Extra, 1x Samosa 1 unidad (vegano)");
        assert_eq!(record.quantity, 1);
        assert_eq!(record.product, "Samosa 1 Unidad");
    }

    #[test]
    fn test_scenario_quantity_two() {
        let record = only_record("2x Lassi de Mango.");
        assert_eq!(record.quantity, 2);
        assert_eq!(record.product, "Lassi de Mango");
    }

    #[test]
    fn test_no_prefix_defaults_to_one() {
        let record = only_record("Pollo Tikka Masala.");
        assert_eq!(record.quantity, 1);
        assert_eq!(record.product, "Pollo Tikka Masala");
    }

    #[test]
    fn test_bare_quantity_yields_empty_product() {
        let record = only_record("4x");
        assert_eq!(record.quantity, 4);
        assert_eq!(record.product, "");
    }

    #[test]
    fn test_ids_run_across_rows() {
        let rows = vec![
            InputRow::new("LS1", "1x A.; 1x B."),
            InputRow::new("LS2", "3x C."),
        ];
        let records = normalize(&rows).unwrap();
        let ids: Vec<u64> = records.iter().map(|r| r.transaction_id).collect();
        let invoices: Vec<&str> = records.iter().map(|r| r.invoice_no.as_str()).collect();
        assert_eq!(ids, vec![1, 2, 3]);
        assert_eq!(invoices, vec!["LS1", "LS1", "LS2"]);
        assert_eq!(records[2].quantity, 3);
    }

    #[test]
    fn test_missing_products_skip() {
        let rows = vec![
            InputRow::without_products("LS1"),
            InputRow::new("LS2", "1x Naan."),
        ];
        let records = Normalizer::new(MissingProductsPolicy::Skip)
            .normalize(&rows)
            .unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].transaction_id, 1);
        assert_eq!(records[0].invoice_no, "LS2");
    }

    #[test]
    fn test_missing_products_fail() {
        let rows = vec![InputRow::without_products("LS1")];
        let err = Normalizer::new(MissingProductsPolicy::Fail)
            .normalize(&rows)
            .unwrap_err();
        assert!(matches!(
            err,
            NormalizerError::MissingProductsError { ref invoice_no } if invoice_no == "LS1"
        ));
    }

    #[test]
    fn test_quantity_overflow_aborts_run() {
        let rows = vec![InputRow::new("LS9", "1x Naan.; 4294967296x Lassi.")];
        let err = normalize(&rows).unwrap_err();
        match err {
            NormalizerError::QuantityOverflowError { invoice_no, segment } => {
                assert_eq!(invoice_no, "LS9");
                assert_eq!(segment, "4294967296x Lassi.");
            }
            other => panic!("unexpected error: {other}"),
        }
    }
}
