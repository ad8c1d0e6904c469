use crate::utils::error::{NormalizerError, Result};
use std::collections::HashSet;

pub const INPUT_EXTENSIONS: [&str; 5] = ["xlsx", "xlsm", "xls", "ods", "csv"];
pub const MAX_PREVIEW_ROWS: usize = 1000;

pub trait Validate {
    fn validate(&self) -> Result<()>;
}

pub fn validate_path(field_name: &str, path: &str) -> Result<()> {
    if path.is_empty() {
        return Err(NormalizerError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: path.to_string(),
            reason: "Path cannot be empty".to_string(),
        });
    }

    if path.contains('\0') {
        return Err(NormalizerError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: path.to_string(),
            reason: "Path contains null bytes".to_string(),
        });
    }

    Ok(())
}

pub fn validate_file_extension(
    field_name: &str,
    file: &str,
    allowed_extensions: &[&str],
) -> Result<()> {
    let allowed_set: HashSet<&str> = allowed_extensions.iter().copied().collect();

    let Some(extension) = std::path::Path::new(file)
        .extension()
        .and_then(|ext| ext.to_str())
    else {
        return Err(NormalizerError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: file.to_string(),
            reason: "File has no extension or invalid filename".to_string(),
        });
    };

    if !allowed_set.contains(extension.to_ascii_lowercase().as_str()) {
        return Err(NormalizerError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: file.to_string(),
            reason: format!(
                "Unsupported file extension: {}. Allowed extensions: {}",
                extension,
                allowed_extensions.join(", ")
            ),
        });
    }

    Ok(())
}

pub fn validate_non_empty_string(field_name: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(NormalizerError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: "Value cannot be empty or whitespace-only".to_string(),
        });
    }
    Ok(())
}

pub fn validate_range<T: PartialOrd + std::fmt::Display + Copy>(
    field_name: &str,
    value: T,
    min: T,
    max: T,
) -> Result<()> {
    if value < min || value > max {
        return Err(NormalizerError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: format!("Value must be between {} and {}", min, max),
        });
    }
    Ok(())
}

/// 共用的輸入/輸出設定檢查，CLI 與 TOML 設定都會呼叫
pub fn validate_io_settings(
    input_file: &str,
    sheet: Option<&str>,
    output_path: &str,
    output_file: &str,
    preview_rows: usize,
) -> Result<()> {
    validate_path("input", input_file)?;
    validate_file_extension("input", input_file, &INPUT_EXTENSIONS)?;
    if let Some(sheet) = sheet {
        validate_non_empty_string("sheet", sheet)?;
    }
    validate_path("output_path", output_path)?;
    validate_path("output_file", output_file)?;
    validate_file_extension("output_file", output_file, &["csv"])?;
    validate_range("preview_rows", preview_rows, 0, MAX_PREVIEW_ROWS)?;
    Ok(())
}
