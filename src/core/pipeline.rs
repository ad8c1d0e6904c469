use crate::core::normalizer::Normalizer;
use crate::core::{sink, source};
use crate::core::{ConfigProvider, InputRow, NormalizeResult, Pipeline, Storage};
use crate::utils::error::{NormalizerError, Result};
use std::path::Path;

pub struct NormalizerPipeline<S: Storage, C: ConfigProvider> {
    storage: S,
    config: C,
    normalizer: Normalizer,
}

impl<S: Storage, C: ConfigProvider> NormalizerPipeline<S, C> {
    pub fn new(storage: S, config: C) -> Self {
        let normalizer = Normalizer::new(config.missing_products());
        Self {
            storage,
            config,
            normalizer,
        }
    }

    pub fn output_location(&self) -> String {
        Path::new(self.config.output_path())
            .join(self.config.output_file())
            .to_string_lossy()
            .into_owned()
    }
}

#[async_trait::async_trait]
impl<S: Storage, C: ConfigProvider> Pipeline for NormalizerPipeline<S, C> {
    async fn extract(&self) -> Result<Vec<InputRow>> {
        let input = self.config.input_file();
        tracing::debug!("Reading source file: {}", input);

        let data = self.storage.read_file(input).await.map_err(|e| match e {
            NormalizerError::IoError(source) => NormalizerError::SourceReadError {
                path: input.to_string(),
                source,
            },
            other => other,
        })?;

        source::read_rows(input, self.config.sheet_name(), data)
    }

    async fn transform(&self, rows: Vec<InputRow>) -> Result<NormalizeResult> {
        let rows_skipped = rows.iter().filter(|row| row.products.is_none()).count();
        let records = self.normalizer.normalize(&rows)?;

        Ok(NormalizeResult {
            records,
            rows_read: rows.len(),
            rows_skipped,
        })
    }

    async fn load(&self, result: &NormalizeResult) -> Result<String> {
        let output = self.output_location();
        let data = sink::write_csv(&result.records, self.config.write_bom())?;

        tracing::debug!("Writing {} bytes to {}", data.len(), output);
        self.storage
            .write_file(&output, &data)
            .await
            .map_err(|e| match e {
                NormalizerError::IoError(source) => NormalizerError::SinkWriteError {
                    path: output.clone(),
                    source,
                },
                other => other,
            })?;

        Ok(output)
    }
}
