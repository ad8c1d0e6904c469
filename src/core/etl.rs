use crate::core::{NormalizedRecord, Pipeline};
use crate::utils::error::Result;
use crate::utils::monitor::SystemMonitor;

/// What a completed run produced.
#[derive(Debug, Clone)]
pub struct RunOutcome {
    pub output_path: String,
    pub records: Vec<NormalizedRecord>,
    pub rows_read: usize,
    pub rows_skipped: usize,
}

pub struct EtlEngine<P: Pipeline> {
    pipeline: P,
    monitor: SystemMonitor,
}

impl<P: Pipeline> EtlEngine<P> {
    pub fn new(pipeline: P) -> Self {
        Self::new_with_monitoring(pipeline, false)
    }

    pub fn new_with_monitoring(pipeline: P, monitor_enabled: bool) -> Self {
        Self {
            pipeline,
            monitor: SystemMonitor::new(monitor_enabled),
        }
    }

    pub async fn run(&self) -> Result<RunOutcome> {
        tracing::info!("🚀 Starting normalization run");

        // Extract
        let rows = self.pipeline.extract().await?;
        tracing::info!("📥 Read {} invoices", rows.len());
        self.monitor.log_stats("Extract");

        // Transform
        let result = self.pipeline.transform(rows).await?;
        tracing::info!(
            "🔄 Normalized {} product records ({} invoices without products)",
            result.records.len(),
            result.rows_skipped
        );
        self.monitor.log_stats("Transform");

        // Load
        let output_path = self.pipeline.load(&result).await?;
        tracing::info!("💾 Output saved to: {}", output_path);
        self.monitor.log_stats("Load");
        self.monitor.log_final_stats();

        Ok(RunOutcome {
            output_path,
            records: result.records,
            rows_read: result.rows_read,
            rows_skipped: result.rows_skipped,
        })
    }
}
