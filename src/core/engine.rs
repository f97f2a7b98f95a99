use crate::core::{ChartDescription, Pipeline};
use crate::utils::error::Result;
use crate::utils::monitor::SystemMonitor;
use std::time::Instant;

pub struct ChartEngine<P: Pipeline> {
    pipeline: P,
    monitor: SystemMonitor,
}

impl<P: Pipeline> ChartEngine<P> {
    pub fn new(pipeline: P) -> Self {
        Self::new_with_monitoring(pipeline, false)
    }

    pub fn new_with_monitoring(pipeline: P, monitor_enabled: bool) -> Self {
        Self {
            pipeline,
            monitor: SystemMonitor::new(monitor_enabled),
        }
    }

    /// Runs load → aggregate → build for one request.
    pub async fn run(&self) -> Result<ChartDescription> {
        let started = Instant::now();

        let dataset = self.pipeline.load_dataset().await?;
        tracing::debug!("Loaded {} rows", dataset.len());
        self.monitor.log_phase("load_dataset", started);

        let counts = self.pipeline.aggregate(dataset).await?;
        tracing::debug!("Aggregated into {} years", counts.len());
        self.monitor.log_phase("aggregate", started);

        let chart = self.pipeline.build_chart(counts).await?;
        self.monitor.log_phase("build_chart", started);

        tracing::info!(
            years = chart.data.first().map(|t| t.x.len()).unwrap_or(0),
            y_max = chart.y_upper_bound(),
            elapsed = ?started.elapsed(),
            "Chart built"
        );

        Ok(chart)
    }

    /// Runs once and returns the pretty-printed chart JSON, as printed by `--dry-run`.
    pub async fn run_json(&self) -> Result<String> {
        let chart = self.run().await?;
        Ok(serde_json::to_string_pretty(&chart)?)
    }
}
