use crate::core::aggregator::count_by_year;
use crate::core::chart::build_bar_chart;
use crate::core::loader::parse_dataset;
use crate::core::{ChartDescription, ConfigProvider, Dataset, Pipeline, Storage, YearCount};
use crate::utils::error::Result;

/// Reads the dataset through `S` on every call and turns it into a chart
/// using the settings of `C`. Holds no per-request state.
pub struct YearChartPipeline<S: Storage, C: ConfigProvider> {
    storage: S,
    config: C,
}

impl<S: Storage, C: ConfigProvider> YearChartPipeline<S, C> {
    pub fn new(storage: S, config: C) -> Self {
        Self { storage, config }
    }
}

#[async_trait::async_trait]
impl<S: Storage, C: ConfigProvider> Pipeline for YearChartPipeline<S, C> {
    async fn load_dataset(&self) -> Result<Dataset> {
        let path = self.config.dataset_path();
        tracing::debug!("Reading dataset from: {}", path);

        let bytes = self.storage.read_file(path).await?;
        tracing::debug!("Read {} bytes", bytes.len());

        parse_dataset(&bytes)
    }

    async fn aggregate(&self, dataset: Dataset) -> Result<Vec<YearCount>> {
        let threshold = self.config.year_threshold();
        let counts = count_by_year(&dataset, threshold);

        if counts.is_empty() {
            tracing::warn!(
                "No rows with year >= {} among {} rows, rendering an empty chart",
                threshold,
                dataset.len()
            );
        }

        Ok(counts)
    }

    async fn build_chart(&self, counts: Vec<YearCount>) -> Result<ChartDescription> {
        Ok(build_bar_chart(&counts, &self.config.chart_style()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::model::ChartStyle;
    use crate::utils::error::ChartError;
    use std::collections::HashMap;
    use std::sync::Arc;
    use tokio::sync::Mutex;

    #[derive(Clone)]
    struct MockStorage {
        files: Arc<Mutex<HashMap<String, Vec<u8>>>>,
        reads: Arc<Mutex<usize>>,
    }

    impl MockStorage {
        fn new() -> Self {
            Self {
                files: Arc::new(Mutex::new(HashMap::new())),
                reads: Arc::new(Mutex::new(0)),
            }
        }

        async fn put_file(&self, path: &str, data: &str) {
            let mut files = self.files.lock().await;
            files.insert(path.to_string(), data.as_bytes().to_vec());
        }

        async fn read_count(&self) -> usize {
            *self.reads.lock().await
        }
    }

    impl Storage for MockStorage {
        async fn read_file(&self, path: &str) -> Result<Vec<u8>> {
            *self.reads.lock().await += 1;
            let files = self.files.lock().await;
            files
                .get(path)
                .cloned()
                .ok_or_else(|| ChartError::DatasetNotFound {
                    path: path.to_string(),
                    source: std::io::Error::new(
                        std::io::ErrorKind::NotFound,
                        format!("File not found: {}", path),
                    ),
                })
        }
    }

    struct MockConfig {
        dataset_path: String,
        year_threshold: i32,
    }

    impl MockConfig {
        fn new() -> Self {
            Self {
                dataset_path: "sets.csv".to_string(),
                year_threshold: 2000,
            }
        }
    }

    impl ConfigProvider for MockConfig {
        fn dataset_path(&self) -> &str {
            &self.dataset_path
        }

        fn year_threshold(&self) -> i32 {
            self.year_threshold
        }

        fn chart_style(&self) -> ChartStyle {
            ChartStyle::default()
        }
    }

    #[tokio::test]
    async fn test_load_dataset_reads_configured_path() {
        let storage = MockStorage::new();
        storage
            .put_file("sets.csv", "set_num,name,year\n1-1,A,1999\n2-1,B,2000\n")
            .await;
        let pipeline = YearChartPipeline::new(storage, MockConfig::new());

        let dataset = pipeline.load_dataset().await.unwrap();

        assert_eq!(dataset, Dataset::from_years([1999, 2000]));
    }

    #[tokio::test]
    async fn test_load_dataset_missing_file() {
        let pipeline = YearChartPipeline::new(MockStorage::new(), MockConfig::new());

        let err = pipeline.load_dataset().await.unwrap_err();

        assert!(matches!(err, ChartError::DatasetNotFound { .. }));
    }

    #[tokio::test]
    async fn test_every_load_rereads_storage() {
        let storage = MockStorage::new();
        storage.put_file("sets.csv", "year\n2001\n").await;
        let pipeline = YearChartPipeline::new(storage.clone(), MockConfig::new());

        pipeline.load_dataset().await.unwrap();
        storage.put_file("sets.csv", "year\n2001\n2002\n").await;
        let second = pipeline.load_dataset().await.unwrap();

        assert_eq!(storage.read_count().await, 2);
        assert_eq!(second.len(), 2);
    }

    #[tokio::test]
    async fn test_aggregate_uses_configured_threshold() {
        let config = MockConfig {
            year_threshold: 2010,
            ..MockConfig::new()
        };
        let pipeline = YearChartPipeline::new(MockStorage::new(), config);

        let counts = pipeline
            .aggregate(Dataset::from_years([2000, 2010, 2011, 2011]))
            .await
            .unwrap();

        assert_eq!(
            counts,
            vec![
                YearCount { year: 2010, count: 1 },
                YearCount { year: 2011, count: 2 },
            ]
        );
    }

    #[tokio::test]
    async fn test_aggregate_empty_result_is_not_an_error() {
        let pipeline = YearChartPipeline::new(MockStorage::new(), MockConfig::new());

        let counts = pipeline
            .aggregate(Dataset::from_years([1980, 1990]))
            .await
            .unwrap();

        assert!(counts.is_empty());
    }

    #[tokio::test]
    async fn test_build_chart_applies_style() {
        let pipeline = YearChartPipeline::new(MockStorage::new(), MockConfig::new());

        let chart = pipeline
            .build_chart(vec![YearCount { year: 2000, count: 40 }])
            .await
            .unwrap();

        assert_eq!(chart.layout.title.text, "Lego sets per year");
        assert_eq!(chart.y_upper_bound(), 140);
    }
}
