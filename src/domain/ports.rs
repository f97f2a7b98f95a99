use crate::domain::model::{ChartDescription, ChartStyle, Dataset, YearCount};
use crate::utils::error::Result;
use async_trait::async_trait;

pub trait Storage: Send + Sync {
    fn read_file(&self, path: &str) -> impl std::future::Future<Output = Result<Vec<u8>>> + Send;
}

pub trait ConfigProvider: Send + Sync {
    fn dataset_path(&self) -> &str;
    fn year_threshold(&self) -> i32;
    fn chart_style(&self) -> ChartStyle;
}

#[async_trait]
pub trait Pipeline: Send + Sync {
    async fn load_dataset(&self) -> Result<Dataset>;
    async fn aggregate(&self, dataset: Dataset) -> Result<Vec<YearCount>>;
    async fn build_chart(&self, counts: Vec<YearCount>) -> Result<ChartDescription>;
}
