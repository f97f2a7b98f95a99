pub mod aggregator;
pub mod chart;
pub mod engine;
pub mod loader;
pub mod pipeline;

pub use crate::domain::model::{ChartDescription, Dataset, Row, YearCount};
pub use crate::domain::ports::{ConfigProvider, Pipeline, Storage};
pub use crate::utils::error::Result;
