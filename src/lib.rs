pub mod app;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::CliConfig;
pub use config::{storage::LocalStorage, ServerSettings};

pub use app::render::ChartRenderer;
pub use app::server::{router, serve, AppState};
pub use core::{engine::ChartEngine, pipeline::YearChartPipeline};
pub use utils::error::{ChartError, Result};
