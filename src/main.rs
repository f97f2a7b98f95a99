use clap::Parser;
use lego_sets_chart::utils::error::ErrorSeverity;
use lego_sets_chart::utils::{logger, validation::Validate};
use lego_sets_chart::{
    serve, AppState, ChartEngine, ChartRenderer, CliConfig, LocalStorage, YearChartPipeline,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = CliConfig::parse();

    // 初始化日誌
    logger::init_cli_logger(config.verbose);

    tracing::info!("Starting lego-chart");
    if config.verbose {
        tracing::debug!("CLI config: {:?}", config);
    }

    // 驗證配置
    if let Err(e) = config.validate() {
        tracing::error!("❌ Configuration validation failed: {}", e);
        tracing::error!("💡 Suggestion: {}", e.recovery_suggestion());
        eprintln!("❌ {}", e.user_friendly_message());
        std::process::exit(1);
    }

    let settings = config.server_settings();
    let renderer = match ChartRenderer::from_optional_file(settings.template_path.as_deref()) {
        Ok(renderer) => renderer,
        Err(e) => {
            tracing::error!(
                "❌ Template setup failed: {} (Category: {:?}, Severity: {:?})",
                e,
                e.category(),
                e.severity()
            );
            eprintln!("❌ {}", e.user_friendly_message());
            eprintln!("💡 建議: {}", e.recovery_suggestion());
            std::process::exit(match e.severity() {
                ErrorSeverity::Critical => 3,
                _ => 1,
            });
        }
    };

    let monitor_enabled = config.monitor;
    if monitor_enabled {
        tracing::info!("🔍 System monitoring enabled");
    }

    tracing::info!(
        "📁 Serving chart for {} (years >= {})",
        config.dataset_path,
        config.year_threshold
    );

    let pipeline = YearChartPipeline::new(LocalStorage::current_dir(), config);
    let engine = ChartEngine::new_with_monitoring(pipeline, monitor_enabled);

    serve(&settings.bind_address(), AppState::new(engine, renderer)).await
}
