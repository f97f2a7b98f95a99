use clap::Parser;
use lego_sets_chart::config::toml_config::TomlConfig;
use lego_sets_chart::core::ConfigProvider;
use lego_sets_chart::utils::error::{ChartError, ErrorSeverity};
use lego_sets_chart::utils::{logger, validation::Validate};
use lego_sets_chart::{
    serve, AppState, ChartEngine, ChartRenderer, LocalStorage, ServerSettings, YearChartPipeline,
};

#[derive(Parser)]
#[command(name = "toml-chart")]
#[command(about = "Lego sets chart server with TOML configuration support")]
struct Args {
    /// Path to TOML configuration file
    #[arg(short, long, default_value = "chart-config.toml")]
    config: String,

    /// Enable verbose output
    #[arg(short, long)]
    verbose: bool,

    /// Override the listening port from config
    #[arg(long)]
    port: Option<u16>,

    /// Override monitoring setting from config
    #[arg(long)]
    monitor: Option<bool>,

    /// Build the chart once and print its JSON instead of serving
    #[arg(long)]
    dry_run: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    // 載入 TOML 配置
    let config = match TomlConfig::from_file(&args.config) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("❌ Failed to load config file '{}': {}", args.config, e);
            eprintln!("💡 Make sure the file exists and is valid TOML format");
            std::process::exit(1);
        }
    };

    // 初始化日誌
    match config.log_format() {
        Some("json") => logger::init_json_logger(args.verbose),
        _ => logger::init_cli_logger(args.verbose),
    }

    tracing::info!("🚀 Starting TOML-based chart server");
    tracing::info!("📁 Loaded configuration from: {}", args.config);

    // 驗證配置
    if let Err(e) = config.validate() {
        tracing::error!("❌ Configuration validation failed: {}", e);
        tracing::error!("💡 Suggestion: {}", e.recovery_suggestion());
        eprintln!("❌ {}", e.user_friendly_message());
        std::process::exit(1);
    }

    let mut settings = config.server_settings();
    if let Some(port) = args.port {
        settings.port = port;
        tracing::info!("🔧 Port overridden to: {}", port);
    }

    let monitor_enabled = args.monitor.unwrap_or_else(|| config.monitoring_enabled());
    if monitor_enabled {
        tracing::info!("🔍 System monitoring enabled");
    }

    display_config_summary(&config, &settings, &args);

    let renderer = ChartRenderer::from_optional_file(settings.template_path.as_deref())
        .unwrap_or_else(|e| exit_with(e));

    let pipeline = YearChartPipeline::new(LocalStorage::current_dir(), config);
    let engine = ChartEngine::new_with_monitoring(pipeline, monitor_enabled);

    if args.dry_run {
        tracing::info!("🔍 DRY RUN MODE - building the chart once without serving");
        match engine.run_json().await {
            Ok(json) => {
                println!("{}", json);
                return Ok(());
            }
            Err(e) => exit_with(e),
        }
    }

    serve(&settings.bind_address(), AppState::new(engine, renderer)).await
}

fn exit_with(e: ChartError) -> ! {
    // 記錄詳細錯誤信息
    tracing::error!(
        "❌ Chart server failed: {} (Category: {:?}, Severity: {:?})",
        e,
        e.category(),
        e.severity()
    );
    tracing::error!("💡 Recovery suggestion: {}", e.recovery_suggestion());

    // 輸出用戶友好的錯誤信息
    eprintln!("❌ {}", e.user_friendly_message());
    eprintln!("💡 建議: {}", e.recovery_suggestion());

    // 根據錯誤嚴重程度決定退出碼
    let exit_code = match e.severity() {
        ErrorSeverity::High => 1,
        ErrorSeverity::Medium => 2,
        ErrorSeverity::Critical => 3,
    };
    std::process::exit(exit_code);
}

fn display_config_summary(config: &TomlConfig, settings: &ServerSettings, args: &Args) {
    let style = config.chart_style();

    eprintln!("📋 Configuration Summary:");
    eprintln!("  Listen: {}", settings.bind_address());
    eprintln!("  Dataset: {}", config.dataset_path());
    eprintln!("  Year threshold: {}", config.year_threshold());
    eprintln!("  Chart title: {}", style.title);
    eprintln!(
        "  Template: {}",
        settings.template_path.as_deref().unwrap_or("(built-in)")
    );
    eprintln!("  Log format: {}", config.log_format().unwrap_or("compact"));

    if args.dry_run {
        eprintln!("  🔍 DRY RUN MODE ENABLED");
    }

    eprintln!();
}
