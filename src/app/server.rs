use crate::app::render::ChartRenderer;
use crate::core::engine::ChartEngine;
use crate::core::Pipeline;
use crate::utils::error::ChartError;
use axum::{
    extract::State,
    http::StatusCode,
    response::{Html, IntoResponse, Response},
    routing::get,
    Json, Router,
};
use std::sync::Arc;
use tower_http::trace::TraceLayer;
use tracing::{error, info};

/// Built once at start-up; cloned cheaply into every request.
pub struct AppState<P: Pipeline> {
    engine: Arc<ChartEngine<P>>,
    renderer: Arc<ChartRenderer>,
}

impl<P: Pipeline> AppState<P> {
    pub fn new(engine: ChartEngine<P>, renderer: ChartRenderer) -> Self {
        Self {
            engine: Arc::new(engine),
            renderer: Arc::new(renderer),
        }
    }
}

impl<P: Pipeline> Clone for AppState<P> {
    fn clone(&self) -> Self {
        Self {
            engine: Arc::clone(&self.engine),
            renderer: Arc::clone(&self.renderer),
        }
    }
}

pub struct ServerError(ChartError);

impl IntoResponse for ServerError {
    fn into_response(self) -> Response {
        error!(
            "❌ Chart request failed: {} (Category: {:?}, Severity: {:?})",
            self.0,
            self.0.category(),
            self.0.severity()
        );
        let body = serde_json::json!({
            "error": self.0.user_friendly_message(),
            "category": format!("{:?}", self.0.category()),
            "suggestion": self.0.recovery_suggestion(),
        });
        (StatusCode::INTERNAL_SERVER_ERROR, Json(body)).into_response()
    }
}

impl From<ChartError> for ServerError {
    fn from(err: ChartError) -> Self {
        Self(err)
    }
}

pub fn router<P: Pipeline + 'static>(state: AppState<P>) -> Router {
    Router::new()
        .route("/", get(index_handler::<P>))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn index_handler<P: Pipeline + 'static>(
    State(state): State<AppState<P>>,
) -> Result<Html<String>, ServerError> {
    let chart = state.engine.run().await?;
    let page = state.renderer.render(&chart)?;
    Ok(Html(page))
}

/// Binds `addr` and serves until Ctrl-C.
pub async fn serve<P: Pipeline + 'static>(addr: &str, state: AppState<P>) -> anyhow::Result<()> {
    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!("🚀 Chart server listening at http://{}", listener.local_addr()?);

    axum::serve(listener, router(state))
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("👋 Chart server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        error!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::storage::LocalStorage;
    use crate::core::pipeline::YearChartPipeline;
    use crate::core::ConfigProvider;
    use crate::domain::model::ChartStyle;
    use axum::body::{to_bytes, Body};
    use axum::http::Request;
    use tempfile::TempDir;
    use tower::ServiceExt;

    struct TestConfig;

    impl ConfigProvider for TestConfig {
        fn dataset_path(&self) -> &str {
            "sets.csv"
        }

        fn year_threshold(&self) -> i32 {
            2000
        }

        fn chart_style(&self) -> ChartStyle {
            ChartStyle::default()
        }
    }

    fn app_for(dir: &TempDir) -> Router {
        let pipeline = YearChartPipeline::new(LocalStorage::new(dir.path()), TestConfig);
        let state = AppState::new(ChartEngine::new(pipeline), ChartRenderer::new().unwrap());
        router(state)
    }

    async fn get_page(app: Router, uri: &str) -> (StatusCode, String) {
        let response = app
            .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
            .await
            .unwrap();
        let status = response.status();
        let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, String::from_utf8(body.to_vec()).unwrap())
    }

    #[tokio::test]
    async fn test_index_renders_chart() {
        let dir = TempDir::new().unwrap();
        std::fs::write(
            dir.path().join("sets.csv"),
            "set_num,name,year\n1-1,A,1999\n2-1,B,2000\n3-1,C,2000\n4-1,D,2001\n",
        )
        .unwrap();

        let (status, body) = get_page(app_for(&dir), "/").await;

        assert_eq!(status, StatusCode::OK);
        assert!(body.contains("Lego sets per year"));
        assert!(body.contains(r#""x":[2000,2001]"#));
        assert!(body.contains(r#""y":[2,1]"#));
        assert!(body.contains(r#""range":[0,102]"#));
    }

    #[tokio::test]
    async fn test_index_with_no_recent_rows_renders_empty_chart() {
        let dir = TempDir::new().unwrap();
        std::fs::write(dir.path().join("sets.csv"), "name,year\nA,1970\n").unwrap();

        let (status, body) = get_page(app_for(&dir), "/").await;

        assert_eq!(status, StatusCode::OK);
        assert!(body.contains(r#""x":[]"#));
        assert!(body.contains(r#""range":[0,100]"#));
    }

    #[tokio::test]
    async fn test_missing_dataset_is_server_error() {
        let dir = TempDir::new().unwrap();

        let (status, body) = get_page(app_for(&dir), "/").await;

        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        let json: serde_json::Value = serde_json::from_str(&body).unwrap();
        assert_eq!(json["category"], "Dataset");
    }

    #[tokio::test]
    async fn test_bad_year_is_server_error_with_diagnostic() {
        let dir = TempDir::new().unwrap();
        std::fs::write(dir.path().join("sets.csv"), "name,year\nA,2001\nB,n/a\n").unwrap();

        let (status, body) = get_page(app_for(&dir), "/").await;

        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        let json: serde_json::Value = serde_json::from_str(&body).unwrap();
        assert_eq!(json["category"], "DataFormat");
        let message = json["error"].as_str().unwrap();
        assert!(message.contains("line 3"));
        assert!(message.contains("n/a"));
    }

    #[tokio::test]
    async fn test_unknown_path_is_not_found() {
        let dir = TempDir::new().unwrap();

        let (status, _) = get_page(app_for(&dir), "/charts").await;

        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_post_is_not_allowed() {
        let dir = TempDir::new().unwrap();

        let response = app_for(&dir)
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::METHOD_NOT_ALLOWED);
    }
}
