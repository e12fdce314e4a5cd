//! 온라인 스토어 API 서버.
//!
//! 설정을 로드하고 저장소를 준비한 뒤 Axum 서버를 시작합니다.

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use axum::{http::StatusCode, middleware, routing::get, Router};
use metrics_exporter_prometheus::PrometheusHandle;
use sqlx::postgres::PgPoolOptions;
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;
use tracing::{info, warn};

use shop_api::metrics::setup_metrics_recorder;
use shop_api::middleware::metrics_layer;
use shop_api::repository::{InMemoryUserStore, PgUserStore};
use shop_api::routes::create_api_router;
use shop_api::state::AppState;
use shop_core::{init_logging, AppConfig, DatabaseConfig, UserStore};

/// 저장소 준비.
///
/// `DATABASE_URL`이 있으면 PostgreSQL에 연결하고 마이그레이션을 적용합니다.
/// 없으면 인메모리 저장소로 동작합니다 (재시작 시 데이터 소실).
async fn create_user_store(
    config: &DatabaseConfig,
) -> Result<(Arc<dyn UserStore>, Option<sqlx::PgPool>), Box<dyn std::error::Error>> {
    let Some(database_url) = &config.url else {
        warn!("DATABASE_URL not set, using in-memory user store");
        return Ok((Arc::new(InMemoryUserStore::new()), None));
    };

    let pool = PgPoolOptions::new()
        .max_connections(config.max_connections)
        .acquire_timeout(Duration::from_secs(config.connection_timeout_secs))
        .connect(database_url)
        .await?;
    info!("Connected to PostgreSQL");

    sqlx::migrate!("../../migrations").run(&pool).await?;
    info!("Database migrations applied");

    Ok((Arc::new(PgUserStore::new(pool.clone())), Some(pool)))
}

/// /metrics 엔드포인트 핸들러.
async fn metrics_handler(
    axum::extract::State(handle): axum::extract::State<PrometheusHandle>,
) -> String {
    handle.render()
}

/// 전체 라우터 생성.
fn create_router(state: Arc<AppState>, metrics_handle: PrometheusHandle) -> Router {
    // 메트릭 라우터 (별도 상태)
    let metrics_router = Router::new()
        .route("/metrics", get(metrics_handler))
        .with_state(metrics_handle);

    let api_router = create_api_router(state.clone()).with_state(state);

    Router::new()
        .merge(metrics_router)
        .merge(api_router)
        // 메트릭 미들웨어 (모든 요청에 적용)
        .layer(middleware::from_fn(metrics_layer))
        .layer(TraceLayer::new_for_http())
        // 전역 타임아웃 (30초) - 408 상태 코드 반환
        .layer(TimeoutLayer::with_status_code(
            StatusCode::REQUEST_TIMEOUT,
            Duration::from_secs(30),
        ))
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // .env 파일 로드 (있는 경우)
    let _ = dotenvy::dotenv();

    // 서명 키가 없으면 여기서 종료
    let config = AppConfig::load_default()?;
    init_logging(&config.logging)?;

    let metrics_handle = setup_metrics_recorder()?;
    info!("Prometheus metrics recorder initialized");

    let (store, db_pool) = create_user_store(&config.database).await?;

    let mut state = AppState::new(&config.auth, store);
    if let Some(pool) = db_pool {
        state = state.with_db_pool(pool);
    }
    info!(
        version = %state.version,
        token_ttl_hours = state.tokens.ttl().num_hours(),
        "Application state initialized"
    );

    let app = create_router(Arc::new(state), metrics_handle);

    let addr: SocketAddr = format!("{}:{}", config.server.host, config.server.port).parse()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!(%addr, "API server listening");
    info!("Metrics available at http://{}/metrics", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server stopped gracefully");
    Ok(())
}

/// Graceful shutdown 시그널 대기.
///
/// Ctrl+C 또는 SIGTERM 시그널을 수신하면 반환합니다.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            warn!(error = %e, "Failed to install Ctrl+C handler");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                warn!(error = %e, "Failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            warn!("Received Ctrl+C, initiating graceful shutdown...");
        }
        _ = terminate => {
            warn!("Received SIGTERM, initiating graceful shutdown...");
        }
    }
}
