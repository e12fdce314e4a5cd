//! 온라인 스토어 REST API 서버.
//!
//! 이 크레이트는 다음을 제공합니다:
//! - Axum 기반 REST API (가입, 로그인, 세션 갱신, 역할 변경)
//! - JWT 인증 및 역할 기반 접근 제어
//! - 헬스 체크 엔드포인트
//! - Prometheus 메트릭
//!
//! # 모듈 구성
//!
//! - [`state`]: 애플리케이션 공유 상태 (AppState)
//! - [`routes`]: REST API 엔드포인트
//! - [`auth`]: 토큰, 비밀번호, 미들웨어, 사용자 서비스
//! - [`repository`]: 사용자 저장소 구현 (PostgreSQL, 인메모리)
//! - [`metrics`]: Prometheus 메트릭 수집
//! - [`middleware`]: HTTP 미들웨어

pub mod auth;
pub mod error;
pub mod metrics;
pub mod middleware;
pub mod repository;
pub mod routes;
pub mod state;

pub use auth::{AuthError, Claims, JwtAuth, TokenService, UserService};
pub use error::ApiErrorResponse;
pub use metrics::setup_metrics_recorder;
pub use middleware::metrics_layer;
pub use repository::{InMemoryUserStore, PgUserStore};
pub use routes::create_api_router;
pub use state::AppState;
#[cfg(any(test, feature = "test-utils"))]
pub use state::create_test_state;
