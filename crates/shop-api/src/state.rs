//! 모든 핸들러에서 공유되는 애플리케이션 상태.
//!
//! Arc로 래핑되어 여러 요청 간에 공유됩니다. 요청 처리 중에는 변경되지 않습니다.

use std::sync::Arc;

use shop_core::{AuthConfig, UserStore};

use crate::auth::{TokenService, UserService};

/// 애플리케이션 공유 상태.
#[derive(Clone)]
pub struct AppState {
    /// 사용자 서비스 - 가입, 로그인, 세션 갱신, 역할 변경
    pub users: Arc<UserService>,

    /// 토큰 서비스 - 인증 미들웨어에서 토큰 검증
    pub tokens: Arc<TokenService>,

    /// 데이터베이스 연결 풀 (인메모리 저장소 사용 시 None)
    pub db_pool: Option<sqlx::PgPool>,

    /// 서버 시작 시간 (업타임 계산용)
    pub started_at: chrono::DateTime<chrono::Utc>,

    /// API 버전
    pub version: String,
}

impl AppState {
    /// 새로운 AppState 생성.
    ///
    /// # 인자
    /// * `auth` - 서명 키, 토큰 유효 시간, 비밀번호 정책
    /// * `store` - 사용자 저장소
    pub fn new(auth: &AuthConfig, store: Arc<dyn UserStore>) -> Self {
        let tokens = Arc::new(TokenService::new(auth));
        let users = Arc::new(UserService::new(
            store,
            tokens.clone(),
            auth.min_password_length,
        ));

        Self {
            users,
            tokens,
            db_pool: None,
            started_at: chrono::Utc::now(),
            version: env!("CARGO_PKG_VERSION").to_string(),
        }
    }

    /// 데이터베이스 연결 풀 설정.
    pub fn with_db_pool(mut self, pool: sqlx::PgPool) -> Self {
        self.db_pool = Some(pool);
        self
    }

    /// 서버 업타임(초).
    pub fn uptime_secs(&self) -> i64 {
        (chrono::Utc::now() - self.started_at).num_seconds()
    }

    /// 데이터베이스 연결 상태 확인.
    pub async fn is_db_healthy(&self) -> bool {
        if let Some(pool) = &self.db_pool {
            sqlx::query("SELECT 1").fetch_one(pool).await.is_ok()
        } else {
            false
        }
    }
}

/// 테스트용 AppState 생성 (인메모리 저장소).
#[cfg(any(test, feature = "test-utils"))]
pub fn create_test_state() -> AppState {
    use crate::repository::InMemoryUserStore;

    let auth = AuthConfig::new("test-secret-key-for-integration-tests");
    AppState::new(&auth, Arc::new(InMemoryUserStore::new()))
}
