//! 설정 관리.
//!
//! 기본값 → 설정 파일 → `SHOP__*` 환경 변수 → 관용 환경 변수
//! (`SECRET_KEY`, `DATABASE_URL`, `PORT`) 순으로 덮어씁니다.

use config::{builder::DefaultState, ConfigBuilder, ConfigError, Environment, File, FileFormat};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;

/// 애플리케이션 설정.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct AppConfig {
    /// 서버 설정
    pub server: ServerConfig,
    /// 데이터베이스 설정
    pub database: DatabaseConfig,
    /// 인증 설정
    pub auth: AuthConfig,
    /// 로깅 설정
    pub logging: LoggingConfig,
}

/// 서버 설정.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ServerConfig {
    /// 바인딩할 호스트
    pub host: String,
    /// 리스닝할 포트
    pub port: u16,
}

/// 데이터베이스 설정.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct DatabaseConfig {
    /// PostgreSQL 접속 URL. 없으면 메모리 저장소로 동작합니다.
    #[serde(default)]
    pub url: Option<String>,
    /// 최대 연결 수
    pub max_connections: u32,
    /// 연결 획득 타임아웃 (초)
    pub connection_timeout_secs: u64,
}

/// 인증 설정.
#[derive(Clone, Deserialize, Serialize)]
pub struct AuthConfig {
    /// 토큰 서명 비밀 키
    pub jwt_secret: String,
    /// 토큰 유효 시간 (시간)
    pub token_ttl_hours: i64,
    /// 비밀번호 최소 길이
    pub min_password_length: usize,
}

impl fmt::Debug for AuthConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AuthConfig")
            .field("jwt_secret", &"[REDACTED]")
            .field("token_ttl_hours", &self.token_ttl_hours)
            .field("min_password_length", &self.min_password_length)
            .finish()
    }
}

impl AuthConfig {
    /// 테스트 등에서 직접 구성할 때 사용하는 생성자.
    pub fn new(jwt_secret: impl Into<String>) -> Self {
        Self {
            jwt_secret: jwt_secret.into(),
            token_ttl_hours: 24,
            min_password_length: 6,
        }
    }
}

/// 로깅 설정.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct LoggingConfig {
    /// 로그 레벨 필터
    pub level: String,
    /// 로그 형식 (pretty, json, compact)
    pub format: String,
}

impl AppConfig {
    /// 파일과 환경 변수에서 설정을 로드합니다.
    ///
    /// 설정 파일은 없어도 됩니다. 서명 비밀 키가 비어 있으면 에러입니다.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let builder = Self::defaults()?
            .add_source(File::from(path.as_ref()).required(false))
            .add_source(
                Environment::with_prefix("SHOP")
                    .separator("__")
                    .try_parsing(true),
            )
            .set_override_option("auth.jwt_secret", std::env::var("SECRET_KEY").ok())?
            .set_override_option("database.url", std::env::var("DATABASE_URL").ok())?
            .set_override_option("server.port", std::env::var("PORT").ok())?;

        let config: Self = builder.build()?.try_deserialize()?;
        config.validate()?;
        Ok(config)
    }

    /// 기본 경로에서 설정을 로드합니다.
    ///
    /// `SHOP_CONFIG` 환경 변수로 경로를 바꿀 수 있습니다.
    pub fn load_default() -> Result<Self, ConfigError> {
        let path =
            std::env::var("SHOP_CONFIG").unwrap_or_else(|_| "config/default.toml".to_string());
        Self::load(path)
    }

    /// TOML 문자열에서 설정을 로드합니다 (환경 변수 미적용).
    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        let config: Self = Self::defaults()?
            .add_source(File::from_str(content, FileFormat::Toml))
            .build()?
            .try_deserialize()?;
        config.validate()?;
        Ok(config)
    }

    fn defaults() -> Result<ConfigBuilder<DefaultState>, ConfigError> {
        config::Config::builder()
            .set_default("server.host", "127.0.0.1")?
            .set_default("server.port", 5000_i64)?
            .set_default("database.max_connections", 10_i64)?
            .set_default("database.connection_timeout_secs", 10_i64)?
            .set_default("auth.jwt_secret", "")?
            .set_default("auth.token_ttl_hours", 24_i64)?
            .set_default("auth.min_password_length", 6_i64)?
            .set_default("logging.level", "info")?
            .set_default("logging.format", "pretty")
    }

    /// 시작 시점에 치명적인 설정 누락을 검사합니다.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.auth.jwt_secret.trim().is_empty() {
            return Err(ConfigError::Message(
                "토큰 서명 키가 없습니다. SECRET_KEY 또는 SHOP__AUTH__JWT_SECRET을 설정하세요"
                    .to_string(),
            ));
        }
        if self.auth.token_ttl_hours <= 0 {
            return Err(ConfigError::Message(
                "auth.token_ttl_hours는 0보다 커야 합니다".to_string(),
            ));
        }
        if self.auth.min_password_length == 0 {
            return Err(ConfigError::Message(
                "auth.min_password_length는 1 이상이어야 합니다".to_string(),
            ));
        }
        Ok(())
    }
}
