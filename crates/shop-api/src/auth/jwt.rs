//! JWT 토큰 발급 및 검증.
//!
//! 서명 키는 시작 시 설정에서 한 번 로드되어 프로세스 수명 동안 유지됩니다.

use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};
use shop_core::{AuthConfig, Role, UserId};

/// JWT 페이로드.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    /// Subject - 사용자 ID
    pub sub: String,
    /// 사용자 이메일
    pub email: String,
    /// 사용자 역할
    pub role: Role,
    /// Issued At (Unix timestamp)
    pub iat: i64,
    /// Expiration (Unix timestamp)
    pub exp: i64,
    /// JWT ID
    pub jti: String,
}

impl Claims {
    fn new(
        sub: impl Into<String>,
        email: impl Into<String>,
        role: Role,
        issued_at: DateTime<Utc>,
        ttl: Duration,
    ) -> Self {
        Self {
            sub: sub.into(),
            email: email.into(),
            role,
            iat: issued_at.timestamp(),
            exp: (issued_at + ttl).timestamp(),
            jti: uuid::Uuid::new_v4().to_string(),
        }
    }
}

/// 토큰 에러.
///
/// 검증 실패는 원인(서명, 형식, 만료)과 무관하게 `InvalidToken` 하나로 접힙니다.
#[derive(Debug, thiserror::Error)]
pub enum TokenError {
    #[error("토큰 인코딩 실패: {0}")]
    Encoding(#[from] jsonwebtoken::errors::Error),
    #[error("유효하지 않은 토큰")]
    InvalidToken,
}

/// 토큰 서비스.
///
/// HS256 서명, 고정 유효 시간. 만료 검사에 여유 시간(leeway)을 두지 않습니다.
pub struct TokenService {
    secret: SecretString,
    ttl: Duration,
    validation: Validation,
}

impl TokenService {
    /// 설정 값에서 토큰 서비스 생성.
    pub fn new(config: &AuthConfig) -> Self {
        Self::with_ttl(config.jwt_secret.clone(), Duration::hours(config.token_ttl_hours))
    }

    /// 서명 키와 유효 시간을 직접 지정하여 생성.
    pub fn with_ttl(secret: impl Into<String>, ttl: Duration) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.leeway = 0;
        validation.validate_exp = true;
        validation.set_required_spec_claims(&["exp", "sub"]);

        let secret: String = secret.into();
        Self {
            secret: SecretString::new(secret.into_boxed_str()),
            ttl,
            validation,
        }
    }

    /// 토큰 유효 시간.
    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    /// 새 토큰 발급.
    pub fn issue(&self, user_id: UserId, email: &str, role: Role) -> Result<String, TokenError> {
        self.issue_at(user_id, email, role, Utc::now())
    }

    /// 지정한 시각 기준으로 토큰 발급.
    pub fn issue_at(
        &self,
        user_id: UserId,
        email: &str,
        role: Role,
        issued_at: DateTime<Utc>,
    ) -> Result<String, TokenError> {
        let claims = Claims::new(user_id.to_string(), email, role, issued_at, self.ttl);
        self.encode(&claims)
    }

    /// 같은 사용자 정보로 새 토큰 재발급 (iat/exp/jti 갱신).
    pub fn reissue(&self, claims: &Claims) -> Result<String, TokenError> {
        let fresh = Claims::new(
            claims.sub.clone(),
            claims.email.clone(),
            claims.role,
            Utc::now(),
            self.ttl,
        );
        self.encode(&fresh)
    }

    /// 토큰 서명 및 만료 검증.
    pub fn verify(&self, token: &str) -> Result<Claims, TokenError> {
        decode::<Claims>(token, &self.decoding_key(), &self.validation)
            .map(|data| data.claims)
            .map_err(|e| {
                tracing::debug!(kind = ?e.kind(), "Token verification failed");
                TokenError::InvalidToken
            })
    }

    fn encode(&self, claims: &Claims) -> Result<String, TokenError> {
        let key = EncodingKey::from_secret(self.secret.expose_secret().as_bytes());
        encode(&Header::new(Algorithm::HS256), claims, &key).map_err(TokenError::from)
    }

    fn decoding_key(&self) -> DecodingKey {
        DecodingKey::from_secret(self.secret.expose_secret().as_bytes())
    }
}
