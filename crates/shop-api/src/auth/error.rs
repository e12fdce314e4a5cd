//! 인증/인가 에러.
//!
//! 클라이언트에 노출되는 실패 종류와 HTTP 상태 코드 매핑.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use shop_core::StoreError;

use super::{PasswordError, TokenError};
use crate::error::ApiErrorResponse;

/// 인증/인가 에러.
#[derive(Debug, thiserror::Error)]
pub enum AuthError {
    /// 토큰 없음, 형식 오류, 검증 실패
    #[error("인증이 필요합니다")]
    Unauthorized,
    /// 인증은 되었으나 권한 부족
    #[error("접근 권한이 없습니다")]
    Forbidden,
    /// 이미 등록된 이메일
    #[error("이미 등록된 이메일입니다")]
    DuplicateUser,
    /// 잘못된 가입 입력
    #[error("{0}")]
    Validation(String),
    /// 로그인 실패 (계정 존재 여부를 드러내지 않음)
    #[error("이메일 또는 비밀번호가 올바르지 않습니다")]
    InvalidCredentials,
    /// 대상 사용자 없음
    #[error("사용자를 찾을 수 없습니다")]
    NotFound,
    /// 저장소/내부 장애 (원인은 로그로만 남김)
    #[error("내부 서버 에러: {0}")]
    Internal(String),
}

impl AuthError {
    /// HTTP 상태 코드와 에러 코드.
    pub fn status_and_code(&self) -> (StatusCode, &'static str) {
        match self {
            AuthError::Unauthorized => (StatusCode::UNAUTHORIZED, "UNAUTHORIZED"),
            AuthError::Forbidden => (StatusCode::FORBIDDEN, "FORBIDDEN"),
            AuthError::DuplicateUser => (StatusCode::CONFLICT, "DUPLICATE_USER"),
            AuthError::Validation(_) => (StatusCode::BAD_REQUEST, "VALIDATION_ERROR"),
            AuthError::InvalidCredentials => (StatusCode::UNAUTHORIZED, "INVALID_CREDENTIALS"),
            AuthError::NotFound => (StatusCode::NOT_FOUND, "NOT_FOUND"),
            AuthError::Internal(_) => (StatusCode::INTERNAL_SERVER_ERROR, "INTERNAL_ERROR"),
        }
    }
}

impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        let (status, code) = self.status_and_code();

        let message = match &self {
            AuthError::Internal(cause) => {
                tracing::error!(error = %cause, "Request failed with internal error");
                "내부 서버 에러".to_string()
            }
            other => other.to_string(),
        };

        (status, Json(ApiErrorResponse::new(code, message))).into_response()
    }
}

impl From<StoreError> for AuthError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::DuplicateEmail(_) => AuthError::DuplicateUser,
            StoreError::Backend(cause) => AuthError::Internal(cause),
        }
    }
}

impl From<TokenError> for AuthError {
    fn from(err: TokenError) -> Self {
        match err {
            TokenError::InvalidToken => AuthError::Unauthorized,
            TokenError::Encoding(e) => AuthError::Internal(e.to_string()),
        }
    }
}

impl From<PasswordError> for AuthError {
    fn from(err: PasswordError) -> Self {
        AuthError::Internal(err.to_string())
    }
}
