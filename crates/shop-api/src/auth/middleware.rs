//! Axum용 JWT 인증/인가 미들웨어.
//!
//! - [`auth_middleware`]: Bearer 토큰 검증 후 `Claims`를 요청 extensions에 첨부
//! - [`role_middleware`]: 첨부된 `Claims`의 역할이 요구 역할과 같은지 확인
//! - [`JwtAuth`]: 핸들러에서 첨부된 `Claims`를 꺼내는 추출기

use std::sync::Arc;

use axum::{
    extract::{FromRequestParts, Request, State},
    http::{header::AUTHORIZATION, request::Parts, HeaderMap},
    middleware::Next,
    response::Response,
};
use shop_core::Role;

use super::{AuthError, Claims};
use crate::state::AppState;

/// JWT 인증 추출기.
///
/// [`auth_middleware`]가 첨부한 `Claims`를 꺼냅니다.
/// 미들웨어 없이 사용되면 `Unauthorized`로 거부합니다.
///
/// # 사용 예시
///
/// ```rust,ignore
/// async fn protected_handler(JwtAuth(claims): JwtAuth) -> impl IntoResponse {
///     format!("Authenticated user: {}", claims.email)
/// }
/// ```
#[derive(Debug, Clone)]
pub struct JwtAuth(pub Claims);

impl<S> FromRequestParts<S> for JwtAuth
where
    S: Send + Sync,
{
    type Rejection = AuthError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<Claims>()
            .cloned()
            .map(JwtAuth)
            .ok_or(AuthError::Unauthorized)
    }
}

/// `Authorization: Bearer <token>` 헤더에서 토큰 추출.
///
/// 헤더 없음, 다른 스킴, 빈 토큰은 모두 `None`.
pub fn bearer_token(headers: &HeaderMap) -> Option<&str> {
    let value = headers.get(AUTHORIZATION)?.to_str().ok()?;
    let (scheme, token) = value.split_once(' ')?;
    if !scheme.eq_ignore_ascii_case("Bearer") {
        return None;
    }

    let token = token.trim();
    (!token.is_empty()).then_some(token)
}

/// 인증 미들웨어.
///
/// 토큰이 유효하면 `Claims`를 extensions에 넣고 다음 핸들러를 실행합니다.
/// 그 외에는 핸들러를 실행하지 않고 401을 반환합니다.
pub async fn auth_middleware(
    State(state): State<Arc<AppState>>,
    mut request: Request,
    next: Next,
) -> Result<Response, AuthError> {
    let Some(token) = bearer_token(request.headers()) else {
        tracing::debug!(path = %request.uri().path(), "Missing or malformed Authorization header");
        return Err(AuthError::Unauthorized);
    };

    let claims = state.tokens.verify(token)?;
    request.extensions_mut().insert(claims);

    Ok(next.run(request).await)
}

/// 역할 미들웨어.
///
/// 반드시 [`auth_middleware`] 뒤에 적용해야 합니다.
/// 요구 역할은 `from_fn_with_state(Role::Admin, role_middleware)`처럼 상태로 전달합니다.
pub async fn role_middleware(
    State(required): State<Role>,
    request: Request,
    next: Next,
) -> Result<Response, AuthError> {
    let Some(claims) = request.extensions().get::<Claims>() else {
        tracing::warn!(
            path = %request.uri().path(),
            "Role check reached without an authenticated identity"
        );
        return Err(AuthError::Unauthorized);
    };

    require_role(required, claims)?;
    Ok(next.run(request).await)
}

/// 역할 일치 여부 확인.
///
/// # Returns
///
/// 역할이 같으면 `Ok(())`, 다르면 `Err(AuthError::Forbidden)`
pub fn require_role(required: Role, claims: &Claims) -> Result<(), AuthError> {
    if claims.role == required {
        Ok(())
    } else {
        tracing::info!(
            user_id = %claims.sub,
            role = %claims.role,
            required = %required,
            "Access denied: role mismatch"
        );
        Err(AuthError::Forbidden)
    }
}
