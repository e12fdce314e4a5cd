//! 사용자 endpoint.
//!
//! - `POST /registration` - 회원 가입
//! - `POST /login` - 로그인
//! - `GET /auth` - 세션 갱신 (인증 필요)
//! - `PUT /{id}/role` - 역할 변경 (ADMIN 전용)

use std::sync::Arc;

use axum::{
    extract::{
        rejection::{JsonRejection, PathRejection},
        Path, State,
    },
    middleware::from_fn_with_state,
    routing::{get, post, put},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use shop_core::{Role, UserId, UserView};

use crate::auth::{
    auth_middleware, role_middleware, AuthError, Credentials, JwtAuth, Registration,
};
use crate::state::AppState;

/// 토큰 응답.
#[derive(Debug, Serialize, Deserialize)]
pub struct TokenResponse {
    pub token: String,
}

/// 역할 변경 요청.
#[derive(Debug, Serialize, Deserialize)]
pub struct UpdateRoleRequest {
    /// "USER" | "ADMIN" (대소문자 무관)
    pub role: String,
}

fn bad_body(rejection: JsonRejection) -> AuthError {
    AuthError::Validation(rejection.body_text())
}

/// 회원 가입.
///
/// POST /api/users/registration
pub async fn registration(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<Registration>, JsonRejection>,
) -> Result<Json<TokenResponse>, AuthError> {
    let Json(registration) = payload.map_err(bad_body)?;
    let token = state.users.register(registration).await?;
    Ok(Json(TokenResponse { token }))
}

/// 로그인.
///
/// POST /api/users/login
pub async fn login(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<Credentials>, JsonRejection>,
) -> Result<Json<TokenResponse>, AuthError> {
    let Json(credentials) = payload.map_err(bad_body)?;
    let token = state.users.login(credentials).await?;
    Ok(Json(TokenResponse { token }))
}

/// 세션 갱신.
///
/// GET /api/users/auth
pub async fn check(
    State(state): State<Arc<AppState>>,
    JwtAuth(claims): JwtAuth,
) -> Result<Json<TokenResponse>, AuthError> {
    let token = state.users.check(&claims)?;
    Ok(Json(TokenResponse { token }))
}

/// 사용자 역할 변경.
///
/// PUT /api/users/{id}/role
pub async fn update_role(
    State(state): State<Arc<AppState>>,
    JwtAuth(admin): JwtAuth,
    id: Result<Path<UserId>, PathRejection>,
    payload: Result<Json<UpdateRoleRequest>, JsonRejection>,
) -> Result<Json<UserView>, AuthError> {
    let Path(id) = id.map_err(|e| AuthError::Validation(e.body_text()))?;
    let Json(request) = payload.map_err(bad_body)?;
    let role: Role = request
        .role
        .parse()
        .map_err(|e: shop_core::ParseRoleError| AuthError::Validation(e.to_string()))?;

    tracing::info!(admin_id = %admin.sub, target_id = id, role = %role, "Role change requested");
    let user = state.users.change_role(id, role).await?;
    Ok(Json(user))
}

/// 사용자 라우터 생성.
///
/// 미들웨어는 바깥부터 인증 → 역할 순서로 실행됩니다.
pub fn users_router(state: Arc<AppState>) -> Router<Arc<AppState>> {
    let admin = Router::new()
        .route("/{id}/role", put(update_role))
        .route_layer(from_fn_with_state(Role::Admin, role_middleware));

    let authenticated = Router::new()
        .route("/auth", get(check))
        .merge(admin)
        .route_layer(from_fn_with_state(state, auth_middleware));

    Router::new()
        .route("/registration", post(registration))
        .route("/login", post(login))
        .merge(authenticated)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ApiErrorResponse;
    use crate::state::create_test_state;
    use axum::{
        body::Body,
        http::{header, Method, Request, StatusCode},
    };
    use tower::ServiceExt;

    fn app() -> (Router, Arc<AppState>) {
        let state = Arc::new(create_test_state());
        let router = users_router(state.clone()).with_state(state.clone());
        (router, state)
    }

    fn json_request(method: Method, uri: &str, body: serde_json::Value) -> Request<Body> {
        Request::builder()
            .method(method)
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    async fn error_code(response: axum::response::Response) -> String {
        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let error: ApiErrorResponse = serde_json::from_slice(&body).unwrap();
        error.code
    }

    #[tokio::test]
    async fn test_registration_returns_token() {
        let (app, state) = app();

        let response = app
            .oneshot(json_request(
                Method::POST,
                "/registration",
                serde_json::json!({"email": "a@x.com", "password": "secret1"}),
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let TokenResponse { token } = serde_json::from_slice(&body).unwrap();
        assert_eq!(state.tokens.verify(&token).unwrap().email, "a@x.com");
    }

    #[tokio::test]
    async fn test_registration_ignores_role_of_any_type() {
        let (app, state) = app();

        let response = app
            .oneshot(json_request(
                Method::POST,
                "/registration",
                serde_json::json!({"email": "b@x.com", "password": "secret1", "role": 5}),
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let TokenResponse { token } = serde_json::from_slice(&body).unwrap();
        assert_eq!(state.tokens.verify(&token).unwrap().role, Role::User);
    }

    #[tokio::test]
    async fn test_malformed_body_is_validation_error() {
        let (app, _) = app();

        let response = app
            .oneshot(
                Request::builder()
                    .method(Method::POST)
                    .uri("/login")
                    .header(header::CONTENT_TYPE, "application/json")
                    .body(Body::from("{not json"))
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(error_code(response).await, "VALIDATION_ERROR");
    }

    #[tokio::test]
    async fn test_check_requires_token() {
        let (app, _) = app();

        let response = app
            .oneshot(Request::builder().uri("/auth").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
        assert_eq!(error_code(response).await, "UNAUTHORIZED");
    }

    #[tokio::test]
    async fn test_update_role_requires_admin() {
        let (app, state) = app();
        let token = state.tokens.issue(1, "user@x.com", Role::User).unwrap();

        let mut request = json_request(
            Method::PUT,
            "/1/role",
            serde_json::json!({"role": "ADMIN"}),
        );
        request.headers_mut().insert(
            header::AUTHORIZATION,
            format!("Bearer {token}").parse().unwrap(),
        );

        let response = app.oneshot(request).await.unwrap();

        assert_eq!(response.status(), StatusCode::FORBIDDEN);
        assert_eq!(error_code(response).await, "FORBIDDEN");
    }

    #[tokio::test]
    async fn test_update_role_rejects_unknown_role() {
        let (app, state) = app();
        let token = state.tokens.issue(1, "admin@x.com", Role::Admin).unwrap();

        let mut request = json_request(
            Method::PUT,
            "/1/role",
            serde_json::json!({"role": "SUPERUSER"}),
        );
        request.headers_mut().insert(
            header::AUTHORIZATION,
            format!("Bearer {token}").parse().unwrap(),
        );

        let response = app.oneshot(request).await.unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }
}
