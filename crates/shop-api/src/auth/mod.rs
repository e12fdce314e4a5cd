//! 인증 및 권한 부여.
//!
//! JWT 기반 인증과 역할 기반 접근 제어를 제공합니다.
//!
//! # 구성 요소
//!
//! - [`TokenService`]: 토큰 발급/검증
//! - [`auth_middleware`], [`role_middleware`]: 보호된 라우트용 미들웨어
//! - [`JwtAuth`]: 검증된 [`Claims`] 추출기
//! - [`UserService`]: 가입/로그인/세션 갱신
//!
//! # 사용 예시
//!
//! ```rust,ignore
//! Router::new()
//!     .route("/users/{id}/role", put(update_role))
//!     .layer(from_fn_with_state(Role::Admin, role_middleware))
//!     .layer(from_fn_with_state(state.clone(), auth_middleware));
//! ```

mod error;
mod jwt;
mod middleware;
mod password;
mod service;

pub use error::AuthError;
pub use jwt::{Claims, TokenError, TokenService};
pub use middleware::{auth_middleware, bearer_token, require_role, role_middleware, JwtAuth};
pub use password::{hash_password, verify_password, PasswordError};
pub use service::{Credentials, Registration, UserService};
