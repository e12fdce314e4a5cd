//! 사용자 서비스.
//!
//! 가입, 로그인, 세션 갱신, 역할 변경을 조율합니다.
//! 저장소는 [`UserStore`] trait 객체로 주입받습니다.

use std::sync::Arc;

use serde::Deserialize;
use shop_core::{NewUser, Role, UserId, UserStore, UserView};
use validator::{Validate, ValidationErrors};

use super::password::{burn_verification, hash_password, verify_password};
use super::{AuthError, Claims, TokenService};
use crate::metrics::record_auth_event;

/// 가입 요청.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct Registration {
    /// 이메일 주소
    #[validate(email(message = "유효한 이메일 주소가 아닙니다"))]
    pub email: String,
    /// 평문 비밀번호
    #[validate(length(min = 1, message = "비밀번호를 입력하세요"))]
    pub password: String,
    /// 클라이언트가 요청한 역할 (무시됨, 항상 USER로 가입).
    /// 어떤 JSON 값이 와도 가입을 막지 않습니다.
    #[serde(default)]
    pub role: Option<serde_json::Value>,
}

/// 로그인 요청.
#[derive(Debug, Clone, Deserialize)]
pub struct Credentials {
    pub email: String,
    pub password: String,
}

/// 사용자 서비스.
pub struct UserService {
    store: Arc<dyn UserStore>,
    tokens: Arc<TokenService>,
    min_password_length: usize,
}

impl UserService {
    /// 새 서비스 생성.
    pub fn new(
        store: Arc<dyn UserStore>,
        tokens: Arc<TokenService>,
        min_password_length: usize,
    ) -> Self {
        Self {
            store,
            tokens,
            min_password_length,
        }
    }

    #[cfg(test)]
    fn tokens(&self) -> &TokenService {
        &self.tokens
    }

    /// 회원 가입.
    ///
    /// 새 사용자는 요청 내용과 관계없이 항상 USER 역할로 생성됩니다.
    /// ADMIN 승격은 [`UserService::change_role`]로만 가능합니다.
    ///
    /// # Errors
    ///
    /// - `AuthError::Validation`: 이메일 형식 오류, 비밀번호 누락/길이 부족
    /// - `AuthError::DuplicateUser`: 이미 등록된 이메일
    pub async fn register(&self, registration: Registration) -> Result<String, AuthError> {
        let result = self.try_register(registration).await;
        record_auth_event("register", outcome(&result));
        result
    }

    async fn try_register(&self, mut registration: Registration) -> Result<String, AuthError> {
        registration.email = registration.email.trim().to_string();
        registration
            .validate()
            .map_err(|e| AuthError::Validation(validation_message(&e)))?;

        if registration.password.chars().count() < self.min_password_length {
            return Err(AuthError::Validation(format!(
                "비밀번호는 최소 {}자 이상이어야 합니다",
                self.min_password_length
            )));
        }

        if let Some(requested) = registration.role.as_ref().and_then(|v| v.as_str()) {
            if Role::parse(requested) == Some(Role::Admin) {
                tracing::warn!(
                    email = %registration.email,
                    "Registration requested ADMIN role; creating USER instead"
                );
            }
        }

        if self.store.find_by_email(&registration.email).await?.is_some() {
            return Err(AuthError::DuplicateUser);
        }

        let password = registration.password;
        let password_hash = run_blocking(move || hash_password(&password)).await??;
        // 조회와 저장 사이의 경합은 저장소의 유일성 제약이 DuplicateEmail로 보고함
        let user = self
            .store
            .insert(NewUser::new(registration.email, password_hash))
            .await?;

        tracing::info!(user_id = user.id, email = %user.email, "User registered");
        Ok(self.tokens.issue(user.id, &user.email, user.role)?)
    }

    /// 로그인.
    ///
    /// 존재하지 않는 이메일과 틀린 비밀번호는 같은 `InvalidCredentials`로 응답합니다.
    pub async fn login(&self, credentials: Credentials) -> Result<String, AuthError> {
        let result = self.try_login(credentials).await;
        record_auth_event("login", outcome(&result));
        result
    }

    async fn try_login(&self, credentials: Credentials) -> Result<String, AuthError> {
        let email = credentials.email.trim();

        let password = credentials.password;

        let Some(user) = self.store.find_by_email(email).await? else {
            run_blocking(move || burn_verification(&password)).await?;
            tracing::info!("Login failed");
            return Err(AuthError::InvalidCredentials);
        };

        let digest = user.password_hash.clone();
        if !run_blocking(move || verify_password(&password, &digest)).await? {
            tracing::info!(user_id = user.id, "Login failed");
            return Err(AuthError::InvalidCredentials);
        }

        tracing::info!(user_id = user.id, "User logged in");
        Ok(self.tokens.issue(user.id, &user.email, user.role)?)
    }

    /// 세션 갱신: 같은 신원으로 새 토큰 발급.
    pub fn check(&self, claims: &Claims) -> Result<String, AuthError> {
        let result = self.tokens.reissue(claims).map_err(AuthError::from);
        record_auth_event("check", outcome(&result));
        result
    }

    /// 사용자 역할 변경 (관리자 전용 경로).
    pub async fn change_role(&self, id: UserId, role: Role) -> Result<UserView, AuthError> {
        let previous = self
            .store
            .find_by_id(id)
            .await?
            .ok_or(AuthError::NotFound)?
            .role;

        let user = self
            .store
            .update_role(id, role)
            .await?
            .ok_or(AuthError::NotFound)?;

        tracing::info!(
            user_id = user.id,
            from = %previous,
            to = %user.role,
            "User role changed"
        );
        record_auth_event("change_role", "success");
        Ok(user.into())
    }
}

/// Argon2 연산은 blocking 스레드 풀에서 실행합니다.
async fn run_blocking<T, F>(f: F) -> Result<T, AuthError>
where
    F: FnOnce() -> T + Send + 'static,
    T: Send + 'static,
{
    tokio::task::spawn_blocking(f)
        .await
        .map_err(|e| AuthError::Internal(format!("비밀번호 처리 태스크 실패: {e}")))
}

fn outcome<T>(result: &Result<T, AuthError>) -> &'static str {
    match result {
        Ok(_) => "success",
        Err(AuthError::Internal(_)) => "error",
        Err(_) => "rejected",
    }
}

/// 검증 에러를 하나의 메시지로 합칩니다.
pub(crate) fn validation_message(errors: &ValidationErrors) -> String {
    errors
        .field_errors()
        .iter()
        .flat_map(|(field, errors)| {
            errors.iter().map(move |e| {
                e.message
                    .as_ref()
                    .map(|m| m.to_string())
                    .unwrap_or_else(|| format!("{}: 유효하지 않은 값", field))
            })
        })
        .collect::<Vec<_>>()
        .join("; ")
}
