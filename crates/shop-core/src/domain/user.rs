//! 사용자 계정.

use chrono::{DateTime, Utc};
use serde::Serialize;

use super::Role;

/// 사용자 ID (저장소가 할당).
pub type UserId = i64;

/// 저장된 사용자 레코드.
///
/// `password_hash`에는 평문이 아닌 PHC 형식 해시만 들어갑니다.
/// 응답으로 내보낼 때는 [`UserView`]를 사용하세요.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    pub id: UserId,
    pub email: String,
    pub password_hash: String,
    pub role: Role,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// 새 사용자 입력 (해싱 완료 상태).
#[derive(Debug, Clone)]
pub struct NewUser {
    pub email: String,
    pub password_hash: String,
    pub role: Role,
}

impl NewUser {
    /// 기본 역할(USER)로 새 사용자 생성.
    pub fn new(email: impl Into<String>, password_hash: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            password_hash: password_hash.into(),
            role: Role::User,
        }
    }
}

/// 외부 노출용 사용자 정보 (비밀번호 해시 제외).
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct UserView {
    pub id: UserId,
    pub email: String,
    pub role: Role,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<User> for UserView {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            email: user.email,
            role: user.role,
            created_at: user.created_at,
            updated_at: user.updated_at,
        }
    }
}
