//! 사용자 저장소 추상화.
//!
//! 사용자 레코드의 영속화는 외부 협력자(데이터베이스 등)가 담당합니다.
//! 이 trait를 구현하면 서비스 계층은 저장소 종류와 무관하게 동작합니다.

use async_trait::async_trait;
use thiserror::Error;

use super::{NewUser, Role, User, UserId};

// =============================================================================
// 에러 타입
// =============================================================================

/// UserStore 에러.
#[derive(Debug, Error)]
pub enum StoreError {
    /// 이메일 유일성 제약 위반
    #[error("이미 등록된 이메일: {0}")]
    DuplicateEmail(String),

    /// 저장소 내부 에러 (연결 끊김, 쿼리 실패 등)
    #[error("저장소 에러: {0}")]
    Backend(String),
}

// =============================================================================
// UserStore Trait
// =============================================================================

/// 사용자 저장소 trait.
///
/// 구현체는 `email` 컬럼의 유일성을 보장해야 합니다.
/// 동시에 같은 이메일로 `insert`가 호출되면 하나만 성공하고
/// 나머지는 [`StoreError::DuplicateEmail`]을 반환해야 합니다.
#[async_trait]
pub trait UserStore: Send + Sync {
    /// 이메일로 사용자 조회.
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, StoreError>;

    /// ID로 사용자 조회.
    async fn find_by_id(&self, id: UserId) -> Result<Option<User>, StoreError>;

    /// 새 사용자 저장.
    ///
    /// # Errors
    ///
    /// - `StoreError::DuplicateEmail`: 같은 이메일이 이미 존재
    /// - `StoreError::Backend`: 저장소 장애
    async fn insert(&self, user: NewUser) -> Result<User, StoreError>;

    /// 사용자 역할 변경. 대상이 없으면 `Ok(None)`.
    async fn update_role(&self, id: UserId, role: Role) -> Result<Option<User>, StoreError>;
}
