//! 도메인 모델.
//!
//! 사용자 계정, 역할, 저장소 추상화를 정의합니다.

mod role;
mod user;
mod user_store;

pub use role::{ParseRoleError, Role};
pub use user::{NewUser, User, UserId, UserView};
pub use user_store::{StoreError, UserStore};
