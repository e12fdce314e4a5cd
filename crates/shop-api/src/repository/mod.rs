//! 사용자 저장소 구현.
//!
//! - [`PgUserStore`]: PostgreSQL (`users` 테이블)
//! - [`InMemoryUserStore`]: 프로세스 메모리 (테스트, `DATABASE_URL` 없는 개발 실행)

mod memory;
mod users;

pub use memory::InMemoryUserStore;
pub use users::PgUserStore;
