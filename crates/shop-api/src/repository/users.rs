//! PostgreSQL 사용자 저장소.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use shop_core::{NewUser, Role, StoreError, User, UserId, UserStore};
use sqlx::{FromRow, PgPool};

/// users 테이블 행.
#[derive(Debug, FromRow)]
struct UserRow {
    id: i64,
    email: String,
    password: String,
    role: String,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl TryFrom<UserRow> for User {
    type Error = StoreError;

    fn try_from(row: UserRow) -> Result<Self, Self::Error> {
        let role = Role::parse(&row.role)
            .ok_or_else(|| StoreError::Backend(format!("알 수 없는 역할: {}", row.role)))?;

        Ok(User {
            id: row.id,
            email: row.email,
            password_hash: row.password,
            role,
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }
}

/// sqlx 에러를 저장소 에러로 변환.
///
/// 유일성 제약 위반(SQLSTATE 23505)만 `DuplicateEmail`로 구분합니다.
fn map_sqlx_error(err: sqlx::Error, email: &str) -> StoreError {
    if let Some(db_err) = err.as_database_error() {
        if db_err.is_unique_violation() {
            return StoreError::DuplicateEmail(email.to_string());
        }
    }
    StoreError::Backend(err.to_string())
}

fn backend(err: sqlx::Error) -> StoreError {
    StoreError::Backend(err.to_string())
}

/// PostgreSQL 사용자 저장소.
#[derive(Clone)]
pub struct PgUserStore {
    pool: PgPool,
}

impl PgUserStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl UserStore for PgUserStore {
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, StoreError> {
        let row = sqlx::query_as::<_, UserRow>(
            r#"
            SELECT id, email, password, role, created_at, updated_at
            FROM users
            WHERE email = $1
            "#,
        )
        .bind(email)
        .fetch_optional(&self.pool)
        .await
        .map_err(backend)?;

        row.map(User::try_from).transpose()
    }

    async fn find_by_id(&self, id: UserId) -> Result<Option<User>, StoreError> {
        let row = sqlx::query_as::<_, UserRow>(
            r#"
            SELECT id, email, password, role, created_at, updated_at
            FROM users
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(backend)?;

        row.map(User::try_from).transpose()
    }

    async fn insert(&self, user: NewUser) -> Result<User, StoreError> {
        let row = sqlx::query_as::<_, UserRow>(
            r#"
            INSERT INTO users (email, password, role)
            VALUES ($1, $2, $3)
            RETURNING id, email, password, role, created_at, updated_at
            "#,
        )
        .bind(&user.email)
        .bind(&user.password_hash)
        .bind(user.role.as_str())
        .fetch_one(&self.pool)
        .await
        .map_err(|e| map_sqlx_error(e, &user.email))?;

        User::try_from(row)
    }

    async fn update_role(&self, id: UserId, role: Role) -> Result<Option<User>, StoreError> {
        let row = sqlx::query_as::<_, UserRow>(
            r#"
            UPDATE users
            SET role = $2, updated_at = NOW()
            WHERE id = $1
            RETURNING id, email, password, role, created_at, updated_at
            "#,
        )
        .bind(id)
        .bind(role.as_str())
        .fetch_optional(&self.pool)
        .await
        .map_err(backend)?;

        row.map(User::try_from).transpose()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(role: &str) -> UserRow {
        UserRow {
            id: 7,
            email: "a@x.com".to_string(),
            password: "$argon2id$v=19$stub".to_string(),
            role: role.to_string(),
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn test_row_conversion() {
        let user = User::try_from(row("ADMIN")).unwrap();
        assert_eq!(user.id, 7);
        assert_eq!(user.role, Role::Admin);
        assert_eq!(user.password_hash, "$argon2id$v=19$stub");
    }

    #[test]
    fn test_row_with_unknown_role_is_backend_error() {
        let result = User::try_from(row("SUPERUSER"));
        assert!(matches!(result, Err(StoreError::Backend(_))));
    }

    #[test]
    fn test_non_database_error_maps_to_backend() {
        let err = map_sqlx_error(sqlx::Error::RowNotFound, "a@x.com");
        assert!(matches!(err, StoreError::Backend(_)));
    }
}
