//! 사용자 역할.
//!
//! 역할은 닫힌 집합(USER, ADMIN)이며 문자열 비교 대신 enum 비교로 검사합니다.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// 사용자 역할.
///
/// 와이어 포맷은 대문자 문자열(`"USER"`, `"ADMIN"`)입니다.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Role {
    /// 일반 사용자
    #[default]
    User,
    /// 관리자 - 관리용 엔드포인트 접근 가능
    Admin,
}

impl Role {
    /// 와이어 포맷 문자열 반환.
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::User => "USER",
            Role::Admin => "ADMIN",
        }
    }

    /// 문자열에서 역할 파싱 (대소문자 무시).
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_ascii_uppercase().as_str() {
            "USER" => Some(Role::User),
            "ADMIN" => Some(Role::Admin),
            _ => None,
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// 알 수 없는 역할 문자열.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("알 수 없는 역할: {0}")]
pub struct ParseRoleError(pub String);

impl FromStr for Role {
    type Err = ParseRoleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Role::parse(s).ok_or_else(|| ParseRoleError(s.to_string()))
    }
}
