//! 비밀번호 해싱.
//!
//! Argon2id 기반 해싱 및 검증. 평문은 로그나 저장소로 흘러가지 않습니다.

use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};

/// 비밀번호 처리 에러.
#[derive(Debug, thiserror::Error)]
pub enum PasswordError {
    #[error("비밀번호 해싱 실패")]
    HashingFailed,
}

/// 존재하지 않는 계정 로그인 시 검증 비용을 맞추기 위한 더미 해시.
///
/// 파라미터(m, t, p)는 `Argon2::default()`와 같아야 합니다.
const DUMMY_HASH: &str = "$argon2id$v=19$m=19456,t=2,p=1$1IdKqpdpg1DFVx4Boqgb0w$ShgkCBHpxTLierjGIpV9pNSi66kjGQBdQe0Ys797kbU";

/// 비밀번호 해싱.
///
/// 솔트는 매번 새로 생성되며 결과는 PHC 형식 문자열입니다
/// (`$argon2id$v=19$m=19456,t=2,p=1$...`).
pub fn hash_password(password: &str) -> Result<String, PasswordError> {
    let salt = SaltString::generate(&mut OsRng);

    let hash = Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map_err(|_| PasswordError::HashingFailed)?;

    Ok(hash.to_string())
}

/// 비밀번호 검증.
///
/// 불일치와 손상된 해시를 구분하지 않고 모두 `false`를 반환합니다.
/// 비교는 Argon2 검증기 내부에서 상수 시간으로 수행됩니다.
pub fn verify_password(password: &str, hash: &str) -> bool {
    let Ok(parsed_hash) = PasswordHash::new(hash) else {
        return false;
    };

    Argon2::default()
        .verify_password(password.as_bytes(), &parsed_hash)
        .is_ok()
}

/// 더미 해시에 대해 검증을 수행하고 결과를 버립니다.
pub(crate) fn burn_verification(password: &str) {
    let _ = verify_password(password, DUMMY_HASH);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hash_and_verify_password() {
        let hash = hash_password("secret1").unwrap();

        assert!(hash.starts_with("$argon2id$"));
        assert!(!hash.contains("secret1"));
        assert!(verify_password("secret1", &hash));
        assert!(!verify_password("secret2", &hash));
    }

    #[test]
    fn test_same_password_different_salts() {
        let hash1 = hash_password("Password1").unwrap();
        let hash2 = hash_password("Password1").unwrap();

        assert_ne!(hash1, hash2);
        assert!(verify_password("Password1", &hash1));
        assert!(verify_password("Password1", &hash2));
    }

    #[test]
    fn test_corrupt_hash_is_plain_false() {
        assert!(!verify_password("password", "not-a-valid-hash"));
        assert!(!verify_password("password", ""));
    }

    #[test]
    fn test_dummy_hash_matches_default_params() {
        let parsed = PasswordHash::new(DUMMY_HASH).unwrap();
        let fresh = hash_password("anything").unwrap();
        let fresh = PasswordHash::new(&fresh).unwrap();

        assert_eq!(parsed.algorithm, fresh.algorithm);
        assert_eq!(parsed.version, fresh.version);
        assert_eq!(parsed.params, fresh.params);
        assert!(parsed.hash.is_some());
        assert!(!verify_password("dummy", DUMMY_HASH));
    }

    #[test]
    fn test_unicode_password() {
        let password = "пароль-비밀번호-123";
        let hash = hash_password(password).unwrap();
        assert!(verify_password(password, &hash));
    }
}
