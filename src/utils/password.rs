use crate::config::AppConfig;
use crate::errors::{Result, TrainHubError};
use argon2::password_hash::{SaltString, rand_core::OsRng};
use argon2::{Algorithm, Argon2, Params, PasswordHash, PasswordHasher, PasswordVerifier, Version};
use rand::Rng;

// 去掉易混淆字符 (0/O, 1/l/I)
const PASSWORD_UPPER: &[u8] = b"ABCDEFGHJKLMNPQRSTUVWXYZ";
const PASSWORD_LOWER: &[u8] = b"abcdefghijkmnopqrstuvwxyz";
const PASSWORD_DIGITS: &[u8] = b"23456789";

fn argon2() -> Result<Argon2<'static>> {
    let config = &AppConfig::get().argon2;
    let params = Params::new(
        config.memory_cost,
        config.time_cost,
        config.parallelism,
        None,
    )
    .map_err(|e| TrainHubError::validation(format!("Argon2 参数错误: {e}")))?;

    Ok(Argon2::new(Algorithm::Argon2id, Version::V0x13, params))
}

/// 哈希密码
pub fn hash_password(password: &str) -> Result<String> {
    let salt = SaltString::generate(&mut OsRng);
    let hash = argon2()?
        .hash_password(password.as_bytes(), &salt)
        .map_err(|e| TrainHubError::validation(format!("密码哈希失败: {e}")))?;
    Ok(hash.to_string())
}

/// 验证密码，参数取自哈希串本身
pub fn verify_password(password: &str, hash: &str) -> bool {
    match PasswordHash::new(hash) {
        Ok(parsed_hash) => Argon2::default()
            .verify_password(password.as_bytes(), &parsed_hash)
            .is_ok(),
        Err(_) => false,
    }
}

/// 生成满足密码策略的随机密码（至少含大写、小写与数字各一个）
pub fn generate_random_password(len: usize) -> String {
    let len = len.max(8);
    let mut rng = rand::rng();
    let all: Vec<u8> = [PASSWORD_UPPER, PASSWORD_LOWER, PASSWORD_DIGITS].concat();

    let mut chars: Vec<u8> = vec![
        PASSWORD_UPPER[rng.random_range(0..PASSWORD_UPPER.len())],
        PASSWORD_LOWER[rng.random_range(0..PASSWORD_LOWER.len())],
        PASSWORD_DIGITS[rng.random_range(0..PASSWORD_DIGITS.len())],
    ];
    while chars.len() < len {
        chars.push(all[rng.random_range(0..all.len())]);
    }
    // 打乱前三位的固定位置
    for i in (1..chars.len()).rev() {
        let j = rng.random_range(0..=i);
        chars.swap(i, j);
    }

    String::from_utf8(chars).unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::validate::validate_password;

    #[test]
    fn test_hash_and_verify() {
        let hash = hash_password("Secret123").unwrap();
        assert!(hash.starts_with("$argon2id$"));
        assert!(verify_password("Secret123", &hash));
        assert!(!verify_password("secret123", &hash));
        assert!(!verify_password("Secret123", "not-a-hash"));
    }

    #[test]
    fn test_random_password_meets_policy() {
        for _ in 0..20 {
            let password = generate_random_password(12);
            assert_eq!(password.len(), 12);
            assert!(validate_password(&password).is_valid, "{password}");
        }
        assert_eq!(generate_random_password(3).len(), 8);
    }
}
