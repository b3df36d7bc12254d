use once_cell::sync::Lazy;
use regex::Regex;

static EMAIL_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[A-Za-z0-9._%+-]+@[A-Za-z0-9.-]+\.[A-Za-z]{2,}$").expect("Invalid email regex")
});

// 允许国际区号、空格、点与连字符，数字 8~15 位
static PHONE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\+?[0-9][0-9 .-]{6,20}$").expect("Invalid phone regex"));

const WEAK_PASSWORDS: &[&str] = &[
    "password",
    "12345678",
    "123456789",
    "qwerty123",
    "admin123",
    "password1",
    "abcd1234",
    "trainhub1",
];

pub fn validate_email(email: &str) -> Result<(), &'static str> {
    if email.len() > 254 || !EMAIL_RE.is_match(email.trim()) {
        return Err("Email format is invalid");
    }
    Ok(())
}

pub fn validate_full_name(full_name: &str) -> Result<(), &'static str> {
    let len = full_name.trim().chars().count();
    if len == 0 {
        return Err("Full name is required");
    }
    if len > 128 {
        return Err("Full name must be at most 128 characters");
    }
    Ok(())
}

pub fn validate_phone(phone: &str) -> Result<(), &'static str> {
    if phone.is_empty() {
        return Ok(());
    }
    let digits = phone.chars().filter(|c| c.is_ascii_digit()).count();
    if !PHONE_RE.is_match(phone) || !(8..=15).contains(&digits) {
        return Err("Phone number format is invalid");
    }
    Ok(())
}

/// 密码策略验证结果
#[derive(Debug, Clone)]
pub struct PasswordValidationResult {
    pub is_valid: bool,
    pub errors: Vec<&'static str>,
}

impl PasswordValidationResult {
    pub fn error_message(&self) -> String {
        self.errors.join("; ")
    }
}

/// 密码策略：至少 8 位，同时包含大写字母、小写字母与数字，且不在常见弱密码表中
pub fn validate_password(password: &str) -> PasswordValidationResult {
    let mut errors = Vec::new();

    if password.chars().count() < 8 {
        errors.push("Password must be at least 8 characters long");
    }
    if !password.chars().any(|c| c.is_ascii_uppercase()) {
        errors.push("Password must contain at least one uppercase letter");
    }
    if !password.chars().any(|c| c.is_ascii_lowercase()) {
        errors.push("Password must contain at least one lowercase letter");
    }
    if !password.chars().any(|c| c.is_ascii_digit()) {
        errors.push("Password must contain at least one digit");
    }
    if WEAK_PASSWORDS
        .iter()
        .any(|weak| password.eq_ignore_ascii_case(weak))
    {
        errors.push("Password is too common, please choose a stronger password");
    }

    PasswordValidationResult {
        is_valid: errors.is_empty(),
        errors,
    }
}

/// 简化的密码验证（返回 Result）
pub fn validate_password_simple(password: &str) -> Result<(), String> {
    let result = validate_password(password);
    if result.is_valid {
        Ok(())
    } else {
        Err(result.error_message())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_email() {
        assert!(validate_email("hoc.vien+1@giaophan.vn").is_ok());
        assert!(validate_email("no-at-sign.vn").is_err());
        assert!(validate_email("a@b").is_err());
    }

    #[test]
    fn test_phone() {
        assert!(validate_phone("+84 912 345 678").is_ok());
        assert!(validate_phone("0912-345-678").is_ok());
        assert!(validate_phone("").is_ok());
        assert!(validate_phone("12345").is_err());
        assert!(validate_phone("call me").is_err());
    }

    #[test]
    fn test_full_name() {
        assert!(validate_full_name("Nguyễn Thị Bích").is_ok());
        assert!(validate_full_name("   ").is_err());
        assert!(validate_full_name(&"x".repeat(129)).is_err());
    }

    #[test]
    fn test_password_policy() {
        assert!(validate_password("SecurePass123").is_valid);

        let short = validate_password("Ab1");
        assert!(
            short
                .errors
                .contains(&"Password must be at least 8 characters long")
        );

        assert!(!validate_password("abcd12345").is_valid);
        assert!(!validate_password("ABCD12345").is_valid);
        assert!(!validate_password("AbcdEfgh").is_valid);

        let common = validate_password("Password1");
        assert!(
            common
                .errors
                .contains(&"Password is too common, please choose a stronger password")
        );
        assert!(validate_password_simple("Abcd1234").is_err());
    }
}
