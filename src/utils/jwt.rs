use crate::config::AppConfig;
use crate::models::auth::UserRole;
use actix_web::cookie::{Cookie, SameSite};
use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};

const REFRESH_COOKIE_NAME: &str = "trainhub_refresh_token";

crate::string_enum! {
    pub enum TokenType("token type") {
        Access => "access",
        Refresh => "refresh",
    }
}

// JWT Claims 结构体
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    pub sub: String,           // 管理员或学员 ID
    pub role: UserRole,        // 账号角色，决定 sub 指向哪张表
    pub token_type: TokenType, // access 或 refresh
    pub exp: usize,            // 过期时间
    pub iat: usize,            // 签发时间
}

impl Claims {
    pub fn principal_id(&self) -> Option<i64> {
        self.sub.parse::<i64>().ok()
    }
}

// Token 对
#[derive(Debug, Serialize, Deserialize)]
pub struct TokenPair {
    pub access_token: String,
    pub refresh_token: String,
}

pub struct JwtUtils;

impl JwtUtils {
    fn secret() -> &'static str {
        &AppConfig::get().jwt.secret
    }

    fn generate(
        principal_id: i64,
        role: UserRole,
        token_type: TokenType,
        expiry: chrono::Duration,
    ) -> Result<String, jsonwebtoken::errors::Error> {
        let now = chrono::Utc::now();
        let claims = Claims {
            sub: principal_id.to_string(),
            role,
            token_type,
            exp: (now + expiry).timestamp() as usize,
            iat: now.timestamp() as usize,
        };

        encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(Self::secret().as_bytes()),
        )
    }

    /// Refresh Token 有效期（天），记住我时更长
    pub fn refresh_expiry_days(remember_me: bool) -> i64 {
        let config = AppConfig::get();
        if remember_me {
            config.jwt.refresh_token_remember_me_expiry
        } else {
            config.jwt.refresh_token_expiry
        }
    }

    pub fn generate_access_token(
        principal_id: i64,
        role: UserRole,
    ) -> Result<String, jsonwebtoken::errors::Error> {
        Self::generate(
            principal_id,
            role,
            TokenType::Access,
            chrono::Duration::minutes(AppConfig::get().jwt.access_token_expiry),
        )
    }

    pub fn generate_token_pair(
        principal_id: i64,
        role: UserRole,
        remember_me: bool,
    ) -> Result<TokenPair, jsonwebtoken::errors::Error> {
        Ok(TokenPair {
            access_token: Self::generate_access_token(principal_id, role)?,
            refresh_token: Self::generate(
                principal_id,
                role,
                TokenType::Refresh,
                chrono::Duration::days(Self::refresh_expiry_days(remember_me)),
            )?,
        })
    }

    fn verify(token: &str, expected: TokenType) -> Result<Claims, jsonwebtoken::errors::Error> {
        let claims = decode::<Claims>(
            token,
            &DecodingKey::from_secret(Self::secret().as_bytes()),
            &Validation::default(),
        )?
        .claims;

        if claims.token_type != expected || claims.principal_id().is_none() {
            return Err(jsonwebtoken::errors::ErrorKind::InvalidToken.into());
        }
        Ok(claims)
    }

    pub fn verify_access_token(token: &str) -> Result<Claims, jsonwebtoken::errors::Error> {
        Self::verify(token, TokenType::Access)
    }

    pub fn verify_refresh_token(token: &str) -> Result<Claims, jsonwebtoken::errors::Error> {
        Self::verify(token, TokenType::Refresh)
    }

    /// 创建 Refresh Token Cookie
    pub fn create_refresh_token_cookie(refresh_token: &str, remember_me: bool) -> Cookie<'static> {
        Cookie::build(REFRESH_COOKIE_NAME, refresh_token.to_string())
            .path("/api/v1/auth")
            .max_age(actix_web::cookie::time::Duration::days(
                Self::refresh_expiry_days(remember_me),
            ))
            .same_site(SameSite::Strict)
            .http_only(true)
            .secure(AppConfig::get().is_production())
            .finish()
    }

    /// 清除 Refresh Token Cookie（注销）
    pub fn create_empty_refresh_token_cookie() -> Cookie<'static> {
        Cookie::build(REFRESH_COOKIE_NAME, "")
            .path("/api/v1/auth")
            .max_age(actix_web::cookie::time::Duration::seconds(0))
            .same_site(SameSite::Strict)
            .http_only(true)
            .secure(AppConfig::get().is_production())
            .finish()
    }

    pub fn extract_refresh_token_from_cookie(req: &actix_web::HttpRequest) -> Option<String> {
        req.cookie(REFRESH_COOKIE_NAME)
            .map(|cookie| cookie.value().to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_access_token_roundtrip() {
        let token = JwtUtils::generate_access_token(42, UserRole::Viewer).unwrap();
        let claims = JwtUtils::verify_access_token(&token).unwrap();
        assert_eq!(claims.principal_id(), Some(42));
        assert_eq!(claims.role, UserRole::Viewer);
    }

    #[test]
    fn test_token_types_are_not_interchangeable() {
        let pair = JwtUtils::generate_token_pair(7, UserRole::Student, false).unwrap();
        assert!(JwtUtils::verify_access_token(&pair.refresh_token).is_err());
        assert!(JwtUtils::verify_refresh_token(&pair.access_token).is_err());
        assert!(JwtUtils::verify_refresh_token(&pair.refresh_token).is_ok());
    }

    #[test]
    fn test_tampered_token_is_rejected() {
        let mut token = JwtUtils::generate_access_token(1, UserRole::Admin).unwrap();
        token.push('x');
        assert!(JwtUtils::verify_access_token(&token).is_err());
    }
}
