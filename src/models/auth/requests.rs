use serde::Deserialize;

// 登录请求（管理员与学员共用）
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    /// 登录邮箱
    pub email: String,
    /// 密码
    pub password: String,
    /// 是否记住我
    #[serde(default)]
    pub remember_me: bool,
}
