use serde::Deserialize;

// 学期创建请求
#[derive(Debug, Deserialize)]
pub struct CreateSeasonRequest {
    pub season: i32,
    pub name: String,
    pub academic_year: Option<String>,
    /// 创建后立即设为当前学期
    #[serde(default)]
    pub set_current: bool,
}

impl CreateSeasonRequest {
    pub fn validate(&self) -> Result<(), String> {
        if self.season <= 0 {
            return Err("Season must be a positive number".to_string());
        }
        if self.name.trim().is_empty() {
            return Err("Season name is required".to_string());
        }
        if self.name.chars().count() > 128 {
            return Err("Season name must be at most 128 characters".to_string());
        }
        Ok(())
    }
}
