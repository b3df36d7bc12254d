use serde::Deserialize;

use crate::models::common::pagination::deserialize_optional_number;

#[derive(Debug, Default, Deserialize)]
pub struct RollCallQueryParams {
    /// 缺省为当前学期
    #[serde(default, deserialize_with = "deserialize_optional_number")]
    pub season: Option<i32>,
}

// 出勤表中的一行，按学号或邮箱匹配学员
#[derive(Debug, Clone, Deserialize)]
pub struct AttendanceEntry {
    pub numerical_order: Option<i32>,
    pub email: Option<String>,
}

impl AttendanceEntry {
    pub fn describe(&self) -> String {
        match (&self.numerical_order, &self.email) {
            (Some(order), _) => format!("#{order}"),
            (None, Some(email)) => email.clone(),
            (None, None) => "<empty>".to_string(),
        }
    }
}

// 批量更新出勤（整表覆盖）
#[derive(Debug, Deserialize)]
pub struct AttendanceSheetRequest {
    pub entries: Vec<AttendanceEntry>,
}

impl AttendanceSheetRequest {
    pub fn validate(&self) -> Result<(), String> {
        if self.entries.len() > 5000 {
            return Err("Attendance sheet is too large".to_string());
        }
        if self
            .entries
            .iter()
            .any(|e| e.numerical_order.is_none() && e.email.as_deref().is_none_or(str::is_empty))
        {
            return Err("Each entry needs a numerical_order or an email".to_string());
        }
        Ok(())
    }
}

// 单个学员出勤开关
#[derive(Debug, Deserialize)]
pub struct SetAttendanceRequest {
    pub is_attend_zoom: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sheet_entries_need_identifier() {
        let sheet: AttendanceSheetRequest = serde_json::from_str(
            r#"{"entries":[{"numerical_order":3},{"email":"an@example.com"}]}"#,
        )
        .unwrap();
        assert!(sheet.validate().is_ok());

        let sheet: AttendanceSheetRequest =
            serde_json::from_str(r#"{"entries":[{"email":""}]}"#).unwrap();
        assert!(sheet.validate().is_err());
    }
}
