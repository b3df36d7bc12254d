//! 统一错误处理模块
//!
//! 使用宏自动生成错误类型，支持错误代码和类型名称。
//! 服务层最终会把这些错误映射为 `ApiResponse` 失败对象（见 `models::ErrorCode`）。

use std::fmt;

/// 定义错误类型的宏
///
/// 自动生成：
/// - enum 定义
/// - code() 方法 - 返回错误代码
/// - error_type() 方法 - 返回错误类型名称
/// - message() 方法 - 返回错误详情
/// - 便捷构造函数
macro_rules! define_trainhub_errors {
    ($(
        $variant:ident($code:literal, $type_name:literal)
    ),* $(,)?) => {
        #[derive(Debug, Clone)]
        pub enum TrainHubError {
            $($variant(String),)*
        }

        impl TrainHubError {
            /// 获取错误代码
            pub fn code(&self) -> &'static str {
                match self {
                    $(TrainHubError::$variant(_) => $code,)*
                }
            }

            /// 获取错误类型名称
            pub fn error_type(&self) -> &'static str {
                match self {
                    $(TrainHubError::$variant(_) => $type_name,)*
                }
            }

            /// 获取错误详情
            pub fn message(&self) -> &str {
                match self {
                    $(TrainHubError::$variant(msg) => msg,)*
                }
            }
        }

        // 生成便捷构造函数
        paste::paste! {
            impl TrainHubError {
                $(
                    pub fn [<$variant:snake>]<T: Into<String>>(msg: T) -> Self {
                        TrainHubError::$variant(msg.into())
                    }
                )*
            }
        }
    };
}

define_trainhub_errors! {
    CacheConnection("E001", "Cache Connection Error"),
    CachePluginNotFound("E002", "Cache Plugin Not Found"),
    DatabaseConfig("E003", "Database Configuration Error"),
    DatabaseConnection("E004", "Database Connection Error"),
    DatabaseOperation("E005", "Database Operation Error"),
    FileOperation("E006", "File Operation Error"),
    Validation("E007", "Validation Error"),
    NotFound("E008", "Resource Not Found"),
    Serialization("E009", "Serialization Error"),
    Conflict("E010", "Resource Conflict"),
    DateParse("E011", "Date Parse Error"),
    Authentication("E012", "Authentication Error"),
    Authorization("E013", "Authorization Error"),
    TaskQueue("E014", "Task Queue Error"),
    Mail("E015", "Mail Delivery Error"),
}

impl TrainHubError {
    /// 格式化为简洁输出
    pub fn format_simple(&self) -> String {
        format!("{}: {}", self.error_type(), self.message())
    }

    /// 是否为唯一约束冲突
    ///
    /// SQLite、PostgreSQL 与 MySQL 的报错文本各不相同，这里统一识别。
    pub fn is_unique_violation(&self) -> bool {
        if matches!(self, TrainHubError::Conflict(_)) {
            return true;
        }
        let msg = self.message();
        msg.contains("UNIQUE constraint failed")
            || msg.contains("duplicate key value")
            || msg.contains("Duplicate entry")
    }
}

impl fmt::Display for TrainHubError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.format_simple())
    }
}

impl std::error::Error for TrainHubError {}

// 为常见的错误类型实现 From trait
impl From<sea_orm::DbErr> for TrainHubError {
    fn from(err: sea_orm::DbErr) -> Self {
        TrainHubError::DatabaseOperation(err.to_string())
    }
}

impl From<std::io::Error> for TrainHubError {
    fn from(err: std::io::Error) -> Self {
        TrainHubError::FileOperation(err.to_string())
    }
}

impl From<serde_json::Error> for TrainHubError {
    fn from(err: serde_json::Error) -> Self {
        TrainHubError::Serialization(err.to_string())
    }
}

impl From<csv::Error> for TrainHubError {
    fn from(err: csv::Error) -> Self {
        TrainHubError::Serialization(err.to_string())
    }
}

impl From<chrono::ParseError> for TrainHubError {
    fn from(err: chrono::ParseError) -> Self {
        TrainHubError::DateParse(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, TrainHubError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_codes() {
        assert_eq!(TrainHubError::cache_connection("test").code(), "E001");
        assert_eq!(TrainHubError::database_config("test").code(), "E003");
        assert_eq!(TrainHubError::validation("test").code(), "E007");
        assert_eq!(TrainHubError::authentication("test").code(), "E012");
        assert_eq!(TrainHubError::task_queue("test").code(), "E014");
    }

    #[test]
    fn test_error_types() {
        assert_eq!(
            TrainHubError::conflict("test").error_type(),
            "Resource Conflict"
        );
        assert_eq!(
            TrainHubError::validation("test").error_type(),
            "Validation Error"
        );
    }

    #[test]
    fn test_format_simple() {
        let err = TrainHubError::not_found("Subject 3");
        let formatted = err.format_simple();
        assert!(formatted.contains("Resource Not Found"));
        assert!(formatted.contains("Subject 3"));
    }

    #[test]
    fn test_unique_violation_detection() {
        assert!(
            TrainHubError::database_operation("UNIQUE constraint failed: students.email")
                .is_unique_violation()
        );
        assert!(
            TrainHubError::database_operation(
                "duplicate key value violates unique constraint \"idx_students_email\""
            )
            .is_unique_violation()
        );
        assert!(TrainHubError::conflict("email").is_unique_violation());
        assert!(!TrainHubError::database_operation("connection reset").is_unique_violation());
    }
}
