use async_trait::async_trait;
use std::sync::Arc;
use tracing::info;

use crate::config::AppConfig;
use crate::errors::{Result, TrainHubError};
use crate::models::students::entities::Student;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmailMessage {
    pub to: String,
    pub subject: String,
    pub body: String,
}

impl EmailMessage {
    pub fn welcome(student: &Student, password: &str) -> Self {
        let system_name = &AppConfig::get().app.system_name;
        Self {
            to: student.email.clone(),
            subject: format!("[{system_name}] Your student account"),
            body: format!(
                "Hello {},\n\nAn account has been created for you in season {}.\n\
                 Login email: {}\nInitial password: {}\n\n\
                 Please change your password after the first login.\n",
                student.display_name(),
                student.season,
                student.email,
                password
            ),
        }
    }

    pub fn password_reset(student: &Student, password: &str) -> Self {
        let system_name = &AppConfig::get().app.system_name;
        Self {
            to: student.email.clone(),
            subject: format!("[{system_name}] Your password has been reset"),
            body: format!(
                "Hello {},\n\nYour password has been reset by an administrator.\n\
                 New password: {}\n",
                student.display_name(),
                password
            ),
        }
    }
}

#[async_trait]
pub trait Mailer: Send + Sync {
    async fn send(&self, message: &EmailMessage) -> Result<()>;
}

/// 只写日志的投递方式，不含密码等正文内容
pub struct LogMailer {
    from: String,
}

impl LogMailer {
    pub fn new(from_name: &str, from_address: &str) -> Self {
        Self {
            from: format!("{from_name} <{from_address}>"),
        }
    }
}

#[async_trait]
impl Mailer for LogMailer {
    async fn send(&self, message: &EmailMessage) -> Result<()> {
        info!(
            "Mail from {} to {}: {} ({} bytes)",
            self.from,
            message.to,
            message.subject,
            message.body.len()
        );
        Ok(())
    }
}

pub fn create_mailer() -> Result<Arc<dyn Mailer>> {
    let config = &AppConfig::get().mail;
    match config.transport.as_str() {
        "log" => Ok(Arc::new(LogMailer::new(
            &config.from_name,
            &config.from_address,
        ))),
        other => Err(TrainHubError::mail(format!(
            "Unsupported mail transport: {other}"
        ))),
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use std::sync::Mutex;

    /// 记录发出的邮件，可设置为总是失败或延迟发送
    #[derive(Default)]
    pub(crate) struct RecordingMailer {
        pub sent: Mutex<Vec<EmailMessage>>,
        pub fail: bool,
        pub delay_ms: u64,
    }

    #[async_trait]
    impl Mailer for RecordingMailer {
        async fn send(&self, message: &EmailMessage) -> Result<()> {
            if self.delay_ms > 0 {
                tokio::time::sleep(std::time::Duration::from_millis(self.delay_ms)).await;
            }
            if self.fail {
                return Err(TrainHubError::mail("smtp unavailable"));
            }
            self.sent.lock().unwrap().push(message.clone());
            Ok(())
        }
    }

    #[test]
    fn test_welcome_mail_contains_credentials() {
        let student = crate::services::roll_call::compute::tests::student(1, 7, "an@example.com");
        let message = EmailMessage::welcome(&student, "Secret123");
        assert_eq!(message.to, "an@example.com");
        assert!(message.body.contains("Secret123"));
        assert!(message.body.contains("season 1"));
    }

    #[tokio::test]
    async fn test_log_mailer_always_succeeds() {
        let mailer = LogMailer::new("TrainHub", "no-reply@trainhub.local");
        let message = EmailMessage {
            to: "an@example.com".to_string(),
            subject: "hi".to_string(),
            body: "body".to_string(),
        };
        assert!(mailer.send(&message).await.is_ok());
    }
}
