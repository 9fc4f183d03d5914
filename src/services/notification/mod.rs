//! Contact notifications
//!
//! 每个渠道独立投递并返回一份 [`DeliveryReport`]；任何渠道失败都不会
//! 影响联系请求本身。

mod dispatcher;
mod email;
pub mod templates;
mod whatsapp;

use async_trait::async_trait;
use serde::Serialize;

pub use dispatcher::NotificationDispatcher;
pub use email::EmailChannel;
pub use whatsapp::{WhatsAppChannel, build_template_payload, truncate_param};

/// 一次联系提交的通知内容
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContactEvent {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub message: String,
}

/// 单个渠道的投递结果
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DeliveryReport {
    pub channel: String,
    pub success: bool,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub response: Option<serde_json::Value>,
}

impl DeliveryReport {
    pub fn ok(channel: &str, message: impl Into<String>) -> Self {
        Self {
            channel: channel.to_string(),
            success: true,
            message: message.into(),
            response: None,
        }
    }

    pub fn failed(channel: &str, message: impl Into<String>) -> Self {
        Self {
            channel: channel.to_string(),
            success: false,
            message: message.into(),
            response: None,
        }
    }

    pub fn with_response(mut self, response: Option<serde_json::Value>) -> Self {
        self.response = response;
        self
    }
}

/// 通知渠道
///
/// 实现方不得 panic 或返回错误：所有失败都折叠进报告。
#[async_trait]
pub trait NotificationChannel: Send + Sync {
    async fn deliver(&self, event: &ContactEvent) -> DeliveryReport;

    fn name(&self) -> &'static str;

    /// 未启用的渠道照常分发，只会得到失败报告
    fn enabled(&self) -> bool {
        true
    }
}
