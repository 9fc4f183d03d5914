//! 通知分发
//!
//! 所有渠道并发执行，各自受 `timeout` 约束；返回顺序与渠道注册顺序一致。

use std::sync::Arc;
use std::time::Duration;

use futures_util::future::join_all;
use tracing::{info, warn};

use super::{ContactEvent, DeliveryReport, EmailChannel, NotificationChannel, WhatsAppChannel};
use crate::config::NotificationsConfig;

#[derive(Clone)]
pub struct NotificationDispatcher {
    channels: Vec<Arc<dyn NotificationChannel>>,
    timeout: Duration,
}

impl NotificationDispatcher {
    pub fn new(channels: Vec<Arc<dyn NotificationChannel>>, timeout: Duration) -> Self {
        Self { channels, timeout }
    }

    /// 邮件 + WhatsApp
    pub fn from_config(config: &NotificationsConfig) -> Self {
        let channels: Vec<Arc<dyn NotificationChannel>> = vec![
            Arc::new(EmailChannel::new(config.email.clone())),
            Arc::new(WhatsAppChannel::new(config.whatsapp.clone())),
        ];
        Self::new(channels, Duration::from_secs(config.timeout_secs))
    }

    /// 不带任何渠道（CLI、测试）
    pub fn disabled() -> Self {
        Self::new(Vec::new(), Duration::from_secs(1))
    }

    /// 已启用的渠道名，按注册顺序
    pub fn enabled_channels(&self) -> Vec<&'static str> {
        self.channels
            .iter()
            .filter(|c| c.enabled())
            .map(|c| c.name())
            .collect()
    }

    pub async fn dispatch(&self, event: &ContactEvent) -> Vec<DeliveryReport> {
        let deliveries = self.channels.iter().map(|channel| {
            let channel = Arc::clone(channel);
            async move {
                match tokio::time::timeout(self.timeout, channel.deliver(event)).await {
                    Ok(report) => report,
                    Err(_) => DeliveryReport::failed(
                        channel.name(),
                        format!("Tiempo de espera agotado ({}s)", self.timeout.as_secs()),
                    ),
                }
            }
        });

        let reports = join_all(deliveries).await;
        for report in &reports {
            if report.success {
                info!("Notification [{}] delivered", report.channel);
            } else {
                warn!("Notification [{}] failed: {}", report.channel, report.message);
            }
        }
        reports
    }
}
