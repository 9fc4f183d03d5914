//! WhatsApp Business Cloud API 模板消息渠道
//!
//! ureq 是同步客户端，请求放到 spawn_blocking 里执行。

use std::time::Duration;

use async_trait::async_trait;
use serde_json::{Value, json};
use tracing::{debug, warn};
use ureq::Agent;

use super::{ContactEvent, DeliveryReport, NotificationChannel};
use crate::config::WhatsAppConfig;

const CHANNEL: &str = "whatsapp";

/// 模板正文参数的最大长度（字符）
pub const MAX_PARAM_CHARS: usize = 1024;

pub fn truncate_param(value: &str) -> String {
    value.chars().take(MAX_PARAM_CHARS).collect()
}

/// 四个位置参数：姓名、邮箱、电话、留言
pub fn build_template_payload(config: &WhatsAppConfig, event: &ContactEvent) -> Value {
    let parameters: Vec<Value> = [&event.name, &event.email, &event.phone, &event.message]
        .into_iter()
        .map(|p| json!({ "type": "text", "text": truncate_param(p) }))
        .collect();

    json!({
        "messaging_product": "whatsapp",
        "to": config.recipient_number,
        "type": "template",
        "template": {
            "name": config.template_name,
            "language": { "code": config.template_language },
            "components": [
                { "type": "body", "parameters": parameters }
            ]
        }
    })
}

pub struct WhatsAppChannel {
    config: WhatsAppConfig,
    agent: Agent,
}

impl WhatsAppChannel {
    pub fn new(config: WhatsAppConfig) -> Self {
        let agent = Agent::config_builder()
            .timeout_global(Some(Duration::from_secs(config.timeout_secs)))
            .http_status_as_error(false)
            .build()
            .into();
        Self { config, agent }
    }

    pub fn endpoint(&self) -> String {
        format!(
            "{}/{}/{}/messages",
            self.config.api_base_url.trim_end_matches('/'),
            self.config.api_version.trim_matches('/'),
            self.config.phone_number_id
        )
    }

    /// 顺序与检查项一一对应：token、phone_number_id、接收号码
    fn check_config(&self) -> Result<(), &'static str> {
        if !self.config.enabled {
            return Err("Canal de WhatsApp deshabilitado");
        }
        if self.config.access_token.trim().is_empty() {
            return Err("WHATSAPP_TOKEN no configurado");
        }
        if self.config.phone_number_id.trim().is_empty() {
            return Err("WHATSAPP_PHONE_NUMBER_ID no configurado");
        }
        if self.config.recipient_number.trim().is_empty() {
            return Err("Número destino no configurado");
        }
        Ok(())
    }

    fn send_sync(agent: Agent, url: String, token: String, payload: Value) -> DeliveryReport {
        let mut response = match agent
            .post(&url)
            .header("Authorization", &format!("Bearer {}", token))
            .send_json(&payload)
        {
            Ok(r) => r,
            Err(e) => {
                warn!("WhatsApp request to {} failed: {}", url, e);
                return DeliveryReport::failed(CHANNEL, format!("Excepción: {}", e));
            }
        };

        let status = response.status().as_u16();
        let body = match response.body_mut().read_to_string() {
            Ok(body) => body,
            Err(e) => {
                warn!("WhatsApp response {} body unreadable: {}", status, e);
                return DeliveryReport::failed(
                    CHANNEL,
                    format!("Error {}: respuesta ilegible ({})", status, e),
                );
            }
        };
        let parsed: Option<Value> = serde_json::from_str(&body).ok();
        debug!("WhatsApp response {}: {}", status, body);

        if status == 200 {
            DeliveryReport::ok(CHANNEL, "Mensaje enviado exitosamente").with_response(parsed)
        } else {
            warn!("WhatsApp error {}: {}", status, body);
            DeliveryReport::failed(CHANNEL, format!("Error {}: {}", status, body))
                .with_response(parsed)
        }
    }
}

#[async_trait]
impl NotificationChannel for WhatsAppChannel {
    async fn deliver(&self, event: &ContactEvent) -> DeliveryReport {
        if let Err(reason) = self.check_config() {
            return DeliveryReport::failed(CHANNEL, reason);
        }

        let agent = self.agent.clone();
        let url = self.endpoint();
        let token = self.config.access_token.clone();
        let payload = build_template_payload(&self.config, event);

        tokio::task::spawn_blocking(move || Self::send_sync(agent, url, token, payload))
            .await
            .unwrap_or_else(|e| {
                warn!("WhatsApp spawn_blocking failed: {}", e);
                DeliveryReport::failed(CHANNEL, format!("Excepción: {}", e))
            })
    }

    fn name(&self) -> &'static str {
        CHANNEL
    }

    fn enabled(&self) -> bool {
        self.config.enabled
    }
}
