//! SMTP 邮件渠道（lettre，同步发送放在 spawn_blocking 中）

use std::path::Path;
use std::time::Duration;

use async_trait::async_trait;
use lettre::message::header::ContentType;
use lettre::message::{Attachment, Mailbox, MultiPart, SinglePart};
use lettre::transport::smtp::authentication::Credentials;
use lettre::{Message, SmtpTransport, Transport};
use tracing::{debug, warn};

use super::templates::{self, LOGO_CONTENT_ID};
use super::{ContactEvent, DeliveryReport, NotificationChannel};
use crate::config::EmailConfig;

const CHANNEL: &str = "email";

pub struct EmailChannel {
    config: EmailConfig,
}

impl EmailChannel {
    pub fn new(config: EmailConfig) -> Self {
        Self { config }
    }

    /// 缺失配置时返回说明
    fn check_config(&self) -> Result<(), String> {
        if !self.config.enabled {
            return Err("Canal de correo deshabilitado".to_string());
        }
        if self.config.smtp_host.trim().is_empty() {
            return Err("Servidor SMTP no configurado".to_string());
        }
        if self.config.recipients.iter().all(|r| r.trim().is_empty()) {
            return Err("No hay destinatarios configurados".to_string());
        }
        Ok(())
    }

    fn build_message(config: &EmailConfig, event: &ContactEvent) -> Result<Message, String> {
        let from: Mailbox = config
            .from_address
            .parse()
            .map_err(|e| format!("Remitente inválido '{}': {}", config.from_address, e))?;

        let mut builder = Message::builder().from(from).subject(config.subject.clone());
        for recipient in config.recipients.iter().filter(|r| !r.trim().is_empty()) {
            let mailbox: Mailbox = recipient
                .trim()
                .parse()
                .map_err(|e| format!("Destinatario inválido '{}': {}", recipient, e))?;
            builder = builder.to(mailbox);
        }

        let logo = config
            .logo_path
            .as_deref()
            .filter(|p| Path::new(p).is_file())
            .and_then(|p| match std::fs::read(p) {
                Ok(bytes) => Some(bytes),
                Err(e) => {
                    warn!("Email: cannot read logo {}: {}", p, e);
                    None
                }
            });

        let text = templates::render_text(event);
        let html = templates::render_html(event, logo.is_some());

        let body = match logo {
            Some(bytes) => {
                let png = ContentType::parse("image/png").map_err(|e| e.to_string())?;
                MultiPart::alternative()
                    .singlepart(SinglePart::plain(text))
                    .multipart(
                        MultiPart::related()
                            .singlepart(SinglePart::html(html))
                            .singlepart(
                                Attachment::new_inline(LOGO_CONTENT_ID.to_string()).body(bytes, png),
                            ),
                    )
            }
            None => MultiPart::alternative_plain_html(text, html),
        };

        builder
            .multipart(body)
            .map_err(|e| format!("Error construyendo el correo: {}", e))
    }

    fn build_transport(config: &EmailConfig) -> Result<SmtpTransport, String> {
        let host = config.smtp_host.trim();
        let builder = match config.tls.to_ascii_lowercase().as_str() {
            "tls" | "ssl" => SmtpTransport::relay(host).map_err(|e| e.to_string())?,
            "none" => SmtpTransport::builder_dangerous(host),
            _ => SmtpTransport::starttls_relay(host).map_err(|e| e.to_string())?,
        };

        let mut builder = builder
            .port(config.smtp_port)
            .timeout(Some(Duration::from_secs(config.timeout_secs)));
        if let (Some(user), Some(pass)) = (&config.smtp_username, &config.smtp_password) {
            builder = builder.credentials(Credentials::new(user.clone(), pass.clone()));
        }
        Ok(builder.build())
    }

    /// 同步发送（在 spawn_blocking 中调用）
    fn send_sync(config: EmailConfig, event: ContactEvent) -> DeliveryReport {
        let message = match Self::build_message(&config, &event) {
            Ok(m) => m,
            Err(e) => return DeliveryReport::failed(CHANNEL, e),
        };
        let transport = match Self::build_transport(&config) {
            Ok(t) => t,
            Err(e) => return DeliveryReport::failed(CHANNEL, format!("Error enviando correo: {}", e)),
        };

        match transport.send(&message) {
            Ok(response) => {
                debug!("Email: SMTP accepted with code {}", response.code());
                DeliveryReport::ok(CHANNEL, "Correo enviado exitosamente")
            }
            Err(e) => DeliveryReport::failed(CHANNEL, format!("Error enviando correo: {}", e)),
        }
    }
}

#[async_trait]
impl NotificationChannel for EmailChannel {
    async fn deliver(&self, event: &ContactEvent) -> DeliveryReport {
        if let Err(reason) = self.check_config() {
            return DeliveryReport::failed(CHANNEL, reason);
        }

        let config = self.config.clone();
        let event = event.clone();
        tokio::task::spawn_blocking(move || Self::send_sync(config, event))
            .await
            .unwrap_or_else(|e| {
                warn!("Email spawn_blocking failed: {}", e);
                DeliveryReport::failed(CHANNEL, format!("Error enviando correo: {}", e))
            })
    }

    fn name(&self) -> &'static str {
        CHANNEL
    }

    fn enabled(&self) -> bool {
        self.config.enabled
    }
}
