//! Contact capture service
//!
//! 校验 → 事务内 upsert 客户并记录请求 → 提交后分发通知。
//! 通知结果只记录在返回值和日志里，永远不会让请求失败。

use std::sync::Arc;

use chrono::Utc;
use serde::Deserialize;
use tracing::info;

use super::notification::{ContactEvent, DeliveryReport, NotificationDispatcher};
use super::views::{ContactMessageView, CustomerView, RequestView};
use crate::errors::{FieldErrors, Result};
use crate::storage::models::{CapturedContact, ContactMessage};
use crate::storage::{ContactSubmission, SeaOrmStorage};
use crate::utils::validation::{optional_text, required_email, required_text};

/// 公开联系表单
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ContactInput {
    pub nombre_completo: Option<String>,
    pub email: Option<String>,
    pub telefono: Option<String>,
    pub mensaje: Option<String>,
}

impl ContactInput {
    pub fn validate(&self) -> Result<ContactSubmission> {
        let mut errors = FieldErrors::new();
        let full_name = required_text(&mut errors, "nombre_completo", self.nombre_completo.as_deref(), 50);
        let email = required_email(&mut errors, "email", self.email.as_deref(), 80);
        let phone = required_text(&mut errors, "telefono", self.telefono.as_deref(), 15);
        let message = required_text(&mut errors, "mensaje", self.mensaje.as_deref(), 500);
        errors.into_result()?;

        Ok(ContactSubmission {
            full_name: full_name.unwrap_or_default(),
            email: email.unwrap_or_default(),
            phone: phone.unwrap_or_default(),
            message: message.unwrap_or_default(),
        })
    }
}

/// 通用留言表单
#[derive(Debug, Clone, Default, Deserialize)]
pub struct MessageInput {
    pub nombre: Option<String>,
    pub email: Option<String>,
    pub telefono: Option<String>,
    pub asunto: Option<String>,
    pub mensaje: Option<String>,
}

impl MessageInput {
    fn into_record(self) -> Result<ContactMessage> {
        let mut errors = FieldErrors::new();
        let name = required_text(&mut errors, "nombre", self.nombre.as_deref(), 100);
        let email = required_email(&mut errors, "email", self.email.as_deref(), 254);
        let phone = optional_text(&mut errors, "telefono", self.telefono.as_deref(), 20);
        let subject = required_text(&mut errors, "asunto", self.asunto.as_deref(), 200);
        let message = required_text(&mut errors, "mensaje", self.mensaje.as_deref(), 2000);
        errors.into_result()?;

        Ok(ContactMessage {
            id: 0,
            name: name.unwrap_or_default(),
            email: email.unwrap_or_default(),
            phone,
            subject: subject.unwrap_or_default(),
            message: message.unwrap_or_default(),
            sent_at: Utc::now(),
            read: false,
            replied: false,
        })
    }
}

/// 一次联系提交的完整结果
#[derive(Debug, Clone)]
pub struct ContactOutcome {
    pub captured: CapturedContact,
    pub notifications: Vec<DeliveryReport>,
}

pub struct ContactService {
    storage: Arc<SeaOrmStorage>,
    dispatcher: NotificationDispatcher,
}

impl ContactService {
    pub fn new(storage: Arc<SeaOrmStorage>, dispatcher: NotificationDispatcher) -> Self {
        Self {
            storage,
            dispatcher,
        }
    }

    pub fn notification_channels(&self) -> Vec<&'static str> {
        self.dispatcher.enabled_channels()
    }

    pub async fn submit_contact(&self, input: &ContactInput) -> Result<ContactOutcome> {
        let submission = input.validate()?;
        let captured = self.storage.capture_contact(&submission).await?;

        // 事务已提交
        let event = ContactEvent {
            name: captured.customer.full_name.clone(),
            email: captured.customer.email.clone(),
            phone: captured.customer.phone.clone(),
            message: captured.request.message.clone(),
        };
        let notifications = self.dispatcher.dispatch(&event).await;

        info!(
            "ContactService: request {} from customer {} (new={}), {}/{} notifications delivered",
            captured.request.id,
            captured.customer.id,
            captured.created,
            notifications.iter().filter(|r| r.success).count(),
            notifications.len()
        );

        Ok(ContactOutcome {
            captured,
            notifications,
        })
    }

    pub async fn list_customers(&self) -> Result<Vec<CustomerView>> {
        let customers = self.storage.list_customers_with_requests().await?;
        Ok(customers.iter().map(CustomerView::from).collect())
    }

    pub async fn set_request_handled(&self, request_id: i64, handled: bool) -> Result<RequestView> {
        let request = self.storage.set_request_handled(request_id, handled).await?;
        Ok(RequestView::from(&request))
    }

    pub async fn submit_message(&self, input: MessageInput) -> Result<ContactMessageView> {
        let record = input.into_record()?;
        let stored = self.storage.insert_contact_message(&record).await?;
        info!("ContactService: message {} stored", stored.id);
        Ok(ContactMessageView::from(&stored))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn input(name: &str, email: &str, phone: &str, message: &str) -> ContactInput {
        ContactInput {
            nombre_completo: Some(name.into()),
            email: Some(email.into()),
            telefono: Some(phone.into()),
            mensaje: Some(message.into()),
        }
    }

    #[test]
    fn test_valid_contact() {
        let s = input(" Ana Ruiz ", "ana@X.com", "0999", "Info Cancún")
            .validate()
            .unwrap();
        assert_eq!(s.full_name, "Ana Ruiz");
        assert_eq!(s.email, "ana@x.com");
    }

    #[test]
    fn test_contact_length_limits() {
        let err = input(
            &"n".repeat(51),
            "ana@x.com",
            &"1".repeat(16),
            &"m".repeat(501),
        )
        .validate()
        .unwrap_err();
        let fields = err.field_errors().unwrap();
        assert!(fields.contains("nombre_completo"));
        assert!(fields.contains("telefono"));
        assert!(fields.contains("mensaje"));
        assert!(!fields.contains("email"));
    }

    #[test]
    fn test_contact_missing_and_bad_email() {
        let err = ContactInput {
            email: Some("not-an-email".into()),
            ..Default::default()
        }
        .validate()
        .unwrap_err();
        let fields = err.field_errors().unwrap();
        assert_eq!(
            fields.fields().collect::<Vec<_>>(),
            vec!["email", "mensaje", "nombre_completo", "telefono"]
        );
    }

    #[test]
    fn test_message_limits() {
        let err = MessageInput {
            nombre: Some("Luis".into()),
            email: Some("luis@x.com".into()),
            telefono: Some("1".repeat(21)),
            asunto: Some("Consulta".into()),
            mensaje: Some("m".repeat(2001)),
        }
        .into_record()
        .unwrap_err();
        let fields = err.field_errors().unwrap();
        assert!(fields.contains("telefono"));
        assert!(fields.contains("mensaje"));
    }
}
