//! Contact capture tests
//!
//! Customer dedupe by email, request logging and notification isolation
//! against a temporary SQLite store.

mod common;

use std::sync::Arc;

use common::{FixedChannel, dispatcher, test_storage};
use travel_catalog::errors::TravelError;
use travel_catalog::services::{ContactInput, ContactService, MessageInput, NotificationDispatcher};

fn contact(name: &str, email: &str, phone: &str, message: &str) -> ContactInput {
    ContactInput {
        nombre_completo: Some(name.to_string()),
        email: Some(email.to_string()),
        telefono: Some(phone.to_string()),
        mensaje: Some(message.to_string()),
    }
}

#[tokio::test]
async fn test_new_email_creates_customer() {
    let db = test_storage().await;
    let service = ContactService::new(db.storage.clone(), NotificationDispatcher::disabled());

    let outcome = service
        .submit_contact(&contact("Ana Ruiz", "ana@x.com", "0991234567", "Quiero info"))
        .await
        .unwrap();

    assert!(outcome.captured.created);
    assert_eq!(outcome.captured.customer.full_name, "Ana Ruiz");
    assert!(!outcome.captured.request.handled);
    assert!(outcome.notifications.is_empty());

    let customers = service.list_customers().await.unwrap();
    assert_eq!(customers.len(), 1);
    assert_eq!(customers[0].solicitudes.len(), 1);
}

#[tokio::test]
async fn test_known_email_updates_name_and_phone() {
    let db = test_storage().await;
    let service = ContactService::new(db.storage.clone(), NotificationDispatcher::disabled());

    let first = service
        .submit_contact(&contact("Ana Ruiz", "ana@x.com", "0991234567", "Quiero info"))
        .await
        .unwrap();
    let second = service
        .submit_contact(&contact("Ana R.", "ana@x.com", "0987654321", "Otra consulta"))
        .await
        .unwrap();

    assert!(!second.captured.created);
    assert_eq!(second.captured.customer.id, first.captured.customer.id);
    assert_eq!(second.captured.customer.full_name, "Ana R.");
    assert_eq!(second.captured.customer.phone, "0987654321");
    assert_eq!(second.captured.customer.email, "ana@x.com");
    assert_ne!(second.captured.request.id, first.captured.request.id);

    let customers = service.list_customers().await.unwrap();
    assert_eq!(customers.len(), 1);
    // 新到旧
    let messages: Vec<_> = customers[0]
        .solicitudes
        .iter()
        .map(|r| r.mensaje.as_str())
        .collect();
    assert_eq!(messages, vec!["Otra consulta", "Quiero info"]);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_submissions_share_one_customer() {
    const SUBMISSIONS: usize = 16;

    let db = test_storage().await;
    let service = Arc::new(ContactService::new(
        db.storage.clone(),
        NotificationDispatcher::disabled(),
    ));

    let handles: Vec<_> = (0..SUBMISSIONS)
        .map(|i| {
            let service = service.clone();
            tokio::spawn(async move {
                service
                    .submit_contact(&contact(
                        &format!("Cliente {}", i),
                        "race@x.com",
                        "0990000000",
                        &format!("consulta {}", i),
                    ))
                    .await
            })
        })
        .collect();

    let mut stored = 0;
    let mut created = 0;
    for handle in handles {
        match handle.await.unwrap() {
            Ok(outcome) => {
                stored += 1;
                if outcome.captured.created {
                    created += 1;
                }
            }
            Err(TravelError::Conflict(_)) => {}
            Err(other) => panic!("unexpected error: {:?}", other),
        }
    }

    assert!(stored > 0);
    assert_eq!(created, 1);

    let customers = service.list_customers().await.unwrap();
    assert_eq!(customers.len(), 1);
    assert_eq!(customers[0].solicitudes.len(), stored);
}

#[tokio::test]
async fn test_email_domain_case_is_normalized() {
    let db = test_storage().await;
    let service = ContactService::new(db.storage.clone(), NotificationDispatcher::disabled());

    service
        .submit_contact(&contact("Ana", "ana@X.COM", "099", "hola"))
        .await
        .unwrap();
    let again = service
        .submit_contact(&contact("Ana", "ana@x.com", "099", "hola de nuevo"))
        .await
        .unwrap();

    assert!(!again.captured.created);
    assert_eq!(service.list_customers().await.unwrap().len(), 1);
}

#[tokio::test]
async fn test_invalid_submission_persists_nothing() {
    let db = test_storage().await;
    let service = ContactService::new(db.storage.clone(), NotificationDispatcher::disabled());

    let err = service
        .submit_contact(&contact("", "no-es-correo", "0991234567", "hola"))
        .await
        .unwrap_err();

    match &err {
        TravelError::Validation { fields, .. } => {
            assert!(fields.contains("nombre_completo"));
            assert!(fields.contains("email"));
            assert!(!fields.contains("telefono"));
        }
        other => panic!("expected validation error, got {:?}", other),
    }
    assert!(service.list_customers().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_notification_failure_does_not_fail_capture() {
    let db = test_storage().await;
    let service = ContactService::new(
        db.storage.clone(),
        dispatcher(vec![FixedChannel::failing("email"), FixedChannel::ok("whatsapp")]),
    );

    let outcome = service
        .submit_contact(&contact("Luis", "luis@x.com", "0990000000", "Viaje a Cancún"))
        .await
        .unwrap();

    assert_eq!(outcome.notifications.len(), 2);
    assert!(!outcome.notifications[0].success);
    assert!(outcome.notifications[1].success);
    assert_eq!(service.list_customers().await.unwrap().len(), 1);
}

#[tokio::test]
async fn test_mark_request_handled() {
    let db = test_storage().await;
    let service = ContactService::new(db.storage.clone(), NotificationDispatcher::disabled());

    let outcome = service
        .submit_contact(&contact("Ana", "ana@x.com", "099", "hola"))
        .await
        .unwrap();

    let updated = service
        .set_request_handled(outcome.captured.request.id, true)
        .await
        .unwrap();
    assert!(updated.atendido);

    let reverted = service
        .set_request_handled(outcome.captured.request.id, false)
        .await
        .unwrap();
    assert!(!reverted.atendido);

    let missing = service.set_request_handled(9999, true).await.unwrap_err();
    assert!(matches!(missing, TravelError::NotFound(_)));
}

#[tokio::test]
async fn test_submit_message() {
    let db = test_storage().await;
    let service = ContactService::new(db.storage.clone(), NotificationDispatcher::disabled());

    let stored = service
        .submit_message(MessageInput {
            nombre: Some("Pedro".into()),
            email: Some("pedro@x.com".into()),
            telefono: None,
            asunto: Some("Grupos".into()),
            mensaje: Some("Somos 20 personas".into()),
        })
        .await
        .unwrap();

    assert!(stored.id > 0);
    assert!(!stored.leido);
    assert!(!stored.respondido);

    let err = service
        .submit_message(MessageInput {
            asunto: Some("x".repeat(201)),
            ..Default::default()
        })
        .await
        .unwrap_err();
    let fields = err.field_errors().unwrap();
    assert!(fields.contains("asunto"));
    assert!(fields.contains("nombre"));
}
