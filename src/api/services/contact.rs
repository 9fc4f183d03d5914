//! 公开写接口：联系表单与通用留言

use actix_web::http::StatusCode;
use actix_web::{HttpResponse, web};
use tracing::info;

use crate::services::{ContactInput, ContactService, MessageInput};

use super::helpers::{created_result, error_response, json_response};
use super::types::{ContactCreated, ContactCustomer};

pub const CONTACT_RECEIVED: &str = "Solicitud recibida correctamente";

pub struct ContactApi;

impl ContactApi {
    /// `POST /contacto/`
    ///
    /// 通知失败不影响响应；失败日志由 dispatcher 记录。
    pub async fn submit_contact(
        body: web::Json<ContactInput>,
        contact: web::Data<ContactService>,
    ) -> HttpResponse {
        let outcome = match contact.submit_contact(&body).await {
            Ok(outcome) => outcome,
            Err(e) => return error_response(&e),
        };

        let customer = &outcome.captured.customer;
        info!(
            "Contact request {} stored for {}",
            outcome.captured.request.id, customer.email
        );

        json_response(
            StatusCode::CREATED,
            &ContactCreated {
                success: true,
                message: CONTACT_RECEIVED.to_string(),
                cliente: ContactCustomer {
                    id: customer.id,
                    nombre_completo: customer.full_name.clone(),
                    email: customer.email.clone(),
                    es_nuevo: outcome.captured.created,
                },
                solicitud_id: outcome.captured.request.id,
            },
        )
    }

    /// `POST /mensajes/`
    pub async fn submit_message(
        body: web::Json<MessageInput>,
        contact: web::Data<ContactService>,
    ) -> HttpResponse {
        created_result(contact.submit_message(body.into_inner()).await)
    }
}
