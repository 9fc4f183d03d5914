//! API 帮助函数

use actix_web::http::StatusCode;
use actix_web::{HttpRequest, HttpResponse, error, web};
use serde::Serialize;
use tracing::{error, warn};

use crate::errors::{Result, TravelError};

use super::error_code::ErrorCode;
use super::types::ErrorBody;

/// 构建 JSON 响应
pub fn json_response<T: Serialize>(status: StatusCode, body: &T) -> HttpResponse {
    HttpResponse::build(status)
        .append_header(("Content-Type", "application/json; charset=utf-8"))
        .json(body)
}

/// 从 TravelError 构建错误响应（自动映射 HTTP 状态码和 ErrorCode）
pub fn error_response(err: &TravelError) -> HttpResponse {
    let status = err.http_status();
    if status.is_server_error() {
        error!("API error: {}", err);
    } else {
        warn!("API request rejected: {}", err);
    }
    json_response(status, &ErrorBody::from_error(err))
}

/// 统一 Result → HttpResponse 转换，成功时 200 + 原样 JSON
pub fn api_result<T: Serialize>(result: Result<T>) -> HttpResponse {
    match result {
        Ok(data) => json_response(StatusCode::OK, &data),
        Err(e) => error_response(&e),
    }
}

/// 同上，成功时 201
pub fn created_result<T: Serialize>(result: Result<T>) -> HttpResponse {
    match result {
        Ok(data) => json_response(StatusCode::CREATED, &data),
        Err(e) => error_response(&e),
    }
}

/// 请求体无法解析时返回统一错误体
pub fn json_error_handler(err: error::JsonPayloadError, _req: &HttpRequest) -> actix_web::Error {
    let body = ErrorBody::new(
        ErrorCode::BadRequest,
        format!("Cuerpo de la solicitud inválido: {}", err),
    );
    error::InternalError::from_response(err, json_response(StatusCode::BAD_REQUEST, &body)).into()
}

/// 路径参数无法解析（例如非数字 id）视为不存在
pub fn path_error_handler(err: error::PathError, _req: &HttpRequest) -> actix_web::Error {
    let body = ErrorBody::new(ErrorCode::NotFound, "No encontrado.");
    error::InternalError::from_response(err, json_response(StatusCode::NOT_FOUND, &body)).into()
}

pub fn json_config() -> web::JsonConfig {
    web::JsonConfig::default()
        .limit(256 * 1024)
        .error_handler(json_error_handler)
}

pub fn path_config() -> web::PathConfig {
    web::PathConfig::default().error_handler(path_error_handler)
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::body::to_bytes;

    #[actix_rt::test]
    async fn test_error_response_maps_status() {
        let resp = error_response(&TravelError::conflict("duplicado"));
        assert_eq!(resp.status(), StatusCode::CONFLICT);

        let body = to_bytes(resp.into_body()).await.unwrap();
        let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(json["code"], 3000);
        assert_eq!(json["message"], "duplicado");
    }

    #[actix_rt::test]
    async fn test_created_result() {
        let resp = created_result(Ok(serde_json::json!({"id": 1})));
        assert_eq!(resp.status(), StatusCode::CREATED);
    }
}
