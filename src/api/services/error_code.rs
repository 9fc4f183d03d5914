//! 统一 API 错误码定义

use serde_repr::{Deserialize_repr, Serialize_repr};
use ts_rs::TS;

use crate::errors::TravelError;
use crate::services::views::TS_EXPORT_PATH;

/// API 错误码枚举
///
/// 使用 serde_repr 序列化为数字，ts-rs 自动生成 TypeScript 类型。
/// 按千位分域：
/// - 0: 成功
/// - 1000-1099: 通用错误
/// - 2000-2099: 输入校验
/// - 3000-3099: 数据冲突
/// - 4000-4099: 基础设施
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize_repr, Deserialize_repr, TS)]
#[ts(export, export_to = TS_EXPORT_PATH)]
#[ts(rename = "ErrorCode")]
#[ts(repr(enum))]
#[repr(i32)]
pub enum ErrorCode {
    Success = 0,

    BadRequest = 1000,
    Unauthorized = 1001,
    NotFound = 1004,
    InternalServerError = 1005,
    ServiceUnavailable = 1030,

    ValidationFailed = 2000,

    Conflict = 3000,

    DatabaseError = 4000,
    ConfigError = 4001,
}

impl From<&TravelError> for ErrorCode {
    fn from(err: &TravelError) -> Self {
        match err {
            TravelError::Validation { .. } => ErrorCode::ValidationFailed,
            TravelError::NotFound(_) => ErrorCode::NotFound,
            TravelError::Conflict(_) => ErrorCode::Conflict,
            TravelError::DatabaseConfig(_)
            | TravelError::DatabaseConnection(_)
            | TravelError::DatabaseOperation(_) => ErrorCode::DatabaseError,
            TravelError::Config(_) => ErrorCode::ConfigError,
            TravelError::FileOperation(_) | TravelError::Serialization(_) => {
                ErrorCode::InternalServerError
            }
        }
    }
}
