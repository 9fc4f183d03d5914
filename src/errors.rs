use std::collections::BTreeMap;
use std::fmt;

use actix_web::http::StatusCode;
use serde::Serialize;

/// 字段级校验错误：字段名 → 错误消息列表
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct FieldErrors(BTreeMap<String, Vec<String>>);

impl FieldErrors {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, field: impl Into<String>, message: impl Into<String>) {
        self.0.entry(field.into()).or_default().push(message.into());
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn contains(&self, field: &str) -> bool {
        self.0.contains_key(field)
    }

    pub fn get(&self, field: &str) -> Option<&[String]> {
        self.0.get(field).map(Vec::as_slice)
    }

    pub fn fields(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    pub fn merge(&mut self, other: FieldErrors) {
        for (field, messages) in other.0 {
            self.0.entry(field).or_default().extend(messages);
        }
    }

    /// 没有错误时返回 Ok，否则转换为 Validation 错误
    pub fn into_result(self) -> Result<()> {
        if self.is_empty() {
            Ok(())
        } else {
            Err(TravelError::invalid_fields(self))
        }
    }
}

#[derive(Debug, Clone)]
pub enum TravelError {
    Config(String),
    DatabaseConfig(String),
    DatabaseConnection(String),
    DatabaseOperation(String),
    FileOperation(String),
    Validation {
        message: String,
        fields: FieldErrors,
    },
    NotFound(String),
    Conflict(String),
    Serialization(String),
}

impl TravelError {
    /// 获取错误代码
    pub fn code(&self) -> &'static str {
        match self {
            TravelError::Config(_) => "E001",
            TravelError::DatabaseConfig(_) => "E003",
            TravelError::DatabaseConnection(_) => "E004",
            TravelError::DatabaseOperation(_) => "E005",
            TravelError::FileOperation(_) => "E006",
            TravelError::Validation { .. } => "E007",
            TravelError::NotFound(_) => "E008",
            TravelError::Serialization(_) => "E009",
            TravelError::Conflict(_) => "E010",
        }
    }

    /// 获取错误类型名称
    pub fn error_type(&self) -> &'static str {
        match self {
            TravelError::Config(_) => "Configuration Error",
            TravelError::DatabaseConfig(_) => "Database Configuration Error",
            TravelError::DatabaseConnection(_) => "Database Connection Error",
            TravelError::DatabaseOperation(_) => "Database Operation Error",
            TravelError::FileOperation(_) => "File Operation Error",
            TravelError::Validation { .. } => "Validation Error",
            TravelError::NotFound(_) => "Resource Not Found",
            TravelError::Serialization(_) => "Serialization Error",
            TravelError::Conflict(_) => "Conflict",
        }
    }

    /// 获取错误详情
    pub fn message(&self) -> &str {
        match self {
            TravelError::Config(msg) => msg,
            TravelError::DatabaseConfig(msg) => msg,
            TravelError::DatabaseConnection(msg) => msg,
            TravelError::DatabaseOperation(msg) => msg,
            TravelError::FileOperation(msg) => msg,
            TravelError::Validation { message, .. } => message,
            TravelError::NotFound(msg) => msg,
            TravelError::Serialization(msg) => msg,
            TravelError::Conflict(msg) => msg,
        }
    }

    /// 字段级错误（仅 Validation 有）
    pub fn field_errors(&self) -> Option<&FieldErrors> {
        match self {
            TravelError::Validation { fields, .. } if !fields.is_empty() => Some(fields),
            _ => None,
        }
    }

    /// 映射到 HTTP 状态码
    pub fn http_status(&self) -> StatusCode {
        match self {
            TravelError::Validation { .. } => StatusCode::BAD_REQUEST,
            TravelError::NotFound(_) => StatusCode::NOT_FOUND,
            TravelError::Conflict(_) => StatusCode::CONFLICT,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// 格式化为彩色输出（用于启动失败等终端场景）
    pub fn format_colored(&self) -> String {
        use colored::Colorize;
        format!(
            "{} {} {}\n  {}",
            "[ERROR]".red().bold(),
            self.code().yellow(),
            self.error_type().red(),
            self.message().white()
        )
    }

    /// 格式化为简洁输出
    pub fn format_simple(&self) -> String {
        format!("{}: {}", self.error_type(), self.message())
    }
}

impl fmt::Display for TravelError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.format_simple())
    }
}

impl std::error::Error for TravelError {}

// 便捷的构造函数
impl TravelError {
    pub fn config<T: Into<String>>(msg: T) -> Self {
        TravelError::Config(msg.into())
    }

    pub fn database_config<T: Into<String>>(msg: T) -> Self {
        TravelError::DatabaseConfig(msg.into())
    }

    pub fn database_connection<T: Into<String>>(msg: T) -> Self {
        TravelError::DatabaseConnection(msg.into())
    }

    pub fn database_operation<T: Into<String>>(msg: T) -> Self {
        TravelError::DatabaseOperation(msg.into())
    }

    pub fn file_operation<T: Into<String>>(msg: T) -> Self {
        TravelError::FileOperation(msg.into())
    }

    pub fn validation<T: Into<String>>(msg: T) -> Self {
        TravelError::Validation {
            message: msg.into(),
            fields: FieldErrors::new(),
        }
    }

    /// 单字段校验错误（查询参数、路径参数等）
    pub fn invalid_field(field: &str, msg: impl Into<String>) -> Self {
        let mut fields = FieldErrors::new();
        let msg = msg.into();
        fields.add(field, msg.clone());
        TravelError::Validation {
            message: format!("{}: {}", field, msg),
            fields,
        }
    }

    pub fn invalid_fields(fields: FieldErrors) -> Self {
        let names: Vec<&str> = fields.fields().collect();
        TravelError::Validation {
            message: format!("Invalid fields: {}", names.join(", ")),
            fields,
        }
    }

    pub fn not_found<T: Into<String>>(msg: T) -> Self {
        TravelError::NotFound(msg.into())
    }

    pub fn conflict<T: Into<String>>(msg: T) -> Self {
        TravelError::Conflict(msg.into())
    }

    pub fn serialization<T: Into<String>>(msg: T) -> Self {
        TravelError::Serialization(msg.into())
    }
}

// 唯一约束冲突映射为 Conflict，调用方可按更新路径重试；外键违反视为输入错误
impl From<sea_orm::DbErr> for TravelError {
    fn from(err: sea_orm::DbErr) -> Self {
        match err.sql_err() {
            Some(sea_orm::SqlErr::UniqueConstraintViolation(msg)) => TravelError::Conflict(msg),
            Some(sea_orm::SqlErr::ForeignKeyConstraintViolation(msg)) => {
                TravelError::validation(format!("Referencia inválida: {}", msg))
            }
            _ => TravelError::DatabaseOperation(err.to_string()),
        }
    }
}

impl From<std::io::Error> for TravelError {
    fn from(err: std::io::Error) -> Self {
        TravelError::FileOperation(err.to_string())
    }
}

impl From<serde_json::Error> for TravelError {
    fn from(err: serde_json::Error) -> Self {
        TravelError::Serialization(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, TravelError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_field_errors_into_result() {
        let empty = FieldErrors::new();
        assert!(empty.into_result().is_ok());

        let mut errors = FieldErrors::new();
        errors.add("email", "Introduzca una dirección de correo electrónico válida.");
        errors.add("email", "otro");
        let err = errors.into_result().unwrap_err();
        assert_eq!(err.http_status(), StatusCode::BAD_REQUEST);
        let fields = err.field_errors().unwrap();
        assert_eq!(fields.get("email").unwrap().len(), 2);
        assert!(err.message().contains("email"));
    }

    #[test]
    fn test_http_status_mapping() {
        assert_eq!(
            TravelError::not_found("x").http_status(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            TravelError::conflict("x").http_status(),
            StatusCode::CONFLICT
        );
        assert_eq!(
            TravelError::database_operation("x").http_status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_invalid_field_names_parameter() {
        let err = TravelError::invalid_field("precio_max", "Introduzca un número válido.");
        assert!(err.message().starts_with("precio_max"));
        assert!(err.field_errors().unwrap().contains("precio_max"));
    }

    #[test]
    fn test_db_err_maps_to_operation() {
        let err: TravelError = sea_orm::DbErr::RecordNotFound("gone".to_string()).into();
        assert!(matches!(err, TravelError::DatabaseOperation(_)));
    }
}
