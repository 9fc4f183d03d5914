//! 表单字段校验
//!
//! 错误信息沿用前端已经适配的西班牙语文案；所有错误累积到 `FieldErrors`，
//! 由调用方一次性返回。

use crate::errors::FieldErrors;

pub const REQUIRED: &str = "Este campo es requerido.";
pub const BLANK: &str = "Este campo no puede estar en blanco.";
pub const INVALID_EMAIL: &str = "Introduzca una dirección de correo electrónico válida.";
pub const INVALID_NUMBER: &str = "Introduzca un número válido.";

pub fn max_length_message(max: usize) -> String {
    format!(
        "Asegúrese de que este campo no tenga más de {} caracteres.",
        max
    )
}

pub fn min_value_message(min: impl std::fmt::Display) -> String {
    format!("Asegúrese de que este valor es mayor o igual a {}.", min)
}

pub fn max_value_message(max: impl std::fmt::Display) -> String {
    format!("Asegúrese de que este valor es menor o igual a {}.", max)
}

pub fn invalid_choice_message(value: &str) -> String {
    format!("\"{}\" no es una elección válida.", value)
}

/// 必填文本：缺失、空白、超长都记录错误；长度按字符计
pub fn required_text(
    errors: &mut FieldErrors,
    field: &str,
    value: Option<&str>,
    max: usize,
) -> Option<String> {
    let Some(value) = value else {
        errors.add(field, REQUIRED);
        return None;
    };
    let value = value.trim();
    if value.is_empty() {
        errors.add(field, BLANK);
        return None;
    }
    if value.chars().count() > max {
        errors.add(field, max_length_message(max));
        return None;
    }
    Some(value.to_string())
}

/// 可选文本：缺失或空白返回 None，超长记录错误
pub fn optional_text(
    errors: &mut FieldErrors,
    field: &str,
    value: Option<&str>,
    max: usize,
) -> Option<String> {
    let value = value.map(str::trim).filter(|v| !v.is_empty())?;
    if value.chars().count() > max {
        errors.add(field, max_length_message(max));
        return None;
    }
    Some(value.to_string())
}

/// 必填邮箱：先按文本校验，再用 lettre 解析地址格式
pub fn required_email(
    errors: &mut FieldErrors,
    field: &str,
    value: Option<&str>,
    max: usize,
) -> Option<String> {
    let value = required_text(errors, field, value, max)?;
    match value.parse::<lettre::Address>() {
        Ok(_) => Some(normalize_email(&value)),
        Err(_) => {
            errors.add(field, INVALID_EMAIL);
            None
        }
    }
}

/// 域名部分转小写，本地部分保持原样
pub fn normalize_email(email: &str) -> String {
    let email = email.trim();
    match email.rsplit_once('@') {
        Some((local, domain)) => format!("{}@{}", local, domain.to_lowercase()),
        None => email.to_string(),
    }
}

/// 数值区间校验
pub fn check_range<T>(errors: &mut FieldErrors, field: &str, value: T, min: T, max: Option<T>)
where
    T: PartialOrd + std::fmt::Display + Copy,
{
    if value < min {
        errors.add(field, min_value_message(min));
    } else if let Some(max) = max
        && value > max
    {
        errors.add(field, max_value_message(max));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_required_text() {
        let mut errors = FieldErrors::new();
        assert_eq!(
            required_text(&mut errors, "nombre", Some("  Ana Ruiz "), 50),
            Some("Ana Ruiz".to_string())
        );
        assert!(errors.is_empty());

        assert_eq!(required_text(&mut errors, "a", None, 50), None);
        assert_eq!(required_text(&mut errors, "b", Some("   "), 50), None);
        assert_eq!(required_text(&mut errors, "c", Some("abcdef"), 5), None);
        assert_eq!(errors.get("a").unwrap(), [REQUIRED]);
        assert_eq!(errors.get("b").unwrap(), [BLANK]);
        assert_eq!(errors.get("c").unwrap(), [max_length_message(5)]);
    }

    #[test]
    fn test_length_counts_characters_not_bytes() {
        let mut errors = FieldErrors::new();
        // 5 个字符，10 个字节
        assert!(required_text(&mut errors, "x", Some("ñáéíó"), 5).is_some());
        assert!(errors.is_empty());
    }

    #[test]
    fn test_optional_text() {
        let mut errors = FieldErrors::new();
        assert_eq!(optional_text(&mut errors, "telefono", None, 20), None);
        assert_eq!(optional_text(&mut errors, "telefono", Some(""), 20), None);
        assert!(errors.is_empty());
        assert_eq!(
            optional_text(&mut errors, "telefono", Some(&"9".repeat(21)), 20),
            None
        );
        assert!(errors.contains("telefono"));
    }

    #[test]
    fn test_required_email() {
        let mut errors = FieldErrors::new();
        assert_eq!(
            required_email(&mut errors, "email", Some("Ana@X.COM"), 80),
            Some("Ana@x.com".to_string())
        );
        assert!(errors.is_empty());

        assert_eq!(required_email(&mut errors, "email", Some("no-es-correo"), 80), None);
        assert_eq!(errors.get("email").unwrap(), [INVALID_EMAIL]);
    }

    #[test]
    fn test_check_range() {
        let mut errors = FieldErrors::new();
        check_range(&mut errors, "estrellas", 3, 1, Some(5));
        assert!(errors.is_empty());
        check_range(&mut errors, "estrellas", 6, 1, Some(5));
        check_range(&mut errors, "precio", -1.0, 0.0, None);
        assert_eq!(errors.get("estrellas").unwrap(), [max_value_message(5)]);
        assert_eq!(errors.get("precio").unwrap(), [min_value_message(0.0)]);
    }
}
