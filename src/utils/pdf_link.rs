//! Google Drive PDF 链接校验与规范化
//!
//! 合法格式：`https://drive.google.com/file/d/<id>/(view|edit|preview)[?...]`
//! 存储前统一改写为 `/preview` 结尾（用于 iframe 嵌入）。

use url::Url;

const DRIVE_FILE_PREFIX: &str = "https://drive.google.com/file/d/";
const ALLOWED_ACTIONS: &[&str] = &["view", "edit", "preview"];

/// PDF 链接校验错误
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PdfLinkError {
    InvalidPrefix,
    InvalidFileId(String),
    InvalidAction(String),
    InvalidFormat(String),
}

impl std::fmt::Display for PdfLinkError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidPrefix => write!(
                f,
                "El enlace debe comenzar con {}",
                DRIVE_FILE_PREFIX
            ),
            Self::InvalidFileId(id) => write!(f, "Identificador de archivo inválido: '{}'", id),
            Self::InvalidAction(action) => write!(
                f,
                "Acción '{}' no permitida. Use view, edit o preview",
                action
            ),
            Self::InvalidFormat(msg) => write!(f, "Formato de enlace inválido: {}", msg),
        }
    }
}

impl std::error::Error for PdfLinkError {}

fn is_valid_file_id(id: &str) -> bool {
    !id.is_empty()
        && id
            .bytes()
            .all(|b| b.is_ascii_alphanumeric() || b == b'_' || b == b'-')
}

/// 校验 Drive 文件链接
pub fn validate_pdf_link(link: &str) -> Result<(), PdfLinkError> {
    let rest = link
        .strip_prefix(DRIVE_FILE_PREFIX)
        .ok_or(PdfLinkError::InvalidPrefix)?;

    let path = rest.split_once('?').map_or(rest, |(path, _)| path);
    let (file_id, action) = path
        .split_once('/')
        .ok_or_else(|| PdfLinkError::InvalidAction(String::new()))?;

    if !is_valid_file_id(file_id) {
        return Err(PdfLinkError::InvalidFileId(file_id.to_string()));
    }
    if !ALLOWED_ACTIONS.contains(&action) {
        return Err(PdfLinkError::InvalidAction(action.to_string()));
    }

    Url::parse(link).map_err(|e| PdfLinkError::InvalidFormat(e.to_string()))?;
    Ok(())
}

/// `/view`、`/edit`（可带查询串）改写为 `/preview`，其余原样返回
///
/// 幂等：对结果再次调用不会改变它。
pub fn normalize_pdf_link(link: &str) -> String {
    let path = link.split_once('?').map_or(link, |(path, _)| path);
    for suffix in ["/view", "/edit"] {
        if let Some(base) = path.strip_suffix(suffix) {
            return format!("{}/preview", base);
        }
    }
    link.to_string()
}

/// 写入路径使用：去空白、空值视为 None、校验后规范化
pub fn clean_pdf_link(raw: Option<&str>) -> Result<Option<String>, PdfLinkError> {
    let Some(link) = raw.map(str::trim).filter(|s| !s.is_empty()) else {
        return Ok(None);
    };
    validate_pdf_link(link)?;
    Ok(Some(normalize_pdf_link(link)))
}
