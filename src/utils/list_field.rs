//! 列表型字段（酒店服务、车辆配置、套餐景点）
//!
//! 数据库中以 JSON 数组保存；旧数据和旧客户端可能仍是逗号分隔文本。

use serde::{Deserialize, Serialize};

/// 逗号分隔文本 → 有序列表：按逗号切分、去除首尾空白、丢弃空项、保持顺序
pub fn split_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

/// 解码数据库中的列表列
///
/// 优先按 JSON 数组解析，失败时回退到逗号分隔文本。
pub fn decode_list(stored: &str) -> Vec<String> {
    let trimmed = stored.trim();
    if trimmed.starts_with('[')
        && let Ok(items) = serde_json::from_str::<Vec<String>>(trimmed)
    {
        return items
            .into_iter()
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();
    }
    split_list(trimmed)
}

/// 编码为数据库存储格式（JSON 数组）
pub fn encode_list(items: &[String]) -> String {
    serde_json::to_string(items).unwrap_or_else(|_| "[]".to_string())
}

/// 写入接口接受的列表输入：JSON 数组或旧式逗号文本
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ListInput {
    Items(Vec<String>),
    Legacy(String),
}

impl Default for ListInput {
    fn default() -> Self {
        ListInput::Items(Vec::new())
    }
}

impl ListInput {
    pub fn into_items(self) -> Vec<String> {
        match self {
            ListInput::Items(items) => items
                .into_iter()
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty())
                .collect(),
            ListInput::Legacy(raw) => split_list(&raw),
        }
    }
}
