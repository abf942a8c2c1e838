//! 解码事件（DecodedEvent）
//!
//! 负载必须是 UTF-8 编码的 JSON 对象；`event_type`/`event_name` 为可选的分类键，
//! 其余字段原样保留，对核心不透明。解码要么完全成功，要么整体失败。
//! 分类键不是字符串时视为缺失，按正常顺序回退。
//!
use crate::error::DecodeError;
use bon::Builder;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

#[derive(Debug, Clone, Default, PartialEq, Builder, Serialize, Deserialize)]
pub struct DecodedEvent {
    /// 主分类键
    #[builder(into)]
    #[serde(default)]
    event_type: Option<Value>,
    /// 次分类键
    #[builder(into)]
    #[serde(default)]
    event_name: Option<Value>,
    /// 其余领域字段
    #[builder(default)]
    #[serde(flatten)]
    fields: Map<String, Value>,
}

impl DecodedEvent {
    pub fn decode(payload: &[u8]) -> Result<Self, DecodeError> {
        let text = std::str::from_utf8(payload)?;
        Ok(serde_json::from_str(text)?)
    }

    pub fn event_type(&self) -> Option<&str> {
        self.event_type.as_ref().and_then(Value::as_str)
    }

    pub fn event_name(&self) -> Option<&str> {
        self.event_name.as_ref().and_then(Value::as_str)
    }

    pub fn field(&self, key: &str) -> Option<&Value> {
        self.fields.get(key)
    }

    pub fn fields(&self) -> &Map<String, Value> {
        &self.fields
    }
}
