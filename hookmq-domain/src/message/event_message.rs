//! 原始消息（EventMessage）
//!
//! Broker 每次投递生成的一次消费尝试；重投时 `message_id` 保持不变，
//! `reconsume_times` 递增。消费循环返回状态后即被丢弃。
//!
use bon::Builder;
use chrono::{DateTime, Utc};

#[derive(Debug, Clone, Builder)]
pub struct EventMessage {
    /// 消息标识（日志与关联用，对核心不透明）
    #[builder(into)]
    message_id: String,
    /// 所属主题
    #[builder(into)]
    topic: String,
    /// 原始负载
    #[builder(into)]
    body: Vec<u8>,
    /// 已重投次数，首次投递为 0
    #[builder(default)]
    reconsume_times: u32,
    /// 消息产生时间
    #[builder(default = Utc::now())]
    born_at: DateTime<Utc>,
}

impl EventMessage {
    pub fn message_id(&self) -> &str {
        &self.message_id
    }

    pub fn topic(&self) -> &str {
        &self.topic
    }

    pub fn body(&self) -> &[u8] {
        &self.body
    }

    pub fn reconsume_times(&self) -> u32 {
        self.reconsume_times
    }

    pub fn born_at(&self) -> DateTime<Utc> {
        self.born_at
    }

    /// 生成一次重投：同一标识，重投次数加一
    pub fn redelivery(&self) -> Self {
        Self {
            reconsume_times: self.reconsume_times.saturating_add(1),
            ..self.clone()
        }
    }

    /// 用于日志输出的负载文本（非 UTF-8 部分做替换）
    pub fn body_lossy(&self) -> std::borrow::Cow<'_, str> {
        String::from_utf8_lossy(&self.body)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn redelivery_keeps_identity() {
        let msg = EventMessage::builder()
            .message_id("m-1")
            .topic("scm_events")
            .body(r#"{"event_type":"push"}"#)
            .build();
        let again = msg.redelivery().redelivery();

        assert_eq!(again.message_id(), "m-1");
        assert_eq!(again.body(), msg.body());
        assert_eq!(again.born_at(), msg.born_at());
        assert_eq!(again.reconsume_times(), 2);
    }
}
