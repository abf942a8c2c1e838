//! 本地回放
//!
//! 将文件中每个非空行作为一条消息体发布到内存 Broker 的指定主题，
//! 用于开发模式下在没有真实中间件时驱动消费循环。
//!
use crate::error::AppResult;
use hookmq_domain::consuming::InMemoryBroker;
use std::path::Path;

pub async fn replay_file(broker: &InMemoryBroker, topic: &str, path: &Path) -> AppResult<usize> {
    let text = tokio::fs::read_to_string(path).await?;
    replay_lines(broker, topic, &text)
}

pub fn replay_lines(broker: &InMemoryBroker, topic: &str, text: &str) -> AppResult<usize> {
    let mut count = 0;
    for line in text.lines().map(str::trim).filter(|l| !l.is_empty()) {
        let message_id = broker.publish(topic, line)?;
        tracing::debug!(message_id, "replayed message");
        count += 1;
    }
    Ok(count)
}
