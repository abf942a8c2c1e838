//! 装饰链（Decorated）
//!
//! 一个装饰处理器最多包裹一个内层处理器，构成线性链：
//! 1. 若存在内层处理器，先调用之；内层返回 `false` 时短路返回 `false`，本层动作不执行；
//! 2. 内层返回 `true`（或没有内层）时执行本层动作，并以动作结果作为整体结果。
//!
//! 任一环节拒绝即否决整条链（AND 语义），便于在不改动调用方的前提下
//! 于任意注册项前插入校验等步骤。
//!
use super::EventHandler;
use crate::{error::HandleResult, message::DecodedEvent};
use async_trait::async_trait;

/// 装饰处理器自身的动作
#[async_trait]
pub trait EventAction: Send + Sync {
    fn action_name(&self) -> &str;

    async fn run(&self, event: &DecodedEvent) -> HandleResult<bool>;
}

/// 无动作：仅透传内层结果，没有内层时视为成功
#[derive(Debug, Clone, Copy, Default)]
pub struct Passthrough;

#[async_trait]
impl EventAction for Passthrough {
    fn action_name(&self) -> &str {
        "passthrough"
    }

    async fn run(&self, _event: &DecodedEvent) -> HandleResult<bool> {
        Ok(true)
    }
}

/// 通用装饰处理器：独占持有可选的内层处理器
pub struct Decorated<A> {
    inner: Option<Box<dyn EventHandler>>,
    action: A,
}

impl<A: EventAction> Decorated<A> {
    pub fn new(action: A) -> Self {
        Self {
            inner: None,
            action,
        }
    }

    pub fn wrapping(action: A, inner: impl EventHandler + 'static) -> Self {
        Self {
            inner: Some(Box::new(inner)),
            action,
        }
    }

    pub fn inner(&self) -> Option<&dyn EventHandler> {
        self.inner.as_deref()
    }

    pub fn action(&self) -> &A {
        &self.action
    }
}

impl Decorated<Passthrough> {
    pub fn passthrough(inner: Option<Box<dyn EventHandler>>) -> Self {
        Self {
            inner,
            action: Passthrough,
        }
    }
}

#[async_trait]
impl<A: EventAction> EventHandler for Decorated<A> {
    fn handler_name(&self) -> &str {
        self.action.action_name()
    }

    async fn handle(&self, event: &DecodedEvent) -> HandleResult<bool> {
        if let Some(inner) = &self.inner {
            if !inner.handle(event).await? {
                return Ok(false);
            }
        }
        self.action.run(event).await
    }
}
