//! 处理器注册表（HandlerRegistry）
//!
//! 进程启动时构建一次、此后只读的「分类键 → 处理器」映射。解析规则（先匹配者胜）：
//! 1. `event_type` 非空且已注册：返回其处理器；
//! 2. 否则 `event_name` 已注册：返回其处理器；
//! 3. 否则返回 `UnknownEventHandler`。
//!
//! 两类键共用同一命名空间，上游需保证二者不冲突；冲突时 `event_type` 优先。
//!
use super::{EventHandler, UnknownEventHandler, category::category_handler};
use crate::{
    error::{DomainError, DomainResult},
    message::{DecodedEvent, EventCategory},
};
use std::{collections::HashMap, sync::Arc};

/// 解析命中的路径
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route<'a> {
    EventType(&'a str),
    EventName(&'a str),
    Unknown,
}

#[derive(Clone)]
pub struct HandlerRegistry {
    by_key: HashMap<String, Arc<dyn EventHandler>>,
    unknown: Arc<dyn EventHandler>,
}

impl HandlerRegistry {
    pub fn builder() -> HandlerRegistryBuilder {
        HandlerRegistryBuilder::default()
    }

    /// 每个已知分类注册一个分类处理器
    pub fn standard() -> Self {
        let by_key = EventCategory::ALL
            .into_iter()
            .map(|c| {
                let handler: Arc<dyn EventHandler> = Arc::new(category_handler(c));
                (c.key().to_string(), handler)
            })
            .collect();

        Self {
            by_key,
            unknown: Arc::new(UnknownEventHandler),
        }
    }

    pub fn route<'a>(&self, event_type: Option<&'a str>, event_name: Option<&'a str>) -> Route<'a> {
        if let Some(t) = event_type.filter(|t| !t.is_empty()) {
            if self.by_key.contains_key(t) {
                return Route::EventType(t);
            }
        }
        match event_name {
            Some(n) if self.by_key.contains_key(n) => Route::EventName(n),
            _ => Route::Unknown,
        }
    }

    pub fn resolve(
        &self,
        event_type: Option<&str>,
        event_name: Option<&str>,
    ) -> &Arc<dyn EventHandler> {
        match self.route(event_type, event_name) {
            Route::EventType(key) | Route::EventName(key) => {
                self.by_key.get(key).unwrap_or(&self.unknown)
            }
            Route::Unknown => &self.unknown,
        }
    }

    pub fn resolve_event(&self, event: &DecodedEvent) -> &Arc<dyn EventHandler> {
        self.resolve(event.event_type(), event.event_name())
    }

    pub fn get(&self, key: &str) -> Option<&Arc<dyn EventHandler>> {
        self.by_key.get(key)
    }

    /// 兜底处理器
    pub fn unknown(&self) -> &Arc<dyn EventHandler> {
        &self.unknown
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.by_key.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.by_key.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_key.is_empty()
    }
}

impl Default for HandlerRegistry {
    fn default() -> Self {
        Self::standard()
    }
}

/// 注册表构建器：键必须非空且唯一
#[derive(Default)]
pub struct HandlerRegistryBuilder {
    by_key: HashMap<String, Arc<dyn EventHandler>>,
}

impl HandlerRegistryBuilder {
    pub fn register(
        mut self,
        key: impl Into<String>,
        handler: Arc<dyn EventHandler>,
    ) -> DomainResult<Self> {
        let key = key.into();
        if key.is_empty() {
            return Err(DomainError::invalid_value("registry key must not be empty"));
        }
        if self.by_key.contains_key(&key) {
            return Err(DomainError::AlreadyRegistered { key });
        }
        self.by_key.insert(key, handler);
        Ok(self)
    }

    pub fn register_category(self, category: EventCategory) -> DomainResult<Self> {
        self.register(category.key(), Arc::new(category_handler(category)))
    }

    pub fn build(self) -> HandlerRegistry {
        HandlerRegistry {
            by_key: self.by_key,
            unknown: Arc::new(UnknownEventHandler),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::handling::NoOpHandler;

    fn reg() -> HandlerRegistry {
        HandlerRegistry::standard()
    }

    fn same(a: &Arc<dyn EventHandler>, b: &Arc<dyn EventHandler>) -> bool {
        Arc::ptr_eq(a, b)
    }

    #[test]
    fn standard_registers_every_category() {
        let r = reg();
        assert_eq!(r.len(), EventCategory::ALL.len());
        for c in EventCategory::ALL {
            assert_eq!(r.get(c.key()).unwrap().handler_name(), c.key());
        }
        assert!(r.get("unknown").is_none());
    }

    #[test]
    fn event_type_wins_over_event_name() {
        let r = reg();
        let h = r.resolve(Some("push"), Some("merge_request"));
        assert!(same(h, r.get("push").unwrap()));
        assert_eq!(
            r.route(Some("push"), Some("merge_request")),
            Route::EventType("push")
        );
    }

    #[test]
    fn falls_back_to_event_name() {
        let r = reg();
        for ty in [None, Some(""), Some("code_push")] {
            let h = r.resolve(ty, Some("merge_request"));
            assert!(same(h, r.get("merge_request").unwrap()));
        }
        assert_eq!(
            r.route(Some(""), Some("merge_request")),
            Route::EventName("merge_request")
        );

        let ev = DecodedEvent::decode(br#"{"event_type":5,"event_name":"push"}"#).unwrap();
        assert!(same(r.resolve_event(&ev), r.get("push").unwrap()));
    }

    #[test]
    fn unmatched_resolves_to_unknown() {
        let r = reg();
        let cases = [
            (Some("database_migration"), None),
            (None, None),
            (Some(""), Some("")),
            (Some("database_migration"), Some("code_push")),
        ];
        for (ty, name) in cases {
            assert_eq!(r.route(ty, name), Route::Unknown);
            assert!(same(r.resolve(ty, name), r.unknown()));
        }
        assert_eq!(r.unknown().handler_name(), "unknown");
    }

    #[test]
    fn builder_rejects_duplicate_and_empty_keys() {
        let dup = HandlerRegistry::builder()
            .register("push", Arc::new(NoOpHandler))
            .and_then(|b| b.register("push", Arc::new(NoOpHandler)));
        assert!(matches!(dup, Err(DomainError::AlreadyRegistered { key }) if key == "push"));

        let empty = HandlerRegistry::builder().register("", Arc::new(NoOpHandler));
        assert!(matches!(empty, Err(DomainError::InvalidValue { .. })));
    }

    #[test]
    fn builder_registry_resolves_custom_entries() {
        let r = HandlerRegistry::builder()
            .register("system_hook", Arc::new(NoOpHandler))
            .and_then(|b| b.register_category(EventCategory::Push))
            .unwrap()
            .build();
        assert_eq!(r.len(), 2);
        assert_eq!(r.resolve(Some("system_hook"), None).handler_name(), "noop");
        assert_eq!(r.resolve(None, Some("push")).handler_name(), "push");
        assert_eq!(r.resolve(Some("user_create"), None).handler_name(), "unknown");
    }
}
