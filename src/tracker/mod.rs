//! 主题消息计数器
//!
//! 多主题消费者清空本地接收队列时，消息被排入此集合以按主题计数。
//! 只支持记录到达和快照两个操作，不支持通用集合的其余操作。

use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{PoisonError, RwLock};

/// 主题到原子计数器的并发映射
#[derive(Debug, Default)]
pub struct TopicMessageCountTracker {
    counters: RwLock<HashMap<String, AtomicU64>>,
}

impl TopicMessageCountTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// 记录一条消息到达
    pub fn record_arrival(&self, topic: &str) {
        {
            let counters = self
                .counters
                .read()
                .unwrap_or_else(PoisonError::into_inner);
            if let Some(counter) = counters.get(topic) {
                counter.fetch_add(1, Ordering::Relaxed);
                return;
            }
        }

        let mut counters = self
            .counters
            .write()
            .unwrap_or_else(PoisonError::into_inner);
        counters
            .entry(topic.to_string())
            .or_insert_with(|| AtomicU64::new(0))
            .fetch_add(1, Ordering::Relaxed);
    }

    /// 当前各主题的消息计数快照
    pub fn snapshot_counts(&self) -> HashMap<String, u64> {
        let counters = self
            .counters
            .read()
            .unwrap_or_else(PoisonError::into_inner);
        counters
            .iter()
            .map(|(topic, counter)| (topic.clone(), counter.load(Ordering::Relaxed)))
            .collect()
    }

    /// 清空全部计数
    pub fn clear(&self) {
        let mut counters = self
            .counters
            .write()
            .unwrap_or_else(PoisonError::into_inner);
        counters.clear();
    }
}
