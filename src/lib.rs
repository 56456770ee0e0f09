//! Flare IM Weighted Consumer Core
//!
//! 单个逻辑消费者订阅 N 个主题（含自动发现的分区）时，为每个主题分配
//! 相对权重：高权重主题的本地接收缓冲被优先消费，低权重主题被抑制，
//! 从而在争抢同一个消费者注意力的主题之间产生按比例公平的消费。
//!
//! 核心是权重-阈值分布引擎：把整数权重换算为每主题的接收缓冲占用阈值
//! （线性/指数两种展开策略），以及跨越"只有平面字符串属性通道"这一
//! 架构边界的配置往返序列化。

pub mod config;
pub mod consumer;
pub mod distribution;
pub mod error;
pub mod topic;
pub mod tracker;

// Re-exports
pub use config::{
    populate_topic, PropertySink, PropertySource, WeightedConsumerConfig, WT_CONF_PREFIX,
    WT_TOPIC_CONF_PREFIX,
};
pub use consumer::{
    ConsumerInterceptor, DeadLetterPolicy, KeySharedPolicy, SubscribeRequest, SubscriptionType,
    TopicConsumerRuntime, WeightedConsumerBuilder, DEFAULT_MAX_REDELIVER_COUNT,
    DLQ_GROUP_TOPIC_SUFFIX, RETRY_GROUP_TOPIC_SUFFIX,
};
pub use distribution::{DistributionStrategy, RangeDistribution, TopicThresholdDistribution};
pub use error::{ErrorCategory, ErrorCode, Result, WeightError};
pub use topic::{TopicDomain, TopicName, PARTITION_SUFFIX};
pub use tracker::TopicMessageCountTracker;
