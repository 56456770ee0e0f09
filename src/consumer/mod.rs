//! 加权订阅编排模块
//!
//! 消费一份加权配置，构建最终的订阅请求（主题集合、重试/死信主题注入、
//! 拦截器装配），并委托给外部的多主题消费运行时。

pub mod builder;
pub mod runtime;

pub use builder::WeightedConsumerBuilder;
pub use runtime::{
    ConsumerInterceptor, DeadLetterPolicy, KeySharedPolicy, SubscribeRequest, SubscriptionType,
    TopicConsumerRuntime, DEFAULT_MAX_REDELIVER_COUNT, DLQ_GROUP_TOPIC_SUFFIX,
    RETRY_GROUP_TOPIC_SUFFIX,
};
