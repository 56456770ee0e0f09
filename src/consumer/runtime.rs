//! 外部消费运行时接口
//!
//! 真正打开网络连接、维护每主题接收缓冲并执行确认/重投的运行时在本核心
//! 之外。核心只负责把最终的订阅请求（主题集合、属性映射、拦截器链）
//! 交给它。取消/超时语义属于运行时，不属于本核心。

use crate::error::Result;
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;

/// 重试主题名后缀
pub const RETRY_GROUP_TOPIC_SUFFIX: &str = "-RETRY";

/// 死信主题名后缀
pub const DLQ_GROUP_TOPIC_SUFFIX: &str = "-DLQ";

/// 默认最大重投次数
pub const DEFAULT_MAX_REDELIVER_COUNT: u32 = 16;

/// 订阅类型
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SubscriptionType {
    #[default]
    Exclusive,
    Shared,
    Failover,
    KeyShared,
}

/// Key-Shared 路由策略
///
/// 设置了该策略时订阅类型必须是 `SubscriptionType::KeyShared`。
#[derive(Debug, Clone, Default)]
pub struct KeySharedPolicy {
    pub allow_out_of_order_delivery: bool,
}

/// 死信策略
///
/// 重试/死信主题名为空串表示未显式设置，订阅时会按首个主题的命名空间
/// 和订阅名派生默认值填入，不覆盖显式设置的值。
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DeadLetterPolicy {
    pub max_redeliver_count: u32,
    pub retry_letter_topic: String,
    pub dead_letter_topic: String,
}

/// 消费拦截器
pub trait ConsumerInterceptor: Send + Sync {
    /// 消息进入本地处理前调用，可改写消息体
    fn before_consume(&self, topic: &str, payload: Vec<u8>) -> Vec<u8> {
        let _ = topic;
        payload
    }

    /// 消息确认后调用
    fn on_acknowledge(&self, topic: &str) {
        let _ = topic;
    }
}

/// 最终的订阅请求
///
/// 属性映射中携带完整的加权配置（运行时据此重建阈值分布）。
pub struct SubscribeRequest {
    pub topics: Vec<String>,
    pub topics_pattern: Option<String>,
    pub subscription_name: String,
    pub subscription_type: SubscriptionType,
    pub properties: HashMap<String, String>,
    pub dead_letter_policy: Option<DeadLetterPolicy>,
    pub interceptors: Vec<Arc<dyn ConsumerInterceptor>>,
}

/// 多主题消费运行时
#[async_trait]
pub trait TopicConsumerRuntime: Send + Sync {
    /// 运行时产出的消费者句柄类型
    type Consumer: Send;

    /// 以给定请求建立订阅
    async fn subscribe(&self, request: SubscribeRequest) -> Result<Self::Consumer>;
}
