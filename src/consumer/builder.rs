//! 加权订阅构建器
//!
//! 以组合（而非继承）的方式把加权配置包在基础订阅请求外面：
//! 流式设置方法只做增量修改，完整校验推迟到订阅发起的时刻。
//! 所有前置检查的失败都通过返回的异步结果携带，不做同步 panic，
//! 保持调用方统一的异步错误处理。

use super::runtime::{
    ConsumerInterceptor, DeadLetterPolicy, KeySharedPolicy, SubscribeRequest, SubscriptionType,
    TopicConsumerRuntime, DEFAULT_MAX_REDELIVER_COUNT, DLQ_GROUP_TOPIC_SUFFIX,
    RETRY_GROUP_TOPIC_SUFFIX,
};
use crate::config::{populate_topic, PropertySource, WeightedConsumerConfig};
use crate::distribution::DistributionStrategy;
use crate::error::{Result, WeightError};
use crate::topic::TopicName;
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;
use tracing::info;

/// 加权订阅构建器
pub struct WeightedConsumerBuilder {
    topics_pattern: Option<String>,
    subscription_name: String,
    subscription_type: SubscriptionType,
    key_shared_policy: Option<KeySharedPolicy>,
    retry_enable: bool,
    dead_letter_policy: Option<DeadLetterPolicy>,
    interceptors: Vec<Arc<dyn ConsumerInterceptor>>,
    weight_conf: WeightedConsumerConfig,
    retry_topic_weight: Option<u32>,
}

impl Default for WeightedConsumerBuilder {
    fn default() -> Self {
        Self::new()
    }
}

// 拦截器是不透明的 trait 对象，调试输出只给出个数
impl fmt::Debug for WeightedConsumerBuilder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("WeightedConsumerBuilder")
            .field("topics_pattern", &self.topics_pattern)
            .field("subscription_name", &self.subscription_name)
            .field("subscription_type", &self.subscription_type)
            .field("key_shared_policy", &self.key_shared_policy)
            .field("retry_enable", &self.retry_enable)
            .field("dead_letter_policy", &self.dead_letter_policy)
            .field("interceptor_count", &self.interceptors.len())
            .field("weight_conf", &self.weight_conf)
            .field("retry_topic_weight", &self.retry_topic_weight)
            .finish()
    }
}

impl WeightedConsumerBuilder {
    pub fn new() -> Self {
        WeightedConsumerBuilder {
            topics_pattern: None,
            subscription_name: String::new(),
            subscription_type: SubscriptionType::default(),
            key_shared_policy: None,
            retry_enable: false,
            dead_letter_policy: None,
            interceptors: Vec::new(),
            weight_conf: WeightedConsumerConfig::new(),
            retry_topic_weight: None,
        }
    }

    /// 从属性通道恢复加权配置（其余订阅字段不受影响）
    pub fn load_properties(mut self, source: &impl PropertySource) -> Result<Self> {
        self.weight_conf = WeightedConsumerConfig::load_from_properties(source)?;
        Ok(self)
    }

    /// 当前的加权配置
    pub fn weight_conf(&self) -> &WeightedConsumerConfig {
        &self.weight_conf
    }

    // ============================================================
    // 流式设置方法：加权配置
    // ============================================================

    pub fn distribution_strategy(mut self, strategy: DistributionStrategy) -> Self {
        self.weight_conf.set_distribution_strategy(strategy);
        self
    }

    pub fn min_bound(mut self, min_bound: u32) -> Self {
        self.weight_conf.set_min_bound(min_bound);
        self
    }

    pub fn max_bound(mut self, max_bound: u32) -> Self {
        self.weight_conf.set_max_bound(max_bound);
        self
    }

    pub fn max_weight_allowed(mut self, max_weight: u32) -> Self {
        self.weight_conf.set_max_weight_allowed(max_weight);
        self
    }

    pub fn throttle_receive_queue(mut self, should_throttle: bool) -> Self {
        self.weight_conf.set_throttle_receive_queue(should_throttle);
        self
    }

    pub fn queue_resume_threshold(mut self, threshold: u32) -> Self {
        self.weight_conf.set_queue_resume_threshold(threshold);
        self
    }

    /// 添加加权主题，权重缺省时按名称约定推断，否则默认为 1
    pub fn topic(mut self, topic: &str, weight: Option<u32>) -> Result<Self> {
        self.weight_conf.add_topic(topic, weight)?;
        Ok(self)
    }

    /// 批量添加加权主题，要求非空
    pub fn topics(mut self, topic_weights: &HashMap<String, Option<u32>>) -> Result<Self> {
        if topic_weights.is_empty() {
            return Err(WeightError::missing_topic("non-empty topic-weight map required"));
        }
        for (topic, weight) in topic_weights {
            self.weight_conf.add_topic(topic, *weight)?;
        }
        Ok(self)
    }

    /// 设置重试主题的权重
    ///
    /// 重试主题经由同一条加权通道消费，这里提前做范围检查，
    /// 因为该权重不会再经过配置的整体校验。
    pub fn retry_topic_weight(mut self, weight: Option<u32>) -> Result<Self> {
        if let Some(weight) = weight {
            let max = self.weight_conf.max_weight_allowed();
            if weight < 1 || weight > max {
                return Err(WeightError::invalid_weight(format!(
                    "retry topic weight should be in the range [1, maxWeightAllowed({})]",
                    max
                )));
            }
        }
        self.retry_topic_weight = weight;
        Ok(self)
    }

    // ============================================================
    // 流式设置方法：基础订阅字段
    // ============================================================

    pub fn topics_pattern(mut self, pattern: &str) -> Self {
        self.topics_pattern = Some(pattern.to_string());
        self
    }

    pub fn subscription_name(mut self, name: &str) -> Self {
        self.subscription_name = name.to_string();
        self
    }

    pub fn subscription_type(mut self, subscription_type: SubscriptionType) -> Self {
        self.subscription_type = subscription_type;
        self
    }

    pub fn key_shared_policy(mut self, policy: KeySharedPolicy) -> Self {
        self.key_shared_policy = Some(policy);
        self
    }

    pub fn enable_retry(mut self, retry_enable: bool) -> Self {
        self.retry_enable = retry_enable;
        self
    }

    pub fn dead_letter_policy(mut self, policy: DeadLetterPolicy) -> Self {
        self.dead_letter_policy = Some(policy);
        self
    }

    pub fn interceptor(mut self, interceptor: Arc<dyn ConsumerInterceptor>) -> Self {
        self.interceptors.push(interceptor);
        self
    }

    // ============================================================
    // 订阅
    // ============================================================

    /// 发起订阅
    ///
    /// 依次执行：加权配置校验与属性填充、主题/订阅名/订阅类型前置检查、
    /// 重试与死信主题派生，最后把订阅请求交给外部消费运行时。
    pub async fn subscribe_async<R: TopicConsumerRuntime>(
        mut self,
        runtime: &R,
    ) -> Result<R::Consumer> {
        let mut properties: HashMap<String, String> = HashMap::new();
        self.weight_conf.populate(&mut properties)?;

        // 加权主题即订阅主题集合；排序保证"首个主题"的派生逻辑确定
        let mut topics: Vec<String> = self.weight_conf.topic_weights().keys().cloned().collect();
        topics.sort();

        if topics.is_empty() && self.topics_pattern.is_none() {
            return Err(WeightError::missing_topic(
                "topic name must be set on the consumer builder",
            ));
        }

        if self.subscription_name.trim().is_empty() {
            return Err(WeightError::missing_subscription_name(
                "subscription name must be set on the consumer builder",
            ));
        }

        if self.key_shared_policy.is_some()
            && self.subscription_type != SubscriptionType::KeyShared
        {
            return Err(WeightError::subscription_type_mismatch(
                "key shared policy must be set with key shared subscription type",
            ));
        }

        if self.retry_enable && !topics.is_empty() {
            let first = TopicName::parse(&topics[0])?;
            let safe_subscription = self.subscription_name.replace('/', "__");
            let retry_letter_topic = format!(
                "{}/{}{}",
                first.namespace_path(),
                safe_subscription,
                RETRY_GROUP_TOPIC_SUFFIX
            );
            let dead_letter_topic = format!(
                "{}/{}{}",
                first.namespace_path(),
                safe_subscription,
                DLQ_GROUP_TOPIC_SUFFIX
            );

            let mut policy = self.dead_letter_policy.take().unwrap_or(DeadLetterPolicy {
                max_redeliver_count: DEFAULT_MAX_REDELIVER_COUNT,
                retry_letter_topic: String::new(),
                dead_letter_topic: String::new(),
            });
            // 只填充未显式设置的字段
            if policy.retry_letter_topic.is_empty() {
                policy.retry_letter_topic = retry_letter_topic;
            }
            if policy.dead_letter_topic.is_empty() {
                policy.dead_letter_topic = dead_letter_topic;
            }

            // 重试主题经由同一条加权通道消费：写入其权重属性并加入主题集合
            populate_topic(
                &mut properties,
                &policy.retry_letter_topic,
                self.retry_topic_weight,
            );
            if !topics.contains(&policy.retry_letter_topic) {
                topics.push(policy.retry_letter_topic.clone());
            }
            self.dead_letter_policy = Some(policy);
        }

        info!(
            subscription = %self.subscription_name,
            topic_count = topics.len(),
            "Subscribing with weighted configuration"
        );

        let request = SubscribeRequest {
            topics,
            topics_pattern: self.topics_pattern,
            subscription_name: self.subscription_name,
            subscription_type: self.subscription_type,
            properties,
            dead_letter_policy: self.dead_letter_policy,
            interceptors: self.interceptors,
        };

        runtime.subscribe(request).await
    }
}
