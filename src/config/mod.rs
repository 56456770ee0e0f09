//! 加权消费配置模块
//!
//! 聚合根 `WeightedConsumerConfig`：持有分布策略、边界、主题权重、
//! 限流开关、恢复阈值与最大允许权重，并提供与平面字符串属性通道之间的
//! 往返序列化（`populate` / `load_from_properties`）。
//!
//! 配置采用**惰性校验**：只在即将被使用（populate / load / 显式 validate）
//! 时做完整校验，允许构建过程中出现暂时不一致的中间状态。

pub mod properties;

pub use properties::{PropertySink, PropertySource};

use crate::distribution::DistributionStrategy;
use crate::error::{Result, WeightError};
use crate::topic::TopicName;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::path::Path;

/// 标量配置键的命名空间前缀
pub const WT_CONF_PREFIX: &str = "WT_";

/// 主题权重键的命名空间前缀（与标量键分离，避免键冲突）
pub const WT_TOPIC_CONF_PREFIX: &str = "WTP_";

const KEY_DIST_STRATEGY: &str = "DIST_STRATEGY";
const KEY_MIN_BOUND: &str = "MIN_BOUND";
const KEY_MAX_BOUND: &str = "MAX_BOUND";
const KEY_THROTTLE_RQ: &str = "THROTTLE_RQ";
const KEY_RESUME_THRESHOLD: &str = "RESUME_THRESHOLD";
const KEY_MAX_WT_ALLOWED: &str = "MAX_WT_ALLOWED";

const DEFAULT_MIN_BOUND: u32 = 100;
const DEFAULT_MAX_BOUND: u32 = 1000;
const DEFAULT_MAX_WEIGHT_ALLOWED: u32 = 100;

/// 加权消费配置
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WeightedConsumerConfig {
    distribution_strategy: DistributionStrategy,
    min_bound: u32,
    max_bound: u32,
    max_weight_allowed: u32,
    topic_weights: HashMap<String, u32>,
    throttle_receive_queue: bool,
    queue_resume_threshold: u32,
}

impl Default for WeightedConsumerConfig {
    fn default() -> Self {
        WeightedConsumerConfig {
            distribution_strategy: DistributionStrategy::Linear,
            min_bound: DEFAULT_MIN_BOUND,
            max_bound: DEFAULT_MAX_BOUND,
            max_weight_allowed: DEFAULT_MAX_WEIGHT_ALLOWED,
            topic_weights: HashMap::new(),
            throttle_receive_queue: false,
            queue_resume_threshold: 0,
        }
    }
}

impl WeightedConsumerConfig {
    pub fn new() -> Self {
        Self::default()
    }

    // ============================================================
    // 设置方法
    // ============================================================

    pub fn set_distribution_strategy(&mut self, strategy: DistributionStrategy) {
        self.distribution_strategy = strategy;
    }

    pub fn set_min_bound(&mut self, min_bound: u32) {
        self.min_bound = min_bound;
    }

    pub fn set_max_bound(&mut self, max_bound: u32) {
        self.max_bound = max_bound;
    }

    pub fn set_max_weight_allowed(&mut self, max_weight: u32) {
        self.max_weight_allowed = max_weight;
    }

    /// 设置是否对接收缓冲限流
    ///
    /// 本地消息处理接近即时时，无论权重如何都观察不到加权消费——这通常
    /// 是期望的行为：处理足够快时不惩罚低权重主题。只有在需要强制按权重
    /// 消费、人为限制低权重主题的拉取量时才打开此开关，代价是放弃对本地
    /// 资源的最大化利用。
    pub fn set_throttle_receive_queue(&mut self, should_throttle: bool) {
        self.throttle_receive_queue = should_throttle;
    }

    /// 设置接收缓冲恢复阈值
    ///
    /// 注意！正常情况下不需要改动此配置。默认值零提供最公平的加权分布；
    /// 调成正值会偏向吞吐，可能导致低权重消费者不再严格遵循分布。
    /// 保留可配置仅用于调试。取值范围 `[0, min_bound]`。
    pub fn set_queue_resume_threshold(&mut self, threshold: u32) {
        self.queue_resume_threshold = threshold;
    }

    /// 添加主题及其权重
    ///
    /// 权重缺省时先按 `<name>-weight-<n>` 约定从主题名推断，推断不出
    /// 则默认为 1。键按规范名（去分区后缀）去重。
    pub fn add_topic(&mut self, topic: &str, weight: Option<u32>) -> Result<()> {
        let name = TopicName::parse(topic)?;
        let weight = weight.or_else(|| name.weight_from_name()).unwrap_or(1);
        self.topic_weights.insert(name.canonical_name(), weight);
        Ok(())
    }

    // ============================================================
    // 读取方法
    // ============================================================

    pub fn distribution_strategy(&self) -> DistributionStrategy {
        self.distribution_strategy
    }

    pub fn min_bound(&self) -> u32 {
        self.min_bound
    }

    pub fn max_bound(&self) -> u32 {
        self.max_bound
    }

    pub fn max_weight_allowed(&self) -> u32 {
        self.max_weight_allowed
    }

    pub fn topic_weights(&self) -> &HashMap<String, u32> {
        &self.topic_weights
    }

    pub fn is_throttle_receive_queue(&self) -> bool {
        self.throttle_receive_queue
    }

    pub fn queue_resume_threshold(&self) -> u32 {
        self.queue_resume_threshold
    }

    // ============================================================
    // 校验
    // ============================================================

    /// 完整校验，所有违反都是致命配置错误
    pub fn validate(&self) -> Result<()> {
        if self.max_weight_allowed < 1 {
            return Err(WeightError::invalid_weight(
                "max weight allowed should be equal or more than 1",
            ));
        }
        if self.min_bound < DEFAULT_MIN_BOUND {
            return Err(WeightError::invalid_bound(format!(
                "min bound should be at least {}",
                DEFAULT_MIN_BOUND
            )));
        }
        if self.max_bound < self.min_bound {
            return Err(WeightError::invalid_bound(format!(
                "max bound should be at least as much as min bound {}",
                self.min_bound
            )));
        }
        if self.queue_resume_threshold > self.min_bound {
            return Err(WeightError::invalid_resume_threshold(format!(
                "queue resume threshold should be in the range [0, minBound({})]",
                self.min_bound
            )));
        }
        for (topic, weight) in &self.topic_weights {
            if *weight < 1 || *weight > self.max_weight_allowed {
                return Err(WeightError::invalid_weight(format!(
                    "weights should be in the range [1, maxWeightAllowed({})], found {} for topic {}",
                    self.max_weight_allowed, weight, topic
                )));
            }
        }
        Ok(())
    }

    // ============================================================
    // 属性通道往返
    // ============================================================

    /// 将配置写入属性通道
    ///
    /// 先做完整校验（不一致的配置快速失败），再按稳定的命名空间键逐项写出，
    /// 每个主题权重占用一个 `WTP_<topic>` 键。
    pub fn populate(&self, sink: &mut impl PropertySink) -> Result<()> {
        self.validate()?;

        set_conf(sink, KEY_DIST_STRATEGY, self.distribution_strategy.as_str());
        set_conf(sink, KEY_MIN_BOUND, &self.min_bound.to_string());
        set_conf(sink, KEY_MAX_BOUND, &self.max_bound.to_string());
        set_conf(sink, KEY_THROTTLE_RQ, &self.throttle_receive_queue.to_string());
        set_conf(sink, KEY_RESUME_THRESHOLD, &self.queue_resume_threshold.to_string());
        set_conf(sink, KEY_MAX_WT_ALLOWED, &self.max_weight_allowed.to_string());

        for (topic, weight) in &self.topic_weights {
            populate_topic(sink, topic, Some(*weight));
        }
        Ok(())
    }

    /// 从属性通道恢复配置
    ///
    /// 每个标量键缺省时取类型化默认值，数字解析失败视为"未提供"回退默认；
    /// 策略键的非法取值是配置错误。主题权重命名空间下的键逐个扫描，
    /// 去掉前缀得到主题名，值不可解析视为未提供权重（重新触发名称约定推断）。
    /// 返回前做完整校验。
    pub fn load_from_properties(source: &impl PropertySource) -> Result<Self> {
        let mut conf = WeightedConsumerConfig::default();

        if let Some(value) = read_conf(source, KEY_DIST_STRATEGY) {
            conf.distribution_strategy = value.parse()?;
        }
        conf.min_bound = read_conf_u32(source, KEY_MIN_BOUND, DEFAULT_MIN_BOUND);
        conf.max_bound = read_conf_u32(source, KEY_MAX_BOUND, DEFAULT_MAX_BOUND);
        conf.throttle_receive_queue = read_conf(source, KEY_THROTTLE_RQ)
            .map(|v| v.eq_ignore_ascii_case("true"))
            .unwrap_or(false);
        conf.queue_resume_threshold = read_conf_u32(source, KEY_RESUME_THRESHOLD, 0);
        conf.max_weight_allowed =
            read_conf_u32(source, KEY_MAX_WT_ALLOWED, DEFAULT_MAX_WEIGHT_ALLOWED);

        for key in source.property_keys() {
            if let Some(topic) = key.strip_prefix(WT_TOPIC_CONF_PREFIX) {
                let weight = source
                    .get_property(key)
                    .and_then(|v| v.parse::<u32>().ok());
                conf.add_topic(topic, weight)?;
            }
        }

        conf.validate()?;
        Ok(conf)
    }

    /// 从 TOML 文件加载配置
    pub fn load_from_file(path: impl AsRef<Path>) -> Result<Self> {
        let content = std::fs::read_to_string(path.as_ref()).map_err(|e| {
            WeightError::configuration(
                crate::error::ErrorCode::ConfigurationError,
                format!("failed to read config file: {}", e),
            )
        })?;
        let conf: WeightedConsumerConfig = toml::from_str(&content).map_err(|e| {
            WeightError::configuration(
                crate::error::ErrorCode::ConfigurationError,
                format!("failed to parse config file: {}", e),
            )
        })?;
        conf.validate()?;
        Ok(conf)
    }
}

/// 向属性通道写入单个主题权重项
///
/// 权重缺省时写空串，读取侧会将空串视为未提供并重新触发名称约定推断。
pub fn populate_topic(sink: &mut impl PropertySink, topic: &str, weight: Option<u32>) {
    let key = format!("{}{}", WT_TOPIC_CONF_PREFIX, topic);
    let value = weight.map(|w| w.to_string()).unwrap_or_default();
    sink.set_property(&key, &value);
}

fn set_conf(sink: &mut impl PropertySink, key: &str, value: &str) {
    sink.set_property(&format!("{}{}", WT_CONF_PREFIX, key), value);
}

fn read_conf<'a>(source: &'a impl PropertySource, key: &str) -> Option<&'a str> {
    source.get_property(&format!("{}{}", WT_CONF_PREFIX, key))
}

fn read_conf_u32(source: &impl PropertySource, key: &str, default: u32) -> u32 {
    read_conf(source, key)
        .and_then(|v| v.parse::<u32>().ok())
        .unwrap_or(default)
}

impl fmt::Display for WeightedConsumerConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Weight configuration: dist_strategy={} min_bound={} max_bound={} max_weight_allowed={} throttle_recv_queue={} queue_resume_threshold={} topic_weights=[",
            self.distribution_strategy,
            self.min_bound,
            self.max_bound,
            self.max_weight_allowed,
            self.throttle_receive_queue,
            self.queue_resume_threshold,
        )?;
        for (topic, weight) in &self.topic_weights {
            write!(f, " {{{}, {}}}", topic, weight)?;
        }
        write!(f, " ]")
    }
}
