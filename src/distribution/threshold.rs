//! 主题阈值分布
//!
//! 将主题名（可能是分区实例名）映射到配置的权重，再组合范围分布得到
//! 该主题的接收缓冲阈值。由一份已校验的加权消费配置一次性构建，之后只读。

use super::range::RangeDistribution;
use crate::config::WeightedConsumerConfig;
use crate::error::Result;
use crate::topic::TopicName;
use std::collections::HashMap;
use tracing::{debug, warn};

/// 默认权重：未配置的主题必须保持可消费，降级为最低权重
const DEFAULT_WEIGHT: u32 = 1;

/// 主题阈值分布
#[derive(Debug, Clone)]
pub struct TopicThresholdDistribution {
    topic_weights: HashMap<String, u32>,
    range: RangeDistribution,
}

impl TopicThresholdDistribution {
    /// 从已校验的配置构建
    ///
    /// 最大权重取所有已配置主题权重的最大值（至少为 1），
    /// 以此作为范围分布的阈值点个数。
    pub fn from_config(conf: &WeightedConsumerConfig) -> Result<Self> {
        conf.validate()?;

        let max_weight = conf
            .topic_weights()
            .values()
            .copied()
            .max()
            .unwrap_or(DEFAULT_WEIGHT)
            .max(DEFAULT_WEIGHT);

        let range = RangeDistribution::new(
            conf.distribution_strategy(),
            conf.min_bound(),
            conf.max_bound(),
            max_weight,
        )?;

        Ok(TopicThresholdDistribution {
            topic_weights: conf.topic_weights().clone(),
            range,
        })
    }

    /// 查找主题权重
    ///
    /// 先按原名精确查找；分区实例名回退到其父主题名；
    /// 仍未命中则降级为权重 1 并记录警告（查找未命中不是错误）。
    pub fn weight_for_topic(&self, topic: &str) -> u32 {
        if let Some(weight) = self.topic_weights.get(topic) {
            return *weight;
        }

        if let Ok(name) = TopicName::parse(topic) {
            if let Some(parent) = name.partition_parent() {
                if let Some(weight) = self.topic_weights.get(parent.as_str()) {
                    return *weight;
                }
            }
        }

        warn!(topic = %topic, "Weight not found for topic, default to weight=1");
        DEFAULT_WEIGHT
    }

    /// 计算主题的接收缓冲阈值
    ///
    /// 外部消费运行时据此决定何时停止/恢复向该主题的本地缓冲拉取消息。
    pub fn value_for_topic(&self, topic: &str) -> Result<u32> {
        let threshold = self.range.value_for_weight(self.weight_for_topic(topic))?;
        debug!(topic = %topic, threshold = threshold, "Topic threshold resolved");
        Ok(threshold)
    }

    /// 最小阈值
    pub fn min_value(&self) -> u32 {
        self.range.min_value()
    }

    /// 最大阈值
    pub fn max_value(&self) -> u32 {
        self.range.max_value()
    }
}
