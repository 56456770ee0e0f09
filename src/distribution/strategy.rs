//! 分布策略
//!
//! 将权重区间 `[1, points]` 展开为边界区间 `[lower, upper]` 上的阈值点序列。
//! 策略为纯函数：相同输入必然产生相同输出，无副作用。
//!
//! 两种策略都保证：输出长度等于 `points`，序列非递减，
//! 首元素恰等于 `lower`，末元素恰等于 `upper`（整数相等）。

use crate::error::WeightError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// 分布策略枚举
///
/// 固定的纯函数集合，按枚举分发，新增策略需满足模块级的边界保证。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DistributionStrategy {
    /// 线性插值
    #[default]
    Linear,
    /// 指数插值
    Exponential,
}

impl DistributionStrategy {
    /// 获取策略的英文标识符（属性通道中的取值）
    pub fn as_str(&self) -> &'static str {
        match self {
            DistributionStrategy::Linear => "LINEAR",
            DistributionStrategy::Exponential => "EXPONENTIAL",
        }
    }

    /// 计算阈值点序列
    ///
    /// 调用方负责保证 `lower >= 1`、`upper >= lower`、`points >= 1`
    /// （见 `RangeDistribution` 的构造校验）。
    pub(crate) fn distribute(&self, lower: u32, upper: u32, points: u32) -> Vec<u32> {
        match self {
            DistributionStrategy::Linear => distribute_linear(lower, upper, points),
            DistributionStrategy::Exponential => distribute_exponential(lower, upper, points),
        }
    }
}

impl fmt::Display for DistributionStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for DistributionStrategy {
    type Err = WeightError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "LINEAR" => Ok(DistributionStrategy::Linear),
            "EXPONENTIAL" => Ok(DistributionStrategy::Exponential),
            other => Err(WeightError::invalid_strategy(format!(
                "unknown distribution strategy: {}",
                other
            ))),
        }
    }
}

/// 线性插值：`points[i] = lower + round(i * (upper - lower) / (points - 1))`
fn distribute_linear(lower: u32, upper: u32, points: u32) -> Vec<u32> {
    if points == 1 {
        return vec![lower];
    }

    let span = (upper - lower) as f64;
    let steps = (points - 1) as f64;
    (0..points)
        .map(|i| lower + (i as f64 * span / steps).round() as u32)
        .collect()
}

/// 指数插值：公比为 `(upper/lower)^(1/(points-1))` 的几何序列
///
/// 末元素强制取 `upper`，消除浮点误差在边界上的漂移。
fn distribute_exponential(lower: u32, upper: u32, points: u32) -> Vec<u32> {
    if points == 1 {
        return vec![lower];
    }
    if points == 2 {
        return vec![lower, upper];
    }

    let multiplier = (upper as f64 / lower as f64).powf(1.0 / (points - 1) as f64);
    (0..points)
        .map(|i| {
            if i == points - 1 {
                upper
            } else {
                (lower as f64 * multiplier.powi(i as i32)).round() as u32
            }
        })
        .collect()
}
