//! 范围分布
//!
//! 包装一个分布策略，在构造时完成输入校验并一次性预计算完整的阈值点序列，
//! 之后只读。权重 1 对应首个阈值点（1 起权重映射到 0 起下标）。

use super::strategy::DistributionStrategy;
use crate::error::{Result, WeightError};
use std::fmt;
use tracing::info;

/// 范围分布：构造后不可变，可被多线程并发读取
#[derive(Debug, Clone)]
pub struct RangeDistribution {
    strategy: DistributionStrategy,
    points: Vec<u32>,
}

impl RangeDistribution {
    /// 构造范围分布
    ///
    /// 校验 `lower >= 1`、`points >= 1`、`upper >= lower`，
    /// 违反时返回配置错误（构建期程序错误，致命且不重试）。
    pub fn new(
        strategy: DistributionStrategy,
        lower_bound: u32,
        upper_bound: u32,
        max_weight: u32,
    ) -> Result<Self> {
        if lower_bound < 1 {
            return Err(WeightError::invalid_bound(format!(
                "min for lower bound is 1, provided={}",
                lower_bound
            )));
        }
        if max_weight == 0 {
            return Err(WeightError::invalid_bound(
                "points should be greater than zero, provided=0",
            ));
        }
        if upper_bound < lower_bound {
            return Err(WeightError::invalid_bound(format!(
                "upper bound should be greater than or equal to lower bound={}, provided={}",
                lower_bound, upper_bound
            )));
        }

        let points = strategy.distribute(lower_bound, upper_bound, max_weight);
        info!(
            strategy = %strategy,
            distribution = ?points,
            "Computed threshold distribution"
        );

        Ok(RangeDistribution { strategy, points })
    }

    /// 获取权重对应的阈值
    ///
    /// 权重必须在 `[1, point_count]` 范围内，越界返回配置错误。
    pub fn value_for_weight(&self, weight: u32) -> Result<u32> {
        if weight == 0 || weight as usize > self.points.len() {
            return Err(WeightError::weight_out_of_range(format!(
                "invalid weight={} supplied, valid range [1, {}]",
                weight,
                self.points.len()
            )));
        }
        Ok(self.points[weight as usize - 1])
    }

    /// 最小阈值（首个阈值点）
    pub fn min_value(&self) -> u32 {
        self.points[0]
    }

    /// 最大阈值（末个阈值点）
    pub fn max_value(&self) -> u32 {
        self.points[self.points.len() - 1]
    }

    /// 阈值点个数（即支持的最大权重）
    pub fn point_count(&self) -> u32 {
        self.points.len() as u32
    }

    pub fn strategy(&self) -> DistributionStrategy {
        self.strategy
    }
}

impl fmt::Display for RangeDistribution {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "name={}, distribution=", self.strategy)?;
        for (i, point) in self.points.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{}", point)?;
        }
        Ok(())
    }
}
