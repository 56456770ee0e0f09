//! 权重-阈值分布引擎
//!
//! 将整数权重（1..maxWeight）换算为每主题的接收缓冲占用阈值：
//! 分布策略（纯函数）→ 范围分布（校验 + 预计算）→ 主题阈值分布（主题名 → 阈值）。
//! 所有类型构造后不可变，可无锁并发读取。

pub mod range;
pub mod strategy;
pub mod threshold;

pub use range::RangeDistribution;
pub use strategy::DistributionStrategy;
pub use threshold::TopicThresholdDistribution;
