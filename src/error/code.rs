//! 错误代码和错误类别定义
//!
//! 加权消费核心的错误代码，按类别分组，每个类别占用1000个代码范围：
//! - 1000-1999: 配置相关错误
//! - 2000-2999: 主题命名相关错误
//! - 3000-3999: 分布计算相关错误
//! - 6000-6999: 系统相关错误

use serde::{Deserialize, Serialize};
use std::fmt;

/// 错误代码枚举
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[repr(u32)]
pub enum ErrorCode {
    // ============================================================
    // 配置相关错误 (1000-1999)
    // ============================================================
    InvalidDistributionStrategy = 1000,
    InvalidBound = 1001,
    InvalidWeight = 1002,
    InvalidResumeThreshold = 1003,
    MissingTopic = 1004,
    MissingSubscriptionName = 1005,
    SubscriptionTypeMismatch = 1006,
    ConfigurationError = 1007,

    // ============================================================
    // 主题命名相关错误 (2000-2999)
    // ============================================================
    InvalidTopicName = 2000,

    // ============================================================
    // 分布计算相关错误 (3000-3999)
    // ============================================================
    WeightOutOfRange = 3000,

    // ============================================================
    // 系统相关错误 (6000-6999)
    // ============================================================
    InternalError = 6000,
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl ErrorCode {
    /// 获取错误代码的数字值
    #[inline]
    pub fn as_u32(&self) -> u32 {
        *self as u32
    }

    /// 从数字值创建错误代码
    pub fn from_u32(code: u32) -> Option<Self> {
        match code {
            1000 => Some(ErrorCode::InvalidDistributionStrategy),
            1001 => Some(ErrorCode::InvalidBound),
            1002 => Some(ErrorCode::InvalidWeight),
            1003 => Some(ErrorCode::InvalidResumeThreshold),
            1004 => Some(ErrorCode::MissingTopic),
            1005 => Some(ErrorCode::MissingSubscriptionName),
            1006 => Some(ErrorCode::SubscriptionTypeMismatch),
            1007 => Some(ErrorCode::ConfigurationError),
            2000 => Some(ErrorCode::InvalidTopicName),
            3000 => Some(ErrorCode::WeightOutOfRange),
            6000 => Some(ErrorCode::InternalError),
            _ => None,
        }
    }

    /// 获取错误代码的英文标识符
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorCode::InvalidDistributionStrategy => "INVALID_DISTRIBUTION_STRATEGY",
            ErrorCode::InvalidBound => "INVALID_BOUND",
            ErrorCode::InvalidWeight => "INVALID_WEIGHT",
            ErrorCode::InvalidResumeThreshold => "INVALID_RESUME_THRESHOLD",
            ErrorCode::MissingTopic => "MISSING_TOPIC",
            ErrorCode::MissingSubscriptionName => "MISSING_SUBSCRIPTION_NAME",
            ErrorCode::SubscriptionTypeMismatch => "SUBSCRIPTION_TYPE_MISMATCH",
            ErrorCode::ConfigurationError => "CONFIGURATION_ERROR",
            ErrorCode::InvalidTopicName => "INVALID_TOPIC_NAME",
            ErrorCode::WeightOutOfRange => "WEIGHT_OUT_OF_RANGE",
            ErrorCode::InternalError => "INTERNAL_ERROR",
        }
    }

    /// 获取错误代码的类别（用于错误分类）
    pub fn category(&self) -> ErrorCategory {
        let code = self.as_u32();
        match code {
            1000..=1999 => ErrorCategory::Configuration,
            2000..=2999 => ErrorCategory::Topic,
            3000..=3999 => ErrorCategory::Distribution,
            _ => ErrorCategory::System,
        }
    }

    /// 判断是否为可重试的错误
    ///
    /// 本核心的所有输入都是本地且确定性的，重试属于外部网络层。
    pub fn is_retryable(&self) -> bool {
        false
    }
}

/// 错误类别
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCategory {
    Configuration,
    Topic,
    Distribution,
    System,
}

impl fmt::Display for ErrorCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ErrorCategory::Configuration => write!(f, "CONFIGURATION"),
            ErrorCategory::Topic => write!(f, "TOPIC"),
            ErrorCategory::Distribution => write!(f, "DISTRIBUTION"),
            ErrorCategory::System => write!(f, "SYSTEM"),
        }
    }
}
