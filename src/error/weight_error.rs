//! 加权消费统一错误类型
//!
//! 配置错误对当前操作是致命的，不会被重试；权重查找未命中和属性解析失败
//! 不属于错误，分别降级为警告日志和默认值回退。

use super::code::ErrorCode;
use thiserror::Error;

/// 加权消费统一错误类型
#[derive(Error, Debug, Clone)]
pub enum WeightError {
    /// 配置错误（携带错误代码，用于分类与排查）
    #[error("配置错误 [{code}] {reason}", code = .code.as_str())]
    Configuration {
        code: ErrorCode,
        reason: String,
        timestamp: chrono::DateTime<chrono::Utc>,
    },

    /// 系统错误（内部不变量被破坏，不应在正常使用中出现）
    #[error("系统错误: {0}")]
    System(String),
}

impl WeightError {
    /// 创建配置错误
    pub fn configuration(code: ErrorCode, reason: impl Into<String>) -> Self {
        WeightError::Configuration {
            code,
            reason: reason.into(),
            timestamp: chrono::Utc::now(),
        }
    }

    /// 创建系统错误
    pub fn system(msg: impl Into<String>) -> Self {
        WeightError::System(msg.into())
    }

    // ============================================================
    // 便捷方法：边界与权重校验错误
    // ============================================================

    /// 创建边界非法错误
    pub fn invalid_bound(reason: impl Into<String>) -> Self {
        Self::configuration(ErrorCode::InvalidBound, reason)
    }

    /// 创建权重非法错误
    pub fn invalid_weight(reason: impl Into<String>) -> Self {
        Self::configuration(ErrorCode::InvalidWeight, reason)
    }

    /// 创建恢复阈值非法错误
    pub fn invalid_resume_threshold(reason: impl Into<String>) -> Self {
        Self::configuration(ErrorCode::InvalidResumeThreshold, reason)
    }

    /// 创建权重超出分布范围错误
    pub fn weight_out_of_range(reason: impl Into<String>) -> Self {
        Self::configuration(ErrorCode::WeightOutOfRange, reason)
    }

    // ============================================================
    // 便捷方法：订阅请求校验错误
    // ============================================================

    /// 创建缺少主题错误
    pub fn missing_topic(reason: impl Into<String>) -> Self {
        Self::configuration(ErrorCode::MissingTopic, reason)
    }

    /// 创建缺少订阅名错误
    pub fn missing_subscription_name(reason: impl Into<String>) -> Self {
        Self::configuration(ErrorCode::MissingSubscriptionName, reason)
    }

    /// 创建订阅类型不匹配错误
    pub fn subscription_type_mismatch(reason: impl Into<String>) -> Self {
        Self::configuration(ErrorCode::SubscriptionTypeMismatch, reason)
    }

    // ============================================================
    // 便捷方法：主题命名错误
    // ============================================================

    /// 创建主题名非法错误
    pub fn invalid_topic_name(reason: impl Into<String>) -> Self {
        Self::configuration(ErrorCode::InvalidTopicName, reason)
    }

    /// 创建分布策略非法错误
    pub fn invalid_strategy(reason: impl Into<String>) -> Self {
        Self::configuration(ErrorCode::InvalidDistributionStrategy, reason)
    }

    // ============================================================
    // 信息获取方法
    // ============================================================

    /// 获取错误代码
    pub fn code(&self) -> Option<ErrorCode> {
        match self {
            WeightError::Configuration { code, .. } => Some(*code),
            _ => None,
        }
    }

    /// 获取错误原因
    pub fn reason(&self) -> &str {
        match self {
            WeightError::Configuration { reason, .. } => reason,
            WeightError::System(msg) => msg,
        }
    }

    /// 判断是否为配置错误
    pub fn is_configuration(&self) -> bool {
        matches!(self, WeightError::Configuration { .. })
    }

    /// 判断是否为可重试的错误
    pub fn is_retryable(&self) -> bool {
        self.code().map(|code| code.is_retryable()).unwrap_or(false)
    }
}

/// 结果类型别名
pub type Result<T> = std::result::Result<T, WeightError>;
