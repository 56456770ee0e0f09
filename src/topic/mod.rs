//! 主题命名模块
//!
//! 提供主题名解析、分区实例识别与规范名（去分区后缀）计算，
//! 以及按 `<name>-weight-<n>` 约定从主题名推断权重的能力。
//!
//! 支持的主题名形式：
//! - `orders`（短名，默认租户/命名空间 `public/default`）
//! - `persistent://tenant/namespace/orders`
//! - `non-persistent://tenant/namespace/orders`
//! - 以上任意形式加分区后缀，如 `orders-partition-0`

use crate::error::{Result, WeightError};
use serde::{Deserialize, Serialize};
use std::fmt;

/// 分区实例名后缀
pub const PARTITION_SUFFIX: &str = "-partition-";

/// 主题名中权重约定的分隔串
const WEIGHT_MARKER: &str = "-weight-";

/// 默认租户
const DEFAULT_TENANT: &str = "public";

/// 默认命名空间
const DEFAULT_NAMESPACE: &str = "default";

/// 主题域
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TopicDomain {
    Persistent,
    NonPersistent,
}

impl TopicDomain {
    pub fn as_str(&self) -> &'static str {
        match self {
            TopicDomain::Persistent => "persistent",
            TopicDomain::NonPersistent => "non-persistent",
        }
    }
}

impl fmt::Display for TopicDomain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// 解析后的主题名
///
/// 保留原始输入形式（`raw`），规范名计算在原始形式上进行，
/// 保证与权重表中用户提供的键一致。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TopicName {
    raw: String,
    domain: TopicDomain,
    tenant: String,
    namespace: String,
    local: String,
    partition: Option<u32>,
}

impl TopicName {
    /// 解析主题名
    ///
    /// 非法形式（空名、段数不对、空段）返回 `InvalidTopicName` 配置错误。
    pub fn parse(name: &str) -> Result<TopicName> {
        if name.trim().is_empty() {
            return Err(WeightError::invalid_topic_name("topic name is empty"));
        }

        let (domain, rest) = if let Some(rest) = name.strip_prefix("persistent://") {
            (TopicDomain::Persistent, rest)
        } else if let Some(rest) = name.strip_prefix("non-persistent://") {
            (TopicDomain::NonPersistent, rest)
        } else {
            (TopicDomain::Persistent, name)
        };

        let segments: Vec<&str> = rest.split('/').collect();
        let (tenant, namespace, local) = match segments.as_slice() {
            [local] => (DEFAULT_TENANT, DEFAULT_NAMESPACE, *local),
            [tenant, namespace, local] => (*tenant, *namespace, *local),
            _ => {
                return Err(WeightError::invalid_topic_name(format!(
                    "invalid topic name structure: {}",
                    name
                )));
            }
        };

        if tenant.is_empty() || namespace.is_empty() || local.is_empty() {
            return Err(WeightError::invalid_topic_name(format!(
                "topic name contains empty segment: {}",
                name
            )));
        }

        let partition = parse_partition_index(local);

        Ok(TopicName {
            raw: name.to_string(),
            domain,
            tenant: tenant.to_string(),
            namespace: namespace.to_string(),
            local: local.to_string(),
            partition,
        })
    }

    /// 原始输入形式
    pub fn raw(&self) -> &str {
        &self.raw
    }

    pub fn domain(&self) -> TopicDomain {
        self.domain
    }

    pub fn tenant(&self) -> &str {
        &self.tenant
    }

    pub fn namespace(&self) -> &str {
        &self.namespace
    }

    /// 本地名（含分区后缀，如果有）
    pub fn local_name(&self) -> &str {
        &self.local
    }

    /// 是否为分区实例名
    pub fn is_partitioned(&self) -> bool {
        self.partition.is_some()
    }

    /// 分区序号
    pub fn partition_index(&self) -> Option<u32> {
        self.partition
    }

    /// 命名空间路径 `tenant/namespace`（用于派生重试/死信主题名）
    pub fn namespace_path(&self) -> String {
        format!("{}/{}", self.tenant, self.namespace)
    }

    /// 规范名：原始输入去掉分区后缀
    ///
    /// 非分区名的规范名就是原始输入本身。
    pub fn canonical_name(&self) -> String {
        match self.partition {
            Some(index) => {
                let suffix = format!("{}{}", PARTITION_SUFFIX, index);
                match self.raw.strip_suffix(suffix.as_str()) {
                    Some(parent) => parent.to_string(),
                    None => self.raw.clone(),
                }
            }
            None => self.raw.clone(),
        }
    }

    /// 分区父主题名，非分区实例返回 `None`
    pub fn partition_parent(&self) -> Option<String> {
        self.partition.map(|_| self.canonical_name())
    }

    /// 按 `<name>-weight-<n>` 约定从主题名推断权重
    ///
    /// 在去分区后缀的规范名上匹配；约定不成立或数字不可解析时返回 `None`。
    pub fn weight_from_name(&self) -> Option<u32> {
        let canonical = self.canonical_name();
        let parts: Vec<&str> = canonical.split(WEIGHT_MARKER).collect();
        if parts.len() == 2 {
            parts[1].parse::<u32>().ok()
        } else {
            None
        }
    }
}

impl fmt::Display for TopicName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}://{}/{}/{}",
            self.domain, self.tenant, self.namespace, self.local
        )
    }
}

/// 识别本地名末尾的 `-partition-<n>` 后缀
fn parse_partition_index(local: &str) -> Option<u32> {
    let pos = local.rfind(PARTITION_SUFFIX)?;
    let tail = &local[pos + PARTITION_SUFFIX.len()..];
    if tail.is_empty() || !tail.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    tail.parse::<u32>().ok()
}
