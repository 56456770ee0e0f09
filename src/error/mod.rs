//! 加权消费核心错误处理模块
//!
//! 提供统一的错误处理机制，支持错误代码分类和便捷构造。
//! 错误分类详见各子模块：配置错误致命、查找未命中降级、解析失败回退默认值。

pub mod code;
pub mod weight_error;

// 重新导出公共类型
pub use code::{ErrorCategory, ErrorCode};
pub use weight_error::{Result, WeightError};
