//! 标准化错误处理
//!
//! 定义 broker 专用的错误类型

use thiserror::Error;

/// Broker 主要错误类型
///
/// 只承载必须打断路由流程的错误；下游调用失败不在此列，
/// 它们在处理器边界就被转成归一化失败信封。
#[derive(Error, Debug)]
pub enum BrokerError {
    /// 未知的 action 标签
    #[error("unknown action: {0}")]
    UnknownAction(String),

    /// 配置错误
    #[error("Configuration error: {0}")]
    ConfigError(String),
}

impl From<url::ParseError> for BrokerError {
    fn from(err: url::ParseError) -> Self {
        BrokerError::ConfigError(err.to_string())
    }
}

/// Broker 结果类型别名
pub type Result<T> = std::result::Result<T, BrokerError>;
