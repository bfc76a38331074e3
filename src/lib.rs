//! 微服务网格 Broker 服务
//!
//! 网格的统一入口：接收带 action 标签的请求信封，把它路由到
//! 对应的下游服务，并把各协议的结果归一化为统一的响应信封：
//! - 动作路由（auth / log / mail，一对一分发，无回退）
//! - HTTP+JSON 下游调用
//! - gRPC 下游调用（log 动作的备用入口）
//! - 响应归一化（统一的 success / message / data 形状）
//!
//! # 模块分层
//!
//! - `envelope`: 请求/响应信封与动作模型
//! - `transport`: 传输适配层（HTTP 与 gRPC）
//! - `normalize`: 响应归一化
//! - `router`: 动作路由核心
//! - `server`: 入站 HTTP 服务
//! - `config`: 运行配置

pub mod config;
pub mod envelope;
pub mod errors;
pub mod normalize;
pub mod router;
pub mod server;
pub mod transport;

/// 生成的 gRPC 类型
pub mod proto {
    /// 日志服务 proto 定义
    pub mod logs {
        tonic::include_proto!("logs.v1");
    }
}

// 重新导出常用类型
pub use config::AppConfig;
pub use envelope::{
    Action, AuthPayload, LogPayload, MailPayload, RequestEnvelope, ResponseEnvelope,
};
pub use errors::{BrokerError, Result};
pub use router::{ActionRouter, Targets};
pub use transport::{HttpTransport, RpcLogTransport, TransportError};

/// 服务版本
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
