//! 传输适配层
//!
//! 把一次逻辑调用翻译成具体协议（HTTP+JSON 或 gRPC），
//! 再把应答或错误翻译回协议无关的结果。
//! 适配器只做机械转换，错误消息的措辞由 `normalize` 模块决定。

pub mod grpc;
pub mod http;

pub use grpc::RpcLogTransport;
pub use http::HttpTransport;

use std::time::Duration;

use thiserror::Error;

/// 协议无关的传输错误
#[derive(Debug, Error)]
pub enum TransportError {
    /// 下游明确拒绝了凭证（HTTP 401）
    #[error("unauthorized")]
    Unauthorized,

    /// 下游返回了预期之外的状态码
    #[error("unexpected status {0}")]
    UnexpectedStatus(reqwest::StatusCode),

    /// HTTP 请求失败（连接、超时或应答解码）
    #[error("{0}")]
    Http(#[from] reqwest::Error),

    /// gRPC 连接失败
    #[error("connection failed: {0}")]
    Connect(#[from] tonic::transport::Error),

    /// gRPC 调用失败
    #[error("call failed: {0}")]
    Rpc(#[from] tonic::Status),

    /// 超过了调用时限
    #[error("timed out after {0:?}")]
    Timeout(Duration),
}
