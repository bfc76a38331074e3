//! gRPC 传输适配器
//!
//! log 动作的备用通道：按次建立连接，发起一次 WriteLog
//! 单次调用，调用结束即拆除连接。连接加调用整体受时限
//! 约束，超时与其他传输失败同样上报。

use std::time::Duration;

use tracing::debug;

use crate::proto::logs::log_service_client::LogServiceClient;
use crate::proto::logs::{Log, LogRequest, LogResponse};
use crate::transport::TransportError;

/// gRPC 日志传输适配器
#[derive(Debug, Clone)]
pub struct RpcLogTransport {
    timeout: Duration,
}

impl RpcLogTransport {
    pub fn new(timeout: Duration) -> Self {
        Self { timeout }
    }

    /// 向目标端点发起一次 WriteLog 单次调用
    ///
    /// 连接按次建立，无论成功失败都在返回前拆除。
    pub async fn write_log(
        &self,
        endpoint: &str,
        name: &str,
        data: &str,
    ) -> Result<LogResponse, TransportError> {
        let call = async {
            let mut client = LogServiceClient::connect(endpoint.to_string()).await?;

            let request = LogRequest {
                log_entry: Some(Log {
                    name: name.to_string(),
                    data: data.to_string(),
                }),
            };

            let response = client.write_log(request).await?;
            Ok::<LogResponse, TransportError>(response.into_inner())
        };

        let reply = tokio::time::timeout(self.timeout, call)
            .await
            .map_err(|_| TransportError::Timeout(self.timeout))??;

        debug!("log service answered: {}", reply.result);
        Ok(reply)
    }
}
