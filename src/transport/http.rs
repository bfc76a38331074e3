//! HTTP 传输适配器
//!
//! 向下游服务发起 JSON POST 并解析应答信封：
//! - 期望状态码为 202 Accepted
//! - 401 作为凭证被拒的区分错误返回
//! - 其余状态码一律视为调用失败

use std::time::Duration;

use reqwest::{Client, StatusCode};
use serde::Serialize;
use tracing::debug;
use url::Url;

use crate::envelope::ResponseEnvelope;
use crate::transport::TransportError;

/// HTTP 传输适配器
///
/// 无状态：同一个实例可被并发请求复用，
/// 连接的获取与归还由连接池按次调用管理。
#[derive(Debug, Clone)]
pub struct HttpTransport {
    http: Client,
}

impl HttpTransport {
    /// 创建带统一调用时限的适配器
    pub fn new(timeout: Duration) -> Self {
        let http = Client::builder()
            .timeout(timeout)
            .build()
            .expect("Failed to create HTTP client");

        Self { http }
    }

    /// 使用外部注入的客户端
    pub fn with_client(http: Client) -> Self {
        Self { http }
    }

    /// 向下游服务 POST 一个 JSON 负载并解析应答信封
    pub async fn post_envelope<B: Serialize>(
        &self,
        url: &Url,
        body: &B,
    ) -> Result<ResponseEnvelope, TransportError> {
        let response = self.http.post(url.clone()).json(body).send().await?;

        let status = response.status();
        debug!("downstream {} answered {}", url, status);

        match status {
            StatusCode::ACCEPTED => Ok(response.json::<ResponseEnvelope>().await?),
            StatusCode::UNAUTHORIZED => Err(TransportError::Unauthorized),
            other => Err(TransportError::UnexpectedStatus(other)),
        }
    }
}
