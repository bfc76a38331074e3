//! 运行配置
//!
//! 所有配置项都可以用命令行参数或环境变量给出。

use std::net::SocketAddr;
use std::time::Duration;

use clap::Parser;

use crate::errors::Result;
use crate::router::Targets;

/// Broker 服务配置
#[derive(Parser, Debug, Clone)]
#[command(
    author,
    version,
    about = "Microservice mesh broker: the single front door of the mesh"
)]
pub struct AppConfig {
    /// 监听地址
    #[arg(long, env = "BROKER_LISTEN_ADDR", default_value = "0.0.0.0:8080")]
    pub listen_addr: SocketAddr,

    /// 认证服务地址
    #[arg(
        long,
        env = "AUTH_SERVICE_URL",
        default_value = "http://authentication-service/authenticate"
    )]
    pub auth_url: String,

    /// 日志服务地址
    #[arg(
        long,
        env = "LOG_SERVICE_URL",
        default_value = "http://logger-service/log"
    )]
    pub log_url: String,

    /// 邮件服务地址
    #[arg(
        long,
        env = "MAIL_SERVICE_URL",
        default_value = "http://mail-service/send"
    )]
    pub mail_url: String,

    /// 日志服务 gRPC 端点
    #[arg(
        long,
        env = "LOG_SERVICE_RPC_ADDR",
        default_value = "http://logger-service:50001"
    )]
    pub log_rpc_endpoint: String,

    /// 下游 HTTP 调用时限（秒）
    #[arg(long, env = "DOWNSTREAM_HTTP_TIMEOUT_SECS", default_value_t = 30)]
    pub http_timeout_secs: u64,

    /// 下游 gRPC 调用时限（毫秒）
    #[arg(long, env = "DOWNSTREAM_RPC_TIMEOUT_MILLIS", default_value_t = 1000)]
    pub rpc_timeout_millis: u64,
}

impl AppConfig {
    /// 校验并装配下游地址映射
    ///
    /// 地址只在启动时解析一次，请求路径上不再解析。
    pub fn targets(&self) -> Result<Targets> {
        Ok(Targets {
            auth_url: self.auth_url.parse()?,
            log_url: self.log_url.parse()?,
            mail_url: self.mail_url.parse()?,
            log_rpc_endpoint: self.log_rpc_endpoint.clone(),
        })
    }

    pub fn http_timeout(&self) -> Duration {
        Duration::from_secs(self.http_timeout_secs)
    }

    pub fn rpc_timeout(&self) -> Duration {
        Duration::from_millis(self.rpc_timeout_millis)
    }
}
