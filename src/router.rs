//! 动作路由核心
//!
//! 网格入口的分发逻辑：
//! - 按 action 标签一对一选择处理器，无优先级、无回退、无模糊匹配
//! - 每个处理器恰好发起一次下游调用
//! - 下游故障在处理器边界转成归一化失败信封，绝不外泄原始错误

use tracing::{debug, warn};
use url::Url;

use crate::envelope::{
    Action, AuthPayload, LogPayload, MailPayload, RequestEnvelope, ResponseEnvelope,
};
use crate::errors::Result;
use crate::normalize::{normalize, normalize_rpc_log};
use crate::transport::{HttpTransport, RpcLogTransport};

/// 各动作到下游地址的静态映射
///
/// 进程生命周期内不可变，不随请求改写。
#[derive(Debug, Clone)]
pub struct Targets {
    /// 认证服务（HTTP）
    pub auth_url: Url,
    /// 日志服务（HTTP）
    pub log_url: Url,
    /// 邮件服务（HTTP）
    pub mail_url: Url,
    /// 日志服务（gRPC）
    pub log_rpc_endpoint: String,
}

/// 动作路由器
///
/// 依赖在构造时显式注入，自身没有任何共享可变状态，
/// 并发请求之间完全独立。
pub struct ActionRouter {
    targets: Targets,
    http: HttpTransport,
    rpc: RpcLogTransport,
}

impl ActionRouter {
    pub fn new(targets: Targets, http: HttpTransport, rpc: RpcLogTransport) -> Self {
        Self { targets, http, rpc }
    }

    /// 路由一个请求信封
    ///
    /// 只有客户端输入错误（未知 action）返回 Err，由上层映射为
    /// 400；一切下游结果都以 Ok 携带归一化信封返回。
    pub async fn route(&self, envelope: RequestEnvelope) -> Result<ResponseEnvelope> {
        let action = Action::try_from(envelope)?;
        let service = action.service();
        debug!("routing action: {}", service);

        let response = match action {
            Action::Auth(payload) => self.authenticate(payload).await,
            Action::Log(entry) => self.log_item(entry).await,
            Action::Mail(msg) => self.send_mail(msg).await,
        };

        if !response.success {
            warn!("action {} resolved to failure: {}", service, response.message);
        }

        Ok(response)
    }

    /// log 动作的 gRPC 备用入口
    ///
    /// 与 HTTP 入口各自独立暴露，互不合并、互不去重。
    pub async fn log_via_rpc(&self, entry: LogPayload) -> ResponseEnvelope {
        let reply = self
            .rpc
            .write_log(&self.targets.log_rpc_endpoint, &entry.name, &entry.data)
            .await;

        let response = normalize_rpc_log(reply);
        if !response.success {
            warn!("rpc log resolved to failure: {}", response.message);
        }

        response
    }

    /// 调用认证服务并归一化其应答
    async fn authenticate(&self, payload: AuthPayload) -> ResponseEnvelope {
        let reply = self.http.post_envelope(&self.targets.auth_url, &payload).await;
        normalize(&Action::Auth(payload), reply)
    }

    /// 调用日志服务并归一化其应答
    async fn log_item(&self, entry: LogPayload) -> ResponseEnvelope {
        let reply = self.http.post_envelope(&self.targets.log_url, &entry).await;
        normalize(&Action::Log(entry), reply)
    }

    /// 调用邮件服务并归一化其应答
    async fn send_mail(&self, msg: MailPayload) -> ResponseEnvelope {
        let reply = self.http.post_envelope(&self.targets.mail_url, &msg).await;
        normalize(&Action::Mail(msg), reply)
    }
}
