//! 请求/响应信封
//!
//! 网格入口的数据模型：
//! - 请求信封：action 标签加上各动作的子负载
//! - 动作枚举：封闭集合，路由器据此做穷尽分发
//! - 响应信封：统一的 {success, message, data} 形状

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::errors::BrokerError;

/// 入站请求信封
///
/// 只有与 action 匹配的子负载有意义，其余字段忽略。
/// 子负载缺省时按零值处理，交由下游服务拒绝。
#[derive(Debug, Clone, Deserialize)]
pub struct RequestEnvelope {
    /// 动作标签
    #[serde(default)]
    pub action: String,
    #[serde(default)]
    pub auth: Option<AuthPayload>,
    #[serde(default)]
    pub log: Option<LogPayload>,
    #[serde(default)]
    pub mail: Option<MailPayload>,
}

/// 认证负载
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AuthPayload {
    pub email: String,
    pub password: String,
}

/// 日志负载
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LogPayload {
    pub name: String,
    pub data: String,
}

/// 邮件负载
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MailPayload {
    pub from: String,
    pub to: String,
    pub subject: String,
    pub message: String,
}

/// 封闭的动作枚举
///
/// 路由器对它做穷尽 match，新增动作时编译器会强制补齐分支。
#[derive(Debug, Clone)]
pub enum Action {
    Auth(AuthPayload),
    Log(LogPayload),
    Mail(MailPayload),
}

impl Action {
    /// 动作对应的下游服务名
    pub fn service(&self) -> &'static str {
        match self {
            Action::Auth(_) => "auth",
            Action::Log(_) => "log",
            Action::Mail(_) => "mail",
        }
    }

    /// 动作成功时的确认消息
    pub fn confirmation(&self) -> String {
        match self {
            Action::Auth(_) => "Authenticated!".to_string(),
            Action::Log(_) => "logged".to_string(),
            Action::Mail(msg) => format!("Message sent to {}", msg.to),
        }
    }
}

impl TryFrom<RequestEnvelope> for Action {
    type Error = BrokerError;

    fn try_from(envelope: RequestEnvelope) -> Result<Self, Self::Error> {
        match envelope.action.as_str() {
            "auth" => Ok(Action::Auth(envelope.auth.unwrap_or_default())),
            "log" => Ok(Action::Log(envelope.log.unwrap_or_default())),
            "mail" => Ok(Action::Mail(envelope.mail.unwrap_or_default())),
            other => Err(BrokerError::UnknownAction(other.to_string())),
        }
    }
}

/// 统一响应信封
///
/// 无论下游走哪种协议，返回给调用方的都是这一种形状。
/// 下游服务的应答与之同形，解码时直接复用。
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResponseEnvelope {
    pub success: bool,
    #[serde(default)]
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<Value>,
}

impl ResponseEnvelope {
    pub fn ok(message: impl Into<String>, data: Option<Value>) -> Self {
        Self {
            success: true,
            message: message.into(),
            data,
        }
    }

    /// 失败信封不携带 data
    pub fn failure(message: impl Into<String>) -> Self {
        Self {
            success: false,
            message: message.into(),
            data: None,
        }
    }
}
