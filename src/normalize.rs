//! 响应归一化
//!
//! 把各协议的成功/失败形状映射为统一响应信封。
//! 纯函数：不重试、不打日志、不做 I/O。

use crate::envelope::{Action, ResponseEnvelope};
use crate::proto::logs::LogResponse;
use crate::transport::TransportError;

/// 把一次 HTTP 下游调用的结果映射为统一信封
///
/// - 传输错误：按动作映射错误消息
/// - 下游自报失败：原样透传下游消息
/// - 下游成功：换上动作各自的确认消息，透传 data
pub fn normalize(
    action: &Action,
    reply: Result<ResponseEnvelope, TransportError>,
) -> ResponseEnvelope {
    match reply {
        Ok(remote) => {
            if remote.success {
                ResponseEnvelope::ok(action.confirmation(), remote.data)
            } else if remote.message.is_empty() {
                // 失败信封必须带消息，下游不给就补一条
                ResponseEnvelope::failure(format!(
                    "{} service reported failure",
                    action.service()
                ))
            } else {
                ResponseEnvelope::failure(remote.message)
            }
        }
        Err(err) => ResponseEnvelope::failure(failure_message(action, &err)),
    }
}

/// 把一次 gRPC 日志调用的结果映射为统一信封
pub fn normalize_rpc_log(reply: Result<LogResponse, TransportError>) -> ResponseEnvelope {
    match reply {
        Ok(_) => ResponseEnvelope::ok("logged", None),
        Err(err) => ResponseEnvelope::failure(err.to_string()),
    }
}

/// 传输错误的消息映射
///
/// 401 只对 auth 动作映射为凭证错误；其余动作的 401 与一切
/// 预期外状态码给统一的服务错误文案；连接、超时、解码错误
/// 回退到适配器的原始错误文本。
fn failure_message(action: &Action, err: &TransportError) -> String {
    match err {
        TransportError::Unauthorized if matches!(action, Action::Auth(_)) => {
            "invalid credentials".to_string()
        }
        TransportError::Unauthorized | TransportError::UnexpectedStatus(_) => {
            format!("error calling {} service", action.service())
        }
        other => other.to_string(),
    }
}
