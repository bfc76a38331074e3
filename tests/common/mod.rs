//! 测试通用工具
//!
//! 提供日志初始化、下游服务桩和路由器装配辅助

#![allow(dead_code)]

use std::net::SocketAddr;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Once};
use std::time::Duration;

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::routing::post;
use axum::{Json, Router};
use serde_json::Value;
use tokio_stream::wrappers::TcpListenerStream;
use tonic::transport::Server;
use tonic::{Request, Response, Status};

use meshbroker::proto::logs::log_service_server::{LogService, LogServiceServer};
use meshbroker::proto::logs::{LogRequest, LogResponse};
use meshbroker::router::{ActionRouter, Targets};
use meshbroker::transport::{HttpTransport, RpcLogTransport};

static INIT: Once = Once::new();

/// 初始化测试环境
pub fn setup() {
    INIT.call_once(|| {
        let _ = tracing_subscriber::fmt()
            .with_env_filter("debug")
            .try_init();
    });
}

/// 测试用的下游调用时限
pub const TEST_HTTP_TIMEOUT: Duration = Duration::from_secs(5);
pub const TEST_RPC_TIMEOUT: Duration = Duration::from_millis(500);

/// 以测试时限装配一个路由器
pub fn build_router(
    auth_url: url::Url,
    log_url: url::Url,
    mail_url: url::Url,
    rpc_endpoint: impl Into<String>,
) -> ActionRouter {
    let targets = Targets {
        auth_url,
        log_url,
        mail_url,
        log_rpc_endpoint: rpc_endpoint.into(),
    };

    ActionRouter::new(
        targets,
        HttpTransport::new(TEST_HTTP_TIMEOUT),
        RpcLogTransport::new(TEST_RPC_TIMEOUT),
    )
}

/// 保证无人监听的本地地址
pub async fn unused_endpoint() -> SocketAddr {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind probe listener");
    let addr = listener.local_addr().expect("probe addr");
    drop(listener);
    addr
}

/// 保证无人监听的下游 URL
pub async fn unused_url() -> url::Url {
    format!("http://{}/", unused_endpoint().await)
        .parse()
        .expect("unused url")
}

// ==================== HTTP 下游桩 ====================

/// 固定应答的下游服务桩，统计命中次数
pub struct StubService {
    pub addr: SocketAddr,
    hits: Arc<AtomicUsize>,
}

impl StubService {
    pub fn url(&self) -> url::Url {
        format!("http://{}/", self.addr).parse().expect("stub url")
    }

    pub fn hit_count(&self) -> usize {
        self.hits.load(Ordering::SeqCst)
    }
}

struct StubState {
    status: StatusCode,
    body: Value,
    hits: Arc<AtomicUsize>,
}

async fn stub_handler(State(state): State<Arc<StubState>>) -> impl IntoResponse {
    state.hits.fetch_add(1, Ordering::SeqCst);
    (state.status, Json(state.body.clone()))
}

/// 启动一个固定应答的下游服务桩
pub async fn spawn_stub(status: StatusCode, body: Value) -> StubService {
    let hits = Arc::new(AtomicUsize::new(0));
    let state = Arc::new(StubState {
        status,
        body,
        hits: hits.clone(),
    });

    let app = Router::new().route("/", post(stub_handler)).with_state(state);

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind stub");
    let addr = listener.local_addr().expect("stub addr");

    tokio::spawn(async move {
        axum::serve(listener, app).await.expect("serve stub");
    });

    StubService { addr, hits }
}

// ==================== gRPC 日志桩 ====================

/// 立即应答的日志服务桩
pub struct InstantLogStub;

#[tonic::async_trait]
impl LogService for InstantLogStub {
    async fn write_log(
        &self,
        request: Request<LogRequest>,
    ) -> Result<Response<LogResponse>, Status> {
        let entry = request.into_inner().log_entry.unwrap_or_default();
        if entry.name.is_empty() {
            return Err(Status::invalid_argument("log entry has no name"));
        }

        Ok(Response::new(LogResponse {
            result: "logged!".to_string(),
        }))
    }
}

/// 迟迟不应答的日志服务桩
pub struct SlowLogStub {
    pub delay: Duration,
}

#[tonic::async_trait]
impl LogService for SlowLogStub {
    async fn write_log(
        &self,
        _request: Request<LogRequest>,
    ) -> Result<Response<LogResponse>, Status> {
        tokio::time::sleep(self.delay).await;

        Ok(Response::new(LogResponse {
            result: "logged!".to_string(),
        }))
    }
}

/// 启动一个 gRPC 日志服务桩，返回其端点地址
pub async fn spawn_log_stub<S>(svc: S) -> String
where
    S: LogService,
{
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind log stub");
    let addr = listener.local_addr().expect("log stub addr");
    let incoming = TcpListenerStream::new(listener);

    tokio::spawn(async move {
        Server::builder()
            .add_service(LogServiceServer::new(svc))
            .serve_with_incoming(incoming)
            .await
            .expect("serve log stub");
    });

    format!("http://{}", addr)
}
