// crates/caremesh-rpc/src/server.rs
//
// RPC server setup: MeshRpcServer and RpcConfig.
//
// The server is a single tonic unary service speaking a JSON envelope: a
// method name plus a JSON params payload in, success/result/error out.
// This keeps the wire surface exactly the caller contracts of the engine
// without any proto codegen; tonic supplies transport and interceptors.
//
// All shared state is held behind trait objects, so the server never
// knows which store backend the daemon wired in.

use std::sync::Arc;
use std::time::Instant;

use http_body::Body as HttpBody;
use http_body_util::BodyExt;
use serde::{Deserialize, Serialize};
use tonic::transport::Server;
use tonic::Status;

use caremesh_core::{EventLog, OutcomeSampleSource, ParticipantStore, RecordStore};
use caremesh_credits::CreditLedger;

use crate::handlers;
use crate::middleware;

// ---------------------------------------------------------------------------
// RpcConfig
// ---------------------------------------------------------------------------

/// Configuration for the RPC server.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RpcConfig {
    /// Host to bind to (e.g., "127.0.0.1" or "0.0.0.0").
    pub host: String,
    /// Port to listen on.
    pub port: u16,
}

impl Default for RpcConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 50061,
        }
    }
}

// ---------------------------------------------------------------------------
// JSON-RPC Envelope
// ---------------------------------------------------------------------------

/// A JSON-RPC-style request envelope.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JsonRpcRequest {
    /// The method to invoke (e.g., "intake/check", "care/continue").
    pub method: String,
    /// JSON-encoded parameters for the method.
    pub params: serde_json::Value,
}

/// A JSON-RPC-style response envelope.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JsonRpcResponse {
    /// Whether the request succeeded.
    pub success: bool,
    /// The result data (if success).
    pub result: Option<serde_json::Value>,
    /// Error message (if not success).
    pub error: Option<String>,
}

// ---------------------------------------------------------------------------
// MeshRpcServer
// ---------------------------------------------------------------------------

/// The CareMesh RPC server.
///
/// Holds the shared engine state (participant table, record store,
/// outcome samples, credit ledger) and serves the JSON-RPC surface.
#[derive(Clone)]
pub struct MeshRpcServer {
    config: RpcConfig,
    participants: Arc<dyn ParticipantStore>,
    records: Arc<dyn RecordStore>,
    samples: Arc<dyn OutcomeSampleSource>,
    ledger: Arc<CreditLedger>,
    start_time: Instant,
}

impl std::fmt::Debug for MeshRpcServer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MeshRpcServer")
            .field("config", &self.config)
            .finish()
    }
}

impl MeshRpcServer {
    /// Create a new MeshRpcServer over the daemon's shared state.
    pub fn new(
        config: RpcConfig,
        participants: Arc<dyn ParticipantStore>,
        records: Arc<dyn RecordStore>,
        samples: Arc<dyn OutcomeSampleSource>,
        events: Arc<dyn EventLog>,
    ) -> Self {
        Self {
            config,
            participants,
            records,
            samples,
            ledger: Arc::new(CreditLedger::new(events)),
            start_time: Instant::now(),
        }
    }

    /// Override the start time used for uptime reporting.
    pub fn with_start_time(mut self, start_time: Instant) -> Self {
        self.start_time = start_time;
        self
    }

    /// Start the RPC server and serve requests until the process is
    /// terminated.
    pub async fn start(&self) -> Result<(), Box<dyn std::error::Error>> {
        let addr = format!("{}:{}", self.config.host, self.config.port).parse()?;

        tracing::info!("CareMesh RPC server starting on {}", addr);

        let service = MeshServiceImpl {
            participants: self.participants.clone(),
            records: self.records.clone(),
            samples: self.samples.clone(),
            ledger: self.ledger.clone(),
            start_time: self.start_time,
        };

        Server::builder()
            .accept_http1(true)
            .add_service(tonic::service::interceptor::InterceptedService::new(
                MeshJsonRpcServer::new(service),
                middleware::logging_interceptor,
            ))
            .serve(addr)
            .await?;

        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Dispatch
// ---------------------------------------------------------------------------

/// The internal service implementation: holds shared state and dispatches
/// JSON-RPC calls to the appropriate handler.
#[derive(Clone)]
struct MeshServiceImpl {
    participants: Arc<dyn ParticipantStore>,
    records: Arc<dyn RecordStore>,
    samples: Arc<dyn OutcomeSampleSource>,
    ledger: Arc<CreditLedger>,
    start_time: Instant,
}

impl MeshServiceImpl {
    /// Dispatch a request to the handler named by its method field.
    async fn dispatch(&self, request: JsonRpcRequest) -> JsonRpcResponse {
        let result = match request.method.as_str() {
            // Participant roster
            "participants/list" => {
                let participants = self.participants.clone();
                dispatch_handler(request.params, |r| async move {
                    handlers::participants::handle_list(participants.as_ref(), r).await
                })
                .await
            }
            "participants/get" => {
                let participants = self.participants.clone();
                dispatch_handler(request.params, |r| async move {
                    handlers::participants::handle_get(participants.as_ref(), r).await
                })
                .await
            }
            "participants/register" => {
                let participants = self.participants.clone();
                dispatch_handler(request.params, |r| async move {
                    handlers::participants::handle_register(participants.as_ref(), r).await
                })
                .await
            }
            "participants/update" => {
                let participants = self.participants.clone();
                dispatch_handler(request.params, |r| async move {
                    handlers::participants::handle_update_settings(participants.as_ref(), r)
                        .await
                })
                .await
            }

            // Intake
            "intake/check" => {
                let participants = self.participants.clone();
                let records = self.records.clone();
                dispatch_handler(request.params, |r| async move {
                    handlers::intake::handle_check(participants.as_ref(), records.as_ref(), r)
                        .await
                })
                .await
            }
            "intake/record" => {
                let participants = self.participants.clone();
                let records = self.records.clone();
                dispatch_handler(request.params, |r| async move {
                    handlers::intake::handle_submit_record(
                        participants.as_ref(),
                        records.as_ref(),
                        r,
                    )
                    .await
                })
                .await
            }

            // Continuity credits
            "care/continue" => {
                let participants = self.participants.clone();
                let records = self.records.clone();
                let ledger = self.ledger.clone();
                dispatch_handler(request.params, |r| async move {
                    handlers::care::handle_continue_care(
                        participants.as_ref(),
                        records.as_ref(),
                        ledger.as_ref(),
                        r,
                    )
                    .await
                })
                .await
            }
            "credits/dashboard" => {
                let ledger = self.ledger.clone();
                dispatch_handler(request.params, |r| async move {
                    handlers::credits::handle_dashboard(ledger.as_ref(), r).await
                })
                .await
            }

            // Benchmarking
            "benchmark/get" => {
                let participants = self.participants.clone();
                let samples = self.samples.clone();
                dispatch_handler(request.params, |r| async move {
                    handlers::benchmark::handle_get(participants.as_ref(), samples.as_ref(), r)
                        .await
                })
                .await
            }

            // Node
            "node/health" => {
                let participants = self.participants.clone();
                let start_time = self.start_time;
                dispatch_handler(request.params, |r| async move {
                    handlers::node::handle_health(participants.as_ref(), start_time, r).await
                })
                .await
            }

            _ => Err(format!("Unknown method: {}", request.method)),
        };

        match result {
            Ok(value) => JsonRpcResponse {
                success: true,
                result: Some(value),
                error: None,
            },
            Err(err) => JsonRpcResponse {
                success: false,
                result: None,
                error: Some(err),
            },
        }
    }
}

/// Generic dispatch helper: deserialize params into the handler's request
/// type, run it, and serialize the result back to JSON.
async fn dispatch_handler<Req, Resp, F, Fut>(
    params: serde_json::Value,
    handler: F,
) -> Result<serde_json::Value, String>
where
    Req: serde::de::DeserializeOwned,
    Resp: serde::Serialize,
    F: FnOnce(Req) -> Fut,
    Fut: std::future::Future<Output = Result<Resp, String>>,
{
    let request: Req = serde_json::from_value(params)
        .map_err(|e| format!("Failed to deserialize request: {}", e))?;
    let response = handler(request).await?;
    serde_json::to_value(response).map_err(|e| format!("Failed to serialize response: {}", e))
}

// ---------------------------------------------------------------------------
// Tonic Service Wiring
// ---------------------------------------------------------------------------
// One service, one method: the request and response bodies are raw bytes
// holding JSON-encoded envelopes. No proto codegen.

/// The tonic service wrapper: accepts bytes, deserializes the envelope,
/// dispatches.
#[derive(Clone)]
pub struct MeshJsonRpcServer {
    inner: MeshServiceImpl,
}

impl std::fmt::Debug for MeshJsonRpcServer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MeshJsonRpcServer").finish()
    }
}

impl MeshJsonRpcServer {
    fn new(inner: MeshServiceImpl) -> Self {
        Self { inner }
    }
}

impl tonic::server::NamedService for MeshJsonRpcServer {
    const NAME: &'static str = "caremesh.rpc.MeshService";
}

impl<B> tower_service::Service<http::Request<B>> for MeshJsonRpcServer
where
    B: HttpBody + Send + 'static,
    B::Error: Into<Box<dyn std::error::Error + Send + Sync>> + Send,
    B::Data: Send,
{
    type Response = http::Response<tonic::body::BoxBody>;
    type Error = std::convert::Infallible;
    type Future = std::pin::Pin<
        Box<dyn std::future::Future<Output = Result<Self::Response, Self::Error>> + Send>,
    >;

    fn poll_ready(
        &mut self,
        _cx: &mut std::task::Context<'_>,
    ) -> std::task::Poll<Result<(), Self::Error>> {
        std::task::Poll::Ready(Ok(()))
    }

    fn call(&mut self, req: http::Request<B>) -> Self::Future {
        let inner = self.inner.clone();

        Box::pin(async move {
            let body = req.into_body();
            let body_bytes = match collect_body(body).await {
                Ok(bytes) => bytes,
                Err(e) => {
                    tracing::error!("Failed to read request body: {}", e);
                    return Ok(envelope_response(JsonRpcResponse {
                        success: false,
                        result: None,
                        error: Some(format!("Failed to read request body: {}", e)),
                    }));
                }
            };

            let rpc_request: JsonRpcRequest = match serde_json::from_slice(&body_bytes) {
                Ok(request) => request,
                Err(e) => {
                    return Ok(envelope_response(JsonRpcResponse {
                        success: false,
                        result: None,
                        error: Some(format!("Invalid JSON-RPC request: {}", e)),
                    }));
                }
            };

            let rpc_response = inner.dispatch(rpc_request).await;
            Ok(envelope_response(rpc_response))
        })
    }
}

/// Collect the body of an HTTP request into bytes.
async fn collect_body<B>(body: B) -> Result<Vec<u8>, String>
where
    B: HttpBody + Send,
    B::Error: Into<Box<dyn std::error::Error + Send + Sync>>,
    B::Data: Send,
{
    let mut collected = Vec::new();
    let mut body = std::pin::pin!(body);

    loop {
        match std::future::poll_fn(|cx| HttpBody::poll_frame(body.as_mut(), cx)).await {
            Some(Ok(frame)) => {
                if let Ok(data) = frame.into_data() {
                    use bytes::Buf;
                    collected.extend_from_slice(data.chunk());
                }
            }
            Some(Err(e)) => return Err(e.into().to_string()),
            None => break,
        }
    }

    Ok(collected)
}

/// Build an HTTP response carrying the serialized envelope.
fn envelope_response(response: JsonRpcResponse) -> http::Response<tonic::body::BoxBody> {
    let json = serde_json::to_vec(&response).unwrap_or_default();
    let body = tonic::body::BoxBody::new(
        http_body_util::Full::new(bytes::Bytes::from(json))
            .map_err(|e| Status::internal(format!("body error: {}", e))),
    );

    http::Response::builder()
        .status(200)
        .header("content-type", "application/json")
        .body(body)
        .unwrap()
}
