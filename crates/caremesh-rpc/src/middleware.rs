// crates/caremesh-rpc/src/middleware.rs

use tonic::{Request, Status};

/// Logging interceptor for incoming requests.
///
/// Caller authentication is out of scope for the engine; the interceptor
/// only records request metadata via `tracing`.
pub fn logging_interceptor(req: Request<()>) -> Result<Request<()>, Status> {
    tracing::info!("Incoming RPC request: {:?}", req.metadata());
    Ok(req)
}
