// crates/caremesh-rpc/src/lib.rs
//
// caremesh-rpc: JSON-RPC server and handlers for the CareMesh network.
//
// A single tonic unary service accepts JSON-encoded requests carrying a
// method field, dispatches to the appropriate handler, and returns
// JSON-encoded responses. No proto codegen; tonic provides transport and
// middleware only. The exposed methods are the caller contracts of the
// engine: intake check, record submission, continue-care, the credits
// dashboard, benchmarking, and participant settings.

pub mod handlers;
pub mod middleware;
pub mod server;

pub use server::{JsonRpcRequest, JsonRpcResponse, MeshRpcServer, RpcConfig};
