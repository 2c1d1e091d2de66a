//! Liveness probe.

use std::sync::Arc;

use crate::request::Request;
use crate::response::Response;
use crate::store::UserStore;

/// `GET /health` — always `200 {"status":"healthy"}`, no side effects.
///
/// If the process can answer HTTP at all, it is alive; this handler
/// intentionally touches nothing, not even the store.
pub async fn check(_store: Arc<UserStore>, _req: Request) -> Response {
    Response::json(br#"{"status":"healthy"}"#.to_vec())
}
