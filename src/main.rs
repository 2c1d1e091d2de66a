//! Service entry point.
//!
//! Run with:
//!   RUST_LOG=info cargo run
//!
//! Try:
//!   curl http://localhost:8000/health
//!   curl -X POST http://localhost:8000/users \
//!        -H 'content-type: application/json' \
//!        -d '{"name":"John Doe","email":"john@example.com","age":30}'
//!   curl http://localhost:8000/users/1
//!   curl -X DELETE http://localhost:8000/users/1

use roster::{Server, UserStore, routes};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    // The only configuration there is: where to listen.
    let addr = std::env::var("ROSTER_ADDR").unwrap_or_else(|_| "0.0.0.0:8000".to_owned());

    Server::bind(&addr)
        .serve(routes(), UserStore::new())
        .await
        .expect("server error");
}
