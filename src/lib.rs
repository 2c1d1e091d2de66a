//! # roster
//!
//! An in-memory user directory service over HTTP. One resource, five
//! operations, zero persistence.
//!
//! ## The contract
//!
//! The store is the process: it starts empty, lives entirely in memory behind
//! a single lock, and is discarded on exit. Ids start at 1, only ever count
//! up, and are never reused — not even after a delete. Updates are full
//! replacements, never merges.
//!
//! | Method | Path | Success | Failure |
//! |---|---|---|---|
//! | GET | `/health` | 200 `{"status":"healthy"}` | — |
//! | GET | `/users` | 200, creation-ordered array | — |
//! | GET | `/users/{id}` | 200, the record | 404 |
//! | POST | `/users` | 201, record with assigned id | 422 |
//! | PUT | `/users/{id}` | 200, replaced record | 404 / 422 |
//! | DELETE | `/users/{id}` | 204, empty body | 404 |
//!
//! Validation failures are structured: every offending field from one request
//! is reported at once, as `{"detail":[{"field","message"},…]}`.
//!
//! ## Quick start
//!
//! ```rust,no_run
//! use roster::{Server, UserStore, routes};
//!
//! #[tokio::main]
//! async fn main() {
//!     Server::bind("0.0.0.0:8000")
//!         .serve(routes(), UserStore::new())
//!         .await
//!         .expect("server error");
//! }
//! ```

mod api;
mod error;
mod handler;
mod health;
mod request;
mod response;
mod router;
mod server;
mod store;
mod user;

pub use api::routes;
pub use error::{ApiError, Error, Violation};
pub use handler::Handler;
pub use request::Request;
pub use response::{IntoResponse, Json, Response};
pub use router::Router;
pub use server::Server;
pub use store::UserStore;
pub use user::{User, UserFields, UserPayload};
