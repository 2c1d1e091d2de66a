//! Handler trait and type erasure.
//!
//! # How async handlers are stored
//!
//! The router needs to hold handlers of *different* types in a single
//! `HashMap<Method, Tree>`. Rust collections can only hold one concrete type,
//! so we use **trait objects** (`dyn ErasedHandler`) to hide the concrete
//! handler type behind a common interface and store everything uniformly.
//!
//! Every handler receives the shared [`UserStore`] as its first argument —
//! dispatch threads one `Arc` clone per request — and anything implementing
//! [`IntoResponse`] may be returned, including `Result<_, ApiError>`.
//!
//! The chain from handler to vtable call is:
//!
//! ```text
//! async fn get_user(store, req) -> Result<Json<User>, ApiError>  ← you write this
//!        ↓ router.on(Method::GET, "/users/{id}", get_user)
//! get_user.into_boxed_handler()                    ← Handler blanket impl
//!        ↓
//! Arc::new(FnHandler(get_user))                    ← heap-allocated wrapper
//!        ↓  stored as BoxedHandler = Arc<dyn ErasedHandler>
//! handler.call(store, req)  at request time        ← one vtable dispatch
//! ```
//!
//! The only runtime cost per request is two Arc clones (handler + store) and
//! one virtual call — negligible compared to network I/O.

use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;

use crate::request::Request;
use crate::response::{IntoResponse, Response};
use crate::store::UserStore;

// ── Internal types ────────────────────────────────────────────────────────────

/// A heap-allocated, type-erased future that resolves to a [`Response`].
///
/// `Pin<Box<…>>` is required because the async runtime must be able to poll
/// the future in-place — it cannot move it in memory after the first poll.
/// `Send + 'static` let tokio move the future across threads safely.
pub(crate) type BoxFuture = Pin<Box<dyn Future<Output = Response> + Send + 'static>>;

/// Internal dispatch interface.
///
/// `#[doc(hidden)] pub` rather than `pub(crate)` because it appears in the
/// return type of the public `Handler` trait's `into_boxed_handler` method.
/// External crates cannot usefully interact with this trait.
#[doc(hidden)]
pub trait ErasedHandler {
    fn call(&self, store: Arc<UserStore>, req: Request) -> BoxFuture;
}

/// A heap-allocated, type-erased handler shared across concurrent requests.
///
/// `#[doc(hidden)] pub` for the same reason as `ErasedHandler`.
#[doc(hidden)]
pub type BoxedHandler = Arc<dyn ErasedHandler + Send + Sync + 'static>;

// ── Public Handler trait ──────────────────────────────────────────────────────

/// Implemented for every valid route handler.
///
/// You never implement this yourself. It is automatically satisfied for any
/// `async fn` with the signature:
///
/// ```text
/// async fn name(store: Arc<UserStore>, req: Request) -> impl IntoResponse
/// ```
///
/// The trait is **sealed** (via the private `Sealed` supertrait): only the
/// blanket impl below can satisfy it.
pub trait Handler: private::Sealed + Send + Sync + 'static {
    #[doc(hidden)]
    fn into_boxed_handler(self) -> BoxedHandler;
}

/// The sealing module. Because `Sealed` is private, external crates cannot
/// name it and therefore cannot implement `Handler` on their own types.
mod private {
    pub trait Sealed {}
}

// ── Blanket implementations ───────────────────────────────────────────────────

impl<F, Fut, R> private::Sealed for F
where
    F: Fn(Arc<UserStore>, Request) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = R> + Send + 'static,
    R: IntoResponse + Send + 'static,
{
}

impl<F, Fut, R> Handler for F
where
    F: Fn(Arc<UserStore>, Request) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = R> + Send + 'static,
    R: IntoResponse + Send + 'static,
{
    fn into_boxed_handler(self) -> BoxedHandler {
        Arc::new(FnHandler(self))
    }
}

// ── Concrete wrapper ──────────────────────────────────────────────────────────

/// Newtype wrapper that holds a concrete handler `F` and implements
/// [`ErasedHandler`], bridging the typed world to the trait-object world.
struct FnHandler<F>(F);

impl<F, Fut, R> ErasedHandler for FnHandler<F>
where
    F: Fn(Arc<UserStore>, Request) -> Fut + Send + Sync,
    Fut: Future<Output = R> + Send + 'static,
    R: IntoResponse + Send + 'static,
{
    fn call(&self, store: Arc<UserStore>, req: Request) -> BoxFuture {
        // Call the wrapped function — this returns the concrete `Fut`.
        // We then map it to `Response` via `IntoResponse` and box the whole
        // thing so the return type matches the trait signature.
        let fut = (self.0)(store, req);
        Box::pin(async move { fut.await.into_response() })
    }
}
