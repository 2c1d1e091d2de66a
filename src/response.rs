//! Outgoing HTTP response type and the [`IntoResponse`] conversion trait.
//!
//! Handlers return anything that implements [`IntoResponse`]: a bare
//! [`Response`], a [`StatusCode`], a typed [`Json`] body, a
//! `(StatusCode, Json<T>)` pair for non-200 JSON, or a `Result` of any of
//! those with an error that also converts.

use bytes::Bytes;
use http::StatusCode;
use http_body_util::Full;
use serde::Serialize;

// ── Response ─────────────────────────────────────────────────────────────────

/// An outgoing HTTP response.
///
/// # Shortcuts
///
/// ```rust
/// use http::StatusCode;
/// use roster::Response;
///
/// Response::json(br#"{"status":"healthy"}"#.to_vec());
/// Response::status(StatusCode::NO_CONTENT);
/// Response::builder()
///     .status(StatusCode::CREATED)
///     .json(br#"{"id":1}"#.to_vec());
/// ```
pub struct Response {
    pub(crate) body: Vec<u8>,
    pub(crate) headers: Vec<(String, String)>,
    pub(crate) status: StatusCode,
}

impl Response {
    /// `200 OK` — `application/json`. Takes the serialized bytes directly;
    /// for typed values, prefer returning [`Json`] from the handler.
    pub fn json(body: Vec<u8>) -> Self {
        Self {
            body,
            headers: vec![("content-type".to_owned(), "application/json".to_owned())],
            status: StatusCode::OK,
        }
    }

    /// Response with no body.
    pub fn status(code: StatusCode) -> Self {
        Self { body: Vec::new(), headers: Vec::new(), status: code }
    }

    /// Builder for responses that need a non-200 status.
    pub fn builder() -> ResponseBuilder {
        ResponseBuilder { status: StatusCode::OK }
    }

    pub fn status_code(&self) -> StatusCode {
        self.status
    }

    pub fn body(&self) -> &[u8] {
        &self.body
    }

    /// Converts into the hyper-facing representation.
    pub(crate) fn into_inner(self) -> http::Response<Full<Bytes>> {
        let mut builder = http::Response::builder().status(self.status);
        for (name, value) in &self.headers {
            builder = builder.header(name, value);
        }
        // Header names and values originate from in-crate constants, so the
        // builder cannot reject them.
        builder
            .body(Full::new(Bytes::from(self.body)))
            .expect("response built from static parts")
    }
}

// ── ResponseBuilder ───────────────────────────────────────────────────────────

/// Fluent builder for [`Response`]. Obtain via [`Response::builder()`];
/// defaults to `200 OK`, terminated by a body method.
pub struct ResponseBuilder {
    status: StatusCode,
}

impl ResponseBuilder {
    pub fn status(mut self, code: StatusCode) -> Self {
        self.status = code;
        self
    }

    /// Terminate with a JSON body (`application/json`).
    pub fn json(self, body: Vec<u8>) -> Response {
        Response { status: self.status, ..Response::json(body) }
    }
}

// ── Json ─────────────────────────────────────────────────────────────────────

/// A typed JSON response body. Serialized with serde when the handler returns.
///
/// ```rust,ignore
/// async fn get_user(store: Arc<UserStore>, req: Request) -> Result<Json<User>, ApiError> {
///     Ok(Json(store.get(path_id(&req)?)?))
/// }
/// ```
pub struct Json<T>(pub T);

// ── IntoResponse ──────────────────────────────────────────────────────────────

/// Conversion into an HTTP [`Response`]. Implemented for everything a handler
/// may return.
pub trait IntoResponse {
    fn into_response(self) -> Response;
}

impl IntoResponse for Response {
    fn into_response(self) -> Response {
        self
    }
}

/// Return a bare status from a handler: `Ok(StatusCode::NO_CONTENT)`.
impl IntoResponse for StatusCode {
    fn into_response(self) -> Response {
        Response::status(self)
    }
}

impl<T: Serialize> IntoResponse for Json<T> {
    fn into_response(self) -> Response {
        (StatusCode::OK, self).into_response()
    }
}

/// JSON body with an explicit status — `(StatusCode::CREATED, Json(user))`.
impl<T: Serialize> IntoResponse for (StatusCode, Json<T>) {
    fn into_response(self) -> Response {
        let (status, Json(value)) = self;
        match serde_json::to_vec(&value) {
            Ok(bytes) => Response::builder().status(status).json(bytes),
            Err(_) => Response::status(StatusCode::INTERNAL_SERVER_ERROR),
        }
    }
}

/// Lets handlers propagate [`ApiError`](crate::ApiError) (or any convertible
/// error) with `?` while returning typed success bodies.
impl<T: IntoResponse, E: IntoResponse> IntoResponse for Result<T, E> {
    fn into_response(self) -> Response {
        match self {
            Ok(value) => value.into_response(),
            Err(err) => err.into_response(),
        }
    }
}
