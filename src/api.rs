//! The user directory API: five operations over the store.
//!
//! Every handler validates its input before touching the store, so a failed
//! request never leaves a partial mutation behind. Body validation runs before
//! the existence check on update, matching the order a client observes: an
//! invalid body is 422 even when the id is also unknown.

use std::sync::Arc;

use http::{Method, StatusCode};

use crate::error::ApiError;
use crate::health;
use crate::request::Request;
use crate::response::Json;
use crate::router::Router;
use crate::store::UserStore;
use crate::user::{User, UserPayload};

/// Builds the application router with every route registered.
pub fn routes() -> Router {
    Router::new()
        .on(Method::GET, "/health", health::check)
        .on(Method::GET, "/users", list_users)
        .on(Method::POST, "/users", create_user)
        .on(Method::GET, "/users/{id}", get_user)
        .on(Method::PUT, "/users/{id}", update_user)
        .on(Method::DELETE, "/users/{id}", delete_user)
}

// ── Handlers ─────────────────────────────────────────────────────────────────

/// `GET /users` — all records, in creation order. An empty store is an empty
/// array, not an error.
async fn list_users(store: Arc<UserStore>, _req: Request) -> Json<Vec<User>> {
    Json(store.list())
}

/// `GET /users/{id}`
async fn get_user(store: Arc<UserStore>, req: Request) -> Result<Json<User>, ApiError> {
    let id = path_id(&req)?;
    Ok(Json(store.get(id)?))
}

/// `POST /users` — validates, then assigns the next id and stores the record.
async fn create_user(
    store: Arc<UserStore>,
    req: Request,
) -> Result<(StatusCode, Json<User>), ApiError> {
    let fields = parse_payload(&req)?.validate()?;
    Ok((StatusCode::CREATED, Json(store.create(fields))))
}

/// `PUT /users/{id}` — full replacement. The stored record is rebuilt from
/// the body and the path id; the body never carries an id.
async fn update_user(store: Arc<UserStore>, req: Request) -> Result<Json<User>, ApiError> {
    let id = path_id(&req)?;
    let fields = parse_payload(&req)?.validate()?;
    Ok(Json(store.update(id, fields)?))
}

/// `DELETE /users/{id}`
async fn delete_user(store: Arc<UserStore>, req: Request) -> Result<StatusCode, ApiError> {
    let id = path_id(&req)?;
    store.remove(id)?;
    Ok(StatusCode::NO_CONTENT)
}

// ── Input plumbing ───────────────────────────────────────────────────────────

/// The `{id}` path segment as an integer. The router guarantees the segment
/// exists on these routes; a non-numeric (or negative) value is a client
/// error reported against `id`, since no such id can ever have been issued.
fn path_id(req: &Request) -> Result<u64, ApiError> {
    req.param("id")
        .and_then(|raw| raw.parse().ok())
        .ok_or_else(|| ApiError::invalid("id", "must be a non-negative integer"))
}

/// Deserializes a create/update body. Syntactically broken JSON and wrong
/// JSON types cannot be pinned to a single declared field, so they surface as
/// one body-level violation carrying the parser's message.
fn parse_payload(req: &Request) -> Result<UserPayload, ApiError> {
    serde_json::from_slice(req.body())
        .map_err(|e| ApiError::invalid("body", e.to_string()))
}

#[cfg(test)]
mod tests {
    use bytes::Bytes;
    use http::HeaderMap;
    use pretty_assertions::assert_eq;
    use serde_json::{Value, json};

    use super::*;
    use crate::handler::ErasedHandler;
    use crate::response::Response;

    /// Routes one request through the router and handlers, the same path
    /// `server::dispatch` takes minus the TCP and body-collection plumbing.
    async fn call(store: &Arc<UserStore>, method: Method, path: &str, body: Value) -> Response {
        let bytes = match &body {
            Value::Null => Bytes::new(),
            other => Bytes::from(serde_json::to_vec(other).unwrap()),
        };
        call_raw(store, method, path, bytes).await
    }

    async fn call_raw(
        store: &Arc<UserStore>,
        method: Method,
        path: &str,
        body: Bytes,
    ) -> Response {
        let router = routes();
        match router.lookup(&method, path) {
            Some((handler, params)) => {
                let req =
                    Request::new(method, path.to_owned(), HeaderMap::new(), body, params);
                handler.call(Arc::clone(store), req).await
            }
            None => Response::builder()
                .status(StatusCode::NOT_FOUND)
                .json(br#"{"detail":"Not Found"}"#.to_vec()),
        }
    }

    fn body_json(res: &Response) -> Value {
        serde_json::from_slice(res.body()).expect("response body is JSON")
    }

    fn store() -> Arc<UserStore> {
        Arc::new(UserStore::new())
    }

    #[tokio::test]
    async fn health_reports_healthy() {
        let res = call(&store(), Method::GET, "/health", Value::Null).await;
        assert_eq!(res.status_code(), StatusCode::OK);
        assert_eq!(body_json(&res), json!({"status": "healthy"}));
    }

    #[tokio::test]
    async fn list_is_empty_on_a_fresh_store() {
        let res = call(&store(), Method::GET, "/users", Value::Null).await;
        assert_eq!(res.status_code(), StatusCode::OK);
        assert_eq!(body_json(&res), json!([]));
    }

    #[tokio::test]
    async fn create_assigns_sequential_ids_and_echoes_fields() {
        let store = store();

        let res = call(
            &store,
            Method::POST,
            "/users",
            json!({"name": "John Doe", "email": "john@example.com", "age": 30}),
        )
        .await;
        assert_eq!(res.status_code(), StatusCode::CREATED);
        assert_eq!(
            body_json(&res),
            json!({"id": 1, "name": "John Doe", "email": "john@example.com", "age": 30}),
        );

        let res = call(
            &store,
            Method::POST,
            "/users",
            json!({"name": "Jane Doe", "email": "jane@example.com"}),
        )
        .await;
        assert_eq!(res.status_code(), StatusCode::CREATED);
        assert_eq!(
            body_json(&res),
            json!({"id": 2, "name": "Jane Doe", "email": "jane@example.com", "age": null}),
        );
    }

    #[tokio::test]
    async fn list_returns_users_in_creation_order() {
        let store = store();
        for (name, email) in [("User 1", "user1@example.com"), ("User 2", "user2@example.com")] {
            call(&store, Method::POST, "/users", json!({"name": name, "email": email})).await;
        }

        let res = call(&store, Method::GET, "/users", Value::Null).await;
        let body = body_json(&res);
        assert_eq!(body[0]["name"], "User 1");
        assert_eq!(body[1]["name"], "User 2");
    }

    #[tokio::test]
    async fn get_returns_the_created_record() {
        let store = store();
        call(
            &store,
            Method::POST,
            "/users",
            json!({"name": "John Doe", "email": "john@example.com", "age": 30}),
        )
        .await;

        let res = call(&store, Method::GET, "/users/1", Value::Null).await;
        assert_eq!(res.status_code(), StatusCode::OK);
        assert_eq!(
            body_json(&res),
            json!({"id": 1, "name": "John Doe", "email": "john@example.com", "age": 30}),
        );
    }

    #[tokio::test]
    async fn get_unknown_id_is_not_found_with_a_message() {
        let res = call(&store(), Method::GET, "/users/999", Value::Null).await;
        assert_eq!(res.status_code(), StatusCode::NOT_FOUND);
        assert_eq!(body_json(&res)["detail"], "User with id 999 not found");
    }

    #[tokio::test]
    async fn create_with_negative_age_is_rejected_and_stores_nothing() {
        let store = store();
        let res = call(
            &store,
            Method::POST,
            "/users",
            json!({"name": "John", "email": "john@example.com", "age": -5}),
        )
        .await;
        assert_eq!(res.status_code(), StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(body_json(&res)["detail"][0]["field"], "age");

        let res = call(&store, Method::GET, "/users", Value::Null).await;
        assert_eq!(body_json(&res), json!([]));
    }

    #[tokio::test]
    async fn create_reports_every_violation_at_once() {
        let res = call(
            &store(),
            Method::POST,
            "/users",
            json!({"name": "", "age": 200}),
        )
        .await;
        assert_eq!(res.status_code(), StatusCode::UNPROCESSABLE_ENTITY);
        let body = body_json(&res);
        let fields: Vec<&str> = body["detail"]
            .as_array()
            .unwrap()
            .iter()
            .map(|v| v["field"].as_str().unwrap())
            .collect();
        assert_eq!(fields, ["name", "email", "age"]);
    }

    #[tokio::test]
    async fn malformed_json_body_is_rejected() {
        let res = call_raw(&store(), Method::POST, "/users", Bytes::from_static(b"not json")).await;
        assert_eq!(res.status_code(), StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(body_json(&res)["detail"][0]["field"], "body");
    }

    #[tokio::test]
    async fn update_replaces_all_fields_and_keeps_the_id() {
        let store = store();
        call(
            &store,
            Method::POST,
            "/users",
            json!({"name": "John Doe", "email": "john@example.com", "age": 30}),
        )
        .await;

        let res = call(
            &store,
            Method::PUT,
            "/users/1",
            json!({"name": "John Smith", "email": "johnsmith@example.com"}),
        )
        .await;
        assert_eq!(res.status_code(), StatusCode::OK);
        // Full replacement: the omitted age does not survive from the old record.
        assert_eq!(
            body_json(&res),
            json!({"id": 1, "name": "John Smith", "email": "johnsmith@example.com", "age": null}),
        );

        let res = call(&store, Method::GET, "/users/1", Value::Null).await;
        assert_eq!(body_json(&res)["age"], Value::Null);
    }

    #[tokio::test]
    async fn update_unknown_id_is_not_found() {
        let res = call(
            &store(),
            Method::PUT,
            "/users/999",
            json!({"name": "Test", "email": "test@example.com"}),
        )
        .await;
        assert_eq!(res.status_code(), StatusCode::NOT_FOUND);
        assert_eq!(body_json(&res)["detail"], "User with id 999 not found");
    }

    #[tokio::test]
    async fn update_with_an_invalid_body_is_rejected_before_the_lookup() {
        let res = call(&store(), Method::PUT, "/users/999", json!({"name": "x"})).await;
        assert_eq!(res.status_code(), StatusCode::UNPROCESSABLE_ENTITY);
    }

    #[tokio::test]
    async fn delete_then_get_is_not_found() {
        let store = store();
        call(
            &store,
            Method::POST,
            "/users",
            json!({"name": "John Doe", "email": "john@example.com", "age": 30}),
        )
        .await;

        let res = call(&store, Method::DELETE, "/users/1", Value::Null).await;
        assert_eq!(res.status_code(), StatusCode::NO_CONTENT);
        assert!(res.body().is_empty());

        let res = call(&store, Method::GET, "/users/1", Value::Null).await;
        assert_eq!(res.status_code(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn delete_unknown_id_is_not_found() {
        let res = call(&store(), Method::DELETE, "/users/999", Value::Null).await;
        assert_eq!(res.status_code(), StatusCode::NOT_FOUND);
        assert_eq!(body_json(&res)["detail"], "User with id 999 not found");
    }

    #[tokio::test]
    async fn ids_keep_increasing_after_deletions() {
        let store = store();
        call(&store, Method::POST, "/users", json!({"name": "a", "email": "a@x"})).await;
        call(&store, Method::DELETE, "/users/1", Value::Null).await;
        let res =
            call(&store, Method::POST, "/users", json!({"name": "b", "email": "b@x"})).await;
        assert_eq!(body_json(&res)["id"], 2);
    }

    #[tokio::test]
    async fn non_integer_id_is_a_validation_error() {
        let res = call(&store(), Method::GET, "/users/abc", Value::Null).await;
        assert_eq!(res.status_code(), StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(body_json(&res)["detail"][0]["field"], "id");
    }

    #[tokio::test]
    async fn unmatched_paths_are_not_found() {
        let res = call(&store(), Method::GET, "/nope", Value::Null).await;
        assert_eq!(res.status_code(), StatusCode::NOT_FOUND);
        assert_eq!(body_json(&res), json!({"detail": "Not Found"}));
    }
}
