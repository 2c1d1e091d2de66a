//! The in-memory user store.
//!
//! One structure owns both the id→record map and the next-id counter, and
//! exposes only the five operations. Both live behind a single mutex: id
//! assignment and insertion happen under one acquisition, so two concurrent
//! creations always observe distinct, sequential ids. No lock is ever held
//! across an `.await` — every operation is a synchronous map access.
//!
//! The map is insertion-ordered, so listing observes creation order. Ids are
//! never reused: the counter only moves forward, and only on a successful
//! creation.

use indexmap::IndexMap;
use parking_lot::Mutex;

use crate::error::ApiError;
use crate::user::{User, UserFields};

/// The process-wide user store. Constructed once at startup, shared across
/// all request handlers for the lifetime of the process.
pub struct UserStore {
    inner: Mutex<Inner>,
}

struct Inner {
    users: IndexMap<u64, User>,
    next_id: u64,
}

impl UserStore {
    /// An empty store. The first created record gets id 1.
    pub fn new() -> Self {
        Self {
            inner: Mutex::new(Inner { users: IndexMap::new(), next_id: 1 }),
        }
    }

    /// All records, in insertion order.
    pub fn list(&self) -> Vec<User> {
        self.inner.lock().users.values().cloned().collect()
    }

    /// The record stored under `id`.
    pub fn get(&self, id: u64) -> Result<User, ApiError> {
        self.inner.lock().users.get(&id).cloned().ok_or(ApiError::NotFound(id))
    }

    /// Assigns the next id, stores the record, and advances the counter —
    /// one atomic step. This is the only place the counter is read or moved.
    pub fn create(&self, fields: UserFields) -> User {
        let mut inner = self.inner.lock();
        let id = inner.next_id;
        let user = User { id, name: fields.name, email: fields.email, age: fields.age };
        inner.users.insert(id, user.clone());
        inner.next_id += 1;
        user
    }

    /// Replaces every field of the record under `id`. Full replacement, not a
    /// merge: the new record is built from `fields` and the existing id, so an
    /// omitted `age` ends up absent even if the old record had one.
    pub fn update(&self, id: u64, fields: UserFields) -> Result<User, ApiError> {
        let mut inner = self.inner.lock();
        if !inner.users.contains_key(&id) {
            return Err(ApiError::NotFound(id));
        }
        let user = User { id, name: fields.name, email: fields.email, age: fields.age };
        // Re-inserting an existing key keeps its original position, so the
        // record's place in the listing order survives the replacement.
        inner.users.insert(id, user.clone());
        Ok(user)
    }

    /// Removes the record under `id`. The remaining records keep their
    /// relative order; the id is gone for the lifetime of the process.
    pub fn remove(&self, id: u64) -> Result<(), ApiError> {
        let mut inner = self.inner.lock();
        inner.users.shift_remove(&id).map(|_| ()).ok_or(ApiError::NotFound(id))
    }
}

impl Default for UserStore {
    fn default() -> Self {
        Self::new()
    }
}
