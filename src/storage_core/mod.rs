//! Storage Core - Uniform Key/Value Persistence
//!
//! One key-based backend interface with two implementations: a hierarchical
//! local filesystem and a flat object store. The session store owns the
//! canonical key scheme (`<area>/<sessionId>/<filename>`) and emulates
//! directory-style session listing over either backend.

pub mod backend;
pub mod local;
pub mod object;
pub mod session_store;

pub use backend::{StorageBackend, StorageError};
pub use local::LocalStorage;
pub use object::{ObjectStorage, ObjectStoreClient, ObjectStoreError};
pub use session_store::{SessionStore, StorageArea, StoreError};
