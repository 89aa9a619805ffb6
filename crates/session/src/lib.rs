//! Session token lifecycle for the TeachPortal client
//!
//! Owns the bearer token from login to logout: a storage abstraction with
//! file-backed and in-memory implementations, tolerant decoding of the
//! token's claims segment, and the expiry-aware authentication check.

mod claims;
mod manager;
mod store;

pub use claims::Claims;
pub use manager::SessionManager;
pub use store::{FileSessionStore, MemorySessionStore, SessionStore, StoreError};
