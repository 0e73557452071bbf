//! Session persistence adapters.

mod session_store;

pub use session_store::FileSessionStore;
