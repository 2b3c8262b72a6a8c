//! UniXange infrastructure adapters
//!
//! Implementations of the ux-core ports: the HTTP backend client and
//! connector, the file-backed session identity store, and config loading.

pub mod backend;
pub mod config;
pub mod identity;

pub use backend::{HttpActorConnector, HttpBackend};
pub use config::load_config;
pub use identity::FileSessionStore;
