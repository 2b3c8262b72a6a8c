//! Backend actor adapters (HTTP JSON)

pub mod connector;
pub mod http_backend;
pub mod wire;

pub use connector::HttpActorConnector;
pub use http_backend::HttpBackend;
