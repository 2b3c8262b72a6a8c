//! Actor connector port
//!
//! Constructs a backend connection for a principal, including the
//! access-control initialization handshake. The actor init guard is the
//! only caller; no other component may construct a connection.

use std::sync::Arc;

use async_trait::async_trait;

use crate::error::BackendError;
use crate::identity::Identity;
use crate::ports::backend::BackendPort;

#[async_trait]
pub trait ActorConnectorPort: Send + Sync {
    /// Establish a connection. `None` identity yields an anonymous
    /// connection; the backend decides what anonymous callers may do.
    async fn connect(&self, identity: Option<&Identity>)
        -> Result<Arc<dyn BackendPort>, BackendError>;
}
