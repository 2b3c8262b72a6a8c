//! HTTP actor connector
//!
//! Builds a backend client bound to the session principal and runs the
//! access-control initialization handshake before handing the connection
//! to the guard. No deadline here; the guard owns the init timeout.

use std::sync::Arc;

use async_trait::async_trait;
use serde_json::json;
use tracing::{debug, info};

use ux_core::config::BackendConfig;
use ux_core::error::BackendError;
use ux_core::identity::Identity;
use ux_core::ports::{ActorConnectorPort, BackendPort};

use crate::backend::http_backend::HttpBackend;

pub struct HttpActorConnector {
    client: reqwest::Client,
    config: BackendConfig,
}

impl HttpActorConnector {
    pub fn new(config: BackendConfig) -> Self {
        Self {
            client: reqwest::Client::new(),
            config,
        }
    }

    pub fn with_client(client: reqwest::Client, config: BackendConfig) -> Self {
        Self { client, config }
    }
}

#[async_trait]
impl ActorConnectorPort for HttpActorConnector {
    async fn connect(
        &self,
        identity: Option<&Identity>,
    ) -> Result<Arc<dyn BackendPort>, BackendError> {
        let backend = match identity {
            Some(identity) => {
                debug!(principal = %identity.principal, "connecting authenticated actor");
                HttpBackend::new(self.client.clone(), self.config.base_url.clone())
                    .with_auth_token(identity.principal.as_str())
            }
            None => {
                debug!("connecting anonymous actor");
                HttpBackend::new(self.client.clone(), self.config.base_url.clone())
            }
        };

        // Access control must be initialized before any other call runs
        // against an authenticated connection.
        if identity.is_some() {
            let admin_token = self.config.admin_token.clone().unwrap_or_default();
            backend
                .call::<_, ()>(
                    "initializeAccessControl",
                    &json!({ "adminToken": admin_token }),
                )
                .await?;
            info!("access control initialized");
        }

        Ok(Arc::new(backend))
    }
}
