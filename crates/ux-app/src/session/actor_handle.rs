use std::sync::Arc;

use ux_core::ids::PrincipalId;
use ux_core::ports::BackendPort;

/// A live connection to the backend, keyed to the principal it was built
/// for and to the guard generation that built it.
///
/// Owned exclusively by the actor init guard; no other component may
/// construct or hold one independently. A handle from a stale generation
/// must never satisfy a query keyed to a newer one.
pub struct ActorHandle {
    backend: Arc<dyn BackendPort>,
    principal: Option<PrincipalId>,
    generation: u64,
}

impl ActorHandle {
    pub(crate) fn new(
        backend: Arc<dyn BackendPort>,
        principal: Option<PrincipalId>,
        generation: u64,
    ) -> Self {
        Self {
            backend,
            principal,
            generation,
        }
    }

    pub fn backend(&self) -> &Arc<dyn BackendPort> {
        &self.backend
    }

    /// Principal this handle authenticates as; `None` for anonymous.
    pub fn principal(&self) -> Option<&PrincipalId> {
        self.principal.as_ref()
    }

    pub fn is_authenticated(&self) -> bool {
        self.principal.is_some()
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }
}

impl std::fmt::Debug for ActorHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ActorHandle")
            .field("principal", &self.principal)
            .field("generation", &self.generation)
            .finish()
    }
}
