//! Business logic use cases
//!
//! Each use case wraps one user-visible operation over the current actor
//! handle: client-side validation first, then the backend call, then the
//! cache invalidations that keep the gate's snapshots honest.

pub mod items;
pub mod onboarding;
pub mod profile;
pub mod roles;

pub use items::{ItemCatalog, ItemPublisher};
pub use onboarding::SubmitOnboarding;
pub use profile::{CreateProfile, SaveProfile};
pub use roles::RoleQueries;
