//! Access resolution domain
//!
//! Everything needed to decide, for a (possibly) authenticated user,
//! whether to show the app, a setup flow, or a terminal error state:
//! the actor init status, query snapshots, the university email predicate,
//! and the pure resolution state machine.

pub mod query;
pub mod resolution;
pub mod status;
pub mod university_email;

pub use query::QuerySnapshot;
pub use resolution::{resolve, ResolutionInput, ResolutionState, RetryScope};
pub use status::ActorInitStatus;
pub use university_email::{
    is_allowlisted_admin_email, is_valid_university_email, university_email_error,
    UNIVERSITY_EMAIL_DOMAIN,
};
