//! ID type wrappers for type safety.

pub mod item_id;
pub mod principal_id;

pub use item_id::ItemId;
pub use principal_id::PrincipalId;
