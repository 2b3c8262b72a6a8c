//! Marketplace item use cases

pub mod catalog;
pub mod publish;

pub use catalog::ItemCatalog;
pub use publish::ItemPublisher;
