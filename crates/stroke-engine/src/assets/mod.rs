pub mod catalog;
pub mod error;

pub use catalog::CharacterCatalog;
pub use error::CatalogError;
