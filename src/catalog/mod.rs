pub mod defaults;
pub mod schema;
pub mod store;

pub use schema::{InterventionCategory, InterventionTemplate, Priority, SchemeDefinition};
pub use store::CatalogStore;
