//! Management protocol layer: attribute catalogs, entity resolution, query
//! construction, and response interpretation.

pub mod catalog;
pub mod entity;
pub mod query;
pub mod response;

pub use catalog::Attribute;
pub use entity::EntityType;
pub use query::{AttributeSelection, QueryRequest};
pub use response::{QueryError, QueryResult, RawResponse};
