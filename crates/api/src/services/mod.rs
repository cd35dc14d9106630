//! Business services.
//!
//! # Services
//!
//! - `entity` - Save, find and delete one entity type through its repository
//! - `query` - Criteria-based listing and counting
//!
//! Both are generic over [`Entity`](crate::models::Entity) and receive their
//! repository at construction, so handlers and tests can swap the backend.

pub mod entity;
pub mod query;

pub use entity::EntityService;
pub use query::QueryService;
