//! Pure domain logic for the recipe service.
//!
//! Nothing in this crate performs I/O: the normalizers, URL validation,
//! payload coercion and pagination math are shared by the repository,
//! pipeline and HTTP layers.

pub mod error;
pub mod normalize;
pub mod pagination;
pub mod payload;
pub mod recipe_type;
pub mod recipe_url;
pub mod types;
