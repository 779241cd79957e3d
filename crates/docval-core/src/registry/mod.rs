//! Check and preset registries
//!
//! A [`Catalog`] holds both registries. It is built once at startup from
//! ordered [`CheckSource`]s and combination presets, and is read-only
//! afterwards.

mod store;
mod types;

pub use store::{Catalog, CatalogBuilder};
pub use types::{CheckSource, Registration};
