//! # inua-catalog
//!
//! The technique catalog: JSON loading with fail-safe normalization of
//! pregnancy rules, an immutable in-memory table with atomic hot-swap,
//! and the context normalizer that turns records into per-profile
//! candidates.

#![deny(unsafe_code)]

pub mod loader;
pub mod normalize;
pub mod table;

pub use loader::{load_catalog, load_catalog_from_str};
pub use normalize::{build_candidates, normalize};
pub use table::{Catalog, CatalogHandle, MetaInfo};
