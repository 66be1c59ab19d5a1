//! Catalog filter/sort engine and the debounced search front door.

pub mod debounce;
pub mod filter;
pub mod sort;

pub use debounce::Debouncer;
pub use filter::{view, Audience, CatalogQuery, PRICE_OPEN_ENDED};
pub use sort::{BackOfficeSort, SortOrder};
