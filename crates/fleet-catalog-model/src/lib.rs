#![forbid(unsafe_code)]
//! Fleet catalog model SSOT.
//!
//! ```compile_fail
//! use fleet_catalog_model::Category;
//!
//! fn exhaustive_match(c: Category) -> &'static str {
//!     match c {
//!         Category::Vehicle => "v",
//!     }
//! }
//! ```

mod detail;
mod filter;
mod gallery;
mod item;
mod naming;

pub use detail::{datasheet_rows, detail_rows, show_capacity, show_equipment, DetailRow};
pub use filter::{facets, CatalogFilter, Facets};
pub use gallery::Gallery;
pub use item::{
    check_unique_ids, Category, Fuel, Item, ItemId, SatelliteTracking, ValidationError,
};
pub use naming::{datasheet_file_name, sanitize_file_segment};

pub const CRATE_NAME: &str = "fleet-catalog-model";
