// client/src/catalog/mod.rs

pub mod home;
pub mod item_view;

pub use home::{CatalogFilter, HomeViewModel};
pub use item_view::ItemViewModel;
