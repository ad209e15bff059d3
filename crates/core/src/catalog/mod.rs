//! Catalog module - tradable-symbol snapshot and refresh.

mod catalog_model;
mod catalog_service;

pub use catalog_model::Asset;
pub use catalog_service::SymbolCatalog;
