pub mod catalog;
pub mod countries;
pub mod grapes;
pub mod producers;
pub mod regions;
pub mod resolver;
pub mod wine_types;
pub mod wines;

pub use catalog::{CatalogError, CatalogResource};
pub use resolver::{resolve, resolve_id, Flow, KeyStore, Resolution};
