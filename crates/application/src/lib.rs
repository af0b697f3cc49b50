//! Application services and ports.

#![forbid(unsafe_code)]

mod catalog_ports;
mod catalog_service;

pub use catalog_ports::{CatalogPage, CatalogRecord, CatalogRepository};
pub use catalog_service::CatalogService;
