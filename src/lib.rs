//! Fuel-injector catalog browser.
//!
//! This crate loads a brand → injector dataset into a [`catalog::Catalog`],
//! filters it by search term and renders it as interactive cards through
//! [`view::CatalogView`].
//!
//! The binary `injector-catalog` prints filtered cards as text, JSON or HTML.

pub mod catalog;
pub mod error;
pub mod html;
pub mod model;
pub mod source;
pub mod view;

// Optional GUI/egui functionality lives behind the `egui` feature flag.
#[cfg(feature = "egui")]
pub mod egui_app;

pub use catalog::{Catalog, CatalogState};
pub use error::{ClipboardError, LoadError, ViewError};
