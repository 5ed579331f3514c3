//! Card rendering and interaction, independent of any GUI toolkit.
//!
//! - [`card`] – card content, per-card state and the pure [`CardView`]
//! - [`renderer`] – the owned card set, replaced wholesale on every render
//! - [`units`] – CC/min ↔ LB/hour conversion
//! - [`notice`] – transient notices
//! - [`clipboard`] – clipboard sink
//! - [`search`] – input debouncing and search-term persistence
//! - [`controller`] – [`CatalogView`], wiring the above together

pub mod card;
pub mod clipboard;
pub mod controller;
pub mod notice;
pub mod renderer;
pub mod search;
pub mod units;

pub use card::{Card, CardState, CardView, CellRef, CellRow, OffsetTable, TabView, build_cards};
pub use clipboard::{ClipboardSink, NoClipboard};
#[cfg(feature = "egui")]
pub use clipboard::SystemClipboard;
pub use controller::CatalogView;
pub use notice::{Notice, NoticeBoard};
pub use renderer::{CardId, Renderer};
pub use search::{Debouncer, FileTermStore, MemoryTermStore, TermStore, TermStores};
pub use units::{CapacityUnit, to_cc, to_lb};
