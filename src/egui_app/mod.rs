//! Egui-based interactive viewer for the injector catalog (feature = "egui").
//!
//! The viewer is a thin shell around [`crate::view::CatalogView`]: it feeds
//! search input and clicks in and draws the renderer's card views.

#![cfg(feature = "egui")]

mod state;
mod text;
mod ui;

use anyhow::Result;
use camino::Utf8PathBuf;
use eframe::egui;

use crate::view::TermStores;

pub use state::{CardAction, InjectorApp, receive_load};
pub use text::{highlight_query_job, match_ranges};

/// Open a window browsing `data_file`. Blocks until the window is closed.
pub fn run_viewer(data_file: Utf8PathBuf, stores: TermStores) -> Result<()> {
    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default().with_inner_size([960.0, 720.0]),
        ..Default::default()
    };
    eframe::run_native(
        "Injector catalog",
        options,
        Box::new(move |_cc| Ok(Box::new(InjectorApp::new(data_file, stores)))),
    )
    .map_err(|e| anyhow::anyhow!("{e}"))?;
    Ok(())
}
