#![cfg(feature = "egui")]

use std::sync::mpsc::{self, Receiver};
use std::thread;
use std::time::Instant;

use camino::Utf8PathBuf;
use eframe::egui;

use crate::catalog::Catalog;
use crate::error::LoadError;
use crate::source::{DataSource, FsSource};
use crate::view::{CardId, CatalogView, CellRef, SystemClipboard, TermStores};

/// Interaction collected while drawing a card, applied after the frame's
/// card loop so the renderer is never borrowed twice.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CardAction {
    ToggleExpanded(CardId),
    ToggleUnit(CardId),
    SelectTab(CardId, usize),
    Copy(CardId, CellRef),
}

/// Interactive egui application browsing an injector catalog.
pub struct InjectorApp {
    pub view: CatalogView,
    /// Contents of the search field (may be ahead of the committed term).
    pub search_input: String,
    pub last_updated: Option<String>,
    pub data_file: Utf8PathBuf,
    load_rx: Option<Receiver<Result<Catalog, LoadError>>>,
    updated_rx: Option<Receiver<String>>,
}

impl InjectorApp {
    /// Create the app and start loading `data_file` in the background.
    pub fn new(data_file: Utf8PathBuf, stores: TermStores) -> Self {
        let view = CatalogView::new(Box::new(SystemClipboard::new()), stores);
        let search_input = view.term().to_string();
        let (load_rx, updated_rx) = spawn_loader(data_file.clone());
        Self {
            view,
            search_input,
            last_updated: None,
            data_file,
            load_rx: Some(load_rx),
            updated_rx: Some(updated_rx),
        }
    }

    /// Pick up finished background work without blocking.
    pub fn poll_background(&mut self, now: Instant) {
        if let Some(rx) = &self.load_rx {
            if let Some(result) = receive_load(rx) {
                self.view.finish_load(result, now);
                self.load_rx = None;
            }
        }
        if let Some(rx) = &self.updated_rx {
            match rx.try_recv() {
                Ok(date) => {
                    self.last_updated = Some(date);
                    self.updated_rx = None;
                }
                Err(mpsc::TryRecvError::Disconnected) => self.updated_rx = None,
                Err(mpsc::TryRecvError::Empty) => {}
            }
        }
    }

    pub fn is_loading(&self) -> bool {
        self.load_rx.is_some()
    }

    pub fn apply(&mut self, action: CardAction, now: Instant) {
        let result = match action {
            CardAction::ToggleExpanded(id) => self.view.toggle_expanded(id).map(|_| ()),
            CardAction::ToggleUnit(id) => self.view.toggle_unit(id).map(|_| ()),
            CardAction::SelectTab(id, tab) => self.view.select_tab(id, tab),
            CardAction::Copy(id, cell) => self.view.copy_cell(id, cell, now),
        };
        if let Err(e) = result {
            log::debug!("Ignoring card action {:?}: {}", action, e);
        }
    }
}

/// Non-blocking check for the loader's outcome. A loader that hung up without
/// sending counts as a failed load.
pub fn receive_load(
    rx: &Receiver<Result<Catalog, LoadError>>,
) -> Option<Result<Catalog, LoadError>> {
    match rx.try_recv() {
        Ok(result) => Some(result),
        Err(mpsc::TryRecvError::Empty) => None,
        Err(mpsc::TryRecvError::Disconnected) => Some(Err(LoadError::Network(
            "loader thread exited without a result".to_string(),
        ))),
    }
}

/// Load the dataset and its last-updated date on a worker thread.
fn spawn_loader(
    data_file: Utf8PathBuf,
) -> (Receiver<Result<Catalog, LoadError>>, Receiver<String>) {
    let (load_tx, load_rx) = mpsc::channel();
    let (updated_tx, updated_rx) = mpsc::channel();
    thread::spawn(move || {
        let mut source = FsSource::new(&data_file);
        let _ = load_tx.send(Catalog::load(&mut source));
        match source.last_updated() {
            Ok(date) => {
                let _ = updated_tx.send(date);
            }
            Err(e) => log::warn!("Last-updated lookup failed: {:#}", e),
        }
    });
    (load_rx, updated_rx)
}

impl eframe::App for InjectorApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        super::ui::update(self, ctx);
    }
}
