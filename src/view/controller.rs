//! View controller tying catalog, renderer, notices, clipboard and search
//! persistence together. Front ends feed it events and draw
//! [`CatalogView::renderer`].

use std::time::Instant;

use crate::catalog::{Catalog, CatalogState};
use crate::error::{LoadError, ViewError};

use super::card::CellRef;
use super::clipboard::ClipboardSink;
use super::notice::{COPIED, COPY_FAILED, NO_RESULTS, Notice, NoticeBoard};
use super::renderer::{CardId, Renderer};
use super::search::{Debouncer, TermStores};
use super::units::CapacityUnit;

pub struct CatalogView {
    catalog: CatalogState,
    renderer: Renderer,
    notices: NoticeBoard,
    clipboard: Box<dyn ClipboardSink>,
    stores: TermStores,
    debouncer: Debouncer,
    term: String,
}

impl CatalogView {
    /// Start with an empty card set and the persisted search term.
    pub fn new(clipboard: Box<dyn ClipboardSink>, stores: TermStores) -> Self {
        let term = stores.initial_term();
        Self {
            catalog: CatalogState::Pending,
            renderer: Renderer::new(),
            notices: NoticeBoard::default(),
            clipboard,
            stores,
            debouncer: Debouncer::default(),
            term,
        }
    }

    pub fn with_notices(mut self, notices: NoticeBoard) -> Self {
        self.notices = notices;
        self
    }

    pub fn with_debouncer(mut self, debouncer: Debouncer) -> Self {
        self.debouncer = debouncer;
        self
    }

    /// Record the load outcome and render the current term against it.
    pub fn finish_load(&mut self, result: Result<Catalog, LoadError>, now: Instant) {
        if let Err(e) = &result {
            log::error!("{}", e);
            self.notices.show(e.user_message(), now);
        }
        self.catalog = CatalogState::from(result);
        let term = self.term.clone();
        self.render_term(&term, now);
    }

    /// A keystroke in the search field.
    pub fn input(&mut self, term: impl Into<String>, now: Instant) {
        self.debouncer.push(term, now);
    }

    /// Commit the debounced input once it has settled. Returns true on commit.
    pub fn tick(&mut self, now: Instant) -> bool {
        self.notices.prune(now);
        match self.debouncer.poll(now) {
            Some(term) => {
                self.commit(term, now);
                true
            }
            None => false,
        }
    }

    /// Filter, re-render and persist `term`.
    pub fn commit(&mut self, term: impl Into<String>, now: Instant) {
        self.term = term.into();
        let term = self.term.clone();
        self.render_term(&term, now);
        self.persist_term();
    }

    /// Write the current term to every store without re-rendering.
    pub fn persist_term(&mut self) {
        let term = self.term.clone();
        self.stores.persist_term(&term);
    }

    fn render_term(&mut self, term: &str, now: Instant) {
        let subset = self.catalog.filter(term);
        self.renderer.render(&subset);
        if subset.is_empty() && self.catalog.is_loaded() {
            self.notices.show(NO_RESULTS, now);
        }
    }

    pub fn term(&self) -> &str {
        &self.term
    }

    pub fn catalog_state(&self) -> &CatalogState {
        &self.catalog
    }

    pub fn renderer(&self) -> &Renderer {
        &self.renderer
    }

    pub fn renderer_mut(&mut self) -> &mut Renderer {
        &mut self.renderer
    }

    pub fn debouncer(&self) -> &Debouncer {
        &self.debouncer
    }

    pub fn notices(&self) -> &NoticeBoard {
        &self.notices
    }

    pub fn notice(&self, now: Instant) -> Option<&Notice> {
        self.notices.current(now)
    }

    pub fn summary(&self) -> String {
        self.renderer.summary()
    }

    /// Copy a table cell and report the outcome in a notice.
    pub fn copy_cell(&mut self, id: CardId, cell: CellRef, now: Instant) -> Result<(), ViewError> {
        let text = self.renderer.cell_text(id, cell)?;
        match self.clipboard.write(&text) {
            Ok(()) => self.notices.show(COPIED, now),
            Err(e) => {
                log::warn!("Copy failed: {}", e);
                self.notices.show(COPY_FAILED, now);
            }
        }
        Ok(())
    }

    pub fn toggle_expanded(&mut self, id: CardId) -> Result<bool, ViewError> {
        self.renderer.toggle_expanded(id)
    }

    pub fn select_tab(&mut self, id: CardId, index: usize) -> Result<(), ViewError> {
        self.renderer.select_tab(id, index)
    }

    pub fn toggle_unit(&mut self, id: CardId) -> Result<CapacityUnit, ViewError> {
        self.renderer.toggle_unit(id)
    }
}
