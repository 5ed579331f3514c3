//! Card set ownership: every [`Renderer::render`] tears down the previous set
//! and builds a new one.

use std::fmt;

use crate::catalog::Catalog;
use crate::error::ViewError;

use super::card::{Card, CardState, CardView, CellRef, OffsetTable, build_cards};
use super::units::{CapacityUnit, convert};

/// Cleanup attached to a rendered card, run when the card is torn down.
pub type Teardown = Box<dyn FnOnce()>;

/// Identifies a card within one render. Ids from earlier renders are rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CardId {
    generation: u64,
    index: usize,
}

impl CardId {
    pub fn index(self) -> usize {
        self.index
    }
}

impl fmt::Display for CardId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}.{}", self.generation, self.index)
    }
}

struct CardHandle {
    card: Card,
    state: CardState,
    teardown: Vec<Teardown>,
}

impl CardHandle {
    fn release(&mut self) {
        for f in self.teardown.drain(..) {
            f();
        }
    }
}

/// Owns the currently displayed cards and their state.
#[derive(Default)]
pub struct Renderer {
    generation: u64,
    cards: Vec<CardHandle>,
    total: usize,
}

impl Renderer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the whole card set with cards for `catalog`.
    pub fn render(&mut self, catalog: &Catalog) -> usize {
        self.clear();
        self.generation += 1;
        self.cards = build_cards(catalog)
            .into_iter()
            .map(|card| CardHandle {
                state: CardState::initial(&card),
                card,
                teardown: Vec::new(),
            })
            .collect();
        self.total = catalog.total_injectors();
        log::debug!(
            "Render #{}: {} cards, {} injectors",
            self.generation,
            self.cards.len(),
            self.total
        );
        self.cards.len()
    }

    /// Tear down every card, running attached cleanups.
    pub fn clear(&mut self) {
        for handle in &mut self.cards {
            handle.release();
        }
        self.cards.clear();
        self.total = 0;
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn card_ids(&self) -> impl Iterator<Item = CardId> + '_ {
        (0..self.cards.len()).map(|index| CardId {
            generation: self.generation,
            index,
        })
    }

    pub fn total_injectors(&self) -> usize {
        self.total
    }

    pub fn summary(&self) -> String {
        format!("{} injectors in total.", self.total)
    }

    fn handle(&self, id: CardId) -> Result<&CardHandle, ViewError> {
        if id.generation != self.generation {
            return Err(ViewError::StaleCard(id));
        }
        self.cards.get(id.index).ok_or(ViewError::StaleCard(id))
    }

    fn handle_mut(&mut self, id: CardId) -> Result<&mut CardHandle, ViewError> {
        if id.generation != self.generation {
            return Err(ViewError::StaleCard(id));
        }
        self.cards.get_mut(id.index).ok_or(ViewError::StaleCard(id))
    }

    pub fn card(&self, id: CardId) -> Result<&Card, ViewError> {
        Ok(&self.handle(id)?.card)
    }

    pub fn state(&self, id: CardId) -> Result<&CardState, ViewError> {
        Ok(&self.handle(id)?.state)
    }

    pub fn view(&self, id: CardId) -> Result<CardView, ViewError> {
        let handle = self.handle(id)?;
        Ok(CardView::build(&handle.card, &handle.state))
    }

    /// Views of every card, in display order.
    pub fn views(&self) -> Vec<(CardId, CardView)> {
        self.card_ids()
            .zip(&self.cards)
            .map(|(id, h)| (id, CardView::build(&h.card, &h.state)))
            .collect()
    }

    /// Attach a cleanup to run when this card is torn down.
    pub fn on_teardown(&mut self, id: CardId, f: impl FnOnce() + 'static) -> Result<(), ViewError> {
        self.handle_mut(id)?.teardown.push(Box::new(f));
        Ok(())
    }

    /// Flip expanded/collapsed; returns the new expanded state.
    pub fn toggle_expanded(&mut self, id: CardId) -> Result<bool, ViewError> {
        let state = &mut self.handle_mut(id)?.state;
        state.expanded = !state.expanded;
        Ok(state.expanded)
    }

    pub fn select_tab(&mut self, id: CardId, index: usize) -> Result<(), ViewError> {
        let handle = self.handle_mut(id)?;
        let member = handle
            .card
            .member(index)
            .filter(|_| handle.card.tabbed)
            .ok_or(ViewError::TabOutOfRange {
                index,
                len: if handle.card.tabbed {
                    handle.card.members.len()
                } else {
                    0
                },
            })?;
        let capacity = handle.state.unit.from_source(member.cc);
        handle.state.active_tab = index;
        handle.state.capacity = capacity;
        Ok(())
    }

    /// Switch the capacity unit of `id`, and of every other visible card with it.
    pub fn toggle_unit(&mut self, id: CardId) -> Result<CapacityUnit, ViewError> {
        let target = self.handle(id)?.state.unit.other();
        for handle in &mut self.cards {
            let state = &mut handle.state;
            if state.unit != target {
                state.capacity = convert(state.capacity, state.unit, target);
                state.unit = target;
            }
        }
        Ok(target)
    }

    /// Text of a cell in the card's offsets table (active tab). The card must be expanded.
    pub fn cell_text(&self, id: CardId, cell: CellRef) -> Result<String, ViewError> {
        let handle = self.handle(id)?;
        if !handle.state.expanded {
            return Err(ViewError::Collapsed(id));
        }
        let table = handle
            .card
            .member(handle.state.active_tab)
            .map(OffsetTable::from_injector)
            .unwrap_or(OffsetTable {
                voltages: Vec::new(),
                latencies: Vec::new(),
            });
        table
            .cell(cell)
            .map(str::to_string)
            .ok_or(ViewError::CellOutOfRange {
                column: cell.column,
                len: table.len(),
            })
    }
}

impl Drop for Renderer {
    fn drop(&mut self) {
        self.clear();
    }
}
