//! Cards: what is displayed for one injector (or one pressure-tab group),
//! its interactive state, and the pure view built from both.

use std::fmt;

use serde::Serialize;

use crate::catalog::Catalog;
use crate::model::{Injector, Node, default_tab, duplicate_flags, format_number};

use super::units::CapacityUnit;

/// Static content of one card.
#[derive(Debug, Clone, PartialEq)]
pub struct Card {
    pub brand: String,
    pub description: Option<String>,
    /// One member for plain cards; one per pressure tab otherwise.
    pub members: Vec<Injector>,
    /// Parallel to `members`.
    pub duplicates: Vec<bool>,
    pub tabbed: bool,
}

impl Card {
    fn single(brand: &str, injector: &Injector, fallback: Option<&str>, duplicate: bool) -> Self {
        Card {
            brand: brand.to_string(),
            description: injector
                .description
                .clone()
                .or_else(|| fallback.map(str::to_string))
                .filter(|d| !d.is_empty()),
            members: vec![injector.clone()],
            duplicates: vec![duplicate],
            tabbed: false,
        }
    }

    pub fn member(&self, tab: usize) -> Option<&Injector> {
        self.members.get(tab)
    }
}

/// Build the cards for a catalog in display order.
///
/// Groups with pressure tabs become one card; any other group becomes one
/// card per member. Duplicates are detected among a group's members, and
/// among the brand's ungrouped injectors.
pub fn build_cards(catalog: &Catalog) -> Vec<Card> {
    let mut cards = Vec::new();
    for (brand, nodes) in catalog.display_order() {
        let singles: Vec<&Injector> = nodes
            .iter()
            .filter_map(|n| match n {
                Node::Single(i) => Some(i),
                Node::Group(_) => None,
            })
            .collect();
        let single_dups = duplicate_flags(&singles);
        let mut next_single = 0;

        for node in nodes {
            match node {
                Node::Single(injector) => {
                    let dup = single_dups.get(next_single).copied().unwrap_or(false);
                    next_single += 1;
                    cards.push(Card::single(brand, injector, None, dup));
                }
                Node::Group(group) if group.has_pressure_tabs() => {
                    let members: Vec<&Injector> = group.injectors.iter().collect();
                    cards.push(Card {
                        brand: brand.to_string(),
                        description: Some(group.description.clone()).filter(|d| !d.is_empty()),
                        duplicates: duplicate_flags(&members),
                        members: group.injectors.clone(),
                        tabbed: true,
                    });
                }
                Node::Group(group) => {
                    let mut members: Vec<&Injector> = group.injectors.iter().collect();
                    members.sort_by(|a, b| a.cc.total_cmp(&b.cc));
                    let dups = duplicate_flags(&members);
                    for (injector, dup) in members.into_iter().zip(dups) {
                        cards.push(Card::single(
                            brand,
                            injector,
                            Some(group.description.as_str()),
                            dup,
                        ));
                    }
                }
            }
        }
    }
    cards
}

/// Mutable per-card state, owned by the renderer.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CardState {
    pub expanded: bool,
    pub active_tab: usize,
    pub unit: CapacityUnit,
    /// Capacity as currently displayed, in `unit`.
    pub capacity: f64,
}

impl CardState {
    /// Collapsed, on the default-pressure tab, in the source unit.
    pub fn initial(card: &Card) -> Self {
        let active_tab = if card.tabbed {
            default_tab(&card.members)
        } else {
            0
        };
        CardState {
            expanded: false,
            active_tab,
            unit: CapacityUnit::Cc,
            capacity: card.member(active_tab).map(|i| i.cc).unwrap_or(0.0),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TabView {
    pub label: String,
    pub active: bool,
}

/// Offsets of the active member, columns ordered by descending latency.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OffsetTable {
    pub voltages: Vec<String>,
    pub latencies: Vec<String>,
}

impl OffsetTable {
    pub fn from_injector(injector: &Injector) -> Self {
        let (voltages, latencies): (Vec<String>, Vec<String>) = injector
            .sorted_offsets()
            .into_iter()
            .map(|(v, l)| (v.to_string(), format_number(l)))
            .unzip();
        OffsetTable {
            voltages,
            latencies,
        }
    }

    pub fn len(&self) -> usize {
        self.voltages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.voltages.is_empty()
    }

    pub fn cell(&self, cell: CellRef) -> Option<&str> {
        let row = match cell.row {
            CellRow::Voltage => &self.voltages,
            CellRow::Latency => &self.latencies,
        };
        row.get(cell.column).map(String::as_str)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CellRow {
    Voltage,
    Latency,
}

/// A cell of the offsets table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CellRef {
    pub row: CellRow,
    pub column: usize,
}

impl CellRef {
    pub fn voltage(column: usize) -> Self {
        CellRef {
            row: CellRow::Voltage,
            column,
        }
    }

    pub fn latency(column: usize) -> Self {
        CellRef {
            row: CellRow::Latency,
            column,
        }
    }
}

/// Everything a front end needs to draw one card.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CardView {
    pub title: String,
    pub description: Option<String>,
    /// e.g. `"550 CC"` or `"52.71 LB"`.
    pub capacity: String,
    pub impedance: Option<String>,
    pub pressure: Option<String>,
    pub duplicate: bool,
    pub tabs: Vec<TabView>,
    pub expanded: bool,
    /// Present only while expanded.
    pub table: Option<OffsetTable>,
}

impl CardView {
    pub fn build(card: &Card, state: &CardState) -> Self {
        let member = card.member(state.active_tab);
        let tabs = if card.tabbed {
            card.members
                .iter()
                .enumerate()
                .map(|(i, m)| TabView {
                    label: format!("{} PSI", format_number(m.effective_pressure())),
                    active: i == state.active_tab,
                })
                .collect()
        } else {
            Vec::new()
        };
        CardView {
            title: card.brand.clone(),
            description: card.description.clone(),
            capacity: format!("{} {}", format_number(state.capacity), state.unit.label()),
            impedance: member
                .and_then(|m| m.ohm)
                .map(|ohm| format!("{} Ohm", format_number(ohm))),
            pressure: member
                .filter(|_| !card.tabbed)
                .and_then(|m| m.pressure)
                .map(|p| format!("{} PSI", format_number(p))),
            duplicate: card
                .duplicates
                .get(state.active_tab)
                .copied()
                .unwrap_or(false),
            tabs,
            expanded: state.expanded,
            table: member
                .filter(|_| state.expanded)
                .map(OffsetTable::from_injector),
        }
    }
}

impl fmt::Display for CardView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.title, self.capacity)?;
        if let Some(ohm) = &self.impedance {
            write!(f, ", {}", ohm)?;
        }
        if let Some(p) = &self.pressure {
            write!(f, " @ {}", p)?;
        }
        if self.duplicate {
            write!(f, " [duplicate]")?;
        }
        writeln!(f)?;
        if let Some(d) = &self.description {
            writeln!(f, "  {}", d)?;
        }
        if !self.tabs.is_empty() {
            let tabs: Vec<String> = self
                .tabs
                .iter()
                .map(|t| {
                    if t.active {
                        format!("[{}]", t.label)
                    } else {
                        t.label.clone()
                    }
                })
                .collect();
            writeln!(f, "  {}", tabs.join(" "))?;
        }
        if let Some(table) = &self.table {
            let cells: Vec<String> = table
                .voltages
                .iter()
                .zip(&table.latencies)
                .map(|(v, l)| format!("{}V={}", v, l))
                .collect();
            writeln!(f, "  {}", cells.join("  "))?;
        }
        Ok(())
    }
}
