//! The injector catalog: loading, display ordering and search.
//!
//! A [`Catalog`] is loaded once and never mutated afterwards. Filtering
//! returns a new catalog of the same shape, so the loaded data can be
//! re-filtered on every keystroke without copying it back.

use indexmap::IndexMap;
use serde::Serialize;

use crate::error::LoadError;
use crate::model::{Node, RawNode};
use crate::source::DataSource;

/// Brand name → top-level nodes, in dataset order.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct Catalog {
    brands: IndexMap<String, Vec<Node>>,
}

impl Catalog {
    pub fn new(brands: IndexMap<String, Vec<Node>>) -> Self {
        Self { brands }
    }

    /// Fetch and decode the dataset. No partial catalog is returned on failure.
    pub fn load(source: &mut dyn DataSource) -> Result<Self, LoadError> {
        let bytes = source.read_dataset()?;
        let catalog = Self::from_slice(&bytes)?;
        log::debug!(
            "Loaded {} brands, {} injectors",
            catalog.brands.len(),
            catalog.total_injectors()
        );
        Ok(catalog)
    }

    /// Decode a dataset document: a mapping from brand name to a list of nodes.
    pub fn from_json(text: &str) -> Result<Self, LoadError> {
        Self::from_slice(text.as_bytes())
    }

    /// Decode a dataset document from raw bytes. Invalid UTF-8 is a parse error.
    pub fn from_slice(bytes: &[u8]) -> Result<Self, LoadError> {
        let raw: IndexMap<String, Vec<RawNode>> = serde_json::from_slice(bytes)?;
        let mut brands = IndexMap::with_capacity(raw.len());
        for (brand, nodes) in raw {
            let nodes = nodes
                .into_iter()
                .map(RawNode::into_node)
                .collect::<Result<Vec<_>, _>>()
                .map_err(|e| LoadError::Parse(format!("{}: {}", brand, e)))?;
            brands.insert(brand, nodes);
        }
        Ok(Self { brands })
    }

    pub fn is_empty(&self) -> bool {
        self.brands.is_empty()
    }

    pub fn brand_count(&self) -> usize {
        self.brands.len()
    }

    pub fn brands(&self) -> &IndexMap<String, Vec<Node>> {
        &self.brands
    }

    pub fn get(&self, brand: &str) -> Option<&[Node]> {
        self.brands.get(brand).map(Vec::as_slice)
    }

    /// Injectors counted the way the summary line counts them: every group
    /// member counts, even when the group is shown as a single card.
    pub fn total_injectors(&self) -> usize {
        self.brands
            .values()
            .flat_map(|nodes| nodes.iter())
            .map(Node::injector_count)
            .sum()
    }

    /// Brands sorted by name, each with its nodes sorted by ascending capacity.
    pub fn display_order(&self) -> Vec<(&str, Vec<&Node>)> {
        let mut brands: Vec<(&str, Vec<&Node>)> = self
            .brands
            .iter()
            .map(|(brand, nodes)| {
                let mut nodes: Vec<&Node> = nodes.iter().collect();
                nodes.sort_by(|a, b| a.sort_cc().total_cmp(&b.sort_cc()));
                (brand.as_str(), nodes)
            })
            .collect();
        brands.sort_by(|a, b| a.0.cmp(b.0));
        brands
    }

    /// Keep the nodes matching every space-separated sub-term of `term`.
    ///
    /// An empty term, or one starting with a space, returns the whole catalog.
    /// Brands without a matching node are dropped.
    pub fn filter(&self, term: &str) -> Catalog {
        let term = term.to_lowercase();
        if term.is_empty() || term.starts_with(' ') {
            return self.clone();
        }
        let terms: Vec<&str> = term.split(' ').collect();
        let mut brands = IndexMap::new();
        for (brand, nodes) in &self.brands {
            let brand_lower = brand.to_lowercase();
            let matching: Vec<Node> = nodes
                .iter()
                .filter(|node| terms.iter().all(|t| node.matches_term(&brand_lower, t)))
                .cloned()
                .collect();
            if !matching.is_empty() {
                brands.insert(brand.clone(), matching);
            }
        }
        log::debug!("Filter {:?}: {} brands match", term, brands.len());
        Catalog { brands }
    }
}

/// Load outcome held for the lifetime of the view.
#[derive(Debug, Clone, Default)]
pub enum CatalogState {
    /// Load still in flight; searches see an empty catalog.
    #[default]
    Pending,
    Loaded(Catalog),
    /// Load failed; no retry is attempted.
    Unloaded(LoadError),
}

impl CatalogState {
    pub fn catalog(&self) -> Option<&Catalog> {
        match self {
            CatalogState::Loaded(c) => Some(c),
            _ => None,
        }
    }

    pub fn is_loaded(&self) -> bool {
        matches!(self, CatalogState::Loaded(_))
    }

    /// Filter the loaded catalog, or return an empty one.
    pub fn filter(&self, term: &str) -> Catalog {
        match self {
            CatalogState::Loaded(c) => c.filter(term),
            _ => Catalog::default(),
        }
    }
}

impl From<Result<Catalog, LoadError>> for CatalogState {
    fn from(result: Result<Catalog, LoadError>) -> Self {
        match result {
            Ok(c) => CatalogState::Loaded(c),
            Err(e) => CatalogState::Unloaded(e),
        }
    }
}
