use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Rail pressure (PSI) assumed for injectors that do not state one.
pub const DEFAULT_PRESSURE: f64 = 43.5;

/// Voltage label → latency mapping, in dataset order.
pub type Offsets = IndexMap<String, f64>;

// ────────────────────────────────────────────────────────────────────────────
// Injector
// ────────────────────────────────────────────────────────────────────────────

/// A single injector with its calibration offsets.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Injector {
    /// Flow capacity in CC/min.
    pub cc: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ohm: Option<f64>,
    /// Rail pressure the offsets were measured at (PSI).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pressure: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub offsets: Offsets,
}

impl Injector {
    pub fn effective_pressure(&self) -> f64 {
        self.pressure.unwrap_or(DEFAULT_PRESSURE)
    }

    /// Offsets ordered for display: descending by latency, ties keep dataset order.
    pub fn sorted_offsets(&self) -> Vec<(&str, f64)> {
        let mut out: Vec<(&str, f64)> = self
            .offsets
            .iter()
            .map(|(voltage, latency)| (voltage.as_str(), *latency))
            .collect();
        out.sort_by(|a, b| b.1.total_cmp(&a.1));
        out
    }

    /// Same capacity and impedance. Pressure is not considered.
    pub fn is_duplicate_of(&self, other: &Injector) -> bool {
        self.cc == other.cc && self.ohm == other.ohm
    }

    /// Case-insensitive match of an already lowercased sub-term against the
    /// description, capacity and impedance.
    pub fn matches_term(&self, term: &str) -> bool {
        self.description
            .as_ref()
            .is_some_and(|d| d.to_lowercase().contains(term))
            || format_number(self.cc).contains(term)
            || self.ohm.is_some_and(|ohm| format_number(ohm).contains(term))
    }
}

/// Flag every injector that shares `cc` and `ohm` with another sibling.
pub fn duplicate_flags(siblings: &[&Injector]) -> Vec<bool> {
    siblings
        .iter()
        .enumerate()
        .map(|(i, a)| {
            siblings
                .iter()
                .enumerate()
                .any(|(j, b)| i != j && a.is_duplicate_of(b))
        })
        .collect()
}

// ────────────────────────────────────────────────────────────────────────────
// Group / Node
// ────────────────────────────────────────────────────────────────────────────

/// Which schema revision a group was decoded from.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum GroupOrigin {
    /// `{ description, injectors: [...] }`
    #[default]
    Injectors,
    /// Legacy `{ description, variants: [...] }`; always one card per member.
    Variants,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Group {
    pub description: String,
    pub injectors: Vec<Injector>,
    #[serde(skip)]
    pub origin: GroupOrigin,
}

impl Group {
    /// A group collapses into one card with pressure tabs when every member
    /// states its pressure.
    pub fn has_pressure_tabs(&self) -> bool {
        self.origin == GroupOrigin::Injectors
            && !self.injectors.is_empty()
            && self.injectors.iter().all(|i| i.pressure.is_some())
    }

    /// Index of the member measured at [`DEFAULT_PRESSURE`], or 0.
    pub fn default_tab(&self) -> usize {
        default_tab(&self.injectors)
    }

    pub fn min_cc(&self) -> f64 {
        self.injectors
            .iter()
            .map(|i| i.cc)
            .min_by(f64::total_cmp)
            .unwrap_or(0.0)
    }
}

pub(crate) fn default_tab(members: &[Injector]) -> usize {
    members
        .iter()
        .position(|i| i.effective_pressure() == DEFAULT_PRESSURE)
        .unwrap_or(0)
}

/// A top-level entry of a brand.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Node {
    Single(Injector),
    Group(Group),
}

impl Node {
    /// Key used to order nodes within a brand.
    pub fn sort_cc(&self) -> f64 {
        match self {
            Node::Single(i) => i.cc,
            Node::Group(g) => g.min_cc(),
        }
    }

    /// Number of injectors this node contributes to the total count.
    pub fn injector_count(&self) -> usize {
        match self {
            Node::Single(_) => 1,
            Node::Group(g) => g.injectors.len(),
        }
    }

    pub fn description(&self) -> Option<&str> {
        match self {
            Node::Single(i) => i.description.as_deref(),
            Node::Group(g) => Some(g.description.as_str()),
        }
    }

    /// `brand_lower` and `term` must already be lowercased.
    pub fn matches_term(&self, brand_lower: &str, term: &str) -> bool {
        if brand_lower.contains(term) {
            return true;
        }
        match self {
            Node::Single(i) => i.matches_term(term),
            Node::Group(g) => {
                g.description.to_lowercase().contains(term)
                    || g.injectors.iter().any(|i| i.matches_term(term))
            }
        }
    }
}

/// Shortest decimal form of a number, without a trailing `.0` for integers.
pub fn format_number(value: f64) -> String {
    if value.fract() == 0.0 && value.abs() < 1e15 {
        format!("{}", value as i64)
    } else {
        format!("{}", value)
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Dataset decoding
// ────────────────────────────────────────────────────────────────────────────

/// Number or numeric string as found in hand-edited datasets.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
enum NumberOrText {
    Number(f64),
    Text(String),
}

impl NumberOrText {
    fn label(&self) -> String {
        match self {
            NumberOrText::Number(n) => format_number(*n),
            NumberOrText::Text(s) => s.clone(),
        }
    }

    fn value(&self) -> Result<f64, String> {
        match self {
            NumberOrText::Number(n) => Ok(*n),
            NumberOrText::Text(s) => s
                .trim()
                .parse()
                .map_err(|_| format!("latency `{}` is not a number", s)),
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub(crate) enum RawNode {
    Group(RawGroup),
    Injector(RawInjector),
}

#[derive(Debug, Deserialize)]
pub(crate) struct RawGroup {
    #[serde(default)]
    description: Option<String>,
    injectors: Vec<RawInjector>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct RawInjector {
    #[serde(default)]
    cc: Option<f64>,
    #[serde(default)]
    ohm: Option<f64>,
    #[serde(default)]
    pressure: Option<f64>,
    #[serde(default)]
    description: Option<String>,
    #[serde(default)]
    offsets: Option<IndexMap<String, NumberOrText>>,
    #[serde(default)]
    voltage: Option<Vec<NumberOrText>>,
    #[serde(default)]
    latency: Option<Vec<NumberOrText>>,
    #[serde(default)]
    variants: Option<Vec<RawInjector>>,
}

impl RawNode {
    pub(crate) fn into_node(self) -> Result<Node, String> {
        match self {
            RawNode::Group(g) => {
                let injectors = g
                    .injectors
                    .into_iter()
                    .map(|raw| raw.into_injector(None))
                    .collect::<Result<Vec<_>, _>>()?;
                Ok(Node::Group(Group {
                    description: g.description.unwrap_or_default(),
                    injectors,
                    origin: GroupOrigin::Injectors,
                }))
            }
            RawNode::Injector(mut raw) => match raw.variants.take() {
                Some(variants) => {
                    let parent = raw.description.clone();
                    let injectors = variants
                        .into_iter()
                        .map(|v| v.into_injector(parent.as_deref()))
                        .collect::<Result<Vec<_>, _>>()?;
                    Ok(Node::Group(Group {
                        description: parent.unwrap_or_default(),
                        injectors,
                        origin: GroupOrigin::Variants,
                    }))
                }
                None => Ok(Node::Single(raw.into_injector(None)?)),
            },
        }
    }
}

impl RawInjector {
    fn into_injector(self, inherited_description: Option<&str>) -> Result<Injector, String> {
        let cc = self.cc.ok_or_else(|| "injector without `cc`".to_string())?;
        let offsets = match (self.offsets, self.voltage, self.latency) {
            (Some(map), _, _) => map
                .into_iter()
                .map(|(voltage, latency)| Ok((voltage, latency.value()?)))
                .collect::<Result<Offsets, String>>()?,
            (None, Some(voltage), Some(latency)) => {
                if voltage.len() != latency.len() {
                    return Err(format!(
                        "injector {} has {} voltages but {} latencies",
                        format_number(cc),
                        voltage.len(),
                        latency.len()
                    ));
                }
                voltage
                    .iter()
                    .zip(latency.iter())
                    .map(|(v, l)| Ok((v.label(), l.value()?)))
                    .collect::<Result<Offsets, String>>()?
            }
            _ => Offsets::new(),
        };
        if offsets.is_empty() {
            log::warn!("injector {} has no offsets", format_number(cc));
        }
        Ok(Injector {
            cc,
            ohm: self.ohm,
            pressure: self.pressure,
            description: inherited_description
                .map(str::to_string)
                .or(self.description),
            offsets,
        })
    }
}
