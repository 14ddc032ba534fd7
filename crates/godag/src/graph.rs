//! Predecessor -> successors adjacency extraction.
//!
//! Inverts "term has parent" into "parent has children", keyed either by GO
//! identifier or by display name, and classifies parentless terms as roots or
//! obsoletes. The two classes can be injected into the mapping under
//! caller-chosen sentinel keys.

use crate::dag::TermSource;
use crate::models::GoTerm;
use serde::Serialize;
use std::collections::{BTreeMap, BTreeSet};
use tracing::{debug, info};

/// Key space of the adjacency mapping, fixed for a whole run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum KeyMode {
    /// GO identifiers ("GO:0008150")
    Id,
    /// Display names ("biological_process"); distinct terms may share one
    #[default]
    Name,
}

impl KeyMode {
    pub fn key<'t>(&self, term: &'t GoTerm) -> &'t str {
        match self {
            KeyMode::Id => &term.go_id,
            KeyMode::Name => &term.name,
        }
    }

    /// Suffix of the summary line
    pub fn describe(&self) -> &'static str {
        match self {
            KeyMode::Id => "using ids",
            KeyMode::Name => "using names",
        }
    }
}

/// Reserved keys carrying the root and obsolete sets.
///
/// When both keys are equal only the root set survives under that key.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Sentinels {
    pub roots_key: Option<String>,
    pub obsoletes_key: Option<String>,
    pub inject: bool,
}

impl Sentinels {
    pub const DEFAULT_ROOTS_KEY: &'static str = "roots";
    pub const DEFAULT_OBSOLETES_KEY: &'static str = "obsoletes";

    /// No injection
    pub fn disabled() -> Self {
        Self::default()
    }

    pub fn new(roots_key: Option<String>, obsoletes_key: Option<String>) -> Self {
        Sentinels {
            roots_key,
            obsoletes_key,
            inject: true,
        }
    }

    /// One key for both sets; the root set wins
    pub fn shared(key: impl Into<String>) -> Self {
        let key = key.into();
        Self::new(Some(key.clone()), Some(key))
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GraphOptions {
    pub key_mode: KeyMode,
    pub sentinels: Sentinels,
}

/// Predecessor key -> successor keys
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Graph {
    edges: BTreeMap<String, BTreeSet<String>>,
}

impl Graph {
    pub fn new() -> Self {
        Self::default()
    }

    /// Successor set of `key`, created empty on first access
    pub fn successors_mut(&mut self, key: &str) -> &mut BTreeSet<String> {
        self.edges.entry(key.to_string()).or_default()
    }

    pub fn add_edge(&mut self, predecessor: &str, successor: &str) {
        self.successors_mut(predecessor).insert(successor.to_string());
    }

    pub fn successors(&self, key: &str) -> Option<&BTreeSet<String>> {
        self.edges.get(key)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.edges.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.edges.len()
    }

    pub fn is_empty(&self) -> bool {
        self.edges.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &BTreeSet<String>)> {
        self.edges.iter()
    }

    pub fn as_map(&self) -> &BTreeMap<String, BTreeSet<String>> {
        &self.edges
    }

    /// Overwrite `key` with `members`
    fn set(&mut self, key: &str, members: &BTreeSet<String>) {
        self.edges.insert(key.to_string(), members.clone());
    }
}

/// Report-only counts, computed before sentinel injection
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct GraphStats {
    /// Keys with at least one successor
    pub predecessors: usize,
    /// Term entries visited
    pub terms_iterated: usize,
    /// Keys seen as predecessor or successor
    pub distinct_keys: usize,
    pub roots: usize,
    pub obsoletes: usize,
}

/// Build the adjacency mapping of `source`.
pub fn build_graph<S>(source: &S, options: &GraphOptions) -> (Graph, GraphStats)
where
    S: TermSource + ?Sized,
{
    let key_mode = options.key_mode;
    let mut graph = Graph::new();
    let mut roots = BTreeSet::new();
    let mut obsoletes = BTreeSet::new();
    let mut terms_iterated = 0usize;

    for (_, term) in source.entries() {
        terms_iterated += 1;
        let key = key_mode.key(term);

        let mut has_parent = false;
        for parent in source.parents(term) {
            graph.add_edge(key_mode.key(parent), key);
            has_parent = true;
        }

        if !has_parent {
            if term.is_obsolete {
                obsoletes.insert(key.to_string());
            } else {
                roots.insert(key.to_string());
            }
        }
    }

    let distinct_keys = graph
        .iter()
        .flat_map(|(pred, succs)| std::iter::once(pred).chain(succs))
        .collect::<BTreeSet<_>>()
        .len();

    let stats = GraphStats {
        predecessors: graph.len(),
        terms_iterated,
        distinct_keys,
        roots: roots.len(),
        obsoletes: obsoletes.len(),
    };

    let sentinels = &options.sentinels;
    if sentinels.inject {
        // Obsoletes first so that roots win a shared key
        if let Some(key) = &sentinels.obsoletes_key {
            graph.set(key, &obsoletes);
        }
        if let Some(key) = &sentinels.roots_key {
            graph.set(key, &roots);
        }
        debug!(
            roots_key = sentinels.roots_key.as_deref(),
            obsoletes_key = sentinels.obsoletes_key.as_deref(),
            "Injected sentinel keys"
        );
    }

    info!(
        predecessors = stats.predecessors,
        terms = stats.terms_iterated,
        distinct_keys = stats.distinct_keys,
        roots = stats.roots,
        obsoletes = stats.obsoletes,
        mode = key_mode.describe(),
        "Built adjacency graph"
    );

    (graph, stats)
}
