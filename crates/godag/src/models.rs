// Gene Ontology Data Models

use serde::{Deserialize, Serialize};

// ============================================================================
// GO Term
// ============================================================================

/// A `[Term]` stanza of an OBO document.
///
/// Parent links are kept as raw identifiers here; they are resolved to records
/// when the terms are assembled into a [`GoDag`](crate::dag::GoDag).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GoTerm {
    /// GO identifier (e.g., "GO:0008150")
    pub go_id: String,

    /// Display name (e.g., "biological_process"); not unique across terms
    pub name: String,

    /// Namespace, when the stanza declares a known one
    pub namespace: Option<Namespace>,

    /// Whether the term is obsolete
    pub is_obsolete: bool,

    /// Alternative GO IDs that resolve to this term
    pub alt_ids: Vec<String>,

    /// Targets of `is_a` lines
    pub is_a: Vec<String>,

    /// Targets of typed `relationship` lines
    pub relationships: Vec<(RelationshipType, String)>,
}

impl GoTerm {
    pub fn new(go_id: impl Into<String>, name: impl Into<String>) -> Self {
        GoTerm {
            go_id: go_id.into(),
            name: name.into(),
            namespace: None,
            is_obsolete: false,
            alt_ids: Vec::new(),
            is_a: Vec::new(),
            relationships: Vec::new(),
        }
    }

    pub fn with_parent(mut self, parent_id: impl Into<String>) -> Self {
        self.is_a.push(parent_id.into());
        self
    }

    pub fn obsolete(mut self) -> Self {
        self.is_obsolete = true;
        self
    }
}

// ============================================================================
// GO Namespace
// ============================================================================

/// GO Namespace (ontology type)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Namespace {
    BiologicalProcess,
    MolecularFunction,
    CellularComponent,
}

impl Namespace {
    pub fn as_str(&self) -> &'static str {
        match self {
            Namespace::BiologicalProcess => "biological_process",
            Namespace::MolecularFunction => "molecular_function",
            Namespace::CellularComponent => "cellular_component",
        }
    }
}

impl std::str::FromStr for Namespace {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "biological_process" => Ok(Namespace::BiologicalProcess),
            "molecular_function" => Ok(Namespace::MolecularFunction),
            "cellular_component" => Ok(Namespace::CellularComponent),
            _ => Err(format!("Unknown namespace: {}", s)),
        }
    }
}

impl std::fmt::Display for Namespace {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

// ============================================================================
// Relationship Type
// ============================================================================

/// Typed relationships found on `relationship:` lines
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RelationshipType {
    PartOf,
    Regulates,
    PositivelyRegulates,
    NegativelyRegulates,
    HasPart,
    OccursIn,
    EndsDuring,
}

impl RelationshipType {
    pub fn as_str(&self) -> &'static str {
        match self {
            RelationshipType::PartOf => "part_of",
            RelationshipType::Regulates => "regulates",
            RelationshipType::PositivelyRegulates => "positively_regulates",
            RelationshipType::NegativelyRegulates => "negatively_regulates",
            RelationshipType::HasPart => "has_part",
            RelationshipType::OccursIn => "occurs_in",
            RelationshipType::EndsDuring => "ends_during",
        }
    }
}

impl std::str::FromStr for RelationshipType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "part_of" => Ok(RelationshipType::PartOf),
            "regulates" => Ok(RelationshipType::Regulates),
            "positively_regulates" => Ok(RelationshipType::PositivelyRegulates),
            "negatively_regulates" => Ok(RelationshipType::NegativelyRegulates),
            "has_part" => Ok(RelationshipType::HasPart),
            "occurs_in" => Ok(RelationshipType::OccursIn),
            "ends_during" => Ok(RelationshipType::EndsDuring),
            _ => Err(format!("Unknown relationship type: {}", s)),
        }
    }
}

impl std::fmt::Display for RelationshipType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

// ============================================================================
// OBO Header
// ============================================================================

/// Header tags preceding the first stanza
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OboHeader {
    /// e.g. "1.2"
    pub format_version: Option<String>,

    /// e.g. "releases/2026-01-01"
    pub data_version: Option<String>,
}

// ============================================================================
// Tests
// ============================================================================
