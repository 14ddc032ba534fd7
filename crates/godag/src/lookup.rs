//! GO identifier -> display name table.

use crate::dag::TermSource;
use crate::error::{GoError, Result};
use serde::Serialize;
use std::collections::BTreeMap;
use tracing::info;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct NameLookup {
    names: BTreeMap<String, String>,
    #[serde(skip)]
    iterated: usize,
    #[serde(skip)]
    doublons: usize,
}

impl NameLookup {
    pub fn get(&self, go_id: &str) -> Option<&str> {
        self.names.get(go_id).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    /// Term entries visited while building
    pub fn iterated(&self) -> usize {
        self.iterated
    }

    /// Inserts that hit an identifier already present
    pub fn doublons(&self) -> usize {
        self.doublons
    }

    pub fn as_map(&self) -> &BTreeMap<String, String> {
        &self.names
    }

    /// Check `iterated - doublons == len`
    pub fn verify(&self) -> Result<()> {
        if self.iterated.checked_sub(self.doublons) == Some(self.names.len()) {
            Ok(())
        } else {
            Err(GoError::validation(format!(
                "name lookup is inconsistent: {} entries iterated, {} doublons, {} names",
                self.iterated,
                self.doublons,
                self.names.len()
            )))
        }
    }
}

/// Map every term identifier to its name; a later record overwrites an earlier one.
pub fn build_name_lookup<S>(source: &S) -> NameLookup
where
    S: TermSource + ?Sized,
{
    let mut lookup = NameLookup::default();

    for (_, term) in source.entries() {
        lookup.iterated += 1;
        if lookup
            .names
            .insert(term.go_id.clone(), term.name.clone())
            .is_some()
        {
            lookup.doublons += 1;
        }
    }

    info!(
        names = lookup.names.len(),
        iterated = lookup.iterated,
        doublons = lookup.doublons,
        "Built id -> name lookup"
    );

    lookup
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dag::fixture::Terms;
    use crate::models::GoTerm;

    #[test]
    fn test_later_record_wins_and_counts_a_doublon() {
        let terms = Terms::new()
            .keyed("k1", GoTerm::new("G1", "alpha"))
            .keyed("k2", GoTerm::new("G1", "beta"));

        let lookup = build_name_lookup(&terms);
        assert_eq!(lookup.len(), 1);
        assert_eq!(lookup.get("G1"), Some("beta"));
        assert_eq!(lookup.doublons(), 1);
        assert!(lookup.verify().is_ok());
    }

    #[test]
    fn test_identical_name_still_counts_as_doublon() {
        let term = GoTerm::new("GO:0000006", "zinc transporter activity");
        let terms = Terms::new()
            .term(term.clone())
            .keyed("GO:0000007", term);

        let lookup = build_name_lookup(&terms);
        assert_eq!(lookup.doublons(), 1);
        assert_eq!(lookup.iterated(), 2);
        assert!(lookup.verify().is_ok());
    }

    #[test]
    fn test_empty_source() {
        let lookup = build_name_lookup(&Terms::new());
        assert!(lookup.is_empty());
        assert_eq!((lookup.iterated(), lookup.doublons()), (0, 0));
        assert!(lookup.verify().is_ok());
    }

    #[test]
    fn test_distinct_ids() {
        let terms = Terms::new()
            .term(GoTerm::new("GO:0008150", "biological_process"))
            .term(GoTerm::new("GO:0003674", "molecular_function"))
            .term(GoTerm::new("GO:0005575", "cellular_component"));

        let lookup = build_name_lookup(&terms);
        assert_eq!(lookup.len(), 3);
        assert_eq!(lookup.doublons(), 0);
        assert_eq!(lookup.get("GO:0003674"), Some("molecular_function"));
        assert_eq!(
            serde_json::to_value(&lookup).unwrap(),
            serde_json::json!({
                "GO:0003674": "molecular_function",
                "GO:0005575": "cellular_component",
                "GO:0008150": "biological_process",
            })
        );
    }

    #[test]
    fn test_verify_rejects_inconsistent_counts() {
        let lookup = NameLookup {
            names: BTreeMap::new(),
            iterated: 2,
            doublons: 0,
        };
        assert!(matches!(lookup.verify(), Err(GoError::Validation(_))));
    }
}
