//! In-memory Gene Ontology DAG.
//!
//! [`GoDag`] owns every parsed term and resolves parent identifiers to
//! records once, at construction. The graph and lookup builders only see it
//! through the [`TermSource`] trait, so any other ontology reader can feed
//! them by implementing that trait.

use crate::models::{GoTerm, Namespace, OboHeader};
use crate::parser::OboDocument;
use std::collections::BTreeMap;
use tracing::{debug, info, warn};

/// Read access to an ontology: keyed term records plus their parents.
pub trait TermSource {
    /// Every key of the ontology with the record it resolves to.
    ///
    /// A record may appear under several keys (alternate ids), so the same
    /// term can be yielded more than once.
    fn entries(&self) -> Box<dyn Iterator<Item = (&str, &GoTerm)> + '_>;

    /// Parent records of `term`
    fn parents<'a>(&'a self, term: &GoTerm) -> Box<dyn Iterator<Item = &'a GoTerm> + 'a>;
}

/// Which edges and terms go into the DAG
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DagOptions {
    /// Treat typed `relationship` targets (part_of, regulates, ...) as parents
    pub include_relationships: bool,

    /// Keep obsolete terms
    pub load_obsolete: bool,
}

impl Default for DagOptions {
    fn default() -> Self {
        DagOptions {
            include_relationships: false,
            load_obsolete: true,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct GoDag {
    header: OboHeader,
    terms: Vec<GoTerm>,
    parents: Vec<Vec<usize>>,
    /// Primary and alternate ids -> position in `terms`
    index: BTreeMap<String, usize>,
    dangling_parents: usize,
}

impl GoDag {
    pub fn from_document(document: OboDocument, options: &DagOptions) -> Self {
        let OboDocument { header, terms } = document;

        let mut kept: Vec<GoTerm> = Vec::with_capacity(terms.len());
        let mut index: BTreeMap<String, usize> = BTreeMap::new();
        let mut skipped_obsolete = 0usize;
        for term in terms {
            if term.is_obsolete && !options.load_obsolete {
                skipped_obsolete += 1;
                continue;
            }
            // A later stanza replaces the earlier record, alt ids included
            match index.get(&term.go_id) {
                Some(&pos) => {
                    warn!(go_id = %term.go_id, "Duplicate term id, keeping the later stanza");
                    kept[pos] = term;
                },
                None => {
                    index.insert(term.go_id.clone(), kept.len());
                    kept.push(term);
                },
            }
        }
        // Alternate ids never shadow a primary id
        for (pos, term) in kept.iter().enumerate() {
            for alt_id in &term.alt_ids {
                index.entry(alt_id.clone()).or_insert(pos);
            }
        }

        let mut dangling_parents = 0usize;
        let parents = kept
            .iter()
            .map(|term| {
                let relationship_targets = term
                    .relationships
                    .iter()
                    .filter(|_| options.include_relationships)
                    .map(|(_, target)| target);

                let mut resolved: Vec<usize> = Vec::new();
                for parent_id in term.is_a.iter().chain(relationship_targets) {
                    match index.get(parent_id) {
                        Some(&pos) => {
                            if !resolved.contains(&pos) {
                                resolved.push(pos);
                            }
                        },
                        None => {
                            warn!(go_id = %term.go_id, parent = %parent_id, "Parent term is not defined, dropping edge");
                            dangling_parents += 1;
                        },
                    }
                }
                resolved
            })
            .collect();

        let dag = GoDag {
            header,
            terms: kept,
            parents,
            index,
            dangling_parents,
        };

        info!(
            terms = dag.terms.len(),
            keys = dag.index.len(),
            skipped_obsolete,
            dangling_parents,
            namespaces = ?dag.namespace_counts(),
            "Assembled GO DAG"
        );
        debug!(?options, "DAG options");

        dag
    }

    /// Term records per declared namespace; terms without one are not counted
    pub fn namespace_counts(&self) -> BTreeMap<Namespace, usize> {
        let mut counts = BTreeMap::new();
        for namespace in self.terms.iter().filter_map(|term| term.namespace) {
            *counts.entry(namespace).or_insert(0) += 1;
        }
        counts
    }

    pub fn header(&self) -> &OboHeader {
        &self.header
    }

    /// Resolve a primary or alternate id
    pub fn get(&self, id: &str) -> Option<&GoTerm> {
        self.index.get(id).map(|&pos| &self.terms[pos])
    }

    /// Number of distinct term records
    pub fn term_count(&self) -> usize {
        self.terms.len()
    }

    /// Number of keys, alternate ids included
    pub fn len(&self) -> usize {
        self.index.len()
    }

    pub fn is_empty(&self) -> bool {
        self.index.is_empty()
    }

    /// Parent references that named no loaded term
    pub fn dangling_parents(&self) -> usize {
        self.dangling_parents
    }
}

impl TermSource for GoDag {
    fn entries(&self) -> Box<dyn Iterator<Item = (&str, &GoTerm)> + '_> {
        Box::new(
            self.index
                .iter()
                .map(|(key, &pos)| (key.as_str(), &self.terms[pos])),
        )
    }

    fn parents<'a>(&'a self, term: &GoTerm) -> Box<dyn Iterator<Item = &'a GoTerm> + 'a> {
        match self.index.get(&term.go_id) {
            Some(&pos) => Box::new(self.parents[pos].iter().map(move |&p| &self.terms[p])),
            None => Box::new(std::iter::empty()),
        }
    }
}
