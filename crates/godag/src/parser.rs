// OBO 1.2 parser for Gene Ontology documents

use crate::error::{GoError, Result};
use crate::models::{GoTerm, Namespace, OboHeader, RelationshipType};
use tracing::{debug, info};

/// Header plus every `[Term]` stanza, in document order
#[derive(Debug, Clone, Default)]
pub struct OboDocument {
    pub header: OboHeader,
    pub terms: Vec<GoTerm>,
}

pub struct OboParser;

impl OboParser {
    /// Parse raw bytes; the document must be UTF-8
    pub fn parse_bytes(bytes: &[u8]) -> Result<OboDocument> {
        let content = std::str::from_utf8(bytes)
            .map_err(|e| GoError::parse(format!("OBO document is not valid UTF-8: {}", e)))?;
        Self::parse(content)
    }

    /// Parse OBO format text.
    ///
    /// `[Typedef]` and `[Instance]` stanzas are skipped. A `[Term]` stanza
    /// without `id` or `name` fails the whole parse.
    pub fn parse(content: &str) -> Result<OboDocument> {
        let lines: Vec<&str> = content.lines().collect();
        let mut i = 0;

        let header = Self::parse_header(&lines, &mut i);
        info!(
            format_version = header.format_version.as_deref().unwrap_or("unknown"),
            data_version = header.data_version.as_deref().unwrap_or("unknown"),
            "Parsing OBO document"
        );

        let mut terms = Vec::new();
        let mut skipped_stanzas = 0usize;

        while i < lines.len() {
            let line = lines[i].trim();

            if line == "[Term]" {
                terms.push(Self::parse_term_stanza(&lines, &mut i)?);
            } else if line.starts_with('[') {
                debug!(stanza = line, line = i + 1, "Skipping non-term stanza");
                skipped_stanzas += 1;
                Self::skip_stanza(&lines, &mut i);
            } else {
                i += 1;
            }
        }

        info!(terms = terms.len(), skipped_stanzas, "Parsed OBO document");

        Ok(OboDocument { header, terms })
    }

    /// Read tag-value pairs up to the first stanza
    fn parse_header(lines: &[&str], i: &mut usize) -> OboHeader {
        let mut header = OboHeader::default();

        while *i < lines.len() {
            let line = lines[*i].trim();
            if line.starts_with('[') {
                break;
            }

            if let Some((key, value)) = line.split_once(':') {
                match key.trim() {
                    "format-version" => header.format_version = Some(value.trim().to_string()),
                    "data-version" => header.data_version = Some(value.trim().to_string()),
                    _ => {},
                }
            }

            *i += 1;
        }

        header
    }

    fn skip_stanza(lines: &[&str], i: &mut usize) {
        *i += 1;
        while *i < lines.len() && !lines[*i].trim().starts_with('[') {
            *i += 1;
        }
    }

    /// Parse a single [Term] stanza
    fn parse_term_stanza(lines: &[&str], i: &mut usize) -> Result<GoTerm> {
        let stanza_line = *i + 1;
        *i += 1; // Skip [Term] line

        let mut go_id: Option<String> = None;
        let mut name: Option<String> = None;
        let mut namespace: Option<Namespace> = None;
        let mut is_obsolete = false;
        let mut alt_ids = Vec::new();
        let mut is_a = Vec::new();
        let mut relationships = Vec::new();

        while *i < lines.len() {
            let line = lines[*i].trim();

            // End of stanza
            if line.is_empty() || line.starts_with('[') {
                break;
            }

            if let Some((key, value)) = line.split_once(':') {
                let value = value.trim();

                match key.trim() {
                    "id" => go_id = Some(value.to_string()),
                    "name" => name = Some(value.to_string()),
                    "namespace" => match value.parse() {
                        Ok(ns) => namespace = Some(ns),
                        Err(e) => debug!(line = *i + 1, "{}", e),
                    },
                    "is_obsolete" => is_obsolete = value == "true",
                    "alt_id" => alt_ids.push(value.to_string()),
                    "is_a" => {
                        // "GO:0008150 ! biological_process"
                        if let Some(parent_id) = value.split_whitespace().next() {
                            is_a.push(parent_id.to_string());
                        }
                    },
                    "relationship" => {
                        // "part_of GO:0008150 ! biological_process"
                        let mut parts = value.split_whitespace();
                        let (Some(rel), Some(target)) = (parts.next(), parts.next()) else {
                            *i += 1;
                            continue;
                        };
                        match rel.parse::<RelationshipType>() {
                            Ok(rel_type) => relationships.push((rel_type, target.to_string())),
                            Err(e) => debug!(line = *i + 1, "{}", e),
                        }
                    },
                    _ => {},
                }
            }

            *i += 1;
        }

        let go_id = go_id.ok_or_else(|| {
            GoError::parse(format!("[Term] stanza at line {} has no id", stanza_line))
        })?;

        let name = name.ok_or_else(|| {
            GoError::parse(format!("[Term] {} (line {}) has no name", go_id, stanza_line))
        })?;

        Ok(GoTerm {
            go_id,
            name,
            namespace,
            is_obsolete,
            alt_ids,
            is_a,
            relationships,
        })
    }
}

// ============================================================================
// Tests
// ============================================================================
