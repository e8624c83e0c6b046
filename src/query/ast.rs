use std::collections::BTreeSet;

use crate::index::Segment;
use crate::models::{DocumentId, Field};

/// Parsed query expression
///
/// Evaluation produces the matching document-id set: posting lookup for a
/// term, intersection for a conjunction, union for a disjunction.
#[derive(Clone, Debug, PartialEq)]
pub enum Query {
    /// Exact normalized term in a single field
    Term { field: Field, term: String },
    /// Every subquery must match
    And(Vec<Query>),
    /// At least one subquery must match
    Or(Vec<Query>),
}

impl Query {
    pub fn term(field: Field, term: impl Into<String>) -> Query {
        Query::Term {
            field,
            term: term.into(),
        }
    }

    /// Evaluate against a committed segment
    pub fn evaluate(&self, segment: &Segment) -> BTreeSet<DocumentId> {
        match self {
            Query::Term { field, term } => segment.index().terms_matching(*field, term),
            Query::And(clauses) => {
                let mut iter = clauses.iter();
                let Some(first) = iter.next() else {
                    return BTreeSet::new();
                };
                let mut acc = first.evaluate(segment);
                for clause in iter {
                    if acc.is_empty() {
                        break;
                    }
                    let next = clause.evaluate(segment);
                    acc = acc.intersection(&next).cloned().collect();
                }
                acc
            }
            Query::Or(clauses) => {
                let mut acc = BTreeSet::new();
                for clause in clauses {
                    acc.extend(clause.evaluate(segment));
                }
                acc
            }
        }
    }

    /// Wrap clauses in a conjunction, flattening the single-clause case
    pub(crate) fn conjunction(mut clauses: Vec<Query>) -> Query {
        if clauses.len() == 1 {
            clauses.remove(0)
        } else {
            Query::And(clauses)
        }
    }

    /// Wrap clauses in a disjunction, flattening the single-clause case
    pub(crate) fn disjunction(mut clauses: Vec<Query>) -> Query {
        if clauses.len() == 1 {
            clauses.remove(0)
        } else {
            Query::Or(clauses)
        }
    }
}
