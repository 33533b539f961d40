//! Graph store boundary.
//!
//! Every call is a single request/response against the store and relies on
//! the store executing one operation atomically. Nothing here retries.

pub mod http;
pub mod memory;
pub mod row;

use std::collections::HashSet;

use async_trait::async_trait;

use crate::error::StoreError;
use crate::rdf::{ConstructQuery, Node, QuadPattern, SelectQuery, Term, Triple, Update};

pub use http::HttpStore;
pub use memory::MemoryStore;
pub use row::{Row, SparqlResults};

#[async_trait]
pub trait GraphStore: Send + Sync {
    /// Evaluates a pattern and returns the projected rows.
    async fn select(&self, query: &SelectQuery) -> Result<Vec<Row>, StoreError>;

    /// Executes one write as a single indivisible operation.
    async fn update(&self, update: &Update) -> Result<(), StoreError>;
}

/// Evaluates a graph-fragment read on top of [`GraphStore::select`].
pub async fn construct(
    store: &dyn GraphStore,
    query: &ConstructQuery,
) -> Result<Vec<Triple>, StoreError> {
    let rows = store.select(&query.as_select()).await?;

    let mut seen = HashSet::new();
    let mut triples = Vec::new();
    for row in &rows {
        for pattern in &query.template {
            if let Some(triple) = instantiate_triple(pattern, row) {
                if seen.insert(triple.clone()) {
                    triples.push(triple);
                }
            }
        }
    }
    Ok(triples)
}

pub(crate) fn resolve(node: &Node, row: &Row) -> Option<Term> {
    match node {
        Node::Term(term) => Some(term.clone()),
        Node::Var(name) => row.get(name).cloned(),
    }
}

/// Fills a template from a row. Unbound positions, literal subjects and
/// non-IRI predicates yield nothing.
pub(crate) fn instantiate_triple(pattern: &QuadPattern, row: &Row) -> Option<Triple> {
    let subject = resolve(&pattern.subject, row)?;
    if matches!(subject, Term::Literal(_)) {
        return None;
    }
    let predicate = resolve(&pattern.predicate, row)?.as_iri()?.clone();
    let object = resolve(&pattern.object, row)?;
    Some(Triple {
        subject,
        predicate,
        object,
    })
}
