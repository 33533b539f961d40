//! In-process quad store.
//!
//! Evaluates the same structured operations the HTTP store renders to
//! SPARQL. Each call holds the lock for its full duration, so a
//! `DELETE/INSERT ... WHERE` matches, deletes and inserts as one unit.

use async_trait::async_trait;
use tokio::sync::RwLock;
use tracing::{debug, trace};

use crate::error::StoreError;
use crate::rdf::{GraphPattern, Iri, Node, Quad, QuadPattern, SelectQuery, Term, Update};

use super::{instantiate_triple, resolve, GraphStore, Row};

/// Graph used for write templates that name no graph.
pub const DEFAULT_GRAPH: &str = "urn:x-semjobs:default-graph";

#[derive(Debug, Default)]
pub struct MemoryStore {
    quads: RwLock<Vec<Quad>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored quads.
    pub async fn len(&self) -> usize {
        self.quads.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.quads.read().await.is_empty()
    }

    /// Snapshot of every stored quad, in insertion order.
    pub async fn quads(&self) -> Vec<Quad> {
        self.quads.read().await.clone()
    }

    /// Quads whose subject is `subject`.
    pub async fn describe(&self, subject: &Iri) -> Vec<Quad> {
        let subject = Term::Iri(subject.clone());
        self.quads
            .read()
            .await
            .iter()
            .filter(|q| q.subject == subject)
            .cloned()
            .collect()
    }
}

#[async_trait]
impl GraphStore for MemoryStore {
    async fn select(&self, query: &SelectQuery) -> Result<Vec<Row>, StoreError> {
        let quads = self.quads.read().await;
        let rows = evaluate(&quads, &query.pattern);

        let mut projected: Vec<Row> = Vec::with_capacity(rows.len());
        for row in rows {
            let row = if query.variables.is_empty() {
                row
            } else {
                row.project(&query.variables)
            };
            if query.distinct && projected.contains(&row) {
                continue;
            }
            projected.push(row);
        }
        trace!("memory select returned {} rows", projected.len());
        Ok(projected)
    }

    async fn update(&self, update: &Update) -> Result<(), StoreError> {
        let mut quads = self.quads.write().await;
        match update {
            Update::InsertData(data) => {
                for quad in data {
                    if !quads.contains(quad) {
                        quads.push(quad.clone());
                    }
                }
                debug!("memory insert of {} quads", data.len());
            }
            Update::Modify {
                delete,
                insert,
                pattern,
            } => {
                let rows = evaluate(&quads, pattern);
                let deletions: Vec<Quad> = rows
                    .iter()
                    .flat_map(|row| delete.iter().filter_map(move |t| instantiate(t, row)))
                    .collect();
                let insertions: Vec<Quad> = rows
                    .iter()
                    .flat_map(|row| insert.iter().filter_map(move |t| instantiate(t, row)))
                    .collect();

                let inserted = insertions.len();
                quads.retain(|q| !deletions.contains(q));
                for quad in insertions {
                    if !quads.contains(&quad) {
                        quads.push(quad);
                    }
                }
                debug!(
                    "memory modify matched {} rows, deleted {} and inserted {} quads",
                    rows.len(),
                    deletions.len(),
                    inserted
                );
            }
        }
        Ok(())
    }
}

fn instantiate(pattern: &QuadPattern, row: &Row) -> Option<Quad> {
    let graph = match &pattern.graph {
        Some(node) => resolve(node, row)?.as_iri()?.clone(),
        None => Iri::new(DEFAULT_GRAPH),
    };
    instantiate_triple(pattern, row).map(|t| t.in_graph(&graph))
}

/// Solutions of the required patterns, each extended by every optional
/// group that is compatible with it.
fn evaluate(quads: &[Quad], pattern: &GraphPattern) -> Vec<Row> {
    let mut solutions = vec![Row::new()];
    for quad_pattern in &pattern.required {
        solutions = extend(quads, solutions, quad_pattern);
        if solutions.is_empty() {
            return solutions;
        }
    }

    for group in &pattern.optional {
        solutions = solutions
            .into_iter()
            .flat_map(|solution| {
                let mut extended = vec![solution.clone()];
                for quad_pattern in group {
                    extended = extend(quads, extended, quad_pattern);
                }
                if extended.is_empty() {
                    vec![solution]
                } else {
                    extended
                }
            })
            .collect();
    }
    solutions
}

fn extend(quads: &[Quad], solutions: Vec<Row>, pattern: &QuadPattern) -> Vec<Row> {
    let mut out = Vec::new();
    for solution in &solutions {
        for quad in quads {
            if let Some(row) = match_quad(pattern, quad, solution) {
                out.push(row);
            }
        }
    }
    out
}

fn match_quad(pattern: &QuadPattern, quad: &Quad, solution: &Row) -> Option<Row> {
    let mut row = solution.clone();
    bind(&pattern.subject, &quad.subject, &mut row)?;
    bind(&pattern.predicate, &Term::Iri(quad.predicate.clone()), &mut row)?;
    bind(&pattern.object, &quad.object, &mut row)?;
    if let Some(graph) = &pattern.graph {
        bind(graph, &Term::Iri(quad.graph.clone()), &mut row)?;
    }
    Some(row)
}

fn bind(node: &Node, value: &Term, row: &mut Row) -> Option<()> {
    match node {
        Node::Term(term) => (term == value).then_some(()),
        Node::Var(name) => match row.get(name) {
            Some(bound) => (bound == value).then_some(()),
            None => {
                row.insert(name.clone(), value.clone());
                Some(())
            }
        },
    }
}
