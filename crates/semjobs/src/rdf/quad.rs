//! Triples, quads and the fact-list builder.

use super::term::{Iri, Term};

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Triple {
    pub subject: Term,
    pub predicate: Iri,
    pub object: Term,
}

impl Triple {
    pub fn new(subject: impl Into<Term>, predicate: &Iri, object: impl Into<Term>) -> Self {
        Self {
            subject: subject.into(),
            predicate: predicate.clone(),
            object: object.into(),
        }
    }

    pub fn in_graph(self, graph: &Iri) -> Quad {
        Quad {
            subject: self.subject,
            predicate: self.predicate,
            object: self.object,
            graph: graph.clone(),
        }
    }
}

/// One statement in a named graph.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Quad {
    pub subject: Term,
    pub predicate: Iri,
    pub object: Term,
    pub graph: Iri,
}

impl Quad {
    pub fn triple(&self) -> Triple {
        Triple {
            subject: self.subject.clone(),
            predicate: self.predicate.clone(),
            object: self.object.clone(),
        }
    }
}

/// Collects the facts describing one or more entities in a single graph.
///
/// The builder is consumed by [`FactSet::build`], which hands back an
/// immutable list ready to be written in one operation.
#[derive(Debug, Clone)]
pub struct FactSet {
    graph: Iri,
    quads: Vec<Quad>,
}

impl FactSet {
    pub fn new(graph: &Iri) -> Self {
        Self {
            graph: graph.clone(),
            quads: Vec::new(),
        }
    }

    pub fn add(mut self, subject: &Iri, predicate: &Iri, object: impl Into<Term>) -> Self {
        self.quads.push(Quad {
            subject: Term::Iri(subject.clone()),
            predicate: predicate.clone(),
            object: object.into(),
            graph: self.graph.clone(),
        });
        self
    }

    pub fn add_optional<T: Into<Term>>(
        self,
        subject: &Iri,
        predicate: &Iri,
        object: Option<T>,
    ) -> Self {
        match object {
            Some(object) => self.add(subject, predicate, object),
            None => self,
        }
    }

    /// Places graph-less triples into this fact set's graph.
    pub fn extend_triples(mut self, triples: impl IntoIterator<Item = Triple>) -> Self {
        let graph = self.graph.clone();
        self.quads
            .extend(triples.into_iter().map(|t| t.in_graph(&graph)));
        self
    }

    pub fn build(self) -> Vec<Quad> {
        self.quads
    }
}
