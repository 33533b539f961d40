//! Result rows and the SPARQL JSON results format.

use std::collections::HashMap;

use serde::Deserialize;

use crate::rdf::{Iri, Literal, Term};

/// One solution: variable name to bound term. Unbound variables are absent.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Row {
    bindings: HashMap<String, Term>,
}

impl Row {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, var: &str) -> Option<&Term> {
        self.bindings.get(var)
    }

    pub fn iri(&self, var: &str) -> Option<&Iri> {
        self.get(var).and_then(Term::as_iri)
    }

    pub fn literal(&self, var: &str) -> Option<&Literal> {
        self.get(var).and_then(Term::as_literal)
    }

    pub fn insert(&mut self, var: impl Into<String>, term: Term) {
        self.bindings.insert(var.into(), term);
    }

    /// Keeps only the given variables.
    pub(crate) fn project(&self, vars: &[String]) -> Row {
        Row {
            bindings: vars
                .iter()
                .filter_map(|v| self.bindings.get(v).map(|t| (v.clone(), t.clone())))
                .collect(),
        }
    }
}

impl FromIterator<(String, Term)> for Row {
    fn from_iter<I: IntoIterator<Item = (String, Term)>>(iter: I) -> Self {
        Row {
            bindings: iter.into_iter().collect(),
        }
    }
}

/// `application/sparql-results+json` body of a SELECT response.
#[derive(Debug, Deserialize)]
pub struct SparqlResults {
    #[serde(default)]
    pub head: SparqlHead,
    pub results: SparqlBindings,
}

#[derive(Debug, Default, Deserialize)]
pub struct SparqlHead {
    #[serde(default)]
    pub vars: Vec<String>,
}

#[derive(Debug, Deserialize)]
pub struct SparqlBindings {
    #[serde(default)]
    pub bindings: Vec<HashMap<String, Term>>,
}

impl SparqlResults {
    pub fn into_rows(self) -> Vec<Row> {
        self.results
            .bindings
            .into_iter()
            .map(|binding| binding.into_iter().collect())
            .collect()
    }
}
