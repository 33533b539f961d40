//! Structured read and write operations against a graph store.
//!
//! Operations are values: the HTTP store renders them to SPARQL 1.1 text,
//! the in-memory store evaluates them directly. Only the shapes this crate
//! needs are modelled: basic graph patterns with optional groups and graph
//! variables, `INSERT DATA`, and `DELETE/INSERT ... WHERE`.

use std::collections::BTreeSet;

use super::quad::{Quad, Triple};
use super::term::{Iri, Term};

/// A pattern position: a variable or a fixed term.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Node {
    Var(String),
    Term(Term),
}

impl Node {
    pub fn var(name: &str) -> Self {
        Node::Var(name.to_string())
    }

    fn to_sparql(&self) -> String {
        match self {
            Node::Var(name) => format!("?{}", name),
            Node::Term(term) => term.to_sparql(),
        }
    }

    fn collect_var(&self, vars: &mut BTreeSet<String>) {
        if let Node::Var(name) = self {
            vars.insert(name.clone());
        }
    }
}

impl From<Term> for Node {
    fn from(value: Term) -> Self {
        Node::Term(value)
    }
}

impl From<Iri> for Node {
    fn from(value: Iri) -> Self {
        Node::Term(Term::Iri(value))
    }
}

impl From<&Iri> for Node {
    fn from(value: &Iri) -> Self {
        Node::Term(Term::Iri(value.clone()))
    }
}

/// A triple pattern, optionally scoped to a graph. Without a graph the
/// pattern matches in any graph.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct QuadPattern {
    pub subject: Node,
    pub predicate: Node,
    pub object: Node,
    pub graph: Option<Node>,
}

impl QuadPattern {
    pub fn new(
        subject: impl Into<Node>,
        predicate: impl Into<Node>,
        object: impl Into<Node>,
    ) -> Self {
        Self {
            subject: subject.into(),
            predicate: predicate.into(),
            object: object.into(),
            graph: None,
        }
    }

    pub fn in_graph(mut self, graph: impl Into<Node>) -> Self {
        self.graph = Some(graph.into());
        self
    }

    fn triple_sparql(&self) -> String {
        format!(
            "{} {} {} .",
            self.subject.to_sparql(),
            self.predicate.to_sparql(),
            self.object.to_sparql()
        )
    }

    fn to_sparql(&self) -> String {
        match &self.graph {
            Some(graph) => format!("GRAPH {} {{ {} }}", graph.to_sparql(), self.triple_sparql()),
            None => self.triple_sparql(),
        }
    }

    fn collect_vars(&self, vars: &mut BTreeSet<String>) {
        self.subject.collect_var(vars);
        self.predicate.collect_var(vars);
        self.object.collect_var(vars);
        if let Some(graph) = &self.graph {
            graph.collect_var(vars);
        }
    }
}

impl From<Triple> for QuadPattern {
    fn from(triple: Triple) -> Self {
        QuadPattern::new(triple.subject, triple.predicate, triple.object)
    }
}

/// Required patterns plus independent `OPTIONAL` groups.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GraphPattern {
    pub required: Vec<QuadPattern>,
    pub optional: Vec<Vec<QuadPattern>>,
}

impl GraphPattern {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, pattern: QuadPattern) -> Self {
        self.required.push(pattern);
        self
    }

    pub fn optional(mut self, group: Vec<QuadPattern>) -> Self {
        self.optional.push(group);
        self
    }

    pub fn variables(&self) -> BTreeSet<String> {
        let mut vars = BTreeSet::new();
        for pattern in self.required.iter().chain(self.optional.iter().flatten()) {
            pattern.collect_vars(&mut vars);
        }
        vars
    }

    fn to_sparql(&self) -> String {
        let mut body = String::new();
        for pattern in &self.required {
            body.push_str("  ");
            body.push_str(&pattern.to_sparql());
            body.push('\n');
        }
        for group in &self.optional {
            body.push_str("  OPTIONAL {");
            for pattern in group {
                body.push(' ');
                body.push_str(&pattern.to_sparql());
            }
            body.push_str(" }\n");
        }
        body
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct SelectQuery {
    pub variables: Vec<String>,
    pub distinct: bool,
    pub pattern: GraphPattern,
}

impl SelectQuery {
    pub fn new(variables: &[&str], pattern: GraphPattern) -> Self {
        Self {
            variables: variables.iter().map(|v| v.to_string()).collect(),
            distinct: true,
            pattern,
        }
    }

    pub fn to_sparql(&self) -> String {
        let projection = if self.variables.is_empty() {
            "*".to_string()
        } else {
            self.variables
                .iter()
                .map(|v| format!("?{}", v))
                .collect::<Vec<_>>()
                .join(" ")
        };
        format!(
            "SELECT {}{} WHERE {{\n{}}}",
            if self.distinct { "DISTINCT " } else { "" },
            projection,
            self.pattern.to_sparql()
        )
    }
}

/// A graph-fragment read: the template is instantiated once per solution of
/// the pattern; template triples with unbound variables are dropped.
#[derive(Debug, Clone, PartialEq)]
pub struct ConstructQuery {
    pub template: Vec<QuadPattern>,
    pub pattern: GraphPattern,
}

impl ConstructQuery {
    pub fn new(template: Vec<QuadPattern>, pattern: GraphPattern) -> Self {
        Self { template, pattern }
    }

    /// The select query whose rows feed the template.
    pub fn as_select(&self) -> SelectQuery {
        let mut vars = BTreeSet::new();
        for pattern in &self.template {
            pattern.collect_vars(&mut vars);
        }
        SelectQuery {
            variables: vars.into_iter().collect(),
            distinct: true,
            pattern: self.pattern.clone(),
        }
    }
}

/// Write operations.
#[derive(Debug, Clone, PartialEq)]
pub enum Update {
    /// Unconditional insert of fixed facts, each into its own graph.
    InsertData(Vec<Quad>),
    /// Conditional delete-then-insert keyed by a pattern. Executes as one
    /// unit; matching nothing deletes and inserts nothing.
    Modify {
        delete: Vec<QuadPattern>,
        insert: Vec<QuadPattern>,
        pattern: GraphPattern,
    },
}

impl Update {
    pub fn to_sparql(&self) -> String {
        match self {
            Update::InsertData(quads) => {
                let mut graphs: Vec<(&Iri, Vec<&Quad>)> = Vec::new();
                for quad in quads {
                    match graphs.iter_mut().find(|(g, _)| *g == &quad.graph) {
                        Some((_, members)) => members.push(quad),
                        None => graphs.push((&quad.graph, vec![quad])),
                    }
                }
                let mut body = String::new();
                for (graph, members) in graphs {
                    body.push_str(&format!("  GRAPH {} {{\n", graph.to_sparql()));
                    for quad in members {
                        body.push_str(&format!(
                            "    {} {} {} .\n",
                            quad.subject.to_sparql(),
                            quad.predicate.to_sparql(),
                            quad.object.to_sparql()
                        ));
                    }
                    body.push_str("  }\n");
                }
                format!("INSERT DATA {{\n{}}}", body)
            }
            Update::Modify {
                delete,
                insert,
                pattern,
            } => {
                let mut out = String::new();
                if !delete.is_empty() {
                    out.push_str(&template_block("DELETE", delete));
                }
                if !insert.is_empty() {
                    out.push_str(&template_block("INSERT", insert));
                }
                out.push_str(&format!("WHERE {{\n{}}}", pattern.to_sparql()));
                out
            }
        }
    }
}

fn template_block(keyword: &str, patterns: &[QuadPattern]) -> String {
    let mut out = format!("{} {{\n", keyword);
    for pattern in patterns {
        out.push_str("  ");
        out.push_str(&pattern.to_sparql());
        out.push('\n');
    }
    out.push_str("}\n");
    out
}
