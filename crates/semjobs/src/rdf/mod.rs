//! Graph data model: terms, facts and store operations.

pub mod pattern;
pub mod quad;
pub mod term;

pub use pattern::{ConstructQuery, GraphPattern, Node, QuadPattern, SelectQuery, Update};
pub use quad::{FactSet, Quad, Triple};
pub use term::{Datatype, Iri, JsonTerm, Literal, Term};
