//! Filtering of change-notification batches.
//!
//! Only `inserts` are looked at. `deletes` are parsed so a full batch
//! deserializes, but nothing here consumes them.

use serde::{Deserialize, Serialize};

use crate::rdf::{Iri, Term};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeltaTriple {
    pub subject: Term,
    pub predicate: Term,
    pub object: Term,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeltaBatch {
    #[serde(default)]
    pub inserts: Vec<DeltaTriple>,
    #[serde(default)]
    pub deletes: Vec<DeltaTriple>,
}

/// Parses a delta notification body: a JSON array of batches.
pub fn parse_batches(json: &str) -> Result<Vec<DeltaBatch>, serde_json::Error> {
    serde_json::from_str(json)
}

fn inserts(batches: &[DeltaBatch]) -> impl Iterator<Item = &DeltaTriple> {
    batches.iter().flat_map(|batch| batch.inserts.iter())
}

/// Subjects of inserted triples with exactly this predicate and object.
///
/// Subjects are returned once per matching triple, in batch order, and are
/// not deduplicated.
pub fn filter_by_predicate_object(
    batches: &[DeltaBatch],
    predicate: &Iri,
    object: &Term,
) -> Vec<Term> {
    let predicate = Term::Iri(predicate.clone());
    inserts(batches)
        .filter(|t| t.predicate == predicate && &t.object == object)
        .map(|t| t.subject.clone())
        .collect()
}

/// Inserted triples accepted by all three matchers, tried subject first,
/// then predicate, then object.
pub fn filter_triples_by_predicates<S, P, O>(
    batches: &[DeltaBatch],
    subject: S,
    predicate: P,
    object: O,
) -> Vec<DeltaTriple>
where
    S: Fn(&Term) -> bool,
    P: Fn(&Term) -> bool,
    O: Fn(&Term) -> bool,
{
    inserts(batches)
        .filter(|t| subject(&t.subject) && predicate(&t.predicate) && object(&t.object))
        .cloned()
        .collect()
}

/// Like [`filter_triples_by_predicates`], returning only the subjects.
pub fn filter_by_predicates<S, P, O>(
    batches: &[DeltaBatch],
    subject: S,
    predicate: P,
    object: O,
) -> Vec<Term>
where
    S: Fn(&Term) -> bool,
    P: Fn(&Term) -> bool,
    O: Fn(&Term) -> bool,
{
    filter_triples_by_predicates(batches, subject, predicate, object)
        .into_iter()
        .map(|t| t.subject)
        .collect()
}

#[cfg(test)]
mod tests {
    use std::cell::Cell;

    use super::*;

    fn triple(s: &str, p: &str, o: Term) -> DeltaTriple {
        DeltaTriple {
            subject: Term::iri(s),
            predicate: Term::iri(p),
            object: o,
        }
    }

    #[test]
    fn test_empty_input() {
        let p = Iri::new("http://example.org/p");
        assert!(filter_by_predicate_object(&[], &p, &Term::iri("http://example.org/o")).is_empty());
    }

    #[test]
    fn test_predicate_object_match() {
        let batch = DeltaBatch {
            inserts: vec![
                triple(
                    "http://example.org/A",
                    "http://example.org/p",
                    Term::iri("http://example.org/o"),
                ),
                triple(
                    "http://example.org/B",
                    "http://example.org/p",
                    Term::iri("http://example.org/o2"),
                ),
            ],
            deletes: vec![triple(
                "http://example.org/C",
                "http://example.org/p",
                Term::iri("http://example.org/o"),
            )],
        };

        let subjects = filter_by_predicate_object(
            &[batch],
            &Iri::new("http://example.org/p"),
            &Term::iri("http://example.org/o"),
        );
        assert_eq!(subjects, vec![Term::iri("http://example.org/A")]);
    }

    #[test]
    fn test_duplicates_kept() {
        let t = triple("http://example.org/A", "http://example.org/p", Term::string("x"));
        let batches = vec![
            DeltaBatch {
                inserts: vec![t.clone()],
                deletes: Vec::new(),
            },
            DeltaBatch {
                inserts: vec![t],
                deletes: Vec::new(),
            },
        ];
        let subjects = filter_by_predicate_object(
            &batches,
            &Iri::new("http://example.org/p"),
            &Term::string("x"),
        );
        assert_eq!(subjects.len(), 2);
    }

    #[test]
    fn test_matchers_short_circuit() {
        let batch = DeltaBatch {
            inserts: vec![
                triple("http://example.org/A", "http://example.org/p", Term::string("1")),
                triple("http://example.org/B", "http://example.org/p", Term::string("2")),
            ],
            deletes: Vec::new(),
        };
        let object_calls = Cell::new(0);

        let subjects = filter_by_predicates(
            &[batch],
            |s| s.value().ends_with('B'),
            |_| true,
            |_| {
                object_calls.set(object_calls.get() + 1);
                true
            },
        );

        assert_eq!(subjects, vec![Term::iri("http://example.org/B")]);
        assert_eq!(object_calls.get(), 1);
    }

    #[test]
    fn test_parse_batches() {
        let json = r#"[
            {
                "inserts": [{
                    "subject": {"type": "uri", "value": "http://example.org/job/1"},
                    "predicate": {"type": "uri", "value": "http://www.w3.org/ns/adms#status"},
                    "object": {"type": "uri", "value": "http://example.org/JobStatus/scheduled"}
                }],
                "deletes": []
            },
            {"deletes": []}
        ]"#;

        let batches = parse_batches(json).unwrap();
        assert_eq!(batches.len(), 2);
        assert!(batches[1].inserts.is_empty());

        let triples = filter_triples_by_predicates(
            &batches,
            |_| true,
            |p| p.value() == "http://www.w3.org/ns/adms#status",
            |o| o.value().ends_with("/scheduled"),
        );
        assert_eq!(triples.len(), 1);
        assert_eq!(triples[0].subject, Term::iri("http://example.org/job/1"));
    }
}
