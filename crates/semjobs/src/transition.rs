//! The conditional status rewrite shared by Jobs and Tasks.

use chrono::{DateTime, Utc};

use crate::rdf::{GraphPattern, Iri, Node, QuadPattern, Term, Triple, Update};
use crate::status::Status;
use crate::vocab::VOCAB;

const GRAPH_VAR: &str = "g";

/// Replaces the current `status`/`modified` pair of `subject` and inserts
/// `extra` triples, all in the graph holding the current pair.
///
/// The WHERE clause requires an existing pair; without one the update
/// matches nothing and changes nothing.
pub(crate) fn status_update(
    subject: &Iri,
    status: Status,
    modified: DateTime<Utc>,
    extra: Vec<Triple>,
) -> Update {
    let v = &*VOCAB;
    let graph = Node::var(GRAPH_VAR);
    let current = vec![
        QuadPattern::new(subject, &v.status, Node::var("oldStatus")).in_graph(graph.clone()),
        QuadPattern::new(subject, &v.modified, Node::var("oldModified")).in_graph(graph.clone()),
    ];

    let mut insert = vec![
        QuadPattern::new(subject, &v.status, status.iri()).in_graph(graph.clone()),
        QuadPattern::new(subject, &v.modified, Term::date_time(modified)).in_graph(graph.clone()),
    ];
    insert.extend(
        extra
            .into_iter()
            .map(|triple| QuadPattern::from(triple).in_graph(graph.clone())),
    );

    let pattern = current
        .iter()
        .cloned()
        .fold(GraphPattern::new(), GraphPattern::with);

    Update::Modify {
        delete: current,
        insert,
        pattern,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_update_shape() {
        let subject = Iri::new("http://example.org/job/1");
        let error = Iri::new("http://example.org/error/1");
        let update = status_update(
            &subject,
            Status::Failed,
            Utc::now(),
            vec![Triple::new(&subject, &VOCAB.error, &error)],
        );

        let Update::Modify {
            delete,
            insert,
            pattern,
        } = update
        else {
            panic!("expected a modify");
        };
        assert_eq!(delete.len(), 2);
        assert_eq!(insert.len(), 3);
        assert_eq!(pattern.required, delete);
        assert!(insert
            .iter()
            .all(|p| p.graph == Some(Node::var(GRAPH_VAR))));
    }
}
