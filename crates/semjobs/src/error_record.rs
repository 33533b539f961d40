//! Write-once Error records.

use std::sync::Arc;

use chrono::Utc;
use log::info;

use crate::config::ErrorConfig;
use crate::error::StoreError;
use crate::ids::EntityKind;
use crate::rdf::{FactSet, Iri, Term, Update};
use crate::store::GraphStore;
use crate::vocab::VOCAB;

/// Creates Error records. Records are never updated or deleted.
#[derive(Clone)]
pub struct ErrorManager {
    store: Arc<dyn GraphStore>,
    subject: String,
    graph: Iri,
}

impl ErrorManager {
    pub fn new(store: Arc<dyn GraphStore>, config: &ErrorConfig) -> Self {
        Self {
            store,
            subject: config.subject.clone(),
            graph: Iri::new(config.graph.clone()),
        }
    }

    pub fn graph(&self) -> &Iri {
        &self.graph
    }

    /// Inserts one Error record. `detail` and `reference` each add a fact
    /// only when given.
    pub async fn create_error(
        &self,
        creator: &Iri,
        message: &str,
        detail: Option<&str>,
        reference: Option<&Iri>,
    ) -> Result<Iri, StoreError> {
        let v = &*VOCAB;
        let (uuid, error) = EntityKind::Error.mint();

        let facts = FactSet::new(&self.graph)
            .add(&error, &v.rdf_type, &v.error_class)
            .add(&error, &v.uuid, Term::string(uuid))
            .add(&error, &v.subject, Term::string(self.subject.clone()))
            .add(&error, &v.message, Term::string(message))
            .add(&error, &v.created, Term::date_time(Utc::now()))
            .add(&error, &v.creator, creator)
            .add_optional(&error, &v.detail, detail.map(Term::string))
            .add_optional(&error, &v.references, reference)
            .build();

        self.store.update(&Update::InsertData(facts)).await?;
        info!("Created error {}", error);
        Ok(error)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryStore;

    fn manager() -> (Arc<MemoryStore>, ErrorManager) {
        let store = Arc::new(MemoryStore::new());
        let errors = ErrorManager::new(store.clone(), &ErrorConfig::default());
        (store, errors)
    }

    #[tokio::test]
    async fn test_minimal_error_record() {
        let (store, errors) = manager();
        let creator = Iri::new("http://example.org/service");

        let error = errors
            .create_error(&creator, "download failed", None, None)
            .await
            .unwrap();

        let facts = store.describe(&error).await;
        assert_eq!(facts.len(), 6);
        assert!(facts.iter().all(|q| &q.graph == errors.graph()));
        assert!(facts
            .iter()
            .any(|q| q.predicate == VOCAB.subject
                && q.object == Term::string("Automatic Submission Service")));
        assert!(!facts.iter().any(|q| q.predicate == VOCAB.detail));
        assert!(!facts.iter().any(|q| q.predicate == VOCAB.references));
    }

    #[tokio::test]
    async fn test_detail_and_reference_add_one_fact_each() {
        let (store, errors) = manager();
        let creator = Iri::new("http://example.org/service");
        let task = Iri::new("http://example.org/task/1");

        let error = errors
            .create_error(&creator, "boom", Some("stack trace\nline 2"), Some(&task))
            .await
            .unwrap();

        let facts = store.describe(&error).await;
        assert_eq!(facts.len(), 8);
        assert!(facts
            .iter()
            .any(|q| q.predicate == VOCAB.references && q.object == Term::Iri(task.clone())));
        assert!(facts.iter().any(|q| {
            q.predicate == VOCAB.detail && q.object == Term::string("stack trace\nline 2")
        }));
    }
}
