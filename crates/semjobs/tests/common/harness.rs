//! Test harness backed by `MemoryStore` and a temporary share directory.

#![allow(dead_code)]

use std::path::PathBuf;
use std::sync::Arc;

use tempfile::TempDir;

use semjobs::rdf::{Quad, Term};
use semjobs::vocab::operation;
use semjobs::{Config, FileContentStore, Iri, JobGraph, MemoryStore, VOCAB};

pub fn iri(local: &str) -> Iri {
    Iri::new(format!("http://example.org/{}", local))
}

pub struct TestHarness {
    temp_dir: TempDir,
    pub store: Arc<MemoryStore>,
    pub graph: JobGraph,
    pub config: Config,
    /// Graph Jobs and Tasks are written to.
    pub data_graph: Iri,
}

impl TestHarness {
    pub fn new() -> Self {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        let store = Arc::new(MemoryStore::new());
        let config = Config::default();
        let graph = JobGraph::new(store.clone(), &config);

        Self {
            temp_dir,
            store,
            graph,
            config,
            data_graph: iri("graphs/submissions"),
        }
    }

    /// Content store rooted in the temp directory, so `/share/x` lands at
    /// `<temp>/share/x`.
    pub fn content_store(&self) -> FileContentStore {
        FileContentStore::with_root(self.temp_dir.path())
    }

    /// Writes bytes where the content store expects `internal_path`.
    pub fn write_content(&self, internal_path: &str, bytes: &[u8]) -> PathBuf {
        let target = self.content_store().resolve(std::path::Path::new(internal_path));
        std::fs::create_dir_all(target.parent().expect("path has a parent"))
            .expect("Failed to create share directory");
        std::fs::write(&target, bytes).expect("Failed to write content");
        target
    }

    pub async fn create_job(&self, activity: &Iri) -> Iri {
        self.graph
            .jobs
            .create_job(
                &Iri::new(operation::AUTOMATIC_SUBMISSION_FLOW),
                activity,
                self.graph.creator(),
                &Iri::new(semjobs::vocab::cogs::TRANSFORMATION_PROCESS),
                &self.data_graph,
            )
            .await
            .expect("Failed to create job")
    }

    /// Quads with this subject and predicate.
    pub async fn facts(&self, subject: &Iri, predicate: &Iri) -> Vec<Quad> {
        self.store
            .describe(subject)
            .await
            .into_iter()
            .filter(|q| &q.predicate == predicate)
            .collect()
    }

    pub async fn objects(&self, subject: &Iri, predicate: &Iri) -> Vec<Term> {
        self.facts(subject, predicate)
            .await
            .into_iter()
            .map(|q| q.object)
            .collect()
    }

    /// Number of stored quads mentioning any container or collection.
    pub async fn container_fact_count(&self) -> usize {
        let v = &*VOCAB;
        self.store
            .quads()
            .await
            .iter()
            .filter(|q| {
                q.predicate == v.input_container
                    || q.predicate == v.results_container
                    || q.predicate == v.has_file
                    || q.predicate == v.has_harvesting_collection
                    || q.object == Term::Iri(v.container_class.clone())
                    || q.object == Term::Iri(v.harvesting_collection_class.clone())
            })
            .count()
    }
}
