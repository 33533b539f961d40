//! All managers wired to one store.

use std::sync::Arc;

use log::info;

use crate::config::Config;
use crate::error::StoreError;
use crate::error_record::ErrorManager;
use crate::file::FileManager;
use crate::job::JobManager;
use crate::rdf::Iri;
use crate::store::{GraphStore, HttpStore};
use crate::task::{SubmissionTasks, TaskManager};

/// Job, Task, File and Error managers sharing one [`GraphStore`].
#[derive(Clone)]
pub struct JobGraph {
    pub jobs: JobManager,
    pub tasks: TaskManager,
    pub files: FileManager,
    pub errors: ErrorManager,
    creator: Iri,
}

impl JobGraph {
    pub fn new(store: Arc<dyn GraphStore>, config: &Config) -> Self {
        Self {
            jobs: JobManager::new(store.clone()),
            tasks: TaskManager::new(store.clone()),
            files: FileManager::new(store.clone(), &config.files),
            errors: ErrorManager::new(store, &config.errors),
            creator: config.creator_iri(),
        }
    }

    /// Connects to the SPARQL endpoint named in `config`.
    pub fn from_config(config: &Config) -> Result<Self, StoreError> {
        let store = HttpStore::new(&config.store)?;
        info!(
            "Using SPARQL endpoint {} (updates: {})",
            store.query_endpoint(),
            store.update_endpoint()
        );
        Ok(Self::new(Arc::new(store), config))
    }

    /// Identity written as creator by [`JobGraph::submission_tasks`].
    pub fn creator(&self) -> &Iri {
        &self.creator
    }

    /// A task facade with this graph's creator and the given cogs operation
    /// and target graph.
    pub fn submission_tasks(&self, cogs_operation: Iri, graph: Iri) -> SubmissionTasks {
        SubmissionTasks::new(self.tasks.clone(), cogs_operation, self.creator.clone(), graph)
    }
}
