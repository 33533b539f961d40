//! Task lifecycle: ordered steps of a Job.
//!
//! A Task's status moves `scheduled -> busy -> success | failed`. Results
//! and errors are attached only in the same write that flips the status, so
//! no reader ever sees a failed Task without its Error or a successful one
//! without its Results Container.

use std::sync::Arc;

use chrono::Utc;
use log::{debug, info};

use crate::container::{build_container, ContainerRole, Inputs};
use crate::error::StoreError;
use crate::ids::EntityKind;
use crate::rdf::{FactSet, GraphPattern, Iri, Node, QuadPattern, SelectQuery, Term, Triple, Update};
use crate::status::Status;
use crate::store::{GraphStore, Row};
use crate::transition::status_update;
use crate::vocab::VOCAB;

/// Arguments of [`TaskManager::create_task`].
#[derive(Debug, Clone)]
pub struct NewTask {
    pub operation: Iri,
    pub creator: Iri,
    pub status: Status,
    /// Position among the Job's Tasks. Not checked for uniqueness or gaps.
    pub index: i64,
    pub job: Iri,
    pub inputs: Inputs,
    pub cogs_operation: Iri,
    pub graph: Iri,
}

/// What [`TaskManager::get_task_info_from_remote_data_object`] resolves.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskInfo {
    pub task: Iri,
    pub status: Option<Status>,
    /// Graph holding the Task.
    pub graph: Iri,
    pub logical_file: Option<Iri>,
    pub error_message: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskSummary {
    pub task: Iri,
    pub index: Option<i64>,
    pub status: Option<Status>,
    pub operation: Option<Iri>,
}

#[derive(Clone)]
pub struct TaskManager {
    store: Arc<dyn GraphStore>,
}

impl TaskManager {
    pub fn new(store: Arc<dyn GraphStore>) -> Self {
        Self { store }
    }

    /// Inserts the Task and, for non-empty inputs, its Input Container in a
    /// single write.
    pub async fn create_task(&self, new_task: NewTask) -> Result<Iri, StoreError> {
        let v = &*VOCAB;
        let (uuid, task) = EntityKind::Task.mint();
        let now = Term::date_time(Utc::now());

        let mut facts = FactSet::new(&new_task.graph)
            .add(&task, &v.rdf_type, &v.task_class)
            .add(&task, &v.uuid, Term::string(uuid))
            .add(&task, &v.creator, &new_task.creator)
            .add(&task, &v.status, new_task.status.iri())
            .add(&task, &v.created, now.clone())
            .add(&task, &v.modified, now)
            .add(&task, &v.operation, &new_task.operation)
            .add(&task, &v.cogs_operation, &new_task.cogs_operation)
            .add(&task, &v.index, Term::integer(new_task.index))
            .add(&task, &v.is_part_of, &new_task.job);

        if let Some(container) =
            build_container(ContainerRole::Input, &new_task.inputs, &new_task.creator)
        {
            facts = facts
                .extend_triples([container.link_from(&task)])
                .extend_triples(container.triples);
        }

        self.store.update(&Update::InsertData(facts.build())).await?;
        info!(
            "Created task {} (index {}) for job {}",
            task, new_task.index, new_task.job
        );
        Ok(task)
    }

    /// Replaces the Task's status and modified time. In the same write, a
    /// `Failed` status attaches `error` and a `Success` status attaches a
    /// Results Container for non-empty `results`.
    ///
    /// A Task without a current status is left untouched and this still
    /// returns `Ok`.
    pub async fn update_task_status(
        &self,
        task: &Iri,
        status: Status,
        creator: &Iri,
        results: &Inputs,
        error: Option<&Iri>,
    ) -> Result<(), StoreError> {
        let mut extra = Vec::new();
        match status {
            Status::Failed => {
                if let Some(error) = error {
                    extra.push(Triple::new(task, &VOCAB.error, error));
                }
            }
            Status::Success => {
                if let Some(container) = build_container(ContainerRole::Results, results, creator) {
                    extra.push(container.link_from(task));
                    extra.extend(container.triples);
                }
            }
            Status::Scheduled | Status::Busy => {}
        }

        self.store
            .update(&status_update(task, status, Utc::now(), extra))
            .await?;
        info!("Task {} -> {}", task, status);
        Ok(())
    }

    /// Resolves the download Task responsible for `remote_data_object`.
    ///
    /// Follows `activity nie:hasPart rdo`, a link written by the producer
    /// of the activity and not by this crate; when it is missing nothing is
    /// found.
    pub async fn get_task_info_from_remote_data_object(
        &self,
        remote_data_object: &Iri,
    ) -> Result<Option<TaskInfo>, StoreError> {
        let v = &*VOCAB;
        let task = Node::var("task");
        let graph = Node::var("graph");

        let query = SelectQuery::new(
            &["task", "status", "graph", "logicalFile", "errorMessage"],
            GraphPattern::new()
                .with(QuadPattern::new(
                    Node::var("activity"),
                    &v.activity_has_part,
                    remote_data_object,
                ))
                .with(QuadPattern::new(
                    Node::var("job"),
                    &v.generated_by,
                    Node::var("activity"),
                ))
                .with(
                    QuadPattern::new(task.clone(), &v.is_part_of, Node::var("job"))
                        .in_graph(graph.clone()),
                )
                .with(
                    QuadPattern::new(task.clone(), &v.operation, &v.download_operation)
                        .in_graph(graph.clone()),
                )
                .with(QuadPattern::new(task, &v.status, Node::var("status")).in_graph(graph))
                .optional(vec![QuadPattern::new(
                    Node::var("logicalFile"),
                    &v.data_source,
                    remote_data_object,
                )])
                .optional(vec![
                    QuadPattern::new(remote_data_object, &v.cache_error, Node::var("cacheError")),
                    QuadPattern::new(
                        Node::var("cacheError"),
                        &v.message,
                        Node::var("errorMessage"),
                    ),
                ]),
        );

        let rows = self.store.select(&query).await?;
        let info = rows.iter().find_map(task_info_from_row);
        if info.is_none() {
            debug!("No download task found for {}", remote_data_object);
        }
        Ok(info)
    }

    /// Files in the Task's Input Container.
    pub async fn get_input_files_from_task(&self, task: &Iri) -> Result<Vec<Iri>, StoreError> {
        self.container_files(task, ContainerRole::Input).await
    }

    /// Files in the Task's Results Container.
    pub async fn get_result_files_from_task(&self, task: &Iri) -> Result<Vec<Iri>, StoreError> {
        self.container_files(task, ContainerRole::Results).await
    }

    /// Remote data objects in the harvesting collection of the Task's Input
    /// Container.
    pub async fn get_harvested_objects(&self, task: &Iri) -> Result<Vec<Iri>, StoreError> {
        let v = &*VOCAB;
        let query = SelectQuery::new(
            &["rdo"],
            GraphPattern::new()
                .with(QuadPattern::new(task, &v.input_container, Node::var("container")))
                .with(QuadPattern::new(
                    Node::var("container"),
                    &v.has_harvesting_collection,
                    Node::var("collection"),
                ))
                .with(QuadPattern::new(Node::var("collection"), &v.has_part, Node::var("rdo"))),
        );
        let rows = self.store.select(&query).await?;
        Ok(iris(&rows, "rdo"))
    }

    pub async fn get_task_status(&self, task: &Iri) -> Result<Option<Status>, StoreError> {
        let query = SelectQuery::new(
            &["status"],
            GraphPattern::new().with(QuadPattern::new(task, &VOCAB.status, Node::var("status"))),
        );
        let rows = self.store.select(&query).await?;
        Ok(rows
            .iter()
            .filter_map(|row| row.iri("status"))
            .find_map(Status::from_iri))
    }

    /// Tasks of `job`, ordered by index and then by IRI.
    pub async fn get_tasks_for_job(&self, job: &Iri) -> Result<Vec<TaskSummary>, StoreError> {
        let v = &*VOCAB;
        let task = Node::var("task");
        let query = SelectQuery::new(
            &["task", "index", "status", "operation"],
            GraphPattern::new()
                .with(QuadPattern::new(task.clone(), &v.is_part_of, job))
                .with(QuadPattern::new(task.clone(), &v.rdf_type, &v.task_class))
                .optional(vec![QuadPattern::new(task.clone(), &v.index, Node::var("index"))])
                .optional(vec![QuadPattern::new(task.clone(), &v.status, Node::var("status"))])
                .optional(vec![QuadPattern::new(task, &v.operation, Node::var("operation"))]),
        );

        let rows = self.store.select(&query).await?;
        let mut tasks: Vec<TaskSummary> = rows
            .iter()
            .filter_map(|row| {
                Some(TaskSummary {
                    task: row.iri("task")?.clone(),
                    index: row.literal("index").and_then(|l| l.as_i64()),
                    status: row.iri("status").and_then(Status::from_iri),
                    operation: row.iri("operation").cloned(),
                })
            })
            .collect();
        tasks.sort_by(|a, b| a.index.cmp(&b.index).then_with(|| a.task.cmp(&b.task)));
        Ok(tasks)
    }

    async fn container_files(
        &self,
        task: &Iri,
        role: ContainerRole,
    ) -> Result<Vec<Iri>, StoreError> {
        let query = SelectQuery::new(
            &["file"],
            GraphPattern::new()
                .with(QuadPattern::new(task, role.link_predicate(), Node::var("container")))
                .with(QuadPattern::new(
                    Node::var("container"),
                    &VOCAB.has_file,
                    Node::var("file"),
                )),
        );
        let rows = self.store.select(&query).await?;
        Ok(iris(&rows, "file"))
    }
}

fn task_info_from_row(row: &Row) -> Option<TaskInfo> {
    Some(TaskInfo {
        task: row.iri("task")?.clone(),
        status: row.iri("status").and_then(Status::from_iri),
        graph: row.iri("graph")?.clone(),
        logical_file: row.iri("logicalFile").cloned(),
        error_message: row.literal("errorMessage").map(|l| l.value.clone()),
    })
}

fn iris(rows: &[Row], var: &str) -> Vec<Iri> {
    rows.iter().filter_map(|row| row.iri(var).cloned()).collect()
}

/// A [`TaskManager`] narrowed to one flow: cogs operation, creator and graph
/// are fixed at construction, everything else is passed explicitly.
#[derive(Clone)]
pub struct SubmissionTasks {
    tasks: TaskManager,
    cogs_operation: Iri,
    creator: Iri,
    graph: Iri,
}

impl SubmissionTasks {
    pub fn new(tasks: TaskManager, cogs_operation: Iri, creator: Iri, graph: Iri) -> Self {
        Self {
            tasks,
            cogs_operation,
            creator,
            graph,
        }
    }

    pub fn tasks(&self) -> &TaskManager {
        &self.tasks
    }

    /// Creates a `scheduled` Task.
    pub async fn create(
        &self,
        job: &Iri,
        operation: &Iri,
        index: i64,
        inputs: Inputs,
    ) -> Result<Iri, StoreError> {
        self.tasks
            .create_task(NewTask {
                operation: operation.clone(),
                creator: self.creator.clone(),
                status: Status::Scheduled,
                index,
                job: job.clone(),
                inputs,
                cogs_operation: self.cogs_operation.clone(),
                graph: self.graph.clone(),
            })
            .await
    }

    pub async fn start(&self, task: &Iri) -> Result<(), StoreError> {
        self.tasks
            .update_task_status(task, Status::Busy, &self.creator, &Inputs::none(), None)
            .await
    }

    pub async fn succeed(&self, task: &Iri, results: &Inputs) -> Result<(), StoreError> {
        self.tasks
            .update_task_status(task, Status::Success, &self.creator, results, None)
            .await
    }

    pub async fn fail(&self, task: &Iri, error: &Iri) -> Result<(), StoreError> {
        self.tasks
            .update_task_status(task, Status::Failed, &self.creator, &Inputs::none(), Some(error))
            .await
    }
}
