//! Job lifecycle: one pipeline run, triggered by an activity.

use std::sync::Arc;

use chrono::Utc;
use log::info;

use crate::error::StoreError;
use crate::ids::EntityKind;
use crate::rdf::{
    ConstructQuery, FactSet, GraphPattern, Iri, Node, QuadPattern, SelectQuery, Term, Triple,
    Update,
};
use crate::status::Status;
use crate::store::{construct, GraphStore};
use crate::transition::status_update;
use crate::vocab::VOCAB;

#[derive(Clone)]
pub struct JobManager {
    store: Arc<dyn GraphStore>,
}

impl JobManager {
    pub fn new(store: Arc<dyn GraphStore>) -> Self {
        Self { store }
    }

    /// Inserts a new Job in `busy`, generated by `activity`.
    pub async fn create_job(
        &self,
        operation: &Iri,
        activity: &Iri,
        creator: &Iri,
        cogs_operation: &Iri,
        graph: &Iri,
    ) -> Result<Iri, StoreError> {
        let v = &*VOCAB;
        let (uuid, job) = EntityKind::Job.mint();
        let now = Term::date_time(Utc::now());

        let facts = FactSet::new(graph)
            .add(&job, &v.rdf_type, &v.job_class)
            .add(&job, &v.uuid, Term::string(uuid))
            .add(&job, &v.creator, creator)
            .add(&job, &v.status, Status::Busy.iri())
            .add(&job, &v.created, now.clone())
            .add(&job, &v.modified, now)
            .add(&job, &v.operation, operation)
            .add(&job, &v.cogs_operation, cogs_operation)
            .add(&job, &v.generated_by, activity)
            .build();

        self.store.update(&Update::InsertData(facts)).await?;
        info!("Created job {} for {}", job, activity);
        Ok(job)
    }

    /// Replaces the Job's status and modified time in one operation. The
    /// error link is written only for `Failed`, inside that same operation.
    ///
    /// A Job without a current status is left untouched and this still
    /// returns `Ok`.
    pub async fn update_job_status(
        &self,
        job: &Iri,
        status: Status,
        error: Option<&Iri>,
    ) -> Result<(), StoreError> {
        let extra = match (status, error) {
            (Status::Failed, Some(error)) => vec![Triple::new(job, &VOCAB.error, error)],
            _ => Vec::new(),
        };

        self.store
            .update(&status_update(job, status, Utc::now(), extra))
            .await?;
        info!("Job {} -> {}", job, status);
        Ok(())
    }

    /// Graph fragment describing the Job(s) generated by `activity`: type,
    /// status, error and its message when present, and the activity's type.
    pub async fn get_job_status_from_activity(
        &self,
        activity: &Iri,
    ) -> Result<Vec<Triple>, StoreError> {
        let v = &*VOCAB;
        let job = Node::var("job");
        let error = Node::var("error");

        let template = vec![
            QuadPattern::new(job.clone(), &v.rdf_type, &v.job_class),
            QuadPattern::new(job.clone(), &v.generated_by, activity),
            QuadPattern::new(job.clone(), &v.status, Node::var("status")),
            QuadPattern::new(job.clone(), &v.error, error.clone()),
            QuadPattern::new(error.clone(), &v.message, Node::var("message")),
            QuadPattern::new(activity, &v.rdf_type, Node::var("activityType")),
        ];
        let pattern = GraphPattern::new()
            .with(QuadPattern::new(job.clone(), &v.generated_by, activity))
            .with(QuadPattern::new(job.clone(), &v.rdf_type, &v.job_class))
            .with(QuadPattern::new(job.clone(), &v.status, Node::var("status")))
            .optional(vec![QuadPattern::new(job.clone(), &v.error, error.clone())])
            .optional(vec![
                QuadPattern::new(job, &v.error, error.clone()),
                QuadPattern::new(error, &v.message, Node::var("message")),
            ])
            .optional(vec![QuadPattern::new(
                activity,
                &v.rdf_type,
                Node::var("activityType"),
            )]);

        construct(self.store.as_ref(), &ConstructQuery::new(template, pattern)).await
    }

    /// Current status of `job`, if it has a recognised one.
    pub async fn get_job_status(&self, job: &Iri) -> Result<Option<Status>, StoreError> {
        let query = SelectQuery::new(
            &["status"],
            GraphPattern::new().with(QuadPattern::new(job, &VOCAB.status, Node::var("status"))),
        );
        let rows = self.store.select(&query).await?;
        Ok(rows
            .iter()
            .filter_map(|row| row.iri("status"))
            .find_map(Status::from_iri))
    }
}
