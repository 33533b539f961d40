pub mod client;
pub mod config;
pub mod container;
pub mod delta;
pub mod error;
pub mod error_record;
pub mod file;
pub mod ids;
pub mod job;
pub mod rdf;
pub mod status;
pub mod storage;
pub mod store;
pub mod task;
pub mod telemetry;
pub mod vocab;

mod transition;

pub use client::JobGraph;
pub use config::{load_config, load_config_from_env, Config};
pub use container::{build_container, BuiltContainer, ContainerRole, Inputs};
pub use delta::{DeltaBatch, DeltaTriple};
pub use error::{ConfigError, ContentError, Result, SemjobsError, StoreError, TelemetryError};
pub use error_record::ErrorManager;
pub use file::{CreatedFile, FileManager};
pub use job::JobManager;
pub use rdf::{Iri, Term, Triple};
pub use status::Status;
pub use storage::{ContentStore, FileContentStore};
pub use store::{GraphStore, HttpStore, MemoryStore};
pub use task::{NewTask, SubmissionTasks, TaskInfo, TaskManager, TaskSummary};
pub use vocab::VOCAB;
