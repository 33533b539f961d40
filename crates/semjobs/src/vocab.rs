//! Vocabulary registry: namespaces, classes, predicates, base IRIs and the
//! known operation tags. Built once on first use and never mutated.

use std::sync::LazyLock;

use crate::rdf::Iri;

pub mod ns {
    pub const TASK: &str = "http://redpencil.data.gift/vocabularies/tasks/";
    pub const COGS: &str = "http://vocab.deri.ie/cogs#";
    pub const ADMS: &str = "http://www.w3.org/ns/adms#";
    pub const DCT: &str = "http://purl.org/dc/terms/";
    pub const PROV: &str = "http://www.w3.org/ns/prov#";
    pub const MU: &str = "http://mu.semte.ch/vocabularies/core/";
    pub const EXT: &str = "http://mu.semte.ch/vocabularies/ext/";
    pub const NFO: &str = "http://www.semanticdesktop.org/ontologies/2007/03/22/nfo#";
    pub const NIE: &str = "http://www.semanticdesktop.org/ontologies/2007/01/19/nie#";
    pub const DBPEDIA: &str = "http://dbpedia.org/ontology/";
    pub const OSLC: &str = "http://open-services.net/ns/core#";
    pub const HRVST: &str = "http://lblod.data.gift/vocabularies/harvesting/";
    pub const RDF: &str = "http://www.w3.org/1999/02/22-rdf-syntax-ns#";
}

/// Base namespaces new entity IRIs are minted under.
pub mod base {
    pub const JOB: &str = "http://redpencil.data.gift/id/job/";
    pub const TASK: &str = "http://redpencil.data.gift/id/task/";
    pub const CONTAINER: &str = "http://redpencil.data.gift/id/dataContainers/";
    pub const HARVESTING_COLLECTION: &str = "http://redpencil.data.gift/id/harvesting-collection/";
    pub const ERROR: &str = "http://redpencil.data.gift/id/jobs/error/";
    pub const LOGICAL_FILE: &str = "http://data.lblod.info/id/files/";
    pub const STATUS: &str = "http://redpencil.data.gift/id/concept/JobStatus/";
}

/// Operation tags used by the submission flow.
pub mod operation {
    pub const DOWNLOAD: &str = "http://lblod.data.gift/id/jobs/concept/TaskOperation/download";
    pub const IMPORT: &str = "http://lblod.data.gift/id/jobs/concept/TaskOperation/import";
    pub const AUTOMATIC_SUBMISSION_FLOW: &str =
        "http://lblod.data.gift/id/jobs/concept/JobOperation/automaticSubmissionFlow";
}

/// `cogs` classification tags.
pub mod cogs {
    pub const TRANSFORMATION_PROCESS: &str = "http://vocab.deri.ie/cogs#TransformationProcess";
    pub const WEB_SERVICE_LOOKUP: &str = "http://vocab.deri.ie/cogs#WebServiceLookup";
}

#[derive(Debug)]
pub struct Vocabulary {
    pub rdf_type: Iri,

    pub job_class: Iri,
    pub task_class: Iri,
    pub container_class: Iri,
    pub harvesting_collection_class: Iri,
    pub file_class: Iri,
    pub error_class: Iri,

    pub uuid: Iri,
    pub status: Iri,
    pub created: Iri,
    pub modified: Iri,
    pub creator: Iri,
    pub operation: Iri,
    pub cogs_operation: Iri,
    pub index: Iri,
    pub is_part_of: Iri,
    pub generated_by: Iri,
    pub input_container: Iri,
    pub results_container: Iri,
    pub error: Iri,
    pub has_file: Iri,
    pub has_harvesting_collection: Iri,
    pub has_part: Iri,

    pub file_name: Iri,
    pub format: Iri,
    pub file_size: Iri,
    pub file_extension: Iri,
    pub data_source: Iri,

    pub subject: Iri,
    pub message: Iri,
    pub detail: Iri,
    pub references: Iri,

    /// Link from a triggering activity to the remote resources it harvests.
    pub activity_has_part: Iri,
    /// Error cached on a remote data object by the download producer.
    pub cache_error: Iri,

    pub download_operation: Iri,
}

fn term(namespace: &str, local: &str) -> Iri {
    Iri::new(format!("{}{}", namespace, local))
}

impl Vocabulary {
    fn new() -> Self {
        Self {
            rdf_type: term(ns::RDF, "type"),

            job_class: term(ns::COGS, "Job"),
            task_class: term(ns::TASK, "Task"),
            container_class: term(ns::NFO, "DataContainer"),
            harvesting_collection_class: term(ns::HRVST, "HarvestingCollection"),
            file_class: term(ns::NFO, "FileDataObject"),
            error_class: term(ns::OSLC, "Error"),

            uuid: term(ns::MU, "uuid"),
            status: term(ns::ADMS, "status"),
            created: term(ns::DCT, "created"),
            modified: term(ns::DCT, "modified"),
            creator: term(ns::DCT, "creator"),
            operation: term(ns::TASK, "operation"),
            cogs_operation: term(ns::TASK, "cogsOperation"),
            index: term(ns::TASK, "index"),
            is_part_of: term(ns::DCT, "isPartOf"),
            generated_by: term(ns::PROV, "generatedBy"),
            input_container: term(ns::TASK, "inputContainer"),
            results_container: term(ns::TASK, "resultsContainer"),
            error: term(ns::TASK, "error"),
            has_file: term(ns::TASK, "hasFile"),
            has_harvesting_collection: term(ns::TASK, "hasHarvestingCollection"),
            has_part: term(ns::DCT, "hasPart"),

            file_name: term(ns::NFO, "fileName"),
            format: term(ns::DCT, "format"),
            file_size: term(ns::NFO, "fileSize"),
            file_extension: term(ns::DBPEDIA, "fileExtension"),
            data_source: term(ns::NIE, "dataSource"),

            subject: term(ns::DCT, "subject"),
            message: term(ns::OSLC, "message"),
            detail: term(ns::OSLC, "largePreview"),
            references: term(ns::DCT, "references"),

            activity_has_part: term(ns::NIE, "hasPart"),
            cache_error: term(ns::EXT, "cacheError"),

            download_operation: Iri::new(operation::DOWNLOAD),
        }
    }
}

pub static VOCAB: LazyLock<Vocabulary> = LazyLock::new(Vocabulary::new);
