//! Logical/physical File pairs.
//!
//! A logical File stands for the content; its physical counterpart is one
//! stored copy and points back with `nie:dataSource`. The pair is always
//! written and removed in a single operation.

use std::path::Path;
use std::sync::Arc;

use chrono::Utc;
use log::{debug, info};

use crate::config::FileConfig;
use crate::error::{SemjobsError, StoreError};
use crate::ids::{new_uuid, EntityKind};
use crate::rdf::{FactSet, GraphPattern, Iri, Node, QuadPattern, SelectQuery, Term, Update};
use crate::storage::ContentStore;
use crate::store::GraphStore;
use crate::vocab::VOCAB;

const FALLBACK_FORMAT: &str = "application/octet-stream";

/// Result of [`FileManager::create_file`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreatedFile {
    pub logical_file: Iri,
    pub physical_file: Iri,
    /// Where the caller should write the bytes.
    pub physical_file_path: String,
}

#[derive(Clone)]
pub struct FileManager {
    store: Arc<dyn GraphStore>,
    config: FileConfig,
}

/// MIME type for a file extension, falling back to `application/octet-stream`.
pub fn format_for_extension(extension: &str) -> String {
    mime_guess::from_ext(extension)
        .first()
        .map(|mime| mime.essence_str().to_string())
        .unwrap_or_else(|| FALLBACK_FORMAT.to_string())
}

impl FileManager {
    pub fn new(store: Arc<dyn GraphStore>, config: &FileConfig) -> Self {
        Self {
            store,
            config: config.clone(),
        }
    }

    /// Registers a new logical/physical pair in `graph` and returns the path
    /// the content should be written to. No bytes are written here.
    pub async fn create_file(
        &self,
        path_prefix: &str,
        extension: &str,
        size: u64,
        creator: &Iri,
        graph: &Iri,
    ) -> Result<CreatedFile, StoreError> {
        let v = &*VOCAB;
        let now = Term::date_time(Utc::now());
        let format = format_for_extension(extension);

        let (logical_uuid, logical_file) = EntityKind::LogicalFile.mint();
        let physical_uuid = new_uuid();
        let file_name = format!("{}.{}", physical_uuid, extension);
        let physical_file_path = format!("{}{}", path_prefix, file_name);
        let physical_file = Iri::new(self.config.to_external_uri(&physical_file_path));

        let mut facts = FactSet::new(graph);
        for (file, uuid) in [(&logical_file, logical_uuid), (&physical_file, physical_uuid)] {
            facts = facts
                .add(file, &v.rdf_type, &v.file_class)
                .add(file, &v.uuid, Term::string(uuid))
                .add(file, &v.file_name, Term::string(file_name.clone()))
                .add(file, &v.creator, creator)
                .add(file, &v.created, now.clone())
                .add(file, &v.modified, now.clone())
                .add(file, &v.format, Term::string(format.clone()))
                .add(file, &v.file_size, Term::integer(size))
                .add(file, &v.file_extension, Term::string(extension));
        }
        let facts = facts.add(&physical_file, &v.data_source, &logical_file).build();

        self.store.update(&Update::InsertData(facts)).await?;
        info!("Created file {} stored at {}", logical_file, physical_file);

        Ok(CreatedFile {
            logical_file,
            physical_file,
            physical_file_path,
        })
    }

    /// Replaces `modified` and `fileSize` on both files of the pair. A
    /// logical file without a physical counterpart is left untouched.
    pub async fn update_file(&self, logical_file: &Iri, size: u64) -> Result<(), StoreError> {
        let v = &*VOCAB;
        let graph = Node::var("g");
        let physical = Node::var("physical");
        let now = Term::date_time(Utc::now());

        let current = vec![
            QuadPattern::new(logical_file, &v.modified, Node::var("logicalModified"))
                .in_graph(graph.clone()),
            QuadPattern::new(logical_file, &v.file_size, Node::var("logicalSize"))
                .in_graph(graph.clone()),
            QuadPattern::new(physical.clone(), &v.modified, Node::var("physicalModified"))
                .in_graph(graph.clone()),
            QuadPattern::new(physical.clone(), &v.file_size, Node::var("physicalSize"))
                .in_graph(graph.clone()),
        ];
        let insert = vec![
            QuadPattern::new(logical_file, &v.modified, now.clone()).in_graph(graph.clone()),
            QuadPattern::new(logical_file, &v.file_size, Term::integer(size))
                .in_graph(graph.clone()),
            QuadPattern::new(physical.clone(), &v.modified, now).in_graph(graph.clone()),
            QuadPattern::new(physical.clone(), &v.file_size, Term::integer(size))
                .in_graph(graph.clone()),
        ];
        let pattern = current.iter().cloned().fold(
            GraphPattern::new().with(
                QuadPattern::new(physical.clone(), &v.data_source, logical_file)
                    .in_graph(graph.clone()),
            ),
            GraphPattern::with,
        );

        self.store
            .update(&Update::Modify {
                delete: current,
                insert,
                pattern,
            })
            .await?;
        debug!("Updated file metadata for {}", logical_file);
        Ok(())
    }

    /// Deletes every fact about the pair. Does nothing when no physical file
    /// points at `logical_file`.
    pub async fn remove_file(&self, logical_file: &Iri) -> Result<(), StoreError> {
        let v = &*VOCAB;
        let graph = Node::var("g");
        let physical = Node::var("physical");

        let physical_facts = QuadPattern::new(physical.clone(), Node::var("pp"), Node::var("po"))
            .in_graph(graph.clone());
        let logical_facts = QuadPattern::new(logical_file, Node::var("lp"), Node::var("lo"))
            .in_graph(graph.clone());

        let pattern = GraphPattern::new()
            .with(QuadPattern::new(physical, &v.data_source, logical_file).in_graph(graph))
            .with(physical_facts.clone())
            .with(logical_facts.clone());

        self.store
            .update(&Update::Modify {
                delete: vec![physical_facts, logical_facts],
                insert: Vec::new(),
                pattern,
            })
            .await?;
        debug!("Removed file {}", logical_file);
        Ok(())
    }

    /// The physical file pointing at `logical_file`, if any.
    pub async fn find_physical_file(&self, logical_file: &Iri) -> Result<Option<Iri>, StoreError> {
        let v = &*VOCAB;
        let query = SelectQuery::new(
            &["physical"],
            GraphPattern::new()
                .with(QuadPattern::new(Node::var("physical"), &v.data_source, logical_file))
                .with(QuadPattern::new(Node::var("physical"), &v.rdf_type, &v.file_class)),
        );
        let rows = self.store.select(&query).await?;
        Ok(rows.iter().find_map(|row| row.iri("physical").cloned()))
    }

    /// Removes the pair's facts, then the bytes behind the physical file.
    ///
    /// Facts go first: a failure deleting bytes leaves an orphaned blob
    /// rather than a record pointing at nothing.
    pub async fn remove_file_with_content(
        &self,
        logical_file: &Iri,
        content: &dyn ContentStore,
    ) -> Result<(), SemjobsError> {
        let physical = self.find_physical_file(logical_file).await?;
        self.remove_file(logical_file).await?;

        if let Some(physical) = physical {
            let path = self
                .config
                .to_internal_path(physical.as_str())
                .ok_or_else(|| crate::error::ContentError::NotLocal(physical.to_string()))?;
            content.delete(Path::new(&path)).await?;
        }
        Ok(())
    }
}
