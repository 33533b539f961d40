//! Input and Results Containers.
//!
//! Construction is pure: the builder returns triples and the caller decides
//! which graph and which write operation they land in.

use crate::ids::EntityKind;
use crate::rdf::{Iri, Term, Triple};
use crate::vocab::VOCAB;

/// Files and remote resources attached to a Task.
///
/// Both lists are always present; an empty list means "none".
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Inputs {
    pub files: Vec<Iri>,
    pub remote_data_objects: Vec<Iri>,
}

impl Inputs {
    pub fn none() -> Self {
        Self::default()
    }

    pub fn files(files: Vec<Iri>) -> Self {
        Self {
            files,
            remote_data_objects: Vec::new(),
        }
    }

    pub fn remote_data_objects(remote_data_objects: Vec<Iri>) -> Self {
        Self {
            files: Vec::new(),
            remote_data_objects,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty() && self.remote_data_objects.is_empty()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContainerRole {
    Input,
    Results,
}

impl ContainerRole {
    /// Predicate linking the owning Task to a container in this role.
    pub fn link_predicate(&self) -> &'static Iri {
        match self {
            ContainerRole::Input => &VOCAB.input_container,
            ContainerRole::Results => &VOCAB.results_container,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct BuiltContainer {
    pub iri: Iri,
    pub role: ContainerRole,
    pub harvesting_collection: Option<Iri>,
    pub triples: Vec<Triple>,
}

impl BuiltContainer {
    /// The `owner -> container` link for this container's role.
    pub fn link_from(&self, owner: &Iri) -> Triple {
        Triple::new(owner, self.role.link_predicate(), &self.iri)
    }
}

/// Builds a container for `inputs`, or `None` when there is nothing to
/// contain. `creator` is recorded on the harvesting collection.
pub fn build_container(
    role: ContainerRole,
    inputs: &Inputs,
    creator: &Iri,
) -> Option<BuiltContainer> {
    if inputs.is_empty() {
        return None;
    }

    let v = &*VOCAB;
    let (container_uuid, container) = EntityKind::Container.mint();

    let mut triples = vec![
        Triple::new(&container, &v.rdf_type, &v.container_class),
        Triple::new(&container, &v.uuid, Term::string(container_uuid)),
    ];
    triples.extend(
        inputs
            .files
            .iter()
            .map(|file| Triple::new(&container, &v.has_file, file)),
    );

    let harvesting_collection = if inputs.remote_data_objects.is_empty() {
        None
    } else {
        let (collection_uuid, collection) = EntityKind::HarvestingCollection.mint();
        triples.push(Triple::new(
            &container,
            &v.has_harvesting_collection,
            &collection,
        ));
        triples.push(Triple::new(
            &collection,
            &v.rdf_type,
            &v.harvesting_collection_class,
        ));
        triples.push(Triple::new(&collection, &v.uuid, Term::string(collection_uuid)));
        triples.push(Triple::new(&collection, &v.creator, creator));
        triples.extend(
            inputs
                .remote_data_objects
                .iter()
                .map(|rdo| Triple::new(&collection, &v.has_part, rdo)),
        );
        Some(collection)
    };

    Some(BuiltContainer {
        iri: container,
        role,
        harvesting_collection,
        triples,
    })
}
