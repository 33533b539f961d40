//! Identifier minting.

use uuid::Uuid;

use crate::rdf::Iri;
use crate::vocab::base;

/// A fresh random (v4) UUID in hyphenated form.
pub fn new_uuid() -> String {
    Uuid::new_v4().to_string()
}

/// Entity kinds that get an IRI under their own base namespace.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntityKind {
    Job,
    Task,
    Container,
    HarvestingCollection,
    Error,
    LogicalFile,
}

impl EntityKind {
    pub fn base(&self) -> &'static str {
        match self {
            EntityKind::Job => base::JOB,
            EntityKind::Task => base::TASK,
            EntityKind::Container => base::CONTAINER,
            EntityKind::HarvestingCollection => base::HARVESTING_COLLECTION,
            EntityKind::Error => base::ERROR,
            EntityKind::LogicalFile => base::LOGICAL_FILE,
        }
    }

    /// Returns a fresh `(uuid, iri)` pair.
    pub fn mint(&self) -> (String, Iri) {
        let uuid = new_uuid();
        let iri = Iri::new(format!("{}{}", self.base(), uuid));
        (uuid, iri)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mint_is_unique_and_namespaced() {
        let (uuid_a, iri_a) = EntityKind::Task.mint();
        let (uuid_b, iri_b) = EntityKind::Task.mint();
        assert_ne!(uuid_a, uuid_b);
        assert_ne!(iri_a, iri_b);
        assert!(iri_a.as_str().starts_with(base::TASK));
        assert!(iri_a.as_str().ends_with(&uuid_a));
    }

    #[test]
    fn test_uuid_format() {
        let uuid = new_uuid();
        assert_eq!(uuid.len(), 36);
        assert!(Uuid::parse_str(&uuid).is_ok());
    }
}
