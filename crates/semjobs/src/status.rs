//! Job and Task status vocabulary.

use serde::{Deserialize, Serialize};

use crate::rdf::Iri;
use crate::vocab::base;

/// Lifecycle status shared by Jobs and Tasks.
///
/// Jobs start `Busy`; Tasks may start `Scheduled`. Both end in `Success` or
/// `Failed`, and nothing here prevents a later transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Status {
    Scheduled,
    Busy,
    Success,
    Failed,
}

impl Status {
    pub const ALL: [Status; 4] = [
        Status::Scheduled,
        Status::Busy,
        Status::Success,
        Status::Failed,
    ];

    /// Stable wire identifier.
    pub fn as_str(&self) -> &'static str {
        match self {
            Status::Scheduled => "scheduled",
            Status::Busy => "busy",
            Status::Success => "success",
            Status::Failed => "failed",
        }
    }

    pub fn iri(&self) -> Iri {
        Iri::new(format!("{}{}", base::STATUS, self.as_str()))
    }

    pub fn from_iri(iri: &Iri) -> Option<Status> {
        let local = iri.as_str().strip_prefix(base::STATUS)?;
        Status::ALL.into_iter().find(|s| s.as_str() == local)
    }
}

impl std::fmt::Display for Status {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_iri_round_trip() {
        for status in Status::ALL {
            assert_eq!(Status::from_iri(&status.iri()), Some(status));
        }
        assert_eq!(
            Status::Busy.iri().as_str(),
            "http://redpencil.data.gift/id/concept/JobStatus/busy"
        );
    }

    #[test]
    fn test_unknown_status_iri() {
        assert_eq!(
            Status::from_iri(&Iri::new("http://example.org/status/busy")),
            None
        );
        assert_eq!(
            Status::from_iri(&Iri::new(format!("{}paused", base::STATUS))),
            None
        );
    }
}
