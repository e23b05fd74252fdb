use serde::{Deserialize, Serialize};

use super::domain::{
    Availability, Candidate, CandidateId, Check, PipelineStage, Readiness,
};

/// Persistence boundary for the candidate collection.
///
/// The in-memory collection stays authoritative; the store receives a full
/// snapshot after every mutation and is read once at startup.
pub trait SnapshotStore: Send + Sync {
    fn load(&self) -> Result<Option<Vec<Candidate>>, SnapshotError>;
    fn save(&self, candidates: &[Candidate]) -> Result<(), SnapshotError>;
}

/// Error enumeration for snapshot failures. Save failures are surfaced as
/// warnings by the service rather than failing the mutation.
#[derive(Debug, thiserror::Error)]
pub enum SnapshotError {
    #[error("snapshot store unavailable: {0}")]
    Unavailable(String),
    #[error("snapshot corrupt: {0}")]
    Corrupt(String),
}

/// Outbound e-signature boundary. No transport here; adapters log or record
/// the confirmation.
pub trait SignatureNotifier: Send + Sync {
    fn send(&self, request: SignatureRequest) -> Result<(), NotifyError>;
}

/// Payload handed to the signature boundary once the recipient is validated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SignatureRequest {
    pub template: String,
    pub candidate_id: CandidateId,
    pub candidate_name: String,
    pub recipient: String,
}

/// Signature dispatch error.
#[derive(Debug, thiserror::Error)]
pub enum NotifyError {
    #[error("signature transport unavailable: {0}")]
    Transport(String),
}

/// The fixed fallback collection used when no snapshot exists or the stored
/// one cannot be read.
pub fn seed_candidates() -> Vec<Candidate> {
    vec![
        Candidate {
            id: CandidateId("cand-000001".to_string()),
            name: "Alice Johnson".to_string(),
            role: "Support Staff".to_string(),
            availability: Availability::Available,
            readiness: Readiness::Ready,
            stage: PipelineStage::Requisition,
            checks: Check::initial_set(),
            email: "alice.johnson@example.com".to_string(),
            phone: "+44 7700 900123".to_string(),
            address: "123 High Street, London, SW1A 1AA".to_string(),
        },
        Candidate {
            id: CandidateId("cand-000002".to_string()),
            name: "Brian Lee".to_string(),
            role: "Finance Assistant".to_string(),
            availability: Availability::Available,
            readiness: Readiness::Pending,
            stage: PipelineStage::Requisition,
            checks: Check::initial_set(),
            email: "brian.lee@example.com".to_string(),
            phone: "+44 7700 900456".to_string(),
            address: "456 Park Lane, Manchester, M1 1AA".to_string(),
        },
        Candidate {
            id: CandidateId("cand-000003".to_string()),
            name: "Sophie Patel".to_string(),
            role: "HR Assistant".to_string(),
            availability: Availability::Unavailable,
            readiness: Readiness::Ready,
            stage: PipelineStage::Requisition,
            checks: Check::initial_set(),
            email: "sophie.patel@example.com".to_string(),
            phone: "+44 7700 900789".to_string(),
            address: "789 Queen Street, Birmingham, B1 1AA".to_string(),
        },
    ]
}
