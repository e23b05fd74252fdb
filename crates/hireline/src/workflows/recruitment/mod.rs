//! Recruitment pipeline workflow: candidate collection, stage progression,
//! verification checks with evidence, and offer-letter generation.
//!
//! Persistence and outbound signature dispatch sit behind the `SnapshotStore`
//! and `SignatureNotifier` traits so the business rules can be exercised in
//! isolation.

pub mod domain;
pub mod evidence;
pub mod letter;
pub mod report;
pub mod repository;
pub mod router;
pub mod service;
pub mod validation;

#[cfg(test)]
mod tests;

pub use domain::{
    Availability, Candidate, CandidateDraft, CandidateId, Check, CheckKind, CheckStatus,
    EvidenceFile, PipelineStage, Readiness,
};
pub use evidence::{EvidenceUpload, FileRejected, MAX_EVIDENCE_BYTES};
pub use letter::{OfferLetter, OfferLetterTemplate, ReferenceSource, SystemReference};
pub use report::{CandidateDigest, PipelineSummary, StageCount};
pub use repository::{
    seed_candidates, NotifyError, SignatureNotifier, SignatureRequest, SnapshotError,
    SnapshotStore,
};
pub use router::recruitment_router;
pub use service::{RecruitmentError, RecruitmentService};
pub use validation::{InvalidRecipient, ValidationError};
