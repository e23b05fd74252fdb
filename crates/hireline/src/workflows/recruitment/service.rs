use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, MutexGuard};

use tracing::{info, warn};

use super::domain::{Candidate, CandidateDraft, CandidateId, Check, CheckStatus, PipelineStage};
use super::evidence::{self, EvidenceUpload, FileRejected};
use super::letter::{self, OfferLetter, OfferLetterTemplate, ReferenceSource, SystemReference};
use super::report::{self, PipelineSummary};
use super::repository::{seed_candidates, SignatureNotifier, SignatureRequest, SnapshotStore};
use super::validation::{self, InvalidRecipient, ValidationError};

/// Service composing validation, check/evidence rules, letter rendering, and
/// the snapshot/notification boundaries.
pub struct RecruitmentService<S, N> {
    candidates: Mutex<Vec<Candidate>>,
    store: Arc<S>,
    notifier: Arc<N>,
    reference: Arc<dyn ReferenceSource>,
    sequence: AtomicU64,
}

fn next_sequence(candidates: &[Candidate]) -> u64 {
    candidates
        .iter()
        .filter_map(|candidate| candidate.id.0.strip_prefix("cand-"))
        .filter_map(|suffix| suffix.parse::<u64>().ok())
        .max()
        .map(|highest| highest + 1)
        .unwrap_or(1)
}

impl<S, N> RecruitmentService<S, N>
where
    S: SnapshotStore + 'static,
    N: SignatureNotifier + 'static,
{
    /// Read the snapshot once and start serving. A missing or unreadable
    /// snapshot falls back to the fixed seed collection.
    pub fn load(store: Arc<S>, notifier: Arc<N>) -> Self {
        Self::with_reference(store, notifier, Arc::new(SystemReference))
    }

    pub fn with_reference(
        store: Arc<S>,
        notifier: Arc<N>,
        reference: Arc<dyn ReferenceSource>,
    ) -> Self {
        let candidates = match store.load() {
            Ok(Some(saved)) => saved,
            Ok(None) => seed_candidates(),
            Err(err) => {
                warn!(error = %err, "candidate snapshot unreadable; starting from seed data");
                seed_candidates()
            }
        };

        let sequence = AtomicU64::new(next_sequence(&candidates));

        Self {
            candidates: Mutex::new(candidates),
            store,
            notifier,
            reference,
            sequence,
        }
    }

    fn next_id(&self) -> CandidateId {
        let id = self.sequence.fetch_add(1, Ordering::Relaxed);
        CandidateId(format!("cand-{id:06}"))
    }

    fn lock(&self) -> MutexGuard<'_, Vec<Candidate>> {
        self.candidates.lock().expect("candidate list mutex poisoned")
    }

    /// Write the full collection through the snapshot boundary. The in-memory
    /// state stays authoritative, so a failed write is a warning, not an error.
    fn persist(&self, candidates: &[Candidate]) {
        if let Err(err) = self.store.save(candidates) {
            warn!(error = %err, "candidate snapshot write failed; keeping in-memory state");
        }
    }

    fn mutate<T>(
        &self,
        id: &CandidateId,
        apply: impl FnOnce(&mut Candidate) -> Result<T, RecruitmentError>,
    ) -> Result<T, RecruitmentError> {
        let mut guard = self.lock();
        let candidate = guard
            .iter_mut()
            .find(|candidate| &candidate.id == id)
            .ok_or_else(|| RecruitmentError::CandidateNotFound(id.clone()))?;
        let value = apply(candidate)?;
        self.persist(&guard);
        Ok(value)
    }

    /// Current collection, in insertion order.
    pub fn candidates(&self) -> Vec<Candidate> {
        self.lock().clone()
    }

    pub fn candidate(&self, id: &CandidateId) -> Result<Candidate, RecruitmentError> {
        self.lock()
            .iter()
            .find(|candidate| &candidate.id == id)
            .cloned()
            .ok_or_else(|| RecruitmentError::CandidateNotFound(id.clone()))
    }

    /// Per-stage counts and check progress for rendering.
    pub fn summary(&self) -> PipelineSummary {
        report::summarize(&self.lock())
    }

    /// Validate and append a new candidate at the first stage with three
    /// fresh pending checks.
    pub fn add_candidate(&self, draft: CandidateDraft) -> Result<Candidate, RecruitmentError> {
        let fields = validation::validated(draft)?;
        let candidate = Candidate {
            id: self.next_id(),
            name: fields.name,
            role: fields.role,
            availability: fields.availability,
            readiness: fields.readiness,
            stage: PipelineStage::Requisition,
            checks: Check::initial_set(),
            email: fields.email,
            phone: fields.phone,
            address: fields.address,
        };

        let mut guard = self.lock();
        guard.push(candidate.clone());
        self.persist(&guard);
        info!(candidate = %candidate.id, "candidate added to pipeline");
        Ok(candidate)
    }

    /// Replace a candidate's mutable fields. Stage and checks are untouched.
    pub fn update_candidate(
        &self,
        id: &CandidateId,
        draft: CandidateDraft,
    ) -> Result<Candidate, RecruitmentError> {
        let fields = validation::validated(draft)?;
        self.mutate(id, |candidate| {
            candidate.name = fields.name;
            candidate.role = fields.role;
            candidate.availability = fields.availability;
            candidate.readiness = fields.readiness;
            candidate.email = fields.email;
            candidate.phone = fields.phone;
            candidate.address = fields.address;
            Ok(candidate.clone())
        })
    }

    /// Delete by id. Idempotent: removing an absent candidate reports `false`.
    pub fn remove_candidate(&self, id: &CandidateId) -> bool {
        let mut guard = self.lock();
        let before = guard.len();
        guard.retain(|candidate| &candidate.id != id);
        let removed = guard.len() != before;
        if removed {
            self.persist(&guard);
        }
        removed
    }

    /// Move one stage forward, clamped at the final stage.
    pub fn advance_stage(&self, id: &CandidateId) -> Result<PipelineStage, RecruitmentError> {
        self.mutate(id, |candidate| {
            candidate.stage = candidate.stage.advanced();
            Ok(candidate.stage)
        })
    }

    /// Move one stage back, clamped at the first stage.
    pub fn retreat_stage(&self, id: &CandidateId) -> Result<PipelineStage, RecruitmentError> {
        self.mutate(id, |candidate| {
            candidate.stage = candidate.stage.retreated();
            Ok(candidate.stage)
        })
    }

    /// Overwrite one check's status. No transition guard: any status is
    /// reachable from any other, evidence or not.
    pub fn set_check_status(
        &self,
        id: &CandidateId,
        check_index: usize,
        status: CheckStatus,
    ) -> Result<Check, RecruitmentError> {
        self.mutate(id, |candidate| {
            let check = candidate.checks.get_mut(check_index).ok_or(
                RecruitmentError::CheckNotFound {
                    id: id.clone(),
                    index: check_index,
                },
            )?;
            check.status = status;
            Ok(check.clone())
        })
    }

    /// Attach evidence to a check, forcing it to `Passed`. A rejected file
    /// leaves the check exactly as it was.
    pub fn attach_evidence(
        &self,
        id: &CandidateId,
        check_index: usize,
        upload: EvidenceUpload,
    ) -> Result<Check, RecruitmentError> {
        let file = evidence::accept(upload)?;
        self.mutate(id, |candidate| {
            let check = candidate.checks.get_mut(check_index).ok_or(
                RecruitmentError::CheckNotFound {
                    id: id.clone(),
                    index: check_index,
                },
            )?;
            check.evidence = Some(file);
            check.status = CheckStatus::Passed;
            Ok(check.clone())
        })
    }

    /// Clear a check's evidence and reset it to `Pending`.
    pub fn remove_evidence(
        &self,
        id: &CandidateId,
        check_index: usize,
    ) -> Result<Check, RecruitmentError> {
        self.mutate(id, |candidate| {
            let check = candidate.checks.get_mut(check_index).ok_or(
                RecruitmentError::CheckNotFound {
                    id: id.clone(),
                    index: check_index,
                },
            )?;
            check.evidence = None;
            check.status = CheckStatus::Pending;
            Ok(check.clone())
        })
    }

    /// Render the offer document for a candidate without persisting it.
    pub fn offer_letter(
        &self,
        id: &CandidateId,
        template: &OfferLetterTemplate,
    ) -> Result<OfferLetter, RecruitmentError> {
        let candidate = self.candidate(id)?;
        Ok(letter::render(&candidate, template, self.reference.as_ref()))
    }

    /// Validate the recipient and hand the request to the signature boundary.
    pub fn send_for_signature(
        &self,
        id: &CandidateId,
        template_name: &str,
    ) -> Result<SignatureRequest, RecruitmentError> {
        let candidate = self.candidate(id)?;
        let recipient = validation::signature_recipient(&candidate.email)?;

        let request = SignatureRequest {
            template: template_name.to_string(),
            candidate_id: candidate.id.clone(),
            candidate_name: candidate.name.clone(),
            recipient,
        };
        self.notifier.send(request.clone())?;
        info!(candidate = %candidate.id, template = template_name, "offer sent for e-signature");
        Ok(request)
    }
}

/// Error raised by the recruitment service.
#[derive(Debug, thiserror::Error)]
pub enum RecruitmentError {
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error("candidate {0} not found")]
    CandidateNotFound(CandidateId),
    #[error("candidate {id} has no check at index {index}")]
    CheckNotFound { id: CandidateId, index: usize },
    #[error(transparent)]
    File(#[from] FileRejected),
    #[error(transparent)]
    Recipient(#[from] InvalidRecipient),
    #[error(transparent)]
    Notify(#[from] super::repository::NotifyError),
}
