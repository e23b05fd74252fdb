use std::sync::{Arc, Mutex};

use chrono::{DateTime, TimeZone, Utc};

use crate::workflows::recruitment::domain::{Candidate, CandidateDraft};
use crate::workflows::recruitment::evidence::EvidenceUpload;
use crate::workflows::recruitment::letter::ReferenceSource;
use crate::workflows::recruitment::repository::{
    NotifyError, SignatureNotifier, SignatureRequest, SnapshotError, SnapshotStore,
};
use crate::workflows::recruitment::router::recruitment_router;
use crate::workflows::recruitment::service::RecruitmentService;

#[derive(Default)]
pub(super) struct MemoryStore {
    snapshot: Mutex<Option<Vec<Candidate>>>,
    pub(super) saves: Mutex<usize>,
}

impl MemoryStore {
    pub(super) fn seeded_with(candidates: Vec<Candidate>) -> Self {
        Self {
            snapshot: Mutex::new(Some(candidates)),
            saves: Mutex::new(0),
        }
    }

    pub(super) fn saved(&self) -> Option<Vec<Candidate>> {
        self.snapshot.lock().expect("lock").clone()
    }

    pub(super) fn save_count(&self) -> usize {
        *self.saves.lock().expect("lock")
    }
}

impl SnapshotStore for MemoryStore {
    fn load(&self) -> Result<Option<Vec<Candidate>>, SnapshotError> {
        Ok(self.snapshot.lock().expect("lock").clone())
    }

    fn save(&self, candidates: &[Candidate]) -> Result<(), SnapshotError> {
        *self.snapshot.lock().expect("lock") = Some(candidates.to_vec());
        *self.saves.lock().expect("lock") += 1;
        Ok(())
    }
}

/// Store whose snapshot cannot be read, forcing the seed fallback.
pub(super) struct CorruptStore;

impl SnapshotStore for CorruptStore {
    fn load(&self) -> Result<Option<Vec<Candidate>>, SnapshotError> {
        Err(SnapshotError::Corrupt("truncated payload".to_string()))
    }

    fn save(&self, _candidates: &[Candidate]) -> Result<(), SnapshotError> {
        Ok(())
    }
}

/// Store whose writes always fail; mutations must still apply in memory.
pub(super) struct ReadOnlyStore;

impl SnapshotStore for ReadOnlyStore {
    fn load(&self) -> Result<Option<Vec<Candidate>>, SnapshotError> {
        Ok(None)
    }

    fn save(&self, _candidates: &[Candidate]) -> Result<(), SnapshotError> {
        Err(SnapshotError::Unavailable("quota exceeded".to_string()))
    }
}

#[derive(Default)]
pub(super) struct MemoryNotifier {
    requests: Mutex<Vec<SignatureRequest>>,
}

impl MemoryNotifier {
    pub(super) fn requests(&self) -> Vec<SignatureRequest> {
        self.requests.lock().expect("lock").clone()
    }
}

impl SignatureNotifier for MemoryNotifier {
    fn send(&self, request: SignatureRequest) -> Result<(), NotifyError> {
        self.requests.lock().expect("lock").push(request);
        Ok(())
    }
}

pub(super) struct OfflineNotifier;

impl SignatureNotifier for OfflineNotifier {
    fn send(&self, _request: SignatureRequest) -> Result<(), NotifyError> {
        Err(NotifyError::Transport("gateway offline".to_string()))
    }
}

/// Pinned clock so reference codes are deterministic in tests.
pub(super) struct FixedReference(pub(super) DateTime<Utc>);

impl ReferenceSource for FixedReference {
    fn now(&self) -> DateTime<Utc> {
        self.0
    }
}

pub(super) fn fixed_instant() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 3, 14, 9, 26, 53).single().expect("valid instant")
}

pub(super) fn draft(name: &str, role: &str) -> CandidateDraft {
    CandidateDraft {
        name: name.to_string(),
        role: role.to_string(),
        email: "candidate@example.com".to_string(),
        phone: "+44 7700 900000".to_string(),
        address: "1 Long Example Road, Town".to_string(),
        ..CandidateDraft::default()
    }
}

pub(super) fn pdf_upload(bytes: usize) -> EvidenceUpload {
    EvidenceUpload {
        name: "dbs-certificate.pdf".to_string(),
        content_type: "application/pdf".to_string(),
        last_modified: fixed_instant(),
        bytes: vec![0x25; bytes],
    }
}

pub(super) fn build_service() -> (
    Arc<RecruitmentService<MemoryStore, MemoryNotifier>>,
    Arc<MemoryStore>,
    Arc<MemoryNotifier>,
) {
    let store = Arc::new(MemoryStore::default());
    let notifier = Arc::new(MemoryNotifier::default());
    let service = Arc::new(RecruitmentService::with_reference(
        store.clone(),
        notifier.clone(),
        Arc::new(FixedReference(fixed_instant())),
    ));
    (service, store, notifier)
}

pub(super) fn recruitment_app() -> (
    axum::Router,
    Arc<MemoryStore>,
    Arc<MemoryNotifier>,
) {
    let (service, store, notifier) = build_service();
    (recruitment_router(service), store, notifier)
}
