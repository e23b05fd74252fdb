use std::sync::Arc;

use super::common::*;
use crate::workflows::recruitment::domain::{
    CandidateDraft, CandidateId, CheckStatus, PipelineStage, Readiness,
};
use crate::workflows::recruitment::evidence::FileRejected;
use crate::workflows::recruitment::letter::OfferLetterTemplate;
use crate::workflows::recruitment::repository::seed_candidates;
use crate::workflows::recruitment::service::{RecruitmentError, RecruitmentService};
use crate::workflows::recruitment::validation::InvalidRecipient;

#[test]
fn empty_store_falls_back_to_the_seed_collection() {
    let (service, _, _) = build_service();
    let candidates = service.candidates();
    assert_eq!(candidates.len(), 3);
    assert_eq!(candidates[0].name, "Alice Johnson");
    assert!(candidates
        .iter()
        .all(|candidate| candidate.stage == PipelineStage::Requisition));
}

#[test]
fn corrupt_store_falls_back_to_the_seed_collection() {
    let service = RecruitmentService::load(
        Arc::new(CorruptStore),
        Arc::new(MemoryNotifier::default()),
    );
    assert_eq!(service.candidates().len(), 3);
}

#[test]
fn added_candidate_appears_once_with_fresh_checks() {
    let (service, store, _) = build_service();
    let candidate = service
        .add_candidate(draft("Jane Doe", "Engineer"))
        .expect("valid draft accepted");

    assert_eq!(candidate.stage, PipelineStage::Requisition);
    assert_eq!(candidate.checks.len(), 3);
    assert!(candidate
        .checks
        .iter()
        .all(|check| check.status == CheckStatus::Pending));

    let matching: Vec<_> = service
        .candidates()
        .into_iter()
        .filter(|stored| stored.id == candidate.id)
        .collect();
    assert_eq!(matching.len(), 1);

    let saved = store.saved().expect("snapshot written");
    assert!(saved.iter().any(|stored| stored.id == candidate.id));
}

#[test]
fn ids_continue_past_the_loaded_snapshot() {
    let store = Arc::new(MemoryStore::seeded_with(seed_candidates()));
    let service =
        RecruitmentService::load(store, Arc::new(MemoryNotifier::default()));
    let candidate = service
        .add_candidate(draft("Jane Doe", "Engineer"))
        .expect("accepted");
    assert_eq!(candidate.id, CandidateId("cand-000004".to_string()));
}

#[test]
fn invalid_draft_applies_nothing() {
    let (service, store, _) = build_service();
    let before = service.candidates();

    let result = service.add_candidate(CandidateDraft {
        name: String::new(),
        role: "Engineer".to_string(),
        ..CandidateDraft::default()
    });

    match result {
        Err(RecruitmentError::Validation(error)) => {
            assert_eq!(
                error.fields.get("name").map(String::as_str),
                Some("Name is required")
            );
        }
        other => panic!("expected validation error, got {other:?}"),
    }
    assert_eq!(service.candidates(), before);
    assert_eq!(store.save_count(), 0);
}

#[test]
fn update_replaces_fields_but_not_stage_or_checks() {
    let (service, _, _) = build_service();
    let candidate = service
        .add_candidate(draft("Jane Doe", "Engineer"))
        .expect("accepted");
    service.advance_stage(&candidate.id).expect("advance");

    let mut revised = draft("Jane Doe", "Staff Engineer");
    revised.readiness = Readiness::Ready;
    let updated = service
        .update_candidate(&candidate.id, revised)
        .expect("update accepted");

    assert_eq!(updated.role, "Staff Engineer");
    assert_eq!(updated.readiness, Readiness::Ready);
    assert_eq!(updated.stage, PipelineStage::Posting);
    assert_eq!(updated.checks.len(), 3);
}

#[test]
fn update_of_unknown_candidate_is_not_found() {
    let (service, _, _) = build_service();
    let missing = CandidateId("cand-999999".to_string());
    match service.update_candidate(&missing, draft("Jane Doe", "Engineer")) {
        Err(RecruitmentError::CandidateNotFound(id)) => assert_eq!(id, missing),
        other => panic!("expected not found, got {other:?}"),
    }
}

#[test]
fn remove_is_idempotent() {
    let (service, _, _) = build_service();
    let candidate = service
        .add_candidate(draft("Jane Doe", "Engineer"))
        .expect("accepted");

    assert!(service.remove_candidate(&candidate.id));
    assert!(!service.remove_candidate(&candidate.id));
    assert!(service
        .candidates()
        .iter()
        .all(|stored| stored.id != candidate.id));
}

#[test]
fn advance_then_retreat_round_trips_below_the_boundary() {
    let (service, _, _) = build_service();
    let candidate = service
        .add_candidate(draft("Jane Doe", "Engineer"))
        .expect("accepted");

    for _ in 0..6 {
        let advanced = service.advance_stage(&candidate.id).expect("advance");
        let retreated = service.retreat_stage(&candidate.id).expect("retreat");
        assert_eq!(retreated.index() + 1, advanced.index());
        service.advance_stage(&candidate.id).expect("advance again");
    }
}

#[test]
fn stage_clamps_at_both_ends() {
    let (service, _, _) = build_service();
    let candidate = service
        .add_candidate(draft("Jane Doe", "Engineer"))
        .expect("accepted");

    assert_eq!(
        service.retreat_stage(&candidate.id).expect("retreat"),
        PipelineStage::Requisition
    );

    for _ in 0..10 {
        service.advance_stage(&candidate.id).expect("advance");
    }
    assert_eq!(
        service.candidate(&candidate.id).expect("candidate").stage,
        PipelineStage::Onboarding
    );
    assert_eq!(
        service.advance_stage(&candidate.id).expect("advance"),
        PipelineStage::Onboarding
    );
}

#[test]
fn check_status_can_be_overwritten_freely() {
    let (service, _, _) = build_service();
    let candidate = service
        .add_candidate(draft("Jane Doe", "Engineer"))
        .expect("accepted");

    let check = service
        .set_check_status(&candidate.id, 1, CheckStatus::Failed)
        .expect("status set");
    assert_eq!(check.status, CheckStatus::Failed);

    let check = service
        .set_check_status(&candidate.id, 1, CheckStatus::Passed)
        .expect("status set");
    assert_eq!(check.status, CheckStatus::Passed);
    assert!(check.evidence.is_none());
}

#[test]
fn unknown_check_index_is_reported() {
    let (service, _, _) = build_service();
    let candidate = service
        .add_candidate(draft("Jane Doe", "Engineer"))
        .expect("accepted");

    match service.set_check_status(&candidate.id, 7, CheckStatus::Passed) {
        Err(RecruitmentError::CheckNotFound { index, .. }) => assert_eq!(index, 7),
        other => panic!("expected check not found, got {other:?}"),
    }
}

#[test]
fn attaching_evidence_forces_passed() {
    let (service, _, _) = build_service();
    let candidate = service
        .add_candidate(draft("Jane Doe", "Engineer"))
        .expect("accepted");

    let check = service
        .attach_evidence(&candidate.id, 0, pdf_upload(4096))
        .expect("upload accepted");
    assert_eq!(check.status, CheckStatus::Passed);
    let file = check.evidence.expect("evidence stored");
    assert_eq!(file.name, "dbs-certificate.pdf");
    assert_eq!(file.size, 4096);
}

#[test]
fn rejected_upload_leaves_the_check_untouched() {
    let (service, store, _) = build_service();
    let candidate = service
        .add_candidate(draft("Jane Doe", "Engineer"))
        .expect("accepted");
    service
        .set_check_status(&candidate.id, 0, CheckStatus::Failed)
        .expect("status set");
    let saves_before = store.save_count();

    match service.attach_evidence(&candidate.id, 0, pdf_upload(11 * 1024 * 1024)) {
        Err(RecruitmentError::File(FileRejected::Oversize { .. })) => {}
        other => panic!("expected oversize rejection, got {other:?}"),
    }

    let stored = service.candidate(&candidate.id).expect("candidate");
    assert_eq!(stored.checks[0].status, CheckStatus::Failed);
    assert!(stored.checks[0].evidence.is_none());
    assert_eq!(store.save_count(), saves_before);
}

#[test]
fn removing_evidence_resets_to_pending() {
    let (service, _, _) = build_service();
    let candidate = service
        .add_candidate(draft("Jane Doe", "Engineer"))
        .expect("accepted");
    service
        .attach_evidence(&candidate.id, 2, pdf_upload(1024))
        .expect("upload accepted");

    let check = service
        .remove_evidence(&candidate.id, 2)
        .expect("evidence removed");
    assert_eq!(check.status, CheckStatus::Pending);
    assert!(check.evidence.is_none());
}

#[test]
fn snapshot_write_failure_keeps_the_mutation() {
    let service = RecruitmentService::load(
        Arc::new(ReadOnlyStore),
        Arc::new(MemoryNotifier::default()),
    );
    let candidate = service
        .add_candidate(draft("Jane Doe", "Engineer"))
        .expect("mutation applies despite the failed write");
    assert!(service
        .candidates()
        .iter()
        .any(|stored| stored.id == candidate.id));
}

#[test]
fn offer_letter_uses_the_injected_reference_source() {
    let (service, _, _) = build_service();
    let candidate = service
        .add_candidate(draft("Jane Doe", "Engineer"))
        .expect("accepted");

    let letter = service
        .offer_letter(&candidate.id, &OfferLetterTemplate::default())
        .expect("letter renders");
    assert!(letter.reference.starts_with("JANEDOE-"));
    assert!(letter.body.contains("Dear Jane Doe,"));

    let again = service
        .offer_letter(&candidate.id, &OfferLetterTemplate::default())
        .expect("letter renders");
    assert_eq!(letter, again);
}

#[test]
fn signature_send_records_the_validated_recipient() {
    let (service, _, notifier) = build_service();
    let candidate = service
        .add_candidate(draft("Jane Doe", "Engineer"))
        .expect("accepted");

    let request = service
        .send_for_signature(&candidate.id, "Offer")
        .expect("send accepted");
    assert_eq!(request.recipient, "candidate@example.com");
    assert_eq!(request.template, "Offer");

    let recorded = notifier.requests();
    assert_eq!(recorded.len(), 1);
    assert_eq!(recorded[0], request);
}

#[test]
fn signature_send_rejects_bad_recipients() {
    let (service, _, notifier) = build_service();

    let mut no_email = draft("Jane Doe", "Engineer");
    no_email.email = String::new();
    let candidate = service.add_candidate(no_email).expect("accepted");
    match service.send_for_signature(&candidate.id, "Offer") {
        Err(RecruitmentError::Recipient(InvalidRecipient::Missing)) => {}
        other => panic!("expected missing recipient, got {other:?}"),
    }

    let mut bad_email = draft("John Doe", "Engineer");
    bad_email.email = "not-an-email".to_string();
    let candidate = service.add_candidate(bad_email).expect("accepted");
    match service.send_for_signature(&candidate.id, "Offer") {
        Err(RecruitmentError::Recipient(InvalidRecipient::Malformed { email })) => {
            assert_eq!(email, "not-an-email");
        }
        other => panic!("expected malformed recipient, got {other:?}"),
    }

    assert!(notifier.requests().is_empty());
}

#[test]
fn notifier_failure_surfaces_as_notify_error() {
    let service = RecruitmentService::load(
        Arc::new(MemoryStore::default()),
        Arc::new(OfflineNotifier),
    );
    let candidate = service
        .add_candidate(draft("Jane Doe", "Engineer"))
        .expect("accepted");

    match service.send_for_signature(&candidate.id, "Offer") {
        Err(RecruitmentError::Notify(_)) => {}
        other => panic!("expected notify error, got {other:?}"),
    }
}

#[test]
fn summary_counts_stages_and_cleared_checks() {
    let (service, _, _) = build_service();
    let candidate = service
        .add_candidate(draft("Jane Doe", "Engineer"))
        .expect("accepted");
    service.advance_stage(&candidate.id).expect("advance");
    for index in 0..3 {
        service
            .attach_evidence(&candidate.id, index, pdf_upload(256))
            .expect("upload accepted");
    }

    let summary = service.summary();
    assert_eq!(summary.total_candidates, 4);
    assert_eq!(summary.cleared_all_checks, 1);

    let posting = summary
        .stage_counts
        .iter()
        .find(|count| count.stage == PipelineStage::Posting)
        .expect("posting stage present");
    assert_eq!(posting.candidates, 1);

    let digest = summary
        .candidates
        .iter()
        .find(|digest| digest.id == candidate.id)
        .expect("digest present");
    assert_eq!(digest.checks_passed, 3);
    assert_eq!(digest.checks_total, 3);
}

#[test]
fn snapshot_round_trip_preserves_every_field() {
    let (service, store, _) = build_service();
    let candidate = service
        .add_candidate(draft("Jane Doe", "Engineer"))
        .expect("accepted");
    service.advance_stage(&candidate.id).expect("advance");
    service
        .attach_evidence(&candidate.id, 0, pdf_upload(512))
        .expect("upload accepted");

    let saved = store.saved().expect("snapshot written");
    let json = serde_json::to_string(&saved).expect("serializes");
    let restored: Vec<crate::workflows::recruitment::domain::Candidate> =
        serde_json::from_str(&json).expect("deserializes");
    assert_eq!(restored, saved);
    assert_eq!(restored, service.candidates());
}
