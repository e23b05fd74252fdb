use std::sync::Arc;

use axum::{
    extract::{DefaultBodyLimit, Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post, put},
    Router,
};
use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine as _;
use chrono::{DateTime, Utc};
use serde::Deserialize;
use serde_json::json;

use super::domain::{CandidateDraft, CandidateId, CheckStatus};
use super::evidence::{EvidenceUpload, FileRejected};
use super::letter::OfferLetterTemplate;
use super::repository::{SignatureNotifier, SnapshotStore};
use super::service::{RecruitmentError, RecruitmentService};

/// Request-body cap for the evidence route. The largest accepted file is
/// `MAX_EVIDENCE_BYTES`, inflated by base64 (4/3) plus the JSON envelope;
/// oversize files must reach the handler so they are rejected with the
/// size in the error payload rather than cut off mid-transfer.
const EVIDENCE_BODY_BYTES: usize = 16 * 1024 * 1024;

/// Router builder exposing HTTP endpoints for the recruitment pipeline.
pub fn recruitment_router<S, N>(service: Arc<RecruitmentService<S, N>>) -> Router
where
    S: SnapshotStore + 'static,
    N: SignatureNotifier + 'static,
{
    Router::new()
        .route(
            "/api/v1/recruitment/candidates",
            get(list_handler::<S, N>).post(add_handler::<S, N>),
        )
        .route(
            "/api/v1/recruitment/candidates/:candidate_id",
            get(get_handler::<S, N>)
                .put(update_handler::<S, N>)
                .delete(remove_handler::<S, N>),
        )
        .route(
            "/api/v1/recruitment/candidates/:candidate_id/stage/advance",
            post(advance_handler::<S, N>),
        )
        .route(
            "/api/v1/recruitment/candidates/:candidate_id/stage/retreat",
            post(retreat_handler::<S, N>),
        )
        .route(
            "/api/v1/recruitment/candidates/:candidate_id/checks/:check_index/status",
            put(check_status_handler::<S, N>),
        )
        .route(
            "/api/v1/recruitment/candidates/:candidate_id/checks/:check_index/evidence",
            post(attach_evidence_handler::<S, N>)
                .delete(remove_evidence_handler::<S, N>)
                .layer(DefaultBodyLimit::max(EVIDENCE_BODY_BYTES)),
        )
        .route(
            "/api/v1/recruitment/candidates/:candidate_id/offer-letter",
            post(offer_letter_handler::<S, N>),
        )
        .route(
            "/api/v1/recruitment/candidates/:candidate_id/signature",
            post(signature_handler::<S, N>),
        )
        .route("/api/v1/recruitment/summary", get(summary_handler::<S, N>))
        .with_state(service)
}

#[derive(Debug, Deserialize)]
pub(crate) struct CheckStatusRequest {
    pub(crate) status: CheckStatus,
}

#[derive(Debug, Deserialize)]
pub(crate) struct EvidenceRequest {
    pub(crate) name: String,
    pub(crate) content_type: String,
    #[serde(default)]
    pub(crate) last_modified: Option<DateTime<Utc>>,
    /// Base64-encoded file bytes.
    pub(crate) content: String,
}

#[derive(Debug, Deserialize)]
pub(crate) struct SignatureSendRequest {
    pub(crate) template: String,
}

fn error_response(error: RecruitmentError) -> Response {
    let status = match &error {
        RecruitmentError::Validation(_) | RecruitmentError::Recipient(_) => {
            StatusCode::UNPROCESSABLE_ENTITY
        }
        RecruitmentError::CandidateNotFound(_) | RecruitmentError::CheckNotFound { .. } => {
            StatusCode::NOT_FOUND
        }
        RecruitmentError::File(FileRejected::Oversize { .. }) => StatusCode::PAYLOAD_TOO_LARGE,
        RecruitmentError::File(FileRejected::UnsupportedType { .. }) => {
            StatusCode::UNSUPPORTED_MEDIA_TYPE
        }
        RecruitmentError::Notify(_) => StatusCode::INTERNAL_SERVER_ERROR,
    };

    let payload = match &error {
        RecruitmentError::Validation(validation) => json!({
            "error": error.to_string(),
            "fields": validation.fields,
        }),
        _ => json!({ "error": error.to_string() }),
    };

    (status, axum::Json(payload)).into_response()
}

pub(crate) async fn list_handler<S, N>(
    State(service): State<Arc<RecruitmentService<S, N>>>,
) -> Response
where
    S: SnapshotStore + 'static,
    N: SignatureNotifier + 'static,
{
    (StatusCode::OK, axum::Json(service.candidates())).into_response()
}

pub(crate) async fn add_handler<S, N>(
    State(service): State<Arc<RecruitmentService<S, N>>>,
    axum::Json(draft): axum::Json<CandidateDraft>,
) -> Response
where
    S: SnapshotStore + 'static,
    N: SignatureNotifier + 'static,
{
    match service.add_candidate(draft) {
        Ok(candidate) => (StatusCode::CREATED, axum::Json(candidate)).into_response(),
        Err(error) => error_response(error),
    }
}

pub(crate) async fn get_handler<S, N>(
    State(service): State<Arc<RecruitmentService<S, N>>>,
    Path(candidate_id): Path<String>,
) -> Response
where
    S: SnapshotStore + 'static,
    N: SignatureNotifier + 'static,
{
    match service.candidate(&CandidateId(candidate_id)) {
        Ok(candidate) => (StatusCode::OK, axum::Json(candidate)).into_response(),
        Err(error) => error_response(error),
    }
}

pub(crate) async fn update_handler<S, N>(
    State(service): State<Arc<RecruitmentService<S, N>>>,
    Path(candidate_id): Path<String>,
    axum::Json(draft): axum::Json<CandidateDraft>,
) -> Response
where
    S: SnapshotStore + 'static,
    N: SignatureNotifier + 'static,
{
    match service.update_candidate(&CandidateId(candidate_id), draft) {
        Ok(candidate) => (StatusCode::OK, axum::Json(candidate)).into_response(),
        Err(error) => error_response(error),
    }
}

pub(crate) async fn remove_handler<S, N>(
    State(service): State<Arc<RecruitmentService<S, N>>>,
    Path(candidate_id): Path<String>,
) -> Response
where
    S: SnapshotStore + 'static,
    N: SignatureNotifier + 'static,
{
    service.remove_candidate(&CandidateId(candidate_id));
    StatusCode::NO_CONTENT.into_response()
}

pub(crate) async fn advance_handler<S, N>(
    State(service): State<Arc<RecruitmentService<S, N>>>,
    Path(candidate_id): Path<String>,
) -> Response
where
    S: SnapshotStore + 'static,
    N: SignatureNotifier + 'static,
{
    match service.advance_stage(&CandidateId(candidate_id)) {
        Ok(stage) => stage_response(stage),
        Err(error) => error_response(error),
    }
}

pub(crate) async fn retreat_handler<S, N>(
    State(service): State<Arc<RecruitmentService<S, N>>>,
    Path(candidate_id): Path<String>,
) -> Response
where
    S: SnapshotStore + 'static,
    N: SignatureNotifier + 'static,
{
    match service.retreat_stage(&CandidateId(candidate_id)) {
        Ok(stage) => stage_response(stage),
        Err(error) => error_response(error),
    }
}

fn stage_response(stage: super::domain::PipelineStage) -> Response {
    let payload = json!({
        "stage": stage,
        "stage_index": stage.index(),
        "stage_label": stage.label(),
    });
    (StatusCode::OK, axum::Json(payload)).into_response()
}

pub(crate) async fn check_status_handler<S, N>(
    State(service): State<Arc<RecruitmentService<S, N>>>,
    Path((candidate_id, check_index)): Path<(String, usize)>,
    axum::Json(request): axum::Json<CheckStatusRequest>,
) -> Response
where
    S: SnapshotStore + 'static,
    N: SignatureNotifier + 'static,
{
    match service.set_check_status(&CandidateId(candidate_id), check_index, request.status) {
        Ok(check) => (StatusCode::OK, axum::Json(check)).into_response(),
        Err(error) => error_response(error),
    }
}

pub(crate) async fn attach_evidence_handler<S, N>(
    State(service): State<Arc<RecruitmentService<S, N>>>,
    Path((candidate_id, check_index)): Path<(String, usize)>,
    axum::Json(request): axum::Json<EvidenceRequest>,
) -> Response
where
    S: SnapshotStore + 'static,
    N: SignatureNotifier + 'static,
{
    let bytes = match BASE64.decode(request.content.as_bytes()) {
        Ok(bytes) => bytes,
        Err(_) => {
            let payload = json!({ "error": "evidence content is not valid base64" });
            return (StatusCode::BAD_REQUEST, axum::Json(payload)).into_response();
        }
    };

    let upload = EvidenceUpload {
        name: request.name,
        content_type: request.content_type,
        last_modified: request.last_modified.unwrap_or_else(Utc::now),
        bytes,
    };

    match service.attach_evidence(&CandidateId(candidate_id), check_index, upload) {
        Ok(check) => (StatusCode::OK, axum::Json(check)).into_response(),
        Err(error) => error_response(error),
    }
}

pub(crate) async fn remove_evidence_handler<S, N>(
    State(service): State<Arc<RecruitmentService<S, N>>>,
    Path((candidate_id, check_index)): Path<(String, usize)>,
) -> Response
where
    S: SnapshotStore + 'static,
    N: SignatureNotifier + 'static,
{
    match service.remove_evidence(&CandidateId(candidate_id), check_index) {
        Ok(check) => (StatusCode::OK, axum::Json(check)).into_response(),
        Err(error) => error_response(error),
    }
}

pub(crate) async fn offer_letter_handler<S, N>(
    State(service): State<Arc<RecruitmentService<S, N>>>,
    Path(candidate_id): Path<String>,
    axum::Json(template): axum::Json<OfferLetterTemplate>,
) -> Response
where
    S: SnapshotStore + 'static,
    N: SignatureNotifier + 'static,
{
    match service.offer_letter(&CandidateId(candidate_id), &template) {
        Ok(letter) => (StatusCode::OK, axum::Json(letter)).into_response(),
        Err(error) => error_response(error),
    }
}

pub(crate) async fn signature_handler<S, N>(
    State(service): State<Arc<RecruitmentService<S, N>>>,
    Path(candidate_id): Path<String>,
    axum::Json(request): axum::Json<SignatureSendRequest>,
) -> Response
where
    S: SnapshotStore + 'static,
    N: SignatureNotifier + 'static,
{
    match service.send_for_signature(&CandidateId(candidate_id), &request.template) {
        Ok(sent) => (StatusCode::ACCEPTED, axum::Json(sent)).into_response(),
        Err(error) => error_response(error),
    }
}

pub(crate) async fn summary_handler<S, N>(
    State(service): State<Arc<RecruitmentService<S, N>>>,
) -> Response
where
    S: SnapshotStore + 'static,
    N: SignatureNotifier + 'static,
{
    (StatusCode::OK, axum::Json(service.summary())).into_response()
}
