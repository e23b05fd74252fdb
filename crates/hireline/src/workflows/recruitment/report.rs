use serde::Serialize;

use super::domain::{Candidate, CandidateId, CheckStatus, PipelineStage};

/// Candidate count for one pipeline stage.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StageCount {
    pub stage: PipelineStage,
    pub label: &'static str,
    pub candidates: usize,
}

/// Compact per-candidate line for list rendering.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CandidateDigest {
    pub id: CandidateId,
    pub name: String,
    pub role: String,
    pub stage: PipelineStage,
    pub stage_label: &'static str,
    pub checks_passed: usize,
    pub checks_total: usize,
}

/// Snapshot of pipeline progress across the whole collection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PipelineSummary {
    pub total_candidates: usize,
    pub cleared_all_checks: usize,
    pub stage_counts: Vec<StageCount>,
    pub candidates: Vec<CandidateDigest>,
}

pub fn summarize(candidates: &[Candidate]) -> PipelineSummary {
    let stage_counts = PipelineStage::ordered()
        .into_iter()
        .map(|stage| StageCount {
            stage,
            label: stage.label(),
            candidates: candidates
                .iter()
                .filter(|candidate| candidate.stage == stage)
                .count(),
        })
        .collect();

    let digests: Vec<CandidateDigest> = candidates
        .iter()
        .map(|candidate| {
            let checks_passed = candidate
                .checks
                .iter()
                .filter(|check| check.status == CheckStatus::Passed)
                .count();
            CandidateDigest {
                id: candidate.id.clone(),
                name: candidate.name.clone(),
                role: candidate.role.clone(),
                stage: candidate.stage,
                stage_label: candidate.stage.label(),
                checks_passed,
                checks_total: candidate.checks.len(),
            }
        })
        .collect();

    let cleared_all_checks = digests
        .iter()
        .filter(|digest| digest.checks_total > 0 && digest.checks_passed == digest.checks_total)
        .count();

    PipelineSummary {
        total_candidates: candidates.len(),
        cleared_all_checks,
        stage_counts,
        candidates: digests,
    }
}
